pub mod asset;
pub mod candidate;
pub mod notification;
pub mod user;
