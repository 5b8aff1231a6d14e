pub mod access;
pub mod ai_service;
pub mod asset_service;
pub mod candidate_service;
pub mod geocoding_service;
pub mod notification_service;
pub mod report_service;
pub mod user_service;
