pub mod invariants;
pub mod time;
pub mod validation;
