pub mod holdings;
pub mod reports;
