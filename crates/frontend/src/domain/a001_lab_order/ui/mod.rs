pub mod list;
pub mod reports;
