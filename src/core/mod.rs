pub mod clock;
pub mod services;
pub mod tracker;
pub mod utils;

pub use tracker::ExpenseTracker;
