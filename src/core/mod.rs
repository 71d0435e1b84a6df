//! Core business logic abstractions

pub mod cache;
pub mod category;
pub mod config;
pub mod log;
pub mod money;
pub mod rate;
pub mod rounding;
pub mod view;
pub mod worksheet;

// Re-export main types for cleaner imports
pub use rate::{RateError, RateProvider, RateState};
pub use view::View;
