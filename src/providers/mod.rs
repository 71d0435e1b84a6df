pub mod bca;
pub mod markup;

// Re-export for providers to easily use cache
pub use crate::core::cache::RateCache;
