//! Error types for the cache
//!
//! Only construction can fail. Once a cache is running, invalid arguments are
//! reported through `bool` / `Option` returns instead of errors.

use thiserror::Error;

// == Cache Error Enum ==
/// Unified error type for cache construction.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum CacheError {
    /// The supplied configuration violates an invariant
    #[error("Invalid configuration: {0}")]
    Configuration(String),

    /// No scheduler could be obtained for the background sweep
    #[error("Scheduler unavailable: {0}")]
    Scheduler(String),
}

// == Result Type Alias ==
/// Convenience Result type for the cache.
pub type Result<T> = std::result::Result<T, CacheError>;
