//! Core error types for the mica-util crate.

use thiserror::Error;

/// Error type for heap allocation operations
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum HeapError {
    /// The heap budget cannot satisfy the request
    #[error("heap budget exhausted: requested {requested} bytes, {remaining} remaining")]
    OutOfMemory { requested: usize, remaining: usize },
}

/// Result type alias for heap operations
pub type HeapResult<T> = std::result::Result<T, HeapError>;
