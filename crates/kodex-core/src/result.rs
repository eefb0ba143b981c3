//! Convenience result type alias for Kodex.

use crate::error::AppError;

/// A specialized `Result` type for Kodex operations.
pub type AppResult<T> = Result<T, AppError>;
