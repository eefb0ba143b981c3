//! # kodex-core
//!
//! Core crate for the Kodex plugin host. Contains the unified error
//! system and the configuration schemas shared by the plugin runtime
//! and the command-line driver.
//!
//! This crate has **no** internal dependencies on other Kodex crates.

pub mod config;
pub mod error;
pub mod result;

pub use error::{AppError, ErrorKind};
pub use result::AppResult;
