//! Shared types for the press quotation system
//!
//! Common types used across crates: catalog models, the quotation
//! aggregate and its production steps, error types, and utility types.

pub mod error;
pub mod models;
pub mod quote;
pub mod types;
pub mod util;

// Re-exports
pub use error::{AppError, AppResult, ErrorCode};
pub use serde::{Deserialize, Serialize};
