//! Unified error system for the press quotation workspace
//!
//! - [`ErrorCode`]: standardized error codes, stable numeric values
//! - [`AppError`]: rich error type with code, message, and details
//! - [`AppResult`]: result alias
//!
//! # Error Code Ranges
//!
//! - 0xxx: General errors
//! - 1xxx: Catalog errors
//! - 2xxx: Quotation errors
//! - 9xxx: System errors
//!
//! # Example
//!
//! ```
//! use shared::error::{AppError, ErrorCode};
//!
//! let err = AppError::with_message(ErrorCode::ValidationFailed, "ups_in_sheet must be finite")
//!     .with_detail("field", "ups_in_sheet");
//! assert_eq!(err.code, ErrorCode::ValidationFailed);
//! ```

mod codes;
mod types;

pub use codes::{ErrorCode, InvalidErrorCode};
pub use types::{AppError, AppResult};
