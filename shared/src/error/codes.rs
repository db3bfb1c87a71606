//! Unified error codes for the press quotation system
//!
//! Error codes are organized by category:
//! - 0xxx: General errors
//! - 1xxx: Catalog errors (customers, suppliers, materials, templates)
//! - 2xxx: Quotation errors
//! - 9xxx: System errors

use serde::{Deserialize, Serialize};
use std::fmt;

/// Unified error code enum
///
/// Codes are represented as u16 values for efficient serialization and
/// cross-language compatibility (Rust, TypeScript frontends).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(into = "u16", try_from = "u16")]
#[repr(u16)]
pub enum ErrorCode {
    // ==================== 0xxx: General ====================
    /// Unknown error
    Unknown = 1,
    /// Validation failed
    ValidationFailed = 2,
    /// Resource not found
    NotFound = 3,
    /// Resource already exists
    AlreadyExists = 4,
    /// Invalid request
    InvalidRequest = 5,
    /// Value out of range
    ValueOutOfRange = 6,

    // ==================== 1xxx: Catalog ====================
    /// Customer not found
    CustomerNotFound = 1001,
    /// Supplier not found
    SupplierNotFound = 1002,
    /// Delegate not found
    DelegateNotFound = 1003,
    /// Material not found
    MaterialNotFound = 1004,
    /// Material variant index out of range
    MaterialVariantNotFound = 1005,
    /// Box template not found
    TemplateNotFound = 1006,

    // ==================== 2xxx: Quotation ====================
    /// Quotation not found
    QuotationNotFound = 2001,
    /// Production step not found on the quotation
    StepNotFound = 2002,
    /// Replacement parameters do not match the step's kind
    StepKindMismatch = 2003,
    /// Could not generate a unique quotation code
    CodeCollision = 2004,

    // ==================== 9xxx: System ====================
    /// Internal error
    InternalError = 9001,
}

impl ErrorCode {
    /// Default human-readable message for this error code
    pub fn message(&self) -> &'static str {
        match self {
            Self::Unknown => "Unknown error",
            Self::ValidationFailed => "Validation failed",
            Self::NotFound => "Resource not found",
            Self::AlreadyExists => "Resource already exists",
            Self::InvalidRequest => "Invalid request",
            Self::ValueOutOfRange => "Value out of range",
            Self::CustomerNotFound => "Customer not found",
            Self::SupplierNotFound => "Supplier not found",
            Self::DelegateNotFound => "Delegate not found",
            Self::MaterialNotFound => "Material not found",
            Self::MaterialVariantNotFound => "Material variant not found",
            Self::TemplateNotFound => "Box template not found",
            Self::QuotationNotFound => "Quotation not found",
            Self::StepNotFound => "Production step not found",
            Self::StepKindMismatch => "Step parameters do not match the step kind",
            Self::CodeCollision => "Could not generate a unique code",
            Self::InternalError => "Internal error",
        }
    }

    /// Numeric code value
    pub fn code(&self) -> u16 {
        *self as u16
    }
}

impl fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} ({})", self.message(), self.code())
    }
}

impl From<ErrorCode> for u16 {
    fn from(code: ErrorCode) -> u16 {
        code as u16
    }
}

/// Error returned when deserializing an unknown numeric error code
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InvalidErrorCode(pub u16);

impl fmt::Display for InvalidErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "invalid error code: {}", self.0)
    }
}

impl std::error::Error for InvalidErrorCode {}

impl TryFrom<u16> for ErrorCode {
    type Error = InvalidErrorCode;

    fn try_from(value: u16) -> Result<Self, Self::Error> {
        match value {
            1 => Ok(Self::Unknown),
            2 => Ok(Self::ValidationFailed),
            3 => Ok(Self::NotFound),
            4 => Ok(Self::AlreadyExists),
            5 => Ok(Self::InvalidRequest),
            6 => Ok(Self::ValueOutOfRange),
            1001 => Ok(Self::CustomerNotFound),
            1002 => Ok(Self::SupplierNotFound),
            1003 => Ok(Self::DelegateNotFound),
            1004 => Ok(Self::MaterialNotFound),
            1005 => Ok(Self::MaterialVariantNotFound),
            1006 => Ok(Self::TemplateNotFound),
            2001 => Ok(Self::QuotationNotFound),
            2002 => Ok(Self::StepNotFound),
            2003 => Ok(Self::StepKindMismatch),
            2004 => Ok(Self::CodeCollision),
            9001 => Ok(Self::InternalError),
            other => Err(InvalidErrorCode(other)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_code_round_trip() {
        let codes = [
            ErrorCode::Unknown,
            ErrorCode::ValidationFailed,
            ErrorCode::TemplateNotFound,
            ErrorCode::StepKindMismatch,
            ErrorCode::InternalError,
        ];
        for code in codes {
            let n: u16 = code.into();
            assert_eq!(ErrorCode::try_from(n), Ok(code));
        }
    }

    #[test]
    fn test_unknown_numeric_code_rejected() {
        assert_eq!(ErrorCode::try_from(4242), Err(InvalidErrorCode(4242)));
    }

    #[test]
    fn test_serde_as_number() {
        let json = serde_json::to_string(&ErrorCode::QuotationNotFound).unwrap();
        assert_eq!(json, "2001");
        let back: ErrorCode = serde_json::from_str(&json).unwrap();
        assert_eq!(back, ErrorCode::QuotationNotFound);
    }
}
