//! Common types for the shared crate

/// Timestamp type (Unix milliseconds)
pub type Timestamp = i64;

/// Id of an unsaved record; the store assigns a real id on first save
pub const UNSAVED_ID: i64 = 0;
