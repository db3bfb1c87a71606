//! Data models
//!
//! Catalog entities shared between the quotation engine and any
//! transport/UI layer built on top of it. All IDs are `i64`
//! (snowflake-style, JSON-safe 53 bits).

pub mod box_template;
pub mod customer;
pub mod delegate;
pub mod material;
pub mod supplier;

// Re-exports
pub use box_template::*;
pub use customer::*;
pub use delegate::*;
pub use material::*;
pub use supplier::*;
