//! Press quotation cost-computation engine
//!
//! A pure, synchronous computation library: given a box template snapshot,
//! an ordered quantity, and a list of configured production steps, it
//! derives per-step physical quantities and monetary costs and rolls them
//! up into the customer-facing total. Persistence, transport, and UI are
//! external collaborators injected behind the traits in [`catalog`].
//!
//! # Module structure
//!
//! ```text
//! quote-engine/src/
//! ├── config.rs     # explicit engine configuration (no globals)
//! ├── expr.rs       # dimension expression evaluator
//! ├── pricing/      # money helpers, quantity propagation, cost formulas, recompute
//! ├── edit.rs       # typed edit commands
//! └── catalog.rs    # external collaborator traits + in-memory implementations
//! ```
//!
//! The engine never panics and never returns an error from arithmetic: a
//! step with no valid basis, a malformed dimension expression, or a
//! non-finite parameter degrades to 0 so the live quotation form always
//! shows a number. Structured [`shared::AppError`] values appear only at
//! the edit/validation/persistence boundary.

pub mod catalog;
pub mod config;
pub mod edit;
pub mod expr;
pub mod pricing;

// Re-export public types
pub use catalog::{
    MaterialCatalog, MemoryCatalog, MemoryQuotationStore, QuotationStore, TemplateCatalog,
};
pub use config::EngineConfig;
pub use edit::{QuoteEdit, apply_edit};
pub use pricing::{recompute, tiered_thousands_cost};
