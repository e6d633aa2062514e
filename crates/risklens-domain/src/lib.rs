//! RiskLens Domain Layer
//!
//! This crate contains the record model shared by every other RiskLens crate.
//! It performs no I/O; the analytical engine only ever reads these types.
//!
//! ## Key Concepts
//!
//! - **Risk**: the unit of analysis, either an anticipated risk or a live issue
//! - **Severity**: likelihood × impact, each on a 1-5 scale; the score is never stored independently
//! - **Business unit**: the fixed organisational grouping attached to every record
//! - **Risk level / velocity**: display bands derived from the score
//!
//! ## Architecture
//!
//! - Pure data and invariants only
//! - Delivery of notifications lives behind the [`traits::RiskNotifier`] seam
//! - Serialized field names follow the dashboard's camelCase JSON

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod business_unit;
pub mod error;
pub mod risk;
pub mod severity;
pub mod traits;

// Re-exports for convenience
pub use business_unit::BusinessUnit;
pub use error::DomainError;
pub use risk::{Risk, RiskId, RiskKind, RiskStatus};
pub use severity::{RiskLevel, RiskVelocity, Severity};
