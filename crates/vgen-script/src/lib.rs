//! Script structure parsing, shorts derivation, and cost estimation.
//!
//! Everything in this crate is pure and deterministic: the same script in
//! always produces the same sections, shorts, and estimates out.

pub mod cost;
pub mod parser;
pub mod shorts;

pub use cost::{CostEstimate, CostEstimator, OperationCost};
pub use parser::parse_sections;
pub use shorts::{derive_shorts, estimate_dry_run, DryRunEstimate};
