//! Analysis domain actions - business logic functions
//!
//! Actions take `&ServerDeps` and never touch HTTP types; the route layer
//! maps their errors to responses.

pub mod deep_analysis;
pub mod plan;

pub use deep_analysis::run_deep_analysis;
pub use plan::{create_plan, PlannedAnalysis};
