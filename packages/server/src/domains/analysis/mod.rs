// Deep analysis: free-text query -> plan -> search -> enrichment -> formatted companies
pub mod actions;
pub mod error;
pub mod models;
pub mod prompts;

pub use actions::*;
pub use error::{AnalysisError, AnalysisStep};
