use std::fmt;

use thiserror::Error;

/// The four remote calls of a deep analysis, in execution order.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AnalysisStep {
    Plan,
    Search,
    Enrich,
    Format,
}

impl AnalysisStep {
    pub fn index(self) -> u32 {
        match self {
            AnalysisStep::Plan => 0,
            AnalysisStep::Search => 1,
            AnalysisStep::Enrich => 2,
            AnalysisStep::Format => 3,
        }
    }
}

impl fmt::Display for AnalysisStep {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            AnalysisStep::Plan => "planning",
            AnalysisStep::Search => "search",
            AnalysisStep::Enrich => "enrichment",
            AnalysisStep::Format => "formatting",
        };
        f.write_str(name)
    }
}

#[derive(Debug, Error)]
pub enum AnalysisError {
    #[error("Query cannot be empty")]
    EmptyQuery,

    /// A remote call failed; the chain stops at the first failure.
    #[error("{step} step failed: {source:#}")]
    Step {
        step: AnalysisStep,
        #[source]
        source: anyhow::Error,
    },

    #[error("Invalid JSON in final response")]
    InvalidFinalJson {
        #[source]
        source: serde_json::Error,
    },
}

impl AnalysisError {
    pub fn step(step: AnalysisStep, source: anyhow::Error) -> Self {
        AnalysisError::Step { step, source }
    }

    /// Index of the orchestrator step that failed, if a step failed.
    pub fn failed_step(&self) -> Option<u32> {
        match self {
            AnalysisError::EmptyQuery => None,
            AnalysisError::Step { step, .. } => Some(step.index()),
            AnalysisError::InvalidFinalJson { .. } => Some(AnalysisStep::Format.index()),
        }
    }

    pub fn is_validation(&self) -> bool {
        matches!(self, AnalysisError::EmptyQuery)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn step_error_message_includes_cause() {
        let err = AnalysisError::step(
            AnalysisStep::Search,
            anyhow::anyhow!("You.com search error 502"),
        );

        assert_eq!(err.to_string(), "search step failed: You.com search error 502");
        assert_eq!(err.failed_step(), Some(1));
    }

    #[test]
    fn invalid_final_json_message() {
        let source = serde_json::from_str::<serde_json::Value>("not json").unwrap_err();
        let err = AnalysisError::InvalidFinalJson { source };

        assert_eq!(err.to_string(), "Invalid JSON in final response");
        assert_eq!(err.failed_step(), Some(3));
    }
}
