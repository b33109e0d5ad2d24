use thiserror::Error;

use crate::input::InputError;

#[derive(Debug, Error)]
pub enum AnalysisError {
    #[error("invalid band table '{table}': {reason}")]
    Configuration { table: String, reason: String },
    #[error("record '{id}' has a non-finite score ({score})")]
    InvalidRecord { id: String, score: f64 },
    #[error("rank order violated: '{upper}' is ranked above '{lower}' with negative gap {gap}")]
    InvariantViolation {
        upper: String,
        lower: String,
        gap: f64,
    },
    #[error("score gap between '{upper}' and '{lower}' exceeds the f64 range")]
    GapOverflow { upper: String, lower: String },
}

impl AnalysisError {
    pub fn configuration(table: &str, reason: impl Into<String>) -> Self {
        AnalysisError::Configuration {
            table: table.to_string(),
            reason: reason.into(),
        }
    }
}

/// Top-level failure of a `run` invocation.
#[derive(Debug, Error)]
pub enum AppError {
    #[error(transparent)]
    Input(#[from] InputError),
    #[error(transparent)]
    Analysis(#[from] AnalysisError),
    #[error("failed to write reports: {0}")]
    Report(#[from] std::io::Error),
}
