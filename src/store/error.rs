use thiserror::Error;

use crate::RuleConfigError;

/// Errors produced when importing or exporting rules.
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("invalid rule json: {0}")]
    Json(#[from] serde_json::Error),

    #[error("rule {index} rejected: {source}")]
    Rule {
        index: usize,
        #[source]
        source: RuleConfigError,
    },
}
