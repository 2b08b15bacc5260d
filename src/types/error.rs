use thiserror::Error;

/// Raised when a raw string cannot be parsed as a URL, even after the
/// default scheme has been prepended.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum UrlError {
    #[error("malformed url '{url}': {reason}")]
    Malformed { url: String, reason: String },
}

/// Structural problems with a rule, reported when the rule is compiled or
/// imported rather than in the middle of an analysis.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RuleConfigError {
    #[error("rule at index {index} has an empty name")]
    EmptyName { index: usize },

    #[error("rule '{rule}' has no conditions")]
    EmptyConditions { rule: String },

    #[error("condition {position} in rule '{rule}' is missing a parameter name")]
    MissingParameter { rule: String, position: usize },

    #[error("condition {position} in rule '{rule}' requires a value for operator '{operator}'")]
    MissingValue {
        rule: String,
        position: usize,
        operator: String,
    },
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum AnalysisError {
    #[error("invalid url: {0}")]
    InvalidUrl(#[from] UrlError),

    #[error("{count} rules exceeds the configured limit of {limit}")]
    TooManyRules { count: usize, limit: usize },

    /// `count` is how many distinct names had been read when extraction
    /// stopped, not the size of the whole query.
    #[error("{count} query parameters exceeds the configured limit of {limit}")]
    TooManyParameters { count: usize, limit: usize },
}
