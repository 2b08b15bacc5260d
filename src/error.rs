use thiserror::Error;

use crate::store::StoreError;
use crate::{AnalysisError, RuleConfigError, UrlError};

/// Unified error type covering rule validation, analysis, rule storage, and I/O.
///
/// Returned by convenience methods like [`RuleSet::from_json()`](crate::RuleSet::from_json)
/// and [`RuleSet::from_file()`](crate::RuleSet::from_file).
#[derive(Debug, Error)]
pub enum UtmatchError {
    #[error(transparent)]
    Config(#[from] RuleConfigError),

    #[error(transparent)]
    Analysis(#[from] AnalysisError),

    #[error(transparent)]
    Url(#[from] UrlError),

    #[error(transparent)]
    Store(#[from] StoreError),

    #[error(transparent)]
    Io(#[from] std::io::Error),
}
