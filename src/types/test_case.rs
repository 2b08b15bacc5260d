use serde::{Deserialize, Serialize};

use super::error::AnalysisError;
use super::outcome::Analysis;

/// A stored (URL, referral) pair used to verify a rule set in bulk.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TestCase {
    pub url: String,
    pub referral_source: String,
}

impl TestCase {
    pub fn new(url: impl Into<String>, referral_source: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            referral_source: referral_source.into(),
        }
    }
}

/// One entry of a batch run: the case and its independent analysis result.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BatchOutcome {
    pub case: TestCase,
    pub result: Result<Analysis, AnalysisError>,
}
