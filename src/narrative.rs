//! Seam for the external text generator that writes a prose explanation of
//! a classification. Nothing in the matching path depends on it.

use std::time::Duration;

use serde::Serialize;
use thiserror::Error;
use tracing::warn;

use crate::{Condition, Output, RuleMatch};

pub const FALLBACK_NARRATIVE: &str =
    "A narrative explanation could not be generated for this result.";

/// What the generator is told about a classification: the conditions and
/// output of the first matched rule.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct NarrativeRequest {
    pub conditions: Vec<Condition>,
    pub output: Output,
}

impl NarrativeRequest {
    /// Build a request from the first match, if there is one.
    #[must_use]
    pub fn from_matches(matches: &[RuleMatch]) -> Option<Self> {
        matches.first().map(|m| Self {
            conditions: m.conditions.clone(),
            output: m.output.clone(),
        })
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum NarrativeError {
    #[error("no credential supplied for the narrative service")]
    MissingCredential,

    /// Transient failure; the call may be retried.
    #[error("narrative service unavailable: {0}")]
    Unavailable(String),

    /// Permanent failure; retrying will not help.
    #[error("narrative request rejected: {0}")]
    Rejected(String),
}

impl NarrativeError {
    #[must_use]
    pub fn is_retryable(&self) -> bool {
        matches!(self, NarrativeError::Unavailable(_))
    }
}

/// An opaque text-generation service.
pub trait NarrativeGenerator {
    /// # Errors
    ///
    /// Returns [`NarrativeError`] when the service fails.
    fn generate(&self, request: &NarrativeRequest, credential: &str)
        -> Result<String, NarrativeError>;
}

/// Capped retry with a fixed backoff between attempts.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RetryPolicy {
    pub max_attempts: u32,
    pub backoff: Duration,
    /// Returned once the attempts are used up or the request is rejected.
    pub fallback: String,
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self {
            max_attempts: 3,
            backoff: Duration::from_secs(2),
            fallback: FALLBACK_NARRATIVE.to_owned(),
        }
    }
}

/// Ask `generator` for a narrative, retrying transient failures per `policy`.
///
/// `sleeper` is called with `policy.backoff` between attempts only; pass
/// [`std::thread::sleep`] for real waits. Returns the policy's fallback text
/// when every attempt fails or the service rejects the request outright.
///
/// # Errors
///
/// Returns [`NarrativeError::MissingCredential`] without calling the
/// generator when `credential` is blank.
pub fn generate_narrative<G, S>(
    generator: &G,
    request: &NarrativeRequest,
    credential: &str,
    policy: &RetryPolicy,
    mut sleeper: S,
) -> Result<String, NarrativeError>
where
    G: NarrativeGenerator + ?Sized,
    S: FnMut(Duration),
{
    if credential.trim().is_empty() {
        return Err(NarrativeError::MissingCredential);
    }

    let attempts = policy.max_attempts.max(1);
    for attempt in 1..=attempts {
        match generator.generate(request, credential) {
            Ok(text) => return Ok(text),
            Err(err) if err.is_retryable() && attempt < attempts => {
                warn!(attempt, error = %err, "narrative generation failed, retrying");
                sleeper(policy.backoff);
            }
            Err(err) => {
                warn!(attempt, error = %err, "narrative generation gave up");
                break;
            }
        }
    }
    Ok(policy.fallback.clone())
}
