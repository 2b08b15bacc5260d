use tracing::debug;

use crate::evaluate::evaluate_rule;
use crate::extract::extract_parameters_limited;
use crate::{Analysis, AnalysisError, BatchOutcome, EngineConfig, Rule, RuleMatch, TestCase};

/// Run every rule against one URL/referral pair.
///
/// Rules are evaluated independently and in order; the returned matches keep
/// that order and carry each rule's position in `rules`. Zero matches is a
/// normal outcome.
///
/// # Errors
///
/// Returns [`AnalysisError::InvalidUrl`] if `url` cannot be parsed. No
/// partial result is produced in that case.
pub fn analyze(rules: &[Rule], url: &str, referral: &str) -> Result<Analysis, AnalysisError> {
    analyze_with(rules, url, referral, &EngineConfig::default())
}

/// [`analyze`] with explicit configuration.
///
/// # Errors
///
/// Returns [`AnalysisError`] if the URL is invalid or a configured input-size
/// limit is exceeded.
pub fn analyze_with(
    rules: &[Rule],
    url: &str,
    referral: &str,
    config: &EngineConfig,
) -> Result<Analysis, AnalysisError> {
    if let Some(limit) = config.max_rules {
        if rules.len() > limit {
            return Err(AnalysisError::TooManyRules {
                count: rules.len(),
                limit,
            });
        }
    }

    let parameters =
        extract_parameters_limited(url, &config.default_scheme, config.max_parameters)?;

    let mut matches = Vec::new();
    for (rule_index, rule) in rules.iter().enumerate() {
        let outcome = evaluate_rule(rule, &parameters, referral);
        debug!(rule = %rule.name, matched = outcome.matched, "evaluated rule");
        if outcome.matched {
            matches.push(RuleMatch {
                rule_index,
                rule_name: rule.name.clone(),
                output: outcome.output,
                match_details: outcome.match_details,
                conditions: rule.conditions.clone(),
            });
        }
    }

    debug!(url, rules = rules.len(), matches = matches.len(), "analysis complete");
    Ok(Analysis {
        parameters,
        matches,
    })
}

/// Analyze each test case independently. A failing case does not affect the
/// others; its error is recorded in its own [`BatchOutcome`].
#[must_use]
pub fn analyze_batch(rules: &[Rule], cases: &[TestCase]) -> Vec<BatchOutcome> {
    analyze_batch_with(rules, cases, &EngineConfig::default())
}

/// [`analyze_batch`] with explicit configuration.
#[must_use]
pub fn analyze_batch_with(
    rules: &[Rule],
    cases: &[TestCase],
    config: &EngineConfig,
) -> Vec<BatchOutcome> {
    cases
        .iter()
        .map(|case| BatchOutcome {
            case: case.clone(),
            result: analyze_with(rules, &case.url, &case.referral_source, config),
        })
        .collect()
}
