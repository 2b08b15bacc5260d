use tracing::debug;

use super::StoreError;
use crate::compile::validate_rule;
use crate::Rule;

/// Import rules from a JSON array of rule objects.
///
/// A rule without `conditionsOperator` defaults to `"and"`, and a missing
/// `output` to empty labels. Every rule is validated before it is returned.
///
/// # Errors
///
/// Returns [`StoreError::Json`] if the input is not a valid rule array and
/// [`StoreError::Rule`] for the first structurally invalid rule.
pub fn rules_from_json(input: &str) -> Result<Vec<Rule>, StoreError> {
    let rules: Vec<Rule> = serde_json::from_str(input)?;
    for (index, rule) in rules.iter().enumerate() {
        validate_rule(rule, index).map_err(|source| StoreError::Rule { index, source })?;
    }
    debug!(rules = rules.len(), "imported rules");
    Ok(rules)
}

/// Export rules as a pretty-printed JSON array readable by [`rules_from_json`].
///
/// # Errors
///
/// Returns [`StoreError::Json`] if serialization fails.
pub fn rules_to_json(rules: &[Rule]) -> Result<String, StoreError> {
    Ok(serde_json::to_string_pretty(rules)?)
}
