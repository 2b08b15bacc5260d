use std::fmt;

use serde::Serialize;

use super::condition::Condition;
use super::parameters::ParameterMap;
use super::rule::Output;

/// Result of evaluating one condition: whether it held, and a human-readable
/// explanation either way.
#[derive(Debug, Clone, PartialEq, Eq)]
#[must_use]
pub struct ConditionOutcome {
    pub matched: bool,
    pub detail: String,
}

impl ConditionOutcome {
    pub(crate) fn met(detail: String) -> Self {
        Self {
            matched: true,
            detail,
        }
    }

    pub(crate) fn not_met(detail: String) -> Self {
        Self {
            matched: false,
            detail,
        }
    }
}

/// Result of evaluating one rule.
///
/// `match_details` holds one entry per condition, in the rule's condition
/// order, whether or not that condition held.
#[derive(Debug, Clone, PartialEq, Eq)]
#[must_use]
pub struct RuleOutcome {
    pub matched: bool,
    pub match_details: Vec<String>,
    pub output: Output,
}

/// A rule that matched during an analysis run.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RuleMatch {
    /// Position of the rule in the list passed to the analysis.
    pub rule_index: usize,
    pub rule_name: String,
    pub output: Output,
    pub match_details: Vec<String>,
    pub conditions: Vec<Condition>,
}

/// Everything one analysis run produces: the extracted parameters and the
/// matching rules in input order.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[must_use]
pub struct Analysis {
    pub parameters: ParameterMap,
    pub matches: Vec<RuleMatch>,
}

impl Analysis {
    #[must_use]
    pub fn is_match(&self) -> bool {
        !self.matches.is_empty()
    }

    /// Names of the matched rules, in rule order.
    #[must_use]
    pub fn matched_names(&self) -> Vec<&str> {
        self.matches.iter().map(|m| m.rule_name.as_str()).collect()
    }

    /// Output labels of the matched rules, in rule order.
    #[must_use]
    pub fn outputs(&self) -> Vec<&Output> {
        self.matches.iter().map(|m| &m.output).collect()
    }
}

impl fmt::Display for Analysis {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} parameters, matched: [{}]",
            self.parameters.len(),
            self.matched_names().join(", ")
        )
    }
}
