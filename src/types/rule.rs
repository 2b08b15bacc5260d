use std::fmt;

use serde::{Deserialize, Serialize};

use super::condition::Condition;

/// How a rule combines the results of its conditions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LogicalOp {
    #[default]
    And,
    Or,
}

impl fmt::Display for LogicalOp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            LogicalOp::And => write!(f, "AND"),
            LogicalOp::Or => write!(f, "OR"),
        }
    }
}

/// The attribution labels a matched rule contributes. Any of them may be empty.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub struct Output {
    #[serde(rename = "type", default)]
    pub kind: String,
    #[serde(default)]
    pub platform: String,
    #[serde(default)]
    pub channel: String,
}

impl Output {
    pub fn new(
        kind: impl Into<String>,
        platform: impl Into<String>,
        channel: impl Into<String>,
    ) -> Self {
        Self {
            kind: kind.into(),
            platform: platform.into(),
            channel: channel.into(),
        }
    }
}

impl fmt::Display for Output {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "type: {}, platform: {}, channel: {}",
            self.kind, self.platform, self.channel
        )
    }
}

/// A named, ordered set of conditions combined by a single logical operator,
/// plus the output labels it contributes when it matches.
///
/// Rules are usually created through [`RuleSetBuilder`](super::RuleSetBuilder)
/// or imported from JSON with [`rules_from_json()`](crate::store::rules_from_json).
/// A rule imported without `conditionsOperator` defaults to [`LogicalOp::And`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Rule {
    pub name: String,
    #[serde(default)]
    pub conditions_operator: LogicalOp,
    pub conditions: Vec<Condition>,
    #[serde(default)]
    pub output: Output,
}

impl Rule {
    pub fn new(name: impl Into<String>, conditions_operator: LogicalOp) -> Self {
        Self {
            name: name.into(),
            conditions_operator,
            conditions: Vec::new(),
            output: Output::default(),
        }
    }
}
