use std::fmt;

use serde::{Deserialize, Serialize};

/// Operators available to a [`Condition::Parameter`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ParamOperator {
    #[default]
    Exists,
    NotExists,
    Equals,
    NotEquals,
    NotPresent,
}

/// Operators available to a [`Condition::Referral`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ReferralOperator {
    #[default]
    Equals,
    Contains,
    NotPresent,
}

/// Discriminant of a [`Condition`], used when switching a condition from one
/// kind to the other.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ConditionKind {
    Parameter,
    Referral,
}

/// An atomic test against either a URL query parameter or the referral string.
///
/// `value` is only meaningful for operators that compare against something
/// (`equals`, `not_equals`, `contains`); it is ignored otherwise.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Condition {
    Parameter {
        parameter: String,
        operator: ParamOperator,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        value: Option<String>,
    },
    Referral {
        operator: ReferralOperator,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        value: Option<String>,
    },
}

/// A single-field change applied to a [`Condition`] with [`Condition::edit`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConditionEdit {
    Kind(ConditionKind),
    Parameter(String),
    ParamOperator(ParamOperator),
    ReferralOperator(ReferralOperator),
    Value(Option<String>),
}

impl From<ParamOperator> for ConditionEdit {
    fn from(op: ParamOperator) -> Self {
        ConditionEdit::ParamOperator(op)
    }
}

impl From<ReferralOperator> for ConditionEdit {
    fn from(op: ReferralOperator) -> Self {
        ConditionEdit::ReferralOperator(op)
    }
}

impl ParamOperator {
    #[must_use]
    pub fn requires_value(self) -> bool {
        matches!(self, ParamOperator::Equals | ParamOperator::NotEquals)
    }

    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            ParamOperator::Exists => "exists",
            ParamOperator::NotExists => "not_exists",
            ParamOperator::Equals => "equals",
            ParamOperator::NotEquals => "not_equals",
            ParamOperator::NotPresent => "not_present",
        }
    }
}

impl ReferralOperator {
    #[must_use]
    pub fn requires_value(self) -> bool {
        matches!(self, ReferralOperator::Equals | ReferralOperator::Contains)
    }

    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            ReferralOperator::Equals => "equals",
            ReferralOperator::Contains => "contains",
            ReferralOperator::NotPresent => "not_present",
        }
    }
}

impl fmt::Display for ParamOperator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl fmt::Display for ReferralOperator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl Condition {
    #[must_use]
    pub fn kind(&self) -> ConditionKind {
        match self {
            Condition::Parameter { .. } => ConditionKind::Parameter,
            Condition::Referral { .. } => ConditionKind::Referral,
        }
    }

    /// The operator name as it appears in rule files and match details.
    #[must_use]
    pub fn operator_name(&self) -> &'static str {
        match self {
            Condition::Parameter { operator, .. } => operator.as_str(),
            Condition::Referral { operator, .. } => operator.as_str(),
        }
    }

    #[must_use]
    pub fn value(&self) -> Option<&str> {
        match self {
            Condition::Parameter { value, .. } | Condition::Referral { value, .. } => {
                value.as_deref()
            }
        }
    }

    #[must_use]
    pub fn requires_value(&self) -> bool {
        match self {
            Condition::Parameter { operator, .. } => operator.requires_value(),
            Condition::Referral { operator, .. } => operator.requires_value(),
        }
    }

    /// Produce a new condition with one field changed.
    ///
    /// Switching kind keeps the value and resets the operator to the new
    /// kind's default. Selecting an operator that takes no value drops the
    /// value. Edits that do not apply to the current kind (for example a
    /// parameter name on a referral condition) leave the condition unchanged.
    #[must_use]
    pub fn edit(self, edit: ConditionEdit) -> Condition {
        match (self, edit) {
            (Condition::Parameter { value, .. }, ConditionEdit::Kind(ConditionKind::Referral)) => {
                Condition::Referral {
                    operator: ReferralOperator::default(),
                    value,
                }
            }
            (Condition::Referral { value, .. }, ConditionEdit::Kind(ConditionKind::Parameter)) => {
                Condition::Parameter {
                    parameter: String::new(),
                    operator: ParamOperator::default(),
                    value,
                }
            }
            (Condition::Parameter { operator, value, .. }, ConditionEdit::Parameter(parameter)) => {
                Condition::Parameter {
                    parameter,
                    operator,
                    value,
                }
            }
            (
                Condition::Parameter {
                    parameter, value, ..
                },
                ConditionEdit::ParamOperator(operator),
            ) => Condition::Parameter {
                parameter,
                operator,
                value: value.filter(|_| operator.requires_value()),
            },
            (Condition::Referral { value, .. }, ConditionEdit::ReferralOperator(operator)) => {
                Condition::Referral {
                    operator,
                    value: value.filter(|_| operator.requires_value()),
                }
            }
            (
                Condition::Parameter {
                    parameter,
                    operator,
                    ..
                },
                ConditionEdit::Value(value),
            ) => Condition::Parameter {
                parameter,
                operator,
                value,
            },
            (Condition::Referral { operator, .. }, ConditionEdit::Value(value)) => {
                Condition::Referral { operator, value }
            }
            (
                unchanged,
                ConditionEdit::Kind(_)
                | ConditionEdit::Parameter(_)
                | ConditionEdit::ParamOperator(_)
                | ConditionEdit::ReferralOperator(_),
            ) => unchanged,
        }
    }

    /// Change the operator. A [`ParamOperator`] only applies to parameter
    /// conditions and a [`ReferralOperator`] only to referral conditions.
    #[must_use]
    pub fn with_operator(self, operator: impl Into<ConditionEdit>) -> Condition {
        match operator.into() {
            edit @ (ConditionEdit::ParamOperator(_) | ConditionEdit::ReferralOperator(_)) => {
                self.edit(edit)
            }
            _ => self,
        }
    }

    #[must_use]
    pub fn with_value(self, value: impl Into<String>) -> Condition {
        self.edit(ConditionEdit::Value(Some(value.into())))
    }

    #[must_use]
    pub fn with_parameter(self, parameter: impl Into<String>) -> Condition {
        self.edit(ConditionEdit::Parameter(parameter.into()))
    }

    /// Turn this into a referral condition, keeping the value.
    #[must_use]
    pub fn into_referral(self) -> Condition {
        self.edit(ConditionEdit::Kind(ConditionKind::Referral))
    }

    /// Turn this into a condition on `parameter`, keeping the value. An
    /// existing parameter condition keeps its operator.
    #[must_use]
    pub fn into_parameter(self, parameter: impl Into<String>) -> Condition {
        self.edit(ConditionEdit::Kind(ConditionKind::Parameter))
            .with_parameter(parameter)
    }
}

impl fmt::Display for Condition {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Condition::Parameter {
                parameter,
                operator,
                value: Some(value),
            } if operator.requires_value() => write!(f, "param({parameter}) {operator} '{value}'"),
            Condition::Parameter {
                parameter,
                operator,
                ..
            } => write!(f, "param({parameter}) {operator}"),
            Condition::Referral {
                operator,
                value: Some(value),
            } if operator.requires_value() => write!(f, "referral {operator} '{value}'"),
            Condition::Referral { operator, .. } => write!(f, "referral {operator}"),
        }
    }
}

/// Intermediate builder for parameter conditions.
/// Created by [`param()`]; requires an operator method to produce a [`Condition`].
#[derive(Debug, Clone)]
pub struct ParamExpr {
    parameter: String,
}

impl ParamExpr {
    fn build(self, operator: ParamOperator, value: Option<String>) -> Condition {
        Condition::Parameter {
            parameter: self.parameter,
            operator,
            value,
        }
    }

    #[must_use]
    pub fn exists(self) -> Condition {
        self.build(ParamOperator::Exists, None)
    }

    #[must_use]
    pub fn not_exists(self) -> Condition {
        self.build(ParamOperator::NotExists, None)
    }

    #[must_use]
    pub fn not_present(self) -> Condition {
        self.build(ParamOperator::NotPresent, None)
    }

    #[must_use]
    pub fn equals(self, value: impl Into<String>) -> Condition {
        self.build(ParamOperator::Equals, Some(value.into()))
    }

    #[must_use]
    pub fn not_equals(self, value: impl Into<String>) -> Condition {
        self.build(ParamOperator::NotEquals, Some(value.into()))
    }
}

/// Intermediate builder for referral conditions. Created by [`referral()`].
#[derive(Debug, Clone, Copy, Default)]
pub struct ReferralExpr;

impl ReferralExpr {
    #[must_use]
    pub fn equals(self, value: impl Into<String>) -> Condition {
        Condition::Referral {
            operator: ReferralOperator::Equals,
            value: Some(value.into()),
        }
    }

    #[must_use]
    pub fn contains(self, value: impl Into<String>) -> Condition {
        Condition::Referral {
            operator: ReferralOperator::Contains,
            value: Some(value.into()),
        }
    }

    #[must_use]
    pub fn not_present(self) -> Condition {
        Condition::Referral {
            operator: ReferralOperator::NotPresent,
            value: None,
        }
    }
}

#[must_use]
pub fn param(name: &str) -> ParamExpr {
    ParamExpr {
        parameter: name.to_owned(),
    }
}

#[must_use]
pub fn referral() -> ReferralExpr {
    ReferralExpr
}
