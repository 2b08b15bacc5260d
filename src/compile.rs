use tracing::debug;

use crate::{Condition, EngineConfig, Rule, RuleConfigError, RuleSet};

pub(crate) fn compile(rules: Vec<Rule>, config: EngineConfig) -> Result<RuleSet, RuleConfigError> {
    for (index, rule) in rules.iter().enumerate() {
        validate_rule(rule, index)?;
    }
    debug!(rules = rules.len(), "compiled rule set");
    Ok(RuleSet { rules, config })
}

/// Check that a rule is structurally usable: it has a name and at least one
/// condition, every parameter condition names its parameter, and every
/// comparing operator has a value to compare against.
///
/// # Errors
///
/// Returns the first [`RuleConfigError`] found, in condition order.
pub fn validate_rule(rule: &Rule, index: usize) -> Result<(), RuleConfigError> {
    if rule.name.trim().is_empty() {
        return Err(RuleConfigError::EmptyName { index });
    }
    if rule.conditions.is_empty() {
        return Err(RuleConfigError::EmptyConditions {
            rule: rule.name.clone(),
        });
    }
    for (position, condition) in rule.conditions.iter().enumerate() {
        check_condition(condition, &rule.name, position)?;
    }
    Ok(())
}

fn check_condition(
    condition: &Condition,
    rule_name: &str,
    position: usize,
) -> Result<(), RuleConfigError> {
    if let Condition::Parameter { parameter, .. } = condition {
        if parameter.trim().is_empty() {
            return Err(RuleConfigError::MissingParameter {
                rule: rule_name.to_owned(),
                position,
            });
        }
    }
    if condition.requires_value() && condition.value().is_none() {
        return Err(RuleConfigError::MissingValue {
            rule: rule_name.to_owned(),
            position,
            operator: condition.operator_name().to_owned(),
        });
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{param, referral, LogicalOp, ParamOperator, ReferralOperator};

    fn rule_with(conditions: Vec<Condition>) -> Rule {
        let mut rule = Rule::new("r", LogicalOp::And);
        rule.conditions = conditions;
        rule
    }

    #[test]
    fn valid_rule_passes() {
        let rule = rule_with(vec![
            param("utm_source").exists(),
            param("utm_medium").equals("cpc"),
            referral().contains("google"),
            referral().not_present(),
        ]);
        assert!(validate_rule(&rule, 0).is_ok());
    }

    #[test]
    fn empty_name_rejected() {
        let mut rule = rule_with(vec![param("a").exists()]);
        rule.name = "  ".to_owned();
        assert_eq!(
            validate_rule(&rule, 4),
            Err(RuleConfigError::EmptyName { index: 4 })
        );
    }

    #[test]
    fn empty_conditions_rejected() {
        assert_eq!(
            validate_rule(&rule_with(vec![]), 0),
            Err(RuleConfigError::EmptyConditions { rule: "r".into() })
        );
    }

    #[test]
    fn missing_parameter_rejected() {
        let rule = rule_with(vec![param("a").exists(), param("").exists()]);
        assert_eq!(
            validate_rule(&rule, 0),
            Err(RuleConfigError::MissingParameter {
                rule: "r".into(),
                position: 1,
            })
        );
    }

    #[test]
    fn missing_value_rejected() {
        let rule = rule_with(vec![Condition::Parameter {
            parameter: "utm_medium".into(),
            operator: ParamOperator::NotEquals,
            value: None,
        }]);
        assert_eq!(
            validate_rule(&rule, 0),
            Err(RuleConfigError::MissingValue {
                rule: "r".into(),
                position: 0,
                operator: "not_equals".into(),
            })
        );

        let rule = rule_with(vec![Condition::Referral {
            operator: ReferralOperator::Contains,
            value: None,
        }]);
        assert!(matches!(
            validate_rule(&rule, 0),
            Err(RuleConfigError::MissingValue { operator, .. }) if operator == "contains"
        ));
    }

    #[test]
    fn value_ignored_for_valueless_operators() {
        let rule = rule_with(vec![Condition::Parameter {
            parameter: "gclid".into(),
            operator: ParamOperator::Exists,
            value: Some("ignored".into()),
        }]);
        assert!(validate_rule(&rule, 0).is_ok());
    }

    #[test]
    fn compile_reports_first_invalid_rule() {
        let good = rule_with(vec![param("a").exists()]);
        let mut bad = rule_with(vec![]);
        bad.name = "bad".into();
        let result = compile(vec![good, bad], EngineConfig::default());
        assert!(matches!(
            result,
            Err(RuleConfigError::EmptyConditions { rule }) if rule == "bad"
        ));
    }
}
