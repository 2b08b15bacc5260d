use crate::{
    Condition, ConditionOutcome, LogicalOp, ParamOperator, ParameterMap, ReferralOperator, Rule,
    RuleOutcome,
};

/// Evaluate a single condition against extracted parameters and a referral.
///
/// Parameter values are already lowercased; the condition's value and the
/// referral are lowercased here, so every comparison is case-insensitive.
/// Parameter names are matched exactly.
pub fn evaluate_condition(
    condition: &Condition,
    params: &ParameterMap,
    referral: &str,
) -> ConditionOutcome {
    match condition {
        Condition::Parameter {
            parameter,
            operator,
            value,
        } => eval_parameter(parameter, *operator, value.as_deref(), params),
        Condition::Referral { operator, value } => {
            eval_referral(*operator, value.as_deref(), referral)
        }
    }
}

fn eval_parameter(
    parameter: &str,
    operator: ParamOperator,
    value: Option<&str>,
    params: &ParameterMap,
) -> ConditionOutcome {
    let actual = params.get(parameter);
    let shown = value.unwrap_or_default();
    let expected = shown.to_lowercase();

    match operator {
        ParamOperator::Exists if actual.is_some() => {
            ConditionOutcome::met(format!("Parameter '{parameter}' exists as required"))
        }
        ParamOperator::NotExists if actual.is_none() => ConditionOutcome::met(format!(
            "Parameter '{parameter}' does not exist as required"
        )),
        ParamOperator::NotPresent if actual.is_none() => ConditionOutcome::met(format!(
            "Parameter '{parameter}' is not present as required"
        )),
        ParamOperator::Equals if actual == Some(expected.as_str()) => ConditionOutcome::met(
            format!("Parameter '{parameter}' value matches '{shown}'"),
        ),
        // An absent parameter counts as "not equal" to anything.
        ParamOperator::NotEquals if actual != Some(expected.as_str()) => ConditionOutcome::met(
            format!("Parameter '{parameter}' value does not match '{shown}'"),
        ),
        _ => ConditionOutcome::not_met(format!(
            "Parameter '{parameter}' condition not met ({operator})"
        )),
    }
}

fn eval_referral(
    operator: ReferralOperator,
    value: Option<&str>,
    referral: &str,
) -> ConditionOutcome {
    let actual = referral.to_lowercase();
    let shown = value.unwrap_or_default();
    let expected = shown.to_lowercase();

    match operator {
        ReferralOperator::NotPresent if referral.is_empty() => {
            ConditionOutcome::met("Referral source is not present as required".to_owned())
        }
        ReferralOperator::Equals if actual == expected => {
            ConditionOutcome::met(format!("Referral source matches '{shown}'"))
        }
        ReferralOperator::Contains if actual.contains(&expected) => {
            ConditionOutcome::met(format!("Referral source contains '{shown}'"))
        }
        _ => ConditionOutcome::not_met(format!(
            "Referral source condition not met ({operator})"
        )),
    }
}

/// Evaluate every condition of `rule` and combine them with its operator.
///
/// All conditions are always evaluated so that `match_details` carries one
/// entry per condition. A rule without conditions never matches.
pub fn evaluate_rule(rule: &Rule, params: &ParameterMap, referral: &str) -> RuleOutcome {
    let mut match_details = Vec::with_capacity(rule.conditions.len());
    let mut conditions_met = 0_usize;

    for condition in &rule.conditions {
        let outcome = evaluate_condition(condition, params, referral);
        if outcome.matched {
            conditions_met += 1;
        }
        match_details.push(outcome.detail);
    }

    let matched = !rule.conditions.is_empty()
        && match rule.conditions_operator {
            LogicalOp::And => conditions_met == rule.conditions.len(),
            LogicalOp::Or => conditions_met > 0,
        };

    RuleOutcome {
        matched,
        match_details,
        output: rule.output.clone(),
    }
}
