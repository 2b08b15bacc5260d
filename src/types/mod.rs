mod condition;
mod error;
mod outcome;
mod parameters;
mod rule;
mod ruleset;
mod test_case;

pub use condition::{
    Condition, ConditionEdit, ConditionKind, ParamExpr, ParamOperator, ReferralExpr,
    ReferralOperator, param, referral,
};
pub use error::{AnalysisError, RuleConfigError, UrlError};
pub use outcome::{Analysis, ConditionOutcome, RuleMatch, RuleOutcome};
pub use parameters::ParameterMap;
pub use rule::{LogicalOp, Output, Rule};
pub use ruleset::{RuleBuilder, RuleSet, RuleSetBuilder};
pub use test_case::{BatchOutcome, TestCase};
