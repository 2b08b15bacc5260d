mod analyze;
mod compile;
mod config;
mod error;
mod evaluate;
mod extract;
mod types;

pub mod narrative;
pub mod report;
pub mod store;

pub use analyze::{analyze, analyze_batch, analyze_batch_with, analyze_with};
pub use compile::validate_rule;
pub use config::EngineConfig;
pub use error::UtmatchError;
pub use evaluate::{evaluate_condition, evaluate_rule};
pub use extract::{extract_parameters, extract_parameters_with, normalize_url, urls_equivalent};
pub use types::{
    Analysis, AnalysisError, BatchOutcome, Condition, ConditionEdit, ConditionKind,
    ConditionOutcome, LogicalOp, Output, ParamExpr, ParamOperator, ParameterMap, ReferralExpr,
    ReferralOperator, Rule, RuleBuilder, RuleConfigError, RuleMatch, RuleOutcome, RuleSet,
    RuleSetBuilder, TestCase, UrlError, param, referral,
};
