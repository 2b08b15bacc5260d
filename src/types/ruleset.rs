use std::fmt;

use super::condition::Condition;
use super::error::{AnalysisError, RuleConfigError};
use super::outcome::Analysis;
use super::rule::{LogicalOp, Output, Rule};
use super::test_case::{BatchOutcome, TestCase};
use crate::EngineConfig;

/// Builder for constructing a [`RuleSet`].
///
/// Rules are defined via closures and validated into an immutable,
/// thread-safe rule set.
///
/// # Example
///
/// ```
/// use utmatch::{RuleSetBuilder, Output, param, referral};
///
/// let ruleset = RuleSetBuilder::new()
///     .rule("Google Ads", |r| {
///         r.when(param("utm_source").equals("google"))
///             .when(param("utm_medium").equals("cpc"))
///             .output(Output::new("paid", "Google", "cpc"))
///     })
///     .rule("Facebook", |r| {
///         r.any()
///             .when(param("fbclid").exists())
///             .when(referral().contains("facebook"))
///             .output(Output::new("social", "Facebook", "social"))
///     })
///     .compile()
///     .unwrap();
///
/// let analysis = ruleset
///     .analyze("example.com/?utm_source=Google&utm_medium=cpc", "")
///     .unwrap();
/// assert_eq!(analysis.matched_names(), vec!["Google Ads"]);
/// ```
#[derive(Debug, Default)]
pub struct RuleSetBuilder {
    rules: Vec<Rule>,
    config: EngineConfig,
}

/// Intermediate builder passed to the rule definition closure.
///
/// Conditions are combined with AND unless [`any()`](Self::any) is called.
#[derive(Debug)]
pub struct RuleBuilder {
    conditions_operator: LogicalOp,
    conditions: Vec<Condition>,
    output: Output,
}

impl RuleSetBuilder {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Define a rule. The closure must call `.when(condition)` at least once.
    ///
    /// A rule without conditions makes [`compile()`](Self::compile) fail with
    /// [`RuleConfigError::EmptyConditions`].
    #[must_use]
    pub fn rule(mut self, name: &str, f: impl FnOnce(RuleBuilder) -> RuleBuilder) -> Self {
        let builder = f(RuleBuilder {
            conditions_operator: LogicalOp::And,
            conditions: Vec::new(),
            output: Output::default(),
        });
        self.rules.push(Rule {
            name: name.to_owned(),
            conditions_operator: builder.conditions_operator,
            conditions: builder.conditions,
            output: builder.output,
        });
        self
    }

    /// Add an already constructed rule, for example one loaded from a store.
    #[must_use]
    pub fn push(mut self, rule: Rule) -> Self {
        self.rules.push(rule);
        self
    }

    #[must_use]
    pub fn config(mut self, config: EngineConfig) -> Self {
        self.config = config;
        self
    }

    /// Validate the rules into an immutable `RuleSet`.
    ///
    /// # Errors
    ///
    /// Returns [`RuleConfigError`] for the first structurally invalid rule.
    pub fn compile(self) -> Result<RuleSet, RuleConfigError> {
        crate::compile::compile(self.rules, self.config)
    }
}

impl RuleBuilder {
    /// Add a condition. Conditions keep the order they were added in.
    #[must_use]
    pub fn when(mut self, condition: Condition) -> Self {
        self.conditions.push(condition);
        self
    }

    /// Match when every condition holds (the default).
    #[must_use]
    pub fn all(mut self) -> Self {
        self.conditions_operator = LogicalOp::And;
        self
    }

    /// Match when at least one condition holds.
    #[must_use]
    pub fn any(mut self) -> Self {
        self.conditions_operator = LogicalOp::Or;
        self
    }

    #[must_use]
    pub fn output(mut self, output: Output) -> Self {
        self.output = output;
        self
    }
}

/// A validated, immutable rule set. Thread-safe and designed to live behind `Arc`.
///
/// Holds no state between calls: every analysis extracts parameters and
/// evaluates all rules from scratch.
#[derive(Debug, Clone)]
pub struct RuleSet {
    pub(crate) rules: Vec<Rule>,
    pub(crate) config: EngineConfig,
}

impl RuleSet {
    /// Validate `rules` with the default configuration.
    ///
    /// # Errors
    ///
    /// Returns [`RuleConfigError`] for the first structurally invalid rule.
    pub fn new(rules: Vec<Rule>) -> Result<Self, RuleConfigError> {
        crate::compile::compile(rules, EngineConfig::default())
    }

    /// Validate `rules` with an explicit configuration.
    ///
    /// # Errors
    ///
    /// Returns [`RuleConfigError`] for the first structurally invalid rule.
    pub fn with_config(rules: Vec<Rule>, config: EngineConfig) -> Result<Self, RuleConfigError> {
        crate::compile::compile(rules, config)
    }

    /// Analyze one URL/referral pair against every rule.
    ///
    /// # Errors
    ///
    /// Returns [`AnalysisError`] if the URL is invalid or a configured limit
    /// is exceeded.
    pub fn analyze(&self, url: &str, referral: &str) -> Result<Analysis, AnalysisError> {
        crate::analyze::analyze_with(&self.rules, url, referral, &self.config)
    }

    /// Analyze every test case independently.
    #[must_use]
    pub fn analyze_batch(&self, cases: &[TestCase]) -> Vec<BatchOutcome> {
        crate::analyze::analyze_batch_with(&self.rules, cases, &self.config)
    }

    /// Parse a JSON array of rules and validate it into a `RuleSet`.
    ///
    /// # Errors
    ///
    /// Returns [`UtmatchError`](crate::UtmatchError) on malformed JSON or an
    /// invalid rule.
    pub fn from_json(input: &str) -> Result<Self, crate::UtmatchError> {
        let rules = crate::store::rules_from_json(input)?;
        Ok(Self::new(rules)?)
    }

    /// Read a JSON rule file and validate it into a `RuleSet`.
    ///
    /// # Errors
    ///
    /// Returns [`UtmatchError`](crate::UtmatchError) on I/O, JSON, or
    /// validation failure.
    pub fn from_file(path: impl AsRef<std::path::Path>) -> Result<Self, crate::UtmatchError> {
        let input = std::fs::read_to_string(path)?;
        Self::from_json(&input)
    }

    /// The rules in evaluation order.
    #[must_use]
    pub fn rules(&self) -> &[Rule] {
        &self.rules
    }

    #[must_use]
    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.rules.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.rules.is_empty()
    }

    /// Consume the set and return its rules, e.g. for export.
    #[must_use]
    pub fn into_rules(self) -> Vec<Rule> {
        self.rules
    }
}

impl fmt::Display for RuleSet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let conditions: usize = self.rules.iter().map(|r| r.conditions.len()).sum();
        write!(
            f,
            "RuleSet({} rules, {} conditions)",
            self.rules.len(),
            conditions,
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{param, referral};

    #[test]
    fn builder_collects_rules() {
        let builder = RuleSetBuilder::new()
            .rule("paid", |r| {
                r.any()
                    .when(param("gclid").exists())
                    .when(param("utm_medium").equals("cpc"))
            })
            .rule("facebook", |r| r.when(referral().contains("facebook")));

        assert_eq!(builder.rules.len(), 2);
        assert_eq!(builder.rules[0].name, "paid");
        assert_eq!(builder.rules[0].conditions_operator, LogicalOp::Or);
        assert_eq!(builder.rules[0].conditions.len(), 2);
        assert_eq!(builder.rules[1].conditions_operator, LogicalOp::And);
    }

    #[test]
    fn all_resets_operator() {
        let builder = RuleSetBuilder::new().rule("r", |r| r.any().all().when(param("a").exists()));
        assert_eq!(builder.rules[0].conditions_operator, LogicalOp::And);
    }

    #[test]
    fn builder_rule_without_when_returns_error() {
        let result = RuleSetBuilder::new().rule("bad_rule", |r| r).compile();
        assert!(matches!(
            result,
            Err(RuleConfigError::EmptyConditions { rule }) if rule == "bad_rule"
        ));
    }

    #[test]
    fn push_and_config() {
        let mut rule = Rule::new("direct", LogicalOp::And);
        rule.conditions.push(referral().not_present());
        let ruleset = RuleSetBuilder::new()
            .push(rule)
            .config(EngineConfig::default().with_max_rules(5))
            .compile()
            .unwrap();
        assert_eq!(ruleset.len(), 1);
        assert_eq!(ruleset.config().max_rules, Some(5));
        assert!(!ruleset.is_empty());
    }

    #[test]
    fn ruleset_display() {
        let ruleset = RuleSetBuilder::new()
            .rule("a", |r| r.when(param("x").exists()).when(param("y").exists()))
            .rule("b", |r| r.when(referral().not_present()))
            .compile()
            .unwrap();
        assert_eq!(ruleset.to_string(), "RuleSet(2 rules, 3 conditions)");
    }

    #[test]
    fn ruleset_analyze_uses_config() {
        let ruleset = RuleSetBuilder::new()
            .rule("a", |r| r.when(param("x").exists()))
            .config(EngineConfig::default().with_max_parameters(1))
            .compile()
            .unwrap();
        assert!(ruleset.analyze("x.com/?x=1", "").unwrap().is_match());
        assert!(matches!(
            ruleset.analyze("x.com/?x=1&y=2", ""),
            Err(AnalysisError::TooManyParameters { .. })
        ));
    }
}
