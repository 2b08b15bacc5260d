use serde::Deserialize;

/// Tunables for URL normalization, input-size guards, and test-case import.
///
/// All limits are off by default; evaluation itself has no tunable behavior.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct EngineConfig {
    /// Scheme prepended to URLs written without one.
    pub default_scheme: String,
    /// Upper bound on the number of rules a single analysis accepts.
    pub max_rules: Option<usize>,
    /// Upper bound on the number of distinct query parameters in one URL.
    pub max_parameters: Option<usize>,
    /// Referral recorded for imported test cases whose referral cell is blank.
    pub direct_referral: String,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            default_scheme: "https".to_owned(),
            max_rules: None,
            max_parameters: None,
            direct_referral: "direct".to_owned(),
        }
    }
}

impl EngineConfig {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn with_default_scheme(mut self, scheme: &str) -> Self {
        scheme.clone_into(&mut self.default_scheme);
        self
    }

    #[must_use]
    pub fn with_max_rules(mut self, limit: usize) -> Self {
        self.max_rules = Some(limit);
        self
    }

    #[must_use]
    pub fn with_max_parameters(mut self, limit: usize) -> Self {
        self.max_parameters = Some(limit);
        self
    }

    #[must_use]
    pub fn with_direct_referral(mut self, label: &str) -> Self {
        label.clone_into(&mut self.direct_referral);
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults() {
        let config = EngineConfig::default();
        assert_eq!(config.default_scheme, "https");
        assert_eq!(config.max_rules, None);
        assert_eq!(config.max_parameters, None);
        assert_eq!(config.direct_referral, "direct");
    }

    #[test]
    fn builder_methods() {
        let config = EngineConfig::new()
            .with_default_scheme("http")
            .with_max_rules(50)
            .with_max_parameters(100)
            .with_direct_referral("(none)");
        assert_eq!(config.default_scheme, "http");
        assert_eq!(config.max_rules, Some(50));
        assert_eq!(config.max_parameters, Some(100));
        assert_eq!(config.direct_referral, "(none)");
    }

    #[test]
    fn partial_json_keeps_defaults() {
        let config: EngineConfig = serde_json::from_str(r#"{"maxRules": 10}"#).unwrap();
        assert_eq!(config.max_rules, Some(10));
        assert_eq!(config.default_scheme, "https");
        assert_eq!(config.direct_referral, "direct");
    }
}
