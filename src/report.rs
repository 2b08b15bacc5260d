use std::fmt;

use serde::Serialize;

use crate::{Analysis, ParameterMap, RuleMatch};

/// The payload handed to an external report renderer for one analyzed URL.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
#[must_use]
pub struct Report {
    pub url: String,
    pub referral_source: String,
    pub matches: Vec<RuleMatch>,
    pub parameters: ParameterMap,
}

impl Report {
    pub fn new(url: impl Into<String>, referral_source: impl Into<String>, analysis: Analysis) -> Self {
        Self {
            url: url.into(),
            referral_source: referral_source.into(),
            matches: analysis.matches,
            parameters: analysis.parameters,
        }
    }

    /// Render as JSON for the renderer.
    ///
    /// # Errors
    ///
    /// Returns [`serde_json::Error`] if serialization fails.
    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(self)
    }
}

impl fmt::Display for Report {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "URL: {}", self.url)?;
        if self.referral_source.is_empty() {
            writeln!(f, "Referral source: (none)")?;
        } else {
            writeln!(f, "Referral source: {}", self.referral_source)?;
        }

        writeln!(f, "Parameters:")?;
        if self.parameters.is_empty() {
            writeln!(f, "  (none)")?;
        }
        for (name, value) in self.parameters.iter() {
            writeln!(f, "  {name} = {value}")?;
        }

        writeln!(f, "Matched rules ({}):", self.matches.len())?;
        for (i, m) in self.matches.iter().enumerate() {
            writeln!(f, "  {}. {} -> {}", i + 1, m.rule_name, m.output)?;
            for detail in &m.match_details {
                writeln!(f, "     - {detail}")?;
            }
        }
        Ok(())
    }
}
