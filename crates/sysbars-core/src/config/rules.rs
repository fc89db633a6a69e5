//! Bar rule types and evaluation logic.
//!
//! Rules map a foreground package to the system bars it forces shown or
//! hidden. They are evaluated in order and the first matching rule wins,
//! so an empty rule for a package placed before a `"*"` rule exempts it.

use serde::{Deserialize, Serialize};

use crate::inset::{InsetType, InsetTypes};
use crate::policy::VisibilityDecision;

/// Package pattern that matches every package.
pub const MATCH_ALL: &str = "*";

/// A rule forcing bar visibility while a package is in the foreground.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BarRule {
    /// Exact package name, or `"*"` for every package.
    pub match_package: String,
    /// Inset types forced visible.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub show: Vec<InsetType>,
    /// Inset types forced hidden.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub hide: Vec<InsetType>,
}

impl BarRule {
    fn matches(&self, package: &str) -> bool {
        self.match_package == MATCH_ALL || self.match_package == package
    }

    /// The decision this rule produces, IME stripped and overlap resolved.
    pub fn decision(&self) -> VisibilityDecision {
        VisibilityDecision::new(
            InsetTypes::from_types(&self.show),
            InsetTypes::from_types(&self.hide),
        )
        .normalized()
    }
}

/// Evaluates rules for `package`. No match means no override.
pub fn decide(package: &str, rules: &[BarRule]) -> VisibilityDecision {
    rules
        .iter()
        .find(|rule| rule.matches(package))
        .map(BarRule::decision)
        .unwrap_or_default()
}

/// Returns human-readable warnings for rules that will not behave as
/// written: IME entries (always ignored), types listed in both `show`
/// and `hide`, and empty package patterns.
pub fn rule_warnings(rules: &[BarRule]) -> Vec<String> {
    let mut warnings = Vec::new();
    for (i, rule) in rules.iter().enumerate() {
        let n = i + 1;
        if rule.match_package.trim().is_empty() {
            warnings.push(format!("rule {n}: match_package is empty and never matches"));
        }
        if rule.show.contains(&InsetType::Ime) || rule.hide.contains(&InsetType::Ime) {
            warnings.push(format!(
                "rule {n} ({}): ime is controlled by the input method and is ignored",
                rule.match_package
            ));
        }
        let overlap = InsetTypes::from_types(&rule.show) & InsetTypes::from_types(&rule.hide);
        for t in overlap.without_ime().iter_types() {
            warnings.push(format!(
                "rule {n} ({}): {} is in both show and hide; it will be hidden",
                rule.match_package,
                t.name()
            ));
        }
    }
    warnings
}

/// Wrapper for deserializing the rules file.
///
/// The file contains a top-level `[[rule]]` array of tables.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
struct RulesFile {
    #[serde(default)]
    rule: Vec<BarRule>,
}

/// Validates a TOML string as a rules file.
///
/// Returns the parsed rules or an error description.
pub fn validate_rules(content: &str) -> Result<Vec<BarRule>, String> {
    let file: RulesFile = toml::from_str(content).map_err(|e| e.to_string())?;
    Ok(file.rule)
}
