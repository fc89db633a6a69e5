use super::*;
use crate::config::{Config, rule_warnings, validate_rules};

#[test]
fn config_template_parses_as_valid_config() {
    // Arrange
    let toml_str = generate_config();

    // Act
    let result: Result<Config, _> = toml::from_str(&toml_str);

    // Assert
    assert!(
        result.is_ok(),
        "config template is not valid TOML: {result:?}"
    );
}

#[test]
fn config_template_matches_default_values() {
    // Arrange
    let toml_str = generate_config();

    // Act
    let mut config: Config = toml::from_str(&toml_str).unwrap();
    config.validate();

    // Assert
    let defaults = Config::default();
    assert_eq!(config.logging, defaults.logging);
    assert_eq!(config.watch.poll_ms, defaults.watch.poll_ms);
}

#[test]
fn rules_template_parses_with_no_active_rules() {
    // Act
    let rules = validate_rules(&generate_rules()).unwrap();

    // Assert
    assert!(rules.is_empty());
}

#[test]
fn rules_template_examples_are_valid_when_uncommented() {
    // Arrange
    let uncommented: String = generate_rules()
        .lines()
        .map(|l| l.strip_prefix("# ").unwrap_or(l))
        .filter(|l| *l == "[[rule]]" || l.contains(" = "))
        .map(|l| format!("{l}\n"))
        .collect();

    // Act
    let rules = validate_rules(&uncommented).unwrap();

    // Assert
    assert_eq!(rules.len(), 3);
    assert_eq!(rules[2].match_package, "*");
    assert!(rule_warnings(&rules).is_empty());
}
