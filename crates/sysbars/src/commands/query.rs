use std::path::Path;

use sysbars_core::{BarVisibilityPolicy, InsetTypes, RulePolicy};

/// Prints the bar visibility decision for `package`.
pub fn execute(package: &str, rules: Option<&Path>, json: bool) {
    let package = package.split('/').next().unwrap_or_default().trim();
    if package.is_empty() {
        super::fail("package name is empty");
    }

    let policy = RulePolicy::new(super::load_rules(rules));
    let decision = policy.bar_visibilities(package);

    if json {
        match serde_json::to_string(&decision) {
            Ok(s) => println!("{s}"),
            Err(e) => super::fail(&e.to_string()),
        }
        return;
    }

    if decision.is_none() {
        println!("{package}: no override");
        return;
    }
    println!("{package}:");
    println!("  show: {}", names(decision.to_show));
    println!("  hide: {}", names(decision.to_hide));
}

fn names(types: InsetTypes) -> String {
    if types.is_empty() {
        return "-".into();
    }
    types
        .iter_types()
        .map(|t| t.name())
        .collect::<Vec<_>>()
        .join(", ")
}
