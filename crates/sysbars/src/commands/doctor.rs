use sysbars_core::config;

/// ANSI escape helpers for doctor output.
const OK: &str = "\x1b[32m[ok]\x1b[0m";
const WARN: &str = "\x1b[33m[warn]\x1b[0m";
const FAIL: &str = "\x1b[31m[fail]\x1b[0m";
const FIXED: &str = "\x1b[36m[fixed]\x1b[0m";

pub fn execute() {
    println!();
    check_config_dir();
    check_config_file();
    check_rules_file();
    println!();
}

fn check_config_dir() {
    match config::config_dir() {
        Some(dir) if dir.is_dir() => {
            println!("  {OK} Config directory exists ({})", dir.display());
        }
        Some(dir) => match std::fs::create_dir_all(&dir) {
            Ok(()) => {
                println!("  {FIXED} Created config directory ({})", dir.display());
            }
            Err(e) => {
                println!("  {FAIL} Config directory missing and could not create it: {e}");
            }
        },
        None => {
            println!("  {FAIL} Could not determine home directory");
        }
    }
}

fn check_config_file() {
    let Some(path) = config::config_path() else {
        println!("  {FAIL} Could not determine config path");
        return;
    };
    if !path.exists() {
        println!("  {WARN} config.toml not found (using defaults)");
        return;
    }
    match config::try_load() {
        Ok(_) => println!("  {OK} config.toml is valid"),
        Err(e) => println!("  {FAIL} config.toml: {e}"),
    }
}

fn check_rules_file() {
    let Some(path) = config::rules_path() else {
        println!("  {FAIL} Could not determine rules path");
        return;
    };
    if !path.exists() {
        println!("  {WARN} bar-rules.toml not found (no bar overrides)");
        return;
    }
    let rules = match config::try_load_rules() {
        Ok(rules) => rules,
        Err(e) => {
            println!("  {FAIL} bar-rules.toml: {e}");
            return;
        }
    };
    println!("  {OK} bar-rules.toml is valid ({} rule(s))", rules.len());

    let warnings = config::rule_warnings(&rules);
    for warning in &warnings {
        println!("  {WARN} {warning}");
    }
    if let Some(pos) = rules.iter().position(|r| r.match_package == config::rules::MATCH_ALL)
        && pos + 1 < rules.len()
    {
        println!(
            "  {WARN} rule {} matches every package; the {} rule(s) after it never apply",
            pos + 1,
            rules.len() - pos - 1
        );
    }
}
