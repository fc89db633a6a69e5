use sysbars_core::config;

/// Creates the default configuration files at `~/.config/sysbars/`.
///
/// Generates `config.toml` and `bar-rules.toml` with comments explaining
/// every option. Existing files are not overwritten.
pub fn execute() {
    let Some(dir) = config::config_dir() else {
        super::fail("could not determine home directory.");
    };

    if let Err(e) = std::fs::create_dir_all(&dir) {
        super::fail(&format!("could not create {}: {e}", dir.display()));
    }

    write_if_missing(
        &dir.join("config.toml"),
        &config::template::generate_config(),
    );
    write_if_missing(
        &dir.join("bar-rules.toml"),
        &config::template::generate_rules(),
    );

    println!("\nEdit bar-rules.toml to choose which bars each app shows or hides.");
    println!("Run `sysbars doctor` to check your rules.");
}

/// Writes content to a file only if it doesn't already exist.
fn write_if_missing(path: &std::path::Path, content: &str) {
    if path.exists() {
        println!("Already exists: {}", path.display());
        return;
    }

    match std::fs::write(path, content) {
        Ok(()) => println!("Created {}", path.display()),
        Err(e) => eprintln!("Error: could not write {}: {e}", path.display()),
    }
}
