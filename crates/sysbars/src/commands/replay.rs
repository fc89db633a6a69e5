use std::io::{BufRead, BufReader};
use std::path::PathBuf;
use std::sync::Arc;

use clap::Args;
use serde::Serialize;

use sysbars_core::{DisplayEvent, RulePolicy};
use sysbars_display::{DisplayBarsReconciler, RecordingChannel};

#[derive(Args)]
pub struct ReplayArgs {
    /// Event script: one JSON display event per line (`-` for stdin)
    pub script: PathBuf,
    /// Bar rules file (defaults to ~/.config/sysbars/bar-rules.toml)
    #[arg(long)]
    pub rules: Option<PathBuf>,
    /// Print the final state of every display after the script
    #[arg(long)]
    pub snapshot: bool,
    /// Only replay events addressed to this display (policy changes
    /// always apply)
    #[arg(long)]
    pub display: Option<i32>,
}

/// Drives a reconciler with the script's events and prints every call
/// it makes to the window manager as a JSON line.
pub fn execute(args: &ReplayArgs) {
    let policy = Arc::new(RulePolicy::new(super::load_rules(args.rules.as_deref())));
    let channel = Arc::new(RecordingChannel::new());
    let reconciler = DisplayBarsReconciler::new(policy, channel.clone());

    let reader: Box<dyn BufRead> = if args.script.as_os_str() == "-" {
        Box::new(BufReader::new(std::io::stdin()))
    } else {
        match std::fs::File::open(&args.script) {
            Ok(f) => Box::new(BufReader::new(f)),
            Err(e) => super::fail(&format!("{}: {e}", args.script.display())),
        }
    };

    for (i, line) in reader.lines().enumerate() {
        let line = match line {
            Ok(line) => line,
            Err(e) => super::fail(&format!("{}: {e}", args.script.display())),
        };
        let event = match DisplayEvent::parse_line(&line) {
            Ok(Some(event)) => event,
            Ok(None) => continue,
            Err(e) => super::fail(&format!("line {}: {e}", i + 1)),
        };
        if args
            .display
            .is_some_and(|only| event.display().is_some_and(|d| d != only))
        {
            continue;
        }
        reconciler.dispatch(event);
        for call in channel.take_calls() {
            print_json(&call);
        }
    }

    if args.snapshot {
        for display in reconciler.displays() {
            if let Some(snapshot) = reconciler.snapshot(display) {
                print_json(&snapshot);
            }
        }
    }
}

fn print_json<T: Serialize>(value: &T) {
    match serde_json::to_string(value) {
        Ok(s) => println!("{s}"),
        Err(e) => super::fail(&e.to_string()),
    }
}
