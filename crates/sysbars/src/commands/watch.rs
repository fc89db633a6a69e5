use std::path::PathBuf;
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};
use std::time::Duration;

use clap::Args;

use sysbars_core::config::{self, Config};
use sysbars_core::{InsetsCallbacks, SharedPolicy};
use sysbars_display::{ChannelCall, DisplayBarsReconciler, PolicyWatcher, RecordingChannel};

/// Display the watched package is focused on.
const WATCH_DISPLAY: i32 = 0;

#[derive(Args)]
pub struct WatchArgs {
    /// Package to keep in the foreground
    pub package: String,
    /// Bar rules file (defaults to ~/.config/sysbars/bar-rules.toml)
    #[arg(long)]
    pub rules: Option<PathBuf>,
    /// Stop after this many seconds instead of running until killed
    #[arg(long)]
    pub timeout: Option<u64>,
}

/// Focuses `package` on a simulated display, then prints the update the
/// window manager would receive every time the rules file changes.
pub fn execute(args: &WatchArgs, config: &Config) {
    let Some(path) = args.rules.clone().or_else(config::rules_path) else {
        super::fail("could not determine rules path");
    };

    let policy = Arc::new(SharedPolicy::new(config::load_rules_from(&path)));
    let channel = Arc::new(RecordingChannel::new());
    let reconciler = DisplayBarsReconciler::new(policy.clone(), channel.clone());

    reconciler.on_display_added(WATCH_DISPLAY);
    reconciler.on_top_focused_window_changed(WATCH_DISPLAY, Some(args.package.as_str()));
    print_updates(&channel);

    let stop = Arc::new(AtomicBool::new(false));
    if let Some(secs) = args.timeout {
        let stop = Arc::clone(&stop);
        std::thread::spawn(move || {
            std::thread::sleep(Duration::from_secs(secs));
            stop.store(true, Ordering::Relaxed);
        });
    }

    let watcher = PolicyWatcher::new(
        path,
        policy,
        Duration::from_millis(config.watch.poll_ms),
    );
    println!("Watching {} (Ctrl+C to stop)", watcher.path().display());
    watcher.watch(&stop, |count| {
        println!("Reloaded {count} rule(s)");
        reconciler.refresh_all();
        print_updates(&channel);
    });
}

fn print_updates(channel: &RecordingChannel) {
    for call in channel.take_calls() {
        if let ChannelCall::UpdateVisibilities { visibilities, .. } = call {
            match serde_json::to_string(&visibilities) {
                Ok(s) => println!("{s}"),
                Err(e) => eprintln!("Error: {e}"),
            }
        }
    }
}
