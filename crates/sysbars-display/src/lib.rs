/// In-process inset channel that records every call.
pub mod channel;

/// Local inset-animation model.
pub mod insets_model;

/// Bar rules file watcher.
pub mod policy_watcher;

/// Per-display system bar visibility reconciliation.
pub mod reconciler;

pub use channel::{ChannelCall, RecordingChannel};
pub use insets_model::{InsetsModel, InsetsRequest};
pub use policy_watcher::PolicyWatcher;
pub use reconciler::{DisplayBarsReconciler, DisplayPhase, DisplaySnapshot};
