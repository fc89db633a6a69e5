mod entry;
mod event_handler;

use std::collections::HashMap;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError, RwLock, RwLockReadGuard, RwLockWriteGuard};

use serde::Serialize;
use sysbars_core::{
    BarVisibilityPolicy, DisplayId, InsetSourceControl, InsetTypes, InsetsChannel, InsetsState,
    RequestedVisibilities,
};

use crate::InsetsRequest;
use entry::DisplayEntry;
pub use entry::DisplayPhase;

type SharedEntry = Arc<Mutex<DisplayEntry>>;

/// A point-in-time copy of one display's state, for inspection.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DisplaySnapshot {
    pub display: DisplayId,
    pub phase: DisplayPhase,
    pub package: Option<String>,
    pub requested: RequestedVisibilities,
    /// The display-local view: the last report with local requests applied.
    pub state: InsetsState,
    /// The last state the platform reported, if any.
    pub reported: Option<InsetsState>,
    pub controls: Vec<InsetSourceControl>,
    /// Types with a show/hide request waiting for a control, as (show, hide).
    pub parked: (InsetTypes, InsetTypes),
    /// Recent show/hide animations started on held controls, oldest first.
    pub applied: Vec<InsetsRequest>,
}

/// Keeps each display's requested system bar visibility in sync with
/// the bar policy for its foreground package.
///
/// Displays are independent: each has its own lock, and the display map
/// lock is only held to look entries up or add/remove them. Every method
/// takes `&self` and may be called from any thread.
pub struct DisplayBarsReconciler {
    displays: RwLock<HashMap<DisplayId, SharedEntry>>,
    policy: Arc<dyn BarVisibilityPolicy>,
    channel: Arc<dyn InsetsChannel>,
}

impl DisplayBarsReconciler {
    /// Creates a reconciler with no displays.
    pub fn new(policy: Arc<dyn BarVisibilityPolicy>, channel: Arc<dyn InsetsChannel>) -> Self {
        Self {
            displays: RwLock::new(HashMap::new()),
            policy,
            channel,
        }
    }

    /// Starts tracking `display` and subscribes to its inset callbacks.
    ///
    /// Returns `false` without touching the existing entry if the display
    /// is already tracked. A failed subscription is logged; the display
    /// stays tracked.
    pub fn on_display_added(&self, display: DisplayId) -> bool {
        let entry: SharedEntry = Arc::new(Mutex::new(DisplayEntry::new(display)));
        // Held until subscribed, so a removal racing this call cannot
        // unsubscribe before the listener is added.
        let _subscribing = lock_entry(&entry);
        {
            let mut displays = self.write_displays();
            if displays.contains_key(&display) {
                sysbars_core::log_error!(display = display; "added twice, keeping existing state");
                return false;
            }
            displays.insert(display, Arc::clone(&entry));
        }

        if let Err(e) = self.channel.add_insets_listener(display) {
            sysbars_core::log_warn!(display = display; "failed to add insets listener: {e}");
        }
        sysbars_core::log_info!(display = display; "registered");
        true
    }

    /// Stops tracking `display` and unsubscribes from its callbacks.
    ///
    /// Waits for an in-flight subscription on the same display, so the
    /// listener is always removed after it was added. Returns `false` if
    /// the display was not tracked.
    pub fn on_display_removed(&self, display: DisplayId) -> bool {
        let Some(entry) = self.write_displays().remove(&display) else {
            sysbars_core::log_debug!("ignoring removal of untracked display {display}");
            return false;
        };
        lock_entry(&entry).removed = true;

        if let Err(e) = self.channel.remove_insets_listener(display) {
            sysbars_core::log_warn!(display = display; "failed to remove insets listener: {e}");
        }
        sysbars_core::log_info!(display = display; "unregistered");
        true
    }

    /// Re-runs reconciliation on every tracked display.
    ///
    /// Call after the policy's rules change.
    pub fn refresh_all(&self) {
        let entries: Vec<SharedEntry> = self.read_displays().values().cloned().collect();
        for entry in entries {
            lock_entry(&entry).reconcile(self.policy.as_ref(), self.channel.as_ref());
        }
    }

    pub fn is_tracked(&self, display: DisplayId) -> bool {
        self.read_displays().contains_key(&display)
    }

    /// Tracked display ids in ascending order.
    pub fn displays(&self) -> Vec<DisplayId> {
        let mut ids: Vec<DisplayId> = self.read_displays().keys().copied().collect();
        ids.sort_unstable();
        ids
    }

    pub fn snapshot(&self, display: DisplayId) -> Option<DisplaySnapshot> {
        self.with_entry(display, |entry| DisplaySnapshot {
            display: entry.id,
            phase: entry.phase(),
            package: entry.package.clone(),
            requested: entry.requested.clone(),
            state: entry.model.state().clone(),
            reported: entry.reported.clone(),
            controls: entry.model.controls().to_vec(),
            parked: entry.model.parked_types(),
            applied: entry.model.applied().copied().collect(),
        })
    }

    /// Runs `f` on the entry for `display` while holding only its lock.
    ///
    /// Returns `None` for untracked displays.
    fn with_entry<R>(&self, display: DisplayId, f: impl FnOnce(&mut DisplayEntry) -> R) -> Option<R> {
        let entry = self.read_displays().get(&display).cloned();
        let Some(entry) = entry else {
            sysbars_core::log_debug!(display = display; "ignoring callback, display is not tracked");
            return None;
        };
        let mut guard = lock_entry(&entry);
        if guard.removed {
            return None;
        }
        Some(f(&mut *guard))
    }

    fn read_displays(&self) -> RwLockReadGuard<'_, HashMap<DisplayId, SharedEntry>> {
        self.displays.read().unwrap_or_else(PoisonError::into_inner)
    }

    fn write_displays(&self) -> RwLockWriteGuard<'_, HashMap<DisplayId, SharedEntry>> {
        self.displays.write().unwrap_or_else(PoisonError::into_inner)
    }
}

fn lock_entry(entry: &SharedEntry) -> MutexGuard<'_, DisplayEntry> {
    entry.lock().unwrap_or_else(PoisonError::into_inner)
}
