//! Per-display bookkeeping and the reconciliation pass.

use serde::Serialize;
use sysbars_core::{
    BarVisibilityPolicy, DisplayId, InsetSourceControl, InsetType, InsetTypes, InsetsChannel,
    InsetsState, RequestedVisibilities,
};

use crate::insets_model::InsetsModel;

/// Where a registered display is in its callback-driven cycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum DisplayPhase {
    /// No foreground package is known yet; nothing is pushed.
    AwaitingFocus,
    /// A foreground package is known; every trigger reconciles.
    Reconciling,
}

/// State tracked for one registered display.
pub(super) struct DisplayEntry {
    pub(super) id: DisplayId,
    pub(super) requested: RequestedVisibilities,
    /// The last state the platform reported. Local show/hide requests
    /// change the model's view, never this one.
    pub(super) reported: Option<InsetsState>,
    pub(super) package: Option<String>,
    pub(super) model: InsetsModel,
    /// Set once the display is unregistered so stragglers holding the
    /// entry do not push updates for a gone display.
    pub(super) removed: bool,
}

impl DisplayEntry {
    pub(super) fn new(id: DisplayId) -> Self {
        Self {
            id,
            requested: RequestedVisibilities::default(),
            reported: None,
            package: None,
            model: InsetsModel::new(),
            removed: false,
        }
    }

    pub(super) fn phase(&self) -> DisplayPhase {
        if self.package.is_some() {
            DisplayPhase::Reconciling
        } else {
            DisplayPhase::AwaitingFocus
        }
    }

    /// Stores a state reported by the platform. Returns `false` if it
    /// equals the previous report.
    pub(super) fn set_insets_state(&mut self, state: InsetsState) -> bool {
        if self.reported.as_ref() == Some(&state) {
            return false;
        }
        self.model.on_state_changed(&state);
        self.reported = Some(state);
        true
    }

    /// Forwards every non-IME control to the local model.
    pub(super) fn set_controls(&mut self, controls: Vec<InsetSourceControl>) {
        let controls = controls
            .into_iter()
            .filter(|c| c.inset_type != InsetType::Ime)
            .collect();
        self.model.on_controls_changed(controls);
    }

    /// Stores the foreground package. Returns `false` if unchanged.
    pub(super) fn set_package(&mut self, package: Option<&str>) -> bool {
        if self.package.as_deref() == package {
            return false;
        }
        self.package = package.map(str::to_owned);
        true
    }

    pub(super) fn show(&mut self, types: InsetTypes) {
        self.apply(types, true);
    }

    pub(super) fn hide(&mut self, types: InsetTypes) {
        self.apply(types, false);
    }

    fn apply(&mut self, types: InsetTypes, visible: bool) {
        let types = types.without_ime();
        if types.is_empty() {
            return;
        }
        self.requested.set(types, visible);
        if visible {
            self.model.show(types);
        } else {
            self.model.hide(types);
        }
    }

    /// Applies the policy decision for the foreground package and pushes
    /// the requested visibilities to the window manager.
    ///
    /// Does nothing while no package is known. A failed push is logged
    /// and dropped; the next trigger sends the full state again.
    pub(super) fn reconcile(&mut self, policy: &dyn BarVisibilityPolicy, channel: &dyn InsetsChannel) {
        if self.removed {
            return;
        }
        let Some(package) = self.package.as_deref() else {
            sysbars_core::log_debug!(display = self.id; "no foreground package, skipping");
            return;
        };
        let decision = policy.bar_visibilities(package).normalized();
        sysbars_core::log_debug!(
            display = self.id;
            "{package} -> show {:?}, hide {:?}",
            decision.to_show,
            decision.to_hide
        );

        self.show(decision.to_show);
        self.hide(decision.to_hide);

        if let Err(e) = channel.update_requested_visibilities(self.id, &self.requested) {
            sysbars_core::log_warn!(display = self.id; "failed to update requested visibilities: {e}");
        }
    }
}

/// Extracts the package from a `package/class` component string.
pub(super) fn package_of(component: &str) -> Option<&str> {
    let package = component.split('/').next().unwrap_or_default().trim();
    (!package.is_empty()).then_some(package)
}
