//! Routes platform callbacks and [`DisplayEvent`]s to display entries.

use sysbars_core::{
    DisplayEvent, DisplayId, InsetSourceControl, InsetTypes, InsetsCallbacks, InsetsState,
};

use super::DisplayBarsReconciler;
use super::entry::package_of;

impl InsetsCallbacks for DisplayBarsReconciler {
    fn on_insets_state_changed(&self, display: DisplayId, state: InsetsState) {
        self.with_entry(display, |entry| {
            if entry.set_insets_state(state) {
                entry.reconcile(self.policy.as_ref(), self.channel.as_ref());
            }
        });
    }

    fn on_controls_changed(&self, display: DisplayId, controls: Vec<InsetSourceControl>) {
        self.with_entry(display, |entry| entry.set_controls(controls));
    }

    fn on_top_focused_window_changed(&self, display: DisplayId, component: Option<&str>) {
        let package = component.and_then(package_of);
        self.with_entry(display, |entry| {
            if !entry.set_package(package) {
                return;
            }
            sysbars_core::log_info!(
                display = display;
                "foreground package is now {}",
                package.unwrap_or("<none>")
            );
            entry.reconcile(self.policy.as_ref(), self.channel.as_ref());
        });
    }

    fn show_insets(&self, display: DisplayId, types: InsetTypes) {
        self.with_entry(display, |entry| entry.show(types));
    }

    fn hide_insets(&self, display: DisplayId, types: InsetTypes) {
        self.with_entry(display, |entry| entry.hide(types));
    }
}

impl DisplayBarsReconciler {
    /// Applies one event to the matching display.
    pub fn dispatch(&self, event: DisplayEvent) {
        match event {
            DisplayEvent::Added { display } => {
                self.on_display_added(display);
            }
            DisplayEvent::Removed { display } => {
                self.on_display_removed(display);
            }
            DisplayEvent::InsetsChanged { display, state } => {
                self.on_insets_state_changed(display, state);
            }
            DisplayEvent::ControlsChanged { display, controls } => {
                self.on_controls_changed(display, controls);
            }
            DisplayEvent::FocusChanged { display, component } => {
                self.on_top_focused_window_changed(display, component.as_deref());
            }
            DisplayEvent::Show { display, types } => {
                self.show_insets(display, InsetTypes::from_types(&types));
            }
            DisplayEvent::Hide { display, types } => {
                self.hide_insets(display, InsetTypes::from_types(&types));
            }
            DisplayEvent::PolicyChanged => self.refresh_all(),
        }
    }
}
