use crate::inset::{DisplayId, InsetSourceControl, InsetTypes, InsetsState, RequestedVisibilities};

/// A boxed error type for remote inset channel operations.
///
/// The transport behind a channel (IPC, local call, test double) decides
/// what can go wrong; callers only need to log it.
pub type ChannelResult<T> = Result<T, Box<dyn std::error::Error + Send + Sync>>;

/// The window manager's side of the inset control protocol.
///
/// Every call is one-way and best-effort. Implementations must be
/// callable from any thread.
pub trait InsetsChannel: Send + Sync {
    /// Starts delivering inset callbacks for `display`.
    fn add_insets_listener(&self, display: DisplayId) -> ChannelResult<()>;

    /// Stops delivering inset callbacks for `display`.
    fn remove_insets_listener(&self, display: DisplayId) -> ChannelResult<()>;

    /// Replaces the requested visibilities the window manager applies
    /// to `display`.
    fn update_requested_visibilities(
        &self,
        display: DisplayId,
        visibilities: &RequestedVisibilities,
    ) -> ChannelResult<()>;
}

/// Callbacks the platform delivers for a registered display.
pub trait InsetsCallbacks {
    /// A new inset geometry/visibility snapshot is available.
    fn on_insets_state_changed(&self, display: DisplayId, state: InsetsState);

    /// The set of inset source controls held by the display changed.
    fn on_controls_changed(&self, display: DisplayId, controls: Vec<InsetSourceControl>);

    /// The top focused window changed. `component` is `package/class`
    /// or a bare package name; `None` when nothing is focused.
    fn on_top_focused_window_changed(&self, display: DisplayId, component: Option<&str>);

    /// Requests that `types` be shown on the display.
    fn show_insets(&self, display: DisplayId, types: InsetTypes);

    /// Requests that `types` be hidden on the display.
    fn hide_insets(&self, display: DisplayId, types: InsetTypes);
}
