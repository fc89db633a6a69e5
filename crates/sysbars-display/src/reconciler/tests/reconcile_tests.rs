use std::sync::Arc;

use super::super::*;
use super::{APP, example_policy, setup};
use sysbars_core::config::BarRule;
use sysbars_core::{
    DisplayEvent, InsetType, InsetsCallbacks, Rect, SharedPolicy, VisibilityDecision,
};

fn status_bar_state(visible: bool) -> InsetsState {
    let mut state = InsetsState::default();
    state.sources.insert(
        InsetType::StatusBars,
        sysbars_core::InsetSource {
            frame: Rect::new(0, 0, 1080, 63),
            visible,
        },
    );
    state
}

#[test]
fn focus_on_app_sends_exactly_one_update() {
    // Arrange
    let (reconciler, channel) = setup(example_policy());
    reconciler.on_display_added(0);
    channel.take_calls();

    // Act
    reconciler.on_top_focused_window_changed(0, Some(APP));

    // Assert
    let updates = channel.updates();
    assert_eq!(updates.len(), 1);
    let (display, vis) = &updates[0];
    assert_eq!(*display, 0);
    assert_eq!(vis.visibility(InsetType::StatusBars), Some(true));
    assert_eq!(vis.visibility(InsetType::NavigationBars), Some(false));
}

#[test]
fn unchanged_focus_sends_nothing() {
    // Arrange
    let (reconciler, channel) = setup(example_policy());
    reconciler.on_display_added(0);
    reconciler.on_top_focused_window_changed(0, Some(APP));
    channel.take_calls();

    // Act: same package, different activity.
    reconciler.on_top_focused_window_changed(0, Some("com.example.app/.Settings"));

    // Assert
    assert!(channel.calls().is_empty());
}

#[test]
fn unknown_package_still_pushes_state_without_override() {
    // Arrange
    let (reconciler, channel) = setup(example_policy());
    reconciler.on_display_added(0);

    // Act
    reconciler.on_top_focused_window_changed(0, Some("com.unknown"));

    // Assert
    let updates = channel.updates();
    assert_eq!(updates.len(), 1);
    assert!(updates[0].1.is_empty());
}

#[test]
fn decision_sets_only_its_bits() {
    // Arrange: caption bar hidden by an earlier explicit request.
    let (reconciler, _channel) = setup(example_policy());
    reconciler.on_display_added(0);
    reconciler.hide_insets(0, InsetTypes::CAPTION_BAR);

    // Act
    reconciler.on_top_focused_window_changed(0, Some(APP));

    // Assert
    let requested = reconciler.snapshot(0).unwrap().requested;
    assert_eq!(requested.visible_types(), InsetTypes::STATUS_BARS);
    assert_eq!(
        requested.hidden_types(),
        InsetTypes::NAVIGATION_BARS | InsetTypes::CAPTION_BAR
    );
}

#[test]
fn applying_same_decision_twice_is_idempotent() {
    // Arrange
    let (reconciler, channel) = setup(example_policy());
    reconciler.on_display_added(0);
    reconciler.on_top_focused_window_changed(0, Some(APP));
    let first = reconciler.snapshot(0).unwrap().requested;

    // Act
    reconciler.refresh_all();

    // Assert
    let second = reconciler.snapshot(0).unwrap().requested;
    assert_eq!(first, second);
    let updates = channel.updates();
    assert_eq!(updates.len(), 2);
    assert_eq!(updates[0].1, updates[1].1);
}

#[test]
fn insets_change_before_focus_sends_nothing() {
    // Arrange
    let (reconciler, channel) = setup(example_policy());
    reconciler.on_display_added(0);
    channel.take_calls();

    // Act
    reconciler.on_insets_state_changed(0, status_bar_state(true));

    // Assert
    assert!(channel.calls().is_empty());
    let snapshot = reconciler.snapshot(0).unwrap();
    assert_eq!(snapshot.phase, DisplayPhase::AwaitingFocus);
    assert_eq!(snapshot.state, status_bar_state(true));
}

#[test]
fn insets_change_after_focus_reconciles() {
    // Arrange
    let (reconciler, channel) = setup(example_policy());
    reconciler.on_display_added(0);
    reconciler.on_top_focused_window_changed(0, Some(APP));
    channel.take_calls();

    // Act: the platform reports the status bar hidden.
    reconciler.on_insets_state_changed(0, status_bar_state(false));

    // Assert: policy forces it visible again.
    assert_eq!(channel.updates().len(), 1);
    let snapshot = reconciler.snapshot(0).unwrap();
    assert!(snapshot.state.is_visible(InsetType::StatusBars));
    assert!(!snapshot.state.is_visible(InsetType::NavigationBars));
}

#[test]
fn repeated_platform_snapshot_is_ignored() {
    // Arrange
    let (reconciler, channel) = setup(example_policy());
    reconciler.on_display_added(0);
    reconciler.on_top_focused_window_changed(0, Some(APP));
    channel.take_calls();

    // Act: the platform reports the same state three times.
    for _ in 0..3 {
        reconciler.on_insets_state_changed(0, status_bar_state(true));
    }

    // Assert: only the first report reconciles.
    assert_eq!(channel.updates().len(), 1);
    let snapshot = reconciler.snapshot(0).unwrap();
    assert_eq!(snapshot.reported, Some(status_bar_state(true)));
    assert!(!snapshot.state.is_visible(InsetType::NavigationBars));
}

#[test]
fn changed_platform_snapshot_reconciles_again() {
    // Arrange
    let (reconciler, channel) = setup(example_policy());
    reconciler.on_display_added(0);
    reconciler.on_top_focused_window_changed(0, Some(APP));
    reconciler.on_insets_state_changed(0, status_bar_state(true));
    channel.take_calls();

    // Act
    reconciler.on_insets_state_changed(0, status_bar_state(false));
    reconciler.on_insets_state_changed(0, status_bar_state(true));

    // Assert
    assert_eq!(channel.updates().len(), 2);
}

#[test]
fn losing_focus_sends_nothing() {
    // Arrange
    let (reconciler, channel) = setup(example_policy());
    reconciler.on_display_added(0);
    reconciler.on_top_focused_window_changed(0, Some(APP));
    channel.take_calls();

    // Act
    reconciler.on_top_focused_window_changed(0, None);

    // Assert
    assert!(channel.calls().is_empty());
    let snapshot = reconciler.snapshot(0).unwrap();
    assert_eq!(snapshot.phase, DisplayPhase::AwaitingFocus);
    // Last requested state is kept.
    assert_eq!(snapshot.requested.hidden_types(), InsetTypes::NAVIGATION_BARS);
}

#[test]
fn failed_update_is_dropped_and_next_trigger_resends() {
    // Arrange
    let (reconciler, channel) = setup(example_policy());
    reconciler.on_display_added(0);
    channel.take_calls();
    channel.fail_next(1);

    // Act
    reconciler.on_top_focused_window_changed(0, Some(APP));

    // Assert: nothing delivered, local state still updated.
    assert!(channel.calls().is_empty());
    let requested = reconciler.snapshot(0).unwrap().requested;
    assert_eq!(requested.visibility(InsetType::NavigationBars), Some(false));

    // Act: next trigger.
    reconciler.on_insets_state_changed(0, status_bar_state(true));

    // Assert
    let updates = channel.updates();
    assert_eq!(updates.len(), 1);
    assert_eq!(updates[0].1, requested);
}

#[test]
fn displays_reconcile_independently() {
    // Arrange
    let (reconciler, channel) = setup(example_policy());
    reconciler.on_display_added(0);
    reconciler.on_display_added(1);

    // Act
    reconciler.on_top_focused_window_changed(0, Some(APP));
    reconciler.on_top_focused_window_changed(1, Some("com.unknown"));

    // Assert
    let updates = channel.updates();
    assert_eq!(updates.len(), 2);
    assert_eq!(updates[0].0, 0);
    assert_eq!(updates[1].0, 1);
    assert!(reconciler.snapshot(1).unwrap().requested.is_empty());
}

#[test]
fn policy_reload_applies_on_refresh() {
    // Arrange
    let policy = Arc::new(SharedPolicy::new(Vec::new()));
    let (reconciler, channel) = setup(policy.clone());
    reconciler.on_display_added(0);
    reconciler.on_top_focused_window_changed(0, Some(APP));
    channel.take_calls();

    // Act
    policy.replace(vec![BarRule {
        match_package: "*".into(),
        show: Vec::new(),
        hide: vec![InsetType::StatusBars],
    }]);
    reconciler.dispatch(DisplayEvent::PolicyChanged);

    // Assert
    let updates = channel.updates();
    assert_eq!(updates.len(), 1);
    assert_eq!(updates[0].1.visibility(InsetType::StatusBars), Some(false));
}

#[test]
fn refresh_skips_displays_without_focus() {
    let (reconciler, channel) = setup(example_policy());
    reconciler.on_display_added(0);
    channel.take_calls();

    reconciler.refresh_all();

    assert!(channel.calls().is_empty());
}

#[test]
fn overlapping_decision_ends_hidden() {
    // Arrange
    let policy: Arc<dyn BarVisibilityPolicy> = Arc::new(|_: &str| {
        VisibilityDecision::new(InsetTypes::SYSTEM_BARS, InsetTypes::CAPTION_BAR)
    });
    let (reconciler, _channel) = setup(policy);
    reconciler.on_display_added(0);

    // Act
    reconciler.on_top_focused_window_changed(0, Some(APP));

    // Assert
    let requested = reconciler.snapshot(0).unwrap().requested;
    assert_eq!(
        requested.visible_types(),
        InsetTypes::STATUS_BARS | InsetTypes::NAVIGATION_BARS
    );
    assert_eq!(requested.hidden_types(), InsetTypes::CAPTION_BAR);
}

#[test]
fn explicit_show_and_hide_update_bookkeeping_only() {
    // Arrange
    let (reconciler, channel) = setup(example_policy());
    reconciler.on_display_added(0);
    channel.take_calls();

    // Act
    reconciler.dispatch(DisplayEvent::Hide {
        display: 0,
        types: vec![InsetType::StatusBars],
    });
    reconciler.dispatch(DisplayEvent::Show {
        display: 0,
        types: vec![InsetType::NavigationBars],
    });

    // Assert
    assert!(channel.calls().is_empty());
    let snapshot = reconciler.snapshot(0).unwrap();
    assert_eq!(snapshot.requested.hidden_types(), InsetTypes::STATUS_BARS);
    assert_eq!(snapshot.requested.visible_types(), InsetTypes::NAVIGATION_BARS);
    assert_eq!(
        snapshot.parked,
        (InsetTypes::NAVIGATION_BARS, InsetTypes::STATUS_BARS)
    );
}
