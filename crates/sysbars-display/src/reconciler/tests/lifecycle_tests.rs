use super::super::*;
use super::{APP, example_policy, setup};
use crate::channel::ChannelCall;
use sysbars_core::{DisplayEvent, InsetsCallbacks};

#[test]
fn added_display_is_tracked_and_subscribed() {
    // Arrange
    let (reconciler, channel) = setup(example_policy());

    // Act
    let added = reconciler.on_display_added(0);

    // Assert
    assert!(added);
    assert!(reconciler.is_tracked(0));
    assert_eq!(channel.calls(), vec![ChannelCall::AddListener { display: 0 }]);
}

#[test]
fn removed_display_is_untracked_and_unsubscribed() {
    // Arrange
    let (reconciler, channel) = setup(example_policy());
    reconciler.on_display_added(0);

    // Act
    let removed = reconciler.on_display_removed(0);

    // Assert
    assert!(removed);
    assert!(!reconciler.is_tracked(0));
    assert_eq!(
        channel.calls().last(),
        Some(&ChannelCall::RemoveListener { display: 0 })
    );
}

#[test]
fn removing_untracked_display_is_a_no_op() {
    // Arrange
    let (reconciler, channel) = setup(example_policy());
    reconciler.on_display_added(1);

    // Act
    let removed = reconciler.on_display_removed(42);

    // Assert
    assert!(!removed);
    assert_eq!(reconciler.displays(), vec![1]);
    assert_eq!(channel.calls(), vec![ChannelCall::AddListener { display: 1 }]);
}

#[test]
fn adding_tracked_display_keeps_existing_state() {
    // Arrange
    let (reconciler, channel) = setup(example_policy());
    reconciler.on_display_added(0);
    reconciler.on_top_focused_window_changed(0, Some(APP));

    // Act
    let added = reconciler.on_display_added(0);

    // Assert
    assert!(!added);
    let snapshot = reconciler.snapshot(0).unwrap();
    assert_eq!(snapshot.package.as_deref(), Some(APP));
    let listeners = channel
        .calls()
        .into_iter()
        .filter(|c| matches!(c, ChannelCall::AddListener { .. }))
        .count();
    assert_eq!(listeners, 1);
}

#[test]
fn failed_subscription_still_tracks_display() {
    // Arrange
    let (reconciler, channel) = setup(example_policy());
    channel.fail_next(1);

    // Act
    reconciler.on_display_added(3);

    // Assert
    assert!(reconciler.is_tracked(3));
    assert!(channel.calls().is_empty());
}

#[test]
fn callbacks_for_untracked_display_are_ignored() {
    let (reconciler, channel) = setup(example_policy());

    reconciler.on_top_focused_window_changed(9, Some(APP));

    assert!(channel.calls().is_empty());
    assert!(reconciler.snapshot(9).is_none());
}

#[test]
fn readded_display_starts_fresh() {
    // Arrange
    let (reconciler, _channel) = setup(example_policy());
    reconciler.on_display_added(0);
    reconciler.on_top_focused_window_changed(0, Some(APP));
    reconciler.on_display_removed(0);

    // Act
    reconciler.on_display_added(0);

    // Assert
    let snapshot = reconciler.snapshot(0).unwrap();
    assert_eq!(snapshot.phase, DisplayPhase::AwaitingFocus);
    assert!(snapshot.requested.is_empty());
}

#[test]
fn displays_are_listed_in_order() {
    let (reconciler, _channel) = setup(example_policy());
    for id in [5, 0, 2] {
        reconciler.on_display_added(id);
    }

    assert_eq!(reconciler.displays(), vec![0, 2, 5]);
}

#[test]
fn dispatch_routes_lifecycle_events() {
    let (reconciler, _channel) = setup(example_policy());

    reconciler.dispatch(DisplayEvent::Added { display: 4 });
    assert!(reconciler.is_tracked(4));

    reconciler.dispatch(DisplayEvent::Removed { display: 4 });
    assert!(!reconciler.is_tracked(4));
}
