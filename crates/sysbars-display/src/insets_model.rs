//! The display-local view of insets: the latest state, the controls the
//! display holds, and the show/hide animations requested on them.
//!
//! A show or hide for a type the display controls animates right away.
//! Requests for types without a control are parked and applied when a
//! control for that type arrives; a later request for the same type
//! replaces the parked one.

use std::collections::{BTreeMap, VecDeque};

use serde::Serialize;
use sysbars_core::{InsetSourceControl, InsetType, InsetTypes, InsetsState};

/// Number of applied requests kept for inspection.
const HISTORY_LEN: usize = 32;

/// A show or hide animation started on the display.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct InsetsRequest {
    pub types: InsetTypes,
    pub show: bool,
}

#[derive(Debug, Default)]
pub struct InsetsModel {
    state: InsetsState,
    controls: Vec<InsetSourceControl>,
    parked: BTreeMap<InsetType, bool>,
    applied: VecDeque<InsetsRequest>,
}

impl InsetsModel {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn on_state_changed(&mut self, state: &InsetsState) {
        self.state = state.clone();
    }

    /// Replaces the held controls and applies parked requests that the
    /// new controls make possible.
    pub fn on_controls_changed(&mut self, controls: Vec<InsetSourceControl>) {
        self.controls = controls;
        let controlled = self.controlled_types();

        let ready: Vec<(InsetType, bool)> = self
            .parked
            .iter()
            .filter(|&(t, _)| controlled.contains(t.mask()))
            .map(|(&t, &show)| (t, show))
            .collect();
        for (t, show) in ready {
            self.parked.remove(&t);
            self.record(t.mask(), show);
        }
    }

    pub fn show(&mut self, types: InsetTypes) {
        self.request(types, true);
    }

    pub fn hide(&mut self, types: InsetTypes) {
        self.request(types, false);
    }

    fn request(&mut self, types: InsetTypes, show: bool) {
        if types.is_empty() {
            return;
        }
        self.state.set_visible(types, show);

        let controlled = types & self.controlled_types();
        if !controlled.is_empty() {
            self.record(controlled, show);
        }
        for t in types.difference(controlled).iter_types() {
            self.parked.insert(t, show);
        }
        for t in controlled.iter_types() {
            self.parked.remove(&t);
        }
    }

    fn record(&mut self, types: InsetTypes, show: bool) {
        if self.applied.len() == HISTORY_LEN {
            self.applied.pop_front();
        }
        self.applied.push_back(InsetsRequest { types, show });
    }

    pub fn state(&self) -> &InsetsState {
        &self.state
    }

    pub fn controls(&self) -> &[InsetSourceControl] {
        &self.controls
    }

    /// Types for which the display currently holds a control.
    pub fn controlled_types(&self) -> InsetTypes {
        self.controls
            .iter()
            .fold(InsetTypes::empty(), |acc, c| acc | c.inset_type.mask())
    }

    /// Types with a parked request, split into (show, hide).
    pub fn parked_types(&self) -> (InsetTypes, InsetTypes) {
        self.parked.iter().fold(
            (InsetTypes::empty(), InsetTypes::empty()),
            |(show, hide), (t, &visible)| {
                if visible {
                    (show | t.mask(), hide)
                } else {
                    (show, hide | t.mask())
                }
            },
        )
    }

    /// Most recently applied requests, oldest first.
    pub fn applied(&self) -> impl Iterator<Item = &InsetsRequest> {
        self.applied.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn controls(types: &[InsetType]) -> Vec<InsetSourceControl> {
        types.iter().map(|&t| InsetSourceControl::new(t)).collect()
    }

    #[test]
    fn controlled_request_applies_immediately() {
        // Arrange
        let mut model = InsetsModel::new();
        model.on_controls_changed(controls(&[InsetType::StatusBars]));

        // Act
        model.hide(InsetTypes::STATUS_BARS);

        // Assert
        let applied: Vec<_> = model.applied().copied().collect();
        assert_eq!(
            applied,
            vec![InsetsRequest {
                types: InsetTypes::STATUS_BARS,
                show: false
            }]
        );
        assert_eq!(model.parked_types(), (InsetTypes::empty(), InsetTypes::empty()));
        assert!(!model.state().is_visible(InsetType::StatusBars));
    }

    #[test]
    fn uncontrolled_request_is_parked_until_control_arrives() {
        // Arrange
        let mut model = InsetsModel::new();
        model.hide(InsetTypes::NAVIGATION_BARS);
        assert_eq!(model.applied().count(), 0);
        assert_eq!(model.parked_types().1, InsetTypes::NAVIGATION_BARS);

        // Act
        model.on_controls_changed(controls(&[InsetType::NavigationBars]));

        // Assert
        assert_eq!(model.parked_types().1, InsetTypes::empty());
        assert_eq!(model.applied().count(), 1);
    }

    #[test]
    fn later_request_replaces_parked_one() {
        let mut model = InsetsModel::new();
        model.hide(InsetTypes::STATUS_BARS);
        model.show(InsetTypes::STATUS_BARS);

        assert_eq!(
            model.parked_types(),
            (InsetTypes::STATUS_BARS, InsetTypes::empty())
        );
    }

    #[test]
    fn mixed_request_splits_by_control() {
        let mut model = InsetsModel::new();
        model.on_controls_changed(controls(&[InsetType::StatusBars]));

        model.show(InsetTypes::STATUS_BARS | InsetTypes::CAPTION_BAR);

        let applied: Vec<_> = model.applied().copied().collect();
        assert_eq!(applied[0].types, InsetTypes::STATUS_BARS);
        assert_eq!(model.parked_types().0, InsetTypes::CAPTION_BAR);
    }

    #[test]
    fn empty_request_is_ignored() {
        let mut model = InsetsModel::new();
        model.show(InsetTypes::empty());

        assert_eq!(model.applied().count(), 0);
        assert!(model.state().sources.is_empty());
    }

    #[test]
    fn history_is_bounded() {
        let mut model = InsetsModel::new();
        model.on_controls_changed(controls(&[InsetType::StatusBars]));

        for i in 0..(HISTORY_LEN + 5) {
            if i % 2 == 0 {
                model.hide(InsetTypes::STATUS_BARS);
            } else {
                model.show(InsetTypes::STATUS_BARS);
            }
        }

        assert_eq!(model.applied().count(), HISTORY_LEN);
    }
}
