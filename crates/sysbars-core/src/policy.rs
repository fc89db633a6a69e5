//! Bar visibility policy: which system bars a foreground package forces
//! shown or hidden.

use std::sync::RwLock;

use serde::Serialize;

use crate::config::{BarRule, decide};
use crate::inset::InsetTypes;

/// The override a policy applies for one package.
///
/// Empty masks mean "no override".
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct VisibilityDecision {
    pub to_show: InsetTypes,
    pub to_hide: InsetTypes,
}

impl VisibilityDecision {
    pub fn new(to_show: InsetTypes, to_hide: InsetTypes) -> Self {
        Self { to_show, to_hide }
    }

    /// The decision that changes nothing.
    pub fn none() -> Self {
        Self::default()
    }

    pub fn is_none(&self) -> bool {
        self.to_show.is_empty() && self.to_hide.is_empty()
    }

    /// Strips the IME type from both masks and resolves overlap.
    ///
    /// Show is applied before hide, so a type in both masks ends hidden.
    pub fn normalized(self) -> Self {
        let to_hide = self.to_hide.without_ime();
        Self {
            to_show: self.to_show.without_ime().difference(to_hide),
            to_hide,
        }
    }
}

/// Maps a foreground package to the bars it forces shown or hidden.
///
/// Implementations must answer for any package; unknown packages get
/// [`VisibilityDecision::none`].
pub trait BarVisibilityPolicy: Send + Sync {
    fn bar_visibilities(&self, package: &str) -> VisibilityDecision;
}

impl<F> BarVisibilityPolicy for F
where
    F: Fn(&str) -> VisibilityDecision + Send + Sync,
{
    fn bar_visibilities(&self, package: &str) -> VisibilityDecision {
        self(package)
    }
}

/// A policy backed by an ordered list of [`BarRule`]s. First match wins.
#[derive(Debug, Clone, Default)]
pub struct RulePolicy {
    rules: Vec<BarRule>,
}

impl RulePolicy {
    pub fn new(rules: Vec<BarRule>) -> Self {
        Self { rules }
    }

    pub fn rules(&self) -> &[BarRule] {
        &self.rules
    }
}

impl BarVisibilityPolicy for RulePolicy {
    fn bar_visibilities(&self, package: &str) -> VisibilityDecision {
        decide(package, &self.rules)
    }
}

/// A [`RulePolicy`] whose rules can be swapped while reconcilers hold it.
#[derive(Debug, Default)]
pub struct SharedPolicy {
    inner: RwLock<RulePolicy>,
}

impl SharedPolicy {
    pub fn new(rules: Vec<BarRule>) -> Self {
        Self {
            inner: RwLock::new(RulePolicy::new(rules)),
        }
    }

    /// Replaces every rule. Subsequent lookups see the new rules.
    pub fn replace(&self, rules: Vec<BarRule>) {
        match self.inner.write() {
            Ok(mut policy) => *policy = RulePolicy::new(rules),
            Err(poisoned) => *poisoned.into_inner() = RulePolicy::new(rules),
        }
    }

    pub fn rule_count(&self) -> usize {
        self.inner.read().map(|p| p.rules().len()).unwrap_or(0)
    }
}

impl BarVisibilityPolicy for SharedPolicy {
    fn bar_visibilities(&self, package: &str) -> VisibilityDecision {
        let Ok(policy) = self.inner.read() else {
            return VisibilityDecision::none();
        };
        policy.bar_visibilities(package)
    }
}
