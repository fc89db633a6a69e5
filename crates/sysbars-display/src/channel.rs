//! An [`InsetsChannel`] that keeps every call in memory.
//!
//! Backs the `replay` command and the reconciler tests. It can be told
//! to fail upcoming calls to simulate an unreachable window manager.

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Mutex, PoisonError};

use serde::Serialize;
use sysbars_core::{ChannelResult, DisplayId, InsetsChannel, RequestedVisibilities};

/// A call delivered to the window manager.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "call", rename_all = "snake_case")]
pub enum ChannelCall {
    AddListener {
        display: DisplayId,
    },
    RemoveListener {
        display: DisplayId,
    },
    UpdateVisibilities {
        display: DisplayId,
        visibilities: RequestedVisibilities,
    },
}

#[derive(Debug, Default)]
pub struct RecordingChannel {
    calls: Mutex<Vec<ChannelCall>>,
    failures: AtomicUsize,
}

impl RecordingChannel {
    pub fn new() -> Self {
        Self::default()
    }

    /// Makes the next `n` calls fail without being recorded.
    pub fn fail_next(&self, n: usize) {
        self.failures.store(n, Ordering::SeqCst);
    }

    /// Returns a copy of every delivered call.
    pub fn calls(&self) -> Vec<ChannelCall> {
        self.lock().clone()
    }

    /// Removes and returns every delivered call.
    pub fn take_calls(&self) -> Vec<ChannelCall> {
        std::mem::take(&mut *self.lock())
    }

    /// Delivered visibility updates, in order.
    pub fn updates(&self) -> Vec<(DisplayId, RequestedVisibilities)> {
        self.lock()
            .iter()
            .filter_map(|call| match call {
                ChannelCall::UpdateVisibilities {
                    display,
                    visibilities,
                } => Some((*display, visibilities.clone())),
                _ => None,
            })
            .collect()
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, Vec<ChannelCall>> {
        self.calls.lock().unwrap_or_else(PoisonError::into_inner)
    }

    fn deliver(&self, call: ChannelCall) -> ChannelResult<()> {
        let failing = self
            .failures
            .fetch_update(Ordering::SeqCst, Ordering::SeqCst, |n| n.checked_sub(1))
            .is_ok();
        if failing {
            return Err("window manager unreachable".into());
        }
        self.lock().push(call);
        Ok(())
    }
}

impl InsetsChannel for RecordingChannel {
    fn add_insets_listener(&self, display: DisplayId) -> ChannelResult<()> {
        self.deliver(ChannelCall::AddListener { display })
    }

    fn remove_insets_listener(&self, display: DisplayId) -> ChannelResult<()> {
        self.deliver(ChannelCall::RemoveListener { display })
    }

    fn update_requested_visibilities(
        &self,
        display: DisplayId,
        visibilities: &RequestedVisibilities,
    ) -> ChannelResult<()> {
        self.deliver(ChannelCall::UpdateVisibilities {
            display,
            visibilities: visibilities.clone(),
        })
    }
}
