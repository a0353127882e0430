#![forbid(unsafe_code)]

//! Incremental reveal.
//!
//! Items are shown in batches: an initial batch, then one more batch each
//! time the trailing sentinel approaches the viewport. Once every supplied
//! item is visible, a controlled gallery asks the host for more and then
//! waits. No second request goes out until the host answers by appending
//! items, clearing its has-more flag, or finishing the request explicitly.
//!
//! # Invariants
//!
//! 1. Within a session the visible count never decreases.
//! 2. At most one load-more request is outstanding.
//! 3. `visible(total) <= total`.

use crate::config::LoadMode;

/// Height of the trailing sentinel, in pixels.
pub const SENTINEL_HEIGHT: f32 = 1.0;

/// Result of the sentinel being reached.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RevealStep {
    /// Items `start..end` became visible.
    Revealed { start: usize, end: usize },
    /// Every supplied item is visible; the host should append more.
    RequestMore,
    /// Nothing to do.
    Idle,
}

/// Batch bookkeeping for one session.
#[derive(Debug, Clone)]
pub struct RevealState {
    initial: usize,
    batch: usize,
    target: usize,
    pending: bool,
}

impl RevealState {
    /// Batch sizes below 1 are treated as 1.
    pub fn new(initial: usize, batch: usize) -> Self {
        let initial = initial.max(1);
        Self {
            initial,
            batch: batch.max(1),
            target: initial,
            pending: false,
        }
    }

    /// Number of visible items out of `total`.
    pub fn visible(&self, total: usize) -> usize {
        self.target.min(total)
    }

    /// Whether a load-more request is outstanding.
    pub const fn is_pending(&self) -> bool {
        self.pending
    }

    /// Whether the sentinel should be shown.
    pub fn has_more(&self, total: usize, mode: LoadMode) -> bool {
        self.visible(total) < total || mode.host_has_more()
    }

    /// The sentinel came within reach of the viewport.
    pub fn advance(&mut self, total: usize, mode: LoadMode) -> RevealStep {
        let visible = self.visible(total);
        if visible < total {
            self.target = visible.saturating_add(self.batch);
            return RevealStep::Revealed {
                start: visible,
                end: self.visible(total),
            };
        }
        if mode.host_has_more() && !self.pending {
            self.pending = true;
            return RevealStep::RequestMore;
        }
        RevealStep::Idle
    }

    /// The host appended items.
    ///
    /// If a request was outstanding the new items answer it, and the next
    /// batch is revealed straight away since the viewport is already at the
    /// sentinel.
    pub fn items_appended(&mut self, previous_total: usize, total: usize) -> Option<RevealStep> {
        if !self.pending {
            return None;
        }
        self.pending = false;
        let visible = self.visible(previous_total);
        self.target = self.target.max(visible.saturating_add(self.batch));
        let end = self.visible(total);
        (end > visible).then_some(RevealStep::Revealed {
            start: visible,
            end,
        })
    }

    /// Grow the visible count to at least `count`.
    ///
    /// Used when a reordered list moves already shown items further down,
    /// so they stay on screen.
    pub fn keep_visible(&mut self, count: usize) {
        self.target = self.target.max(count);
    }

    /// Clear the outstanding request without new items.
    pub fn finish_request(&mut self) {
        self.pending = false;
    }

    /// Apply new batch sizes. The visible count is kept.
    pub fn resize_batches(&mut self, initial: usize, batch: usize) {
        self.initial = initial.max(1);
        self.batch = batch.max(1);
        self.target = self.target.max(self.initial);
    }

    /// Start a new session.
    pub fn reset(&mut self) {
        self.target = self.initial;
        self.pending = false;
    }
}
