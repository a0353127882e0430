#![forbid(unsafe_code)]

use crate::item::ItemId;

/// Notifications for the host, drained with
/// [`MasonryEngine::drain_events`](crate::MasonryEngine::drain_events).
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MasonryEvent {
    /// Controlled mode: every supplied item is visible and the host said
    /// more exist. Append items, clear `has_more`, or finish the request.
    LoadMoreRequested {
        /// Items visible when the request was made.
        visible: usize,
    },
    /// An item was clicked. `link` is the item's link, if any.
    ItemClicked {
        id: ItemId,
        index: usize,
        link: Option<String>,
    },
    /// The resolved column count changed.
    ColumnsChanged { from: usize, to: usize },
    /// Items `start..end` were placed for the first time and began entering.
    BatchRevealed { start: usize, end: usize },
}
