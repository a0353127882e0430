#![forbid(unsafe_code)]

//! The masonry engine.
//!
//! [`MasonryEngine`] owns everything one gallery instance needs: the item
//! list, the column resolver, reveal bookkeeping, per-item motion and hover
//! state, and a queue of [`MasonryEvent`]s. It is driven entirely by the
//! host: width notifications, viewport observations, probe results, pointer
//! input, and time via [`tick`](MasonryEngine::tick).
//!
//! # Update model
//!
//! Mutations only mark layout inputs dirty. The next [`update`] (which
//! [`tick`] calls first) repacks once, starts entrances for newly placed
//! items, and sends already placed items to their new slots.
//!
//! Newly placed items are laid out at the fallback aspect immediately and a
//! probe is queued for each; a successful probe refines the aspect on the
//! next pass. A failed probe changes nothing but the item's image state, so
//! its siblings never move.
//!
//! # Failure Modes
//!
//! - Unknown or zero container width: no slots, no sentinel, no probes.
//! - Duplicate ids: the first occurrence wins, later ones are logged and
//!   skipped.
//! - Probe results from a replaced list, or for an id no longer in the
//!   list: dropped.
//!
//! [`update`]: MasonryEngine::update
//! [`tick`]: MasonryEngine::tick

use std::collections::{HashMap, VecDeque};
use std::time::Duration;

use bitflags::bitflags;
use mortar_core::animation::stagger::stagger_offset;
use mortar_core::geometry::Rect;
use mortar_layout::{ColumnChange, ColumnResolver, MasonryLayout, pack, skeleton_layout};

use crate::config::{LoadMode, MasonryConfig};
use crate::error::ConfigError;
use crate::event::MasonryEvent;
use crate::hover::{HoverState, HoverStyle};
use crate::item::{GalleryItem, ImageState, ItemId, LoadHint};
use crate::motion::{Entrance, ItemMotion, ItemStyle, MotionPhase};
use crate::probe::{FALLBACK_ASPECT, ProbeOutcome, ProbeRequest, ProbeTicket};
use crate::reveal::{RevealState, RevealStep, SENTINEL_HEIGHT};

bitflags! {
    /// Layout inputs that changed since the last pass.
    #[derive(Debug, Clone, Copy, PartialEq, Eq)]
    pub struct Dirty: u8 {
        /// Container width changed.
        const WIDTH = 1 << 0;
        /// Column count changed.
        const COLUMNS = 1 << 1;
        /// Items added, removed, or revealed.
        const ITEMS = 1 << 2;
        /// An item's aspect was refined by a probe.
        const ASPECTS = 1 << 3;
    }
}

/// One visible item as it should be drawn this frame.
#[derive(Debug, Clone, Copy)]
pub struct PlacedItem<'a> {
    pub item: &'a GalleryItem,
    /// Position in the item list.
    pub index: usize,
    pub column: usize,
    /// Final slot (the animation target).
    pub slot: Rect,
    /// Animated style for this frame.
    pub style: ItemStyle,
    pub phase: MotionPhase,
    pub image: ImageState,
    pub load: LoadHint,
}

#[derive(Debug, Clone)]
struct Entry {
    item: GalleryItem,
    aspect: f32,
    image: ImageState,
    probe_requested: bool,
    motion: ItemMotion,
    hover: HoverState,
}

impl Entry {
    fn new(item: GalleryItem) -> Self {
        Self {
            item,
            aspect: FALLBACK_ASPECT,
            image: ImageState::Loading,
            probe_requested: false,
            motion: ItemMotion::unseen(),
            hover: HoverState::new(),
        }
    }
}

/// Masonry gallery state machine. See the [module docs](self).
#[derive(Debug)]
pub struct MasonryEngine {
    config: MasonryConfig,
    hover_style: HoverStyle,
    resolver: ColumnResolver,
    entries: Vec<Entry>,
    index: HashMap<ItemId, usize>,
    reveal: RevealState,
    session: u64,
    layout: MasonryLayout,
    dirty: Dirty,
    events: VecDeque<MasonryEvent>,
    probes: Vec<ProbeRequest>,
}

impl Default for MasonryEngine {
    fn default() -> Self {
        Self::from_valid(MasonryConfig::default())
    }
}

impl MasonryEngine {
    /// Build an engine, validating the config.
    pub fn new(config: MasonryConfig) -> Result<Self, ConfigError> {
        config.validate()?;
        Ok(Self::from_valid(config))
    }

    fn from_valid(config: MasonryConfig) -> Self {
        Self {
            hover_style: HoverStyle::from_config(&config),
            resolver: ColumnResolver::new(config.breakpoints.clone(), config.column_source),
            reveal: RevealState::new(config.initial_batch, config.batch_size),
            entries: Vec::new(),
            index: HashMap::new(),
            session: 0,
            layout: MasonryLayout::empty(),
            dirty: Dirty::empty(),
            events: VecDeque::new(),
            probes: Vec::new(),
            config,
        }
    }

    pub fn config(&self) -> &MasonryConfig {
        &self.config
    }

    /// Replace the config at runtime.
    ///
    /// Visible items stay visible; breakpoint changes take effect against
    /// the widths already observed.
    pub fn reconfigure(&mut self, config: MasonryConfig) -> Result<(), ConfigError> {
        config.validate()?;
        if config.breakpoints != self.config.breakpoints
            || config.column_source != self.config.column_source
        {
            let mut resolver =
                ColumnResolver::new(config.breakpoints.clone(), config.column_source);
            if let Some(width) = self.resolver.container_width() {
                resolver.observe_container_width(width);
            }
            if let Some(width) = self.resolver.viewport_width() {
                resolver.observe_viewport_width(width);
            }
            let change = ColumnChange {
                from: self.resolver.columns(),
                to: resolver.columns(),
            };
            self.resolver = resolver;
            if change.from != change.to {
                self.columns_changed(change);
            }
        }
        if !config.load_mode.host_has_more() {
            self.reveal.finish_request();
        }
        self.reveal
            .resize_batches(config.initial_batch, config.batch_size);
        self.hover_style = HoverStyle::from_config(&config);
        self.config = config;
        // Gap and clamps may have changed.
        self.dirty |= Dirty::ITEMS;
        Ok(())
    }

    // -----------------------------------------------------------------------
    // Items
    // -----------------------------------------------------------------------

    /// Supply the full item list.
    ///
    /// State is keyed by id: an item already in the gallery keeps its
    /// motion, hover and image state wherever it lands in the new list, so
    /// prepending, removing or reordering never replays an entrance. Items
    /// already shown stay shown. Only a list sharing no id with the current
    /// one starts a new session, in which every item enters again.
    pub fn set_items(&mut self, items: impl IntoIterator<Item = GalleryItem>) {
        let mut items: Vec<GalleryItem> = items.into_iter().collect();
        let continues = items.len() >= self.entries.len()
            && self
                .entries
                .iter()
                .zip(&items)
                .all(|(entry, item)| entry.item.id == item.id);
        if continues {
            let tail = items.split_off(self.entries.len());
            for (entry, item) in self.entries.iter_mut().zip(items) {
                entry.item.source = item.source;
                entry.item.link = item.link;
            }
            self.extend_items(tail);
            return;
        }
        if !items.iter().any(|item| self.index.contains_key(&item.id)) {
            self.start_session();
            self.extend_items(items);
            return;
        }
        self.rearrange(items);
    }

    /// Rebuild the list in the order of `items`, carrying over the entries
    /// of ids that survive.
    fn rearrange(&mut self, items: Vec<GalleryItem>) {
        let previous_total = self.entries.len();
        let mut previous: HashMap<ItemId, Entry> = self
            .entries
            .drain(..)
            .map(|entry| (entry.item.id.clone(), entry))
            .collect();
        self.index.clear();

        let mut added = 0usize;
        let mut shown = 0usize;
        for item in items {
            if self.index.contains_key(&item.id) {
                mortar_core::warn!(id = %item.id, "duplicate gallery item id ignored");
                continue;
            }
            let entry = match previous.remove(&item.id) {
                Some(mut entry) => {
                    entry.item.source = item.source;
                    entry.item.link = item.link;
                    entry
                }
                None => {
                    added += 1;
                    Entry::new(item)
                }
            };
            if entry.motion.phase() != MotionPhase::Unseen {
                shown = self.entries.len() + 1;
            }
            self.index.insert(entry.item.id.clone(), self.entries.len());
            self.entries.push(entry);
        }

        self.probes
            .retain(|request| self.index.contains_key(request.ticket.id()));
        self.reveal.keep_visible(shown);
        if added > 0
            && let Some(RevealStep::Revealed { start, end }) =
                self.reveal.items_appended(previous_total, self.entries.len())
        {
            mortar_core::info!(start, end, "load-more answered, revealing batch");
        }
        self.dirty |= Dirty::ITEMS;
        mortar_core::debug!(
            kept = self.entries.len() - added,
            added,
            removed = previous.len(),
            "gallery items rearranged"
        );
    }

    /// Append items. Returns how many were added.
    ///
    /// Ids already present are skipped with a warning. In controlled mode
    /// an append answers an outstanding load-more request.
    pub fn extend_items(&mut self, items: impl IntoIterator<Item = GalleryItem>) -> usize {
        let before = self.entries.len();
        for item in items {
            if self.index.contains_key(&item.id) {
                mortar_core::warn!(id = %item.id, "duplicate gallery item id ignored");
                continue;
            }
            self.index.insert(item.id.clone(), self.entries.len());
            self.entries.push(Entry::new(item));
        }
        let added = self.entries.len() - before;
        if added > 0 {
            self.dirty |= Dirty::ITEMS;
            if let Some(RevealStep::Revealed { start, end }) =
                self.reveal.items_appended(before, self.entries.len())
            {
                mortar_core::info!(start, end, "load-more answered, revealing batch");
            }
        }
        added
    }

    /// Drop every item and start a new session.
    pub fn reset(&mut self) {
        self.start_session();
    }

    fn start_session(&mut self) {
        self.session = self.session.wrapping_add(1);
        self.entries.clear();
        self.index.clear();
        self.reveal.reset();
        self.probes.clear();
        self.layout = MasonryLayout::empty();
        self.dirty |= Dirty::ITEMS;
        mortar_core::debug!(session = self.session, "gallery session started");
    }

    // -----------------------------------------------------------------------
    // Widths
    // -----------------------------------------------------------------------

    /// Container resize notification.
    pub fn set_container_width(&mut self, width: f32) {
        let previous = self.resolver.container_width();
        if let Some(change) = self.resolver.observe_container_width(width) {
            self.columns_changed(change);
        }
        if previous != self.resolver.container_width() {
            self.dirty |= Dirty::WIDTH;
        }
    }

    /// Viewport width notification (media-query style breakpoints).
    pub fn set_viewport_width(&mut self, width: f32) {
        if let Some(change) = self.resolver.observe_viewport_width(width) {
            self.columns_changed(change);
        }
    }

    fn columns_changed(&mut self, change: ColumnChange) {
        self.dirty |= Dirty::COLUMNS;
        self.events.push_back(MasonryEvent::ColumnsChanged {
            from: change.from,
            to: change.to,
        });
    }

    // -----------------------------------------------------------------------
    // Reveal
    // -----------------------------------------------------------------------

    /// Update the host's has-more flag. Only meaningful in controlled mode.
    pub fn set_has_more(&mut self, has_more: bool) {
        if !self.config.load_mode.is_controlled() {
            mortar_core::debug!(has_more, "has_more ignored in uncontrolled mode");
            return;
        }
        self.config.load_mode = LoadMode::Controlled { has_more };
        if !has_more {
            self.reveal.finish_request();
        }
    }

    /// The host finished a load-more request without appending items.
    pub fn finish_load_more(&mut self) {
        self.reveal.finish_request();
    }

    /// The sentinel is within reach of the viewport.
    ///
    /// Reveals the next batch of supplied items, or in controlled mode
    /// requests more from the host. Returns whether anything happened.
    pub fn sentinel_entered(&mut self) -> bool {
        let total = self.entries.len();
        match self.reveal.advance(total, self.config.load_mode) {
            RevealStep::Revealed { start, end } => {
                self.dirty |= Dirty::ITEMS;
                mortar_core::info!(start, end, "revealing batch");
                true
            }
            RevealStep::RequestMore => {
                self.events
                    .push_back(MasonryEvent::LoadMoreRequested { visible: total });
                mortar_core::info!(visible = total, "requesting more items");
                true
            }
            RevealStep::Idle => false,
        }
    }

    /// Report the visible scroll window in container coordinates.
    ///
    /// Triggers [`sentinel_entered`](Self::sentinel_entered) when the
    /// sentinel lies within the proximity margin of the window.
    pub fn observe_viewport(&mut self, scroll_top: f32, height: f32) -> bool {
        self.update();
        let Some(sentinel) = self.sentinel() else {
            return false;
        };
        let margin = self.config.proximity_margin;
        let near = sentinel.y <= scroll_top + height.max(0.0) + margin
            && sentinel.bottom() >= scroll_top - margin;
        near && self.sentinel_entered()
    }

    /// Trailing sentinel rect, present while more items can appear.
    pub fn sentinel(&self) -> Option<Rect> {
        if !self.has_more() {
            return None;
        }
        let width = self.resolver.container_width().filter(|w| *w > 0.0)?;
        Some(Rect::new(
            0.0,
            self.layout.content_height(),
            width,
            SENTINEL_HEIGHT,
        ))
    }

    /// Whether more items can still appear.
    pub fn has_more(&self) -> bool {
        self.reveal
            .has_more(self.entries.len(), self.config.load_mode)
    }

    /// Whether a controlled load-more request is outstanding.
    pub fn is_load_pending(&self) -> bool {
        self.reveal.is_pending()
    }

    // -----------------------------------------------------------------------
    // Probes
    // -----------------------------------------------------------------------

    /// Take the probes queued since the last call.
    pub fn take_probe_requests(&mut self) -> Vec<ProbeRequest> {
        std::mem::take(&mut self.probes)
    }

    /// Report a probe result. Returns whether it was applied.
    pub fn complete_probe(&mut self, ticket: &ProbeTicket, outcome: ProbeOutcome) -> bool {
        if ticket.session() != self.session {
            mortar_core::debug!(
                id = %ticket.id(),
                ticket_session = ticket.session(),
                session = self.session,
                "dropping stale probe result"
            );
            return false;
        }
        let Some(&index) = self.index.get(ticket.id()) else {
            return false;
        };
        let entry = &mut self.entries[index];
        if entry.image.is_settled() {
            return false;
        }
        if outcome.is_failure() {
            entry.image = ImageState::Failed;
            mortar_core::warn!(id = %entry.item.id, source = %entry.item.source, "image failed to load");
            return true;
        }
        entry.image = ImageState::Loaded;
        let aspect = outcome.dimensions().aspect();
        if (aspect - entry.aspect).abs() > f32::EPSILON {
            entry.aspect = aspect;
            self.dirty |= Dirty::ASPECTS;
        }
        true
    }

    // -----------------------------------------------------------------------
    // Layout and time
    // -----------------------------------------------------------------------

    /// Apply pending changes. Returns whether a layout pass ran.
    pub fn update(&mut self) -> bool {
        if self.dirty.is_empty() {
            return false;
        }
        let dirty = std::mem::replace(&mut self.dirty, Dirty::empty());
        let columns = self.resolver.columns();
        let width = self.resolver.container_width().unwrap_or(0.0);
        let visible = self.reveal.visible(self.entries.len());
        let span = mortar_core::debug_span!(
            "masonry.update",
            columns,
            width,
            visible,
            dirty = dirty.bits()
        );
        let _guard = span.enter();

        let params = self.config.params(columns, width);
        self.layout = pack(&params, self.entries[..visible].iter().map(|e| e.aspect));

        let mut entered: Vec<(usize, usize)> = Vec::new();
        for (index, slot) in self.layout.slots().iter().enumerate() {
            let entry = &mut self.entries[index];
            if entry.motion.phase() != MotionPhase::Unseen {
                entry.motion.move_to(
                    slot.rect,
                    self.config.update_duration,
                    self.config.update_easing,
                );
                continue;
            }
            let direction = self.config.direction.resolve(&entry.item.id);
            let entrance = Entrance {
                start: direction.start_rect(slot.rect, self.config.entrance_offset),
                delay: stagger_offset(
                    slot.column,
                    columns,
                    self.config.stagger,
                    self.config.stagger_mode,
                ),
                duration: self.config.entrance_duration,
                easing: self.config.entrance_easing,
                blur: if self.config.blur_to_focus {
                    self.config.blur_radius
                } else {
                    0.0
                },
            };
            entry.motion.enter(slot.rect, entrance);
            if !entry.probe_requested {
                entry.probe_requested = true;
                self.probes.push(ProbeRequest {
                    ticket: ProbeTicket::new(self.session, entry.item.id.clone()),
                    source: entry.item.source.clone(),
                });
            }
            match entered.last_mut() {
                Some((_, end)) if *end == index => *end = index + 1,
                _ => entered.push((index, index + 1)),
            }
        }

        for (start, end) in entered {
            mortar_core::debug!(start, end, "batch placed");
            self.events
                .push_back(MasonryEvent::BatchRevealed { start, end });
        }
        true
    }

    /// Advance animations by `dt`, applying pending changes first.
    ///
    /// Returns whether anything is still animating.
    pub fn tick(&mut self, dt: Duration) -> bool {
        self.update();
        let mut animating = false;
        for entry in &mut self.entries {
            animating |= entry.motion.tick(dt);
            animating |= entry.hover.tick(dt);
        }
        animating
    }

    /// Whether any entrance, move or hover transition is playing.
    pub fn is_animating(&self) -> bool {
        self.entries
            .iter()
            .any(|e| e.motion.is_animating() || e.hover.is_animating())
    }

    // -----------------------------------------------------------------------
    // Pointer input
    // -----------------------------------------------------------------------

    /// Pointer entered item `id`. Returns whether the item is placed.
    pub fn pointer_enter(&mut self, id: &str) -> bool {
        let style = self.hover_style;
        match self.placed_entry_mut(id) {
            Some(entry) => {
                entry.hover.enter(&style);
                true
            }
            None => false,
        }
    }

    /// Pointer left item `id`.
    pub fn pointer_leave(&mut self, id: &str) -> bool {
        let style = self.hover_style;
        match self.placed_entry_mut(id) {
            Some(entry) => {
                entry.hover.leave(&style);
                true
            }
            None => false,
        }
    }

    /// Item `id` was clicked. Queues [`MasonryEvent::ItemClicked`].
    pub fn click(&mut self, id: &str) -> bool {
        let Some(&index) = self.index.get(id) else {
            return false;
        };
        let entry = &self.entries[index];
        if entry.motion.phase() == MotionPhase::Unseen {
            return false;
        }
        self.events.push_back(MasonryEvent::ItemClicked {
            id: entry.item.id.clone(),
            index,
            link: entry.item.link.clone(),
        });
        true
    }

    fn placed_entry_mut(&mut self, id: &str) -> Option<&mut Entry> {
        let index = *self.index.get(id)?;
        let entry = &mut self.entries[index];
        (entry.motion.phase() != MotionPhase::Unseen).then_some(entry)
    }

    // -----------------------------------------------------------------------
    // Output
    // -----------------------------------------------------------------------

    /// Take queued events, oldest first.
    pub fn drain_events(&mut self) -> Vec<MasonryEvent> {
        self.events.drain(..).collect()
    }

    /// Visible items with their frame styles, in list order.
    pub fn placed_items(&self) -> Vec<PlacedItem<'_>> {
        self.layout
            .slots()
            .iter()
            .zip(&self.entries)
            .enumerate()
            .map(|(index, (slot, entry))| PlacedItem {
                item: &entry.item,
                index,
                column: slot.column,
                slot: slot.rect,
                style: entry
                    .motion
                    .style(entry.hover.scale(), entry.hover.overlay_opacity()),
                phase: entry.motion.phase(),
                image: entry.image,
                load: LoadHint::for_index(index),
            })
            .collect()
    }

    /// Frame style of item `id`, if it has been placed.
    pub fn item_style(&self, id: &str) -> Option<ItemStyle> {
        let entry = &self.entries[*self.index.get(id)?];
        (entry.motion.phase() != MotionPhase::Unseen).then(|| {
            entry
                .motion
                .style(entry.hover.scale(), entry.hover.overlay_opacity())
        })
    }

    /// Motion phase of item `id`.
    pub fn phase(&self, id: &str) -> Option<MotionPhase> {
        self.index
            .get(id)
            .map(|&index| self.entries[index].motion.phase())
    }

    /// Image state of item `id`.
    pub fn image_state(&self, id: &str) -> Option<ImageState> {
        self.index.get(id).map(|&index| self.entries[index].image)
    }

    /// Current layout (as of the last [`update`](Self::update)).
    pub fn layout(&self) -> &MasonryLayout {
        &self.layout
    }

    /// Container height, 0 with nothing placed.
    pub fn content_height(&self) -> f32 {
        self.layout.content_height()
    }

    pub fn columns(&self) -> usize {
        self.resolver.columns()
    }

    pub fn container_width(&self) -> Option<f32> {
        self.resolver.container_width()
    }

    /// Number of revealed items.
    pub fn visible_count(&self) -> usize {
        self.reveal.visible(self.entries.len())
    }

    /// Number of supplied items.
    pub fn total_count(&self) -> usize {
        self.entries.len()
    }

    pub fn session(&self) -> u64 {
        self.session
    }

    /// Placeholder layout for the loading state, at the current columns and width.
    pub fn skeleton(&self, count: usize) -> MasonryLayout {
        let width = self.resolver.container_width().unwrap_or(0.0);
        skeleton_layout(&self.config.params(self.resolver.columns(), width), count)
    }
}
