#![forbid(unsafe_code)]

//! Step-based gallery runner for the web.
//!
//! [`WebGallery`] drives a [`MasonryEngine`] through event / tick / render
//! cycles without threads or blocking. The host controls the loop:
//!
//! 1. Push events via [`WebGallery::push_event`] or [`WebGallery::push_json`].
//! 2. Advance time via [`WebGallery::advance_time`].
//! 3. Call [`WebGallery::step`] to apply the events and advance animations.
//! 4. Read styles, probes and events via [`WebGallery::take_outputs`].
//!
//! # Example
//!
//! ```
//! use core::time::Duration;
//! use mortar_web::{HostEvent, ItemJson, WebGallery, WebOptions};
//!
//! let mut gallery = WebGallery::new(WebOptions::default()).unwrap();
//! gallery.push_event(HostEvent::ContainerResize { width: 1204.0 });
//! gallery.push_event(HostEvent::Items {
//!     items: (0..4).map(|i| ItemJson::new(i.to_string(), format!("{i}.jpg"))).collect(),
//! });
//! gallery.advance_time(Duration::from_millis(16));
//! let result = gallery.step().unwrap();
//! assert!(result.rendered);
//!
//! let outputs = gallery.take_outputs();
//! assert_eq!(outputs.items.len(), 4);
//! assert_eq!(outputs.probes.len(), 4);
//! ```

use core::time::Duration;
use std::collections::{HashMap, VecDeque};

use mortar_gallery::{
    Dimensions, ItemId, MasonryConfig, MasonryEngine, ProbeOutcome, ProbeTicket,
};

use crate::event::HostEvent;
use crate::outputs::{EventJson, ItemFrame, ProbeJson, WebOutputs};
use crate::{DeterministicClock, WebError};

/// Result of a single [`WebGallery::step`] call.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StepResult {
    /// Whether frame outputs were refreshed during this step.
    pub rendered: bool,
    /// Number of host events applied during this step.
    pub events_processed: u32,
    /// Whether anything is still animating.
    pub animating: bool,
    /// Current frame index (monotonically increasing).
    pub frame_idx: u64,
}

/// Host-driven gallery runner.
#[derive(Debug)]
pub struct WebGallery {
    engine: MasonryEngine,
    clock: DeterministicClock,
    last_tick: Duration,
    queue: VecDeque<HostEvent>,
    tickets: HashMap<ItemId, ProbeTicket>,
    outputs: WebOutputs,
    dirty: bool,
    frame_idx: u64,
}

impl WebGallery {
    /// Create a gallery from page options.
    pub fn new(options: crate::WebOptions) -> Result<Self, WebError> {
        let config = MasonryConfig::try_from(options)?;
        Ok(Self::with_engine(MasonryEngine::new(config)?))
    }

    /// Wrap an existing engine.
    ///
    /// Later [`HostEvent::Options`] events only override the fields they
    /// carry, so settings made on the engine directly survive them.
    #[must_use]
    pub fn with_engine(engine: MasonryEngine) -> Self {
        Self {
            engine,
            clock: DeterministicClock::new(),
            last_tick: Duration::ZERO,
            queue: VecDeque::new(),
            tickets: HashMap::new(),
            outputs: WebOutputs::default(),
            dirty: true,
            frame_idx: 0,
        }
    }

    /// Queue an event for the next [`step`](Self::step).
    pub fn push_event(&mut self, event: HostEvent) {
        self.queue.push_back(event);
    }

    /// Queue one JSON event, or a JSON array of events.
    pub fn push_json(&mut self, json: &str) -> Result<(), WebError> {
        if json.trim_start().starts_with('[') {
            self.queue.extend(HostEvent::batch_from_json_str(json)?);
        } else {
            self.queue.push_back(HostEvent::from_json_str(json)?);
        }
        Ok(())
    }

    /// Advance the deterministic clock by `dt`.
    pub fn advance_time(&mut self, dt: Duration) {
        self.clock.advance(dt);
    }

    /// Set the deterministic clock to an absolute time.
    pub fn set_time(&mut self, now: Duration) {
        self.clock.set(now);
    }

    /// Apply queued events, advance animations to the clock, and refresh
    /// outputs if anything changed.
    ///
    /// An event that fails (bad options) stops the step; events after it
    /// stay queued for the next call.
    pub fn step(&mut self) -> Result<StepResult, WebError> {
        // 1. Apply pending events.
        let mut events_processed: u32 = 0;
        while let Some(event) = self.queue.pop_front() {
            events_processed += 1;
            self.handle_event(event)?;
        }

        // 2. Advance animations.
        let now = self.clock.now();
        let dt = now.saturating_sub(self.last_tick);
        self.last_tick = now;
        let was_animating = self.engine.is_animating();
        let animating = self.engine.tick(dt);

        // 3. Collect queued engine output, then render if needed.
        self.collect();
        let rendered = self.dirty || events_processed > 0 || was_animating;
        if rendered {
            self.render_frame(animating);
        }

        Ok(StepResult {
            rendered,
            events_processed,
            animating,
            frame_idx: self.frame_idx,
        })
    }

    /// Take the captured outputs, leaving the frame in place and clearing
    /// the accumulated probes and events.
    pub fn take_outputs(&mut self) -> WebOutputs {
        let frame = WebOutputs {
            probes: Vec::new(),
            events: Vec::new(),
            ..self.outputs.clone()
        };
        std::mem::replace(&mut self.outputs, frame)
    }

    /// Read the captured outputs without consuming them.
    pub fn outputs(&self) -> &WebOutputs {
        &self.outputs
    }

    pub fn engine(&self) -> &MasonryEngine {
        &self.engine
    }

    pub fn engine_mut(&mut self) -> &mut MasonryEngine {
        self.dirty = true;
        &mut self.engine
    }

    /// Current frame index.
    pub fn frame_idx(&self) -> u64 {
        self.frame_idx
    }

    /// Current clock time.
    pub fn now(&self) -> Duration {
        self.clock.now()
    }

    /// Events waiting for the next step.
    pub fn pending_events(&self) -> usize {
        self.queue.len()
    }

    // --- Private helpers ---

    fn handle_event(&mut self, event: HostEvent) -> Result<(), WebError> {
        match event {
            HostEvent::Items { items } => {
                let session = self.engine.session();
                self.engine.set_items(items.into_iter().map(Into::into));
                if self.engine.session() != session {
                    self.tickets.clear();
                } else {
                    let engine = &self.engine;
                    self.tickets.retain(|id, _| engine.phase(id.as_str()).is_some());
                }
            }
            HostEvent::Append { items } => {
                self.engine.extend_items(items.into_iter().map(Into::into));
            }
            HostEvent::ContainerResize { width } => self.engine.set_container_width(width),
            HostEvent::ViewportResize { width } => self.engine.set_viewport_width(width),
            HostEvent::Scroll { top, height } => {
                self.engine.observe_viewport(top, height);
            }
            HostEvent::SentinelVisible => {
                self.engine.sentinel_entered();
            }
            HostEvent::ImageLoaded { id, width, height } => {
                self.complete_probe(&id, ProbeOutcome::Loaded(Dimensions::new(width, height)));
            }
            HostEvent::ImageFailed { id } => self.complete_probe(&id, ProbeOutcome::Failed),
            HostEvent::PointerEnter { id } => {
                self.engine.pointer_enter(&id);
            }
            HostEvent::PointerLeave { id } => {
                self.engine.pointer_leave(&id);
            }
            HostEvent::Click { id } => {
                self.engine.click(&id);
            }
            HostEvent::HasMore { value } => self.engine.set_has_more(value),
            HostEvent::LoadFinished => self.engine.finish_load_more(),
            HostEvent::Options { options } => {
                let config = options.apply(self.engine.config().clone())?;
                self.engine.reconfigure(config)?;
            }
        }
        Ok(())
    }

    fn complete_probe(&mut self, id: &str, outcome: ProbeOutcome) {
        match self.tickets.remove(id) {
            Some(ticket) => {
                self.engine.complete_probe(&ticket, outcome);
            }
            None => {
                mortar_core::debug!(id = %id, "image report with no outstanding probe");
            }
        }
    }

    fn collect(&mut self) {
        for request in self.engine.take_probe_requests() {
            self.outputs.probes.push(ProbeJson::from(&request));
            self.tickets.insert(request.ticket.id().clone(), request.ticket);
        }
        self.outputs
            .events
            .extend(self.engine.drain_events().into_iter().map(EventJson::from));
    }

    fn render_frame(&mut self, animating: bool) {
        self.outputs.items = self
            .engine
            .placed_items()
            .iter()
            .map(ItemFrame::from)
            .collect();
        self.outputs.columns = self.engine.columns();
        self.outputs.container_height = self.engine.content_height();
        self.outputs.sentinel = self.engine.sentinel().map(Into::into);
        self.outputs.animating = animating;

        self.dirty = false;
        self.frame_idx += 1;
        self.outputs.frame_idx = self.frame_idx;
    }
}
