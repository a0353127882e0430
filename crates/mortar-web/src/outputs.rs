#![forbid(unsafe_code)]

//! Frame outputs for the host, serialized as camelCase JSON.

use mortar_core::geometry::Rect;
use mortar_gallery::{ImageState, MasonryEvent, MotionPhase, PlacedItem, ProbeRequest};
use serde::{Deserialize, Serialize};

/// Container-relative rect.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct RectJson {
    pub x: f32,
    pub y: f32,
    pub width: f32,
    pub height: f32,
}

impl From<Rect> for RectJson {
    fn from(rect: Rect) -> Self {
        Self {
            x: rect.x,
            y: rect.y,
            width: rect.width,
            height: rect.height,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PhaseJson {
    Unseen,
    Entering,
    Settled,
    Moving,
}

impl From<MotionPhase> for PhaseJson {
    fn from(phase: MotionPhase) -> Self {
        match phase {
            MotionPhase::Unseen => Self::Unseen,
            MotionPhase::Entering => Self::Entering,
            MotionPhase::Settled => Self::Settled,
            MotionPhase::Moving => Self::Moving,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ImageJson {
    Loading,
    Loaded,
    Failed,
}

impl From<ImageState> for ImageJson {
    fn from(state: ImageState) -> Self {
        match state {
            ImageState::Loading => Self::Loading,
            ImageState::Loaded => Self::Loaded,
            ImageState::Failed => Self::Failed,
        }
    }
}

/// Everything the page needs to style one item element.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ItemFrame {
    pub id: String,
    pub img: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,
    pub index: usize,
    pub column: usize,
    /// Animated rect for this frame.
    pub rect: RectJson,
    pub opacity: f32,
    pub blur: f32,
    pub scale: f32,
    pub overlay_opacity: f32,
    pub phase: PhaseJson,
    pub image: ImageJson,
    /// `loading="eager"` rather than lazy.
    pub eager: bool,
    /// `fetchpriority="high"`.
    pub high_priority: bool,
}

impl From<&PlacedItem<'_>> for ItemFrame {
    fn from(placed: &PlacedItem<'_>) -> Self {
        Self {
            id: placed.item.id.as_str().to_owned(),
            img: placed.item.source.clone(),
            url: placed.item.link.clone(),
            index: placed.index,
            column: placed.column,
            rect: placed.style.rect.into(),
            opacity: placed.style.opacity,
            blur: placed.style.blur,
            scale: placed.style.scale,
            overlay_opacity: placed.style.overlay_opacity,
            phase: placed.phase.into(),
            image: placed.image.into(),
            eager: placed.load.eager,
            high_priority: placed.load.high_priority,
        }
    }
}

/// An image the page should load and report back on.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProbeJson {
    pub id: String,
    pub img: String,
}

impl From<&ProbeRequest> for ProbeJson {
    fn from(request: &ProbeRequest) -> Self {
        Self {
            id: request.ticket.id().as_str().to_owned(),
            img: request.source.clone(),
        }
    }
}

/// Engine notification in JSON form.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum EventJson {
    LoadMoreRequested {
        visible: usize,
    },
    ItemClicked {
        id: String,
        index: usize,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        url: Option<String>,
    },
    ColumnsChanged {
        from: usize,
        to: usize,
    },
    BatchRevealed {
        start: usize,
        end: usize,
    },
}

impl From<MasonryEvent> for EventJson {
    fn from(event: MasonryEvent) -> Self {
        match event {
            MasonryEvent::LoadMoreRequested { visible } => Self::LoadMoreRequested { visible },
            MasonryEvent::ItemClicked { id, index, link } => Self::ItemClicked {
                id: id.as_str().to_owned(),
                index,
                url: link,
            },
            MasonryEvent::ColumnsChanged { from, to } => Self::ColumnsChanged { from, to },
            MasonryEvent::BatchRevealed { start, end } => Self::BatchRevealed { start, end },
        }
    }
}

/// Captured outputs for host consumption.
///
/// Frame fields describe the last rendered frame. `probes` and `events`
/// accumulate across steps until [`take_outputs`](crate::WebGallery::take_outputs).
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WebOutputs {
    pub frame_idx: u64,
    pub columns: usize,
    /// Height to give the container element.
    pub container_height: f32,
    /// Where to put the proximity sentinel, if one is needed.
    pub sentinel: Option<RectJson>,
    pub items: Vec<ItemFrame>,
    pub probes: Vec<ProbeJson>,
    pub events: Vec<EventJson>,
    /// Whether the host should keep stepping every animation frame.
    pub animating: bool,
}

impl WebOutputs {
    /// Encode as JSON.
    pub fn to_json_string(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string(self)
    }
}
