#![forbid(unsafe_code)]

//! Component options as the page passes them.
//!
//! Field names follow the gallery component's props (`animateFrom`,
//! `scaleOnHover`, ...). Times are in seconds. Every field is optional;
//! missing ones keep the value of the config they are applied to.

use core::time::Duration;

use mortar_gallery::{ConfigError, EntranceDirection, LoadMode, MasonryConfig};
use serde::{Deserialize, Serialize};

/// Gallery options in the page's JSON shape.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase", deny_unknown_fields)]
pub struct WebOptions {
    /// Easing for layout moves, by name (`"power3.out"`).
    #[serde(skip_serializing_if = "Option::is_none")]
    pub ease: Option<String>,
    /// Layout move duration in seconds.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub duration: Option<f32>,
    /// Per-column entrance delay in seconds.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub stagger: Option<f32>,
    /// `bottom`, `top`, `left`, `right`, `center` or `random`.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub animate_from: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub scale_on_hover: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub hover_scale: Option<f32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub blur_to_focus: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub color_shift_on_hover: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub initial_batch_size: Option<usize>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub batch_size: Option<usize>,
    /// Present means controlled mode.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub has_more: Option<bool>,
    /// Gap between items in pixels.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub gap: Option<f32>,
}

impl WebOptions {
    /// Decode options from JSON.
    pub fn from_json_str(s: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(s)
    }

    /// Apply the present fields on top of `base` and validate.
    pub fn apply(&self, base: MasonryConfig) -> Result<MasonryConfig, ConfigError> {
        let mut config = base;
        if let Some(name) = &self.ease {
            config = config.update_easing_named(name)?;
        }
        if let Some(secs) = self.duration {
            config = config.update_duration(seconds("duration", secs)?);
        }
        if let Some(secs) = self.stagger {
            config = config.stagger(seconds("stagger", secs)?);
        }
        if let Some(name) = &self.animate_from {
            config = config.direction(name.parse::<EntranceDirection>()?);
        }
        if let Some(enabled) = self.scale_on_hover {
            config = config.scale_on_hover(enabled);
        }
        if let Some(scale) = self.hover_scale {
            config = config.hover_scale(scale);
        }
        if let Some(enabled) = self.blur_to_focus {
            config = config.blur_to_focus(enabled);
        }
        if let Some(enabled) = self.color_shift_on_hover {
            config = config.color_shift_on_hover(enabled);
        }
        let initial = self.initial_batch_size.unwrap_or(config.initial_batch);
        let more = self.batch_size.unwrap_or(config.batch_size);
        config = config.batches(initial, more);
        if let Some(has_more) = self.has_more {
            config = config.load_mode(LoadMode::Controlled { has_more });
        }
        if let Some(gap) = self.gap {
            config = config.gap(gap);
        }
        config.validate()?;
        Ok(config)
    }
}

impl TryFrom<WebOptions> for MasonryConfig {
    type Error = ConfigError;

    fn try_from(options: WebOptions) -> Result<Self, Self::Error> {
        options.apply(MasonryConfig::default())
    }
}

fn seconds(field: &'static str, secs: f32) -> Result<Duration, ConfigError> {
    Duration::try_from_secs_f32(secs).map_err(|_| ConfigError::InvalidLength { field, value: secs })
}
