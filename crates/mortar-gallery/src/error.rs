#![forbid(unsafe_code)]

use std::fmt;

/// A gallery configuration was rejected.
#[derive(Debug, Clone, PartialEq)]
pub enum ConfigError {
    /// A batch size of zero would stall reveal.
    ZeroBatchSize { field: &'static str },
    /// Hover scale must be positive and finite.
    InvalidHoverScale(f32),
    /// Aspect clamp bounds must be positive, finite and ordered.
    InvalidAspectRange { min: f32, max: f32 },
    /// Gap must be finite and non-negative.
    NegativeGap(f32),
    /// A length that must be finite and non-negative was not.
    InvalidLength { field: &'static str, value: f32 },
    /// Entrance direction name not recognised.
    UnknownDirection(String),
    /// Easing name not recognised.
    UnknownEasing(String),
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::ZeroBatchSize { field } => write!(f, "{field} must be at least 1"),
            Self::InvalidHoverScale(scale) => {
                write!(f, "hover scale must be positive, got {scale}")
            }
            Self::InvalidAspectRange { min, max } => {
                write!(f, "invalid aspect range [{min}, {max}]")
            }
            Self::NegativeGap(gap) => write!(f, "gap must be non-negative, got {gap}"),
            Self::InvalidLength { field, value } => {
                write!(f, "{field} must be finite and non-negative, got {value}")
            }
            Self::UnknownDirection(name) => write!(f, "unknown entrance direction: {name:?}"),
            Self::UnknownEasing(name) => write!(f, "unknown easing: {name:?}"),
        }
    }
}

impl std::error::Error for ConfigError {}
