#![forbid(unsafe_code)]

//! Image intrinsic-dimension discovery.
//!
//! The engine never loads images itself. When an item is first placed it
//! queues a [`ProbeRequest`]; the host loads the resource off-screen and
//! reports back with [`ProbeOutcome`]. Until then, and forever if the probe
//! fails, the item is sized with [`Dimensions::FALLBACK`].
//!
//! Each request carries a [`ProbeTicket`] tied to the engine's current
//! session. Results for a ticket from an older session are dropped, so a
//! late probe can never touch a list that has since been replaced.
//!
//! With the `image` feature, [`probe_bytes`] reads dimensions from an
//! encoded header without decoding pixels.

use std::fmt;

use crate::item::ItemId;

/// Natural pixel size of an image.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Dimensions {
    pub width: u32,
    pub height: u32,
}

impl Dimensions {
    /// Size assumed before a probe resolves, and after it fails.
    pub const FALLBACK: Self = Self {
        width: 400,
        height: 300,
    };

    pub const fn new(width: u32, height: u32) -> Self {
        Self { width, height }
    }

    /// Both sides are non-zero.
    pub const fn is_valid(&self) -> bool {
        self.width > 0 && self.height > 0
    }

    /// Height per unit width. Degenerate sizes give the fallback aspect.
    pub fn aspect(&self) -> f32 {
        if !self.is_valid() {
            return FALLBACK_ASPECT;
        }
        self.height as f32 / self.width as f32
    }
}

/// Aspect of [`Dimensions::FALLBACK`].
pub const FALLBACK_ASPECT: f32 = 0.75;

/// Identifies one probe within one engine session.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ProbeTicket {
    session: u64,
    id: ItemId,
}

impl ProbeTicket {
    pub(crate) fn new(session: u64, id: ItemId) -> Self {
        Self { session, id }
    }

    /// Session the ticket was issued in.
    pub const fn session(&self) -> u64 {
        self.session
    }

    /// Item being probed.
    pub fn id(&self) -> &ItemId {
        &self.id
    }
}

/// A request for the host to load `source` and report its size.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProbeRequest {
    pub ticket: ProbeTicket,
    pub source: String,
}

/// What the host learned about an image.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ProbeOutcome {
    /// The image loaded with these natural dimensions.
    Loaded(Dimensions),
    /// The image failed to load or decode.
    Failed,
}

impl ProbeOutcome {
    /// Dimensions to lay out with. Failures and zero sizes use the fallback.
    pub fn dimensions(&self) -> Dimensions {
        match self {
            Self::Loaded(dims) if dims.is_valid() => *dims,
            _ => Dimensions::FALLBACK,
        }
    }

    /// Whether this outcome should be shown as a load failure.
    pub fn is_failure(&self) -> bool {
        match self {
            Self::Loaded(dims) => !dims.is_valid(),
            Self::Failed => true,
        }
    }
}

impl From<Result<Dimensions, ProbeError>> for ProbeOutcome {
    fn from(result: Result<Dimensions, ProbeError>) -> Self {
        match result {
            Ok(dims) => Self::Loaded(dims),
            Err(_) => Self::Failed,
        }
    }
}

// ---------------------------------------------------------------------------
// Errors
// ---------------------------------------------------------------------------

/// Why reading dimensions from bytes failed.
#[derive(Debug)]
pub enum ProbeError {
    /// The format could not be determined from the bytes.
    Io(std::io::Error),
    /// The header was unreadable or the format unsupported.
    #[cfg(feature = "image")]
    Image(image::ImageError),
    /// The header reported a zero-sized image.
    ZeroSize { width: u32, height: u32 },
}

impl fmt::Display for ProbeError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Io(err) => write!(f, "image probe io error: {err}"),
            #[cfg(feature = "image")]
            Self::Image(err) => write!(f, "image probe decode error: {err}"),
            Self::ZeroSize { width, height } => {
                write!(f, "image reports zero size ({width}x{height})")
            }
        }
    }
}

impl std::error::Error for ProbeError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Io(err) => Some(err),
            #[cfg(feature = "image")]
            Self::Image(err) => Some(err),
            Self::ZeroSize { .. } => None,
        }
    }
}

impl From<std::io::Error> for ProbeError {
    fn from(err: std::io::Error) -> Self {
        Self::Io(err)
    }
}

#[cfg(feature = "image")]
impl From<image::ImageError> for ProbeError {
    fn from(err: image::ImageError) -> Self {
        Self::Image(err)
    }
}

/// Read natural dimensions from an encoded image (PNG, JPEG, GIF, WebP).
///
/// Only the header is parsed.
#[cfg(feature = "image")]
pub fn probe_bytes(bytes: &[u8]) -> Result<Dimensions, ProbeError> {
    let reader = image::ImageReader::new(std::io::Cursor::new(bytes)).with_guessed_format()?;
    let (width, height) = reader.into_dimensions()?;
    let dims = Dimensions::new(width, height);
    if !dims.is_valid() {
        return Err(ProbeError::ZeroSize { width, height });
    }
    Ok(dims)
}

/// Like [`probe_bytes`], but never fails: unreadable input resolves to
/// [`Dimensions::FALLBACK`].
#[cfg(feature = "image")]
pub fn probe_bytes_or_fallback(bytes: &[u8]) -> Dimensions {
    match probe_bytes(bytes) {
        Ok(dims) => dims,
        Err(err) => {
            mortar_core::debug!(error = %err, "image probe failed, using fallback size");
            Dimensions::FALLBACK
        }
    }
}
