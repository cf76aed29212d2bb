pub use kurbo::{Point, Rect, Size, Vec2};

/// Milliseconds on the host's monotonic clock.
///
/// The engine never reads a clock itself; hosts pass the current time into
/// [`print`](crate::PhotoBooth::print), [`tick`](crate::PhotoBooth::tick) and
/// the pointer methods so tests can drive time explicitly.
pub type TimeMs = f64;

#[derive(
    Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, serde::Serialize, serde::Deserialize,
)]
pub struct CardId(pub u64);

/// Opaque encoded-image handle (data URI or URL) plus natural pixel size.
/// The engine never decodes pixels; the handle is passed through to the
/// rendered markup untouched.
#[derive(Clone, Debug, serde::Serialize, serde::Deserialize)]
pub struct SourceImage {
    pub href: String,
    pub width: f64,
    pub height: f64,
}

impl SourceImage {
    pub fn new(href: impl Into<String>, width: f64, height: f64) -> Self {
        Self {
            href: href.into(),
            width,
            height,
        }
    }
}
