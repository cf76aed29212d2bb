//! Frame geometry for a printed card.
//!
//! The image region is sized width-first: start at the maximum width and
//! derive the height from the source aspect ratio; only when that height
//! exceeds the cap is the solve redone height-first. The two-branch order
//! decides the final proportions of portrait vs. landscape prints and must
//! not be replaced by a symmetric "fit inside box" solve.

use crate::error::{BoothError, BoothResult};

pub const MAX_IMAGE_WIDTH: f64 = 300.0;
pub const MAX_IMAGE_HEIGHT: f64 = 400.0;
pub const FRAME_PADDING_X: f64 = 25.0;
pub const FRAME_PADDING_TOP: f64 = 25.0;
/// Height of the caption band below the image region.
pub const CAPTION_BAND_HEIGHT: f64 = 80.0;

/// Derived card geometry in frame-local coordinates. Immutable once a card
/// is constructed.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct FrameGeometry {
    pub image_w: f64,
    pub image_h: f64,
    pub frame_w: f64,
    pub frame_h: f64,
    /// Vertical center of the caption band.
    pub caption_y: f64,
}

pub fn frame_geometry(image_width: f64, image_height: f64) -> BoothResult<FrameGeometry> {
    if !image_width.is_finite()
        || !image_height.is_finite()
        || image_width <= 0.0
        || image_height <= 0.0
    {
        return Err(BoothError::InvalidImageDimensions {
            width: image_width,
            height: image_height,
        });
    }

    let mut image_w = MAX_IMAGE_WIDTH;
    let mut image_h = image_height / image_width * image_w;
    if image_h > MAX_IMAGE_HEIGHT {
        image_h = MAX_IMAGE_HEIGHT;
        image_w = image_width / image_height * image_h;
    }

    let frame_w = image_w + FRAME_PADDING_X * 2.0;
    let frame_h = image_h + FRAME_PADDING_TOP + CAPTION_BAND_HEIGHT;
    let caption_y = image_h + FRAME_PADDING_TOP + CAPTION_BAND_HEIGHT / 2.0;

    Ok(FrameGeometry {
        image_w,
        image_h,
        frame_w,
        frame_h,
        caption_y,
    })
}
