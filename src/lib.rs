//! polabooth: an instant-photo desk simulation engine.
//!
//! The engine composes captured images into instant-film cards (SVG
//! markup), ejects them from a draggable camera prop with a develop-in
//! animation, and lets the host drag them around a desk or tear them in
//! half to delete them. It is headless: the host owns the clock, the event
//! loop and the hit testing, and feeds time and pointer events in through
//! [`PhotoBooth`].
//!
//! ```no_run
//! use polabooth::{BoothConfig, PhotoBooth, SourceImage, StyleCatalog, StyleRef};
//!
//! # fn main() -> polabooth::BoothResult<()> {
//! let mut booth = PhotoBooth::new(BoothConfig::default(), StyleCatalog::new())?;
//! let photo = SourceImage::new("data:image/png;base64,...", 400.0, 300.0);
//! let id = booth.print(0.0, &photo, "summer", &StyleRef::builtin("kraft"))?;
//! booth.tick(1400.0)?;
//! let svg = booth.export_svg(id);
//! # Ok(())
//! # }
//! ```

#![forbid(unsafe_code)]

pub mod anim;
pub mod booth;
pub mod card;
pub mod core;
pub mod drag;
pub mod ease;
pub mod error;
pub mod layout;
pub mod render;
pub mod stacking;
pub mod style;
pub mod tear;

pub use anim::{Key, Lerp, Pose, Timeline};
pub use booth::{BoothConfig, CameraProp, HitTarget, PhotoBooth, EMISSION_DROP_PX};
pub use card::{ActiveTear, Card, CardState, Presentation, DISPLAY_SCALE, DROP_DISTANCE};
pub use core::{CardId, Point, Rect, Size, SourceImage, TimeMs, Vec2};
pub use drag::{DragController, DragOptions, Draggable, DRAG_THRESHOLD_PX};
pub use ease::Ease;
pub use error::{BoothError, BoothResult};
pub use layout::{frame_geometry, FrameGeometry};
pub use render::{render_export, Development};
pub use stacking::{StackingArbiter, BASE_Z};
pub use style::{CustomStyleId, ResolvedStyle, StyleCatalog, StyleRef, StyleResolver};
pub use tear::{clip_polygons, tear_path, ClipPolygons, Tear};
