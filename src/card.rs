//! The card entity and its lifecycle.
//!
//! A card moves through `Ejecting → Developed → Tearing → Removed`, one
//! direction only. Dragging is not a lifecycle state: it is pointer-local
//! state owned by the card's [`DragController`] and only ever overlays
//! `Developed`. Completion handling is guarded by the state checks in
//! [`Card::develop`] and [`Card::tick`], so a duplicated completion is a
//! no-op.

use rand::Rng;

use crate::{
    anim::{Key, Pose, Timeline},
    core::{CardId, Point, TimeMs, Vec2},
    drag::{DragController, Draggable},
    ease::Ease,
    error::BoothResult,
    layout::FrameGeometry,
    stacking::StackingArbiter,
    style::ResolvedStyle,
    tear::Tear,
};

/// How far a card drops below its emission anchor while ejecting.
pub const DROP_DISTANCE: f64 = 220.0;
pub const EJECT_DURATION_MS: f64 = 1400.0;
pub const EJECT_START_SCALE: f64 = 0.85;
/// On-screen cards render slightly under natural frame size.
pub const DISPLAY_SCALE: f64 = 330.0 / 350.0;
/// Resting tilt is drawn uniformly from [-6°, 6°).
pub const MAX_RESTING_TILT_DEG: f64 = 6.0;

const EJECT_EASE: Ease = Ease::CSS_EASE_OUT;

#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub enum CardState {
    Ejecting,
    Developed,
    Tearing,
    Removed,
}

/// Mutable presentation the host applies on top of a card's immutable
/// markup: screen placement, stacking, transform, overlay fade, clip.
#[derive(Clone, Debug, serde::Serialize, serde::Deserialize)]
pub struct Presentation {
    pub left: f64,
    pub top: f64,
    /// Negative half-width keeping the card centered on its anchor until a
    /// drag folds it into `left`.
    pub center_shift: f64,
    pub width: f64,
    pub height: f64,
    pub z: i64,
    pub pose: Pose,
    pub overlay_opacity: f64,
    pub pointer_events: bool,
    pub delete_visible: bool,
    pub clip_path: Option<String>,
    pub transition: Option<String>,
}

/// A tear in progress: the shared jagged geometry plus the sibling element
/// representing the right half. The original card becomes the left half.
#[derive(Clone, Debug)]
pub struct ActiveTear {
    pub tear: Tear,
    /// Transform the card carried when the tear began; both half deltas
    /// compose after it so the tear continues the card's orientation.
    pub base: Pose,
    pub right: Presentation,
}

#[derive(Clone, Debug)]
pub struct Card {
    pub id: CardId,
    pub caption: String,
    pub geometry: FrameGeometry,
    pub style: ResolvedStyle,
    /// Resting tilt, fixed at creation.
    pub rotation_deg: f64,
    /// Immutable rendered markup (undeveloped form).
    pub svg: String,
    pub state: CardState,
    pub presentation: Presentation,
    pub(crate) image_href: String,
    pub(crate) uid: String,
    pub(crate) spawned_at: TimeMs,
    pub(crate) eject: Timeline<Pose>,
    pub(crate) drag: DragController,
    pub(crate) tear: Option<ActiveTear>,
}

pub(crate) fn resting_tilt(rng: &mut impl Rng) -> f64 {
    rng.gen_range(-MAX_RESTING_TILT_DEG..MAX_RESTING_TILT_DEG)
}

fn eject_timeline(rotation_deg: f64) -> BoothResult<Timeline<Pose>> {
    Timeline::new(
        vec![
            Key {
                offset: 0.0,
                value: Pose {
                    translate: Vec2::ZERO,
                    scale: EJECT_START_SCALE,
                    rotate_deg: 0.0,
                    opacity: 0.0,
                },
            },
            Key {
                offset: 0.2,
                value: Pose {
                    translate: Vec2::new(0.0, 30.0),
                    scale: 0.9,
                    rotate_deg: 0.0,
                    opacity: 1.0,
                },
            },
            Key {
                offset: 0.6,
                value: Pose {
                    translate: Vec2::new(0.0, DROP_DISTANCE - 20.0),
                    scale: 1.0,
                    rotate_deg: 0.0,
                    opacity: 1.0,
                },
            },
            Key {
                offset: 1.0,
                value: Pose {
                    translate: Vec2::new(0.0, DROP_DISTANCE),
                    scale: 1.0,
                    rotate_deg: rotation_deg,
                    opacity: 1.0,
                },
            },
        ],
        EJECT_DURATION_MS,
        EJECT_EASE,
    )
}

impl Card {
    #[allow(clippy::too_many_arguments)]
    pub(crate) fn spawn(
        id: CardId,
        uid: String,
        image_href: String,
        caption: String,
        geometry: FrameGeometry,
        style: ResolvedStyle,
        rotation_deg: f64,
        anchor: Point,
        z: i64,
        now: TimeMs,
        svg: String,
    ) -> BoothResult<Self> {
        let eject = eject_timeline(rotation_deg)?;
        let width = geometry.frame_w * DISPLAY_SCALE;
        let height = geometry.frame_h * DISPLAY_SCALE;
        let presentation = Presentation {
            left: anchor.x,
            top: anchor.y,
            center_shift: -width / 2.0,
            width,
            height,
            z,
            pose: eject.sample(0.0)?,
            overlay_opacity: 1.0,
            pointer_events: false,
            delete_visible: true,
            clip_path: None,
            transition: None,
        };
        Ok(Self {
            id,
            caption,
            geometry,
            style,
            rotation_deg,
            svg,
            state: CardState::Ejecting,
            presentation,
            image_href,
            uid,
            spawned_at: now,
            eject,
            drag: DragController::default(),
            tear: None,
        })
    }

    /// Advance this card's animations to `now`.
    pub(crate) fn tick(&mut self, now: TimeMs, arbiter: &StackingArbiter) -> BoothResult<()> {
        match self.state {
            CardState::Ejecting => {
                let elapsed = now - self.spawned_at;
                if self.eject.finished(elapsed) {
                    self.develop(arbiter);
                } else {
                    self.presentation.pose = self.eject.sample(elapsed)?;
                }
            }
            CardState::Tearing => {
                if let Some(active) = self.tear.as_mut() {
                    if active.tear.finished(now) {
                        self.state = CardState::Removed;
                        tracing::debug!(id = self.id.0, "card removed");
                    } else {
                        let (left, right) = active.tear.sample(now)?;
                        self.presentation.pose = active.base.then(&left);
                        active.right.pose = active.base.then(&right);
                    }
                }
            }
            CardState::Developed | CardState::Removed => {}
        }
        Ok(())
    }

    /// Complete the ejection: pin the resting position and transform, lift
    /// the development overlay, enable interaction and bring the card to
    /// the front. Idempotent against duplicate completion.
    pub(crate) fn develop(&mut self, arbiter: &StackingArbiter) {
        if self.state != CardState::Ejecting {
            return;
        }
        self.state = CardState::Developed;
        self.presentation.top += DROP_DISTANCE;
        self.presentation.pose = Pose::resting(self.rotation_deg);
        self.presentation.overlay_opacity = 0.0;
        self.presentation.pointer_events = true;
        self.presentation.z = arbiter.next();
        tracing::debug!(id = self.id.0, z = self.presentation.z, "card developed");
    }

    /// Begin the tear. Only a developed card tears; asking again (or before
    /// development) is a no-op, so a card can never be torn twice.
    pub(crate) fn start_tear(&mut self, now: TimeMs, rng: &mut impl Rng) -> BoothResult<()> {
        if self.state != CardState::Developed {
            return Ok(());
        }
        self.state = CardState::Tearing;
        self.presentation.pointer_events = false;
        self.presentation.delete_visible = false;

        let tear = Tear::start(now, rng)?;
        let base = self.presentation.pose;
        self.presentation.clip_path = Some(tear.clips.left.clone());

        let mut right = self.presentation.clone();
        right.clip_path = Some(tear.clips.right.clone());

        self.tear = Some(ActiveTear { tear, base, right });
        tracing::debug!(id = self.id.0, "card tearing");
        Ok(())
    }

    pub fn active_tear(&self) -> Option<&ActiveTear> {
        self.tear.as_ref()
    }

    /// Effective screen position (centering shift folded in).
    pub fn position(&self) -> Point {
        Point::new(
            self.presentation.left + self.presentation.center_shift,
            self.presentation.top,
        )
    }

    pub(crate) fn image_href(&self) -> &str {
        &self.image_href
    }

    pub(crate) fn uid(&self) -> &str {
        &self.uid
    }
}

impl Draggable for Card {
    fn position(&self) -> Point {
        Card::position(self)
    }

    fn set_position(&mut self, pos: Point) {
        self.presentation.left = pos.x;
        self.presentation.top = pos.y;
    }

    fn fold_center_shift(&mut self) {
        self.presentation.left += self.presentation.center_shift;
        self.presentation.center_shift = 0.0;
    }

    fn set_z(&mut self, z: i64) {
        self.presentation.z = z;
    }

    fn set_transition(&mut self, transition: Option<&str>) {
        self.presentation.transition = transition.map(str::to_string);
    }
}
