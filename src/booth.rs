//! The photo booth engine: owns the live cards, the camera prop, the
//! stacking counter and the RNG, and drives every lifecycle through
//! explicit time (`tick`) and pointer events.
//!
//! The engine is single-threaded and cooperative. Animation completion is
//! derived from elapsed time inside `tick`, never from external callbacks,
//! and every completion transition is guarded so repeated delivery is
//! harmless. Cards animate independently; nothing about one card's
//! lifecycle blocks another's.

use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;

use crate::{
    card::{resting_tilt, Card, CardState},
    core::{CardId, Point, Size, SourceImage, TimeMs},
    drag::{DragController, DragOptions, Draggable},
    error::{BoothError, BoothResult},
    layout::frame_geometry,
    render::{render_card, render_export, Development},
    stacking::StackingArbiter,
    style::{StyleRef, StyleResolver},
};

/// Vertical distance from the camera prop's top (or the desk origin when no
/// camera is present) down to the emission slot.
pub const EMISSION_DROP_PX: f64 = 350.0;

/// Engine configuration. The viewport is only used to derive the fallback
/// emission anchor; cards are never clamped to it.
#[derive(Clone, Debug, serde::Serialize, serde::Deserialize)]
pub struct BoothConfig {
    pub viewport: Size,
    /// Seed for the engine RNG (resting tilts, tear jitter). `None` seeds
    /// from the host RNG for production use; tests pass a fixed seed.
    pub seed: Option<u64>,
}

impl Default for BoothConfig {
    fn default() -> Self {
        Self {
            viewport: Size::new(1280.0, 800.0),
            seed: None,
        }
    }
}

impl BoothConfig {
    pub fn validate(&self) -> BoothResult<()> {
        if !(self.viewport.width.is_finite() && self.viewport.width > 0.0)
            || !(self.viewport.height.is_finite() && self.viewport.height > 0.0)
        {
            return Err(BoothError::validation(
                "viewport width/height must be finite and > 0",
            ));
        }
        Ok(())
    }
}

/// What the host's hit test found under the pointer.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum HitTarget {
    Card(CardId),
    DeleteButton(CardId),
    Camera,
}

/// The draggable camera prop. Cards eject from the slot centered under it.
#[derive(Clone, Debug)]
pub struct CameraProp {
    pub left: f64,
    pub top: f64,
    pub width: f64,
    pub height: f64,
    pub z: i64,
    pub transition: Option<String>,
    drag: DragController,
}

impl CameraProp {
    fn new(left: f64, top: f64, width: f64, height: f64, z: i64) -> Self {
        Self {
            left,
            top,
            width,
            height,
            z,
            transition: None,
            drag: DragController::default(),
        }
    }

    /// Center-bottom slot the prints emerge from.
    pub fn emission_anchor(&self) -> Point {
        Point::new(self.left + self.width / 2.0, self.top + EMISSION_DROP_PX)
    }
}

impl Draggable for CameraProp {
    fn position(&self) -> Point {
        Point::new(self.left, self.top)
    }

    fn set_position(&mut self, pos: Point) {
        self.left = pos.x;
        self.top = pos.y;
    }

    fn fold_center_shift(&mut self) {}

    fn set_z(&mut self, z: i64) {
        self.z = z;
    }

    fn set_transition(&mut self, transition: Option<&str>) {
        self.transition = transition.map(str::to_string);
    }
}

fn exclude_delete(target: &HitTarget) -> bool {
    matches!(target, HitTarget::DeleteButton(_))
}

fn exclude_nothing(_: &HitTarget) -> bool {
    false
}

pub struct PhotoBooth<R: StyleResolver> {
    config: BoothConfig,
    resolver: R,
    arbiter: StackingArbiter,
    rng: ChaCha8Rng,
    cards: Vec<Card>,
    camera: Option<CameraProp>,
    next_card: u64,
}

impl<R: StyleResolver> PhotoBooth<R> {
    pub fn new(config: BoothConfig, resolver: R) -> BoothResult<Self> {
        config.validate()?;
        let rng = ChaCha8Rng::seed_from_u64(config.seed.unwrap_or_else(rand::random));
        Ok(Self {
            config,
            resolver,
            arbiter: StackingArbiter::new(),
            rng,
            cards: Vec::new(),
            camera: None,
            next_card: 0,
        })
    }

    /// Place (or move) the camera prop. It takes the current stacking front.
    pub fn attach_camera(&mut self, left: f64, top: f64, width: f64, height: f64) {
        let z = self.arbiter.next();
        self.camera = Some(CameraProp::new(left, top, width, height, z));
    }

    pub fn camera(&self) -> Option<&CameraProp> {
        self.camera.as_ref()
    }

    /// Where the next card will spawn. A missing camera prop is an expected
    /// configuration, not an error: the anchor falls back to a fixed point
    /// derived from the viewport.
    pub fn emission_anchor(&self) -> Point {
        match &self.camera {
            Some(camera) => camera.emission_anchor(),
            None => Point::new(self.config.viewport.width / 2.0, EMISSION_DROP_PX),
        }
    }

    /// Print one card. The card exists when this returns; the ejection
    /// animation runs asynchronously through [`tick`](Self::tick). Invalid
    /// image dimensions abort before anything is attached.
    #[tracing::instrument(skip(self, source, caption), fields(w = source.width, h = source.height))]
    pub fn print(
        &mut self,
        now: TimeMs,
        source: &SourceImage,
        caption: &str,
        style: &StyleRef,
    ) -> BoothResult<CardId> {
        let geometry = frame_geometry(source.width, source.height)?;

        let id = CardId(self.next_card);
        self.next_card += 1;
        let uid = format!("card-{}", id.0);

        let resolved = self.resolver.resolve(style, &uid);
        let rotation = resting_tilt(&mut self.rng);
        let anchor = self.emission_anchor();

        // The print should appear to slide out from under the camera body,
        // so the pair assignment keeps the prop one step in front.
        let z = if self.camera.is_some() {
            let pair = self.arbiter.spawn_pair();
            if let Some(camera) = &mut self.camera {
                camera.z = pair.camera;
            }
            pair.card
        } else {
            self.arbiter.next()
        };

        let svg = render_card(
            &geometry,
            &resolved,
            &source.href,
            caption,
            &uid,
            Development::Undeveloped,
        );
        let card = Card::spawn(
            id,
            uid,
            source.href.clone(),
            caption.to_string(),
            geometry,
            resolved,
            rotation,
            anchor,
            z,
            now,
            svg,
        )?;
        tracing::debug!(id = id.0, z, "card ejecting");
        self.cards.push(card);
        Ok(id)
    }

    /// Advance all animations to `now` and reap finished tears. Safe to
    /// call at any cadence; transitions fire exactly once regardless.
    pub fn tick(&mut self, now: TimeMs) -> BoothResult<()> {
        for card in &mut self.cards {
            card.tick(now, &self.arbiter)?;
        }
        self.cards.retain(|c| c.state != CardState::Removed);
        Ok(())
    }

    /// Pointer press on a hit target. Ejecting and tearing cards are inert;
    /// the delete affordance never starts a drag.
    pub fn pointer_down(&mut self, target: HitTarget, pointer: Point) {
        match target {
            HitTarget::Camera => {
                if let Some(camera) = &mut self.camera {
                    let mut drag = camera.drag;
                    drag.pointer_down(
                        camera,
                        &self.arbiter,
                        pointer,
                        &target,
                        &DragOptions {
                            exclude: exclude_nothing,
                        },
                    );
                    camera.drag = drag;
                }
            }
            HitTarget::Card(id) | HitTarget::DeleteButton(id) => {
                if let Some(card) = self.cards.iter_mut().find(|c| c.id == id) {
                    if !card.presentation.pointer_events {
                        return;
                    }
                    let mut drag = card.drag;
                    drag.pointer_down(
                        card,
                        &self.arbiter,
                        pointer,
                        &target,
                        &DragOptions {
                            exclude: exclude_delete,
                        },
                    );
                    card.drag = drag;
                }
            }
        }
    }

    /// Window-scope pointer move: forwarded to every element; only the one
    /// with an active drag responds.
    pub fn pointer_move(&mut self, pointer: Point) {
        if let Some(camera) = &mut self.camera {
            let mut drag = camera.drag;
            drag.pointer_move(camera, pointer);
            camera.drag = drag;
        }
        for card in &mut self.cards {
            let mut drag = card.drag;
            drag.pointer_move(card, pointer);
            card.drag = drag;
        }
    }

    /// Window-scope pointer release.
    pub fn pointer_up(&mut self) {
        if let Some(camera) = &mut self.camera {
            let mut drag = camera.drag;
            drag.pointer_up(camera);
            camera.drag = drag;
        }
        for card in &mut self.cards {
            let mut drag = card.drag;
            drag.pointer_up(card);
            card.drag = drag;
        }
    }

    /// Click dispatch. A click that concludes a real drag is swallowed; a
    /// surviving click on the delete affordance tears the card.
    pub fn click(&mut self, now: TimeMs, target: HitTarget) -> BoothResult<()> {
        match target {
            HitTarget::DeleteButton(id) => {
                if let Some(card) = self.cards.iter_mut().find(|c| c.id == id) {
                    if card.drag.take_click_suppression() {
                        return Ok(());
                    }
                }
                self.delete_card(now, id)
            }
            HitTarget::Card(id) => {
                if let Some(card) = self.cards.iter_mut().find(|c| c.id == id) {
                    card.drag.take_click_suppression();
                }
                Ok(())
            }
            HitTarget::Camera => Ok(()),
        }
    }

    /// Explicit delete: irreversible once the tear starts. Unknown ids and
    /// cards already past `Developed` are no-ops.
    #[tracing::instrument(skip(self))]
    pub fn delete_card(&mut self, now: TimeMs, id: CardId) -> BoothResult<()> {
        if let Some(card) = self.cards.iter_mut().find(|c| c.id == id) {
            card.start_tear(now, &mut self.rng)?;
        }
        Ok(())
    }

    /// Standalone markup for one card at natural size, development overlay
    /// cleared.
    pub fn export_svg(&self, id: CardId) -> Option<String> {
        let card = self.card(id)?;
        Some(render_export(
            &card.geometry,
            &card.style,
            card.image_href(),
            &card.caption,
            card.uid(),
        ))
    }

    pub fn card(&self, id: CardId) -> Option<&Card> {
        self.cards.iter().find(|c| c.id == id)
    }

    pub fn cards(&self) -> &[Card] {
        &self.cards
    }

    pub fn len(&self) -> usize {
        self.cards.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cards.is_empty()
    }
}
