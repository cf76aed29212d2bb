//! Destructive tear: split a card into two jagged halves and throw them
//! apart.
//!
//! The split line is generated fresh for every tear, a deterministic
//! alternation around the vertical midline plus per-point random jitter,
//! so no two tears look alike. Both halves clip against the same point
//! sequence (reversed for the right half), which keeps the seam
//! complementary: no gap, no overlap.

use rand::Rng;

use crate::{
    anim::{Key, Pose, Timeline},
    core::{Point, TimeMs, Vec2},
    ease::Ease,
    error::BoothResult,
};

pub const TEAR_SEGMENTS: usize = 20;
pub const TEAR_DURATION_MS: f64 = 800.0;
const TEAR_EASE: Ease = Ease::CubicBezier {
    x1: 0.2,
    y1: 1.0,
    x2: 0.3,
    y2: 1.0,
};
const HALF_DRIFT_X: f64 = 60.0;
const HALF_DRIFT_Y: f64 = 30.0;
const HALF_SPIN_DEG: f64 = 15.0;

/// Jagged split line in percent coordinates, top to bottom. `segments + 1`
/// points; x oscillates around 50% by an alternating ±2 plus jitter drawn
/// from [-1, 1).
pub fn tear_path(segments: usize, rng: &mut impl Rng) -> Vec<Point> {
    (0..=segments)
        .map(|i| {
            let y = i as f64 / segments as f64 * 100.0;
            let offset = if i % 2 == 0 { 2.0 } else { -2.0 };
            let jitter = rng.gen_range(-1.0..1.0);
            Point::new(50.0 + offset + jitter, y)
        })
        .collect()
}

/// CSS `polygon(..)` clip paths for the two halves. Both extend 50% past
/// the card bounds so the outer edges never clip, and share the jagged
/// boundary point-for-point.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct ClipPolygons {
    pub left: String,
    pub right: String,
}

pub fn clip_polygons(points: &[Point]) -> ClipPolygons {
    let seam: Vec<String> = points.iter().map(pct).collect();
    let seam_reversed: Vec<String> = points.iter().rev().map(pct).collect();
    ClipPolygons {
        left: format!("polygon({}, -50% 150%, -50% -50%)", seam.join(", ")),
        right: format!("polygon(150% -50%, 150% 150%, {})", seam_reversed.join(", ")),
    }
}

fn pct(p: &Point) -> String {
    format!("{:.4}% {:.4}%", p.x, p.y)
}

/// One in-flight tear: the two clip paths and the two half timelines,
/// started together and irrevocable once begun.
#[derive(Clone, Debug)]
pub struct Tear {
    pub clips: ClipPolygons,
    pub left: Timeline<Pose>,
    pub right: Timeline<Pose>,
    pub started_at: TimeMs,
}

impl Tear {
    pub fn start(now: TimeMs, rng: &mut impl Rng) -> BoothResult<Self> {
        let points = tear_path(TEAR_SEGMENTS, rng);
        Ok(Self {
            clips: clip_polygons(&points),
            left: half_timeline(-1.0)?,
            right: half_timeline(1.0)?,
            started_at: now,
        })
    }

    pub fn finished(&self, now: TimeMs) -> bool {
        let elapsed = now - self.started_at;
        self.left.finished(elapsed) && self.right.finished(elapsed)
    }

    /// Sample both halves' pose deltas, relative to whatever transform the
    /// card already carries.
    pub fn sample(&self, now: TimeMs) -> BoothResult<(Pose, Pose)> {
        let elapsed = now - self.started_at;
        Ok((self.left.sample(elapsed)?, self.right.sample(elapsed)?))
    }
}

fn half_timeline(direction: f64) -> BoothResult<Timeline<Pose>> {
    Timeline::new(
        vec![
            Key {
                offset: 0.0,
                value: Pose::default(),
            },
            Key {
                offset: 1.0,
                value: Pose {
                    translate: Vec2::new(HALF_DRIFT_X * direction, HALF_DRIFT_Y),
                    scale: 1.0,
                    rotate_deg: HALF_SPIN_DEG * direction,
                    opacity: 0.0,
                },
            },
        ],
        TEAR_DURATION_MS,
        TEAR_EASE,
    )
}
