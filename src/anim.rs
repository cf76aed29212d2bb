use crate::{
    core::{TimeMs, Vec2},
    ease::Ease,
    error::{BoothError, BoothResult},
};

pub trait Lerp: Sized {
    fn lerp(a: &Self, b: &Self, t: f64) -> Self;
}

impl Lerp for f64 {
    fn lerp(a: &Self, b: &Self, t: f64) -> Self {
        a + (b - a) * t
    }
}

impl Lerp for Vec2 {
    fn lerp(a: &Self, b: &Self, t: f64) -> Self {
        Vec2::new(a.x + (b.x - a.x) * t, a.y + (b.y - a.y) * t)
    }
}

/// Animated visual state of a card (or card half): a translate/scale/rotate
/// transform plus opacity, composed after the card's layout placement.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct Pose {
    pub translate: Vec2,
    pub scale: f64,
    pub rotate_deg: f64,
    pub opacity: f64,
}

impl Default for Pose {
    fn default() -> Self {
        Self {
            translate: Vec2::ZERO,
            scale: 1.0,
            rotate_deg: 0.0,
            opacity: 1.0,
        }
    }
}

impl Pose {
    pub fn resting(rotate_deg: f64) -> Self {
        Self {
            rotate_deg,
            ..Self::default()
        }
    }

    /// Compose `delta` after this pose, the way a transform list appends
    /// `translate(..) rotate(..)` to an existing transform: the delta's
    /// translation happens inside this pose's rotated, scaled frame.
    pub fn then(&self, delta: &Pose) -> Pose {
        let (sin, cos) = self.rotate_deg.to_radians().sin_cos();
        let d = delta.translate * self.scale;
        Pose {
            translate: self.translate + Vec2::new(cos * d.x - sin * d.y, sin * d.x + cos * d.y),
            scale: self.scale * delta.scale,
            rotate_deg: self.rotate_deg + delta.rotate_deg,
            opacity: (self.opacity * delta.opacity).clamp(0.0, 1.0),
        }
    }
}

impl Lerp for Pose {
    fn lerp(a: &Self, b: &Self, t: f64) -> Self {
        Self {
            translate: <Vec2 as Lerp>::lerp(&a.translate, &b.translate, t),
            scale: f64::lerp(&a.scale, &b.scale, t),
            rotate_deg: f64::lerp(&a.rotate_deg, &b.rotate_deg, t),
            opacity: f64::lerp(&a.opacity, &b.opacity, t),
        }
    }
}

/// A keyframe timeline with normalized offsets in [0,1] over a fixed
/// duration, sampled by elapsed wall time. One ease applies per segment
/// (CSS keyframe semantics). Sampling clamps at both ends, so a timeline
/// holds its last value once finished.
#[derive(Clone, Debug, serde::Serialize, serde::Deserialize)]
pub struct Timeline<T> {
    pub keys: Vec<Key<T>>, // sorted by offset
    pub duration_ms: f64,
    pub ease: Ease,
}

#[derive(Clone, Debug, serde::Serialize, serde::Deserialize)]
pub struct Key<T> {
    pub offset: f64, // 0..=1
    pub value: T,
}

impl<T> Timeline<T>
where
    T: Lerp + Clone,
{
    pub fn new(keys: Vec<Key<T>>, duration_ms: f64, ease: Ease) -> BoothResult<Self> {
        let tl = Self {
            keys,
            duration_ms,
            ease,
        };
        tl.validate()?;
        Ok(tl)
    }

    pub fn validate(&self) -> BoothResult<()> {
        if self.keys.is_empty() {
            return Err(BoothError::animation("Timeline must have at least one key"));
        }
        if !(self.duration_ms.is_finite() && self.duration_ms > 0.0) {
            return Err(BoothError::animation("Timeline duration must be > 0"));
        }
        if self
            .keys
            .iter()
            .any(|k| !k.offset.is_finite() || !(0.0..=1.0).contains(&k.offset))
        {
            return Err(BoothError::animation(
                "Timeline key offsets must be within [0, 1]",
            ));
        }
        if !self.keys.windows(2).all(|w| w[0].offset <= w[1].offset) {
            return Err(BoothError::animation(
                "Timeline keys must be sorted by offset",
            ));
        }
        Ok(())
    }

    pub fn finished(&self, elapsed: TimeMs) -> bool {
        elapsed >= self.duration_ms
    }

    pub fn sample(&self, elapsed: TimeMs) -> BoothResult<T> {
        if self.keys.is_empty() {
            return Err(BoothError::animation("Timeline has no keys"));
        }

        let t = (elapsed / self.duration_ms).clamp(0.0, 1.0);
        let idx = self.keys.partition_point(|k| k.offset <= t);

        if idx == 0 {
            return Ok(self.keys[0].value.clone());
        }
        if idx >= self.keys.len() {
            return Ok(self.keys[self.keys.len() - 1].value.clone());
        }

        let a = &self.keys[idx - 1];
        let b = &self.keys[idx];
        let denom = b.offset - a.offset;
        if denom <= 0.0 {
            return Ok(a.value.clone());
        }

        let local = (t - a.offset) / denom;
        Ok(T::lerp(&a.value, &b.value, self.ease.apply(local)))
    }
}
