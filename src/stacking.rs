//! Front-to-back arbitration for everything on the desk.
//!
//! A single shared counter hands out z values; it only ever increases, so a
//! value is never reused while its owner is alive. The counter is an atomic
//! so a multi-threaded embedding stays correct without locks; contention is
//! negligible. Starting at 500 and advancing by at most 2 per interaction,
//! an i64 cannot wrap at any realistic session scale, so wraparound is not
//! handled.

use std::sync::atomic::{AtomicI64, Ordering};

pub const BASE_Z: i64 = 500;

#[derive(Debug)]
pub struct StackingArbiter {
    counter: AtomicI64,
}

impl Default for StackingArbiter {
    fn default() -> Self {
        Self::new()
    }
}

/// Adjacent pair handed out at spawn: the camera prop keeps the front value
/// and the new card sits just behind it, so the print appears to slide out
/// of the slot under the camera body.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct SpawnZ {
    pub camera: i64,
    pub card: i64,
}

impl StackingArbiter {
    pub fn new() -> Self {
        Self {
            counter: AtomicI64::new(BASE_Z),
        }
    }

    /// Advance by one and return the new front-most value.
    pub fn next(&self) -> i64 {
        self.counter.fetch_add(1, Ordering::Relaxed) + 1
    }

    /// Advance by two and return the camera/card spawn pair.
    pub fn spawn_pair(&self) -> SpawnZ {
        let camera = self.counter.fetch_add(2, Ordering::Relaxed) + 2;
        SpawnZ {
            camera,
            card: camera - 1,
        }
    }

    pub fn current(&self) -> i64 {
        self.counter.load(Ordering::Relaxed)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn values_strictly_increase_and_never_repeat() {
        let arbiter = StackingArbiter::new();
        let mut seen = Vec::new();
        for _ in 0..10 {
            seen.push(arbiter.next());
        }
        for w in seen.windows(2) {
            assert!(w[1] > w[0]);
        }
        assert_eq!(seen[0], BASE_Z + 1);
    }

    #[test]
    fn spawn_pair_keeps_the_camera_in_front() {
        let arbiter = StackingArbiter::new();
        let first = arbiter.next();
        let pair = arbiter.spawn_pair();
        assert_eq!(pair.camera, pair.card + 1);
        assert!(pair.card > first);
        assert_eq!(arbiter.current(), pair.camera);
    }

    #[test]
    fn pairs_and_singles_interleave_without_collision() {
        let arbiter = StackingArbiter::new();
        let a = arbiter.spawn_pair();
        let b = arbiter.next();
        let c = arbiter.spawn_pair();
        let all = [a.card, a.camera, b, c.card, c.camera];
        for w in all.windows(2) {
            assert!(w[1] > w[0]);
        }
    }
}
