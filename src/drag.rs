//! Direct-manipulation dragging for any positioned, stackable element.
//!
//! Each element owns its controller, so drags are element-local state: if
//! the environment ever delivered two concurrent pointer streams, each drag
//! would simply operate on its own element. Position updates are absolute
//! (`initial + delta`), never incremental, so a missed move event cannot
//! accumulate drift. Hosts must deliver move/up at window scope, so a fast
//! drag that leaves the element's bounds keeps working.

use crate::{
    core::Point,
    stacking::StackingArbiter,
};

/// Pointer travel below this (per axis) still counts as a click.
pub const DRAG_THRESHOLD_PX: f64 = 2.0;

/// Transition restored after a drag so post-drag affordances (shadow) can
/// animate again.
pub const POST_DRAG_TRANSITION: &str = "box-shadow 0.3s";

/// Seam between the controller and whatever it moves (cards, the camera
/// prop). `position` reports the effective on-screen position including any
/// centering shift; `fold_center_shift` bakes that shift into the stored
/// position so subsequent absolute updates are exact.
pub trait Draggable {
    fn position(&self) -> Point;
    fn set_position(&mut self, pos: Point);
    fn fold_center_shift(&mut self);
    fn set_z(&mut self, z: i64);
    fn set_transition(&mut self, transition: Option<&str>);
}

/// Sub-element exclusion: targets for which a pointer-down must not start a
/// drag, e.g. a delete affordance.
pub struct DragOptions<T: ?Sized> {
    pub exclude: fn(&T) -> bool,
}

impl<T: ?Sized> Default for DragOptions<T> {
    fn default() -> Self {
        Self {
            exclude: |_| false,
        }
    }
}

#[derive(Clone, Copy, Debug, Default)]
pub struct DragController {
    active: bool,
    moved: bool,
    start_pointer: Point,
    initial_pos: Point,
}

impl DragController {
    pub fn pointer_down<T: ?Sized>(
        &mut self,
        el: &mut impl Draggable,
        arbiter: &StackingArbiter,
        pointer: Point,
        target: &T,
        options: &DragOptions<T>,
    ) {
        self.moved = false;
        if (options.exclude)(target) {
            return;
        }
        self.active = true;
        el.set_z(arbiter.next());
        self.start_pointer = pointer;
        self.initial_pos = el.position();
        el.set_transition(None);
    }

    pub fn pointer_move(&mut self, el: &mut impl Draggable, pointer: Point) {
        if !self.active {
            return;
        }
        let delta = pointer - self.start_pointer;
        if delta.x.abs() > DRAG_THRESHOLD_PX || delta.y.abs() > DRAG_THRESHOLD_PX {
            self.moved = true;
        }
        el.fold_center_shift();
        el.set_position(self.initial_pos + delta);
    }

    pub fn pointer_up(&mut self, el: &mut impl Draggable) {
        if self.active {
            self.active = false;
            el.set_transition(Some(POST_DRAG_TRANSITION));
        }
    }

    pub fn is_active(&self) -> bool {
        self.active
    }

    pub fn has_moved(&self) -> bool {
        self.moved
    }

    /// True when the preceding drag moved past the threshold, meaning the
    /// click that follows it must be swallowed. Clears the flag.
    pub fn take_click_suppression(&mut self) -> bool {
        std::mem::take(&mut self.moved)
    }
}
