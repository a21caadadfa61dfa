use super::controller::CarouselController;
use super::types::DragDirection;

/// Resolve pointer travel into a page-turn direction and magnitude.
///
/// Travel to the left (positive delta) turns forward, to the right turns back.
/// Movement inside the dead zone, or toward a side with no page, yields
/// `(DragDirection::None, 0.0)`.
pub fn resolve_drag(
    start_x: f32,
    pointer_x: f32,
    reference_width: f32,
    dead_zone: f32,
    has_next: bool,
    has_previous: bool,
) -> (DragDirection, f32) {
    if reference_width <= 0.0 || !start_x.is_finite() || !pointer_x.is_finite() {
        return (DragDirection::None, 0.0);
    }

    let progress = ((start_x - pointer_x) / reference_width).clamp(-1.0, 1.0);

    if progress > dead_zone && has_next {
        (DragDirection::Next, progress.min(1.0))
    } else if progress < -dead_zone && has_previous {
        (DragDirection::Prev, progress.abs().min(1.0))
    } else {
        (DragDirection::None, 0.0)
    }
}

/// Page-wide pointer listeners for one drag, scoped to the gesture.
///
/// Obtained from [`CarouselController::begin_drag`]. Pointer moves are routed
/// through it, and releasing or dropping it ends the drag exactly once.
#[derive(Debug)]
pub struct PointerSubscription<'a> {
    controller: &'a CarouselController,
    released: bool,
}

impl<'a> PointerSubscription<'a> {
    pub(crate) fn new(controller: &'a CarouselController) -> Self {
        Self {
            controller,
            released: false,
        }
    }

    /// Forward a pointer move
    pub fn pointer_move(&self, pointer_x: f32) {
        self.controller.drag_move(pointer_x);
    }

    /// Pointer up: end the drag and unsubscribe
    pub fn release(mut self) {
        self.end();
    }

    fn end(&mut self) {
        if !self.released {
            self.released = true;
            self.controller.drag_end();
        }
    }
}

impl Drop for PointerSubscription<'_> {
    fn drop(&mut self) {
        self.end();
    }
}
