use std::str::FromStr;
use std::sync::Arc;
use std::time::Duration;

use crate::constants::{
    BOOK_OPEN_DELAY, BOOK_OPENING_DURATION, COMMIT_THRESHOLD, DRAG_DEAD_ZONE,
    DRAG_REFERENCE_WIDTH, FRAME_INTERVAL, PAGE_TURN_DURATION,
};
use crate::models::PersonRecord;

/// Opening state of the flip-book
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BookPhase {
    Closed,
    Opening,
    Open,
}

/// Which way a page is being turned
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DragDirection {
    None,
    Next,
    Prev,
}

/// When the celebration effect fires
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CelebrationPolicy {
    /// On reveal and on every committed page turn
    EveryChange,
    /// Only when the book first opens
    FirstRevealOnly,
}

impl FromStr for CelebrationPolicy {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "every_change" | "every-change" | "always" => Ok(Self::EveryChange),
            "first_reveal" | "first-reveal" | "once" => Ok(Self::FirstRevealOnly),
            other => Err(format!(
                "Unknown celebration policy '{}', expected 'every_change' or 'first_reveal'",
                other
            )),
        }
    }
}

/// Why a celebration fired
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CelebrationReason {
    /// The book finished opening with at least one birthday
    Reveal,
    /// A page turn committed
    PageTurn { from: usize, to: usize },
}

/// Timing and threshold knobs for the controller
#[derive(Debug, Clone)]
pub struct CarouselConfig {
    pub open_delay: Duration,
    pub opening_duration: Duration,
    pub turn_duration: Duration,
    pub frame_interval: Duration,
    /// Pointer travel in pixels that equals a full page turn
    pub reference_width: f32,
    pub dead_zone: f32,
    pub commit_threshold: f32,
    pub celebration_policy: CelebrationPolicy,
}

impl Default for CarouselConfig {
    fn default() -> Self {
        Self {
            open_delay: BOOK_OPEN_DELAY,
            opening_duration: BOOK_OPENING_DURATION,
            turn_duration: PAGE_TURN_DURATION,
            frame_interval: FRAME_INTERVAL,
            reference_width: DRAG_REFERENCE_WIDTH,
            dead_zone: DRAG_DEAD_ZONE,
            commit_threshold: COMMIT_THRESHOLD,
            celebration_policy: CelebrationPolicy::EveryChange,
        }
    }
}

/// Read-only view of the carousel handed to the presentation layer
#[derive(Debug, Clone)]
pub struct CarouselState {
    pub items: Arc<Vec<PersonRecord>>,
    pub current_index: usize,
    pub drag_progress: f32,
    pub drag_direction: DragDirection,
    pub is_dragging: bool,
    pub is_animating: bool,
    pub book_phase: BookPhase,
}

impl Default for CarouselState {
    fn default() -> Self {
        Self {
            items: Arc::new(Vec::new()),
            current_index: 0,
            drag_progress: 0.0,
            drag_direction: DragDirection::None,
            is_dragging: false,
            is_animating: false,
            book_phase: BookPhase::Closed,
        }
    }
}

impl CarouselState {
    /// Number of people in the book
    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// The record on the current page
    pub fn current(&self) -> Option<&PersonRecord> {
        self.items.get(self.current_index)
    }

    pub fn has_next(&self) -> bool {
        self.current_index + 1 < self.items.len()
    }

    pub fn has_previous(&self) -> bool {
        self.current_index > 0 && !self.items.is_empty()
    }

    /// Whether navigation input is accepted right now
    pub fn is_busy(&self) -> bool {
        self.is_dragging || self.is_animating
    }

    /// Put drag visuals back to neutral
    pub(crate) fn reset_drag(&mut self) {
        self.drag_progress = 0.0;
        self.drag_direction = DragDirection::None;
    }
}
