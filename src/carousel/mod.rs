/// Flip-book carousel: phase timers, navigation, drag gestures and page-turn animation
mod animation;
mod controller;
mod gesture;
mod observer;
mod types;

// Re-export public types and functions
pub use animation::{AnimationHandle, ease_out_cubic, start_interpolation};
pub use controller::CarouselController;
pub use gesture::{PointerSubscription, resolve_drag};
pub use observer::{CarouselObserver, TracingObserver};
pub use types::{
    BookPhase, CarouselConfig, CarouselState, CelebrationPolicy, CelebrationReason, DragDirection,
};
