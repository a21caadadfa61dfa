use std::fmt;
use std::future::Future;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use tokio::sync::watch;
use tokio::task::JoinHandle;
use tokio::time::{Instant, sleep, sleep_until};
use tracing::{debug, error, info};

use super::animation::{AnimationHandle, start_interpolation};
use super::gesture::{PointerSubscription, resolve_drag};
use super::observer::CarouselObserver;
use super::types::{
    BookPhase, CarouselConfig, CarouselState, CelebrationPolicy, CelebrationReason, DragDirection,
};
use crate::models::PersonRecord;
use crate::services::FetchError;

/// Owns the flip-book state: book phase, current page, drag and page-turn
/// animation. All mutation goes through its methods; the presentation layer
/// reads snapshots via [`CarouselController::snapshot`] or
/// [`CarouselController::subscribe`].
///
/// Dropping the controller tears it down: pending phase timers and any
/// running animation are cancelled.
pub struct CarouselController {
    shared: Arc<Shared>,
}

struct Shared {
    config: CarouselConfig,
    observer: Arc<dyn CarouselObserver>,
    inner: Mutex<Inner>,
    updates: watch::Sender<CarouselState>,
}

#[derive(Default)]
struct Inner {
    state: CarouselState,
    drag_origin: Option<f32>,
    animation: Option<AnimationHandle>,
    /// Bumped whenever an animation starts or is cancelled; frames carrying
    /// an older id are discarded.
    animation_id: u64,
    phase_task: Option<JoinHandle<()>>,
    torn_down: bool,
}

impl CarouselController {
    /// Create a closed book with no items
    pub fn new(config: CarouselConfig, observer: Arc<dyn CarouselObserver>) -> Self {
        let (updates, _) = watch::channel(CarouselState::default());

        Self {
            shared: Arc::new(Shared {
                config,
                observer,
                inner: Mutex::new(Inner::default()),
                updates,
            }),
        }
    }

    /// Start loading items and run the Closed → Opening → Open sequence.
    ///
    /// A failed fetch is logged and treated as an empty list; the book still
    /// opens, without waiting for the open delay. Only the first call on a
    /// closed book has any effect. Must be called from within a tokio runtime.
    pub fn load<F>(&self, fetch: F)
    where
        F: Future<Output = Result<Vec<PersonRecord>, FetchError>> + Send + 'static,
    {
        let mut inner = self.shared.lock();
        if inner.torn_down || inner.phase_task.is_some() {
            debug!("Carousel already loading, ignoring load request");
            return;
        }

        let shared = Arc::clone(&self.shared);
        inner.phase_task = Some(tokio::spawn(run_phases(shared, fetch)));
    }

    /// Turn to the next page. Returns false when nothing happened.
    pub fn go_next(&self) -> bool {
        self.turn_page(DragDirection::Next)
    }

    /// Turn to the previous page. Returns false when nothing happened.
    pub fn go_previous(&self) -> bool {
        self.turn_page(DragDirection::Prev)
    }

    fn turn_page(&self, direction: DragDirection) -> bool {
        let mut inner = self.shared.lock();
        let state = &inner.state;

        if inner.torn_down || state.book_phase != BookPhase::Open || state.is_busy() {
            return false;
        }

        let available = match direction {
            DragDirection::Next => state.has_next(),
            DragDirection::Prev => state.has_previous(),
            DragDirection::None => false,
        };
        if !available {
            debug!("No page in direction {:?} from index {}", direction, state.current_index);
            return false;
        }

        inner.state.drag_direction = direction;
        inner.state.drag_progress = 0.0;
        self.shared.animate_to(&mut inner, 1.0, true);
        true
    }

    /// Pointer down. Accepted only on an open book with more than one item.
    /// Cancels any running page-turn animation.
    pub fn drag_start(&self, pointer_x: f32) -> bool {
        let mut inner = self.shared.lock();

        if inner.torn_down || inner.state.book_phase != BookPhase::Open || inner.state.len() <= 1 {
            return false;
        }

        inner.cancel_animation();
        inner.state.reset_drag();
        inner.state.is_dragging = true;
        inner.drag_origin = Some(pointer_x);
        self.shared.publish(&inner);
        true
    }

    /// Pointer down, returning a subscription that scopes the pointer
    /// listeners to this drag
    pub fn begin_drag(&self, pointer_x: f32) -> Option<PointerSubscription<'_>> {
        self.drag_start(pointer_x).then(|| PointerSubscription::new(self))
    }

    /// Pointer move. Recomputes direction and progress from the drag origin;
    /// ignored when no drag is active.
    pub fn drag_move(&self, pointer_x: f32) {
        let mut inner = self.shared.lock();
        let Some(origin) = inner.drag_origin.filter(|_| inner.state.is_dragging) else {
            return;
        };

        let (direction, progress) = resolve_drag(
            origin,
            pointer_x,
            self.shared.config.reference_width,
            self.shared.config.dead_zone,
            inner.state.has_next(),
            inner.state.has_previous(),
        );

        if inner.state.drag_direction == direction && inner.state.drag_progress == progress {
            return;
        }

        inner.state.drag_direction = direction;
        inner.state.drag_progress = progress;
        self.shared.publish(&inner);
    }

    /// Pointer up. Completes the page turn when progress reached the commit
    /// threshold, otherwise snaps back. Ignored when no drag is active.
    pub fn drag_end(&self) {
        let mut inner = self.shared.lock();
        if !inner.state.is_dragging {
            return;
        }

        inner.state.is_dragging = false;
        inner.drag_origin = None;

        let direction = inner.state.drag_direction;
        let progress = inner.state.drag_progress;

        if direction != DragDirection::None && progress >= self.shared.config.commit_threshold {
            debug!("Drag released at {:.2}, completing {:?} turn", progress, direction);
            self.shared.animate_to(&mut inner, 1.0, true);
        } else if direction != DragDirection::None || progress > 0.0 {
            debug!("Drag released at {:.2}, snapping back", progress);
            self.shared.animate_to(&mut inner, 0.0, false);
        } else {
            inner.state.reset_drag();
            self.shared.publish(&inner);
        }
    }

    /// Current state
    pub fn snapshot(&self) -> CarouselState {
        self.shared.lock().state.clone()
    }

    /// Receive every state change
    pub fn subscribe(&self) -> watch::Receiver<CarouselState> {
        self.shared.updates.subscribe()
    }

    /// Record on the current page
    pub fn current(&self) -> Option<PersonRecord> {
        self.shared.lock().state.current().cloned()
    }

    /// Cancel pending phase timers and animations. Idempotent; also run on drop.
    pub fn shutdown(&self) {
        let mut inner = self.shared.lock();
        if inner.torn_down {
            return;
        }

        inner.torn_down = true;
        if let Some(task) = inner.phase_task.take() {
            task.abort();
        }
        inner.cancel_animation();
        inner.drag_origin = None;
        inner.state.is_dragging = false;
        debug!("Carousel controller torn down");
    }
}

impl Drop for CarouselController {
    fn drop(&mut self) {
        self.shutdown();
    }
}

impl fmt::Debug for CarouselController {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CarouselController")
            .field("config", &self.shared.config)
            .field("state", &self.snapshot())
            .finish_non_exhaustive()
    }
}

impl Inner {
    fn cancel_animation(&mut self) {
        if let Some(mut animation) = self.animation.take() {
            animation.cancel();
        }
        self.animation_id += 1;
        self.state.is_animating = false;
    }
}

impl Shared {
    fn lock(&self) -> MutexGuard<'_, Inner> {
        self.inner.lock().unwrap_or_else(PoisonError::into_inner)
    }

    fn publish(&self, inner: &Inner) {
        self.updates.send_replace(inner.state.clone());
    }

    /// Notify the observer unless the policy filters `reason` out or the
    /// controller was torn down since the caller released the lock
    fn celebrate(&self, reason: CelebrationReason) {
        if self.lock().torn_down {
            debug!("Skipping {:?} celebration after teardown", reason);
            return;
        }

        let allowed = match (self.config.celebration_policy, reason) {
            (_, CelebrationReason::Reveal) => true,
            (CelebrationPolicy::EveryChange, CelebrationReason::PageTurn { .. }) => true,
            (CelebrationPolicy::FirstRevealOnly, CelebrationReason::PageTurn { .. }) => false,
        };

        if allowed {
            self.observer.on_celebrate(reason);
        }
    }

    /// Replace any running animation with a transition of `drag_progress`
    /// toward `target`. With `commit`, the page index moves in the drag
    /// direction once the transition lands.
    fn animate_to(self: &Arc<Self>, inner: &mut Inner, target: f32, commit: bool) {
        inner.cancel_animation();
        let id = inner.animation_id;
        let from = inner.state.drag_progress;
        inner.state.is_animating = true;
        self.publish(inner);

        let on_tick = {
            let shared = Arc::clone(self);
            move |progress| shared.apply_frame(id, progress)
        };
        let on_complete = {
            let shared = Arc::clone(self);
            move || shared.finish_animation(id, commit)
        };

        inner.animation = Some(start_interpolation(
            from,
            target,
            self.config.turn_duration,
            self.config.frame_interval,
            on_tick,
            on_complete,
        ));
    }

    fn apply_frame(&self, id: u64, progress: f32) {
        let mut inner = self.lock();
        if inner.torn_down || inner.animation_id != id {
            return;
        }

        inner.state.drag_progress = progress;
        self.publish(&inner);
    }

    fn finish_animation(&self, id: u64, commit: bool) {
        let reason = {
            let mut inner = self.lock();
            if inner.torn_down || inner.animation_id != id {
                return;
            }

            inner.state.is_animating = false;
            let from = inner.state.current_index;
            let to = match (commit, inner.state.drag_direction) {
                (true, DragDirection::Next) if inner.state.has_next() => from + 1,
                (true, DragDirection::Prev) if inner.state.has_previous() => from - 1,
                _ => from,
            };
            inner.state.current_index = to;
            inner.state.reset_drag();
            self.publish(&inner);

            if to != from {
                info!("Turned page from {} to {}", from, to);
            }
            (to != from).then_some(CelebrationReason::PageTurn { from, to })
        };

        if let Some(reason) = reason {
            self.celebrate(reason);
        }
    }

    fn set_items(&self, items: Vec<PersonRecord>) -> bool {
        let mut inner = self.lock();
        if inner.torn_down {
            return false;
        }

        inner.state.items = Arc::new(items);
        inner.state.current_index = 0;
        self.publish(&inner);
        true
    }

    fn enter_phase(&self, phase: BookPhase) -> Option<bool> {
        let mut inner = self.lock();
        if inner.torn_down {
            return None;
        }

        inner.state.book_phase = phase;
        self.publish(&inner);
        debug!("Book phase is now {:?}", phase);
        Some(!inner.state.is_empty())
    }
}

/// Load items, then walk the book through its opening phases
async fn run_phases<F>(shared: Arc<Shared>, fetch: F)
where
    F: Future<Output = Result<Vec<PersonRecord>, FetchError>> + Send + 'static,
{
    let started = Instant::now();

    match fetch.await {
        Ok(items) => {
            info!("Loaded {} birthday record(s)", items.len());
            if !shared.set_items(items) {
                return;
            }
            sleep_until(started + shared.config.open_delay).await;
        }
        Err(e) => {
            error!("Failed to load birthday data: {}", e);
        }
    }

    if shared.enter_phase(BookPhase::Opening).is_none() {
        return;
    }

    sleep(shared.config.opening_duration).await;

    if shared.enter_phase(BookPhase::Open) == Some(true) {
        shared.celebrate(CelebrationReason::Reveal);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;

    type Events = Arc<Mutex<Vec<CelebrationReason>>>;

    fn person(name: &str) -> PersonRecord {
        PersonRecord {
            name: name.to_string(),
            program: "Teknik Informatika".to_string(),
            age: 20,
            birth_date: "15 Oktober".to_string(),
            photo: None,
        }
    }

    fn controller_with(policy: CelebrationPolicy) -> (CarouselController, Events) {
        let events: Events = Arc::new(Mutex::new(Vec::new()));
        let sink = Arc::clone(&events);
        let observer: Arc<dyn CarouselObserver> =
            Arc::new(move |reason: CelebrationReason| sink.lock().unwrap().push(reason));

        let config = CarouselConfig {
            celebration_policy: policy,
            ..Default::default()
        };
        (CarouselController::new(config, observer), events)
    }

    async fn open_book(names: &[&str], policy: CelebrationPolicy) -> (CarouselController, Events) {
        let (controller, events) = controller_with(policy);
        let items: Vec<_> = names.iter().map(|n| person(n)).collect();
        controller.load(async move { Ok(items) });

        sleep(Duration::from_millis(6300)).await;
        assert_eq!(controller.snapshot().book_phase, BookPhase::Open);
        (controller, events)
    }

    async fn settle() {
        sleep(Duration::from_millis(400)).await;
    }

    fn page_turns(events: &Events) -> usize {
        events
            .lock()
            .unwrap()
            .iter()
            .filter(|r| matches!(r, CelebrationReason::PageTurn { .. }))
            .count()
    }

    #[tokio::test(start_paused = true)]
    async fn test_phases_follow_timers() {
        let (controller, events) = controller_with(CelebrationPolicy::EveryChange);
        controller.load(async { Ok(vec![person("A")]) });

        sleep(Duration::from_millis(4900)).await;
        let state = controller.snapshot();
        assert_eq!(state.book_phase, BookPhase::Closed);
        assert_eq!(state.len(), 1);

        sleep(Duration::from_millis(200)).await;
        assert_eq!(controller.snapshot().book_phase, BookPhase::Opening);
        assert!(events.lock().unwrap().is_empty());

        sleep(Duration::from_millis(1200)).await;
        assert_eq!(controller.snapshot().book_phase, BookPhase::Open);
        assert_eq!(*events.lock().unwrap(), vec![CelebrationReason::Reveal]);
    }

    #[tokio::test(start_paused = true)]
    async fn test_fetch_failure_still_opens_without_celebration() {
        let (controller, events) = controller_with(CelebrationPolicy::EveryChange);
        controller.load(async { Err(FetchError::Status(500)) });

        sleep(Duration::from_millis(100)).await;
        assert_eq!(controller.snapshot().book_phase, BookPhase::Opening);

        sleep(Duration::from_millis(1200)).await;
        let state = controller.snapshot();
        assert_eq!(state.book_phase, BookPhase::Open);
        assert!(state.is_empty());
        assert!(!controller.go_next());
        assert!(!controller.drag_start(100.0));

        sleep(Duration::from_secs(10)).await;
        assert!(events.lock().unwrap().is_empty());
    }

    #[tokio::test(start_paused = true)]
    async fn test_empty_list_opens_without_celebration() {
        let (controller, events) = open_book(&[], CelebrationPolicy::EveryChange).await;
        assert!(controller.current().is_none());
        assert!(events.lock().unwrap().is_empty());
    }

    #[tokio::test(start_paused = true)]
    async fn test_navigation_ignored_before_open() {
        let (controller, _events) = controller_with(CelebrationPolicy::EveryChange);
        controller.load(async { Ok(vec![person("A"), person("B")]) });

        sleep(Duration::from_millis(100)).await;
        assert!(!controller.go_next());
        assert!(!controller.drag_start(300.0));
        assert_eq!(controller.snapshot().current_index, 0);
    }

    #[tokio::test(start_paused = true)]
    async fn test_go_next_turns_page_and_celebrates_once() {
        let (controller, events) = open_book(&["A", "B", "C"], CelebrationPolicy::EveryChange).await;
        events.lock().unwrap().clear();

        assert!(controller.go_next());
        let state = controller.snapshot();
        assert!(state.is_animating);
        assert_eq!(state.drag_direction, DragDirection::Next);

        settle().await;
        let state = controller.snapshot();
        assert_eq!(state.current_index, 1);
        assert_eq!(state.drag_progress, 0.0);
        assert_eq!(state.drag_direction, DragDirection::None);
        assert!(!state.is_animating);
        assert_eq!(
            *events.lock().unwrap(),
            vec![CelebrationReason::PageTurn { from: 0, to: 1 }]
        );
        assert_eq!(controller.current().map(|p| p.name), Some("B".to_string()));
    }

    #[tokio::test(start_paused = true)]
    async fn test_go_previous_at_start_is_noop() {
        let (controller, events) = open_book(&["A", "B", "C"], CelebrationPolicy::EveryChange).await;
        events.lock().unwrap().clear();

        assert!(!controller.go_previous());
        settle().await;
        let state = controller.snapshot();
        assert_eq!(state.current_index, 0);
        assert!(!state.is_animating);
        assert!(events.lock().unwrap().is_empty());
    }

    #[tokio::test(start_paused = true)]
    async fn test_boundaries_are_idempotent() {
        let (controller, _events) = open_book(&["A", "B"], CelebrationPolicy::EveryChange).await;

        assert!(controller.go_next());
        settle().await;
        for _ in 0..3 {
            assert!(!controller.go_next());
            settle().await;
            assert_eq!(controller.snapshot().current_index, 1);
        }

        assert!(controller.go_previous());
        settle().await;
        for _ in 0..3 {
            assert!(!controller.go_previous());
            settle().await;
            assert_eq!(controller.snapshot().current_index, 0);
        }
    }

    #[tokio::test(start_paused = true)]
    async fn test_navigation_ignored_while_animating() {
        let (controller, _events) = open_book(&["A", "B", "C"], CelebrationPolicy::EveryChange).await;

        assert!(controller.go_next());
        assert!(!controller.go_next());
        assert!(!controller.go_previous());
        settle().await;
        assert_eq!(controller.snapshot().current_index, 1);
    }

    #[tokio::test(start_paused = true)]
    async fn test_drag_past_threshold_commits() {
        let (controller, events) = open_book(&["A", "B", "C"], CelebrationPolicy::EveryChange).await;
        events.lock().unwrap().clear();

        assert!(controller.drag_start(300.0));
        controller.drag_move(150.0);
        let state = controller.snapshot();
        assert!(state.is_dragging);
        assert_eq!(state.drag_direction, DragDirection::Next);
        assert!((state.drag_progress - 0.5).abs() < 1e-6);

        controller.drag_end();
        settle().await;

        let state = controller.snapshot();
        assert_eq!(state.current_index, 1);
        assert_eq!(state.drag_progress, 0.0);
        assert_eq!(state.drag_direction, DragDirection::None);
        assert!(!state.is_dragging);
        assert_eq!(page_turns(&events), 1);
    }

    #[tokio::test(start_paused = true)]
    async fn test_drag_backward_commits_previous() {
        let (controller, _events) = open_book(&["A", "B", "C"], CelebrationPolicy::EveryChange).await;
        assert!(controller.go_next());
        settle().await;

        assert!(controller.drag_start(100.0));
        controller.drag_move(250.0);
        assert_eq!(controller.snapshot().drag_direction, DragDirection::Prev);
        controller.drag_end();
        settle().await;

        assert_eq!(controller.snapshot().current_index, 0);
    }

    #[tokio::test(start_paused = true)]
    async fn test_drag_below_threshold_reverts() {
        let (controller, events) = open_book(&["A", "B", "C"], CelebrationPolicy::EveryChange).await;
        events.lock().unwrap().clear();

        assert!(controller.drag_start(300.0));
        controller.drag_move(240.0);
        assert!((controller.snapshot().drag_progress - 0.2).abs() < 1e-6);

        controller.drag_end();
        assert!(controller.snapshot().is_animating);

        sleep(Duration::from_millis(100)).await;
        let mid = controller.snapshot().drag_progress;
        assert!(mid < 0.2 && mid >= 0.0);

        settle().await;
        let state = controller.snapshot();
        assert_eq!(state.current_index, 0);
        assert_eq!(state.drag_progress, 0.0);
        assert_eq!(state.drag_direction, DragDirection::None);
        assert!(!state.is_animating);
        assert!(events.lock().unwrap().is_empty());
    }

    #[tokio::test(start_paused = true)]
    async fn test_drag_past_boundary_stays_neutral() {
        let (controller, _events) = open_book(&["A", "B"], CelebrationPolicy::EveryChange).await;

        assert!(controller.drag_start(100.0));
        controller.drag_move(280.0);
        let state = controller.snapshot();
        assert_eq!(state.drag_direction, DragDirection::None);
        assert_eq!(state.drag_progress, 0.0);

        controller.drag_end();
        settle().await;
        let state = controller.snapshot();
        assert_eq!(state.current_index, 0);
        assert!(!state.is_busy());
    }

    #[tokio::test(start_paused = true)]
    async fn test_drag_move_is_idempotent() {
        let (controller, _events) = open_book(&["A", "B", "C"], CelebrationPolicy::EveryChange).await;
        let mut updates = controller.subscribe();

        assert!(controller.drag_start(300.0));
        controller.drag_move(180.0);
        updates.mark_unchanged();

        controller.drag_move(180.0);
        assert!(!updates.has_changed().unwrap());
        assert!((controller.snapshot().drag_progress - 0.4).abs() < 1e-6);
    }

    #[tokio::test(start_paused = true)]
    async fn test_gesture_calls_without_start_are_noops() {
        let (controller, _events) = open_book(&["A", "B"], CelebrationPolicy::EveryChange).await;

        controller.drag_move(10.0);
        controller.drag_end();
        settle().await;

        let state = controller.snapshot();
        assert_eq!(state.current_index, 0);
        assert_eq!(state.drag_progress, 0.0);
        assert!(!state.is_busy());
    }

    #[tokio::test(start_paused = true)]
    async fn test_drag_needs_more_than_one_item() {
        let (controller, _events) = open_book(&["A"], CelebrationPolicy::EveryChange).await;
        assert!(!controller.drag_start(300.0));
        assert!(controller.begin_drag(300.0).is_none());
    }

    #[tokio::test(start_paused = true)]
    async fn test_drag_start_cancels_running_animation() {
        let (controller, events) = open_book(&["A", "B", "C"], CelebrationPolicy::EveryChange).await;
        events.lock().unwrap().clear();

        assert!(controller.go_next());
        sleep(Duration::from_millis(100)).await;
        assert!(controller.snapshot().drag_progress > 0.0);

        assert!(controller.drag_start(300.0));
        let state = controller.snapshot();
        assert!(!state.is_animating);
        assert!(state.is_dragging);
        assert_eq!(state.drag_progress, 0.0);

        sleep(Duration::from_millis(500)).await;
        let state = controller.snapshot();
        assert_eq!(state.current_index, 0);
        assert_eq!(state.drag_progress, 0.0);
        assert!(events.lock().unwrap().is_empty());

        controller.drag_end();
        assert!(!controller.snapshot().is_busy());
    }

    #[tokio::test(start_paused = true)]
    async fn test_interrupted_commit_cannot_land_twice() {
        let (controller, events) = open_book(&["A", "B", "C"], CelebrationPolicy::EveryChange).await;
        events.lock().unwrap().clear();

        assert!(controller.drag_start(300.0));
        controller.drag_move(100.0);
        controller.drag_end();
        assert!(controller.snapshot().is_animating);

        assert!(controller.drag_start(300.0));
        controller.drag_move(100.0);
        controller.drag_end();

        settle().await;
        sleep(Duration::from_secs(1)).await;

        let state = controller.snapshot();
        assert_eq!(state.current_index, 1);
        assert!(!state.is_busy());
        assert_eq!(
            *events.lock().unwrap(),
            vec![CelebrationReason::PageTurn { from: 0, to: 1 }]
        );
    }

    #[tokio::test(start_paused = true)]
    async fn test_pointer_subscription_release_commits() {
        let (controller, _events) = open_book(&["A", "B", "C"], CelebrationPolicy::EveryChange).await;

        let subscription = controller.begin_drag(300.0).unwrap();
        subscription.pointer_move(100.0);
        subscription.release();
        settle().await;

        assert_eq!(controller.snapshot().current_index, 1);
    }

    #[tokio::test(start_paused = true)]
    async fn test_dropping_pointer_subscription_ends_drag() {
        let (controller, _events) = open_book(&["A", "B", "C"], CelebrationPolicy::EveryChange).await;

        {
            let subscription = controller.begin_drag(300.0).unwrap();
            subscription.pointer_move(270.0);
        }
        assert!(!controller.snapshot().is_dragging);

        settle().await;
        let state = controller.snapshot();
        assert_eq!(state.current_index, 0);
        assert_eq!(state.drag_progress, 0.0);
    }

    #[tokio::test(start_paused = true)]
    async fn test_first_reveal_policy_skips_page_turns() {
        let (controller, events) = open_book(&["A", "B"], CelebrationPolicy::FirstRevealOnly).await;

        assert!(controller.go_next());
        settle().await;

        assert_eq!(controller.snapshot().current_index, 1);
        assert_eq!(*events.lock().unwrap(), vec![CelebrationReason::Reveal]);
    }

    #[tokio::test(start_paused = true)]
    async fn test_teardown_cancels_phase_timers() {
        let (controller, events) = controller_with(CelebrationPolicy::EveryChange);
        let updates = controller.subscribe();
        controller.load(async { Ok(vec![person("A")]) });

        sleep(Duration::from_millis(1000)).await;
        drop(controller);

        sleep(Duration::from_secs(10)).await;
        assert_eq!(updates.borrow().book_phase, BookPhase::Closed);
        assert!(events.lock().unwrap().is_empty());
    }

    #[tokio::test(start_paused = true)]
    async fn test_no_celebration_after_teardown() {
        let (controller, events) = controller_with(CelebrationPolicy::EveryChange);
        controller.load(async { Ok(vec![person("A"), person("B")]) });

        sleep(Duration::from_millis(5500)).await;
        assert_eq!(controller.snapshot().book_phase, BookPhase::Opening);
        controller.shutdown();

        // A phase task or completion that already passed its own check
        controller.shared.celebrate(CelebrationReason::Reveal);
        controller.shared.celebrate(CelebrationReason::PageTurn { from: 0, to: 1 });

        sleep(Duration::from_secs(5)).await;
        assert!(events.lock().unwrap().is_empty());
        assert_ne!(controller.snapshot().book_phase, BookPhase::Open);
    }

    #[tokio::test(start_paused = true)]
    async fn test_teardown_cancels_animation() {
        let (controller, events) = open_book(&["A", "B"], CelebrationPolicy::EveryChange).await;
        events.lock().unwrap().clear();

        assert!(controller.go_next());
        sleep(Duration::from_millis(50)).await;
        controller.shutdown();
        controller.shutdown();

        settle().await;
        assert_eq!(controller.snapshot().current_index, 0);
        assert!(events.lock().unwrap().is_empty());
        assert!(!controller.go_next());
    }

    #[tokio::test(start_paused = true)]
    async fn test_index_stays_in_bounds_under_mixed_input() {
        let (controller, _events) = open_book(&["A", "B", "C"], CelebrationPolicy::EveryChange).await;

        let script: [(f32, f32); 6] = [
            (300.0, 0.0),
            (300.0, 0.0),
            (300.0, 0.0),
            (0.0, 300.0),
            (0.0, 250.0),
            (0.0, 300.0),
        ];
        for (start, end) in script {
            if controller.drag_start(start) {
                controller.drag_move(end);
                controller.drag_end();
            }
            settle().await;
            let state = controller.snapshot();
            assert!(state.current_index < state.len());
            assert!(!state.is_busy());
        }
        assert_eq!(controller.snapshot().current_index, 0);
    }
}
