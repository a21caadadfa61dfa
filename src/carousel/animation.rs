//! Cancellable timed interpolation driving page-turn progress.
//!
//! A transition samples the clock once per frame, eases the normalised time
//! with a cubic ease-out and reports the interpolated value until it reaches
//! the target, then runs its completion callback exactly once.

use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};
use std::time::Duration;

use tokio::task::JoinHandle;
use tokio::time::{Instant, MissedTickBehavior, interval};

/// Cubic ease-out: fast start, gentle landing
pub fn ease_out_cubic(t: f32) -> f32 {
    let t = t.clamp(0.0, 1.0);
    1.0 - (1.0 - t).powi(3)
}

/// Value between `from` and `to` at normalised time `t`, eased
pub fn interpolate(from: f32, to: f32, t: f32) -> f32 {
    if t >= 1.0 {
        return to;
    }
    from + (to - from) * ease_out_cubic(t)
}

/// Normalised time of a transition, clamped to [0, 1]
pub fn normalized_time(elapsed: Duration, duration: Duration) -> f32 {
    if duration.is_zero() {
        return 1.0;
    }
    (elapsed.as_secs_f32() / duration.as_secs_f32()).min(1.0)
}

/// Handle to a running interpolation. Dropping it cancels the transition.
#[derive(Debug)]
pub struct AnimationHandle {
    task: Option<JoinHandle<()>>,
    cancelled: Arc<AtomicBool>,
}

impl AnimationHandle {
    /// Stop the transition; no further ticks or completion will run.
    /// Calling it again is a no-op.
    pub fn cancel(&mut self) {
        self.cancelled.store(true, Ordering::Release);
        if let Some(task) = self.task.take() {
            task.abort();
        }
    }
}

impl Drop for AnimationHandle {
    fn drop(&mut self) {
        self.cancel();
    }
}

/// Spawn a transition from `from` to `to` over `duration`.
///
/// `on_tick` receives the eased value once per frame, the last call is always
/// exactly `to`. `on_complete` runs after the final tick unless the handle was
/// cancelled first. Must be called from within a tokio runtime.
pub fn start_interpolation<T, C>(
    from: f32,
    to: f32,
    duration: Duration,
    frame_interval: Duration,
    mut on_tick: T,
    on_complete: C,
) -> AnimationHandle
where
    T: FnMut(f32) + Send + 'static,
    C: FnOnce() + Send + 'static,
{
    let cancelled = Arc::new(AtomicBool::new(false));
    let flag = Arc::clone(&cancelled);

    let task = tokio::spawn(async move {
        let started = Instant::now();
        let mut frames = interval(frame_interval.max(Duration::from_millis(1)));
        frames.set_missed_tick_behavior(MissedTickBehavior::Skip);

        loop {
            frames.tick().await;
            if flag.load(Ordering::Acquire) {
                return;
            }

            let t = normalized_time(started.elapsed(), duration);
            on_tick(interpolate(from, to, t));

            if t >= 1.0 {
                break;
            }
        }

        if !flag.load(Ordering::Acquire) {
            on_complete();
        }
    });

    AnimationHandle {
        task: Some(task),
        cancelled,
    }
}
