use tracing::info;

use super::types::CelebrationReason;

/// Hook the host UI registers to play the celebration effect.
///
/// Called outside the controller's state lock, so implementations may read
/// controller state freely.
pub trait CarouselObserver: Send + Sync {
    fn on_celebrate(&self, reason: CelebrationReason);
}

impl<F> CarouselObserver for F
where
    F: Fn(CelebrationReason) + Send + Sync,
{
    fn on_celebrate(&self, reason: CelebrationReason) {
        self(reason)
    }
}

/// Observer that only logs celebrations
#[derive(Debug, Default, Clone, Copy)]
pub struct TracingObserver;

impl CarouselObserver for TracingObserver {
    fn on_celebrate(&self, reason: CelebrationReason) {
        match reason {
            CelebrationReason::Reveal => info!("🎉 Book opened, celebrating today's birthdays"),
            CelebrationReason::PageTurn { from, to } => {
                info!("🎉 Page turned from {} to {}, celebrating", from, to)
            }
        }
    }
}
