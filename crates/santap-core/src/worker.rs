use std::thread;
use std::time::Duration;

use rand::Rng;

use crate::ring::{ForkRing, MisuseError, Seat};
use crate::strategy::{Acquisition, AcquisitionStrategy};

/// Supplies the pause a philosopher takes before each acquisition attempt.
///
/// The only contract is a bounded, non-negative duration; randomness is
/// what breaks up repeated mutual preemption under the backoff strategy.
pub trait ThinkDelay: Send + Sync {
    fn pause(&self) -> Duration;
}

/// Uniform random pause in `0..=cap`, sampled per call.
pub struct RandomThink {
    cap: Duration,
}

impl RandomThink {
    /// The original table pondered 0–10 microseconds between attempts.
    pub const DEFAULT_CAP: Duration = Duration::from_micros(10);

    pub fn new(cap: Duration) -> Self {
        Self { cap }
    }
}

impl Default for RandomThink {
    fn default() -> Self {
        Self::new(Self::DEFAULT_CAP)
    }
}

impl ThinkDelay for RandomThink {
    fn pause(&self) -> Duration {
        let cap = self.cap.as_micros() as u64;
        Duration::from_micros(rand::rng().random_range(0..=cap))
    }
}

/// Receives progress notifications from dining philosophers.
///
/// Fire-and-forget: implementations must not block the caller in any way
/// that matters, and no backpressure is modelled.
pub trait ProgressSink: Send + Sync {
    /// Philosopher `id` finished one meal; `remaining` are still owed.
    fn meal_served(&self, id: usize, remaining: u32);
    /// Philosopher `id` finished its whole quota.
    fn finished(&self, id: usize);
}

/// Default sink: per-meal progress at `debug`, completion at `info`.
pub struct TracingSink;

impl ProgressSink for TracingSink {
    fn meal_served(&self, id: usize, remaining: u32) {
        tracing::debug!(philosopher = id, remaining, "eating");
    }

    fn finished(&self, id: usize) {
        tracing::info!(philosopher = id, "done");
    }
}

/// Where a philosopher stands in its think/acquire/eat cycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Phase {
    Thinking,
    Acquiring,
    Acting,
    Done,
}

/// One philosopher: a seat at the table and a quota of meals to finish.
///
/// The philosopher owns no fork across iterations and is strategy-agnostic;
/// the loop shape (think, attempt, maybe eat, maybe loop) is identical for
/// every [`AcquisitionStrategy`].
pub struct Philosopher {
    seat: Seat,
    quota: u32,
}

impl Philosopher {
    pub fn new(seat: Seat, quota: u32) -> Self {
        Self { seat, quota }
    }

    /// Runs the full dining loop on the calling thread until the quota is
    /// exhausted, then emits one completion notification and returns.
    ///
    /// Forks are released right-then-left after every meal, so each exit
    /// from the acting phase leaves the ring exactly as it was found.
    pub fn dine(
        &self,
        ring: &ForkRing,
        strategy: &dyn AcquisitionStrategy,
        think: &dyn ThinkDelay,
        progress: &dyn ProgressSink,
    ) -> Result<(), MisuseError> {
        let mut remaining = self.quota;
        let mut phase = if remaining == 0 {
            Phase::Done
        } else {
            Phase::Thinking
        };

        loop {
            phase = match phase {
                Phase::Thinking => {
                    thread::sleep(think.pause());
                    Phase::Acquiring
                }
                Phase::Acquiring => match strategy.acquire_pair(ring, self.seat)? {
                    Acquisition::Acquired => Phase::Acting,
                    Acquisition::Contended => Phase::Thinking,
                },
                Phase::Acting => {
                    remaining -= 1;
                    progress.meal_served(self.seat.id, remaining);
                    ring.release(self.seat.right)?;
                    ring.release(self.seat.left)?;
                    if remaining == 0 {
                        Phase::Done
                    } else {
                        Phase::Thinking
                    }
                }
                Phase::Done => {
                    progress.finished(self.seat.id);
                    return Ok(());
                }
            };
        }
    }
}
