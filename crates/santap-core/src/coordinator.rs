use std::thread;
use std::time::{Duration, Instant};

use thiserror::Error;

use crate::ring::{ForkRing, MisuseError, Seat};
use crate::strategy::AcquisitionStrategy;
use crate::worker::{Philosopher, ProgressSink, ThinkDelay};

/// Fewer seats than this makes the cyclic-neighbour model degenerate.
pub const MIN_SEATS: usize = 3;

/// Meals each philosopher owes when the caller does not say otherwise.
pub const DEFAULT_QUOTA: u32 = 10_000;

/// Everything that can end a run before all philosophers are done.
#[derive(Error, Debug)]
pub enum RunError {
    /// The configured table is too small to dine at.
    #[error("the table needs at least {MIN_SEATS} philosophers, got {0}")]
    TooFewSeats(usize),

    /// A fork-handling invariant was violated; a protocol bug, fatal.
    #[error(transparent)]
    Misuse(#[from] MisuseError),

    /// A philosopher thread panicked mid-meal.
    #[error("philosopher {0} panicked mid-meal")]
    Panicked(usize),
}

/// Monotonic start/end instants of one complete run.
#[derive(Debug, Clone, Copy)]
pub struct RunStatistics {
    pub started_at: Instant,
    pub finished_at: Instant,
}

impl RunStatistics {
    /// Wall time from the first spawn to the last join.
    pub fn elapsed(&self) -> Duration {
        self.finished_at.duration_since(self.started_at)
    }
}

/// Seats the table, spawns one thread per philosopher, and times the run.
#[derive(Debug)]
pub struct Coordinator {
    seats: usize,
    quota: u32,
}

impl Coordinator {
    /// Validates the seat count before any fork or thread exists.
    pub fn new(seats: usize, quota: u32) -> Result<Self, RunError> {
        if seats < MIN_SEATS {
            return Err(RunError::TooFewSeats(seats));
        }
        Ok(Self { seats, quota })
    }

    /// Runs the table to completion and reports how long it took.
    ///
    /// Blocks until every philosopher reaches its quota. A philosopher that
    /// never terminates (the backoff strategy's theoretical live-lock)
    /// makes this call never return; no timeout masks that.
    pub fn run(
        &self,
        strategy: &dyn AcquisitionStrategy,
        think: &dyn ThinkDelay,
        progress: &dyn ProgressSink,
    ) -> Result<RunStatistics, RunError> {
        let ring = ForkRing::new(self.seats);
        tracing::info!(seats = self.seats, quota = self.quota, "table seated");

        let started_at = Instant::now();
        let outcomes: Vec<(usize, thread::Result<Result<(), MisuseError>>)> =
            thread::scope(|scope| {
                let handles: Vec<_> = (0..self.seats)
                    .map(|id| {
                        let philosopher = Philosopher::new(Seat::new(id, self.seats), self.quota);
                        let ring = &ring;
                        (
                            id,
                            scope.spawn(move || philosopher.dine(ring, strategy, think, progress)),
                        )
                    })
                    .collect();

                handles
                    .into_iter()
                    .map(|(id, handle)| (id, handle.join()))
                    .collect()
            });
        let finished_at = Instant::now();

        for (id, outcome) in outcomes {
            match outcome {
                Ok(dined) => dined?,
                Err(_) => return Err(RunError::Panicked(id)),
            }
        }

        debug_assert!(ring.all_free(), "a fork is still held after the run");
        let stats = RunStatistics {
            started_at,
            finished_at,
        };
        tracing::info!(elapsed_ms = stats.elapsed().as_millis() as u64, "table cleared");
        Ok(stats)
    }
}
