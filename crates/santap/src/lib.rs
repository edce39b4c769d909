//! Santap Facade
//!
//! Re-exports the core protocol and offers a one-call runner wired with the
//! default collaborators.

pub use santap_core as core;

use santap_core::{Coordinator, RandomThink, RunError, RunStatistics, StrategyKind, TracingSink};

/// Seats `seats` philosophers, each owing `meals` meals, and dines to
/// completion with the chosen strategy, random think-delays and tracing
/// progress events.
pub fn banquet(seats: usize, meals: u32, kind: StrategyKind) -> Result<RunStatistics, RunError> {
    let coordinator = Coordinator::new(seats, meals)?;
    let strategy = kind.build();
    coordinator.run(strategy.as_ref(), &RandomThink::default(), &TracingSink)
}
