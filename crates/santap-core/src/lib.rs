//! Core dining protocol for Santap.
//!
//! N philosophers around a table of N forks, each needing its own fork and
//! the clockwise neighbour's to eat. The interesting part is the
//! acquisition protocol: [`Admission`] breaks circular wait by serializing
//! entry into the acquire sequence, [`Backoff`] claims both forks or
//! neither and retries after a randomized pause. The [`Coordinator`] spawns
//! one thread per seat, waits for every quota to hit zero, and reports the
//! elapsed wall time.

mod coordinator;
mod ring;
mod strategy;
mod worker;

pub use coordinator::{Coordinator, DEFAULT_QUOTA, MIN_SEATS, RunError, RunStatistics};
pub use ring::{ForkRing, MisuseError, Seat};
pub use strategy::{
    Acquisition, AcquisitionStrategy, Admission, AdmissionGate, AdmissionPermit, Backoff,
    StrategyKind,
};
pub use worker::{Philosopher, ProgressSink, RandomThink, ThinkDelay, TracingSink};
