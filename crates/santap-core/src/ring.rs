use std::sync::{Condvar, Mutex};

use thiserror::Error;

/// Errors signalling a violated fork-handling protocol.
///
/// These never occur under the shipped strategies; any occurrence is a
/// protocol bug in the caller, not a runtime condition to recover from.
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum MisuseError {
    /// A fork was released while nobody held it.
    #[error("fork {0} released while free")]
    ReleaseWhileFree(usize),
}

/// One fork: a binary lock whose Held/Free state is inspectable.
///
/// The state lives behind a tiny mutex so that `try_acquire`, the blocking
/// `acquire` and `release` are all atomic with respect to each other, and a
/// condvar wakes blocked claimants on release. The mutex is only held for
/// the duration of a state flip, never across a meal.
struct Fork {
    held: Mutex<bool>,
    freed: Condvar,
}

impl Fork {
    fn new() -> Self {
        Self {
            held: Mutex::new(false),
            freed: Condvar::new(),
        }
    }
}

/// The seat of one philosopher: its id and the fork indices it needs.
///
/// Left is the philosopher's own index, right is the clockwise neighbour's.
/// A plain value captured at spawn time; philosophers address forks by
/// index into the shared [`ForkRing`] rather than by reference.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Seat {
    pub id: usize,
    pub left: usize,
    pub right: usize,
}

impl Seat {
    /// Seat `id` at a table of `table_size` forks.
    pub fn new(id: usize, table_size: usize) -> Self {
        Self {
            id,
            left: id,
            right: (id + 1) % table_size,
        }
    }
}

/// A fixed cycle of independently lockable forks shared by all philosophers.
///
/// Membership is immutable after construction; the ring itself carries no
/// policy — deadlock avoidance is the strategies' job.
pub struct ForkRing {
    forks: Vec<Fork>,
}

impl ForkRing {
    /// Lays a table of `size` forks. Fewer than 3 makes the cyclic-neighbour
    /// model degenerate, so that is rejected outright.
    pub fn new(size: usize) -> Self {
        assert!(size >= 3, "a fork ring needs at least 3 forks, got {size}");
        Self {
            forks: (0..size).map(|_| Fork::new()).collect(),
        }
    }

    /// Number of forks on the table.
    pub fn len(&self) -> usize {
        self.forks.len()
    }

    /// Never true: construction rejects rings smaller than 3. Present
    /// only so `len` carries its conventional companion.
    pub fn is_empty(&self) -> bool {
        self.forks.is_empty()
    }

    /// Claims fork `index` iff it is free. Never blocks.
    pub fn try_acquire(&self, index: usize) -> bool {
        let mut held = self.forks[index].held.lock().expect("fork state poisoned");
        if *held {
            false
        } else {
            *held = true;
            true
        }
    }

    /// Blocks the caller until fork `index` is free, then claims it.
    ///
    /// No fairness guarantee among multiple blocked claimants; whoever the
    /// condvar wakes first wins.
    pub fn acquire(&self, index: usize) {
        let fork = &self.forks[index];
        let mut held = fork.held.lock().expect("fork state poisoned");
        while *held {
            held = fork.freed.wait(held).expect("fork state poisoned");
        }
        *held = true;
    }

    /// Returns fork `index` to the table and wakes one blocked claimant.
    pub fn release(&self, index: usize) -> Result<(), MisuseError> {
        let fork = &self.forks[index];
        let mut held = fork.held.lock().expect("fork state poisoned");
        if !*held {
            return Err(MisuseError::ReleaseWhileFree(index));
        }
        *held = false;
        fork.freed.notify_one();
        Ok(())
    }

    /// Whether fork `index` is currently free.
    pub fn is_free(&self, index: usize) -> bool {
        !*self.forks[index].held.lock().expect("fork state poisoned")
    }

    /// Post-run scan: true iff every fork has been returned to the table.
    pub fn all_free(&self) -> bool {
        (0..self.forks.len()).all(|i| self.is_free(i))
    }
}
