use std::sync::{Mutex, MutexGuard};

use crate::ring::{ForkRing, MisuseError, Seat};

/// Outcome of one attempt to pick up a seat's fork pair.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Acquisition {
    /// Both forks are now held by the caller.
    Acquired,
    /// Neither fork is held; the caller should think, then retry.
    Contended,
}

/// How a philosopher obtains exclusive access to both of its forks.
///
/// Implementations must uphold two rules: never leave a fork held on a
/// `Contended` return, and never release a fork they did not confirm
/// acquiring. The philosopher loop is otherwise identical across variants.
pub trait AcquisitionStrategy: Send + Sync {
    /// One acquisition attempt for `seat` against the shared ring.
    ///
    /// Blocking implementations may suspend the caller and always report
    /// [`Acquisition::Acquired`]; non-blocking ones may report
    /// [`Acquisition::Contended`] after undoing any partial claim.
    fn acquire_pair(&self, ring: &ForkRing, seat: Seat) -> Result<Acquisition, MisuseError>;
}

/// A single table-wide gate admitting one philosopher at a time into its
/// fork-acquisition sequence.
///
/// With at most one philosopher ever mid-acquisition, no circular wait-for
/// chain can form regardless of how long the blocking acquires take.
pub struct AdmissionGate {
    inner: Mutex<()>,
}

/// Proof of standing inside the gate; leaving is automatic on drop, on
/// every exit path.
pub struct AdmissionPermit<'a> {
    _guard: MutexGuard<'a, ()>,
}

impl AdmissionGate {
    pub fn new() -> Self {
        Self {
            inner: Mutex::new(()),
        }
    }

    /// Blocks until the gate is empty, then occupies it.
    pub fn enter(&self) -> AdmissionPermit<'_> {
        AdmissionPermit {
            _guard: self.inner.lock().expect("admission gate poisoned"),
        }
    }
}

impl Default for AdmissionGate {
    fn default() -> Self {
        Self::new()
    }
}

/// Ordered-blocking strategy: serialize admission, then block for both forks.
///
/// The classic deadlock-avoidance move — a total order on acquisition via a
/// global gate. The permit is dropped as soon as both forks are held, so the
/// gate bounds parallelism only during the acquire phase, not while eating.
pub struct Admission {
    gate: AdmissionGate,
}

impl Admission {
    pub fn new() -> Self {
        Self {
            gate: AdmissionGate::new(),
        }
    }
}

impl Default for Admission {
    fn default() -> Self {
        Self::new()
    }
}

impl AcquisitionStrategy for Admission {
    fn acquire_pair(&self, ring: &ForkRing, seat: Seat) -> Result<Acquisition, MisuseError> {
        let permit = self.gate.enter();
        ring.acquire(seat.left);
        ring.acquire(seat.right);
        drop(permit);
        Ok(Acquisition::Acquired)
    }
}

/// Where a single try-and-backoff attempt stands.
///
/// Every transition out of `LeftHeld` that is not to `BothHeld` passes
/// through a release of the left fork, making release-on-partial-failure a
/// structural property rather than a manual call site.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum AttemptState {
    NotStarted,
    LeftHeld,
    BothHeld,
    BackingOff,
}

/// Try-and-backoff strategy: claim both forks or neither, never block.
///
/// No philosopher ever holds one fork while waiting indefinitely for the
/// other, so no deadlock cycle can form. Liveness is best-effort only:
/// mutual preemption can in principle repeat forever (live-lock); the
/// caller's randomized think-delay between attempts is the mitigation.
pub struct Backoff;

impl AcquisitionStrategy for Backoff {
    fn acquire_pair(&self, ring: &ForkRing, seat: Seat) -> Result<Acquisition, MisuseError> {
        let mut state = AttemptState::NotStarted;
        loop {
            state = match state {
                AttemptState::NotStarted => {
                    if ring.try_acquire(seat.left) {
                        AttemptState::LeftHeld
                    } else {
                        AttemptState::BackingOff
                    }
                }
                AttemptState::LeftHeld => {
                    if ring.try_acquire(seat.right) {
                        AttemptState::BothHeld
                    } else {
                        // The rival neighbour won the right fork; give the
                        // left one back before backing off.
                        ring.release(seat.left)?;
                        AttemptState::BackingOff
                    }
                }
                AttemptState::BothHeld => return Ok(Acquisition::Acquired),
                AttemptState::BackingOff => return Ok(Acquisition::Contended),
            };
        }
    }
}

/// Which of the two shipped strategies a run should use.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StrategyKind {
    /// [`Admission`]: serialized blocking acquisition.
    Admission,
    /// [`Backoff`]: non-blocking try-both-or-neither.
    Backoff,
}

impl StrategyKind {
    /// Builds a fresh strategy instance of this kind.
    pub fn build(self) -> Box<dyn AcquisitionStrategy> {
        match self {
            StrategyKind::Admission => Box::new(Admission::new()),
            StrategyKind::Backoff => Box::new(Backoff),
        }
    }
}
