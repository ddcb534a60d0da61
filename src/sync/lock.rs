//! Process-level mutual exclusion with spin-count tuning.
//!
//! [`Lock`] wraps the platform's blocking exclusive-lock primitive and adds
//! a configurable busy-wait phase in front of it: short critical sections
//! are usually released within a few hundred spins, and taking them without
//! a context switch is much cheaper than parking the thread. Spinning is
//! only attempted when the host can actually run another thread in
//! parallel; on a single hardware thread the lock degrades to a plain
//! blocking wait.

use std::hint;
use std::num::NonZeroUsize;
use std::thread;

use log::trace;
use once_cell::sync::Lazy;
use parking_lot::{ReentrantMutex, ReentrantMutexGuard};

/// One entry in the ranked ladder of spin-tuning strategies.
///
/// Each strategy is probed for availability once per process (the result is
/// cached); the first available entry wins and decides the effective spin
/// count for every `Lock` constructed afterwards.
struct SpinStrategy {
    /// Short name, used in trace output.
    name: &'static str,

    /// Whether the host supports this strategy.
    available: fn() -> bool,

    /// Maps the requested spin count to the effective one.
    effective: fn(u32) -> u32,
}

fn multi_core() -> bool {
    // A probe failure means the capability is absent, not an error.
    thread::available_parallelism()
        .map(NonZeroUsize::get)
        .map(|n| n > 1)
        .unwrap_or(false)
}

fn keep_requested(requested: u32) -> u32 {
    requested
}

fn never_spin(_requested: u32) -> u32 {
    0
}

/// Strategies in priority order. The last entry must always be available.
static SPIN_STRATEGIES: &[SpinStrategy] = &[
    SpinStrategy {
        name: "spin-then-block",
        available: multi_core,
        effective: keep_requested,
    },
    SpinStrategy {
        name: "block",
        available: || true,
        effective: never_spin,
    },
];

static SELECTED_STRATEGY: Lazy<&'static SpinStrategy> = Lazy::new(|| {
    let strategy = SPIN_STRATEGIES
        .iter()
        .find(|s| (s.available)())
        .unwrap_or(&SPIN_STRATEGIES[SPIN_STRATEGIES.len() - 1]);
    trace!("lock spin strategy selected: {}", strategy.name);
    strategy
});

/// An exclusive lock with a tunable busy-wait phase.
///
/// Acquisition first attempts up to `spin_count` non-blocking takes with a
/// CPU relax hint between attempts, then falls back to a blocking wait.
/// The lock is reentrant from the thread that already holds it; each nested
/// acquisition returns its own guard and the lock is released when the last
/// guard drops.
///
/// Only mutual exclusion is guaranteed. There is no fairness and no
/// timeout; a blocked thread waits indefinitely.
///
/// # Example
///
/// ```
/// use emberkit::sync::Lock;
///
/// let lock = Lock::new();
/// {
///     let _guard = lock.lock();
///     // critical section
/// } // released here
/// assert!(lock.try_lock().is_some());
/// ```
pub struct Lock {
    /// The backing blocking primitive.
    inner: ReentrantMutex<()>,

    /// Effective busy-wait iterations before blocking.
    spin_count: u32,
}

/// Scoped guard returned by [`Lock::lock`]; releases on drop.
pub struct LockGuard<'a> {
    _inner: ReentrantMutexGuard<'a, ()>,
}

impl Lock {
    /// Default busy-wait budget, tuned for short critical sections.
    pub const DEFAULT_SPIN_COUNT: u32 = 1500;

    /// Create a lock with the platform-default spin count.
    pub fn new() -> Self {
        Self::with_spin_count(Self::DEFAULT_SPIN_COUNT)
    }

    /// Create a lock tuned for `spin_count` busy-wait iterations.
    ///
    /// The requested count is passed through the selected spin strategy;
    /// on hosts where spinning cannot pay off the effective count is zero.
    pub fn with_spin_count(spin_count: u32) -> Self {
        let strategy = *SELECTED_STRATEGY;
        Self {
            inner: ReentrantMutex::new(()),
            spin_count: (strategy.effective)(spin_count),
        }
    }

    /// Acquire the lock, spinning up to the configured budget before
    /// falling back to a blocking wait.
    pub fn lock(&self) -> LockGuard<'_> {
        for _ in 0..self.spin_count {
            if let Some(guard) = self.inner.try_lock() {
                return LockGuard { _inner: guard };
            }
            hint::spin_loop();
        }

        if self.spin_count > 0 {
            trace!("spin budget ({}) exhausted, blocking", self.spin_count);
        }

        LockGuard {
            _inner: self.inner.lock(),
        }
    }

    /// Attempt a single non-blocking acquisition.
    pub fn try_lock(&self) -> Option<LockGuard<'_>> {
        self.inner.try_lock().map(|guard| LockGuard { _inner: guard })
    }

    /// The effective spin count this lock was constructed with.
    pub fn spin_count(&self) -> u32 {
        self.spin_count
    }
}

impl Default for Lock {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Debug for Lock {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Lock")
            .field("spin_count", &self.spin_count)
            .finish_non_exhaustive()
    }
}
