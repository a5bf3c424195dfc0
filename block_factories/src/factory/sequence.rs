//! Per-definition sequence counters.

use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};

/// Shared handle over a monotonically increasing counter.
///
/// Every factory owns one. Each build of the factory draws a single number,
/// shared by all sequence declarations of that build. Clones share the
/// counter, so a test can keep a handle and reset it between cases.
///
/// ```rust
/// use block_factories::Sequence;
///
/// let sequence = Sequence::starting_at(5);
/// let handle = sequence.clone();
/// assert_eq!(sequence.next(), 5);
/// assert_eq!(handle.peek(), 6);
/// handle.reset();
/// assert_eq!(sequence.next(), 0);
/// ```
#[derive(Clone, Debug, Default)]
pub struct Sequence(Arc<AtomicU64>);

impl Sequence {
    /// A fresh counter starting at zero.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// A fresh counter starting at `start`.
    #[must_use]
    pub fn starting_at(start: u64) -> Self {
        Self(Arc::new(AtomicU64::new(start)))
    }

    /// Draw the next number.
    pub fn next(&self) -> u64 {
        self.0.fetch_add(1, Ordering::SeqCst)
    }

    /// The number the next draw will return.
    #[must_use]
    pub fn peek(&self) -> u64 {
        self.0.load(Ordering::SeqCst)
    }

    /// Restart the counter at zero.
    pub fn reset(&self) {
        self.reset_to(0);
    }

    /// Restart the counter at `value`.
    pub fn reset_to(&self, value: u64) {
        self.0.store(value, Ordering::SeqCst);
    }
}
