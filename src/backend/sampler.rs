//! Per-message sampling for the production backend.
//!
//! Within each one-second window the first `initial` records carrying a
//! given message pass through, then every `thereafter`-th. Everything else
//! is dropped and counted via self-monitoring.
//!
//! # Design Decisions
//! - State is a fixed pool of hashed counters, not a map keyed by message:
//!   memory stays bounded no matter how many distinct messages flow through
//!   (interpolated IDs in message text must not grow the sampler)
//! - Messages hashing to the same slot share a counter; with 4096 slots a
//!   collision costs sampling accuracy, never correctness
//! - Slots pack a reset deadline and a count into two atomics; no locks on
//!   the log path

use std::collections::hash_map::DefaultHasher;
use std::hash::{Hash, Hasher};
use std::sync::atomic::{AtomicU64, Ordering};
use std::time::{Duration, Instant};

use crate::observability::metrics;

/// Sampling knobs. Zero `thereafter` means "drop everything past `initial`".
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SamplingPolicy {
    pub initial: u64,
    pub thereafter: u64,
}

impl Default for SamplingPolicy {
    fn default() -> Self {
        Self {
            initial: 100,
            thereafter: 100,
        }
    }
}

const SLOT_COUNT: usize = 4096;

/// One shared counter. Times are nanoseconds since the sampler's epoch.
#[derive(Default)]
struct Slot {
    resets_at: AtomicU64,
    count: AtomicU64,
}

impl Slot {
    /// Bump the counter, resetting it first when the window has rolled
    /// over. Returns the count within the current window. Losing the reset
    /// race means counting into the winner's fresh window, which is fine.
    fn increment(&self, now: u64, window: u64) -> u64 {
        let resets_at = self.resets_at.load(Ordering::Acquire);
        if now < resets_at {
            return self.count.fetch_add(1, Ordering::Relaxed) + 1;
        }
        match self.resets_at.compare_exchange(
            resets_at,
            now + window,
            Ordering::AcqRel,
            Ordering::Acquire,
        ) {
            Ok(_) => {
                self.count.store(1, Ordering::Relaxed);
                1
            }
            Err(_) => self.count.fetch_add(1, Ordering::Relaxed) + 1,
        }
    }
}

/// Thread-safe, fixed-size sampling state.
pub struct Sampler {
    policy: SamplingPolicy,
    window: Duration,
    epoch: Instant,
    slots: Vec<Slot>,
}

impl Sampler {
    pub fn new(policy: SamplingPolicy) -> Self {
        Self::with_window(policy, Duration::from_secs(1))
    }

    fn with_window(policy: SamplingPolicy, window: Duration) -> Self {
        Self {
            policy,
            window,
            epoch: Instant::now(),
            slots: (0..SLOT_COUNT).map(|_| Slot::default()).collect(),
        }
    }

    fn slot(&self, message: &str) -> &Slot {
        let mut hasher = DefaultHasher::new();
        message.hash(&mut hasher);
        &self.slots[hasher.finish() as usize % SLOT_COUNT]
    }

    /// Decide whether a record with this message passes. Dropped records
    /// are counted, not reported.
    pub fn admit(&self, message: &str) -> bool {
        let now = self.epoch.elapsed().as_nanos() as u64;
        let window = self.window.as_nanos() as u64;
        let n = self.slot(message).increment(now, window);

        let admitted = if n <= self.policy.initial {
            true
        } else if self.policy.thereafter == 0 {
            false
        } else {
            (n - self.policy.initial) % self.policy.thereafter == 0
        };

        if !admitted {
            metrics::record_sampler_drop();
        }
        admitted
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    /// A message guaranteed not to share a slot with `taken`.
    fn independent_message(sampler: &Sampler, taken: &str) -> String {
        (0..)
            .map(|i| format!("other-{i}"))
            .find(|m| !std::ptr::eq(sampler.slot(taken), sampler.slot(m)))
            .unwrap()
    }

    #[test]
    fn test_admits_initial_then_every_thereafter() {
        let sampler = Sampler::new(SamplingPolicy {
            initial: 3,
            thereafter: 5,
        });

        let admitted: Vec<bool> = (0..13).map(|_| sampler.admit("same message")).collect();
        // 3 initial, then records 8 and 13 (every 5th past the initial run).
        let expected = [
            true, true, true, false, false, false, false, true, false, false, false, false, true,
        ];
        assert_eq!(admitted, expected);
    }

    #[test]
    fn test_distinct_messages_sampled_independently() {
        let sampler = Sampler::new(SamplingPolicy {
            initial: 1,
            thereafter: 0,
        });
        let other = independent_message(&sampler, "a");

        assert!(sampler.admit("a"));
        assert!(!sampler.admit("a"));
        assert!(sampler.admit(&other));
    }

    #[test]
    fn test_window_reset() {
        let sampler = Sampler::with_window(
            SamplingPolicy {
                initial: 1,
                thereafter: 0,
            },
            Duration::from_millis(10),
        );

        assert!(sampler.admit("x"));
        assert!(!sampler.admit("x"));
        std::thread::sleep(Duration::from_millis(15));
        assert!(sampler.admit("x"));
    }

    #[test]
    fn test_default_policy_counts() {
        let sampler = Sampler::new(SamplingPolicy::default());
        let passed = (0..250).filter(|_| sampler.admit("hot loop")).count();
        // 100 initial + record 200 (100th past the initial run).
        assert_eq!(passed, 101);
    }

    #[test]
    fn test_state_stays_bounded_across_distinct_messages() {
        let sampler = Sampler::new(SamplingPolicy::default());
        for i in 0..10_000 {
            sampler.admit(&format!("request {i} completed"));
        }
        // The pool never grows: no per-message entries, no retained text.
        assert_eq!(sampler.slots.len(), SLOT_COUNT);
    }
}
