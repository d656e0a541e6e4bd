//! Client-side call counting for Kraken's rate limits
//!
//! Kraken meters private calls with a per-account counter: every call
//! adds its cost weight, and the counter drains at a tier-dependent
//! rate. [`CallCounter`] mirrors that model on the client so requests
//! can be paced before the exchange starts rejecting them. It is an
//! optimization, not a correctness requirement - the server enforces
//! its own limits regardless.

use parking_lot::Mutex;
use std::sync::Arc;
use std::time::{Duration, Instant};

/// Shared, decaying request-cost counter
///
/// Cloning yields a handle to the same budget, so one counter can pace
/// several clients. The check-and-reserve step runs under a mutex:
/// two concurrent reservations can never both pass the capacity check.
#[derive(Debug, Clone)]
pub struct CallCounter {
    inner: Arc<Mutex<State>>,
}

#[derive(Debug)]
struct State {
    /// Maximum outstanding cost
    capacity: u32,
    /// Cost currently outstanding
    used: f64,
    /// Cost drained per second
    decay_per_sec: f64,
    last_decay: Instant,
}

impl CallCounter {
    /// Create a counter with the given capacity and decay rate
    pub fn new(capacity: u32, decay_per_sec: f64) -> Self {
        Self {
            inner: Arc::new(Mutex::new(State {
                capacity,
                used: 0.0,
                decay_per_sec,
                last_decay: Instant::now(),
            })),
        }
    }

    /// Kraken starter tier: 15 points, 0.33/sec decay
    pub fn starter() -> Self {
        Self::new(15, 0.33)
    }

    /// Kraken intermediate tier: 20 points, 0.5/sec decay
    pub fn intermediate() -> Self {
        Self::new(20, 0.5)
    }

    /// Kraken pro tier: 20 points, 1.0/sec decay
    pub fn pro() -> Self {
        Self::new(20, 1.0)
    }

    /// Atomically reserve `cost` points of budget
    ///
    /// On success the cost is added to the outstanding usage. On
    /// exhaustion returns the duration until enough budget will have
    /// drained; nothing is consumed. Zero-cost reservations always
    /// succeed.
    pub fn try_reserve(&self, cost: u32) -> Result<(), Duration> {
        let mut state = self.inner.lock();
        state.decay();

        let cost = cost as f64;
        if state.used + cost <= state.capacity as f64 {
            state.used += cost;
            Ok(())
        } else {
            let excess = state.used + cost - state.capacity as f64;
            Err(Duration::from_secs_f64(excess / state.decay_per_sec))
        }
    }

    /// Budget currently available, in whole points
    pub fn available(&self) -> u32 {
        let mut state = self.inner.lock();
        state.decay();
        (state.capacity as f64 - state.used).floor() as u32
    }

    /// The configured maximum
    pub fn capacity(&self) -> u32 {
        self.inner.lock().capacity
    }

    /// Forget all outstanding usage
    pub fn reset(&self) {
        let mut state = self.inner.lock();
        state.used = 0.0;
        state.last_decay = Instant::now();
    }
}

impl State {
    fn decay(&mut self) {
        let now = Instant::now();
        let drained = now.duration_since(self.last_decay).as_secs_f64() * self.decay_per_sec;
        self.used = (self.used - drained).max(0.0);
        self.last_decay = now;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn reserve_until_exhausted() {
        let counter = CallCounter::new(4, 0.001);
        assert!(counter.try_reserve(2).is_ok());
        assert!(counter.try_reserve(2).is_ok());
        assert!(counter.try_reserve(1).is_err());
        assert_eq!(counter.available(), 0);
    }

    #[test]
    fn zero_cost_always_passes() {
        let counter = CallCounter::new(1, 0.001);
        counter.try_reserve(1).unwrap();
        assert!(counter.try_reserve(0).is_ok());
    }

    #[test]
    fn rejection_reports_wait_time() {
        let counter = CallCounter::new(2, 1.0);
        counter.try_reserve(2).unwrap();
        let wait = counter.try_reserve(2).unwrap_err();
        // Needs 2 points drained at 1/sec.
        assert!(wait >= Duration::from_millis(1900) && wait <= Duration::from_millis(2100));
    }

    #[test]
    fn usage_decays_over_time() {
        let counter = CallCounter::new(2, 100.0);
        counter.try_reserve(2).unwrap();
        std::thread::sleep(Duration::from_millis(30));
        assert!(counter.try_reserve(2).is_ok());
    }

    #[test]
    fn clones_share_one_budget() {
        let counter = CallCounter::new(2, 0.001);
        let other = counter.clone();
        counter.try_reserve(2).unwrap();
        assert!(other.try_reserve(1).is_err());
    }

    #[test]
    fn concurrent_reservations_never_exceed_capacity() {
        let counter = CallCounter::new(10, 0.0001);
        let mut handles = Vec::new();
        for _ in 0..8 {
            let counter = counter.clone();
            handles.push(std::thread::spawn(move || {
                let mut granted = 0u32;
                for _ in 0..8 {
                    if counter.try_reserve(1).is_ok() {
                        granted += 1;
                    }
                }
                granted
            }));
        }
        let total: u32 = handles.into_iter().map(|h| h.join().unwrap()).sum();
        assert!(total <= 10, "granted {total} points from a budget of 10");
    }

    #[test]
    fn reset_restores_full_budget() {
        let counter = CallCounter::new(3, 0.001);
        counter.try_reserve(3).unwrap();
        counter.reset();
        assert_eq!(counter.available(), 3);
    }
}
