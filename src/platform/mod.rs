//! Platform abstraction layer
//!
//! Handles browser/native differences for:
//! - Time (seconds on a host clock, fed into `tick`)
//! - Seeding the obstacle gap RNG

/// Wall clock in seconds
///
/// Native: monotonic time since the clock was created.
/// Web: `Date.now()` in seconds.
#[derive(Debug, Clone)]
pub struct Clock {
    #[cfg(not(target_arch = "wasm32"))]
    origin: std::time::Instant,
}

impl Clock {
    pub fn new() -> Self {
        Self {
            #[cfg(not(target_arch = "wasm32"))]
            origin: std::time::Instant::now(),
        }
    }

    #[cfg(not(target_arch = "wasm32"))]
    pub fn now(&self) -> f64 {
        self.origin.elapsed().as_secs_f64()
    }

    #[cfg(target_arch = "wasm32")]
    pub fn now(&self) -> f64 {
        js_sys::Date::now() / 1000.0
    }
}

impl Default for Clock {
    fn default() -> Self {
        Self::new()
    }
}

/// Fresh seed for a run's gap RNG
pub fn default_seed() -> u64 {
    rand::random()
}

#[cfg(all(test, not(target_arch = "wasm32")))]
mod tests {
    use super::*;

    #[test]
    fn test_clock_is_monotonic() {
        let clock = Clock::new();
        let a = clock.now();
        let b = clock.now();
        assert!(a >= 0.0);
        assert!(b >= a);
    }
}
