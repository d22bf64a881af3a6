//! Sliding-window motion trigger counter: remembers the last few
//! timestamped triggers and reports when all slots fall inside the
//! window, i.e. the device was shaken repeatedly in quick succession.

/// Number of triggers remembered at once.
const SLOTS: usize = 3;

/// Window within which triggers count as "recent" (ms).
const WINDOW_MS: u64 = 5_000;

#[derive(Debug, Clone)]
/// Fixed-slot trigger counter. Callers pass monotonic millisecond
/// timestamps; the counter holds no clock.
pub struct ShakeCounter {
    times: [u64; SLOTS],
    window_ms: u64,
}

impl Default for ShakeCounter {
    fn default() -> Self {
        Self::new()
    }
}

impl ShakeCounter {
    pub const fn new() -> Self {
        Self {
            times: [0; SLOTS],
            window_ms: WINDOW_MS,
        }
    }

    /// Record a trigger. Returns true when every slot already holds a
    /// trigger within the window (the saturation case) and resets so
    /// the next trigger starts a fresh count. Otherwise the oldest
    /// expired slot is overwritten and false is returned.
    pub fn add_and_check(&mut self, now_ms: u64) -> bool {
        for slot in self.times.iter_mut() {
            if now_ms > *slot + self.window_ms {
                *slot = now_ms;
                return false;
            }
        }
        // No expired slot: all remembered triggers are recent.
        self.reset();
        true
    }

    /// Forget all remembered triggers.
    pub fn reset(&mut self) {
        self.times = [0; SLOTS];
    }

    /// Number of remembered triggers still inside the window.
    pub fn count(&self, now_ms: u64) -> usize {
        self.times
            .iter()
            .filter(|time| now_ms < **time + self.window_ms)
            .count()
    }

    /// Timestamp of the most recent remembered trigger.
    pub fn latest(&self) -> u64 {
        let mut newest = 0;
        for time in self.times.iter() {
            if *time > newest {
                newest = *time;
            }
        }
        newest
    }
}
