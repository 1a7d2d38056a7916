/// Watches the gap since the last received byte.
///
/// Millisecond timestamps come from a wrapping counter, so elapsed time is a
/// wrapping difference and survives rollover.
#[derive(Debug)]
pub struct TimeoutSupervisor {
    threshold_ms: u32,
    last_activity_ms: u32,
}

impl TimeoutSupervisor {
    pub fn new(threshold_ms: u32) -> TimeoutSupervisor {
        TimeoutSupervisor {
            threshold_ms,
            last_activity_ms: 0,
        }
    }

    pub fn threshold_ms(&self) -> u32 {
        self.threshold_ms
    }

    /// Record that a byte arrived at `now_ms`.
    pub fn touch(&mut self, now_ms: u32) {
        self.last_activity_ms = now_ms;
    }

    pub fn elapsed(&self, now_ms: u32) -> u32 {
        now_ms.wrapping_sub(self.last_activity_ms)
    }

    /// A frame in progress has gone stale. Never fires while idle.
    pub fn expired(&self, now_ms: u32, idle: bool) -> bool {
        !idle && self.elapsed(now_ms) > self.threshold_ms
    }
}
