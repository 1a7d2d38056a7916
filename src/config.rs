use crate::pin::Level;

/// Default receive timeout between two bytes of one frame
pub const DEFAULT_TIMEOUT_MS: u32 = 30;

/// Runtime parameters of the controller. The status length of a response is
/// a const generic on `Controller` rather than a field here.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Config {
    /// Partial frames older than this are dropped with a timeout error.
    pub timeout_ms: u32,
    /// Pin level that enables the watchdog. The opposite level disables it.
    pub enable_level: Level,
}

impl Config {
    pub const fn new() -> Config {
        Config {
            timeout_ms: DEFAULT_TIMEOUT_MS,
            enable_level: Level::Low,
        }
    }

    pub const fn with_timeout_ms(mut self, timeout_ms: u32) -> Config {
        self.timeout_ms = timeout_ms;
        self
    }

    pub const fn with_enable_level(mut self, level: Level) -> Config {
        self.enable_level = level;
        self
    }

    pub fn disable_level(&self) -> Level {
        !self.enable_level
    }
}

impl Default for Config {
    fn default() -> Self {
        Config::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults() {
        let c = Config::default();
        assert_eq!(c.timeout_ms, 30);
        assert_eq!(c.enable_level, Level::Low);
        assert_eq!(c.disable_level(), Level::High);
    }

    #[test]
    fn builder() {
        let c = Config::new().with_timeout_ms(100).with_enable_level(Level::High);
        assert_eq!(c.timeout_ms, 100);
        assert_eq!(c.disable_level(), Level::Low);
    }
}
