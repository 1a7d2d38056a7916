use embedded_hal::digital::{ErrorType, InputPin, OutputPin, PinState};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Level {
    Low,
    High,
}

impl core::ops::Not for Level {
    type Output = Level;

    fn not(self) -> Level {
        match self {
            Level::Low => Level::High,
            Level::High => Level::Low,
        }
    }
}

impl From<Level> for PinState {
    fn from(value: Level) -> Self {
        match value {
            Level::Low => PinState::Low,
            Level::High => PinState::High,
        }
    }
}

/// The one pin that enables or disables the external watchdog.
///
/// `level` must report what the pin actually is, not what was last written,
/// otherwise write-then-verify proves nothing.
pub trait WatchdogPin {
    type Error: core::fmt::Debug;

    fn set_level(&mut self, level: Level) -> Result<(), Self::Error>;

    fn level(&mut self) -> Result<Level, Self::Error>;
}

/// Adapts any embedded-hal pin that can be both driven and sensed.
#[derive(Debug)]
pub struct HalPin<P> {
    pin: P,
}

impl<P> HalPin<P>
where
    P: OutputPin + InputPin,
{
    pub fn new(pin: P) -> HalPin<P> {
        HalPin { pin }
    }

    pub fn release(self) -> P {
        self.pin
    }
}

impl<P> WatchdogPin for HalPin<P>
where
    P: OutputPin + InputPin,
{
    type Error = <P as ErrorType>::Error;

    fn set_level(&mut self, level: Level) -> Result<(), Self::Error> {
        self.pin.set_state(level.into())
    }

    fn level(&mut self) -> Result<Level, Self::Error> {
        if self.pin.is_high()? {
            Ok(Level::High)
        } else {
            Ok(Level::Low)
        }
    }
}
