use bilge::prelude::*;

/// Request start markers, `WC`.
pub const REQUEST_MARKERS: [u8; 2] = [b'W', b'C'];
/// Response start markers, `WR`.
pub const RESPONSE_MARKERS: [u8; 2] = [b'W', b'R'];

/// Commands a client can send. Any other byte decodes to `Unrecognized`.
#[bitsize(8)]
#[derive(FromBits, Debug, Clone, Copy, PartialEq, Eq)]
pub enum Command {
    Disable = 0x00,
    Enable = 0x01,
    GetConfiguration = 0x02,
    #[fallback]
    Unrecognized,
}

/// Watchdog state and error codes. Values are single bits but only one is
/// ever reported per status slot.
#[bitsize(8)]
#[derive(FromBits, Debug, Clone, Copy, PartialEq, Eq)]
pub enum Status {
    Disabled = 0x00,
    Enabled = 0x01,
    PinWriteError = 0x02,
    InvalidCommand = 0x04,
    InvalidCrc = 0x08,
    TimeoutError = 0x10,
    #[fallback]
    Reserved = 0x80,
}

/// ASCII ACK / NAK.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(u8)]
pub enum Ack {
    Acknowledged = 0x06,
    NotAcknowledged = 0x15,
}

impl Ack {
    pub fn value(&self) -> u8 {
        *self as u8
    }
}

impl TryFrom<u8> for Ack {
    type Error = u8;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        match value {
            x if x == Ack::Acknowledged as u8 => Ok(Ack::Acknowledged),
            x if x == Ack::NotAcknowledged as u8 => Ok(Ack::NotAcknowledged),
            x => Err(x),
        }
    }
}

impl Status {
    pub fn value(&self) -> u8 {
        u8::from(*self)
    }

    pub fn is_error(&self) -> bool {
        !matches!(self, Status::Disabled | Status::Enabled)
    }
}
