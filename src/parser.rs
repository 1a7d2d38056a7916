use log::trace;

use crate::{crc16, frame::Request, message::REQUEST_MARKERS};

/// Position of the parser inside a request frame.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ParseState {
    #[default]
    WaitStart1,
    WaitStart2,
    WaitCmd,
    WaitCrcHi,
    WaitCrcLo,
}

/// Assembles one request from a byte stream, one byte per call.
///
/// Bytes before the first marker are dropped without complaint. A wrong
/// second marker aborts back to `WaitStart1`. The command and CRC bytes are
/// accepted unconditionally; whether they make sense is decided after the
/// frame completes.
#[derive(Debug, Default)]
pub struct FrameParser {
    state: ParseState,
    frame: Request,
}

impl FrameParser {
    pub fn new() -> FrameParser {
        FrameParser::default()
    }

    pub fn state(&self) -> ParseState {
        self.state
    }

    /// True when no frame is in progress.
    pub fn is_idle(&self) -> bool {
        self.state == ParseState::WaitStart1
    }

    /// Drop any partial frame.
    pub fn reset(&mut self) {
        self.state = ParseState::WaitStart1;
        self.frame = Request::default();
    }

    /// Consume one byte. Returns the request once its last byte arrives.
    pub fn push(&mut self, byte: u8) -> Option<Request> {
        let next = match self.state {
            ParseState::WaitStart1 if byte == REQUEST_MARKERS[0] => ParseState::WaitStart2,
            ParseState::WaitStart1 => ParseState::WaitStart1,
            ParseState::WaitStart2 if byte == REQUEST_MARKERS[1] => ParseState::WaitCmd,
            ParseState::WaitStart2 => {
                trace!("expected second marker, got {:#04x}", byte);
                self.reset();
                return None;
            }
            ParseState::WaitCmd => {
                self.frame.command = byte;
                ParseState::WaitCrcHi
            }
            ParseState::WaitCrcHi => {
                self.frame.crc = crc16::from_wire(byte, 0);
                ParseState::WaitCrcLo
            }
            ParseState::WaitCrcLo => {
                let hi = crc16::to_wire(self.frame.crc)[0];
                self.frame.crc = crc16::from_wire(hi, byte);
                let frame = self.frame;
                self.reset();
                trace!("frame complete {:?}", frame);
                return Some(frame);
            }
        };
        if next != self.state {
            trace!("{:?} -> {:?}", self.state, next);
        }
        self.state = next;
        None
    }
}
