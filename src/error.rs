/// Error type for encoding and decoding request and response frames
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FrameError {
    EncodeBufferTooSmall {
        expected: usize,
        found: usize,
    },
    DecodeBufferTooSmall {
        expected_at_least: usize,
        found: usize,
    },
    MarkerMismatch {
        expected: [u8; 2],
        found: [u8; 2],
    },
    CrcMismatch {
        calculated: u16,
        found: u16,
    },
    InvalidAck(u8),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ResponseError {
    IndexOutOfRange { index: usize, len: usize },
}

/// Failures surfaced by `Controller::poll`. Protocol errors never show up
/// here, they are answered on the wire instead.
#[derive(Debug)]
pub enum ControllerError<WriteError> {
    Frame(FrameError),
    Write(WriteError),
}

impl<E> From<FrameError> for ControllerError<E> {
    fn from(value: FrameError) -> Self {
        ControllerError::Frame(value)
    }
}
