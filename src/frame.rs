use crate::{
    Bytes, Decode, Encode,
    crc16,
    error::{FrameError, ResponseError},
    message::{Ack, Command, REQUEST_MARKERS, RESPONSE_MARKERS, Status},
};

/// Markers: 2, Command: 1, CRC: 2
pub const REQUEST_LEN: usize = REQUEST_MARKERS.len() + 1 + 2;
/// Largest status sequence a response can carry
pub const MAX_STATUS_LEN: usize = 32;
/// Markers: 2, Ack: 1, Status: MAX_STATUS_LEN, CRC: 2
pub const MAX_RESPONSE_LEN: usize = RESPONSE_MARKERS.len() + 1 + MAX_STATUS_LEN + 2;

/// Input frame `[W][C][CMD][CRC_HI][CRC_LO]`.
///
/// The command byte is kept raw so that an unknown command still reaches
/// CRC validation and dispatch.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Request {
    pub command: u8,
    pub crc: u16,
}

impl Request {
    /// Build a request with a correct checksum.
    pub fn new(command: Command) -> Request {
        Request::from_byte(u8::from(command))
    }

    pub fn from_byte(command: u8) -> Request {
        Request {
            command,
            crc: Request::checksum(command),
        }
    }

    /// Checksum over the markers and the command byte.
    pub fn checksum(command: u8) -> u16 {
        let mut d = crc16::digest();
        d.update(&REQUEST_MARKERS);
        d.update(&[command]);
        d.finalize()
    }

    pub fn command(&self) -> Command {
        Command::from(self.command)
    }

    pub fn crc_is_valid(&self) -> bool {
        Request::checksum(self.command) == self.crc
    }
}

impl Encode for Request {
    type Error = FrameError;

    fn encode(&self, buffer: &mut [u8]) -> Result<usize, Self::Error> {
        if buffer.len() < REQUEST_LEN {
            return Err(FrameError::EncodeBufferTooSmall {
                expected: REQUEST_LEN,
                found: buffer.len(),
            });
        }
        buffer[0..2].copy_from_slice(&REQUEST_MARKERS);
        buffer[2] = self.command;
        buffer[3..5].copy_from_slice(&crc16::to_wire(self.crc));
        Ok(REQUEST_LEN)
    }
}

impl Bytes<[u8; REQUEST_LEN]> for Request {
    fn bytes(&self) -> [u8; REQUEST_LEN] {
        let [hi, lo] = crc16::to_wire(self.crc);
        [REQUEST_MARKERS[0], REQUEST_MARKERS[1], self.command, hi, lo]
    }
}

impl<'a> Decode<'a> for Request {
    type Error = FrameError;

    fn decode(data: &'a [u8]) -> Result<Self, Self::Error> {
        if data.len() < REQUEST_LEN {
            return Err(FrameError::DecodeBufferTooSmall {
                expected_at_least: REQUEST_LEN,
                found: data.len(),
            });
        }
        let found = [data[0], data[1]];
        if found != REQUEST_MARKERS {
            return Err(FrameError::MarkerMismatch {
                expected: REQUEST_MARKERS,
                found,
            });
        }
        let request = Request {
            command: data[2],
            crc: crc16::from_wire(data[3], data[4]),
        };
        let calculated = Request::checksum(request.command);
        if calculated != request.crc {
            return Err(FrameError::CrcMismatch {
                calculated,
                found: request.crc,
            });
        }
        Ok(request)
    }
}

/// Response frame `[W][R][ACK][STATUS; N][CRC_HI][CRC_LO]`.
///
/// The trailing CRC covers every byte before it and is computed when the
/// frame is encoded, so a `Response` only holds the ack and status fields.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Response<const N: usize = 1> {
    ack: Ack,
    status: [Status; N],
}

impl<const N: usize> Response<N> {
    const STATUS_LEN_OK: () =
        assert!(N >= 1 && N <= MAX_STATUS_LEN, "status length out of range");

    /// Total wire size of this response
    pub const SIZE: usize = RESPONSE_MARKERS.len() + 1 + N + 2;

    /// Reply with `status` in the first slot, remaining slots `Disabled`.
    pub fn new(ack: Ack, status: Status) -> Response<N> {
        let mut response = Response::default();
        response.set_ack(ack);
        response.status[0] = status;
        response
    }

    pub fn ack(&self) -> Ack {
        self.ack
    }

    /// First status slot, the one the controller reports in.
    pub fn status(&self) -> Status {
        self.status[0]
    }

    pub fn statuses(&self) -> &[Status; N] {
        &self.status
    }

    pub fn set_ack(&mut self, ack: Ack) {
        self.ack = ack;
    }

    pub fn set_status(&mut self, status: Status, index: usize) -> Result<(), ResponseError> {
        match self.status.get_mut(index) {
            Some(slot) => {
                *slot = status;
                Ok(())
            }
            None => Err(ResponseError::IndexOutOfRange { index, len: N }),
        }
    }

    pub fn size(&self) -> usize {
        Self::SIZE
    }
}

impl<const N: usize> Default for Response<N> {
    fn default() -> Self {
        let () = Self::STATUS_LEN_OK;
        Response {
            ack: Ack::NotAcknowledged,
            status: [Status::Disabled; N],
        }
    }
}

impl<const N: usize> Encode for Response<N> {
    type Error = FrameError;

    fn encode(&self, buffer: &mut [u8]) -> Result<usize, Self::Error> {
        if buffer.len() < Self::SIZE {
            return Err(FrameError::EncodeBufferTooSmall {
                expected: Self::SIZE,
                found: buffer.len(),
            });
        }
        // MARKERS: 2, ACK: 1, STATUS: N, CRC: 2
        // |-----------DIGEST-----------|
        buffer[0..2].copy_from_slice(&RESPONSE_MARKERS);
        buffer[2] = self.ack.value();
        for (slot, status) in buffer[3..3 + N].iter_mut().zip(self.status.iter()) {
            *slot = status.value();
        }
        let crc = crc16::checksum(&buffer[0..Self::SIZE - 2]);
        buffer[Self::SIZE - 2..Self::SIZE].copy_from_slice(&crc16::to_wire(crc));
        Ok(Self::SIZE)
    }
}

impl<const N: usize> Bytes<heapless::Vec<u8, MAX_RESPONSE_LEN>> for Response<N> {
    fn bytes(&self) -> heapless::Vec<u8, MAX_RESPONSE_LEN> {
        let mut buf = [0; MAX_RESPONSE_LEN];
        let mut v = heapless::Vec::<u8, MAX_RESPONSE_LEN>::new();
        // N is bounded by MAX_STATUS_LEN, so neither step can fail
        let encoded = self.encode(&mut buf);
        debug_assert!(encoded.is_ok(), "{:?}", encoded);
        let size = encoded.unwrap_or(0);
        let pushed = v.extend_from_slice(&buf[0..size]);
        debug_assert!(pushed.is_ok());
        v
    }
}

impl<'a, const N: usize> Decode<'a> for Response<N> {
    type Error = FrameError;

    fn decode(data: &'a [u8]) -> Result<Self, Self::Error> {
        if data.len() < Self::SIZE {
            return Err(FrameError::DecodeBufferTooSmall {
                expected_at_least: Self::SIZE,
                found: data.len(),
            });
        }
        let found = [data[0], data[1]];
        if found != RESPONSE_MARKERS {
            return Err(FrameError::MarkerMismatch {
                expected: RESPONSE_MARKERS,
                found,
            });
        }
        let calculated = crc16::checksum(&data[0..Self::SIZE - 2]);
        let found_crc = crc16::from_wire(data[Self::SIZE - 2], data[Self::SIZE - 1]);
        if calculated != found_crc {
            return Err(FrameError::CrcMismatch {
                calculated,
                found: found_crc,
            });
        }
        let ack = Ack::try_from(data[2]).map_err(FrameError::InvalidAck)?;
        let mut response = Response::<N>::new(ack, Status::Disabled);
        for (slot, byte) in response.status.iter_mut().zip(&data[3..3 + N]) {
            *slot = Status::from(*byte);
        }
        Ok(response)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn request_wire_bytes() {
        let r = Request::new(Command::Enable);
        assert_eq!(r.bytes(), [b'W', b'C', 0x01, 0x02, 0x47]);
        let mut buf = [0; 8];
        assert_eq!(r.encode(&mut buf), Ok(REQUEST_LEN));
        assert_eq!(&buf[0..REQUEST_LEN], &r.bytes());
    }

    #[test]
    fn request_decode() {
        let r = Request::decode(&[b'W', b'C', 0x00, 0x82, 0x46]).unwrap();
        assert_eq!(r.command(), Command::Disable);
        assert!(r.crc_is_valid());
    }

    #[test]
    fn request_decode_rejects_bad_crc() {
        let e = Request::decode(&[b'W', b'C', 0x00, 0x46, 0x82]).unwrap_err();
        assert_eq!(
            e,
            FrameError::CrcMismatch {
                calculated: 0x8246,
                found: 0x4682
            }
        );
    }

    #[test]
    fn request_decode_rejects_markers_and_short_input() {
        assert!(matches!(
            Request::decode(&[b'W', b'R', 0x00, 0x82, 0x46]),
            Err(FrameError::MarkerMismatch { .. })
        ));
        assert_eq!(
            Request::decode(&[b'W', b'C', 0x00]),
            Err(FrameError::DecodeBufferTooSmall {
                expected_at_least: 5,
                found: 3
            })
        );
    }

    #[test]
    fn unknown_command_keeps_raw_byte() {
        let r = Request::from_byte(0x07);
        assert_eq!(r.command(), Command::Unrecognized);
        assert_eq!(r.crc, 0x0243);
        assert!(r.crc_is_valid());
    }

    #[test]
    fn response_wire_bytes() {
        let r = Response::<1>::new(Ack::Acknowledged, Status::Enabled);
        assert_eq!(r.bytes().as_slice(), &[b'W', b'R', 0x06, 0x01, 0xc2, 0xe9]);

        let r = Response::<1>::new(Ack::NotAcknowledged, Status::TimeoutError);
        assert_eq!(r.bytes().as_slice(), &[b'W', b'R', 0x15, 0x10, 0x5f, 0x08]);
    }

    #[test]
    fn response_default_is_nack_disabled() {
        let r = Response::<3>::default();
        assert_eq!(r.ack(), Ack::NotAcknowledged);
        assert_eq!(r.statuses(), &[Status::Disabled; 3]);

        let mut r = Response::<1>::new(Ack::NotAcknowledged, Status::Enabled);
        r.set_ack(Ack::Acknowledged);
        assert_eq!(r.bytes().as_slice(), &[b'W', b'R', 0x06, 0x01, 0xc2, 0xe9]);
        assert_eq!(r.size(), 8);
    }

    #[test]
    fn response_with_two_status_slots() {
        let r = Response::<2>::new(Ack::Acknowledged, Status::Enabled);
        assert_eq!(
            r.bytes().as_slice(),
            &[b'W', b'R', 0x06, 0x01, 0x00, 0x69, 0x83]
        );
    }

    #[test]
    fn set_status_out_of_range() {
        let mut r = Response::<2>::default();
        assert_eq!(r.set_status(Status::InvalidCrc, 1), Ok(()));
        assert_eq!(r.statuses()[1], Status::InvalidCrc);
        assert_eq!(
            r.set_status(Status::InvalidCrc, 2),
            Err(ResponseError::IndexOutOfRange { index: 2, len: 2 })
        );
    }

    #[test]
    fn response_encode_buffer_too_small() {
        let r = Response::<1>::default();
        let mut buf = [0; 5];
        assert_eq!(
            r.encode(&mut buf),
            Err(FrameError::EncodeBufferTooSmall {
                expected: 6,
                found: 5
            })
        );
    }

    #[test]
    fn response_crc_covers_preceding_bytes() {
        let mut r = Response::<4>::new(Ack::NotAcknowledged, Status::PinWriteError);
        r.set_status(Status::Enabled, 3).unwrap();
        let bytes = r.bytes();
        let (body, crc) = bytes.split_at(bytes.len() - 2);
        assert_eq!(crc16::checksum(body), crc16::from_wire(crc[0], crc[1]));
        assert_eq!(Response::<4>::decode(&bytes), Ok(r));
    }

    #[test]
    fn response_decode_errors() {
        let mut bytes = Response::<1>::new(Ack::Acknowledged, Status::Disabled).bytes();
        bytes[3] = 0x01;
        assert!(matches!(
            Response::<1>::decode(&bytes),
            Err(FrameError::CrcMismatch { .. })
        ));

        let mut raw = [b'W', b'R', 0x00, 0x01, 0, 0];
        let [hi, lo] = crc16::to_wire(crc16::checksum(&raw[0..4]));
        raw[4] = hi;
        raw[5] = lo;
        assert_eq!(Response::<1>::decode(&raw), Err(FrameError::InvalidAck(0x00)));
    }
}
