use embedded_hal_nb::serial::{Error, Write};

/// Byte sink over a non-blocking serial writer.
///
/// Responses are a handful of bytes, so each one is pushed out by spinning on
/// `WouldBlock` until the UART takes it.
#[derive(Debug)]
pub struct SerialSink<Tx: Write> {
    tx: Tx,
}

impl<Tx: Write> SerialSink<Tx> {
    pub fn new(tx: Tx) -> SerialSink<Tx> {
        SerialSink { tx }
    }

    pub fn release(self) -> Tx {
        self.tx
    }
}

#[derive(Debug)]
pub struct ErrorShim<T: Error>(pub T);

impl<T: Error> embedded_io::Error for ErrorShim<T> {
    fn kind(&self) -> embedded_io::ErrorKind {
        use embedded_hal_nb::serial::ErrorKind::*;
        match self.0.kind() {
            Overrun => embedded_io::ErrorKind::OutOfMemory,
            FrameFormat => embedded_io::ErrorKind::InvalidData,
            Noise => embedded_io::ErrorKind::Other,
            Parity => embedded_io::ErrorKind::InvalidData,
            _ => embedded_io::ErrorKind::Other,
        }
    }
}

impl<T: Error> From<T> for ErrorShim<T> {
    fn from(value: T) -> Self {
        ErrorShim(value)
    }
}

impl<Tx: Write> embedded_io::ErrorType for SerialSink<Tx> {
    type Error = ErrorShim<Tx::Error>;
}

impl<Tx: Write> embedded_io::Write for SerialSink<Tx> {
    fn write(&mut self, buf: &[u8]) -> Result<usize, Self::Error> {
        for b in buf {
            nb::block!(self.tx.write(*b))?;
        }
        Ok(buf.len())
    }

    fn flush(&mut self) -> Result<(), Self::Error> {
        nb::block!(self.tx.flush())?;
        Ok(())
    }
}
