#![no_std]

pub mod config;
pub mod controller;
pub mod crc16;
pub mod dispatch;
pub mod error;
pub mod frame;
pub mod message;
pub mod parser;
pub mod pin;
pub mod serial;
pub mod timeout;

pub trait Encode {
    type Error;

    fn encode(&self, buffer: &mut [u8]) -> Result<usize, Self::Error>;
}

pub trait Decode<'a> where Self: Sized {
    type Error;

    fn decode(data: &'a [u8]) -> Result<Self, Self::Error>;
}

pub trait Bytes<T>
where
    T: AsRef<[u8]>,
{
    fn bytes(&self) -> T;
}

pub use config::Config;
pub use controller::{Clock, Controller};
pub use dispatch::Dispatcher;
pub use error::{ControllerError, FrameError, ResponseError};
pub use frame::{Request, Response, MAX_RESPONSE_LEN, MAX_STATUS_LEN, REQUEST_LEN};
pub use message::{Ack, Command, Status};
pub use parser::{FrameParser, ParseState};
pub use pin::{HalPin, Level, WatchdogPin};
pub use serial::{ErrorShim, SerialSink};
pub use timeout::TimeoutSupervisor;
