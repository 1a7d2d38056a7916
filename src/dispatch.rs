use log::{debug, warn};

use crate::{
    config::Config,
    frame::{Request, Response},
    message::{Ack, Command, Status},
    pin::{Level, WatchdogPin},
};

/// Turns a completed request into a pin action and a reply.
///
/// Success is only reported after the pin has been read back at the level
/// that was written.
#[derive(Debug, Clone, Copy)]
pub struct Dispatcher {
    enable_level: Level,
}

impl Dispatcher {
    pub fn new(config: &Config) -> Dispatcher {
        Dispatcher {
            enable_level: config.enable_level,
        }
    }

    pub fn enable_level(&self) -> Level {
        self.enable_level
    }

    pub fn disable_level(&self) -> Level {
        !self.enable_level
    }

    pub fn dispatch<P: WatchdogPin, const N: usize>(
        &self,
        pin: &mut P,
        request: &Request,
    ) -> Response<N> {
        if !request.crc_is_valid() {
            warn!(
                "crc mismatch: calculated {:#06x}, found {:#06x}",
                Request::checksum(request.command),
                request.crc
            );
            return Response::new(Ack::NotAcknowledged, Status::InvalidCrc);
        }

        let command = request.command();
        debug!("dispatching {:?}", command);
        match command {
            Command::Disable => self.write_verified(pin, self.disable_level(), Status::Disabled),
            Command::Enable => self.write_verified(pin, self.enable_level(), Status::Enabled),
            Command::GetConfiguration => match pin.level() {
                Ok(level) => Response::new(Ack::Acknowledged, self.status_of(level)),
                Err(e) => {
                    warn!("pin read failed: {:?}", e);
                    Response::new(Ack::NotAcknowledged, Status::PinWriteError)
                }
            },
            Command::Unrecognized => {
                warn!("unrecognized command {:#04x}", request.command);
                Response::new(Ack::NotAcknowledged, Status::InvalidCommand)
            }
        }
    }

    fn status_of(&self, level: Level) -> Status {
        if level == self.enable_level() {
            Status::Enabled
        } else {
            Status::Disabled
        }
    }

    fn write_verified<P: WatchdogPin, const N: usize>(
        &self,
        pin: &mut P,
        level: Level,
        confirmed: Status,
    ) -> Response<N> {
        if let Err(e) = pin.set_level(level) {
            warn!("pin write failed: {:?}", e);
            return Response::new(Ack::NotAcknowledged, Status::PinWriteError);
        }
        match pin.level() {
            Ok(read) if read == level => Response::new(Ack::Acknowledged, confirmed),
            Ok(read) => {
                warn!("pin read back {:?}, wrote {:?}", read, level);
                Response::new(Ack::NotAcknowledged, Status::PinWriteError)
            }
            Err(e) => {
                warn!("pin read back failed: {:?}", e);
                Response::new(Ack::NotAcknowledged, Status::PinWriteError)
            }
        }
    }
}
