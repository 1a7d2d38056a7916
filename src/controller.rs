use embedded_hal_nb::serial::Read;
use embedded_io::Write;
use log::{trace, warn};

use crate::{
    Encode,
    config::Config,
    dispatch::Dispatcher,
    error::ControllerError,
    frame::{MAX_RESPONSE_LEN, Response},
    message::{Ack, Status},
    parser::{FrameParser, ParseState},
    pin::WatchdogPin,
    timeout::TimeoutSupervisor,
};

/// Monotonic millisecond counter. Allowed to wrap.
pub trait Clock {
    fn now_ms(&mut self) -> u32;
}

/// The poll-driven protocol endpoint.
///
/// Owns the byte source, byte sink, watchdog pin and clock together with the
/// only mutable protocol state: the parser with its partial frame and the
/// time of the last received byte. Nothing here blocks on input; call
/// [`Controller::poll`] from the main loop as often as possible.
pub struct Controller<Rx, Tx, P, C, const N: usize = 1> {
    rx: Rx,
    tx: Tx,
    pin: P,
    clock: C,
    parser: FrameParser,
    supervisor: TimeoutSupervisor,
    dispatcher: Dispatcher,
}

impl<Rx, Tx, P, C, const N: usize> Controller<Rx, Tx, P, C, N>
where
    Rx: Read,
    Tx: Write,
    P: WatchdogPin,
    C: Clock,
{
    /// Builds the controller and drives the pin to the disable level.
    pub fn new(config: Config, rx: Rx, tx: Tx, mut pin: P, clock: C) -> Self {
        let dispatcher = Dispatcher::new(&config);
        if let Err(e) = pin.set_level(dispatcher.disable_level()) {
            warn!("could not disable watchdog at startup: {:?}", e);
        }
        Controller {
            rx,
            tx,
            pin,
            clock,
            parser: FrameParser::new(),
            supervisor: TimeoutSupervisor::new(config.timeout_ms),
            dispatcher,
        }
    }

    /// One cycle of the main loop: take at most one byte and feed it to the
    /// parser, then supervise the receive timeout. Returns the response that
    /// was sent, if any.
    ///
    /// A frame completed by this poll's byte is answered and the timeout
    /// check is skipped, so there is at most one response per poll.
    pub fn poll(&mut self) -> Result<Option<Response<N>>, ControllerError<Tx::Error>> {
        let now = self.clock.now_ms();

        match self.rx.read() {
            Ok(byte) => {
                trace!("rx {:#04x} at {} ms", byte, now);
                self.supervisor.touch(now);
                if let Some(request) = self.parser.push(byte) {
                    let response = self.dispatcher.dispatch(&mut self.pin, &request);
                    self.send(&response)?;
                    return Ok(Some(response));
                }
            }
            Err(nb::Error::WouldBlock) => {}
            Err(nb::Error::Other(e)) => {
                warn!("serial read error: {:?}", e);
            }
        }

        if self.supervisor.expired(now, self.parser.is_idle()) {
            warn!(
                "frame timed out in {:?} after {} ms (limit {} ms)",
                self.parser.state(),
                self.supervisor.elapsed(now),
                self.supervisor.threshold_ms()
            );
            self.parser.reset();
            let response = Response::new(Ack::NotAcknowledged, Status::TimeoutError);
            self.send(&response)?;
            return Ok(Some(response));
        }

        Ok(None)
    }

    fn send(&mut self, response: &Response<N>) -> Result<(), ControllerError<Tx::Error>> {
        let mut buf = [0; MAX_RESPONSE_LEN];
        let size = response.encode(&mut buf)?;
        trace!("tx {:?} {:?}", response.ack(), response.status());
        self.tx
            .write_all(&buf[0..size])
            .map_err(ControllerError::Write)?;
        self.tx.flush().map_err(ControllerError::Write)
    }

    pub fn parser_state(&self) -> ParseState {
        self.parser.state()
    }

    pub fn rx_mut(&mut self) -> &mut Rx {
        &mut self.rx
    }

    pub fn tx_mut(&mut self) -> &mut Tx {
        &mut self.tx
    }

    pub fn pin_mut(&mut self) -> &mut P {
        &mut self.pin
    }

    pub fn clock_mut(&mut self) -> &mut C {
        &mut self.clock
    }

    pub fn release(self) -> (Rx, Tx, P, C) {
        (self.rx, self.tx, self.pin, self.clock)
    }
}
