use core::fmt;

use embedded_hal::i2c::{self, ErrorKind, I2c};

use crate::bus::I2cMaster;

/// Largest write payload buffered between start and stop
const BUFFER_SIZE: usize = 8;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HalBusError<E> {
    /// I2C communication error
    I2c(E),
    /// The device did not acknowledge within the configured retry limit
    NoAcknowledge,
    /// More payload bytes than fit in one buffered transfer
    Overflow,
}

impl<E: fmt::Debug> fmt::Display for HalBusError<E> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::I2c(e) => write!(f, "I2C error: {e:?}"),
            Self::NoAcknowledge => f.write_str("device did not acknowledge"),
            Self::Overflow => f.write_str("transfer buffer overflow"),
        }
    }
}

impl<E: i2c::Error> i2c::Error for HalBusError<E> {
    fn kind(&self) -> ErrorKind {
        match self {
            Self::I2c(e) => e.kind(),
            Self::NoAcknowledge => ErrorKind::NoAcknowledge(i2c::NoAcknowledgeSource::Address),
            Self::Overflow => ErrorKind::Other,
        }
    }
}

/// [`I2cMaster`] on top of an embedded-hal blocking I2C bus
///
/// embedded-hal only exposes whole transactions, so the primitives are
/// collected between start and stop and issued as a single `write` or
/// `write_read`. `start_wait` polls the device with an empty write.
pub struct HalBus<I2C> {
    i2c: I2C,
    retry_limit: Option<u32>,
    address: u8,
    buffer: [u8; BUFFER_SIZE],
    len: usize,
    read_pending: bool,
}

impl<I2C: I2c> HalBus<I2C> {
    /// Wrap `i2c`, `start_wait` retries forever
    pub fn new(i2c: I2C) -> Self {
        Self {
            i2c,
            retry_limit: None,
            address: 0,
            buffer: [0; BUFFER_SIZE],
            len: 0,
            read_pending: false,
        }
    }

    /// Wrap `i2c`, `start_wait` gives up after `retries` unacknowledged polls
    ///
    /// The device is always polled at least once, a limit of 0 acts as 1.
    /// This changes the blocking behaviour of the driver: an absent device
    /// yields [`HalBusError::NoAcknowledge`] instead of a hang.
    pub fn with_retry_limit(i2c: I2C, retries: u32) -> Self {
        Self {
            retry_limit: Some(retries.max(1)),
            ..Self::new(i2c)
        }
    }

    /// Destroy the adapter, returning the underlying bus
    pub fn release(self) -> I2C {
        self.i2c
    }

    fn target(&self) -> u8 {
        self.address >> 1
    }

    fn reset(&mut self) {
        self.len = 0;
        self.read_pending = false;
    }
}

impl<I2C: I2c> I2cMaster for HalBus<I2C> {
    type Error = HalBusError<I2C::Error>;

    fn init(&mut self) -> Result<(), Self::Error> {
        // The HAL bus is configured when it is created
        self.reset();
        Ok(())
    }

    fn start_wait(&mut self, address: u8) -> Result<(), Self::Error> {
        self.reset();
        self.address = address;
        let target = self.target();
        let mut attempts: u32 = 0;
        loop {
            match self.i2c.write(target, &[]) {
                Ok(()) => return Ok(()),
                Err(e) => match i2c::Error::kind(&e) {
                    ErrorKind::NoAcknowledge(_) => {
                        attempts = attempts.saturating_add(1);
                        if self.retry_limit.is_some_and(|limit| attempts >= limit) {
                            log::warn!("No ACK from 0x{target:02x} after {attempts} attempts");
                            return Err(HalBusError::NoAcknowledge);
                        }
                        log::trace!("No ACK from 0x{target:02x}, retrying");
                    }
                    _ => return Err(HalBusError::I2c(e)),
                },
            }
        }
    }

    fn write(&mut self, byte: u8) -> Result<(), Self::Error> {
        let slot = self.buffer.get_mut(self.len).ok_or(HalBusError::Overflow)?;
        *slot = byte;
        self.len += 1;
        Ok(())
    }

    fn read_nak(&mut self) -> Result<u8, Self::Error> {
        let target = self.target();
        let mut data = [0u8; 1];
        let result = if self.len > 0 {
            self.i2c.write_read(target, &self.buffer[..self.len], &mut data)
        } else {
            self.i2c.read(target, &mut data)
        };
        self.reset();
        result.map_err(HalBusError::I2c)?;
        Ok(data[0])
    }

    fn rep_start(&mut self, address: u8) -> Result<(), Self::Error> {
        if address >> 1 != self.target() {
            // Switching device: flush what was addressed to the previous one
            self.stop()?;
        }
        self.address = address;
        self.read_pending = true;
        Ok(())
    }

    fn stop(&mut self) -> Result<(), Self::Error> {
        let result = if self.len > 0 && !self.read_pending {
            self.i2c.write(self.target(), &self.buffer[..self.len])
        } else {
            Ok(())
        };
        self.reset();
        result.map_err(HalBusError::I2c)
    }
}
