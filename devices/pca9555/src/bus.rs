/// Blocking two-wire bus master
///
/// Each method is one bus primitive. Addresses are the full address byte
/// as sent on the wire: 7-bit address shifted left, R/W flag in bit 0.
///
/// Transports that never fail use [`core::convert::Infallible`] as their
/// error type.
pub trait I2cMaster {
    type Error: core::fmt::Debug;

    /// Prepare the bus for use (idle lines, pull-ups, bit rate)
    fn init(&mut self) -> Result<(), Self::Error>;

    /// Issue a start condition and send `address`, repeating until the
    /// addressed device acknowledges
    ///
    /// There is no timeout: an absent device blocks the caller forever.
    fn start_wait(&mut self, address: u8) -> Result<(), Self::Error>;

    /// Send one byte
    fn write(&mut self, byte: u8) -> Result<(), Self::Error>;

    /// Read one byte and answer with a NACK, ending the transfer
    fn read_nak(&mut self) -> Result<u8, Self::Error>;

    /// Issue a repeated start and send `address`
    fn rep_start(&mut self, address: u8) -> Result<(), Self::Error>;

    /// Issue a stop condition, releasing the bus
    fn stop(&mut self) -> Result<(), Self::Error>;
}

impl<T: I2cMaster + ?Sized> I2cMaster for &mut T {
    type Error = T::Error;

    fn init(&mut self) -> Result<(), Self::Error> {
        T::init(self)
    }

    fn start_wait(&mut self, address: u8) -> Result<(), Self::Error> {
        T::start_wait(self, address)
    }

    fn write(&mut self, byte: u8) -> Result<(), Self::Error> {
        T::write(self, byte)
    }

    fn read_nak(&mut self) -> Result<u8, Self::Error> {
        T::read_nak(self)
    }

    fn rep_start(&mut self, address: u8) -> Result<(), Self::Error> {
        T::rep_start(self, address)
    }

    fn stop(&mut self) -> Result<(), Self::Error> {
        T::stop(self)
    }
}
