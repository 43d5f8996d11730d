#![no_std]

//! PCA9555 16-bit I2C GPIO expander driver
//!
//! The PCA9555 exposes two 8-pin ports. Each port has four registers
//! (input, output, polarity inversion, direction). Up to eight chips share
//! a bus, selected by their A2..A0 address pins.
//!
//! The driver is stateless: the device select is given on every call and
//! each operation is exactly one bus transaction. The chip has no reset
//! line nor reset command, so register contents survive a reset of the
//! microcontroller.
//!
//! ```ignore
//! let mut expander = Pca9555::new(bus);
//! expander.init()?;
//! expander.set_direction(Device::Dev000, Port::Port0, 0b0000_0000)?; // outputs
//! expander.set_direction(Device::Dev000, Port::Port1, 0b1111_1111)?; // inputs
//! expander.set_output(Device::Dev000, Port::Port0, 0x55)?;
//! let value = expander.get_input(Device::Dev000, Port::Port1)?;
//! ```

use core::fmt;

pub mod bus;
pub mod hal;
pub mod interrupt;
pub mod register;

pub use bus::I2cMaster;
pub use hal::{HalBus, HalBusError};
pub use interrupt::InterruptFlag;
pub use register::{Device, Port, Register, RwBit, DEVICE_ADDRESS};

/// Raw device select outside of 0..=7
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct InvalidDevice(pub u8);

/// Raw register index outside of 0..=7
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct InvalidRegister(pub u8);

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Pca9555Error<E> {
    /// Bus transport error
    Bus(E),
    /// Invalid device select (must be 0-7)
    InvalidDevice(u8),
    /// Invalid register index (must be 0-7)
    InvalidRegister(u8),
}

impl<E> From<InvalidDevice> for Pca9555Error<E> {
    fn from(e: InvalidDevice) -> Self {
        Self::InvalidDevice(e.0)
    }
}

impl<E> From<InvalidRegister> for Pca9555Error<E> {
    fn from(e: InvalidRegister) -> Self {
        Self::InvalidRegister(e.0)
    }
}

impl<E: fmt::Debug> fmt::Display for Pca9555Error<E> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Bus(e) => write!(f, "bus error: {e:?}"),
            Self::InvalidDevice(dev) => write!(f, "invalid device select {dev}"),
            Self::InvalidRegister(reg) => write!(f, "invalid register {reg}"),
        }
    }
}

/// PCA9555 driver, over any [`I2cMaster`]
///
/// Owning the bus serializes transactions. To share it with an interrupt
/// handler or another thread, wrap the transport in a mutex and hand out
/// `&mut` access per transaction.
#[derive(Debug)]
pub struct Pca9555<B> {
    bus: B,
}

impl<B, E> Pca9555<B>
where
    B: I2cMaster<Error = E>,
{
    pub fn new(bus: B) -> Self {
        Self { bus }
    }

    /// Destroy the driver, returning the bus
    pub fn release(self) -> B {
        self.bus
    }

    /// Prepare the bus, call once before any other operation
    pub fn init(&mut self) -> Result<(), Pca9555Error<E>> {
        log::debug!("PCA9555 init");
        self.bus.init().map_err(Pca9555Error::Bus)
    }

    /// Write one register
    ///
    /// Blocks until the device acknowledges its address: an absent device
    /// never returns unless the transport has a retry limit.
    pub fn write(
        &mut self,
        device: Device,
        register: Register,
        value: u8,
    ) -> Result<(), Pca9555Error<E>> {
        log::debug!("PCA9555 {device:?} write {register:?} = 0x{value:02x}");
        self.bus.start_wait(device.address(RwBit::Write)).map_err(Pca9555Error::Bus)?;
        self.bus.write(register.into()).map_err(Pca9555Error::Bus)?;
        self.bus.write(value).map_err(Pca9555Error::Bus)?;
        self.bus.stop().map_err(Pca9555Error::Bus)
    }

    /// Read one register
    ///
    /// Same blocking behaviour as [`Self::write`]. Exactly one byte is read,
    /// the register auto-increment of the chip is never used.
    pub fn read(&mut self, device: Device, register: Register) -> Result<u8, Pca9555Error<E>> {
        self.bus.start_wait(device.address(RwBit::Write)).map_err(Pca9555Error::Bus)?;
        self.bus.write(register.into()).map_err(Pca9555Error::Bus)?;
        self.bus.rep_start(device.address(RwBit::Read)).map_err(Pca9555Error::Bus)?;
        let value = self.bus.read_nak().map_err(Pca9555Error::Bus)?;
        self.bus.stop().map_err(Pca9555Error::Bus)?;
        log::debug!("PCA9555 {device:?} read {register:?} = 0x{value:02x}");
        Ok(value)
    }

    /// Write a register from raw device select and register index
    pub fn write_raw(
        &mut self,
        device: u8,
        register: u8,
        value: u8,
    ) -> Result<(), Pca9555Error<E>> {
        let device = Device::try_from(device)?;
        let register = Register::try_from(register)?;
        self.write(device, register, value)
    }

    /// Read a register from raw device select and register index
    pub fn read_raw(&mut self, device: u8, register: u8) -> Result<u8, Pca9555Error<E>> {
        let device = Device::try_from(device)?;
        let register = Register::try_from(register)?;
        self.read(device, register)
    }

    /// Configure pins as inputs (1) or outputs (0)
    pub fn set_direction(
        &mut self,
        device: Device,
        port: Port,
        dir: u8,
    ) -> Result<(), Pca9555Error<E>> {
        self.write(device, Register::direction(port), dir)
    }

    /// Set the polarity inversion register (1 = inverted, 0 = normal)
    ///
    /// This overwrites the register, it does not toggle against the
    /// current setting. As the chip cannot be reset from the bus, a
    /// restarted microcontroller may find polarity left inverted by a
    /// previous run.
    pub fn set_polarity_inversion(
        &mut self,
        device: Device,
        port: Port,
        pol: u8,
    ) -> Result<(), Pca9555Error<E>> {
        self.write(device, Register::polarity_inversion(port), pol)
    }

    /// Set the output register (1 = drive high)
    pub fn set_output(
        &mut self,
        device: Device,
        port: Port,
        value: u8,
    ) -> Result<(), Pca9555Error<E>> {
        self.write(device, Register::output(port), value)
    }

    /// Read the input register, after polarity inversion
    pub fn get_input(&mut self, device: Device, port: Port) -> Result<u8, Pca9555Error<E>> {
        self.read(device, Register::input(port))
    }
}
