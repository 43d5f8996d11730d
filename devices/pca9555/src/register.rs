use embedded_hal::digital::PinState;

use crate::{InvalidDevice, InvalidRegister};

/// Base bus address of the PCA9555, as sent on the wire (R/W flag cleared)
pub const DEVICE_ADDRESS: u8 = 0x40;

/// Device select, set by the A2..A0 pins of the chip
///
/// The least significant bit is A0.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[repr(u8)]
pub enum Device {
    Dev000 = 0b000,
    Dev001 = 0b001,
    Dev010 = 0b010,
    Dev011 = 0b011,
    Dev100 = 0b100,
    Dev101 = 0b101,
    Dev110 = 0b110,
    Dev111 = 0b111,
}

impl Device {
    pub const ALL: [Device; 8] = [
        Self::Dev000,
        Self::Dev001,
        Self::Dev010,
        Self::Dev011,
        Self::Dev100,
        Self::Dev101,
        Self::Dev110,
        Self::Dev111,
    ];

    /// Build the device select from the level of the address pins
    pub fn from_pins(a2: PinState, a1: PinState, a0: PinState) -> Self {
        let bit = |state: PinState| match state {
            PinState::Low => 0,
            PinState::High => 1,
        };
        Self::ALL[((bit(a2) << 2) | (bit(a1) << 1) | bit(a0)) as usize]
    }

    /// Address byte for the given transfer direction
    ///
    /// Computed as `DEVICE_ADDRESS + device + flag`, the device select is
    /// not shifted.
    pub const fn address(self, rw: RwBit) -> u8 {
        DEVICE_ADDRESS + self as u8 + rw as u8
    }
}

impl From<Device> for u8 {
    fn from(device: Device) -> u8 {
        device as u8
    }
}

impl TryFrom<u8> for Device {
    type Error = InvalidDevice;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        Self::ALL
            .get(value as usize)
            .copied()
            .ok_or(InvalidDevice(value))
    }
}

/// One of the two 8-pin ports
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[repr(u8)]
pub enum Port {
    Port0 = 0,
    Port1 = 1,
}

/// R/W flag of the address byte
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(u8)]
pub enum RwBit {
    Write = 0,
    Read = 1,
}

/// PCA9555 register indices
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[repr(u8)]
pub enum Register {
    /// Input port 0 - pin levels after polarity inversion, read only
    Input0 = 0,
    /// Input port 1 - pin levels after polarity inversion, read only
    Input1 = 1,
    /// Output port 0 - 1 drives the pin high
    Output0 = 2,
    /// Output port 1 - 1 drives the pin high
    Output1 = 3,
    /// Polarity inversion port 0 - 1 inverts the input sense
    PolarityInversion0 = 4,
    /// Polarity inversion port 1 - 1 inverts the input sense
    PolarityInversion1 = 5,
    /// Configuration port 0 - 1 is input, 0 is output
    Direction0 = 6,
    /// Configuration port 1 - 1 is input, 0 is output
    Direction1 = 7,
}

impl Register {
    pub const ALL: [Register; 8] = [
        Self::Input0,
        Self::Input1,
        Self::Output0,
        Self::Output1,
        Self::PolarityInversion0,
        Self::PolarityInversion1,
        Self::Direction0,
        Self::Direction1,
    ];

    pub const fn input(port: Port) -> Self {
        match port {
            Port::Port0 => Self::Input0,
            Port::Port1 => Self::Input1,
        }
    }

    pub const fn output(port: Port) -> Self {
        match port {
            Port::Port0 => Self::Output0,
            Port::Port1 => Self::Output1,
        }
    }

    pub const fn polarity_inversion(port: Port) -> Self {
        match port {
            Port::Port0 => Self::PolarityInversion0,
            Port::Port1 => Self::PolarityInversion1,
        }
    }

    pub const fn direction(port: Port) -> Self {
        match port {
            Port::Port0 => Self::Direction0,
            Port::Port1 => Self::Direction1,
        }
    }

    /// Port covered by this register
    pub const fn port(self) -> Port {
        if self as u8 & 1 == 0 {
            Port::Port0
        } else {
            Port::Port1
        }
    }

    /// Input registers ignore writes
    pub const fn is_read_only(self) -> bool {
        matches!(self, Self::Input0 | Self::Input1)
    }
}

impl From<Register> for u8 {
    fn from(register: Register) -> u8 {
        register as u8
    }
}

impl TryFrom<u8> for Register {
    type Error = InvalidRegister;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        Self::ALL
            .get(value as usize)
            .copied()
            .ok_or(InvalidRegister(value))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn register_indices_match_datasheet() {
        for (index, register) in Register::ALL.iter().enumerate() {
            assert_eq!(u8::from(*register), index as u8);
        }
    }

    #[test]
    fn each_register_belongs_to_one_port() {
        for port in [Port::Port0, Port::Port1] {
            assert_eq!(Register::input(port).port(), port);
            assert_eq!(Register::output(port).port(), port);
            assert_eq!(Register::polarity_inversion(port).port(), port);
            assert_eq!(Register::direction(port).port(), port);
        }
    }

    #[test]
    fn only_inputs_are_read_only() {
        let read_only: usize = Register::ALL.iter().filter(|r| r.is_read_only()).count();
        assert_eq!(read_only, 2);
        assert!(Register::Input0.is_read_only());
        assert!(Register::Input1.is_read_only());
    }

    #[test]
    fn address_adds_device_and_flag() {
        assert_eq!(Device::Dev000.address(RwBit::Write), 0x40);
        assert_eq!(Device::Dev000.address(RwBit::Read), 0x41);
        assert_eq!(Device::Dev011.address(RwBit::Write), 0x43);
        assert_eq!(Device::Dev111.address(RwBit::Read), 0x48);
    }

    #[test]
    fn device_from_pins() {
        use PinState::{High, Low};
        assert_eq!(Device::from_pins(Low, Low, Low), Device::Dev000);
        assert_eq!(Device::from_pins(Low, High, High), Device::Dev011);
        assert_eq!(Device::from_pins(High, Low, High), Device::Dev101);
        assert_eq!(Device::from_pins(High, High, High), Device::Dev111);
    }

    #[test]
    fn device_out_of_range() {
        assert_eq!(Device::try_from(5u8), Ok(Device::Dev101));
        assert_eq!(Device::try_from(8u8), Err(InvalidDevice(8)));
    }

    #[test]
    fn register_out_of_range() {
        assert_eq!(Register::try_from(7u8), Ok(Register::Direction1));
        assert_eq!(Register::try_from(255u8), Err(InvalidRegister(255)));
    }
}
