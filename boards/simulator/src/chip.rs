use pca9555::{Port, Register};

/// Register contents at power-on (datasheet table 5)
const POWER_ON: [u8; 8] = [0x00, 0x00, 0xff, 0xff, 0x00, 0x00, 0xff, 0xff];

/// Behavioural model of one PCA9555
///
/// Pin levels default to high (pull-ups). Pins configured as outputs take
/// the level of the output register. With loopback wiring every pin reads
/// back the output register, whatever its direction.
#[derive(Debug, Clone)]
pub struct SimulatedChip {
    registers: [u8; 8],
    pins: [u8; 2],
    loopback: bool,
    /// Input value as of the last read of each input register
    latched: [u8; 2],
    pointer: u8,
}

impl Default for SimulatedChip {
    fn default() -> Self {
        Self::new()
    }
}

impl SimulatedChip {
    pub fn new() -> Self {
        let mut chip = Self {
            registers: POWER_ON,
            pins: [0xff; 2],
            loopback: false,
            latched: [0; 2],
            pointer: 0,
        };
        chip.latched = [chip.input(Port::Port0), chip.input(Port::Port1)];
        chip
    }

    /// Chip whose pins are wired back to its own outputs
    pub fn loopback() -> Self {
        let mut chip = Self::new();
        chip.loopback = true;
        chip.latched = [chip.input(Port::Port0), chip.input(Port::Port1)];
        chip
    }

    /// Raw register contents, no side effect
    pub fn register(&self, register: Register) -> u8 {
        match register {
            Register::Input0 => self.input(Port::Port0),
            Register::Input1 => self.input(Port::Port1),
            _ => self.registers[register as usize],
        }
    }

    /// Drive the external level of the pins of a port
    pub fn set_pins(&mut self, port: Port, levels: u8) {
        self.pins[port as usize] = levels;
    }

    /// Current value of the input register of `port`
    pub fn input(&self, port: Port) -> u8 {
        let index = port as usize;
        let output = self.registers[Register::output(port) as usize];
        let direction = self.registers[Register::direction(port) as usize];
        let polarity = self.registers[Register::polarity_inversion(port) as usize];
        let levels = if self.loopback {
            output
        } else {
            (self.pins[index] & direction) | (output & !direction)
        };
        levels ^ polarity
    }

    /// State of the open-drain INT output (true when asserted)
    ///
    /// Asserted while an input pin differs from the value last read from
    /// its input register.
    pub fn interrupt(&self) -> bool {
        [Port::Port0, Port::Port1].into_iter().any(|port| {
            let direction = self.registers[Register::direction(port) as usize];
            (self.input(port) ^ self.latched[port as usize]) & direction != 0
        })
    }

    /// Command byte of a write transfer
    pub(crate) fn select(&mut self, pointer: u8) {
        self.pointer = pointer & 0x07;
    }

    /// Data byte of a write transfer, the pointer toggles within the pair
    pub(crate) fn write_next(&mut self, value: u8) {
        if let Ok(register) = Register::try_from(self.pointer) {
            if register.is_read_only() {
                log::trace!("Write to {register:?} ignored");
            } else {
                self.registers[register as usize] = value;
            }
        }
        self.pointer ^= 1;
    }

    /// Data byte of a read transfer, the pointer toggles within the pair
    pub(crate) fn read_next(&mut self) -> u8 {
        let value = match Register::try_from(self.pointer) {
            Ok(register) => {
                if register.is_read_only() {
                    self.latched[register.port() as usize] = self.input(register.port());
                }
                self.register(register)
            }
            Err(_) => 0xff,
        };
        self.pointer ^= 1;
        value
    }
}
