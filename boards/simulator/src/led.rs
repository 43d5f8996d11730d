use std::convert::Infallible;

use embedded_hal::digital::{ErrorType, OutputPin, StatefulOutputPin};

/// LED of the simulated board, logs every change
#[derive(Debug, Default)]
pub struct FakeLed {
    lit: bool,
    /// Number of off to on transitions
    flashes: u32,
}

impl FakeLed {
    pub fn is_lit(&self) -> bool {
        self.lit
    }

    pub fn flashes(&self) -> u32 {
        self.flashes
    }

    fn set(&mut self, lit: bool) {
        if lit != self.lit {
            log::info!("LED {}", if lit { "on" } else { "off" });
            if lit {
                self.flashes += 1;
            }
        }
        self.lit = lit;
    }
}

impl ErrorType for FakeLed {
    type Error = Infallible;
}

impl OutputPin for FakeLed {
    fn set_low(&mut self) -> Result<(), Self::Error> {
        self.set(false);
        Ok(())
    }

    fn set_high(&mut self) -> Result<(), Self::Error> {
        self.set(true);
        Ok(())
    }
}

impl StatefulOutputPin for FakeLed {
    fn is_set_high(&mut self) -> Result<bool, Self::Error> {
        Ok(self.lit)
    }

    fn is_set_low(&mut self) -> Result<bool, Self::Error> {
        Ok(!self.lit)
    }
}
