use std::thread::{self, JoinHandle};
use std::time::Duration;

use log::LevelFilter;
use pca9555::{Device, InterruptFlag, Pca9555, Port};
use simple_logger::SimpleLogger;

mod bus;
mod chip;
mod led;

pub use bus::{BusEvent, SimulatedBus};
pub use chip::SimulatedChip;
pub use led::FakeLed;

/// INT line of the expander, raised by the simulated bus
static EXPANDER_INTERRUPT: InterruptFlag = InterruptFlag::new();

pub type Expander = Pca9555<SimulatedBus>;

/// Simulated demo board: one PCA9555 at `Dev000`, its INT line, an LED
pub struct SimulatorBoard {
    pub expander: Option<Expander>,
    pub led: Option<FakeLed>,
    /// Handle on the bus, to drive the chip pins
    pub bus: SimulatedBus,
}

impl SimulatorBoard {
    pub fn init() -> Self {
        init_logging();

        let bus = SimulatedBus::new();
        bus.attach(Device::Dev000, SimulatedChip::new());
        bus.connect_interrupt(&EXPANDER_INTERRUPT);

        Self {
            expander: Some(Pca9555::new(bus.clone())),
            led: Some(FakeLed::default()),
            bus,
        }
    }

    /// Flag raised on each INT assertion
    pub fn interrupt(&self) -> &'static InterruptFlag {
        &EXPANDER_INTERRUPT
    }

    /// Press each button of `port` in turn, then release it
    ///
    /// Buttons pull their pin low.
    pub fn spawn_button_presses(
        &self,
        device: Device,
        port: Port,
        period: Duration,
    ) -> JoinHandle<()> {
        let bus = self.bus.clone();
        thread::spawn(move || {
            log::info!("Start button thread");
            for button in (0..8).cycle() {
                thread::sleep(period);
                log::debug!("Press button {button}");
                bus.set_pins(device, port, !(1 << button));
                thread::sleep(period);
                bus.set_pins(device, port, 0xff);
            }
        })
    }
}

pub fn init_logging() {
    // Level can be overridden with RUST_LOG
    if SimpleLogger::new().with_level(LevelFilter::Info).env().init().is_err() {
        log::debug!("Logger already initialized");
    }
}
