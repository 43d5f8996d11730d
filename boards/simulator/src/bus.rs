use std::convert::Infallible;
use std::sync::{Arc, Mutex, MutexGuard};
use std::thread;

use pca9555::{Device, I2cMaster, InterruptFlag, Port, RwBit};

use crate::chip::SimulatedChip;

/// One bus primitive, as seen on the wire
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BusEvent {
    Start(u8),
    Write(u8),
    RepStart(u8),
    /// Byte returned to the master
    ReadNak(u8),
    Stop,
}

#[derive(Default)]
struct BusState {
    chips: [Option<SimulatedChip>; 8],
    /// Chip currently addressed and direction of the transfer
    selected: Option<(Device, RwBit)>,
    /// Next written byte is a command byte
    expect_command: bool,
    trace: Vec<BusEvent>,
    interrupt: Option<&'static InterruptFlag>,
    /// Level of the shared INT line
    int_line: bool,
}

impl BusState {
    fn chip(&mut self, device: Device) -> Option<&mut SimulatedChip> {
        self.chips[device as usize].as_mut()
    }

    /// Match an address byte against attached chips
    ///
    /// The device select is added to the base address without shifting,
    /// so an address byte is only unambiguous once the transfer direction
    /// is known.
    fn decode(&self, address: u8, rw: RwBit) -> Option<Device> {
        Device::ALL
            .into_iter()
            .find(|device| device.address(rw) == address && self.chips[*device as usize].is_some())
    }

    fn update_interrupt(&mut self) {
        let line = self.chips.iter().flatten().any(SimulatedChip::interrupt);
        if line && !self.int_line {
            log::trace!("INT asserted");
            if let Some(flag) = self.interrupt {
                flag.raise();
            }
        }
        self.int_line = line;
    }
}

/// Simulated two-wire bus with PCA9555 chips attached
///
/// Clones are handles onto the same bus, so a test or a stimulus thread can
/// drive pins while the driver owns another handle.
#[derive(Clone, Default)]
pub struct SimulatedBus {
    state: Arc<Mutex<BusState>>,
}

impl SimulatedBus {
    pub fn new() -> Self {
        Self::default()
    }

    fn lock(&self) -> MutexGuard<'_, BusState> {
        // State stays consistent even if a holder panicked
        self.state.lock().unwrap_or_else(|e| e.into_inner())
    }

    /// Attach a chip, replacing any chip already wired to `device`
    pub fn attach(&self, device: Device, chip: SimulatedChip) {
        log::debug!("Attach simulated PCA9555 at {device:?}");
        let mut state = self.lock();
        state.chips[device as usize] = Some(chip);
        state.update_interrupt();
    }

    pub fn detach(&self, device: Device) -> Option<SimulatedChip> {
        self.lock().chips[device as usize].take()
    }

    /// Wire the INT line to `flag`
    pub fn connect_interrupt(&self, flag: &'static InterruptFlag) {
        self.lock().interrupt = Some(flag);
    }

    /// Drive the external pins of a chip, no effect if no chip is attached
    pub fn set_pins(&self, device: Device, port: Port, levels: u8) {
        let mut state = self.lock();
        if let Some(chip) = state.chip(device) {
            chip.set_pins(port, levels);
        }
        state.update_interrupt();
    }

    /// Copy of the chip at `device`
    pub fn chip(&self, device: Device) -> Option<SimulatedChip> {
        self.lock().chips[device as usize].clone()
    }

    pub fn interrupt_line(&self) -> bool {
        self.lock().int_line
    }

    /// Take the recorded primitives, clearing the trace
    pub fn take_trace(&self) -> Vec<BusEvent> {
        std::mem::take(&mut self.lock().trace)
    }
}

impl I2cMaster for SimulatedBus {
    type Error = Infallible;

    fn init(&mut self) -> Result<(), Infallible> {
        let mut state = self.lock();
        state.selected = None;
        state.expect_command = false;
        log::trace!("Bus init");
        Ok(())
    }

    fn start_wait(&mut self, address: u8) -> Result<(), Infallible> {
        let mut waiting = false;
        loop {
            {
                let mut state = self.lock();
                if let Some(device) = state.decode(address, RwBit::Write) {
                    log::trace!("START 0x{address:02x} ACK");
                    state.selected = Some((device, RwBit::Write));
                    state.expect_command = true;
                    state.trace.push(BusEvent::Start(address));
                    return Ok(());
                }
            }
            if !waiting {
                log::trace!("START 0x{address:02x} NACK, waiting");
                waiting = true;
            }
            thread::yield_now();
        }
    }

    fn write(&mut self, byte: u8) -> Result<(), Infallible> {
        let mut state = self.lock();
        state.trace.push(BusEvent::Write(byte));
        let expect_command = std::mem::replace(&mut state.expect_command, false);
        match state.selected {
            Some((device, RwBit::Write)) => {
                if let Some(chip) = state.chip(device) {
                    if expect_command {
                        chip.select(byte);
                    } else {
                        chip.write_next(byte);
                    }
                }
                state.update_interrupt();
            }
            _ => log::warn!("Write 0x{byte:02x} with no device addressed for writing"),
        }
        Ok(())
    }

    fn read_nak(&mut self) -> Result<u8, Infallible> {
        let mut state = self.lock();
        let value = match state.selected {
            Some((device, RwBit::Read)) => {
                state.chip(device).map_or(0xff, SimulatedChip::read_next)
            }
            _ => {
                // Nobody drives SDA, the pull-up reads back ones
                log::warn!("Read with no device addressed for reading");
                0xff
            }
        };
        state.update_interrupt();
        state.trace.push(BusEvent::ReadNak(value));
        Ok(value)
    }

    fn rep_start(&mut self, address: u8) -> Result<(), Infallible> {
        let mut state = self.lock();
        state.trace.push(BusEvent::RepStart(address));
        state.selected = state.decode(address, RwBit::Read).map(|device| (device, RwBit::Read));
        state.expect_command = false;
        if state.selected.is_none() {
            log::warn!("Repeated START 0x{address:02x} NACK");
        }
        Ok(())
    }

    fn stop(&mut self) -> Result<(), Infallible> {
        let mut state = self.lock();
        state.trace.push(BusEvent::Stop);
        state.selected = None;
        state.expect_command = false;
        Ok(())
    }
}
