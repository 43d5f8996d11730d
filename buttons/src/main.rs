//! Bounce a single lit LED across port 0, report buttons pressed on port 1
mod config;
mod scanner;

use std::thread;
use board_simulator::SimulatorBoard;
use pca9555::{I2cMaster, InterruptFlag, Pca9555, Pca9555Error, Port};
use config::{ButtonsConfig, CONFIG};
use scanner::{pressed_buttons, Scanner};

fn main() {
    let mut board = SimulatorBoard::init();

    let Some(mut expander) = board.expander.take() else {
        panic!("Board has no expander");
    };
    let _buttons = board.spawn_button_presses(CONFIG.device, Port::Port1, CONFIG.press_period);

    log::info!("Start buttons on {:?}", CONFIG.device);
    if let Err(err) = run(&CONFIG, &mut expander, board.interrupt()) {
        log::error!("Expander failure: {err}");
    }
}

fn run<B>(
    config: &ButtonsConfig,
    expander: &mut Pca9555<B>,
    interrupt: &InterruptFlag,
) -> Result<(), Pca9555Error<B::Error>>
where
    B: I2cMaster,
{
    setup(config, expander)?;
    let mut scanner = Scanner::default();
    loop {
        step(config, expander, &mut scanner, interrupt)?;
    }
}

fn setup<B>(config: &ButtonsConfig, expander: &mut Pca9555<B>) -> Result<(), Pca9555Error<B::Error>>
where
    B: I2cMaster,
{
    expander.init()?;
    expander.set_direction(config.device, Port::Port0, 0b0000_0000)?;
    expander.set_direction(config.device, Port::Port1, 0b1111_1111)
}

/// One pass of the main loop, returns the buttons reported
fn step<B>(
    config: &ButtonsConfig,
    expander: &mut Pca9555<B>,
    scanner: &mut Scanner,
    interrupt: &InterruptFlag,
) -> Result<Vec<u8>, Pca9555Error<B::Error>>
where
    B: I2cMaster,
{
    thread::sleep(config.step);
    expander.set_output(config.device, Port::Port0, scanner.step())?;

    if !interrupt.is_raised() {
        return Ok(Vec::new());
    }
    let value = expander.get_input(config.device, Port::Port1)?;
    let pressed: Vec<u8> = pressed_buttons(value).collect();
    for button in &pressed {
        log::info!("button hit: {button:x}");
    }
    interrupt.clear();
    Ok(pressed)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;
    use board_simulator::{BusEvent, SimulatedBus, SimulatedChip};
    use pca9555::Device;

    static TEST_CONFIG: ButtonsConfig = ButtonsConfig {
        device: Device::Dev000,
        step: Duration::ZERO,
        press_period: Duration::ZERO,
    };

    #[test]
    fn reports_every_low_bit() {
        static FLAG: InterruptFlag = InterruptFlag::new();
        let bus = SimulatedBus::new();
        bus.attach(Device::Dev000, SimulatedChip::new());
        bus.connect_interrupt(&FLAG);
        let mut expander = Pca9555::new(bus.clone());
        setup(&TEST_CONFIG, &mut expander).unwrap();
        let mut scanner = Scanner::default();

        assert_eq!(step(&TEST_CONFIG, &mut expander, &mut scanner, &FLAG), Ok(vec![]));

        bus.set_pins(Device::Dev000, Port::Port1, 0b0111_1010);
        bus.take_trace();
        let reported = step(&TEST_CONFIG, &mut expander, &mut scanner, &FLAG);
        assert_eq!(reported, Ok(vec![0, 2, 7]));

        let trace = bus.take_trace();
        let reads = trace.iter().filter(|e| matches!(e, BusEvent::RepStart(_))).count();
        assert_eq!(reads, 1);
        assert!(trace.contains(&BusEvent::Write(1)));
        assert!(!FLAG.is_raised());

        // Scanner output reached port 0: 1 -> 2 -> 4
        let chip = bus.chip(Device::Dev000).unwrap();
        assert_eq!(chip.register(pca9555::Register::Output0), 4);
    }
}
