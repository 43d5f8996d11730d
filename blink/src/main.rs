//! Count on port 0, flash the LED when an input of port 1 changes
mod config;

use std::thread;
use board_simulator::{FakeLed, SimulatorBoard};
use embedded_hal::digital::{OutputPin, StatefulOutputPin};
use pca9555::{I2cMaster, InterruptFlag, Pca9555, Pca9555Error, Port};
use config::{BlinkConfig, CONFIG};

fn main() {
    let mut board = SimulatorBoard::init();

    let (Some(mut expander), Some(mut led)) = (board.expander.take(), board.led.take()) else {
        panic!("Board has no expander or LED");
    };
    let _buttons = board.spawn_button_presses(CONFIG.device, Port::Port1, CONFIG.press_period);

    log::info!("Start blink on {:?}", CONFIG.device);
    if let Err(err) = run(&CONFIG, &mut expander, &mut led, board.interrupt()) {
        log::error!("Expander failure: {err}");
    }
}

fn run<B>(
    config: &BlinkConfig,
    expander: &mut Pca9555<B>,
    led: &mut FakeLed,
    interrupt: &InterruptFlag,
) -> Result<(), Pca9555Error<B::Error>>
where
    B: I2cMaster,
{
    setup(config, expander)?;
    let mut counter: u8 = 0;
    loop {
        step(config, expander, led, interrupt, &mut counter)?;
    }
}

fn setup<B>(config: &BlinkConfig, expander: &mut Pca9555<B>) -> Result<(), Pca9555Error<B::Error>>
where
    B: I2cMaster,
{
    expander.init()?;
    expander.set_direction(config.device, Port::Port0, 0b0000_0000)?; // outputs
    expander.set_direction(config.device, Port::Port1, 0b1111_1111) // inputs
}

/// One pass of the main loop
///
/// Returns the value read from port 1 when a change was handled.
fn step<B>(
    config: &BlinkConfig,
    expander: &mut Pca9555<B>,
    led: &mut FakeLed,
    interrupt: &InterruptFlag,
    counter: &mut u8,
) -> Result<Option<u8>, Pca9555Error<B::Error>>
where
    B: I2cMaster,
{
    thread::sleep(config.step);
    expander.set_output(config.device, Port::Port0, *counter)?;
    *counter = counter.wrapping_add(1);

    if !interrupt.is_raised() {
        return Ok(None);
    }
    let value = expander.get_input(config.device, Port::Port1)?;
    log::info!("Port 1 changed: {value:08b}");
    flash(led, config);
    // Only once the change has been handled
    interrupt.clear();
    Ok(Some(value))
}

fn flash(led: &mut FakeLed, config: &BlinkConfig) {
    led.set_high().ok();
    thread::sleep(config.flash);
    led.toggle().ok();
}
