use std::time::Duration;
use pca9555::Device;

pub struct ButtonsConfig {
    /// Expander carrying the LEDs (port 0) and the buttons (port 1)
    pub device: Device,
    /// Delay between two steps of the moving LED
    pub step: Duration,
    /// Period of the simulated button presses
    pub press_period: Duration,
}

pub static CONFIG: ButtonsConfig = ButtonsConfig {
    device: Device::Dev000,
    step: Duration::from_millis(40),
    press_period: Duration::from_millis(700),
};
