use std::time::Duration;
use pca9555::Device;

pub struct BlinkConfig {
    /// Expander the demo talks to
    pub device: Device,
    /// Delay between two counter steps on port 0
    pub step: Duration,
    /// How long the LED stays on after an input change
    pub flash: Duration,
    /// Period of the simulated button presses
    pub press_period: Duration,
}

pub static CONFIG: BlinkConfig = BlinkConfig {
    device: Device::Dev000,
    step: Duration::from_millis(5),
    flash: Duration::from_millis(600),
    press_period: Duration::from_secs(2),
};
