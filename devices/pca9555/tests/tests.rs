use embedded_hal::i2c::{ErrorKind, NoAcknowledgeSource};
use embedded_hal_mock::eh1::i2c::{Mock as I2cMock, Transaction as I2cTransaction};
use pca9555::{Device, HalBus, HalBusError, Pca9555, Pca9555Error, Port};

// Empty write issued by start_wait before every transaction
fn address_poll(address: u8) -> I2cTransaction {
    I2cTransaction::write(address, vec![])
}

#[test]
fn read_input_pin() {
    let pin_state: u8 = 0b1011_0000;

    let expectations = [
        address_poll(0x20),
        I2cTransaction::write_read(0x20, vec![0x00], vec![pin_state]),
    ];

    let mut i2c = I2cMock::new(&expectations);

    let mut pca9555 = Pca9555::new(HalBus::new(&mut i2c));

    //check if the input pin state is the same as the one read from the I2C bus
    let result = pca9555.get_input(Device::Dev000, Port::Port0);
    assert_eq!(result, Ok(pin_state));

    //check if all expectations are met
    i2c.done();
}

#[test]
fn write_output_pin() {
    let pin_state: u8 = 0b0011_0011;

    let expectations = [
        address_poll(0x20),
        I2cTransaction::write(0x20, vec![0x03, pin_state]),
    ];

    let mut i2c = I2cMock::new(&expectations);

    let mut pca9555 = Pca9555::new(HalBus::new(&mut i2c));

    let result = pca9555.set_output(Device::Dev000, Port::Port1, pin_state);
    assert!(result.is_ok());

    i2c.done();
}

#[test]
fn configure_polarity() {
    let pin_polarity: u8 = 0b1010_0011;

    let expectations = [
        address_poll(0x21),
        I2cTransaction::write(0x21, vec![0x04, pin_polarity]),
    ];

    let mut i2c = I2cMock::new(&expectations);

    let mut pca9555 = Pca9555::new(HalBus::new(&mut i2c));

    // 0x40 + 0b010 = 0x42, 7-bit address 0x21
    let result = pca9555.set_polarity_inversion(Device::Dev010, Port::Port0, pin_polarity);
    assert!(result.is_ok());

    i2c.done();
}

#[test]
fn configure_pin_mode() {
    let pin_mode: u8 = 0b1111_0000;

    let expectations = [
        address_poll(0x20),
        I2cTransaction::write(0x20, vec![0x06, 0b0000_0000]),
        address_poll(0x20),
        I2cTransaction::write(0x20, vec![0x07, pin_mode]),
    ];

    let mut i2c = I2cMock::new(&expectations);

    let mut pca9555 = Pca9555::new(HalBus::new(&mut i2c));

    pca9555.init().unwrap();
    pca9555.set_direction(Device::Dev000, Port::Port0, 0b0000_0000).unwrap();
    pca9555.set_direction(Device::Dev000, Port::Port1, pin_mode).unwrap();

    i2c.done();
}

#[test]
fn waits_for_acknowledge() {
    let nack = ErrorKind::NoAcknowledge(NoAcknowledgeSource::Address);

    let expectations = [
        address_poll(0x22).with_error(nack),
        address_poll(0x22).with_error(nack),
        address_poll(0x22).with_error(nack),
        address_poll(0x22),
        I2cTransaction::write_read(0x22, vec![0x01], vec![0x7e]),
    ];

    let mut i2c = I2cMock::new(&expectations);

    let mut pca9555 = Pca9555::new(HalBus::new(&mut i2c));

    // 0x40 + 0b100 = 0x44, 7-bit address 0x22
    assert_eq!(pca9555.get_input(Device::Dev100, Port::Port1), Ok(0x7e));

    i2c.done();
}

#[test]
fn retry_limit_reports_missing_device() {
    let nack = ErrorKind::NoAcknowledge(NoAcknowledgeSource::Address);

    let expectations = [
        address_poll(0x23).with_error(nack),
        address_poll(0x23).with_error(nack),
        address_poll(0x23).with_error(nack),
    ];

    let mut i2c = I2cMock::new(&expectations);

    let mut pca9555 = Pca9555::new(HalBus::with_retry_limit(&mut i2c, 3));

    let result = pca9555.set_output(Device::Dev110, Port::Port0, 0xff);
    assert_eq!(result, Err(Pca9555Error::Bus(HalBusError::NoAcknowledge)));

    i2c.done();
}

#[test]
fn bus_error_is_propagated() {
    let expectations = [
        address_poll(0x20),
        I2cTransaction::write_read(0x20, vec![0x00], vec![0x00])
            .with_error(ErrorKind::ArbitrationLoss),
    ];

    let mut i2c = I2cMock::new(&expectations);

    let mut pca9555 = Pca9555::new(HalBus::new(&mut i2c));

    let result = pca9555.get_input(Device::Dev000, Port::Port0);
    assert_eq!(result, Err(Pca9555Error::Bus(HalBusError::I2c(ErrorKind::ArbitrationLoss))));

    i2c.done();
}
