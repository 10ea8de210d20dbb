use embedded_hal::i2c::I2c;
use log::trace;

use crate::measurement::{AltimeterSample, BarometerSample, Status};
use crate::reg::{self, ctrl_reg1, pt_data_cfg};
use crate::{Error, PressureAlt};

/// Fixed 7-bit bus address of the MPL3115A2
pub const DEFAULT_ADDRESS: u8 = 0x60;

/// How a burst read selects its start register.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub enum Transfer {
    /// Pointer write, then a separate read.
    #[default]
    Split,
    /// Pointer write and read in one transaction with a repeated start.
    RepeatedStart,
}

impl PressureAlt {
    /// CTRL_REG1 value for active sampling at OSR 128 in this mode.
    pub fn ctrl_reg1(self) -> u8 {
        let base = ctrl_reg1::OS_128 | ctrl_reg1::SBYB;
        match self {
            PressureAlt::Altitude => base | ctrl_reg1::ALT,
            PressureAlt::Pressure => base,
        }
    }
}

#[allow(clippy::upper_case_acronyms)]
pub struct MPL3115A2<I2C> {
    i2c: I2C,
    address: u8,
}

impl<I2C: I2c> MPL3115A2<I2C> {
    pub fn new(i2c: I2C) -> Self {
        Self::with_address(i2c, DEFAULT_ADDRESS)
    }

    pub fn with_address(i2c: I2C, address: u8) -> Self {
        Self { i2c, address }
    }

    pub fn address(&self) -> u8 {
        self.address
    }

    /// Give the bus back.
    pub fn release(self) -> I2C {
        self.i2c
    }

    /// Two-byte command: register, value.
    pub fn write_register(&mut self, register: u8, value: u8) -> Result<(), Error<I2C::Error>> {
        trace!("write {register:#04x} <- {value:#04x}");
        self.i2c
            .write(self.address, &[register, value])
            .map_err(|source| Error::Write { register, source })
    }

    /// Switch to active sampling in altimeter or barometer mode.
    pub fn set_mode(&mut self, mode: PressureAlt) -> Result<(), Error<I2C::Error>> {
        self.write_register(reg::CTRL_REG1, mode.ctrl_reg1())
    }

    /// Raise data-ready events for pressure/altitude and temperature.
    pub fn enable_data_ready_events(&mut self) -> Result<(), Error<I2C::Error>> {
        self.write_register(reg::PT_DATA_CFG, pt_data_cfg::ALL_EVENTS)
    }

    pub fn read_altimeter(
        &mut self,
        transfer: Transfer,
    ) -> Result<AltimeterSample, Error<I2C::Error>> {
        self.burst(transfer).map(AltimeterSample::new)
    }

    pub fn read_barometer(
        &mut self,
        transfer: Transfer,
    ) -> Result<BarometerSample, Error<I2C::Error>> {
        self.burst(transfer).map(BarometerSample::new)
    }

    pub fn read_status(&mut self, transfer: Transfer) -> Result<Status, Error<I2C::Error>> {
        let [bits] = self.burst::<1>(transfer)?;
        Ok(Status::from_bits(bits))
    }

    /// Read `N` bytes starting at STATUS.
    fn burst<const N: usize>(&mut self, transfer: Transfer) -> Result<[u8; N], Error<I2C::Error>> {
        let register = reg::STATUS;
        let mut buf = [0u8; N];
        let result = match transfer {
            Transfer::Split => {
                self.i2c
                    .write(self.address, &[register])
                    .map_err(|source| Error::Write { register, source })?;
                self.i2c.read(self.address, &mut buf)
            }
            Transfer::RepeatedStart => self.i2c.write_read(self.address, &[register], &mut buf),
        };
        result.map_err(|source| Error::Read {
            register,
            len: N,
            source,
        })?;
        trace!("read {register:#04x} -> {buf:02x?}");
        Ok(buf)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use embedded_hal::i2c::ErrorKind;
    use embedded_hal_mock::eh1::i2c::{Mock as I2cMock, Transaction as I2cTransaction};

    const ADDR: u8 = DEFAULT_ADDRESS;

    #[test]
    fn mode_commands() {
        let i2c = I2cMock::new(&[
            I2cTransaction::write(ADDR, vec![0x26, 0xB9]),
            I2cTransaction::write(ADDR, vec![0x13, 0x07]),
            I2cTransaction::write(ADDR, vec![0x26, 0x39]),
        ]);
        let mut sensor = MPL3115A2::new(i2c);
        sensor.set_mode(PressureAlt::Altitude).unwrap();
        sensor.enable_data_ready_events().unwrap();
        sensor.set_mode(PressureAlt::Pressure).unwrap();
        sensor.release().done();
    }

    #[test]
    fn split_burst() {
        let i2c = I2cMock::new(&[
            I2cTransaction::write(ADDR, vec![0x00]),
            I2cTransaction::read(ADDR, vec![0x0E, 0x01, 0x02, 0x30, 0x01, 0x80]),
        ]);
        let mut sensor = MPL3115A2::new(i2c);
        let sample = sensor.read_altimeter(Transfer::Split).unwrap();
        assert_eq!(sample.altitude(), 4098.1875);
        assert!(sample.status().data_ready());
        sensor.release().done();
    }

    #[test]
    fn repeated_start_burst() {
        let i2c = I2cMock::new(&[I2cTransaction::write_read(
            ADDR,
            vec![0x00],
            vec![0x00, 0x01, 0x02, 0x30],
        )]);
        let mut sensor = MPL3115A2::new(i2c);
        let sample = sensor.read_barometer(Transfer::RepeatedStart).unwrap();
        assert_eq!(sample.raw_pressure(), 4131);
        sensor.release().done();
    }

    #[test]
    fn custom_address() {
        let i2c = I2cMock::new(&[
            I2cTransaction::write(0x61, vec![0x00]),
            I2cTransaction::read(0x61, vec![0x08]),
        ]);
        let mut sensor = MPL3115A2::with_address(i2c, 0x61);
        assert_eq!(sensor.address(), 0x61);
        assert!(sensor.read_status(Transfer::Split).unwrap().data_ready());
        sensor.release().done();
    }

    #[test]
    fn write_error() {
        let i2c = I2cMock::new(&[I2cTransaction::write(ADDR, vec![0x26, 0xB9])
            .with_error(ErrorKind::Other)]);
        let mut sensor = MPL3115A2::new(i2c);
        let err = sensor.set_mode(PressureAlt::Altitude).unwrap_err();
        assert!(matches!(err, Error::Write { register: 0x26, .. }));
        sensor.release().done();
    }

    #[test]
    fn pointer_write_error() {
        let i2c = I2cMock::new(&[I2cTransaction::write(ADDR, vec![0x00])
            .with_error(ErrorKind::Other)]);
        let mut sensor = MPL3115A2::new(i2c);
        let err = sensor.read_altimeter(Transfer::Split).unwrap_err();
        assert!(matches!(err, Error::Write { register: 0x00, .. }));
        sensor.release().done();
    }

    #[test]
    fn read_error() {
        let i2c = I2cMock::new(&[
            I2cTransaction::write(ADDR, vec![0x00]),
            I2cTransaction::read(ADDR, vec![0; 6]).with_error(ErrorKind::Other),
        ]);
        let mut sensor = MPL3115A2::new(i2c);
        let err = sensor.read_altimeter(Transfer::Split).unwrap_err();
        assert!(matches!(err, Error::Read { register: 0x00, len: 6, .. }));
        assert!(format!("{err}").starts_with("reading 6 bytes from register 0x00 failed"));
        sensor.release().done();
    }
}
