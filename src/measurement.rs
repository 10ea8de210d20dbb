//! Raw burst samples and their conversion to physical units.
//!
//! Every data byte is sign-extended before it is shifted or masked, and the
//! integer divisions truncate toward zero. Negative altitudes and sub-zero
//! temperatures depend on both.

use core::convert::Infallible;
use core::fmt;

use crate::reg::status;
use crate::Error;

/// Sign-extend a data byte.
fn signed(byte: u8) -> i32 {
    cast::i32(byte as i8)
}

/// The STATUS byte that leads every burst.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub struct Status(u8);

impl Status {
    pub fn from_bits(bits: u8) -> Self {
        Self(bits)
    }

    pub fn bits(&self) -> u8 {
        self.0
    }

    /// New pressure/altitude or temperature data is available.
    pub fn data_ready(&self) -> bool {
        self.0 & status::PTDR != 0
    }

    pub fn pressure_ready(&self) -> bool {
        self.0 & status::PDR != 0
    }

    pub fn temperature_ready(&self) -> bool {
        self.0 & status::TDR != 0
    }

    /// A sample was overwritten before it was read.
    pub fn overwritten(&self) -> bool {
        self.0 & (status::PTOW | status::POW | status::TOW) != 0
    }
}

/// Altimeter burst: status, three altitude bytes, two temperature bytes.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct AltimeterSample([u8; 6]);

impl AltimeterSample {
    pub const LEN: usize = 6;

    pub fn new(bytes: [u8; Self::LEN]) -> Self {
        Self(bytes)
    }

    pub fn status(&self) -> Status {
        Status(self.0[0])
    }

    pub fn raw_height(&self) -> i32 {
        let [_, msb1, msb, lsb, _, _] = self.0;
        (signed(msb1) << 16) + ((signed(msb) << 8) + (signed(lsb) & 0xF0)) / 16
    }

    pub fn raw_temperature(&self) -> i32 {
        let [_, _, _, _, msb, lsb] = self.0;
        ((signed(msb) << 8) + (signed(lsb) & 0xF0)) / 16
    }

    /// Altitude in meters
    pub fn altitude(&self) -> f32 {
        cast::f32(self.raw_height()) / 16.0
    }

    /// Temperature in degrees Celsius
    pub fn celsius(&self) -> f32 {
        cast::f32(self.raw_temperature()) / 16.0
    }
}

impl TryFrom<&[u8]> for AltimeterSample {
    type Error = Error<Infallible>;

    fn try_from(bytes: &[u8]) -> Result<Self, Self::Error> {
        bytes.try_into().map(Self).map_err(|_| Error::InvalidData {
            expected: Self::LEN,
            actual: bytes.len(),
        })
    }
}

/// Barometer burst: status and three pressure bytes.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct BarometerSample([u8; 4]);

impl BarometerSample {
    pub const LEN: usize = 4;

    pub fn new(bytes: [u8; Self::LEN]) -> Self {
        Self(bytes)
    }

    pub fn status(&self) -> Status {
        Status(self.0[0])
    }

    pub fn raw_pressure(&self) -> i32 {
        let [_, msb1, msb, lsb] = self.0;
        ((signed(msb1) << 16) + (signed(msb) << 8) + (signed(lsb) & 0xF0)) / 16
    }

    /// Pressure in kilopascals
    pub fn kilopascals(&self) -> f32 {
        cast::f32(self.raw_pressure()) / 4.0 / 1000.0
    }
}

impl TryFrom<&[u8]> for BarometerSample {
    type Error = Error<Infallible>;

    fn try_from(bytes: &[u8]) -> Result<Self, Self::Error> {
        bytes.try_into().map(Self).map_err(|_| Error::InvalidData {
            expected: Self::LEN,
            actual: bytes.len(),
        })
    }
}

/// One decoded reading.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct Measurement {
    pub pressure_kpa: f32,
    pub altitude_m: f32,
    pub celsius: f32,
    pub fahrenheit: f32,
    pub altimeter_status: Status,
    pub barometer_status: Status,
}

impl Measurement {
    pub fn from_samples(altimeter: &AltimeterSample, barometer: &BarometerSample) -> Self {
        let celsius = altimeter.celsius();
        Self {
            pressure_kpa: barometer.kilopascals(),
            altitude_m: altimeter.altitude(),
            celsius,
            // Widened for the multiply-add, then narrowed back.
            fahrenheit: (cast::f64(celsius) * 1.8 + 32.0) as f32,
            altimeter_status: altimeter.status(),
            barometer_status: barometer.status(),
        }
    }
}

/// The four report lines, without a trailing newline.
impl fmt::Display for Measurement {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Pressure : {:.2} kPa", self.pressure_kpa)?;
        writeln!(f, "Altitude : {:.2} m", self.altitude_m)?;
        writeln!(f, "Temperature in Celsius : {:.2} C", self.celsius)?;
        write!(f, "Temperature in Fahrenheit : {:.2} F", self.fahrenheit)
    }
}
