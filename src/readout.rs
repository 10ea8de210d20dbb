//! One full readout: altimeter pass, then barometer pass.

use core::fmt;
use core::str::FromStr;

use embedded_hal::delay::DelayNs;
use embedded_hal::i2c::I2c;
use log::{debug, warn};

use crate::device_impl::{Transfer, MPL3115A2};
use crate::measurement::Measurement;
use crate::{Error, PressureAlt};

/// How to wait for a conversion to finish.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum ConversionWait {
    /// Blocking sleep.
    Fixed { ms: u32 },
    /// Read STATUS every `interval_ms` until the data-ready flag is set.
    PollDataReady { interval_ms: u32, attempts: u32 },
}

impl ConversionWait {
    pub const FIXED: Self = Self::Fixed { ms: 1000 };
    pub const POLL: Self = Self::PollDataReady {
        interval_ms: 10,
        attempts: 200,
    };
}

impl Default for ConversionWait {
    fn default() -> Self {
        Self::FIXED
    }
}

/// An option value that isn't one of the known names.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct UnknownOption;

impl fmt::Display for UnknownOption {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("unknown option value")
    }
}

impl core::error::Error for UnknownOption {}

impl FromStr for ConversionWait {
    type Err = UnknownOption;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "fixed" => Ok(Self::FIXED),
            "poll" => Ok(Self::POLL),
            _ => Err(UnknownOption),
        }
    }
}

impl FromStr for Transfer {
    type Err = UnknownOption;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "split" => Ok(Self::Split),
            "repeated-start" => Ok(Self::RepeatedStart),
            _ => Err(UnknownOption),
        }
    }
}

/// Progress through a readout. Printing the result is up to the caller, so
/// the last stage here is the barometer read.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Stage {
    Opened,
    AltimeterConfigured,
    AltimeterRead,
    BarometerConfigured,
    BarometerRead,
}

impl fmt::Display for Stage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Stage::Opened => "opened",
            Stage::AltimeterConfigured => "altimeter configured",
            Stage::AltimeterRead => "altimeter read",
            Stage::BarometerConfigured => "barometer configured",
            Stage::BarometerRead => "barometer read",
        };
        f.write_str(name)
    }
}

/// A failed readout and the last stage it completed.
#[derive(Debug)]
pub struct ReadoutError<E> {
    pub stage: Stage,
    pub error: Error<E>,
}

impl<E: fmt::Debug> fmt::Display for ReadoutError<E> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "readout failed after {}: {}", self.stage, self.error)
    }
}

impl<E: fmt::Debug> core::error::Error for ReadoutError<E> {}

/// Readout settings. The default is the plain one-shot sequence: split
/// bursts and a one second sleep per conversion.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub struct Readout {
    pub wait: ConversionWait,
    pub transfer: Transfer,
}

impl Readout {
    /// Run the altimeter pass then the barometer pass and decode both.
    ///
    /// Each step completes before the next starts; the first error ends the
    /// readout.
    pub fn run<I2C, D>(
        &self,
        sensor: &mut MPL3115A2<I2C>,
        delay: &mut D,
    ) -> Result<Measurement, ReadoutError<I2C::Error>>
    where
        I2C: I2c,
        D: DelayNs,
    {
        let mut stage = Stage::Opened;
        self.sequence(sensor, delay, &mut stage).map_err(|error| {
            debug!("readout stopped after {stage}: {error}");
            ReadoutError { stage, error }
        })
    }

    fn sequence<I2C, D>(
        &self,
        sensor: &mut MPL3115A2<I2C>,
        delay: &mut D,
        stage: &mut Stage,
    ) -> Result<Measurement, Error<I2C::Error>>
    where
        I2C: I2c,
        D: DelayNs,
    {
        let mut advance = |next: Stage| {
            debug!("{stage} -> {next}");
            *stage = next;
        };

        sensor.set_mode(PressureAlt::Altitude)?;
        sensor.enable_data_ready_events()?;
        // CTRL_REG1 is asserted a second time after PT_DATA_CFG.
        sensor.set_mode(PressureAlt::Altitude)?;
        advance(Stage::AltimeterConfigured);

        self.wait_for_conversion(sensor, delay)?;
        let altimeter = sensor.read_altimeter(self.transfer)?;
        if altimeter.status().overwritten() {
            warn!("altimeter sample was overwritten before it was read");
        }
        advance(Stage::AltimeterRead);

        sensor.set_mode(PressureAlt::Pressure)?;
        advance(Stage::BarometerConfigured);

        self.wait_for_conversion(sensor, delay)?;
        let barometer = sensor.read_barometer(self.transfer)?;
        if barometer.status().overwritten() {
            warn!("barometer sample was overwritten before it was read");
        }
        advance(Stage::BarometerRead);

        Ok(Measurement::from_samples(&altimeter, &barometer))
    }

    fn wait_for_conversion<I2C, D>(
        &self,
        sensor: &mut MPL3115A2<I2C>,
        delay: &mut D,
    ) -> Result<(), Error<I2C::Error>>
    where
        I2C: I2c,
        D: DelayNs,
    {
        match self.wait {
            ConversionWait::Fixed { ms } => {
                delay.delay_ms(ms);
                Ok(())
            }
            ConversionWait::PollDataReady {
                interval_ms,
                attempts,
            } => {
                for attempt in 1..=attempts {
                    delay.delay_ms(interval_ms);
                    if sensor.read_status(self.transfer)?.data_ready() {
                        debug!("data ready after {attempt} polls");
                        return Ok(());
                    }
                }
                Err(Error::NotReady)
            }
        }
    }
}
