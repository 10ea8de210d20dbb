#![doc = include_str!("../README.md")]
#![no_std]

#[cfg(test)]
#[macro_use]
extern crate std;

mod reg;

use core::fmt::{self, Debug};

#[derive(Debug)]
pub enum Error<E> {
    /// Register or pointer write failed
    Write { register: u8, source: E },
    /// Burst read failed or came back short
    Read { register: u8, len: usize, source: E },
    /// Sample bytes don't match the burst length
    InvalidData { expected: usize, actual: usize },
    /// Data-ready flag never came up while polling
    NotReady,
}

impl<E: Debug> fmt::Display for Error<E> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Error::Write { register, source } => {
                write!(f, "write to register {register:#04x} failed: {source:?}")
            }
            Error::Read {
                register,
                len,
                source,
            } => write!(
                f,
                "reading {len} bytes from register {register:#04x} failed: {source:?}"
            ),
            Error::InvalidData { expected, actual } => {
                write!(f, "expected {expected} sample bytes, got {actual}")
            }
            Error::NotReady => f.write_str("data-ready flag not set after polling"),
        }
    }
}

impl<E: Debug> core::error::Error for Error<E> {}

pub mod device_impl;
pub mod measurement;
pub mod readout;

/// Pressure or Altitude Mode
///
/// Toggle as required
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum PressureAlt {
    Pressure,
    Altitude,
}

pub use device_impl::{Transfer, DEFAULT_ADDRESS, MPL3115A2};
pub use measurement::{AltimeterSample, BarometerSample, Measurement, Status};
pub use readout::{ConversionWait, Readout, ReadoutError, Stage, UnknownOption};
