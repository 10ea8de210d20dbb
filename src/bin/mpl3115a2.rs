//! Read altitude, temperature and pressure from an MPL3115A2 once and print them.
use anyhow::{bail, Context};
use linux_embedded_hal::{Delay, I2cdev};
use log::info;
use mpl3115a2_readout::{ConversionWait, Readout, Transfer, DEFAULT_ADDRESS, MPL3115A2};

const DEFAULT_BUS: &str = "/dev/i2c-1";

#[derive(Debug, PartialEq)]
struct Config {
    bus: String,
    address: u8,
    readout: Readout,
}

impl Config {
    /// Positional argument first, then the environment, then defaults.
    fn resolve(arg: Option<String>, var: impl Fn(&str) -> Option<String>) -> anyhow::Result<Self> {
        let bus = arg
            .or_else(|| var("MPL3115A2_I2C_BUS"))
            .map(|bus| bus_path(&bus))
            .unwrap_or_else(|| DEFAULT_BUS.to_owned());

        let address = match var("MPL3115A2_I2C_ADDR") {
            Some(value) => parse_address(&value)
                .with_context(|| format!("Invalid MPL3115A2_I2C_ADDR {value:?}"))?,
            None => DEFAULT_ADDRESS,
        };

        let mut readout = Readout::default();
        if let Some(value) = var("MPL3115A2_WAIT") {
            readout.wait = value
                .parse::<ConversionWait>()
                .with_context(|| format!("Invalid MPL3115A2_WAIT {value:?}"))?;
        }
        if let Some(value) = var("MPL3115A2_TRANSFER") {
            readout.transfer = value
                .parse::<Transfer>()
                .with_context(|| format!("Invalid MPL3115A2_TRANSFER {value:?}"))?;
        }

        Ok(Self {
            bus,
            address,
            readout,
        })
    }
}

/// A bare bus number names `/dev/i2c-N`.
fn bus_path(bus: &str) -> String {
    if !bus.is_empty() && bus.bytes().all(|b| b.is_ascii_digit()) {
        format!("/dev/i2c-{bus}")
    } else {
        bus.to_owned()
    }
}

fn parse_address(value: &str) -> anyhow::Result<u8> {
    let address = match value.strip_prefix("0x").or_else(|| value.strip_prefix("0X")) {
        Some(hex) => u8::from_str_radix(hex, 16)?,
        None => value.parse()?,
    };
    if address > 0x7F {
        bail!("{address:#04x} is not a 7-bit address");
    }
    Ok(address)
}

fn main() -> anyhow::Result<()> {
    env_logger::builder().format_timestamp_millis().init();

    let config = Config::resolve(std::env::args().nth(1), |name| std::env::var(name).ok())?;
    info!("reading {:#04x} on {}", config.address, config.bus);

    let i2c = I2cdev::new(&config.bus)
        .with_context(|| format!("Failed to open the bus {}", config.bus))?;
    let mut sensor = MPL3115A2::with_address(i2c, config.address);

    let measurement = config
        .readout
        .run(&mut sensor, &mut Delay)
        .context("Input/Output error")?;

    println!("{measurement}");
    Ok(())
}
