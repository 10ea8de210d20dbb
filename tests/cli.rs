#![cfg(feature = "linux")]

use std::process::{Command, Output};

fn readout(args: &[&str], envs: &[(&str, &str)]) -> Output {
    let mut command = Command::new(env!("CARGO_BIN_EXE_mpl3115a2"));
    command
        .args(args)
        .env_remove("MPL3115A2_I2C_BUS")
        .env_remove("MPL3115A2_I2C_ADDR")
        .env_remove("MPL3115A2_WAIT")
        .env_remove("MPL3115A2_TRANSFER");
    for (key, value) in envs {
        command.env(key, value);
    }
    command.output().expect("failed to launch the readout binary")
}

#[test]
fn missing_bus_exits_with_failure() {
    let output = readout(&["/dev/i2c-does-not-exist"], &[]);

    assert_eq!(output.status.code(), Some(1));
    assert!(output.stdout.is_empty());
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(
        stderr.contains("Failed to open the bus /dev/i2c-does-not-exist"),
        "{stderr}"
    );
}

#[test]
fn bad_configuration_exits_with_failure() {
    let output = readout(
        &["/dev/i2c-does-not-exist"],
        &[("MPL3115A2_WAIT", "forever")],
    );

    assert_eq!(output.status.code(), Some(1));
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("Invalid MPL3115A2_WAIT"), "{stderr}");
}
