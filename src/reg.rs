//! Register map of the MPL3115A2.

/// Status byte, followed by OUT_P and OUT_T. Burst reads start here.
pub const STATUS: u8 = 0x00;
/// PT_DATA_CFG
pub const PT_DATA_CFG: u8 = 0x13;
/// CTRL_REG1
pub const CTRL_REG1: u8 = 0x26;

pub mod ctrl_reg1 {
    /// Active mode (standby when clear)
    pub const SBYB: u8 = 1 << 0;
    /// Oversample ratio 128
    pub const OS_128: u8 = 0b111 << 3;
    /// Altimeter mode (barometer when clear)
    pub const ALT: u8 = 1 << 7;
}

pub mod pt_data_cfg {
    /// Temperature data-ready event
    pub const TDEFE: u8 = 1 << 0;
    /// Pressure/altitude data-ready event
    pub const PDEFE: u8 = 1 << 1;
    /// Data-ready event mode
    pub const DREM: u8 = 1 << 2;

    pub const ALL_EVENTS: u8 = DREM | PDEFE | TDEFE;
}

pub mod status {
    pub const TDR: u8 = 1 << 1;
    pub const PDR: u8 = 1 << 2;
    pub const PTDR: u8 = 1 << 3;
    pub const TOW: u8 = 1 << 5;
    pub const POW: u8 = 1 << 6;
    pub const PTOW: u8 = 1 << 7;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn control_values_match_datasheet_bytes() {
        use ctrl_reg1::*;
        assert_eq!(ALT | OS_128 | SBYB, 0xB9);
        assert_eq!(OS_128 | SBYB, 0x39);
        assert_eq!(pt_data_cfg::ALL_EVENTS, 0x07);
    }
}
