//! LIS3MDL register map

/// Primary 7-bit address (SDO/SA1 pulled low)
pub const ADDRESS_PRIMARY: u8 = 0x1C;

/// Alternate 7-bit address (SDO/SA1 pulled high)
pub const ADDRESS_ALTERNATE: u8 = 0x1E;

/// Expected content of `WHO_AM_I`
pub const WHO_AM_I_VALUE: u8 = 0x3D;

/// Sub-address bit that enables register auto-increment on multi-byte reads
pub const AUTO_INCREMENT: u8 = 1 << 7;

#[allow(dead_code)]
#[allow(non_camel_case_types)]
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Register {
    WHO_AM_I = 0x0F,
    CTRL_REG1 = 0x20,
    CTRL_REG2 = 0x21,
    CTRL_REG3 = 0x22,
    CTRL_REG4 = 0x23,
    CTRL_REG5 = 0x24,
    STATUS_REG = 0x27,
    OUT_X_L = 0x28,
    OUT_X_H = 0x29,
    OUT_Y_L = 0x2A,
    OUT_Y_H = 0x2B,
    OUT_Z_L = 0x2C,
    OUT_Z_H = 0x2D,
    TEMP_OUT_L = 0x2E,
    TEMP_OUT_H = 0x2F,
    INT_CFG = 0x30,
    INT_SRC = 0x31,
    INT_THS_L = 0x32,
    INT_THS_H = 0x33,
}

impl Register {
    /// Register sub-address
    pub fn addr(&self) -> u8 {
        *self as u8
    }

    /// Sub-address for a burst read or write starting at this register
    pub fn burst(&self) -> u8 {
        self.addr() | AUTO_INCREMENT
    }
}

// CTRL_REG1
pub const TEMP_EN: u8 = 1 << 7;
pub const FAST_ODR: u8 = 1 << 1;
pub const ST: u8 = 1 << 0;

// CTRL_REG2
pub const REBOOT: u8 = 1 << 3;
pub const SOFT_RST: u8 = 1 << 2;

// CTRL_REG3
pub const LP: u8 = 1 << 5;

// CTRL_REG5
pub const FAST_READ: u8 = 1 << 7;
pub const BDU: u8 = 1 << 6;

// INT_CFG
pub const INT_AXES: u8 = 0b1110_0000;
pub const INT_AXES_SHIFT: u8 = 5;
pub const LIR: u8 = 1 << 1;
pub const IEN: u8 = 1 << 0;

// STATUS_REG
pub const ZYXOR: u8 = 1 << 7;
pub const ZOR: u8 = 1 << 6;
pub const YOR: u8 = 1 << 5;
pub const XOR: u8 = 1 << 4;
pub const ZYXDA: u8 = 1 << 3;
pub const ZDA: u8 = 1 << 2;
pub const YDA: u8 = 1 << 1;
pub const XDA: u8 = 1 << 0;

// INT_SRC
pub const PTH_X: u8 = 1 << 7;
pub const PTH_Y: u8 = 1 << 6;
pub const PTH_Z: u8 = 1 << 5;
pub const NTH_X: u8 = 1 << 4;
pub const NTH_Y: u8 = 1 << 3;
pub const NTH_Z: u8 = 1 << 2;
pub const MROI: u8 = 1 << 1;
pub const INT: u8 = 1 << 0;

/// Returns `reg` with the bits in `mask` set or cleared
pub fn set_bits(reg: u8, mask: u8, enable: bool) -> u8 {
    if enable {
        reg | mask
    } else {
        reg & !mask
    }
}
