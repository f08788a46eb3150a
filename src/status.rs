use crate::register;

/// Decoded `STATUS_REG`
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Status {
    /// X, Y and Z data overrun
    pub zyx_overrun: bool,
    /// Z data overrun
    pub z_overrun: bool,
    /// Y data overrun
    pub y_overrun: bool,
    /// X data overrun
    pub x_overrun: bool,
    /// New X, Y and Z data available
    pub zyx_available: bool,
    /// New Z data available
    pub z_available: bool,
    /// New Y data available
    pub y_available: bool,
    /// New X data available
    pub x_available: bool,
}

impl From<u8> for Status {
    fn from(reg: u8) -> Self {
        Status { zyx_overrun: reg & register::ZYXOR != 0,
                 z_overrun: reg & register::ZOR != 0,
                 y_overrun: reg & register::YOR != 0,
                 x_overrun: reg & register::XOR != 0,
                 zyx_available: reg & register::ZYXDA != 0,
                 z_available: reg & register::ZDA != 0,
                 y_available: reg & register::YDA != 0,
                 x_available: reg & register::XDA != 0, }
    }
}

/// Decoded `INT_SRC`
///
/// Reading it clears a latched interrupt.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct InterruptSource {
    /// X exceeded the threshold on the positive side
    pub x_positive: bool,
    /// Y exceeded the threshold on the positive side
    pub y_positive: bool,
    /// Z exceeded the threshold on the positive side
    pub z_positive: bool,
    /// X exceeded the threshold on the negative side
    pub x_negative: bool,
    /// Y exceeded the threshold on the negative side
    pub y_negative: bool,
    /// Z exceeded the threshold on the negative side
    pub z_negative: bool,
    /// Internal measurement range overflow
    pub overflow: bool,
    /// An interrupt event occurred
    pub interrupt: bool,
}

impl From<u8> for InterruptSource {
    fn from(reg: u8) -> Self {
        InterruptSource { x_positive: reg & register::PTH_X != 0,
                          y_positive: reg & register::PTH_Y != 0,
                          z_positive: reg & register::PTH_Z != 0,
                          x_negative: reg & register::NTH_X != 0,
                          y_negative: reg & register::NTH_Y != 0,
                          z_negative: reg & register::NTH_Z != 0,
                          overflow: reg & register::MROI != 0,
                          interrupt: reg & register::INT != 0, }
    }
}
