use crate::error::InvalidArgument;
use crate::register;

pub(crate) trait RegisterBits {
    fn mask() -> u8;
    fn value(&self) -> u8;
}

/// Magnetometer Output Data Rate
///
/// Ignored by the device while fast ODR is enabled, see
/// [`AxisMode::fast_odr_hz`].
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[allow(non_camel_case_types)]
pub enum DataRate {
    /// 0.625Hz
    _0_625_Hz = 0x00,
    /// 1.25Hz
    _1_25_Hz = 0x04,
    /// 2.5Hz
    _2_5_Hz = 0x08,
    /// 5Hz
    _5_Hz = 0x0C,
    /// 10Hz
    _10_Hz = 0x10,
    /// 20Hz
    _20_Hz = 0x14,
    /// 40Hz
    _40_Hz = 0x18,
    /// 80Hz
    _80_Hz = 0x1C,
}

impl DataRate {
    /// Nominal rate in Hz
    pub fn hz(&self) -> f32 {
        match self {
            DataRate::_0_625_Hz => 0.625,
            DataRate::_1_25_Hz => 1.25,
            DataRate::_2_5_Hz => 2.5,
            DataRate::_5_Hz => 5.0,
            DataRate::_10_Hz => 10.0,
            DataRate::_20_Hz => 20.0,
            DataRate::_40_Hz => 40.0,
            DataRate::_80_Hz => 80.0,
        }
    }
}

impl Default for DataRate {
    fn default() -> Self {
        DataRate::_10_Hz
    }
}

impl RegisterBits for DataRate {
    fn mask() -> u8 {
        DataRate::_80_Hz.value()
    }

    fn value(&self) -> u8 {
        *self as u8
    }
}

/// Takes the 3-bit `DO` field value (0 = 0.625Hz ... 7 = 80Hz)
impl TryFrom<u8> for DataRate {
    type Error = InvalidArgument;

    fn try_from(raw: u8) -> Result<Self, Self::Error> {
        match raw {
            0 => Ok(DataRate::_0_625_Hz),
            1 => Ok(DataRate::_1_25_Hz),
            2 => Ok(DataRate::_2_5_Hz),
            3 => Ok(DataRate::_5_Hz),
            4 => Ok(DataRate::_10_Hz),
            5 => Ok(DataRate::_20_Hz),
            6 => Ok(DataRate::_40_Hz),
            7 => Ok(DataRate::_80_Hz),
            _ => Err(InvalidArgument),
        }
    }
}

/// Magnetometer full scale
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[allow(non_camel_case_types)]
pub enum FullScale {
    /// +/- 4 gauss
    _4_Ga = 0x00,
    /// +/- 8 gauss
    _8_Ga = 0x20,
    /// +/- 12 gauss
    _12_Ga = 0x40,
    /// +/- 16 gauss
    _16_Ga = 0x60,
}

impl FullScale {
    /// Sensitivity in LSB/gauss
    pub fn sensitivity(&self) -> u16 {
        match self {
            FullScale::_4_Ga => 6842,
            FullScale::_8_Ga => 3421,
            FullScale::_12_Ga => 2281,
            FullScale::_16_Ga => 1711,
        }
    }
}

impl Default for FullScale {
    fn default() -> Self {
        FullScale::_4_Ga
    }
}

impl RegisterBits for FullScale {
    fn mask() -> u8 {
        FullScale::_16_Ga.value()
    }

    fn value(&self) -> u8 {
        *self as u8
    }
}

impl TryFrom<u8> for FullScale {
    type Error = InvalidArgument;

    fn try_from(raw: u8) -> Result<Self, Self::Error> {
        match raw {
            0 => Ok(FullScale::_4_Ga),
            1 => Ok(FullScale::_8_Ga),
            2 => Ok(FullScale::_12_Ga),
            3 => Ok(FullScale::_16_Ga),
            _ => Err(InvalidArgument),
        }
    }
}

/// Axis operative mode, shared by the X/Y pair and the Z axis.
/// Default: Low power.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum AxisMode {
    /// Low power
    LowPower = 0,
    /// Medium performance
    MediumPerformance = 1,
    /// High performance
    HighPerformance = 2,
    /// Ultra high performance
    UltraHighPerformance = 3,
}

impl AxisMode {
    /// Output data rate in Hz when fast ODR is enabled
    pub fn fast_odr_hz(&self) -> u16 {
        match self {
            AxisMode::LowPower => 1000,
            AxisMode::MediumPerformance => 560,
            AxisMode::HighPerformance => 300,
            AxisMode::UltraHighPerformance => 155,
        }
    }
}

impl Default for AxisMode {
    fn default() -> Self {
        AxisMode::LowPower
    }
}

impl TryFrom<u8> for AxisMode {
    type Error = InvalidArgument;

    fn try_from(raw: u8) -> Result<Self, Self::Error> {
        match raw {
            0 => Ok(AxisMode::LowPower),
            1 => Ok(AxisMode::MediumPerformance),
            2 => Ok(AxisMode::HighPerformance),
            3 => Ok(AxisMode::UltraHighPerformance),
            _ => Err(InvalidArgument),
        }
    }
}

// OM field of CTRL_REG1
pub(crate) struct XyMode(pub(crate) AxisMode);

impl RegisterBits for XyMode {
    fn mask() -> u8 {
        0b0110_0000
    }

    fn value(&self) -> u8 {
        (self.0 as u8) << 5
    }
}

// OMZ field of CTRL_REG4
pub(crate) struct ZMode(pub(crate) AxisMode);

impl RegisterBits for ZMode {
    fn mask() -> u8 {
        0b0000_1100
    }

    fn value(&self) -> u8 {
        (self.0 as u8) << 2
    }
}

/// Magnetometer operating mode
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum OperatingMode {
    /// Continuous conversion
    Continuous = 0x00,
    /// Single conversion, only valid with ODR between 0.625Hz and 80Hz
    Single = 0x01,
    /// Power down
    PowerDown1 = 0x02,
    /// Power down (alternate encoding)
    PowerDown2 = 0x03,
}

impl RegisterBits for OperatingMode {
    fn mask() -> u8 {
        OperatingMode::PowerDown2.value()
    }

    fn value(&self) -> u8 {
        *self as u8
    }
}

impl Default for OperatingMode {
    fn default() -> Self {
        OperatingMode::PowerDown2
    }
}

impl TryFrom<u8> for OperatingMode {
    type Error = InvalidArgument;

    fn try_from(raw: u8) -> Result<Self, Self::Error> {
        match raw {
            0 => Ok(OperatingMode::Continuous),
            1 => Ok(OperatingMode::Single),
            2 => Ok(OperatingMode::PowerDown1),
            3 => Ok(OperatingMode::PowerDown2),
            _ => Err(InvalidArgument),
        }
    }
}

/// SPI serial interface mode
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum SpiMode {
    /// 4-wire interface
    FourWire = 0x00,
    /// 3-wire interface
    ThreeWire = 0x04,
}

impl RegisterBits for SpiMode {
    fn mask() -> u8 {
        SpiMode::ThreeWire.value()
    }

    fn value(&self) -> u8 {
        *self as u8
    }
}

impl Default for SpiMode {
    fn default() -> Self {
        SpiMode::FourWire
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[allow(dead_code)]
pub(crate) enum Endianness {
    Little = 0x00,
    Big = 0x02,
}

impl RegisterBits for Endianness {
    fn mask() -> u8 {
        Endianness::Big.value()
    }

    fn value(&self) -> u8 {
        *self as u8
    }
}

/// Level of the INT pin when an interrupt is asserted
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum InterruptPolarity {
    /// Active low
    ActiveLow = 0x00,
    /// Active high
    ActiveHigh = 0x04,
}

impl RegisterBits for InterruptPolarity {
    fn mask() -> u8 {
        InterruptPolarity::ActiveHigh.value()
    }

    fn value(&self) -> u8 {
        *self as u8
    }
}

impl Default for InterruptPolarity {
    fn default() -> Self {
        InterruptPolarity::ActiveLow
    }
}

/// Set of axes that generate a threshold interrupt
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct InterruptChannels(u8);

impl InterruptChannels {
    /// No axis; disables interrupt generation
    pub const NONE: Self = InterruptChannels(0);
    /// X axis
    pub const X: Self = InterruptChannels(0b100);
    /// Y axis
    pub const Y: Self = InterruptChannels(0b010);
    /// Z axis
    pub const Z: Self = InterruptChannels(0b001);
    /// All three axes
    pub const ALL: Self = InterruptChannels(0b111);

    /// Builds a channel set from the `X = 4, Y = 2, Z = 1` bitmask
    pub fn from_bits(bits: u8) -> Result<Self, InvalidArgument> {
        if bits > Self::ALL.0 {
            Err(InvalidArgument)
        } else {
            Ok(InterruptChannels(bits))
        }
    }

    /// Raw `X = 4, Y = 2, Z = 1` bitmask
    pub fn bits(&self) -> u8 {
        self.0
    }

    /// `true` if no axis is selected
    pub fn is_empty(&self) -> bool {
        self.0 == 0
    }

    /// `true` if every axis in `other` is also in `self`
    pub fn contains(&self, other: Self) -> bool {
        self.0 & other.0 == other.0
    }

    /// Applies the channel set to an `INT_CFG` value: an empty set clears the
    /// axis enables and `IEN`, anything else replaces the axis enables and
    /// sets `IEN`.
    pub(crate) fn apply(&self, int_cfg: u8) -> u8 {
        if self.is_empty() {
            int_cfg & !(register::INT_AXES | register::IEN)
        } else {
            (int_cfg & !register::INT_AXES)
                | (self.0 << register::INT_AXES_SHIFT)
                | register::IEN
        }
    }
}

impl core::ops::BitOr for InterruptChannels {
    type Output = Self;

    fn bitor(self, rhs: Self) -> Self {
        InterruptChannels(self.0 | rhs.0)
    }
}

impl core::ops::BitOrAssign for InterruptChannels {
    fn bitor_assign(&mut self, rhs: Self) {
        self.0 |= rhs.0;
    }
}

impl TryFrom<u8> for InterruptChannels {
    type Error = InvalidArgument;

    fn try_from(raw: u8) -> Result<Self, Self::Error> {
        InterruptChannels::from_bits(raw)
    }
}

/// I2C slave address, selected by the SDO/SA1 pin
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum SlaveAddr {
    /// SDO/SA1 low: 0x1C
    Primary,
    /// SDO/SA1 high: 0x1E
    Alternate,
}

impl SlaveAddr {
    /// 7-bit bus address
    pub fn addr(&self) -> u8 {
        match self {
            SlaveAddr::Primary => register::ADDRESS_PRIMARY,
            SlaveAddr::Alternate => register::ADDRESS_ALTERNATE,
        }
    }
}

impl Default for SlaveAddr {
    fn default() -> Self {
        SlaveAddr::Primary
    }
}

impl TryFrom<u8> for SlaveAddr {
    type Error = InvalidArgument;

    fn try_from(addr: u8) -> Result<Self, Self::Error> {
        match addr {
            register::ADDRESS_PRIMARY => Ok(SlaveAddr::Primary),
            register::ADDRESS_ALTERNATE => Ok(SlaveAddr::Alternate),
            _ => Err(InvalidArgument),
        }
    }
}

/// Bus clock frequency
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum ClockFrequency {
    /// Standard mode, 100 kHz
    Standard,
    /// Fast mode, 400 kHz
    Fast,
}

impl ClockFrequency {
    /// Frequency in Hz
    pub fn hz(&self) -> u32 {
        match self {
            ClockFrequency::Standard => 100_000,
            ClockFrequency::Fast => 400_000,
        }
    }
}

impl Default for ClockFrequency {
    fn default() -> Self {
        ClockFrequency::Standard
    }
}

/// Bus parameters used every time the driver opens a handle
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Config {
    pub(crate) address: SlaveAddr,
    pub(crate) controller: u8,
    pub(crate) clock: ClockFrequency,
}

impl Config {
    /// Creates configuration with the primary address (0x1C), controller 1
    /// and a 100 kHz clock.
    pub fn new() -> Self {
        Config { address: SlaveAddr::default(),
                 controller: 1,
                 clock: ClockFrequency::default(), }
    }

    /// Sets the device address ([`SlaveAddr`])
    pub fn address(&mut self, address: SlaveAddr) -> &mut Self {
        self.address = address;
        self
    }

    /// Sets the bus controller index
    pub fn controller(&mut self, controller: u8) -> &mut Self {
        self.controller = controller;
        self
    }

    /// Sets the bus clock ([`ClockFrequency`])
    pub fn clock(&mut self, clock: ClockFrequency) -> &mut Self {
        self.clock = clock;
        self
    }

    /// Device address
    pub fn get_address(&self) -> SlaveAddr {
        self.address
    }

    /// Bus controller index
    pub fn get_controller(&self) -> u8 {
        self.controller
    }

    /// Bus clock
    pub fn get_clock(&self) -> ClockFrequency {
        self.clock
    }
}

impl Default for Config {
    fn default() -> Self {
        Config::new()
    }
}
