//! A platform agnostic driver to interface with the LIS3MDL (3-axis
//! magnetometer)
//!
//! The driver talks to the device through a [`Transport`], which opens a
//! connection for every operation and closes it afterwards. Use
//! [`HalTransport`] to run it on top of the [`embedded-hal`] blocking I2C
//! traits.
//!
//! Every setter reads the current register value, merges the new bits and
//! writes it back, so the device is the only source of truth for its
//! configuration. Enumerated setters take either the typed value or its raw
//! register field; raw values out of range are rejected with
//! [`Error::InvalidArgument`] before the bus is touched.
//!
//! ```ignore
//! let mut mag = Lis3mdl::new(HalTransport::new(i2c));
//! assert_eq!(mag.identify()?, lis3mdl::WHO_AM_I_VALUE);
//! mag.set_xy_mode(AxisMode::UltraHighPerformance)?
//!    .set_z_mode(AxisMode::UltraHighPerformance)?
//!    .set_odr(DataRate::_80_Hz)?
//!    .set_operating_mode(OperatingMode::Continuous)?;
//! let x = mag.mag_x()?;
//! ```
//!
//! [`embedded-hal`]: https://docs.rs/embedded-hal

#![deny(missing_docs)]
#![no_std]

extern crate cast;
extern crate embedded_hal as hal;
extern crate nalgebra;

#[macro_use]
mod fmt;

mod conf;
mod error;
mod register;
mod status;
pub mod transport;

use cast::{f32, u16};
use hal::blocking::delay::DelayMs;

pub use nalgebra::Vector3;

pub use conf::{AxisMode, ClockFrequency, Config, DataRate, FullScale,
               InterruptChannels, InterruptPolarity, OperatingMode, SlaveAddr,
               SpiMode};
pub use error::{Error, InvalidArgument};
pub use register::{ADDRESS_ALTERNATE, ADDRESS_PRIMARY, WHO_AM_I_VALUE};
pub use status::{InterruptSource, Status};
pub use transport::{HalError, HalTransport, Transport};

use conf::{Endianness, RegisterBits, XyMode, ZMode};
use register::Register;

/// Required wait after a reboot or soft reset
const RESET_DELAY_MS: u8 = 100;

const TEMP_SENSITIVITY: f32 = 8.0;
const TEMP_ZERO_OFFSET: f32 = 25.0;

/// LIS3MDL driver
pub struct Lis3mdl<T> {
    transport: T,
    config: Config,
    temperature_enabled: bool,
    fast_odr_enabled: bool,
}

impl<T> Lis3mdl<T> where T: Transport
{
    /// Creates a new driver with the default [`Config`] (address 0x1C,
    /// controller 1, 100 kHz)
    pub fn new(transport: T) -> Self {
        Lis3mdl::with_config(transport, Config::default())
    }

    /// Creates a new driver that opens every connection with `config`
    pub fn with_config(transport: T, config: Config) -> Self {
        Lis3mdl { transport,
                  config,
                  temperature_enabled: false,
                  fast_odr_enabled: false, }
    }

    /// Bus parameters
    pub fn config(&self) -> &Config {
        &self.config
    }

    /// Destroys the driver and returns the transport
    pub fn release(self) -> T {
        self.transport
    }

    /// Raw `WHO_AM_I` content; a LIS3MDL answers [`WHO_AM_I_VALUE`] (0x3D).
    /// Anything else usually means the other bus address is in use.
    pub fn identify(&mut self) -> Result<u8, Error<T::Error>> {
        self.read_register(Register::WHO_AM_I)
    }

    /// `true` if `WHO_AM_I` matches a LIS3MDL
    pub fn is_lis3mdl(&mut self) -> Result<bool, Error<T::Error>> {
        Ok(self.identify()? == WHO_AM_I_VALUE)
    }

    /// Enables or disables the temperature sensor
    pub fn set_temperature_sensor(&mut self,
                                  enable: bool)
                                  -> Result<&mut Self, Error<T::Error>> {
        self.modify_register(Register::CTRL_REG1, |r| {
                register::set_bits(r, register::TEMP_EN, enable)
            })?;
        self.temperature_enabled = enable;
        Ok(self)
    }

    /// Last value passed to [`set_temperature_sensor`] that reached the
    /// device. Not read back, so changes made by other means are not seen.
    ///
    /// [`set_temperature_sensor`]: #method.set_temperature_sensor
    pub fn temperature_enabled(&self) -> bool {
        self.temperature_enabled
    }

    /// Sets the X and Y axes operative mode ([`AxisMode`], or its raw value
    /// 0..=3)
    pub fn set_xy_mode<M>(&mut self, mode: M) -> Result<&mut Self, Error<T::Error>>
        where M: TryInto<AxisMode>,
              InvalidArgument: From<M::Error>
    {
        let mode = mode.try_into().map_err(InvalidArgument::from)?;
        self.write_register_with_mask(Register::CTRL_REG1, XyMode(mode))?;
        Ok(self)
    }

    /// Sets the Z axis operative mode ([`AxisMode`], or its raw value 0..=3)
    ///
    /// The field is OMZ, `CTRL_REG4` bits 3-2. Drivers that write the mode
    /// into bits 1-0 clobber the BLE bit; this one leaves bits 1-0 untouched.
    pub fn set_z_mode<M>(&mut self, mode: M) -> Result<&mut Self, Error<T::Error>>
        where M: TryInto<AxisMode>,
              InvalidArgument: From<M::Error>
    {
        let mode = mode.try_into().map_err(InvalidArgument::from)?;
        self.write_register_with_mask(Register::CTRL_REG4, ZMode(mode))?;
        Ok(self)
    }

    /// Sets the output data rate ([`DataRate`], or its raw value 0..=7).
    /// Has no effect on the actual rate while fast ODR is enabled.
    pub fn set_odr<R>(&mut self, rate: R) -> Result<&mut Self, Error<T::Error>>
        where R: TryInto<DataRate>,
              InvalidArgument: From<R::Error>
    {
        let rate = rate.try_into().map_err(InvalidArgument::from)?;
        self.write_register_with_mask(Register::CTRL_REG1, rate)?;
        Ok(self)
    }

    /// Enables or disables fast ODR. When enabled the data rate follows the
    /// X/Y operative mode, see [`AxisMode::fast_odr_hz`].
    pub fn set_fast_odr(&mut self,
                        enable: bool)
                        -> Result<&mut Self, Error<T::Error>> {
        self.modify_register(Register::CTRL_REG1, |r| {
                register::set_bits(r, register::FAST_ODR, enable)
            })?;
        self.fast_odr_enabled = enable;
        Ok(self)
    }

    /// Last value passed to [`set_fast_odr`] that reached the device. Not
    /// read back.
    ///
    /// [`set_fast_odr`]: #method.set_fast_odr
    pub fn fast_odr_enabled(&self) -> bool {
        self.fast_odr_enabled
    }

    /// Starts the self-test. The bit stays set until
    /// `set_self_test(false)`.
    pub fn self_test(&mut self) -> Result<&mut Self, Error<T::Error>> {
        self.set_self_test(true)
    }

    /// Sets or clears the self-test bit
    pub fn set_self_test(&mut self,
                         enable: bool)
                         -> Result<&mut Self, Error<T::Error>> {
        self.modify_register(Register::CTRL_REG1, |r| {
                register::set_bits(r, register::ST, enable)
            })?;
        Ok(self)
    }

    /// Sets the full scale ([`FullScale`], or its raw value 0..=3)
    pub fn set_full_scale<S>(&mut self,
                             scale: S)
                             -> Result<&mut Self, Error<T::Error>>
        where S: TryInto<FullScale>,
              InvalidArgument: From<S::Error>
    {
        let scale = scale.try_into().map_err(InvalidArgument::from)?;
        self.write_register_with_mask(Register::CTRL_REG2, scale)?;
        Ok(self)
    }

    /// Reboots memory content, then blocks for 100ms before releasing the
    /// bus
    pub fn reboot<D>(&mut self, delay: &mut D) -> Result<(), Error<T::Error>>
        where D: DelayMs<u8>
    {
        debug!("lis3mdl: reboot");
        self.set_bit_and_wait(Register::CTRL_REG2, register::REBOOT, delay)
    }

    /// Resets configuration and user registers, then blocks for 100ms
    /// before releasing the bus. The mirrored temperature and fast ODR
    /// flags go back to `false`.
    pub fn soft_reset<D>(&mut self, delay: &mut D) -> Result<(), Error<T::Error>>
        where D: DelayMs<u8>
    {
        debug!("lis3mdl: soft reset");
        self.set_bit_and_wait(Register::CTRL_REG2, register::SOFT_RST, delay)?;
        self.temperature_enabled = false;
        self.fast_odr_enabled = false;
        Ok(())
    }

    /// Enables or disables low-power mode. While enabled the device runs at
    /// 0.625Hz with the minimum number of averages.
    pub fn set_low_power(&mut self,
                         enable: bool)
                         -> Result<&mut Self, Error<T::Error>> {
        self.modify_register(Register::CTRL_REG3, |r| {
                register::set_bits(r, register::LP, enable)
            })?;
        Ok(self)
    }

    /// Selects the SPI serial interface mode
    pub fn set_spi_mode(&mut self,
                        mode: SpiMode)
                        -> Result<&mut Self, Error<T::Error>> {
        self.write_register_with_mask(Register::CTRL_REG3, mode)?;
        Ok(self)
    }

    /// Sets the operating mode ([`OperatingMode`], or its raw value 0..=3)
    pub fn set_operating_mode<M>(&mut self,
                                 mode: M)
                                 -> Result<&mut Self, Error<T::Error>>
        where M: TryInto<OperatingMode>,
              InvalidArgument: From<M::Error>
    {
        let mode = mode.try_into().map_err(InvalidArgument::from)?;
        self.write_register_with_mask(Register::CTRL_REG3, mode)?;
        Ok(self)
    }

    // Reads below always decode little endian.
    #[allow(dead_code)]
    fn set_endianness(&mut self, endianness: Endianness) -> Result<(), Error<T::Error>> {
        self.write_register_with_mask(Register::CTRL_REG4, endianness)
    }

    /// Enables or disables fast read (only the high part of DATA OUT is
    /// refreshed)
    pub fn set_fast_read(&mut self,
                         enable: bool)
                         -> Result<&mut Self, Error<T::Error>> {
        self.modify_register(Register::CTRL_REG5, |r| {
                register::set_bits(r, register::FAST_READ, enable)
            })?;
        Ok(self)
    }

    /// Enables or disables block data update. When enabled an output
    /// register is not refreshed until both its MSB and LSB have been read.
    pub fn set_block_data_update(&mut self,
                                 enable: bool)
                                 -> Result<&mut Self, Error<T::Error>> {
        self.modify_register(Register::CTRL_REG5, |r| {
                register::set_bits(r, register::BDU, enable)
            })?;
        Ok(self)
    }

    /// Selects the axes that raise the threshold interrupt
    /// ([`InterruptChannels`], or its raw `X = 4, Y = 2, Z = 1` mask).
    ///
    /// An empty set clears the axis enables and disables the interrupt; any
    /// other set replaces the axis enables and enables the interrupt.
    pub fn set_interrupt_channels<C>(&mut self,
                                     channels: C)
                                     -> Result<&mut Self, Error<T::Error>>
        where C: TryInto<InterruptChannels>,
              InvalidArgument: From<C::Error>
    {
        let channels = channels.try_into().map_err(InvalidArgument::from)?;
        self.modify_register(Register::INT_CFG, |r| channels.apply(r))?;
        Ok(self)
    }

    /// Sets the INT pin active level
    pub fn set_interrupt_polarity(&mut self,
                                  polarity: InterruptPolarity)
                                  -> Result<&mut Self, Error<T::Error>> {
        self.write_register_with_mask(Register::INT_CFG, polarity)?;
        Ok(self)
    }

    /// Latches the interrupt request until `INT_SRC` is read (`true`) or
    /// lets it follow the measurement (`false`)
    pub fn set_interrupt_latch(&mut self,
                               latched: bool)
                               -> Result<&mut Self, Error<T::Error>> {
        self.modify_register(Register::INT_CFG, |r| {
                register::set_bits(r, register::LIR, latched)
            })?;
        Ok(self)
    }

    /// Sets the interrupt threshold (absolute value, in LSB). Negative values
    /// are rejected.
    pub fn set_interrupt_threshold(&mut self,
                                   threshold: i16)
                                   -> Result<&mut Self, Error<T::Error>> {
        let threshold = u16(threshold).map_err(|_| InvalidArgument)?;
        let bytes = threshold.to_le_bytes();
        self.transaction(|t, h| t.write(h, Register::INT_THS_L.burst(), &bytes))?;
        Ok(self)
    }

    /// Current interrupt threshold
    pub fn interrupt_threshold(&mut self) -> Result<u16, Error<T::Error>> {
        let buffer = self.read_registers::<2>(Register::INT_THS_L)?;
        Ok(u16::from_le_bytes(buffer))
    }

    /// Reads and clears `INT_SRC`
    pub fn interrupt_source(&mut self) -> Result<InterruptSource, Error<T::Error>> {
        self.read_register(Register::INT_SRC).map(InterruptSource::from)
    }

    /// Data ready and overrun flags
    pub fn status(&mut self) -> Result<Status, Error<T::Error>> {
        self.read_register(Register::STATUS_REG).map(Status::from)
    }

    /// Raw X axis measurement
    pub fn mag_x(&mut self) -> Result<i16, Error<T::Error>> {
        self.read_i16(Register::OUT_X_L)
    }

    /// Raw Y axis measurement
    pub fn mag_y(&mut self) -> Result<i16, Error<T::Error>> {
        self.read_i16(Register::OUT_Y_L)
    }

    /// Raw Z axis measurement
    pub fn mag_z(&mut self) -> Result<i16, Error<T::Error>> {
        self.read_i16(Register::OUT_Z_L)
    }

    /// Raw measurement of all three axes in a single burst read
    pub fn mag(&mut self) -> Result<Vector3<i16>, Error<T::Error>> {
        let buffer = self.read_registers::<6>(Register::OUT_X_L)?;

        Ok(Vector3::new(i16::from_le_bytes([buffer[0], buffer[1]]),
                        i16::from_le_bytes([buffer[2], buffer[3]]),
                        i16::from_le_bytes([buffer[4], buffer[5]])))
    }

    /// Temperature sensor measurement in Celsius. Only meaningful while the
    /// temperature sensor is enabled.
    pub fn temp(&mut self) -> Result<f32, Error<T::Error>> {
        let rt = self.raw_temp()?;
        Ok(f32(rt) / TEMP_SENSITIVITY + TEMP_ZERO_OFFSET)
    }

    /// Raw temperature sensor measurement
    ///
    /// - Resolution: 8 LSB/C, 0 at 25C
    pub fn raw_temp(&mut self) -> Result<i16, Error<T::Error>> {
        self.read_i16(Register::TEMP_OUT_L)
    }

    // Acquires a handle, runs `f` and releases it. A failed transfer drops
    // the handle without calling `close`.
    fn transaction<R, F>(&mut self, f: F) -> Result<R, Error<T::Error>>
        where F: FnOnce(&mut T, &mut T::Handle) -> Result<R, T::Error>
    {
        let mut handle = self.transport.open(&self.config).map_err(Error::Bus)?;
        let result = f(&mut self.transport, &mut handle).map_err(Error::Bus)?;
        self.transport.close(handle).map_err(Error::Bus)?;
        Ok(result)
    }

    fn modify_register<F>(&mut self, reg: Register, f: F) -> Result<(), Error<T::Error>>
        where F: FnOnce(u8) -> u8
    {
        self.transaction(|t, h| {
                let r = read_byte(t, h, reg)?;
                let w = f(r);
                trace!("lis3mdl: {=u8:#x} {=u8:#x} -> {=u8:#x}", reg.addr(), r, w);
                t.write(h, reg.addr(), &[w])
            })
    }

    fn write_register_with_mask<RB>(&mut self,
                                    reg: Register,
                                    v: RB)
                                    -> Result<(), Error<T::Error>>
        where RB: RegisterBits
    {
        self.modify_register(reg, |r| (r & !RB::mask()) | v.value())
    }

    fn set_bit_and_wait<D>(&mut self,
                           reg: Register,
                           bit: u8,
                           delay: &mut D)
                           -> Result<(), Error<T::Error>>
        where D: DelayMs<u8>
    {
        self.transaction(|t, h| {
                let r = read_byte(t, h, reg)?;
                t.write(h, reg.addr(), &[r | bit])?;
                delay.delay_ms(RESET_DELAY_MS);
                Ok(())
            })
    }

    fn read_register(&mut self, reg: Register) -> Result<u8, Error<T::Error>> {
        self.transaction(|t, h| read_byte(t, h, reg))
    }

    fn read_registers<const N: usize>(&mut self,
                                      reg: Register)
                                      -> Result<[u8; N], Error<T::Error>> {
        self.transaction(|t, h| {
                let mut buffer = [0u8; N];
                t.read(h, reg.burst(), &mut buffer)?;
                trace!("lis3mdl: read {=u8:#x} {=[u8]:x}", reg.burst(), &buffer[..]);
                Ok(buffer)
            })
    }

    fn read_i16(&mut self, reg: Register) -> Result<i16, Error<T::Error>> {
        self.read_registers::<2>(reg).map(i16::from_le_bytes)
    }
}

fn read_byte<T>(t: &mut T, h: &mut T::Handle, reg: Register) -> Result<u8, T::Error>
    where T: Transport
{
    let mut buffer = [0u8; 1];
    t.read(h, reg.addr(), &mut buffer)?;
    Ok(buffer[0])
}
