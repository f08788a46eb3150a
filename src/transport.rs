//! Bus transaction providers
//!
//! The driver never holds on to a bus connection: every operation goes
//! through [`Transport::open`], one or two register transfers, and
//! [`Transport::close`].

use hal::blocking::i2c::{Write, WriteRead};

use crate::conf::Config;

/// Largest payload [`HalTransport`] sends after the sub-address
pub const MAX_WRITE: usize = 32;

/// Synchronous register-level bus access
pub trait Transport {
    /// Bus error
    type Error;
    /// Open connection to the device
    type Handle;

    /// Opens a connection using the address, controller and clock in `config`
    fn open(&mut self, config: &Config) -> Result<Self::Handle, Self::Error>;

    /// Fills `buffer` starting at sub-address `register`
    fn read(&mut self,
            handle: &mut Self::Handle,
            register: u8,
            buffer: &mut [u8])
            -> Result<(), Self::Error>;

    /// Writes `bytes` starting at sub-address `register`
    fn write(&mut self,
             handle: &mut Self::Handle,
             register: u8,
             bytes: &[u8])
             -> Result<(), Self::Error>;

    /// Releases the connection
    fn close(&mut self, handle: Self::Handle) -> Result<(), Self::Error>;
}

/// [`Transport`] over an `embedded-hal` blocking I2C bus
///
/// The bus is already configured by the HAL, so opening a handle only binds
/// the device address; the controller index and clock in [`Config`] are not
/// used.
pub struct HalTransport<I2C> {
    i2c: I2C,
}

impl<I2C> HalTransport<I2C> {
    /// Wraps an I2C peripheral
    pub fn new(i2c: I2C) -> Self {
        HalTransport { i2c }
    }

    /// Returns the I2C peripheral
    pub fn release(self) -> I2C {
        self.i2c
    }
}

/// [`HalTransport`] errors
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum HalError<E> {
    /// The I2C bus failed
    I2c(E),
    /// Payload longer than [`MAX_WRITE`]; nothing was sent
    PayloadTooLong(usize),
}

/// Open connection of a [`HalTransport`]
#[derive(Debug)]
pub struct HalHandle {
    address: u8,
}

impl<I2C, E> Transport for HalTransport<I2C>
    where I2C: WriteRead<Error = E> + Write<Error = E>
{
    type Error = HalError<E>;
    type Handle = HalHandle;

    fn open(&mut self, config: &Config) -> Result<HalHandle, HalError<E>> {
        Ok(HalHandle { address: config.get_address().addr() })
    }

    fn read(&mut self,
            handle: &mut HalHandle,
            register: u8,
            buffer: &mut [u8])
            -> Result<(), HalError<E>> {
        self.i2c
            .write_read(handle.address, &[register], buffer)
            .map_err(HalError::I2c)
    }

    fn write(&mut self,
             handle: &mut HalHandle,
             register: u8,
             bytes: &[u8])
             -> Result<(), HalError<E>> {
        let len = bytes.len();
        if len > MAX_WRITE {
            return Err(HalError::PayloadTooLong(len));
        }
        let mut buffer = [0u8; MAX_WRITE + 1];
        buffer[0] = register;
        buffer[1..=len].copy_from_slice(bytes);

        self.i2c
            .write(handle.address, &buffer[..=len])
            .map_err(HalError::I2c)
    }

    fn close(&mut self, _handle: HalHandle) -> Result<(), HalError<E>> {
        Ok(())
    }
}
