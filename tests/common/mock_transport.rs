//! Mock transport implementation for testing the LIS3MDL driver

use std::cell::RefCell;
use std::collections::HashMap;
use std::rc::Rc;

use embedded_hal::blocking::delay::DelayMs;
use lis3mdl::{Config, Transport};

/// Auto-increment bit of the sub-address
const AUTO_INCREMENT: u8 = 0x80;

/// Records operations performed on the mock transport
#[derive(Debug, Clone, PartialEq)]
pub enum Operation {
    /// A handle was opened
    Open {
        /// 7-bit device address
        address: u8,
        /// Bus controller index
        controller: u8,
        /// Bus clock in Hz
        clock_hz: u32,
    },
    /// Register read
    Read {
        /// Sub-address as sent on the bus
        register: u8,
        /// Number of bytes read
        len: usize,
    },
    /// Register write
    Write {
        /// Sub-address as sent on the bus
        register: u8,
        /// Bytes written
        bytes: Vec<u8>,
    },
    /// The driver blocked on the delay provider
    Delay {
        /// Requested milliseconds
        ms: u32,
    },
    /// A handle was closed
    Close,
}

impl Operation {
    /// `true` for operations that reach the bus
    pub fn is_bus(&self) -> bool {
        !matches!(self, Operation::Delay { .. })
    }
}

/// Failure reported by the mock
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MockError {
    /// Injected open failure
    Open,
    /// Injected read failure
    Read,
    /// Injected write failure
    Write,
    /// Injected close failure
    Close,
}

/// Shared state for mock transport (uses interior mutability)
#[derive(Debug)]
struct MockState {
    /// Simulated register values
    registers: HashMap<u8, u8>,

    /// Operations log for verification
    operations: Vec<Operation>,

    /// Handles opened and not yet closed
    open_handles: usize,

    /// Failure injection flags
    fail_next_open: bool,
    fail_next_read: bool,
    fail_next_write: bool,
    fail_next_close: bool,
}

impl MockState {
    fn new() -> Self {
        let mut state = Self {
            registers: HashMap::new(),
            operations: Vec::new(),
            open_handles: 0,
            fail_next_open: false,
            fail_next_read: false,
            fail_next_write: false,
            fail_next_close: false,
        };

        // WHO_AM_I
        state.registers.insert(0x0F, 0x3D);
        // Power-on defaults
        state.registers.insert(0x20, 0x10);
        state.registers.insert(0x22, 0x03);
        state.registers.insert(0x30, 0x08);

        state
    }
}

/// Open handle of the mock
#[derive(Debug)]
pub struct MockHandle {
    _id: usize,
}

/// Mock transport with a shared state, so tests keep a handle on it after
/// moving a clone into the driver
#[derive(Debug, Clone)]
pub struct MockTransport {
    state: Rc<RefCell<MockState>>,
}

impl MockTransport {
    /// New mock with LIS3MDL power-on register values
    pub fn new() -> Self {
        Self { state: Rc::new(RefCell::new(MockState::new())) }
    }

    /// Set a register value
    pub fn set_register(&self, register: u8, value: u8) {
        self.state.borrow_mut().registers.insert(register, value);
    }

    /// Current register value (0 if never written)
    pub fn register(&self, register: u8) -> u8 {
        self.state
            .borrow()
            .registers
            .get(&register)
            .copied()
            .unwrap_or(0)
    }

    /// Store a little-endian 16-bit value at `register` and `register + 1`
    pub fn set_i16(&self, register: u8, value: i16) {
        let [lo, hi] = value.to_le_bytes();
        self.set_register(register, lo);
        self.set_register(register + 1, hi);
    }

    /// Snapshot of the operation log
    pub fn operations(&self) -> Vec<Operation> {
        self.state.borrow().operations.clone()
    }

    /// Number of logged operations that reached the bus
    pub fn bus_operation_count(&self) -> usize {
        self.state
            .borrow()
            .operations
            .iter()
            .filter(|op| op.is_bus())
            .count()
    }

    /// Handles opened and not yet closed
    pub fn open_handles(&self) -> usize {
        self.state.borrow().open_handles
    }

    /// Fail the next `open`
    pub fn fail_next_open(&self) {
        self.state.borrow_mut().fail_next_open = true;
    }

    /// Fail the next `read`
    pub fn fail_next_read(&self) {
        self.state.borrow_mut().fail_next_read = true;
    }

    /// Fail the next `write`
    pub fn fail_next_write(&self) {
        self.state.borrow_mut().fail_next_write = true;
    }

    /// Fail the next `close`
    pub fn fail_next_close(&self) {
        self.state.borrow_mut().fail_next_close = true;
    }

    fn log(&self, op: Operation) {
        self.state.borrow_mut().operations.push(op);
    }
}

impl Default for MockTransport {
    fn default() -> Self {
        Self::new()
    }
}

impl Transport for MockTransport {
    type Error = MockError;
    type Handle = MockHandle;

    fn open(&mut self, config: &Config) -> Result<MockHandle, MockError> {
        let mut state = self.state.borrow_mut();
        if state.fail_next_open {
            state.fail_next_open = false;
            return Err(MockError::Open);
        }
        state.operations.push(Operation::Open {
            address: config.get_address().addr(),
            controller: config.get_controller(),
            clock_hz: config.get_clock().hz(),
        });
        state.open_handles += 1;
        Ok(MockHandle { _id: state.operations.len() })
    }

    fn read(&mut self,
            _handle: &mut MockHandle,
            register: u8,
            buffer: &mut [u8])
            -> Result<(), MockError> {
        let mut state = self.state.borrow_mut();
        if state.fail_next_read {
            state.fail_next_read = false;
            return Err(MockError::Read);
        }
        state.operations.push(Operation::Read { register,
                                                len: buffer.len() });
        let start = register & !AUTO_INCREMENT;
        for (i, byte) in buffer.iter_mut().enumerate() {
            *byte = state.registers
                         .get(&(start + i as u8))
                         .copied()
                         .unwrap_or(0);
        }
        Ok(())
    }

    fn write(&mut self,
             _handle: &mut MockHandle,
             register: u8,
             bytes: &[u8])
             -> Result<(), MockError> {
        let mut state = self.state.borrow_mut();
        if state.fail_next_write {
            state.fail_next_write = false;
            return Err(MockError::Write);
        }
        state.operations.push(Operation::Write { register,
                                                 bytes: bytes.to_vec() });
        let start = register & !AUTO_INCREMENT;
        for (i, byte) in bytes.iter().enumerate() {
            state.registers.insert(start + i as u8, *byte);
        }
        Ok(())
    }

    fn close(&mut self, _handle: MockHandle) -> Result<(), MockError> {
        let mut state = self.state.borrow_mut();
        if state.fail_next_close {
            state.fail_next_close = false;
            return Err(MockError::Close);
        }
        state.operations.push(Operation::Close);
        state.open_handles -= 1;
        Ok(())
    }
}

/// Delay provider that logs into the transport's operation log instead of
/// sleeping
pub struct MockDelay {
    transport: MockTransport,
}

impl MockDelay {
    /// Delay sharing `transport`'s log
    pub fn new(transport: &MockTransport) -> Self {
        Self { transport: transport.clone() }
    }
}

impl DelayMs<u8> for MockDelay {
    fn delay_ms(&mut self, ms: u8) {
        self.transport.log(Operation::Delay { ms: u32::from(ms) });
    }
}
