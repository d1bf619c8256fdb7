//! Hardware port abstraction layer for the latchkey door-lock controller.
//!
//! This crate defines the trait seams between the lock's control logic and
//! the physical peripherals of the prop: button inputs, indicator LEDs, the
//! bolt servo, the buzzer and a monotonic clock. The controller in
//! `latchkey-control` is generic over these traits, so it runs unchanged
//! against the mock implementations shipped here or against a real GPIO
//! backend.
//!
//! # Design
//!
//! - **Synchronous**: the lock is a single-threaded polling loop; every
//!   port call completes immediately or fails. No port is allowed to block
//!   for feedback timing — the controller does its own timing through the
//!   [`Clock`](traits::Clock) port.
//! - **Error-aware**: all fallible operations return [`Result`] with a
//!   [`HardwareError`].
//! - **Mock-first**: the only implementations shipped are mocks (the
//!   `(device, handle)` pairs under [`mock`]); real register-level backends
//!   are deliberately out of scope and live behind the same traits.
//!
//! # Examples
//!
//! ```
//! use latchkey_hardware::mock::{MockGpio, MockClock};
//! use latchkey_hardware::traits::{Clock, InputPort};
//! use latchkey_hardware::types::{Level, PinMode};
//! use latchkey_core::PinId;
//!
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let (mut gpio, gpio_handle) = MockGpio::new();
//! let (clock, clock_handle) = MockClock::new();
//!
//! let button = PinId::new(4)?;
//! InputPort::configure(&mut gpio, button, PinMode::InputPullup)?;
//!
//! gpio_handle.set_level(button, Level::Low);
//! clock_handle.advance(51);
//!
//! assert!(gpio.read(button)?.is_low());
//! assert_eq!(clock.now_ms(), 51);
//! # Ok(())
//! # }
//! ```

pub mod error;
pub mod mock;
pub mod traits;
pub mod types;

pub use error::{HardwareError, Result};
pub use traits::{Actuator, Clock, InputPort, OutputPort, Sounder};
pub use types::{Level, PinMode};
