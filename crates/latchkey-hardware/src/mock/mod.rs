//! Mock port implementations for testing and development.
//!
//! This module provides simulated peripherals that can be controlled
//! programmatically without requiring physical hardware. Each mock comes as
//! a `(device, handle)` pair: the device implements the port trait the
//! controller consumes, the handle drives and inspects the simulated
//! hardware from the test side. Devices are cheap clones over shared state,
//! so one mock can serve several port roles at once.

pub mod clock;
pub mod gpio;
pub mod servo;
pub mod sounder;

// Re-export commonly used types
pub use clock::{MockClock, MockClockHandle};
pub use gpio::{MockGpio, MockGpioHandle};
pub use servo::{MockServo, MockServoHandle};
pub use sounder::{MockSounder, MockSounderHandle, ToneCommand};
