//! Hardware port trait definitions.
//!
//! These traits establish the contract between the lock controller and the
//! physical peripherals it drives (buttons, LEDs, bolt servo, buzzer and a
//! monotonic clock), enabling substitution between mock and real hardware
//! implementations.
//!
//! All traits are synchronous: the controller is a single-threaded polling
//! loop with no async surface, so a port call either completes immediately
//! or fails. Implementations must not block for feedback timing; the
//! controller handles all timing itself through the [`Clock`] port.

use crate::error::Result;
use crate::types::{Level, PinMode};
use latchkey_core::PinId;
use std::time::Duration;

/// Digital input port.
///
/// # Examples
///
/// ```
/// use latchkey_hardware::traits::InputPort;
/// use latchkey_hardware::types::{Level, PinMode};
/// use latchkey_hardware::Result;
/// use latchkey_core::PinId;
///
/// fn is_pressed<I: InputPort>(gpio: &I, pin: PinId) -> Result<bool> {
///     // Pull-up wiring: pressed reads low.
///     Ok(gpio.read(pin)?.is_low())
/// }
/// ```
pub trait InputPort {
    /// Configure a pin for input.
    ///
    /// # Errors
    ///
    /// Returns an error if the pin cannot be configured or `mode` is not an
    /// input mode.
    fn configure(&mut self, pin: PinId, mode: PinMode) -> Result<()>;

    /// Sample the current level of an input pin.
    ///
    /// # Errors
    ///
    /// Returns an error if the pin is not configured for input or the read
    /// fails.
    fn read(&self, pin: PinId) -> Result<Level>;
}

/// Digital output port.
pub trait OutputPort {
    /// Configure a pin for output.
    ///
    /// # Errors
    ///
    /// Returns an error if the pin cannot be configured or `mode` is not
    /// [`PinMode::Output`].
    fn configure(&mut self, pin: PinId, mode: PinMode) -> Result<()>;

    /// Drive an output pin to the given level.
    ///
    /// # Errors
    ///
    /// Returns an error if the pin is not configured for output or the
    /// write fails.
    fn write(&mut self, pin: PinId, level: Level) -> Result<()>;
}

/// Bolt actuator port (servo abstraction).
///
/// The lock only ever commands two positions (thrown and withdrawn), but
/// the port accepts any angle in `0..=180` so calibration offsets stay an
/// implementation concern.
pub trait Actuator {
    /// Move the servo on `pin` to `degrees` (0-180).
    ///
    /// # Errors
    ///
    /// Returns an error if the angle is out of range or the command fails.
    fn set_angle(&mut self, pin: PinId, degrees: u16) -> Result<()>;
}

/// Sound feedback port (buzzer abstraction).
pub trait Sounder {
    /// Start a tone at `frequency_hz`, optionally self-stopping after
    /// `duration`.
    ///
    /// With `duration == None` the tone runs until [`stop`](Sounder::stop).
    ///
    /// # Errors
    ///
    /// Returns an error if the port cannot generate the tone.
    fn play_tone(&mut self, pin: PinId, frequency_hz: u16, duration: Option<Duration>)
    -> Result<()>;

    /// Silence the pin.
    ///
    /// # Errors
    ///
    /// Returns an error if the command fails.
    fn stop(&mut self, pin: PinId) -> Result<()>;
}

/// Monotonic millisecond clock.
///
/// Drives debounce windows and feedback deadlines. The value has no wall
/// clock meaning; only differences matter, and it must never go backwards.
pub trait Clock {
    /// Milliseconds since an arbitrary fixed origin.
    fn now_ms(&self) -> u64;
}
