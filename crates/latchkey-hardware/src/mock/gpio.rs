//! Mock GPIO implementation for testing and development.
//!
//! Simulates a bank of digital pins. Input levels are set from the test
//! side through a [`MockGpioHandle`]; output writes are recorded per pin so
//! tests can assert on indicator behavior.

use crate::{
    Result,
    error::HardwareError,
    traits::{InputPort, OutputPort},
    types::{Level, PinMode},
};
use latchkey_core::PinId;
use std::collections::HashMap;
use std::sync::{Arc, Mutex};

#[derive(Debug, Default)]
struct PinState {
    mode: Option<PinMode>,
    /// Current simulated input level.
    level: Option<Level>,
    /// Every level ever written to this pin, oldest first.
    writes: Vec<Level>,
}

#[derive(Debug, Default)]
struct GpioState {
    pins: HashMap<u8, PinState>,
}

/// Mock GPIO bank.
///
/// Cloning is cheap and clones share the underlying pin state, which lets
/// the same bank serve as both the [`InputPort`] and [`OutputPort`] of a
/// controller.
///
/// # Examples
///
/// ```
/// use latchkey_hardware::mock::MockGpio;
/// use latchkey_hardware::traits::{InputPort, OutputPort};
/// use latchkey_hardware::types::{Level, PinMode};
/// use latchkey_core::PinId;
///
/// # fn main() -> Result<(), Box<dyn std::error::Error>> {
/// let (mut gpio, handle) = MockGpio::new();
/// let button = PinId::new(4)?;
///
/// InputPort::configure(&mut gpio, button, PinMode::InputPullup)?;
/// assert_eq!(gpio.read(button)?, Level::High); // pull-up idle
///
/// handle.set_level(button, Level::Low); // press
/// assert_eq!(gpio.read(button)?, Level::Low);
/// # Ok(())
/// # }
/// ```
#[derive(Debug, Clone)]
pub struct MockGpio {
    state: Arc<Mutex<GpioState>>,
}

impl MockGpio {
    /// Create a new mock GPIO bank and its controlling handle.
    pub fn new() -> (Self, MockGpioHandle) {
        let state = Arc::new(Mutex::new(GpioState::default()));
        let gpio = Self {
            state: Arc::clone(&state),
        };
        let handle = MockGpioHandle { state };
        (gpio, handle)
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, GpioState> {
        // A poisoned mutex means a test already panicked; propagating the
        // inner state is still the most useful behavior.
        self.state.lock().unwrap_or_else(|e| e.into_inner())
    }
}

impl InputPort for MockGpio {
    fn configure(&mut self, pin: PinId, mode: PinMode) -> Result<()> {
        if !mode.is_input() {
            return Err(HardwareError::invalid_value(format!(
                "{pin} configured through InputPort with non-input mode {mode:?}"
            )));
        }
        let mut state = self.lock();
        let slot = state.pins.entry(pin.as_u8()).or_default();
        slot.mode = Some(mode);
        // Pull-up idles high; a floating input idles low until driven.
        if slot.level.is_none() {
            slot.level = Some(match mode {
                PinMode::InputPullup => Level::High,
                _ => Level::Low,
            });
        }
        Ok(())
    }

    fn read(&self, pin: PinId) -> Result<Level> {
        let state = self.lock();
        let slot = state
            .pins
            .get(&pin.as_u8())
            .filter(|s| s.mode.is_some_and(PinMode::is_input))
            .ok_or_else(|| {
                HardwareError::not_configured(format!("{pin} is not an input"))
            })?;
        slot.level
            .ok_or_else(|| HardwareError::read(format!("{pin} has no level")))
    }
}

impl OutputPort for MockGpio {
    fn configure(&mut self, pin: PinId, mode: PinMode) -> Result<()> {
        if mode != PinMode::Output {
            return Err(HardwareError::invalid_value(format!(
                "{pin} configured through OutputPort with mode {mode:?}"
            )));
        }
        let mut state = self.lock();
        state.pins.entry(pin.as_u8()).or_default().mode = Some(PinMode::Output);
        Ok(())
    }

    fn write(&mut self, pin: PinId, level: Level) -> Result<()> {
        let mut state = self.lock();
        let slot = state.pins.entry(pin.as_u8()).or_default();
        if slot.mode != Some(PinMode::Output) {
            return Err(HardwareError::not_configured(format!(
                "{pin} is not an output"
            )));
        }
        slot.writes.push(level);
        slot.level = Some(level);
        Ok(())
    }
}

/// Handle for driving and inspecting a [`MockGpio`].
///
/// # Examples
///
/// ```
/// use latchkey_hardware::mock::MockGpio;
/// use latchkey_hardware::traits::OutputPort;
/// use latchkey_hardware::types::{Level, PinMode};
/// use latchkey_core::PinId;
///
/// # fn main() -> Result<(), Box<dyn std::error::Error>> {
/// let (mut gpio, handle) = MockGpio::new();
/// let led = PinId::new(8)?;
///
/// OutputPort::configure(&mut gpio, led, PinMode::Output)?;
/// gpio.write(led, Level::High)?;
///
/// assert_eq!(handle.output_level(led), Some(Level::High));
/// assert_eq!(handle.writes(led), vec![Level::High]);
/// # Ok(())
/// # }
/// ```
#[derive(Debug, Clone)]
pub struct MockGpioHandle {
    state: Arc<Mutex<GpioState>>,
}

impl MockGpioHandle {
    fn lock(&self) -> std::sync::MutexGuard<'_, GpioState> {
        self.state.lock().unwrap_or_else(|e| e.into_inner())
    }

    /// Drive the simulated level of an input pin.
    ///
    /// The level persists until changed again, like a held or released
    /// button.
    pub fn set_level(&self, pin: PinId, level: Level) {
        let mut state = self.lock();
        state.pins.entry(pin.as_u8()).or_default().level = Some(level);
    }

    /// The level an output pin was last driven to, if any.
    pub fn output_level(&self, pin: PinId) -> Option<Level> {
        let state = self.lock();
        state
            .pins
            .get(&pin.as_u8())
            .filter(|s| s.mode == Some(PinMode::Output))
            .and_then(|s| s.level)
    }

    /// Every write made to a pin, oldest first.
    pub fn writes(&self, pin: PinId) -> Vec<Level> {
        let state = self.lock();
        state
            .pins
            .get(&pin.as_u8())
            .map(|s| s.writes.clone())
            .unwrap_or_default()
    }

    /// The configured mode of a pin, if any.
    pub fn mode(&self, pin: PinId) -> Option<PinMode> {
        self.lock().pins.get(&pin.as_u8()).and_then(|s| s.mode)
    }
}
