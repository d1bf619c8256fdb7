//! Mock bolt servo for testing and development.

use crate::{Result, error::HardwareError, traits::Actuator};
use latchkey_core::{PinId, constants::MAX_SERVO_ANGLE};
use std::collections::HashMap;
use std::sync::{Arc, Mutex};

#[derive(Debug, Default)]
struct ServoState {
    /// Angle command history per pin, oldest first.
    angles: HashMap<u8, Vec<u16>>,
}

/// Mock servo that records every angle command.
///
/// # Examples
///
/// ```
/// use latchkey_hardware::mock::MockServo;
/// use latchkey_hardware::traits::Actuator;
/// use latchkey_core::PinId;
///
/// # fn main() -> Result<(), Box<dyn std::error::Error>> {
/// let (mut servo, handle) = MockServo::new();
/// let pin = PinId::new(9)?;
///
/// servo.set_angle(pin, 180)?;
/// assert_eq!(handle.last_angle(pin), Some(180));
/// # Ok(())
/// # }
/// ```
#[derive(Debug, Clone)]
pub struct MockServo {
    state: Arc<Mutex<ServoState>>,
}

impl MockServo {
    /// Create a new mock servo and its inspection handle.
    pub fn new() -> (Self, MockServoHandle) {
        let state = Arc::new(Mutex::new(ServoState::default()));
        let servo = Self {
            state: Arc::clone(&state),
        };
        let handle = MockServoHandle { state };
        (servo, handle)
    }
}

impl Actuator for MockServo {
    fn set_angle(&mut self, pin: PinId, degrees: u16) -> Result<()> {
        if degrees > MAX_SERVO_ANGLE {
            return Err(HardwareError::invalid_value(format!(
                "Servo angle must be 0-{MAX_SERVO_ANGLE}, got {degrees}"
            )));
        }
        let mut state = self.state.lock().unwrap_or_else(|e| e.into_inner());
        state.angles.entry(pin.as_u8()).or_default().push(degrees);
        Ok(())
    }
}

/// Handle for inspecting a [`MockServo`].
#[derive(Debug, Clone)]
pub struct MockServoHandle {
    state: Arc<Mutex<ServoState>>,
}

impl MockServoHandle {
    /// The most recent angle commanded on a pin, if any.
    pub fn last_angle(&self, pin: PinId) -> Option<u16> {
        let state = self.state.lock().unwrap_or_else(|e| e.into_inner());
        state.angles.get(&pin.as_u8()).and_then(|a| a.last().copied())
    }

    /// Every angle commanded on a pin, oldest first.
    pub fn angles(&self, pin: PinId) -> Vec<u16> {
        let state = self.state.lock().unwrap_or_else(|e| e.into_inner());
        state.angles.get(&pin.as_u8()).cloned().unwrap_or_default()
    }
}
