//! Controller configuration.

use latchkey_core::{
    LockState, PinAssignments, Result, SecretCode,
    constants::{DEBOUNCE_WINDOW_MS, FEEDBACK_HOLD_MS},
};
use serde::{Deserialize, Serialize};

/// Full configuration surface of a [`LockController`](crate::LockController).
///
/// The default is the reference prop: factory code `1-2-3`, default
/// wiring, 50ms debounce, 1s feedback pulses, starting locked.
///
/// # Examples
///
/// ```
/// use latchkey_control::config::LockConfig;
/// use latchkey_core::LockState;
///
/// let config = LockConfig::default();
/// assert_eq!(config.initial_state, LockState::Locked);
/// assert_eq!(config.debounce_window_ms, 50);
/// ```
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LockConfig {
    /// Pin wiring for buttons, indicators, actuator and buzzer.
    pub pins: PinAssignments,

    /// The secret code.
    pub secret_code: SecretCode,

    /// Debounce window in milliseconds.
    pub debounce_window_ms: u64,

    /// Indicator pulse duration in milliseconds.
    pub feedback_hold_ms: u64,

    /// Bolt state applied at [`init`](crate::LockController::init).
    pub initial_state: LockState,
}

impl LockConfig {
    /// Validate the configuration as a whole.
    ///
    /// # Errors
    /// Returns an error if the pin set contains duplicates. Digit, code
    /// length and pin ranges are enforced by their own types at both
    /// construction and deserialization; the duplicate check is the only
    /// cross-field rule, re-run here.
    pub fn validate(&self) -> Result<()> {
        self.pins.validate()
    }
}

impl Default for LockConfig {
    fn default() -> Self {
        Self {
            pins: PinAssignments::default(),
            secret_code: SecretCode::default(),
            debounce_window_ms: DEBOUNCE_WINDOW_MS,
            feedback_hold_ms: FEEDBACK_HOLD_MS,
            initial_state: LockState::Locked,
        }
    }
}
