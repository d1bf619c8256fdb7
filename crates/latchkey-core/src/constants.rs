//! Design constants for the latchkey door-lock controller.
//!
//! These values describe the reference prop wiring (an Uno-class board with
//! three digit buttons, a confirm button, two indicator LEDs, a bolt servo
//! and a piezo buzzer) plus the timing constants of the control loop.
//!
//! Buttons are wired with internal pull-ups, so the idle level is high and
//! a press reads low. All timestamps are monotonic milliseconds supplied by
//! the hardware clock port.

/// Number of debounced button channels (digit 1-3 plus confirm).
pub const BUTTON_COUNT: usize = 4;

/// How long a raw reading must hold steady before it is accepted (ms).
pub const DEBOUNCE_WINDOW_MS: u64 = 50;

/// How long an indicator pulse (unlock/lock/incorrect feedback) stays lit (ms).
pub const FEEDBACK_HOLD_MS: u64 = 1000;

// Default pin assignments for the reference wiring.

/// Digit-1 button pin.
pub const DEFAULT_DIGIT1_PIN: u8 = 4;
/// Digit-2 button pin.
pub const DEFAULT_DIGIT2_PIN: u8 = 3;
/// Digit-3 button pin.
pub const DEFAULT_DIGIT3_PIN: u8 = 2;
/// Confirm/lock button pin.
pub const DEFAULT_CONFIRM_PIN: u8 = 5;
/// Green (unlocked) indicator LED pin.
pub const DEFAULT_GREEN_PIN: u8 = 7;
/// Red (locked) indicator LED pin.
pub const DEFAULT_RED_PIN: u8 = 8;
/// Bolt servo signal pin.
pub const DEFAULT_ACTUATOR_PIN: u8 = 9;
/// Buzzer pin.
pub const DEFAULT_SOUND_PIN: u8 = 12;

/// Highest usable digital pin number (Mega-class boards).
pub const MAX_PIN: u8 = 53;

/// Servo angle for the thrown (locked) bolt.
pub const LOCKED_ANGLE: u16 = 0;

/// Servo angle for the withdrawn (unlocked) bolt.
pub const UNLOCKED_ANGLE: u16 = 180;

/// Upper bound for servo angle commands.
pub const MAX_SERVO_ANGLE: u16 = 180;

/// Success chirp: frequency (Hz) and duration (ms).
pub const SUCCESS_TONE_HZ: u16 = 1500;
/// Success chirp duration in milliseconds.
pub const SUCCESS_TONE_MS: u64 = 100;

/// Failure buzz: frequency (Hz) and duration (ms).
pub const FAILURE_TONE_HZ: u16 = 500;
/// Failure buzz duration in milliseconds.
pub const FAILURE_TONE_MS: u64 = 500;

/// Shortest accepted secret code.
pub const MIN_CODE_LENGTH: usize = 1;

/// Longest accepted secret code.
pub const MAX_CODE_LENGTH: usize = 8;

/// Factory secret code.
pub const DEFAULT_CODE: [u8; 3] = [1, 2, 3];

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_pins_are_distinct() {
        let pins = [
            DEFAULT_DIGIT1_PIN,
            DEFAULT_DIGIT2_PIN,
            DEFAULT_DIGIT3_PIN,
            DEFAULT_CONFIRM_PIN,
            DEFAULT_GREEN_PIN,
            DEFAULT_RED_PIN,
            DEFAULT_ACTUATOR_PIN,
            DEFAULT_SOUND_PIN,
        ];
        for (i, a) in pins.iter().enumerate() {
            for b in &pins[i + 1..] {
                assert_ne!(a, b);
            }
        }
    }

    #[test]
    fn default_code_fits_length_bounds() {
        assert!(DEFAULT_CODE.len() >= MIN_CODE_LENGTH);
        assert!(DEFAULT_CODE.len() <= MAX_CODE_LENGTH);
    }

    #[test]
    fn servo_angles_within_range() {
        assert!(LOCKED_ANGLE <= MAX_SERVO_ANGLE);
        assert!(UNLOCKED_ANGLE <= MAX_SERVO_ANGLE);
    }
}
