//! The polling controller that ties the debouncer and code-entry lock to
//! the hardware ports.
//!
//! One [`poll`](LockController::poll) call is one tick of the firmware
//! loop: sample the four buttons, debounce, feed any digit presses into
//! the [`CodeEntryLock`], and on a confirm press either check the attempt
//! (when locked) or re-throw the bolt (when unlocked).
//!
//! # Feedback timing
//!
//! Indicator pulses (green on unlock, red on lock and on a failed
//! attempt) are driven by a stored deadline that `poll` checks every
//! tick — the loop never sleeps, so button sampling continues during
//! feedback.
//!
//! # Examples
//!
//! ```
//! use latchkey_control::{LockConfig, LockController};
//! use latchkey_hardware::mock::{MockClock, MockGpio, MockServo, MockSounder};
//!
//! # fn main() -> latchkey_control::Result<()> {
//! let (gpio, _gpio_handle) = MockGpio::new();
//! let (servo, _servo_handle) = MockServo::new();
//! let (sounder, _sounder_handle) = MockSounder::new();
//! let (clock, _clock_handle) = MockClock::new();
//!
//! let mut controller = LockController::new(
//!     LockConfig::default(),
//!     gpio.clone(),
//!     gpio,
//!     servo,
//!     sounder,
//!     clock,
//! )?;
//! controller.init()?;
//!
//! let events = controller.poll()?;
//! assert!(events.is_empty()); // nothing pressed yet
//! # Ok(())
//! # }
//! ```

use crate::{
    config::LockConfig,
    debounce::{Button, ButtonDebouncer},
    error::Result,
    lock::CodeEntryLock,
};
use latchkey_core::{
    Digit, LockState, PinAssignments, PinId, SecretCode,
    constants::{
        BUTTON_COUNT, FAILURE_TONE_HZ, FAILURE_TONE_MS, LOCKED_ANGLE, SUCCESS_TONE_HZ,
        SUCCESS_TONE_MS, UNLOCKED_ANGLE,
    },
};
use latchkey_hardware::{
    traits::{Actuator, Clock, InputPort, OutputPort, Sounder},
    types::{Level, PinMode},
};
use std::fmt;
use std::time::Duration;
use tracing::{debug, info, warn};

/// Something the controller did in response to input.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LockEvent {
    /// A digit press was accepted into the attempt.
    DigitEntered {
        /// The digit entered.
        digit: Digit,
        /// Digits in the attempt after this one.
        entered: usize,
    },

    /// A digit press arrived with the attempt buffer already full and was
    /// dropped.
    DigitRejected {
        /// The rejected digit.
        digit: Digit,
    },

    /// A confirmed attempt matched and the bolt was withdrawn.
    Unlocked,

    /// The confirm press re-threw the bolt.
    Locked,

    /// A confirmed attempt did not match; attempt cleared, bolt untouched.
    IncorrectCode {
        /// Digits that had been entered.
        entered: usize,
    },
}

impl fmt::Display for LockEvent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            LockEvent::DigitEntered { digit, entered } => {
                write!(f, "digit {digit} entered ({entered} so far)")
            }
            LockEvent::DigitRejected { digit } => write!(f, "digit {digit} rejected (buffer full)"),
            LockEvent::Unlocked => write!(f, "unlocked"),
            LockEvent::Locked => write!(f, "locked"),
            LockEvent::IncorrectCode { entered } => {
                write!(f, "incorrect code ({entered} digits)")
            }
        }
    }
}

/// An indicator pulse in progress.
#[derive(Debug, Clone, Copy)]
struct Pulse {
    pin: PinId,
    until_ms: u64,
}

/// Polling lock controller, generic over the five hardware ports.
///
/// Single-instance, single-threaded: the owner calls
/// [`init`](LockController::init) once and then [`poll`](LockController::poll)
/// at a regular cadence comfortably shorter than the debounce window.
pub struct LockController<I, O, A, S, C> {
    input: I,
    output: O,
    actuator: A,
    sounder: S,
    clock: C,

    pins: PinAssignments,
    debouncer: ButtonDebouncer,
    lock: CodeEntryLock,
    feedback_hold_ms: u64,
    pulse: Option<Pulse>,
}

impl<I, O, A, S, C> LockController<I, O, A, S, C>
where
    I: InputPort,
    O: OutputPort,
    A: Actuator,
    S: Sounder,
    C: Clock,
{
    /// Build a controller from its configuration and ports.
    ///
    /// # Errors
    /// Returns an error if the configured pin set is invalid.
    pub fn new(
        config: LockConfig,
        input: I,
        output: O,
        actuator: A,
        sounder: S,
        clock: C,
    ) -> Result<Self> {
        config.validate()?;
        Ok(Self {
            input,
            output,
            actuator,
            sounder,
            clock,
            pins: config.pins,
            debouncer: ButtonDebouncer::with_window(config.debounce_window_ms),
            lock: CodeEntryLock::new(config.secret_code, config.initial_state),
            feedback_hold_ms: config.feedback_hold_ms,
            pulse: None,
        })
    }

    /// Configure all pins and drive the hardware to the configured initial
    /// state.
    ///
    /// # Errors
    /// Returns an error if any port rejects its configuration.
    pub fn init(&mut self) -> Result<()> {
        self.configure_pins()?;
        self.apply_bolt()?;
        self.lock.reset_attempt();
        info!(state = %self.lock.state(), "lock controller initialized");
        Ok(())
    }

    /// Run one tick of the control loop.
    ///
    /// Samples the buttons, debounces, applies any presses and expires
    /// feedback pulses. Returns the events this tick produced, oldest
    /// first (empty on a quiet tick).
    ///
    /// # Errors
    /// Returns an error if a port read or write fails.
    pub fn poll(&mut self) -> Result<Vec<LockEvent>> {
        let now_ms = self.clock.now_ms();
        self.expire_pulse(now_ms)?;

        let button_pins = self.pins.button_pins();
        let mut readings = [Level::High; BUTTON_COUNT];
        for (slot, pin) in readings.iter_mut().zip(button_pins) {
            *slot = self.input.read(pin)?;
        }
        self.debouncer.scan(readings, now_ms);

        let mut events = Vec::new();

        for button in [Button::Digit1, Button::Digit2, Button::Digit3] {
            if self.debouncer.consume_edge(button) {
                if let Some(value) = button.digit_value() {
                    let digit = Digit::new(value)?;
                    if self.lock.enter_digit(digit) {
                        events.push(LockEvent::DigitEntered {
                            digit,
                            entered: self.lock.entered_count(),
                        });
                    } else {
                        events.push(LockEvent::DigitRejected { digit });
                    }
                }
            }
        }

        if self.debouncer.consume_edge(Button::Confirm) {
            let event = if self.lock.state().is_locked() {
                if self.lock.check_attempt() {
                    self.unlock_action(now_ms)?;
                    LockEvent::Unlocked
                } else {
                    let entered = self.lock.entered_count();
                    self.incorrect_action(now_ms)?;
                    LockEvent::IncorrectCode { entered }
                }
            } else {
                self.lock_action(now_ms)?;
                LockEvent::Locked
            };
            events.push(event);
        }

        Ok(events)
    }

    /// Current bolt state.
    #[must_use]
    pub fn state(&self) -> LockState {
        self.lock.state()
    }

    /// Digits entered into the current attempt.
    #[must_use]
    pub fn entered_count(&self) -> usize {
        self.lock.entered_count()
    }

    /// Length of the secret code.
    #[must_use]
    pub fn code_length(&self) -> usize {
        self.lock.code_length()
    }

    /// The active pin wiring.
    #[must_use]
    pub fn pins(&self) -> &PinAssignments {
        &self.pins
    }

    /// Discard the in-progress attempt.
    pub fn reset_attempt(&mut self) {
        self.lock.reset_attempt();
    }

    /// Replace the secret code.
    ///
    /// The attempt buffer is rebuilt at the new length and any in-progress
    /// entry is discarded.
    pub fn set_secret_code(&mut self, secret: SecretCode) {
        self.lock.set_secret_code(secret);
    }

    /// Re-wire the controller to a new pin set.
    ///
    /// The whole set is validated before any pin is touched; on error the
    /// previous wiring stays fully in force. On success the new pins are
    /// configured, indicators and buzzer are quiesced, the bolt position is
    /// re-asserted on the new actuator pin and the debouncer restarts from
    /// idle.
    ///
    /// # Errors
    /// Returns an error if the set is invalid or reconfiguration fails.
    pub fn set_pin_assignments(&mut self, pins: PinAssignments) -> Result<()> {
        pins.validate()?;

        // Quiesce the old wiring before switching.
        if let Some(pulse) = self.pulse.take() {
            self.output.write(pulse.pin, Level::Low)?;
        }

        self.pins = pins;
        self.configure_pins()?;
        self.apply_bolt()?;
        self.debouncer.reset();
        info!("pin assignments updated");
        Ok(())
    }

    fn configure_pins(&mut self) -> Result<()> {
        for pin in self.pins.button_pins() {
            self.input.configure(pin, PinMode::InputPullup)?;
        }
        for pin in [
            self.pins.green_indicator,
            self.pins.red_indicator,
            self.pins.sound,
        ] {
            self.output.configure(pin, PinMode::Output)?;
        }
        self.output.write(self.pins.green_indicator, Level::Low)?;
        self.output.write(self.pins.red_indicator, Level::Low)?;
        self.sounder.stop(self.pins.sound)?;
        Ok(())
    }

    /// Drive the servo to match the current bolt state.
    fn apply_bolt(&mut self) -> Result<()> {
        let angle = if self.lock.state().is_locked() {
            LOCKED_ANGLE
        } else {
            UNLOCKED_ANGLE
        };
        self.actuator.set_angle(self.pins.actuator, angle)?;
        Ok(())
    }

    fn unlock_action(&mut self, now_ms: u64) -> Result<()> {
        self.lock.set_state(LockState::Unlocked);
        self.apply_bolt()?;
        self.start_pulse(self.pins.green_indicator, now_ms)?;
        self.sounder.play_tone(
            self.pins.sound,
            SUCCESS_TONE_HZ,
            Some(Duration::from_millis(SUCCESS_TONE_MS)),
        )?;
        self.lock.reset_attempt();
        info!("door unlocked");
        Ok(())
    }

    /// Re-throwing the bolt gives only the red pulse, no tone.
    fn lock_action(&mut self, now_ms: u64) -> Result<()> {
        self.lock.set_state(LockState::Locked);
        self.apply_bolt()?;
        self.start_pulse(self.pins.red_indicator, now_ms)?;
        self.lock.reset_attempt();
        info!("door locked");
        Ok(())
    }

    fn incorrect_action(&mut self, now_ms: u64) -> Result<()> {
        self.start_pulse(self.pins.red_indicator, now_ms)?;
        self.sounder.play_tone(
            self.pins.sound,
            FAILURE_TONE_HZ,
            Some(Duration::from_millis(FAILURE_TONE_MS)),
        )?;
        self.lock.reset_attempt();
        warn!("incorrect code entered");
        Ok(())
    }

    /// Light `pin` and schedule it to go dark after the feedback hold.
    fn start_pulse(&mut self, pin: PinId, now_ms: u64) -> Result<()> {
        if let Some(previous) = self.pulse.take() {
            self.output.write(previous.pin, Level::Low)?;
        }
        self.output.write(pin, Level::High)?;
        self.pulse = Some(Pulse {
            pin,
            until_ms: now_ms.saturating_add(self.feedback_hold_ms),
        });
        Ok(())
    }

    fn expire_pulse(&mut self, now_ms: u64) -> Result<()> {
        if let Some(pulse) = self.pulse {
            if now_ms >= pulse.until_ms {
                self.output.write(pulse.pin, Level::Low)?;
                self.pulse = None;
                debug!("feedback pulse expired");
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use latchkey_hardware::mock::{
        MockClock, MockClockHandle, MockGpio, MockGpioHandle, MockServo, MockServoHandle,
        MockSounder, MockSounderHandle,
    };

    struct Rig {
        controller: LockController<MockGpio, MockGpio, MockServo, MockSounder, MockClock>,
        gpio: MockGpioHandle,
        servo: MockServoHandle,
        sounder: MockSounderHandle,
        clock: MockClockHandle,
    }

    fn rig() -> Rig {
        rig_with(LockConfig::default())
    }

    fn rig_with(config: LockConfig) -> Rig {
        let (gpio, gpio_handle) = MockGpio::new();
        let (servo, servo_handle) = MockServo::new();
        let (sounder, sounder_handle) = MockSounder::new();
        let (clock, clock_handle) = MockClock::new();

        let mut controller =
            LockController::new(config, gpio.clone(), gpio, servo, sounder, clock).unwrap();
        controller.init().unwrap();

        Rig {
            controller,
            gpio: gpio_handle,
            servo: servo_handle,
            sounder: sounder_handle,
            clock: clock_handle,
        }
    }

    /// Press and release a button through a full debounce cycle,
    /// collecting every event produced along the way.
    fn press(rig: &mut Rig, pin: PinId) -> Vec<LockEvent> {
        let mut events = Vec::new();

        rig.gpio.set_level(pin, Level::Low);
        events.extend(rig.controller.poll().unwrap());
        rig.clock.advance(51);
        events.extend(rig.controller.poll().unwrap());

        rig.gpio.set_level(pin, Level::High);
        events.extend(rig.controller.poll().unwrap());
        rig.clock.advance(51);
        events.extend(rig.controller.poll().unwrap());

        events
    }

    #[test]
    fn test_init_matches_initial_state() {
        let rig = rig();
        let pins = *rig.controller.pins();

        assert_eq!(rig.controller.state(), LockState::Locked);
        assert_eq!(rig.servo.last_angle(pins.actuator), Some(LOCKED_ANGLE));
        assert_eq!(rig.gpio.output_level(pins.green_indicator), Some(Level::Low));
        assert_eq!(rig.gpio.output_level(pins.red_indicator), Some(Level::Low));
        assert_eq!(rig.sounder.stop_count(pins.sound), 1);
        assert_eq!(rig.gpio.mode(pins.digit1), Some(PinMode::InputPullup));
        assert_eq!(rig.gpio.mode(pins.sound), Some(PinMode::Output));
    }

    #[test]
    fn test_quiet_tick_produces_no_events() {
        let mut rig = rig();
        assert!(rig.controller.poll().unwrap().is_empty());
        rig.clock.advance(100);
        assert!(rig.controller.poll().unwrap().is_empty());
    }

    #[test]
    fn test_digit_presses_accumulate() {
        let mut rig = rig();
        let pins = *rig.controller.pins();

        let events = press(&mut rig, pins.digit1);
        assert_eq!(events.len(), 1);
        assert!(matches!(
            events[0],
            LockEvent::DigitEntered { entered: 1, .. }
        ));

        press(&mut rig, pins.digit2);
        assert_eq!(rig.controller.entered_count(), 2);
    }

    #[test]
    fn test_correct_code_unlocks() {
        let mut rig = rig();
        let pins = *rig.controller.pins();

        press(&mut rig, pins.digit1);
        press(&mut rig, pins.digit2);
        press(&mut rig, pins.digit3);
        let events = press(&mut rig, pins.confirm);

        assert_eq!(events, vec![LockEvent::Unlocked]);
        assert_eq!(rig.controller.state(), LockState::Unlocked);
        assert_eq!(rig.servo.last_angle(pins.actuator), Some(UNLOCKED_ANGLE));
        assert_eq!(
            rig.gpio.output_level(pins.green_indicator),
            Some(Level::High)
        );
        assert_eq!(rig.sounder.last_tone().unwrap().frequency_hz, SUCCESS_TONE_HZ);
        // Attempt cleared by the action.
        assert_eq!(rig.controller.entered_count(), 0);
    }

    #[test]
    fn test_wrong_code_stays_locked() {
        let mut rig = rig();
        let pins = *rig.controller.pins();

        press(&mut rig, pins.digit3);
        press(&mut rig, pins.digit2);
        press(&mut rig, pins.digit1);
        let events = press(&mut rig, pins.confirm);

        assert_eq!(events, vec![LockEvent::IncorrectCode { entered: 3 }]);
        assert_eq!(rig.controller.state(), LockState::Locked);
        assert_eq!(rig.servo.last_angle(pins.actuator), Some(LOCKED_ANGLE));
        assert_eq!(rig.gpio.output_level(pins.red_indicator), Some(Level::High));
        assert_eq!(rig.sounder.last_tone().unwrap().frequency_hz, FAILURE_TONE_HZ);
        assert_eq!(rig.controller.entered_count(), 0);
    }

    #[test]
    fn test_short_attempt_is_incorrect() {
        let mut rig = rig();
        let pins = *rig.controller.pins();

        press(&mut rig, pins.digit1);
        press(&mut rig, pins.digit1);
        let events = press(&mut rig, pins.confirm);

        assert_eq!(events, vec![LockEvent::IncorrectCode { entered: 2 }]);
        assert_eq!(rig.controller.state(), LockState::Locked);
    }

    #[test]
    fn test_confirm_while_unlocked_relocks() {
        let mut rig = rig();
        let pins = *rig.controller.pins();

        press(&mut rig, pins.digit1);
        press(&mut rig, pins.digit2);
        press(&mut rig, pins.digit3);
        press(&mut rig, pins.confirm);
        assert_eq!(rig.controller.state(), LockState::Unlocked);

        let events = press(&mut rig, pins.confirm);
        assert_eq!(events, vec![LockEvent::Locked]);
        assert_eq!(rig.controller.state(), LockState::Locked);
        assert_eq!(rig.servo.last_angle(pins.actuator), Some(LOCKED_ANGLE));
        assert_eq!(rig.gpio.output_level(pins.red_indicator), Some(Level::High));
    }

    #[test]
    fn test_relock_pulses_red_without_tone() {
        let mut rig = rig();
        let pins = *rig.controller.pins();

        press(&mut rig, pins.digit1);
        press(&mut rig, pins.digit2);
        press(&mut rig, pins.digit3);
        press(&mut rig, pins.confirm);
        let tones_after_unlock = rig.sounder.tones().len();

        press(&mut rig, pins.confirm);
        assert_eq!(rig.controller.state(), LockState::Locked);
        assert_eq!(rig.sounder.tones().len(), tones_after_unlock);
        assert_eq!(rig.gpio.output_level(pins.red_indicator), Some(Level::High));
    }

    #[test]
    fn test_feedback_pulse_expires_non_blocking() {
        let mut rig = rig();
        let pins = *rig.controller.pins();

        press(&mut rig, pins.digit1);
        press(&mut rig, pins.digit2);
        press(&mut rig, pins.digit3);
        press(&mut rig, pins.confirm);
        assert_eq!(
            rig.gpio.output_level(pins.green_indicator),
            Some(Level::High)
        );

        // Just short of the hold: still lit.
        rig.clock.advance(800);
        rig.controller.poll().unwrap();
        assert_eq!(
            rig.gpio.output_level(pins.green_indicator),
            Some(Level::High)
        );

        rig.clock.advance(300);
        rig.controller.poll().unwrap();
        assert_eq!(rig.gpio.output_level(pins.green_indicator), Some(Level::Low));
    }

    #[test]
    fn test_buttons_live_during_feedback() {
        let mut rig = rig();
        let pins = *rig.controller.pins();

        press(&mut rig, pins.digit3);
        press(&mut rig, pins.confirm); // incorrect, pulse running

        // Pulse still active, but digits keep registering.
        let events = press(&mut rig, pins.digit1);
        assert!(matches!(events[0], LockEvent::DigitEntered { .. }));
    }

    #[test]
    fn test_buffer_full_press_rejected() {
        let mut rig = rig();
        let pins = *rig.controller.pins();

        press(&mut rig, pins.digit1);
        press(&mut rig, pins.digit2);
        press(&mut rig, pins.digit3);
        let events = press(&mut rig, pins.digit1);

        assert!(matches!(events[0], LockEvent::DigitRejected { .. }));
        assert_eq!(rig.controller.entered_count(), 3);
    }

    #[test]
    fn test_held_button_enters_one_digit() {
        let mut rig = rig();
        let pins = *rig.controller.pins();

        rig.gpio.set_level(pins.digit1, Level::Low);
        rig.controller.poll().unwrap();
        rig.clock.advance(51);
        let events = rig.controller.poll().unwrap();
        assert_eq!(events.len(), 1);

        // Keep holding for a long time.
        for _ in 0..20 {
            rig.clock.advance(100);
            assert!(rig.controller.poll().unwrap().is_empty());
        }
        assert_eq!(rig.controller.entered_count(), 1);
    }

    #[test]
    fn test_set_secret_code_applies_new_length() {
        let mut rig = rig();
        let pins = *rig.controller.pins();

        rig.controller
            .set_secret_code(SecretCode::from_values(&[2, 1]).unwrap());
        assert_eq!(rig.controller.code_length(), 2);

        press(&mut rig, pins.digit2);
        press(&mut rig, pins.digit1);
        let events = press(&mut rig, pins.confirm);
        assert_eq!(events, vec![LockEvent::Unlocked]);
    }

    #[test]
    fn test_set_pin_assignments_validates_first() {
        let mut rig = rig();
        let old_pins = *rig.controller.pins();

        // Duplicate pin set must be rejected without touching the wiring.
        let mut bad = old_pins;
        bad.sound = bad.actuator;
        assert!(rig.controller.set_pin_assignments(bad).is_err());
        assert_eq!(*rig.controller.pins(), old_pins);

        // The old wiring still works.
        press(&mut rig, old_pins.digit1);
        assert_eq!(rig.controller.entered_count(), 1);
    }

    #[test]
    fn test_set_pin_assignments_rewires() {
        let mut rig = rig();

        let new_pins = PinAssignments::new(22, 23, 24, 25, 26, 27, 28, 29).unwrap();
        rig.controller.set_pin_assignments(new_pins).unwrap();

        assert_eq!(rig.gpio.mode(new_pins.digit1), Some(PinMode::InputPullup));
        assert_eq!(rig.gpio.mode(new_pins.red_indicator), Some(PinMode::Output));
        // Bolt re-asserted on the new actuator pin.
        assert_eq!(rig.servo.last_angle(new_pins.actuator), Some(LOCKED_ANGLE));

        press(&mut rig, new_pins.digit1);
        assert_eq!(rig.controller.entered_count(), 1);
    }

    #[test]
    fn test_initially_unlocked_config() {
        let config = LockConfig {
            initial_state: LockState::Unlocked,
            ..LockConfig::default()
        };
        let rig = rig_with(config);
        let pins = *rig.controller.pins();

        assert_eq!(rig.controller.state(), LockState::Unlocked);
        assert_eq!(rig.servo.last_angle(pins.actuator), Some(UNLOCKED_ANGLE));
    }

    #[test]
    fn test_duplicate_pin_config_rejected_at_construction() {
        let mut config = LockConfig::default();
        config.pins.sound = config.pins.actuator;

        let (gpio, _h) = MockGpio::new();
        let (servo, _sh) = MockServo::new();
        let (sounder, _nh) = MockSounder::new();
        let (clock, _ch) = MockClock::new();
        assert!(LockController::new(config, gpio.clone(), gpio, servo, sounder, clock).is_err());
    }

    #[test]
    fn test_event_display() {
        let event = LockEvent::DigitEntered {
            digit: Digit::new(1).unwrap(),
            entered: 1,
        };
        assert_eq!(event.to_string(), "digit 1 entered (1 so far)");
        assert_eq!(LockEvent::Unlocked.to_string(), "unlocked");
    }
}
