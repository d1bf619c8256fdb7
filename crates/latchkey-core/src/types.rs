use crate::{
    Result,
    constants::{MAX_CODE_LENGTH, MAX_PIN, MIN_CODE_LENGTH},
    error::Error,
};
use serde::{Deserialize, Serialize};
use std::fmt;
use subtle::ConstantTimeEq;

/// A single code digit (0-9).
///
/// The default digit is 0, used for "not yet entered" attempt slots.
/// Deserialization goes through [`Digit::new`], so an out-of-range value
/// in serialized data is rejected, not smuggled in.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "u8")]
pub struct Digit(u8);

impl Digit {
    /// Create a new digit with validation.
    ///
    /// # Errors
    /// Returns `Error::InvalidDigit` if the value is greater than 9.
    pub fn new(value: u8) -> Result<Self> {
        if value > 9 {
            return Err(Error::InvalidDigit(format!(
                "Digit must be 0-9, got {value}"
            )));
        }
        Ok(Digit(value))
    }

    /// Get the raw digit value as u8.
    #[must_use]
    pub fn as_u8(&self) -> u8 {
        self.0
    }
}

impl TryFrom<u8> for Digit {
    type Error = Error;

    fn try_from(value: u8) -> Result<Self> {
        Digit::new(value)
    }
}

impl fmt::Display for Digit {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Secret code for the lock (1-8 digits).
///
/// # Security
/// This type implements constant-time comparison to prevent timing attacks
/// when checking an entered attempt against the secret.
///
/// The code always owns its digits. Replacing the secret copies the new
/// sequence; it never aliases caller storage.
///
/// Deserialization goes through [`SecretCode::new`], so serialized data
/// cannot carry an empty or over-long code.
#[derive(Debug, Clone, Eq, Serialize, Deserialize)]
#[serde(try_from = "Vec<Digit>")]
pub struct SecretCode(Vec<Digit>);

impl SecretCode {
    /// Create a new secret code with validation.
    ///
    /// # Errors
    /// Returns `Error::InvalidCodeLength` if the sequence is empty or longer
    /// than [`MAX_CODE_LENGTH`].
    pub fn new(digits: Vec<Digit>) -> Result<Self> {
        let len = digits.len();
        if !(MIN_CODE_LENGTH..=MAX_CODE_LENGTH).contains(&len) {
            return Err(Error::InvalidCodeLength(format!(
                "Code must be {MIN_CODE_LENGTH}-{MAX_CODE_LENGTH} digits, got {len}"
            )));
        }
        Ok(SecretCode(digits))
    }

    /// Create a secret code from raw digit values.
    ///
    /// # Errors
    /// Returns an error if any value is not a valid digit or the length is
    /// out of range.
    pub fn from_values(values: &[u8]) -> Result<Self> {
        let digits = values
            .iter()
            .map(|&v| Digit::new(v))
            .collect::<Result<Vec<_>>>()?;
        SecretCode::new(digits)
    }

    /// Get the code digits.
    #[must_use]
    pub fn digits(&self) -> &[Digit] {
        &self.0
    }

    /// Number of digits in the code.
    #[must_use]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Returns `true` if the code has no digits (never constructible).
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Compare against an entered attempt in constant time.
    ///
    /// An attempt of a different length never matches. Equal-length
    /// comparison runs over every digit regardless of where the first
    /// mismatch sits.
    #[must_use]
    pub fn matches(&self, attempt: &[Digit]) -> bool {
        if attempt.len() != self.0.len() {
            return false;
        }
        let ours: Vec<u8> = self.0.iter().map(Digit::as_u8).collect();
        let theirs: Vec<u8> = attempt.iter().map(Digit::as_u8).collect();
        ours.ct_eq(&theirs).into()
    }
}

impl TryFrom<Vec<Digit>> for SecretCode {
    type Error = Error;

    fn try_from(digits: Vec<Digit>) -> Result<Self> {
        SecretCode::new(digits)
    }
}

impl Default for SecretCode {
    /// The factory code from [`constants::DEFAULT_CODE`](crate::constants::DEFAULT_CODE).
    fn default() -> Self {
        SecretCode(crate::constants::DEFAULT_CODE.map(Digit).to_vec())
    }
}

impl fmt::Display for SecretCode {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        // Never print the digits themselves.
        write!(f, "SecretCode({} digits)", self.0.len())
    }
}

impl std::str::FromStr for SecretCode {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        let digits = s
            .chars()
            .map(|c| {
                c.to_digit(10)
                    .map(|d| Digit(d as u8))
                    .ok_or_else(|| Error::InvalidDigit(format!("Invalid code character: {c}")))
            })
            .collect::<Result<Vec<_>>>()?;
        SecretCode::new(digits)
    }
}

/// Constant-time comparison implementation for SecretCode
impl PartialEq for SecretCode {
    fn eq(&self, other: &Self) -> bool {
        self.matches(&other.0)
    }
}

/// Lock bolt state.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LockState {
    Locked,
    Unlocked,
}

impl LockState {
    /// Returns `true` if the bolt is thrown.
    #[inline]
    #[must_use]
    pub fn is_locked(self) -> bool {
        matches!(self, LockState::Locked)
    }
}

impl fmt::Display for LockState {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            LockState::Locked => write!(f, "Locked"),
            LockState::Unlocked => write!(f, "Unlocked"),
        }
    }
}

/// A digital pin number (0-53).
///
/// Deserialization goes through [`PinId::new`], rejecting out-of-range
/// pin numbers in serialized data.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "u8")]
pub struct PinId(u8);

impl PinId {
    /// Create a new pin ID with validation.
    ///
    /// # Errors
    /// Returns `Error::InvalidPin` if the pin number is above [`MAX_PIN`].
    pub fn new(pin: u8) -> Result<Self> {
        if pin > MAX_PIN {
            return Err(Error::InvalidPin(format!(
                "Pin must be 0-{MAX_PIN}, got {pin}"
            )));
        }
        Ok(PinId(pin))
    }

    /// Get the raw pin number as u8.
    #[must_use]
    pub fn as_u8(&self) -> u8 {
        self.0
    }
}

impl TryFrom<u8> for PinId {
    type Error = Error;

    fn try_from(pin: u8) -> Result<Self> {
        PinId::new(pin)
    }
}

impl fmt::Display for PinId {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "D{}", self.0)
    }
}

/// The full pin set the controller drives.
///
/// A pin set is only usable once [`validate`](PinAssignments::validate) has
/// passed; the controller rejects a reassignment before touching any pin so
/// a bad set can never leave the hardware half-configured.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PinAssignments {
    /// Digit-1 button input.
    pub digit1: PinId,
    /// Digit-2 button input.
    pub digit2: PinId,
    /// Digit-3 button input.
    pub digit3: PinId,
    /// Confirm/lock button input.
    pub confirm: PinId,
    /// Green (unlocked) indicator output.
    pub green_indicator: PinId,
    /// Red (locked) indicator output.
    pub red_indicator: PinId,
    /// Bolt servo signal output.
    pub actuator: PinId,
    /// Buzzer output.
    pub sound: PinId,
}

impl PinAssignments {
    /// Build a pin set from raw pin numbers, validating each pin and the
    /// set as a whole.
    ///
    /// # Errors
    /// Returns an error if any pin number is out of range or two roles
    /// share a pin.
    #[allow(clippy::too_many_arguments)]
    pub fn new(
        digit1: u8,
        digit2: u8,
        digit3: u8,
        confirm: u8,
        green_indicator: u8,
        red_indicator: u8,
        actuator: u8,
        sound: u8,
    ) -> Result<Self> {
        let assignments = PinAssignments {
            digit1: PinId::new(digit1)?,
            digit2: PinId::new(digit2)?,
            digit3: PinId::new(digit3)?,
            confirm: PinId::new(confirm)?,
            green_indicator: PinId::new(green_indicator)?,
            red_indicator: PinId::new(red_indicator)?,
            actuator: PinId::new(actuator)?,
            sound: PinId::new(sound)?,
        };
        assignments.validate()?;
        Ok(assignments)
    }

    /// Check that no two roles share a pin.
    ///
    /// # Errors
    /// Returns `Error::DuplicatePinAssignment` naming the first clash found.
    pub fn validate(&self) -> Result<()> {
        let roles = self.roles();
        for (i, (name_a, pin_a)) in roles.iter().enumerate() {
            for (name_b, pin_b) in &roles[i + 1..] {
                if pin_a == pin_b {
                    return Err(Error::DuplicatePinAssignment {
                        pin: pin_a.as_u8(),
                        first: (*name_a).to_string(),
                        second: (*name_b).to_string(),
                    });
                }
            }
        }
        Ok(())
    }

    /// The four button input pins, in channel order.
    #[must_use]
    pub fn button_pins(&self) -> [PinId; 4] {
        [self.digit1, self.digit2, self.digit3, self.confirm]
    }

    fn roles(&self) -> [(&'static str, PinId); 8] {
        [
            ("digit1", self.digit1),
            ("digit2", self.digit2),
            ("digit3", self.digit3),
            ("confirm", self.confirm),
            ("green_indicator", self.green_indicator),
            ("red_indicator", self.red_indicator),
            ("actuator", self.actuator),
            ("sound", self.sound),
        ]
    }
}

impl Default for PinAssignments {
    /// The reference prop wiring from `constants`.
    fn default() -> Self {
        use crate::constants::*;
        PinAssignments {
            digit1: PinId(DEFAULT_DIGIT1_PIN),
            digit2: PinId(DEFAULT_DIGIT2_PIN),
            digit3: PinId(DEFAULT_DIGIT3_PIN),
            confirm: PinId(DEFAULT_CONFIRM_PIN),
            green_indicator: PinId(DEFAULT_GREEN_PIN),
            red_indicator: PinId(DEFAULT_RED_PIN),
            actuator: PinId(DEFAULT_ACTUATOR_PIN),
            sound: PinId(DEFAULT_SOUND_PIN),
        }
    }
}
