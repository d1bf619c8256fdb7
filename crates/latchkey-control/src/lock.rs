//! Secret code ownership and attempt arbitration.
//!
//! [`CodeEntryLock`] owns the secret code, the in-progress attempt buffer
//! and the locked/unlocked state. It is pure state: all hardware feedback
//! (servo, LEDs, buzzer) belongs to the
//! [`LockController`](crate::controller::LockController), which consumes
//! this type.
//!
//! # Invariants
//!
//! - `0 <= entered_count <= code length` at all times.
//! - Attempt slots at or beyond the cursor are never compared; they are
//!   zeroed whenever the buffers are replaced.
//! - The secret and attempt buffers always share one length and are
//!   replaced together.
//! - [`check_attempt`](CodeEntryLock::check_attempt) is a pure query: it
//!   never mutates the attempt or the lock state.

use latchkey_core::{Digit, LockState, SecretCode};
use tracing::debug;

/// Code-entry state machine for the door lock.
///
/// # Examples
///
/// ```
/// use latchkey_control::lock::CodeEntryLock;
/// use latchkey_core::{Digit, LockState, SecretCode};
///
/// # fn main() -> latchkey_core::Result<()> {
/// let secret = SecretCode::from_values(&[1, 2, 3])?;
/// let mut lock = CodeEntryLock::new(secret, LockState::Locked);
///
/// lock.enter_digit(Digit::new(1)?);
/// lock.enter_digit(Digit::new(2)?);
/// assert!(!lock.check_attempt()); // too few digits
///
/// lock.enter_digit(Digit::new(3)?);
/// assert!(lock.check_attempt());
/// # Ok(())
/// # }
/// ```
#[derive(Debug)]
pub struct CodeEntryLock {
    secret: SecretCode,
    attempt: Vec<Digit>,
    entered: usize,
    state: LockState,
}

impl CodeEntryLock {
    /// Create a lock around a secret code, starting in `initial_state`.
    #[must_use]
    pub fn new(secret: SecretCode, initial_state: LockState) -> Self {
        let attempt = vec![Digit::default(); secret.len()];
        Self {
            secret,
            attempt,
            entered: 0,
            state: initial_state,
        }
    }

    /// Append a digit to the attempt.
    ///
    /// Returns `true` if the digit was accepted. A full buffer rejects
    /// further digits silently — the attempt must be reset explicitly
    /// before more entry — and returns `false`.
    pub fn enter_digit(&mut self, digit: Digit) -> bool {
        if self.entered >= self.secret.len() {
            debug!(entered = self.entered, "attempt buffer full, digit rejected");
            return false;
        }
        self.attempt[self.entered] = digit;
        self.entered += 1;
        debug!(entered = self.entered, of = self.secret.len(), "digit entered");
        true
    }

    /// Discard the in-progress attempt.
    ///
    /// Idempotent. Slots beyond the cursor become don't-care; they are
    /// never read until re-written.
    pub fn reset_attempt(&mut self) {
        self.entered = 0;
    }

    /// Check the attempt against the secret code.
    ///
    /// Returns `false` if fewer digits than the code length have been
    /// entered; otherwise compares element-wise (in constant time). Pure
    /// query: the attempt is kept, and the lock state never changes here —
    /// callers decide what to do with the answer and reset explicitly.
    #[must_use]
    pub fn check_attempt(&self) -> bool {
        if self.entered != self.secret.len() {
            return false;
        }
        self.secret.matches(&self.attempt[..self.entered])
    }

    /// Replace the secret code.
    ///
    /// The new code is owned outright (the caller keeps its copy) and the
    /// attempt buffer is rebuilt zeroed at the new length with the cursor
    /// reset, so both buffers always change together.
    pub fn set_secret_code(&mut self, secret: SecretCode) {
        self.attempt = vec![Digit::default(); secret.len()];
        self.entered = 0;
        self.secret = secret;
        debug!(length = self.secret.len(), "secret code replaced");
    }

    /// Current bolt state.
    #[must_use]
    pub fn state(&self) -> LockState {
        self.state
    }

    /// Number of digits entered so far.
    #[must_use]
    pub fn entered_count(&self) -> usize {
        self.entered
    }

    /// Length of the secret code.
    #[must_use]
    pub fn code_length(&self) -> usize {
        self.secret.len()
    }

    /// Transition the bolt state.
    ///
    /// Only the controller's lock/unlock actions call this; a correctness
    /// check never does.
    pub(crate) fn set_state(&mut self, state: LockState) {
        self.state = state;
    }
}
