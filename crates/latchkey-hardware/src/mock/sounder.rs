//! Mock buzzer for testing and development.

use crate::{Result, traits::Sounder};
use latchkey_core::PinId;
use std::sync::{Arc, Mutex};
use std::time::Duration;

/// A tone command recorded by [`MockSounder`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ToneCommand {
    /// The pin the tone was played on.
    pub pin: PinId,
    /// Tone frequency in Hz.
    pub frequency_hz: u16,
    /// Self-stop duration, if one was given.
    pub duration: Option<Duration>,
}

#[derive(Debug, Default)]
struct SounderState {
    tones: Vec<ToneCommand>,
    stops: Vec<PinId>,
}

/// Mock buzzer that records tone and stop commands.
///
/// # Examples
///
/// ```
/// use latchkey_hardware::mock::MockSounder;
/// use latchkey_hardware::traits::Sounder;
/// use latchkey_core::PinId;
/// use std::time::Duration;
///
/// # fn main() -> Result<(), Box<dyn std::error::Error>> {
/// let (mut buzzer, handle) = MockSounder::new();
/// let pin = PinId::new(12)?;
///
/// buzzer.play_tone(pin, 1500, Some(Duration::from_millis(100)))?;
/// assert_eq!(handle.tones().len(), 1);
/// assert_eq!(handle.tones()[0].frequency_hz, 1500);
/// # Ok(())
/// # }
/// ```
#[derive(Debug, Clone)]
pub struct MockSounder {
    state: Arc<Mutex<SounderState>>,
}

impl MockSounder {
    /// Create a new mock buzzer and its inspection handle.
    pub fn new() -> (Self, MockSounderHandle) {
        let state = Arc::new(Mutex::new(SounderState::default()));
        let sounder = Self {
            state: Arc::clone(&state),
        };
        let handle = MockSounderHandle { state };
        (sounder, handle)
    }
}

impl Sounder for MockSounder {
    fn play_tone(
        &mut self,
        pin: PinId,
        frequency_hz: u16,
        duration: Option<Duration>,
    ) -> Result<()> {
        let mut state = self.state.lock().unwrap_or_else(|e| e.into_inner());
        state.tones.push(ToneCommand {
            pin,
            frequency_hz,
            duration,
        });
        Ok(())
    }

    fn stop(&mut self, pin: PinId) -> Result<()> {
        let mut state = self.state.lock().unwrap_or_else(|e| e.into_inner());
        state.stops.push(pin);
        Ok(())
    }
}

/// Handle for inspecting a [`MockSounder`].
#[derive(Debug, Clone)]
pub struct MockSounderHandle {
    state: Arc<Mutex<SounderState>>,
}

impl MockSounderHandle {
    /// Every tone played, oldest first.
    pub fn tones(&self) -> Vec<ToneCommand> {
        let state = self.state.lock().unwrap_or_else(|e| e.into_inner());
        state.tones.clone()
    }

    /// The most recent tone played, if any.
    pub fn last_tone(&self) -> Option<ToneCommand> {
        let state = self.state.lock().unwrap_or_else(|e| e.into_inner());
        state.tones.last().copied()
    }

    /// How many times [`Sounder::stop`](crate::traits::Sounder::stop) was
    /// called on a pin.
    pub fn stop_count(&self, pin: PinId) -> usize {
        let state = self.state.lock().unwrap_or_else(|e| e.into_inner());
        state.stops.iter().filter(|p| **p == pin).count()
    }
}
