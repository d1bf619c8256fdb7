//! Common types shared across hardware port implementations.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Digital line level.
///
/// Buttons on the reference wiring use internal pull-ups, so an idle
/// button reads [`High`](Level::High) and a press reads [`Low`](Level::Low).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Level {
    /// Logic low (0V).
    Low,
    /// Logic high (VCC).
    High,
}

impl Level {
    /// Returns `true` for [`Level::Low`].
    #[inline]
    #[must_use]
    pub fn is_low(self) -> bool {
        matches!(self, Level::Low)
    }

    /// Returns `true` for [`Level::High`].
    #[inline]
    #[must_use]
    pub fn is_high(self) -> bool {
        matches!(self, Level::High)
    }

    /// The opposite level.
    #[inline]
    #[must_use]
    pub fn toggled(self) -> Self {
        match self {
            Level::Low => Level::High,
            Level::High => Level::Low,
        }
    }
}

impl fmt::Display for Level {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Level::Low => write!(f, "LOW"),
            Level::High => write!(f, "HIGH"),
        }
    }
}

/// Pin configuration mode.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PinMode {
    /// Floating input.
    Input,
    /// Input with internal pull-up enabled.
    InputPullup,
    /// Push-pull output.
    Output,
}

impl PinMode {
    /// Returns `true` for either input mode.
    #[inline]
    #[must_use]
    pub fn is_input(self) -> bool {
        matches!(self, PinMode::Input | PinMode::InputPullup)
    }
}
