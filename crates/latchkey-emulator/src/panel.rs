//! Virtual front panel for the door-lock prop.
//!
//! Renders the externally visible state of the lock — bolt position, the
//! two indicator LEDs, the buzzer and the masked attempt progress — as a
//! fixed-width text panel. The panel is a pure renderer: it holds no lock
//! state of its own and draws whatever snapshot it is given.
//!
//! # Examples
//!
//! ```
//! use latchkey_core::LockState;
//! use latchkey_emulator::{PanelSnapshot, VirtualPanel};
//!
//! let panel = VirtualPanel::new();
//! let snapshot = PanelSnapshot {
//!     state: LockState::Locked,
//!     green_lit: false,
//!     red_lit: false,
//!     entered: 2,
//!     code_length: 3,
//!     tone_hz: None,
//! };
//!
//! let rendered = panel.render(&snapshot);
//! assert!(rendered.contains("BOLT: LOCKED"));
//! assert!(rendered.contains("* * _"));
//! ```

use latchkey_core::LockState;

/// Panel width in characters, including the border columns.
const PANEL_WIDTH: usize = 30;

/// One renderable frame of lock state.
///
/// Gathered by the caller from the controller and the mock handles; the
/// panel never reaches into the hardware itself.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PanelSnapshot {
    /// Current bolt state.
    pub state: LockState,
    /// Green (unlocked) indicator currently lit.
    pub green_lit: bool,
    /// Red (locked) indicator currently lit.
    pub red_lit: bool,
    /// Digits entered into the current attempt.
    pub entered: usize,
    /// Length of the secret code.
    pub code_length: usize,
    /// Frequency of the most recent buzzer tone, if one was played this
    /// frame.
    pub tone_hz: Option<u16>,
}

/// Fixed-width text renderer for a [`PanelSnapshot`].
#[derive(Debug, Clone, Copy, Default)]
pub struct VirtualPanel;

impl VirtualPanel {
    /// Create a panel renderer.
    #[must_use]
    pub fn new() -> Self {
        VirtualPanel
    }

    /// Render a snapshot as a bordered multi-line panel.
    #[must_use]
    pub fn render(&self, snapshot: &PanelSnapshot) -> String {
        let bolt = match snapshot.state {
            LockState::Locked => "BOLT: LOCKED",
            LockState::Unlocked => "BOLT: UNLOCKED",
        };
        let leds = format!(
            "GREEN [{}]  RED [{}]",
            if snapshot.green_lit { "#" } else { " " },
            if snapshot.red_lit { "#" } else { " " },
        );
        let code = format!(
            "CODE: {}",
            masked_attempt(snapshot.entered, snapshot.code_length)
        );
        let buzzer = match snapshot.tone_hz {
            Some(hz) => format!("BUZZER: {hz} Hz"),
            None => "BUZZER: quiet".to_string(),
        };

        let inner = PANEL_WIDTH - 2;
        let mut out = String::new();
        out.push('+');
        out.push_str(&"-".repeat(inner));
        out.push_str("+\n");
        for line in [bolt, &leds, &code, &buzzer] {
            out.push('|');
            out.push_str(&pad_center(line, inner));
            out.push_str("|\n");
        }
        out.push('+');
        out.push_str(&"-".repeat(inner));
        out.push('+');
        out
    }
}

/// Render attempt progress without revealing any digit.
///
/// Entered slots show `*`, remaining slots `_`:
///
/// ```
/// use latchkey_emulator::panel::masked_attempt;
///
/// assert_eq!(masked_attempt(0, 3), "_ _ _");
/// assert_eq!(masked_attempt(2, 3), "* * _");
/// assert_eq!(masked_attempt(3, 3), "* * *");
/// ```
#[must_use]
pub fn masked_attempt(entered: usize, code_length: usize) -> String {
    (0..code_length)
        .map(|i| if i < entered { "*" } else { "_" })
        .collect::<Vec<_>>()
        .join(" ")
}

/// Center `text` within `width` characters, truncating if it does not fit.
fn pad_center(text: &str, width: usize) -> String {
    let count = text.chars().count();
    if count >= width {
        return text.chars().take(width).collect();
    }
    let padding = width - count;
    let left = padding / 2;
    let right = padding - left;
    format!("{}{text}{}", " ".repeat(left), " ".repeat(right))
}
