//! Button debouncing with one-shot press detection.
//!
//! Mechanical switches bounce: a single press produces a burst of spurious
//! transitions for a few milliseconds before the contact settles. The
//! [`ButtonDebouncer`] filters each of the four channels independently,
//! accepting a new level only after it has held steady for a full debounce
//! window, and latches a one-shot edge on every debounced press.
//!
//! # Edge semantics
//!
//! An edge is latched only on the committed high-to-low transition
//! (pull-up wiring, pressed reads low). Holding a button indefinitely
//! yields exactly one edge; the button must be released and pressed again
//! to produce the next. Edges are consume-once: [`consume_edge`] returns
//! `true` at most once per latched edge, and there is no queue — at most
//! one unconsumed edge per channel.
//!
//! # Examples
//!
//! ```
//! use latchkey_control::debounce::{Button, ButtonDebouncer};
//! use latchkey_hardware::types::Level;
//!
//! let mut debouncer = ButtonDebouncer::new();
//! let idle = [Level::High; 4];
//! let mut pressed = idle;
//! pressed[Button::Digit1.index()] = Level::Low;
//!
//! debouncer.scan(pressed, 0);
//! debouncer.scan(pressed, 51); // held past the 50ms window
//!
//! assert!(debouncer.consume_edge(Button::Digit1));
//! assert!(!debouncer.consume_edge(Button::Digit1)); // consume-once
//! ```
//!
//! [`consume_edge`]: ButtonDebouncer::consume_edge

use latchkey_core::constants::{BUTTON_COUNT, DEBOUNCE_WINDOW_MS};
use latchkey_hardware::types::Level;
use std::fmt;

/// The four debounced button channels, in scan order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Button {
    /// Digit-1 entry button.
    Digit1,
    /// Digit-2 entry button.
    Digit2,
    /// Digit-3 entry button.
    Digit3,
    /// Confirm/lock button.
    Confirm,
}

impl Button {
    /// All channels in scan order.
    pub const ALL: [Button; BUTTON_COUNT] = [
        Button::Digit1,
        Button::Digit2,
        Button::Digit3,
        Button::Confirm,
    ];

    /// Position of this channel in a scan array.
    #[inline]
    #[must_use]
    pub fn index(self) -> usize {
        match self {
            Button::Digit1 => 0,
            Button::Digit2 => 1,
            Button::Digit3 => 2,
            Button::Confirm => 3,
        }
    }

    /// The digit value this button enters, or `None` for the confirm
    /// button.
    #[inline]
    #[must_use]
    pub fn digit_value(self) -> Option<u8> {
        match self {
            Button::Digit1 => Some(1),
            Button::Digit2 => Some(2),
            Button::Digit3 => Some(3),
            Button::Confirm => None,
        }
    }
}

impl fmt::Display for Button {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Button::Digit1 => write!(f, "digit1"),
            Button::Digit2 => write!(f, "digit2"),
            Button::Digit3 => write!(f, "digit3"),
            Button::Confirm => write!(f, "confirm"),
        }
    }
}

/// Per-channel debouncing state machine over four digital inputs.
///
/// The caller samples the raw pin levels at its own cadence and feeds them
/// to [`scan`](ButtonDebouncer::scan) together with a monotonic millisecond
/// timestamp. Channels are fully independent: simultaneous changes each
/// run against their own timestamp with no cross-channel coupling.
///
/// If `scan` is never called no edge is ever produced — the fail-safe
/// direction for a lock.
#[derive(Debug)]
pub struct ButtonDebouncer {
    window_ms: u64,
    last_raw: [Level; BUTTON_COUNT],
    stable: [Level; BUTTON_COUNT],
    last_change_ms: [u64; BUTTON_COUNT],
    pending: [bool; BUTTON_COUNT],
}

impl ButtonDebouncer {
    /// Create a debouncer with the default 50ms window.
    ///
    /// All channels start at the pull-up idle level (high), so a line that
    /// is already low at startup still has to hold through a full window
    /// before it counts as a press.
    #[must_use]
    pub fn new() -> Self {
        Self::with_window(DEBOUNCE_WINDOW_MS)
    }

    /// Create a debouncer with a custom window in milliseconds.
    #[must_use]
    pub fn with_window(window_ms: u64) -> Self {
        Self {
            window_ms,
            last_raw: [Level::High; BUTTON_COUNT],
            stable: [Level::High; BUTTON_COUNT],
            last_change_ms: [0; BUTTON_COUNT],
            pending: [false; BUTTON_COUNT],
        }
    }

    /// The debounce window in milliseconds.
    #[must_use]
    pub fn window_ms(&self) -> u64 {
        self.window_ms
    }

    /// Feed one raw sample per channel.
    ///
    /// For each channel independently: a change in the raw reading restarts
    /// that channel's window; once the reading has held steady strictly
    /// longer than the window and differs from the committed stable level,
    /// the new level is committed, and a committed low (pressed) level
    /// latches the channel's edge flag.
    ///
    /// `now_ms` must come from a monotonic clock. The scan interval is the
    /// caller's responsibility and only needs to be comfortably shorter
    /// than the window.
    pub fn scan(&mut self, readings: [Level; BUTTON_COUNT], now_ms: u64) {
        for i in 0..BUTTON_COUNT {
            let raw = readings[i];

            if raw != self.last_raw[i] {
                self.last_change_ms[i] = now_ms;
                self.last_raw[i] = raw;
            }

            if now_ms.saturating_sub(self.last_change_ms[i]) > self.window_ms
                && raw != self.stable[i]
            {
                self.stable[i] = raw;
                if raw == Level::Low {
                    self.pending[i] = true;
                }
            }
        }
    }

    /// Take the pending edge for a channel, clearing it.
    ///
    /// Returns `true` at most once per debounced press.
    pub fn consume_edge(&mut self, button: Button) -> bool {
        std::mem::take(&mut self.pending[button.index()])
    }

    /// The committed (debounced) level of a channel.
    #[must_use]
    pub fn stable_level(&self, button: Button) -> Level {
        self.stable[button.index()]
    }

    /// Returns `true` while the debounced level of a channel is low.
    #[must_use]
    pub fn is_held(&self, button: Button) -> bool {
        self.stable[button.index()].is_low()
    }

    /// Drop all transient state, keeping the window.
    ///
    /// Used after pin reassignment, when the raw history refers to lines
    /// that no longer exist.
    pub fn reset(&mut self) {
        self.last_raw = [Level::High; BUTTON_COUNT];
        self.stable = [Level::High; BUTTON_COUNT];
        self.last_change_ms = [0; BUTTON_COUNT];
        self.pending = [false; BUTTON_COUNT];
    }
}

impl Default for ButtonDebouncer {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const IDLE: [Level; BUTTON_COUNT] = [Level::High; BUTTON_COUNT];

    fn pressed(button: Button) -> [Level; BUTTON_COUNT] {
        let mut readings = IDLE;
        readings[button.index()] = Level::Low;
        readings
    }

    #[test]
    fn test_no_scan_no_edges() {
        let mut debouncer = ButtonDebouncer::new();
        for button in Button::ALL {
            assert!(!debouncer.consume_edge(button));
        }
    }

    #[test]
    fn test_steady_press_latches_exactly_one_edge() {
        let mut debouncer = ButtonDebouncer::new();

        debouncer.scan(pressed(Button::Digit1), 0);
        assert!(!debouncer.consume_edge(Button::Digit1), "window not elapsed");

        debouncer.scan(pressed(Button::Digit1), 51);
        assert!(debouncer.consume_edge(Button::Digit1));

        // Held: no further edges, however long.
        debouncer.scan(pressed(Button::Digit1), 500);
        debouncer.scan(pressed(Button::Digit1), 5000);
        assert!(!debouncer.consume_edge(Button::Digit1));
    }

    #[test]
    fn test_consume_is_one_shot() {
        let mut debouncer = ButtonDebouncer::new();
        debouncer.scan(pressed(Button::Confirm), 0);
        debouncer.scan(pressed(Button::Confirm), 60);

        assert!(debouncer.consume_edge(Button::Confirm));
        assert!(!debouncer.consume_edge(Button::Confirm));
    }

    #[test]
    fn test_bounce_within_window_is_filtered() {
        let mut debouncer = ButtonDebouncer::new();

        // Contact bounce: raw line oscillates every 10ms, never steady for
        // a full window.
        for t in (0..100).step_by(10) {
            let readings = if (t / 10) % 2 == 0 {
                pressed(Button::Digit2)
            } else {
                IDLE
            };
            debouncer.scan(readings, t);
        }

        assert!(!debouncer.consume_edge(Button::Digit2));
        assert_eq!(debouncer.stable_level(Button::Digit2), Level::High);
    }

    #[test]
    fn test_bounce_then_settle_yields_one_edge() {
        let mut debouncer = ButtonDebouncer::new();

        debouncer.scan(pressed(Button::Digit3), 0);
        debouncer.scan(IDLE, 10);
        debouncer.scan(pressed(Button::Digit3), 20);
        debouncer.scan(IDLE, 30);
        debouncer.scan(pressed(Button::Digit3), 40);
        // Settled low from t=40; window elapses at t>90.
        debouncer.scan(pressed(Button::Digit3), 91);

        assert!(debouncer.consume_edge(Button::Digit3));
        assert!(!debouncer.consume_edge(Button::Digit3));
    }

    #[test]
    fn test_release_does_not_latch_edge() {
        let mut debouncer = ButtonDebouncer::new();

        debouncer.scan(pressed(Button::Digit1), 0);
        debouncer.scan(pressed(Button::Digit1), 51);
        assert!(debouncer.consume_edge(Button::Digit1));

        // Release: stable returns high, no new edge.
        debouncer.scan(IDLE, 100);
        debouncer.scan(IDLE, 151);
        assert_eq!(debouncer.stable_level(Button::Digit1), Level::High);
        assert!(!debouncer.consume_edge(Button::Digit1));
    }

    #[test]
    fn test_release_and_repress_latches_again() {
        let mut debouncer = ButtonDebouncer::new();

        debouncer.scan(pressed(Button::Digit1), 0);
        debouncer.scan(pressed(Button::Digit1), 51);
        assert!(debouncer.consume_edge(Button::Digit1));

        debouncer.scan(IDLE, 100);
        debouncer.scan(IDLE, 151);

        debouncer.scan(pressed(Button::Digit1), 200);
        debouncer.scan(pressed(Button::Digit1), 251);
        assert!(debouncer.consume_edge(Button::Digit1));
    }

    #[test]
    fn test_channels_are_independent() {
        let mut debouncer = ButtonDebouncer::new();

        let mut both = IDLE;
        both[Button::Digit1.index()] = Level::Low;
        both[Button::Confirm.index()] = Level::Low;

        debouncer.scan(both, 0);
        debouncer.scan(both, 51);

        assert!(debouncer.consume_edge(Button::Digit1));
        assert!(debouncer.consume_edge(Button::Confirm));
        assert!(!debouncer.consume_edge(Button::Digit2));
        assert!(!debouncer.consume_edge(Button::Digit3));
    }

    #[test]
    fn test_edge_survives_until_consumed() {
        let mut debouncer = ButtonDebouncer::new();

        debouncer.scan(pressed(Button::Digit2), 0);
        debouncer.scan(pressed(Button::Digit2), 51);
        // Several more scans before anyone consumes.
        debouncer.scan(pressed(Button::Digit2), 60);
        debouncer.scan(IDLE, 70);
        debouncer.scan(IDLE, 130);

        assert!(debouncer.consume_edge(Button::Digit2));
    }

    #[test]
    fn test_custom_window() {
        let mut debouncer = ButtonDebouncer::with_window(10);
        assert_eq!(debouncer.window_ms(), 10);

        debouncer.scan(pressed(Button::Digit1), 0);
        debouncer.scan(pressed(Button::Digit1), 11);
        assert!(debouncer.consume_edge(Button::Digit1));
    }

    #[test]
    fn test_line_low_at_startup_still_debounced() {
        let mut debouncer = ButtonDebouncer::new();

        // Raw change is recorded at t=5, so commit waits until t>55.
        debouncer.scan(pressed(Button::Digit1), 5);
        debouncer.scan(pressed(Button::Digit1), 50);
        assert!(!debouncer.consume_edge(Button::Digit1));

        debouncer.scan(pressed(Button::Digit1), 56);
        assert!(debouncer.consume_edge(Button::Digit1));
    }

    #[test]
    fn test_reset_clears_pending_edges() {
        let mut debouncer = ButtonDebouncer::new();
        debouncer.scan(pressed(Button::Digit1), 0);
        debouncer.scan(pressed(Button::Digit1), 51);

        debouncer.reset();
        assert!(!debouncer.consume_edge(Button::Digit1));
        assert_eq!(debouncer.stable_level(Button::Digit1), Level::High);
    }

    #[test]
    fn test_is_held_tracks_stable_level() {
        let mut debouncer = ButtonDebouncer::new();
        assert!(!debouncer.is_held(Button::Confirm));

        debouncer.scan(pressed(Button::Confirm), 0);
        assert!(!debouncer.is_held(Button::Confirm), "not yet committed");

        debouncer.scan(pressed(Button::Confirm), 51);
        assert!(debouncer.is_held(Button::Confirm));
    }
}
