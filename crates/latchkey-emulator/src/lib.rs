//! Emulation front-end for the latchkey door-lock controller.
//!
//! Provides a text rendering of the prop's visible state and a
//! timestamped session log, plus the `latchkey-demo` binary that scripts
//! a full session against the mock hardware.

pub mod panel;
pub mod session;

pub use panel::{PanelSnapshot, VirtualPanel, masked_attempt};
pub use session::{SessionEntry, SessionLog};
