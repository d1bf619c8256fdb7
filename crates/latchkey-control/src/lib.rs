//! Control logic for a three-button code-entry door lock.
//!
//! The crate is split along the firmware's seams:
//!
//! - [`debounce`] — per-channel button debouncing with one-shot press
//!   edges
//! - [`lock`] — the code-entry state machine (attempt buffer, constant
//!   time check, bolt state)
//! - [`controller`] — the polling [`LockController`] that drives real or
//!   mock hardware through the `latchkey-hardware` port traits
//! - [`config`] — serde-friendly configuration with validation
//!
//! See [`LockController`] for a worked example wiring the controller to
//! the mock hardware.

pub mod config;
pub mod controller;
pub mod debounce;
pub mod error;
pub mod lock;

pub use config::LockConfig;
pub use controller::{LockController, LockEvent};
pub use debounce::{Button, ButtonDebouncer};
pub use error::{ControlError, Result};
pub use lock::CodeEntryLock;
