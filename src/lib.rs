//! Library crate for pick-users.
//!
//! This crate exposes the building blocks of the TUI:
//! - The picker controller: filter text, selection, backspace removal (`picker`)
//! - Selection set and removal state (`selection`)
//! - Candidate filtering (`search`)
//! - Remote user listing and the background loader (`source`)
//! - Application state and update loop (`app`)
//! - UI rendering and widgets (`ui`)
//! - Command-line options and logging (`cli`)
//!
//! It is used by the `pick-users` binary and by tests.
#![doc = include_str!("../README.md")]
#![deny(rustdoc::broken_intra_doc_links)]

pub mod app;
pub mod cli;
pub mod error;
pub mod picker;
pub mod search;
pub mod selection;
pub mod source;
pub mod ui;

// Re-export commonly used items at the crate root for convenience
/// Convenient error and result types shared across the crate.
pub use error::{DynError, Result};
pub use picker::{FilterKey, FilterKeyEvent, Picker};
pub use source::UserRecord;
