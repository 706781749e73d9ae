//! Dashboard feature modules.
//!
//! - modal: confirmation dialog gating emergency commands
//! - export: CSV export of the confirmed-command log

pub mod export;
pub mod modal;
