//! dronedeck: a terminal dashboard for monitoring a drone fleet.
//!
//! The fleet is an in-memory list of drone records mutated on a fixed
//! tick by a telemetry simulator. The dashboard renders a map panel
//! with per-drone markers, a status panel for the selected drone,
//! rolling telemetry charts, and a confirmation modal gating emergency
//! commands.

pub mod app;
pub mod config;
pub mod fleet;
pub mod modules;
pub mod ui;
