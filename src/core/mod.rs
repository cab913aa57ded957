//! Core module hosting the simulation clock and host power integration.
pub mod plugin;
pub mod power;

pub use plugin::CorePlugin;
