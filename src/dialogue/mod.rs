//! Dialogue module hosting the typed line tables and the status banner.
pub mod lines;
pub mod plugin;
pub mod status;
pub mod systems;

pub use plugin::DialoguePlugin;
