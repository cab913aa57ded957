//! Pet module: the persistent record, tuning tables, and the state machine
//! that owns them.
pub mod config;
pub mod events;
pub mod machine;
pub mod plugin;
pub mod state;
pub mod systems;

pub use plugin::PetPlugin;
