//! Persistence module: the save store plus its autosave plumbing.
pub mod plugin;
pub mod store;

pub use plugin::PersistencePlugin;
