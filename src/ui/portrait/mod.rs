// src/ui/portrait/mod.rs
//
// Portrait module: the animated creature display and its sprite library.

pub mod components;
pub mod plugin;
pub mod systems;

pub use plugin::PortraitPlugin;
