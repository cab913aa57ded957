// src/ui/mod.rs
//
// UI module providing the screen-space shell around the pet core:
// - hud: stat bars, level readout, buttons, banner, keyboard input
// - portrait: the animated creature display
//
// Both only read machine snapshots and emit events; neither mutates pet
// state directly.

pub mod hud;
pub mod portrait;

pub use hud::HudPlugin;
pub use portrait::PortraitPlugin;
