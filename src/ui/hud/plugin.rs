// src/ui/hud/plugin.rs
//
// Plugin registration for the HUD systems.

use bevy::prelude::*;

use crate::pet::systems::apply_pet_commands;

use super::systems::{
    handle_action_buttons, handle_keyboard, handle_power_button, setup_hud, style_action_buttons,
    update_banner, update_level_readout, update_stat_bars,
};

/// Screen-space HUD for the fixed 320x480 window: stat bars, level
/// readout, action/power buttons, and the status banner.
///
/// Input systems run before the pet consumes commands so a press lands in
/// the same frame; the visual updates run afterwards and only ever read
/// snapshots.
pub struct HudPlugin;

impl Plugin for HudPlugin {
    fn build(&self, app: &mut App) {
        app.add_systems(Startup, setup_hud)
            .add_systems(
                Update,
                (handle_keyboard, handle_action_buttons, handle_power_button)
                    .before(apply_pet_commands),
            )
            .add_systems(
                Update,
                (
                    update_level_readout,
                    update_stat_bars,
                    style_action_buttons,
                    update_banner,
                )
                    .after(apply_pet_commands),
            );
    }
}
