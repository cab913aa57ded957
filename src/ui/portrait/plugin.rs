// src/ui/portrait/plugin.rs
//
// Plugin registration for the pet portrait.

use bevy::prelude::*;

use super::systems::{setup_portrait, update_pet_sprite};

/// Draws the creature itself: resolves the sprite library at startup and
/// applies the machine's display action and frame every update.
pub struct PortraitPlugin;

impl Plugin for PortraitPlugin {
    fn build(&self, app: &mut App) {
        app.add_systems(Startup, setup_portrait)
            .add_systems(Update, update_pet_sprite);
    }
}
