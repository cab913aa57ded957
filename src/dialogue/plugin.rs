//! Dialogue plugin wiring the line library and the status banner.
use bevy::prelude::*;

use super::lines::LineLibrary;
use super::status::StatusBanner;
use super::systems::{expire_status_banner, voice_pet_speech};

pub struct DialoguePlugin;

impl Plugin for DialoguePlugin {
    fn build(&self, app: &mut App) {
        app.insert_resource(LineLibrary::load_or_default())
            .init_resource::<StatusBanner>()
            .add_systems(
                Update,
                (voice_pet_speech, expire_status_banner.after(voice_pet_speech)),
            );
    }
}
