use bevy::prelude::*;
use bevy::window::WindowResolution;

mod core;
mod dialogue;
mod persistence;
mod pet;
mod ui;

use crate::{
    core::CorePlugin,
    dialogue::DialoguePlugin,
    persistence::PersistencePlugin,
    pet::PetPlugin,
    ui::{HudPlugin, PortraitPlugin},
};

const WINDOW_WIDTH: f32 = 320.0;
const WINDOW_HEIGHT: f32 = 480.0;

fn main() {
    App::new()
        .add_plugins(DefaultPlugins.set(WindowPlugin {
            primary_window: Some(Window {
                title: "pixelpet".into(),
                resolution: WindowResolution::new(WINDOW_WIDTH, WINDOW_HEIGHT),
                resizable: false,
                ..default()
            }),
            ..default()
        }))
        .insert_resource(ClearColor(Color::srgb_u8(25, 25, 35)))
        .add_plugins((
            CorePlugin::default(),
            PetPlugin,
            DialoguePlugin, // After PetPlugin so speech events are voiced the same frame
            PersistencePlugin,
            HudPlugin,
            PortraitPlugin,
        ))
        .run();
}
