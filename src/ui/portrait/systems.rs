// src/ui/portrait/systems.rs
//
// Systems spawning the portrait node and keeping its frame current.

use bevy::prelude::*;

use crate::pet::config::PetSettings;
use crate::pet::machine::{DisplayAction, PetMachine};

use super::components::{PetSprite, PlaceholderLabel, PortraitFrame, SpriteLibrary};

const PLACEHOLDER_BACKGROUND: Color = Color::srgb_u8(60, 60, 80);
const PLACEHOLDER_TEXT_COLOR: Color = Color::srgb(0.86, 0.86, 0.86);

pub fn setup_portrait(mut commands: Commands, asset_server: Res<AssetServer>) {
    let library = SpriteLibrary::load(&asset_server);
    if library.is_empty() {
        warn!("No sprite art under assets/sprites; the pet renders as a labeled placeholder");
    }
    commands.insert_resource(library);

    commands
        .spawn((
            Node {
                position_type: PositionType::Absolute,
                left: Val::Px(96.0),
                top: Val::Px(70.0),
                width: Val::Px(128.0),
                height: Val::Px(128.0),
                justify_content: JustifyContent::Center,
                align_items: AlignItems::Center,
                ..default()
            },
            BackgroundColor(Color::NONE),
            PortraitFrame,
        ))
        .with_children(|portrait| {
            portrait.spawn((
                ImageNode::default(),
                Node {
                    width: Val::Percent(100.0),
                    height: Val::Percent(100.0),
                    display: Display::None,
                    ..default()
                },
                PetSprite,
            ));
            portrait.spawn((
                Text::new(""),
                TextFont {
                    font_size: 12.0,
                    ..default()
                },
                TextColor(PLACEHOLDER_TEXT_COLOR),
                PlaceholderLabel,
            ));
        });
}

/// Applies the machine's display action and frame to the portrait. The
/// rare third idle frame is a display-time override, chosen here and never
/// stored in the machine.
#[allow(clippy::type_complexity)]
pub fn update_pet_sprite(
    machine: Res<PetMachine>,
    settings: Res<PetSettings>,
    library: Res<SpriteLibrary>,
    mut sprites: Query<(&mut ImageNode, &mut Node), With<PetSprite>>,
    mut labels: Query<(&mut Text, &mut Node), (With<PlaceholderLabel>, Without<PetSprite>)>,
    mut frames: Query<
        &mut BackgroundColor,
        (With<PortraitFrame>, Without<PetSprite>, Without<PlaceholderLabel>),
    >,
) {
    let phase = machine.phase();
    let action = machine.display_action(&settings);
    let index = if action == DisplayAction::Idle
        && machine.rare_idle_eligible()
        && library.has_rare_idle(phase)
    {
        2
    } else {
        machine.frame_index()
    };

    let frame = library.frame(phase, action, index);

    for (mut image, mut node) in sprites.iter_mut() {
        match &frame {
            Some(handle) => {
                if image.image != *handle {
                    image.image = handle.clone();
                }
                node.display = Display::Flex;
            }
            None => node.display = Display::None,
        }
    }

    for (mut text, mut node) in labels.iter_mut() {
        match &frame {
            Some(_) => node.display = Display::None,
            None => {
                node.display = Display::Flex;
                let caption = format!("{}:{}", phase.label(), action.file_stem());
                if text.0 != caption {
                    text.0 = caption;
                }
            }
        }
    }

    for mut backdrop in frames.iter_mut() {
        backdrop.0 = if frame.is_some() {
            Color::NONE
        } else {
            PLACEHOLDER_BACKGROUND
        };
    }
}
