// src/ui/hud/systems.rs
//
// Systems for spawning and updating the HUD: stat bars, level readout,
// action buttons, the status banner, and keyboard input.

use bevy::app::AppExit;
use bevy::prelude::*;

use crate::core::power::PowerOffEvent;
use crate::dialogue::status::StatusBanner;
use crate::pet::config::PetSettings;
use crate::pet::events::PetCommandEvent;
use crate::pet::machine::{PetCommand, PetMachine};
use crate::pet::state::{xp_needed, LEVEL_CAP};

use super::components::{
    band_color, ActionButton, BannerNode, BannerText, LevelReadout, PowerButton, StatBarFill,
    StatBarLabel, StatKind, BANNER_BACKGROUND_COLOR, BAR_BACKDROP_COLOR, BAR_BORDER_COLOR,
    BUTTON_BORDER_COLOR, BUTTON_DISABLED_COLOR, BUTTON_ENABLED_COLOR, HUD_TEXT_COLOR,
    POWER_BUTTON_COLOR, TEXT_DISABLED_COLOR, TEXT_ENABLED_COLOR,
};

const BAR_TOP_PX: f32 = 220.0;
const BAR_ROW_STEP_PX: f32 = 32.0;
const BUTTON_ROW_TOP_PX: f32 = 420.0;

/// Builds the whole static HUD tree. Values are written by the per-frame
/// update systems below.
pub fn setup_hud(mut commands: Commands, settings: Res<PetSettings>) {
    commands.spawn(Camera2d);

    // Level / XP readout.
    commands.spawn((
        Node {
            position_type: PositionType::Absolute,
            left: Val::Px(12.0),
            top: Val::Px(16.0),
            ..default()
        },
        Text::new(""),
        TextFont {
            font_size: 15.0,
            ..default()
        },
        TextColor(Color::WHITE),
        LevelReadout,
    ));

    // Stat bars with their labels.
    for (row, kind) in StatKind::ALL.into_iter().enumerate() {
        let top = BAR_TOP_PX + BAR_ROW_STEP_PX * row as f32;

        commands.spawn((
            Node {
                position_type: PositionType::Absolute,
                left: Val::Px(20.0),
                top: Val::Px(top),
                ..default()
            },
            Text::new(format!("{}: -", kind.label())),
            TextFont {
                font_size: 12.0,
                ..default()
            },
            TextColor(HUD_TEXT_COLOR),
            StatBarLabel(kind),
        ));

        commands
            .spawn((
                Node {
                    position_type: PositionType::Absolute,
                    left: Val::Px(120.0),
                    top: Val::Px(top + 2.0),
                    width: Val::Px(180.0),
                    height: Val::Px(16.0),
                    border: UiRect::all(Val::Px(1.0)),
                    ..default()
                },
                BackgroundColor(BAR_BACKDROP_COLOR),
                BorderColor::from(BAR_BORDER_COLOR),
            ))
            .with_children(|bar| {
                bar.spawn((
                    Node {
                        width: Val::Percent(50.0),
                        height: Val::Percent(100.0),
                        ..default()
                    },
                    BackgroundColor(band_color(50)),
                    StatBarFill(kind),
                ));
            });
    }

    // Status banner, hidden until the pet speaks.
    commands
        .spawn((
            Node {
                position_type: PositionType::Absolute,
                left: Val::Px(12.0),
                top: Val::Px(350.0),
                width: Val::Px(296.0),
                height: Val::Px(42.0),
                border: UiRect::all(Val::Px(1.0)),
                justify_content: JustifyContent::Center,
                align_items: AlignItems::Center,
                display: Display::None,
                ..default()
            },
            BackgroundColor(BANNER_BACKGROUND_COLOR),
            BorderColor::from(BAR_BORDER_COLOR),
            BannerNode,
        ))
        .with_children(|banner| {
            banner.spawn((
                Text::new(""),
                TextFont {
                    font_size: 13.0,
                    ..default()
                },
                TextColor(HUD_TEXT_COLOR),
                BannerText,
            ));
        });

    // Action buttons.
    let buttons = [
        (10.0, PetCommand::Feed),
        (86.0, PetCommand::Play),
        (162.0, PetCommand::Cuddle),
        (238.0, PetCommand::Reset),
    ];
    for (left, command) in buttons {
        let caption = match command.action() {
            Some(kind) => {
                let cost = settings.actions.rule(kind).cost;
                format!("{} ({cost})", kind.label())
            }
            None => "RESET".to_string(),
        };

        commands
            .spawn((
                Node {
                    position_type: PositionType::Absolute,
                    left: Val::Px(left),
                    top: Val::Px(BUTTON_ROW_TOP_PX),
                    width: Val::Px(70.0),
                    height: Val::Px(45.0),
                    border: UiRect::all(Val::Px(2.0)),
                    justify_content: JustifyContent::Center,
                    align_items: AlignItems::Center,
                    ..default()
                },
                Button,
                Interaction::None,
                BackgroundColor(BUTTON_DISABLED_COLOR),
                BorderColor::from(BUTTON_BORDER_COLOR),
                ActionButton(command),
            ))
            .with_children(|button| {
                button.spawn((
                    Text::new(caption),
                    TextFont {
                        font_size: 12.0,
                        ..default()
                    },
                    TextColor(TEXT_ENABLED_COLOR),
                ));
            });
    }

    // Power button.
    commands
        .spawn((
            Node {
                position_type: PositionType::Absolute,
                left: Val::Px(255.0),
                top: Val::Px(8.0),
                width: Val::Px(58.0),
                height: Val::Px(24.0),
                justify_content: JustifyContent::Center,
                align_items: AlignItems::Center,
                ..default()
            },
            Button,
            Interaction::None,
            BackgroundColor(POWER_BUTTON_COLOR),
            PowerButton,
        ))
        .with_children(|button| {
            button.spawn((
                Text::new("POWER"),
                TextFont {
                    font_size: 11.0,
                    ..default()
                },
                TextColor(Color::WHITE),
            ));
        });

    info!("HUD spawned");
}

/// Forwards action button presses as pet commands. The gating here only
/// mirrors what the machine enforces anyway, so a race never corrupts
/// state; it just keeps obviously-invalid presses from emitting events.
pub fn handle_action_buttons(
    interactions: Query<(&Interaction, &ActionButton), (Changed<Interaction>, With<Button>)>,
    machine: Res<PetMachine>,
    mut writer: MessageWriter<PetCommandEvent>,
) {
    for (interaction, button) in interactions.iter() {
        if *interaction != Interaction::Pressed {
            continue;
        }
        if machine.is_locked() {
            continue;
        }

        let dead = machine.state().dead;
        let is_reset = button.0 == PetCommand::Reset;
        if dead != is_reset {
            continue;
        }

        writer.write(PetCommandEvent { command: button.0 });
    }
}

/// Forwards POWER presses to the power-off sequence.
pub fn handle_power_button(
    interactions: Query<&Interaction, (Changed<Interaction>, With<PowerButton>)>,
    mut writer: MessageWriter<PowerOffEvent>,
) {
    for interaction in interactions.iter() {
        if *interaction == Interaction::Pressed {
            writer.write(PowerOffEvent);
        }
    }
}

/// Keyboard shortcuts: ESC quits, R resets a dead pet.
pub fn handle_keyboard(
    keyboard: Res<ButtonInput<KeyCode>>,
    machine: Res<PetMachine>,
    mut commands_out: MessageWriter<PetCommandEvent>,
    mut exit: MessageWriter<AppExit>,
) {
    if keyboard.just_pressed(KeyCode::Escape) {
        exit.write(AppExit::Success);
        return;
    }
    if keyboard.just_pressed(KeyCode::KeyR) && machine.state().dead {
        commands_out.write(PetCommandEvent {
            command: PetCommand::Reset,
        });
    }
}

pub fn update_level_readout(
    machine: Res<PetMachine>,
    mut readouts: Query<&mut Text, With<LevelReadout>>,
) {
    let state = machine.state();
    let xp_text = if state.level >= LEVEL_CAP {
        "MAX".to_string()
    } else {
        format!("{}/{}", state.xp, xp_needed(state.level))
    };

    for mut text in readouts.iter_mut() {
        text.0 = format!(
            "Level {} ({})  XP {}",
            state.level,
            state.phase().label(),
            xp_text
        );
    }
}

pub fn update_stat_bars(
    machine: Res<PetMachine>,
    mut fills: Query<(&StatBarFill, &mut Node, &mut BackgroundColor)>,
    mut labels: Query<(&StatBarLabel, &mut Text)>,
) {
    let stat = |kind: StatKind| -> i32 {
        let state = machine.state();
        match kind {
            StatKind::Hunger => state.hunger,
            StatKind::Happiness => state.happiness,
            StatKind::Love => state.love,
            StatKind::Energy => state.energy,
        }
    };

    for (fill, mut node, mut background) in fills.iter_mut() {
        let value = stat(fill.0);
        node.width = Val::Percent(value as f32);
        background.0 = band_color(value);
    }

    for (label, mut text) in labels.iter_mut() {
        let value = stat(label.0);
        text.0 = format!("{}: {value}%", label.0.label());
    }
}

/// Paints buttons by affordability: gray while unaffordable, while the pet
/// is dead (all but RESET), or for RESET while the pet lives.
pub fn style_action_buttons(
    machine: Res<PetMachine>,
    settings: Res<PetSettings>,
    mut buttons: Query<(&ActionButton, &mut BackgroundColor, &Children)>,
    mut captions: Query<&mut TextColor>,
) {
    let state = machine.state();
    for (button, mut background, children) in buttons.iter_mut() {
        let enabled = match button.0.action() {
            Some(kind) => !state.dead && state.energy >= settings.actions.rule(kind).cost,
            None => state.dead,
        };

        background.0 = if enabled {
            BUTTON_ENABLED_COLOR
        } else {
            BUTTON_DISABLED_COLOR
        };

        for child in children.to_vec() {
            if let Ok(mut color) = captions.get_mut(child) {
                color.0 = if enabled {
                    TEXT_ENABLED_COLOR
                } else {
                    TEXT_DISABLED_COLOR
                };
            }
        }
    }
}

pub fn update_banner(
    banner: Res<StatusBanner>,
    mut boxes: Query<&mut Node, With<BannerNode>>,
    mut texts: Query<&mut Text, With<BannerText>>,
) {
    let line = banner.text();

    for mut node in boxes.iter_mut() {
        node.display = if line.is_some() {
            Display::Flex
        } else {
            Display::None
        };
    }

    if let Some(line) = line {
        for mut text in texts.iter_mut() {
            if text.0 != line {
                text.0 = line.to_string();
            }
        }
    }
}
