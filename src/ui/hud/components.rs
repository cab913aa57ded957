// src/ui/hud/components.rs
//
// Markers and visual constants for the pet HUD.

use bevy::prelude::*;

use crate::pet::machine::PetCommand;
use crate::pet::state::StatBand;

/// One of the four stat gauges.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StatKind {
    Hunger,
    Happiness,
    Love,
    Energy,
}

impl StatKind {
    pub const ALL: [StatKind; 4] = [
        StatKind::Hunger,
        StatKind::Happiness,
        StatKind::Love,
        StatKind::Energy,
    ];

    pub fn label(self) -> &'static str {
        match self {
            Self::Hunger => "Hunger",
            Self::Happiness => "Happiness",
            Self::Love => "Love",
            Self::Energy => "Energy",
        }
    }
}

/// Marker: the filled part of a stat bar.
#[derive(Component, Debug, Clone, Copy)]
pub struct StatBarFill(pub StatKind);

/// Marker: the "Hunger: 62%" text beside a bar.
#[derive(Component, Debug, Clone, Copy)]
pub struct StatBarLabel(pub StatKind);

/// Marker: the level/XP readout at the top of the window.
#[derive(Component)]
pub struct LevelReadout;

/// An action button and the command it fires.
#[derive(Component, Debug, Clone, Copy)]
pub struct ActionButton(pub PetCommand);

/// Marker: the POWER button.
#[derive(Component)]
pub struct PowerButton;

/// Marker: the banner box showing the current line.
#[derive(Component)]
pub struct BannerNode;

/// Marker: the banner's text child.
#[derive(Component)]
pub struct BannerText;

// Visual constants
pub const BUTTON_ENABLED_COLOR: Color = Color::srgb(0.24, 0.31, 0.59);
pub const BUTTON_DISABLED_COLOR: Color = Color::srgb(0.29, 0.29, 0.29);
pub const BUTTON_BORDER_COLOR: Color = Color::srgb(0.86, 0.86, 0.86);
pub const TEXT_ENABLED_COLOR: Color = Color::WHITE;
pub const TEXT_DISABLED_COLOR: Color = Color::srgb(0.67, 0.67, 0.67);
pub const HUD_TEXT_COLOR: Color = Color::srgb(0.94, 0.94, 0.94);
pub const BAR_BACKDROP_COLOR: Color = Color::srgb(0.27, 0.27, 0.27);
pub const BAR_BORDER_COLOR: Color = Color::srgb(0.78, 0.78, 0.78);
pub const BANNER_BACKGROUND_COLOR: Color = Color::srgb(0.14, 0.14, 0.18);
pub const POWER_BUTTON_COLOR: Color = Color::srgb(0.47, 0.16, 0.16);

/// Fill color for a stat bar, by traffic-light band.
pub fn band_color(value: i32) -> Color {
    match StatBand::for_value(value) {
        StatBand::Green => Color::srgb_u8(60, 170, 90),
        StatBand::Orange => Color::srgb_u8(200, 170, 60),
        StatBand::Red => Color::srgb_u8(200, 80, 70),
    }
}
