// src/ui/portrait/components.rs
//
// The sprite library and markers for the pet portrait.

use std::collections::HashMap;
use std::path::Path;

use bevy::prelude::*;

use crate::pet::machine::DisplayAction;
use crate::pet::state::Phase;

/// Root folder (inside `assets/`) the sprite sheets live under.
const SPRITES_DIR: &str = "sprites";

/// Per-phase, per-action frame handles resolved once at startup.
///
/// Expected files under `assets/sprites/<phase>/`: two frames per action
/// (`idle_1.png`, `idle_2.png`, `feed_1.png`, ...), a single `dead.png`,
/// and an optional third `idle_3.png` used as a rare idle variant.
/// Missing files simply leave the pool short; the portrait degrades to a
/// labeled placeholder instead of failing.
#[derive(Resource, Debug, Default)]
pub struct SpriteLibrary {
    frames: HashMap<(Phase, DisplayAction), Vec<Handle<Image>>>,
}

impl SpriteLibrary {
    pub fn load(asset_server: &AssetServer) -> Self {
        let mut frames = HashMap::new();
        for phase in Phase::ALL {
            for action in DisplayAction::ALL {
                let handles: Vec<Handle<Image>> = sprite_files(phase, action)
                    .into_iter()
                    .map(|file| asset_server.load(file))
                    .collect();
                frames.insert((phase, action), handles);
            }
        }
        Self { frames }
    }

    pub fn is_empty(&self) -> bool {
        self.frames.values().all(|handles| handles.is_empty())
    }

    /// The frame to draw, wrapping the index into however many frames the
    /// pool actually has. An action with no art falls back to the phase's
    /// idle pool before giving up.
    pub fn frame(
        &self,
        phase: Phase,
        action: DisplayAction,
        index: usize,
    ) -> Option<Handle<Image>> {
        let pool = self
            .pool(phase, action)
            .or_else(|| self.pool(phase, DisplayAction::Idle))?;
        Some(pool[index % pool.len()].clone())
    }

    /// Whether this phase owns a third idle frame.
    pub fn has_rare_idle(&self, phase: Phase) -> bool {
        self.frames
            .get(&(phase, DisplayAction::Idle))
            .is_some_and(|pool| pool.len() >= 3)
    }

    fn pool(&self, phase: Phase, action: DisplayAction) -> Option<&Vec<Handle<Image>>> {
        self.frames
            .get(&(phase, action))
            .filter(|pool| !pool.is_empty())
    }
}

/// Relative asset paths that actually exist on disk for this cell.
fn sprite_files(phase: Phase, action: DisplayAction) -> Vec<String> {
    let dir = format!("{SPRITES_DIR}/{}", phase.label());
    let candidates: Vec<String> = match action {
        DisplayAction::Dead => vec![format!("{dir}/dead.png")],
        DisplayAction::Idle => (1..=3)
            .map(|index| format!("{dir}/{}_{index}.png", action.file_stem()))
            .collect(),
        _ => (1..=2)
            .map(|index| format!("{dir}/{}_{index}.png", action.file_stem()))
            .collect(),
    };

    candidates
        .into_iter()
        .filter(|relative| Path::new("assets").join(relative).exists())
        .collect()
}

/// Marker: the portrait's backdrop node.
#[derive(Component)]
pub struct PortraitFrame;

/// Marker: the image node showing the pet.
#[derive(Component)]
pub struct PetSprite;

/// Marker: the text shown instead when no art is available.
#[derive(Component)]
pub struct PlaceholderLabel;
