//! Typed dialogue line tables keyed by life phase and cue.
use std::{fs, path::Path};

use bevy::prelude::*;
use rand::seq::SliceRandom;
use rand::Rng;
use serde::Deserialize;

use crate::pet::state::Phase;

const CONFIG_PATH: &str = "config/dialogue.toml";

/// The shipped tables, compiled in so the pet still talks when the config
/// directory is missing or half-filled.
const FALLBACK_TOML: &str = include_str!("../../config/dialogue.toml");

/// Everything the pet can be prompted to say.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DialogueCue {
    Feed,
    Play,
    Cuddle,
    NoEnergy,
    Hungry,
    DeadUnloved,
    DeadBored,
    Reset,
}

impl DialogueCue {
    /// Fallback text when no table carries a line for this cue.
    pub fn label(self) -> &'static str {
        match self {
            Self::Feed => "FEED",
            Self::Play => "PLAY",
            Self::Cuddle => "CUDDLE",
            Self::NoEnergy => "NO ENERGY",
            Self::Hungry => "HUNGRY",
            Self::DeadUnloved => "...",
            Self::DeadBored => "...",
            Self::Reset => "RESET",
        }
    }
}

#[derive(Debug, Clone, Deserialize, Default)]
struct RawDialogueConfig {
    #[serde(default)]
    baby: RawCueLines,
    #[serde(default)]
    kid: RawCueLines,
    #[serde(default)]
    teen: RawCueLines,
    #[serde(default)]
    adult: RawCueLines,
}

#[derive(Debug, Clone, Deserialize, Default)]
#[serde(default)]
struct RawCueLines {
    feed: Vec<String>,
    play: Vec<String>,
    cuddle: Vec<String>,
    no_energy: Vec<String>,
    hungry: Vec<String>,
    dead_unloved: Vec<String>,
    dead_bored: Vec<String>,
    reset: Vec<String>,
}

/// Line pool for a single phase.
#[derive(Debug, Clone, Default)]
struct CueLines {
    feed: Vec<String>,
    play: Vec<String>,
    cuddle: Vec<String>,
    no_energy: Vec<String>,
    hungry: Vec<String>,
    dead_unloved: Vec<String>,
    dead_bored: Vec<String>,
    reset: Vec<String>,
}

impl CueLines {
    fn lines(&self, cue: DialogueCue) -> &[String] {
        match cue {
            DialogueCue::Feed => &self.feed,
            DialogueCue::Play => &self.play,
            DialogueCue::Cuddle => &self.cuddle,
            DialogueCue::NoEnergy => &self.no_energy,
            DialogueCue::Hungry => &self.hungry,
            DialogueCue::DeadUnloved => &self.dead_unloved,
            DialogueCue::DeadBored => &self.dead_bored,
            DialogueCue::Reset => &self.reset,
        }
    }

    /// Fills any cue the config left empty from the shipped tables.
    fn backfill(&mut self, fallback: &CueLines) {
        fn fill(slot: &mut Vec<String>, fallback: &[String]) {
            if slot.is_empty() {
                slot.extend(fallback.iter().cloned());
            }
        }
        fill(&mut self.feed, &fallback.feed);
        fill(&mut self.play, &fallback.play);
        fill(&mut self.cuddle, &fallback.cuddle);
        fill(&mut self.no_energy, &fallback.no_energy);
        fill(&mut self.hungry, &fallback.hungry);
        fill(&mut self.dead_unloved, &fallback.dead_unloved);
        fill(&mut self.dead_bored, &fallback.dead_bored);
        fill(&mut self.reset, &fallback.reset);
    }
}

impl From<RawCueLines> for CueLines {
    fn from(raw: RawCueLines) -> Self {
        Self {
            feed: raw.feed,
            play: raw.play,
            cuddle: raw.cuddle,
            no_energy: raw.no_energy,
            hungry: raw.hungry,
            dead_unloved: raw.dead_unloved,
            dead_bored: raw.dead_bored,
            reset: raw.reset,
        }
    }
}

/// What the pet says, resolved per (phase, cue).
#[derive(Resource, Debug, Clone)]
pub struct LineLibrary {
    baby: CueLines,
    kid: CueLines,
    teen: CueLines,
    adult: CueLines,
}

impl LineLibrary {
    pub fn load_or_default() -> Self {
        let path = Path::new(CONFIG_PATH);
        let mut library = match fs::read_to_string(path) {
            Ok(raw) => match toml::from_str::<RawDialogueConfig>(&raw) {
                Ok(parsed) => Self::from_raw(parsed),
                Err(err) => {
                    warn!(
                        "Failed to parse {} ({}). Using the built-in lines.",
                        CONFIG_PATH, err
                    );
                    Self::fallback()
                }
            },
            Err(err) => {
                warn!(
                    "Failed to read {} ({}). Using the built-in lines.",
                    CONFIG_PATH, err
                );
                Self::fallback()
            }
        };
        library.backfill(&Self::fallback());
        library
    }

    fn from_raw(raw: RawDialogueConfig) -> Self {
        Self {
            baby: raw.baby.into(),
            kid: raw.kid.into(),
            teen: raw.teen.into(),
            adult: raw.adult.into(),
        }
    }

    fn fallback() -> Self {
        toml::from_str::<RawDialogueConfig>(FALLBACK_TOML)
            .map(Self::from_raw)
            .unwrap_or_else(|_| Self::from_raw(RawDialogueConfig::default()))
    }

    fn backfill(&mut self, fallback: &Self) {
        self.baby.backfill(&fallback.baby);
        self.kid.backfill(&fallback.kid);
        self.teen.backfill(&fallback.teen);
        self.adult.backfill(&fallback.adult);
    }

    fn phase_lines(&self, phase: Phase) -> &CueLines {
        match phase {
            Phase::Baby => &self.baby,
            Phase::Kid => &self.kid,
            Phase::Teen => &self.teen,
            Phase::Adult => &self.adult,
        }
    }

    /// Picks a random line; an empty pool answers with the cue's label
    /// rather than silence.
    pub fn pick<R: Rng>(&self, phase: Phase, cue: DialogueCue, rng: &mut R) -> String {
        self.phase_lines(phase)
            .lines(cue)
            .choose(rng)
            .cloned()
            .unwrap_or_else(|| cue.label().to_string())
    }
}
