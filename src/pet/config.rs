//! Pet tuning loaded from `config/pet.toml`, including the action table.
use std::fs;
use std::path::{Path, PathBuf};

use bevy::prelude::*;
use serde::Deserialize;

use crate::pet::state::StatBand;

const CONFIG_PATH: &str = "config/pet.toml";

#[derive(Debug, Clone, Deserialize, Default)]
struct RawPetConfig {
    #[serde(default)]
    timing: RawTiming,
    #[serde(default)]
    decay: RawDecay,
    #[serde(default)]
    energy: RawEnergy,
    #[serde(default)]
    dialogue: RawDialogueTiming,
    #[serde(default)]
    save: RawSave,
    #[serde(default)]
    power: RawPower,
    #[serde(default, rename = "action")]
    actions: Vec<RawAction>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
struct RawTiming {
    idle_frame_ms: u64,
    action_frame_min_ms: u64,
    action_frame_max_ms: u64,
}

impl Default for RawTiming {
    fn default() -> Self {
        Self {
            idle_frame_ms: 2400,
            action_frame_min_ms: 1800,
            action_frame_max_ms: 2600,
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
struct RawDecay {
    interval_ms: u64,
    hunger: i32,
    happiness: i32,
    love: i32,
}

impl Default for RawDecay {
    fn default() -> Self {
        Self {
            interval_ms: 10_000,
            hunger: 1,
            happiness: 1,
            love: 1,
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
struct RawEnergy {
    starving_fill_minutes: f64,
    hungry_fill_minutes: f64,
    green_fill_minutes: f64,
    one_orange_fill_minutes: f64,
    worn_fill_minutes: f64,
    weary_face_below: i32,
}

impl Default for RawEnergy {
    fn default() -> Self {
        Self {
            starving_fill_minutes: 60.0,
            hungry_fill_minutes: 20.0,
            green_fill_minutes: 7.5,
            one_orange_fill_minutes: 10.0,
            worn_fill_minutes: 12.5,
            weary_face_below: 10,
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
struct RawDialogueTiming {
    default_ms: u64,
    no_energy_ms: u64,
    hungry_ms: u64,
    death_ms: u64,
    reset_ms: u64,
}

impl Default for RawDialogueTiming {
    fn default() -> Self {
        Self {
            default_ms: 4200,
            no_energy_ms: 2600,
            hungry_ms: 5200,
            death_ms: 7000,
            reset_ms: 3000,
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
struct RawSave {
    path: PathBuf,
    autosave_interval_ms: u64,
}

impl Default for RawSave {
    fn default() -> Self {
        Self {
            path: PathBuf::from("save/pet.json"),
            autosave_interval_ms: 60_000,
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
struct RawPower {
    halt_host: bool,
}

impl Default for RawPower {
    fn default() -> Self {
        Self { halt_host: true }
    }
}

#[derive(Debug, Clone, Deserialize)]
struct RawAction {
    name: ActionKind,
    #[serde(default)]
    cost: i32,
    #[serde(default)]
    hunger: i32,
    #[serde(default)]
    happiness: i32,
    #[serde(default)]
    love: i32,
    #[serde(default)]
    xp: u32,
}

/// Player-triggered interactions with a configured cost and stat deltas.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ActionKind {
    Feed,
    Play,
    Cuddle,
}

impl ActionKind {
    /// Button caption.
    pub fn label(self) -> &'static str {
        match self {
            Self::Feed => "FEED",
            Self::Play => "PLAY",
            Self::Cuddle => "CUDDLE",
        }
    }
}

/// Cost and stat deltas for one action.
#[derive(Debug, Clone, Copy)]
pub struct ActionRule {
    pub cost: i32,
    pub hunger: i32,
    pub happiness: i32,
    pub love: i32,
    pub xp: u32,
}

/// Typed, total mapping from action to rule.
#[derive(Debug, Clone)]
pub struct ActionTable {
    feed: ActionRule,
    play: ActionRule,
    cuddle: ActionRule,
}

impl ActionTable {
    fn from_raw(raw: Vec<RawAction>) -> Result<Self, String> {
        if raw.is_empty() {
            return Err("pet config must define at least one action".to_string());
        }

        let mut feed = None;
        let mut play = None;
        let mut cuddle = None;
        for action in raw {
            let rule = ActionRule {
                cost: action.cost.max(0),
                hunger: action.hunger,
                happiness: action.happiness,
                love: action.love,
                xp: action.xp,
            };
            let slot = match action.name {
                ActionKind::Feed => &mut feed,
                ActionKind::Play => &mut play,
                ActionKind::Cuddle => &mut cuddle,
            };
            if slot.replace(rule).is_some() {
                return Err(format!("duplicate action entry '{}'", action.name.label()));
            }
        }

        match (feed, play, cuddle) {
            (Some(feed), Some(play), Some(cuddle)) => Ok(Self { feed, play, cuddle }),
            _ => Err("action table must cover feed, play, and cuddle".to_string()),
        }
    }

    fn fallback() -> Self {
        Self {
            feed: ActionRule {
                cost: 2,
                hunger: 22,
                happiness: 0,
                love: 0,
                xp: 10,
            },
            play: ActionRule {
                cost: 10,
                hunger: -2,
                happiness: 22,
                love: 4,
                xp: 14,
            },
            cuddle: ActionRule {
                cost: 10,
                hunger: -2,
                happiness: 5,
                love: 22,
                xp: 14,
            },
        }
    }

    pub fn rule(&self, kind: ActionKind) -> ActionRule {
        match kind {
            ActionKind::Feed => self.feed,
            ActionKind::Play => self.play,
            ActionKind::Cuddle => self.cuddle,
        }
    }
}

/// Runtime tuning derived from `config/pet.toml`.
#[derive(Resource, Debug, Clone)]
pub struct PetSettings {
    pub timing: AnimationTiming,
    pub decay: DecayRule,
    pub energy: EnergyModel,
    pub dialogue: DialogueTiming,
    pub save: SaveSettings,
    pub power: PowerSettings,
    pub actions: ActionTable,
}

#[derive(Debug, Clone)]
pub struct AnimationTiming {
    pub idle_frame_ms: u64,
    pub action_frame_min_ms: u64,
    pub action_frame_max_ms: u64,
}

#[derive(Debug, Clone)]
pub struct DecayRule {
    pub interval_ms: u64,
    pub hunger: i32,
    pub happiness: i32,
    pub love: i32,
}

/// Traffic-light driven regeneration tiers: minutes for energy to fill
/// from 0 to 100 under each care condition.
#[derive(Debug, Clone)]
pub struct EnergyModel {
    pub starving_fill_minutes: f64,
    pub hungry_fill_minutes: f64,
    pub green_fill_minutes: f64,
    pub one_orange_fill_minutes: f64,
    pub worn_fill_minutes: f64,
    pub weary_face_below: i32,
}

impl EnergyModel {
    /// Minutes for a full 0→100 fill given the current care stats.
    ///
    /// Starvation dominates; otherwise the tier is chosen by how many of
    /// the three care stats sit in the orange band (a red happiness/love
    /// without any orange also lands in the slowest tier).
    pub fn fill_minutes(&self, hunger: i32, happiness: i32, love: i32) -> f64 {
        if hunger <= 0 {
            return self.starving_fill_minutes;
        }
        if StatBand::for_value(hunger) == StatBand::Red {
            return self.hungry_fill_minutes;
        }

        let bands = [
            StatBand::for_value(hunger),
            StatBand::for_value(happiness),
            StatBand::for_value(love),
        ];
        let oranges = bands.iter().filter(|b| **b == StatBand::Orange).count();

        if bands.iter().all(|b| *b == StatBand::Green) {
            self.green_fill_minutes
        } else if oranges == 1 {
            self.one_orange_fill_minutes
        } else {
            self.worn_fill_minutes
        }
    }
}

#[derive(Debug, Clone)]
pub struct DialogueTiming {
    pub default_ms: u64,
    pub no_energy_ms: u64,
    pub hungry_ms: u64,
    pub death_ms: u64,
    pub reset_ms: u64,
}

#[derive(Debug, Clone)]
pub struct SaveSettings {
    pub path: PathBuf,
    pub autosave_interval_ms: u64,
}

#[derive(Debug, Clone)]
pub struct PowerSettings {
    pub halt_host: bool,
}

impl PetSettings {
    pub fn load_or_default() -> Self {
        let path = Path::new(CONFIG_PATH);
        match fs::read_to_string(path) {
            Ok(raw) => match toml::from_str::<RawPetConfig>(&raw) {
                Ok(parsed) => Self::from_raw(parsed),
                Err(err) => {
                    warn!(
                        "Failed to parse {} ({}). Falling back to defaults.",
                        CONFIG_PATH, err
                    );
                    Self::from_raw(RawPetConfig::default())
                }
            },
            Err(err) => {
                warn!(
                    "Failed to read {} ({}). Falling back to defaults.",
                    CONFIG_PATH, err
                );
                Self::from_raw(RawPetConfig::default())
            }
        }
    }

    fn from_raw(raw: RawPetConfig) -> Self {
        let frame_min = raw.timing.action_frame_min_ms.max(1);
        let frame_max = raw.timing.action_frame_max_ms.max(frame_min);
        let timing = AnimationTiming {
            idle_frame_ms: raw.timing.idle_frame_ms.max(1),
            action_frame_min_ms: frame_min,
            action_frame_max_ms: frame_max,
        };

        let decay = DecayRule {
            interval_ms: raw.decay.interval_ms.max(1),
            hunger: raw.decay.hunger.max(0),
            happiness: raw.decay.happiness.max(0),
            love: raw.decay.love.max(0),
        };

        let energy = EnergyModel {
            starving_fill_minutes: raw.energy.starving_fill_minutes.max(0.1),
            hungry_fill_minutes: raw.energy.hungry_fill_minutes.max(0.1),
            green_fill_minutes: raw.energy.green_fill_minutes.max(0.1),
            one_orange_fill_minutes: raw.energy.one_orange_fill_minutes.max(0.1),
            worn_fill_minutes: raw.energy.worn_fill_minutes.max(0.1),
            weary_face_below: raw.energy.weary_face_below.clamp(0, 100),
        };

        let dialogue = DialogueTiming {
            default_ms: raw.dialogue.default_ms.max(1),
            no_energy_ms: raw.dialogue.no_energy_ms.max(1),
            hungry_ms: raw.dialogue.hungry_ms.max(1),
            death_ms: raw.dialogue.death_ms.max(1),
            reset_ms: raw.dialogue.reset_ms.max(1),
        };

        let save = SaveSettings {
            path: raw.save.path,
            autosave_interval_ms: raw.save.autosave_interval_ms.max(1),
        };

        let power = PowerSettings {
            halt_host: raw.power.halt_host,
        };

        let actions = match ActionTable::from_raw(raw.actions) {
            Ok(table) => table,
            Err(err) => {
                warn!("Invalid action table in {} ({}). Falling back to defaults.", CONFIG_PATH, err);
                ActionTable::fallback()
            }
        };

        Self {
            timing,
            decay,
            energy,
            dialogue,
            save,
            power,
            actions,
        }
    }
}
