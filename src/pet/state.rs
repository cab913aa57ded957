//! The pet's persistent record, life phases, and the leveling law.
use serde::{Deserialize, Serialize};

pub const STAT_FLOOR: i32 = 0;
pub const STAT_CEIL: i32 = 100;
pub const LEVEL_CAP: u32 = 20;

/// Life stage, derived purely from the current level.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Phase {
    Baby,
    Kid,
    Teen,
    Adult,
}

impl Phase {
    pub const ALL: [Phase; 4] = [Phase::Baby, Phase::Kid, Phase::Teen, Phase::Adult];

    /// Range lookup over the fixed phase table. Levels above the table fall
    /// through to adult, which the level cap keeps unreachable.
    pub fn for_level(level: u32) -> Self {
        match level {
            1..=4 => Self::Baby,
            5..=9 => Self::Kid,
            10..=14 => Self::Teen,
            _ => Self::Adult,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Self::Baby => "baby",
            Self::Kid => "kid",
            Self::Teen => "teen",
            Self::Adult => "adult",
        }
    }
}

/// Traffic-light classification shared by the HUD bars and the energy model.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StatBand {
    Green,
    Orange,
    Red,
}

impl StatBand {
    pub fn for_value(value: i32) -> Self {
        if value >= 70 {
            Self::Green
        } else if value >= 35 {
            Self::Orange
        } else {
            Self::Red
        }
    }
}

/// Constrains a stat to the displayable [0, 100] range.
pub fn clamp_stat(value: i32) -> i32 {
    value.clamp(STAT_FLOOR, STAT_CEIL)
}

/// Everything about the pet that survives a restart.
///
/// Mutated exclusively by [`crate::pet::machine::PetMachine`]; every other
/// module reads snapshots. `age_days` is carried in the save file but no
/// rule currently drives it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PetState {
    pub level: u32,
    pub xp: u32,
    pub hunger: i32,
    pub happiness: i32,
    pub love: i32,
    pub energy: i32,
    pub age_days: u32,
    pub dead: bool,
}

impl Default for PetState {
    fn default() -> Self {
        Self {
            level: 1,
            xp: 0,
            hunger: 50,
            happiness: 50,
            love: 50,
            energy: 50,
            age_days: 0,
            dead: false,
        }
    }
}

impl PetState {
    pub fn phase(&self) -> Phase {
        Phase::for_level(self.level)
    }
}

/// XP required to leave the given level. Monotonically increasing.
pub fn xp_needed(level: u32) -> u32 {
    100 + level.saturating_sub(1) * 25
}

/// Consumes accumulated XP into levels and returns how many were gained.
///
/// A single reward can cross several thresholds, so this loops. At the cap
/// the excess XP is retained unconsumed.
pub fn apply_leveling(state: &mut PetState) -> u32 {
    let mut gained = 0;
    while state.level < LEVEL_CAP && state.xp >= xp_needed(state.level) {
        state.xp -= xp_needed(state.level);
        state.level += 1;
        gained += 1;
    }
    gained
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn phase_table_covers_the_level_range() {
        assert_eq!(Phase::for_level(1), Phase::Baby);
        assert_eq!(Phase::for_level(4), Phase::Baby);
        assert_eq!(Phase::for_level(5), Phase::Kid);
        assert_eq!(Phase::for_level(9), Phase::Kid);
        assert_eq!(Phase::for_level(10), Phase::Teen);
        assert_eq!(Phase::for_level(14), Phase::Teen);
        assert_eq!(Phase::for_level(15), Phase::Adult);
        assert_eq!(Phase::for_level(20), Phase::Adult);
        assert_eq!(Phase::for_level(99), Phase::Adult);
    }

    #[test]
    fn bands_split_at_the_documented_thresholds() {
        assert_eq!(StatBand::for_value(100), StatBand::Green);
        assert_eq!(StatBand::for_value(70), StatBand::Green);
        assert_eq!(StatBand::for_value(69), StatBand::Orange);
        assert_eq!(StatBand::for_value(35), StatBand::Orange);
        assert_eq!(StatBand::for_value(34), StatBand::Red);
        assert_eq!(StatBand::for_value(0), StatBand::Red);
    }

    #[test]
    fn leveling_crosses_multiple_thresholds_in_one_pass() {
        let mut state = PetState::default();
        // Enough for level 1 (100) and level 2 (125), plus 10 spare.
        state.xp = 235;
        let gained = apply_leveling(&mut state);

        assert_eq!(gained, 2);
        assert_eq!(state.level, 3);
        assert_eq!(state.xp, 10);
        assert!(state.xp < xp_needed(state.level));
    }

    #[test]
    fn leveling_stops_at_the_cap_and_keeps_excess_xp() {
        let mut state = PetState {
            level: LEVEL_CAP,
            xp: 9999,
            ..PetState::default()
        };
        let gained = apply_leveling(&mut state);

        assert_eq!(gained, 0);
        assert_eq!(state.level, LEVEL_CAP);
        assert_eq!(state.xp, 9999);
    }

    #[test]
    fn leveling_postcondition_holds_from_arbitrary_piles() {
        for pile in [0, 1, 99, 100, 101, 500, 5000, 100_000] {
            let mut state = PetState::default();
            state.xp = pile;
            apply_leveling(&mut state);
            assert!(state.level == LEVEL_CAP || state.xp < xp_needed(state.level));
            assert!(state.level <= LEVEL_CAP);
        }
    }

    #[test]
    fn clamp_pins_to_the_stat_range() {
        assert_eq!(clamp_stat(-5), 0);
        assert_eq!(clamp_stat(0), 0);
        assert_eq!(clamp_stat(55), 55);
        assert_eq!(clamp_stat(100), 100);
        assert_eq!(clamp_stat(122), 100);
    }
}
