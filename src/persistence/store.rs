//! Durable pet storage: tolerant load, atomic save.
use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use bevy::prelude::*;

use crate::pet::state::PetState;

/// Where the pet lives between sessions.
#[derive(Resource, Debug, Clone)]
pub struct SaveStore {
    path: PathBuf,
}

impl SaveStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Loads the saved pet, falling back to a fresh default on any failure.
    /// A corrupt save must never take the toy down with it.
    pub fn load_or_default(&self) -> PetState {
        match fs::read_to_string(&self.path) {
            Ok(raw) => match serde_json::from_str::<PetState>(&raw) {
                Ok(state) => {
                    info!("Loaded pet state from {:?}", self.path);
                    state
                }
                Err(err) => {
                    warn!(
                        "Save file {:?} is not a valid pet ({err}); starting fresh",
                        self.path
                    );
                    PetState::default()
                }
            },
            Err(err) if err.kind() == io::ErrorKind::NotFound => {
                info!("No save file at {:?}; starting fresh", self.path);
                PetState::default()
            }
            Err(err) => {
                warn!("Failed to read {:?} ({err}); starting fresh", self.path);
                PetState::default()
            }
        }
    }

    /// Writes the full state to a sibling temp file and renames it into
    /// place, so a failed or interrupted write never clobbers the
    /// previously committed save.
    pub fn save(&self, state: &PetState) -> io::Result<()> {
        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent)?;
            }
        }

        let json = serde_json::to_string_pretty(state)?;
        let tmp = self.temp_path();
        fs::write(&tmp, json)?;
        fs::rename(&tmp, &self.path)?;
        Ok(())
    }

    fn temp_path(&self) -> PathBuf {
        let mut raw = self.path.as_os_str().to_owned();
        raw.push(".tmp");
        PathBuf::from(raw)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::{env, time::SystemTime};

    fn scratch_store(tag: &str) -> SaveStore {
        let unique_suffix = SystemTime::now()
            .duration_since(std::time::UNIX_EPOCH)
            .unwrap()
            .as_nanos();
        let path = env::temp_dir().join(format!("pet_store_{tag}_{unique_suffix}/pet.json"));
        SaveStore::new(path)
    }

    fn cleanup(store: &SaveStore) {
        if let Some(parent) = store.path().parent() {
            let _ = fs::remove_dir_all(parent);
        }
    }

    #[test]
    fn round_trip_is_field_for_field_identical() {
        let store = scratch_store("round_trip");
        let state = PetState {
            level: 12,
            xp: 37,
            hunger: 93,
            happiness: 8,
            love: 64,
            energy: 1,
            age_days: 5,
            dead: false,
        };

        store.save(&state).expect("save should succeed");
        assert_eq!(store.load_or_default(), state);
        cleanup(&store);
    }

    #[test]
    fn save_creates_missing_parent_directories() {
        let store = scratch_store("mkdirs");
        assert!(!store.path().exists());

        store.save(&PetState::default()).expect("save should succeed");
        assert!(store.path().exists());
        cleanup(&store);
    }

    #[test]
    fn no_temp_file_is_left_behind() {
        let store = scratch_store("tmpfile");
        store.save(&PetState::default()).expect("save should succeed");

        assert!(!store.temp_path().exists());
        cleanup(&store);
    }

    #[test]
    fn missing_file_loads_the_default_pet() {
        let store = scratch_store("missing");
        assert_eq!(store.load_or_default(), PetState::default());
    }

    #[test]
    fn corrupt_file_loads_the_default_pet() {
        let store = scratch_store("corrupt");
        store.save(&PetState::default()).expect("save should succeed");
        fs::write(store.path(), "{ not json").expect("scribble should succeed");

        assert_eq!(store.load_or_default(), PetState::default());
        cleanup(&store);
    }

    #[test]
    fn wrong_shape_loads_the_default_pet() {
        let store = scratch_store("shape");
        store.save(&PetState::default()).expect("save should succeed");
        fs::write(store.path(), r#"{"level": 3}"#).expect("scribble should succeed");

        assert_eq!(store.load_or_default(), PetState::default());
        cleanup(&store);
    }

    #[test]
    fn saved_json_carries_the_exact_field_set() {
        let store = scratch_store("fields");
        store.save(&PetState::default()).expect("save should succeed");

        let raw = fs::read_to_string(store.path()).expect("save file should exist");
        let value: serde_json::Value = serde_json::from_str(&raw).expect("save should be json");
        let object = value.as_object().expect("save should be an object");

        for field in [
            "level",
            "xp",
            "hunger",
            "happiness",
            "love",
            "energy",
            "age_days",
            "dead",
        ] {
            assert!(object.contains_key(field), "missing field {field}");
        }
        assert_eq!(object.len(), 8);
        cleanup(&store);
    }
}
