//! Pet plugin wiring settings, the saved state, and the machine systems.
use bevy::prelude::*;

use crate::core::plugin::update_simulation_clock;
use crate::persistence::store::SaveStore;

use super::config::PetSettings;
use super::events::{PetCommandEvent, PetSpeechEvent};
use super::machine::PetMachine;
use super::systems::{apply_pet_commands, drive_pet};

pub struct PetPlugin;

impl Plugin for PetPlugin {
    fn build(&self, app: &mut App) {
        let settings = PetSettings::load_or_default();
        let store = SaveStore::new(settings.save.path.clone());
        let state = store.load_or_default();
        let machine = PetMachine::new(state, 0, &settings);

        app.insert_resource(settings)
            .insert_resource(store)
            .insert_resource(machine)
            .add_event::<PetCommandEvent>()
            .add_event::<PetSpeechEvent>()
            .add_systems(Startup, log_pet_summary)
            .add_systems(
                Update,
                (apply_pet_commands, drive_pet)
                    .chain()
                    .after(update_simulation_clock),
            );
    }
}

fn log_pet_summary(machine: Res<PetMachine>) {
    let state = machine.state();
    info!(
        "PetPlugin initialised: level {} ({}), dead: {}",
        state.level,
        state.phase().label(),
        state.dead
    );
}
