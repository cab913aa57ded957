//! Persistence plugin: autosave heartbeat and save-on-exit.
use bevy::app::AppExit;
use bevy::prelude::*;

use crate::core::plugin::SimulationClock;
use crate::pet::config::PetSettings;
use crate::pet::machine::PetMachine;

use super::store::SaveStore;

/// Absolute deadline for the next background save.
#[derive(Resource, Debug, Default)]
pub struct AutosaveDeadline {
    due_ms: u64,
}

pub struct PersistencePlugin;

impl Plugin for PersistencePlugin {
    fn build(&self, app: &mut App) {
        app.init_resource::<AutosaveDeadline>()
            .add_systems(Startup, arm_autosave)
            .add_systems(Update, autosave_pet)
            .add_systems(Last, save_on_exit);
    }
}

fn arm_autosave(
    clock: Res<SimulationClock>,
    settings: Res<PetSettings>,
    mut deadline: ResMut<AutosaveDeadline>,
) {
    deadline.due_ms = clock.now_ms() + settings.save.autosave_interval_ms;
}

/// Safety net against silent crashes: saves on a fixed cadence regardless
/// of action activity.
fn autosave_pet(
    clock: Res<SimulationClock>,
    settings: Res<PetSettings>,
    store: Res<SaveStore>,
    machine: Res<PetMachine>,
    mut deadline: ResMut<AutosaveDeadline>,
) {
    let now_ms = clock.now_ms();
    if now_ms < deadline.due_ms {
        return;
    }
    deadline.due_ms = now_ms + settings.save.autosave_interval_ms;

    match store.save(machine.state()) {
        Ok(()) => debug!("Autosaved pet state to {:?}", store.path()),
        Err(err) => warn!("Autosave to {:?} failed: {err}", store.path()),
    }
}

/// Flushes a final save when the app is quitting, whatever triggered it.
fn save_on_exit(
    mut exits: MessageReader<AppExit>,
    store: Res<SaveStore>,
    machine: Res<PetMachine>,
) {
    if exits.read().next().is_none() {
        return;
    }

    match store.save(machine.state()) {
        Ok(()) => info!("Saved pet state on exit"),
        Err(err) => warn!("Final save to {:?} failed: {err}", store.path()),
    }
}
