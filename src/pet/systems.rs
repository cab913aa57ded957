//! Systems feeding the pet machine and reacting to its outcomes.
use bevy::prelude::*;
use rand::thread_rng;

use crate::core::plugin::SimulationClock;
use crate::dialogue::lines::DialogueCue;
use crate::persistence::store::SaveStore;

use super::config::{ActionKind, PetSettings};
use super::events::{PetCommandEvent, PetSpeechEvent};
use super::machine::{CommandOutcome, DeathCause, PetMachine};

/// Applies queued player commands. Every outcome that changed durable state
/// is saved before the frame continues, so a crash right after an action
/// never loses it.
pub fn apply_pet_commands(
    mut commands_in: MessageReader<PetCommandEvent>,
    clock: Res<SimulationClock>,
    settings: Res<PetSettings>,
    store: Res<SaveStore>,
    mut machine: ResMut<PetMachine>,
    mut speech: MessageWriter<PetSpeechEvent>,
) {
    let now_ms = clock.now_ms();
    let mut rng = thread_rng();

    for event in commands_in.read() {
        match machine.handle_command(event.command, now_ms, &settings, &mut rng) {
            CommandOutcome::Ignored => {}
            CommandOutcome::NoEnergy => {
                speech.write(PetSpeechEvent {
                    phase: machine.phase(),
                    cue: DialogueCue::NoEnergy,
                    duration_ms: settings.dialogue.no_energy_ms,
                });
            }
            CommandOutcome::Performed {
                action,
                phase,
                levels_gained,
            } => {
                if levels_gained > 0 {
                    info!("Level up! New level: {}", machine.state().level);
                }
                speech.write(PetSpeechEvent {
                    phase,
                    cue: cue_for_action(action),
                    duration_ms: settings.dialogue.default_ms,
                });
                persist(&store, &machine);
            }
            CommandOutcome::WasReset => {
                info!("Pet reset to a fresh default state");
                speech.write(PetSpeechEvent {
                    phase: machine.phase(),
                    cue: DialogueCue::Reset,
                    duration_ms: settings.dialogue.reset_ms,
                });
                persist(&store, &machine);
            }
        }
    }
}

/// Advances the machine to the current simulation time once per frame.
pub fn drive_pet(
    clock: Res<SimulationClock>,
    settings: Res<PetSettings>,
    store: Res<SaveStore>,
    mut machine: ResMut<PetMachine>,
    mut speech: MessageWriter<PetSpeechEvent>,
) {
    let outcome = machine.tick(clock.now_ms(), &settings, &mut thread_rng());

    if outcome.went_hungry {
        speech.write(PetSpeechEvent {
            phase: machine.phase(),
            cue: DialogueCue::Hungry,
            duration_ms: settings.dialogue.hungry_ms,
        });
    }

    if let Some(cause) = outcome.death {
        warn!("The pet has died: {:?}", cause);
        speech.write(PetSpeechEvent {
            phase: machine.phase(),
            cue: match cause {
                DeathCause::Unloved => DialogueCue::DeadUnloved,
                DeathCause::Bored => DialogueCue::DeadBored,
            },
            duration_ms: settings.dialogue.death_ms,
        });
        // Deaths must survive a crash or power loss.
        persist(&store, &machine);
    }
}

fn cue_for_action(action: ActionKind) -> DialogueCue {
    match action {
        ActionKind::Feed => DialogueCue::Feed,
        ActionKind::Play => DialogueCue::Play,
        ActionKind::Cuddle => DialogueCue::Cuddle,
    }
}

fn persist(store: &SaveStore, machine: &PetMachine) {
    if let Err(err) = store.save(machine.state()) {
        warn!("Failed to save pet state to {:?}: {err}", store.path());
    }
}
