//! Events connecting the input surfaces, the pet, and the dialogue layer.
use bevy::prelude::Message;

use crate::dialogue::lines::DialogueCue;
use crate::pet::machine::PetCommand;
use crate::pet::state::Phase;

/// A player command destined for the pet state machine.
#[derive(Message, Debug, Clone, Copy)]
pub struct PetCommandEvent {
    pub command: PetCommand,
}

/// The pet wants to say something; the dialogue layer picks the words.
#[derive(Message, Debug, Clone, Copy)]
pub struct PetSpeechEvent {
    /// Life stage whose line table should answer the cue.
    pub phase: Phase,
    pub cue: DialogueCue,
    pub duration_ms: u64,
}
