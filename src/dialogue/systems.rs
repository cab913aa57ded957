//! Systems voicing speech events and expiring the banner.
use bevy::prelude::*;
use rand::thread_rng;

use crate::core::plugin::SimulationClock;
use crate::pet::events::PetSpeechEvent;

use super::lines::LineLibrary;
use super::status::StatusBanner;

pub fn voice_pet_speech(
    mut events: MessageReader<PetSpeechEvent>,
    lines: Res<LineLibrary>,
    clock: Res<SimulationClock>,
    mut banner: ResMut<StatusBanner>,
) {
    let mut rng = thread_rng();
    for event in events.read() {
        let text = lines.pick(event.phase, event.cue, &mut rng);
        debug!("Pet ({}) says: {text}", event.phase.label());
        banner.show(text, clock.now_ms(), event.duration_ms);
    }
}

pub fn expire_status_banner(clock: Res<SimulationClock>, mut banner: ResMut<StatusBanner>) {
    banner.clear_expired(clock.now_ms());
}
