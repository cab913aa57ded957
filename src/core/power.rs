//! Power-off handling: save the pet, hand the host its shutdown, exit.
use bevy::app::AppExit;
use bevy::prelude::*;

use crate::core::plugin::SimulationClock;
use crate::dialogue::status::StatusBanner;
use crate::persistence::store::SaveStore;
use crate::pet::config::PetSettings;
use crate::pet::machine::PetMachine;

/// Fired when the POWER button is pressed.
#[derive(Message, Debug, Clone, Copy)]
pub struct PowerOffEvent;

const SAVING_BANNER_MS: u64 = 1200;

/// Saves synchronously, optionally halts the host, then exits the app.
///
/// The pet originally ran on a dedicated device whose POWER button shuts
/// the whole machine down; `power.halt_host` in `config/pet.toml` keeps
/// that behavior switchable for desktop use.
pub fn handle_power_off(
    mut events: MessageReader<PowerOffEvent>,
    clock: Res<SimulationClock>,
    settings: Res<PetSettings>,
    store: Res<SaveStore>,
    machine: Res<PetMachine>,
    mut banner: ResMut<StatusBanner>,
    mut exit: MessageWriter<AppExit>,
) {
    if events.read().next().is_none() {
        return;
    }

    info!("Power button pressed: saving and shutting down");
    banner.show("Saving...", clock.now_ms(), SAVING_BANNER_MS);

    if let Err(err) = store.save(machine.state()) {
        warn!("Failed to save pet state during power-off: {err}");
    }

    if settings.power.halt_host {
        halt_host();
    }
    exit.write(AppExit::Success);
}

#[cfg(unix)]
fn halt_host() {
    use std::process::Command;

    if let Err(err) = Command::new("sync").status() {
        warn!("sync failed before shutdown: {err}");
    }

    match Command::new("sudo").args(["shutdown", "-h", "now"]).status() {
        Ok(status) if !status.success() => {
            warn!("Shutdown command exited with {status}; exiting only");
        }
        Err(err) => warn!("Shutdown command failed ({err}); exiting only"),
        Ok(_) => {}
    }
}

#[cfg(not(unix))]
fn halt_host() {}
