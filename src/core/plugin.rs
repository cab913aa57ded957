//! CorePlugin wires the simulation clock every other module ticks against.
use bevy::prelude::*;
use std::time::Duration;

use crate::core::power::{handle_power_off, PowerOffEvent};

const DEFAULT_TIME_SCALE: f32 = 1.0;
const MIN_TIME_SCALE: f32 = 0.001;

/// Scaled simulation time accumulated from real frame deltas.
///
/// Pet timers (animation flips, stat decay, autosave, banner expiry) are
/// absolute millisecond deadlines against this clock, so a slow frame never
/// makes them drift.
#[derive(Resource, Debug)]
pub struct SimulationClock {
    time_scale: f32,
    last_scaled_delta: Duration,
    elapsed: Duration,
}

impl SimulationClock {
    /// Creates a new clock with the provided time-scale multiplier.
    pub fn new(time_scale: f32) -> Self {
        Self {
            time_scale: time_scale.max(MIN_TIME_SCALE),
            last_scaled_delta: Duration::ZERO,
            elapsed: Duration::ZERO,
        }
    }

    /// Sets the time-scale multiplier (clamped to a small positive minimum).
    #[cfg_attr(not(test), allow(dead_code))]
    pub fn set_time_scale(&mut self, scale: f32) {
        self.time_scale = scale.max(MIN_TIME_SCALE);
    }

    /// Returns the current time-scale multiplier.
    pub fn time_scale(&self) -> f32 {
        self.time_scale
    }

    /// Last scaled delta after applying the multiplier.
    #[cfg_attr(not(test), allow(dead_code))]
    pub fn last_scaled_delta(&self) -> Duration {
        self.last_scaled_delta
    }

    /// Total scaled duration elapsed since the clock was initialised.
    pub fn elapsed(&self) -> Duration {
        self.elapsed
    }

    /// Total elapsed simulation time in whole milliseconds.
    pub fn now_ms(&self) -> u64 {
        self.elapsed().as_millis() as u64
    }

    /// Applies a real frame delta to the clock.
    pub fn tick(&mut self, real_delta: Duration) {
        self.last_scaled_delta = real_delta.mul_f32(self.time_scale);
        self.elapsed += self.last_scaled_delta;
    }
}

impl Default for SimulationClock {
    fn default() -> Self {
        Self::new(DEFAULT_TIME_SCALE)
    }
}

/// Registers simulation timing and host power integration.
#[derive(Debug, Clone, Copy)]
pub struct CorePlugin {
    time_scale: f32,
}

impl CorePlugin {
    /// Creates a CorePlugin with the provided time-scale multiplier.
    pub const fn with_time_scale(time_scale: f32) -> Self {
        Self { time_scale }
    }
}

impl Default for CorePlugin {
    fn default() -> Self {
        Self::with_time_scale(DEFAULT_TIME_SCALE)
    }
}

impl Plugin for CorePlugin {
    fn build(&self, app: &mut App) {
        app.insert_resource(SimulationClock::new(self.time_scale))
            .add_event::<PowerOffEvent>()
            .add_systems(Startup, log_startup_time_scale)
            .add_systems(
                Update,
                (update_simulation_clock, handle_power_off).chain(),
            );
    }
}

pub fn update_simulation_clock(mut clock: ResMut<SimulationClock>, time: Res<Time>) {
    clock.tick(time.delta());
}

fn log_startup_time_scale(clock: Res<SimulationClock>) {
    info!(
        "CorePlugin initialised with time scale: {:.3}",
        clock.time_scale()
    );
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn clock_scales_delta_with_multiplier() {
        let mut clock = SimulationClock::new(2.5);
        clock.tick(Duration::from_secs_f32(1.2));

        assert_eq!(clock.time_scale(), 2.5);
        assert_eq!(
            clock.last_scaled_delta(),
            Duration::from_secs_f32(1.2 * 2.5)
        );
        assert_eq!(clock.elapsed(), Duration::from_secs_f32(1.2 * 2.5));
    }

    #[test]
    fn clock_clamps_min_time_scale() {
        let mut clock = SimulationClock::new(0.0);
        assert!((clock.time_scale() - MIN_TIME_SCALE).abs() < f32::EPSILON);

        clock.set_time_scale(-5.0);
        assert!((clock.time_scale() - MIN_TIME_SCALE).abs() < f32::EPSILON);
    }

    #[test]
    fn clock_reports_elapsed_milliseconds() {
        let mut clock = SimulationClock::default();
        assert_eq!(clock.now_ms(), 0);

        clock.tick(Duration::from_millis(2400));
        clock.tick(Duration::from_millis(100));
        assert_eq!(clock.now_ms(), 2500);
    }
}
