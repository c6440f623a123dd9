//! Tunable gameplay constants.

use bevy::prelude::*;

/// Host-clock seconds per unit of projectile travel.
///
/// A projectile moves `direction * (delta / MOTION_TIME_SCALE_SECS)` per tick, where
/// `direction` already carries the bullet type's speed.
pub const MOTION_TIME_SCALE_SECS: f32 = 0.85;

#[derive(Resource, Debug, Clone)]
pub struct Tunables {
    pub starting_player_health: u32,
    /// Shortest invulnerability window after an enemy dies.
    pub respawn_min_secs: f32,
    /// Width of the random part of the window; delays land in `[min, min + range)`.
    pub respawn_range_secs: f32,
    pub rng_seed: u64,
}

impl Default for Tunables {
    fn default() -> Self {
        Self {
            starting_player_health: 3,
            respawn_min_secs: 2.0,
            respawn_range_secs: 3.0,
            rng_seed: 0x5EED_B011_E7,
        }
    }
}
