//! Player plugin: the player is a target too.
//!
//! Pipeline (FixedUpdate, after the projectile tick):
//! - every `TargetHit` on the player costs one session health point
//! - health reaching 0, or the player's own `Target` dying, ends the session
//!
//! A new player's `Target` is sized to the session's starting health before it is
//! registered, so both counters run out on the same hit.

use bevy::prelude::*;

use crate::common::state::GameSession;
use crate::plugins::projectiles::messages::{GameEnded, PlayerDamaged, TargetDied, TargetHit};
use crate::plugins::projectiles::simulation::advance_projectiles;
use crate::plugins::session::end_session;
use crate::plugins::targets::{self, Target};

#[derive(Component, Debug, Clone, Copy, Default)]
#[require(Target)]
pub struct Player;

pub fn plugin(app: &mut App) {
    app.add_systems(
        FixedUpdate,
        (apply_player_hits, resolve_player_deaths)
            .chain()
            .after(advance_projectiles),
    );
    app.add_systems(
        PostUpdate,
        init_player_target.before(targets::register_targets),
    );
}

/// Give a newly spawned player as many hit points as the session has health.
pub fn init_player_target(session: Res<GameSession>, mut q_new: Query<&mut Target, Added<Player>>) {
    let health = session.starting_health() as f32;
    for mut target in &mut q_new {
        target.max_health = health;
        target.revive();
    }
}

fn apply_player_hits(
    mut session: ResMut<GameSession>,
    mut hits: MessageReader<TargetHit>,
    mut damaged: MessageWriter<PlayerDamaged>,
    mut ended: MessageWriter<GameEnded>,
    q_player: Query<(), With<Player>>,
) {
    for hit in hits.read() {
        if !q_player.contains(hit.target) {
            continue;
        }
        let Some(health) = session.damage_player() else {
            continue;
        };
        damaged.write(PlayerDamaged { health });

        if health == 0 {
            end_session(&mut session, &mut ended);
        }
    }
}

fn resolve_player_deaths(
    mut session: ResMut<GameSession>,
    mut deaths: MessageReader<TargetDied>,
    mut ended: MessageWriter<GameEnded>,
    q_player: Query<(), With<Player>>,
) {
    for death in deaths.read() {
        if q_player.contains(death.target) {
            end_session(&mut session, &mut ended);
        }
    }
}

#[cfg(test)]
mod tests;
