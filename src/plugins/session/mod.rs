//! Session plugin: `GameStart` handling, the shared end-of-game transition and the
//! deferred `Ended -> Idle` step.

use bevy::prelude::*;

use crate::common::state::GameSession;
use crate::plugins::enemies::{EnemyLifeState, RespawnQueue};
use crate::plugins::projectiles::messages::{GameEnded, GameStart, PlayerDamaged, ScoreChanged};
use crate::plugins::targets::Target;

pub fn plugin(app: &mut App) {
    // `Ended` lasts the rest of the frame it was entered in.
    app.add_systems(First, settle_ended_session);
    app.add_systems(Update, start_game);
}

/// Enter `Active` and put every target back in play.
pub fn start_game(
    mut starts: MessageReader<GameStart>,
    mut session: ResMut<GameSession>,
    mut queue: ResMut<RespawnQueue>,
    mut scores: MessageWriter<ScoreChanged>,
    mut damaged: MessageWriter<PlayerDamaged>,
    mut q_targets: Query<(&mut Target, &mut Visibility, Option<&mut EnemyLifeState>)>,
) {
    // Several requests in one frame start one session.
    if starts.read().count() == 0 {
        return;
    }

    session.start();
    queue.clear();

    for (mut target, mut vis, life) in &mut q_targets {
        target.revive();
        *vis = Visibility::Visible;
        if let Some(mut life) = life {
            *life = EnemyLifeState::Vulnerable;
        }
    }

    // Fresh values for the HUD.
    scores.write(ScoreChanged {
        score: session.score,
    });
    damaged.write(PlayerDamaged {
        health: session.player_health,
    });
    info!("Game started with {} health", session.player_health);
}

/// Finish the running session, if any, and announce it.
///
/// Returns `false` when no session was running.
pub fn end_session(session: &mut GameSession, ended: &mut MessageWriter<GameEnded>) -> bool {
    let Some(final_score) = session.end() else {
        return false;
    };
    ended.write(GameEnded { final_score });
    info!("Game over: final score {final_score}");
    true
}

/// Finish `Ended -> Idle` one frame after the game ended.
pub fn settle_ended_session(mut session: ResMut<GameSession>) {
    if session.settle() {
        debug!("Session back to idle");
    }
}
