//! Enemies plugin: shootable targets that score, vanish and come back.
//!
//! ---------------------------
//! LIFECYCLE
//! ---------------------------
//! ```text
//! Dormant --GameStart--> Vulnerable --TargetDied (session Active)--> Invulnerable
//!                            ^          score += 1, hidden, respawn        |
//!                            └─────── respawn due: health = max, visible ──┘
//! ```
//!
//! A vulnerable enemy killed while no session runs is hidden and goes back to
//! `Dormant` without scoring.
//!
//! Invulnerability is not a check in here. A dead target is `Target::active == false`
//! and hidden, so the registry filter never offers it to the projectile tick.
//!
//! ---------------------------
//! RESPAWN QUEUE
//! ---------------------------
//! Deferred reactivation lives in `RespawnQueue`, one entry per target keyed by its due
//! time on the queue's own fixed-step clock. The queue is drained at the *start* of a
//! fixed step, so a respawn never fires in the step that scheduled it. Entries are
//! dropped when their target despawns or a new session starts.

use bevy::prelude::*;
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;

use crate::common::state::GameSession;
use crate::common::tunables::Tunables;
use crate::plugins::projectiles::messages::{ScoreChanged, TargetDied};
use crate::plugins::projectiles::simulation::advance_projectiles;
use crate::plugins::targets::{self, Target};

pub fn plugin(app: &mut App) {
    let seed = app
        .world()
        .get_resource::<Tunables>()
        .map_or_else(|| Tunables::default().rng_seed, |t| t.rng_seed);

    app.init_resource::<RespawnQueue>()
        .insert_resource(RespawnRng::seeded(seed));

    // Fixed-step lifecycle:
    // - respawns due from earlier steps fire before anything moves
    // - deaths are resolved after the tick wrote them
    app.add_systems(
        FixedUpdate,
        tick_respawns.before(targets::refresh_moving_target_volumes),
    );
    app.add_systems(
        FixedUpdate,
        resolve_enemy_deaths.after(advance_projectiles),
    );

    app.add_systems(PostUpdate, cancel_removed_respawns);
}

/// Marker: a target that scores when destroyed.
#[derive(Component, Debug, Clone, Copy, Default)]
#[require(Target, EnemyLifeState)]
pub struct Enemy;

#[derive(Component, Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum EnemyLifeState {
    /// Waiting for a session; never scores.
    #[default]
    Dormant,
    Vulnerable,
    Invulnerable,
}

#[derive(Debug, Clone, Copy, PartialEq)]
struct PendingRespawn {
    target: Entity,
    due_secs: f32,
}

/// Pending re-vulnerability timers.
#[derive(Resource, Debug, Default)]
pub struct RespawnQueue {
    clock_secs: f32,
    pending: Vec<PendingRespawn>,
}

impl RespawnQueue {
    #[inline]
    pub fn now(&self) -> f32 {
        self.clock_secs
    }

    /// Schedule `target` to respawn `delay_secs` from now, replacing any earlier entry.
    pub fn schedule(&mut self, target: Entity, delay_secs: f32) {
        let due_secs = self.clock_secs + delay_secs.max(0.0);
        match self.pending.iter_mut().find(|p| p.target == target) {
            Some(p) => p.due_secs = due_secs,
            None => self.pending.push(PendingRespawn { target, due_secs }),
        }
    }

    pub fn cancel(&mut self, target: Entity) -> bool {
        let before = self.pending.len();
        self.pending.retain(|p| p.target != target);
        self.pending.len() != before
    }

    pub fn clear(&mut self) {
        self.pending.clear();
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.pending.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.pending.is_empty()
    }

    pub fn due_in(&self, target: Entity) -> Option<f32> {
        self.pending
            .iter()
            .find(|p| p.target == target)
            .map(|p| p.due_secs - self.clock_secs)
    }

    /// Advance the clock by `dt` and hand every entry now due to `fire`.
    pub fn advance(&mut self, dt: f32, mut fire: impl FnMut(Entity)) {
        self.clock_secs += dt;
        let now = self.clock_secs;
        self.pending.retain(|p| {
            if p.due_secs <= now {
                fire(p.target);
                false
            } else {
                true
            }
        });
    }
}

/// Deterministic source for respawn delays.
#[derive(Resource, Debug, Clone)]
pub struct RespawnRng(pub ChaCha8Rng);

impl RespawnRng {
    pub fn seeded(seed: u64) -> Self {
        Self(ChaCha8Rng::seed_from_u64(seed))
    }

    /// Uniform in `[min, min + range)`; exactly `min` for an empty range.
    pub fn delay_secs(&mut self, min: f32, range: f32) -> f32 {
        if range > 0.0 {
            self.0.gen_range(min..min + range)
        } else {
            min
        }
    }
}

impl Default for RespawnRng {
    fn default() -> Self {
        Self::seeded(Tunables::default().rng_seed)
    }
}

/// Score and schedule respawns for enemies the tick just killed.
pub fn resolve_enemy_deaths(
    tunables: Res<Tunables>,
    mut session: ResMut<GameSession>,
    mut queue: ResMut<RespawnQueue>,
    mut rng: ResMut<RespawnRng>,
    mut deaths: MessageReader<TargetDied>,
    mut scores: MessageWriter<ScoreChanged>,
    mut q_enemies: Query<(&mut EnemyLifeState, &mut Visibility), With<Enemy>>,
) {
    for death in deaths.read() {
        let Ok((mut life, mut vis)) = q_enemies.get_mut(death.target) else {
            continue;
        };
        if *life != EnemyLifeState::Vulnerable {
            continue;
        }
        *vis = Visibility::Hidden;

        let Some(score) = session.add_point() else {
            // Stays down until the next GameStart revives everything.
            *life = EnemyLifeState::Dormant;
            debug!("Enemy {:?} died outside a session; no score", death.target);
            continue;
        };
        scores.write(ScoreChanged { score });

        *life = EnemyLifeState::Invulnerable;

        let delay = rng.delay_secs(tunables.respawn_min_secs, tunables.respawn_range_secs);
        queue.schedule(death.target, delay);
        debug!("Enemy {:?} down, back in {delay:.2}s", death.target);
    }
}

/// Bring enemies whose invulnerability window has elapsed back into play.
pub fn tick_respawns(
    time: Res<Time<Fixed>>,
    mut queue: ResMut<RespawnQueue>,
    mut q_enemies: Query<(&mut Target, &mut EnemyLifeState, &mut Visibility), With<Enemy>>,
) {
    queue.advance(time.delta_secs(), |e| {
        let Ok((mut target, mut life, mut vis)) = q_enemies.get_mut(e) else {
            return;
        };
        target.revive();
        *life = EnemyLifeState::Vulnerable;
        *vis = Visibility::Visible;
    });
}

fn cancel_removed_respawns(mut queue: ResMut<RespawnQueue>, mut removed: RemovedComponents<Target>) {
    for e in removed.read() {
        queue.cancel(e);
    }
}
