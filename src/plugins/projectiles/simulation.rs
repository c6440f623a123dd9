//! Fixed-step projectile tick.
//!
//! For every active slot, pools in registration order and slots in index order:
//!
//! ```text
//! age += dt ──(age >= max_time)──> retire           (no collision test this tick)
//!     │
//!     v
//! position += direction * dt / MOTION_TIME_SCALE_SECS
//!     │
//!     v
//! box = pool shape at position ──> first active, visible, overlapping target
//!     │                                      │
//!   (none)                                   v
//!                           retire, Target::apply_hit, TargetHit (+ TargetDied)
//! ```
//!
//! At most one hit per projectile per tick. Nothing here allocates.

use std::ops::ControlFlow;

use avian3d::prelude::*;
use bevy::prelude::*;

use crate::common::tunables::MOTION_TIME_SCALE_SECS;
use crate::plugins::targets::{HitOutcome, Target, TargetRegistry};

use super::components::Projectile;
use super::messages::{TargetDied, TargetHit};
use super::pool::BulletPools;

/// What one tick did to a single projectile before collision.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Step {
    Idle,
    Expired,
    Moved,
}

impl Projectile {
    /// Age and move one tick. Expired projectiles are retired and not moved.
    pub fn step(&mut self, dt: f32) -> Step {
        if !self.is_active() {
            return Step::Idle;
        }
        self.age += dt;
        if self.age >= self.max_time {
            self.retire();
            return Step::Expired;
        }
        self.position += self.direction * (dt / MOTION_TIME_SCALE_SECS);
        Step::Moved
    }
}

pub fn advance_projectiles(
    time: Res<Time<Fixed>>,
    mut pools: ResMut<BulletPools>,
    registry: Res<TargetRegistry>,
    mut q_targets: Query<(&mut Target, &Visibility)>,
    mut hits: MessageWriter<TargetHit>,
    mut deaths: MessageWriter<TargetDied>,
) {
    let dt = time.delta_secs();

    for pool in pools.pools_mut() {
        for projectile in &mut pool.slots {
            if projectile.step(dt) != Step::Moved {
                continue;
            }

            let bullet_box = pool.shape.aabb(projectile.position, Quat::IDENTITY);

            let struck = registry.for_each_active(&q_targets, |entry| {
                if entry.volume.intersects(&bullet_box) {
                    ControlFlow::Break(entry.entity)
                } else {
                    ControlFlow::Continue(())
                }
            });
            let Some(target_e) = struck else {
                continue;
            };

            projectile.retire();

            let Ok((mut target, _)) = q_targets.get_mut(target_e) else {
                continue;
            };
            let outcome = target.apply_hit(projectile.damage_points);

            hits.write(TargetHit {
                target: target_e,
                projectile: projectile.id,
            });
            if outcome == HitOutcome::Killed {
                deaths.write(TargetDied { target: target_e });
            }
        }
    }
}
