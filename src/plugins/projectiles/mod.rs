//! Projectiles plugin: **message-driven firing** over data-owned, fixed-size pools.
//!
//! # Ownership
//! `BulletPools` owns every projectile slot as plain data. Visual entities exist only
//! as opaque handles handed out by the installed `VisualFactory`; the simulation never
//! reads them. Slots are built once at startup and are never spawned or despawned
//! afterwards, so the fixed-step tick runs without allocation or structural changes.
//!
//! # Data flow (big picture)
//! ```text
//!   Startup
//!     init_bullet_pools: BulletCatalog + VisualFactory -> BulletPools
//!
//!   Update (variable dt)
//!┌────────────────────────────────────────────────────────────────────────────┐
//!│  (A) change_bullet_type                                                    │
//!│      - reads: ChangeBullet messages                                        │
//!│      - mutates: Shooter.active_bullet_type                                 │
//!│                                                                            │
//!│  (B) fire_projectiles                                                      │
//!│      - reads: Shoot messages, Shooter + GlobalTransform                    │
//!│      - mutates: BulletPools (acquire -> launch, forced reuse when full)    │
//!└────────────────────────────────────────────────────────────────────────────┘
//!                │
//!                v
//!   FixedUpdate (fixed dt)
//!┌────────────────────────────────────────────────────────────────────────────┐
//!│  (C) advance_projectiles                                                   │
//!│      - reads: TargetRegistry, Target + Visibility                          │
//!│      - mutates: BulletPools (age, position, retire), Target health         │
//!│      - writes: TargetHit, TargetDied                                       │
//!└────────────────────────────────────────────────────────────────────────────┘
//!                │
//!                v
//!   PostUpdate
//!     (D) sync_projectile_visuals: slot data -> visual Transform/Visibility
//! ```
//!
//! Enemy, player and session rules consume (C)'s messages in their own plugins.

use bevy::prelude::*;

pub mod allocator;
pub mod commit;
pub mod components;
pub mod factory;
pub mod messages;
pub mod pool;
pub mod request;
pub mod simulation;


use crate::plugins::targets;

pub struct ProjectilesPlugin;

impl Plugin for ProjectilesPlugin {
    fn build(&self, app: &mut App) {
        app.init_resource::<pool::BulletCatalog>()
            .init_resource::<factory::VisualFactory>()
            .init_resource::<pool::BulletPools>()
            .add_systems(Startup, pool::init_bullet_pools);

        app.add_message::<messages::Shoot>()
            .add_message::<messages::ChangeBullet>()
            .add_message::<messages::GameStart>()
            .add_message::<messages::TargetHit>()
            .add_message::<messages::TargetDied>()
            .add_message::<messages::ScoreChanged>()
            .add_message::<messages::PlayerDamaged>()
            .add_message::<messages::GameEnded>();

        // A type switch and a shot in the same frame fire the new type.
        app.add_systems(
            Update,
            (request::change_bullet_type, allocator::fire_projectiles).chain(),
        );

        app.add_systems(
            FixedUpdate,
            simulation::advance_projectiles.after(targets::refresh_moving_target_volumes),
        );

        app.add_systems(
            PostUpdate,
            commit::sync_projectile_visuals.before(TransformSystems::Propagate),
        );
    }
}
