//! Shot consumer: turn `Shoot` requests into launched pool slots.
//!
//! Unknown shooters and unregistered bullet types are dropped quietly; the next
//! request simply tries again.

use bevy::prelude::*;

use super::messages::Shoot;
use super::pool::BulletPools;
use super::request::Shooter;

pub fn fire_projectiles(
    mut pools: ResMut<BulletPools>,
    mut reader: MessageReader<Shoot>,
    q_shooters: Query<(&Shooter, &GlobalTransform)>,
) {
    for req in reader.read() {
        let Ok((shooter, gun)) = q_shooters.get(req.shooter) else {
            debug!("Shoot from non-shooter {:?}", req.shooter);
            continue;
        };

        pools.fire(&shooter.active_bullet_type, gun);
    }
}
