//! Presentation commit: mirror pool slots onto their visual entities.
//!
//! Slot data in `BulletPools` is the truth. This system is the only writer of
//! `Transform`/`Visibility` on pooled visuals, so inactive slots are always hidden.

use bevy::prelude::*;

use super::components::PooledProjectile;
use super::pool::BulletPools;

pub fn sync_projectile_visuals(
    pools: Res<BulletPools>,
    mut q_visuals: Query<(&mut Transform, &mut Visibility), With<PooledProjectile>>,
) {
    for projectile in pools.pools().iter().flat_map(|p| &p.slots) {
        let Ok((mut tf, mut vis)) = q_visuals.get_mut(projectile.visual) else {
            continue;
        };

        if projectile.is_active() {
            tf.translation = projectile.position;
            *vis = Visibility::Visible;
        } else if *vis != Visibility::Hidden {
            *vis = Visibility::Hidden;
        }
    }
}
