//! Visual handles for pooled projectiles.
//!
//! The pool never looks at what a projectile *looks* like. At registration it asks the
//! installed factory for one entity per slot and afterwards only writes `Transform` and
//! `Visibility` on them (see `commit::sync_projectile_visuals`).

use bevy::platform::collections::HashMap;
use bevy::prelude::*;

use super::components::{BulletTypeId, PooledProjectile, ProjectileId};
use super::pool::BulletType;

pub trait ProjectileVisualFactory: Send + Sync + 'static {
    /// Spawn one hidden visual per slot of `bullet`.
    ///
    /// Returns `None` when there is no template to build `bullet` from; the caller then
    /// skips the whole pool.
    fn build_pool(
        &self,
        commands: &mut Commands,
        kind: BulletTypeId,
        bullet: &BulletType,
    ) -> Option<Vec<Entity>>;
}

/// Installed factory.
#[derive(Resource)]
pub struct VisualFactory(pub Box<dyn ProjectileVisualFactory>);

impl Default for VisualFactory {
    fn default() -> Self {
        Self(Box::new(BareVisualFactory))
    }
}

#[inline]
fn hidden_slot(kind: BulletTypeId, bullet: &BulletType, slot: usize) -> impl Bundle {
    (
        Name::new(format!("{}{slot}", bullet.name)),
        PooledProjectile(ProjectileId { kind, slot }),
        Transform::default(),
        Visibility::Hidden,
    )
}

/// Transform-only visuals. Always has a template, so every type gets a pool.
#[derive(Debug, Default, Clone, Copy)]
pub struct BareVisualFactory;

impl ProjectileVisualFactory for BareVisualFactory {
    fn build_pool(
        &self,
        commands: &mut Commands,
        kind: BulletTypeId,
        bullet: &BulletType,
    ) -> Option<Vec<Entity>> {
        Some(
            (0..bullet.pool_size)
                .map(|slot| commands.spawn(hidden_slot(kind, bullet, slot)).id())
                .collect(),
        )
    }
}

/// Mesh + material pair cloned into every slot of one bullet type.
#[derive(Debug, Clone)]
pub struct MeshTemplate {
    pub mesh: Handle<Mesh>,
    pub material: Handle<StandardMaterial>,
}

/// Clones a per-type mesh template. Types without a template are not pooled.
#[derive(Debug, Default, Clone)]
pub struct MeshTemplateFactory {
    pub templates: HashMap<String, MeshTemplate>,
}

impl ProjectileVisualFactory for MeshTemplateFactory {
    fn build_pool(
        &self,
        commands: &mut Commands,
        kind: BulletTypeId,
        bullet: &BulletType,
    ) -> Option<Vec<Entity>> {
        let template = self.templates.get(&bullet.name)?;

        Some(
            (0..bullet.pool_size)
                .map(|slot| {
                    commands
                        .spawn((
                            hidden_slot(kind, bullet, slot),
                            Mesh3d(template.mesh.clone()),
                            MeshMaterial3d(template.material.clone()),
                        ))
                        .id()
                })
                .collect(),
        )
    }
}
