//! Per-type fixed-size projectile pools.
//!
//! # Acquisition policy
//! 1. First inactive slot, in slot order.
//! 2. Pool exhausted: forced reuse of the active slot with the largest age. A later
//!    slot only replaces the candidate with a *strictly* greater age, so equal ages
//!    resolve to the lowest index.
//!
//! Pools never grow or shrink after registration.

use avian3d::prelude::*;
use bevy::platform::collections::HashMap;
use bevy::prelude::*;

use super::components::{BulletTypeId, Projectile, ProjectileId, ProjectileState};
use super::factory::VisualFactory;

/// Registration-time description of a bullet type.
#[derive(Debug, Clone, PartialEq)]
pub struct BulletTypeConfig {
    pub name: String,
    pub damage_points: f32,
    /// Seconds.
    pub max_time: f32,
    pub pool_size: usize,
    pub speed: f32,
    /// Half-extent of the projectile's collision sphere.
    pub radius: f32,
}

impl Default for BulletTypeConfig {
    fn default() -> Self {
        Self {
            name: "normal".into(),
            damage_points: 1.0,
            max_time: 4.0,
            pool_size: 10,
            speed: 8.0,
            radius: 0.05,
        }
    }
}

impl BulletTypeConfig {
    pub fn named(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..default()
        }
    }
}

/// Bullet types to register at startup, in registration order.
#[derive(Resource, Debug, Clone)]
pub struct BulletCatalog(pub Vec<BulletTypeConfig>);

impl Default for BulletCatalog {
    fn default() -> Self {
        Self(vec![BulletTypeConfig::default()])
    }
}

/// Immutable registered bullet type.
pub type BulletType = BulletTypeConfig;

pub struct BulletPool {
    pub bullet: BulletType,
    pub shape: Collider,
    pub slots: Vec<Projectile>,
}

impl BulletPool {
    /// Index chosen by the acquisition policy, or `None` for an empty pool.
    pub fn pick_slot(&self) -> Option<usize> {
        let mut oldest: Option<usize> = None;
        let mut oldest_age = f32::NEG_INFINITY;

        for (i, p) in self.slots.iter().enumerate() {
            if !p.is_active() {
                return Some(i);
            }
            if p.age > oldest_age {
                oldest = Some(i);
                oldest_age = p.age;
            }
        }

        oldest
    }

    #[inline]
    pub fn active_count(&self) -> usize {
        self.slots.iter().filter(|p| p.is_active()).count()
    }
}

/// All projectile pools, in registration order.
#[derive(Resource, Default)]
pub struct BulletPools {
    pools: Vec<BulletPool>,
    by_name: HashMap<String, BulletTypeId>,
}

impl BulletPools {
    /// Build the pool for `config` with visuals from `factory`.
    ///
    /// Registering a name twice returns the existing id. Returns `None` when the
    /// factory has no template for the type; nothing is registered then.
    pub fn register_type(
        &mut self,
        commands: &mut Commands,
        factory: &VisualFactory,
        config: BulletTypeConfig,
    ) -> Option<BulletTypeId> {
        if let Some(&id) = self.by_name.get(&config.name) {
            debug!("Bullet type {:?} already registered", config.name);
            return Some(id);
        }

        let kind = BulletTypeId(self.pools.len());
        let Some(visuals) = factory.0.build_pool(commands, kind, &config) else {
            debug!("No visual template for bullet type {:?}; pool skipped", config.name);
            return None;
        };

        let slots = visuals
            .into_iter()
            .enumerate()
            .map(|(slot, visual)| Projectile {
                id: ProjectileId { kind, slot },
                visual,
                position: Vec3::ZERO,
                direction: Projectile::FORWARD,
                speed: config.speed,
                age: 0.0,
                max_time: config.max_time,
                damage_points: config.damage_points,
                state: ProjectileState::Inactive,
            })
            .collect();

        self.by_name.insert(config.name.clone(), kind);
        self.pools.push(BulletPool {
            shape: Collider::sphere(config.radius),
            bullet: config,
            slots,
        });

        Some(kind)
    }

    #[inline]
    pub fn type_id(&self, name: &str) -> Option<BulletTypeId> {
        self.by_name.get(name).copied()
    }

    #[inline]
    pub fn pool(&self, kind: BulletTypeId) -> Option<&BulletPool> {
        self.pools.get(kind.0)
    }

    #[inline]
    pub fn pools(&self) -> &[BulletPool] {
        &self.pools
    }

    #[inline]
    pub fn pools_mut(&mut self) -> &mut [BulletPool] {
        &mut self.pools
    }

    #[inline]
    pub fn get(&self, id: ProjectileId) -> Option<&Projectile> {
        self.pools.get(id.kind.0)?.slots.get(id.slot)
    }

    #[inline]
    pub fn get_mut(&mut self, id: ProjectileId) -> Option<&mut Projectile> {
        self.pools.get_mut(id.kind.0)?.slots.get_mut(id.slot)
    }

    /// Slot to launch next for `kind`; may be an in-flight projectile (forced reuse).
    pub fn acquire(&mut self, kind: BulletTypeId) -> Option<&mut Projectile> {
        let pool = self.pools.get_mut(kind.0)?;
        let slot = pool.pick_slot()?;
        pool.slots.get_mut(slot)
    }

    /// Acquire + launch a projectile of the named type from `origin`.
    pub fn fire(&mut self, bullet_name: &str, origin: &GlobalTransform) -> Option<ProjectileId> {
        let Some(kind) = self.type_id(bullet_name) else {
            debug!("Unknown bullet type {bullet_name:?}; shot dropped");
            return None;
        };
        let projectile = self.acquire(kind)?;
        projectile.launch(origin);
        Some(projectile.id)
    }

    /// Idempotent.
    pub fn retire(&mut self, id: ProjectileId) {
        if let Some(p) = self.get_mut(id) {
            p.retire();
        }
    }

    pub fn active_count(&self) -> usize {
        self.pools.iter().map(BulletPool::active_count).sum()
    }
}

/// Build a pool for every catalog entry.
pub fn init_bullet_pools(
    mut commands: Commands,
    catalog: Res<BulletCatalog>,
    factory: Res<VisualFactory>,
    mut pools: ResMut<BulletPools>,
) {
    for config in &catalog.0 {
        if let Some(kind) = pools.register_type(&mut commands, &factory, config.clone()) {
            debug!(
                "Registered bullet type {:?} as {kind:?} ({} slots)",
                config.name, config.pool_size
            );
        }
    }
}
