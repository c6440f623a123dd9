//! Targets: damageable entities and the registry the projectile tick queries.
//!
//! A `Target` is registered the first time it is seen after transform propagation.
//! Its world-space box is computed from `TargetShape` at that moment and cached in
//! `TargetRegistry`; static targets keep that box for their whole life, moving ones
//! (`is_static == false`) get it recomputed every fixed step.
//!
//! Registry order is insertion order. When a projectile overlaps several targets the
//! first registered one takes the hit. Targets registered in the same frame are
//! ordered by their `SpawnOrder` stamp, not by `Entity` (recycled ids carry a higher
//! generation and would sort late).

use std::ops::ControlFlow;
use std::sync::atomic::{AtomicU64, Ordering};

use avian3d::prelude::*;
use bevy::prelude::*;

pub fn plugin(app: &mut App) {
    app.init_resource::<TargetRegistry>();
    app.add_systems(
        PostUpdate,
        (unregister_targets, register_targets)
            .chain()
            .after(TransformSystems::Propagate),
    );
}

/// Damage state of one target.
#[derive(Component, Debug, Clone, PartialEq)]
#[require(Transform, Visibility, SpawnOrder = SpawnOrder::next())]
pub struct Target {
    pub health: f32,
    pub max_health: f32,
    /// Can currently take damage.
    pub active: bool,
    /// Box is computed once at registration.
    pub is_static: bool,
}

impl Default for Target {
    fn default() -> Self {
        Self::new(1.0)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HitOutcome {
    /// Target was inactive; nothing changed.
    Ignored,
    Damaged,
    /// Health crossed to `<= 0` on this hit. Reported once per life.
    Killed,
}

impl Target {
    pub fn new(max_health: f32) -> Self {
        Self {
            health: max_health,
            max_health,
            active: true,
            is_static: true,
        }
    }

    pub fn moving(mut self) -> Self {
        self.is_static = false;
        self
    }

    /// Subtract `damage`. Health may go negative on overkill; the kill deactivates the
    /// target so no further hit lands until `revive`.
    pub fn apply_hit(&mut self, damage: f32) -> HitOutcome {
        if !self.active {
            return HitOutcome::Ignored;
        }
        self.health -= damage;
        if self.health <= 0.0 {
            self.active = false;
            HitOutcome::Killed
        } else {
            HitOutcome::Damaged
        }
    }

    /// Full health, able to take damage again.
    #[inline]
    pub fn revive(&mut self) {
        self.health = self.max_health;
        self.active = true;
    }
}

static NEXT_SPAWN_ORDER: AtomicU64 = AtomicU64::new(0);

/// Monotonic stamp taken when `Target` is inserted.
#[derive(Component, Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct SpawnOrder(u64);

impl SpawnOrder {
    fn next() -> Self {
        Self(NEXT_SPAWN_ORDER.fetch_add(1, Ordering::Relaxed))
    }
}

/// Collision geometry of a target, in its local space.
#[derive(Component, Clone)]
pub struct TargetShape(pub Collider);

impl TargetShape {
    /// Axis-aligned box with full side lengths `size`.
    pub fn cuboid(size: Vec3) -> Self {
        Self(Collider::cuboid(size.x, size.y, size.z))
    }

    #[inline]
    pub fn world_aabb(&self, tf: &GlobalTransform) -> ColliderAabb {
        let (_, rotation, translation) = tf.to_scale_rotation_translation();
        self.0.aabb(translation, rotation)
    }
}

/// Position of an entry in the registry.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct TargetHandle(pub usize);

#[derive(Clone, Copy, Debug)]
pub struct RegisteredTarget {
    pub entity: Entity,
    pub volume: ColliderAabb,
}

/// Registered targets in insertion order.
#[derive(Resource, Debug, Default)]
pub struct TargetRegistry {
    entries: Vec<RegisteredTarget>,
}

impl TargetRegistry {
    /// Append `entity` with its cached `volume`.
    ///
    /// Each entity holds one entry: registering it again refreshes the volume in place
    /// and keeps its position in the order.
    pub fn register(&mut self, entity: Entity, volume: ColliderAabb) -> TargetHandle {
        if let Some(i) = self.position(entity) {
            self.entries[i].volume = volume;
            return TargetHandle(i);
        }
        self.entries.push(RegisteredTarget { entity, volume });
        TargetHandle(self.entries.len() - 1)
    }

    /// Returns `false` if `entity` was not registered.
    pub fn unregister(&mut self, entity: Entity) -> bool {
        let Some(i) = self.position(entity) else {
            return false;
        };
        // `remove`, not `swap_remove`: order decides ties.
        self.entries.remove(i);
        true
    }

    pub fn refresh(&mut self, entity: Entity, volume: ColliderAabb) {
        if let Some(i) = self.position(entity) {
            self.entries[i].volume = volume;
        }
    }

    #[inline]
    fn position(&self, entity: Entity) -> Option<usize> {
        self.entries.iter().position(|e| e.entity == entity)
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn volume(&self, entity: Entity) -> Option<ColliderAabb> {
        self.entries
            .iter()
            .find(|e| e.entity == entity)
            .map(|e| e.volume)
    }

    #[inline]
    pub fn entries(&self) -> &[RegisteredTarget] {
        &self.entries
    }

    /// Visit entries that can take a hit right now, in insertion order.
    ///
    /// Skips targets that are inactive, hidden, or no longer carry a `Target`.
    pub fn for_each_active<F, B>(
        &self,
        q_targets: &Query<(&mut Target, &Visibility), F>,
        mut visitor: impl FnMut(&RegisteredTarget) -> ControlFlow<B>,
    ) -> Option<B>
    where
        F: bevy::ecs::query::QueryFilter,
    {
        for entry in &self.entries {
            let Ok((target, vis)) = q_targets.get(entry.entity) else {
                continue;
            };
            if !target.active || *vis == Visibility::Hidden {
                continue;
            }
            if let ControlFlow::Break(b) = visitor(entry) {
                return Some(b);
            }
        }
        None
    }
}

/// Cache the world box of every newly added target.
pub fn register_targets(
    mut registry: ResMut<TargetRegistry>,
    q_new: Query<(Entity, &SpawnOrder, &TargetShape, &GlobalTransform), Added<Target>>,
) {
    let mut added: Vec<_> = q_new.iter().collect();
    // Spawn order, not archetype order.
    added.sort_by_key(|(_, order, ..)| **order);

    for (e, _, shape, tf) in added {
        let handle = registry.register(e, shape.world_aabb(tf));
        debug!("Registered target {e:?} as {handle:?}");
    }
}

pub fn unregister_targets(
    mut registry: ResMut<TargetRegistry>,
    mut removed: RemovedComponents<Target>,
) {
    for e in removed.read() {
        if registry.unregister(e) {
            debug!("Unregistered target {e:?}");
        }
    }
}

/// Recompute boxes for targets that move.
pub fn refresh_moving_target_volumes(
    mut registry: ResMut<TargetRegistry>,
    q_moving: Query<(Entity, &Target, &TargetShape, &GlobalTransform)>,
) {
    for (e, target, shape, tf) in &q_moving {
        if target.is_static {
            continue;
        }
        registry.refresh(e, shape.world_aabb(tf));
    }
}
