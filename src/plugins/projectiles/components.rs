use bevy::prelude::*;

/// Index of a registered bullet type, in registration order.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct BulletTypeId(pub usize);

/// Stable identity of one pool slot.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct ProjectileId {
    pub kind: BulletTypeId,
    pub slot: usize,
}

/// Marker on the visual entity backing a pool slot.
#[derive(Component, Debug, Clone, Copy)]
pub struct PooledProjectile(pub ProjectileId);

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ProjectileState {
    #[default]
    Inactive,
    Active,
}

/// One reusable projectile slot.
///
/// Slots are created when their bullet type registers and live for the rest of the
/// process. Retiring one only flips `state`.
#[derive(Debug, Clone)]
pub struct Projectile {
    pub id: ProjectileId,
    pub visual: Entity,
    pub position: Vec3,
    /// Velocity: launch forward axis scaled by `speed`.
    pub direction: Vec3,
    pub speed: f32,
    /// Seconds since the last launch.
    pub age: f32,
    pub max_time: f32,
    pub damage_points: f32,
    pub state: ProjectileState,
}

impl Projectile {
    /// Canonical forward axis for slots that have never been launched.
    pub const FORWARD: Vec3 = Vec3::NEG_Z;

    #[inline]
    pub fn is_active(&self) -> bool {
        self.state == ProjectileState::Active
    }

    /// Arm the slot at `origin`, flying along its forward axis.
    pub fn launch(&mut self, origin: &GlobalTransform) {
        self.state = ProjectileState::Active;
        self.age = 0.0;
        self.position = origin.translation();
        self.direction = origin.forward() * self.speed;
    }

    /// Idempotent.
    #[inline]
    pub fn retire(&mut self) {
        self.state = ProjectileState::Inactive;
    }
}
