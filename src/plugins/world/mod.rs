//! World plugin: lays out the shooting gallery.
//!
//! One player at the origin looking down -Z, holding a gun, and a row of enemy targets in front of it.
//! Enemies start hidden and `Dormant`; `GameStart` brings them in.

use bevy::prelude::*;

use crate::plugins::enemies::Enemy;
use crate::plugins::player::Player;
use crate::plugins::projectiles::request::Shooter;
use crate::plugins::targets::{Target, TargetShape};

const ENEMY_ROW_Z: f32 = -6.0;
const ENEMY_SPACING: f32 = 2.0;
const ENEMY_COUNT: usize = 5;
/// Muzzle offset from the player, clear of the player's own box.
const GUN_OFFSET: Vec3 = Vec3::new(0.25, -0.3, -0.6);

pub fn plugin(app: &mut App) {
    app.add_systems(Startup, spawn_gallery);
}

fn spawn_gallery(mut commands: Commands) {
    let player = commands
        .spawn((
            Name::new("Player"),
            Player,
            TargetShape::cuboid(Vec3::new(0.5, 1.8, 0.5)),
            Transform::from_xyz(0.0, 1.6, 0.0),
        ))
        .id();

    // Shots start at the muzzle, so the player never hits itself on launch.
    commands.spawn((
        Name::new("Gun"),
        Shooter::default(),
        Transform::from_translation(GUN_OFFSET),
        ChildOf(player),
    ));

    let half_row = (ENEMY_COUNT as f32 - 1.0) * 0.5;
    for i in 0..ENEMY_COUNT {
        let x = (i as f32 - half_row) * ENEMY_SPACING;
        commands.spawn((
            Name::new(format!("Enemy{i}")),
            Enemy,
            Target::new(1.0),
            TargetShape::cuboid(Vec3::ONE),
            Transform::from_xyz(x, 1.5, ENEMY_ROW_Z),
            Visibility::Hidden,
        ));
    }
}
