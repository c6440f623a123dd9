//! Visuals plugin (render-only): projectile mesh templates, camera and light.
//!
//! Installs a `MeshTemplateFactory` before the pools are built, so every catalog type
//! gets a glowing sphere sized from its collision radius. A type with a zero or
//! negative radius gets no template and therefore no pool.

use bevy::prelude::*;

use crate::plugins::player::Player;
use crate::plugins::projectiles::factory::{MeshTemplate, MeshTemplateFactory, VisualFactory};
use crate::plugins::projectiles::pool::{init_bullet_pools, BulletCatalog};

#[derive(Component)]
pub struct MainCamera;

pub fn plugin(app: &mut App) {
    app.add_systems(
        Startup,
        (install_mesh_templates.before(init_bullet_pools), setup_scene),
    )
    .add_systems(
        PostUpdate,
        follow_player.before(TransformSystems::Propagate),
    );
}

fn install_mesh_templates(
    mut commands: Commands,
    catalog: Res<BulletCatalog>,
    mut meshes: ResMut<Assets<Mesh>>,
    mut materials: ResMut<Assets<StandardMaterial>>,
) {
    let mut factory = MeshTemplateFactory::default();

    for bullet in catalog.0.iter().filter(|b| b.radius > 0.0) {
        factory.templates.insert(
            bullet.name.clone(),
            MeshTemplate {
                mesh: meshes.add(Sphere::new(bullet.radius)),
                material: materials.add(StandardMaterial {
                    base_color: Color::srgb(1.0, 0.85, 0.3),
                    emissive: LinearRgba::rgb(4.0, 3.0, 0.8),
                    ..default()
                }),
            },
        );
    }

    commands.insert_resource(VisualFactory(Box::new(factory)));
}

fn setup_scene(mut commands: Commands) {
    commands.spawn((
        Name::new("MainCamera"),
        Camera3d::default(),
        MainCamera,
        Transform::from_xyz(0.0, 1.6, 0.0),
    ));

    commands.spawn((
        Name::new("Sun"),
        DirectionalLight {
            illuminance: 8_000.0,
            shadows_enabled: true,
            ..default()
        },
        Transform::from_xyz(4.0, 8.0, 4.0).looking_at(Vec3::ZERO, Vec3::Y),
    ));
}

/// The camera is the player's head.
fn follow_player(
    // Disjointness proof: Player entities are not MainCamera entities.
    q_player: Query<&Transform, (With<Player>, Without<MainCamera>)>,
    mut q_cam: Query<&mut Transform, (With<MainCamera>, Without<Player>)>,
) {
    let Ok(tf_player) = q_player.single() else {
        return;
    };
    let Ok(mut tf_cam) = q_cam.single_mut() else {
        return;
    };
    *tf_cam = *tf_player;
}
