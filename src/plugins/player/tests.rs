use bevy::prelude::*;

use crate::common::state::{GameSession, SessionPhase};
use crate::common::test_utils::{drain_messages, ensure_messages, run_system_once};
use crate::plugins::projectiles::components::{BulletTypeId, ProjectileId};
use crate::plugins::projectiles::messages::{GameEnded, PlayerDamaged, TargetDied, TargetHit};

use super::*;

fn world_with_player(active: bool) -> (World, Entity) {
    let mut world = World::new();
    let mut session = GameSession::new(3);
    if active {
        session.start();
    }
    world.insert_resource(session);
    ensure_messages::<TargetHit>(&mut world);
    ensure_messages::<TargetDied>(&mut world);
    ensure_messages::<PlayerDamaged>(&mut world);
    ensure_messages::<GameEnded>(&mut world);

    let player = world.spawn(Player).id();
    (world, player)
}

fn hit(world: &mut World, target: Entity) {
    world.write_message(TargetHit {
        target,
        projectile: ProjectileId {
            kind: BulletTypeId(0),
            slot: 0,
        },
    });
    run_system_once(world, apply_player_hits);
}

#[test]
fn player_spawns_with_a_target() {
    let (world, player) = world_with_player(false);
    assert!(world.get::<Target>(player).is_some());
}

#[test]
fn new_player_target_matches_session_health() {
    let mut world = World::new();
    world.insert_resource(GameSession::new(5));
    // Explicit values lose to the session's budget.
    let bare = world.spawn(Player).id();
    let explicit = world.spawn((Player, Target::new(2.0))).id();

    run_system_once(&mut world, init_player_target);

    for e in [bare, explicit] {
        let target = world.get::<Target>(e).unwrap();
        assert_eq!(target.max_health, 5.0);
        assert_eq!(target.health, 5.0);
        assert!(target.active);
    }
}

#[test]
fn other_targets_keep_their_health() {
    let mut world = World::new();
    world.insert_resource(GameSession::new(5));
    let other = world.spawn(Target::new(1.0)).id();

    run_system_once(&mut world, init_player_target);

    assert_eq!(world.get::<Target>(other).unwrap().max_health, 1.0);
}

#[test]
fn each_hit_costs_one_health() {
    let (mut world, player) = world_with_player(true);

    hit(&mut world, player);

    assert_eq!(world.resource::<GameSession>().player_health, 2);
    assert_eq!(
        drain_messages::<PlayerDamaged>(&mut world),
        vec![PlayerDamaged { health: 2 }]
    );
    assert!(drain_messages::<GameEnded>(&mut world).is_empty());
}

#[test]
fn third_hit_ends_the_game_and_resets() {
    let (mut world, player) = world_with_player(true);
    world.resource_mut::<GameSession>().score = 4;

    for _ in 0..3 {
        hit(&mut world, player);
    }

    let healths: Vec<u32> = drain_messages::<PlayerDamaged>(&mut world)
        .into_iter()
        .map(|m| m.health)
        .collect();
    assert_eq!(healths, vec![2, 1, 0]);
    assert_eq!(
        drain_messages::<GameEnded>(&mut world),
        vec![GameEnded { final_score: 4 }]
    );

    let session = world.resource::<GameSession>();
    assert_eq!(session.phase, SessionPhase::Ended);
    assert_eq!(session.score, 0);
    assert_eq!(session.player_health, 3);
    assert_eq!(session.last_score, 4);
}

#[test]
fn hits_outside_a_session_are_ignored() {
    let (mut world, player) = world_with_player(false);

    hit(&mut world, player);

    assert_eq!(world.resource::<GameSession>().player_health, 3);
    assert!(drain_messages::<PlayerDamaged>(&mut world).is_empty());
}

#[test]
fn hits_on_other_targets_do_not_hurt_the_player() {
    let (mut world, _player) = world_with_player(true);
    let other = world.spawn(Target::new(1.0)).id();

    hit(&mut world, other);

    assert_eq!(world.resource::<GameSession>().player_health, 3);
}

#[test]
fn player_target_dying_ends_the_game() {
    let (mut world, player) = world_with_player(true);
    world.resource_mut::<GameSession>().score = 2;

    world.write_message(TargetDied { target: player });
    run_system_once(&mut world, resolve_player_deaths);

    assert_eq!(
        drain_messages::<GameEnded>(&mut world),
        vec![GameEnded { final_score: 2 }]
    );
    assert!(!world.resource::<GameSession>().is_active());
}

#[test]
fn player_death_while_idle_announces_nothing() {
    let (mut world, player) = world_with_player(false);

    world.write_message(TargetDied { target: player });
    run_system_once(&mut world, resolve_player_deaths);

    assert!(drain_messages::<GameEnded>(&mut world).is_empty());
}
