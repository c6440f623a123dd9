//! Integration test harness.
//!
//! Keep integration tests headless:
//! - `MinimalPlugins` provides the core ECS runtime, `TransformPlugin` keeps `GlobalTransform` honest.
//! - we then call `shooting_gallery::game::configure_headless` to install gameplay plugins.
//! - time is stepped by hand: every `app.update()` is exactly one 100 ms fixed step.

use std::time::Duration;

use bevy::ecs::message::Message;
use bevy::prelude::*;
use bevy::time::TimeUpdateStrategy;
use bevy::transform::TransformPlugin;
use shooting_gallery::common::tunables::Tunables;

pub const STEP_SECS: f64 = 0.1;

pub fn app_headless() -> App {
    app_headless_with(Tunables::default())
}

/// Headless app whose gameplay plugins are built from `tunables`.
pub fn app_headless_with(tunables: Tunables) -> App {
    let mut app = App::new();
    app.add_plugins((MinimalPlugins, TransformPlugin));
    app.insert_resource(tunables);

    shooting_gallery::game::configure_headless(&mut app);

    app.insert_resource(TimeUpdateStrategy::ManualDuration(Duration::from_secs_f64(
        STEP_SECS,
    )));
    app.insert_resource(Time::<Fixed>::from_seconds(STEP_SECS));
    app
}

pub fn run_updates(app: &mut App, n: usize) {
    for _ in 0..n {
        app.update();
    }
}

/// Collects every `M` seen in `Update`, so tests can assert on what the fixed step wrote.
#[derive(Resource)]
pub struct Seen<M>(pub Vec<M>);

impl<M> Default for Seen<M> {
    fn default() -> Self {
        Self(Vec::new())
    }
}

pub fn record<M: Message + Clone>(app: &mut App) {
    app.init_resource::<Seen<M>>();
    app.add_systems(
        Update,
        |mut seen: ResMut<Seen<M>>, mut reader: MessageReader<M>| {
            seen.0.extend(reader.read().cloned());
        },
    );
}
