//! Core plugin: shared resources and global settings.

use crate::common::state::GameSession;
use crate::common::tunables::Tunables;
use bevy::prelude::*;

pub fn plugin(app: &mut App) {
    app.init_resource::<Tunables>();
    let starting_health = app.world().resource::<Tunables>().starting_player_health;
    app.insert_resource(GameSession::new(starting_health));
    app.insert_resource(ClearColor(Color::srgb(0.05, 0.05, 0.07)));
}
