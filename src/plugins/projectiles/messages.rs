//! Buffered notifications between the simulation core and its collaborators.
//!
//! Input and UI layers never reach into the pools or the registry. They write the
//! request messages below and react to the outcome messages:
//! - requests: `Shoot`, `ChangeBullet`, `GameStart`
//! - outcomes: `TargetHit`, `TargetDied`, `ScoreChanged`, `PlayerDamaged`, `GameEnded`

use std::str::FromStr;

use bevy::prelude::*;

use crate::common::state::{health_label, score_label};

use super::components::ProjectileId;

/// Fire the shooter's active bullet type from its world transform.
#[derive(Message, Clone, Copy, Debug)]
pub struct Shoot {
    pub shooter: Entity,
}

/// How a `ChangeBullet` request picks the next active type.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum BulletChoice {
    Next,
    Prev,
    Named(String),
}

impl FromStr for BulletChoice {
    type Err = std::convert::Infallible;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(match s {
            "next" => Self::Next,
            "prev" => Self::Prev,
            name => Self::Named(name.to_owned()),
        })
    }
}

impl From<&str> for BulletChoice {
    fn from(s: &str) -> Self {
        match s.parse() {
            Ok(choice) => choice,
            Err(never) => match never {},
        }
    }
}

#[derive(Message, Clone, Debug)]
pub struct ChangeBullet {
    pub shooter: Entity,
    pub choice: BulletChoice,
}

#[derive(Message, Clone, Copy, Debug, Default)]
pub struct GameStart;

/// A projectile struck `target`. Addressed to the target entity.
#[derive(Message, Clone, Copy, Debug, PartialEq, Eq)]
pub struct TargetHit {
    pub target: Entity,
    pub projectile: ProjectileId,
}

/// `target` ran out of health.
#[derive(Message, Clone, Copy, Debug, PartialEq, Eq)]
pub struct TargetDied {
    pub target: Entity,
}

#[derive(Message, Clone, Copy, Debug, PartialEq, Eq)]
pub struct ScoreChanged {
    pub score: u32,
}

impl ScoreChanged {
    pub fn label(&self) -> String {
        score_label(self.score)
    }
}

#[derive(Message, Clone, Copy, Debug, PartialEq, Eq)]
pub struct PlayerDamaged {
    pub health: u32,
}

impl PlayerDamaged {
    pub fn label(&self) -> String {
        health_label(self.health)
    }
}

/// The session finished; UI goes back to its idle layout and game audio stops.
#[derive(Message, Clone, Copy, Debug, PartialEq, Eq)]
pub struct GameEnded {
    pub final_score: u32,
}
