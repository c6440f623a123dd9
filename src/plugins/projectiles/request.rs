//! Shooter configuration and `ChangeBullet` handling.

use bevy::prelude::*;

use super::messages::{BulletChoice, ChangeBullet};

/// An entity that fires projectiles from its world transform.
#[derive(Component, Debug, Clone, PartialEq)]
#[require(Transform)]
pub struct Shooter {
    pub active_bullet_type: String,
    pub bullet_types: Vec<String>,
    /// Wrap around on next/prev instead of clamping at the ends.
    pub cycle: bool,
}

impl Default for Shooter {
    fn default() -> Self {
        Self {
            active_bullet_type: "normal".into(),
            bullet_types: vec!["normal".into()],
            cycle: false,
        }
    }
}

impl Shooter {
    pub fn with_types<I, S>(types: I, cycle: bool) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let bullet_types: Vec<String> = types.into_iter().map(Into::into).collect();
        let active_bullet_type = bullet_types.first().cloned().unwrap_or_default();
        Self {
            active_bullet_type,
            bullet_types,
            cycle,
        }
    }

    /// Apply `choice`. Returns `false` when nothing changed.
    ///
    /// Next/prev are no-ops if the active type is not in `bullet_types`. A named choice
    /// is taken as-is; an unregistered name simply makes later shots fail.
    pub fn change(&mut self, choice: &BulletChoice) -> bool {
        let step: isize = match choice {
            BulletChoice::Named(name) => {
                if *name == self.active_bullet_type {
                    return false;
                }
                self.active_bullet_type.clone_from(name);
                return true;
            }
            BulletChoice::Next => 1,
            BulletChoice::Prev => -1,
        };

        let Some(idx) = self
            .bullet_types
            .iter()
            .position(|t| *t == self.active_bullet_type)
        else {
            return false;
        };

        let len = self.bullet_types.len() as isize;
        let target = idx as isize + step;
        let next = if self.cycle {
            target.rem_euclid(len)
        } else {
            target.clamp(0, len - 1)
        } as usize;

        if next == idx {
            return false;
        }
        self.active_bullet_type.clone_from(&self.bullet_types[next]);
        true
    }
}

pub fn change_bullet_type(
    mut reader: MessageReader<ChangeBullet>,
    mut q_shooters: Query<&mut Shooter>,
) {
    for req in reader.read() {
        let Ok(mut shooter) = q_shooters.get_mut(req.shooter) else {
            debug!("ChangeBullet for non-shooter {:?}", req.shooter);
            continue;
        };
        if shooter.change(&req.choice) {
            debug!("Shooter {:?} now fires {:?}", req.shooter, shooter.active_bullet_type);
        }
    }
}
