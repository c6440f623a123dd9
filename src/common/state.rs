//! Global session state machine.
//!
//! ```text
//! Idle --GameStart--> Active --player health 0 / player died--> Ended --> Idle
//! ```
//!
//! `end` records the final score and resets the counters but leaves the phase at
//! `Ended` for the rest of the frame. The session plugin calls `settle` at the start
//! of the next frame to drop back to `Idle`.

use bevy::prelude::*;

#[derive(Debug, Clone, Copy, Eq, PartialEq, Hash, Default)]
pub enum SessionPhase {
    #[default]
    Idle,
    Active,
    Ended,
}

/// Score and player health for one game session.
#[derive(Resource, Debug, Clone, PartialEq, Eq)]
pub struct GameSession {
    pub phase: SessionPhase,
    pub score: u32,
    pub player_health: u32,
    /// Score of the most recently finished session.
    pub last_score: u32,
    starting_health: u32,
}

impl Default for GameSession {
    fn default() -> Self {
        Self::new(3)
    }
}

impl GameSession {
    pub fn new(starting_health: u32) -> Self {
        Self {
            phase: SessionPhase::Idle,
            score: 0,
            player_health: starting_health,
            last_score: 0,
            starting_health,
        }
    }

    #[inline]
    pub fn is_active(&self) -> bool {
        self.phase == SessionPhase::Active
    }

    #[inline]
    pub fn starting_health(&self) -> u32 {
        self.starting_health
    }

    /// Enter `Active` with fresh counters. Restarts a running session.
    pub fn start(&mut self) {
        self.score = 0;
        self.player_health = self.starting_health;
        self.phase = SessionPhase::Active;
    }

    /// Returns the new score, or `None` when no session is running.
    pub fn add_point(&mut self) -> Option<u32> {
        if !self.is_active() {
            return None;
        }
        self.score += 1;
        Some(self.score)
    }

    /// Returns the remaining health, or `None` when no session is running.
    pub fn damage_player(&mut self) -> Option<u32> {
        if !self.is_active() {
            return None;
        }
        self.player_health = self.player_health.saturating_sub(1);
        Some(self.player_health)
    }

    /// Finish the running session and return its final score.
    ///
    /// Returns `None` (and changes nothing) when the session is not `Active`.
    pub fn end(&mut self) -> Option<u32> {
        if !self.is_active() {
            return None;
        }
        self.phase = SessionPhase::Ended;
        let final_score = self.score;
        self.last_score = final_score;
        self.score = 0;
        self.player_health = self.starting_health;
        Some(final_score)
    }

    /// `Ended -> Idle`. Returns `false` in any other phase.
    pub fn settle(&mut self) -> bool {
        if self.phase != SessionPhase::Ended {
            return false;
        }
        self.phase = SessionPhase::Idle;
        true
    }
}

/// `"Score: N"`, the text the external score display shows.
pub fn score_label(score: u32) -> String {
    format!("Score: {score}")
}

/// `"Health: N"`, the text the external health display shows.
pub fn health_label(health: u32) -> String {
    format!("Health: {health}")
}
