//! Roll session state
//!
//! A session owns the roll lifecycle: it starts a roll, collects face values
//! in the order the dice settle and declares the roll complete once every die
//! has reported.

use bevy::prelude::*;
use rand::rngs::StdRng;
use rand::SeedableRng;

use super::dice::{clamp_die_count, RollOutcome};

/// Lifecycle phase of the session
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub enum RollPhase {
    #[default]
    Idle,
    /// A roll is in flight; `started_at` is the fixed-clock launch time.
    Rolling { started_at: f32 },
}

/// Resource holding the state of the current (or last) roll
#[derive(Resource, Debug, Clone, PartialEq)]
pub struct RollSession {
    pub die_count: usize,
    pub phase: RollPhase,
    /// Face values in settle order. Kept after completion for display.
    pub results: Vec<u32>,
}

impl Default for RollSession {
    fn default() -> Self {
        Self::new(1)
    }
}

impl RollSession {
    pub fn new(die_count: usize) -> Self {
        Self {
            die_count: clamp_die_count(die_count),
            phase: RollPhase::Idle,
            results: Vec::new(),
        }
    }

    pub fn is_rolling(&self) -> bool {
        matches!(self.phase, RollPhase::Rolling { .. })
    }

    pub fn started_at(&self) -> Option<f32> {
        match self.phase {
            RollPhase::Rolling { started_at } => Some(started_at),
            RollPhase::Idle => None,
        }
    }

    /// Enter the rolling phase. Returns false (and changes nothing) when a
    /// roll is already in flight.
    pub fn begin(&mut self, now: f32) -> bool {
        if self.is_rolling() {
            return false;
        }
        self.phase = RollPhase::Rolling { started_at: now };
        self.results.clear();
        true
    }

    /// Record a settled face value. Returns the outcome once the last die
    /// has reported; values arriving outside a roll are dropped.
    pub fn record(&mut self, value: u32) -> Option<RollOutcome> {
        if !self.is_rolling() {
            return None;
        }
        self.results.push(value);
        if self.results.len() >= self.die_count {
            return self.finish();
        }
        None
    }

    /// Complete the roll with whatever has been recorded so far.
    pub fn finish(&mut self) -> Option<RollOutcome> {
        if !self.is_rolling() {
            return None;
        }
        self.phase = RollPhase::Idle;
        Some(RollOutcome::from_values(self.results.clone()))
    }

    /// True when a roll has been in flight for longer than `limit` seconds.
    pub fn is_timed_out(&self, now: f32, limit: f32) -> bool {
        self.started_at()
            .is_some_and(|started_at| now - started_at > limit)
    }

    pub fn can_reconfigure(&self) -> bool {
        !self.is_rolling()
    }

    /// Change the number of dice. Returns the clamped count, or `None` when
    /// the request is ignored because a roll is in flight.
    pub fn request_die_count(&mut self, count: usize) -> Option<usize> {
        if !self.can_reconfigure() {
            return None;
        }
        self.die_count = clamp_die_count(count);
        self.results.clear();
        Some(self.die_count)
    }

    /// Forget the last roll's results. Ignored while rolling.
    pub fn reset(&mut self) -> bool {
        if !self.can_reconfigure() {
            return false;
        }
        self.results.clear();
        true
    }

    pub fn running_total(&self) -> u32 {
        self.results.iter().sum()
    }
}

/// Random source shared by every throw and spawn layout
#[derive(Resource)]
pub struct DiceRng(pub StdRng);

impl DiceRng {
    /// A fixed seed makes every throw reproducible; `None` seeds from entropy.
    pub fn from_seed(seed: Option<u64>) -> Self {
        match seed {
            Some(seed) => Self(StdRng::seed_from_u64(seed)),
            None => Self(StdRng::from_entropy()),
        }
    }
}
