//! Messages exchanged between input, the roll engine and the presentation layer

use bevy::prelude::*;

use super::dice::RollOutcome;
use crate::dice3d::throw_control::Throw;

/// Ask for a roll. Ignored while a roll is in flight.
#[derive(Message, Clone, Copy, Debug, PartialEq)]
pub struct RollRequested {
    pub throw: Throw,
}

/// Ask for a different number of dice. Clamped to the supported range and
/// ignored while a roll is in flight.
#[derive(Message, Clone, Copy, Debug, PartialEq, Eq)]
pub struct DieCountRequested(pub usize);

/// Put every die back in its resting layout and clear the results.
#[derive(Message, Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct ResetRequested;

/// A die reported its face value for the current roll.
#[derive(Message, Clone, Copy, Debug, PartialEq, Eq)]
pub struct DieSettled {
    pub die: Entity,
    pub index: usize,
    pub value: u32,
    /// Resolved by the roll timeout rather than by coming to rest.
    pub forced: bool,
}

/// Fired once per roll when every die has settled.
#[derive(Message, Clone, Debug, Default, PartialEq, Eq)]
pub struct RollCompleted(pub RollOutcome);
