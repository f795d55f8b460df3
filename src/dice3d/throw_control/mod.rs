//! Throw Control Module
//!
//! This module handles gesture-controlled dice throwing. A pointer swipe over
//! the arena determines the direction, strength and lift of a throw; a plain
//! click or the roll key uses the default throw.

mod launcher;
mod state;

pub use launcher::*;
pub use state::*;
