//! Dice Lounge: a physics-driven d6 roller.
//!
//! The roll engine lives in [`dice3d`] and can run headless through
//! [`dice3d::RollEnginePlugin`].

pub mod dice3d;
