//! Type definitions for the dice lounge
//!
//! This module is organized into submodules:
//! - `config` - Tunables and config file loading
//! - `dice` - Die component, face table and roll outcome
//! - `session` - Roll lifecycle state and the throw RNG
//! - `messages` - Commands and notifications passed between systems

pub mod config;
pub mod dice;
pub mod messages;
pub mod session;

// Re-export all public types for convenient access
pub use config::*;
pub use dice::*;
pub use messages::*;
pub use session::*;
