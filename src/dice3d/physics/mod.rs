//! Physics collaborator seams
//!
//! - `body`: the [`DieBody`] trait and its Rapier and detached implementations
//! - `bounds`: corrective arena containment

mod body;
mod bounds;

pub use body::*;
pub use bounds::*;
