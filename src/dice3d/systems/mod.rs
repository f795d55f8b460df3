//! Systems module for dice3d
//!
//! This module contains all the Bevy systems for the dice lounge,
//! organized into submodules by functionality:
//!
//! - `setup`: Arena colliders, dice bodies, camera, lights and results panel
//! - `dice`: Roll launching, reconfiguration, bounds, settling and timeout
//! - `input`: Keyboard shortcuts and the pointer swipe
//! - `rendering`: Die renderables, the results panel and the stdout report

mod dice;
mod input;
pub mod rendering;
mod setup;

// Re-export all public systems
pub use dice::{
    configure_clock, configure_gravity, detect_settled_dice, enforce_arena_bounds,
    enforce_roll_timeout, handle_reconfigure_requests, handle_roll_requests,
};
pub use input::{handle_input, handle_swipe_input};
pub use rendering::{
    cleanup_die_renderables, decorate_arena, load_dice_assets, print_roll_report,
    results_panel_text, spawn_die_renderables, sync_die_renderables, update_results_display,
    DiceAssets, DieRenderable,
};
pub use setup::{
    arena_layout, setup_scene, spawn_arena, spawn_dice, spawn_die, spawn_initial_dice,
    MainCamera, ResultsText,
};
