//! Bevy plugins for the dice lounge
//!
//! [`RollEnginePlugin`] carries the simulation side (session, arena, dice
//! bodies and the fixed-step roll logic) and runs headless. [`LoungeViewPlugin`]
//! adds input, visuals and result reporting on top of it.

use bevy::prelude::*;
use bevy_rapier3d::prelude::*;

use crate::dice3d::physics::ArenaBounds;
use crate::dice3d::systems::*;
use crate::dice3d::throw_control::SwipeState;
use crate::dice3d::types::*;

/// Roll engine: resources, messages and systems, no renderer
pub struct RollEnginePlugin {
    pub config: LoungeConfig,
}

impl RollEnginePlugin {
    pub fn new(config: LoungeConfig) -> Self {
        Self { config }
    }
}

impl Default for RollEnginePlugin {
    fn default() -> Self {
        Self::new(LoungeConfig::default())
    }
}

impl Plugin for RollEnginePlugin {
    fn build(&self, app: &mut App) {
        let config = self.config.clone();

        app.insert_resource(Time::<Fixed>::from_hz(config.physics.fixed_hz))
            .insert_resource(ArenaBounds::from_settings(&config.arena))
            .insert_resource(RollSession::new(config.dice.count))
            .insert_resource(DiceRng::from_seed(config.seed))
            .insert_resource(config)
            .add_message::<RollRequested>()
            .add_message::<DieCountRequested>()
            .add_message::<ResetRequested>()
            .add_message::<DieSettled>()
            .add_message::<RollCompleted>()
            .add_systems(Startup, (configure_clock, spawn_arena, spawn_initial_dice))
            .add_systems(PreUpdate, configure_gravity)
            .add_systems(
                Update,
                (handle_reconfigure_requests, handle_roll_requests).chain(),
            )
            // Rapier steps in FixedPostUpdate; the roll logic sees the
            // written-back poses of the same step.
            .add_systems(
                FixedPostUpdate,
                (enforce_arena_bounds, detect_settled_dice, enforce_roll_timeout)
                    .chain()
                    .after(PhysicsSet::Writeback),
            );
    }
}

/// Windowed front end: input, dice visuals, results panel and stdout report
pub struct LoungeViewPlugin;

impl Plugin for LoungeViewPlugin {
    fn build(&self, app: &mut App) {
        app.init_resource::<SwipeState>()
            .add_systems(Startup, (load_dice_assets, setup_scene))
            .add_systems(
                Update,
                (handle_input, handle_swipe_input).before(handle_reconfigure_requests),
            )
            .add_systems(
                Update,
                (
                    decorate_arena,
                    spawn_die_renderables,
                    cleanup_die_renderables,
                    sync_die_renderables,
                )
                    .chain()
                    .after(handle_roll_requests),
            )
            .add_systems(
                Update,
                (update_results_display, print_roll_report).after(handle_roll_requests),
            );
    }
}
