//! Roll launcher
//!
//! Turns a [`Throw`] into the initial pose and motion of every die. The
//! planning step is pure and only draws from the RNG it is handed, so a seeded
//! RNG reproduces a throw exactly.

use std::f32::consts::PI;

use bevy::prelude::*;
use rand::Rng;

use super::state::Throw;
use crate::dice3d::physics::DieBody;
use crate::dice3d::types::{DiceSettings, Die, ThrowSettings};

/// Initial state applied to one die body at launch
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LaunchState {
    pub translation: Vec3,
    pub rotation: Quat,
    pub linvel: Vec3,
    pub angvel: Vec3,
}

/// Horizontal offset of die `index` in a row of `count`, centered on x = 0.
pub fn fan_offset(index: usize, count: usize, spacing: f32) -> f32 {
    (index as f32 - (count.saturating_sub(1)) as f32 / 2.0) * spacing
}

/// Uniform sample in `[-width / 2, width / 2)`.
fn spread(rng: &mut impl Rng, width: f32) -> f32 {
    if width <= 0.0 {
        return 0.0;
    }
    rng.gen_range(-width / 2.0..width / 2.0)
}

/// Uniform sample in `[min, min + width)`.
fn band(rng: &mut impl Rng, min: f32, width: f32) -> f32 {
    if width <= 0.0 {
        return min;
    }
    rng.gen_range(min..min + width)
}

/// Plan the launch of die `index` out of `count`.
pub fn plan_launch(
    throw: &Throw,
    index: usize,
    count: usize,
    settings: &ThrowSettings,
    rng: &mut impl Rng,
) -> LaunchState {
    let rotation = Quat::from_euler(
        EulerRot::XYZ,
        rng.gen_range(-PI..=PI),
        rng.gen_range(-PI..=PI),
        rng.gen_range(-PI..=PI),
    );

    let translation = Vec3::new(
        fan_offset(index, count, settings.spawn_spacing),
        band(rng, settings.spawn_height_min, settings.spawn_height_jitter),
        band(rng, settings.spawn_depth_min, settings.spawn_depth_jitter),
    );

    let direction = throw.direction();
    let force = settings.base_force * throw.strength();
    let linvel = Vec3::new(
        direction.x * force + spread(rng, settings.horizontal_jitter),
        band(rng, settings.base_upward_speed, settings.upward_jitter) * throw.lift(),
        direction.y * force + spread(rng, settings.horizontal_jitter),
    );

    let spin = throw.spin_range(settings);
    let angvel = Vec3::new(spread(rng, spin), spread(rng, spin), spread(rng, spin));

    LaunchState {
        translation,
        rotation,
        linvel,
        angvel,
    }
}

/// Reset a die for a new roll and put its body into the planned launch state.
pub fn launch_die(die: &mut Die, body: &mut impl DieBody, state: &LaunchState) {
    die.clear_roll_state();
    body.wake_up();
    body.stop();
    body.set_translation(state.translation);
    body.set_rotation(state.rotation);
    body.set_linear_velocity(state.linvel);
    body.set_angular_velocity(state.angvel);
}

/// Resting layout used when dice are (re)spawned outside of a roll.
pub fn rest_position(index: usize, count: usize, dice: &DiceSettings, rng: &mut impl Rng) -> Vec3 {
    Vec3::new(
        fan_offset(index, count, dice.rest_spacing),
        dice.rest_height,
        spread(rng, dice.rest_depth_spread),
    )
}
