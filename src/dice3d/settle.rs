//! Settle detection and face reading
//!
//! When a die comes to rest its orientation is snapped to the nearest
//! axis-aligned rotation, the body is frozen on the floor, and the face
//! pointing up is read from the d6 face table.

use std::f32::consts::FRAC_PI_2;

use bevy::prelude::*;

use crate::dice3d::physics::DieBody;
use crate::dice3d::types::{Die, D6_FACES};

fn snap_angle(angle: f32) -> f32 {
    (angle / FRAC_PI_2).round() * FRAC_PI_2
}

/// Round each XYZ Euler angle of `rotation` to the nearest quarter turn.
pub fn snap_to_grid(rotation: Quat) -> Quat {
    let (x, y, z) = rotation.normalize().to_euler(EulerRot::XYZ);
    Quat::from_euler(EulerRot::XYZ, snap_angle(x), snap_angle(y), snap_angle(z))
}

/// Value of the face whose world-space normal points most upward.
///
/// Ties resolve to the earliest face in [`D6_FACES`].
pub fn top_face_value(rotation: Quat) -> u32 {
    let mut best_value = D6_FACES[0].1;
    let mut best_dot = f32::NEG_INFINITY;

    for (normal, value) in D6_FACES {
        let dot = (rotation * normal).dot(Vec3::Y);
        if dot > best_dot {
            best_dot = dot;
            best_value = value;
        }
    }

    best_value
}

/// Freeze a resting die and record its face value.
///
/// Returns `None` when the die already has a value for this roll, so repeated
/// rest notifications never change the result.
pub fn settle_die(die: &mut Die, body: &mut impl DieBody, floor_height: f32) -> Option<u32> {
    if die.is_settled() {
        return None;
    }

    let rotation = snap_to_grid(body.rotation());
    let mut translation = body.translation();
    translation.y = floor_height;

    body.set_rotation(rotation);
    body.set_translation(translation);
    body.stop();

    let value = top_face_value(rotation);
    die.face_value = Some(value);
    Some(value)
}

/// Resolve a die that never came to rest: halt it, put it to sleep and read
/// the face from the orientation it has right now.
pub fn force_settle_die(die: &mut Die, body: &mut impl DieBody, floor_height: f32) -> Option<u32> {
    if die.is_settled() {
        return None;
    }
    body.stop();
    let value = settle_die(die, body, floor_height);
    // Sleep last: a later velocity write wakes the Rapier body
    body.sleep();
    value
}
