//! Dice-related types and components
//!
//! This module contains the Die component, the d6 face table and the
//! outcome reported once a roll completes.

use bevy::prelude::*;

/// Lowest and highest die count a session accepts.
pub const MIN_DICE: usize = 1;
pub const MAX_DICE: usize = 6;

/// Local face normals of a d6 and the value printed on each face.
///
/// The enumeration order doubles as the tie-break order for face detection.
/// Opposite faces always sum to 7.
pub const D6_FACES: [(Vec3, u32); 6] = [
    (Vec3::Y, 1),
    (Vec3::NEG_Y, 6),
    (Vec3::Z, 2),
    (Vec3::NEG_Z, 5),
    (Vec3::X, 3),
    (Vec3::NEG_X, 4),
];

/// Clamp a requested die count into the supported range.
pub fn clamp_die_count(count: usize) -> usize {
    count.clamp(MIN_DICE, MAX_DICE)
}

/// Component attached to each die's rigid-body entity
#[derive(Component, Debug, Clone)]
pub struct Die {
    /// Position of this die in the session's ordered sequence
    pub index: usize,
    /// Visual counterpart; owned by the rendering layer, only written to here
    pub renderable: Option<Entity>,
    /// Face value recorded for the current roll, `None` until settled
    pub face_value: Option<u32>,
    /// Seconds the body's combined linear and angular speed has continuously
    /// stayed under the sleep speed limit
    pub rest_timer: f32,
}

impl Die {
    pub fn new(index: usize) -> Self {
        Self {
            index,
            renderable: None,
            face_value: None,
            rest_timer: 0.0,
        }
    }

    pub fn is_settled(&self) -> bool {
        self.face_value.is_some()
    }

    /// Forget everything recorded during the previous roll.
    pub fn clear_roll_state(&mut self) {
        self.face_value = None;
        self.rest_timer = 0.0;
    }

    /// Accumulate rest time; returns true once the body has been slow for
    /// at least `time_limit` seconds.
    pub fn track_rest(&mut self, speed: f32, dt: f32, speed_limit: f32, time_limit: f32) -> bool {
        if speed < speed_limit {
            self.rest_timer += dt;
        } else {
            self.rest_timer = 0.0;
        }
        self.rest_timer >= time_limit
    }
}

/// Static piece of the arena: floor, wall or ceiling
#[derive(Component, Debug, Clone, Copy, PartialEq)]
pub struct DiceBox {
    /// Full extents of the piece's cuboid
    pub size: Vec3,
    /// Invisible pieces only carry a collider
    pub visible: bool,
}

/// Result of one completed roll
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct RollOutcome {
    /// Face values in the order the dice settled
    pub values: Vec<u32>,
    pub total: u32,
}

impl RollOutcome {
    pub fn from_values(values: Vec<u32>) -> Self {
        let total = values.iter().sum();
        Self { values, total }
    }
}

impl std::fmt::Display for RollOutcome {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let values: Vec<String> = self.values.iter().map(|v| v.to_string()).collect();
        write!(f, "[{}] = {}", values.join(", "), self.total)
    }
}
