//! Arena containment
//!
//! A safety net on top of the wall and ceiling colliders: fast bodies can
//! tunnel through thin walls, so after every physics step each die is pushed
//! back inside the play area with its velocity reflected inward.

use bevy::prelude::*;

use super::body::DieBody;
use crate::dice3d::types::ArenaSettings;

/// Rectangular horizontal limits plus a ceiling.
#[derive(Resource, Debug, Clone, Copy, PartialEq)]
pub struct ArenaBounds {
    pub limit_x: f32,
    pub limit_z: f32,
    pub ceiling: f32,
    pub wall_restitution: f32,
    pub ceiling_restitution: f32,
}

impl Default for ArenaBounds {
    fn default() -> Self {
        Self::from_settings(&ArenaSettings::default())
    }
}

impl ArenaBounds {
    pub fn from_settings(arena: &ArenaSettings) -> Self {
        Self {
            limit_x: arena.half_extent_x,
            limit_z: arena.half_extent_z,
            ceiling: arena.ceiling_height,
            wall_restitution: arena.wall_restitution,
            ceiling_restitution: arena.ceiling_restitution,
        }
    }

    /// Whether a point lies inside the box (sides and ceiling inclusive).
    pub fn contains(&self, point: Vec3) -> bool {
        point.x.abs() <= self.limit_x && point.z.abs() <= self.limit_z && point.y <= self.ceiling
    }

    /// Clamp the body back inside the arena.
    ///
    /// Returns true if anything was corrected. Bodies already inside are not
    /// written to at all.
    pub fn enforce(&self, body: &mut impl DieBody) -> bool {
        let position = body.translation();
        if self.contains(position) {
            return false;
        }

        let mut position = position;
        let mut velocity = body.linear_velocity();

        let (x, vx) = reflect_axis(position.x, velocity.x, self.limit_x, self.wall_restitution);
        let (z, vz) = reflect_axis(position.z, velocity.z, self.limit_z, self.wall_restitution);
        position.x = x;
        velocity.x = vx;
        position.z = z;
        velocity.z = vz;

        if position.y > self.ceiling {
            position.y = self.ceiling;
            velocity.y = -velocity.y.abs() * self.ceiling_restitution;
        }

        body.set_translation(position);
        body.set_linear_velocity(velocity);
        true
    }
}

/// Clamp one axis to `[-limit, limit]`, reflecting its velocity inward.
fn reflect_axis(position: f32, velocity: f32, limit: f32, restitution: f32) -> (f32, f32) {
    if position > limit {
        (limit, -velocity.abs() * restitution)
    } else if position < -limit {
        (-limit, velocity.abs() * restitution)
    } else {
        (position, velocity)
    }
}
