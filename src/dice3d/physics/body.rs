//! Rigid-body access for dice
//!
//! The roll engine never talks to Rapier directly. Everything it needs from a
//! body goes through [`DieBody`], which is implemented for the bevy_rapier3d
//! components of a die entity ([`RapierBody`]) and for a detached in-memory
//! state ([`BodyState`]).

use bevy::prelude::*;
use bevy_rapier3d::prelude::*;

/// Pose, motion and sleep state of one simulated die.
pub trait DieBody {
    fn translation(&self) -> Vec3;
    fn set_translation(&mut self, translation: Vec3);

    fn rotation(&self) -> Quat;
    fn set_rotation(&mut self, rotation: Quat);

    fn linear_velocity(&self) -> Vec3;
    fn set_linear_velocity(&mut self, linvel: Vec3);

    fn angular_velocity(&self) -> Vec3;
    fn set_angular_velocity(&mut self, angvel: Vec3);

    fn is_sleeping(&self) -> bool;
    fn wake_up(&mut self);
    fn sleep(&mut self);

    /// Zero linear and angular velocity.
    fn stop(&mut self) {
        self.set_linear_velocity(Vec3::ZERO);
        self.set_angular_velocity(Vec3::ZERO);
    }

    /// Combined linear and angular speed used for rest detection, so a die
    /// spinning in place or rocking on an edge is not considered at rest.
    fn speed(&self) -> f32 {
        (self.linear_velocity().length_squared() + self.angular_velocity().length_squared()).sqrt()
    }
}

/// Mutable view over the Rapier components of a die entity.
///
/// Holds `Mut` handles so that only actual writes flag the components as
/// changed; reading a resting body must not wake it up on the Rapier side.
pub struct RapierBody<'a> {
    transform: Mut<'a, Transform>,
    velocity: Mut<'a, Velocity>,
    sleeping: Mut<'a, Sleeping>,
}

impl<'a> RapierBody<'a> {
    pub fn new(
        transform: Mut<'a, Transform>,
        velocity: Mut<'a, Velocity>,
        sleeping: Mut<'a, Sleeping>,
    ) -> Self {
        Self {
            transform,
            velocity,
            sleeping,
        }
    }
}

impl DieBody for RapierBody<'_> {
    fn translation(&self) -> Vec3 {
        self.transform.translation
    }

    fn set_translation(&mut self, translation: Vec3) {
        self.transform.translation = translation;
    }

    fn rotation(&self) -> Quat {
        self.transform.rotation
    }

    fn set_rotation(&mut self, rotation: Quat) {
        self.transform.rotation = rotation;
    }

    fn linear_velocity(&self) -> Vec3 {
        self.velocity.linvel
    }

    fn set_linear_velocity(&mut self, linvel: Vec3) {
        self.velocity.linvel = linvel;
    }

    fn angular_velocity(&self) -> Vec3 {
        self.velocity.angvel
    }

    fn set_angular_velocity(&mut self, angvel: Vec3) {
        self.velocity.angvel = angvel;
    }

    fn is_sleeping(&self) -> bool {
        self.sleeping.sleeping
    }

    fn wake_up(&mut self) {
        if self.sleeping.sleeping {
            self.sleeping.sleeping = false;
        }
    }

    fn sleep(&mut self) {
        if !self.sleeping.sleeping {
            self.sleeping.sleeping = true;
        }
    }
}

/// A body detached from any physics world.
///
/// Nothing integrates it; it only holds what was last written. Useful for
/// planning poses and for exercising the roll logic without a world.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BodyState {
    pub translation: Vec3,
    pub rotation: Quat,
    pub linvel: Vec3,
    pub angvel: Vec3,
    pub sleeping: bool,
}

impl Default for BodyState {
    fn default() -> Self {
        Self {
            translation: Vec3::ZERO,
            rotation: Quat::IDENTITY,
            linvel: Vec3::ZERO,
            angvel: Vec3::ZERO,
            sleeping: false,
        }
    }
}

impl BodyState {
    pub fn at(translation: Vec3) -> Self {
        Self {
            translation,
            ..default()
        }
    }
}

impl DieBody for BodyState {
    fn translation(&self) -> Vec3 {
        self.translation
    }

    fn set_translation(&mut self, translation: Vec3) {
        self.translation = translation;
    }

    fn rotation(&self) -> Quat {
        self.rotation
    }

    fn set_rotation(&mut self, rotation: Quat) {
        self.rotation = rotation;
    }

    fn linear_velocity(&self) -> Vec3 {
        self.linvel
    }

    fn set_linear_velocity(&mut self, linvel: Vec3) {
        self.linvel = linvel;
    }

    fn angular_velocity(&self) -> Vec3 {
        self.angvel
    }

    fn set_angular_velocity(&mut self, angvel: Vec3) {
        self.angvel = angvel;
    }

    fn is_sleeping(&self) -> bool {
        self.sleeping
    }

    fn wake_up(&mut self) {
        self.sleeping = false;
    }

    fn sleep(&mut self) {
        self.sleeping = true;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_stop_zeroes_motion() {
        let mut body = BodyState {
            linvel: Vec3::new(1.0, 2.0, 3.0),
            angvel: Vec3::new(-4.0, 0.5, 9.0),
            ..default()
        };
        body.stop();
        assert_eq!(body.linvel, Vec3::ZERO);
        assert_eq!(body.angvel, Vec3::ZERO);
        assert_eq!(body.speed(), 0.0);
    }

    #[test]
    fn test_sleep_and_wake() {
        let mut body = BodyState::at(Vec3::Y);
        assert!(!body.is_sleeping());
        body.sleep();
        assert!(body.is_sleeping());
        body.wake_up();
        assert!(!body.is_sleeping());
    }

    #[test]
    fn test_speed_counts_spin() {
        let spinning = BodyState {
            angvel: Vec3::new(10.0, 0.0, 10.0),
            ..default()
        };
        assert!(spinning.speed() > 14.0);

        let moving = BodyState {
            linvel: Vec3::new(3.0, 0.0, 0.0),
            angvel: Vec3::new(0.0, 4.0, 0.0),
            ..default()
        };
        assert!((moving.speed() - 5.0).abs() < 1e-6);
    }
}
