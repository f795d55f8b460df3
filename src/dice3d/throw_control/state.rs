//! Throw Control State
//!
//! Contains the throw description handed to the launcher and the resource
//! tracking an in-progress pointer swipe.

use bevy::prelude::*;

use crate::dice3d::types::ThrowSettings;

/// Direction of the default throw in the XZ plane (toward the viewer).
pub const DEFAULT_THROW_DIRECTION: Vec2 = Vec2::new(0.0, 1.0);

/// How the dice are thrown.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Throw {
    /// No gesture: straight toward the viewer with full spin.
    Default,
    /// Swipe-shaped throw. `direction` is a unit vector in the XZ plane
    /// (`x` → world X, `y` → world Z).
    Gesture {
        direction: Vec2,
        strength: f32,
        lift: f32,
    },
}

impl Throw {
    /// Build a gesture throw from a drag direction, drag length and the
    /// upward component of the drag (screen pixels, up positive).
    pub fn from_drag(direction: Vec2, drag_distance: f32, vertical: f32, settings: &ThrowSettings) -> Self {
        let direction = direction.try_normalize().unwrap_or(DEFAULT_THROW_DIRECTION);
        let strength = (drag_distance / settings.strength_divisor)
            .clamp(settings.strength_min, settings.strength_max);
        let lift = (1.0 + vertical / settings.lift_divisor).clamp(settings.lift_min, settings.lift_max);
        Throw::Gesture {
            direction,
            strength,
            lift,
        }
    }

    pub fn direction(&self) -> Vec2 {
        match self {
            Throw::Default => DEFAULT_THROW_DIRECTION,
            Throw::Gesture { direction, .. } => direction.try_normalize().unwrap_or(DEFAULT_THROW_DIRECTION),
        }
    }

    pub fn strength(&self) -> f32 {
        match self {
            Throw::Default => 1.0,
            Throw::Gesture { strength, .. } => *strength,
        }
    }

    pub fn lift(&self) -> f32 {
        match self {
            Throw::Default => 1.0,
            Throw::Gesture { lift, .. } => *lift,
        }
    }

    /// Full width of the angular velocity range; gestured throws spin calmer.
    pub fn spin_range(&self, settings: &ThrowSettings) -> f32 {
        match self {
            Throw::Default => settings.default_spin_range,
            Throw::Gesture { .. } => settings.gesture_spin_range,
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Throw::Default => "default",
            Throw::Gesture { .. } => "gesture",
        }
    }
}

/// A finished pointer drag in screen space, `delta.y` pointing up.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Swipe {
    pub delta: Vec2,
}

impl Swipe {
    /// Window coordinates grow downward; flip so that dragging up is positive.
    pub fn from_screen(start: Vec2, end: Vec2) -> Self {
        Self {
            delta: Vec2::new(end.x - start.x, start.y - end.y),
        }
    }

    pub fn distance(&self) -> f32 {
        self.delta.length()
    }

    /// Whether the drag is long enough to shape the throw.
    pub fn is_gesture(&self, settings: &ThrowSettings) -> bool {
        self.distance() > settings.drag_threshold
    }

    /// Turn the swipe into a throw. Taps shorter than the drag threshold
    /// carry no direction and fall back to the default throw.
    pub fn to_throw(&self, settings: &ThrowSettings) -> Throw {
        if !self.is_gesture(settings) {
            return Throw::Default;
        }
        Throw::from_drag(self.delta, self.distance(), self.delta.y, settings)
    }
}

/// Resource tracking the pointer drag that may become a throw
#[derive(Resource, Debug, Default)]
pub struct SwipeState {
    /// Screen position where the drag started, if one is in progress
    pub start: Option<Vec2>,
}
