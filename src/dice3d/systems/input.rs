//! Input handling systems
//!
//! Keyboard shortcuts and the pointer swipe are turned into roll and
//! reconfiguration messages; the roll engine decides whether to act on them.

use bevy::prelude::*;
use bevy::window::PrimaryWindow;

use crate::dice3d::throw_control::{Swipe, SwipeState, Throw};
use crate::dice3d::types::*;

const DIE_COUNT_KEYS: [(KeyCode, usize); 6] = [
    (KeyCode::Digit1, 1),
    (KeyCode::Digit2, 2),
    (KeyCode::Digit3, 3),
    (KeyCode::Digit4, 4),
    (KeyCode::Digit5, 5),
    (KeyCode::Digit6, 6),
];

/// Space rolls, R resets, 1-6 pick the number of dice
pub fn handle_input(
    keyboard: Res<ButtonInput<KeyCode>>,
    mut rolls: MessageWriter<RollRequested>,
    mut resets: MessageWriter<ResetRequested>,
    mut counts: MessageWriter<DieCountRequested>,
) {
    if keyboard.just_pressed(KeyCode::Space) {
        rolls.write(RollRequested {
            throw: Throw::Default,
        });
    }

    if keyboard.just_pressed(KeyCode::KeyR) {
        resets.write(ResetRequested);
    }

    for (key, count) in DIE_COUNT_KEYS {
        if keyboard.just_pressed(key) {
            counts.write(DieCountRequested(count));
        }
    }
}

/// Track a left-button drag over the window and throw when it is released
pub fn handle_swipe_input(
    mouse: Res<ButtonInput<MouseButton>>,
    windows: Query<&Window, With<PrimaryWindow>>,
    config: Res<LoungeConfig>,
    mut swipe_state: ResMut<SwipeState>,
    mut rolls: MessageWriter<RollRequested>,
) {
    let Ok(window) = windows.single() else {
        return;
    };
    let cursor = window.cursor_position();

    if mouse.just_pressed(MouseButton::Left) {
        swipe_state.start = cursor;
    }

    if mouse.just_released(MouseButton::Left) {
        let Some(start) = swipe_state.start.take() else {
            return;
        };
        let swipe = Swipe::from_screen(start, cursor.unwrap_or(start));
        if !swipe.is_gesture(&config.throw) {
            debug!(
                "Drag of {:.0}px is a tap; using the default throw",
                swipe.distance()
            );
        }
        rolls.write(RollRequested {
            throw: swipe.to_throw(&config.throw),
        });
    }
}
