//! Dice roll systems
//!
//! Launching rolls, reconfiguring the set of dice, and the per-step chain
//! that keeps dice in the arena, detects settled dice and enforces the roll
//! timeout.

use bevy::prelude::*;
use bevy_rapier3d::prelude::*;

use crate::dice3d::physics::{ArenaBounds, DieBody, RapierBody};
use crate::dice3d::settle::{force_settle_die, settle_die};
use crate::dice3d::throw_control::{launch_die, plan_launch};
use crate::dice3d::types::*;

use super::setup::spawn_dice;

type DieBodyQuery<'w, 's> =
    Query<'w, 's, (Entity, &'static mut Die, &'static mut Transform, &'static mut Velocity, &'static mut Sleeping)>;

/// Entities of all dice, ordered by their index in the session.
fn dice_in_order(dice: &DieBodyQuery) -> Vec<Entity> {
    let mut order: Vec<(usize, Entity)> = dice.iter().map(|(entity, die, ..)| (die.index, entity)).collect();
    order.sort_unstable();
    order.into_iter().map(|(_, entity)| entity).collect()
}

/// Apply the world gravity from config to Rapier's context
pub fn configure_gravity(
    config: Res<LoungeConfig>,
    mut rapier_config: Query<&mut RapierConfiguration, Added<RapierConfiguration>>,
) {
    for mut rapier in rapier_config.iter_mut() {
        rapier.gravity = Vec3::Y * config.physics.gravity;
    }
}

/// Cap how far the fixed loop may fall behind in a single frame
pub fn configure_clock(config: Res<LoungeConfig>, mut time: ResMut<Time<Virtual>>) {
    time.set_max_delta(std::time::Duration::from_secs_f64(
        config.physics.max_frame_delta_secs(),
    ));
}

/// Start a roll for each request received while idle
pub fn handle_roll_requests(
    mut requests: MessageReader<RollRequested>,
    time: Res<Time<Fixed>>,
    config: Res<LoungeConfig>,
    mut session: ResMut<RollSession>,
    mut rng: ResMut<DiceRng>,
    mut dice: DieBodyQuery,
) {
    for request in requests.read() {
        if !session.begin(time.elapsed_secs()) {
            debug!("Roll request ignored: dice are still rolling");
            continue;
        }

        let count = session.die_count;
        info!("Rolling {} dice ({} throw)", count, request.throw.label());

        for entity in dice_in_order(&dice) {
            let Ok((_, mut die, transform, velocity, sleeping)) = dice.get_mut(entity) else {
                continue;
            };
            let state = plan_launch(&request.throw, die.index, count, &config.throw, &mut rng.0);
            let mut body = RapierBody::new(transform, velocity, sleeping);
            launch_die(&mut die, &mut body, &state);
        }
    }
}

/// Respawn the dice on a count change or reset, unless a roll is in flight
pub fn handle_reconfigure_requests(
    mut commands: Commands,
    mut count_requests: MessageReader<DieCountRequested>,
    mut reset_requests: MessageReader<ResetRequested>,
    config: Res<LoungeConfig>,
    mut session: ResMut<RollSession>,
    mut rng: ResMut<DiceRng>,
    dice: Query<Entity, With<Die>>,
) {
    let mut respawn = false;

    for DieCountRequested(count) in count_requests.read() {
        match session.request_die_count(*count) {
            Some(clamped) => {
                info!("Die count set to {}", clamped);
                respawn = true;
            }
            None => debug!("Die count change to {} ignored while rolling", count),
        }
    }

    for _ in reset_requests.read() {
        if session.reset() {
            respawn = true;
        } else {
            debug!("Reset ignored while rolling");
        }
    }

    if !respawn {
        return;
    }

    for entity in dice.iter() {
        commands.entity(entity).despawn();
    }
    spawn_dice(&mut commands, &config, session.die_count, &mut rng.0);
}

/// Push dice that escaped the arena back inside
pub fn enforce_arena_bounds(
    bounds: Res<ArenaBounds>,
    mut dice: Query<(&Die, &mut Transform, &mut Velocity, &mut Sleeping)>,
) {
    for (die, transform, velocity, sleeping) in dice.iter_mut() {
        let mut body = RapierBody::new(transform, velocity, sleeping);
        if bounds.enforce(&mut body) {
            debug!("Die {} pushed back inside the arena", die.index);
        }
    }
}

/// Settle every die that came to rest and complete the roll once all have
pub fn detect_settled_dice(
    time: Res<Time>,
    config: Res<LoungeConfig>,
    mut session: ResMut<RollSession>,
    mut dice: DieBodyQuery,
    mut settled: MessageWriter<DieSettled>,
    mut completed: MessageWriter<RollCompleted>,
) {
    if !session.is_rolling() {
        return;
    }

    let dt = time.delta_secs();
    let floor = config.dice.floor_rest_height();

    for entity in dice_in_order(&dice) {
        let Ok((entity, mut die, transform, velocity, sleeping)) = dice.get_mut(entity) else {
            continue;
        };
        if die.is_settled() {
            continue;
        }

        let mut body = RapierBody::new(transform, velocity, sleeping);
        let resting = die.track_rest(
            body.speed(),
            dt,
            config.dice.sleep_speed_limit,
            config.dice.sleep_time_limit,
        ) || body.is_sleeping();
        if !resting {
            continue;
        }

        let Some(value) = settle_die(&mut die, &mut body, floor) else {
            continue;
        };
        info!("Die {} settled on {}", die.index, value);
        settled.write(DieSettled {
            die: entity,
            index: die.index,
            value,
            forced: false,
        });

        if let Some(outcome) = session.record(value) {
            info!("Roll complete: {}", outcome);
            completed.write(RollCompleted(outcome));
            return;
        }
    }
}

/// Force-resolve every unsettled die once the roll has run too long
pub fn enforce_roll_timeout(
    time: Res<Time>,
    config: Res<LoungeConfig>,
    mut session: ResMut<RollSession>,
    mut dice: DieBodyQuery,
    mut settled: MessageWriter<DieSettled>,
    mut completed: MessageWriter<RollCompleted>,
) {
    if !session.is_timed_out(time.elapsed_secs(), config.physics.roll_timeout_secs) {
        return;
    }

    warn!(
        "Roll timed out after {:.1}s with {}/{} dice settled; forcing the rest",
        config.physics.roll_timeout_secs,
        session.results.len(),
        session.die_count
    );

    let floor = config.dice.floor_rest_height();
    for entity in dice_in_order(&dice) {
        let Ok((entity, mut die, transform, velocity, sleeping)) = dice.get_mut(entity) else {
            continue;
        };
        let mut body = RapierBody::new(transform, velocity, sleeping);
        let Some(value) = force_settle_die(&mut die, &mut body, floor) else {
            continue;
        };
        info!("Die {} forced to {}", die.index, value);
        settled.write(DieSettled {
            die: entity,
            index: die.index,
            value,
            forced: true,
        });

        if let Some(outcome) = session.record(value) {
            info!("Roll complete: {}", outcome);
            completed.write(RollCompleted(outcome));
            return;
        }
    }

    // Fewer live dice than the session expects; close the roll anyway
    if let Some(outcome) = session.finish() {
        info!("Roll complete: {}", outcome);
        completed.write(RollCompleted(outcome));
    }
}
