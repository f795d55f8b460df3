//! Headless roll engine tests
//!
//! Drives the engine plugin without a renderer or physics world. Nothing
//! integrates the bodies, so launched dice keep their launch velocity until
//! the test stops them or the roll timeout resolves them.

use std::time::Duration;

use bevy::prelude::*;
use bevy::time::TimeUpdateStrategy;
use bevy_rapier3d::prelude::{Sleeping, Velocity};
use dicelounge::dice3d::types::ThrowSettings;
use dicelounge::dice3d::{
    Die, DieCountRequested, DieSettled, LoungeConfig, ResetRequested, RollCompleted, RollEnginePlugin,
    RollOutcome, RollRequested, RollSession, Throw,
};

#[derive(Resource, Default)]
struct Collected {
    completed: Vec<(RollOutcome, f32)>,
    settled: Vec<DieSettled>,
}

fn collect_messages(
    time: Res<Time<Fixed>>,
    mut completed: MessageReader<RollCompleted>,
    mut settled: MessageReader<DieSettled>,
    mut collected: ResMut<Collected>,
) {
    for RollCompleted(outcome) in completed.read() {
        collected.completed.push((outcome.clone(), time.elapsed_secs()));
    }
    collected.settled.extend(settled.read().copied());
}

fn engine_app(dice: usize, seed: u64) -> App {
    let mut config = LoungeConfig::default();
    config.dice.count = dice;
    config.seed = Some(seed);

    let mut app = App::new();
    app.add_plugins(MinimalPlugins)
        .insert_resource(TimeUpdateStrategy::ManualDuration(Duration::from_secs_f64(
            1.0 / 120.0,
        )))
        .add_plugins(RollEnginePlugin::new(config))
        .init_resource::<Collected>()
        .add_systems(Update, collect_messages);
    // Startup spawns the arena and the dice
    app.update();
    app
}

fn roll(app: &mut App) {
    app.world_mut().write_message(RollRequested {
        throw: Throw::Default,
    });
    app.update();
}

fn session(app: &App) -> &RollSession {
    app.world().resource::<RollSession>()
}

fn collected(app: &App) -> &Collected {
    app.world().resource::<Collected>()
}

fn dice_count(app: &mut App) -> usize {
    let world = app.world_mut();
    world.query::<&Die>().iter(world).count()
}

/// Run until a roll completes or `max_updates` frames have passed.
fn run_until_complete(app: &mut App, max_updates: usize) {
    for _ in 0..max_updates {
        if !collected(app).completed.is_empty() {
            return;
        }
        app.update();
    }
}

/// Overwrite the motion of the die with `index`.
fn set_die_motion(app: &mut App, index: usize, linvel: Vec3, angvel: Vec3, sleeping: bool) {
    let world = app.world_mut();
    let mut query = world.query::<(&Die, &mut Transform, &mut Velocity, &mut Sleeping)>();
    for (die, mut transform, mut velocity, mut sleep) in query.iter_mut(world) {
        if die.index != index {
            continue;
        }
        transform.translation.y = 0.45;
        velocity.linvel = linvel;
        velocity.angvel = angvel;
        sleep.sleeping = sleeping;
    }
}

fn stop_all_dice(app: &mut App) {
    let world = app.world_mut();
    let mut query = world.query::<(&mut Velocity, &mut Sleeping)>();
    for (mut velocity, mut sleeping) in query.iter_mut(world) {
        *velocity = Velocity::zero();
        sleeping.sleeping = true;
    }
}

#[test]
fn test_startup_spawns_configured_dice() {
    let mut app = engine_app(3, 1);
    assert_eq!(dice_count(&mut app), 3);
    assert!(!session(&app).is_rolling());
}

#[test]
fn test_roll_that_never_rests_completes_at_timeout() {
    for n in 1..=6 {
        let mut app = engine_app(n, 10 + n as u64);
        roll(&mut app);
        assert!(session(&app).is_rolling());
        let started_at = session(&app).started_at().expect("rolling");

        run_until_complete(&mut app, 1200);

        let collected = collected(&app);
        assert_eq!(collected.completed.len(), 1, "{} dice never completed", n);
        let (outcome, completed_at) = &collected.completed[0];
        assert_eq!(outcome.values.len(), n);
        assert!(outcome.values.iter().all(|v| (1..=6).contains(v)));
        assert_eq!(outcome.total, outcome.values.iter().sum::<u32>());
        assert!(*completed_at - started_at <= 8.0 + 0.05);
        assert!(collected.settled.iter().all(|s| s.forced));
        assert!(!session(&app).is_rolling());
    }
}

#[test]
fn test_forced_dice_are_frozen_on_the_floor() {
    let mut app = engine_app(2, 5);
    roll(&mut app);
    run_until_complete(&mut app, 1200);

    let world = app.world_mut();
    let mut query = world.query::<(&Die, &Transform, &Velocity, &Sleeping)>();
    for (die, transform, velocity, sleeping) in query.iter(world) {
        assert!(die.is_settled());
        assert!((transform.translation.y - 0.45).abs() < 1e-6);
        assert_eq!(velocity.linvel, Vec3::ZERO);
        assert_eq!(velocity.angvel, Vec3::ZERO);
        assert!(sleeping.sleeping);
    }
}

#[test]
fn test_resting_dice_complete_the_roll() {
    let mut app = engine_app(3, 2);
    roll(&mut app);
    stop_all_dice(&mut app);

    run_until_complete(&mut app, 20);

    let collected = collected(&app);
    assert_eq!(collected.completed.len(), 1);
    assert_eq!(collected.completed[0].0.values.len(), 3);
    assert_eq!(collected.settled.len(), 3);
    assert!(collected.settled.iter().all(|s| !s.forced));

    // Settle order follows the die index within a step
    let indices: Vec<usize> = collected.settled.iter().map(|s| s.index).collect();
    assert_eq!(indices, vec![0, 1, 2]);
}

#[test]
fn test_second_roll_while_rolling_is_ignored() {
    let mut app = engine_app(2, 3);
    roll(&mut app);
    let started_at = session(&app).started_at();

    for _ in 0..10 {
        app.update();
    }
    roll(&mut app);
    assert_eq!(session(&app).started_at(), started_at);
}

#[test]
fn test_can_roll_again_after_completion() {
    let mut app = engine_app(1, 4);
    roll(&mut app);
    stop_all_dice(&mut app);
    run_until_complete(&mut app, 20);
    assert!(!session(&app).is_rolling());

    roll(&mut app);
    assert!(session(&app).is_rolling());
    assert!(session(&app).results.is_empty());

    let world = app.world_mut();
    let mut query = world.query::<&Die>();
    assert!(query.iter(world).all(|die| !die.is_settled()));
}

#[test]
fn test_die_count_change_respawns_dice() {
    let mut app = engine_app(2, 6);
    app.world_mut().write_message(DieCountRequested(5));
    app.update();
    app.update();

    assert_eq!(session(&app).die_count, 5);
    assert_eq!(dice_count(&mut app), 5);

    let world = app.world_mut();
    let mut indices: Vec<usize> = world.query::<&Die>().iter(world).map(|d| d.index).collect();
    indices.sort();
    assert_eq!(indices, vec![0, 1, 2, 3, 4]);
}

#[test]
fn test_die_count_is_clamped() {
    let mut app = engine_app(2, 6);
    app.world_mut().write_message(DieCountRequested(40));
    app.update();
    app.update();
    assert_eq!(dice_count(&mut app), 6);
}

#[test]
fn test_reconfigure_ignored_while_rolling() {
    let mut app = engine_app(2, 7);
    roll(&mut app);

    app.world_mut().write_message(DieCountRequested(4));
    app.world_mut().write_message(ResetRequested);
    app.update();
    app.update();

    assert_eq!(session(&app).die_count, 2);
    assert_eq!(dice_count(&mut app), 2);
    assert!(session(&app).is_rolling());
}

#[test]
fn test_reset_clears_results() {
    let mut app = engine_app(2, 8);
    roll(&mut app);
    stop_all_dice(&mut app);
    run_until_complete(&mut app, 20);
    assert_eq!(session(&app).results.len(), 2);

    app.world_mut().write_message(ResetRequested);
    app.update();
    app.update();

    assert!(session(&app).results.is_empty());
    assert_eq!(dice_count(&mut app), 2);
}

#[test]
fn test_escaped_die_is_pushed_back() {
    let mut app = engine_app(1, 9);
    roll(&mut app);

    {
        let world = app.world_mut();
        let mut query = world.query::<(&mut Transform, &mut Velocity)>();
        for (mut transform, mut velocity) in query.iter_mut(world) {
            transform.translation.x = 3.2 + 5.0;
            velocity.linvel.x = 4.0;
        }
    }
    app.update();
    app.update();

    let world = app.world_mut();
    let mut query = world.query::<(&Die, &Transform, &Velocity)>();
    for (_, transform, velocity) in query.iter(world) {
        assert_eq!(transform.translation.x, 3.2);
        assert!(velocity.linvel.x <= 0.0);
    }
}

#[test]
fn test_same_seed_same_forced_outcome() {
    let run = |seed| {
        let mut app = engine_app(4, seed);
        roll(&mut app);
        run_until_complete(&mut app, 1200);
        collected(&app).completed[0].0.clone()
    };
    assert_eq!(run(77), run(77));
}

#[test]
fn test_spinning_die_is_not_settled_naturally() {
    let mut app = engine_app(1, 12);
    roll(&mut app);
    set_die_motion(&mut app, 0, Vec3::ZERO, Vec3::new(10.0, 0.0, 10.0), false);

    // Well past the 0.6s rest window
    for _ in 0..240 {
        app.update();
    }
    assert!(collected(&app).settled.is_empty());
    assert!(session(&app).is_rolling());

    run_until_complete(&mut app, 1200);
    let collected = collected(&app);
    assert_eq!(collected.completed.len(), 1);
    assert_eq!(collected.settled.len(), 1);
    assert!(collected.settled[0].forced);
}

#[test]
fn test_timeout_appends_forced_after_natural() {
    let mut app = engine_app(3, 13);
    roll(&mut app);
    set_die_motion(&mut app, 0, Vec3::ZERO, Vec3::ZERO, true);

    for _ in 0..10 {
        app.update();
    }
    {
        let collected = collected(&app);
        assert_eq!(collected.settled.len(), 1);
        assert_eq!(collected.settled[0].index, 0);
        assert!(!collected.settled[0].forced);
        assert!(collected.completed.is_empty());
    }

    run_until_complete(&mut app, 1200);
    let collected = collected(&app);
    assert_eq!(collected.completed.len(), 1);
    assert_eq!(collected.settled.len(), 3);

    let indices: Vec<usize> = collected.settled.iter().map(|s| s.index).collect();
    assert_eq!(indices, vec![0, 1, 2]);
    let forced: Vec<bool> = collected.settled.iter().map(|s| s.forced).collect();
    assert_eq!(forced, vec![false, true, true]);

    let values: Vec<u32> = collected.settled.iter().map(|s| s.value).collect();
    assert_eq!(collected.completed[0].0.values, values);
}

#[test]
fn test_gesture_roll_shapes_launch() {
    let mut app = engine_app(2, 14);
    app.world_mut().write_message(RollRequested {
        throw: Throw::Gesture {
            direction: Vec2::X,
            strength: 1.15,
            lift: 1.5,
        },
    });
    app.update();
    assert!(session(&app).is_rolling());

    let settings = ThrowSettings::default();
    let force = settings.base_force * 1.15;
    let half_jitter = settings.horizontal_jitter / 2.0;
    let half_spin = settings.gesture_spin_range / 2.0;

    let world = app.world_mut();
    let mut query = world.query::<(&Die, &Velocity)>();
    let mut launched = 0;
    for (die, velocity) in query.iter(world) {
        assert!(!die.is_settled());
        assert!(velocity.linvel.x >= force - half_jitter && velocity.linvel.x < force + half_jitter);
        assert!(velocity.linvel.z.abs() <= half_jitter);
        assert!(velocity.linvel.y >= 6.0 * 1.5 && velocity.linvel.y < 8.0 * 1.5);
        assert!(velocity.angvel.abs().max_element() <= half_spin);
        launched += 1;
    }
    assert_eq!(launched, 2);
}
