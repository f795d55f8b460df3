//! Scene setup systems
//!
//! Spawns the arena colliders and the dice bodies, plus the camera, lights
//! and results panel used by the windowed app.

use bevy::prelude::*;
use bevy_rapier3d::prelude::*;
use rand::Rng;

use crate::dice3d::meshes::create_d6;
use crate::dice3d::throw_control::rest_position;
use crate::dice3d::types::*;

/// Marker for the results panel text
#[derive(Component)]
pub struct ResultsText;

/// Marker for the scene camera
#[derive(Component)]
pub struct MainCamera;

/// Center and full size of each arena piece: floor, four walls, ceiling.
///
/// The floor's top face sits at y = 0 and the walls' inner faces sit on the
/// bounds half extents.
pub fn arena_layout(arena: &ArenaSettings) -> Vec<(Vec3, DiceBox)> {
    let t = arena.wall_thickness;
    let span_x = arena.half_extent_x * 2.0 + t * 2.0;
    let span_z = arena.half_extent_z * 2.0 + t * 2.0;
    let wall_y = arena.wall_height / 2.0;
    let wall_x = arena.half_extent_x + t / 2.0;
    let wall_z = arena.half_extent_z + t / 2.0;

    let piece = |size: Vec3, visible: bool| DiceBox { size, visible };

    vec![
        // Floor
        (
            Vec3::new(0.0, -0.25, 0.0),
            piece(Vec3::new(span_x, 0.5, span_z), true),
        ),
        // Back and front walls
        (
            Vec3::new(0.0, wall_y, -wall_z),
            piece(Vec3::new(span_x, arena.wall_height, t), true),
        ),
        (
            Vec3::new(0.0, wall_y, wall_z),
            piece(Vec3::new(span_x, arena.wall_height, t), true),
        ),
        // Side walls
        (
            Vec3::new(-wall_x, wall_y, 0.0),
            piece(Vec3::new(t, arena.wall_height, span_z), true),
        ),
        (
            Vec3::new(wall_x, wall_y, 0.0),
            piece(Vec3::new(t, arena.wall_height, span_z), true),
        ),
        // Invisible ceiling to keep dice from flying off
        (
            Vec3::new(0.0, arena.ceiling_height + t / 2.0, 0.0),
            piece(Vec3::new(span_x, t, span_z), false),
        ),
    ]
}

/// Spawn the fixed colliders that make up the arena
pub fn spawn_arena(mut commands: Commands, config: Res<LoungeConfig>) {
    for (center, piece) in arena_layout(&config.arena) {
        let half = piece.size / 2.0;
        commands.spawn((
            Transform::from_translation(center),
            Collider::cuboid(half.x, half.y, half.z),
            RigidBody::Fixed,
            Restitution::coefficient(config.dice.restitution),
            Friction::coefficient(config.dice.friction),
            piece,
        ));
    }
}

/// Spawn the configured number of dice once at startup
pub fn spawn_initial_dice(
    mut commands: Commands,
    config: Res<LoungeConfig>,
    session: Res<RollSession>,
    mut rng: ResMut<DiceRng>,
) {
    spawn_dice(&mut commands, &config, session.die_count, &mut rng.0);
}

/// Spawn `count` die bodies in the resting layout
pub fn spawn_dice(commands: &mut Commands, config: &LoungeConfig, count: usize, rng: &mut impl Rng) {
    let dice = &config.dice;
    for index in 0..count {
        let position = rest_position(index, count, dice, rng);
        spawn_die(commands, dice, index, position);
    }
    info!("Spawned {} dice", count);
}

/// Spawn a single die rigid body. The rendering layer attaches visuals.
pub fn spawn_die(commands: &mut Commands, dice: &DiceSettings, index: usize, position: Vec3) -> Entity {
    let (_, collider) = create_d6(dice.size);

    commands
        .spawn((
            Die::new(index),
            Transform::from_translation(position),
            RigidBody::Dynamic,
            collider,
            ColliderMassProperties::Mass(dice.mass),
            Velocity::zero(),
            Damping {
                linear_damping: dice.linear_damping,
                angular_damping: dice.angular_damping,
            },
            Restitution::coefficient(dice.restitution),
            Friction::coefficient(dice.friction),
            Sleeping {
                normalized_linear_threshold: dice.sleep_speed_limit,
                angular_threshold: dice.sleep_speed_limit,
                sleeping: false,
            },
            Ccd::enabled(),
        ))
        .id()
}

/// Camera, lights and the results panel
pub fn setup_scene(mut commands: Commands) {
    commands.spawn((
        Camera3d::default(),
        Transform::from_xyz(0.0, 6.5, 9.5).looking_at(Vec3::new(0.0, 1.2, 0.0), Vec3::Y),
        MainCamera,
    ));

    commands.spawn((
        DirectionalLight {
            illuminance: 10000.0,
            shadows_enabled: true,
            ..default()
        },
        Transform::from_xyz(5.0, 10.0, 5.0).looking_at(Vec3::ZERO, Vec3::Y),
    ));

    commands.spawn((
        PointLight {
            intensity: 400_000.0,
            range: 30.0,
            ..default()
        },
        Transform::from_xyz(-4.0, 6.0, 3.0),
    ));

    commands.insert_resource(AmbientLight {
        color: Color::WHITE,
        brightness: 300.0,
        ..default()
    });

    commands.spawn((
        Text::new("Total: \u{2013}"),
        TextFont {
            font_size: 24.0,
            ..default()
        },
        TextColor(Color::WHITE),
        Node {
            position_type: PositionType::Absolute,
            top: Val::Px(12.0),
            left: Val::Px(12.0),
            ..default()
        },
        ResultsText,
    ));
}
