//! Rendering systems
//!
//! Visuals live on their own entities. Each die body gets a renderable when it
//! appears, the renderable follows the body every frame, and it is despawned
//! once its body is gone. Results are shown in the panel and printed to stdout.

use bevy::prelude::*;
use colored::Colorize;

use crate::dice3d::meshes::{create_d6, d6_pip_positions, PIP_RADIUS};
use crate::dice3d::types::*;

use super::setup::ResultsText;

/// Visual counterpart of a die body
#[derive(Component, Debug, Clone, Copy)]
pub struct DieRenderable {
    pub body: Entity,
}

/// Shared mesh and material handles for dice and the arena
#[derive(Resource)]
pub struct DiceAssets {
    pub die_mesh: Handle<Mesh>,
    pub die_material: Handle<StandardMaterial>,
    pub pip_mesh: Handle<Mesh>,
    pub pip_material: Handle<StandardMaterial>,
    pub floor_material: Handle<StandardMaterial>,
    pub wall_material: Handle<StandardMaterial>,
}

pub fn load_dice_assets(
    mut commands: Commands,
    config: Res<LoungeConfig>,
    mut meshes: ResMut<Assets<Mesh>>,
    mut materials: ResMut<Assets<StandardMaterial>>,
) {
    let size = config.dice.size;
    let (die_mesh, _) = create_d6(size);

    commands.insert_resource(DiceAssets {
        die_mesh: meshes.add(die_mesh),
        die_material: materials.add(StandardMaterial {
            base_color: Color::srgb(0.95, 0.93, 0.88),
            perceptual_roughness: 0.35,
            reflectance: 0.5,
            ..default()
        }),
        pip_mesh: meshes.add(Sphere::new(size * PIP_RADIUS)),
        pip_material: materials.add(StandardMaterial {
            base_color: Color::srgb(0.05, 0.05, 0.08),
            perceptual_roughness: 0.6,
            ..default()
        }),
        floor_material: materials.add(StandardMaterial {
            base_color: Color::srgb(0.12, 0.32, 0.2),
            perceptual_roughness: 0.9,
            ..default()
        }),
        wall_material: materials.add(StandardMaterial {
            base_color: Color::srgba(0.7, 0.85, 0.95, 0.3),
            alpha_mode: AlphaMode::Blend,
            reflectance: 0.8,
            perceptual_roughness: 0.1,
            ..default()
        }),
    });
}

/// Give visible arena pieces a mesh
pub fn decorate_arena(
    mut commands: Commands,
    assets: Res<DiceAssets>,
    mut meshes: ResMut<Assets<Mesh>>,
    pieces: Query<(Entity, &DiceBox), Added<DiceBox>>,
) {
    for (entity, piece) in pieces.iter() {
        if !piece.visible {
            continue;
        }
        // The floor is the only piece wider than it is tall
        let material = if piece.size.y < piece.size.x.min(piece.size.z) {
            assets.floor_material.clone()
        } else {
            assets.wall_material.clone()
        };
        commands.entity(entity).insert((
            Mesh3d(meshes.add(Cuboid::new(piece.size.x, piece.size.y, piece.size.z))),
            MeshMaterial3d(material),
        ));
    }
}

/// Spawn a renderable for every newly spawned die
pub fn spawn_die_renderables(
    mut commands: Commands,
    assets: Res<DiceAssets>,
    config: Res<LoungeConfig>,
    mut new_dice: Query<(Entity, &mut Die, &Transform), Added<Die>>,
) {
    let pips = d6_pip_positions(config.dice.size);

    for (body, mut die, transform) in new_dice.iter_mut() {
        let renderable = commands
            .spawn((
                Mesh3d(assets.die_mesh.clone()),
                MeshMaterial3d(assets.die_material.clone()),
                *transform,
                DieRenderable { body },
            ))
            .with_children(|parent| {
                for (position, _) in &pips {
                    parent.spawn((
                        Mesh3d(assets.pip_mesh.clone()),
                        MeshMaterial3d(assets.pip_material.clone()),
                        Transform::from_translation(*position),
                    ));
                }
            })
            .id();
        die.renderable = Some(renderable);
    }
}

/// Despawn renderables whose body no longer exists
pub fn cleanup_die_renderables(
    mut commands: Commands,
    renderables: Query<(Entity, &DieRenderable)>,
    dice: Query<(), With<Die>>,
) {
    for (entity, renderable) in renderables.iter() {
        if dice.get(renderable.body).is_err() {
            commands.entity(entity).despawn();
        }
    }
}

/// Copy each body's pose onto its renderable
pub fn sync_die_renderables(
    dice: Query<(&Die, &Transform), Changed<Transform>>,
    mut renderables: Query<&mut Transform, (With<DieRenderable>, Without<Die>)>,
) {
    for (die, body_transform) in dice.iter() {
        let Some(renderable) = die.renderable else {
            continue;
        };
        if let Ok(mut transform) = renderables.get_mut(renderable) {
            transform.translation = body_transform.translation;
            transform.rotation = body_transform.rotation;
        }
    }
}

/// Text shown in the results panel for the current session state
pub fn results_panel_text(session: &RollSession) -> String {
    let values: Vec<String> = session.results.iter().map(|v| v.to_string()).collect();

    if session.is_rolling() {
        if values.is_empty() {
            return "Rolling\u{2026}".to_string();
        }
        return format!(
            "Rolling\u{2026}\n{} = {}",
            values.join(" + "),
            session.running_total()
        );
    }

    if values.is_empty() {
        return "Total: \u{2013}".to_string();
    }
    format!("{}\nTotal: {}", values.join(" + "), session.running_total())
}

/// System to update the results display text
pub fn update_results_display(
    session: Res<RollSession>,
    mut text_query: Query<&mut Text, With<ResultsText>>,
) {
    if !session.is_changed() {
        return;
    }
    for mut text in text_query.iter_mut() {
        text.0 = results_panel_text(&session);
    }
}

/// Print each completed roll to stdout
pub fn print_roll_report(mut completed: MessageReader<RollCompleted>) {
    for RollCompleted(outcome) in completed.read() {
        let values: Vec<String> = outcome
            .values
            .iter()
            .map(|v| v.to_string().bright_white().bold().to_string())
            .collect();
        println!(
            "{} {} {} {}",
            "Rolled".cyan().bold(),
            values.join(", "),
            "=".dimmed(),
            outcome.total.to_string().green().bold()
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_panel() {
        let session = RollSession::new(2);
        assert_eq!(results_panel_text(&session), "Total: \u{2013}");
    }

    #[test]
    fn test_rolling_panel_shows_running_values() {
        let mut session = RollSession::new(3);
        session.begin(0.0);
        assert_eq!(results_panel_text(&session), "Rolling\u{2026}");
        session.record(4);
        session.record(2);
        assert_eq!(results_panel_text(&session), "Rolling\u{2026}\n4 + 2 = 6");
    }

    #[test]
    fn test_completed_panel_shows_total() {
        let mut session = RollSession::new(2);
        session.begin(0.0);
        session.record(6);
        session.record(5);
        assert_eq!(results_panel_text(&session), "6 + 5\nTotal: 11");
    }
}
