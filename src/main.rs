// Hide console window on Windows for release builds (GUI app).
#![cfg_attr(all(windows, not(debug_assertions)), windows_subsystem = "windows")]

use std::path::PathBuf;

use bevy::prelude::*;
use bevy_rapier3d::prelude::*;
use clap::Parser;

use dicelounge::dice3d::{clamp_die_count, LoungeConfig, LoungeViewPlugin, RollEnginePlugin};

/// Dice Lounge - roll a handful of physics-driven d6
#[derive(Parser)]
#[command(name = "dicelounge")]
#[command(author, version, about = "Dice Lounge - physics-driven d6 roller")]
struct Cli {
    /// Number of dice on the table (1-6)
    #[arg(short, long)]
    dice: Option<usize>,

    /// Seed for reproducible throws
    #[arg(short, long)]
    seed: Option<u64>,

    /// Config file (.ron or .json)
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Log filter passed to the log plugin
    #[arg(long, default_value = "info,wgpu=error,naga=warn")]
    log_filter: String,
}

fn main() {
    let cli = Cli::parse();

    let mut app = App::new();
    app.add_plugins(
        DefaultPlugins
            .set(WindowPlugin {
                primary_window: Some(Window {
                    title: "Dice Lounge".to_string(),
                    resolution: (1280u32, 720u32).into(),
                    ..default()
                }),
                ..default()
            })
            .set(bevy::log::LogPlugin {
                level: bevy::log::Level::INFO,
                filter: cli.log_filter.clone(),
                ..default()
            }),
    );

    // Loaded after the log plugin so a bad file shows up as a warning
    let mut config = match &cli.config {
        Some(path) => LoungeConfig::load_or_default(path),
        None => LoungeConfig::default(),
    };
    if let Some(dice) = cli.dice {
        config.dice.count = clamp_die_count(dice);
    }
    if cli.seed.is_some() {
        config.seed = cli.seed;
    }

    let step = config.physics.fixed_step_secs();

    app.insert_resource(ClearColor(Color::srgb(0.08, 0.09, 0.12)))
        .add_plugins(RapierPhysicsPlugin::<NoUserData>::default().in_fixed_schedule())
        .insert_resource(TimestepMode::Fixed { dt: step, substeps: 1 })
        .add_plugins(RollEnginePlugin::new(config))
        .add_plugins(LoungeViewPlugin)
        .run();
}
