use ball_wiper::physics::{SceneDrawPlugin, SimulationPlugin};
use bevy::prelude::*;
use std::path::PathBuf;

/// Optional JSON config file (see `SimConfig`).
const CONFIG_ENV: &str = "BALL_WIPER_CONFIG";

fn main() {
    App::new()
        // Solid black background
        .insert_resource(ClearColor(Color::BLACK))
        // Bevy's core engine features
        .add_plugins(DefaultPlugins.set(WindowPlugin {
            primary_window: Some(Window {
                title: "ball wiper".into(),
                ..default()
            }),
            ..default()
        }))
        // Simulation stepping, then drawing + input
        .add_plugins(SimulationPlugin {
            config_path: std::env::var_os(CONFIG_ENV).map(PathBuf::from),
            ..default()
        })
        .add_plugins(SceneDrawPlugin)
        .run();
}
