use ball_wiper::config::SimConfig;
use ball_wiper::physics::SimulationPlugin;
use ball_wiper::physics::systems::{LastFrameReport, SimulationState};
use bevy::prelude::*;

fn test_app(config: SimConfig) -> App {
    let mut app = App::new();
    app.add_plugins(MinimalPlugins);
    // Headless: no window, no gizmos, only the stepping plugin
    app.add_plugins(SimulationPlugin {
        config,
        ..default()
    });
    app
}

#[test]
fn plugin_fills_population_at_build() {
    let app = test_app(SimConfig {
        max_bodies: 16,
        seed: Some(1),
        ..Default::default()
    });
    assert_eq!(app.world().resource::<SimulationState>().0.bodies().len(), 16);
}

#[test]
fn each_update_runs_one_frame_of_substeps() {
    let mut app = test_app(SimConfig {
        max_bodies: 16,
        seed: Some(1),
        ..Default::default()
    });

    app.update();
    let first = app.world().resource::<LastFrameReport>().0;
    assert_eq!(first.substeps, 5);
    assert_eq!(first.samples, 1);

    app.update();
    let second = app.world().resource::<LastFrameReport>().0;
    assert_eq!(second.samples, 2);

    let sim = &app.world().resource::<SimulationState>().0;
    assert!(!sim.bodies().is_empty());
    assert!(sim.bodies().len() <= 16);
}

#[test]
fn unreadable_config_path_falls_back() {
    let mut app = App::new();
    app.add_plugins(MinimalPlugins);
    app.add_plugins(SimulationPlugin {
        config: SimConfig {
            max_bodies: 3,
            seed: Some(2),
            ..Default::default()
        },
        config_path: Some("no/such/config.json".into()),
    });
    assert_eq!(app.world().resource::<SimulationState>().0.bodies().len(), 3);
}
