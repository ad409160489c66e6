use bevy::prelude::*;
use tracing::info;

use crate::physics::simulation::{FrameReport, Simulation};

/// The simulation lives in one resource; only `step_simulation` and the
/// input toggles mutate it.
#[derive(Resource)]
pub struct SimulationState(pub Simulation);

/// Counters from the most recent frame.
#[derive(Resource, Default, Debug, Clone, Copy)]
pub struct LastFrameReport(pub FrameReport);

/// Run one simulation frame per rendered frame (Update runs once per frame).
pub fn step_simulation(
    time: Res<Time>,
    mut sim: ResMut<SimulationState>,
    mut last: ResMut<LastFrameReport>,
) {
    let now_ms = time.elapsed_secs_f64() * 1000.0;
    last.0 = sim.0.frame(now_ms);
}

/// Press B to switch between bouncing off the edges and culling.
pub fn toggle_screen_bounds(keys: Res<ButtonInput<KeyCode>>, mut sim: ResMut<SimulationState>) {
    if keys.just_pressed(KeyCode::KeyB) {
        let enabled = !sim.0.screen_bounds();
        sim.0.set_screen_bounds(enabled);
        info!(enabled, "screen bounds toggled");
    }
}

/// Native-only quit: press Esc or Q to exit the app.
/// (No-op on wasm32.)
pub fn exit_on_esc_or_q_if_native(
    keys: Res<ButtonInput<KeyCode>>,
    mut exit: MessageWriter<AppExit>,
) {
    if cfg!(not(target_arch = "wasm32")) && keys.any_just_pressed([KeyCode::Escape, KeyCode::KeyQ]) {
        exit.write(AppExit::Success);
    }
}
