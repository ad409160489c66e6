use bevy::prelude::*;
use std::path::{Path, PathBuf};
use tracing::warn;

pub mod body;
pub mod debug;
pub mod render;
pub mod simulation;
pub mod systems;
pub mod timing;
pub mod vector;
pub mod wiper;

pub use body::Body;
pub use render::Renderer;
pub use simulation::{Contact, FrameReport, Simulation, SubstepReport};
pub use vector::Vector2;
pub use wiper::{Wiper, WiperRegion};

use crate::config::SimConfig;
use systems::{
    LastFrameReport, SimulationState, exit_on_esc_or_q_if_native, step_simulation,
    toggle_screen_bounds,
};

/// Owns the simulation and steps it once per frame. Needs nothing beyond
/// `Time`, so it also runs under `MinimalPlugins`.
#[derive(Default)]
pub struct SimulationPlugin {
    pub config: SimConfig,
    /// JSON file overriding `config`; falls back to `config` if unreadable.
    pub config_path: Option<PathBuf>,
}

impl SimulationPlugin {
    fn resolve_config(&self) -> SimConfig {
        match &self.config_path {
            Some(path) => load_config(path, &self.config),
            None => self.config.clone(),
        }
    }
}

#[cfg(feature = "config_file")]
fn load_config(path: &Path, fallback: &SimConfig) -> SimConfig {
    match SimConfig::load_from_file(path) {
        Ok(cfg) => cfg,
        Err(e) => {
            warn!(path = %path.display(), "{e}; using built-in config");
            fallback.clone()
        }
    }
}

#[cfg(not(feature = "config_file"))]
fn load_config(path: &Path, fallback: &SimConfig) -> SimConfig {
    warn!(path = %path.display(), "built without config_file; ignoring");
    fallback.clone()
}

impl Plugin for SimulationPlugin {
    fn build(&self, app: &mut App) {
        let config = self.resolve_config();
        for w in config.validate() {
            warn!("config: {w}");
        }
        app.insert_resource(SimulationState(Simulation::new(config)))
            .init_resource::<LastFrameReport>()
            .add_systems(Update, step_simulation);
    }
}

/// Window-side pieces: camera, gizmo drawing, keyboard shortcuts.
pub struct SceneDrawPlugin;

impl Plugin for SceneDrawPlugin {
    fn build(&self, app: &mut App) {
        app.add_systems(Startup, debug::spawn_camera).add_systems(
            Update,
            (
                toggle_screen_bounds.before(step_simulation),
                exit_on_esc_or_q_if_native,
                // update-then-render within the same frame
                debug::draw_scene.after(step_simulation),
            ),
        );
    }
}
