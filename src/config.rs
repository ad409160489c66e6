#[cfg(feature = "config_file")]
use serde::{Deserialize, Serialize};
#[cfg(feature = "config_file")]
use std::{fs, path::Path};

/// Scene size (simulation units, origin top-left, +Y down)
pub const WIDTH: f32 = 1280.0;
pub const HEIGHT: f32 = 720.0;

/// Physics tunables (per rendered frame unless noted)
pub const GRAVITY: f32 = 0.15;
pub const FRICTION: f32 = 0.995;
/// true: bounce off the scene edges. false: cull bodies that leave.
pub const SCREEN_BOUNDS: bool = false;
/// Gravity is tuned for this display rate and rescaled to the measured one.
pub const REFERENCE_FPS: f32 = 144.0;

/// Population
pub const MAX_BODIES: usize = 300;
pub const SPAWN_SPREAD: f32 = 0.8;
pub const BODY_RADIUS_MIN: f32 = 12.0;
pub const BODY_RADIUS_MAX: f32 = 22.0;
/// Spawn impulse spans (-x/2..x/2, -y/2..y/2)
pub const SPAWN_IMPULSE: [f32; 2] = [100.0, 200.0];
pub const BODY_ANGULAR_VELOCITY: f32 = 0.01;
/// Number of distinct body looks the renderer can pick from
pub const VISUAL_VARIANTS: usize = 6;

/// Wiper
pub const WIPER_FORCE: f32 = 150.0;
pub const WIPER_SPEED: f32 = 1.5;
pub const WIPER_PERIOD_MS: f64 = 1000.0;
pub const WIPER_LENGTH: f32 = HEIGHT * 0.8;
pub const WIPER_BASE_RADIUS: f32 = 5.0;
pub const WIPER_TIP_RADIUS: f32 = 3.0;

/// Substeps per frame scale with the wiper speed
pub const SUBSTEP_MULTIPLIER: f32 = 3.0;

/// Every simulation parameter in one place; handed to `Simulation::new`.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "config_file", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "config_file", serde(default))]
pub struct SimConfig {
    pub width: f32,
    pub height: f32,
    pub gravity: f32,
    pub friction: f32,
    pub screen_bounds: bool,
    pub reference_fps: f32,
    pub max_bodies: usize,
    pub spawn_spread: f32,
    pub body_radius_min: f32,
    pub body_radius_max: f32,
    pub spawn_impulse: [f32; 2],
    pub body_angular_velocity: f32,
    pub visual_variants: usize,
    pub wiper_force: f32,
    pub wiper_speed: f32,
    pub wiper_period_ms: f64,
    pub wiper_length: f32,
    pub wiper_base_radius: f32,
    pub wiper_tip_radius: f32,
    pub substep_multiplier: f32,
    /// Fixed seed for reproducible spawns; `None` seeds from the OS.
    pub seed: Option<u64>,
}

impl Default for SimConfig {
    fn default() -> Self {
        Self {
            width: WIDTH,
            height: HEIGHT,
            gravity: GRAVITY,
            friction: FRICTION,
            screen_bounds: SCREEN_BOUNDS,
            reference_fps: REFERENCE_FPS,
            max_bodies: MAX_BODIES,
            spawn_spread: SPAWN_SPREAD,
            body_radius_min: BODY_RADIUS_MIN,
            body_radius_max: BODY_RADIUS_MAX,
            spawn_impulse: SPAWN_IMPULSE,
            body_angular_velocity: BODY_ANGULAR_VELOCITY,
            visual_variants: VISUAL_VARIANTS,
            wiper_force: WIPER_FORCE,
            wiper_speed: WIPER_SPEED,
            wiper_period_ms: WIPER_PERIOD_MS,
            wiper_length: WIPER_LENGTH,
            wiper_base_radius: WIPER_BASE_RADIUS,
            wiper_tip_radius: WIPER_TIP_RADIUS,
            substep_multiplier: SUBSTEP_MULTIPLIER,
            seed: None,
        }
    }
}

impl SimConfig {
    /// Divisor applied to velocities during integration.
    pub fn step_division(&self) -> f32 {
        self.substep_multiplier * self.wiper_speed
    }

    /// Substeps per frame. A fractional division still runs a whole extra
    /// substep (4.5 runs 5 times), each integrating by `v / 4.5`.
    pub fn substeps(&self) -> u32 {
        let div = self.step_division();
        if div.is_finite() && div > 0.0 {
            div.ceil() as u32
        } else {
            0
        }
    }

    /// Human-readable warnings; an empty list means the config looks sane.
    pub fn validate(&self) -> Vec<String> {
        let mut w = Vec::new();
        if self.width <= 0.0 || self.height <= 0.0 {
            w.push(format!(
                "scene size {}x{} must be positive",
                self.width, self.height
            ));
        }
        if !(self.friction > 0.0 && self.friction <= 1.0) {
            w.push(format!(
                "friction {} outside (0, 1] (values above 1 add energy)",
                self.friction
            ));
        }
        if self.body_radius_min <= 0.0 {
            w.push("body_radius_min must be > 0".into());
        }
        if self.body_radius_max <= self.body_radius_min {
            w.push(format!(
                "body radius range [{}, {}) is empty",
                self.body_radius_min, self.body_radius_max
            ));
        }
        if self.substeps() == 0 {
            w.push(format!(
                "substep_multiplier * wiper_speed = {} runs no substeps",
                self.step_division()
            ));
        }
        if self.wiper_length <= 0.0 {
            w.push("wiper_length must be > 0".into());
        }
        if self.wiper_period_ms <= 0.0 {
            w.push("wiper_period_ms must be > 0".into());
        }
        if self.visual_variants == 0 {
            w.push("visual_variants must be >= 1".into());
        }
        if self.reference_fps <= 0.0 {
            w.push("reference_fps must be > 0".into());
        }
        w
    }
}

#[cfg(feature = "config_file")]
impl SimConfig {
    pub fn load_from_file(path: impl AsRef<Path>) -> Result<Self, String> {
        let data = fs::read_to_string(&path).map_err(|e| format!("read config: {e}"))?;
        Self::from_json_str(&data)
    }

    pub fn from_json_str(data: &str) -> Result<Self, String> {
        serde_json::from_str(data).map_err(|e| format!("parse JSON: {e}"))
    }

    pub fn load_or_default(path: impl AsRef<Path>) -> (Self, Option<String>) {
        match Self::load_from_file(&path) {
            Ok(cfg) => (cfg, None),
            Err(e) => (Self::default(), Some(e)),
        }
    }
}
