use bevy::prelude::*;

use crate::config::SimConfig;
use crate::physics::body::Body;
use crate::physics::render::Renderer;
use crate::physics::systems::SimulationState;
use crate::physics::vector::Vector2;

/// Distance between the cross lines that fill the wiper.
const WIPER_FILL_SPACING: f32 = 1.5;
const WIPER_COLOR: Color = Color::srgb(0.8, 0.6, 0.45);

/// Draws through immediate-mode gizmos. Simulation space has its origin at
/// the top-left with +Y down; Bevy 2D has it at the window centre with +Y up.
///
/// Gizmos only draw lines, so the wiper is filled with closely spaced
/// cross lines inside its outline.
pub struct GizmoRenderer<'a, 'w, 's> {
    gizmos: &'a mut Gizmos<'w, 's>,
    size: Vec2,
    variants: usize,
}

impl<'a, 'w, 's> GizmoRenderer<'a, 'w, 's> {
    pub fn new(gizmos: &'a mut Gizmos<'w, 's>, config: &SimConfig) -> Self {
        Self {
            gizmos,
            size: Vec2::new(config.width, config.height),
            variants: config.visual_variants,
        }
    }

    fn to_world(&self, p: Vector2) -> Vec2 {
        Vec2::new(p.x - self.size.x * 0.5, self.size.y * 0.5 - p.y)
    }
}

/// Stand-in for the ball textures: `variants` tints spread evenly round the
/// hue wheel.
pub fn variant_color(variant: usize, variants: usize) -> Color {
    let n = variants.max(1);
    let hue = 360.0 * (variant % n) as f32 / n as f32;
    Color::hsl(hue, 0.75, 0.6)
}

/// Cross lines from the long edge `quad[0]..quad[1]` to the opposite edge
/// `quad[3]..quad[2]`, base first and tip last, at most `spacing` apart.
pub fn wiper_fill_lines(quad: [Vector2; 4], spacing: f32) -> Vec<(Vector2, Vector2)> {
    let [a, b, c, d] = quad;
    let steps = (a.distance(b) / spacing).ceil().max(1.0) as usize;
    (0..=steps)
        .map(|i| {
            let t = i as f32 / steps as f32;
            (a.lerp(b, t), d.lerp(c, t))
        })
        .collect()
}

impl Renderer for GizmoRenderer<'_, '_, '_> {
    // gizmos are rebuilt every frame, nothing to clear
    fn clear(&mut self) {}

    fn draw_body(&mut self, body: &Body) {
        let center = self.to_world(body.pos);
        let color = variant_color(body.variant, self.variants);
        self.gizmos.circle_2d(center, body.r, color);
        // spoke so the spin is visible; y flip reverses the rotation sense
        let spoke = Vec2::from_angle(-body.angle) * body.r;
        self.gizmos.line_2d(center, center + spoke, color);
    }

    fn draw_wiper(&mut self, quad: [Vector2; 4]) {
        for (from, to) in wiper_fill_lines(quad, WIPER_FILL_SPACING) {
            let (from, to) = (self.to_world(from), self.to_world(to));
            self.gizmos.line_2d(from, to, WIPER_COLOR);
        }
        let [a, b, c, d] = quad.map(|p| self.to_world(p));
        self.gizmos.linestrip_2d([a, b, c, d, a], WIPER_COLOR);
    }
}

/// 2D camera for the gizmo overlay.
pub fn spawn_camera(mut commands: Commands) {
    commands.spawn(Camera2d);
}

/// Hand the post-update state to the gizmo renderer.
pub fn draw_scene(mut gizmos: Gizmos, sim: Res<SimulationState>) {
    let mut renderer = GizmoRenderer::new(&mut gizmos, sim.0.config());
    sim.0.render(&mut renderer);
}
