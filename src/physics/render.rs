use super::body::Body;
use super::vector::Vector2;

/// Drawing surface collaborator. The simulation only hands it finished
/// state; it never reads anything back.
///
/// `Simulation::render` calls `clear`, then `draw_body` for every live body
/// in collection order, then `draw_wiper` once.
pub trait Renderer {
    fn clear(&mut self);

    /// Draw a rotated circle at `body.pos` with radius `body.r` and rotation
    /// `body.angle`, using the look selected by `body.variant`.
    fn draw_body(&mut self, body: &Body);

    /// Fill the wiper quadrilateral (see `Wiper::quad`). Line-only backends
    /// fill it with cross lines.
    fn draw_wiper(&mut self, quad: [Vector2; 4]);
}
