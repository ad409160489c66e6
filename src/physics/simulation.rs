use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use std::collections::HashSet;
use tracing::{debug, info, trace};

use super::body::Body;
use super::render::Renderer;
use super::timing::{FrameClock, FrameTiming};
use super::vector::Vector2;
use super::wiper::{Wiper, WiperRegion, angle_differential, sweep_angle};
use crate::config::SimConfig;

/// A body-body overlap found during positional correction. Impulses are
/// applied later, in the same order the contacts were recorded.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Contact {
    pub a: usize,
    pub b: usize,
    /// Penetration depth at detection time, before separation.
    pub overlap: f32,
}

#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct SubstepReport {
    pub contacts: usize,
    pub wiper_contacts: usize,
    pub spawned: usize,
    pub culled: usize,
}

#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct FrameReport {
    pub delta_secs: f64,
    pub samples: usize,
    pub substeps: u32,
    pub contacts: usize,
    pub wiper_contacts: usize,
    pub spawned: usize,
    pub culled: usize,
}

impl FrameReport {
    fn absorb(&mut self, step: SubstepReport) {
        self.substeps += 1;
        self.contacts += step.contacts;
        self.wiper_contacts += step.wiper_contacts;
        self.spawned += step.spawned;
        self.culled += step.culled;
    }
}

/// Bodies falling through a sweeping wiper. Owns every body and the wiper;
/// nothing else mutates them.
pub struct Simulation {
    config: SimConfig,
    bodies: Vec<Body>,
    wiper: Wiper,
    clock: FrameClock,
    rng: StdRng,
}

impl Simulation {
    /// Build the scene and fill it to `max_bodies`.
    pub fn new(config: SimConfig) -> Self {
        let mut sim = Self::with_bodies(config, Vec::new());
        let spawned = sim.replenish();
        info!(
            bodies = spawned,
            substeps = sim.config.substeps(),
            screen_bounds = sim.config.screen_bounds,
            "simulation ready"
        );
        sim
    }

    /// Build the scene around the given bodies without spawning any.
    pub fn with_bodies(config: SimConfig, bodies: Vec<Body>) -> Self {
        let rng = match config.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        };
        let pivot = Vector2::new(config.width / 2.0, config.height / 2.0);
        let wiper = Wiper::new(
            pivot,
            config.wiper_length,
            config.wiper_base_radius,
            config.wiper_tip_radius,
        );
        Self {
            config,
            bodies,
            wiper,
            clock: FrameClock::new(),
            rng,
        }
    }

    pub fn config(&self) -> &SimConfig {
        &self.config
    }

    pub fn bodies(&self) -> &[Body] {
        &self.bodies
    }

    pub fn wiper(&self) -> &Wiper {
        &self.wiper
    }

    pub fn push_body(&mut self, body: Body) {
        self.bodies.push(body);
    }

    pub fn screen_bounds(&self) -> bool {
        self.config.screen_bounds
    }

    pub fn set_screen_bounds(&mut self, enabled: bool) {
        self.config.screen_bounds = enabled;
    }

    // --------------------- Frame pipeline ---------------------

    /// Advance one rendered frame at wall-clock `now_ms`: gravity and
    /// friction once, then every substep.
    pub fn frame(&mut self, now_ms: f64) -> FrameReport {
        let FrameTiming {
            delta_secs,
            samples,
        } = self.clock.tick(now_ms);
        self.apply_frame_forces(samples);

        let step_division = self.config.step_division();
        let mut report = FrameReport {
            delta_secs,
            samples,
            ..Default::default()
        };
        for _ in 0..self.config.substeps() {
            report.absorb(self.substep(now_ms, step_division));
        }

        debug!(
            bodies = self.bodies.len(),
            contacts = report.contacts,
            wiper_contacts = report.wiper_contacts,
            spawned = report.spawned,
            culled = report.culled,
            "frame"
        );
        report
    }

    /// Gravity is scaled by reference_fps / measured fps so a slow display
    /// still falls at the tuned rate.
    fn apply_frame_forces(&mut self, samples: usize) {
        let scale = self.config.reference_fps / samples.max(1) as f32;
        let gravity = Vector2::new(0.0, self.config.gravity * scale);
        for body in &mut self.bodies {
            body.apply_force(gravity);
            body.apply_friction(self.config.friction);
        }
    }

    /// One substep: integrate, sweep the wiper, separate overlaps, collide
    /// with the wiper, apply pair impulses, top up, then handle the edges.
    pub fn substep(&mut self, now_ms: f64, step_division: f32) -> SubstepReport {
        for body in &mut self.bodies {
            body.integrate(step_division);
        }

        self.wiper
            .update(sweep_angle(now_ms, self.config.wiper_period_ms));
        let push = self.config.wiper_force * angle_differential(now_ms, self.config.wiper_speed);

        let contacts = self.separate_overlaps();
        let wiper_contacts = self.collide_with_wiper(push);
        self.resolve_contacts(&contacts);
        let spawned = self.replenish();
        let culled = self.apply_bounds();

        SubstepReport {
            contacts: contacts.len(),
            wiper_contacts,
            spawned,
            culled,
        }
    }

    /// Push every overlapping pair apart by half the overlap each, along the
    /// line of centres. Velocities are untouched here.
    ///
    /// Every ordered pair `(i, j)`, `i != j`, is checked in index order, so a
    /// pair is looked at again as `(j, i)` after all of `i`'s partners have
    /// moved. Any hit pushes; only the first hit on a pair is recorded.
    pub fn separate_overlaps(&mut self) -> Vec<Contact> {
        let mut contacts = Vec::new();
        let mut seen = HashSet::new();
        let n = self.bodies.len();
        for i in 0..n {
            for j in 0..n {
                if i == j {
                    continue;
                }
                let (a, b) = pair_mut(&mut self.bodies, i, j);
                let delta = b.pos - a.pos;
                let dist = delta.length();
                let reach = a.r + b.r;
                if dist < reach {
                    let dir = delta.normalize();
                    let half_gap = (reach - dist) / 2.0;
                    a.pos -= dir * half_gap;
                    b.pos += dir * half_gap;
                    if seen.insert((i.min(j), i.max(j))) {
                        contacts.push(Contact {
                            a: i,
                            b: j,
                            overlap: reach - dist,
                        });
                    }
                }
            }
        }
        contacts
    }

    /// Collide every body against the wiper; returns how many were touched.
    pub fn collide_with_wiper(&mut self, push: f32) -> usize {
        let wiper = self.wiper;
        let mid = wiper.midpoint();
        let reach = wiper.reach();

        let mut hits = 0;
        for body in &mut self.bodies {
            // broad phase
            if body.pos.distance(mid) > reach + body.r {
                continue;
            }
            if collide_body_with_wiper(body, &wiper, push) {
                hits += 1;
            }
        }
        hits
    }

    /// Elastic impulses for the recorded contacts, using the line of centres
    /// after all positional corrections.
    pub fn resolve_contacts(&mut self, contacts: &[Contact]) {
        for c in contacts {
            let (a, b) = pair_mut(&mut self.bodies, c.a, c.b);
            resolve_elastic(a, b);
        }
    }

    /// Spawn bodies until the population reaches `max_bodies`.
    pub fn replenish(&mut self) -> usize {
        let missing = self.config.max_bodies.saturating_sub(self.bodies.len());
        for _ in 0..missing {
            let body = self.spawn_body();
            trace!(x = body.pos.x, y = body.pos.y, r = body.r, "spawned body");
            self.bodies.push(body);
        }
        missing
    }

    fn spawn_body(&mut self) -> Body {
        let c = &self.config;
        let (w, h) = (c.width, c.height);

        let x = (self.rng.r#gen::<f32>() - 0.5) * w * c.spawn_spread + w / 2.0;
        // centred one screen-height above the visible area
        let y = (self.rng.r#gen::<f32>() - 0.5) * h * c.spawn_spread + h / 2.0 - h;
        let r = c.body_radius_min + self.rng.r#gen::<f32>() * (c.body_radius_max - c.body_radius_min);
        let variant = self.rng.gen_range(0..c.visual_variants.max(1));

        let impulse = Vector2::new(self.rng.r#gen::<f32>() - 0.5, self.rng.r#gen::<f32>() - 0.5)
            * Vector2::new(c.spawn_impulse[0], c.spawn_impulse[1]);

        let mut body = Body::new(Vector2::new(x, y), r).with_variant(variant);
        body.angular_velocity = c.body_angular_velocity;
        body.apply_force(impulse);
        body
    }

    /// Bounce off the edges, or drop bodies that left the scene. Returns the
    /// number culled.
    pub fn apply_bounds(&mut self) -> usize {
        let (w, h) = (self.config.width, self.config.height);
        if self.config.screen_bounds {
            for body in &mut self.bodies {
                body.bounce_in_bounds(w, h);
            }
            return 0;
        }

        let before = self.bodies.len();
        self.bodies.retain(|b| !b.is_outside(w, h));
        let culled = before - self.bodies.len();
        if culled > 0 {
            trace!(culled, "culled bodies");
        }
        culled
    }

    /// Hand the current state to a renderer: clear, bodies, then the wiper.
    pub fn render<R: Renderer + ?Sized>(&self, renderer: &mut R) {
        renderer.clear();
        for body in &self.bodies {
            renderer.draw_body(body);
        }
        renderer.draw_wiper(self.wiper.quad());
    }
}

/// Disjoint mutable borrows of `bodies[i]` and `bodies[j]`, in that order.
fn pair_mut(bodies: &mut [Body], i: usize, j: usize) -> (&mut Body, &mut Body) {
    debug_assert!(i != j);
    if i < j {
        let (head, tail) = bodies.split_at_mut(j);
        (&mut head[i], &mut tail[0])
    } else {
        let (head, tail) = bodies.split_at_mut(i);
        (&mut tail[0], &mut head[j])
    }
}

/// 1D elastic collision along the line of centres. Tangential velocity
/// passes through unchanged; momentum is conserved.
pub fn resolve_elastic(a: &mut Body, b: &mut Body) {
    let dir = (b.pos - a.pos).normalize();
    let nor = dir.perp();

    let u1 = dir.dot(a.v);
    let u2 = dir.dot(b.v);
    let t1 = nor.dot(a.v);
    let t2 = nor.dot(b.v);

    let total = a.mass + b.mass;
    let v1 = ((a.mass - b.mass) * u1 + 2.0 * b.mass * u2) / total;
    let v2 = ((b.mass - a.mass) * u2 + 2.0 * a.mass * u1) / total;

    a.v = dir * v1 + nor * t1;
    b.v = dir * v2 + nor * t2;
}

/// Narrow phase against the tapered capsule. `push` is the sweep-modulated
/// wiper force; the shaft scales it further by how far out the contact is.
/// Returns true if the body was moved.
pub fn collide_body_with_wiper(body: &mut Body, wiper: &Wiper, push: f32) -> bool {
    let to_body = body.pos - wiper.base;
    let bound = wiper.dir.dot(to_body);

    let mut hit = false;
    for region in wiper.regions(bound) {
        hit |= match region {
            WiperRegion::BaseCap => push_out_of_cap(body, wiper.base, wiper.base_radius),
            WiperRegion::TipCap => push_out_of_cap(body, wiper.tip, wiper.tip_radius),
            WiperRegion::Shaft => {
                let side = wiper.nor.dot(to_body);
                let offset = wiper.nor * side;
                let dist = offset.length();
                let radius = wiper.radius_at(bound);
                if dist < radius + body.r {
                    let sign = if side > 0.0 { 1.0 } else { -1.0 };
                    let gap = radius + body.r - dist;
                    body.pos = body.pos + wiper.nor * (gap * sign);
                    body.v = body.v - wiper.nor * (2.0 * wiper.nor.dot(body.v));
                    body.apply_force(offset.normalize() * (wiper.bounds_percentage(bound) * push));
                    true
                } else {
                    false
                }
            }
        };
    }
    hit
}

/// Positional push out of a round cap; velocity is left alone.
fn push_out_of_cap(body: &mut Body, center: Vector2, radius: f32) -> bool {
    let delta = body.pos - center;
    let dist = delta.length();
    if dist < body.r + radius {
        let gap = radius + body.r - dist;
        body.pos = body.pos + delta.normalize() * gap;
        true
    } else {
        false
    }
}
