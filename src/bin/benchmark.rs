//! Headless frame benchmark: runs the full simulation against synthetic
//! 60 Hz timestamps and prints throughput.
//!
//! Usage: benchmark [frames] [max_bodies]

use ball_wiper::config::SimConfig;
use ball_wiper::physics::{FrameReport, Simulation};
use std::time::Instant;

const FRAME_MS: f64 = 1000.0 / 60.0;

fn main() {
    let mut args = std::env::args().skip(1);
    let frames: usize = args.next().and_then(|s| s.parse().ok()).unwrap_or(600);
    let max_bodies: usize = args
        .next()
        .and_then(|s| s.parse().ok())
        .unwrap_or(ball_wiper::config::MAX_BODIES);

    let config = SimConfig {
        max_bodies,
        seed: Some(0x5eed),
        ..Default::default()
    };
    let mut sim = Simulation::new(config);

    let mut totals = FrameReport::default();
    let start = Instant::now();
    for i in 0..frames {
        let r = sim.frame(i as f64 * FRAME_MS);
        totals.substeps += r.substeps;
        totals.contacts += r.contacts;
        totals.wiper_contacts += r.wiper_contacts;
        totals.spawned += r.spawned;
        totals.culled += r.culled;
    }
    let elapsed = start.elapsed();

    let per_frame_us = elapsed.as_secs_f64() * 1e6 / frames.max(1) as f64;
    println!("frames          {frames}");
    println!("bodies          {}", sim.bodies().len());
    println!("substeps        {}", totals.substeps);
    println!("pair contacts   {}", totals.contacts);
    println!("wiper contacts  {}", totals.wiper_contacts);
    println!("spawned/culled  {}/{}", totals.spawned, totals.culled);
    println!("total           {:.3} ms", elapsed.as_secs_f64() * 1e3);
    println!("per frame       {per_frame_us:.1} us");
}
