use ball_wiper::config::SimConfig;
use ball_wiper::physics::Simulation;
use criterion::{BatchSize, Criterion, black_box, criterion_group, criterion_main};

const FRAME_MS: f64 = 1000.0 / 60.0;

fn warmed(max_bodies: usize) -> (Simulation, f64) {
    let mut sim = Simulation::new(SimConfig {
        max_bodies,
        seed: Some(42),
        ..Default::default()
    });
    // let the first wave fall into the wiper's reach
    let mut now = 0.0;
    for _ in 0..120 {
        sim.frame(now);
        now += FRAME_MS;
    }
    (sim, now)
}

fn bench_frame(c: &mut Criterion) {
    for n in [100usize, 300] {
        c.bench_function(&format!("frame_{n}_bodies"), |b| {
            b.iter_batched(
                || warmed(n),
                |(mut sim, now)| black_box(sim.frame(now)),
                BatchSize::LargeInput,
            );
        });
    }
}

fn bench_separation(c: &mut Criterion) {
    let (sim, _) = warmed(300);
    c.bench_function("separate_overlaps_300", |b| {
        b.iter_batched(
            || sim.bodies().to_vec(),
            |bodies| {
                let mut s = Simulation::with_bodies(sim.config().clone(), bodies);
                black_box(s.separate_overlaps())
            },
            BatchSize::SmallInput,
        );
    });
}

criterion_group!(benches, bench_frame, bench_separation);
criterion_main!(benches);
