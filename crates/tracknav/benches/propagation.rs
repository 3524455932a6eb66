use std::hint::black_box;

use criterion::{criterion_group, criterion_main, Criterion};
use glam::DVec3;

use tracknav::prelude::*;
use tracknav::toys;
use tracknav::units::{E, GEV, T};

fn telescope_propagation(c: &mut Criterion) {
  let positions: Vec<f64> = (0..20).map(|i| 10.0 * i as f64).collect();
  let det = toys::build_telescope(&positions);

  let line = Propagator::new(LineStepper::default(), NavConfig::default());
  c.bench_function("telescope_20_layers_line", |b| {
    b.iter(|| {
      let track = FreeTrack::new(DVec3::ZERO, 0.0, DVec3::Z * GEV, 0.0);
      let mut prop = Propagation::new(&det, &line.stepper, track, 0);
      let mut actors = (PathLimitAborter::new(1e4),);
      black_box(line.propagate(&mut prop, &mut actors))
    })
  });

  let b_field = DVec3::new(0.0, 0.0, 1.0 * T);
  let rk = Propagator::new(
    RkStepper::new(b_field).with_max_step(10.0),
    NavConfig::default(),
  );
  c.bench_function("telescope_20_layers_rk", |b| {
    b.iter(|| {
      let track = FreeTrack::new(DVec3::ZERO, 0.0, DVec3::new(0.1, 0.0, 1.0) * GEV, -1.0 * E);
      let mut prop = Propagation::new(&det, &rk.stepper, track, 0);
      let mut actors = (PathLimitAborter::new(1e4),);
      black_box(rk.propagate(&mut prop, &mut actors))
    })
  });
}

fn barrel_propagation(c: &mut Criterion) {
  let det = toys::build_barrel(&toys::BarrelConfig::default());
  let propagator = Propagator::new(
    LineStepper::default(),
    NavConfig::default().with_search_window([1, 1]),
  );

  c.bench_function("barrel_radial_line", |b| {
    b.iter(|| {
      let track = FreeTrack::new(DVec3::new(0.0, 0.0, 30.0), 0.0, DVec3::X * GEV, 0.0);
      let mut prop = Propagation::new(&det, &propagator.stepper, track, 0);
      let mut actors = (PathLimitAborter::new(1e4),);
      black_box(propagator.propagate(&mut prop, &mut actors))
    })
  });
}

criterion_group!(benches, telescope_propagation, barrel_propagation);
criterion_main!(benches);
