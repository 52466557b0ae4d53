use std::time::Duration;

use criterion::{Criterion, Throughput};
use forest_scatter::prelude::HeightmapTerrain;
use glam::Vec3;

pub const SAMPLE_SIZE: usize = 20;
pub const WARM_UP: Duration = Duration::from_secs(1);
pub const MEASUREMENT_TIME: Duration = Duration::from_secs(2);

pub fn default_criterion() -> Criterion {
    Criterion::default()
        .configure_from_args()
        .sample_size(SAMPLE_SIZE)
        .warm_up_time(WARM_UP)
        .measurement_time(MEASUREMENT_TIME)
}

pub fn elements_throughput(elements: usize) -> Throughput {
    Throughput::Elements(elements.max(1) as u64)
}

/// Rolling hills over a 1 km square, 600 m tall.
pub fn hills_terrain() -> HeightmapTerrain {
    HeightmapTerrain::from_fn(257, 257, Vec3::new(1000.0, 600.0, 1000.0), |u, v| {
        0.5 + 0.25 * (u * 11.0).sin() * (v * 7.0).cos() + 0.1 * ((u + v) * 23.0).sin()
    })
    .expect("valid bench terrain")
}
