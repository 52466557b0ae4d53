use forest_scatter::prelude::*;
use forest_scatter_examples::{hills_terrain, init_tracing, SlopeLimitedNavSurface};
use glam::Vec3;
use rand::rngs::StdRng;
use rand::SeedableRng;
use tracing::info;

/// Deer walking in a straight line toward its destination at constant speed.
struct Deer<'a> {
    position: Vec3,
    destination: Option<Vec3>,
    speed: f32,
    surface: &'a SlopeLimitedNavSurface<'a>,
}

impl Deer<'_> {
    fn step(&mut self, dt: f32) {
        let Some(destination) = self.destination else {
            return;
        };
        let to_target = destination - self.position;
        let step = self.speed * dt;
        self.position = if to_target.length() <= step {
            destination
        } else {
            self.surface.project(self.position + to_target.normalize() * step)
        };
    }
}

impl NavAgent for Deer<'_> {
    fn position(&self) -> Vec3 {
        self.position
    }

    fn is_on_nav_surface(&self) -> bool {
        self.surface.is_walkable(self.position)
    }

    fn set_destination(&mut self, destination: Vec3) {
        self.destination = Some(destination);
    }
}

fn main() -> anyhow::Result<()> {
    init_tracing();

    let terrain = hills_terrain(Vec3::new(1000.0, 120.0, 1000.0))?;
    let surface = SlopeLimitedNavSurface {
        terrain: &terrain,
        max_slope: 40.0,
    };
    let mut deer = Deer {
        position: surface.project(Vec3::new(300.0, 0.0, 300.0)),
        destination: None,
        speed: 4.0,
        surface: &surface,
    };

    let mut wander = Wander::new(WanderSettings::default());
    let mut rng = StdRng::seed_from_u64(11);
    let dt = 0.5;
    let mut last = None;
    for tick in 0..240 {
        let state = wander.tick(dt, &mut deer, &surface, &mut rng);
        if state == WanderState::Disabled {
            info!("tick {tick}: deer left the walkable area, stopping");
            break;
        }
        if wander.destination() != last {
            last = wander.destination();
            if let Some(d) = last {
                let t = tick as f32 * dt;
                info!("t={t:.1}s new destination ({:.1}, {:.1}, {:.1})", d.x, d.y, d.z);
            }
        }
        deer.step(dt);
    }
    info!("final position {}", deer.position);
    Ok(())
}
