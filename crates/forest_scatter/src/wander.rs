//! Wandering behaviour for navigation agents such as deer.
//!
//! A [`Wander`] periodically picks a random point around its agent, projects it onto
//! the navigation surface and hands it to the agent as its next destination.
//! Pathfinding itself belongs to the host; this module only decides where to go.
use glam::Vec3;
use rand::RngCore;
#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::sampling::rand01;

/// Walkable surface the host navigation system exposes.
pub trait NavSurface {
    /// Nearest walkable point to `target` within `max_distance`, if any.
    fn sample_position(&self, target: Vec3, max_distance: f32) -> Option<Vec3>;
}

/// An agent that can walk toward a destination.
pub trait NavAgent {
    fn position(&self) -> Vec3;

    /// Whether the agent currently stands on the navigation surface.
    fn is_on_nav_surface(&self) -> bool;

    fn set_destination(&mut self, destination: Vec3);
}

#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
#[derive(Clone, Debug, PartialEq)]
pub struct WanderSettings {
    /// Radius around the agent in which new destinations are drawn.
    pub roam_radius: f32,
    /// Seconds between destination changes.
    pub roam_delay: f32,
}

impl Default for WanderSettings {
    fn default() -> Self {
        Self {
            roam_radius: 40.0,
            roam_delay: 5.0,
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum WanderState {
    /// No destination assigned yet.
    Idle,
    /// Walking toward the last destination.
    Moving,
    /// Stopped because the agent left the navigation surface.
    Disabled,
}

/// Periodic retarget loop for a single agent.
#[derive(Clone, Debug)]
pub struct Wander {
    settings: WanderSettings,
    timer: f32,
    state: WanderState,
    destination: Option<Vec3>,
}

impl Wander {
    /// The timer starts full, so the first tick already picks a destination.
    pub fn new(settings: WanderSettings) -> Self {
        Self {
            timer: settings.roam_delay,
            settings,
            state: WanderState::Idle,
            destination: None,
        }
    }

    pub fn state(&self) -> WanderState {
        self.state
    }

    pub fn destination(&self) -> Option<Vec3> {
        self.destination
    }

    pub fn settings(&self) -> &WanderSettings {
        &self.settings
    }

    /// Advances the timer by `dt` seconds and retargets when the delay elapsed.
    pub fn tick<R: RngCore>(
        &mut self,
        dt: f32,
        agent: &mut dyn NavAgent,
        surface: &dyn NavSurface,
        rng: &mut R,
    ) -> WanderState {
        if self.state == WanderState::Disabled {
            return self.state;
        }
        if !agent.is_on_nav_surface() {
            warn!(
                "Agent at {} is not on the navigation surface; wandering disabled.",
                agent.position()
            );
            self.state = WanderState::Disabled;
            return self.state;
        }

        self.timer += dt.max(0.0);
        if self.timer < self.settings.roam_delay {
            return self.state;
        }

        let radius = self.settings.roam_radius;
        let target = agent.position() + random_in_unit_sphere(rng) * radius;
        match surface.sample_position(target, radius) {
            Some(destination) => {
                agent.set_destination(destination);
                self.destination = Some(destination);
                self.state = WanderState::Moving;
                self.timer = 0.0;
            }
            None => {
                // Keep the timer full so the next tick tries again.
                debug!("No walkable point near {target}; retrying next tick.");
            }
        }
        self.state
    }
}

/// Uniform random point inside the unit sphere.
pub fn random_in_unit_sphere<R: RngCore>(rng: &mut R) -> Vec3 {
    loop {
        let p = Vec3::new(
            rand01(rng) * 2.0 - 1.0,
            rand01(rng) * 2.0 - 1.0,
            rand01(rng) * 2.0 - 1.0,
        );
        if p.length_squared() <= 1.0 {
            return p;
        }
    }
}
