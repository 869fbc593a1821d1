//! The `MobilityModel` trait and its implementations.

use std::f64::consts::TAU;

use hn_core::{Bounds, Coord, NodeRng, RunConfig};

/// Pluggable terminal movement.
///
/// `step` must be a pure function of its arguments and the RNG stream, so a
/// run is reproducible from its seed regardless of the order in which
/// terminals are moved.
pub trait MobilityModel: Send + Sync + 'static {
    /// Position reached `dt_secs` seconds after being at `from`.
    fn step(&self, from: Coord, dt_secs: f64, rng: &mut NodeRng) -> Coord;
}

/// Nodes never move.
pub struct ConstantPosition;

impl MobilityModel for ConstantPosition {
    fn step(&self, from: Coord, _dt_secs: f64, _rng: &mut NodeRng) -> Coord {
        from
    }
}

/// Bounded two-dimensional random walk.
///
/// Time is cut into legs of `step_secs`.  Each leg draws a heading uniformly
/// in `[0, 2π)` and a speed uniformly in `[speed_min, speed_max]`, moves in a
/// straight line and bounces off the area edges.  A trailing partial leg
/// covers whatever is left of `dt_secs`.
#[derive(Clone, Debug)]
pub struct RandomWalk2d {
    pub bounds:    Bounds,
    pub speed_min: f64,
    pub speed_max: f64,
    pub step_secs: f64,
}

impl RandomWalk2d {
    pub fn new(bounds: Bounds, speed_min: f64, speed_max: f64, step_secs: f64) -> Self {
        Self { bounds, speed_min, speed_max, step_secs }
    }

    /// Walk parameters from the run configuration, confined to `bounds`.
    pub fn from_config(bounds: Bounds, run: &RunConfig) -> Self {
        Self::new(bounds, run.walk_speed_min, run.walk_speed_max, run.walk_step_secs)
    }

    fn leg(&self, from: Coord, secs: f64, rng: &mut NodeRng) -> Coord {
        let heading = rng.gen_range(0.0..TAU);
        let speed = if self.speed_max > self.speed_min {
            rng.gen_range(self.speed_min..=self.speed_max)
        } else {
            self.speed_min
        };
        let d = speed * secs;
        self.bounds.reflect(Coord::new(from.x + d * heading.cos(), from.y + d * heading.sin()))
    }
}

impl MobilityModel for RandomWalk2d {
    fn step(&self, from: Coord, dt_secs: f64, rng: &mut NodeRng) -> Coord {
        let mut pos = from;
        let mut left = dt_secs;
        while left > 0.0 {
            let secs = left.min(self.step_secs);
            pos = self.leg(pos, secs, rng);
            left -= secs;
        }
        pos
    }
}
