//! Initial node placement.

use hn_core::{Bounds, Coord, SimRng};

use crate::{MobilityError, MobilityResult};

/// Hands out initial positions during provisioning, one per call.
pub trait PositionAllocator {
    /// The next position.
    ///
    /// # Errors
    ///
    /// [`MobilityError::AllocatorExhausted`] if a finite allocator has no
    /// positions left.
    fn allocate(&mut self) -> MobilityResult<Coord>;
}

/// Uniformly random positions inside a rectangle.
pub struct RandomRectangle {
    bounds: Bounds,
    rng:    SimRng,
}

impl RandomRectangle {
    pub fn new(bounds: Bounds, rng: SimRng) -> Self {
        Self { bounds, rng }
    }
}

impl PositionAllocator for RandomRectangle {
    fn allocate(&mut self) -> MobilityResult<Coord> {
        let b = &self.bounds;
        let x = self.rng.gen_range(b.x_min..=b.x_max);
        let y = self.rng.gen_range(b.y_min..=b.y_max);
        Ok(Coord::new(x, y))
    }
}

/// A fixed list of positions, handed out in order.  Useful for tests and for
/// reproducing a known layout.
pub struct FixedPositions {
    positions: Vec<Coord>,
    next:      usize,
}

impl FixedPositions {
    pub fn new(positions: Vec<Coord>) -> Self {
        Self { positions, next: 0 }
    }

    /// Positions not yet handed out.
    pub fn remaining(&self) -> usize {
        self.positions.len() - self.next
    }
}

impl PositionAllocator for FixedPositions {
    fn allocate(&mut self) -> MobilityResult<Coord> {
        let pos = self
            .positions
            .get(self.next)
            .copied()
            .ok_or(MobilityError::AllocatorExhausted { allocated: self.next })?;
        self.next += 1;
        Ok(pos)
    }
}
