//! Planar coordinate type and rectangular area bounds.
//!
//! The scenario lives on a flat rectangle measured in metres, so distances
//! are plain Euclidean.  Coordinates are `f64`: attachment tie-breaks compare
//! distances for exact equality, and the extra precision keeps two cells that
//! are genuinely equidistant from collapsing into a rounding artefact.

use std::fmt;

/// A point on the simulated plane, in metres.
#[derive(Copy, Clone, Debug, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Coord {
    pub x: f64,
    pub y: f64,
}

impl Coord {
    pub const ORIGIN: Coord = Coord { x: 0.0, y: 0.0 };

    #[inline]
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    /// Squared Euclidean distance.  Cheaper than [`distance`](Self::distance)
    /// and order-preserving, so nearest-cell comparisons use it directly.
    #[inline]
    pub fn distance_sq(self, other: Coord) -> f64 {
        let dx = self.x - other.x;
        let dy = self.y - other.y;
        dx * dx + dy * dy
    }

    /// Euclidean distance in metres.
    #[inline]
    pub fn distance(self, other: Coord) -> f64 {
        self.distance_sq(other).sqrt()
    }

    #[inline]
    pub fn as_array(self) -> [f64; 2] {
        [self.x, self.y]
    }
}

impl fmt::Display for Coord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({:.2}, {:.2})", self.x, self.y)
    }
}

// ── Bounds ────────────────────────────────────────────────────────────────────

/// Axis-aligned rectangle `[x_min, x_max] × [y_min, y_max]`.
#[derive(Copy, Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Bounds {
    pub x_min: f64,
    pub x_max: f64,
    pub y_min: f64,
    pub y_max: f64,
}

impl Bounds {
    /// Rectangle anchored at the origin, `[0, x_max] × [0, y_max]`.
    pub fn from_max(x_max: f64, y_max: f64) -> Self {
        Self { x_min: 0.0, x_max, y_min: 0.0, y_max }
    }

    pub fn width(&self) -> f64 {
        self.x_max - self.x_min
    }

    pub fn height(&self) -> f64 {
        self.y_max - self.y_min
    }

    /// `true` if both extents are finite and strictly positive.
    pub fn is_valid(&self) -> bool {
        self.width().is_finite() && self.height().is_finite()
            && self.width() > 0.0 && self.height() > 0.0
    }

    #[inline]
    pub fn contains(&self, p: Coord) -> bool {
        (self.x_min..=self.x_max).contains(&p.x) && (self.y_min..=self.y_max).contains(&p.y)
    }

    /// Mirror `p` back inside the rectangle, as a walker bouncing off a wall.
    ///
    /// Overshoots larger than the rectangle itself fold repeatedly, so the
    /// result always satisfies [`contains`](Self::contains).
    pub fn reflect(&self, p: Coord) -> Coord {
        Coord {
            x: reflect_axis(p.x, self.x_min, self.x_max),
            y: reflect_axis(p.y, self.y_min, self.y_max),
        }
    }
}

impl Default for Bounds {
    fn default() -> Self {
        Self::from_max(4_000.0, 4_000.0)
    }
}

fn reflect_axis(v: f64, lo: f64, hi: f64) -> f64 {
    let span = hi - lo;
    if span <= 0.0 {
        return lo;
    }
    // Unfold onto a period of 2·span, then mirror the upper half.
    let m = (v - lo).rem_euclid(2.0 * span);
    if m <= span { lo + m } else { hi - (m - span) }
}
