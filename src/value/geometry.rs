use std::fmt;

use serde::{Deserialize, Serialize};

/// A 2D point.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    pub fn new(x: f64, y: f64) -> Self {
        Point { x, y }
    }

    /// Euclidean distance to another point.
    pub fn distance_to(&self, other: &Point) -> f64 {
        (self.x - other.x).hypot(self.y - other.y)
    }
}

impl From<(f64, f64)> for Point {
    fn from((x, y): (f64, f64)) -> Self {
        Point { x, y }
    }
}

impl fmt::Display for Point {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.x, self.y)
    }
}

/// A numeric interval between `x` and `y`.
///
/// The bounds are not required to be ordered; [`Interval::min`] and
/// [`Interval::max`] give the ordered view.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Interval {
    pub x: f64,
    pub y: f64,
}

impl Interval {
    pub fn new(x: f64, y: f64) -> Self {
        Interval { x, y }
    }

    pub fn min(&self) -> f64 {
        self.x.min(self.y)
    }

    pub fn max(&self) -> f64 {
        self.x.max(self.y)
    }

    /// Width of the interval, always non-negative.
    pub fn amplitude(&self) -> f64 {
        (self.y - self.x).abs()
    }

    pub fn contains(&self, value: f64) -> bool {
        value >= self.min() && value <= self.max()
    }
}

impl fmt::Display for Interval {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{}, {}]", self.x, self.y)
    }
}
