//! Core geometry types for rat-sketch.
//!
//! ## Rust Lesson #3: Structs & Derives
//!
//! The `#[derive(...)]` macro auto-generates common functionality:
//! - `Debug` = lets you print with `{:?}`
//! - `Clone` / `Copy` = small stack values are copied implicitly
//! - `PartialEq` = can compare with `==`
//!
//! `Serialize` comes from serde and lets drawables be written as JSON.

use serde::Serialize;

/// A 2D point with x,y coordinates.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

/// A line segment defined by two endpoints.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Line {
    pub x1: f64,
    pub y1: f64,
    pub x2: f64,
    pub y2: f64,
}

impl Point {
    #[inline]
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    /// Distance to another point.
    #[inline]
    pub fn distance(&self, other: Point) -> f64 {
        self.distance_squared(other).sqrt()
    }

    #[inline]
    pub fn distance_squared(&self, other: Point) -> f64 {
        let dx = self.x - other.x;
        let dy = self.y - other.y;
        dx * dx + dy * dy
    }

    /// Rotate around `center` by `degrees` (positive = counter-clockwise in
    /// a y-up frame).
    pub fn rotated(&self, center: Point, degrees: f64) -> Point {
        let (sin, cos) = degrees.to_radians().sin_cos();
        let dx = self.x - center.x;
        let dy = self.y - center.y;
        Point::new(dx * cos - dy * sin + center.x, dx * sin + dy * cos + center.y)
    }
}

impl From<(f64, f64)> for Point {
    fn from((x, y): (f64, f64)) -> Self {
        Point::new(x, y)
    }
}

impl Line {
    #[inline]
    pub fn new(x1: f64, y1: f64, x2: f64, y2: f64) -> Self {
        Self { x1, y1, x2, y2 }
    }

    #[inline]
    pub fn from_points(start: Point, end: Point) -> Self {
        Self::new(start.x, start.y, end.x, end.y)
    }

    /// Get the start point of the line.
    #[inline]
    pub fn start(&self) -> Point {
        Point::new(self.x1, self.y1)
    }

    /// Get the end point of the line.
    #[inline]
    pub fn end(&self) -> Point {
        Point::new(self.x2, self.y2)
    }

    /// Length of the line segment.
    #[inline]
    pub fn length(&self) -> f64 {
        self.start().distance(self.end())
    }

    pub fn rotated(&self, center: Point, degrees: f64) -> Line {
        Line::from_points(self.start().rotated(center, degrees), self.end().rotated(center, degrees))
    }
}

/// Rotate every point around `center`.
pub fn rotate_points(points: &[Point], center: Point, degrees: f64) -> Vec<Point> {
    points.iter().map(|p| p.rotated(center, degrees)).collect()
}

/// Rotate every line around `center`.
pub fn rotate_lines(lines: &[Line], center: Point, degrees: f64) -> Vec<Line> {
    lines.iter().map(|l| l.rotated(center, degrees)).collect()
}

// ============================================================================
// TESTS
// ============================================================================
