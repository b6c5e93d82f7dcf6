//! Sample path data into polylines.

use crate::curve::{points_on_bezier_curves, simplify};
use crate::error::PathError;
use crate::geometry::Point;
use crate::path::normalized_segments;

/// Flatten path data into one polyline per subpath.
///
/// Cubic runs are flattened at `tolerance`. With `distance > 0` each polyline
/// is then simplified with that epsilon and empty polylines are dropped;
/// zero or negative distances leave the polylines as sampled.
pub fn points_on_path(d: &str, tolerance: f64, distance: f64) -> Result<Vec<Vec<Point>>, PathError> {
    let segments = normalized_segments(d)?;

    let mut sampler = Sampler { tolerance, ..Sampler::default() };
    for segment in &segments {
        let data = &segment.data;
        match segment.key {
            'M' => {
                sampler.flush_polyline();
                sampler.start = Point::new(data[0], data[1]);
                sampler.current.push(sampler.start);
            }
            'L' => {
                sampler.flush_curve();
                sampler.current.push(Point::new(data[0], data[1]));
            }
            'C' => {
                if sampler.pending_curve.is_empty() {
                    let last = sampler.current.last().copied().unwrap_or(sampler.start);
                    sampler.pending_curve.push(last);
                }
                sampler.pending_curve.extend([
                    Point::new(data[0], data[1]),
                    Point::new(data[2], data[3]),
                    Point::new(data[4], data[5]),
                ]);
            }
            'Z' => {
                sampler.flush_curve();
                sampler.current.push(sampler.start);
            }
            _ => {}
        }
    }
    sampler.flush_polyline();

    if distance <= 0.0 {
        return Ok(sampler.sets);
    }

    Ok(sampler
        .sets
        .iter()
        .map(|set| simplify(set, distance))
        .filter(|set| !set.is_empty())
        .collect())
}

#[derive(Default)]
struct Sampler {
    tolerance: f64,
    sets: Vec<Vec<Point>>,
    current: Vec<Point>,
    start: Point,
    pending_curve: Vec<Point>,
}

impl Sampler {
    fn flush_curve(&mut self) {
        if self.pending_curve.len() >= 4 {
            let flattened = points_on_bezier_curves(&self.pending_curve, self.tolerance, 0.0);
            self.current.extend(flattened);
        }
        self.pending_curve.clear();
    }

    fn flush_polyline(&mut self) {
        self.flush_curve();
        if !self.current.is_empty() {
            self.sets.push(std::mem::take(&mut self.current));
        }
    }
}

// ============================================================================
// TESTS
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn one_polyline_per_subpath() {
        let sets = points_on_path("M0 0 L10 0 L10 10 Z M20 20 L30 30", 1.0, 0.0).unwrap();
        assert_eq!(sets.len(), 2);
        assert_eq!(
            sets[0],
            vec![Point::new(0.0, 0.0), Point::new(10.0, 0.0), Point::new(10.0, 10.0), Point::new(0.0, 0.0)]
        );
        assert_eq!(sets[1].len(), 2);
    }

    #[test]
    fn curves_are_flattened() {
        let sets = points_on_path("M0 0 C0 100 100 100 100 0", 0.15, 0.0).unwrap();
        assert_eq!(sets.len(), 1);
        assert!(sets[0].len() > 4);
        assert_eq!(*sets[0].last().unwrap(), Point::new(100.0, 0.0));
    }

    #[test]
    fn positive_distance_simplifies() {
        let fine = points_on_path("M0 0 C0 100 100 100 100 0", 0.15, 0.0).unwrap();
        let coarse = points_on_path("M0 0 C0 100 100 100 100 0", 0.15, 5.0).unwrap();
        assert!(coarse[0].len() < fine[0].len());
    }

    #[test]
    fn negative_distance_does_not_simplify() {
        let plain = points_on_path("M0 0 L5 5 L10 10", 1.0, 0.0).unwrap();
        let negative = points_on_path("M0 0 L5 5 L10 10", 1.0, -2.0).unwrap();
        assert_eq!(plain, negative);
        assert_eq!(plain[0].len(), 3);
    }

    #[test]
    fn parse_errors_propagate() {
        assert!(points_on_path("M10", 1.0, 0.0).is_err());
    }
}
