//! Relative-to-absolute conversion of path segments.

use super::parse::Segment;
use crate::error::PathError;

/// Rewrite every relative command as its absolute equivalent.
///
/// Tracks the current point and the start of the current subpath; `Z` moves
/// the current point back to the subpath start. Absolute input comes back
/// unchanged. A segment with the wrong number of arguments is an error.
pub fn absolutize(segments: &[Segment]) -> Result<Vec<Segment>, PathError> {
    let (mut cx, mut cy) = (0.0, 0.0);
    let (mut subx, mut suby) = (0.0, 0.0);
    let mut out = Vec::with_capacity(segments.len());

    // Offset every (x, y) pair in `data` by the current point.
    let shifted = |data: &[f64], cx: f64, cy: f64| -> Vec<f64> {
        data.iter()
            .enumerate()
            .map(|(i, v)| if i % 2 == 1 { v + cy } else { v + cx })
            .collect()
    };

    for segment in segments {
        segment.check()?;
        let d = &segment.data;
        match segment.key {
            'M' => {
                out.push(segment.clone());
                (cx, cy) = (d[0], d[1]);
                (subx, suby) = (cx, cy);
            }
            'm' => {
                cx += d[0];
                cy += d[1];
                out.push(Segment::new('M', vec![cx, cy]));
                (subx, suby) = (cx, cy);
            }
            'L' | 'T' => {
                out.push(segment.clone());
                (cx, cy) = (d[0], d[1]);
            }
            'l' | 't' => {
                cx += d[0];
                cy += d[1];
                out.push(Segment::new(segment.key.to_ascii_uppercase(), vec![cx, cy]));
            }
            'C' => {
                out.push(segment.clone());
                (cx, cy) = (d[4], d[5]);
            }
            'S' | 'Q' => {
                out.push(segment.clone());
                (cx, cy) = (d[2], d[3]);
            }
            'c' | 's' | 'q' => {
                let data = shifted(d, cx, cy);
                let n = data.len();
                (cx, cy) = (data[n - 2], data[n - 1]);
                out.push(Segment::new(segment.key.to_ascii_uppercase(), data));
            }
            'A' => {
                out.push(segment.clone());
                (cx, cy) = (d[5], d[6]);
            }
            'a' => {
                cx += d[5];
                cy += d[6];
                out.push(Segment::new('A', vec![d[0], d[1], d[2], d[3], d[4], cx, cy]));
            }
            'H' => {
                out.push(segment.clone());
                cx = d[0];
            }
            'h' => {
                cx += d[0];
                out.push(Segment::new('H', vec![cx]));
            }
            'V' => {
                out.push(segment.clone());
                cy = d[0];
            }
            'v' => {
                cy += d[0];
                out.push(Segment::new('V', vec![cy]));
            }
            'Z' | 'z' => {
                out.push(Segment::new('Z', Vec::new()));
                (cx, cy) = (subx, suby);
            }
            _ => {}
        }
    }

    Ok(out)
}

// ============================================================================
// TESTS
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::path::parse_path;

    fn abs(d: &str) -> Vec<Segment> {
        absolutize(&parse_path(d).unwrap()).unwrap()
    }

    #[test]
    fn relative_movetos_accumulate() {
        let segments = abs("m10,20 m30,40");
        assert_eq!(segments[0], Segment::new('M', vec![10.0, 20.0]));
        assert_eq!(segments[1], Segment::new('M', vec![40.0, 60.0]));
    }

    #[test]
    fn relative_curve_offsets_every_pair() {
        let segments = abs("M10,10 c20,20,40,40,60,60");
        assert_eq!(segments[1], Segment::new('C', vec![30.0, 30.0, 50.0, 50.0, 70.0, 70.0]));
    }

    #[test]
    fn close_returns_to_subpath_start() {
        let segments = abs("M10,20 l30,40 Z l50,60");
        assert_eq!(segments.last(), Some(&Segment::new('L', vec![60.0, 80.0])));
    }

    #[test]
    fn horizontal_and_vertical() {
        let segments = abs("M10,20 h20 v20");
        assert_eq!(segments[1], Segment::new('H', vec![30.0]));
        assert_eq!(segments[2], Segment::new('V', vec![40.0]));
    }

    #[test]
    fn relative_arc_moves_only_the_endpoint() {
        let segments = abs("M10,10 a5,5 0 0 1 10,0");
        assert_eq!(segments[1], Segment::new('A', vec![5.0, 5.0, 0.0, 0.0, 1.0, 20.0, 10.0]));
    }

    #[test]
    fn absolute_input_is_unchanged() {
        let once = abs("M10 20 L30 40 H5 V6 C1 2 3 4 5 6 S7 8 9 10 Q1 1 2 2 T3 3 A5 5 0 1 0 9 9 Z");
        assert_eq!(absolutize(&once).unwrap(), once);
    }

    #[test]
    fn short_hand_built_segment_is_an_error() {
        let segments = [Segment::new('M', vec![0.0, 0.0]), Segment::new('l', vec![5.0])];
        assert_eq!(
            absolutize(&segments),
            Err(PathError::WrongArity { command: 'l', expected: 2, found: 1 })
        );
        assert_eq!(absolutize(&[Segment::new('x', vec![])]), Err(PathError::UnknownCommand('x')));
    }
}
