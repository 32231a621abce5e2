use kurbo::{Point, Rect};

use crate::curves::CubicSeq;

/// One contiguous drawing stroke within a path.
#[derive(Clone, Debug)]
pub struct SubPath {
    pub points: CubicSeq,
    pub closed: bool,
    /// Endpoint-ring perimeter estimate; sort key for pairing, not arc length.
    pub perimeter: f64,
    pub bounds: Rect,
}

impl SubPath {
    pub(crate) fn from_seq(points: CubicSeq, closed: bool) -> Self {
        let bounds = points.bounds();
        let perimeter = points.perimeter();
        Self {
            points,
            closed,
            perimeter,
            bounds,
        }
    }
}

/// A parsed path: the trimmed source string plus its sub-paths, all lowered
/// to absolute-coordinate cubic beziers.
#[derive(Clone, Debug)]
pub struct PathData {
    pub source: String,
    pub subpaths: Vec<SubPath>,
}

#[derive(Clone, Copy, Debug, serde::Serialize, serde::Deserialize)]
#[serde(default)]
pub struct MorphOptions {
    /// Extra bezier segments inserted per sub-path beyond the minimum needed.
    /// Smoother interpolation at a per-frame cost.
    pub add_points: usize,
    /// Retained for API compatibility. Filler sub-paths collapse to the
    /// counterpart shape's bounding-box centroid instead of this point.
    pub origin: Point,
    /// Decimal places for parse-time normalization and rendered output.
    pub precision: u8,
}

impl Default for MorphOptions {
    fn default() -> Self {
        Self {
            add_points: 0,
            origin: Point::ORIGIN,
            precision: 6,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn options_default_matches_documented_values() {
        let opts = MorphOptions::default();
        assert_eq!(opts.add_points, 0);
        assert_eq!(opts.origin, Point::ORIGIN);
        assert_eq!(opts.precision, 6);
    }

    #[test]
    fn options_deserialize_with_partial_fields() {
        let opts: MorphOptions = serde_json::from_str(r#"{ "add_points": 3 }"#).unwrap();
        assert_eq!(opts.add_points, 3);
        assert_eq!(opts.precision, 6);
    }

    #[test]
    fn subpath_metadata_is_derived_from_points() {
        let mut seq = CubicSeq::new(Point::new(0.0, 0.0));
        let s = seq.start();
        seq.push_curve(s, s, Point::new(3.0, 4.0));
        let sub = SubPath::from_seq(seq, false);
        assert_eq!(sub.bounds, Rect::new(0.0, 0.0, 3.0, 4.0));
        // ring distance start -> (3,4) -> start, floored
        assert_eq!(sub.perimeter, 10.0);
    }
}
