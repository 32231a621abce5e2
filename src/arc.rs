use std::f64::consts::{PI, TAU};

use kurbo::Point;

// Largest angular span approximated by a single cubic.
const MAX_SPAN: f64 = PI * 120.0 / 180.0;

/// Expand one SVG elliptical-arc command into cubic-bezier segments.
///
/// Returns flat `(c1x, c1y, c2x, c2y, endX, endY)` tuples chaining from
/// `from` to exactly `to`. Degenerate radii (or coincident endpoints) fall
/// back to a single straight-line tuple.
pub fn arc_to_cubics(
    from: Point,
    rx: f64,
    ry: f64,
    rotation_deg: f64,
    large_arc: bool,
    sweep: bool,
    to: Point,
) -> Vec<f64> {
    if rx <= 0.0 || ry <= 0.0 {
        return line_tuple(from, to);
    }

    let rad = rotation_deg.to_radians();
    let (cos_r, sin_r) = (rad.cos(), rad.sin());

    // Rotate the endpoints into the ellipse's axis-aligned frame.
    let p1 = Point::new(
        from.x * cos_r + from.y * sin_r,
        -from.x * sin_r + from.y * cos_r,
    );
    let p2 = Point::new(to.x * cos_r + to.y * sin_r, -to.x * sin_r + to.y * cos_r);

    let x = (p1.x - p2.x) / 2.0;
    let y = (p1.y - p2.y) / 2.0;

    // Scale radii up when the endpoint chord cannot be spanned.
    let (mut rx, mut ry) = (rx, ry);
    let h = x * x / (rx * rx) + y * y / (ry * ry);
    if h > 1.0 {
        let h = h.sqrt();
        rx *= h;
        ry *= h;
    }

    let den = rx * rx * y * y + ry * ry * x * x;
    if den == 0.0 {
        return line_tuple(from, to);
    }
    let num = rx * rx * ry * ry - rx * rx * y * y - ry * ry * x * x;
    let sign = if large_arc == sweep { -1.0 } else { 1.0 };
    let k = sign * (num / den).abs().sqrt();

    let center = Point::new(
        k * rx * y / ry + (p1.x + p2.x) / 2.0,
        k * -ry * x / rx + (p1.y + p2.y) / 2.0,
    );

    let mut f1 = ((p1.y - center.y) / ry).clamp(-1.0, 1.0).asin();
    let mut f2 = ((p2.y - center.y) / ry).clamp(-1.0, 1.0).asin();
    if p1.x < center.x {
        f1 = PI - f1;
    }
    if p2.x < center.x {
        f2 = PI - f2;
    }
    if f1 < 0.0 {
        f1 += TAU;
    }
    if f2 < 0.0 {
        f2 += TAU;
    }
    if sweep && f1 > f2 {
        f1 -= TAU;
    }
    if !sweep && f2 > f1 {
        f2 -= TAU;
    }

    let mut out = Vec::new();
    push_arc_span(&mut out, p1, rx, ry, center, f1, f2, sweep, p2);

    // Rotate the whole result back into user space.
    for i in (0..out.len()).step_by(2) {
        let (xt, yt) = (out[i], out[i + 1]);
        out[i] = xt * cos_r - yt * sin_r;
        out[i + 1] = xt * sin_r + yt * cos_r;
    }
    out
}

fn line_tuple(from: Point, to: Point) -> Vec<f64> {
    vec![from.x, from.y, to.x, to.y, to.x, to.y]
}

/// Emit the span `[f1, f2]` as cubics, splitting spans wider than 120
/// degrees into chained sub-arcs.
#[allow(clippy::too_many_arguments)]
fn push_arc_span(
    out: &mut Vec<f64>,
    from: Point,
    rx: f64,
    ry: f64,
    center: Point,
    f1: f64,
    f2: f64,
    sweep: bool,
    to: Point,
) {
    let (f2_here, to_here, rest) = if (f2 - f1).abs() > MAX_SPAN {
        let dir = if sweep && f2 > f1 { 1.0 } else { -1.0 };
        let split = f1 + MAX_SPAN * dir;
        let at = Point::new(
            center.x + rx * split.cos(),
            center.y + ry * split.sin(),
        );
        (split, at, Some(f2))
    } else {
        (f2, to, None)
    };

    let t = 4.0 / 3.0 * ((f2_here - f1) / 4.0).tan();
    out.extend([
        from.x - t * rx * f1.sin(),
        from.y + t * ry * f1.cos(),
        to_here.x + t * rx * f2_here.sin(),
        to_here.y - t * ry * f2_here.cos(),
        to_here.x,
        to_here.y,
    ]);

    if let Some(f2_rest) = rest {
        push_arc_span(out, to_here, rx, ry, center, f2_here, f2_rest, sweep, to);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn semicircle_chains_to_exact_endpoint() {
        let out = arc_to_cubics(
            Point::new(0.0, 0.0),
            5.0,
            5.0,
            0.0,
            false,
            true,
            Point::new(10.0, 0.0),
        );
        assert!(!out.is_empty());
        assert_eq!(out.len() % 6, 0);
        assert!(out.iter().all(|v| v.is_finite()));
        // 180 degrees splits into more than one cubic
        assert!(out.len() / 6 >= 2);
        let n = out.len();
        assert!((out[n - 2] - 10.0).abs() < 1e-9);
        assert!(out[n - 1].abs() < 1e-9);
    }

    #[test]
    fn zero_radius_degenerates_to_line() {
        let out = arc_to_cubics(
            Point::new(1.0, 2.0),
            0.0,
            5.0,
            0.0,
            false,
            false,
            Point::new(7.0, 8.0),
        );
        assert_eq!(out, vec![1.0, 2.0, 7.0, 8.0, 7.0, 8.0]);
    }

    #[test]
    fn coincident_endpoints_degenerate_to_line() {
        let out = arc_to_cubics(
            Point::new(3.0, 3.0),
            5.0,
            5.0,
            0.0,
            true,
            true,
            Point::new(3.0, 3.0),
        );
        assert_eq!(out, vec![3.0, 3.0, 3.0, 3.0, 3.0, 3.0]);
    }

    #[test]
    fn small_arc_is_single_cubic() {
        let out = arc_to_cubics(
            Point::new(5.0, 0.0),
            5.0,
            5.0,
            0.0,
            false,
            true,
            Point::new(5.0 + 5.0 * (PI / 6.0).sin(), 5.0 - 5.0 * (PI / 6.0).cos()),
        );
        assert_eq!(out.len(), 6);
        assert!(out.iter().all(|v| v.is_finite()));
    }

    #[test]
    fn rotated_arc_stays_finite() {
        let out = arc_to_cubics(
            Point::new(0.0, 0.0),
            6.0,
            3.0,
            30.0,
            true,
            false,
            Point::new(4.0, 1.0),
        );
        assert_eq!(out.len() % 6, 0);
        assert!(out.iter().all(|v| v.is_finite()));
        let n = out.len();
        assert!((out[n - 2] - 4.0).abs() < 1e-6);
        assert!((out[n - 1] - 1.0).abs() < 1e-6);
    }
}
