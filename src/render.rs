use crate::{curves::CubicSeq, math::format_coord};

/// Serialize interpolated sub-path buffers back into path data.
///
/// Zero-length segments that repeat the previously emitted tuple are
/// skipped, collapsing filler runs inserted during equalization; the first
/// occurrence is still emitted.
pub fn render_path(bufs: &[CubicSeq], closed: &[bool], precision: u8) -> String {
    let mut tokens: Vec<String> = Vec::new();
    for (i, seq) in bufs.iter().enumerate() {
        let start = seq.start();
        tokens.push("M".to_string());
        tokens.push(format_coord(start.x, precision));
        tokens.push(format_coord(start.y, precision));
        tokens.push("C".to_string());

        let mut last_tuple: Option<String> = None;
        for s in 0..seq.seg_count() {
            let (c1, c2, end) = (seq.ctrl1(s), seq.ctrl2(s), seq.end(s));
            let parts = [
                format_coord(c1.x, precision),
                format_coord(c1.y, precision),
                format_coord(c2.x, precision),
                format_coord(c2.y, precision),
                format_coord(end.x, precision),
                format_coord(end.y, precision),
            ];
            // formatted comparison: a tuple is a point only if both controls
            // print identically to the endpoint
            let is_point = parts[0] == parts[4]
                && parts[2] == parts[4]
                && parts[1] == parts[5]
                && parts[3] == parts[5];
            let key = parts.concat();
            let repeats = last_tuple.as_deref() == Some(key.as_str());
            last_tuple = Some(key);
            if is_point && repeats {
                continue;
            }
            tokens.extend(parts);
        }

        if closed.get(i).copied().unwrap_or(false) {
            tokens.push("Z".to_string());
        }
    }
    tokens.join(" ")
}

#[cfg(test)]
mod tests {
    use super::*;
    use kurbo::Point;

    #[test]
    fn square_renders_move_curve_close() {
        let mut seq = CubicSeq::new(Point::new(0.0, 0.0));
        for (x, y) in [(10.0, 0.0), (10.0, 10.0), (0.0, 0.0)] {
            let from = seq.seg_start(seq.seg_count());
            seq.push_curve(from, from, Point::new(x, y));
        }
        let out = render_path(&[seq], &[true], 6);
        assert!(out.starts_with("M 0 0 C "));
        assert!(out.ends_with(" Z"));
    }

    #[test]
    fn degenerate_run_collapses_to_one_tuple() {
        let p = Point::new(4.0, 4.0);
        let mut seq = CubicSeq::new(p);
        for _ in 0..10 {
            seq.push_point(p);
        }
        let out = render_path(&[seq], &[false], 6);
        // M + 2 coords + C + exactly one 6-coordinate tuple
        assert_eq!(out.split(' ').count(), 4 + 6);
        assert_eq!(out, "M 4 4 C 4 4 4 4 4 4");
    }

    #[test]
    fn distinct_degenerate_tuples_all_emit() {
        let mut seq = CubicSeq::new(Point::new(0.0, 0.0));
        seq.push_point(Point::new(1.0, 1.0));
        seq.push_point(Point::new(2.0, 2.0));
        let out = render_path(&[seq], &[false], 6);
        assert_eq!(out, "M 0 0 C 1 1 1 1 1 1 2 2 2 2 2 2");
    }

    #[test]
    fn subpaths_join_with_single_space() {
        let a = CubicSeq::new(Point::new(0.0, 0.0));
        let b = CubicSeq::new(Point::new(5.0, 5.0));
        let out = render_path(&[a, b], &[false, false], 6);
        assert_eq!(out, "M 0 0 C M 5 5 C");
    }

    #[test]
    fn coordinates_round_to_precision() {
        let mut seq = CubicSeq::new(Point::new(0.123_456_789, 0.0));
        let from = seq.start();
        seq.push_curve(from, from, Point::new(1.0, 1.0));
        let out = render_path(&[seq], &[false], 2);
        assert!(out.starts_with("M 0.12 0 C"));
    }
}
