use kurbo::{Point, Rect};

/// Contiguous cubic-bezier storage for one sub-path.
///
/// Layout is a flat `[startX, startY]` followed by one
/// `(c1x, c1y, c2x, c2y, endX, endY)` tuple per curve segment, so the
/// coordinate count is always `2 + 6 * seg_count`. Straight lines are stored
/// as cubics whose control points sit on the segment's start point.
#[derive(Clone, Debug, PartialEq)]
pub struct CubicSeq {
    coords: Vec<f64>,
}

impl CubicSeq {
    pub fn new(start: Point) -> Self {
        Self {
            coords: vec![start.x, start.y],
        }
    }

    pub(crate) fn from_raw(coords: Vec<f64>) -> Self {
        debug_assert!(coords.len() >= 2 && (coords.len() - 2) % 6 == 0);
        Self { coords }
    }

    /// Raw coordinate count (`2 + 6 * seg_count`).
    pub fn coord_len(&self) -> usize {
        self.coords.len()
    }

    pub fn seg_count(&self) -> usize {
        (self.coords.len() - 2) / 6
    }

    pub fn as_slice(&self) -> &[f64] {
        &self.coords
    }

    pub fn start(&self) -> Point {
        Point::new(self.coords[0], self.coords[1])
    }

    pub fn set_start(&mut self, p: Point) {
        self.coords[0] = p.x;
        self.coords[1] = p.y;
    }

    fn base(&self, seg: usize) -> usize {
        debug_assert!(seg < self.seg_count());
        2 + 6 * seg
    }

    pub fn ctrl1(&self, seg: usize) -> Point {
        let b = self.base(seg);
        Point::new(self.coords[b], self.coords[b + 1])
    }

    pub fn ctrl2(&self, seg: usize) -> Point {
        let b = self.base(seg);
        Point::new(self.coords[b + 2], self.coords[b + 3])
    }

    pub fn end(&self, seg: usize) -> Point {
        let b = self.base(seg);
        Point::new(self.coords[b + 4], self.coords[b + 5])
    }

    /// On-curve point at which segment `seg` begins.
    pub fn seg_start(&self, seg: usize) -> Point {
        if seg == 0 {
            self.start()
        } else {
            self.end(seg - 1)
        }
    }

    pub fn push_curve(&mut self, c1: Point, c2: Point, end: Point) {
        self.coords
            .extend([c1.x, c1.y, c2.x, c2.y, end.x, end.y]);
    }

    /// Zero-length segment pinned at `p`; renders as nothing.
    pub fn push_point(&mut self, p: Point) {
        self.push_curve(p, p, p);
    }

    /// Bounding box over the start point and all segment endpoints.
    /// Control points are excluded; the box is an anchor for filler
    /// synthesis, not a tight curve extent.
    pub fn bounds(&self) -> Rect {
        let s = self.start();
        let (mut x0, mut y0, mut x1, mut y1) = (s.x, s.y, s.x, s.y);
        for i in 0..self.seg_count() {
            let p = self.end(i);
            x0 = x0.min(p.x);
            y0 = y0.min(p.y);
            x1 = x1.max(p.x);
            y1 = y1.max(p.y);
        }
        Rect::new(x0, y0, x1, y1)
    }

    /// Sum of straight-line distances around the endpoint ring, floored.
    /// A sort key for pairing sub-paths, not an arc length.
    pub fn perimeter(&self) -> f64 {
        let n = self.seg_count();
        if n == 0 {
            return 0.0;
        }
        let mut p = self.start().distance(self.end(n - 1));
        for i in 0..n {
            p += self.end(i).distance(self.seg_start(i));
        }
        p.floor()
    }

    /// Shoelace signed area over the endpoint ring. Positive means clockwise
    /// under the screen convention (y grows downward).
    pub fn signed_area(&self) -> f64 {
        let n = self.seg_count();
        let mut area = 0.0;
        for i in 0..n {
            let a = self.end(i);
            let b = self.end((i + 1) % n);
            area += a.x * b.y - b.x * a.y;
        }
        area / 2.0
    }

    /// Index of the segment whose endpoint lies nearest the coordinate
    /// origin; the first wins on ties. `None` when there are no segments.
    pub fn nearest_endpoint_to_origin(&self) -> Option<usize> {
        let mut best: Option<(usize, f64)> = None;
        for i in 0..self.seg_count() {
            let d = self.end(i).distance(Point::ORIGIN);
            if best.is_none_or(|(_, bd)| d < bd) {
                best = Some((i, d));
            }
        }
        best.map(|(i, _)| i)
    }

    /// Rotate the segment sequence so segment `k` becomes segment 0 and the
    /// start point becomes segment `k`'s original start vertex.
    ///
    /// Length is preserved. Only meaningful for closed sub-paths, where the
    /// traced outline is unchanged.
    pub fn rotate_to(&mut self, k: usize) {
        let n = self.seg_count();
        if n == 0 || k == 0 {
            return;
        }
        debug_assert!(k < n);
        let mut out = Vec::with_capacity(self.coords.len());
        let anchor = self.end(k - 1);
        out.push(anchor.x);
        out.push(anchor.y);
        for i in 0..n {
            let b = 2 + 6 * ((k + i) % n);
            out.extend_from_slice(&self.coords[b..b + 6]);
        }
        self.coords = out;
    }

    /// Reverse the traversal direction in place.
    ///
    /// The two control points of every segment swap roles and re-attach to
    /// the segment now traced in the opposite direction; the start point is
    /// kept (for a closed sub-path it coincides with the final endpoint).
    /// Length is preserved and the traced outline is unchanged.
    pub fn reverse_direction(&mut self) {
        let n = self.seg_count();
        let mut out = Vec::with_capacity(self.coords.len());
        let start = self.start();
        out.push(start.x);
        out.push(start.y);
        for seg in (0..n).rev() {
            let c1 = self.ctrl1(seg);
            let c2 = self.ctrl2(seg);
            let v = self.seg_start(seg);
            out.extend([c2.x, c2.y, c1.x, c1.y, v.x, v.y]);
        }
        self.coords = out;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    // Unit square, clockwise under y-down: (0,0) -> (10,0) -> (10,10) -> (0,10) -> close.
    fn square() -> CubicSeq {
        let mut seq = CubicSeq::new(Point::new(0.0, 0.0));
        for (x, y) in [(10.0, 0.0), (10.0, 10.0), (0.0, 10.0), (0.0, 0.0)] {
            let from = seq.seg_start(seq.seg_count());
            seq.push_curve(from, from, Point::new(x, y));
        }
        seq
    }

    #[test]
    fn layout_invariant_holds() {
        let seq = square();
        assert_eq!(seq.coord_len(), 2 + 6 * 4);
        assert_eq!(seq.seg_count(), 4);
        assert_eq!(seq.start(), Point::new(0.0, 0.0));
        assert_eq!(seq.end(3), Point::new(0.0, 0.0));
    }

    #[test]
    fn bounds_and_perimeter() {
        let seq = square();
        assert_eq!(seq.bounds(), Rect::new(0.0, 0.0, 10.0, 10.0));
        assert_eq!(seq.perimeter(), 40.0);
    }

    #[test]
    fn signed_area_is_positive_clockwise() {
        let seq = square();
        assert!(seq.signed_area() > 0.0);
        let mut rev = seq.clone();
        rev.reverse_direction();
        assert!(rev.signed_area() < 0.0);
    }

    #[test]
    fn rotate_preserves_length_and_reanchors() {
        let mut seq = square();
        seq.rotate_to(2);
        assert_eq!(seq.coord_len(), 2 + 6 * 4);
        // segment 2 started at (10,10); that vertex is now the start
        assert_eq!(seq.start(), Point::new(10.0, 10.0));
        assert_eq!(seq.end(3), Point::new(10.0, 10.0));
    }

    #[test]
    fn rotate_zero_is_identity() {
        let mut seq = square();
        let before = seq.clone();
        seq.rotate_to(0);
        assert_eq!(seq, before);
    }

    #[test]
    fn reverse_swaps_control_roles() {
        let mut seq = CubicSeq::new(Point::new(0.0, 0.0));
        seq.push_curve(
            Point::new(1.0, 2.0),
            Point::new(3.0, 4.0),
            Point::new(5.0, 0.0),
        );
        seq.push_curve(
            Point::new(6.0, 2.0),
            Point::new(7.0, 4.0),
            Point::new(0.0, 0.0),
        );
        seq.reverse_direction();
        assert_eq!(seq.start(), Point::new(0.0, 0.0));
        // last segment first, controls exchanged
        assert_eq!(seq.ctrl1(0), Point::new(7.0, 4.0));
        assert_eq!(seq.ctrl2(0), Point::new(6.0, 2.0));
        assert_eq!(seq.end(0), Point::new(5.0, 0.0));
        assert_eq!(seq.ctrl1(1), Point::new(3.0, 4.0));
        assert_eq!(seq.ctrl2(1), Point::new(1.0, 2.0));
        assert_eq!(seq.end(1), Point::new(0.0, 0.0));
    }

    #[test]
    fn nearest_endpoint_picks_minimum_distance() {
        let seq = square();
        // endpoints: (10,0) (10,10) (0,10) (0,0) -> index 3 is nearest the origin
        assert_eq!(seq.nearest_endpoint_to_origin(), Some(3));
    }
}
