use crate::{
    curves::CubicSeq,
    model::{MorphOptions, PathData, SubPath},
};

/// Two structurally-equalized point matrices plus per-index closed flags.
///
/// Both sides have the same sub-path count and, per index, the same
/// coordinate count, so coordinates interpolate one-to-one.
#[derive(Clone, Debug)]
pub struct EqualizedPair {
    pub a: Vec<CubicSeq>,
    pub b: Vec<CubicSeq>,
    pub closed: Vec<bool>,
}

/// Equalize two parsed paths for interpolation.
///
/// Sub-paths pair by descending-perimeter rank; the side with fewer
/// sub-paths gains zero-area fillers; closed pairs are re-anchored and
/// wound clockwise; finally every pair is padded to a common point count.
pub fn equalize(left: &PathData, right: &PathData, opts: &MorphOptions) -> EqualizedPair {
    let mut ls = sorted_subpaths(left);
    let mut rs = sorted_subpaths(right);

    if ls.len() != rs.len() {
        fill_subpaths(&mut ls, &mut rs);
    }

    // Rendered closed flag prefers the left side; synthesized fillers
    // already carry their counterpart's flag.
    let closed: Vec<bool> = ls.iter().map(|s| s.closed).collect();
    let normalize: Vec<bool> = ls
        .iter()
        .zip(&rs)
        .map(|(l, r)| l.closed || r.closed)
        .collect();

    let mut a: Vec<CubicSeq> = ls.into_iter().map(|s| s.points).collect();
    let mut b: Vec<CubicSeq> = rs.into_iter().map(|s| s.points).collect();

    for (i, norm) in normalize.iter().enumerate() {
        if *norm {
            normalize_orientation(&mut a[i]);
            normalize_orientation(&mut b[i]);
        }
    }

    fill_points(&mut a, &mut b, opts.add_points * 6);

    EqualizedPair { a, b, closed }
}

/// Sub-paths by descending perimeter, so the largest strokes on each side
/// pair with each other.
fn sorted_subpaths(path: &PathData) -> Vec<SubPath> {
    let mut subs = path.subpaths.clone();
    subs.sort_by(|x, y| y.perimeter.total_cmp(&x.perimeter));
    subs
}

/// Append zero-area fillers to the shorter side: the counterpart's shape
/// with every point collapsed onto its bounding-box centroid, so the
/// missing stroke grows from (or shrinks into) the shape's own center.
fn fill_subpaths(ls: &mut Vec<SubPath>, rs: &mut Vec<SubPath>) {
    let (longer, shorter) = if ls.len() >= rs.len() {
        (ls, rs)
    } else {
        (rs, ls)
    };
    for i in shorter.len()..longer.len() {
        let counterpart = &longer[i];
        let centroid = counterpart.bounds.center();
        let mut points = CubicSeq::new(centroid);
        for _ in 0..counterpart.points.seg_count() {
            points.push_point(centroid);
        }
        shorter.push(SubPath {
            points,
            closed: counterpart.closed,
            perimeter: counterpart.perimeter,
            bounds: counterpart.bounds,
        });
    }
}

/// Re-anchor a closed sub-path at its origin-nearest endpoint and make its
/// winding clockwise, so paired sub-paths traverse comparably and the
/// interpolation doesn't twist.
fn normalize_orientation(seq: &mut CubicSeq) {
    let n = seq.seg_count();
    if n == 0 {
        return;
    }
    if let Some(m) = seq.nearest_endpoint_to_origin() {
        // endpoint m becomes the start point by making m+1 the first segment
        seq.rotate_to((m + 1) % n);
    }
    if seq.signed_area() <= 0.0 {
        seq.reverse_direction();
    }
}

fn fill_points(a: &mut [CubicSeq], b: &mut [CubicSeq], extra_coords: usize) {
    for (x, y) in a.iter_mut().zip(b.iter_mut()) {
        let target = x.coord_len().max(y.coord_len()) + extra_coords;
        fill_seq(x, target);
        fill_seq(y, target);
    }
}

/// Pad `seq` to `target_len` coordinates by inserting zero-length segments
/// after existing ones, spread evenly across the sub-path.
fn fill_seq(seq: &mut CubicSeq, target_len: usize) {
    let len = seq.coord_len();
    if len >= target_len {
        return;
    }
    let deficit = (target_len - len) / 6;
    let n = seq.seg_count();
    if n == 0 {
        let p = seq.start();
        for _ in 0..deficit {
            seq.push_point(p);
        }
        return;
    }

    let per_seg = deficit.div_ceil(n);
    let mut remaining = deficit;
    let mut out = CubicSeq::new(seq.start());
    for i in 0..n {
        out.push_curve(seq.ctrl1(i), seq.ctrl2(i), seq.end(i));
        let insert = per_seg.min(remaining);
        let p = seq.end(i);
        for _ in 0..insert {
            out.push_point(p);
        }
        remaining -= insert;
    }
    debug_assert_eq!(remaining, 0);
    debug_assert_eq!(out.coord_len(), target_len);
    *seq = out;
}
