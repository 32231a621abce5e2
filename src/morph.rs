use crate::{
    curves::CubicSeq,
    ease::Ease,
    equalize::equalize,
    error::{MorphError, MorphResult},
    model::{MorphOptions, PathData},
    render::render_path,
};

/// A prepared shape tween between two parsed paths.
///
/// Construction runs parsing-independent setup once (pairing, filling,
/// orientation normalization); sampling is a pure function of progress and
/// can be called at any rate, in any order, from any thread.
#[derive(Clone, Debug)]
pub struct Morph {
    a: Vec<CubicSeq>,
    b: Vec<CubicSeq>,
    closed: Vec<bool>,
    precision: u8,
}

impl Morph {
    /// Build a sampler from two or more parsed paths.
    ///
    /// Additional paths beyond the first adjacent pair are accepted but do
    /// not contribute; multi-stop chaining is out of scope.
    #[tracing::instrument(skip(paths, opts), fields(count = paths.len()))]
    pub fn new(paths: &[PathData], opts: MorphOptions) -> MorphResult<Self> {
        if paths.len() < 2 {
            return Err(MorphError::validation(
                "morphing requires at least two parsed paths",
            ));
        }
        let pair = equalize(&paths[0], &paths[1], &opts);
        Ok(Self {
            a: pair.a,
            b: pair.b,
            closed: pair.closed,
            precision: opts.precision,
        })
    }

    /// Interpolated path data at `progress` (clamped to `0..=1`).
    pub fn sample(&self, progress: f64, ease: Ease) -> String {
        let bufs: Vec<CubicSeq> = self
            .a
            .iter()
            .zip(&self.b)
            .map(|(x, y)| {
                let coords = x
                    .as_slice()
                    .iter()
                    .zip(y.as_slice())
                    .map(|(&from, &to)| ease.tween(from, to, progress))
                    .collect();
                CubicSeq::from_raw(coords)
            })
            .collect();
        render_path(&bufs, &self.closed, self.precision)
    }

    pub fn sample_linear(&self, progress: f64) -> String {
        self.sample(progress, Ease::Linear)
    }

    pub fn pair_count(&self) -> usize {
        self.a.len()
    }

    pub fn pair(&self, i: usize) -> (&CubicSeq, &CubicSeq) {
        (&self.a[i], &self.b[i])
    }

    pub fn is_closed(&self, i: usize) -> bool {
        self.closed[i]
    }
}
