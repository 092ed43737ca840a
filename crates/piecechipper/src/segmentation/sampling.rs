//! # Sampled Segmentation
//!
//! Forward-filtering backward-sampling over the same lattice the Viterbi
//! search walks. A path is drawn with probability proportional to
//! `exp(alpha * score(path))`; large `alpha` approaches the best path,
//! `alpha == 0` is uniform over all paths.

use rand::Rng;

use crate::{
    segmentation::{LatticeEdge, Segment, Segmenter},
    types::TokenType,
};

/// Options for sampled encoding.
///
/// ## Style Hints
/// Instance names should prefer `sampling`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SamplingOptions {
    alpha: f32,
}

impl Default for SamplingOptions {
    fn default() -> Self {
        Self { alpha: 0.1 }
    }
}

impl SamplingOptions {
    /// Get the smoothing parameter.
    pub fn alpha(&self) -> f32 {
        self.alpha
    }

    /// Set the smoothing parameter.
    pub fn set_alpha(
        &mut self,
        alpha: f32,
    ) {
        self.alpha = alpha;
    }

    /// Set the smoothing parameter.
    pub fn with_alpha(
        mut self,
        alpha: f32,
    ) -> Self {
        self.set_alpha(alpha);
        self
    }
}

fn log_add_exp(
    a: f64,
    b: f64,
) -> f64 {
    if a == f64::NEG_INFINITY {
        return b;
    }
    if b == f64::NEG_INFINITY {
        return a;
    }
    let (hi, lo) = if a > b { (a, b) } else { (b, a) };
    hi + (lo - hi).exp().ln_1p()
}

impl<T: TokenType> Segmenter<T> {
    /// Draw one segmentation of normalized text.
    ///
    /// ## Arguments
    /// * `text` - the normalized text.
    /// * `alpha` - the inverse temperature applied to piece scores.
    /// * `rng` - the random source; seed it for reproducible draws.
    pub fn segment_sampled<R: Rng + ?Sized>(
        &self,
        text: &[u8],
        alpha: f32,
        rng: &mut R,
    ) -> Vec<Segment<T>> {
        let alpha = alpha as f64;
        let mut forward = vec![f64::NEG_INFINITY; text.len() + 1];
        forward[0] = 0.0;

        // Edges grouped by end offset.
        let mut incoming: Vec<Vec<LatticeEdge<T>>> = vec![Vec::new(); text.len() + 1];

        for start in 0..text.len() {
            let base = forward[start];
            if base == f64::NEG_INFINITY {
                continue;
            }
            self.for_each_edge(text, start, |edge| {
                let end = edge.segment.end;
                forward[end] = log_add_exp(forward[end], base + alpha * edge.score as f64);
                incoming[end].push(edge);
            });
        }

        let mut segments = Vec::new();
        let mut pos = text.len();
        while pos > 0 {
            let edges = &incoming[pos];
            let weights: Vec<f64> = edges
                .iter()
                .map(|e| {
                    (forward[e.segment.start] + alpha * e.score as f64 - forward[pos]).exp()
                })
                .collect();
            let total: f64 = weights.iter().sum();

            let mut target = rng.random::<f64>() * total;
            let mut chosen = edges.len() - 1;
            for (idx, w) in weights.iter().enumerate() {
                if target < *w {
                    chosen = idx;
                    break;
                }
                target -= w;
            }

            let segment = edges[chosen].segment;
            segments.push(segment);
            pos = segment.start;
        }
        segments.reverse();
        segments
    }
}
