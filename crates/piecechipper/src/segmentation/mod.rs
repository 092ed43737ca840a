//! # Unigram Segmentation
//!
//! [`Segmenter`] finds the highest-scoring split of normalized text into
//! vocabulary pieces by a Viterbi search over byte offsets, using a
//! per-call [`SegmentationLattice`]. Characters no piece covers become
//! [`SegmentKind::Unknown`] segments; the encoders decide whether those
//! expand to byte-fallback pieces or collapse into the unknown id.
//!
//! [`Segmenter::segment_sampled`] draws a segmentation instead of taking
//! the best one.

pub mod lattice;
pub mod sampling;
pub mod segmenter;

#[doc(inline)]
pub use lattice::{LatticeEdge, Segment, SegmentKind, SegmentationLattice};
#[doc(inline)]
pub use sampling::SamplingOptions;
#[doc(inline)]
pub use segmenter::{Segmenter, UNK_PENALTY};
