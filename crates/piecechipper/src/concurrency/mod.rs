//! # Concurrency Support

#[cfg(feature = "rayon")]
pub mod rayon;
