//! # `piecechipper` Unigram Subword Tokenizer
//!
//! This is a unigram-language-model subword tokenizer: text is normalized,
//! then split into the highest-scoring sequence of vocabulary pieces.
//!
//! See:
//! * [`vocab`] to build, load, and save piece vocabularies and models.
//! * [`normalize`] for the normalization policy stored in a model.
//! * [`segmentation`] for the Viterbi and sampled segmenters.
//! * [`encoders`] to encode text into ids.
//! * [`decoders`] to decode ids into text.
//! * [`processor`] for the load / release lifecycle and the status-code boundary.
//!
//! ## Crate Features
#![doc = document_features::document_features!()]
//!
//! ## Example
//!
//! ```rust,no_run
//! use piecechipper::{PCResult, Processor, ProcessorOptions};
//!
//! fn example() -> PCResult<()> {
//!     let processor: Processor = Processor::new(ProcessorOptions::default());
//!     processor.load_path("model.pchp")?;
//!
//!     let ids = processor.encode("hello world")?;
//!     let text = processor.decode(&ids)?;
//!     assert_eq!(text, "hello world");
//!
//!     processor.release();
//!     Ok(())
//! }
//! ```
#![warn(missing_docs, unused)]

pub mod concurrency;
pub mod decoders;
pub mod encoders;
pub mod errors;
pub mod normalize;
pub mod processor;
pub mod segmentation;
pub mod support;
pub mod trie;
pub mod types;
pub mod vocab;

#[doc(inline)]
pub use decoders::{PieceDecoder, TokenDecoder};
#[doc(inline)]
pub use encoders::{PieceEncoder, TokenEncoder, TokenEncoderOptions};
#[doc(inline)]
pub use errors::{LoadError, PCError, PCResult};
#[doc(inline)]
pub use processor::{Lifecycle, Processor, ProcessorOptions, StatusCode};
#[doc(inline)]
pub use types::TokenType;
#[doc(inline)]
pub use vocab::{PieceModel, PieceVocab};
