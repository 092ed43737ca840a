//! # Vocabulary IO
//!
//! ## Loading A Model
//!
//! ```rust,no_run
//! use piecechipper::{
//!     encoders::{PieceEncoder, TokenEncoder},
//!     vocab::{PieceModel, io::load_model_path},
//! };
//!
//! fn example() -> piecechipper::PCResult<Vec<u32>> {
//!     let model: PieceModel<u32> = load_model_path("model.pchp")?;
//!     let encoder = PieceEncoder::new(model, Default::default());
//!     encoder.try_encode("hello world")
//! }
//! ```
//!
//! ## Building A Model From A Text Vocab
//!
//! ```rust,no_run
//! use piecechipper::{
//!     normalize::NormalizerConfig,
//!     vocab::{
//!         PieceModel,
//!         PieceVocab,
//!         io::{load_text_vocab_path, save_model_path},
//!     },
//! };
//!
//! fn example() -> piecechipper::PCResult<()> {
//!     let vocab: PieceVocab<u32> = load_text_vocab_path("model.vocab")?;
//!     let model = PieceModel::new(NormalizerConfig::default(), vocab);
//!     save_model_path(&model, "model.pchp")
//! }
//! ```

mod model_io;
mod text_vocab_io;

#[doc(inline)]
pub use model_io::*;
#[doc(inline)]
pub use text_vocab_io::*;
