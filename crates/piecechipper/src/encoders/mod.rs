//! # Token Encoders
//!
//! ## Example
//!
//! ```rust,no_run
//! use piecechipper::{
//!     PCResult,
//!     TokenType,
//!     encoders::{TokenEncoder, TokenEncoderOptions},
//!     vocab::PieceModel,
//! };
//!
//! fn example<T: TokenType>(
//!     model: &PieceModel<T>,
//!     batch: &[&str],
//! ) -> PCResult<Vec<Vec<T>>> {
//!     let encoder = TokenEncoderOptions::default()
//!         .with_add_eos(true)
//!         .with_parallel(true)
//!         .build(model);
//!     encoder.try_encode_batch(batch)
//! }
//! ```

mod encoder_options;
mod piece_encoder;
mod token_encoder;

#[doc(inline)]
pub use encoder_options::*;
#[doc(inline)]
pub use piece_encoder::*;
#[doc(inline)]
pub use token_encoder::*;
