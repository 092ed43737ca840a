//! # Token Decoders
//!
//! ## Example
//!
//! ```rust,no_run
//! use piecechipper::{
//!     PCResult,
//!     TokenType,
//!     decoders::{PieceDecoder, TokenDecoder},
//!     vocab::PieceModel,
//! };
//!
//! fn example<T: TokenType>(
//!     model: &PieceModel<T>,
//!     tokens: &[T],
//! ) -> PCResult<String> {
//!     PieceDecoder::new(model).try_decode_to_string(tokens)
//! }
//! ```

mod piece_decoder;
mod token_decoder;

#[doc(inline)]
pub use piece_decoder::*;
#[doc(inline)]
pub use token_decoder::*;
