//! # Processor
//!
//! [`Processor`] is the long-lived owner of one loaded model: it builds the
//! normalizer, trie, encoder, and decoder at load, and serves concurrent
//! encode/decode calls until it is released.
//!
//! [`boundary`] wraps a processor in a status-code surface with owned id
//! and text buffers.

pub mod boundary;
mod piece_processor;
mod processor_options;
mod status;

#[doc(inline)]
pub use piece_processor::{Lifecycle, Processor};
#[doc(inline)]
pub use processor_options::ProcessorOptions;
#[doc(inline)]
pub use status::StatusCode;
