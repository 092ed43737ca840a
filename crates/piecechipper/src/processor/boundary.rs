//! # Status-Code Boundary
//!
//! A flat, handle-oriented surface over [`Processor`], shaped for binding
//! from a foreign runtime: every fallible call reports a [`StatusCode`]
//! instead of an error, ids are signed 32-bit, and absent special ids are
//! `-1`.
//!
//! Returned buffers are owned values. The paired `*_free` functions consume
//! them, so each buffer is released exactly once.
//!
//! ```rust,no_run
//! use piecechipper::processor::boundary::*;
//!
//! let handle = processor_new();
//! assert!(processor_load(&handle, "model.pchp").is_ok());
//!
//! let (ids, status) = encode(&handle, "hello world".as_bytes());
//! assert!(status.is_ok());
//!
//! let (text, status) = decode(&handle, ids.as_slice());
//! assert!(status.is_ok());
//! println!("{}", text.as_str());
//!
//! ids_free(ids);
//! string_free(text);
//! processor_free(handle);
//! ```

use std::path::Path;

use crate::{
    errors::{PCError, PCResult},
    processor::{Processor, StatusCode},
    vocab::id_or_sentinel,
};

/// An owned processor handle.
#[derive(Debug, Default)]
pub struct ProcessorHandle {
    processor: Processor<u32>,
}

impl ProcessorHandle {
    /// Get the wrapped processor.
    pub fn processor(&self) -> &Processor<u32> {
        &self.processor
    }
}

/// Ids returned by [`encode`]; release with [`ids_free`].
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct IdBuffer {
    ids: Vec<i32>,
}

impl IdBuffer {
    /// The ids.
    pub fn as_slice(&self) -> &[i32] {
        &self.ids
    }

    /// The number of ids.
    pub fn len(&self) -> usize {
        self.ids.len()
    }

    /// Is the buffer empty?
    pub fn is_empty(&self) -> bool {
        self.ids.is_empty()
    }

    /// Take the ids.
    pub fn into_vec(self) -> Vec<i32> {
        self.ids
    }
}

/// Text returned by [`decode`]; release with [`string_free`].
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TextBuffer {
    text: String,
}

impl TextBuffer {
    /// The text.
    pub fn as_str(&self) -> &str {
        &self.text
    }

    /// The UTF-8 bytes.
    pub fn as_bytes(&self) -> &[u8] {
        self.text.as_bytes()
    }

    /// Take the text.
    pub fn into_string(self) -> String {
        self.text
    }
}

/// Create an unloaded processor.
pub fn processor_new() -> ProcessorHandle {
    ProcessorHandle::default()
}

/// Release and destroy a processor.
pub fn processor_free(handle: ProcessorHandle) {
    handle.processor.release();
}

/// Load a model file into a processor.
pub fn processor_load<P: AsRef<Path>>(
    handle: &ProcessorHandle,
    model_path: P,
) -> StatusCode {
    StatusCode::of(&handle.processor.load_path(model_path))
}

fn ids_to_i32(
    ids: Vec<u32>,
    vocab_size: usize,
) -> PCResult<Vec<i32>> {
    ids.into_iter()
        .map(|id| {
            i32::try_from(id).map_err(|_| PCError::InvalidId {
                id: id as i64,
                vocab_size,
            })
        })
        .collect()
}

/// Encode UTF-8 bytes; malformed sequences are tolerated.
///
/// On failure the buffer is empty.
pub fn encode(
    handle: &ProcessorHandle,
    text: &[u8],
) -> (IdBuffer, StatusCode) {
    let processor = &handle.processor;
    match processor
        .encode_bytes(text)
        .and_then(|ids| ids_to_i32(ids, processor.vocab_size()))
    {
        Ok(ids) => (IdBuffer { ids }, StatusCode::Ok),
        Err(err) => (IdBuffer::default(), StatusCode::from(&err)),
    }
}

/// Release an [`IdBuffer`].
pub fn ids_free(ids: IdBuffer) {
    drop(ids);
}

/// Decode ids into UTF-8 text.
///
/// On failure the buffer is empty; there is no partial output.
pub fn decode(
    handle: &ProcessorHandle,
    ids: &[i32],
) -> (TextBuffer, StatusCode) {
    let ids: Vec<i64> = ids.iter().map(|&id| id as i64).collect();
    match handle.processor.decode_i64(&ids) {
        Ok(text) => (TextBuffer { text }, StatusCode::Ok),
        Err(err) => (TextBuffer::default(), StatusCode::from(&err)),
    }
}

/// Release a [`TextBuffer`].
pub fn string_free(text: TextBuffer) {
    drop(text);
}

/// The end-of-sequence id, or `-1`.
pub fn eos_id(handle: &ProcessorHandle) -> i32 {
    id_or_sentinel(handle.processor.eos_id())
}

/// The beginning-of-sequence id, or `-1`.
pub fn bos_id(handle: &ProcessorHandle) -> i32 {
    id_or_sentinel(handle.processor.bos_id())
}

/// The vocabulary size, or `0` when no model is loaded.
pub fn vocab_size(handle: &ProcessorHandle) -> u32 {
    u32::try_from(handle.processor.vocab_size()).unwrap_or(u32::MAX)
}
