//! # Processor Facade

use std::{path::Path, sync::Arc};

use parking_lot::RwLock;
use rand::Rng;

use crate::{
    decoders::{PieceDecoder, TokenDecoder},
    encoders::{PieceEncoder, TokenEncoder},
    errors::{PCError, PCResult},
    processor::ProcessorOptions,
    segmentation::SamplingOptions,
    types::TokenType,
    vocab::{
        Piece,
        PieceKind,
        PieceModel,
        io::{load_model_path, read_model_bytes},
    },
};

/// Lifecycle of a [`Processor`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Lifecycle {
    /// No model has been loaded.
    Unloaded,

    /// A model is loaded; encode and decode are available.
    Loaded,

    /// The processor was released; it cannot be loaded again.
    Released,
}

/// Everything built from one loaded model.
struct LoadedModel<T: TokenType> {
    model: PieceModel<T>,
    encoder: PieceEncoder<T>,
    batch_encoder: Arc<dyn TokenEncoder<T>>,
    decoder: Arc<dyn TokenDecoder<T>>,
}

impl<T: TokenType> LoadedModel<T> {
    fn build(
        model: PieceModel<T>,
        options: &ProcessorOptions,
    ) -> Self {
        let encoder = PieceEncoder::new(model.clone(), *options.encoder());
        let piece_decoder = PieceDecoder::new(&model);

        #[allow(unused_mut)]
        let mut batch_encoder: Arc<dyn TokenEncoder<T>> = Arc::new(encoder.clone());
        #[allow(unused_mut)]
        let mut decoder: Arc<dyn TokenDecoder<T>> = Arc::new(piece_decoder.clone());

        #[cfg(feature = "rayon")]
        if options.parallel() {
            use crate::concurrency::rayon::{ParallelRayonDecoder, ParallelRayonEncoder};
            batch_encoder = Arc::new(ParallelRayonEncoder::new(encoder.clone()));
            decoder = Arc::new(ParallelRayonDecoder::new(piece_decoder));
        }

        Self {
            model,
            encoder,
            batch_encoder,
            decoder,
        }
    }

    fn piece(
        &self,
        id: T,
    ) -> PCResult<&Piece<T>> {
        self.model
            .vocab()
            .piece_at(id)
            .ok_or_else(|| PCError::InvalidId {
                id: id.to_i64().unwrap_or(i64::MAX),
                vocab_size: self.model.vocab_size(),
            })
    }
}

enum ProcessorState<T: TokenType> {
    Unloaded,
    Loaded(LoadedModel<T>),
    Released,
}

/// The long-lived tokenizer handle.
///
/// Moves through `Unloaded -> Loaded -> Released`. Encode and decode take a
/// shared lock and run concurrently; load and release take the exclusive
/// lock, so they never overlap an in-flight call.
///
/// * A failed load leaves the processor in its prior state.
/// * Loading again while loaded replaces the model.
/// * [`Processor::release`] is idempotent and terminal.
///
/// ## Style Hints
/// Instance names should prefer `processor`.
pub struct Processor<T: TokenType = u32> {
    options: ProcessorOptions,
    state: RwLock<ProcessorState<T>>,
}

impl<T: TokenType> Default for Processor<T> {
    fn default() -> Self {
        Self::new(ProcessorOptions::default())
    }
}

impl<T: TokenType> core::fmt::Debug for Processor<T> {
    fn fmt(
        &self,
        f: &mut core::fmt::Formatter<'_>,
    ) -> core::fmt::Result {
        f.debug_struct("Processor")
            .field("options", &self.options)
            .field("lifecycle", &self.lifecycle())
            .field("vocab_size", &self.vocab_size())
            .finish()
    }
}

impl<T: TokenType> Processor<T> {
    /// Create an unloaded processor.
    pub fn new(options: ProcessorOptions) -> Self {
        Self {
            options,
            state: RwLock::new(ProcessorState::Unloaded),
        }
    }

    /// Get the options.
    pub fn options(&self) -> &ProcessorOptions {
        &self.options
    }

    /// The current lifecycle state.
    pub fn lifecycle(&self) -> Lifecycle {
        match &*self.state.read() {
            ProcessorState::Unloaded => Lifecycle::Unloaded,
            ProcessorState::Loaded(_) => Lifecycle::Loaded,
            ProcessorState::Released => Lifecycle::Released,
        }
    }

    /// Is a model loaded?
    pub fn is_loaded(&self) -> bool {
        self.lifecycle() == Lifecycle::Loaded
    }

    /// Load a model file.
    ///
    /// ## Errors
    /// * [`crate::LoadError`] variants for a missing or malformed artifact.
    /// * [`PCError::Released`] after [`Processor::release`].
    pub fn load_path<P: AsRef<Path>>(
        &self,
        path: P,
    ) -> PCResult<()> {
        let path = path.as_ref();
        self.check_not_released()?;
        match load_model_path(path) {
            Ok(model) => {
                log::debug!("read model from {}", path.display());
                self.load_model(model)
            }
            Err(err) => {
                log::warn!("failed to load model from {}: {err}", path.display());
                Err(err)
            }
        }
    }

    /// Load a model from the bytes of a model artifact.
    pub fn load_bytes(
        &self,
        bytes: &[u8],
    ) -> PCResult<()> {
        self.check_not_released()?;
        match read_model_bytes(bytes) {
            Ok(model) => self.load_model(model),
            Err(err) => {
                log::warn!("failed to load model from bytes: {err}");
                Err(err.into())
            }
        }
    }

    /// Load an in-memory model.
    pub fn load_model(
        &self,
        model: PieceModel<T>,
    ) -> PCResult<()> {
        let loaded = LoadedModel::build(model, &self.options);
        let vocab_size = loaded.model.vocab_size();

        let mut state = self.state.write();
        if let ProcessorState::Released = *state {
            return Err(PCError::Released);
        }
        *state = ProcessorState::Loaded(loaded);
        drop(state);

        log::info!("loaded model with {vocab_size} pieces");
        Ok(())
    }

    /// Release the loaded model.
    ///
    /// Idempotent; every later encode or decode fails with [`PCError::NotLoaded`].
    pub fn release(&self) {
        let mut state = self.state.write();
        if !matches!(*state, ProcessorState::Released) {
            *state = ProcessorState::Released;
            log::debug!("processor released");
        }
    }

    fn check_not_released(&self) -> PCResult<()> {
        match &*self.state.read() {
            ProcessorState::Released => Err(PCError::Released),
            _ => Ok(()),
        }
    }

    fn with_loaded<R, F>(
        &self,
        f: F,
    ) -> PCResult<R>
    where
        F: FnOnce(&LoadedModel<T>) -> PCResult<R>,
    {
        match &*self.state.read() {
            ProcessorState::Loaded(loaded) => f(loaded),
            _ => Err(PCError::NotLoaded),
        }
    }

    /// A clone of the loaded model.
    pub fn model(&self) -> PCResult<PieceModel<T>> {
        self.with_loaded(|loaded| Ok(loaded.model.clone()))
    }

    /// Encode text into ids.
    pub fn encode(
        &self,
        text: &str,
    ) -> PCResult<Vec<T>> {
        self.with_loaded(|loaded| loaded.encoder.try_encode(text))
    }

    /// Encode possibly-malformed UTF-8 bytes into ids.
    pub fn encode_bytes(
        &self,
        text: &[u8],
    ) -> PCResult<Vec<T>> {
        self.with_loaded(|loaded| loaded.encoder.try_encode_bytes(text))
    }

    /// Encode text into piece strings.
    pub fn encode_as_pieces(
        &self,
        text: &str,
    ) -> PCResult<Vec<String>> {
        self.with_loaded(|loaded| Ok(loaded.encoder.encode_as_pieces(text)))
    }

    /// Encode text with a sampled segmentation.
    pub fn encode_sampled<R: Rng + ?Sized>(
        &self,
        text: &str,
        sampling: &SamplingOptions,
        rng: &mut R,
    ) -> PCResult<Vec<T>> {
        self.with_loaded(|loaded| loaded.encoder.try_encode_sampled(text, sampling, rng))
    }

    /// Encode a batch of text; threaded when the options ask for it.
    pub fn encode_batch(
        &self,
        batch: &[&str],
    ) -> PCResult<Vec<Vec<T>>> {
        self.with_loaded(|loaded| loaded.batch_encoder.try_encode_batch(batch))
    }

    /// Decode ids into text.
    ///
    /// ## Errors
    /// [`PCError::InvalidId`] for any id outside `[0, vocab_size)`;
    /// no partial output is produced.
    pub fn decode(
        &self,
        ids: &[T],
    ) -> PCResult<String> {
        self.with_loaded(|loaded| loaded.decoder.try_decode_to_string(ids))
    }

    /// Decode signed boundary ids into text.
    pub fn decode_i64(
        &self,
        ids: &[i64],
    ) -> PCResult<String> {
        self.with_loaded(|loaded| {
            let vocab = loaded.model.vocab();
            let ids = ids
                .iter()
                .map(|&id| vocab.try_piece_at_i64(id).map(|p| p.id))
                .collect::<PCResult<Vec<T>>>()?;
            loaded.decoder.try_decode_to_string(&ids)
        })
    }

    /// Decode a batch of id sequences; threaded when the options ask for it.
    pub fn decode_batch(
        &self,
        batch: &[&[T]],
    ) -> PCResult<Vec<String>> {
        self.with_loaded(|loaded| loaded.decoder.try_decode_batch_to_strings(batch))
    }

    /// The number of pieces; `0` when no model is loaded.
    pub fn vocab_size(&self) -> usize {
        self.with_loaded(|loaded| Ok(loaded.model.vocab_size()))
            .unwrap_or(0)
    }

    fn special(
        &self,
        select: impl FnOnce(&LoadedModel<T>) -> Option<T>,
    ) -> Option<T> {
        self.with_loaded(|loaded| Ok(select(loaded))).ok().flatten()
    }

    /// The beginning-of-sequence id; `None` when absent or not loaded.
    pub fn bos_id(&self) -> Option<T> {
        self.special(|loaded| loaded.model.vocab().bos_id())
    }

    /// The end-of-sequence id; `None` when absent or not loaded.
    pub fn eos_id(&self) -> Option<T> {
        self.special(|loaded| loaded.model.vocab().eos_id())
    }

    /// The unknown id; `None` when absent or not loaded.
    pub fn unk_id(&self) -> Option<T> {
        self.special(|loaded| loaded.model.vocab().unk_id())
    }

    /// The padding id; `None` when absent or not loaded.
    pub fn pad_id(&self) -> Option<T> {
        self.special(|loaded| loaded.model.vocab().pad_id())
    }

    /// Exact lookup of a piece surface.
    pub fn piece_to_id(
        &self,
        piece: &str,
    ) -> PCResult<Option<T>> {
        self.with_loaded(|loaded| Ok(loaded.model.vocab().id_of(piece.as_bytes())))
    }

    /// The surface of a piece.
    pub fn id_to_piece(
        &self,
        id: T,
    ) -> PCResult<String> {
        self.with_loaded(|loaded| Ok(loaded.piece(id)?.surface_lossy().into_owned()))
    }

    /// The score of a piece.
    pub fn piece_score(
        &self,
        id: T,
    ) -> PCResult<f32> {
        self.with_loaded(|loaded| Ok(loaded.piece(id)?.score))
    }

    /// The kind of a piece.
    pub fn piece_kind(
        &self,
        id: T,
    ) -> PCResult<PieceKind> {
        self.with_loaded(|loaded| Ok(loaded.piece(id)?.kind))
    }

    /// Is the piece a control symbol?
    pub fn is_control(
        &self,
        id: T,
    ) -> PCResult<bool> {
        Ok(self.piece_kind(id)? == PieceKind::Control)
    }

    /// Is the piece the unknown piece?
    pub fn is_unknown(
        &self,
        id: T,
    ) -> PCResult<bool> {
        Ok(self.piece_kind(id)? == PieceKind::Unknown)
    }

    /// Is the piece a byte-fallback piece?
    pub fn is_byte(
        &self,
        id: T,
    ) -> PCResult<bool> {
        Ok(self.piece_kind(id)? == PieceKind::Byte)
    }
}
