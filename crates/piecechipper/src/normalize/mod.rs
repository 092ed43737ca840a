//! # Text Normalization
//!
//! [`NormalizerConfig`] is the declarative normalization policy persisted in a
//! model artifact:
//! * `unicode_form` - the Unicode normalization form applied first.
//! * `remove_extra_whitespaces` - trim and collapse whitespace runs.
//! * `add_dummy_prefix` - prepend a space so the first word looks like any other.
//! * `escape_whitespaces` - replace `' '` with the visible [`WHITESPACE_MARKER`].
//!
//! [`Normalizer`] applies the policy, and reverses the marker substitution on decode.
//! Unicode normalization is one-directional; decode cannot recover the
//! pre-normalization form.

pub mod normalizer;
pub mod normalizer_config;

#[doc(inline)]
pub use normalizer::{Normalizer, WHITESPACE_MARKER};
#[doc(inline)]
pub use normalizer_config::{NormalizerConfig, UnicodeForm};
