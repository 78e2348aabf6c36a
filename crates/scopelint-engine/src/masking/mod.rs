//! # Positional Masking
//!
//! Character-count-preserving substitution. Consumed text is overwritten with
//! a filler character instead of being removed, so any offset computed before
//! masking still points at the same character afterwards.
//!
//! ## Modules
//!
//! - **`substitute`**: `substitute()` masks the first occurrence of a needle
//! - **`context`**: `MaskedContext`, the per-document buffer that tracks which
//!   spans have already been handed to a check
//! - **`spans`**: `extract_tagged_spans()` locates tagged words left-to-right
//!
//! ## Key Invariants
//!
//! - Masking never changes the number of characters in a buffer
//! - Newline characters are never masked, so line structure is preserved

pub mod context;
pub mod spans;
pub mod substitute;

pub use context::MaskedContext;
pub use spans::{TaggedWord, extract_tagged_spans, strip_markup};
pub use substitute::substitute;
