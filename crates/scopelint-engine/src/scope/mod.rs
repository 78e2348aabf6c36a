//! # Scopes
//!
//! Scope paths are dot-delimited labels describing where a span of text sits
//! in a document, e.g. `text.blockquote.code.md`. Rules select the spans they
//! apply to with selector expressions such as `~blockquote & ~code`.
//!
//! ## Modules
//!
//! - **`path`**: `ScopePath`, the concrete label computed for a span
//! - **`selector`**: `Selector` and `ScopeExpression`, the selector algebra
//! - **`resolver`**: `ScopeResolver`, mapping open tags to scope paths
//!
//! ## Key Invariants
//!
//! - Segments are case-sensitive literals
//! - A selector matches by segment-set containment; order and duplicates in the
//!   candidate path do not matter
//! - Negation applies to a whole selector, never to a single segment

pub mod path;
pub mod resolver;
pub mod selector;

pub use path::ScopePath;
pub use resolver::{BlockScope, ScopeResolver};
pub use selector::{SIZED_SCOPES, ScopeExpression, Selector};
