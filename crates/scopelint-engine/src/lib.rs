pub mod dispatch;
pub mod error;
pub mod io;
pub mod masking;
pub mod models;
pub mod nlp;
pub mod scope;
pub mod tokens;
pub mod walker;

#[cfg(test)]
pub mod tests;

// Re-export key types for easier usage
pub use dispatch::{
    BlockLinter, Dispatcher, lint_document, lint_file, lint_markdown, lint_tokens,
};
pub use error::{LintError, SelectorError};
pub use io::{IoError, read_document, scan_documents};
pub use masking::{MaskedContext, TaggedWord, extract_tagged_spans, strip_markup, substitute};
pub use models::{Alert, CommentState, Document, ScopedBlock};
pub use nlp::{SegmentTagger, TaggedToken, WordTagger};
pub use scope::{BlockScope, ScopeExpression, ScopePath, ScopeResolver, Selector};
pub use tokens::{MarkdownTokenizer, Token, TokenKind};
pub use walker::{Effect, Walker, WalkerConfig};
