//! # Markup Tokens
//!
//! The walker consumes a flat stream of HTML-like tokens produced by some
//! external markup converter. Tag names follow HTML (`p`, `li`, `strong`, ...)
//! whatever the source format was.
//!
//! - **`markdown`**: `MarkdownTokenizer` turns Markdown into such a stream

pub mod markdown;

pub use markdown::MarkdownTokenizer;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TokenKind {
    StartTag,
    EndTag,
    Text,
    Comment,
    /// End of stream, or malformed input when the token carries a message.
    Error,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Attribute {
    pub key: String,
    pub value: String,
}

/// One tokenizer event: a tag name, a run of text, a comment body or an
/// error message, depending on `kind`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Token {
    pub kind: TokenKind,
    pub data: String,
    pub attrs: Vec<Attribute>,
}

impl Token {
    pub fn start(name: impl Into<String>) -> Self {
        Self::new(TokenKind::StartTag, name)
    }

    pub fn end(name: impl Into<String>) -> Self {
        Self::new(TokenKind::EndTag, name)
    }

    pub fn text(text: impl Into<String>) -> Self {
        Self::new(TokenKind::Text, text)
    }

    pub fn comment(body: impl Into<String>) -> Self {
        Self::new(TokenKind::Comment, body)
    }

    pub fn eof() -> Self {
        Self::new(TokenKind::Error, "")
    }

    pub fn error(message: impl Into<String>) -> Self {
        Self::new(TokenKind::Error, message)
    }

    /// Adds an attribute, builder style.
    pub fn with_attr(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.attrs.push(Attribute {
            key: key.into(),
            value: value.into(),
        });
        self
    }

    /// Value of attribute `key`, or `""` when absent.
    pub fn attr(&self, key: &str) -> &str {
        self.attrs
            .iter()
            .find(|a| a.key == key)
            .map(|a| a.value.as_str())
            .unwrap_or("")
    }

    fn new(kind: TokenKind, data: impl Into<String>) -> Self {
        Self {
            kind,
            data: data.into(),
            attrs: Vec::new(),
        }
    }
}
