use std::fmt;

/// The concrete scope label of a span of text, e.g. `text.blockquote.md`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ScopePath(String);

impl ScopePath {
    pub fn new(path: impl Into<String>) -> Self {
        Self(path.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Dot-separated segments in order.
    pub fn segments(&self) -> impl Iterator<Item = &str> {
        self.0.split('.')
    }
}

impl fmt::Display for ScopePath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl AsRef<str> for ScopePath {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl From<String> for ScopePath {
    fn from(path: String) -> Self {
        Self(path)
    }
}

impl From<&str> for ScopePath {
    fn from(path: &str) -> Self {
        Self(path.to_string())
    }
}

impl PartialEq<str> for ScopePath {
    fn eq(&self, other: &str) -> bool {
        self.0 == other
    }
}

impl PartialEq<&str> for ScopePath {
    fn eq(&self, other: &&str) -> bool {
        self.0 == *other
    }
}
