use crate::scope::ScopePath;

/// A finalized span of text with its resolved scope, ready for checking.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScopedBlock {
    pub text: String,
    /// Document text in which `text` is located; consumed spans are masked.
    pub context: String,
    pub scope: ScopePath,
    /// Number of source lines consumed while the block was accumulated.
    pub lines: usize,
    /// Approximate 1-based document line the block starts on.
    pub line: usize,
    /// False only for inline blocks that reuse a context snapshot of their
    /// enclosing, still-open block.
    pub new_context: bool,
}

impl ScopedBlock {
    pub fn new(text: impl Into<String>, scope: impl Into<ScopePath>) -> Self {
        Self {
            text: text.into(),
            context: String::new(),
            scope: scope.into(),
            lines: 0,
            line: 1,
            new_context: true,
        }
    }

    pub fn with_context(mut self, context: impl Into<String>) -> Self {
        self.context = context.into();
        self
    }

    pub fn at_line(mut self, line: usize, lines: usize) -> Self {
        self.line = line;
        self.lines = lines;
        self
    }

    pub fn nested(mut self) -> Self {
        self.new_context = false;
        self
    }
}

/// Something a check reported about a block.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Alert {
    pub check: String,
    pub scope: String,
    pub line: usize,
    pub message: String,
}
