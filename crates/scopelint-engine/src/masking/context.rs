use super::substitute::substitute;

/// A document-sized buffer in which already-consumed text is masked out.
///
/// Checks locate a block's text inside the context to report positions. Once
/// a block has been handed off its text is masked, so a later block with
/// identical wording resolves to its own occurrence rather than the first one.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MaskedContext {
    buf: String,
}

impl MaskedContext {
    /// Filler used for consumed context text.
    pub const FILLER: char = '@';

    pub fn new(source: impl Into<String>) -> Self {
        Self { buf: source.into() }
    }

    pub fn as_str(&self) -> &str {
        &self.buf
    }

    /// Masks the first remaining occurrence of `needle`.
    pub fn mask(&mut self, needle: &str) -> bool {
        let (masked, found) = substitute(&self.buf, needle, Self::FILLER);
        if found {
            self.buf = masked;
        }
        found
    }

    /// Masks a text token line by line.
    ///
    /// A line that no longer appears verbatim (markup split it, or it was
    /// rewrapped) falls back to masking each of its words.
    pub fn mask_text(&mut self, txt: &str) {
        for line in txt.split('\n') {
            if !self.mask(line) {
                for word in line.split_whitespace() {
                    self.mask(word);
                }
            }
        }
    }

    /// Returns a copy of this context with every queued text token masked.
    pub fn masked_with<S: AsRef<str>>(&self, queue: &[S]) -> MaskedContext {
        let mut snapshot = self.clone();
        for txt in queue {
            snapshot.mask_text(txt.as_ref());
        }
        snapshot
    }

    pub fn into_string(self) -> String {
        self.buf
    }
}
