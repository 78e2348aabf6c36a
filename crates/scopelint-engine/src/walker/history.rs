use crate::scope::resolver::is_inline;

/// The stack of currently open tags, outermost first.
///
/// Each entry carries the label scopes are resolved from and the tag name
/// that opened it; the two differ for relabelled tags, which still close on
/// their own end tag.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TagHistory {
    labels: Vec<String>,
    sources: Vec<String>,
}

impl TagHistory {
    pub fn push(&mut self, tag: &str) {
        self.push_as(tag, tag);
    }

    /// Opens `source` under a different `label`.
    pub fn push_as(&mut self, label: &str, source: &str) {
        self.labels.push(label.to_string());
        self.sources.push(source.to_string());
    }

    /// Closes the innermost entry opened by `tag` along with anything opened
    /// inside it. Returns false when `tag` isn't open.
    pub fn close(&mut self, tag: &str) -> bool {
        match self.sources.iter().rposition(|t| t == tag) {
            Some(pos) => {
                self.labels.truncate(pos);
                self.sources.truncate(pos);
                true
            }
            None => false,
        }
    }

    pub fn last(&self) -> Option<&str> {
        self.labels.last().map(String::as_str)
    }

    /// The innermost open tag that isn't inline formatting.
    pub fn nearest_block(&self) -> Option<&str> {
        self.labels
            .iter()
            .rev()
            .find(|t| !is_inline(t))
            .map(String::as_str)
    }

    pub fn as_slice(&self) -> &[String] {
        &self.labels
    }

    pub fn len(&self) -> usize {
        self.labels.len()
    }

    pub fn is_empty(&self) -> bool {
        self.labels.is_empty()
    }
}
