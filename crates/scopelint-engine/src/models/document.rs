use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use super::{Alert, CommentState};

/// Per-document state shared between the walker's dispatches and the checks
/// they trigger.
#[derive(Debug, Clone)]
pub struct Document {
    path: PathBuf,
    content: String,
    lines: Vec<String>,
    real_ext: String,
    normed_ext: String,
    alerts: Vec<Alert>,
    tag_hits: BTreeMap<String, usize>,
    scope_hits: BTreeMap<String, usize>,
    summary: String,
    comments: CommentState,
}

impl Document {
    /// Creates a document from its path and full source text.
    ///
    /// The extension of `path` decides the scope suffix (`.md`, `.rst`, ...).
    pub fn new(path: impl Into<PathBuf>, source: &str) -> Self {
        let path = path.into();
        let real_ext = path
            .extension()
            .map(|ext| format!(".{}", ext.to_string_lossy()))
            .unwrap_or_else(|| ".txt".to_string());
        let normed_ext = normalize_ext(&real_ext);

        Self {
            path,
            content: sanitize(source),
            lines: source.split_inclusive('\n').map(str::to_string).collect(),
            real_ext,
            normed_ext,
            alerts: Vec::new(),
            tag_hits: BTreeMap::new(),
            scope_hits: BTreeMap::new(),
            summary: String::new(),
            comments: CommentState::default(),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Source text with entities and line endings normalized.
    pub fn content(&self) -> &str {
        &self.content
    }

    /// Original source lines, terminators included.
    pub fn lines(&self) -> &[String] {
        &self.lines
    }

    /// The original source, untouched.
    pub fn raw(&self) -> String {
        self.lines.concat()
    }

    /// Extension as found on disk, e.g. `.markdown`.
    pub fn real_ext(&self) -> &str {
        &self.real_ext
    }

    /// Extension identifying the format, e.g. `.md` for `.markdown`.
    pub fn normed_ext(&self) -> &str {
        &self.normed_ext
    }

    pub fn alerts(&self) -> &[Alert] {
        &self.alerts
    }

    pub fn add_alert(&mut self, alert: Alert) {
        self.alerts.push(alert);
    }

    /// Times each skip-listed tag was entered.
    pub fn tag_hits(&self) -> &BTreeMap<String, usize> {
        &self.tag_hits
    }

    pub fn record_tag_hit(&mut self, tag: &str) {
        *self.tag_hits.entry(tag.to_string()).or_default() += 1;
    }

    /// Structural blocks seen per scope, keyed without the `text.` prefix.
    pub fn scope_hits(&self) -> &BTreeMap<String, usize> {
        &self.scope_hits
    }

    pub fn record_scope_hit(&mut self, scope: &str) {
        let key = scope.strip_prefix("text.").unwrap_or(scope);
        *self.scope_hits.entry(key.to_string()).or_default() += 1;
    }

    /// Running text of the blocks that make up the document's summary.
    pub fn summary(&self) -> &str {
        &self.summary
    }

    pub fn append_summary(&mut self, text: &str) {
        self.summary.push_str(text);
        self.summary.push_str("\n\n");
    }

    pub fn comments(&self) -> &CommentState {
        &self.comments
    }

    pub fn update_comments(&mut self, comment: &str) {
        self.comments.update(comment);
    }

    pub fn reset_comments(&mut self) {
        self.comments = CommentState::default();
    }
}

/// Normalizes entities and line endings the checks should not see.
pub fn sanitize(text: &str) -> String {
    text.replace("&rsquo;", "'")
        .replace("\r\n", "\n")
        .replace('\r', "\n")
}

fn normalize_ext(ext: &str) -> String {
    match ext.to_ascii_lowercase().as_str() {
        ".markdown" | ".mdown" | ".mkd" | ".mkdn" => ".md".to_string(),
        ".htm" | ".xhtml" => ".html".to_string(),
        ".rest" => ".rst".to_string(),
        other => other.to_string(),
    }
}
