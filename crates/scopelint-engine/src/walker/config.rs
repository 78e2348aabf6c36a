/// Tags whose whole content is never checked.
pub const DEFAULT_SKIP_TAGS: [&str; 6] = ["script", "style", "pre", "figure", "noscript", "iframe"];

/// Classes marking content that is never checked. `problematic` is added by
/// reStructuredText converters to processing errors; `pre` and `code` mark
/// code spans.
pub const DEFAULT_SKIP_CLASSES: [&str; 3] = ["problematic", "pre", "code"];

/// Inline tags whose text is masked out of the surrounding block.
pub const DEFAULT_IGNORED_SCOPES: [&str; 3] = ["tt", "code", "kbd"];

/// Skip and ignore lists for one walker.
///
/// Built once from configuration and shared read-only by every walk.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WalkerConfig {
    pub skip_tags: Vec<String>,
    pub skip_classes: Vec<String>,
    pub ignored_scopes: Vec<String>,
    /// Don't check image alt text.
    pub suppress_alt: bool,
}

impl Default for WalkerConfig {
    fn default() -> Self {
        Self {
            skip_tags: to_strings(&DEFAULT_SKIP_TAGS),
            skip_classes: to_strings(&DEFAULT_SKIP_CLASSES),
            ignored_scopes: to_strings(&DEFAULT_IGNORED_SCOPES),
            suppress_alt: false,
        }
    }
}

impl WalkerConfig {
    /// Replaces the skip-tag list when `scopes` is non-empty. Listing `alt`
    /// suppresses image alt text.
    pub fn with_skipped_scopes<S: AsRef<str>>(mut self, scopes: &[S]) -> Self {
        if !scopes.is_empty() {
            self.skip_tags = to_strings(scopes);
            self.suppress_alt = scopes.iter().any(|s| s.as_ref() == "alt");
        }
        self
    }

    /// Adds to the default skip classes.
    pub fn with_ignored_classes<S: AsRef<str>>(mut self, classes: &[S]) -> Self {
        self.skip_classes.extend(to_strings(classes));
        self
    }

    /// Replaces the masked inline scopes when `scopes` is non-empty.
    pub fn with_ignored_scopes<S: AsRef<str>>(mut self, scopes: &[S]) -> Self {
        if !scopes.is_empty() {
            self.ignored_scopes = to_strings(scopes);
        }
        self
    }

    pub fn with_alt_suppressed(mut self, suppress: bool) -> Self {
        self.suppress_alt = suppress;
        self
    }

    pub fn skips_tag(&self, tag: &str) -> bool {
        self.skip_tags.iter().any(|t| t == tag)
    }

    /// Whether any class in a space-separated `class` attribute is skipped.
    pub fn skips_class(&self, class_attr: &str) -> bool {
        class_attr
            .split(' ')
            .any(|class| self.skip_classes.iter().any(|c| c == class))
    }

    pub fn ignores_scope(&self, tag: &str) -> bool {
        self.ignored_scopes.iter().any(|t| t == tag)
    }
}

fn to_strings<S: AsRef<str>>(values: &[S]) -> Vec<String> {
    values.iter().map(|v| v.as_ref().to_string()).collect()
}
