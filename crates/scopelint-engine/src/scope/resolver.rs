use std::sync::OnceLock;

use regex::Regex;

use super::path::ScopePath;

/// Formatting tags that stay within a line of prose.
pub const INLINE_TAGS: [&str; 20] = [
    "b", "big", "i", "small", "abbr", "acronym", "cite", "dfn", "em", "kbd", "strong", "a", "br",
    "img", "span", "sub", "sup", "code", "tt", "del",
];

/// Tags that never have a matching end tag and so are never tracked as open.
pub const VOID_TAGS: [&str; 14] = [
    "area", "base", "br", "col", "embed", "hr", "img", "input", "link", "meta", "param", "source",
    "track", "wbr",
];

/// Base scope for a tag, if it has one.
///
/// Inline formatting tags map to bare leaves (`strong`, `link`, ...) rather
/// than `text.*` so their text is not counted twice as general prose.
pub fn tag_scope(tag: &str) -> Option<&'static str> {
    let scope = match tag {
        "th" => "text.table.header",
        "td" => "text.table.cell",
        "caption" => "text.table.caption",
        "li" => "text.list",
        "blockquote" => "text.blockquote",
        "figcaption" => "text.figure.caption",
        "strong" | "b" => "strong",
        "a" => "link",
        "em" | "i" => "emphasis",
        "code" => "code",
        _ => return None,
    };
    Some(scope)
}

pub fn is_inline(tag: &str) -> bool {
    INLINE_TAGS.contains(&tag)
}

pub fn is_void(tag: &str) -> bool {
    VOID_TAGS.contains(&tag)
}

pub fn is_heading(tag: &str) -> bool {
    static HEADING: OnceLock<Regex> = OnceLock::new();
    HEADING
        .get_or_init(|| Regex::new(r"^h[1-6]$").expect("Invalid heading regex"))
        .is_match(tag)
}

/// Inline tags whose text is also checked on its own, under its own scope.
pub fn owns_inline_scope(tag: &str) -> bool {
    is_inline(tag) && tag_scope(tag).is_some()
}

/// Where a finalized block belongs.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BlockScope {
    /// Inside a structural element, e.g. `text.blockquote` or
    /// `text.heading.h2`.
    Structural(String),
    /// Ordinary paragraph text.
    Prose,
}

impl BlockScope {
    /// Scope without the document extension.
    pub fn base(&self) -> &str {
        match self {
            BlockScope::Structural(scope) => scope,
            BlockScope::Prose => "text",
        }
    }

    /// Whether this block's text contributes to the document summary.
    pub fn feeds_summary(&self) -> bool {
        match self {
            BlockScope::Structural(scope) => {
                scope == "text.blockquote"
                    || scope == "text.list"
                    || scope.starts_with("text.heading.")
            }
            BlockScope::Prose => true,
        }
    }
}

/// Maps the stack of open tags to scope paths for one document format.
#[derive(Debug, Clone)]
pub struct ScopeResolver {
    ext: String,
}

impl ScopeResolver {
    /// `ext` is the document's extension including its dot, e.g. `.md`.
    pub fn new(ext: impl Into<String>) -> Self {
        Self { ext: ext.into() }
    }

    /// Scope of a finalized block: the outermost open tag with a structural
    /// scope, or a heading, decides; otherwise the block is prose.
    pub fn resolve_block<S: AsRef<str>>(&self, history: &[S]) -> BlockScope {
        for tag in history {
            let tag = tag.as_ref();
            match tag_scope(tag) {
                Some(scope) if !is_inline(tag) => return BlockScope::Structural(scope.to_string()),
                Some(_) => {}
                None if is_heading(tag) => return BlockScope::Structural(heading_scope(tag)),
                None => {}
            }
        }
        BlockScope::Prose
    }

    pub fn block_path(&self, scope: &BlockScope) -> ScopePath {
        ScopePath::new(format!("{}{}", scope.base(), self.ext))
    }

    /// Scope of inline text owning a leaf scope such as `strong` or `link`.
    ///
    /// The leaf is qualified by the history's root element: list roots count
    /// as list items and bare paragraphs add nothing.
    pub fn inline_path<S: AsRef<str>>(&self, history: &[S], leaf: &str) -> ScopePath {
        let root = match history.first().map(|tag| tag.as_ref()) {
            Some("ul" | "ol") => "li",
            Some("p") | None => "",
            Some(tag) => tag,
        };

        let base = match tag_scope(root) {
            Some(scope) => scope.to_string(),
            None if is_heading(root) => heading_scope(root),
            None => String::new(),
        };

        let joined = format!("{base}.{leaf}");
        let trimmed = joined.strip_prefix('.').unwrap_or(&joined);
        ScopePath::new(format!("{trimmed}{}", self.ext))
    }
}

fn heading_scope(tag: &str) -> String {
    format!("text.heading.{tag}")
}
