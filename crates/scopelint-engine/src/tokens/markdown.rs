use pulldown_cmark::{CodeBlockKind, Event, HeadingLevel, Options, Parser, Tag};

use super::Token;

/// Token stream over a Markdown document.
///
/// The whole document is converted up front; iteration then yields HTML-like
/// tokens ending with an end-of-stream [`Token::eof`].
pub struct MarkdownTokenizer {
    tokens: std::vec::IntoIter<Token>,
}

impl MarkdownTokenizer {
    pub fn new(source: &str) -> Self {
        Self {
            tokens: tokenize(source).into_iter(),
        }
    }
}

impl Iterator for MarkdownTokenizer {
    type Item = Token;

    fn next(&mut self) -> Option<Token> {
        self.tokens.next()
    }
}

/// Image alt text collected until the image closes.
struct ImageCapture {
    src: String,
    alt: String,
    depth: usize,
}

impl ImageCapture {
    /// Feeds one event; returns true once the image's own end event arrives.
    fn absorb(&mut self, event: &Event<'_>) -> bool {
        match event {
            Event::Start(_) => self.depth += 1,
            Event::End(_) if self.depth == 0 => return true,
            Event::End(_) => self.depth -= 1,
            Event::Text(t) | Event::Code(t) => self.alt.push_str(t),
            _ => {}
        }
        false
    }

    fn into_token(self) -> Token {
        Token::start("img")
            .with_attr("src", self.src)
            .with_attr("alt", self.alt)
    }
}

/// Keeps the newlines carried by text tokens in step with the source, the
/// way whitespace between tags does in rendered HTML.
#[derive(Default)]
struct LineSync {
    scanned: usize,
    source_lines: usize,
    emitted: usize,
}

impl LineSync {
    /// Newline padding needed before an element starting at byte `offset`.
    fn catch_up(&mut self, source: &str, offset: usize) -> Option<Token> {
        if offset > self.scanned {
            self.source_lines += source[self.scanned..offset].matches('\n').count();
            self.scanned = offset;
        }
        let missing = self.source_lines.checked_sub(self.emitted)?;
        if missing == 0 {
            return None;
        }
        self.emitted += missing;
        Some(Token::text("\n".repeat(missing)))
    }

    fn record(&mut self, text: &str) {
        self.emitted += text.matches('\n').count();
    }
}

/// Converts Markdown into walker tokens.
pub fn tokenize(source: &str) -> Vec<Token> {
    let options = Options::ENABLE_TABLES | Options::ENABLE_STRIKETHROUGH;
    let mut out = Vec::new();
    // Tag names opened by each start event, closed in reverse on its end.
    let mut open: Vec<Vec<&'static str>> = Vec::new();
    let mut image: Option<ImageCapture> = None;
    let mut in_head = false;
    // Raw lines of the HTML block being read; pulldown-cmark splits them.
    let mut html_block: Option<String> = None;
    let mut lines = LineSync::default();

    for (event, range) in Parser::new_ext(source, options).into_offset_iter() {
        if image.is_none()
            && matches!(event, Event::Start(_))
            && let Some(padding) = lines.catch_up(source, range.start)
        {
            out.push(padding);
        }

        if let Some(capture) = image.as_mut() {
            if capture.absorb(&event)
                && let Some(done) = image.take()
            {
                out.push(done.into_token());
            }
            continue;
        }

        match event {
            Event::Start(Tag::Image { dest_url, .. }) => {
                image = Some(ImageCapture {
                    src: dest_url.to_string(),
                    alt: String::new(),
                    depth: 0,
                });
            }
            Event::Start(Tag::HtmlBlock) => {
                html_block = Some(String::new());
                open.push(vec![]);
            }
            Event::Start(tag) => {
                let starts = start_tokens(&tag, in_head);
                if matches!(tag, Tag::TableHead) {
                    in_head = true;
                }
                open.push(starts.iter().map(|(name, _)| *name).collect());
                out.extend(starts.into_iter().map(|(_, tok)| tok));
            }
            Event::End(_) => {
                if let Some(names) = open.pop() {
                    if names.contains(&"thead") {
                        in_head = false;
                    }
                    out.extend(names.into_iter().rev().map(|name| Token::end(name)));
                }
                if let Some(block) = html_block.take()
                    && let Some(body) = comment_body(&block)
                {
                    out.push(Token::comment(body));
                }
            }
            Event::Text(text) => {
                lines.record(&text);
                out.push(Token::text(text.into_string()));
            }
            Event::Code(code) => {
                out.push(Token::start("code"));
                out.push(Token::text(code.into_string()));
                out.push(Token::end("code"));
            }
            Event::SoftBreak | Event::HardBreak => {
                lines.record("\n");
                out.push(Token::text("\n"));
            }
            Event::Html(html) if html_block.is_some() => {
                if let Some(block) = html_block.as_mut() {
                    block.push_str(&html);
                }
            }
            Event::Html(html) | Event::InlineHtml(html) => {
                if let Some(body) = comment_body(&html) {
                    out.push(Token::comment(body));
                }
            }
            _ => {}
        }
    }

    out.push(Token::eof());
    out
}

fn start_tokens(tag: &Tag<'_>, in_head: bool) -> Vec<(&'static str, Token)> {
    let single = |name: &'static str| vec![(name, Token::start(name))];

    match tag {
        Tag::Paragraph => single("p"),
        Tag::Heading { level, .. } => single(heading_name(*level)),
        Tag::BlockQuote(_) => single("blockquote"),
        Tag::CodeBlock(kind) => {
            let mut pre = Token::start("pre");
            if let CodeBlockKind::Fenced(lang) = kind
                && !lang.is_empty()
            {
                pre = pre.with_attr("class", format!("language-{lang}"));
            }
            vec![("pre", pre), ("code", Token::start("code"))]
        }
        Tag::List(Some(_)) => single("ol"),
        Tag::List(None) => single("ul"),
        Tag::Item => single("li"),
        Tag::Emphasis => single("em"),
        Tag::Strong => single("strong"),
        Tag::Strikethrough => single("del"),
        Tag::Link { dest_url, .. } => {
            vec![("a", Token::start("a").with_attr("href", dest_url.to_string()))]
        }
        Tag::Table(_) => single("table"),
        Tag::TableHead => single("thead"),
        Tag::TableRow => single("tr"),
        Tag::TableCell if in_head => single("th"),
        Tag::TableCell => single("td"),
        Tag::FootnoteDefinition(_) => single("div"),
        _ => vec![],
    }
}

fn heading_name(level: HeadingLevel) -> &'static str {
    match level {
        HeadingLevel::H1 => "h1",
        HeadingLevel::H2 => "h2",
        HeadingLevel::H3 => "h3",
        HeadingLevel::H4 => "h4",
        HeadingLevel::H5 => "h5",
        HeadingLevel::H6 => "h6",
    }
}

fn comment_body(html: &str) -> Option<String> {
    let trimmed = html.trim();
    let body = trimmed.strip_prefix("<!--")?.strip_suffix("-->")?;
    Some(body.trim().to_string())
}
