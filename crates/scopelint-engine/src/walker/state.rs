use log::trace;

use super::clean::{clean, in_literal_wrapper};
use super::{TagHistory, WalkerConfig};
use crate::masking::MaskedContext;
use crate::models::{Document, ScopedBlock};
use crate::scope::resolver::{is_inline, is_void, owns_inline_scope, tag_scope};
use crate::scope::{BlockScope, ScopeResolver};
use crate::tokens::{Token, TokenKind};

/// Something the dispatcher must do in response to a token.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Effect {
    /// A block is ready to be checked.
    Dispatch(ScopedBlock),
    /// A comment body, possibly a directive.
    Comment(String),
    /// A skip-listed tag was entered.
    TagHit(String),
    /// A structural block was finalized under this base scope.
    ScopeHit(String),
    /// Block text that belongs to the document summary.
    Summary(String),
}

/// Whether text currently joins the pending block.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum Mode {
    #[default]
    Accumulating,
    /// Inside a skip-listed tag. Nested occurrences of the same tag are
    /// counted in `depth`; closing `ancestor` also ends the skip, for
    /// converters that never close the skipped tag.
    Skipping {
        tag: String,
        depth: usize,
        ancestor: Option<String>,
    },
}

/// Text gathered since the last block boundary.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PendingBlock {
    /// Cleaned text, as it will be checked.
    pub text: String,
    /// Raw text tokens, masked out of the context once the block closes.
    pub queue: Vec<String>,
    /// Newlines seen in the queued tokens.
    pub lines: usize,
    pub start_line: Option<usize>,
}

impl PendingBlock {
    fn push_raw(&mut self, txt: &str, line: usize) {
        if self.start_line.is_none() && !txt.trim().is_empty() {
            self.start_line = Some(line);
        }
        self.lines += txt.matches('\n').count();
        self.queue.push(txt.to_string());
    }
}

/// Everything the walker knows between two tokens.
#[derive(Debug, Clone, Default)]
pub struct WalkerState {
    pub history: TagHistory,
    /// Most recently opened tag, cleared once an inline tag's text has been
    /// dispatched or the tag closes.
    pub active_tag: Option<String>,
    pub mode: Mode,
    /// Whether the most recently opened tag is inline.
    pub inline: bool,
    /// Mask the next text token.
    pub skip: bool,
    /// `href` of the previous token.
    pub link_href: String,
    /// `class` of the previous token.
    pub parent_class: String,
    pub pending: PendingBlock,
    pub context: MaskedContext,
    /// 1-based line of the next text token.
    pub line: usize,
}

/// Walks the token stream of one document.
pub struct Walker<'c> {
    config: &'c WalkerConfig,
    resolver: ScopeResolver,
    normed_ext: String,
    state: WalkerState,
}

impl<'c> Walker<'c> {
    pub fn new(config: &'c WalkerConfig, doc: &Document) -> Self {
        Self {
            config,
            resolver: ScopeResolver::new(doc.real_ext()),
            normed_ext: doc.normed_ext().to_string(),
            state: WalkerState {
                context: MaskedContext::new(doc.content()),
                line: 1,
                ..WalkerState::default()
            },
        }
    }

    pub fn state(&self) -> &WalkerState {
        &self.state
    }

    /// Advances over one token.
    ///
    /// `Error` tokens are ignored here; ending the walk is up to the caller,
    /// which should then call [`Walker::finish`].
    pub fn step(&mut self, token: &Token) -> Vec<Effect> {
        let mut effects = Vec::new();
        match token.kind {
            TokenKind::StartTag => self.on_start(token, &mut effects),
            TokenKind::EndTag => self.on_end(&token.data, &mut effects),
            TokenKind::Text => self.on_text(&token.data, &mut effects),
            TokenKind::Comment => effects.push(Effect::Comment(token.data.clone())),
            TokenKind::Error => {}
        }

        self.state.link_href = token.attr("href").to_string();
        self.state.parent_class = token.attr("class").to_string();
        self.alt_text(token, &mut effects);
        effects
    }

    /// Flushes whatever block is still pending at end of stream.
    pub fn finish(&mut self) -> Vec<Effect> {
        let mut effects = Vec::new();
        self.finalize(&mut effects);
        effects
    }

    fn on_start(&mut self, token: &Token, effects: &mut Vec<Effect>) {
        let name = token.data.as_str();

        if let Mode::Skipping { tag, depth, .. } = &mut self.state.mode {
            if tag.as_str() == name {
                *depth += 1;
            }
            return;
        }

        let skip_class = !is_inline(name) && self.config.skips_class(token.attr("class"));
        if self.config.skips_tag(name) || skip_class {
            trace!("skipping <{name}>");
            effects.push(Effect::TagHit(name.to_string()));
            if !is_void(name) {
                self.state.mode = Mode::Skipping {
                    tag: name.to_string(),
                    depth: 0,
                    ancestor: self.state.history.nearest_block().map(str::to_string),
                };
            }
            return;
        }

        // Converters wrap emphasis inside code spans; it's still code.
        let label = if matches!(name, "em" | "b") && self.state.history.last() == Some("code") {
            "code"
        } else {
            name
        };

        self.state.inline = is_inline(label);
        self.state.skip = self.config.ignores_scope(label);
        if !is_void(name) {
            self.state.history.push_as(label, name);
            self.state.active_tag = Some(label.to_string());
        }
    }

    fn on_end(&mut self, name: &str, effects: &mut Vec<Effect>) {
        if let Mode::Skipping {
            tag,
            depth,
            ancestor,
        } = &mut self.state.mode
        {
            if tag.as_str() == name {
                if *depth > 0 {
                    *depth -= 1;
                    return;
                }
                // The skipped tag itself was never pushed.
                self.state.mode = Mode::Accumulating;
                if !is_inline(name) {
                    self.finalize(effects);
                }
                return;
            }
            if ancestor.as_deref() != Some(name) {
                return;
            }
            self.state.mode = Mode::Accumulating;
        }

        if is_inline(name) {
            self.state.active_tag = None;
        } else {
            self.finalize(effects);
        }
        self.state.history.close(name);
    }

    fn on_text(&mut self, txt: &str, effects: &mut Vec<Effect>) {
        let skipping = matches!(self.state.mode, Mode::Skipping { .. });
        let skip = self.state.skip
            || in_literal_wrapper(self.state.history.as_slice(), &self.normed_ext);

        if !skipping
            && !txt.trim().is_empty()
            && let Some(tag) = self.state.active_tag.as_deref()
            && owns_inline_scope(tag)
            && let Some(leaf) = tag_scope(tag)
        {
            let snapshot = self.state.context.masked_with(&self.state.pending.queue);
            let scope = self.resolver.inline_path(self.state.history.as_slice(), leaf);
            let block = ScopedBlock::new(txt, scope)
                .with_context(snapshot.into_string())
                .at_line(self.state.line, txt.matches('\n').count())
                .nested();
            effects.push(Effect::Dispatch(block));
            self.state.active_tag = None;
        }

        self.state.pending.push_raw(txt, self.state.line);
        self.state.line += txt.matches('\n').count();

        if skipping || txt.is_empty() {
            self.state.skip = skip;
            return;
        }

        let skip_class = self.config.skips_class(&self.state.parent_class);
        let cleaned = clean(
            txt,
            &self.state.link_href,
            skip || skip_class,
            self.state.inline,
        );
        self.state.pending.text.push_str(&cleaned);
        self.state.skip = false;
    }

    fn alt_text(&mut self, token: &Token, effects: &mut Vec<Effect>) {
        if token.kind != TokenKind::StartTag || token.data != "img" || self.config.suppress_alt {
            return;
        }
        let alt = token.attr("alt");
        if alt.is_empty() {
            return;
        }
        let block = ScopedBlock::new(alt, "text.attr.alt")
            .with_context(self.state.context.as_str())
            .at_line(self.state.line, 0);
        effects.push(Effect::Dispatch(block));
    }

    /// Closes the pending block: dispatches it with the context as it stood
    /// before the block, then masks the block's text out of the context.
    fn finalize(&mut self, effects: &mut Vec<Effect>) {
        let pending = std::mem::take(&mut self.state.pending);

        let text = pending.text.trim_start();
        if !text.trim().is_empty() {
            let scope = self.resolver.resolve_block(self.state.history.as_slice());
            if scope.feeds_summary() {
                effects.push(Effect::Summary(text.to_string()));
            }
            if let BlockScope::Structural(base) = &scope {
                effects.push(Effect::ScopeHit(base.clone()));
            }

            let line = pending.start_line.unwrap_or(self.state.line);
            let block = ScopedBlock::new(text, self.resolver.block_path(&scope))
                .with_context(self.state.context.as_str())
                .at_line(line, pending.lines);
            trace!("finalized {} block at line {line}", block.scope);
            effects.push(Effect::Dispatch(block));
        }

        for txt in &pending.queue {
            self.state.context.mask_text(txt);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn walk(doc: &Document, config: &WalkerConfig, tokens: &[Token]) -> Vec<Effect> {
        let mut walker = Walker::new(config, doc);
        let mut effects: Vec<Effect> = tokens.iter().flat_map(|t| walker.step(t)).collect();
        effects.extend(walker.finish());
        effects
    }

    fn dispatched(effects: &[Effect]) -> Vec<&ScopedBlock> {
        effects
            .iter()
            .filter_map(|e| match e {
                Effect::Dispatch(block) => Some(block),
                _ => None,
            })
            .collect()
    }

    fn normalize(text: &str) -> String {
        text.split_whitespace().collect::<Vec<_>>().join(" ")
    }

    fn blockquote_tokens() -> Vec<Token> {
        vec![
            Token::start("blockquote"),
            Token::text("Some "),
            Token::start("b"),
            Token::text("bold"),
            Token::end("b"),
            Token::text(" text."),
            Token::end("blockquote"),
        ]
    }

    #[test]
    fn inline_text_is_checked_alone_and_as_part_of_the_block() {
        let doc = Document::new("quote.md", "> Some **bold** text.\n");
        let effects = walk(&doc, &WalkerConfig::default(), &blockquote_tokens());
        let blocks = dispatched(&effects);

        assert_eq!(blocks.len(), 2);
        assert_eq!(blocks[0].text, "bold");
        assert_eq!(blocks[0].scope, "text.blockquote.strong.md");
        assert!(!blocks[0].new_context);

        assert_eq!(normalize(&blocks[1].text), "Some bold text.");
        assert_eq!(blocks[1].scope, "text.blockquote.md");
        assert!(blocks[1].new_context);

        assert!(effects.contains(&Effect::ScopeHit("text.blockquote".into())));
        assert!(!effects.iter().any(|e| matches!(e, Effect::TagHit(_))));
    }

    #[test]
    fn nested_context_masks_the_preceding_text_of_the_open_block() {
        let doc = Document::new("quote.md", "> Some **bold** text.\n");
        let effects = walk(&doc, &WalkerConfig::default(), &blockquote_tokens());
        let blocks = dispatched(&effects);

        assert_eq!(blocks[0].context, "> @@@@@**bold** text.\n");
        // The finalized block sees the context from before its own masking.
        assert_eq!(blocks[1].context, doc.content());
    }

    #[test]
    fn context_is_masked_after_each_block() {
        let source = "Same words.\n\nSame words.\n";
        let doc = Document::new("twice.md", source);
        let tokens = [
            Token::start("p"),
            Token::text("Same words."),
            Token::end("p"),
            Token::start("p"),
            Token::text("Same words."),
            Token::end("p"),
        ];
        let effects = walk(&doc, &WalkerConfig::default(), &tokens);
        let blocks = dispatched(&effects);

        assert_eq!(blocks.len(), 2);
        assert_eq!(blocks[0].context, source);
        assert_eq!(blocks[1].context, "@@@@@@@@@@@\n\nSame words.\n");
        assert_eq!(blocks[1].context.chars().count(), source.chars().count());
    }

    #[test]
    fn ignored_inline_scopes_are_masked() {
        let doc = Document::new("run.md", "Run `make` now.\n");
        let tokens = [
            Token::start("p"),
            Token::text("Run "),
            Token::start("code"),
            Token::text("make"),
            Token::end("code"),
            Token::text(" now."),
            Token::end("p"),
        ];
        let effects = walk(&doc, &WalkerConfig::default(), &tokens);
        let blocks = dispatched(&effects);

        assert_eq!(blocks[0].scope, "code.md");
        assert_eq!(blocks[0].text, "make");
        assert_eq!(blocks[1].scope, "text.md");
        assert_eq!(normalize(&blocks[1].text), "Run **** now.");
    }

    #[test]
    fn skip_tags_drop_their_content_and_count_hits() {
        let doc = Document::new("code.md", "");
        let tokens = [
            Token::start("p"),
            Token::text("Before."),
            Token::end("p"),
            Token::start("pre"),
            Token::start("code"),
            Token::text("let x = 1;"),
            Token::end("code"),
            Token::end("pre"),
            Token::start("p"),
            Token::text("After."),
            Token::end("p"),
        ];
        let effects = walk(&doc, &WalkerConfig::default(), &tokens);
        let texts: Vec<_> = dispatched(&effects).iter().map(|b| b.text.clone()).collect();

        assert_eq!(texts, vec!["Before.", "After."]);
        let hits: Vec<_> = effects
            .iter()
            .filter(|e| matches!(e, Effect::TagHit(_)))
            .collect();
        assert_eq!(hits, vec![&Effect::TagHit("pre".into())]);
    }

    #[test]
    fn skip_ends_when_the_ancestor_closes() {
        let doc = Document::new("open.md", "");
        let tokens = [
            Token::start("div"),
            Token::start("figure"),
            Token::text("hidden"),
            Token::end("div"),
            Token::start("p"),
            Token::text("shown"),
            Token::end("p"),
        ];
        let effects = walk(&doc, &WalkerConfig::default(), &tokens);
        let blocks = dispatched(&effects);

        assert_eq!(blocks.len(), 1);
        assert_eq!(blocks[0].text, "shown");
    }

    #[test]
    fn nested_skip_tags_of_the_same_name() {
        let doc = Document::new("nested.html", "");
        let tokens = [
            Token::start("figure"),
            Token::start("figure"),
            Token::text("inner"),
            Token::end("figure"),
            Token::text("outer"),
            Token::end("figure"),
            Token::start("p"),
            Token::text("visible"),
            Token::end("p"),
        ];
        let effects = walk(&doc, &WalkerConfig::default(), &tokens);
        let texts: Vec<_> = dispatched(&effects).iter().map(|b| b.text.clone()).collect();
        assert_eq!(texts, vec!["visible"]);
    }

    #[test]
    fn skip_classes_apply_to_block_tags_only() {
        let doc = Document::new("page.html", "");
        let tokens = [
            Token::start("div").with_attr("class", "highlight code"),
            Token::text("hidden"),
            Token::end("div"),
            Token::start("p"),
            Token::text("A "),
            Token::start("span").with_attr("class", "code"),
            Token::text("literal"),
            Token::end("span"),
            Token::end("p"),
        ];
        let effects = walk(&doc, &WalkerConfig::default(), &tokens);
        let blocks = dispatched(&effects);

        assert_eq!(blocks.len(), 1);
        // The span's text follows a token carrying a skipped class.
        assert_eq!(normalize(&blocks[0].text), "A *******");
        assert!(effects.contains(&Effect::TagHit("div".into())));
    }

    #[test]
    fn autolinks_are_masked() {
        let doc = Document::new("link.md", "");
        let tokens = [
            Token::start("p"),
            Token::text("See "),
            Token::start("a").with_attr("href", "https://example.com"),
            Token::text("https://example.com"),
            Token::end("a"),
            Token::end("p"),
        ];
        let effects = walk(&doc, &WalkerConfig::default(), &tokens);
        let blocks = dispatched(&effects);

        assert_eq!(blocks[0].scope, "link.md");
        assert_eq!(normalize(&blocks[1].text), "See *******************");
    }

    #[test]
    fn alt_text_is_dispatched_unless_suppressed() {
        let doc = Document::new("img.md", "");
        let tokens = [
            Token::start("p"),
            Token::start("img").with_attr("alt", "A red bike"),
            Token::end("p"),
        ];

        let effects = walk(&doc, &WalkerConfig::default(), &tokens);
        let blocks = dispatched(&effects);
        assert_eq!(blocks.len(), 1);
        assert_eq!(blocks[0].text, "A red bike");
        assert_eq!(blocks[0].scope, "text.attr.alt");

        let suppressed = WalkerConfig::default().with_alt_suppressed(true);
        assert!(dispatched(&walk(&doc, &suppressed, &tokens)).is_empty());
    }

    #[test]
    fn emphasis_inside_code_counts_as_code() {
        let doc = Document::new("code.md", "");
        let tokens = [
            Token::start("p"),
            Token::start("code"),
            Token::start("em"),
            Token::text("var"),
            Token::end("em"),
            Token::end("code"),
            Token::end("p"),
        ];
        let effects = walk(&doc, &WalkerConfig::default(), &tokens);
        let blocks = dispatched(&effects);

        assert_eq!(blocks[0].scope, "code.md");
        assert_eq!(normalize(&blocks[1].text), "***");
    }

    #[test]
    fn emphasis_after_a_code_span_is_not_code() {
        let doc = Document::new("x.md", "");
        let config = WalkerConfig::default();
        let tokens = [
            Token::start("p"),
            Token::start("code"),
            Token::start("em"),
            Token::text("var"),
            Token::end("em"),
            Token::end("code"),
            Token::text(" then "),
            Token::start("em"),
            Token::text("word"),
            Token::end("em"),
        ];
        let mut walker = Walker::new(&config, &doc);
        let mut effects = Vec::new();
        for (i, token) in tokens.iter().enumerate() {
            effects.extend(walker.step(token));
            if i == 5 {
                assert_eq!(walker.state().history.as_slice(), ["p"]);
            }
        }
        effects.extend(walker.step(&Token::end("p")));
        assert!(walker.state().history.is_empty());

        let blocks = dispatched(&effects);
        let scopes: Vec<_> = blocks.iter().map(|b| b.scope.to_string()).collect();
        assert_eq!(scopes, vec!["code.md", "emphasis.md", "text.md"]);
        assert_eq!(blocks[1].text, "word");
        assert_eq!(normalize(&blocks[2].text), "*** then word");
    }

    #[test]
    fn rst_literal_spans_are_suppressed() {
        let doc = Document::new("guide.rst", "");
        let tokens = [
            Token::start("p"),
            Token::start("tt"),
            Token::start("span"),
            Token::text("literal"),
            Token::end("span"),
            Token::end("tt"),
            Token::end("p"),
        ];
        let config = WalkerConfig::default().with_ignored_scopes(&["kbd"]);
        let effects = walk(&doc, &config, &tokens);
        assert_eq!(normalize(&dispatched(&effects)[0].text), "*******");

        let md = Document::new("guide.md", "");
        let effects = walk(&md, &config, &tokens);
        assert_eq!(normalize(&dispatched(&effects)[0].text), "literal");
    }

    #[test]
    fn headings_and_prose_feed_the_summary_but_tables_do_not() {
        let doc = Document::new("doc.md", "");
        let tokens = [
            Token::start("h2"),
            Token::text("Title"),
            Token::end("h2"),
            Token::start("table"),
            Token::start("td"),
            Token::text("cell"),
            Token::end("td"),
            Token::end("table"),
            Token::start("p"),
            Token::text("Body."),
            Token::end("p"),
        ];
        let effects = walk(&doc, &WalkerConfig::default(), &tokens);
        let summary: Vec<_> = effects
            .iter()
            .filter_map(|e| match e {
                Effect::Summary(text) => Some(text.as_str()),
                _ => None,
            })
            .collect();
        assert_eq!(summary, vec!["Title", "Body."]);

        let scopes: Vec<_> = dispatched(&effects).iter().map(|b| b.scope.to_string()).collect();
        assert_eq!(
            scopes,
            vec!["text.heading.h2.md", "text.table.cell.md", "text.md"]
        );
    }

    #[test]
    fn lines_are_counted_per_block() {
        let doc = Document::new("lines.md", "");
        let tokens = [
            Token::start("p"),
            Token::text("one"),
            Token::text("\n"),
            Token::text("two"),
            Token::end("p"),
            Token::text("\n"),
            Token::start("p"),
            Token::text("three"),
            Token::end("p"),
        ];
        let effects = walk(&doc, &WalkerConfig::default(), &tokens);
        let blocks = dispatched(&effects);

        assert_eq!((blocks[0].line, blocks[0].lines), (1, 1));
        // The newline between the paragraphs belongs to the second block.
        assert_eq!((blocks[1].line, blocks[1].lines), (3, 1));
    }

    #[test]
    fn comments_are_forwarded() {
        let doc = Document::new("c.md", "");
        let effects = walk(&doc, &WalkerConfig::default(), &[Token::comment("scopelint off")]);
        assert_eq!(effects, vec![Effect::Comment("scopelint off".into())]);
    }

    #[test]
    fn unbalanced_streams_still_finish() {
        let doc = Document::new("open.md", "");
        let tokens = [Token::start("ul"), Token::start("li"), Token::text("dangling")];
        let effects = walk(&doc, &WalkerConfig::default(), &tokens);
        let blocks = dispatched(&effects);
        assert_eq!(blocks.len(), 1);
        assert_eq!(blocks[0].scope, "text.list.md");
    }

    #[test]
    fn walker_config_is_shareable() {
        fn assert_send_sync<T: Send + Sync>() {}
        assert_send_sync::<WalkerConfig>();
    }
}
