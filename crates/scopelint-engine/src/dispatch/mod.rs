//! # Dispatcher
//!
//! Drives a [`Walker`] over a token stream and applies its effects: blocks go
//! to a [`BlockLinter`], counters and comments go to the [`Document`]. Once
//! the stream ends, the two whole-document blocks (`summary` and `raw`) are
//! dispatched last.

use std::path::Path;

use log::{debug, warn};

use crate::error::LintError;
use crate::io::read_document;
use crate::models::{Document, ScopedBlock};
use crate::tokens::{MarkdownTokenizer, Token, TokenKind};
use crate::walker::{Effect, Walker, WalkerConfig};

/// Checks one block of a document.
///
/// Implementations typically look up the rules whose scope expression matches
/// `block.scope` and record alerts on `doc`.
pub trait BlockLinter {
    fn lint_block(&mut self, doc: &mut Document, block: &ScopedBlock) -> anyhow::Result<()>;
}

impl<F> BlockLinter for F
where
    F: FnMut(&mut Document, &ScopedBlock) -> anyhow::Result<()>,
{
    fn lint_block(&mut self, doc: &mut Document, block: &ScopedBlock) -> anyhow::Result<()> {
        self(doc, block)
    }
}

/// Applies walker effects to a document.
pub struct Dispatcher<'l, L: BlockLinter + ?Sized> {
    linter: &'l mut L,
}

impl<'l, L: BlockLinter + ?Sized> Dispatcher<'l, L> {
    pub fn new(linter: &'l mut L) -> Self {
        Self { linter }
    }

    pub fn apply(&mut self, doc: &mut Document, effect: Effect) -> Result<(), LintError> {
        match effect {
            Effect::Dispatch(block) => return self.dispatch(doc, &block),
            Effect::Comment(body) => doc.update_comments(&body),
            Effect::TagHit(tag) => doc.record_tag_hit(&tag),
            Effect::ScopeHit(scope) => doc.record_scope_hit(&scope),
            Effect::Summary(text) => doc.append_summary(&text),
        }
        Ok(())
    }

    /// Hands one block to the linter. A failing check aborts the document.
    pub fn dispatch(&mut self, doc: &mut Document, block: &ScopedBlock) -> Result<(), LintError> {
        debug!(
            "{}:{} dispatching {} block",
            doc.path().display(),
            block.line,
            block.scope
        );
        self.linter
            .lint_block(doc, block)
            .map_err(|source| LintError::Dispatch {
                file: doc.path().to_path_buf(),
                line: block.line,
                scope: block.scope.to_string(),
                source,
            })
    }

    /// Dispatches the whole-document blocks: the summary of prose, lists,
    /// headings and blockquotes, then the raw source. Comment state is reset
    /// first so directives seen at the end of the document don't leak in.
    pub fn sized_passes(&mut self, doc: &mut Document) -> Result<(), LintError> {
        doc.reset_comments();

        let line_count = doc.lines().len();
        let summary = ScopedBlock::new(doc.summary(), format!("summary{}", doc.real_ext()))
            .with_context(doc.content())
            .at_line(1, line_count);
        let raw =
            ScopedBlock::new(doc.raw(), format!("raw{}", doc.real_ext())).at_line(1, line_count);

        for block in [summary, raw] {
            self.dispatch(doc, &block)?;
        }
        Ok(())
    }
}

/// Lints a document given its token stream.
///
/// The stream ends at the first `Error` token: an empty one is a normal end
/// of stream, anything else aborts with [`LintError::Tokenizer`] before the
/// whole-document passes run.
pub fn lint_tokens<I, L>(
    doc: &mut Document,
    tokens: I,
    config: &WalkerConfig,
    linter: &mut L,
) -> Result<(), LintError>
where
    I: IntoIterator<Item = Token>,
    L: BlockLinter + ?Sized,
{
    let mut walker = Walker::new(config, doc);
    let mut dispatcher = Dispatcher::new(linter);

    for token in tokens {
        if token.kind == TokenKind::Error {
            if token.data.is_empty() {
                break;
            }
            return Err(LintError::Tokenizer {
                file: doc.path().to_path_buf(),
                line: walker.state().line,
                message: token.data,
            });
        }
        for effect in walker.step(&token) {
            dispatcher.apply(doc, effect)?;
        }
    }

    for effect in walker.finish() {
        dispatcher.apply(doc, effect)?;
    }
    dispatcher.sized_passes(doc)
}

/// Lints a Markdown document.
pub fn lint_markdown<L>(
    doc: &mut Document,
    config: &WalkerConfig,
    linter: &mut L,
) -> Result<(), LintError>
where
    L: BlockLinter + ?Sized,
{
    let tokens = MarkdownTokenizer::new(doc.content());
    lint_tokens(doc, tokens, config, linter)
}

/// Lints a document in any format with a tokenizer.
///
/// Returns `Ok(false)` after logging a warning when there is none for the
/// document's format.
pub fn lint_document<L>(
    doc: &mut Document,
    config: &WalkerConfig,
    linter: &mut L,
) -> Result<bool, LintError>
where
    L: BlockLinter + ?Sized,
{
    match doc.normed_ext() {
        ".md" => {
            lint_markdown(doc, config, linter)?;
            Ok(true)
        }
        other => {
            warn!(
                "{}: no tokenizer for {other} files, skipping",
                doc.path().display()
            );
            Ok(false)
        }
    }
}

/// Reads and lints the document at `path`.
///
/// Returns `Ok(None)` when its format has no tokenizer.
pub fn lint_file<L>(
    path: &Path,
    config: &WalkerConfig,
    linter: &mut L,
) -> Result<Option<Document>, LintError>
where
    L: BlockLinter + ?Sized,
{
    let mut doc = read_document(path)?;
    let linted = lint_document(&mut doc, config, linter)?;
    Ok(linted.then_some(doc))
}
