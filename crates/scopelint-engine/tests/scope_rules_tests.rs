//! Rules selected by scope expressions over a walked document.

use std::collections::BTreeMap;

use pretty_assertions::assert_eq;
use rstest::rstest;
use scopelint_engine::{
    Alert, BlockLinter, Document, ScopeExpression, ScopedBlock, WalkerConfig, lint_markdown,
};

/// Raises one alert per block for every rule whose scope matches.
struct RuleLinter {
    rules: Vec<(String, ScopeExpression)>,
}

impl RuleLinter {
    fn new(rules: &[(&str, &[&str])]) -> Self {
        let rules = rules
            .iter()
            .map(|(name, scope)| (name.to_string(), ScopeExpression::parse(*scope).unwrap()))
            .collect();
        Self { rules }
    }
}

impl BlockLinter for RuleLinter {
    fn lint_block(&mut self, doc: &mut Document, block: &ScopedBlock) -> anyhow::Result<()> {
        for (name, expr) in &self.rules {
            if expr.matches(&block.scope) && doc.comments().allows(name) {
                doc.add_alert(Alert {
                    check: name.clone(),
                    scope: block.scope.to_string(),
                    line: block.line,
                    message: block.text.trim().to_string(),
                });
            }
        }
        Ok(())
    }
}

fn alert_counts(doc: &Document) -> BTreeMap<String, usize> {
    let mut counts = BTreeMap::new();
    for alert in doc.alerts() {
        *counts.entry(alert.check.clone()).or_default() += 1;
    }
    counts
}

fn lint_guide(rules: &[(&str, &[&str])]) -> Document {
    let mut doc = Document::new("guide.md", include_str!("../test_data/guide.md"));
    let mut linter = RuleLinter::new(rules);
    lint_markdown(&mut doc, &WalkerConfig::default(), &mut linter).unwrap();
    doc
}

#[rstest]
#[case("Style.Strong", &["strong"], 1)]
#[case("Style.Lists", &["list"], 3)]
#[case("Style.ListProse", &["list & ~emphasis"], 2)]
#[case("Style.Headings", &["heading"], 1)]
#[case("Style.Links", &["link"], 1)]
// Two prose paragraphs are checked (`text.md`), plus summary and raw.
#[case("Style.WholeDocument", &["raw"], 4)]
#[case("Style.Outside", &["~blockquote & ~code"], 6)]
fn test_rule_alert_counts(#[case] name: &str, #[case] scope: &[&str], #[case] expected: usize) {
    let doc = lint_guide(&[(name, scope)]);
    assert_eq!(alert_counts(&doc).get(name).copied().unwrap_or(0), expected);
}

#[test]
fn test_prose_blocks_only_match_whole_document_expressions() {
    let doc = lint_guide(&[("Style.Prose", &["text"]), ("Style.NotCode", &["~code"])]);

    let prose: Vec<_> = doc
        .alerts()
        .iter()
        .filter(|a| a.scope == "text.md")
        .map(|a| a.check.as_str())
        .collect();
    assert_eq!(prose, vec!["Style.Prose", "Style.Prose"]);
}

#[test]
fn test_negated_rules_never_see_whole_document_blocks() {
    let doc = lint_guide(&[("Style.NotCode", &["~code"])]);
    assert!(
        doc.alerts()
            .iter()
            .all(|a| a.scope != "summary.md" && a.scope != "raw.md")
    );
}

#[test]
fn test_disabled_rule_is_silent_until_re_enabled() {
    let mut doc = Document::new(
        "toggle.md",
        "First.\n\n<!-- scopelint Style.Prose = NO -->\n\nSecond.\n\n<!-- scopelint Style.Prose = YES -->\n\nThird.\n",
    );
    let mut linter = RuleLinter::new(&[("Style.Prose", &["text"])]);
    lint_markdown(&mut doc, &WalkerConfig::default(), &mut linter).unwrap();

    let messages: Vec<_> = doc
        .alerts()
        .iter()
        .filter(|a| a.scope == "text.md")
        .map(|a| a.message.as_str())
        .collect();
    assert_eq!(messages, vec!["First.", "Third."]);
}

#[test]
fn test_alerts_record_block_lines() {
    let doc = lint_guide(&[("Style.Lists", &["list & ~emphasis"])]);
    let lines: Vec<_> = doc.alerts().iter().map(|a| (a.line, a.message.as_str())).collect();
    assert_eq!(lines, vec![(9, "first item"), (10, "second  item")]);
}
