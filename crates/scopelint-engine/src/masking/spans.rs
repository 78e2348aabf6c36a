use std::sync::OnceLock;

use log::trace;
use regex::Regex;

use super::substitute::{mask_range, masked_len};
use crate::nlp::{QUOTE_TAGS, TaggedToken, WordTagger};

const SPAN_FILLER: char = '*';

/// A tagged token located in its source text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TaggedWord {
    /// 1-based line number within the tagged text.
    pub line: usize,
    pub token: TaggedToken,
    /// 1-based, inclusive character columns of the token on its line.
    pub span: (usize, usize),
}

/// Tags `text` line by line and records where each word sits.
///
/// The tagger sees a markup-light copy of each line, but positions are taken
/// from the original line. Every located token is masked before the next
/// lookup, so repeated words resolve left to right instead of collapsing onto
/// their first occurrence.
pub fn extract_tagged_spans<T>(text: &str, tagger: &T) -> Vec<TaggedWord>
where
    T: WordTagger + ?Sized,
{
    let mut words = Vec::new();

    for (idx, line) in text.split('\n').enumerate() {
        let plain = strip_markup(line);
        let mut masked = line.to_string();
        let mut pos = 0;

        for tok in tagger.tag(&plain) {
            if tok.text.trim().is_empty() {
                continue;
            }
            let Some(rel) = masked[pos..].find(&tok.text) else {
                trace!("token {:?} not found on line {}", tok.text, idx + 1);
                continue;
            };
            let start = pos + rel;
            let end = start + tok.text.len();

            if !QUOTE_TAGS.contains(&tok.tag.as_str()) {
                let col = masked[..start].chars().count();
                words.push(TaggedWord {
                    line: idx + 1,
                    span: (col + 1, col + tok.text.chars().count()),
                    token: tok.clone(),
                });
            }

            masked = mask_range(&masked, start, end, SPAN_FILLER);
            pos = start + masked_len(&tok.text, SPAN_FILLER);
        }
    }

    words
}

/// Removes inline markdown syntax from a single line.
///
/// Only used to feed the tagger; the result is not offset-preserving.
pub fn strip_markup(line: &str) -> String {
    static PREFIX: OnceLock<Regex> = OnceLock::new();
    static LINK: OnceLock<Regex> = OnceLock::new();
    static MARKERS: OnceLock<Regex> = OnceLock::new();

    let prefix = PREFIX.get_or_init(|| {
        Regex::new(r"^\s*(?:#{1,6}\s+|(?:>\s*)+|[-*+]\s+|\d+[.)]\s+)").expect("Invalid prefix regex")
    });
    let link = LINK
        .get_or_init(|| Regex::new(r"!?\[([^\]]*)\]\([^)]*\)").expect("Invalid link regex"));
    let markers =
        MARKERS.get_or_init(|| Regex::new(r"\*+|`+|~~").expect("Invalid marker regex"));

    let stripped = prefix.replace(line, "");
    let stripped = link.replace_all(&stripped, "$1");
    markers.replace_all(&stripped, "").into_owned()
}
