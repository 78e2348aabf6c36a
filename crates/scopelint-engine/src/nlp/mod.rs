//! Natural-language tokenization seam.
//!
//! Part-of-speech tagging proper lives outside this crate; `WordTagger` is the
//! interface it plugs into. `SegmentTagger` is a dependency-light default that
//! splits on Unicode word boundaries and assigns coarse tags.

use unicode_segmentation::UnicodeSegmentation;

/// A word (or punctuation mark) with its part-of-speech tag.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TaggedToken {
    pub text: String,
    pub tag: String,
}

impl TaggedToken {
    pub fn new(text: impl Into<String>, tag: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            tag: tag.into(),
        }
    }
}

/// Tokens tagged as quotation marks; they take up space but are never words.
pub const QUOTE_TAGS: [&str; 2] = ["``", "''"];

/// Turns plain text into ordered, tagged tokens.
pub trait WordTagger {
    fn tag(&self, text: &str) -> Vec<TaggedToken>;
}

impl<F> WordTagger for F
where
    F: Fn(&str) -> Vec<TaggedToken>,
{
    fn tag(&self, text: &str) -> Vec<TaggedToken> {
        self(text)
    }
}

/// Word-boundary tokenizer with coarse tags: `CD` for numbers, the mark
/// itself for punctuation, `` `` ``/`''` for quotes and `NN` for everything
/// else.
#[derive(Debug, Default, Clone, Copy)]
pub struct SegmentTagger;

impl WordTagger for SegmentTagger {
    fn tag(&self, text: &str) -> Vec<TaggedToken> {
        let mut quote_open = false;
        text.split_word_bounds()
            .filter(|w| !w.trim().is_empty())
            .map(|w| TaggedToken::new(w, coarse_tag(w, &mut quote_open)))
            .collect()
    }
}

fn coarse_tag(word: &str, quote_open: &mut bool) -> String {
    match word {
        "\u{201c}" => return "``".to_string(),
        "\u{201d}" => return "''".to_string(),
        "\"" => {
            *quote_open = !*quote_open;
            return if *quote_open { "``" } else { "''" }.to_string();
        }
        _ => {}
    }

    if word.chars().any(|c| c.is_ascii_digit())
        && word.chars().all(|c| c.is_ascii_digit() || matches!(c, '.' | ','))
    {
        return "CD".to_string();
    }
    if word.chars().all(|c| c.is_ascii_punctuation()) {
        return word.to_string();
    }
    "NN".to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn tags(text: &str) -> Vec<(String, String)> {
        SegmentTagger
            .tag(text)
            .into_iter()
            .map(|t| (t.text, t.tag))
            .collect()
    }

    #[test]
    fn splits_words_and_punctuation() {
        assert_eq!(
            tags("It costs 3.50, really."),
            vec![
                ("It".into(), "NN".into()),
                ("costs".into(), "NN".into()),
                ("3.50".into(), "CD".into()),
                (",".into(), ",".into()),
                ("really".into(), "NN".into()),
                (".".into(), ".".into()),
            ]
        );
    }

    #[test]
    fn straight_quotes_alternate() {
        let out = tags("\"hi\" \"yo\"");
        let quote_tags: Vec<_> = out
            .iter()
            .filter(|(t, _)| t == "\"")
            .map(|(_, tag)| tag.as_str())
            .collect();
        assert_eq!(quote_tags, vec!["``", "''", "``", "''"]);
    }

    #[test]
    fn closures_are_taggers() {
        let tagger = |text: &str| vec![TaggedToken::new(text, "X")];
        assert_eq!(tagger.tag("whole"), vec![TaggedToken::new("whole", "X")]);
    }
}
