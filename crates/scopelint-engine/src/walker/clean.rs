use crate::masking::substitute;

/// Characters that may directly follow an inline span without a space.
const SENTENCE_PUNCT: [char; 6] = ['.', '?', '!', ',', ':', ';'];

/// Filler for text masked out of a block.
pub const TEXT_FILLER: char = '*';

/// Wrappers whose text is literal for a given format: `(ext, wrapper,
/// pass-through)`. Text is suppressed when the nearest significant ancestor
/// is `wrapper` and at least one `pass-through` tag sits between them.
const LITERAL_WRAPPERS: [(&str, &str, &str); 1] = [(".rst", "tt", "span")];

/// Prepares a text token for inclusion in the pending block.
///
/// Skipped text and autolinks (text equal to the link's own `href`) are
/// masked in place so offsets into the block stay valid. Inline text gets a
/// leading space so adjacent spans don't fuse into one word, unless it starts
/// with sentence punctuation.
pub fn clean(txt: &str, link_href: &str, skip: bool, inline: bool) -> String {
    let masked = skip || txt == link_href;
    let starter = !masked
        && txt
            .trim_start()
            .starts_with(|c: char| SENTENCE_PUNCT.contains(&c));

    let mut out = if masked {
        substitute(txt, txt, TEXT_FILLER).0
    } else {
        txt.to_string()
    };
    if inline && !starter {
        out.insert(0, ' ');
    }
    out
}

/// Whether text at the top of `history` sits inside a literal wrapper of
/// format `normed_ext`.
pub fn in_literal_wrapper<S: AsRef<str>>(history: &[S], normed_ext: &str) -> bool {
    LITERAL_WRAPPERS
        .iter()
        .filter(|(ext, _, _)| *ext == normed_ext)
        .any(|(_, wrapper, pass_through)| {
            let n = history.len();
            history
                .iter()
                .enumerate()
                .rev()
                .find(|(_, tag)| tag.as_ref() != *pass_through)
                .is_some_and(|(i, tag)| tag.as_ref() == *wrapper && i + 1 != n)
        })
}
