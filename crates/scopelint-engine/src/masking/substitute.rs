/// Replaces the first occurrence of `target` in `source` with `filler`.
///
/// Every character of the matched occurrence except `\n` becomes `filler`, so
/// the result has exactly as many characters (and lines) as `source`.
///
/// Returns the new string and whether `target` was found. An empty `target`
/// is never found.
pub fn substitute(source: &str, target: &str, filler: char) -> (String, bool) {
    if target.is_empty() {
        return (source.to_string(), false);
    }
    match source.find(target) {
        Some(start) => (mask_range(source, start, start + target.len(), filler), true),
        None => (source.to_string(), false),
    }
}

/// Masks the byte range `[start, end)` of `source`.
///
/// Both bounds must lie on char boundaries.
pub(crate) fn mask_range(source: &str, start: usize, end: usize, filler: char) -> String {
    let mut out = String::with_capacity(source.len());
    out.push_str(&source[..start]);
    out.extend(
        source[start..end]
            .chars()
            .map(|c| if c == '\n' { c } else { filler }),
    );
    out.push_str(&source[end..]);
    out
}

/// Byte length of `masked` once every char except `\n` became `filler`.
pub(crate) fn masked_len(masked: &str, filler: char) -> usize {
    masked
        .chars()
        .map(|c| if c == '\n' { 1 } else { filler.len_utf8() })
        .sum()
}
