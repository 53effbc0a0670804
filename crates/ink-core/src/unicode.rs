//! Character-level Unicode classification for Chinese and pinyin text.

/// CJK Unified Ideographs plus Extension A and B. Compatibility ideographs and
/// the later extensions never show up in practice content.
pub fn is_han(c: char) -> bool {
    ('\u{4E00}'..='\u{9FFF}').contains(&c)
        || ('\u{3400}'..='\u{4DBF}').contains(&c)
        || ('\u{20000}'..='\u{2A6DF}').contains(&c)
}

/// True if the string contains at least one Han character.
pub fn contains_han(s: &str) -> bool {
    s.chars().any(is_han)
}

/// Punctuation as far as token splitting is concerned: ASCII punctuation, the
/// CJK Symbols and Punctuation block (U+3000..U+303F) and the full-width
/// forms of ASCII punctuation (U+FF01..U+FF0F and friends).
pub fn is_punctuation(c: char) -> bool {
    c.is_ascii_punctuation()
        || ('\u{3000}'..='\u{303F}').contains(&c)
        || ('\u{FF01}'..='\u{FF0F}').contains(&c)
        || ('\u{FF1A}'..='\u{FF20}').contains(&c)
        || ('\u{FF3B}'..='\u{FF40}').contains(&c)
        || ('\u{FF5B}'..='\u{FF65}').contains(&c)
        || matches!(c, '\u{2018}'..='\u{201F}' | '\u{2026}' | '\u{00B7}')
}
