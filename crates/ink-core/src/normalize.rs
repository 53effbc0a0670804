//! Answer normalization applied to both sides of every comparison.
//!
//! `normalize` canonicalizes case, whitespace and full-width punctuation.
//! `fold_tone_marks` removes pinyin tone diacritics so a toned answer matches
//! the toneless syllables produced by the transliterator.

/// Full-width Chinese punctuation and its ASCII counterpart.
pub const PUNCTUATION_TABLE: &[(char, char)] = &[
    ('，', ','),
    ('。', '.'),
    ('！', '!'),
    ('？', '?'),
    ('“', '"'),
    ('”', '"'),
    ('‘', '\''),
    ('’', '\''),
    ('（', '('),
    ('）', ')'),
    ('：', ':'),
    ('；', ';'),
];

fn ascii_punctuation(c: char) -> Option<char> {
    PUNCTUATION_TABLE
        .iter()
        .find_map(|&(full, ascii)| (full == c).then_some(ascii))
}

/// Lower-case, drop all whitespace and map full-width punctuation to ASCII.
pub fn normalize(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for c in text.chars() {
        if c.is_whitespace() {
            continue;
        }
        match ascii_punctuation(c) {
            Some(ascii) => out.push(ascii),
            None => out.extend(c.to_lowercase()),
        }
    }
    out
}

/// Map a precomposed tone-marked vowel to its toneless spelling.
/// ü and its toned forms become `v`, the keyboard spelling of ü.
fn fold_char(c: char) -> Option<char> {
    let folded = match c {
        'ā' | 'á' | 'ǎ' | 'à' => 'a',
        'Ā' | 'Á' | 'Ǎ' | 'À' => 'A',
        'ē' | 'é' | 'ě' | 'è' => 'e',
        'Ē' | 'É' | 'Ě' | 'È' => 'E',
        'ī' | 'í' | 'ǐ' | 'ì' => 'i',
        'Ī' | 'Í' | 'Ǐ' | 'Ì' => 'I',
        'ō' | 'ó' | 'ǒ' | 'ò' => 'o',
        'Ō' | 'Ó' | 'Ǒ' | 'Ò' => 'O',
        'ū' | 'ú' | 'ǔ' | 'ù' => 'u',
        'Ū' | 'Ú' | 'Ǔ' | 'Ù' => 'U',
        'ü' | 'ǖ' | 'ǘ' | 'ǚ' | 'ǜ' => 'v',
        'Ü' | 'Ǖ' | 'Ǘ' | 'Ǚ' | 'Ǜ' => 'V',
        // Syllabic nasals (嗯 ń / ň / ǹ, 呣 ḿ).
        'ń' | 'ň' | 'ǹ' => 'n',
        'Ń' | 'Ň' | 'Ǹ' => 'N',
        'ḿ' => 'm',
        'Ḿ' => 'M',
        _ => return None,
    };
    Some(folded)
}

/// Combining marks that carry the four Mandarin tones.
fn is_combining_tone(c: char) -> bool {
    matches!(c, '\u{0300}' | '\u{0301}' | '\u{0304}' | '\u{030C}')
}

const COMBINING_DIAERESIS: char = '\u{0308}';

/// Replace every tone-marked pinyin letter with its unmarked form.
///
/// Handles precomposed letters and decomposed input (base letter followed by
/// a combining tone mark). A combining diaeresis after `u` turns it into `v`.
pub fn fold_tone_marks(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for c in text.chars() {
        if let Some(folded) = fold_char(c) {
            out.push(folded);
        } else if is_combining_tone(c) {
            continue;
        } else if c == COMBINING_DIAERESIS
            && out.ends_with(|l: char| matches!(l, 'u' | 'U' | 'v' | 'V'))
        {
            if let Some(last) = out.pop() {
                out.push(if last.is_ascii_uppercase() { 'V' } else { 'v' });
            }
        } else {
            out.push(c);
        }
    }
    out
}

/// `normalize` followed by `fold_tone_marks`; used for pinyin comparisons.
pub fn normalize_pinyin(text: &str) -> String {
    fold_tone_marks(&normalize(text))
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn lowercases_and_strips_whitespace() {
        assert_eq!(normalize("  Hello World \t\n"), "helloworld");
        assert_eq!(normalize("NI HAO"), "nihao");
        assert_eq!(normalize(""), "");
        assert_eq!(normalize("   "), "");
    }

    #[test]
    fn ideographic_space_is_whitespace() {
        assert_eq!(normalize("你\u{3000}好"), "你好");
    }

    #[test]
    fn maps_every_full_width_mark() {
        assert_eq!(normalize("，。！？“”‘’（）：；"), ",.!?\"\"''():;");
    }

    #[test]
    fn chinese_and_ascii_punctuation_agree() {
        assert_eq!(normalize("你好，吗？"), normalize("你好,吗?"));
        assert_eq!(normalize("（注意）：好；"), normalize("(注意):好;"));
    }

    #[test]
    fn leaves_other_punctuation_alone() {
        assert_eq!(normalize("a、b"), "a、b");
    }

    #[test]
    fn folds_all_tones() {
        assert_eq!(fold_tone_marks("āáǎà ēéěè īíǐì ōóǒò ūúǔù"), "aaaa eeee iiii oooo uuuu");
        assert_eq!(fold_tone_marks("ǖǘǚǜü"), "vvvvv");
        assert_eq!(fold_tone_marks("ÁĚǏÒǓǗ"), "AEIOUV");
        assert_eq!(fold_tone_marks("ńňǹḿ"), "nnnm");
    }

    #[test]
    fn folds_decomposed_marks() {
        assert_eq!(fold_tone_marks("ni\u{030C} ha\u{030C}o"), "ni hao");
        assert_eq!(fold_tone_marks("lu\u{0308}\u{0301}"), "lv");
    }

    #[test]
    fn toned_answer_matches_toneless() {
        assert_eq!(normalize_pinyin("nǐ hǎo"), "nihao");
        assert_eq!(normalize_pinyin("Lǜ Sè"), "lvse");
        assert_eq!(normalize_pinyin("lü"), normalize_pinyin("lv"));
    }

    #[test]
    fn fold_passes_through_other_text() {
        assert_eq!(fold_tone_marks("你好 hello"), "你好 hello");
    }

    fn practice_text() -> impl Strategy<Value = String> {
        prop::collection::vec(
            prop_oneof![
                prop::char::range('a', 'z'),
                prop::char::range('A', 'Z'),
                prop::sample::select(vec![
                    ' ', '\t', '\u{3000}', '你', '好', '吗', '，', '。', '！', '？', '“', '”',
                    '‘', '’', '（', '）', '：', '；', 'ǎ', 'Ǎ', 'ü', 'ǜ', '\u{030C}', '\u{0308}',
                    ',', '.', '\'',
                ]),
            ],
            0..40,
        )
        .prop_map(|chars| chars.into_iter().collect())
    }

    proptest! {
        #[test]
        fn normalize_is_idempotent(s in practice_text()) {
            let once = normalize(&s);
            prop_assert_eq!(normalize(&once), once);
        }

        #[test]
        fn normalize_pinyin_is_idempotent(s in practice_text()) {
            let once = normalize_pinyin(&s);
            prop_assert_eq!(normalize_pinyin(&once), once);
        }

        #[test]
        fn normalize_never_keeps_whitespace(s in practice_text()) {
            prop_assert!(!normalize(&s).chars().any(char::is_whitespace));
        }
    }
}
