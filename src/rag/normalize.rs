use unicode_normalization::UnicodeNormalization;

/// Lower-cases `text`, decomposes it (NFD) and drops combining diacritical
/// marks, so `"Física"` and `"fisica"` compare equal.
pub fn normalize(text: &str) -> String {
    text.to_lowercase()
        .nfd()
        .filter(|c| !is_combining_diacritic(*c))
        .collect()
}

fn is_combining_diacritic(c: char) -> bool {
    ('\u{0300}'..='\u{036f}').contains(&c)
}
