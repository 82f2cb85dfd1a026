//! Character-level classification for Japanese readings.

/// Hiragana block (U+3040..U+309F)
pub fn is_hiragana(c: char) -> bool {
    ('\u{3040}'..='\u{309F}').contains(&c)
}

/// Katakana block (U+30A0..U+30FF), including the prolonged sound mark ー
pub fn is_katakana(c: char) -> bool {
    ('\u{30A0}'..='\u{30FF}').contains(&c)
}

pub fn is_kanji(c: char) -> bool {
    ('\u{4E00}'..='\u{9FFF}').contains(&c)
        || ('\u{3400}'..='\u{4DBF}').contains(&c)
        || ('\u{20000}'..='\u{2A6DF}').contains(&c)
}

/// Script a kana reading is filed under
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum KanaReading {
    Hiragana(String),
    Katakana(String),
}

impl KanaReading {
    /// Any katakana character makes the whole reading katakana
    pub fn classify(reading: &str) -> Self {
        if reading.chars().any(is_katakana) {
            KanaReading::Katakana(reading.to_string())
        } else {
            KanaReading::Hiragana(reading.to_string())
        }
    }

    pub fn text(&self) -> &str {
        match self {
            KanaReading::Hiragana(text) | KanaReading::Katakana(text) => text,
        }
    }

    pub fn into_fields(self) -> (Option<String>, Option<String>) {
        match self {
            KanaReading::Hiragana(text) => (Some(text), None),
            KanaReading::Katakana(text) => (None, Some(text)),
        }
    }
}

/// Stand-in romanization: the reading itself. Stable for the same input,
/// not a phonetic transliteration.
pub fn placeholder_romaji(reading: &str) -> String {
    reading.to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn char_classification() {
        assert!(is_hiragana('あ'));
        assert!(!is_hiragana('ア'));
        assert!(is_katakana('ア'));
        assert!(is_katakana('ー'));
        assert!(is_kanji('漢'));
        assert!(!is_kanji('a'));
    }

    #[test]
    fn mixed_reading_counts_as_katakana() {
        assert_eq!(
            KanaReading::classify("がっこう"),
            KanaReading::Hiragana("がっこう".into())
        );
        assert_eq!(
            KanaReading::classify("テレビ"),
            KanaReading::Katakana("テレビ".into())
        );
        assert!(matches!(
            KanaReading::classify("らーめん"),
            KanaReading::Katakana(_)
        ));
    }

    #[test]
    fn placeholder_is_deterministic() {
        assert_eq!(placeholder_romaji("ねこ"), placeholder_romaji("ねこ"));
    }
}
