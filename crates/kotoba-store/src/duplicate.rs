use kotoba_types::{VocabularyDraft, VocabularyEntry};

/// First stored entry that `draft` collides with, if any.
///
/// A collision is any case-insensitive match on headword, on romaji, or on a
/// kana reading present on both sides. Homophones written with different
/// kanji therefore collide through their romaji.
pub fn find_duplicate<'a>(
    draft: &VocabularyDraft,
    existing: &'a [VocabularyEntry],
) -> Option<&'a VocabularyEntry> {
    existing.iter().find(|entry| is_duplicate(draft, entry))
}

fn is_duplicate(draft: &VocabularyDraft, entry: &VocabularyEntry) -> bool {
    eq_ignore_case(&draft.headword, &entry.headword)
        || eq_ignore_case(&draft.romaji, &entry.romaji)
        || both_eq(draft.hiragana.as_deref(), entry.hiragana.as_deref())
        || both_eq(draft.katakana.as_deref(), entry.katakana.as_deref())
}

fn both_eq(a: Option<&str>, b: Option<&str>) -> bool {
    match (a, b) {
        (Some(a), Some(b)) => eq_ignore_case(a, b),
        _ => false,
    }
}

fn eq_ignore_case(a: &str, b: &str) -> bool {
    a.to_lowercase() == b.to_lowercase()
}

#[cfg(test)]
mod tests {
    use chrono::Utc;

    use super::*;

    fn stored(draft: VocabularyDraft) -> VocabularyEntry {
        VocabularyEntry::from_draft(draft, Utc::now())
    }

    #[test]
    fn same_headword_collides() {
        let existing = vec![stored(VocabularyDraft::new("学校", "gakkou"))];
        let draft = VocabularyDraft::new("学校", "gakko");
        assert!(find_duplicate(&draft, &existing).is_some());
    }

    #[test]
    fn romaji_collides_case_insensitively_even_for_other_headword() {
        let existing = vec![stored(VocabularyDraft::new("学校", "gakkou"))];
        let draft = VocabularyDraft::new("学好", "GAKKOU");
        assert_eq!(
            find_duplicate(&draft, &existing).map(|e| e.headword.as_str()),
            Some("学校")
        );
    }

    #[test]
    fn kana_only_counts_when_present_on_both() {
        let mut with_kana = VocabularyDraft::new("橋", "hashi");
        with_kana.hiragana = Some("はし".into());
        let existing = vec![stored(with_kana)];

        let mut same_kana = VocabularyDraft::new("箸", "hashi-chopsticks");
        same_kana.hiragana = Some("はし".into());
        assert!(find_duplicate(&same_kana, &existing).is_some());

        let no_kana = VocabularyDraft::new("端", "hashi-edge");
        assert!(find_duplicate(&no_kana, &existing).is_none());
    }

    #[test]
    fn katakana_match_collides() {
        let mut coffee = VocabularyDraft::new("珈琲", "koohii");
        coffee.katakana = Some("コーヒー".into());
        let existing = vec![stored(coffee)];

        let mut again = VocabularyDraft::new("コーヒー", "kohi");
        again.katakana = Some("コーヒー".into());
        assert!(find_duplicate(&again, &existing).is_some());
    }

    #[test]
    fn distinct_word_is_accepted() {
        let existing = vec![stored(VocabularyDraft::new("学校", "gakkou"))];
        let draft = VocabularyDraft::new("電車", "densha");
        assert!(find_duplicate(&draft, &existing).is_none());
    }
}
