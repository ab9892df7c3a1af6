//! Keyword lookup over the knowledge base.
//!
//! A query token counts towards an entry when it appears anywhere in the
//! entry's normalized text, so `"fuerza"` also scores against `"fuerzas"` and
//! `"reforzar"` does not score against `"fuerza"`. This substring behaviour
//! is the established contract of the lookup and is kept as is.

use super::normalize::normalize;
use super::store::{KnowledgeEntry, KnowledgeStore};

/// Tokens of this many characters or fewer are ignored.
pub const MIN_TOKEN_CHARS: usize = 3;

/// Best-scoring entry for a query.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct KnowledgeMatch<'a> {
    pub entry: &'a KnowledgeEntry,
    pub score: usize,
}

/// Splits a normalized query into the tokens used for scoring.
pub fn query_tokens(query: &str) -> Vec<String> {
    normalize(query)
        .split_whitespace()
        .filter(|token| token.chars().count() > MIN_TOKEN_CHARS)
        .map(str::to_string)
        .collect()
}

/// Number of tokens occurring in `text`. Repeated tokens count every time.
pub fn score_text(tokens: &[String], text: &str) -> usize {
    tokens
        .iter()
        .filter(|token| text.contains(token.as_str()))
        .count()
}

/// Returns the entry with the highest positive score, or `None`.
///
/// Entries are scanned in store order and a later entry only replaces the
/// current best with a strictly greater score, so the first entry wins ties.
pub fn find_context<'a>(query: &str, store: &'a KnowledgeStore) -> Option<KnowledgeMatch<'a>> {
    let tokens = query_tokens(query);
    if tokens.is_empty() {
        return None;
    }

    let mut best: Option<KnowledgeMatch<'a>> = None;
    let mut max_score = 0;

    for indexed in store.indexed() {
        let score = score_text(&tokens, &indexed.text);
        if score > max_score {
            max_score = score;
            best = Some(KnowledgeMatch {
                entry: &indexed.entry,
                score,
            });
        }
    }

    best
}

#[cfg(test)]
mod tests {
    use super::*;

    fn gravedad() -> KnowledgeEntry {
        KnowledgeEntry::new(
            "física",
            "¿Qué es la gravedad?",
            "La gravedad es una fuerza...",
        )
    }

    fn sample_store() -> KnowledgeStore {
        KnowledgeStore::new(vec![
            KnowledgeEntry::new(
                "química",
                "¿Qué es una molécula?",
                "Una molécula es un grupo de átomos unidos.",
            ),
            gravedad(),
            KnowledgeEntry::new(
                "tecnología",
                "¿Qué es un algoritmo?",
                "Un algoritmo es una secuencia de pasos.",
            ),
        ])
    }

    #[test]
    fn finds_entry_for_accentless_query() {
        let store = sample_store();
        let found = find_context("qué es la gravedad", &store).unwrap();

        assert_eq!(found.entry, &gravedad());
        assert_eq!(found.score, 1);
    }

    #[test]
    fn short_tokens_never_match() {
        let store = sample_store();
        assert!(find_context("qué es la", &store).is_none());
        assert!(find_context("hola", &store).is_none());
        assert!(find_context("", &store).is_none());
        assert!(find_context("   \t\n ", &store).is_none());
    }

    #[test]
    fn four_character_tokens_are_kept() {
        assert_eq!(query_tokens("sol luna agua"), vec!["luna", "agua"]);
        assert_eq!(query_tokens("Átomo"), vec!["atomo"]);
    }

    #[test]
    fn empty_store_never_matches() {
        assert!(find_context("gravedad", &KnowledgeStore::empty()).is_none());
    }

    #[test]
    fn scoring_is_invariant_under_accents_and_case() {
        let store = sample_store();
        let variants = [
            "molécula átomos",
            "MOLECULA ATOMOS",
            "Molécula Átomos",
            "molecula atomos",
        ];

        let results: Vec<_> = variants
            .iter()
            .map(|q| find_context(q, &store).map(|m| (m.entry.category.clone(), m.score)))
            .collect();

        assert!(results.iter().all(|r| r == &results[0]));
        assert_eq!(results[0], Some(("química".to_string(), 2)));
    }

    #[test]
    fn tokens_match_as_substrings() {
        let store = KnowledgeStore::new(vec![KnowledgeEntry::new(
            "física",
            "Fuerzas",
            "Las fuerzas cambian el movimiento.",
        )]);

        // "fuerza" is a substring of "fuerzas".
        assert!(find_context("fuerza", &store).is_some());
        // "movi" is a substring of "movimiento" even though it is not a word.
        assert!(find_context("movi", &store).is_some());
    }

    #[test]
    fn highest_score_wins() {
        let store = sample_store();
        let found = find_context("algoritmo secuencia pasos gravedad", &store).unwrap();

        assert_eq!(found.entry.category, "tecnología");
        assert_eq!(found.score, 3);
    }

    #[test]
    fn first_entry_wins_ties() {
        let store = KnowledgeStore::new(vec![
            KnowledgeEntry::new("a", "energía solar", "uno"),
            KnowledgeEntry::new("b", "energía eólica", "dos"),
        ]);

        let found = find_context("energia", &store).unwrap();
        assert_eq!(found.entry.category, "a");
    }

    #[test]
    fn repeated_tokens_count_each_time() {
        let tokens = query_tokens("agua agua fuego");
        assert_eq!(score_text(&tokens, "el agua moja"), 2);
    }

    #[test]
    fn any_substring_token_yields_a_positive_match() {
        let store = sample_store();
        for query in ["grupo", "secuencia", "fisica", "QUIMICA", "fuerza"] {
            let found = find_context(query, &store);
            assert!(found.is_some(), "expected a match for {query}");
            assert!(found.unwrap().score > 0);
        }
    }
}
