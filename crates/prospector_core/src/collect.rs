//! Input reconciliation: pure functions over explicit inputs.
//!
//! URL and keyword merging lives here, away from any view state, so the
//! same rules apply no matter which surface the input came from.

/// Extract URL candidates from newline-delimited text.
///
/// Lines are trimmed; blank lines and lines that do not start with `http`
/// (case-sensitive) are dropped. First occurrence wins, so the output is
/// duplicate-free and order-stable.
pub fn parse_urls(raw: &str) -> Vec<String> {
    let mut seen = Vec::new();
    for line in raw.lines() {
        let line = line.trim();
        if line.is_empty() || !line.starts_with("http") {
            continue;
        }
        if !seen.iter().any(|known: &String| known == line) {
            seen.push(line.to_owned());
        }
    }
    seen
}

/// Union of the file-provided URL set and the free-text box, file URLs
/// first, deduplicated with exact case-sensitive matching.
pub fn merge_urls(file_urls: &[String], free_text: &str) -> Vec<String> {
    let mut merged: Vec<String> = Vec::with_capacity(file_urls.len());
    for url in file_urls {
        if !merged.iter().any(|known| known == url) {
            merged.push(url.clone());
        }
    }
    for url in parse_urls(free_text) {
        if !merged.iter().any(|known| known == &url) {
            merged.push(url);
        }
    }
    merged
}

/// Parse a comma-delimited term field into an order-preserving sequence.
/// Terms are trimmed; empties are dropped; duplicates are kept as typed.
pub fn parse_terms(raw: &str) -> Vec<String> {
    raw.split(',')
        .map(str::trim)
        .filter(|term| !term.is_empty())
        .map(ToOwned::to_owned)
        .collect()
}

/// Canonical form for keyword membership tests.
pub fn normalize_keyword(raw: &str) -> String {
    raw.trim().to_lowercase()
}

/// Why a keyword was not added.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KeywordRejection {
    /// Normalized to the empty string.
    Empty,
    /// Already a member of the set; the set is left as it was.
    Duplicate,
}

/// Returns the keyword set with `raw` appended, or a rejection signal.
/// The existing set is never mutated.
pub fn add_keyword(existing: &[String], raw: &str) -> Result<Vec<String>, KeywordRejection> {
    let term = normalize_keyword(raw);
    if term.is_empty() {
        return Err(KeywordRejection::Empty);
    }
    if existing.iter().any(|known| known == &term) {
        return Err(KeywordRejection::Duplicate);
    }
    let mut next = existing.to_vec();
    next.push(term);
    Ok(next)
}

/// Returns the keyword set without `term`. Removing a non-member is a no-op.
pub fn remove_keyword(existing: &[String], term: &str) -> Vec<String> {
    existing
        .iter()
        .filter(|known| known.as_str() != term)
        .cloned()
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_urls_trims_filters_and_dedupes() {
        let raw = "  https://a.example/leiloes  \n\nftp://ignored\nhttps://a.example/leiloes\nhttp://b.example\nnot a url\n";
        assert_eq!(
            parse_urls(raw),
            vec![
                "https://a.example/leiloes".to_owned(),
                "http://b.example".to_owned()
            ]
        );
    }

    #[test]
    fn parse_urls_scheme_check_is_case_sensitive() {
        assert!(parse_urls("HTTP://upper.example").is_empty());
    }

    #[test]
    fn merge_urls_unions_with_stable_order() {
        let file_urls = vec!["http://a".to_owned(), "http://b".to_owned()];
        let merged = merge_urls(&file_urls, "http://b\nhttp://c");
        assert_eq!(
            merged,
            vec!["http://a".to_owned(), "http://b".to_owned(), "http://c".to_owned()]
        );
    }

    #[test]
    fn merge_urls_membership_is_exact() {
        let file_urls = vec!["http://a/X".to_owned()];
        let merged = merge_urls(&file_urls, "http://a/x");
        assert_eq!(merged.len(), 2);
    }

    #[test]
    fn parse_terms_preserves_order_and_drops_blanks() {
        assert_eq!(
            parse_terms(" scania , , iveco,daf "),
            vec!["scania".to_owned(), "iveco".to_owned(), "daf".to_owned()]
        );
    }

    #[test]
    fn add_keyword_normalizes_and_rejects_duplicates() {
        let existing = vec!["trator".to_owned()];
        let next = add_keyword(&existing, "  Valtra ").unwrap();
        assert_eq!(next, vec!["trator".to_owned(), "valtra".to_owned()]);
        assert_eq!(
            add_keyword(&next, "VALTRA"),
            Err(KeywordRejection::Duplicate)
        );
        // The rejected call left the input untouched.
        assert_eq!(next.len(), 2);
    }

    #[test]
    fn add_keyword_rejects_blank_input() {
        assert_eq!(add_keyword(&[], "   "), Err(KeywordRejection::Empty));
    }

    #[test]
    fn remove_keyword_of_non_member_is_noop() {
        let existing = vec!["trator".to_owned()];
        assert_eq!(remove_keyword(&existing, "esteira"), existing);
        assert!(remove_keyword(&existing, "trator").is_empty());
    }
}
