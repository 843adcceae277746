//! Search-phrase splitting shared by the suggestion builders.

/// Lowercase an input phrase and split it into words.
pub fn words(input: &str) -> Vec<String> {
    input
        .to_lowercase()
        .split_whitespace()
        .map(str::to_string)
        .collect()
}

/// The last word of the input, lowercased.
///
/// `None` when the input holds no words at all, which is how "nothing
/// typed yet" is told apart from a word that happens to match everything.
pub fn last_word(input: &str) -> Option<String> {
    words(input).pop()
}

/// Split the input into the already-committed words and the word still
/// being typed.
pub fn split_last(input: &str) -> (Vec<String>, Option<String>) {
    let mut all = words(input);
    let last = all.pop();
    (all, last)
}

/// Keep the candidates containing `word` as a substring.
pub fn filter_by_word<'a, I>(word: &str, candidates: I) -> Vec<&'a str>
where
    I: IntoIterator<Item = &'a str>,
{
    candidates
        .into_iter()
        .filter(|candidate| candidate.contains(word))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_words_lowercase_and_split() {
        assert_eq!(words("Fa-Fw  FA-2X"), vec!["fa-fw", "fa-2x"]);
        assert_eq!(words("house"), vec!["house"]);
    }

    #[test]
    fn test_words_empty() {
        assert!(words("").is_empty());
        assert!(words("   \t ").is_empty());
    }

    #[test]
    fn test_last_word() {
        assert_eq!(last_word("fa-fw fa-2x"), Some("fa-2x".to_string()));
        assert_eq!(last_word("HOUSE"), Some("house".to_string()));
        assert_eq!(last_word("  "), None);
    }

    #[test]
    fn test_split_last() {
        let (committed, last) = split_last("fa-fw fa-spin ro");
        assert_eq!(committed, vec!["fa-fw", "fa-spin"]);
        assert_eq!(last, Some("ro".to_string()));

        let (committed, last) = split_last("solo");
        assert!(committed.is_empty());
        assert_eq!(last, Some("solo".to_string()));
    }

    #[test]
    fn test_filter_by_word() {
        let candidates = ["fa-rotate-90", "fa-spin", "fa-border"];
        assert_eq!(
            filter_by_word("rot", candidates),
            vec!["fa-rotate-90"]
        );
        assert_eq!(
            filter_by_word("fa-", candidates),
            vec!["fa-rotate-90", "fa-spin", "fa-border"]
        );
        assert!(filter_by_word("xyz", candidates).is_empty());
    }

    #[test]
    fn test_filter_by_empty_word_matches_all() {
        let candidates = ["a", "b"];
        assert_eq!(filter_by_word("", candidates), vec!["a", "b"]);
    }
}
