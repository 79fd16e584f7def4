use crate::normalize::{normalize, tokenize};

/// Whether two ingredient names refer to the same ingredient.
///
/// Tried in order: exact match, substring either way, then word overlap where
/// any significant word of one name contains or is contained in a word of the
/// other. The relation is symmetric but not transitive: "lemon" and
/// "black pepper" both match "lemon pepper" without matching each other, so
/// callers that deduplicate must compare against every existing entry.
///
/// An empty name is a substring of everything and so matches anything.
pub fn matches(a: &str, b: &str) -> bool {
    let a = normalize(a);
    let b = normalize(b);

    if a == b {
        return true;
    }

    if a.contains(&b) || b.contains(&a) {
        return true;
    }

    let a_words = tokenize(&a);
    let b_words = tokenize(&b);
    a_words.iter().any(|aw| {
        b_words
            .iter()
            .any(|bw| aw.contains(bw.as_str()) || bw.contains(aw.as_str()))
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_exact_and_case() {
        assert!(matches("Garlic", "garlic"));
        assert!(matches("  onion ", "ONION"));
    }

    #[test]
    fn test_substring() {
        assert!(matches("salt", "sea salt"));
        assert!(matches("garlic", "garlic, minced"));
        assert!(matches("garlic, minced", "garlic"));
    }

    #[test]
    fn test_word_overlap() {
        assert!(matches("chicken breast", "boneless chicken thighs"));
        assert!(matches("tomatoes", "canned tomato sauce"));
        assert!(!matches("butter", "olive oil"));
    }

    #[test]
    fn test_short_words_never_overlap() {
        // "ox" only ever matches through the substring stage.
        assert!(!matches("ox heart", "ox liver"));
        assert!(!matches("ox cheek", "ox tongue"));
        assert!(matches("ox", "ox"));
        assert!(matches("ox heart", "heart"));
    }

    #[test]
    fn test_non_transitive() {
        assert!(matches("sea salt", "salt"));
        assert!(matches("salt", "table salt"));
        // These two happen to share "salt", but the chain below does not close.
        assert!(matches("lemon", "lemon pepper"));
        assert!(matches("lemon pepper", "black pepper"));
        assert!(!matches("lemon", "black pepper"));
    }

    #[test]
    fn test_symmetric() {
        let names = [
            "", "salt", "sea salt", "table salt", "garlic, minced", "ox", "Olive Oil",
            "butter (softened)", "chicken", "chickpeas", "up", "pepper flakes",
        ];
        for a in names {
            for b in names {
                assert_eq!(matches(a, b), matches(b, a), "asymmetric on {a:?} / {b:?}");
            }
        }
    }

    #[test]
    fn test_empty_matches_everything() {
        assert!(matches("", "anything"));
        assert!(matches("   ", "flour"));
        assert!(matches("", ""));
    }
}
