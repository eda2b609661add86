//! Order-agnostic spirit combination helpers.

/// Separator used in combo keys.
pub const COMBO_KEY_SEPARATOR: &str = ",";

fn sorted(spirits: &[String]) -> Vec<&str> {
    let mut sorted: Vec<&str> = spirits.iter().map(String::as_str).collect();
    sorted.sort_unstable();
    sorted
}

/// True when both lists hold the same spirits, ignoring order.
/// Duplicates count: `[a]` and `[a, a]` differ.
pub fn are_spirits_same(a: &[String], b: &[String]) -> bool {
    a.len() == b.len() && sorted(a) == sorted(b)
}

/// Canonical grouping key for a spirit combination.
pub fn spirit_combo_key(spirits: &[String]) -> String {
    sorted(spirits).join(COMBO_KEY_SEPARATOR)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn list(names: &[&str]) -> Vec<String> {
        names.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn test_same_ignores_order() {
        assert!(are_spirits_same(
            &list(&["Ocean", "Bringer"]),
            &list(&["Bringer", "Ocean"])
        ));
    }

    #[test]
    fn test_different_spirits() {
        assert!(!are_spirits_same(
            &list(&["Ocean", "Bringer"]),
            &list(&["Ocean", "Fangs"])
        ));
    }

    #[test]
    fn test_length_mismatch() {
        assert!(!are_spirits_same(&list(&["Ocean"]), &list(&["Ocean", "Ocean"])));
    }

    #[test]
    fn test_duplicates_matched_literally() {
        assert!(are_spirits_same(
            &list(&["Ocean", "Ocean", "Fangs"]),
            &list(&["Fangs", "Ocean", "Ocean"])
        ));
        assert!(!are_spirits_same(
            &list(&["Ocean", "Ocean", "Fangs"]),
            &list(&["Fangs", "Fangs", "Ocean"])
        ));
    }

    #[test]
    fn test_empty_lists_are_same() {
        assert!(are_spirits_same(&[], &[]));
    }

    #[test]
    fn test_combo_key_sorted() {
        assert_eq!(
            spirit_combo_key(&list(&["Thunderspeaker", "Ocean", "Bringer"])),
            "Bringer,Ocean,Thunderspeaker"
        );
    }

    #[test]
    fn test_combo_key_permutation_invariant() {
        let a = list(&["Vital Strength", "Shadows", "Green"]);
        let b = list(&["Green", "Vital Strength", "Shadows"]);
        assert_eq!(spirit_combo_key(&a), spirit_combo_key(&b));
        assert_eq!(
            are_spirits_same(&a, &b),
            spirit_combo_key(&a) == spirit_combo_key(&b)
        );
    }

    #[test]
    fn test_combo_key_distinguishes() {
        assert_ne!(
            spirit_combo_key(&list(&["Ocean"])),
            spirit_combo_key(&list(&["Ocean", "Ocean"]))
        );
        assert_ne!(
            spirit_combo_key(&list(&["Ocean", "Fangs"])),
            spirit_combo_key(&list(&["Ocean", "Bringer"]))
        );
    }
}
