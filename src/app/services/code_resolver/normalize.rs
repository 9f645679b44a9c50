//! Name cleanup applied before external lookup
//!
//! Report cells qualify some names with parenthetical annotations, e.g.
//! "Cefepim (Non-meningitis)". The lookup collaborator only knows the plain
//! name, so every parenthesized group is stripped before resolution.

use std::sync::OnceLock;

use regex::Regex;

static PARENTHETICAL: OnceLock<Regex> = OnceLock::new();

/// Remove every parenthesized substring, including the parentheses and the
/// whitespace directly before them, then trim
///
/// Case, accents, and inner spacing of the remaining text are preserved.
pub fn normalize_name(raw: &str) -> String {
    let pattern = PARENTHETICAL.get_or_init(|| {
        Regex::new(r"\s*\([^)]*\)").expect("parenthetical pattern is valid")
    });
    pattern.replace_all(raw, "").trim().to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_strips_parenthetical_qualifier() {
        assert_eq!(normalize_name("Cefepim (Non-meningitis)"), "Cefepim");
    }

    #[test]
    fn test_plain_name_unchanged() {
        assert_eq!(normalize_name("Plain Name"), "Plain Name");
    }

    #[test]
    fn test_multiple_groups_all_removed() {
        assert_eq!(
            normalize_name("Penicillin (oral) G (high dose)"),
            "Penicillin G"
        );
    }

    #[test]
    fn test_surrounding_whitespace_trimmed() {
        assert_eq!(normalize_name("  Escherichia coli  "), "Escherichia coli");
        assert_eq!(normalize_name("Ampicillin (iv) "), "Ampicillin");
    }

    #[test]
    fn test_inner_spacing_and_case_preserved() {
        assert_eq!(
            normalize_name("Staphylococcus  aureus (MRSA)"),
            "Staphylococcus  aureus"
        );
    }

    #[test]
    fn test_empty_after_cleanup() {
        assert_eq!(normalize_name("(only a qualifier)"), "");
    }
}
