//! Fixed synonym tables the judge consults before declaring a name or key
//! mismatch.
//!
//! Both tables are small, closed, and authored directly from §4.4 — there
//! is no discovery or fuzzy-matching distance metric here, just the
//! literal groups the spec names.

/// Tool-name synonym groups. Two names match if they fall in the same
/// group, regardless of which one is "canonical".
const NAME_SYNONYMS: &[&[&str]] = &[
    &["calculate", "calc", "compute", "math"],
    &["search", "find", "query", "lookup"],
    &["weather", "get_weather", "check_weather", "weather_info"],
];

/// Argument-key alias groups, consulted when an expected key is absent
/// from the actual arguments.
const KEY_ALIASES: &[&[&str]] = &[
    &["location", "city", "place", "loc"],
    &["query", "q", "search", "text"],
    &["a", "first", "num1", "operand1"],
    &["b", "second", "num2", "operand2"],
];

/// Whether `actual` and `expected` name the same tool under the fuzzy
/// name-matching rule: exact (case-insensitive) equality, substring
/// containment either direction, or shared synonym group.
pub fn names_match(actual: &str, expected: &str) -> bool {
    let actual_lower = actual.to_lowercase();
    let expected_lower = expected.to_lowercase();

    if actual_lower == expected_lower {
        return true;
    }
    if actual_lower.contains(&expected_lower) || expected_lower.contains(&actual_lower) {
        return true;
    }
    shared_group(NAME_SYNONYMS, &actual_lower, &expected_lower)
}

/// Candidate keys to look up in the actual arguments when `expected_key`
/// itself is absent, in fixed alias-group order.
pub fn key_aliases(expected_key: &str) -> Vec<&'static str> {
    let lower = expected_key.to_lowercase();
    for group in KEY_ALIASES {
        if group.iter().any(|candidate| *candidate == lower) {
            return group.to_vec();
        }
    }
    Vec::new()
}

fn shared_group(groups: &[&[&str]], a: &str, b: &str) -> bool {
    groups
        .iter()
        .any(|group| group.contains(&a.as_ref()) && group.contains(&b.as_ref()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn synonym_group_matches_across_members() {
        assert!(names_match("weather", "get_weather"));
        assert!(names_match("calc", "calculate"));
    }

    #[test]
    fn substring_containment_matches() {
        assert!(names_match("search_web", "search"));
        assert!(names_match("search", "search_web"));
    }

    #[test]
    fn unrelated_names_do_not_match() {
        assert!(!names_match("weather", "calculate"));
    }

    #[test]
    fn key_aliases_cover_declared_groups() {
        assert_eq!(key_aliases("location"), vec!["location", "city", "place", "loc"]);
        assert_eq!(key_aliases("a"), vec!["a", "first", "num1", "operand1"]);
        assert!(key_aliases("unrelated_key").is_empty());
    }
}
