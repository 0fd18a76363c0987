//! Dotted item-code model: parsing, ordering, and hierarchy derivation.
//!
//! Budget codes are strings of period-separated integers (`"2"`, `"2.01"`,
//! `"2.01.03"`). They sort hierarchically, not lexically: `"2" < "2.01" <
//! "2.02" < "10"`. A plain string sort puts `"10"` before `"2"`, and a float
//! parse collapses `"2.10"` into `"2.1"`, so codes stay strings everywhere
//! and ordering goes through [`SortKey`].
//!
//! The parent/child relation is derived from the codes alone: `P` is the
//! parent of `C` iff `C` starts with `P + "."` and sits exactly one segment
//! deeper. This holds at every depth; grouping only by the top-level segment
//! conflates grandchildren with children and is not what this module does.

use std::collections::BTreeSet;

/// Ordering key for a dotted code: one integer per segment.
///
/// Non-numeric segments map to 0 so ordering never fails. Keys are for
/// sorting only — two distinct codes like `"02"` and `"2"` parse to the same
/// key, so equality and lookups must always compare the original strings.
#[derive(Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct SortKey(Vec<u32>);

impl SortKey {
    /// Parses a code into its ordering key. Never fails: an empty code yields
    /// an empty key, a malformed segment yields 0.
    #[must_use]
    pub fn parse(code: &str) -> Self {
        if code.is_empty() {
            return Self(Vec::new());
        }
        Self(
            code.split('.')
                .map(|seg| seg.parse::<u32>().unwrap_or(0))
                .collect(),
        )
    }

    /// Segment values of the key.
    #[must_use]
    pub fn segments(&self) -> &[u32] {
        &self.0
    }
}

/// Number of segments in a code; an empty code has depth 0.
#[must_use]
pub fn depth(code: &str) -> usize {
    if code.is_empty() {
        0
    } else {
        code.split('.').count()
    }
}

/// Whether every segment of the code is a plain non-negative integer.
///
/// Ordering tolerates malformed segments (they sort as 0), but callers that
/// accept new codes use this to flag them instead of storing them silently.
#[must_use]
pub fn is_well_formed(code: &str) -> bool {
    !code.is_empty() && code.split('.').all(|seg| !seg.is_empty() && seg.chars().all(|c| c.is_ascii_digit()))
}

/// Direct parent of a code: everything before the last dot.
/// Top-level codes have no parent.
#[must_use]
pub fn parent_of(code: &str) -> Option<&str> {
    code.rsplit_once('.').map(|(prefix, _)| prefix)
}

/// Sorts codes hierarchically by their [`SortKey`].
#[must_use]
pub fn sort_codes<I, S>(codes: I) -> Vec<String>
where
    I: IntoIterator<Item = S>,
    S: Into<String>,
{
    let mut out: Vec<String> = codes.into_iter().map(Into::into).collect();
    out.sort_by_key(|c| SortKey::parse(c));
    out
}

/// Collects every direct parent implied by the given codes, sorted by key.
///
/// A parent is derived by stripping the last segment of any code with two or
/// more segments; it is returned whether or not it appears in the input set
/// itself (a parent may exist only implicitly through its children — the
/// rollup substitutes a placeholder label in that case). Deduplication is by
/// exact string, so `"02"` and `"2"` stay distinct parents.
#[must_use]
pub fn collect_parents<'a, I>(codes: I) -> Vec<String>
where
    I: IntoIterator<Item = &'a str>,
{
    let parents: BTreeSet<&str> = codes.into_iter().filter_map(parent_of).collect();
    sort_codes(parents)
}

/// Like [`collect_parents`], but closed over the whole ancestor chain: the
/// parent of a derived parent is itself included, up to the top level. Report
/// assembly uses this so a lone deep code like `"2.01.03"` still gets its
/// `"2"` and `"2.01"` sections.
#[must_use]
pub fn collect_ancestors<'a, I>(codes: I) -> Vec<String>
where
    I: IntoIterator<Item = &'a str>,
{
    let mut ancestors: BTreeSet<String> = BTreeSet::new();
    for code in codes {
        let mut current = code;
        while let Some(parent) = parent_of(current) {
            if !ancestors.insert(parent.to_string()) {
                break;
            }
            current = parent;
        }
    }
    sort_codes(ancestors)
}

/// Returns the codes under `parent`, sorted by key.
///
/// With `direct_only`, only codes exactly one segment deeper qualify (the
/// item-level rollup mode); otherwise every descendant sharing the prefix is
/// returned (the section-total mode). The mode is an explicit flag because
/// both are legitimate per-call policies, not something to infer.
#[must_use]
pub fn children_of<'a, I>(codes: I, parent: &str, direct_only: bool) -> Vec<String>
where
    I: IntoIterator<Item = &'a str>,
{
    let prefix = format!("{parent}.");
    let child_depth = depth(parent) + 1;
    let children = codes
        .into_iter()
        .filter(|c| c.starts_with(&prefix))
        .filter(|c| !direct_only || depth(c) == child_depth);
    sort_codes(children)
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used)]
    use super::*;

    #[test]
    fn test_sort_key_hierarchy_ordering() {
        assert!(SortKey::parse("2") < SortKey::parse("2.01"));
        assert!(SortKey::parse("2.01") < SortKey::parse("2.02"));
        assert!(SortKey::parse("2.02") < SortKey::parse("10"));
    }

    #[test]
    fn test_sort_key_never_fails() {
        assert_eq!(SortKey::parse("abc.3").segments(), &[0, 3]);
        assert_eq!(SortKey::parse("").segments(), &[] as &[u32]);
        assert_eq!(SortKey::parse("5").segments(), &[5]);
        assert_eq!(SortKey::parse("2..7").segments(), &[2, 0, 7]);
    }

    #[test]
    fn test_sort_key_is_not_an_equality_key() {
        // "02" and "2" parse identically but are distinct stored codes.
        assert_eq!(SortKey::parse("02"), SortKey::parse("2"));
        assert_ne!("02", "2");
    }

    #[test]
    fn test_sort_codes_beats_lexical_order() {
        let sorted = sort_codes(["10", "2", "2.01", "1.02", "1"]);
        assert_eq!(sorted, vec!["1", "1.02", "2", "2.01", "10"]);
    }

    #[test]
    fn test_depth() {
        assert_eq!(depth(""), 0);
        assert_eq!(depth("3"), 1);
        assert_eq!(depth("2.01.03"), 3);
    }

    #[test]
    fn test_is_well_formed() {
        assert!(is_well_formed("2.01"));
        assert!(is_well_formed("0"));
        assert!(!is_well_formed(""));
        assert!(!is_well_formed("2."));
        assert!(!is_well_formed("a.1"));
    }

    #[test]
    fn test_parent_of() {
        assert_eq!(parent_of("2.01.03"), Some("2.01"));
        assert_eq!(parent_of("2.01"), Some("2"));
        assert_eq!(parent_of("2"), None);
    }

    #[test]
    fn test_collect_parents_basic() {
        let parents = collect_parents(["1.01", "1.02", "2.01"]);
        assert_eq!(parents, vec!["1", "2"]);
    }

    #[test]
    fn test_collect_parents_is_depth_generic() {
        // The parent of "2.01.03" is "2.01", not the top-level "2".
        let parents = collect_parents(["2.01.03"]);
        assert_eq!(parents, vec!["2.01"]);
    }

    #[test]
    fn test_collect_parents_keeps_distinct_string_forms() {
        let parents = collect_parents(["02.01", "2.01"]);
        assert_eq!(parents, vec!["02", "2"]);
    }

    #[test]
    fn test_collect_ancestors_closes_the_chain() {
        let ancestors = collect_ancestors(["2.01.03"]);
        assert_eq!(ancestors, vec!["2", "2.01"]);
    }

    #[test]
    fn test_top_level_code_without_children_is_not_a_parent() {
        let parents = collect_parents(["3", "1.01"]);
        assert_eq!(parents, vec!["1"]);
    }

    #[test]
    fn test_children_of_direct_only() {
        let codes = ["1.01", "1.02", "2.01"];
        assert_eq!(children_of(codes, "1", true), vec!["1.01", "1.02"]);
        assert_eq!(children_of(codes, "2", true), vec!["2.01"]);
    }

    #[test]
    fn test_children_of_direct_vs_all_descendants() {
        let codes = ["1.01", "1.01.01", "1.01.02", "1.02"];
        assert_eq!(children_of(codes, "1", true), vec!["1.01", "1.02"]);
        assert_eq!(
            children_of(codes, "1", false),
            vec!["1.01", "1.01.01", "1.01.02", "1.02"]
        );
    }

    #[test]
    fn test_children_of_does_not_match_sibling_prefixes() {
        // "10.01" must not show up as a child of "1".
        let codes = ["1.01", "10.01"];
        assert_eq!(children_of(codes, "1", true), vec!["1.01"]);
    }
}
