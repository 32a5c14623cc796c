//! Wildcard matching for root type selection.
//!
//! Patterns support `*` (any possibly-empty run of characters) and `?`
//! (exactly one character); matching is total over the name, never a
//! substring search.

use indexmap::IndexSet;

/// Match `name` against a wildcard pattern.
///
/// # Examples
/// ```
/// use ctygen_core::pattern::matches;
/// assert!(matches("Foo*", "FooBar"));
/// assert!(!matches("Foo?", "FooBar"));
/// assert!(matches("F??", "Foo"));
/// ```
pub fn matches(pattern: &str, name: &str) -> bool {
    let pat: Vec<char> = pattern.chars().collect();
    let txt: Vec<char> = name.chars().collect();

    let mut pi = 0;
    let mut ti = 0;
    // Last `*` position and the name position it currently absorbs up to.
    let mut star: Option<(usize, usize)> = None;

    while ti < txt.len() {
        if pi < pat.len() && (pat[pi] == '?' || pat[pi] == txt[ti]) {
            pi += 1;
            ti += 1;
        } else if pi < pat.len() && pat[pi] == '*' {
            star = Some((pi, ti));
            pi += 1;
        } else if let Some((star_pi, star_ti)) = star {
            // Backtrack: let the star absorb one more character.
            pi = star_pi + 1;
            ti = star_ti + 1;
            star = Some((star_pi, star_ti + 1));
        } else {
            return false;
        }
    }

    // Trailing stars match the empty tail.
    while pi < pat.len() && pat[pi] == '*' {
        pi += 1;
    }
    pi == pat.len()
}

/// Result of selecting root names from the catalog name set.
#[derive(Debug, Default, PartialEq)]
pub struct Selection {
    /// Selected names, deduplicated, in pattern-then-catalog order.
    pub names: Vec<String>,
    /// Patterns that matched nothing. Non-fatal; surfaced as warnings.
    pub unmatched: Vec<String>,
}

/// Resolve an ordered pattern list against the catalog name set.
///
/// For each pattern in input order, every matching catalog name not already
/// selected is appended, so the root set order is a pure function of the
/// pattern list and the catalog.
pub fn select(all_names: &[&str], patterns: &[String]) -> Selection {
    let mut selected: IndexSet<String> = IndexSet::new();
    let mut unmatched = Vec::new();

    for pattern in patterns {
        let mut hit = false;
        for name in all_names {
            if matches(pattern, name) {
                hit = true;
                selected.insert((*name).to_string());
            }
        }
        if !hit {
            unmatched.push(pattern.clone());
        }
    }

    Selection {
        names: selected.into_iter().collect(),
        unmatched,
    }
}
