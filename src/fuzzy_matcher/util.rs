//! Small helpers shared by the matchers.

#[cfg(test)]
use crate::fuzzy_matcher::{FuzzyMatcher, IndexType};

/// Refill `buf` with the chars of `s`, keeping its allocation.
#[inline]
pub(crate) fn fill_chars(buf: &mut Vec<char>, s: &str) {
    buf.clear();
    buf.extend(s.chars());
}

/// Surround the chars at `indices` with brackets, e.g. `[a]x[b]`.
#[cfg(test)]
pub(crate) fn wrap_matches(line: &str, indices: &[IndexType]) -> String {
    let mut ret = String::new();
    let mut peekable = indices.iter().peekable();
    for (idx, ch) in line.chars().enumerate() {
        let next_id = **peekable.peek().unwrap_or(&&(line.len() as IndexType));
        if next_id == idx {
            ret.push('[');
            ret.push(ch);
            ret.push(']');
            peekable.next();
        } else {
            ret.push(ch);
        }
    }
    ret
}

/// Assert that `choices` are listed from the best score to the worst.
#[cfg(test)]
pub(crate) fn assert_order(matcher: &dyn FuzzyMatcher, pattern: &str, choices: &[&'static str]) {
    let result: Vec<_> = choices
        .iter()
        .map(|choice| (matcher.fuzzy_match(choice, pattern), *choice))
        .collect();
    for pair in result.windows(2) {
        assert!(
            pair[0].0 > pair[1].0,
            "{:?} should score above {:?} for pattern {pattern:?}",
            pair[0],
            pair[1]
        );
    }
}
