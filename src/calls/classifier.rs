//! Sliding-window call-site classifier.

use super::CallCounts;
use super::dialect::DialectRules;
use crate::tokenize::{Token, Tokenizer};

/// Count call sites in `code` according to `rules`.
pub fn count_calls(code: &str, rules: &DialectRules) -> CallCounts {
    let mut counts = CallCounts::new();
    count_calls_into(code, rules, &mut counts);
    counts
}

/// Count call sites in `code`, adding them to `counts`.
///
/// Keeps a three-token window `(prev2, prev1, curr)`. A call is recorded for
/// `prev1` when it is a non-keyword identifier, `curr` is `(`, and the
/// dialect's guard accepts `prev2`. Input that never forms that shape simply
/// yields no matches.
pub fn count_calls_into(code: &str, rules: &DialectRules, counts: &mut CallCounts) {
    let mut prev2: Option<Token<'_>> = None;
    let mut prev1: Option<Token<'_>> = None;

    for curr in Tokenizer::new(code, rules.ignored_chars()) {
        if curr.is_char('(')
            && rules.is_plain_identifier(prev1.as_ref())
            && rules.guard_admits(prev2.as_ref())
            && let Some(name) = prev1
        {
            *counts.entry(name.text.to_string()).or_insert(0) += 1;
        }

        prev2 = prev1;
        prev1 = Some(curr);
    }
}

/// Add every count in `from` to `into`.
pub fn merge_counts(into: &mut CallCounts, from: CallCounts) {
    for (name, count) in from {
        *into.entry(name).or_insert(0) += count;
    }
}
