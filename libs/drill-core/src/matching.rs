//! Answer normalization and matching.
//!
//! Guesses are compared to accepted answers in a canonical folded form so
//! that diacritics, letter case, typographic apostrophes, and stray
//! whitespace never cost the learner a point.

use unicode_normalization::UnicodeNormalization;

use crate::types::DrillItem;

/// Fold text to its canonical comparable form.
///
/// Lowercases, applies Unicode canonical decomposition with combining marks
/// stripped (so "â" compares equal to "a"), unifies apostrophe variants to
/// ASCII `'`, trims, and collapses internal whitespace runs to one space.
/// Total and idempotent.
pub fn normalize(text: &str) -> String {
    text.to_lowercase()
        .nfd()
        .filter(|c| !unicode_normalization::char::is_combining_mark(*c))
        .map(|c| match c {
            '\u{2018}' | '\u{2019}' | '\u{02BB}' | '\u{02BC}' | '`' | '\u{00B4}' => '\'',
            c => c,
        })
        .collect::<String>()
        .split_whitespace()
        .collect::<Vec<_>>()
        .join(" ")
}

/// True when the normalized guess equals any normalized accepted answer.
/// A guess that normalizes to empty never matches.
pub fn matches_any<'a, I>(guess: &str, accepted: I) -> bool
where
    I: IntoIterator<Item = &'a str>,
{
    let guess = normalize(guess);
    if guess.is_empty() {
        return false;
    }
    accepted.into_iter().any(|a| normalize(a) == guess)
}

/// Match a primary-step guess: the canonical answer plus listed alternates.
pub fn matches_primary(item: &DrillItem, guess: &str) -> bool {
    matches_any(
        guess,
        std::iter::once(item.primary_answer.as_str())
            .chain(item.primary_alt_answers.iter().map(String::as_str)),
    )
}

/// Match a secondary-step guess against the canonical secondary answer only.
pub fn matches_secondary(item: &DrillItem, guess: &str) -> bool {
    match &item.secondary_answer {
        Some(answer) => matches_any(guess, std::iter::once(answer.as_str())),
        None => false,
    }
}
