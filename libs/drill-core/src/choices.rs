//! Multiple-choice candidate generation.
//!
//! Candidates are gathered in priority order: the correct answer, the
//! author's override list, answers from items sharing the same grouping
//! key, answers from the whole pool, then a fixed fallback vocabulary.
//! The collected list is deduplicated by normalized form, capped, and
//! shuffled.

use std::collections::HashSet;

use rand::seq::SliceRandom;
use rand::Rng;

use crate::matching::normalize;
use crate::types::{DrillItem, Step};

/// Default number of candidates shown for a multiple-choice step.
pub const DEFAULT_CHOICE_COUNT: usize = 4;

/// Last-resort distractor vocabulary for when the pool itself cannot supply
/// enough distinct candidates. Configuration, not logic.
pub const FALLBACK_VOCABULARY: &[&str] = &[
    "i", "at", "o", "am", "ar", "gan", "gyda", "â", "heb", "wrth", "dros", "dan", "trwy", "yng",
    "yn",
];

/// Build the candidate list for `item` at `step`.
///
/// The output always contains the correct answer, never contains two
/// entries with the same normalized form, and holds at most `size` entries.
/// If the whole candidate universe is smaller than `size`, the list is
/// short rather than padded. Deterministic for a given rng.
pub fn build_choices<R: Rng>(
    item: &DrillItem,
    step: Step,
    pool: &[DrillItem],
    size: usize,
    rng: &mut R,
) -> Vec<String> {
    let correct = match correct_answer(item, step) {
        Some(answer) => answer,
        None => return Vec::new(),
    };

    let mut seen = HashSet::new();
    let mut out = Vec::new();
    push_unique(&mut out, &mut seen, correct, size);

    if step == Step::Primary {
        for candidate in &item.choice_override {
            push_unique(&mut out, &mut seen, candidate, size);
        }
    }

    let mut neighbors = neighbor_answers(item, step, pool);
    neighbors.shuffle(rng);
    for candidate in neighbors {
        push_unique(&mut out, &mut seen, candidate, size);
    }

    let mut pool_wide = step_answers(pool, step);
    pool_wide.shuffle(rng);
    for candidate in pool_wide {
        push_unique(&mut out, &mut seen, candidate, size);
    }

    let mut fallback = FALLBACK_VOCABULARY.to_vec();
    fallback.shuffle(rng);
    for candidate in fallback {
        push_unique(&mut out, &mut seen, candidate, size);
    }

    out.shuffle(rng);
    out
}

fn push_unique(out: &mut Vec<String>, seen: &mut HashSet<String>, candidate: &str, size: usize) {
    if out.len() >= size {
        return;
    }
    let candidate = candidate.trim();
    let key = normalize(candidate);
    if key.is_empty() || !seen.insert(key) {
        return;
    }
    out.push(candidate.to_string());
}

fn correct_answer(item: &DrillItem, step: Step) -> Option<&str> {
    match step {
        Step::Primary => Some(item.primary_answer.as_str()),
        Step::Secondary => item.secondary_answer.as_deref(),
    }
}

/// Answers from other items sharing the item's grouping key for this step:
/// `contrast_group` for the primary step, `secondary_key` for the secondary.
fn neighbor_answers<'a>(item: &DrillItem, step: Step, pool: &'a [DrillItem]) -> Vec<&'a str> {
    match step {
        Step::Primary => {
            if item.contrast_group.is_empty() {
                return Vec::new();
            }
            pool.iter()
                .filter(|other| other.id != item.id && other.contrast_group == item.contrast_group)
                .map(|other| other.primary_answer.as_str())
                .collect()
        }
        Step::Secondary => {
            let key = match item.secondary_key.as_deref() {
                Some(key) => key,
                None => return Vec::new(),
            };
            pool.iter()
                .filter(|other| other.id != item.id && other.secondary_key.as_deref() == Some(key))
                .filter_map(|other| other.secondary_answer.as_deref())
                .collect()
        }
    }
}

fn step_answers<'a>(pool: &'a [DrillItem], step: Step) -> Vec<&'a str> {
    match step {
        Step::Primary => pool.iter().map(|i| i.primary_answer.as_str()).collect(),
        Step::Secondary => pool
            .iter()
            .filter_map(|i| i.secondary_answer.as_deref())
            .collect(),
    }
}
