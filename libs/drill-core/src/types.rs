//! Core types for the drill engine.

use serde::{Deserialize, Serialize};

/// Whether an item needs one answer or a dependent second one.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ItemMode {
    Single,
    TwoStep,
}

impl Default for ItemMode {
    fn default() -> Self {
        Self::Single
    }
}

/// Which sub-answer is currently being solicited.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Step {
    Primary,
    Secondary,
}

/// Outcome of the attempt at the current item.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Resolution {
    Pending,
    Correct,
    Incorrect,
    Revealed,
}

/// One validated drill item. Immutable once loaded.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DrillItem {
    /// Unique within the pool.
    pub id: String,
    /// Difficulty rank; `None` means unranked.
    pub level: Option<u32>,
    /// Free-text classification tag; empty means untagged.
    pub topic: String,
    /// Grouping tag used to source primary-step distractors.
    pub contrast_group: String,
    pub mode: ItemMode,
    /// Fixed-language sentence describing the meaning to express.
    /// Always shown, never part of the puzzle.
    pub prompt_text: String,
    /// Target-language fragment before the gap.
    pub context_before: String,
    /// Target-language fragment after the gap.
    pub context_after: String,
    pub primary_answer: String,
    /// Additional accepted strings for the primary step.
    pub primary_alt_answers: Vec<String>,
    /// Canonical answer for the second step; required for `TwoStep` items.
    pub secondary_answer: Option<String>,
    /// Classification key (e.g. grammatical person) used to source
    /// secondary-step distractors.
    pub secondary_key: Option<String>,
    /// Author-supplied candidate list for the primary step.
    pub choice_override: Vec<String>,
    pub hint: Option<String>,
    pub explanation: Option<String>,
}

impl DrillItem {
    /// The target-language sentence with `insert` placed in the gap.
    ///
    /// Fragments are joined with single spaces; whitespace runs collapse and
    /// no space is left before a punctuation mark. Used by feedback and
    /// audio collaborators.
    pub fn full_sentence(&self, insert: &str) -> String {
        let parts = [
            self.context_before.trim(),
            insert.trim(),
            self.context_after.trim(),
        ];
        let joined = parts
            .iter()
            .filter(|p| !p.is_empty())
            .copied()
            .collect::<Vec<_>>()
            .join(" ");

        let mut out = String::with_capacity(joined.len());
        let mut pending_space = false;
        for ch in joined.chars() {
            if ch.is_whitespace() {
                pending_space = true;
                continue;
            }
            if pending_space && !out.is_empty() && !matches!(ch, ',' | '.' | ';' | ':' | '!' | '?') {
                out.push(' ');
            }
            pending_space = false;
            out.push(ch);
        }
        out
    }
}

/// Loosely-typed input record as supplied by the record source.
///
/// Every field is defaulted so extra or missing keys at the boundary are
/// tolerated; mapping raw column headers onto these field names is the
/// record source's concern. Validation into a [`DrillItem`] happens in
/// [`crate::pool::load`].
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct RawRecord {
    pub id: String,
    pub level: Option<u32>,
    pub topic: String,
    pub contrast_group: String,
    /// `"single"` or `"two_step"`, case-insensitive; empty means single.
    pub mode: String,
    pub prompt_text: String,
    pub context_before: String,
    pub context_after: String,
    pub primary_answer: String,
    pub primary_alt_answers: Vec<String>,
    pub secondary_answer: String,
    pub secondary_key: String,
    pub choice_override: Vec<String>,
    pub hint: String,
    pub explanation: String,
}

/// User-selected filter constraints. `None` means no constraint; set values
/// match exactly against the corresponding item field.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct FilterCriteria {
    pub level: Option<u32>,
    pub topic: Option<String>,
    pub contrast_group: Option<String>,
}
