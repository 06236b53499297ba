//! Item pool loading and validation.
//!
//! Records arrive already shaped (header aliasing is the record source's
//! job); this module enforces the item invariants and drops whatever
//! violates them. A single bad record never aborts a load.

use std::collections::HashSet;

use tracing::{info, warn};

use crate::error::ItemError;
use crate::types::{DrillItem, ItemMode, RawRecord};

/// A record dropped during loading, with its position in the input.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LoadReject {
    pub index: usize,
    pub id: Option<String>,
    pub error: ItemError,
}

/// Result of loading a batch of records: the accepted items in input order,
/// plus every reject and why it was dropped.
#[derive(Debug, Clone, Default)]
pub struct LoadOutcome {
    pub items: Vec<DrillItem>,
    pub rejects: Vec<LoadReject>,
}

/// Validate records into drill items, preserving input order.
///
/// A repeated id keeps the first record and drops later ones, so the pool
/// can never hold two entries with the same id.
pub fn load(records: Vec<RawRecord>) -> LoadOutcome {
    let mut outcome = LoadOutcome::default();
    let mut seen_ids = HashSet::new();

    for (index, record) in records.into_iter().enumerate() {
        match validate(record) {
            Ok(item) => {
                if !seen_ids.insert(item.id.clone()) {
                    warn!(target: "drill_core", index, id = %item.id, "dropping record: duplicate id");
                    outcome.rejects.push(LoadReject {
                        index,
                        id: Some(item.id.clone()),
                        error: ItemError::DuplicateId { id: item.id },
                    });
                    continue;
                }
                outcome.items.push(item);
            }
            Err((id, error)) => {
                warn!(
                    target: "drill_core",
                    index,
                    id = id.as_deref().unwrap_or("<none>"),
                    %error,
                    "dropping record"
                );
                outcome.rejects.push(LoadReject { index, id, error });
            }
        }
    }

    info!(
        target: "drill_core",
        loaded = outcome.items.len(),
        dropped = outcome.rejects.len(),
        "item pool loaded"
    );
    outcome
}

fn validate(record: RawRecord) -> std::result::Result<DrillItem, (Option<String>, ItemError)> {
    let id = record.id.trim().to_string();
    if id.is_empty() {
        return Err((None, ItemError::MissingId));
    }

    let mode = match parse_mode(&record.mode) {
        Some(mode) => mode,
        None => {
            return Err((
                Some(id),
                ItemError::UnknownMode {
                    value: record.mode,
                },
            ))
        }
    };

    let primary_answer = record.primary_answer.trim().to_string();
    if primary_answer.is_empty() {
        return Err((Some(id), ItemError::MissingPrimaryAnswer));
    }

    let secondary_answer = non_empty(&record.secondary_answer);
    if mode == ItemMode::TwoStep && secondary_answer.is_none() {
        return Err((Some(id), ItemError::MissingSecondaryAnswer));
    }

    Ok(DrillItem {
        id,
        level: record.level,
        topic: record.topic.trim().to_string(),
        contrast_group: record.contrast_group.trim().to_string(),
        mode,
        prompt_text: record.prompt_text,
        context_before: record.context_before,
        context_after: record.context_after,
        primary_answer,
        primary_alt_answers: trimmed_list(record.primary_alt_answers),
        secondary_answer,
        secondary_key: non_empty(&record.secondary_key),
        choice_override: trimmed_list(record.choice_override),
        hint: non_empty(&record.hint),
        explanation: non_empty(&record.explanation),
    })
}

fn parse_mode(value: &str) -> Option<ItemMode> {
    match value.trim().to_ascii_lowercase().as_str() {
        "" | "single" => Some(ItemMode::Single),
        "two_step" | "two-step" | "twostep" => Some(ItemMode::TwoStep),
        _ => None,
    }
}

fn non_empty(value: &str) -> Option<String> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        None
    } else {
        Some(trimmed.to_string())
    }
}

fn trimmed_list(values: Vec<String>) -> Vec<String> {
    values
        .into_iter()
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn record(id: &str, answer: &str) -> RawRecord {
        RawRecord {
            id: id.into(),
            primary_answer: answer.into(),
            ..RawRecord::default()
        }
    }

    #[test]
    fn accepts_valid_records_in_order() {
        let outcome = load(vec![record("a", "i"), record("b", "at"), record("c", "o")]);
        assert!(outcome.rejects.is_empty());
        let ids: Vec<&str> = outcome.items.iter().map(|i| i.id.as_str()).collect();
        assert_eq!(ids, vec!["a", "b", "c"]);
    }

    #[test]
    fn drops_record_without_primary_answer() {
        let outcome = load(vec![record("a", "i"), record("b", "   "), record("c", "o")]);
        assert_eq!(outcome.items.len(), 2);
        assert_eq!(outcome.rejects.len(), 1);
        assert_eq!(outcome.rejects[0].index, 1);
        assert_eq!(outcome.rejects[0].error, ItemError::MissingPrimaryAnswer);
    }

    #[test]
    fn drops_record_without_id() {
        let outcome = load(vec![record("  ", "i")]);
        assert!(outcome.items.is_empty());
        assert_eq!(outcome.rejects[0].error, ItemError::MissingId);
        assert_eq!(outcome.rejects[0].id, None);
    }

    #[test]
    fn two_step_requires_secondary_answer() {
        let mut bad = record("a", "ar");
        bad.mode = "two_step".into();
        let mut good = record("b", "ar");
        good.mode = "Two_Step".into();
        good.secondary_answer = "arna i".into();

        let outcome = load(vec![bad, good]);
        assert_eq!(outcome.items.len(), 1);
        assert_eq!(outcome.items[0].mode, ItemMode::TwoStep);
        assert_eq!(outcome.items[0].secondary_answer.as_deref(), Some("arna i"));
        assert_eq!(outcome.rejects[0].error, ItemError::MissingSecondaryAnswer);
    }

    #[test]
    fn unknown_mode_is_rejected() {
        let mut bad = record("a", "ar");
        bad.mode = "triple".into();
        let outcome = load(vec![bad]);
        assert!(matches!(
            outcome.rejects[0].error,
            ItemError::UnknownMode { .. }
        ));
    }

    #[test]
    fn duplicate_id_keeps_first_record() {
        let first = record("a", "i");
        let mut second = record("a", "at");
        second.topic = "movement".into();

        let outcome = load(vec![first, second]);
        assert_eq!(outcome.items.len(), 1);
        assert_eq!(outcome.items[0].primary_answer, "i");
        assert_eq!(
            outcome.rejects[0].error,
            ItemError::DuplicateId { id: "a".into() }
        );
        assert_eq!(outcome.rejects[0].index, 1);
    }

    #[test]
    fn optional_fields_are_trimmed_to_none() {
        let mut r = record("a", " ar ");
        r.hint = "  ".into();
        r.explanation = " because ".into();
        r.primary_alt_answers = vec![" arno ".into(), "".into()];

        let outcome = load(vec![r]);
        let item = &outcome.items[0];
        assert_eq!(item.primary_answer, "ar");
        assert_eq!(item.hint, None);
        assert_eq!(item.explanation.as_deref(), Some("because"));
        assert_eq!(item.primary_alt_answers, vec!["arno".to_string()]);
    }
}
