//! Pure filtering over the item pool.
//!
//! Callers re-apply on any criteria change; nothing here is cached or
//! mutated.

use crate::types::{DrillItem, FilterCriteria};

/// Pool fields whose distinct values can populate filter controls.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FilterField {
    Level,
    Topic,
    ContrastGroup,
}

/// Items matching every constrained field in `criteria`, in pool order.
pub fn apply<'a>(pool: &'a [DrillItem], criteria: &FilterCriteria) -> Vec<&'a DrillItem> {
    pool.iter()
        .filter(|item| {
            criteria.level.map_or(true, |level| item.level == Some(level))
                && criteria
                    .topic
                    .as_deref()
                    .map_or(true, |topic| item.topic == topic)
                && criteria
                    .contrast_group
                    .as_deref()
                    .map_or(true, |group| item.contrast_group == group)
        })
        .collect()
}

/// Sorted distinct non-empty values present in the pool for `field`.
/// Levels sort numerically; text fields sort lexicographically.
pub fn available_values(pool: &[DrillItem], field: FilterField) -> Vec<String> {
    match field {
        FilterField::Level => {
            let mut levels: Vec<u32> = pool.iter().filter_map(|item| item.level).collect();
            levels.sort_unstable();
            levels.dedup();
            levels.into_iter().map(|level| level.to_string()).collect()
        }
        FilterField::Topic => distinct_text(pool.iter().map(|item| item.topic.as_str())),
        FilterField::ContrastGroup => {
            distinct_text(pool.iter().map(|item| item.contrast_group.as_str()))
        }
    }
}

fn distinct_text<'a>(values: impl Iterator<Item = &'a str>) -> Vec<String> {
    let mut out: Vec<String> = values
        .filter(|v| !v.is_empty())
        .map(str::to_string)
        .collect();
    out.sort();
    out.dedup();
    out
}
