//! No-repeat drawing from the active pool.

use std::collections::HashSet;

use rand::seq::SliceRandom;
use rand::Rng;
use tracing::debug;

use crate::error::{DrillError, Result};
use crate::types::DrillItem;

/// Draw the next item uniformly from the unused part of `active`.
///
/// Every active item is shown once before any repeats: when the unused set
/// runs dry, `used` is cleared and the draw restarts over the full active
/// pool. Ids left in `used` by items that have since been filtered out are
/// simply never drawn again; they cause no error.
pub fn pick_next<'a, R: Rng>(
    active: &[&'a DrillItem],
    used: &mut HashSet<String>,
    rng: &mut R,
) -> Result<&'a DrillItem> {
    if active.is_empty() {
        return Err(DrillError::EmptyPool);
    }

    let unused: Vec<&DrillItem> = active
        .iter()
        .copied()
        .filter(|item| !used.contains(&item.id))
        .collect();

    let candidates: &[&DrillItem] = if unused.is_empty() {
        used.clear();
        active
    } else {
        &unused
    };

    let picked = *candidates.choose(rng).ok_or(DrillError::EmptyPool)?;
    used.insert(picked.id.clone());
    debug!(
        target: "drill_core",
        id = %picked.id,
        used = used.len(),
        active = active.len(),
        "drew item"
    );
    Ok(picked)
}
