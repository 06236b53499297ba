//! The answer state machine and the session facade that drives it.
//!
//! The one- or two-step answer flow is explicit tagged state rather than
//! boolean flags: a resolved item cannot still be awaiting its secondary
//! step, and submitting again after resolution is a no-op. The facade owns
//! every piece of mutable session state, so the UI layer holds no drill
//! logic of its own.

use std::collections::HashSet;

use rand::rngs::ThreadRng;
use rand::Rng;
use tracing::debug;

use crate::choices::{self, DEFAULT_CHOICE_COUNT};
use crate::deck;
use crate::error::{DrillError, Result};
use crate::filter;
use crate::matching;
use crate::stats::{ScoreEvent, SessionStats};
use crate::types::{DrillItem, FilterCriteria, ItemMode, Resolution, Step};

/// One user's drill session: pool, filters, no-repeat history, the current
/// item with its answer-flow state, and the score counters.
///
/// Single-threaded and synchronous; every operation runs to completion.
/// The random source is a type parameter so tests can seed it.
#[derive(Debug)]
pub struct DrillSession<R: Rng> {
    items: Vec<DrillItem>,
    criteria: FilterCriteria,
    used: HashSet<String>,
    current: Option<DrillItem>,
    step: Step,
    resolution: Resolution,
    stats: SessionStats,
    rng: R,
}

impl DrillSession<ThreadRng> {
    /// Session over `items` using thread-local entropy.
    pub fn new(items: Vec<DrillItem>) -> Self {
        Self::with_rng(items, rand::thread_rng())
    }
}

impl<R: Rng> DrillSession<R> {
    /// Session with a caller-supplied random source.
    pub fn with_rng(items: Vec<DrillItem>, rng: R) -> Self {
        Self {
            items,
            criteria: FilterCriteria::default(),
            used: HashSet::new(),
            current: None,
            step: Step::Primary,
            resolution: Resolution::Pending,
            stats: SessionStats::default(),
            rng,
        }
    }

    pub fn items(&self) -> &[DrillItem] {
        &self.items
    }

    pub fn criteria(&self) -> &FilterCriteria {
        &self.criteria
    }

    pub fn current(&self) -> Option<&DrillItem> {
        self.current.as_ref()
    }

    pub fn step(&self) -> Step {
        self.step
    }

    pub fn resolution(&self) -> Resolution {
        self.resolution
    }

    pub fn stats(&self) -> SessionStats {
        self.stats
    }

    /// Items matching the current criteria, in pool order.
    pub fn active_pool(&self) -> Vec<&DrillItem> {
        filter::apply(&self.items, &self.criteria)
    }

    /// Replace the filter criteria.
    ///
    /// Clears the no-repeat history and unbinds the current item so a stale
    /// question can never outlive a filter change.
    pub fn set_criteria(&mut self, criteria: FilterCriteria) {
        self.criteria = criteria;
        self.used.clear();
        self.clear_current();
    }

    /// Draw and bind the next item, resetting per-item transient state.
    ///
    /// On an empty active pool the current item is cleared and
    /// [`DrillError::EmptyPool`] is returned; the caller shows a
    /// "no items match" state until a new draw succeeds.
    pub fn next(&mut self) -> Result<&DrillItem> {
        let active = filter::apply(&self.items, &self.criteria);
        let picked = match deck::pick_next(&active, &mut self.used, &mut self.rng) {
            Ok(item) => item.clone(),
            Err(err) => {
                self.clear_current();
                return Err(err);
            }
        };
        self.step = Step::Primary;
        self.resolution = Resolution::Pending;
        Ok(self.current.insert(picked))
    }

    /// Candidates for the current item and step, default-sized.
    pub fn choices(&mut self) -> Result<Vec<String>> {
        self.choices_sized(DEFAULT_CHOICE_COUNT)
    }

    /// Candidates for the current item and step, capped at `size`.
    pub fn choices_sized(&mut self, size: usize) -> Result<Vec<String>> {
        let item = self.current.as_ref().ok_or(DrillError::NoCurrentItem)?;
        Ok(choices::build_choices(
            item,
            self.step,
            &self.items,
            size,
            &mut self.rng,
        ))
    }

    /// Evaluate `guess` for the current step.
    ///
    /// A correct primary guess on a two-step item advances to the secondary
    /// step without scoring; everything else resolves the attempt and emits
    /// exactly one counted score event. Submitting after resolution is an
    /// idempotent no-op.
    pub fn submit(&mut self, guess: &str) -> Result<Resolution> {
        let item = self.current.as_ref().ok_or(DrillError::NoCurrentItem)?;
        if self.resolution != Resolution::Pending {
            return Ok(self.resolution);
        }

        let mode = item.mode;
        let matched = match self.step {
            Step::Primary => matching::matches_primary(item, guess),
            Step::Secondary => matching::matches_secondary(item, guess),
        };

        match (self.step, matched) {
            (Step::Primary, true) if mode == ItemMode::TwoStep => {
                // Step-1 success is a precondition, not a scored attempt.
                self.step = Step::Secondary;
            }
            (_, true) => self.resolve(Resolution::Correct),
            (_, false) => self.resolve(Resolution::Incorrect),
        }
        Ok(self.resolution)
    }

    /// Give up on the current item: resolves `Revealed` immediately from
    /// either step and counts one incorrect attempt. No-op once resolved.
    pub fn reveal(&mut self) -> Result<Resolution> {
        if self.current.is_none() {
            return Err(DrillError::NoCurrentItem);
        }
        if self.resolution == Resolution::Pending {
            self.resolve(Resolution::Revealed);
        }
        Ok(self.resolution)
    }

    /// Zero the score counters; the pool, filters, and deck are untouched.
    pub fn reset_stats(&mut self) {
        self.stats.reset();
    }

    /// Forget which items have been shown this cycle.
    pub fn reset_deck(&mut self) {
        self.used.clear();
    }

    fn resolve(&mut self, outcome: Resolution) {
        self.resolution = outcome;
        self.stats.apply(ScoreEvent {
            counted: true,
            correct: outcome == Resolution::Correct,
        });
        debug!(
            target: "drill_core",
            resolution = ?outcome,
            score = self.stats.score,
            streak = self.stats.streak,
            attempts = self.stats.attempts,
            "attempt resolved"
        );
    }

    fn clear_current(&mut self) {
        self.current = None;
        self.step = Step::Primary;
        self.resolution = Resolution::Pending;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pool;
    use crate::types::RawRecord;
    use pretty_assertions::assert_eq;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    fn single(id: &str, answer: &str) -> RawRecord {
        RawRecord {
            id: id.into(),
            primary_answer: answer.into(),
            ..RawRecord::default()
        }
    }

    fn two_step(id: &str, primary: &str, secondary: &str) -> RawRecord {
        RawRecord {
            id: id.into(),
            primary_answer: primary.into(),
            mode: "two_step".into(),
            secondary_answer: secondary.into(),
            ..RawRecord::default()
        }
    }

    fn session(records: Vec<RawRecord>) -> DrillSession<StdRng> {
        DrillSession::with_rng(pool::load(records).items, StdRng::seed_from_u64(17))
    }

    #[test]
    fn single_step_correct_guess_resolves_and_scores() {
        let mut s = session(vec![single("q1", "at")]);
        s.next().unwrap();
        assert_eq!(s.submit("At").unwrap(), Resolution::Correct);
        assert_eq!(
            s.stats(),
            SessionStats {
                score: 1,
                streak: 1,
                attempts: 1
            }
        );
    }

    #[test]
    fn single_step_wrong_guess_resolves_incorrect() {
        let mut s = session(vec![single("q1", "at")]);
        s.next().unwrap();
        assert_eq!(s.submit("ar").unwrap(), Resolution::Incorrect);
        assert_eq!(
            s.stats(),
            SessionStats {
                score: 0,
                streak: 0,
                attempts: 1
            }
        );
    }

    #[test]
    fn two_step_advances_without_scoring_then_counts_once() {
        let mut s = session(vec![two_step("q2", "ar", "arna i")]);
        s.next().unwrap();

        assert_eq!(s.submit("ar").unwrap(), Resolution::Pending);
        assert_eq!(s.step(), Step::Secondary);
        assert_eq!(s.stats().attempts, 0);

        assert_eq!(s.submit("ar fi").unwrap(), Resolution::Incorrect);
        assert_eq!(
            s.stats(),
            SessionStats {
                score: 0,
                streak: 0,
                attempts: 1
            }
        );
    }

    #[test]
    fn two_step_full_success_scores_one_attempt() {
        let mut s = session(vec![two_step("q2", "ar", "arna i")]);
        s.next().unwrap();
        s.submit("ar").unwrap();
        assert_eq!(s.submit("Arna  i").unwrap(), Resolution::Correct);
        assert_eq!(
            s.stats(),
            SessionStats {
                score: 1,
                streak: 1,
                attempts: 1
            }
        );
    }

    #[test]
    fn two_step_wrong_primary_ends_the_attempt() {
        let mut s = session(vec![two_step("q2", "ar", "arna i")]);
        s.next().unwrap();
        assert_eq!(s.submit("am").unwrap(), Resolution::Incorrect);
        assert_eq!(s.step(), Step::Primary);
        assert_eq!(s.stats().attempts, 1);
    }

    #[test]
    fn reveal_counts_one_incorrect_attempt_from_either_step() {
        let mut s = session(vec![two_step("q2", "ar", "arna i")]);
        s.next().unwrap();
        s.submit("ar").unwrap(); // now on the secondary step
        assert_eq!(s.reveal().unwrap(), Resolution::Revealed);
        assert_eq!(
            s.stats(),
            SessionStats {
                score: 0,
                streak: 0,
                attempts: 1
            }
        );
    }

    #[test]
    fn submit_and_reveal_after_resolution_are_no_ops() {
        let mut s = session(vec![single("q1", "at")]);
        s.next().unwrap();
        s.submit("at").unwrap();
        let before = s.stats();

        assert_eq!(s.submit("at").unwrap(), Resolution::Correct);
        assert_eq!(s.submit("wrong").unwrap(), Resolution::Correct);
        assert_eq!(s.reveal().unwrap(), Resolution::Correct);
        assert_eq!(s.stats(), before);
    }

    #[test]
    fn submit_without_a_current_item_is_an_error() {
        let mut s = session(vec![single("q1", "at")]);
        assert_eq!(s.submit("at"), Err(DrillError::NoCurrentItem));
        assert_eq!(s.reveal(), Err(DrillError::NoCurrentItem));
    }

    #[test]
    fn next_clears_transient_state_from_the_previous_item() {
        let mut s = session(vec![single("q1", "at"), single("q2", "ar")]);
        s.next().unwrap();
        s.submit("nope").unwrap();

        s.next().unwrap();
        assert_eq!(s.step(), Step::Primary);
        assert_eq!(s.resolution(), Resolution::Pending);
    }

    #[test]
    fn empty_filtered_pool_clears_the_current_item() {
        let mut with_topic = single("q1", "at");
        with_topic.topic = "motion".into();
        let mut s = session(vec![with_topic]);
        s.next().unwrap();
        assert!(s.current().is_some());

        s.set_criteria(FilterCriteria {
            topic: Some("weather".into()),
            ..FilterCriteria::default()
        });
        assert!(s.current().is_none());
        assert_eq!(s.next(), Err(DrillError::EmptyPool));
        assert!(s.current().is_none());
    }

    #[test]
    fn choices_require_a_current_item() {
        let mut s = session(vec![single("q1", "at")]);
        assert_eq!(s.choices(), Err(DrillError::NoCurrentItem));
        s.next().unwrap();
        let choices = s.choices().unwrap();
        assert!(choices.iter().any(|c| c == "at"));
    }
}
