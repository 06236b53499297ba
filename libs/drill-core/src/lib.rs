//! Core engine for gap-fill grammar drills.
//!
//! Provides:
//! - Item pool loading with per-record validation and duplicate handling
//! - Criteria filtering and no-repeat drawing
//! - Multiple-choice distractor generation
//! - A one- or two-step answer state machine with score bookkeeping
//! - Diacritic/case/apostrophe-insensitive answer matching
//!
//! The engine is synchronous, single-threaded, and UI-agnostic: a front end
//! calls [`DrillSession`] and renders from the plain data it returns.
//! Randomness is injected so tests stay deterministic.

pub mod choices;
pub mod deck;
pub mod error;
pub mod filter;
pub mod matching;
pub mod pool;
pub mod session;
pub mod stats;
pub mod types;

pub use choices::{build_choices, DEFAULT_CHOICE_COUNT, FALLBACK_VOCABULARY};
pub use deck::pick_next;
pub use error::{DrillError, ItemError, Result};
pub use filter::{available_values, FilterField};
pub use matching::{matches_primary, matches_secondary, normalize};
pub use pool::{load, LoadOutcome, LoadReject};
pub use session::DrillSession;
pub use stats::{ScoreEvent, SessionStats};
pub use types::{DrillItem, FilterCriteria, ItemMode, RawRecord, Resolution, Step};
