//! Task-suggestion and progress-tracking planning logic.
//!
//! Pure in-memory planning separated from HTTP and storage so it can be
//! tested without a database.

pub mod mix;
pub mod range;
pub mod suggest;
pub mod summary;

pub use mix::{pick_difficulty_mix, MAX_SUGGESTIONS, MIN_SUGGESTIONS};
pub use range::{RangeBounds, SummaryRange};
pub use suggest::{compose_suggestions, rank_weak_areas, templates_for};
pub use summary::{summarize, PointsBreakdown, ProgressSummary, ProgressTotals};
