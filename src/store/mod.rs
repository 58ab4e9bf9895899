//! Keyed-table persistence over SQLite.
//!
//! Every function takes a live connection so callers decide the transaction
//! scope; multi-write invariants (reorder renumbering, stage-change plus
//! timeline append) are committed atomically by the service layer.

pub mod assessments;
pub mod candidates;
pub mod jobs;
pub mod notes;
pub mod timelines;
