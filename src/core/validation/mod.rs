//! Record validation and payload normalization
//!
//! Field-level limits on request bodies are declared with `validator`
//! derives and enforced by [`ValidatedJson`](crate::core::extractors::ValidatedJson).
//! Rules that depend on the stored shape of a record (formats, ranges
//! across fields, compiled patterns) live in [`validators`] and run from
//! `Record::validate` on every create and update.

pub mod filters;
pub mod validators;
