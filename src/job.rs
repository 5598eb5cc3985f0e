//! Job identifiers, lifecycle states and resolved job records

/// Validated job identifiers and job selections for listing
pub mod id;
/// The ordered job lifecycle encoded in statefile names
pub mod state;
/// A resolved `{job_id, state}` record
pub mod info;
