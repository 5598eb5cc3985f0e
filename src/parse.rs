//! Turn the output of the list, submit and kill commands into job states and ids
//!
//! Parsing is strict about the line grammar and lenient about the data: lines that don't fit
//! `<job_id>.<token>` or `<cmd>:<path>:<message>` are logged and skipped, while a missing
//! statefile directory variable or an inaccessible directory is an error.

/// Detect a missing statefile directory variable in stderr
pub mod unbound;
/// Grammar for statefile names and shell error lines
pub mod line;
/// Resolve a directory listing into one state per job
pub mod joblist;
/// Extract the job id printed by the submit command
pub mod submit;
/// Judge whether the kill marker was written
pub mod kill;
