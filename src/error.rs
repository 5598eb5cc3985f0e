use thiserror::Error;

use crate::transport::TransportError;

/// Errors that abort a statefile scheduler operation
///
/// Only configuration and directory access problems are fatal. Odd data in a listing (unknown
/// state tokens, missing statefiles, unexpected kill output) degrades gracefully instead.
#[derive(Error, Debug)]
pub enum SchedulerError {
    #[error("This scheduler requires the {var} environment variable set on the target computer")]
    MissingStatefileDir { var: String },

    #[error("Error while accessing the {var} at {path}: {message}")]
    StatefileDirAccess {
        var: String,
        path: String,
        message: String,
    },

    #[error("Creating the QUEUED statefile failed: {stderr}")]
    QueuedStatefileFailed { stderr: String },

    #[error("Invalid job id {id:?}: {reason}")]
    InvalidJobId { id: String, reason: &'static str },

    #[error("Transport error: {0}")]
    Transport(#[from] TransportError),

    #[error("Can't render command template: {0}")]
    Template(#[from] tinytemplate::error::Error),
}

pub type Result<T> = std::result::Result<T, SchedulerError>;
