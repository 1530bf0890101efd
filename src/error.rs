use std::fmt;

use thiserror::Error;

/// The reason a tag rejected an operation.
///
/// There is only one error kind, but the two illegal situations are worth
/// telling apart when debugging template code.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InvalidTagReason {
    /// The tag header is finished; attributes are no longer accepted.
    AttributesDone,
    /// The tag is closed; no operation is accepted anymore.
    AlreadyClosed,
}

impl fmt::Display for InvalidTagReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            InvalidTagReason::AttributesDone => write!(f, "attributes are no longer accepted"),
            InvalidTagReason::AlreadyClosed => write!(f, "the tag is already closed"),
        }
    }
}

#[derive(Error, Debug, PartialEq, Eq)]
/// Tag builder error
pub enum TagError {
    #[error("Invalid operation on tag '{tag}': {reason}")]
    InvalidTagOperation {
        /// Name of the offending tag.
        tag: String,
        /// What made the operation illegal.
        reason: InvalidTagReason,
    },
}

impl TagError {
    pub(crate) fn invalid(tag: &str, reason: InvalidTagReason) -> Self {
        TagError::InvalidTagOperation {
            tag: tag.to_string(),
            reason,
        }
    }
}
