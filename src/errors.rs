use thiserror::Error;

use crate::node::{NodeId, MAX_CHILDREN};

#[derive(Error, Debug)]
pub enum TreeError {
    #[error("node already holds {capacity} children")]
    CapacityExceeded { capacity: usize },

    #[error("child index {index} out of range for {len} children")]
    IndexOutOfRange { index: usize, len: usize },

    #[error("node not found: {0:?}")]
    NodeNotFound(NodeId),

    #[error("missing required field: {0}")]
    MissingField(&'static str),

    #[error("invalid tree format: {context}: {source}")]
    Format {
        context: String,
        #[source]
        source: serde_json::Error,
    },

    #[error("invalid tree format: {0}")]
    InvalidShape(String),

    #[error("I/O error: {context}")]
    Io {
        context: String,
        #[source]
        source: std::io::Error,
    },

    #[error("config error: {message}")]
    Config { message: String },
}

impl TreeError {
    /// Create an I/O error with context.
    pub fn io(context: impl Into<String>, source: std::io::Error) -> Self {
        Self::Io {
            context: context.into(),
            source,
        }
    }

    pub(crate) fn capacity() -> Self {
        Self::CapacityExceeded {
            capacity: MAX_CHILDREN,
        }
    }

    /// Split a serde_json failure into I/O and format errors.
    pub(crate) fn json(context: impl Into<String>, source: serde_json::Error) -> Self {
        let context = context.into();
        if source.is_io() {
            Self::io(context, source.into())
        } else {
            Self::Format { context, source }
        }
    }
}

pub type TreeResult<T> = Result<T, TreeError>;
