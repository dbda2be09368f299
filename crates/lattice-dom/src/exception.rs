//! Exception sink
//!
//! Error taxonomy for tree operations plus the single-slot sink the
//! scripting bridge drains after each call.

/// Result type for DOM operations
pub type DomResult<T> = Result<T, DomError>;

/// DOM operation errors
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum DomError {
    #[error("Internal error: {0}")]
    Internal(String),

    #[error("Hierarchy request error: {0}")]
    HierarchyRequest(String),

    #[error("Node not found")]
    NotFound,

    #[error("Node is not a child of the given parent")]
    NotAChild,
}

/// Single-slot error sink mirroring the scripting engine's exception
/// state: the first thrown error sticks until taken.
#[derive(Debug, Default)]
pub struct ExceptionState {
    error: Option<DomError>,
}

impl ExceptionState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record an error. Later throws while one is pending are dropped,
    /// matching engine exception semantics.
    pub fn throw(&mut self, error: DomError) {
        if self.error.is_none() {
            self.error = Some(error);
        }
    }

    pub fn has_exception(&self) -> bool {
        self.error.is_some()
    }

    pub fn error(&self) -> Option<&DomError> {
        self.error.as_ref()
    }

    /// Take the pending error, clearing the sink.
    pub fn take(&mut self) -> Option<DomError> {
        self.error.take()
    }
}
