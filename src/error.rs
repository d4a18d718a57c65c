use std::fmt;

/// Errors surfaced by [`crate::KPartiteKClique`] / [`crate::FindClique`] construction
/// and iteration.
///
/// Follows the same hand-rolled, dependency-free shape used elsewhere in this
/// codebase for small algorithm-local error types (see `algo::push_relabel::MaxFlowError`):
/// a `Copy` enum with a manual `Display`/`Error` impl, no `thiserror`.
#[derive(Debug, Clone, Copy, Eq, PartialEq)]
pub enum KCliqueError {
    /// A construction contract was violated: `k == 0`, an empty part, or (for
    /// [`crate::KPartiteKClique`] only) an input detected not to be k-partite.
    InvalidArgument(&'static str),
    /// The ambient interrupt flag was observed at a checkpoint. The engine
    /// must not be used again after this is returned.
    Cancelled,
}

impl fmt::Display for KCliqueError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            KCliqueError::InvalidArgument(reason) => write!(f, "invalid argument: {reason}"),
            KCliqueError::Cancelled => write!(f, "computation was interrupted"),
        }
    }
}

impl std::error::Error for KCliqueError {}
