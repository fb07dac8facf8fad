//! Type analysis failures (§7, §11).

use thiserror::Error;

use crate::types::Type;

/// Raised by [`crate::unify::UnificationSolver::unify`] when two proper
/// types cannot be made equal. Each variant carries the two offending terms
/// verbatim, as found (not re-resolved through the union-find), so the
/// message reflects what was actually being compared at the point of failure.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum TypeError {
    #[error("cannot unify `{lhs}` with `{rhs}`: different type constructors")]
    ConstructorMismatch { lhs: Type, rhs: Type },

    #[error("cannot unify `{lhs}` with `{rhs}`: function arity {lhs_arity} != {rhs_arity}")]
    ArityMismatch { lhs: Type, rhs: Type, lhs_arity: usize, rhs_arity: usize },

    #[error("cannot unify record `{lhs}` with `{rhs}`: field sets differ")]
    FieldSetMismatch { lhs: Type, rhs: Type },

    #[error("cannot unify `{lhs}` with `{rhs}`: one side is absent, the other present")]
    AbsencePresentMismatch { lhs: Type, rhs: Type },
}
