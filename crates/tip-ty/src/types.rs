//! The term model for TIP's type grammar:
//! `τ ::= int | ↑τ | (τ,…,τ) → τ | {ℓ₁:τ₁,…,ℓₙ:τₙ} | absence | α`.

use std::collections::BTreeMap;
use std::fmt;

use tip_syntax::{Expr, Ident};

/// A type term: either a *proper type* (a concrete constructor) or a
/// *type variable* (an expression's type, a fresh unification variable,
/// or `absence`). `RecursiveType` is never constructed by constraint
/// collection; it is produced only by the optional cycle-folding printer
/// over a solved union-find (see `crate::display`).
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Type {
    Int,
    Pointer(Box<Type>),
    Function(Vec<Type>, Box<Type>),
    /// An ordered (by field name) record row. Field order in the map is
    /// always sorted, so two records with the same fields hash and compare
    /// equal regardless of the order they were written in, per the spec's
    /// "hashing respects the unordered field set" rule.
    Record(BTreeMap<Ident, Type>),
    /// `[e]`, the type variable associated with expression `e`. Identity
    /// is structural: two textually identical expressions share a variable.
    ExprVar(Box<Expr>),
    /// A fresh variable (α) introduced during record-row padding.
    FreshVar(u32),
    /// Marks a field as absent from a record's row.
    Absence,
    /// `μα.τ`, a named recursive type. Output-only (see above).
    Recursive(u32, Box<Type>),
}

impl Type {
    pub fn expr_var(e: Expr) -> Type {
        Type::ExprVar(Box::new(e))
    }

    pub fn pointer(inner: Type) -> Type {
        Type::Pointer(Box::new(inner))
    }

    pub fn function(params: Vec<Type>, result: Type) -> Type {
        Type::Function(params, Box::new(result))
    }

    /// Whether this term is a *proper type* (a concrete constructor), as
    /// opposed to a *type variable* in the spec's sense (which includes
    /// `ExprVar`, `FreshVar`, and `Absence`).
    pub fn is_proper(&self) -> bool {
        matches!(self, Type::Int | Type::Pointer(_) | Type::Function(..) | Type::Record(_))
    }

    /// Sub-terms reachable from this term, for union-find's `makeSet` pass
    /// (§4.2 step 2): pointer bases, function params/result, recursive-type
    /// bodies, and non-absence, non-variable record field values.
    pub fn subterms(&self) -> Vec<&Type> {
        match self {
            Type::Int | Type::ExprVar(_) | Type::FreshVar(_) | Type::Absence => Vec::new(),
            Type::Pointer(base) => vec![base],
            Type::Function(params, result) => {
                let mut v: Vec<&Type> = params.iter().collect();
                v.push(result);
                v
            }
            Type::Record(fields) => fields
                .values()
                .filter(|v| !matches!(v, Type::Absence | Type::FreshVar(_)))
                .collect(),
            Type::Recursive(_, body) => vec![body],
        }
    }
}

// `Record`'s `BTreeMap` already iterates in a canonical (sorted-by-key)
// order, so the derived-style hash below is order-independent without
// needing a custom `Hash` impl that re-sorts anything.
impl std::hash::Hash for Type {
    fn hash<H: std::hash::Hasher>(&self, state: &mut H) {
        std::mem::discriminant(self).hash(state);
        match self {
            Type::Int | Type::Absence => {}
            Type::Pointer(base) => base.hash(state),
            Type::Function(params, result) => {
                params.hash(state);
                result.hash(state);
            }
            Type::Record(fields) => {
                for (k, v) in fields {
                    k.hash(state);
                    v.hash(state);
                }
            }
            Type::ExprVar(e) => e.hash(state),
            Type::FreshVar(id) => id.hash(state),
            Type::Recursive(alpha, body) => {
                alpha.hash(state);
                body.hash(state);
            }
        }
    }
}

impl fmt::Display for Type {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Type::Int => write!(f, "int"),
            Type::Pointer(base) => write!(f, "&{base}"),
            Type::Function(params, result) => {
                write!(f, "(")?;
                for (i, p) in params.iter().enumerate() {
                    if i > 0 {
                        write!(f, ", ")?;
                    }
                    write!(f, "{p}")?;
                }
                write!(f, ") -> {result}")
            }
            Type::Record(fields) => {
                write!(f, "{{")?;
                for (i, (name, ty)) in fields.iter().enumerate() {
                    if i > 0 {
                        write!(f, ", ")?;
                    }
                    write!(f, "{name}: {ty}")?;
                }
                write!(f, "}}")
            }
            Type::ExprVar(e) => write!(f, "[[{e}]]"),
            Type::FreshVar(id) => write!(f, "α{id}"),
            Type::Absence => write!(f, "absence"),
            Type::Recursive(alpha, body) => write!(f, "μα{alpha}.{body}"),
        }
    }
}
