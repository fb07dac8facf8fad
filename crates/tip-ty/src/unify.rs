//! Union-find over arbitrary compound type terms (§4.2).
//!
//! Unlike a textbook union-find over atomic keys, sets here are rooted at
//! whole [`Type`] terms: `Pointer`, `Function` and `Record` nodes are
//! registered (via `make_set`) together with every sub-term reachable from
//! them, so that unifying two compound terms recursively unifies their
//! children rather than merely aliasing the two root nodes.

use std::collections::HashMap;

use rustc_hash::FxHashSet;

use crate::constraint::TypeEqualityConstraint;
use crate::error::TypeError;
use crate::types::Type;

#[derive(Default)]
pub struct UnificationSolver {
    parent: HashMap<Type, Type>,
}

impl UnificationSolver {
    pub fn new() -> Self {
        Self::default()
    }

    /// Every term ever registered via `make_set`, i.e. every constraint
    /// endpoint and sub-term seen while solving. Driver code uses this to
    /// print the type relation dump, restricted to `ExprVar` keys (§6).
    pub fn keys(&self) -> impl Iterator<Item = &Type> {
        self.parent.keys()
    }

    /// Runs every constraint through [`Self::unify`] in order, stopping at
    /// the first failure (constraints are independent of order for success,
    /// but the *first* failure encountered is what gets reported).
    pub fn solve(constraints: &[TypeEqualityConstraint]) -> Result<UnificationSolver, TypeError> {
        let mut solver = UnificationSolver::new();
        for c in constraints {
            solver.unify(&c.0, &c.1)?;
        }
        Ok(solver)
    }

    /// Registers `t` and every sub-term reachable from it as its own set,
    /// if not already registered.
    fn make_set(&mut self, t: &Type) {
        if self.parent.contains_key(t) {
            return;
        }
        self.parent.insert(t.clone(), t.clone());
        for sub in t.subterms() {
            self.make_set(sub);
        }
    }

    /// Finds the representative of `t`'s set, compressing the path walked.
    /// Terms not yet registered are treated as their own singleton set.
    pub fn find(&mut self, t: &Type) -> Type {
        if !self.parent.contains_key(t) {
            self.parent.insert(t.clone(), t.clone());
        }
        let parent = self.parent.get(t).expect("just inserted").clone();
        if parent == *t {
            t.clone()
        } else {
            let root = self.find(&parent);
            self.parent.insert(t.clone(), root.clone());
            root
        }
    }

    fn union(&mut self, a: &Type, b: &Type) {
        let ra = self.find(a);
        let rb = self.find(b);
        if ra != rb {
            self.parent.insert(ra, rb);
        }
    }

    /// Unifies `x` and `y`, recursing into matching compound terms.
    ///
    /// - var/var or var/proper: the variable's set is merged into the
    ///   other's (a variable unified with a proper type simply becomes
    ///   that type).
    /// - proper/proper with the same constructor: merge, then recurse
    ///   pairwise into sub-terms (pointer base; function params and
    ///   result, after an arity check; record fields, after a field-set
    ///   check, skipping any field where either side is a `FreshVar` and
    ///   failing if exactly one side is `Absence`).
    /// - proper/proper with different constructors: failure.
    pub fn unify(&mut self, x: &Type, y: &Type) -> Result<(), TypeError> {
        self.make_set(x);
        self.make_set(y);

        let rx = self.find(x);
        let ry = self.find(y);
        if rx == ry {
            return Ok(());
        }

        let rx_proper = rx.is_proper();
        let ry_proper = ry.is_proper();

        if !rx_proper && !ry_proper {
            self.union(&rx, &ry);
            return Ok(());
        }
        if !rx_proper {
            self.union(&rx, &ry);
            return Ok(());
        }
        if !ry_proper {
            self.union(&ry, &rx);
            return Ok(());
        }

        match (&rx, &ry) {
            (Type::Int, Type::Int) => {
                self.union(&rx, &ry);
                Ok(())
            }
            (Type::Pointer(b1), Type::Pointer(b2)) => {
                let (b1, b2) = ((**b1).clone(), (**b2).clone());
                self.union(&rx, &ry);
                self.unify(&b1, &b2)
            }
            (Type::Function(p1, r1), Type::Function(p2, r2)) => {
                if p1.len() != p2.len() {
                    return Err(TypeError::ArityMismatch {
                        lhs: rx.clone(),
                        rhs: ry.clone(),
                        lhs_arity: p1.len(),
                        rhs_arity: p2.len(),
                    });
                }
                let params1 = p1.clone();
                let params2 = p2.clone();
                let result1 = (**r1).clone();
                let result2 = (**r2).clone();
                self.union(&rx, &ry);
                for (a, b) in params1.iter().zip(params2.iter()) {
                    self.unify(a, b)?;
                }
                self.unify(&result1, &result2)
            }
            (Type::Record(f1), Type::Record(f2)) => {
                let keys1: FxHashSet<_> = f1.keys().collect();
                let keys2: FxHashSet<_> = f2.keys().collect();
                if keys1 != keys2 {
                    return Err(TypeError::FieldSetMismatch { lhs: rx.clone(), rhs: ry.clone() });
                }
                let pairs: Vec<(Type, Type)> =
                    f1.iter().map(|(k, v1)| (v1.clone(), f2[k].clone())).collect();
                self.union(&rx, &ry);
                for (v1, v2) in pairs {
                    match (&v1, &v2) {
                        (Type::FreshVar(_), _) | (_, Type::FreshVar(_)) => {}
                        (Type::Absence, Type::Absence) => {}
                        (Type::Absence, _) | (_, Type::Absence) => {
                            return Err(TypeError::AbsencePresentMismatch { lhs: v1, rhs: v2 });
                        }
                        _ => self.unify(&v1, &v2)?,
                    }
                }
                Ok(())
            }
            _ => Err(TypeError::ConstructorMismatch { lhs: rx.clone(), rhs: ry.clone() }),
        }
    }
}
