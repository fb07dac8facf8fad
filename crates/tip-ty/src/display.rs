//! Optional cycle-folding pretty printer for solved types.
//!
//! Recursive types (e.g. the type of a linked-list cell, `{next: &α, ...}`
//! where `α` unifies with the record itself) have infinite unfolding if
//! printed naively. This walks a solved type depth-first, and the first
//! time it would re-enter a term already on the walk's stack, it stops and
//! folds the cycle into a `μα.` binder instead. This has no bearing on
//! whether unification itself succeeds or fails; it only affects how a
//! solved type is shown to a human.

use crate::types::Type;
use crate::unify::UnificationSolver;

pub fn resolve_for_display(solver: &mut UnificationSolver, t: &Type) -> Type {
    let mut folder = Folder { solver, stack: Vec::new(), used: Vec::new(), next_alpha: 0 };
    folder.resolve(t)
}

struct Folder<'a> {
    solver: &'a mut UnificationSolver,
    stack: Vec<(Type, u32)>,
    used: Vec<u32>,
    next_alpha: u32,
}

impl Folder<'_> {
    fn resolve(&mut self, t: &Type) -> Type {
        let root = self.solver.find(t);

        if let Some(&(_, alpha)) = self.stack.iter().find(|(r, _)| *r == root) {
            self.used.push(alpha);
            // Reuses `FreshVar`'s existing `αN` rendering as the bound
            // occurrence, matched against the enclosing `Recursive(N, _)`.
            return Type::FreshVar(alpha);
        }

        if !root.is_proper() {
            return root;
        }

        let alpha = self.next_alpha;
        self.next_alpha += 1;
        self.stack.push((root.clone(), alpha));

        let rebuilt = match &root {
            Type::Int => Type::Int,
            Type::Pointer(base) => Type::pointer(self.resolve(base)),
            Type::Function(params, result) => Type::function(
                params.iter().map(|p| self.resolve(p)).collect(),
                self.resolve(result),
            ),
            Type::Record(fields) => {
                Type::Record(fields.iter().map(|(k, v)| (k.clone(), self.resolve(v))).collect())
            }
            _ => root.clone(),
        };

        self.stack.pop();
        if self.used.contains(&alpha) {
            Type::Recursive(alpha, Box::new(rebuilt))
        } else {
            rebuilt
        }
    }
}
