//! Walks a [`Program`] and emits the [`TypeEqualityConstraint`]s of §4.1.
//!
//! Record literals and field accesses only produce *partial* row
//! constraints while the AST is being walked, since the full set of field
//! names used anywhere in the program (`record_fields`) is only known once
//! the walk is complete. [`ConstraintCollector::finish`] performs the
//! deferred padding pass described in the spec's "Record row completion"
//! design note — this two-phase shape is essential and must not be
//! flattened into the first walk.

use std::collections::BTreeMap;

use rustc_hash::FxHashSet;
use tip_syntax::{Expr, Function, Ident, Program, Stmt};

use crate::constraint::TypeEqualityConstraint;
use crate::types::Type;

pub struct CollectedConstraints {
    pub constraints: Vec<TypeEqualityConstraint>,
    pub record_fields: FxHashSet<Ident>,
}

pub fn collect(program: &Program) -> CollectedConstraints {
    let mut collector = ConstraintCollector::default();
    for function in &program.functions {
        collector.visit_function(function);
    }
    collector.finish()
}

#[derive(Default)]
struct ConstraintCollector {
    constraints: Vec<TypeEqualityConstraint>,
    record_fields: FxHashSet<Ident>,
    deferred_records: Vec<(Type, BTreeMap<Ident, Type>)>,
    deferred_field_accesses: Vec<(Type, Ident, Type)>,
    fresh_counter: u32,
}

impl ConstraintCollector {
    fn fresh(&mut self) -> Type {
        let id = self.fresh_counter;
        self.fresh_counter += 1;
        Type::FreshVar(id)
    }

    fn push(&mut self, l: Type, r: Type) {
        self.constraints.push(TypeEqualityConstraint::new(l, r));
    }

    fn visit_function(&mut self, func: &Function) {
        let fn_var = Type::expr_var(Expr::Id(func.name.clone()));
        let param_vars: Vec<Type> =
            func.params.iter().map(|p| Type::expr_var(Expr::Id(p.clone()))).collect();
        let ret_var = Type::expr_var(func.ret.clone());
        self.push(fn_var, Type::function(param_vars.clone(), ret_var.clone()));

        if func.is_main() {
            for p in &param_vars {
                self.push(p.clone(), Type::Int);
            }
            self.push(ret_var, Type::Int);
        }

        for stmt in &func.body {
            self.visit_stmt(stmt);
        }
        self.visit_expr(&func.ret);
    }

    fn visit_stmt(&mut self, stmt: &Stmt) {
        match stmt {
            Stmt::Declaration(_) => {}
            Stmt::Assignment(x, e) => {
                self.visit_expr(e);
                self.push(Type::expr_var(Expr::Id(x.clone())), Type::expr_var(e.clone()));
            }
            Stmt::DereferenceAssignment(lhs, rhs) => {
                self.visit_expr(lhs);
                self.visit_expr(rhs);
                let inner = lhs.as_dereference().expect("lhs of DereferenceAssignment must be `*e`");
                self.push(Type::expr_var(inner.clone()), Type::pointer(Type::expr_var(rhs.clone())));
            }
            Stmt::FieldAssignment(x, field, e) => {
                self.visit_expr(e);
                self.record_fields.insert(field.clone());
                let base = Type::expr_var(Expr::Id(x.clone()));
                self.deferred_field_accesses.push((base, field.clone(), Type::expr_var(e.clone())));
            }
            Stmt::DereferenceFieldAssignment(lhs, field, e) => {
                self.visit_expr(lhs);
                self.visit_expr(e);
                self.record_fields.insert(field.clone());
                // The record lives at the pointee, i.e. at `*e1` itself,
                // not at the pointer `e1`.
                self.deferred_field_accesses.push((
                    Type::expr_var(lhs.clone()),
                    field.clone(),
                    Type::expr_var(e.clone()),
                ));
            }
            Stmt::Output(e) => {
                self.visit_expr(e);
                self.push(Type::expr_var(e.clone()), Type::Int);
            }
            Stmt::If(cond, then_branch, else_branch) => {
                self.visit_expr(cond);
                self.push(Type::expr_var(cond.clone()), Type::Int);
                for s in then_branch {
                    self.visit_stmt(s);
                }
                if let Some(else_branch) = else_branch {
                    for s in else_branch {
                        self.visit_stmt(s);
                    }
                }
            }
            Stmt::While(cond, body) => {
                self.visit_expr(cond);
                self.push(Type::expr_var(cond.clone()), Type::Int);
                for s in body {
                    self.visit_stmt(s);
                }
            }
            Stmt::Return(e) => self.visit_expr(e),
        }
    }

    fn visit_expr(&mut self, e: &Expr) {
        match e {
            Expr::Id(_) => {}
            Expr::Int(_) => self.push(Type::expr_var(e.clone()), Type::Int),
            Expr::Input => self.push(Type::expr_var(e.clone()), Type::Int),
            // `null` may inhabit any pointer type; model it as a pointer to
            // a fresh variable rather than leaving it unconstrained.
            Expr::Null => {
                let alpha = self.fresh();
                self.push(Type::expr_var(e.clone()), Type::pointer(alpha));
            }
            Expr::Reference(x) => {
                self.push(
                    Type::expr_var(e.clone()),
                    Type::pointer(Type::expr_var(Expr::Id(x.clone()))),
                );
            }
            Expr::Dereference(inner) => {
                self.visit_expr(inner);
                self.push(Type::expr_var((**inner).clone()), Type::pointer(Type::expr_var(e.clone())));
            }
            Expr::Allocation(inner) => {
                self.visit_expr(inner);
                self.push(Type::expr_var(e.clone()), Type::pointer(Type::expr_var((**inner).clone())));
            }
            Expr::Arithmetic(l, _op, r) => {
                self.visit_expr(l);
                self.visit_expr(r);
                self.push(Type::expr_var(e.clone()), Type::Int);
                self.push(Type::expr_var((**l).clone()), Type::Int);
                self.push(Type::expr_var((**r).clone()), Type::Int);
            }
            Expr::Comparison(l, _op, r) => {
                self.visit_expr(l);
                self.visit_expr(r);
                self.push(Type::expr_var((**l).clone()), Type::expr_var((**r).clone()));
                self.push(Type::expr_var(e.clone()), Type::Int);
            }
            Expr::FunctionCall(callee, args) => {
                self.visit_expr(callee);
                for a in args {
                    self.visit_expr(a);
                }
                let arg_vars = args.iter().map(|a| Type::expr_var(a.clone())).collect();
                self.push(
                    Type::expr_var((**callee).clone()),
                    Type::function(arg_vars, Type::expr_var(e.clone())),
                );
            }
            Expr::Record(fields) => {
                let mut known = BTreeMap::new();
                for field in fields {
                    self.visit_expr(&field.value);
                    self.record_fields.insert(field.name.clone());
                    known.insert(field.name.clone(), Type::expr_var(field.value.clone()));
                }
                self.deferred_records.push((Type::expr_var(e.clone()), known));
            }
            Expr::FieldAccess(base, field) => {
                self.visit_expr(base);
                self.record_fields.insert(field.clone());
                self.deferred_field_accesses.push((
                    Type::expr_var((**base).clone()),
                    field.clone(),
                    Type::expr_var(e.clone()),
                ));
            }
        }
    }

    fn finish(mut self) -> CollectedConstraints {
        for (node_var, known_fields) in self.deferred_records.drain(..).collect::<Vec<_>>() {
            let mut row = known_fields;
            for field in &self.record_fields {
                row.entry(field.clone()).or_insert(Type::Absence);
            }
            self.constraints.push(TypeEqualityConstraint::new(node_var, Type::Record(row)));
        }

        for (base_var, field, result_var) in
            self.deferred_field_accesses.drain(..).collect::<Vec<_>>()
        {
            let mut row = BTreeMap::new();
            for f in &self.record_fields {
                if *f == field {
                    row.insert(f.clone(), result_var.clone());
                } else {
                    row.insert(f.clone(), self.fresh());
                }
            }
            self.constraints.push(TypeEqualityConstraint::new(base_var, Type::Record(row)));
        }

        CollectedConstraints { constraints: self.constraints, record_fields: self.record_fields }
    }
}
