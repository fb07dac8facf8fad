//! The abstract syntax tree for TIP programs.
//!
//! There is no separate CST here: the parser in [`crate::parser`] builds
//! these nodes directly, and parentheses are discarded as they are parsed
//! (per the spec's invariant that parenthesization is not part of the
//! abstract syntax). Every node derives structural `PartialEq`/`Eq`/`Hash`;
//! this equality is load-bearing, since it is what `tip-ty` uses to key
//! type variables by expression identity.

use std::fmt;

/// An identifier. Equality is by name.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Ident(pub String);

impl Ident {
    pub fn new(name: impl Into<String>) -> Self {
        Ident(name.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Ident {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for Ident {
    fn from(s: &str) -> Self {
        Ident(s.to_string())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ArithOp {
    Add,
    Sub,
    Mul,
    Div,
}

impl fmt::Display for ArithOp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            ArithOp::Add => "+",
            ArithOp::Sub => "-",
            ArithOp::Mul => "*",
            ArithOp::Div => "/",
        };
        f.write_str(s)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CompOp {
    Eq,
    Gt,
}

impl fmt::Display for CompOp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            CompOp::Eq => "==",
            CompOp::Gt => ">",
        };
        f.write_str(s)
    }
}

/// A single `label: value` entry of a record literal.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Field {
    pub name: Ident,
    pub value: Expr,
}

/// Expressions, per §3 of the spec.
///
/// `Box` is used purely for recursive ownership; it plays no role in the
/// equality that drives type-variable identity (two structurally equal
/// `Expr` trees, however deeply boxed, are equal and hash equal).
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Expr {
    Id(Ident),
    Int(i64),
    Input,
    Null,
    Reference(Ident),
    Dereference(Box<Expr>),
    Allocation(Box<Expr>),
    Arithmetic(Box<Expr>, ArithOp, Box<Expr>),
    Comparison(Box<Expr>, CompOp, Box<Expr>),
    FunctionCall(Box<Expr>, Vec<Expr>),
    Record(Vec<Field>),
    FieldAccess(Box<Expr>, Ident),
}

impl Expr {
    pub fn arithmetic(l: Expr, op: ArithOp, r: Expr) -> Expr {
        Expr::Arithmetic(Box::new(l), op, Box::new(r))
    }

    pub fn comparison(l: Expr, op: CompOp, r: Expr) -> Expr {
        Expr::Comparison(Box::new(l), op, Box::new(r))
    }

    pub fn dereference(e: Expr) -> Expr {
        Expr::Dereference(Box::new(e))
    }

    pub fn allocation(e: Expr) -> Expr {
        Expr::Allocation(Box::new(e))
    }

    pub fn field_access(e: Expr, field: Ident) -> Expr {
        Expr::FieldAccess(Box::new(e), field)
    }

    /// Whether this is a `Dereference` node, as required on the left-hand
    /// side of `DereferenceAssignment`/`DereferenceFieldAssignment`.
    pub fn as_dereference(&self) -> Option<&Expr> {
        match self {
            Expr::Dereference(inner) => Some(inner),
            _ => None,
        }
    }
}

impl fmt::Display for Expr {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Expr::Id(name) => write!(f, "{name}"),
            Expr::Int(n) => write!(f, "{n}"),
            Expr::Input => write!(f, "input"),
            Expr::Null => write!(f, "null"),
            Expr::Reference(name) => write!(f, "&{name}"),
            Expr::Dereference(e) => write!(f, "*{}", Paren(e)),
            Expr::Allocation(e) => write!(f, "alloc {}", Paren(e)),
            Expr::Arithmetic(l, op, r) => write!(f, "{} {op} {}", Paren(l), Paren(r)),
            Expr::Comparison(l, op, r) => write!(f, "{} {op} {}", Paren(l), Paren(r)),
            Expr::FunctionCall(callee, args) => {
                write!(f, "{}(", Paren(callee))?;
                for (i, a) in args.iter().enumerate() {
                    if i > 0 {
                        write!(f, ", ")?;
                    }
                    write!(f, "{a}")?;
                }
                write!(f, ")")
            }
            Expr::Record(fields) => {
                write!(f, "{{")?;
                for (i, field) in fields.iter().enumerate() {
                    if i > 0 {
                        write!(f, ", ")?;
                    }
                    write!(f, "{}: {}", field.name, field.value)?;
                }
                write!(f, "}}")
            }
            Expr::FieldAccess(e, field) => write!(f, "{}.{field}", Paren(e)),
        }
    }
}

/// Wraps an expression in parentheses when printing it as a sub-expression
/// would otherwise be ambiguous to re-parse. Kept conservative (always
/// parenthesizes compound expressions) since the spec only requires that
/// printing and re-parsing round-trip, not that the result be minimal.
struct Paren<'a>(&'a Expr);

impl fmt::Display for Paren<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.0 {
            Expr::Id(_) | Expr::Int(_) | Expr::Input | Expr::Null | Expr::Reference(_) => {
                write!(f, "{}", self.0)
            }
            _ => write!(f, "({})", self.0),
        }
    }
}

/// Statements, per §3 of the spec.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Stmt {
    Declaration(Vec<Ident>),
    Assignment(Ident, Expr),
    /// `*e1 = e2`. `e1` is required to be a `Dereference` expression.
    DereferenceAssignment(Expr, Expr),
    /// `x.f = e`.
    FieldAssignment(Ident, Ident, Expr),
    /// `(*e).f = e2`. The first `Expr` is required to be a `Dereference` expression.
    DereferenceFieldAssignment(Expr, Ident, Expr),
    Output(Expr),
    If(Expr, Vec<Stmt>, Option<Vec<Stmt>>),
    While(Expr, Vec<Stmt>),
    /// Only appears as the synthetic final statement built from a
    /// function's trailing `return e;`; never produced mid-block by the
    /// parser.
    Return(Expr),
}

impl fmt::Display for Stmt {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Stmt::Declaration(names) => {
                write!(f, "var ")?;
                for (i, n) in names.iter().enumerate() {
                    if i > 0 {
                        write!(f, ", ")?;
                    }
                    write!(f, "{n}")?;
                }
                write!(f, ";")
            }
            Stmt::Assignment(x, e) => write!(f, "{x} = {e};"),
            Stmt::DereferenceAssignment(lhs, rhs) => write!(f, "{lhs} = {rhs};"),
            Stmt::FieldAssignment(x, field, e) => write!(f, "{x}.{field} = {e};"),
            Stmt::DereferenceFieldAssignment(lhs, field, e) => {
                write!(f, "({lhs}).{field} = {e};")
            }
            Stmt::Output(e) => write!(f, "output {e};"),
            Stmt::If(cond, then_branch, else_branch) => {
                write!(f, "if ({cond}) {{ ")?;
                for s in then_branch {
                    write!(f, "{s} ")?;
                }
                write!(f, "}}")?;
                if let Some(else_branch) = else_branch {
                    write!(f, " else {{ ")?;
                    for s in else_branch {
                        write!(f, "{s} ")?;
                    }
                    write!(f, "}}")?;
                }
                Ok(())
            }
            Stmt::While(cond, body) => {
                write!(f, "while ({cond}) {{ ")?;
                for s in body {
                    write!(f, "{s} ")?;
                }
                write!(f, "}}")
            }
            Stmt::Return(e) => write!(f, "return {e};"),
        }
    }
}

/// A function definition: `name(params) { body; return ret; }`.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Function {
    pub name: Ident,
    pub params: Vec<Ident>,
    pub body: Vec<Stmt>,
    pub ret: Expr,
}

impl Function {
    pub fn is_main(&self) -> bool {
        self.name.as_str() == "main"
    }
}

impl fmt::Display for Function {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}(", self.name)?;
        for (i, p) in self.params.iter().enumerate() {
            if i > 0 {
                write!(f, ", ")?;
            }
            write!(f, "{p}")?;
        }
        write!(f, ") {{ ")?;
        for s in &self.body {
            write!(f, "{s} ")?;
        }
        write!(f, "return {}; }}", self.ret)
    }
}

/// A whole source file: an ordered list of function definitions.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default)]
pub struct Program {
    pub functions: Vec<Function>,
}

impl Program {
    pub fn find_function(&self, name: &str) -> Option<&Function> {
        self.functions.iter().find(|f| f.name.as_str() == name)
    }

    pub fn main(&self) -> Option<&Function> {
        self.find_function("main")
    }
}

impl fmt::Display for Program {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, func) in self.functions.iter().enumerate() {
            if i > 0 {
                writeln!(f)?;
            }
            writeln!(f, "{func}")?;
        }
        Ok(())
    }
}
