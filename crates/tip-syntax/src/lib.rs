//! Lexer, parser and AST for the TIP language.
//!
//! This crate plays the role the spec calls the "external collaborator":
//! lexing/parsing is out of the analysis core, but the AST it produces
//! (`ast::Program`) is the shared data model every other `tip-*` crate
//! builds on.

pub mod ast;
mod lexer;
mod parser;

pub use ast::{ArithOp, CompOp, Expr, Field, Function, Ident, Program, Stmt};
pub use lexer::{LexError, Span, Token, TokenKind};
pub use parser::{parse_program, ParseError};
