//! # Sitewright Template
//!
//! The `{{…}}` substitution engine for component templates.
//!
//! Templates are plain strings carrying `{{token}}` placeholders and
//! lightweight embedded expressions (ternaries, comparisons, logical
//! fallback `||`, arithmetic, dotted property access). Rendering is total:
//! it always returns a string, never raises, and unresolvable expressions
//! degrade to their literal text so authors can spot mistakes in the
//! output.
//!
//! Two passes over the template:
//!
//! 1. **Literal tokens** — every parameter key's `{{key}}` occurrences are
//!    replaced with the stringified value; image-like parameters go through
//!    a category-aware placeholder fallback.
//! 2. **Expressions** — each remaining `{{expr}}` is lexed, parsed into an
//!    [`ast::Expr`], and evaluated against the parameter map.

pub mod ast;
pub mod error;
pub mod eval;
pub mod images;
pub mod lexer;
pub mod parser;
pub mod substitute;

#[cfg(test)]
mod tests_expressions;

pub use ast::{BinaryOp, Expr, UnaryOp};
pub use error::TemplateError;
pub use eval::evaluate;
pub use images::{categorize, resolve_image, ImageCategory};
pub use lexer::{lex, Token};
pub use parser::parse_expression;
pub use substitute::render;
