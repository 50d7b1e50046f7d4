//! Tokenizer and fault-tolerant parser for LaTeX math.
//!
//! Text flows through [`Source`] → [`Tokenizer`] → [`Parser`] and comes out as
//! a [`ParseResult`]: a position-annotated tree rooted at an
//! [`ExpressionNode`] plus the errors met on the way. The parser never gives
//! up, so malformed input still yields a best-effort tree.
//!
//! ```
//! use texmax_syntax::{parse, Node};
//!
//! let result = parse(r"\frac{a}{b}");
//! assert!(result.is_ok());
//! assert!(matches!(result.root.elements[0], Node::Fraction(_)));
//! ```

pub mod ast;
pub mod parser;
mod position;
mod source;
pub mod symbols;
mod token;
mod tokenizer;
mod visit;

#[cfg(test)]
mod test_support;

pub use ast::*;
pub use parser::{MAX_DEPTH, ParseError, ParseResult, Parser, parse};
pub use position::Position;
pub use source::{Source, SourceError};
pub use token::{Token, TokenKind};
pub use tokenizer::{Tokenizer, tokenize, tokenize_str};
pub use visit::*;
