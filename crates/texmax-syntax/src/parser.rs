mod commands;
mod environment;

use crate::ast::{
    DelimiterNode, ExpressionNode, Node, NumberNode, OperatorNode, SpaceNode, SubscriptNode,
    SuperscriptNode, SymbolNode,
};
use crate::{Position, Token, TokenKind, tokenize_str};
use serde::Serialize;
use thiserror::Error;

/// A recoverable problem found while parsing. Errors never stop the parse.
#[derive(Debug, Clone, PartialEq, Eq, Error, Serialize)]
#[error("{message} at {position}")]
pub struct ParseError {
    pub message: String,
    pub position: Position,
}

/// Output of a parse: the best-effort tree plus every error met on the way.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ParseResult {
    pub root: ExpressionNode,
    pub errors: Vec<ParseError>,
}

impl ParseResult {
    pub fn is_ok(&self) -> bool {
        self.errors.is_empty()
    }
}

/// Binding power of infix operators.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
enum Precedence {
    Lowest,
    Script,
    Highest,
}

fn precedence(kind: TokenKind) -> Precedence {
    match kind {
        TokenKind::Superscript | TokenKind::Subscript => Precedence::Script,
        _ => Precedence::Lowest,
    }
}

/// Deepest term nesting the parser descends into. Every recursive construct
/// passes through [`Parser::parse_term`], so this also bounds the stack.
pub const MAX_DEPTH: usize = 128;

/// Extra condition that ends an expression, on top of `EOF` and `}`.
type Stop = fn(&Token) -> bool;

fn never(_: &Token) -> bool {
    false
}

fn at_right_bracket(token: &Token) -> bool {
    token.is_delimiter("]")
}

fn at_right_command(token: &Token) -> bool {
    token.is_command("right")
}

fn at_cell_boundary(token: &Token) -> bool {
    matches!(token.kind, TokenKind::Ampersand | TokenKind::Backslash) || token.is_command("end")
}

/// Precedence-climbing parser over a token stream.
///
/// The parser never fails: malformed constructs degrade to partial nodes (or
/// none) and the problem is recorded in [`ParseResult::errors`]. Every loop
/// either consumes a token or stops, so parsing is linear in the number of
/// tokens.
pub struct Parser {
    tokens: Vec<Token>,
    cursor: usize,
    errors: Vec<ParseError>,
    depth: usize,
}

impl Parser {
    /// Creates a parser. Tokens after the first `EOF` are ignored; a stream
    /// without one gets an `EOF` appended.
    pub fn new(mut tokens: Vec<Token>) -> Self {
        match tokens.iter().position(|t| t.kind == TokenKind::Eof) {
            Some(eof) => tokens.truncate(eof + 1),
            None => {
                let end = tokens.last().map_or(Position::start(), token_end);
                tokens.push(Token::new(TokenKind::Eof, "", end));
            }
        }
        Self {
            tokens,
            cursor: 0,
            errors: Vec::new(),
            depth: 0,
        }
    }

    pub fn parse(mut self) -> ParseResult {
        let start = self.peek().pos;
        let mut elements = Vec::new();

        loop {
            elements.extend(self.parse_sequence(never));
            if self.peek().kind == TokenKind::Eof {
                break;
            }
            // Only a stray '}' stops a top-level sequence short of EOF.
            let token = self.next();
            self.error("unexpected '}'", token.pos);
        }

        log::debug!(
            "parsed {} top-level nodes from {} tokens ({} errors)",
            elements.len(),
            self.tokens.len(),
            self.errors.len()
        );

        ParseResult {
            root: ExpressionNode::new(start, elements),
            errors: self.errors,
        }
    }

    /// Next non-space token. Spaces are consumed on the way.
    fn peek(&mut self) -> &Token {
        while self.tokens[self.cursor].kind == TokenKind::Space {
            self.cursor += 1;
        }
        &self.tokens[self.cursor]
    }

    fn peek_kind(&mut self) -> TokenKind {
        self.peek().kind
    }

    /// Consumes the next non-space token. The cursor stays on `EOF` forever.
    fn next(&mut self) -> Token {
        let token = self.peek().clone();
        if token.kind != TokenKind::Eof {
            self.cursor += 1;
        }
        token
    }

    fn error(&mut self, message: impl Into<String>, position: Position) {
        self.errors.push(ParseError {
            message: message.into(),
            position,
        });
    }

    /// Parses terms until `EOF`, `}` or `stop`.
    fn parse_sequence(&mut self, stop: Stop) -> Vec<Node> {
        let mut elements = Vec::new();
        loop {
            let token = self.peek();
            if matches!(token.kind, TokenKind::Eof | TokenKind::RBrace) || stop(token) {
                break;
            }

            let before = self.cursor;
            if let Some(node) = self.parse_term(Precedence::Lowest) {
                elements.push(node);
            }
            if self.cursor == before {
                let skipped = self.next();
                log::trace!("skipping {skipped} at {}", skipped.pos);
            }
        }
        elements
    }

    /// Parses a sequence; a single term comes back as itself, anything else
    /// as an (possibly empty) expression.
    fn parse_expression(&mut self, stop: Stop) -> Node {
        let start = self.peek().pos;
        let mut elements = self.parse_sequence(stop);
        if elements.len() == 1 {
            if let Some(only) = elements.pop() {
                return only;
            }
        }
        Node::Expression(ExpressionNode::new(start, elements))
    }

    /// One prefix term followed by every infix operator binding tighter than `min`.
    ///
    /// Past [`MAX_DEPTH`] nothing is consumed; the caller skips the token.
    fn parse_term(&mut self, min: Precedence) -> Option<Node> {
        if self.depth >= MAX_DEPTH {
            let pos = self.peek().pos;
            self.error("nesting too deep", pos);
            return None;
        }

        self.depth += 1;
        let term = self.parse_scripted(min);
        self.depth -= 1;
        term
    }

    fn parse_scripted(&mut self, min: Precedence) -> Option<Node> {
        let mut left = self.parse_prefix()?;
        // Scripts fold left, so each one adds a level to the tree.
        let mut scripts = 0;
        while precedence(self.peek_kind()) > min {
            if self.depth + scripts >= MAX_DEPTH {
                let pos = self.peek().pos;
                self.error("nesting too deep", pos);
                break;
            }
            left = self.parse_script(left);
            scripts += 1;
        }
        Some(left)
    }

    fn parse_prefix(&mut self) -> Option<Node> {
        let token = self.peek().clone();
        let node: Node = match token.kind {
            TokenKind::LBrace => return self.parse_grouped_strict(),
            TokenKind::Command => return self.parse_command(),
            TokenKind::Symbol => SymbolNode::new(token.value, token.pos).into(),
            TokenKind::Number => NumberNode::new(token.value, token.pos).into(),
            TokenKind::Space => SpaceNode::new(token.value, token.pos).into(),
            TokenKind::Operator => OperatorNode::new(token.value, token.pos).into(),
            TokenKind::Delimiter => DelimiterNode::new(token.value, token.pos).into(),
            _ => {
                self.error(format!("no prefix token: {}", token.value), token.pos);
                return None;
            }
        };
        self.next();
        Some(node)
    }

    /// `base^arg` or `base_arg`. A missing argument leaves `base` unchanged.
    fn parse_script(&mut self, base: Node) -> Node {
        let operator = self.next();
        let start = base.pos();
        let Some(argument) = self.parse_grouped_or_single() else {
            return base;
        };

        if operator.kind == TokenKind::Superscript {
            Node::Superscript(SuperscriptNode {
                start,
                base: Box::new(base),
                exponent: Box::new(argument),
            })
        } else {
            Node::Subscript(SubscriptNode {
                start,
                base: Box::new(base),
                subscript: Box::new(argument),
            })
        }
    }

    /// `{ ... }`. Without an opening brace nothing is consumed.
    fn parse_grouped_strict(&mut self) -> Option<Node> {
        let open = self.peek();
        if open.kind != TokenKind::LBrace {
            let pos = open.pos;
            self.error("expected '{'", pos);
            return None;
        }
        self.next();

        let inner = self.parse_expression(never);

        let close = self.peek();
        if close.kind == TokenKind::RBrace {
            self.next();
        } else {
            let pos = close.pos;
            self.error("expected '}'", pos);
        }
        Some(inner)
    }

    fn parse_grouped_or_single(&mut self) -> Option<Node> {
        if self.peek_kind() == TokenKind::LBrace {
            self.parse_grouped_strict()
        } else {
            self.parse_term(Precedence::Highest)
        }
    }

    /// `[ ... ]`, or `None` when no `[` follows.
    fn parse_optional_argument(&mut self) -> Option<Node> {
        if !self.peek().is_delimiter("[") {
            return None;
        }
        self.next();

        let inner = self.parse_expression(at_right_bracket);

        let close = self.peek();
        if close.is_delimiter("]") {
            self.next();
        } else {
            let pos = close.pos;
            self.error("expected ']'", pos);
        }
        Some(inner)
    }

    /// Any number of `^`/`_` limits in any order, as `(lower, upper)`. The
    /// first value given for a slot wins.
    fn parse_limits(&mut self) -> (Option<Node>, Option<Node>) {
        let mut lower = None;
        let mut upper = None;

        loop {
            let token = self.peek();
            let (slot, which) = match token.kind {
                TokenKind::Superscript => (&mut upper, "upper"),
                TokenKind::Subscript => (&mut lower, "lower"),
                _ => break,
            };
            let pos = token.pos;
            self.next();

            if slot.is_some() {
                self.error(format!("duplicate {which} limit"), pos);
                let _ = self.parse_grouped_or_single();
            } else {
                *slot = self.parse_grouped_or_single();
            }
        }

        (lower, upper)
    }
}

/// Position just past `token`, for synthesizing a trailing `EOF`.
fn token_end(token: &Token) -> Position {
    match token.kind {
        TokenKind::Command => token.pos.advance('\\').advance_str(&token.value),
        _ => token.pos.advance_str(&token.value),
    }
}

/// `None` for an empty expression, the node otherwise.
fn non_empty(node: Node) -> Option<Node> {
    match node {
        Node::Expression(expr) if expr.is_empty() => None,
        node => Some(node),
    }
}

/// Tokenizes and parses `input` in one go.
pub fn parse(input: &str) -> ParseResult {
    Parser::new(tokenize_str(input)).parse()
}
