//! Syntax tree produced by the parser.
//!
//! The tree is a closed [`Node`] enum. Every composite owns its children, so
//! dropping the root releases the whole tree. Each node knows where it starts
//! ([`Node::pos`]) and where it ends ([`Node::end`]); traversal goes through
//! [`Node::accept`] and the [`Visitor`](crate::Visitor) trait.

use crate::Position;
use serde::Serialize;

/// Any node of the syntax tree.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "type")]
pub enum Node {
    Expression(ExpressionNode),
    Delimited(DelimitedExpressionNode),
    Symbol(SymbolNode),
    Number(NumberNode),
    Operator(OperatorNode),
    Space(SpaceNode),
    Delimiter(DelimiterNode),
    Function(NonArgumentFunctionNode),
    Superscript(SuperscriptNode),
    Subscript(SubscriptNode),
    Fraction(FractionNode),
    LimitedOperator(LimitedOperatorNode),
    Sqrt(SqrtNode),
    Binom(BinomNode),
    Matrix(MatrixNode),
}

impl Node {
    /// Position of the node's first character.
    pub fn pos(&self) -> Position {
        match self {
            Node::Expression(n) => n.start,
            Node::Delimited(n) => n.start,
            Node::Symbol(n) => n.start,
            Node::Number(n) => n.start,
            Node::Operator(n) => n.start,
            Node::Space(n) => n.start,
            Node::Delimiter(n) => n.start,
            Node::Function(n) => n.start,
            Node::Superscript(n) => n.start,
            Node::Subscript(n) => n.start,
            Node::Fraction(n) => n.start,
            Node::LimitedOperator(n) => n.start,
            Node::Sqrt(n) => n.start,
            Node::Binom(n) => n.start,
            Node::Matrix(n) => n.start,
        }
    }

    /// Position just past the node's last character.
    pub fn end(&self) -> Position {
        match self {
            Node::Expression(n) => n.end(),
            Node::Delimited(n) => n.right.end(),
            Node::Symbol(n) => n.end(),
            Node::Number(n) => n.end(),
            Node::Operator(n) => n.end(),
            Node::Space(n) => n.end(),
            Node::Delimiter(n) => n.end(),
            Node::Function(n) => command_end(n.start, &n.name),
            Node::Superscript(n) => n.exponent.end(),
            Node::Subscript(n) => n.subscript.end(),
            Node::Fraction(n) => n.denominator.end(),
            Node::LimitedOperator(n) => n.end(),
            Node::Sqrt(n) => n.radicand.end(),
            Node::Binom(n) => n.lower.end(),
            Node::Matrix(n) => n.end(),
        }
    }

    /// Short variant name, as used in tree dumps.
    pub fn kind_name(&self) -> &'static str {
        match self {
            Node::Expression(_) => "Expression",
            Node::Delimited(_) => "DelimitedExpression",
            Node::Symbol(_) => "Symbol",
            Node::Number(_) => "Number",
            Node::Operator(_) => "Operator",
            Node::Space(_) => "Space",
            Node::Delimiter(_) => "Delimiter",
            Node::Function(_) => "NonArgumentFunction",
            Node::Superscript(_) => "Superscript",
            Node::Subscript(_) => "Subscript",
            Node::Fraction(_) => "Fraction",
            Node::LimitedOperator(_) => "LimitedOperator",
            Node::Sqrt(_) => "Sqrt",
            Node::Binom(_) => "Binom",
            Node::Matrix(_) => "Matrix",
        }
    }
}

/// End of a `\name` command starting at `start`.
fn command_end(start: Position, name: &str) -> Position {
    start.advance('\\').advance_str(name)
}

/// Ordered sequence of nodes. The parse root is always one of these.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ExpressionNode {
    pub start: Position,
    pub elements: Vec<Node>,
}

impl ExpressionNode {
    pub fn new(start: Position, elements: Vec<Node>) -> Self {
        Self { start, elements }
    }

    pub fn end(&self) -> Position {
        self.elements.last().map_or(self.start, Node::end)
    }

    pub fn is_empty(&self) -> bool {
        self.elements.is_empty()
    }
}

macro_rules! text_node {
    ($(#[$meta:meta])* $name:ident => $variant:ident) => {
        $(#[$meta])*
        #[derive(Debug, Clone, PartialEq, Serialize)]
        pub struct $name {
            pub start: Position,
            pub value: String,
        }

        impl $name {
            pub fn new(value: impl Into<String>, start: Position) -> Self {
                Self {
                    start,
                    value: value.into(),
                }
            }

            pub fn end(&self) -> Position {
                self.start.advance_str(&self.value)
            }
        }

        impl From<$name> for Node {
            fn from(node: $name) -> Self {
                Node::$variant(node)
            }
        }
    };
}

text_node!(
    /// A single letter; Greek commands resolve to their Unicode letter.
    SymbolNode => Symbol
);
text_node!(
    /// A run of digits.
    NumberNode => Number
);
text_node!(
    /// `+ - * / =`
    OperatorNode => Operator
);
text_node!(
    /// An explicit spacing command such as `\,` or `\quad`. The value is the
    /// command's source text.
    SpaceNode => Space
);
text_node!(
    /// A delimiter character, canonicalized (`\langle` becomes `⟨`). An empty
    /// delimiter from `\left.` has the value `.`.
    DelimiterNode => Delimiter
);

impl From<ExpressionNode> for Node {
    fn from(node: ExpressionNode) -> Self {
        Node::Expression(node)
    }
}

/// `\left<d> content \right<d>`
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DelimitedExpressionNode {
    pub start: Position,
    pub left: DelimiterNode,
    pub content: Option<Box<Node>>,
    pub right: DelimiterNode,
}

/// Function names such as `\sin` that take no braced argument.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct NonArgumentFunctionNode {
    pub start: Position,
    pub name: String,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SuperscriptNode {
    pub start: Position,
    pub base: Box<Node>,
    pub exponent: Box<Node>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SubscriptNode {
    pub start: Position,
    pub base: Box<Node>,
    pub subscript: Box<Node>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FractionNode {
    pub start: Position,
    pub numerator: Box<Node>,
    pub denominator: Box<Node>,
}

/// Big operators (`\int`, `\sum`, `\prod`, `\lim`) with optional limits.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct LimitedOperatorNode {
    pub start: Position,
    pub operator: String,
    pub lower: Option<Box<Node>>,
    pub upper: Option<Box<Node>>,
}

impl LimitedOperatorNode {
    /// End of whichever limit comes last in the source, or of the operator
    /// name when there are none.
    pub fn end(&self) -> Position {
        let lower = self.lower.as_ref().map(|n| n.end());
        let upper = self.upper.as_ref().map(|n| n.end());
        match (lower, upper) {
            (Some(l), Some(u)) => l.max(u),
            (Some(end), None) | (None, Some(end)) => end,
            (None, None) => command_end(self.start, &self.operator),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SqrtNode {
    pub start: Position,
    pub radicand: Box<Node>,
    pub index: Option<Box<Node>>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BinomNode {
    pub start: Position,
    pub upper: Box<Node>,
    pub lower: Box<Node>,
}

/// `\begin{matrix} ... \end{matrix}`; rows may have differing lengths when
/// the input was malformed.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MatrixNode {
    pub start: Position,
    pub rows: Vec<Vec<Node>>,
}

impl MatrixNode {
    pub fn end(&self) -> Position {
        self.rows
            .last()
            .and_then(|row| row.last())
            .map_or(self.start, Node::end)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn at(offset: usize) -> Position {
        Position::new(offset, 1, offset + 1)
    }

    #[test]
    fn test_text_node_end() {
        let node = Node::from(NumberNode::new("123", at(4)));
        assert_eq!(node.pos(), at(4));
        assert_eq!(node.end(), at(7));
    }

    #[test]
    fn test_function_end_counts_backslash() {
        let node = Node::Function(NonArgumentFunctionNode {
            start: at(0),
            name: "sin".into(),
        });
        assert_eq!(node.end(), at(4));
    }

    #[test]
    fn test_empty_expression_ends_at_start() {
        let expr = ExpressionNode::new(at(3), vec![]);
        assert!(expr.is_empty());
        assert_eq!(expr.end(), at(3));
    }

    #[test]
    fn test_limited_operator_end_uses_later_limit() {
        // \int^{b}_{a}: the lower limit comes last.
        let node = LimitedOperatorNode {
            start: at(0),
            operator: "int".into(),
            upper: Some(Box::new(SymbolNode::new("b", at(6)).into())),
            lower: Some(Box::new(SymbolNode::new("a", at(11)).into())),
        };
        assert_eq!(node.end(), at(12));

        let bare = LimitedOperatorNode {
            start: at(0),
            operator: "sum".into(),
            lower: None,
            upper: None,
        };
        assert_eq!(bare.end(), at(4));
    }

    #[test]
    fn test_matrix_end() {
        let matrix = MatrixNode {
            start: at(0),
            rows: vec![
                vec![SymbolNode::new("a", at(15)).into()],
                vec![SymbolNode::new("c", at(22)).into()],
            ],
        };
        assert_eq!(matrix.end(), at(23));

        let empty = MatrixNode {
            start: at(0),
            rows: vec![],
        };
        assert_eq!(empty.end(), at(0));
    }

    #[test]
    fn test_serializes_with_type_tag() {
        let node = Node::from(SymbolNode::new("x", at(0)));
        let json = serde_json::to_value(&node).unwrap();
        assert_eq!(json["type"], "Symbol");
        assert_eq!(json["value"], "x");
        assert_eq!(json["start"]["column"], 1);
    }
}
