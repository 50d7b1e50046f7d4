use crate::ast::*;

/// Walks a syntax tree.
///
/// Every method has a default that recurses into the node's children
/// left-to-right, depth-first, through the matching `walk_*` function. A
/// visitor overrides the methods it cares about and calls `walk_*` itself when
/// it still wants the recursion.
///
/// ```
/// use texmax_syntax::{parse, SymbolNode, Visitor};
///
/// #[derive(Default)]
/// struct Symbols(Vec<String>);
///
/// impl Visitor for Symbols {
///     fn visit_symbol(&mut self, node: &SymbolNode) {
///         self.0.push(node.value.clone());
///     }
/// }
///
/// let result = parse(r"\frac{a}{b} + c");
/// let mut symbols = Symbols::default();
/// result.root.accept(&mut symbols);
/// assert_eq!(symbols.0, ["a", "b", "c"]);
/// ```
pub trait Visitor {
    fn visit_expression(&mut self, node: &ExpressionNode) {
        walk_expression(self, node);
    }

    fn visit_delimited(&mut self, node: &DelimitedExpressionNode) {
        walk_delimited(self, node);
    }

    fn visit_symbol(&mut self, _node: &SymbolNode) {}

    fn visit_number(&mut self, _node: &NumberNode) {}

    fn visit_operator(&mut self, _node: &OperatorNode) {}

    fn visit_space(&mut self, _node: &SpaceNode) {}

    fn visit_delimiter(&mut self, _node: &DelimiterNode) {}

    fn visit_function(&mut self, _node: &NonArgumentFunctionNode) {}

    fn visit_superscript(&mut self, node: &SuperscriptNode) {
        walk_superscript(self, node);
    }

    fn visit_subscript(&mut self, node: &SubscriptNode) {
        walk_subscript(self, node);
    }

    fn visit_fraction(&mut self, node: &FractionNode) {
        walk_fraction(self, node);
    }

    fn visit_limited_operator(&mut self, node: &LimitedOperatorNode) {
        walk_limited_operator(self, node);
    }

    fn visit_sqrt(&mut self, node: &SqrtNode) {
        walk_sqrt(self, node);
    }

    fn visit_binom(&mut self, node: &BinomNode) {
        walk_binom(self, node);
    }

    fn visit_matrix(&mut self, node: &MatrixNode) {
        walk_matrix(self, node);
    }
}

impl Node {
    /// Dispatches to the visitor method for this node's variant.
    pub fn accept<V: Visitor + ?Sized>(&self, visitor: &mut V) {
        match self {
            Node::Expression(n) => visitor.visit_expression(n),
            Node::Delimited(n) => visitor.visit_delimited(n),
            Node::Symbol(n) => visitor.visit_symbol(n),
            Node::Number(n) => visitor.visit_number(n),
            Node::Operator(n) => visitor.visit_operator(n),
            Node::Space(n) => visitor.visit_space(n),
            Node::Delimiter(n) => visitor.visit_delimiter(n),
            Node::Function(n) => visitor.visit_function(n),
            Node::Superscript(n) => visitor.visit_superscript(n),
            Node::Subscript(n) => visitor.visit_subscript(n),
            Node::Fraction(n) => visitor.visit_fraction(n),
            Node::LimitedOperator(n) => visitor.visit_limited_operator(n),
            Node::Sqrt(n) => visitor.visit_sqrt(n),
            Node::Binom(n) => visitor.visit_binom(n),
            Node::Matrix(n) => visitor.visit_matrix(n),
        }
    }
}

impl ExpressionNode {
    pub fn accept<V: Visitor + ?Sized>(&self, visitor: &mut V) {
        visitor.visit_expression(self);
    }
}

pub fn walk_expression<V: Visitor + ?Sized>(visitor: &mut V, node: &ExpressionNode) {
    for element in &node.elements {
        element.accept(visitor);
    }
}

pub fn walk_delimited<V: Visitor + ?Sized>(visitor: &mut V, node: &DelimitedExpressionNode) {
    visitor.visit_delimiter(&node.left);
    if let Some(content) = &node.content {
        content.accept(visitor);
    }
    visitor.visit_delimiter(&node.right);
}

pub fn walk_superscript<V: Visitor + ?Sized>(visitor: &mut V, node: &SuperscriptNode) {
    node.base.accept(visitor);
    node.exponent.accept(visitor);
}

pub fn walk_subscript<V: Visitor + ?Sized>(visitor: &mut V, node: &SubscriptNode) {
    node.base.accept(visitor);
    node.subscript.accept(visitor);
}

pub fn walk_fraction<V: Visitor + ?Sized>(visitor: &mut V, node: &FractionNode) {
    node.numerator.accept(visitor);
    node.denominator.accept(visitor);
}

/// Visits the lower limit before the upper one.
pub fn walk_limited_operator<V: Visitor + ?Sized>(visitor: &mut V, node: &LimitedOperatorNode) {
    if let Some(lower) = &node.lower {
        lower.accept(visitor);
    }
    if let Some(upper) = &node.upper {
        upper.accept(visitor);
    }
}

/// Visits the index (if any) before the radicand, matching source order.
pub fn walk_sqrt<V: Visitor + ?Sized>(visitor: &mut V, node: &SqrtNode) {
    if let Some(index) = &node.index {
        index.accept(visitor);
    }
    node.radicand.accept(visitor);
}

pub fn walk_binom<V: Visitor + ?Sized>(visitor: &mut V, node: &BinomNode) {
    node.upper.accept(visitor);
    node.lower.accept(visitor);
}

/// Row-major.
pub fn walk_matrix<V: Visitor + ?Sized>(visitor: &mut V, node: &MatrixNode) {
    for cell in node.rows.iter().flatten() {
        cell.accept(visitor);
    }
}
