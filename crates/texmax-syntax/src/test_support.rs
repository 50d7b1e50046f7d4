//! Compact s-expression rendering of trees, for assertions.

use crate::ast::{ExpressionNode, Node};

fn optional(node: Option<&Node>) -> String {
    node.map_or_else(|| "_".to_string(), sexp)
}

fn expression(expr: &ExpressionNode) -> String {
    let inner: Vec<String> = expr.elements.iter().map(sexp).collect();
    format!("[{}]", inner.join(" "))
}

pub(crate) fn sexp_root(root: &ExpressionNode) -> String {
    expression(root)
}

pub(crate) fn sexp(node: &Node) -> String {
    match node {
        Node::Expression(n) => expression(n),
        Node::Symbol(n) => n.value.clone(),
        Node::Number(n) => n.value.clone(),
        Node::Operator(n) => n.value.clone(),
        Node::Space(n) => format!("space({})", n.value),
        Node::Delimiter(n) => format!("'{}'", n.value),
        Node::Function(n) => format!("\\{}", n.name),
        Node::Superscript(n) => format!("(^ {} {})", sexp(&n.base), sexp(&n.exponent)),
        Node::Subscript(n) => format!("(_ {} {})", sexp(&n.base), sexp(&n.subscript)),
        Node::Fraction(n) => format!("(frac {} {})", sexp(&n.numerator), sexp(&n.denominator)),
        Node::Binom(n) => format!("(binom {} {})", sexp(&n.upper), sexp(&n.lower)),
        Node::LimitedOperator(n) => format!(
            "({} {} {})",
            n.operator,
            optional(n.lower.as_deref()),
            optional(n.upper.as_deref())
        ),
        Node::Sqrt(n) => match &n.index {
            Some(index) => format!("(sqrt[{}] {})", sexp(index), sexp(&n.radicand)),
            None => format!("(sqrt {})", sexp(&n.radicand)),
        },
        Node::Delimited(n) => format!(
            "(left '{}' {} '{}')",
            n.left.value,
            optional(n.content.as_deref()),
            n.right.value
        ),
        Node::Matrix(n) => {
            let mut out = String::from("(matrix");
            for row in &n.rows {
                let cells: Vec<String> = row.iter().map(sexp).collect();
                out.push_str(&format!(" [{}]", cells.join(" ")));
            }
            out.push(')');
            out
        }
    }
}
