use texmax_syntax::{
    BinomNode, DelimitedExpressionNode, DelimiterNode, ExpressionNode, FractionNode,
    LimitedOperatorNode, MatrixNode, Node, NonArgumentFunctionNode, NumberNode, OperatorNode,
    Position, SpaceNode, SqrtNode, SubscriptNode, SuperscriptNode, SymbolNode, Visitor,
};

/// Controls what [`TreePrinter`] includes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TreeOptions {
    /// Append `@line:column` to every node.
    pub positions: bool,
}

impl Default for TreeOptions {
    fn default() -> Self {
        Self { positions: true }
    }
}

/// Renders a tree as an indented outline, one node per line.
///
/// Child nodes are prefixed with the role they play in their parent
/// (`numerator:`, `base:`, ...); elements of an expression are not.
pub struct TreePrinter {
    out: String,
    depth: usize,
    label: Option<&'static str>,
    options: TreeOptions,
}

impl TreePrinter {
    pub fn new(options: TreeOptions) -> Self {
        Self {
            out: String::new(),
            depth: 0,
            label: None,
            options,
        }
    }

    pub fn finish(self) -> String {
        self.out
    }

    fn indent(&mut self) {
        for _ in 0..self.depth {
            self.out.push_str("  ");
        }
    }

    fn line(&mut self, kind: &str, value: Option<&str>, pos: Position) {
        self.indent();
        if let Some(label) = self.label.take() {
            self.out.push_str(label);
            self.out.push_str(": ");
        }
        self.out.push_str(kind);
        if let Some(value) = value {
            self.out.push_str(&format!(" {value:?}"));
        }
        if self.options.positions {
            self.out.push_str(&format!(" @{pos}"));
        }
        self.out.push('\n');
    }

    fn child(&mut self, label: &'static str, node: &Node) {
        self.depth += 1;
        self.label = Some(label);
        node.accept(self);
        self.depth -= 1;
    }

    fn optional_child(&mut self, label: &'static str, node: Option<&Node>) {
        if let Some(node) = node {
            self.child(label, node);
        }
    }

    fn delimiter_child(&mut self, label: &'static str, node: &DelimiterNode) {
        self.depth += 1;
        self.label = Some(label);
        self.visit_delimiter(node);
        self.depth -= 1;
    }

    fn elements(&mut self, nodes: &[Node]) {
        self.depth += 1;
        for node in nodes {
            node.accept(self);
        }
        self.depth -= 1;
    }
}

impl Visitor for TreePrinter {
    fn visit_expression(&mut self, node: &ExpressionNode) {
        self.line("Expression", None, node.start);
        self.elements(&node.elements);
    }

    fn visit_delimited(&mut self, node: &DelimitedExpressionNode) {
        self.line("DelimitedExpression", None, node.start);
        self.delimiter_child("left", &node.left);
        self.optional_child("content", node.content.as_deref());
        self.delimiter_child("right", &node.right);
    }

    fn visit_symbol(&mut self, node: &SymbolNode) {
        self.line("Symbol", Some(&node.value), node.start);
    }

    fn visit_number(&mut self, node: &NumberNode) {
        self.line("Number", Some(&node.value), node.start);
    }

    fn visit_operator(&mut self, node: &OperatorNode) {
        self.line("Operator", Some(&node.value), node.start);
    }

    fn visit_space(&mut self, node: &SpaceNode) {
        self.line("Space", Some(&node.value), node.start);
    }

    fn visit_delimiter(&mut self, node: &DelimiterNode) {
        self.line("Delimiter", Some(&node.value), node.start);
    }

    fn visit_function(&mut self, node: &NonArgumentFunctionNode) {
        self.line("NonArgumentFunction", Some(&node.name), node.start);
    }

    fn visit_superscript(&mut self, node: &SuperscriptNode) {
        self.line("Superscript", None, node.start);
        self.child("base", &node.base);
        self.child("exponent", &node.exponent);
    }

    fn visit_subscript(&mut self, node: &SubscriptNode) {
        self.line("Subscript", None, node.start);
        self.child("base", &node.base);
        self.child("subscript", &node.subscript);
    }

    fn visit_fraction(&mut self, node: &FractionNode) {
        self.line("Fraction", None, node.start);
        self.child("numerator", &node.numerator);
        self.child("denominator", &node.denominator);
    }

    fn visit_limited_operator(&mut self, node: &LimitedOperatorNode) {
        self.line("LimitedOperator", Some(&node.operator), node.start);
        self.optional_child("lower", node.lower.as_deref());
        self.optional_child("upper", node.upper.as_deref());
    }

    fn visit_sqrt(&mut self, node: &SqrtNode) {
        self.line("Sqrt", None, node.start);
        self.optional_child("index", node.index.as_deref());
        self.child("radicand", &node.radicand);
    }

    fn visit_binom(&mut self, node: &BinomNode) {
        self.line("Binom", None, node.start);
        self.child("upper", &node.upper);
        self.child("lower", &node.lower);
    }

    fn visit_matrix(&mut self, node: &MatrixNode) {
        self.line("Matrix", None, node.start);
        self.depth += 1;
        for (i, row) in node.rows.iter().enumerate() {
            self.indent();
            self.out.push_str(&format!("row {}\n", i + 1));
            self.elements(row);
        }
        self.depth -= 1;
    }
}

/// Renders `root` with [`TreePrinter`].
pub fn print_tree(root: &ExpressionNode, options: TreeOptions) -> String {
    let mut printer = TreePrinter::new(options);
    root.accept(&mut printer);
    printer.finish()
}

#[cfg(test)]
mod tests {
    use super::*;
    use expect_test::expect;
    use texmax_syntax::parse;

    fn tree(input: &str) -> String {
        print_tree(&parse(input).root, TreeOptions::default())
    }

    fn bare_tree(input: &str) -> String {
        print_tree(&parse(input).root, TreeOptions { positions: false })
    }

    #[test]
    fn test_fraction_with_positions() {
        expect![[r#"
            Expression @1:1
              Fraction @1:1
                numerator: Symbol "a" @1:7
                denominator: Symbol "b" @1:10
        "#]]
        .assert_eq(&tree(r"\frac{a}{b}"));
    }

    #[test]
    fn test_scripts() {
        expect![[r#"
            Expression
              Subscript
                base: Superscript
                  base: Symbol "x"
                  exponent: Number "2"
                subscript: Number "1"
        "#]]
        .assert_eq(&bare_tree("x^2_1"));
    }

    #[test]
    fn test_sqrt_and_limits() {
        expect![[r#"
            Expression
              LimitedOperator "sum"
                lower: Expression
                  Symbol "i"
                  Operator "="
                  Number "0"
                upper: Symbol "n"
              Sqrt
                index: Number "3"
                radicand: Symbol "x"
        "#]]
        .assert_eq(&bare_tree(r"\sum_{i=0}^n \sqrt[3]{x}"));
    }

    #[test]
    fn test_delimited() {
        expect![[r#"
            Expression
              DelimitedExpression
                left: Delimiter "⟨"
                content: Symbol "ψ"
                right: Delimiter "|"
              NonArgumentFunction "sin"
              Space "\\,"
        "#]]
        .assert_eq(&bare_tree(r"\left\langle \psi \right| \sin \,"));
    }

    #[test]
    fn test_matrix() {
        expect![[r#"
            Expression
              Matrix
                row 1
                  Symbol "a"
                  Symbol "b"
                row 2
                  Symbol "c"
                  Binom
                    upper: Symbol "n"
                    lower: Symbol "k"
        "#]]
        .assert_eq(&bare_tree(
            r"\begin{matrix} a & b \\ c & \binom{n}{k} \end{matrix}",
        ));
    }

    #[test]
    fn test_empty_input() {
        expect![[r#"
            Expression @1:1
        "#]]
        .assert_eq(&tree(""));
    }
}
