use texmax_syntax::symbols::{delimiter_command, greek_command};
use texmax_syntax::{
    BinomNode, DelimitedExpressionNode, DelimiterNode, ExpressionNode, FractionNode,
    LimitedOperatorNode, MatrixNode, Node, NonArgumentFunctionNode, NumberNode, OperatorNode,
    SpaceNode, SqrtNode, SubscriptNode, SuperscriptNode, SymbolNode, Visitor,
};

/// Writes a tree back out as LaTeX.
///
/// The output is normalized rather than faithful: elements are separated by
/// single spaces, every argument is braced and Greek letters and named
/// delimiters are spelled as commands. Parsing the output of a well-formed
/// tree gives back the same tree shape.
#[derive(Debug, Default)]
pub struct LatexWriter {
    out: String,
}

/// How a delimiter is written after `\left`/`\right` or on its own.
fn delimiter_text(value: &str) -> String {
    match value {
        "(" | ")" | "[" | "]" | "|" | "." => value.to_string(),
        _ => match delimiter_command(value) {
            Some(command) => format!("\\{command}"),
            None => value.to_string(),
        },
    }
}

/// Whether writing `node` leaves a `]` outside of any braces, which would
/// close an enclosing optional argument.
fn exposes_right_bracket(node: &Node) -> bool {
    match node {
        Node::Delimiter(delimiter) => delimiter.value == "]",
        Node::Superscript(script) => exposes_right_bracket(&script.base),
        Node::Subscript(script) => exposes_right_bracket(&script.base),
        _ => false,
    }
}

impl LatexWriter {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn finish(self) -> String {
        self.out
    }

    /// Writes `nodes` separated by spaces, without surrounding braces.
    pub fn write_elements(&mut self, nodes: &[Node]) {
        for (i, node) in nodes.iter().enumerate() {
            if i > 0 {
                self.out.push(' ');
            }
            node.accept(self);
        }
    }

    /// Writes `node` without braces even when it is an expression.
    fn write_inner(&mut self, node: &Node) {
        match node {
            Node::Expression(expr) => self.write_elements(&expr.elements),
            other => other.accept(self),
        }
    }

    fn write_group(&mut self, node: &Node) {
        self.out.push('{');
        self.write_inner(node);
        self.out.push('}');
    }

    /// Script base. A bare limited operator would take the script as a limit.
    fn write_base(&mut self, node: &Node) {
        match node {
            Node::LimitedOperator(_) => self.write_group(node),
            other => other.accept(self),
        }
    }

    fn write_command(&mut self, name: &str) {
        self.out.push('\\');
        self.out.push_str(name);
    }
}

impl Visitor for LatexWriter {
    /// Reached only for nested expressions, which came from braces.
    fn visit_expression(&mut self, node: &ExpressionNode) {
        self.out.push('{');
        self.write_elements(&node.elements);
        self.out.push('}');
    }

    fn visit_delimited(&mut self, node: &DelimitedExpressionNode) {
        self.write_command("left");
        self.out.push_str(&delimiter_text(&node.left.value));
        if let Some(content) = &node.content {
            self.out.push(' ');
            self.write_inner(content);
        }
        self.out.push(' ');
        self.write_command("right");
        self.out.push_str(&delimiter_text(&node.right.value));
    }

    fn visit_symbol(&mut self, node: &SymbolNode) {
        match greek_command(&node.value) {
            Some(command) => self.write_command(command),
            None => self.out.push_str(&node.value),
        }
    }

    fn visit_number(&mut self, node: &NumberNode) {
        self.out.push_str(&node.value);
    }

    fn visit_operator(&mut self, node: &OperatorNode) {
        self.out.push_str(&node.value);
    }

    fn visit_space(&mut self, node: &SpaceNode) {
        self.out.push_str(&node.value);
    }

    fn visit_delimiter(&mut self, node: &DelimiterNode) {
        self.out.push_str(&delimiter_text(&node.value));
    }

    fn visit_function(&mut self, node: &NonArgumentFunctionNode) {
        self.write_command(&node.name);
    }

    fn visit_superscript(&mut self, node: &SuperscriptNode) {
        self.write_base(&node.base);
        self.out.push('^');
        self.write_group(&node.exponent);
    }

    fn visit_subscript(&mut self, node: &SubscriptNode) {
        self.write_base(&node.base);
        self.out.push('_');
        self.write_group(&node.subscript);
    }

    fn visit_fraction(&mut self, node: &FractionNode) {
        self.write_command("frac");
        self.write_group(&node.numerator);
        self.write_group(&node.denominator);
    }

    fn visit_limited_operator(&mut self, node: &LimitedOperatorNode) {
        self.write_command(&node.operator);
        if let Some(lower) = &node.lower {
            self.out.push('_');
            self.write_group(lower);
        }
        if let Some(upper) = &node.upper {
            self.out.push('^');
            self.write_group(upper);
        }
    }

    fn visit_sqrt(&mut self, node: &SqrtNode) {
        self.write_command("sqrt");
        if let Some(index) = &node.index {
            let braced = match &**index {
                Node::Expression(expr) => expr.elements.iter().any(exposes_right_bracket),
                other => exposes_right_bracket(other),
            };
            self.out.push('[');
            if braced {
                self.write_group(index);
            } else {
                self.write_inner(index);
            }
            self.out.push(']');
        }
        self.write_group(&node.radicand);
    }

    fn visit_binom(&mut self, node: &BinomNode) {
        self.write_command("binom");
        self.write_group(&node.upper);
        self.write_group(&node.lower);
    }

    fn visit_matrix(&mut self, node: &MatrixNode) {
        self.out.push_str("\\begin{matrix}");
        for (r, row) in node.rows.iter().enumerate() {
            self.out.push_str(if r == 0 { " " } else { " \\\\ " });
            for (c, cell) in row.iter().enumerate() {
                if c > 0 {
                    self.out.push_str(" & ");
                }
                self.write_inner(cell);
            }
        }
        self.out.push_str(" \\end{matrix}");
    }
}

/// Serializes the tree under `root` as LaTeX source.
pub fn to_latex(root: &ExpressionNode) -> String {
    let mut writer = LatexWriter::new();
    writer.write_elements(&root.elements);
    writer.finish()
}
