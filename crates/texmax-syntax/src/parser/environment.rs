use super::{Parser, at_cell_boundary};
use crate::{Position, TokenKind};
use crate::ast::{MatrixNode, Node};

/// Environment name spelled by a `{...}` group: the concatenated letters.
fn environment_name(node: &Node) -> String {
    match node {
        Node::Symbol(symbol) => symbol.value.clone(),
        Node::Expression(expr) => expr
            .elements
            .iter()
            .filter_map(|element| match element {
                Node::Symbol(symbol) => Some(symbol.value.as_str()),
                _ => None,
            })
            .collect(),
        _ => String::new(),
    }
}

impl Parser {
    /// `\begin{name} ... \end{name}`; the `\begin` token is already consumed.
    pub(super) fn parse_environment(&mut self, start: Position) -> Option<Node> {
        let name = self
            .parse_grouped_strict()
            .map(|group| environment_name(&group))
            .unwrap_or_default();

        if name.is_empty() {
            self.error("empty environment name", start);
            return None;
        }
        if name != "matrix" {
            self.error(format!("unsupported environment: {name}"), start);
            return None;
        }

        let matrix = Node::Matrix(self.parse_matrix(start));

        let end = self.peek();
        if !end.is_command("end") {
            let pos = end.pos;
            self.error(format!(r"expected \end{{{name}}}"), pos);
            return Some(matrix);
        }
        let end_pos = end.pos;
        self.next();

        let end_name = self
            .parse_grouped_strict()
            .map(|group| environment_name(&group))
            .unwrap_or_default();
        if end_name != name {
            self.error(
                format!(r"environment name mismatch: expected \end{{{name}}}, got \end{{{end_name}}}"),
                end_pos,
            );
        }

        Some(matrix)
    }

    /// Rows of `&`-separated cells, rows separated by `\\`. Stops in front of
    /// `\end`, `}` or the end of input.
    fn parse_matrix(&mut self, start: Position) -> MatrixNode {
        let mut rows: Vec<Vec<Node>> = Vec::new();
        let mut row = Vec::new();
        let mut columns = None;

        loop {
            if row.is_empty() {
                let token = self.peek();
                if token.is_command("end") || token.kind == TokenKind::Eof {
                    break;
                }
            }

            row.push(self.parse_expression(at_cell_boundary));

            let token = self.peek();
            let (kind, separator) = (token.kind, token.pos);
            match kind {
                TokenKind::Ampersand => {
                    self.next();
                }
                TokenKind::Backslash => {
                    self.next();
                    if self.peek().is_command("end") {
                        self.error(r"invalid row separator before \end", separator);
                    }
                    self.close_row(&mut rows, std::mem::take(&mut row), &mut columns);
                }
                _ => break,
            }
        }

        if !row.is_empty() {
            self.close_row(&mut rows, row, &mut columns);
        }

        MatrixNode { start, rows }
    }

    /// Appends `row`, checking its width against the first row's.
    fn close_row(&mut self, rows: &mut Vec<Vec<Node>>, row: Vec<Node>, columns: &mut Option<usize>) {
        let width = row.len();
        let number = rows.len() + 1;

        match *columns {
            None => *columns = Some(width),
            Some(expected) if width != expected => {
                let amount = if width > expected { "many" } else { "few" };
                let pos = row.first().map_or(self.peek().pos, Node::pos);
                self.error(
                    format!("row {number} has too {amount} columns ({width} instead of {expected})"),
                    pos,
                );
            }
            Some(_) => {}
        }

        rows.push(row);
    }
}

#[cfg(test)]
mod tests {
    use crate::parse;
    use crate::test_support::sexp_root;

    fn messages(input: &str) -> Vec<String> {
        parse(input).errors.into_iter().map(|e| e.message).collect()
    }

    #[test]
    fn test_square_matrix() {
        let result = parse(r"\begin{matrix} a & b \\ c & d \end{matrix}");
        assert!(result.is_ok(), "{:?}", result.errors);
        assert_eq!(sexp_root(&result.root), "[(matrix [a b] [c d])]");
    }

    #[test]
    fn test_short_row() {
        let input = r"\begin{matrix} a & b \\ c \end{matrix}";
        let result = parse(input);
        assert_eq!(sexp_root(&result.root), "[(matrix [a b] [c])]");
        assert_eq!(messages(input), ["row 2 has too few columns (1 instead of 2)"]);
    }

    #[test]
    fn test_long_row() {
        let input = r"\begin{matrix} a \\ b & c \end{matrix}";
        assert_eq!(messages(input), ["row 2 has too many columns (2 instead of 1)"]);
    }

    #[test]
    fn test_cells_hold_expressions() {
        let result = parse(r"\begin{matrix} x^2 & a + b \end{matrix}");
        assert!(result.is_ok());
        assert_eq!(sexp_root(&result.root), "[(matrix [(^ x 2) [a + b]])]");
    }

    #[test]
    fn test_trailing_ampersand_gives_empty_cell() {
        let result = parse(r"\begin{matrix} a & \end{matrix}");
        assert!(result.is_ok());
        assert_eq!(sexp_root(&result.root), "[(matrix [a []])]");
    }

    #[test]
    fn test_empty_matrix() {
        let result = parse(r"\begin{matrix}\end{matrix}");
        assert!(result.is_ok());
        assert_eq!(sexp_root(&result.root), "[(matrix)]");
    }

    #[test]
    fn test_row_separator_before_end() {
        let input = r"\begin{matrix} a \\ \end{matrix}";
        let result = parse(input);
        assert_eq!(sexp_root(&result.root), "[(matrix [a])]");
        assert_eq!(messages(input), [r"invalid row separator before \end"]);
    }

    #[test]
    fn test_missing_end() {
        let input = r"\begin{matrix} a & b";
        let result = parse(input);
        assert_eq!(sexp_root(&result.root), "[(matrix [a b])]");
        assert_eq!(messages(input), [r"expected \end{matrix}"]);
    }

    #[test]
    fn test_name_mismatch_is_not_fatal() {
        let input = r"\begin{matrix} a \end{pmatrix} b";
        let result = parse(input);
        assert_eq!(sexp_root(&result.root), "[(matrix [a]) b]");
        assert_eq!(messages(input), [
            r"environment name mismatch: expected \end{matrix}, got \end{pmatrix}"
        ]);
    }

    #[test]
    fn test_unsupported_environment() {
        assert_eq!(messages(r"\begin{cases}\end{cases}"), [
            "unsupported environment: cases",
            r"unexpected \end without matching \begin",
        ]);
    }

    #[test]
    fn test_empty_name() {
        assert_eq!(messages(r"\begin{}"), ["empty environment name"]);
        assert_eq!(messages(r"\begin x"), ["expected '{'", "empty environment name"]);
    }

    #[test]
    fn test_nested_matrix_in_group() {
        let result = parse(r"\left( \begin{matrix} 1 & 0 \\ 0 & 1 \end{matrix} \right)");
        assert!(result.is_ok(), "{:?}", result.errors);
        assert_eq!(sexp_root(&result.root), "[(left '(' (matrix [1 0] [0 1]) ')')]");
    }

    #[test]
    fn test_stray_end() {
        let result = parse(r"a \end{matrix}");
        assert_eq!(sexp_root(&result.root), "[a]");
        assert_eq!(result.errors.len(), 1);
    }
}
