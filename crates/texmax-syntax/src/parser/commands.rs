use super::{Parser, at_right_command, non_empty};
use crate::ast::{
    BinomNode, DelimitedExpressionNode, DelimiterNode, FractionNode, LimitedOperatorNode, Node,
    NonArgumentFunctionNode, SpaceNode, SqrtNode, SymbolNode,
};
use crate::symbols::{
    delimiter_value, greek_letter, is_limited_operator, is_non_argument_function,
    is_spacing_command,
};
use crate::{Position, TokenKind};

impl Parser {
    /// Consumes a `COMMAND` token and dispatches on its name.
    pub(super) fn parse_command(&mut self) -> Option<Node> {
        let token = self.next();
        let name = token.value.as_str();
        let start = token.pos;

        if is_non_argument_function(name) {
            return Some(Node::Function(NonArgumentFunctionNode {
                start,
                name: token.value,
            }));
        }
        if is_limited_operator(name) {
            return Some(self.parse_limited_operator(token.value, start));
        }
        if let Some(letter) = greek_letter(name) {
            return Some(SymbolNode::new(letter, start).into());
        }
        if is_spacing_command(name) {
            return Some(SpaceNode::new(format!("\\{name}"), start).into());
        }
        if let Some(value) = delimiter_value(name) {
            return Some(DelimiterNode::new(value, start).into());
        }

        match name {
            "frac" => self.parse_fraction(start),
            "sqrt" => self.parse_sqrt(start),
            "binom" => self.parse_binom(start),
            "left" => self.parse_delimited(start),
            "right" => {
                self.error(r"unexpected \right without matching \left", start);
                None
            }
            "begin" => self.parse_environment(start),
            "end" => {
                self.error(r"unexpected \end without matching \begin", start);
                // Drop the environment name so it does not surface as symbols.
                if self.peek_kind() == TokenKind::LBrace {
                    let _ = self.parse_grouped_strict();
                }
                None
            }
            _ => {
                self.error(format!(r"unsupported command: \{name}"), start);
                None
            }
        }
    }

    fn parse_limited_operator(&mut self, operator: String, start: Position) -> Node {
        let (lower, mut upper) = self.parse_limits();

        if operator == "lim" {
            if let Some(dropped) = upper.take() {
                self.error(r"\lim can only have a lower limit", dropped.pos());
            }
        }

        Node::LimitedOperator(LimitedOperatorNode {
            start,
            operator,
            lower: lower.map(Box::new),
            upper: upper.map(Box::new),
        })
    }

    fn parse_fraction(&mut self, start: Position) -> Option<Node> {
        let Some(numerator) = self.parse_grouped_strict() else {
            self.error(r"expected numerator after \frac", start);
            return None;
        };
        let Some(denominator) = self.parse_grouped_strict() else {
            self.error(r"expected denominator after \frac{...}", start);
            return None;
        };

        Some(Node::Fraction(FractionNode {
            start,
            numerator: Box::new(numerator),
            denominator: Box::new(denominator),
        }))
    }

    fn parse_sqrt(&mut self, start: Position) -> Option<Node> {
        let index = self.parse_optional_argument();
        let Some(radicand) = self.parse_grouped_or_single() else {
            self.error(r"expected radicand after \sqrt", start);
            return None;
        };

        Some(Node::Sqrt(SqrtNode {
            start,
            radicand: Box::new(radicand),
            index: index.map(Box::new),
        }))
    }

    fn parse_binom(&mut self, start: Position) -> Option<Node> {
        let Some(upper) = self.parse_grouped_strict() else {
            self.error(r"expected upper value after \binom", start);
            return None;
        };
        let Some(lower) = self.parse_grouped_strict() else {
            self.error(r"expected lower value after \binom{...}", start);
            return None;
        };

        Some(Node::Binom(BinomNode {
            start,
            upper: Box::new(upper),
            lower: Box::new(lower),
        }))
    }

    /// `\left<d> ... \right<d>`; the `\left` token is already consumed.
    ///
    /// When the closing half is missing or broken the content is returned on
    /// its own so that it still shows up in the tree.
    fn parse_delimited(&mut self, start: Position) -> Option<Node> {
        let Some(left) = self.parse_delimiter() else {
            let pos = self.peek().pos;
            self.error(r"expected delimiter after \left", pos);
            return None;
        };

        let content = self.parse_expression(at_right_command);

        let closing = self.peek();
        if !closing.is_command("right") {
            let pos = closing.pos;
            self.error(r"expected \right to close \left", pos);
            return non_empty(content);
        }
        self.next();

        let Some(right) = self.parse_delimiter() else {
            let pos = self.peek().pos;
            self.error(r"expected delimiter after \right", pos);
            return non_empty(content);
        };

        Some(Node::Delimited(DelimitedExpressionNode {
            start,
            left,
            content: non_empty(content).map(Box::new),
            right,
        }))
    }

    /// A literal delimiter, `.` or a named delimiter command. Consumes nothing
    /// when none of those follow.
    fn parse_delimiter(&mut self) -> Option<DelimiterNode> {
        let token = self.peek();
        let value = match token.kind {
            TokenKind::Delimiter => token.value.clone(),
            TokenKind::Period => ".".to_string(),
            TokenKind::Command => delimiter_value(&token.value)?.to_string(),
            _ => return None,
        };
        let pos = token.pos;
        self.next();
        Some(DelimiterNode::new(value, pos))
    }
}
