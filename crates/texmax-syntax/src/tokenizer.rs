use crate::{Position, Source, Token, TokenKind};

/// A tokenizer for LaTeX math source.
///
/// ## Overview
///
/// The tokenizer pulls characters from a [`Source`] and classifies them into
/// positioned [`Token`]s. It handles:
///
/// - **Commands**: `\frac`, `\alpha` (letter runs) and one-character symbol
///   commands such as `\{`, `\|`, `\,`
/// - **Row separators**: `\\` becomes a single `BACKSLASH` token
/// - **Numbers**: maximal digit runs
/// - **Symbols**: one letter per token, so `xy` is two symbols
/// - **Scripts, braces, delimiters, operators** and `&`
/// - **Whitespace**: one `SPACE` token per whitespace character; the parser
///   decides what to do with them
///
/// Anything unrecognized becomes an `ILLEGAL` token rather than an error, so
/// tokenization is total. The stream always ends with exactly one `EOF`.
///
/// ## Examples
///
/// ```
/// use texmax_syntax::{tokenize_str, TokenKind};
///
/// let tokens = tokenize_str(r"\frac{a^2}{b}");
/// let kinds: Vec<_> = tokens.iter().map(|t| t.kind).collect();
/// assert_eq!(
///     kinds,
///     vec![
///         TokenKind::Command,
///         TokenKind::LBrace,
///         TokenKind::Symbol,
///         TokenKind::Superscript,
///         TokenKind::Number,
///         TokenKind::RBrace,
///         TokenKind::LBrace,
///         TokenKind::Symbol,
///         TokenKind::RBrace,
///         TokenKind::Eof,
///     ]
/// );
/// assert_eq!(tokens[0].value, "frac");
/// ```
pub struct Tokenizer<'s> {
    source: &'s mut Source,
    /// Set once the EOF token has been handed out by the iterator.
    finished: bool,
}

impl<'s> Tokenizer<'s> {
    /// Creates a tokenizer and moves the source onto its first character.
    pub fn new(source: &'s mut Source) -> Self {
        if source.current().is_none() && !source.is_eof() {
            source.scan();
        }
        Self {
            source,
            finished: false,
        }
    }

    /// Returns the next token. Once the input is exhausted this keeps
    /// returning `EOF` tokens at the final source position.
    pub fn next_token(&mut self) -> Token {
        let Some(ch) = self.source.current() else {
            return Token::new(TokenKind::Eof, "", self.source.position());
        };
        let pos = self.source.position();

        let (kind, value) = match ch {
            c if c.is_whitespace() => {
                self.source.scan();
                (TokenKind::Space, " ".to_string())
            }
            '\\' => self.command(),
            c if c.is_ascii_digit() => (TokenKind::Number, self.take_while(|c| c.is_ascii_digit())),
            c if c.is_alphabetic() => self.single(TokenKind::Symbol, c),
            '^' => self.single(TokenKind::Superscript, ch),
            '_' => self.single(TokenKind::Subscript, ch),
            '{' => self.single(TokenKind::LBrace, ch),
            '}' => self.single(TokenKind::RBrace, ch),
            '(' | ')' | '[' | ']' | '|' => self.single(TokenKind::Delimiter, ch),
            '.' => self.single(TokenKind::Period, ch),
            '&' => self.single(TokenKind::Ampersand, ch),
            '+' | '-' | '*' | '/' | '=' => self.single(TokenKind::Operator, ch),
            _ => self.single(TokenKind::Illegal, ch),
        };

        Token::new(kind, value, pos)
    }

    /// Consumes one character and produces a token of `kind` for it.
    fn single(&mut self, kind: TokenKind, ch: char) -> (TokenKind, String) {
        self.source.scan();
        (kind, ch.to_string())
    }

    /// Handles everything introduced by a backslash.
    fn command(&mut self) -> (TokenKind, String) {
        self.source.scan(); // Skip the backslash

        match self.source.current() {
            None => (TokenKind::Illegal, "\\".to_string()),
            Some(c) if c.is_alphabetic() => (TokenKind::Command, self.take_while(char::is_alphabetic)),
            Some('\\') => {
                self.source.scan();
                (TokenKind::Backslash, "\\\\".to_string())
            }
            Some(c) if !c.is_ascii_digit() => {
                // Symbol command: \{ \} \| \, and friends
                self.source.scan();
                (TokenKind::Command, c.to_string())
            }
            Some(c) => {
                self.source.scan();
                (TokenKind::Illegal, format!("\\{c}"))
            }
        }
    }

    fn take_while(&mut self, pred: impl Fn(char) -> bool) -> String {
        let mut text = String::new();
        while let Some(c) = self.source.current() {
            if !pred(c) {
                break;
            }
            text.push(c);
            self.source.scan();
        }
        text
    }

    /// Position the next token will start at.
    pub fn position(&self) -> Position {
        self.source.position()
    }
}

impl Iterator for Tokenizer<'_> {
    type Item = Token;

    /// Yields every token including the final `EOF`, then `None`.
    fn next(&mut self) -> Option<Self::Item> {
        if self.finished {
            return None;
        }
        let token = self.next_token();
        if token.kind == TokenKind::Eof {
            self.finished = true;
        }
        Some(token)
    }
}

impl std::iter::FusedIterator for Tokenizer<'_> {}

/// Tokenizes the whole source. The result always ends with exactly one `EOF`.
///
/// If the source stops on a read error, the error stays available through
/// [`Source::err`] and the stream ends as if the input had ended there.
pub fn tokenize(source: &mut Source) -> Vec<Token> {
    let tokens: Vec<Token> = Tokenizer::new(source).collect();
    if let Some(err) = source.err() {
        log::warn!("tokenization stopped early: {err}");
    }
    tokens
}

/// Tokenizes an in-memory string.
pub fn tokenize_str(input: &str) -> Vec<Token> {
    let mut source = Source::from(input);
    tokenize(&mut source)
}
