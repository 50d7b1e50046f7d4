use crate::Position;
use std::fs::File;
use std::io::{self, BufRead, BufReader, Cursor, Read};
use std::path::{Path, PathBuf};
use thiserror::Error;

/// Errors raised while pulling characters out of a [`Source`].
#[derive(Debug, Error)]
pub enum SourceError {
    /// The input file could not be opened.
    #[error("failed to open {}: {source}", .path.display())]
    Open {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    /// The underlying reader failed mid-stream.
    #[error("read error at {position}: {source}")]
    Read {
        position: Position,
        #[source]
        source: io::Error,
    },
    /// The input is not valid UTF-8.
    #[error("invalid UTF-8 at {position}")]
    InvalidUtf8 { position: Position },
}

/// Result of pulling one character from the reader.
enum Fetch {
    Char(char),
    End,
    Failed(SourceError),
}

/// A pull-based character stream with position tracking and one character
/// of lookahead.
///
/// The source starts *before* the first character: call [`scan`](Self::scan)
/// to move onto it. After the end of input (or a read error) [`is_eof`](Self::is_eof)
/// holds and every further `scan` returns `None`.
///
/// ```
/// use texmax_syntax::{Position, Source};
///
/// let mut source = Source::from("a\nb");
/// assert_eq!(source.peek(), Some('a'));
/// assert_eq!(source.scan(), Some('a'));
/// assert_eq!(source.scan(), Some('\n'));
/// assert_eq!(source.scan(), Some('b'));
/// assert_eq!(source.position(), Position::new(2, 2, 1));
/// assert_eq!(source.scan(), None);
/// assert!(source.is_eof());
/// ```
pub struct Source {
    reader: Box<dyn BufRead>,
    /// Path of the file this source reads from, if any.
    file: Option<PathBuf>,
    /// Character last returned by `scan`.
    current: Option<char>,
    /// Position of `current` (or of the end of input once exhausted).
    pos: Position,
    /// Position of the next character to be scanned.
    next_pos: Position,
    /// Pending character read by `peek`.
    lookahead: Option<Fetch>,
    done: bool,
    err: Option<SourceError>,
}

impl Source {
    /// Creates a source over an in-memory string.
    pub fn new(content: impl Into<String>) -> Self {
        Self::with_reader(Box::new(Cursor::new(content.into().into_bytes())), None)
    }

    /// Creates a source reading from the named file.
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, SourceError> {
        let path = path.as_ref();
        let file = File::open(path).map_err(|source| SourceError::Open {
            path: path.to_path_buf(),
            source,
        })?;
        Ok(Self::with_reader(
            Box::new(BufReader::new(file)),
            Some(path.to_path_buf()),
        ))
    }

    /// Creates a source over an arbitrary reader.
    pub fn from_reader<R: Read + 'static>(reader: R) -> Self {
        Self::with_reader(Box::new(BufReader::new(reader)), None)
    }

    fn with_reader(reader: Box<dyn BufRead>, file: Option<PathBuf>) -> Self {
        Self {
            reader,
            file,
            current: None,
            pos: Position::start(),
            next_pos: Position::start(),
            lookahead: None,
            done: false,
            err: None,
        }
    }

    /// Advances to the next character and returns it, or `None` at the end of
    /// input or after a read error.
    pub fn scan(&mut self) -> Option<char> {
        if self.done {
            return None;
        }

        let fetched = match self.lookahead.take() {
            Some(fetched) => fetched,
            None => self.fetch(),
        };

        self.pos = self.next_pos;
        match fetched {
            Fetch::Char(ch) => {
                self.current = Some(ch);
                self.next_pos = self.next_pos.advance(ch);
                Some(ch)
            }
            Fetch::End => {
                self.current = None;
                self.done = true;
                None
            }
            Fetch::Failed(err) => {
                log::warn!("{err}");
                self.current = None;
                self.done = true;
                self.err = Some(err);
                None
            }
        }
    }

    /// Returns the next character without consuming it.
    pub fn peek(&mut self) -> Option<char> {
        if self.done {
            return None;
        }
        if self.lookahead.is_none() {
            self.lookahead = Some(self.fetch());
        }
        match self.lookahead {
            Some(Fetch::Char(ch)) => Some(ch),
            _ => None,
        }
    }

    /// Character last returned by [`scan`](Self::scan).
    pub fn current(&self) -> Option<char> {
        self.current
    }

    /// Position of the character last returned by [`scan`](Self::scan).
    ///
    /// Once the input is exhausted this is the position just past its last
    /// character.
    pub fn position(&self) -> Position {
        self.pos
    }

    /// Position the next [`scan`](Self::scan) will report.
    pub fn peek_position(&self) -> Position {
        self.next_pos
    }

    /// True once the end of input or a read error has been reached.
    pub fn is_eof(&self) -> bool {
        self.done
    }

    /// The read error that ended the stream, if it did not end normally.
    pub fn err(&self) -> Option<&SourceError> {
        self.err.as_ref()
    }

    /// Path of the file backing this source, if any.
    pub fn file(&self) -> Option<&Path> {
        self.file.as_deref()
    }

    /// Reads and decodes one UTF-8 character from the reader.
    fn fetch(&mut self) -> Fetch {
        let position = self.next_pos;
        let mut buf = [0u8; 4];

        match read_full(self.reader.as_mut(), &mut buf[..1]) {
            Ok(0) => return Fetch::End,
            Ok(_) => {}
            Err(source) => return Fetch::Failed(SourceError::Read { position, source }),
        }

        let width = utf8_width(buf[0]);
        if width == 0 {
            return Fetch::Failed(SourceError::InvalidUtf8 { position });
        }

        match read_full(self.reader.as_mut(), &mut buf[1..width]) {
            Ok(n) if n == width - 1 => {}
            Ok(_) => return Fetch::Failed(SourceError::InvalidUtf8 { position }),
            Err(source) => return Fetch::Failed(SourceError::Read { position, source }),
        }

        match std::str::from_utf8(&buf[..width])
            .ok()
            .and_then(|s| s.chars().next())
        {
            Some(ch) => Fetch::Char(ch),
            None => Fetch::Failed(SourceError::InvalidUtf8 { position }),
        }
    }
}

impl From<&str> for Source {
    fn from(content: &str) -> Self {
        Self::new(content)
    }
}

impl From<String> for Source {
    fn from(content: String) -> Self {
        Self::new(content)
    }
}

/// Encoded length announced by a UTF-8 leading byte, or 0 if `byte` cannot
/// start a character.
fn utf8_width(byte: u8) -> usize {
    match byte {
        0x00..=0x7F => 1,
        0xC2..=0xDF => 2,
        0xE0..=0xEF => 3,
        0xF0..=0xF4 => 4,
        _ => 0,
    }
}

/// Fills `buf` as far as the reader allows; returns the number of bytes read.
fn read_full(reader: &mut dyn BufRead, buf: &mut [u8]) -> io::Result<usize> {
    let mut filled = 0;
    while filled < buf.len() {
        match reader.read(&mut buf[filled..]) {
            Ok(0) => break,
            Ok(n) => filled += n,
            Err(e) if e.kind() == io::ErrorKind::Interrupted => continue,
            Err(e) => return Err(e),
        }
    }
    Ok(filled)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    struct FailingReader;

    impl Read for FailingReader {
        fn read(&mut self, _buf: &mut [u8]) -> io::Result<usize> {
            Err(io::Error::other("disk on fire"))
        }
    }

    #[test]
    fn test_scan_sequence_and_positions() {
        let mut source = Source::from("ab");
        assert_eq!(source.current(), None);

        assert_eq!(source.scan(), Some('a'));
        assert_eq!(source.position(), Position::new(0, 1, 1));

        assert_eq!(source.scan(), Some('b'));
        assert_eq!(source.position(), Position::new(1, 1, 2));

        assert_eq!(source.scan(), None);
        assert!(source.is_eof());
        assert_eq!(source.position(), Position::new(2, 1, 3));
        assert!(source.err().is_none());
    }

    #[test]
    fn test_peek_is_idempotent() {
        let mut source = Source::from("xy");
        source.scan();
        assert_eq!(source.peek(), Some('y'));
        assert_eq!(source.peek(), Some('y'));
        let peeked_at = source.peek_position();

        assert_eq!(source.scan(), Some('y'));
        assert_eq!(source.position(), peeked_at);
        assert_eq!(source.current(), Some('y'));
    }

    #[test]
    fn test_peek_before_first_scan() {
        let mut source = Source::from("q");
        assert_eq!(source.peek(), Some('q'));
        assert_eq!(source.position(), Position::start());
        assert_eq!(source.scan(), Some('q'));
        assert_eq!(source.position(), Position::start());
    }

    #[test]
    fn test_peek_at_end() {
        let mut source = Source::from("z");
        source.scan();
        assert_eq!(source.peek(), None);
        assert!(!source.is_eof());
        assert_eq!(source.scan(), None);
        assert!(source.is_eof());
    }

    #[test]
    fn test_newline_resets_column() {
        let mut source = Source::from("a\nb");
        source.scan();
        source.scan();
        assert_eq!(source.scan(), Some('b'));
        assert_eq!(source.position(), Position::new(2, 2, 1));
    }

    #[test]
    fn test_multi_byte_offsets() {
        let mut source = Source::from("αβ");
        source.scan();
        assert_eq!(source.scan(), Some('β'));
        assert_eq!(source.position(), Position::new(2, 1, 2));
    }

    #[test]
    fn test_invalid_utf8_ends_stream() {
        let mut source = Source::from_reader(Cursor::new(vec![b'a', 0xFF, b'b']));
        assert_eq!(source.scan(), Some('a'));
        assert_eq!(source.scan(), None);
        assert!(source.is_eof());
        assert!(matches!(
            source.err(),
            Some(SourceError::InvalidUtf8 { position }) if position.offset == 1
        ));
        // Exhausted for good.
        assert_eq!(source.scan(), None);
    }

    #[test]
    fn test_truncated_utf8_sequence() {
        let mut source = Source::from_reader(Cursor::new(vec![0xCE]));
        assert_eq!(source.scan(), None);
        assert!(matches!(source.err(), Some(SourceError::InvalidUtf8 { .. })));
    }

    #[test]
    fn test_read_error_surfaces_as_eof() {
        let mut source = Source::from_reader(FailingReader);
        assert_eq!(source.peek(), None);
        assert_eq!(source.scan(), None);
        assert!(source.is_eof());
        let err = source.err().expect("read error should be recorded");
        assert!(err.to_string().contains("disk on fire"));
    }

    #[test]
    fn test_from_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, "x^2").unwrap();

        let mut source = Source::from_file(file.path()).unwrap();
        assert_eq!(source.file(), Some(file.path()));
        let mut text = String::new();
        while let Some(ch) = source.scan() {
            text.push(ch);
        }
        assert_eq!(text, "x^2");
    }

    #[test]
    fn test_missing_file() {
        let result = Source::from_file("/definitely/not/here.tex");
        match result {
            Err(SourceError::Open { path, .. }) => {
                assert_eq!(path, PathBuf::from("/definitely/not/here.tex"))
            }
            _ => panic!("expected an open error"),
        }
    }
}
