#![no_main]
use libfuzzer_sys::fuzz_target;
use texmax_syntax::{Parser, Source, TokenKind, tokenize};

fuzz_target!(|data: &[u8]| {
    // Feed raw bytes so invalid UTF-8 exercises the source's error path too.
    let mut source = Source::from_reader(std::io::Cursor::new(data.to_vec()));
    let tokens = tokenize(&mut source);
    assert_eq!(
        tokens.iter().filter(|t| t.kind == TokenKind::Eof).count(),
        1
    );
    let _ = Parser::new(tokens).parse();

    let s = String::from_utf8_lossy(data);
    let _ = texmax_syntax::parse(&s);
});
