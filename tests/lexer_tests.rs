// Lexer tests: one snippet per token kind

use pl0quad::parser::lexer::{Keyword, LexError, Lexer, Punct, SourceLocation, TokenKind};

fn lex(source: &str) -> Result<Vec<TokenKind>, LexError> {
    Lexer::new(source)
        .tokenize()
        .map(|tokens| tokens.into_iter().map(|t| t.kind).collect())
}

fn assert_single(source: &str, expected: TokenKind) {
    let kinds = lex(source).unwrap_or_else(|e| panic!("{:?} failed to lex: {}", source, e));
    assert_eq!(kinds, vec![expected, TokenKind::Eof], "snippet {:?}", source);
}

#[test]
fn test_every_keyword_alone() {
    let keywords = [
        Keyword::Program,
        Keyword::Procedure,
        Keyword::Call,
        Keyword::Begin,
        Keyword::End,
        Keyword::Const,
        Keyword::Var,
        Keyword::While,
        Keyword::Do,
        Keyword::If,
        Keyword::Then,
        Keyword::Odd,
    ];
    for keyword in keywords {
        assert_single(keyword.as_str(), TokenKind::Keyword(keyword));
    }
}

#[test]
fn test_every_symbol_alone() {
    let symbols = [
        Punct::Plus,
        Punct::Minus,
        Punct::Star,
        Punct::Slash,
        Punct::Assign,
        Punct::Eq,
        Punct::Hash,
        Punct::Lt,
        Punct::Le,
        Punct::Gt,
        Punct::Ge,
        Punct::LParen,
        Punct::RParen,
        Punct::Semicolon,
        Punct::Comma,
        Punct::Dot,
    ];
    for symbol in symbols {
        assert_single(symbol.as_str(), TokenKind::Punct(symbol));
    }
}

#[test]
fn test_identifier_and_number_alone() {
    assert_single("counter2", TokenKind::Ident("counter2".to_string()));
    assert_single("  42  ", TokenKind::Number(42));
}

#[test]
fn test_keyword_precedence() {
    assert_single("BEGIN", TokenKind::Keyword(Keyword::Begin));
    assert_single("BEGINX", TokenKind::Ident("BEGINX".to_string()));
    assert_single("begin", TokenKind::Ident("begin".to_string()));
}

#[test]
fn test_two_character_symbols() {
    assert_single(">=", TokenKind::Punct(Punct::Ge));
    assert_eq!(
        lex("> =").unwrap(),
        vec![
            TokenKind::Punct(Punct::Gt),
            TokenKind::Punct(Punct::Eq),
            TokenKind::Eof
        ]
    );

    let err = lex("x : y").unwrap_err();
    assert_eq!(err.location, SourceLocation::new(1, 3));
    assert!(err.message.contains("missing '='"));
}

#[test]
fn test_empty_source() {
    assert_eq!(lex("").unwrap(), vec![TokenKind::Eof]);
    assert_eq!(lex("\n   \n\t\n").unwrap(), vec![TokenKind::Eof]);
}

#[test]
fn test_digits_then_letters_split() {
    assert_eq!(
        lex("12ab").unwrap(),
        vec![
            TokenKind::Number(12),
            TokenKind::Ident("ab".to_string()),
            TokenKind::Eof
        ]
    );
}
