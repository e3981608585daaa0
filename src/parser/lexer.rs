//! Lexer (tokenizer) for PL/0 source code
//!
//! Converts raw source text into a flat [`Token`] stream consumed by the parser.
//! Source is lexed one trimmed line at a time, so no token ever spans a line
//! boundary, and blank lines produce nothing. The first bad character aborts
//! the whole run.

use std::fmt;

/// Source location information for error reporting
///
/// `line` is the 1-based physical line, `column` is 1-based within the
/// trimmed line.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct SourceLocation {
    pub line: usize,
    pub column: usize,
}

impl SourceLocation {
    pub fn new(line: usize, column: usize) -> Self {
        Self { line, column }
    }
}

/// Reserved words. Matching is case-sensitive.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Keyword {
    Program,
    Procedure,
    Call,
    Begin,
    End,
    Const,
    Var,
    While,
    Do,
    If,
    Then,
    Odd,
}

impl Keyword {
    pub fn parse(text: &str) -> Option<Self> {
        let keyword = match text {
            "PROGRAM" => Keyword::Program,
            "PROCEDURE" => Keyword::Procedure,
            "CALL" => Keyword::Call,
            "BEGIN" => Keyword::Begin,
            "END" => Keyword::End,
            "CONST" => Keyword::Const,
            "VAR" => Keyword::Var,
            "WHILE" => Keyword::While,
            "DO" => Keyword::Do,
            "IF" => Keyword::If,
            "THEN" => Keyword::Then,
            "ODD" => Keyword::Odd,
            _ => return None,
        };
        Some(keyword)
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Keyword::Program => "PROGRAM",
            Keyword::Procedure => "PROCEDURE",
            Keyword::Call => "CALL",
            Keyword::Begin => "BEGIN",
            Keyword::End => "END",
            Keyword::Const => "CONST",
            Keyword::Var => "VAR",
            Keyword::While => "WHILE",
            Keyword::Do => "DO",
            Keyword::If => "IF",
            Keyword::Then => "THEN",
            Keyword::Odd => "ODD",
        }
    }
}

/// Operator and punctuation symbols
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Punct {
    Plus,      // +
    Minus,     // -
    Star,      // *
    Slash,     // /
    Assign,    // :=
    Eq,        // =
    Hash,      // #
    Lt,        // <
    Le,        // <=
    Gt,        // >
    Ge,        // >=
    LParen,    // (
    RParen,    // )
    Semicolon, // ;
    Comma,     // ,
    Dot,       // .
}

impl Punct {
    pub fn as_str(self) -> &'static str {
        match self {
            Punct::Plus => "+",
            Punct::Minus => "-",
            Punct::Star => "*",
            Punct::Slash => "/",
            Punct::Assign => ":=",
            Punct::Eq => "=",
            Punct::Hash => "#",
            Punct::Lt => "<",
            Punct::Le => "<=",
            Punct::Gt => ">",
            Punct::Ge => ">=",
            Punct::LParen => "(",
            Punct::RParen => ")",
            Punct::Semicolon => ";",
            Punct::Comma => ",",
            Punct::Dot => ".",
        }
    }
}

/// Token payloads. Only identifiers and numbers carry data.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TokenKind {
    Keyword(Keyword),
    Punct(Punct),
    Ident(String),
    Number(i64),
    Eof,
}

impl fmt::Display for TokenKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TokenKind::Keyword(kw) => write!(f, "'{}'", kw.as_str()),
            TokenKind::Punct(p) => write!(f, "'{}'", p.as_str()),
            TokenKind::Ident(name) => write!(f, "identifier '{}'", name),
            TokenKind::Number(n) => write!(f, "number {}", n),
            TokenKind::Eof => write!(f, "end of input"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Token {
    pub kind: TokenKind,
    pub location: SourceLocation,
}

impl Token {
    pub fn new(kind: TokenKind, location: SourceLocation) -> Self {
        Self { kind, location }
    }

    pub fn is_eof(&self) -> bool {
        matches!(self.kind, TokenKind::Eof)
    }
}

impl fmt::Display for Token {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(&self.kind, f)
    }
}

/// Lexer error type
#[derive(Debug, Clone)]
pub struct LexError {
    pub message: String,
    pub location: SourceLocation,
}

impl fmt::Display for LexError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Lexical error at line {}, column {}: {}",
            self.location.line, self.location.column, self.message
        )
    }
}

impl std::error::Error for LexError {}

/// Lexer for PL/0 source code
pub struct Lexer<'a> {
    source: &'a str,
    /// Characters of the line being scanned
    input: Vec<char>,
    position: usize,
    line: usize,
}

impl<'a> Lexer<'a> {
    pub fn new(source: &'a str) -> Self {
        Self {
            source,
            input: Vec::new(),
            position: 0,
            line: 0,
        }
    }

    /// Tokenize the entire input, ending with a single `Eof` token.
    pub fn tokenize(&mut self) -> Result<Vec<Token>, LexError> {
        let mut tokens = Vec::new();
        let mut line_count = 0;

        for (idx, raw_line) in self.source.lines().enumerate() {
            line_count = idx + 1;
            let line = raw_line.trim();
            if line.is_empty() {
                continue;
            }

            self.input = line.chars().collect();
            self.position = 0;
            self.line = idx + 1;
            self.scan_line(&mut tokens)?;
        }

        tokens.push(Token::new(
            TokenKind::Eof,
            SourceLocation::new(line_count + 1, 1),
        ));

        log::debug!("lexed {} tokens from {} lines", tokens.len(), line_count);
        Ok(tokens)
    }

    fn scan_line(&mut self, tokens: &mut Vec<Token>) -> Result<(), LexError> {
        while let Some(ch) = self.peek() {
            if ch.is_whitespace() {
                self.advance();
                continue;
            }
            tokens.push(self.next_token()?);
        }
        Ok(())
    }

    fn next_token(&mut self) -> Result<Token, LexError> {
        let loc = self.current_location();
        let ch = self.advance().ok_or_else(|| LexError {
            message: "Unexpected end of line".to_string(),
            location: loc,
        })?;

        let punct = match ch {
            'a'..='z' | 'A'..='Z' => return Ok(self.identifier_or_keyword(ch, loc)),
            '0'..='9' => return self.number_literal(ch, loc),

            ':' => {
                if self.peek() == Some('=') {
                    self.advance();
                    Punct::Assign
                } else {
                    return Err(LexError {
                        message: "missing '=' after ':'".to_string(),
                        location: loc,
                    });
                }
            }
            '<' => {
                if self.peek() == Some('=') {
                    self.advance();
                    Punct::Le
                } else {
                    Punct::Lt
                }
            }
            '>' => {
                if self.peek() == Some('=') {
                    self.advance();
                    Punct::Ge
                } else {
                    Punct::Gt
                }
            }
            '+' => Punct::Plus,
            '-' => Punct::Minus,
            '*' => Punct::Star,
            '/' => Punct::Slash,
            '=' => Punct::Eq,
            '#' => Punct::Hash,
            '(' => Punct::LParen,
            ')' => Punct::RParen,
            ';' => Punct::Semicolon,
            ',' => Punct::Comma,
            '.' => Punct::Dot,

            _ => {
                return Err(LexError {
                    message: format!("Unexpected character: '{}'", ch),
                    location: loc,
                })
            }
        };

        Ok(Token::new(TokenKind::Punct(punct), loc))
    }

    /// Parse integer literal (no sign)
    fn number_literal(
        &mut self,
        first_digit: char,
        loc: SourceLocation,
    ) -> Result<Token, LexError> {
        let mut num_str = String::new();
        num_str.push(first_digit);

        while let Some(ch) = self.peek() {
            if ch.is_ascii_digit() {
                num_str.push(ch);
                self.advance();
            } else {
                break;
            }
        }

        let value = num_str.parse::<i64>().map_err(|_| LexError {
            message: format!("Integer literal out of range: {}", num_str),
            location: loc,
        })?;

        Ok(Token::new(TokenKind::Number(value), loc))
    }

    fn identifier_or_keyword(&mut self, first_char: char, loc: SourceLocation) -> Token {
        let mut ident = String::new();
        ident.push(first_char);

        while let Some(ch) = self.peek() {
            if ch.is_ascii_alphanumeric() {
                ident.push(ch);
                self.advance();
            } else {
                break;
            }
        }

        let kind = match Keyword::parse(&ident) {
            Some(keyword) => TokenKind::Keyword(keyword),
            None => TokenKind::Ident(ident),
        };
        Token::new(kind, loc)
    }

    fn peek(&self) -> Option<char> {
        self.input.get(self.position).copied()
    }

    fn advance(&mut self) -> Option<char> {
        let ch = self.peek()?;
        self.position += 1;
        Some(ch)
    }

    fn current_location(&self) -> SourceLocation {
        SourceLocation::new(self.line, self.position + 1)
    }
}
