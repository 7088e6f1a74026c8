//! Lexer (tokenizer) for tiny BASIC source code
//!
//! Converts raw source text into [`Token`]s, one at a time, on demand. The
//! parser pulls tokens through [`Lexer::next_token`]; [`Lexer::tokenize`]
//! collects the whole stream for tooling and tests.
//!
//! Line terminators are significant (statements end at a newline), every
//! other whitespace character is skipped, and `#` starts a comment that runs
//! to the end of the line.

use std::fmt;

/// Source location information for error reporting
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct SourceLocation {
    pub line: usize,
    pub column: usize,
}

impl SourceLocation {
    pub fn new(line: usize, column: usize) -> Self {
        Self { line, column }
    }
}

impl fmt::Display for SourceLocation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "line {}, column {}", self.line, self.column)
    }
}

/// The closed set of token classes the lexer can produce.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TokenKind {
    Eof,
    Newline,
    Number,
    Ident,
    String,

    // Keywords
    Label,
    Goto,
    Print,
    Input,
    Let,
    If,
    Then,
    EndIf,
    While,
    Repeat,
    EndWhile,

    // Operators
    Eq,    // =
    Plus,  // +
    Minus, // -
    Star,  // *
    Slash, // /
    EqEq,  // ==
    NotEq, // !=
    Lt,    // <
    LtEq,  // <=
    Gt,    // >
    GtEq,  // >=
}

impl TokenKind {
    /// Keyword lookup; spelling must match exactly (keywords are upper case).
    pub fn keyword(text: &str) -> Option<TokenKind> {
        let kind = match text {
            "LABEL" => TokenKind::Label,
            "GOTO" => TokenKind::Goto,
            "PRINT" => TokenKind::Print,
            "INPUT" => TokenKind::Input,
            "LET" => TokenKind::Let,
            "IF" => TokenKind::If,
            "THEN" => TokenKind::Then,
            "ENDIF" => TokenKind::EndIf,
            "WHILE" => TokenKind::While,
            "REPEAT" => TokenKind::Repeat,
            "ENDWHILE" => TokenKind::EndWhile,
            _ => return None,
        };
        Some(kind)
    }

    pub fn is_comparison(self) -> bool {
        matches!(
            self,
            TokenKind::EqEq
                | TokenKind::NotEq
                | TokenKind::Lt
                | TokenKind::LtEq
                | TokenKind::Gt
                | TokenKind::GtEq
        )
    }
}

impl fmt::Display for TokenKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            TokenKind::Eof => "EOF",
            TokenKind::Newline => "NEWLINE",
            TokenKind::Number => "NUMBER",
            TokenKind::Ident => "IDENT",
            TokenKind::String => "STRING",
            TokenKind::Label => "LABEL",
            TokenKind::Goto => "GOTO",
            TokenKind::Print => "PRINT",
            TokenKind::Input => "INPUT",
            TokenKind::Let => "LET",
            TokenKind::If => "IF",
            TokenKind::Then => "THEN",
            TokenKind::EndIf => "ENDIF",
            TokenKind::While => "WHILE",
            TokenKind::Repeat => "REPEAT",
            TokenKind::EndWhile => "ENDWHILE",
            TokenKind::Eq => "EQ",
            TokenKind::Plus => "PLUS",
            TokenKind::Minus => "MINUS",
            TokenKind::Star => "ASTERISK",
            TokenKind::Slash => "SLASH",
            TokenKind::EqEq => "EQEQ",
            TokenKind::NotEq => "NOTEQ",
            TokenKind::Lt => "LT",
            TokenKind::LtEq => "LTEQ",
            TokenKind::Gt => "GT",
            TokenKind::GtEq => "GTEQ",
        };
        f.write_str(name)
    }
}

/// A classified lexeme.
///
/// `text` is the literal source spelling, except for string literals where it
/// is the content between the quotes.
#[derive(Debug, Clone, PartialEq)]
pub struct Token {
    pub kind: TokenKind,
    pub text: String,
    pub location: SourceLocation,
}

impl Token {
    pub fn new(kind: TokenKind, text: impl Into<String>, location: SourceLocation) -> Self {
        Self {
            kind,
            text: text.into(),
            location,
        }
    }
}

/// Lexer error type
#[derive(Debug, Clone, PartialEq)]
pub struct LexError {
    pub message: String,
    pub location: SourceLocation,
}

impl fmt::Display for LexError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Lexer error at line {}, column {}: {}",
            self.location.line, self.location.column, self.message
        )
    }
}

impl std::error::Error for LexError {}

/// Rejected inside string literals; the text is copied verbatim into a
/// `printf` format string.
const ILLEGAL_IN_STRING: [char; 4] = ['\r', '\t', '\\', '%'];

/// Lexer for tiny BASIC source code
pub struct Lexer {
    input: Vec<char>,
    position: usize,
    line: usize,
    column: usize,
    eof: Option<Token>,
}

impl Lexer {
    /// Create a new lexer for the given source string.
    ///
    /// A trailing newline is appended so the final statement is always
    /// terminated.
    pub fn new(input: &str) -> Self {
        let mut chars: Vec<char> = input.chars().collect();
        chars.push('\n');
        Self {
            input: chars,
            position: 0,
            line: 1,
            column: 1,
            eof: None,
        }
    }

    /// Tokenize the entire input, ending with a single EOF token.
    pub fn tokenize(&mut self) -> Result<Vec<Token>, LexError> {
        let mut tokens = Vec::new();

        loop {
            let token = self.next_token()?;
            let done = token.kind == TokenKind::Eof;
            tokens.push(token);
            if done {
                break;
            }
        }

        Ok(tokens)
    }

    /// Scan and return the next token.
    ///
    /// Once the input is exhausted every call returns the same EOF token.
    pub fn next_token(&mut self) -> Result<Token, LexError> {
        if let Some(eof) = &self.eof {
            return Ok(eof.clone());
        }

        self.skip_whitespace_and_comments();

        let loc = self.current_location();
        let ch = match self.advance() {
            Some(ch) => ch,
            None => {
                let eof = Token::new(TokenKind::Eof, "", loc);
                self.eof = Some(eof.clone());
                return Ok(eof);
            }
        };

        match ch {
            '\n' => Ok(Token::new(TokenKind::Newline, "\n", loc)),
            '+' => Ok(Token::new(TokenKind::Plus, "+", loc)),
            '-' => Ok(Token::new(TokenKind::Minus, "-", loc)),
            '*' => Ok(Token::new(TokenKind::Star, "*", loc)),
            '/' => Ok(Token::new(TokenKind::Slash, "/", loc)),
            '=' => {
                if self.peek() == Some('=') {
                    self.advance();
                    Ok(Token::new(TokenKind::EqEq, "==", loc))
                } else {
                    Ok(Token::new(TokenKind::Eq, "=", loc))
                }
            }
            '<' => {
                if self.peek() == Some('=') {
                    self.advance();
                    Ok(Token::new(TokenKind::LtEq, "<=", loc))
                } else {
                    Ok(Token::new(TokenKind::Lt, "<", loc))
                }
            }
            '>' => {
                if self.peek() == Some('=') {
                    self.advance();
                    Ok(Token::new(TokenKind::GtEq, ">=", loc))
                } else {
                    Ok(Token::new(TokenKind::Gt, ">", loc))
                }
            }
            '!' => {
                if self.peek() == Some('=') {
                    self.advance();
                    Ok(Token::new(TokenKind::NotEq, "!=", loc))
                } else {
                    Err(LexError {
                        message: "Expected '!=', found '!'".to_string(),
                        location: loc,
                    })
                }
            }
            '"' => self.string_literal(loc),
            '0'..='9' => self.number_literal(ch, loc),
            'a'..='z' | 'A'..='Z' => Ok(self.identifier_or_keyword(ch, loc)),

            _ => Err(LexError {
                message: format!("Unexpected character: '{}'", ch.escape_debug()),
                location: loc,
            }),
        }
    }

    /// Parse string literal; the opening quote is already consumed.
    fn string_literal(&mut self, loc: SourceLocation) -> Result<Token, LexError> {
        let mut string = String::new();

        while let Some(ch) = self.peek() {
            if ch == '"' {
                self.advance(); // consume closing quote
                return Ok(Token::new(TokenKind::String, string, loc));
            }

            if ch == '\n' {
                break;
            }

            if ILLEGAL_IN_STRING.contains(&ch) {
                return Err(LexError {
                    message: format!("Illegal character in string: '{}'", ch.escape_debug()),
                    location: self.current_location(),
                });
            }

            string.push(ch);
            self.advance();
        }

        Err(LexError {
            message: "Unterminated string literal".to_string(),
            location: loc,
        })
    }

    /// Parse numeric literal: digits with at most one decimal point, which
    /// must be followed by a digit.
    fn number_literal(&mut self, first_digit: char, loc: SourceLocation) -> Result<Token, LexError> {
        let mut num_str = String::new();
        num_str.push(first_digit);
        self.take_digits(&mut num_str);

        if self.peek() == Some('.') {
            self.advance();
            num_str.push('.');

            match self.peek() {
                Some(ch) if ch.is_ascii_digit() => self.take_digits(&mut num_str),
                Some(ch) => {
                    return Err(LexError {
                        message: format!("Illegal character in number: '{}'", ch.escape_debug()),
                        location: self.current_location(),
                    });
                }
                None => {
                    return Err(LexError {
                        message: "Unexpected end of file in number".to_string(),
                        location: self.current_location(),
                    });
                }
            }
        }

        Ok(Token::new(TokenKind::Number, num_str, loc))
    }

    fn take_digits(&mut self, out: &mut String) {
        while let Some(ch) = self.peek() {
            if ch.is_ascii_digit() {
                out.push(ch);
                self.advance();
            } else {
                break;
            }
        }
    }

    /// Parse identifier or keyword
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

        match TokenKind::keyword(&ident) {
            Some(kind) => Token::new(kind, ident, loc),
            None => Token::new(TokenKind::Ident, ident, loc),
        }
    }

    /// Skip blanks and `#` comments, stopping at (not past) a newline.
    fn skip_whitespace_and_comments(&mut self) {
        loop {
            match self.peek() {
                Some(' ') | Some('\t') | Some('\r') => {
                    self.advance();
                }
                Some('#') => {
                    while let Some(ch) = self.peek() {
                        if ch == '\n' {
                            break;
                        }
                        self.advance();
                    }
                }
                _ => break,
            }
        }
    }

    /// Peek at current character without consuming
    fn peek(&self) -> Option<char> {
        self.input.get(self.position).copied()
    }

    /// Advance to next character
    fn advance(&mut self) -> Option<char> {
        let ch = *self.input.get(self.position)?;
        self.position += 1;

        if ch == '\n' {
            self.line += 1;
            self.column = 1;
        } else {
            self.column += 1;
        }

        Some(ch)
    }

    fn current_location(&self) -> SourceLocation {
        SourceLocation::new(self.line, self.column)
    }
}
