use crate::error::Span;
use std::collections::HashMap;
use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TokenType {
    // Single-character tokens
    LeftParen,
    RightParen,
    LeftBrace,
    RightBrace,
    Comma,
    Semicolon,
    Plus,
    Minus,
    Asterisk,
    Slash,
    Less,
    Greater,

    // One or two character tokens
    Assign,
    Equal,
    Bang,
    NotEqual,

    // Literals
    Identifier,
    Integer,

    // Keywords
    Function,
    Let,
    True,
    False,
    If,
    Else,
    Return,

    // Special
    Illegal,
    Eof,
}

impl TokenType {
    /// Canonical source text for fixed tokens; empty for the kinds that
    /// carry their own literal (identifiers, integers, illegal, EOF).
    pub fn literal(self) -> &'static str {
        match self {
            TokenType::LeftParen => "(",
            TokenType::RightParen => ")",
            TokenType::LeftBrace => "{",
            TokenType::RightBrace => "}",
            TokenType::Comma => ",",
            TokenType::Semicolon => ";",
            TokenType::Plus => "+",
            TokenType::Minus => "-",
            TokenType::Asterisk => "*",
            TokenType::Slash => "/",
            TokenType::Less => "<",
            TokenType::Greater => ">",
            TokenType::Assign => "=",
            TokenType::Equal => "==",
            TokenType::Bang => "!",
            TokenType::NotEqual => "!=",
            TokenType::Function => "fn",
            TokenType::Let => "let",
            TokenType::True => "true",
            TokenType::False => "false",
            TokenType::If => "if",
            TokenType::Else => "else",
            TokenType::Return => "return",
            TokenType::Identifier
            | TokenType::Integer
            | TokenType::Illegal
            | TokenType::Eof => "",
        }
    }

    /// Builds a token of this kind carrying its canonical literal.
    pub fn token(self) -> Token {
        Token::new(self, self.literal().to_string())
    }
}

impl fmt::Display for TokenType {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            TokenType::Identifier => write!(f, "identifier"),
            TokenType::Integer => write!(f, "integer"),
            TokenType::Illegal => write!(f, "illegal token"),
            TokenType::Eof => write!(f, "end of input"),
            fixed => write!(f, "'{}'", fixed.literal()),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Token {
    pub token_type: TokenType,
    pub literal: String,
}

impl Token {
    pub fn new(token_type: TokenType, literal: String) -> Self {
        Self {
            token_type,
            literal,
        }
    }

    /// Attaches position metadata for diagnostic display. Localization never
    /// feeds back into parsing decisions.
    pub fn localize(self, line: usize, column: usize, line_text: String, span: Span) -> LocalizedToken {
        LocalizedToken {
            token: self,
            line,
            column,
            line_text,
            span,
        }
    }
}

impl fmt::Display for Token {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self.token_type {
            TokenType::Identifier | TokenType::Integer | TokenType::Illegal => {
                write!(f, "{:?}({})", self.token_type, self.literal)
            }
            _ => write!(f, "{:?}", self.token_type),
        }
    }
}

/// A token plus where it came from: 0-based line and column of its first
/// character, the full text of that source line, and a char-offset span for
/// report rendering.
#[derive(Debug, Clone, PartialEq)]
pub struct LocalizedToken {
    pub token: Token,
    pub line: usize,
    pub column: usize,
    pub line_text: String,
    pub span: Span,
}

impl fmt::Display for LocalizedToken {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}:{} {}", self.line, self.column, self.token)
    }
}

/// Pull-based scanner: one token per `next_token` call. Never fails;
/// unrecognized characters come back as `Illegal` tokens and scanning
/// continues. Past end of input it returns `Eof` indefinitely.
pub struct Lexer {
    chars: Vec<char>,
    lines: Vec<String>,
    pos: usize,
    line: usize,
    column: usize,
    keywords: HashMap<&'static str, TokenType>,
    finished: bool,
}

impl Lexer {
    pub fn new(source: &str) -> Self {
        let mut keywords = HashMap::new();
        keywords.insert("fn", TokenType::Function);
        keywords.insert("let", TokenType::Let);
        keywords.insert("true", TokenType::True);
        keywords.insert("false", TokenType::False);
        keywords.insert("if", TokenType::If);
        keywords.insert("else", TokenType::Else);
        keywords.insert("return", TokenType::Return);

        Self {
            chars: source.chars().collect(),
            lines: source.split('\n').map(str::to_string).collect(),
            pos: 0,
            line: 0,
            column: 0,
            keywords,
            finished: false,
        }
    }

    /// Like `next_token`, but also captures the token's position and source
    /// line. Line/column bookkeeping is identical either way.
    pub fn next_localized(&mut self) -> LocalizedToken {
        self.skip_whitespace();

        let line = self.line;
        let column = self.column;
        let line_text = self.lines.get(line).cloned().unwrap_or_default();
        let start = self.pos;

        let token = self.next_token();

        let span = if self.pos > start {
            Span::new(start, self.pos)
        } else if start > 0 {
            // Eof is zero-width; label the final character instead
            Span::new(start - 1, start)
        } else {
            Span::single(start)
        };
        token.localize(line, column, line_text, span)
    }

    pub fn next_token(&mut self) -> Token {
        self.skip_whitespace();

        let current = self.read_char();

        match current {
            '{' => TokenType::LeftBrace.token(),
            '}' => TokenType::RightBrace.token(),
            '(' => TokenType::LeftParen.token(),
            ')' => TokenType::RightParen.token(),
            ',' => TokenType::Comma.token(),
            ';' => TokenType::Semicolon.token(),
            '+' => TokenType::Plus.token(),
            '-' => TokenType::Minus.token(),
            '*' => TokenType::Asterisk.token(),
            '/' => TokenType::Slash.token(),
            '<' => TokenType::Less.token(),
            '>' => TokenType::Greater.token(),
            '=' => {
                if self.peek() == '=' {
                    self.advance();
                    TokenType::Equal.token()
                } else {
                    TokenType::Assign.token()
                }
            }
            '!' => {
                if self.peek() == '=' {
                    self.advance();
                    TokenType::NotEqual.token()
                } else {
                    TokenType::Bang.token()
                }
            }
            '\0' => TokenType::Eof.token(),
            c if is_letter(c) => {
                let word = self.read_identifier(c);
                match self.keywords.get(word.as_str()) {
                    Some(keyword) => keyword.token(),
                    None => Token::new(TokenType::Identifier, word),
                }
            }
            c if c.is_ascii_digit() => Token::new(TokenType::Integer, self.read_number(c)),
            c => Token::new(TokenType::Illegal, c.to_string()),
        }
    }

    fn peek(&self) -> char {
        // '\0' doubles as the end-of-input sentinel
        self.chars.get(self.pos).copied().unwrap_or('\0')
    }

    fn advance(&mut self) {
        if self.pos >= self.chars.len() {
            return;
        }
        self.pos += 1;
        self.column += 1;
    }

    fn read_char(&mut self) -> char {
        let current = self.peek();
        self.advance();
        current
    }

    fn read_identifier(&mut self, first: char) -> String {
        let mut word = String::from(first);
        while is_letter(self.peek()) {
            word.push(self.read_char());
        }
        word
    }

    fn read_number(&mut self, first: char) -> String {
        let mut number = String::from(first);
        while self.peek().is_ascii_digit() {
            number.push(self.read_char());
        }
        number
    }

    fn skip_whitespace(&mut self) {
        while self.peek().is_whitespace() {
            if self.peek() == '\n' {
                self.pos += 1;
                self.line += 1;
                self.column = 0;
            } else {
                self.advance();
            }
        }
    }
}

/// Identifiers are maximal runs of letters and underscores; digits terminate
/// an identifier rather than extending it.
fn is_letter(c: char) -> bool {
    c.is_alphabetic() || c == '_'
}

impl Iterator for Lexer {
    type Item = Token;

    /// Yields every token up to and including `Eof`, then `None`.
    fn next(&mut self) -> Option<Token> {
        if self.finished {
            return None;
        }
        let token = self.next_token();
        if token.token_type == TokenType::Eof {
            self.finished = true;
        }
        Some(token)
    }
}
