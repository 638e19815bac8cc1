use crate::ast::{BlockStatement, Expression, Identifier, Program, Statement};
use crate::error::{KeaError, ParseFailure};
use crate::lexer::{Lexer, LocalizedToken, TokenType};
use std::mem;

/// Operator binding powers, weakest to tightest. The derived ordering is the
/// comparison the expression loop runs on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum Precedence {
    Lowest,
    /// `==` and `!=`
    Equality,
    /// `<` and `>`
    Relational,
    /// `+` and binary `-`
    Additive,
    /// `*` and `/`
    Multiplicative,
    /// `!` and unary `-`
    Prefix,
    /// Reserved for function invocation, the tightest level. No token maps
    /// to it yet.
    Call,
}

impl Precedence {
    /// Left binding power of an infix operator token. Anything that is not
    /// an infix operator binds at `Lowest`, which stops the expression loop.
    pub fn of(token_type: TokenType) -> Precedence {
        match token_type {
            TokenType::Equal | TokenType::NotEqual => Precedence::Equality,
            TokenType::Less | TokenType::Greater => Precedence::Relational,
            TokenType::Plus | TokenType::Minus => Precedence::Additive,
            TokenType::Asterisk | TokenType::Slash => Precedence::Multiplicative,
            _ => Precedence::Lowest,
        }
    }
}

/// Single-use recursive-descent parser with Pratt-style expression parsing.
///
/// Diagnostics accumulate in an ordered list instead of aborting the parse:
/// a failed statement records its error, the parser resynchronizes at the
/// next token, and parsing continues so one pass reports every problem.
pub struct Parser {
    lexer: Lexer,
    current: LocalizedToken,
    peek: LocalizedToken,
    errors: Vec<KeaError>,
}

impl Parser {
    pub fn new(mut lexer: Lexer) -> Self {
        let current = lexer.next_localized();
        let peek = lexer.next_localized();
        Self {
            lexer,
            current,
            peek,
            errors: Vec::new(),
        }
    }

    /// Parses until end of input and returns whatever statements could be
    /// built. Check `errors` afterwards; a non-empty list means the parse
    /// failed even though a partial `Program` came back.
    pub fn parse_program(&mut self) -> Program {
        let mut program = Program::new();
        while !self.current_is(TokenType::Eof) {
            if let Some(statement) = self.parse_statement() {
                program.statements.push(statement);
            }
            self.advance();
        }
        program
    }

    /// All-or-nothing variant: the `Program` only on a clean parse,
    /// otherwise every accumulated diagnostic.
    pub fn parse_program_checked(&mut self) -> Result<Program, ParseFailure> {
        let program = self.parse_program();
        if self.errors.is_empty() {
            Ok(program)
        } else {
            Err(ParseFailure::new(mem::take(&mut self.errors)))
        }
    }

    pub fn errors(&self) -> &[KeaError] {
        &self.errors
    }

    fn parse_statement(&mut self) -> Option<Statement> {
        match self.current.token.token_type {
            TokenType::Let => self.parse_let_statement(),
            TokenType::Return => self.parse_return_statement(),
            _ => self.parse_expression_statement(),
        }
    }

    fn parse_let_statement(&mut self) -> Option<Statement> {
        let token = self.current.token.clone();

        if !self.expect_peek(TokenType::Identifier) {
            return None;
        }
        let name = self.current_identifier();

        if !self.expect_peek_with_help(
            TokenType::Assign,
            "let bindings take the form 'let name = value;'",
        ) {
            return None;
        }

        self.advance();
        let value = self.parse_expression(Precedence::Lowest)?;

        if self.peek_is(TokenType::Semicolon) {
            self.advance();
        }

        Some(Statement::Let { token, name, value })
    }

    fn parse_return_statement(&mut self) -> Option<Statement> {
        let token = self.current.token.clone();

        self.advance();
        let value = self.parse_expression(Precedence::Lowest)?;

        if self.peek_is(TokenType::Semicolon) {
            self.advance();
        }

        Some(Statement::Return { token, value })
    }

    fn parse_expression_statement(&mut self) -> Option<Statement> {
        let token = self.current.token.clone();
        let value = self.parse_expression(Precedence::Lowest)?;

        // Trailing semicolons are optional in expression position
        if self.peek_is(TokenType::Semicolon) {
            self.advance();
        }

        Some(Statement::Expression { token, value })
    }

    /// The Pratt loop. Parse a prefix to get the left operand, then fold in
    /// infix operators while the next one binds tighter than `precedence`.
    /// Each infix rule recurses with its own operator's precedence, so
    /// equal-precedence chains associate left.
    fn parse_expression(&mut self, precedence: Precedence) -> Option<Expression> {
        let mut left = self.parse_prefix()?;

        while precedence < self.peek_precedence() {
            self.advance();
            left = self.parse_infix_expression(left)?;
        }

        Some(left)
    }

    fn parse_prefix(&mut self) -> Option<Expression> {
        match self.current.token.token_type {
            TokenType::Identifier => Some(Expression::Identifier(self.current_identifier())),
            TokenType::Integer => self.parse_integer_literal(),
            TokenType::True | TokenType::False => Some(Expression::Boolean {
                token: self.current.token.clone(),
                value: self.current_is(TokenType::True),
            }),
            TokenType::Bang | TokenType::Minus => self.parse_prefix_expression(),
            TokenType::LeftParen => self.parse_grouped_expression(),
            TokenType::If => self.parse_if_expression(),
            TokenType::Function => self.parse_function_literal(),
            token_type => {
                let message = format!("no prefix parse function for {}", token_type);
                self.errors
                    .push(KeaError::parse_error(self.current.span.clone(), message));
                None
            }
        }
    }

    fn parse_integer_literal(&mut self) -> Option<Expression> {
        let token = self.current.token.clone();
        match token.literal.parse::<i64>() {
            Ok(value) => Some(Expression::Integer { token, value }),
            Err(_) => {
                let message = format!("could not parse {} as integer", token.literal);
                self.errors
                    .push(KeaError::parse_error(self.current.span.clone(), message));
                None
            }
        }
    }

    fn parse_prefix_expression(&mut self) -> Option<Expression> {
        let token = self.current.token.clone();
        let operator = token.literal.clone();

        self.advance();
        let right = self.parse_expression(Precedence::Prefix)?;

        Some(Expression::Prefix {
            token,
            operator,
            right: Box::new(right),
        })
    }

    fn parse_infix_expression(&mut self, left: Expression) -> Option<Expression> {
        let token = self.current.token.clone();
        let operator = token.literal.clone();
        let precedence = self.current_precedence();

        self.advance();
        let right = self.parse_expression(precedence)?;

        Some(Expression::Infix {
            token,
            left: Box::new(left),
            operator,
            right: Box::new(right),
        })
    }

    fn parse_grouped_expression(&mut self) -> Option<Expression> {
        self.advance();
        let expression = self.parse_expression(Precedence::Lowest);

        if !self.expect_peek_with_help(
            TokenType::RightParen,
            "add a closing ')' to match the opening '('",
        ) {
            return None;
        }

        expression
    }

    fn parse_if_expression(&mut self) -> Option<Expression> {
        let token = self.current.token.clone();

        if !self.expect_peek_with_help(
            TokenType::LeftParen,
            "wrap the condition in parentheses: 'if (condition) { ... }'",
        ) {
            return None;
        }

        self.advance();
        let condition = self.parse_expression(Precedence::Lowest)?;

        if !self.expect_peek(TokenType::RightParen) {
            return None;
        }
        if !self.expect_peek(TokenType::LeftBrace) {
            return None;
        }
        let consequence = self.parse_block_statement();

        let alternative = if self.peek_is(TokenType::Else) {
            self.advance();
            if !self.expect_peek(TokenType::LeftBrace) {
                return None;
            }
            Some(self.parse_block_statement())
        } else {
            None
        };

        Some(Expression::If {
            token,
            condition: Box::new(condition),
            consequence,
            alternative,
        })
    }

    fn parse_function_literal(&mut self) -> Option<Expression> {
        let token = self.current.token.clone();

        if !self.expect_peek_with_help(
            TokenType::LeftParen,
            "function literals take the form 'fn(a, b) { ... }'",
        ) {
            return None;
        }
        let parameters = self.parse_function_parameters()?;

        if !self.expect_peek(TokenType::LeftBrace) {
            return None;
        }
        let body = self.parse_block_statement();

        Some(Expression::Function {
            token,
            parameters,
            body,
        })
    }

    fn parse_function_parameters(&mut self) -> Option<Vec<Identifier>> {
        let mut parameters = Vec::new();

        if self.peek_is(TokenType::RightParen) {
            self.advance();
            return Some(parameters);
        }

        if !self.expect_peek(TokenType::Identifier) {
            return None;
        }
        parameters.push(self.current_identifier());

        while self.peek_is(TokenType::Comma) {
            self.advance();
            if !self.expect_peek(TokenType::Identifier) {
                return None;
            }
            parameters.push(self.current_identifier());
        }

        if !self.expect_peek(TokenType::RightParen) {
            return None;
        }

        Some(parameters)
    }

    /// Statements between the current `{` and its matching `}`. Reaching end
    /// of input first records the missing brace and returns what was parsed.
    fn parse_block_statement(&mut self) -> BlockStatement {
        let token = self.current.token.clone();
        let mut statements = Vec::new();

        self.advance();
        while !self.current_is(TokenType::RightBrace) && !self.current_is(TokenType::Eof) {
            if let Some(statement) = self.parse_statement() {
                statements.push(statement);
            }
            self.advance();
        }

        if self.current_is(TokenType::Eof) {
            let message = format!(
                "expected next token to be {}, got {} instead",
                TokenType::RightBrace,
                TokenType::Eof
            );
            self.errors
                .push(KeaError::parse_error(self.current.span.clone(), message));
        }

        BlockStatement { token, statements }
    }

    fn current_identifier(&self) -> Identifier {
        Identifier {
            token: self.current.token.clone(),
            name: self.current.token.literal.clone(),
        }
    }

    fn advance(&mut self) {
        self.current = mem::replace(&mut self.peek, self.lexer.next_localized());
    }

    fn current_is(&self, token_type: TokenType) -> bool {
        self.current.token.token_type == token_type
    }

    fn peek_is(&self, token_type: TokenType) -> bool {
        self.peek.token.token_type == token_type
    }

    fn current_precedence(&self) -> Precedence {
        Precedence::of(self.current.token.token_type)
    }

    fn peek_precedence(&self) -> Precedence {
        Precedence::of(self.peek.token.token_type)
    }

    fn expect_peek(&mut self, expected: TokenType) -> bool {
        if self.peek_is(expected) {
            self.advance();
            true
        } else {
            self.peek_error(expected, None);
            false
        }
    }

    fn expect_peek_with_help(&mut self, expected: TokenType, help: &str) -> bool {
        if self.peek_is(expected) {
            self.advance();
            true
        } else {
            self.peek_error(expected, Some(help.to_string()));
            false
        }
    }

    fn peek_error(&mut self, expected: TokenType, help: Option<String>) {
        let message = format!(
            "expected next token to be {}, got {} instead",
            expected, self.peek.token.token_type
        );
        let span = self.peek.span.clone();
        let error = match help {
            Some(help) => KeaError::parse_error_with_help(span, message, help),
            None => KeaError::parse_error(span, message),
        };
        self.errors.push(error);
    }
}
