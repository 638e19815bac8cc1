use crate::error::KeaError;
use crate::evaluator;
use crate::lexer::{Lexer, TokenType};
use crate::parser::Parser;

/// What the driver does with a piece of source text.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Mode {
    /// Parse and evaluate, printing the resulting value.
    Evaluate,
    /// Parse only, printing the program's canonical rendering.
    PrintAst,
    /// Lex only, printing each token with its position.
    PrintTokens,
}

/// Runs `source` in the given mode, printing either the result or the
/// accumulated diagnostics, never both.
pub fn run(source: &str, filename: Option<&str>, mode: Mode) {
    match mode {
        Mode::PrintTokens => print_tokens(source, filename),
        Mode::PrintAst => print_ast(source, filename),
        Mode::Evaluate => evaluate(source, filename),
    }
}

fn print_tokens(source: &str, filename: Option<&str>) {
    let mut lexer = Lexer::new(source);

    loop {
        let localized = lexer.next_localized();
        match localized.token.token_type {
            TokenType::Eof => break,
            // Bad characters never stop the scan
            TokenType::Illegal => {
                let message = format!("Unexpected character: '{}'", localized.token.literal);
                KeaError::lex_error(localized.span, message).report(source, filename);
            }
            _ => println!("{}", localized),
        }
    }
}

fn print_ast(source: &str, filename: Option<&str>) {
    let mut parser = Parser::new(Lexer::new(source));
    match parser.parse_program_checked() {
        Ok(program) => println!("{}", program),
        Err(failure) => failure.report(source, filename),
    }
}

fn evaluate(source: &str, filename: Option<&str>) {
    // Parsing
    let mut parser = Parser::new(Lexer::new(source));
    let program = match parser.parse_program_checked() {
        Ok(program) => program,
        Err(failure) => {
            failure.report(source, filename);
            return;
        }
    };

    // Evaluation
    match evaluator::eval(&program) {
        Ok(value) => println!("{}", value),
        Err(error) => error.report(source, filename),
    }
}
