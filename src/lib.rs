// Kea Language Interpreter Library
//
// This is the core library for the Kea language interpreter, a small C-like
// expression language with rich error diagnostics.

// Public modules
pub mod ast;
pub mod error;
pub mod evaluator;
pub mod lexer;
pub mod parser;
pub mod repl;
pub mod runner;
pub mod value;

// Re-export commonly used items
pub use ast::{BlockStatement, Expression, Identifier, Program, Statement};
pub use error::{ErrorKind, KeaError, ParseFailure, Span};
pub use lexer::{Lexer, LocalizedToken, Token, TokenType};
pub use parser::{Parser, Precedence};
pub use value::Value;

// Re-export main functions
pub use repl::start as start_repl;
pub use runner::{run, Mode};

/// Lazily tokenizes `source`. The returned lexer iterates every token up to
/// and including the end-of-input marker; unrecognized characters come
/// through as `Illegal` tokens rather than stopping the stream.
pub fn tokenize(source: &str) -> Lexer {
    Lexer::new(source)
}

/// Parses `source` into a program plus whatever diagnostics were recorded.
/// An empty diagnostics list means the parse succeeded; otherwise the
/// program holds whatever statements could still be built.
pub fn parse(source: &str) -> (Program, Vec<String>) {
    let mut parser = Parser::new(Lexer::new(source));
    let program = parser.parse_program();
    let diagnostics = parser.errors().iter().map(ToString::to_string).collect();
    (program, diagnostics)
}

/// Evaluates a parsed program to its final runtime value.
pub fn evaluate(program: &Program) -> Result<Value, KeaError> {
    evaluator::eval(program)
}
