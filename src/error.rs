use ariadne::{Color, Fmt, Label, Report, ReportKind, Source};
use std::fmt;

/// Half-open range of character offsets into the source text.
#[derive(Debug, Clone, PartialEq)]
pub struct Span {
    pub start: usize,
    pub end: usize,
}

impl Span {
    pub fn new(start: usize, end: usize) -> Self {
        Self { start, end }
    }

    pub fn single(pos: usize) -> Self {
        Self {
            start: pos,
            end: pos + 1,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum ErrorKind {
    LexError,
    ParseError,
    RuntimeError,
}

/// A single diagnostic: what went wrong, where (when a position is known),
/// and an optional hint for fixing it.
///
/// Parse diagnostics carry the span of the offending token. Runtime errors
/// carry no span because AST nodes hold plain tokens without position
/// metadata.
#[derive(Debug, Clone)]
pub struct KeaError {
    pub kind: ErrorKind,
    pub span: Option<Span>,
    pub message: String,
    pub help: Option<String>,
}

impl KeaError {
    pub fn new(kind: ErrorKind, span: Option<Span>, message: String) -> Self {
        Self {
            kind,
            span,
            message,
            help: None,
        }
    }

    pub fn lex_error(span: Span, message: String) -> Self {
        Self::new(ErrorKind::LexError, Some(span), message)
    }

    pub fn parse_error(span: Span, message: String) -> Self {
        Self::new(ErrorKind::ParseError, Some(span), message)
    }

    pub fn parse_error_with_help(span: Span, message: String, help: String) -> Self {
        let mut error = Self::parse_error(span, message);
        error.help = Some(help);
        error
    }

    pub fn runtime_error(message: String) -> Self {
        Self::new(ErrorKind::RuntimeError, None, message)
    }

    pub fn runtime_error_with_help(message: String, help: String) -> Self {
        let mut error = Self::runtime_error(message);
        error.help = Some(help);
        error
    }

    pub fn report(&self, source: &str, filename: Option<&str>) {
        let filename = filename.unwrap_or("<repl>");

        let color = match self.kind {
            ErrorKind::LexError => Color::Red,
            ErrorKind::ParseError => Color::Yellow,
            ErrorKind::RuntimeError => Color::Magenta,
        };

        let kind_str = match self.kind {
            ErrorKind::LexError => "Lexical Error",
            ErrorKind::ParseError => "Parse Error",
            ErrorKind::RuntimeError => "Runtime Error",
        };

        let offset = self.span.as_ref().map_or(0, |span| span.start);
        let mut report_builder = Report::build(ReportKind::Error, filename, offset)
            .with_message(format!("{}: {}", kind_str.fg(color), self.message));

        if let Some(ref span) = self.span {
            report_builder = report_builder.with_label(
                Label::new((filename, span.start..span.end))
                    .with_message(&self.message)
                    .with_color(color),
            );
        }

        if let Some(ref help_text) = self.help {
            report_builder =
                report_builder.with_note(format!("{}: {}", "help".fg(Color::Cyan), help_text));
        }

        report_builder
            .finish()
            .print((filename, Source::from(source)))
            .unwrap();
    }
}

impl fmt::Display for KeaError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}", self.message)
    }
}

impl std::error::Error for KeaError {}

/// The all-or-nothing outcome of a parse: every diagnostic the parser
/// recorded, in source order.
#[derive(Debug, Clone)]
pub struct ParseFailure {
    errors: Vec<KeaError>,
}

impl ParseFailure {
    pub fn new(errors: Vec<KeaError>) -> Self {
        Self { errors }
    }

    pub fn errors(&self) -> &[KeaError] {
        &self.errors
    }

    pub fn report(&self, source: &str, filename: Option<&str>) {
        for error in &self.errors {
            error.report(source, filename);
        }
    }
}

impl fmt::Display for ParseFailure {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        for (i, error) in self.errors.iter().enumerate() {
            if i > 0 {
                writeln!(f)?;
            }
            write!(f, "{}", error)?;
        }
        Ok(())
    }
}

impl std::error::Error for ParseFailure {}
