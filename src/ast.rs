use crate::lexer::Token;
use std::fmt;

/// The root node: a flat sequence of statements. Its `Display` impl renders
/// the canonical form of the whole source, one statement per line.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Program {
    pub statements: Vec<Statement>,
}

impl Program {
    pub fn new() -> Self {
        Self {
            statements: Vec::new(),
        }
    }

    pub fn token_literal(&self) -> String {
        match self.statements.first() {
            Some(statement) => statement.token_literal(),
            None => String::new(),
        }
    }
}

impl fmt::Display for Program {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        let rendered: Vec<String> = self.statements.iter().map(ToString::to_string).collect();
        write!(f, "{}", rendered.join("\n"))
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum Statement {
    /// `let <name> = <value>;`
    Let {
        token: Token,
        name: Identifier,
        value: Expression,
    },
    /// `return <value>;`
    Return { token: Token, value: Expression },
    /// A bare expression used as a statement; the backbone of the language.
    Expression { token: Token, value: Expression },
    /// A braced group of statements appearing in statement position.
    Block(BlockStatement),
}

impl Statement {
    pub fn token_literal(&self) -> String {
        match self {
            Statement::Let { token, .. } => token.literal.clone(),
            Statement::Return { token, .. } => token.literal.clone(),
            Statement::Expression { token, .. } => token.literal.clone(),
            Statement::Block(block) => block.token_literal(),
        }
    }
}

impl fmt::Display for Statement {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            Statement::Let { name, value, .. } => write!(f, "let {} = {};", name, value),
            Statement::Return { value, .. } => write!(f, "return {};", value),
            Statement::Expression { value, .. } => write!(f, "{}", value),
            Statement::Block(block) => write!(f, "{}", block),
        }
    }
}

/// Statements between `{` and `}`. Kept distinct from `Statement::Block` so
/// `if` consequences and function bodies can hold one directly.
#[derive(Debug, Clone, PartialEq)]
pub struct BlockStatement {
    pub token: Token,
    pub statements: Vec<Statement>,
}

impl BlockStatement {
    pub fn token_literal(&self) -> String {
        self.token.literal.clone()
    }
}

impl fmt::Display for BlockStatement {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        let rendered: Vec<String> = self.statements.iter().map(ToString::to_string).collect();
        write!(f, "{}", rendered.join("\n"))
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Identifier {
    pub token: Token,
    pub name: String,
}

impl Identifier {
    pub fn token_literal(&self) -> String {
        self.token.literal.clone()
    }
}

impl fmt::Display for Identifier {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}", self.name)
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum Expression {
    Identifier(Identifier),
    /// Integer literal, already parsed to a value; the token keeps the
    /// source spelling.
    Integer { token: Token, value: i64 },
    Boolean { token: Token, value: bool },
    /// `!` or `-` applied to a single operand. Renders fully parenthesized:
    /// `(-a)`, `(!true)`.
    Prefix {
        token: Token,
        operator: String,
        right: Box<Expression>,
    },
    /// A binary operation. Renders fully parenthesized, which makes operator
    /// precedence visible in the output: `((a + b) * c)`.
    Infix {
        token: Token,
        left: Box<Expression>,
        operator: String,
        right: Box<Expression>,
    },
    If {
        token: Token,
        condition: Box<Expression>,
        consequence: BlockStatement,
        alternative: Option<BlockStatement>,
    },
    /// `fn(<params>) { <body> }`. A literal value; calling it is outside the
    /// language for now.
    Function {
        token: Token,
        parameters: Vec<Identifier>,
        body: BlockStatement,
    },
}

impl Expression {
    pub fn token_literal(&self) -> String {
        match self {
            Expression::Identifier(identifier) => identifier.token_literal(),
            Expression::Integer { token, .. } => token.literal.clone(),
            Expression::Boolean { token, .. } => token.literal.clone(),
            Expression::Prefix { token, .. } => token.literal.clone(),
            Expression::Infix { token, .. } => token.literal.clone(),
            Expression::If { token, .. } => token.literal.clone(),
            Expression::Function { token, .. } => token.literal.clone(),
        }
    }
}

impl fmt::Display for Expression {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            Expression::Identifier(identifier) => write!(f, "{}", identifier),
            Expression::Integer { token, .. } => write!(f, "{}", token.literal),
            Expression::Boolean { token, .. } => write!(f, "{}", token.literal),
            Expression::Prefix {
                operator, right, ..
            } => write!(f, "({}{})", operator, right),
            Expression::Infix {
                left,
                operator,
                right,
                ..
            } => write!(f, "({} {} {})", left, operator, right),
            Expression::If {
                condition,
                consequence,
                alternative,
                ..
            } => {
                write!(f, "if ({}) {{\n{}\n}}", condition, consequence)?;
                if let Some(alternative) = alternative {
                    write!(f, " else {{\n{}\n}}", alternative)?;
                }
                Ok(())
            }
            Expression::Function {
                parameters, body, ..
            } => {
                let params: Vec<String> = parameters.iter().map(ToString::to_string).collect();
                write!(f, "fn({}) {{\n{}\n}}", params.join(", "), body)
            }
        }
    }
}
