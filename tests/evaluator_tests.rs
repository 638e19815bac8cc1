// Evaluator tests for the Kea language.
//
// Programs evaluate to their last statement's value; a return anywhere
// short-circuits straight to the program boundary, no matter how deeply
// nested it sits.

use kea::ast::{BlockStatement, Expression, Program, Statement};
use kea::lexer::{Lexer, Token, TokenType};
use kea::parser::Parser;
use kea::value::Value;

fn run(input: &str) -> Value {
    let mut parser = Parser::new(Lexer::new(input));
    let program = match parser.parse_program_checked() {
        Ok(program) => program,
        Err(failure) => panic!("parse failed for {:?}: {}", input, failure),
    };
    match kea::evaluate(&program) {
        Ok(value) => value,
        Err(error) => panic!("evaluation failed for {:?}: {}", input, error),
    }
}

fn run_error(input: &str) -> String {
    let mut parser = Parser::new(Lexer::new(input));
    let program = match parser.parse_program_checked() {
        Ok(program) => program,
        Err(failure) => panic!("parse failed for {:?}: {}", input, failure),
    };
    match kea::evaluate(&program) {
        Ok(value) => panic!("expected a runtime error for {:?}, got {}", input, value),
        Err(error) => error.to_string(),
    }
}

#[test]
fn integer_arithmetic() {
    let cases = [
        ("5", 5),
        ("10", 10),
        ("0", 0),
        ("-5", -5),
        ("-10", -10),
        ("--100", 100),
        ("5 + 5 + 5 + 5 - 10", 10),
        ("2 * 2 * 2 * 2 * 2", 32),
        ("-50 + 100 + -50", 0),
        ("5 * 2 + 10", 20),
        ("5 + 2 * 10", 25),
        ("20 + 2 * -10", 0),
        ("50 / 2 * 2 + 10", 60),
        ("2 * (5 + 10)", 30),
        ("3 * 3 * 3 + 10", 37),
        ("3 * (3 * 3) + 10", 37),
        ("(5 + 10 * 2 + 15 / 3) * 2 + -10", 50),
    ];

    for (input, expected) in cases {
        assert_eq!(run(input), Value::Int(expected), "input: {}", input);
    }
}

#[test]
fn boolean_expressions() {
    let cases = [
        ("true", true),
        ("false", false),
        ("1 < 2", true),
        ("1 > 2", false),
        ("1 < 1", false),
        ("1 > 1", false),
        ("1 == 1", true),
        ("1 != 1", false),
        ("1 == 2", false),
        ("1 != 2", true),
        ("true == true", true),
        ("false == false", true),
        ("true == false", false),
        ("true != false", true),
        ("false != true", true),
        ("(1 < 2) == true", true),
        ("(1 < 2) == false", false),
        ("(1 > 2) == true", false),
        ("(1 > 2) == false", true),
    ];

    for (input, expected) in cases {
        assert_eq!(run(input), Value::Bool(expected), "input: {}", input);
    }
}

#[test]
fn bang_negates_truthiness() {
    let cases = [("!true", false), ("!false", true), ("!5", false), ("!!5", true)];

    for (input, expected) in cases {
        assert_eq!(run(input), Value::Bool(expected), "input: {}", input);
    }
}

#[test]
fn if_else_selects_by_truthiness() {
    let cases: [(&str, Option<i64>); 8] = [
        ("if (true) { 10 }", Some(10)),
        ("if (false) { 10 }", None),
        ("if (1) { 10 }", Some(10)),
        ("if (1 < 2) { 10 }", Some(10)),
        ("if (1 > 2) { 10 }", None),
        ("if (1 > 2) { 10 } else { 20 }", Some(20)),
        ("if (1 < 2) { 10 } else { 20 }", Some(10)),
        // Zero is truthy; only false and null are not.
        ("if (0) { 1 } else { 2 }", Some(1)),
    ];

    for (input, expected) in cases {
        let expected = match expected {
            Some(n) => Value::Int(n),
            None => Value::NULL,
        };
        assert_eq!(run(input), expected, "input: {}", input);
    }
}

#[test]
fn return_short_circuits_evaluation() {
    let cases = [
        ("return 10;", 10),
        ("return 10; 9;", 10),
        ("return 2 * 5; 9;", 10),
        ("9; return 2 * 5; 9;", 10),
        // The signal unwinds through both nested blocks, not just the inner.
        ("if (10 > 1) { if (10 > 1) { return 10; } return 1; }", 10),
        // A return inside an operand escapes the whole expression.
        ("1 + if (true) { return 5; }; 99", 5),
        ("if (true) { return 2; } * 3; 99", 2),
        ("!if (true) { return 3; }; 99", 3),
        ("if (if (true) { return 4; }) { 1 }; 99", 4),
    ];

    for (input, expected) in cases {
        assert_eq!(run(input), Value::Int(expected), "input: {}", input);
    }
}

#[test]
fn empty_programs_and_blocks_are_null() {
    assert_eq!(run(""), Value::NULL);
    assert_eq!(run("if (true) {}"), Value::NULL);
}

#[test]
fn function_literals_become_inert_values() {
    let value = run("fn(x, y) { x + y; }");
    match &value {
        Value::Function { parameters, .. } => {
            let names: Vec<&str> = parameters.iter().map(|p| p.name.as_str()).collect();
            assert_eq!(names, ["x", "y"]);
        }
        other => panic!("expected function value, got {}", other),
    }
    assert_eq!(value.to_string(), "fn(x, y) {\n(x + y)\n}");
}

#[test]
fn function_values_compare_structurally() {
    let a = run("fn(x) { x + 1; }");
    let b = run("fn(x) { x + 1; }");
    let c = run("fn(x) { x + 2; }");

    assert_eq!(a, b);
    assert_ne!(a, c);
}

#[test]
fn equality_across_types_is_never_true() {
    let cases = [("5 == true", false), ("5 != true", true), ("5 == false", false)];

    for (input, expected) in cases {
        assert_eq!(run(input), Value::Bool(expected), "input: {}", input);
    }
}

#[test]
fn runtime_errors_name_the_offending_types() {
    let cases = [
        ("5 + true", "Cannot add int and bool"),
        ("5 + true; 5;", "Cannot add int and bool"),
        ("-true", "Cannot negate bool"),
        ("true - false", "Cannot subtract bool and bool"),
        ("true * false", "Cannot multiply bool and bool"),
        ("true < false", "Cannot compare bool and bool"),
        ("5 / 0", "Division by zero"),
        ("(-9223372036854775807 - 1) / -1", "Integer overflow in division"),
        ("foobar", "Undefined variable 'foobar'"),
        ("let a = 5;", "Variable bindings not yet implemented"),
    ];

    for (input, expected) in cases {
        assert_eq!(run_error(input), expected, "input: {}", input);
    }
}

#[test]
fn truthiness_follows_the_singleton_rule() {
    assert!(!Value::NULL.is_truthy());
    assert!(!Value::FALSE.is_truthy());
    assert!(Value::TRUE.is_truthy());
    assert!(Value::Int(0).is_truthy());
    assert!(Value::Int(-1).is_truthy());
}

#[test]
fn values_render_their_payload() {
    assert_eq!(Value::NULL.to_string(), "null");
    assert_eq!(Value::TRUE.to_string(), "true");
    assert_eq!(Value::Int(-7).to_string(), "-7");

    assert_eq!(Value::NULL.type_name(), "null");
    assert_eq!(Value::FALSE.type_name(), "bool");
    assert_eq!(Value::Int(3).type_name(), "int");
}

#[test]
fn block_statements_propagate_return_signals() {
    fn integer(literal: &str, value: i64) -> Expression {
        Expression::Integer {
            token: Token::new(TokenType::Integer, literal.to_string()),
            value,
        }
    }

    // Built by hand because blocks never appear in statement position in
    // parsed source, only inside if and fn bodies.
    let block = BlockStatement {
        token: Token::new(TokenType::LeftBrace, "{".to_string()),
        statements: vec![
            Statement::Expression {
                token: Token::new(TokenType::Integer, "9".to_string()),
                value: integer("9", 9),
            },
            Statement::Return {
                token: Token::new(TokenType::Return, "return".to_string()),
                value: integer("7", 7),
            },
            Statement::Expression {
                token: Token::new(TokenType::Integer, "1".to_string()),
                value: integer("1", 1),
            },
        ],
    };
    let program = Program {
        statements: vec![Statement::Block(block)],
    };

    assert_eq!(kea::evaluate(&program).unwrap(), Value::Int(7));
}
