use crate::ast::{BlockStatement, Expression, Program, Statement};
use crate::error::KeaError;
use crate::value::Value;

/// What evaluating one statement or expression produced: a plain value, or a
/// return signal carrying its value toward the program boundary.
///
/// Every block checks for the `Return` variant after each statement and
/// re-propagates it unchanged, so a `return` nested arbitrarily deep unwinds
/// all the way out without evaluating anything further.
enum ControlFlow {
    Value(Value),
    Return(Value),
}

impl ControlFlow {
    fn into_value(self) -> Value {
        match self {
            ControlFlow::Value(value) | ControlFlow::Return(value) => value,
        }
    }
}

/// Reduces a program to its final value. The last statement's value wins, an
/// empty program is `null`, and a `return` anywhere ends evaluation with the
/// returned value.
pub fn eval(program: &Program) -> Result<Value, KeaError> {
    let mut result = ControlFlow::Value(Value::NULL);

    for statement in &program.statements {
        result = eval_statement(statement)?;
        if let ControlFlow::Return(_) = result {
            break;
        }
    }

    Ok(result.into_value())
}

fn eval_statement(statement: &Statement) -> Result<ControlFlow, KeaError> {
    match statement {
        Statement::Let { .. } => Err(KeaError::runtime_error_with_help(
            "Variable bindings not yet implemented".to_string(),
            "evaluate the expression directly instead of binding it to a name".to_string(),
        )),
        Statement::Return { value, .. } => match eval_expression(value)? {
            ControlFlow::Value(value) => Ok(ControlFlow::Return(value)),
            signal => Ok(signal),
        },
        Statement::Expression { value, .. } => eval_expression(value),
        Statement::Block(block) => eval_block(block),
    }
}

fn eval_block(block: &BlockStatement) -> Result<ControlFlow, KeaError> {
    let mut result = ControlFlow::Value(Value::NULL);

    for statement in &block.statements {
        result = eval_statement(statement)?;
        if let ControlFlow::Return(_) = result {
            // Unchanged, so every enclosing block unwinds too.
            return Ok(result);
        }
    }

    Ok(result)
}

fn eval_expression(expression: &Expression) -> Result<ControlFlow, KeaError> {
    match expression {
        Expression::Identifier(identifier) => Err(KeaError::runtime_error_with_help(
            format!("Undefined variable '{}'", identifier.name),
            "variable bindings are not yet implemented, so no name has a value".to_string(),
        )),
        Expression::Integer { value, .. } => Ok(ControlFlow::Value(Value::Int(*value))),
        Expression::Boolean { value, .. } => Ok(ControlFlow::Value(Value::from_bool(*value))),
        Expression::Prefix {
            operator, right, ..
        } => {
            let right = match eval_expression(right)? {
                ControlFlow::Value(value) => value,
                signal => return Ok(signal),
            };
            eval_prefix(operator, right).map(ControlFlow::Value)
        }
        Expression::Infix {
            left,
            operator,
            right,
            ..
        } => {
            let left = match eval_expression(left)? {
                ControlFlow::Value(value) => value,
                signal => return Ok(signal),
            };
            let right = match eval_expression(right)? {
                ControlFlow::Value(value) => value,
                signal => return Ok(signal),
            };
            eval_infix(operator, left, right).map(ControlFlow::Value)
        }
        Expression::If {
            condition,
            consequence,
            alternative,
            ..
        } => {
            let condition = match eval_expression(condition)? {
                ControlFlow::Value(value) => value,
                signal => return Ok(signal),
            };
            if condition.is_truthy() {
                eval_block(consequence)
            } else if let Some(alternative) = alternative {
                eval_block(alternative)
            } else {
                Ok(ControlFlow::Value(Value::NULL))
            }
        }
        Expression::Function {
            parameters, body, ..
        } => Ok(ControlFlow::Value(Value::Function {
            parameters: parameters.clone(),
            body: body.clone(),
        })),
    }
}

fn eval_prefix(operator: &str, right: Value) -> Result<Value, KeaError> {
    match operator {
        "!" => Ok(Value::from_bool(!right.is_truthy())),
        "-" => match right {
            Value::Int(n) => Ok(Value::Int(-n)),
            other => Err(KeaError::runtime_error(format!(
                "Cannot negate {}",
                other.type_name()
            ))),
        },
        _ => Err(KeaError::runtime_error(format!(
            "Unknown operator '{}'",
            operator
        ))),
    }
}

fn eval_infix(operator: &str, left: Value, right: Value) -> Result<Value, KeaError> {
    match (left, right) {
        (Value::Int(left), Value::Int(right)) => eval_integer_infix(operator, left, right),
        // Equality works across all value kinds; everything else needs
        // integers on both sides.
        (left, right) => match operator {
            "==" => Ok(Value::from_bool(left == right)),
            "!=" => Ok(Value::from_bool(left != right)),
            "+" => Err(KeaError::runtime_error(format!(
                "Cannot add {} and {}",
                left.type_name(),
                right.type_name()
            ))),
            "-" => Err(KeaError::runtime_error(format!(
                "Cannot subtract {} and {}",
                left.type_name(),
                right.type_name()
            ))),
            "*" => Err(KeaError::runtime_error(format!(
                "Cannot multiply {} and {}",
                left.type_name(),
                right.type_name()
            ))),
            "/" => Err(KeaError::runtime_error(format!(
                "Cannot divide {} and {}",
                left.type_name(),
                right.type_name()
            ))),
            "<" | ">" => Err(KeaError::runtime_error(format!(
                "Cannot compare {} and {}",
                left.type_name(),
                right.type_name()
            ))),
            _ => Err(KeaError::runtime_error(format!(
                "Unknown operator '{}'",
                operator
            ))),
        },
    }
}

fn eval_integer_infix(operator: &str, left: i64, right: i64) -> Result<Value, KeaError> {
    match operator {
        "+" => Ok(Value::Int(left + right)),
        "-" => Ok(Value::Int(left - right)),
        "*" => Ok(Value::Int(left * right)),
        "/" => {
            if right == 0 {
                Err(KeaError::runtime_error("Division by zero".to_string()))
            } else if left == i64::MIN && right == -1 {
                // The only quotient that does not fit in an i64.
                Err(KeaError::runtime_error(
                    "Integer overflow in division".to_string(),
                ))
            } else {
                Ok(Value::Int(left / right))
            }
        }
        "<" => Ok(Value::from_bool(left < right)),
        ">" => Ok(Value::from_bool(left > right)),
        "==" => Ok(Value::from_bool(left == right)),
        "!=" => Ok(Value::from_bool(left != right)),
        _ => Err(KeaError::runtime_error(format!(
            "Unknown operator '{}'",
            operator
        ))),
    }
}
