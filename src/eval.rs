use crate::error::EvalError;
use crate::lexer::{Op, Token};
use crate::number::is_number;
use crate::parser::Postfix;

fn parse_number(num: &str) -> Result<f64, EvalError> {
    if !is_number(num) {
        raise!(EvalError::InvalidNumber(num.into()));
    }

    let x: f64 = match num.parse() {
        Ok(x) => x,
        Err(_) => raise!(EvalError::InvalidNumber(num.into())),
    };

    if !x.is_finite() {
        raise!(EvalError::NumberOutOfRange(num.into()));
    }

    Ok(x)
}

fn evaluate_pow(a: f64, b: f64) -> Result<f64, EvalError> {
    if a == 0.0 && b < 0.0 {
        raise!(EvalError::ZeroToNegativePower);
    }

    if a < 0.0 && b.floor() != b {
        raise!(EvalError::NegativeBaseFractionalExponent);
    }

    Ok(a.powf(b))
}

/// Applies `op` to `a` (pushed first) and `b` (pushed second).
pub fn evaluate_binop(op: Op, a: f64, b: f64) -> Result<f64, EvalError> {
    let out = match op {
        Op::Add => a + b,
        Op::Sub => a - b,
        Op::Mul => a * b,
        Op::Div => {
            if b.abs() < f64::EPSILON {
                raise!(EvalError::DivisionByZero);
            }

            a / b
        }
        Op::Pow => evaluate_pow(a, b)?,
    };

    Ok(out)
}

/// Reduces a postfix sequence to a single value using an operand stack.
pub fn evaluate_postfix(postfix: Postfix) -> Result<f64, EvalError> {
    let mut values: Vec<f64> = Vec::with_capacity(postfix.len());

    for token in postfix {
        if let Token::Number(num) = &token {
            values.push(parse_number(num)?);
            continue;
        }

        let (b, a) = match (values.pop(), values.pop()) {
            (Some(b), Some(a)) => (b, a),
            _ => raise!(EvalError::MalformedExpression, "not enough operands"),
        };

        let out = match token {
            Token::Operator(op) => evaluate_binop(op, a, b)?,
            other => raise!(EvalError::UnknownOperator(other.name())),
        };

        values.push(out);
    }

    match values.as_slice() {
        [x] => Ok(*x),
        [] => raise!(EvalError::MalformedExpression, "empty expression"),
        _ => raise!(EvalError::MalformedExpression, "too many operands"),
    }
}
