//! Infix arithmetic evaluation through the shunting-yard algorithm.
//!
//! Text is split into tokens, rearranged into postfix order and reduced on
//! an operand stack:
//!
//! ```
//! assert_eq!(rpncalc::evaluate("(3+4)*2"), Ok(14.0));
//! ```

#[macro_use]
mod util;

pub mod config;
pub mod error;
pub mod eval;
pub mod history;
pub mod lexer;
pub mod number;
pub mod output;
pub mod parser;

pub use error::EvalError;
pub use eval::evaluate_postfix;
pub use lexer::{tokenize, Op, Token};
pub use number::is_number;
pub use parser::{to_postfix, Postfix};

/// Evaluates an infix expression such as `2(3+4)^2`.
pub fn evaluate(expression: &str) -> Result<f64, EvalError> {
    let tokens = tokenize(expression)?;
    let postfix = to_postfix(tokens)?;
    evaluate_postfix(postfix)
}

/// Evaluates whitespace separated postfix words such as `3 4 2 * +`.
pub fn evaluate_rpn(words: &str) -> Result<f64, EvalError> {
    evaluate_postfix(words.parse()?)
}
