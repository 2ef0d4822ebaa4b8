use crate::error::EvalError;
use crate::lexer::Token;
use crate::number::is_number;
use itertools::Itertools;
use std::fmt;
use std::str::FromStr;
use std::vec;

/// Tokens in reverse Polish order, ready to be evaluated once.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Postfix(Vec<Token>);

impl Postfix {
    pub fn new(tokens: Vec<Token>) -> Self {
        Postfix(tokens)
    }

    pub fn tokens(&self) -> &[Token] {
        &self.0
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl IntoIterator for Postfix {
    type Item = Token;
    type IntoIter = vec::IntoIter<Token>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.into_iter()
    }
}

impl fmt::Display for Postfix {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}", self.0.iter().join(" "))
    }
}

/// Reads whitespace separated words such as `3 4 2 * +`. Never fails;
/// words that are not numbers or operators surface as `Token::Unknown`
/// and are reported by the evaluator.
impl FromStr for Postfix {
    type Err = EvalError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(Postfix(s.split_whitespace().map(Token::from_word).collect()))
    }
}

/// Shunting-yard conversion from infix tokens to postfix order.
///
/// Every operator is left-associative, `^` included, so `2^3^2` becomes
/// `2 3 ^ 2 ^`. A `)` without a matching `(` is dropped, and so is any `(`
/// left open at the end of input.
pub fn to_postfix(tokens: Vec<Token>) -> Result<Postfix, EvalError> {
    let mut output = Vec::with_capacity(tokens.len());
    let mut operators: Vec<Token> = vec![];

    for token in tokens {
        match token {
            Token::Number(ref num) => {
                if !is_number(num) {
                    raise!(EvalError::InvalidNumber(num.clone()));
                }

                output.push(token);
            }
            Token::LeftParen => operators.push(token),
            Token::RightParen => {
                while let Some(top) = operators.pop() {
                    if top == Token::LeftParen {
                        break;
                    }

                    output.push(top);
                }
            }
            Token::Operator(op) => {
                while let Some(&Token::Operator(top)) = operators.last() {
                    if top.precedence() < op.precedence() {
                        break;
                    }

                    operators.pop();
                    output.push(Token::Operator(top));
                }

                operators.push(token);
            }
            Token::Unknown(word) => raise!(EvalError::UnknownOperator(word)),
        }
    }

    while let Some(top) = operators.pop() {
        if top != Token::LeftParen {
            output.push(top);
        }
    }

    Ok(Postfix(output))
}

#[cfg(test)]
mod test {
    use super::{to_postfix, Postfix};
    use crate::error::EvalError;
    use crate::lexer::{tokenize, Token};

    fn test_match(infix: &str, postfix: &str) {
        let tokens = tokenize(infix).unwrap();
        let out = to_postfix(tokens).unwrap();
        assert_eq!(out.to_string(), postfix, "converting {:?}", infix);
    }

    #[test]
    fn test_precedence() {
        test_match("3+4*2", "3 4 2 * +");
        test_match("3*4+2", "3 4 * 2 +");
        test_match("1+2^3*4", "1 2 3 ^ 4 * +");
        test_match("8/2-1", "8 2 / 1 -");
    }

    #[test]
    fn test_left_associative() {
        test_match("1-2-3", "1 2 - 3 -");
        test_match("8/4/2", "8 4 / 2 /");
        test_match("2^3^2", "2 3 ^ 2 ^");
    }

    #[test]
    fn test_parens() {
        test_match("(3+4)*2", "3 4 + 2 *");
        test_match("2*(3+4)", "2 3 4 + *");
        test_match("((1))", "1");
        test_match("2(3+4)", "2 3 4 + *");
        test_match("2^(3^2)", "2 3 2 ^ ^");
    }

    #[test]
    fn test_unbalanced_parens() {
        test_match("1+2)*3", "1 2 + 3 *");
        test_match("(1+2", "1 2 +");
        test_match(")", "");
    }

    #[test]
    fn test_structural_only() {
        // Conversion does not check operand counts.
        test_match("3+", "3 +");
        test_match("+", "+");
        test_match("", "");
    }

    #[test]
    fn test_errors() {
        let tokens = vec![Token::Number("1.2.3".into())];
        assert_eq!(
            to_postfix(tokens),
            Err(EvalError::InvalidNumber("1.2.3".into()))
        );

        let tokens = vec![Token::Unknown("%".into())];
        assert_eq!(
            to_postfix(tokens),
            Err(EvalError::UnknownOperator("%".into()))
        );
    }

    #[test]
    fn test_from_str() {
        let postfix: Postfix = "3  4\t2 * +".parse().unwrap();
        assert_eq!(postfix.len(), 5);
        assert_eq!(postfix.to_string(), "3 4 2 * +");

        let postfix: Postfix = "".parse().unwrap();
        assert!(postfix.is_empty());

        let postfix: Postfix = "1 mod".parse().unwrap();
        assert_eq!(postfix.tokens()[1], Token::Unknown("mod".into()));
    }
}
