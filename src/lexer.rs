use crate::error::EvalError;
use crate::number::is_number;
use std::fmt;
use std::mem;

#[derive(Debug, PartialEq, Eq, Clone, Copy)]
pub enum Op {
    Add,
    Sub,
    Mul,
    Div,
    Pow,
}

#[derive(Debug, PartialEq, Eq, Clone)]
pub enum Token {
    LeftParen,
    RightParen,
    Number(String),
    Operator(Op),
    /// A word that is neither a number nor an operator. Only produced when
    /// postfix text is read word by word; `tokenize` rejects such input.
    Unknown(String),
}

impl Op {
    pub fn symbol(self) -> char {
        match self {
            Op::Add => '+',
            Op::Sub => '-',
            Op::Mul => '*',
            Op::Div => '/',
            Op::Pow => '^',
        }
    }

    pub fn from_char(c: char) -> Option<Op> {
        let op = match c {
            '+' => Op::Add,
            '-' => Op::Sub,
            '*' => Op::Mul,
            '/' => Op::Div,
            '^' => Op::Pow,
            _ => return None,
        };

        Some(op)
    }

    /// Binding strength; higher binds tighter. Parentheses sit below every
    /// operator at 0 and only ever act as stack sentinels.
    pub fn precedence(self) -> u8 {
        match self {
            Op::Add | Op::Sub => 1,
            Op::Mul | Op::Div => 2,
            Op::Pow => 3,
        }
    }
}

impl Token {
    pub fn name(&self) -> String {
        match self {
            Token::LeftParen => "(",
            Token::RightParen => ")",
            Token::Number(x) | Token::Unknown(x) => x.as_str(),
            Token::Operator(x) => return x.symbol().to_string(),
        }
        .into()
    }

    /// Classifies a single whitespace-free word.
    pub fn from_word(word: &str) -> Token {
        if is_number(word) {
            return Token::Number(word.into());
        }

        let mut chars = word.chars();

        match (chars.next(), chars.next()) {
            (Some('('), None) => Token::LeftParen,
            (Some(')'), None) => Token::RightParen,
            (Some(c), None) => match Op::from_char(c) {
                Some(op) => Token::Operator(op),
                None => Token::Unknown(word.into()),
            },
            _ => Token::Unknown(word.into()),
        }
    }
}

impl fmt::Display for Token {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.write_str(&self.name())
    }
}

struct Lexer {
    tokens: Vec<Token>,
    pending: String,
    dots: usize,
}

impl Lexer {
    const DIGITS: &'static str = "0123456789.";

    fn new() -> Lexer {
        Lexer {
            tokens: vec![],
            pending: String::new(),
            dots: 0,
        }
    }

    fn push_digit(&mut self, c: char) -> Result<(), EvalError> {
        self.pending.push(c);

        if c == '.' {
            self.dots += 1;

            if self.dots > 1 {
                raise!(EvalError::InvalidNumber(mem::take(&mut self.pending)));
            }
        }

        Ok(())
    }

    fn flush(&mut self) {
        if !self.pending.is_empty() {
            let num = mem::take(&mut self.pending);
            self.tokens.push(Token::Number(num));
            self.dots = 0;
        }
    }

    // `2(3)` and `(1)(2)` multiply.
    fn implicit_mul(&self) -> bool {
        match self.tokens.last() {
            Some(Token::Number(_)) | Some(Token::RightParen) => true,
            _ => false,
        }
    }

    fn push_symbol(&mut self, token: Token) {
        if token == Token::LeftParen && self.implicit_mul() {
            self.tokens.push(Token::Operator(Op::Mul));
        }

        self.tokens.push(token);
    }

    fn finish(mut self) -> Vec<Token> {
        self.flush();
        self.tokens
    }
}

/// Splits an infix expression into numbers, operators and parentheses.
pub fn tokenize(line: &str) -> Result<Vec<Token>, EvalError> {
    let mut lexer = Lexer::new();

    for (pos, c) in line.chars().enumerate() {
        if Lexer::DIGITS.contains(c) {
            lexer.push_digit(c)?;
            continue;
        }

        lexer.flush();

        let token = match c {
            '(' => Token::LeftParen,
            ')' => Token::RightParen,
            c if c.is_whitespace() => continue,
            c => match Op::from_char(c) {
                Some(op) => Token::Operator(op),
                None => raise!(EvalError::InvalidCharacter { ch: c, pos }),
            },
        };

        lexer.push_symbol(token);
    }

    Ok(lexer.finish())
}
