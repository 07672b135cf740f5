//! Integer arithmetic evaluator for calibration questions like `"53 + 44"`.
//!
//! Grammar:
//!
//! ```text
//! expr   := term (('+' | '-') term)*
//! term   := unary (('*' | '/') unary)*
//! unary  := '-' unary | atom
//! atom   := integer | '(' expr ')'
//! ```
//!
//! Division must be exact; a fractional result is rejected rather than
//! rounded, since calibration answers are integers.

use crate::core::error::DomainError;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Token {
    Number(i64),
    Plus,
    Minus,
    Star,
    Slash,
    LParen,
    RParen,
}

/// Evaluate an integer arithmetic expression
pub fn evaluate(expression: &str) -> Result<i64, DomainError> {
    let tokens = tokenize(expression)?;
    let mut parser = Parser {
        expression,
        tokens: &tokens,
        pos: 0,
    };
    let value = parser.expr()?;
    if parser.pos != tokens.len() {
        return Err(parser.invalid("unexpected trailing input"));
    }
    Ok(value)
}

fn tokenize(expression: &str) -> Result<Vec<Token>, DomainError> {
    let mut tokens = Vec::new();
    let mut chars = expression.char_indices().peekable();

    while let Some((start, ch)) = chars.next() {
        let token = match ch {
            c if c.is_whitespace() => continue,
            '+' => Token::Plus,
            '-' => Token::Minus,
            '*' => Token::Star,
            '/' => Token::Slash,
            '(' => Token::LParen,
            ')' => Token::RParen,
            c if c.is_ascii_digit() => {
                let mut end = start + c.len_utf8();
                while let Some(&(i, d)) = chars.peek() {
                    if !d.is_ascii_digit() {
                        break;
                    }
                    end = i + d.len_utf8();
                    chars.next();
                }
                let digits = &expression[start..end];
                let value = digits.parse::<i64>().map_err(|e| DomainError::InvalidExpression {
                    expression: expression.to_string(),
                    reason: format!("bad number '{}': {}", digits, e),
                })?;
                Token::Number(value)
            }
            other => {
                return Err(DomainError::InvalidExpression {
                    expression: expression.to_string(),
                    reason: format!("unexpected character '{}'", other),
                });
            }
        };
        tokens.push(token);
    }

    Ok(tokens)
}

struct Parser<'a> {
    expression: &'a str,
    tokens: &'a [Token],
    pos: usize,
}

impl Parser<'_> {
    fn peek(&self) -> Option<Token> {
        self.tokens.get(self.pos).copied()
    }

    fn next(&mut self) -> Option<Token> {
        let token = self.peek();
        if token.is_some() {
            self.pos += 1;
        }
        token
    }

    fn invalid(&self, reason: &str) -> DomainError {
        DomainError::InvalidExpression {
            expression: self.expression.to_string(),
            reason: reason.to_string(),
        }
    }

    fn overflow(&self) -> DomainError {
        self.invalid("integer overflow")
    }

    fn expr(&mut self) -> Result<i64, DomainError> {
        let mut value = self.term()?;
        loop {
            match self.peek() {
                Some(Token::Plus) => {
                    self.pos += 1;
                    let rhs = self.term()?;
                    value = value.checked_add(rhs).ok_or_else(|| self.overflow())?;
                }
                Some(Token::Minus) => {
                    self.pos += 1;
                    let rhs = self.term()?;
                    value = value.checked_sub(rhs).ok_or_else(|| self.overflow())?;
                }
                _ => return Ok(value),
            }
        }
    }

    fn term(&mut self) -> Result<i64, DomainError> {
        let mut value = self.unary()?;
        loop {
            match self.peek() {
                Some(Token::Star) => {
                    self.pos += 1;
                    let rhs = self.unary()?;
                    value = value.checked_mul(rhs).ok_or_else(|| self.overflow())?;
                }
                Some(Token::Slash) => {
                    self.pos += 1;
                    let rhs = self.unary()?;
                    if rhs == 0 {
                        return Err(DomainError::DivisionByZero(self.expression.to_string()));
                    }
                    if value.checked_rem(rhs).ok_or_else(|| self.overflow())? != 0 {
                        return Err(self.invalid("division has a fractional result"));
                    }
                    value = value.checked_div(rhs).ok_or_else(|| self.overflow())?;
                }
                _ => return Ok(value),
            }
        }
    }

    fn unary(&mut self) -> Result<i64, DomainError> {
        if self.peek() == Some(Token::Minus) {
            self.pos += 1;
            let value = self.unary()?;
            return value.checked_neg().ok_or_else(|| self.overflow());
        }
        self.atom()
    }

    fn atom(&mut self) -> Result<i64, DomainError> {
        match self.next() {
            Some(Token::Number(n)) => Ok(n),
            Some(Token::LParen) => {
                let value = self.expr()?;
                match self.next() {
                    Some(Token::RParen) => Ok(value),
                    _ => Err(self.invalid("missing closing parenthesis")),
                }
            }
            Some(_) => Err(self.invalid("expected a number or '('")),
            None => Err(self.invalid("unexpected end of input")),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_simple_addition() {
        assert_eq!(evaluate("53 + 44").unwrap(), 97);
        assert_eq!(evaluate("2+2").unwrap(), 4);
    }

    #[test]
    fn test_precedence_and_parentheses() {
        assert_eq!(evaluate("2 + 3 * 4").unwrap(), 14);
        assert_eq!(evaluate("(2 + 3) * 4").unwrap(), 20);
        assert_eq!(evaluate("10 - 4 - 3").unwrap(), 3);
        assert_eq!(evaluate("-(3 - 5)").unwrap(), 2);
        assert_eq!(evaluate("84 / 4").unwrap(), 21);
    }

    #[test]
    fn test_division_rules() {
        assert_eq!(
            evaluate("1 / 0"),
            Err(DomainError::DivisionByZero("1 / 0".to_string()))
        );
        assert!(evaluate("7 / 2").unwrap_err().is_expression_error());
    }

    #[test]
    fn test_invalid_expressions() {
        for bad in ["", "1 +", "(1 + 2", "1 2", "abc", "1 + )", "__import__('os')"] {
            let err = evaluate(bad).unwrap_err();
            assert!(err.is_expression_error(), "expected error for {:?}", bad);
        }
    }

    #[test]
    fn test_overflow_is_an_error() {
        assert!(evaluate("9223372036854775807 + 1").is_err());
        assert!(evaluate("99999999999999999999").is_err());
    }
}
