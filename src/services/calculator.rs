//! Calculator module for evaluating arithmetic expressions
//!
//! Only `+ - * / % ( )`, decimal numbers and whitespace are accepted. The
//! expression is tokenized and evaluated by a small recursive-descent parser;
//! nothing is ever handed to a general-purpose evaluator.

/// Check whether a query consists solely of calculator characters
pub fn is_arithmetic(query: &str) -> bool {
    !query.is_empty()
        && query
            .chars()
            .all(|c| c.is_ascii_digit() || "+-*/().%".contains(c) || c.is_whitespace())
}

/// Evaluate a math expression and return the result
/// Returns None if the expression is invalid or the result is not finite
pub fn evaluate(expr: &str) -> Option<f64> {
    let expr = expr.trim();

    if expr.is_empty() || !is_arithmetic(expr) {
        return None;
    }

    let tokens = tokenize(expr)?;
    let mut parser = Parser { tokens, pos: 0 };
    let result = parser.expression()?;

    // Trailing garbage, e.g. "2 3" or "(1))"
    if parser.pos != parser.tokens.len() {
        return None;
    }

    // Filter out NaN and infinity
    if result.is_finite() {
        Some(result)
    } else {
        None
    }
}

/// Format a result for display
/// Removes unnecessary decimal places (e.g., 4.0 -> "4")
pub fn format_result(value: f64) -> String {
    super::format::format_number(value)
}

#[derive(Debug, Clone, Copy, PartialEq)]
enum Token {
    Number(f64),
    Plus,
    Minus,
    Star,
    Slash,
    Percent,
    LParen,
    RParen,
}

fn tokenize(expr: &str) -> Option<Vec<Token>> {
    let mut tokens = Vec::new();
    let mut chars = expr.char_indices().peekable();

    while let Some(&(start, c)) = chars.peek() {
        let token = match c {
            c if c.is_whitespace() => {
                chars.next();
                continue;
            }
            '0'..='9' | '.' => {
                let mut end = start;
                let mut seen_dot = false;
                while let Some(&(i, d)) = chars.peek() {
                    if d.is_ascii_digit() {
                        end = i + 1;
                    } else if d == '.' && !seen_dot {
                        seen_dot = true;
                        end = i + 1;
                    } else {
                        break;
                    }
                    chars.next();
                }
                let literal = &expr[start..end];
                if literal == "." {
                    return None;
                }
                tokens.push(Token::Number(literal.parse().ok()?));
                continue;
            }
            '+' => Token::Plus,
            '-' => Token::Minus,
            '*' => Token::Star,
            '/' => Token::Slash,
            '%' => Token::Percent,
            '(' => Token::LParen,
            ')' => Token::RParen,
            _ => return None,
        };
        chars.next();
        // `--` and `++` are increment/decrement, not stacked signs
        if matches!(c, '+' | '-') && chars.peek().map(|&(_, next)| next) == Some(c) {
            return None;
        }
        tokens.push(token);
    }

    Some(tokens)
}

struct Parser {
    tokens: Vec<Token>,
    pos: usize,
}

impl Parser {
    fn peek(&self) -> Option<Token> {
        self.tokens.get(self.pos).copied()
    }

    fn advance(&mut self) -> Option<Token> {
        let token = self.peek()?;
        self.pos += 1;
        Some(token)
    }

    // expression := term (('+' | '-') term)*
    fn expression(&mut self) -> Option<f64> {
        let mut value = self.term()?;
        while let Some(op @ (Token::Plus | Token::Minus)) = self.peek() {
            self.pos += 1;
            let rhs = self.term()?;
            value = if op == Token::Plus {
                value + rhs
            } else {
                value - rhs
            };
        }
        Some(value)
    }

    // term := unary (('*' | '/' | '%') unary)*
    fn term(&mut self) -> Option<f64> {
        let mut value = self.unary()?;
        while let Some(op @ (Token::Star | Token::Slash | Token::Percent)) = self.peek() {
            self.pos += 1;
            let rhs = self.unary()?;
            value = match op {
                Token::Star => value * rhs,
                Token::Slash => value / rhs,
                _ => value % rhs,
            };
        }
        Some(value)
    }

    fn unary(&mut self) -> Option<f64> {
        match self.peek()? {
            Token::Minus => {
                self.pos += 1;
                Some(-self.unary()?)
            }
            Token::Plus => {
                self.pos += 1;
                self.unary()
            }
            _ => self.primary(),
        }
    }

    fn primary(&mut self) -> Option<f64> {
        match self.advance()? {
            Token::Number(n) => Some(n),
            Token::LParen => {
                let value = self.expression()?;
                match self.advance()? {
                    Token::RParen => Some(value),
                    _ => None,
                }
            }
            _ => None,
        }
    }
}
