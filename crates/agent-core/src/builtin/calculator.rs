//! Calculator Tool
//!
//! Evaluates arithmetic expressions with a small allow-list of functions and
//! constants. Anything else (unknown names, attribute access) is rejected.

use async_trait::async_trait;

use crate::error::Result;
use crate::tool::{ParameterSchema, Tool, ToolCall, ToolResult, ToolSchema};

const NAME: &str = "calculator";

/// Longest expression accepted, in characters
const MAX_EXPRESSION_LEN: usize = 4096;

/// Deepest nesting of parentheses, calls and unary signs
const MAX_DEPTH: usize = 256;

/// Calculator tool - evaluates mathematical expressions
pub struct CalculatorTool;

#[async_trait]
impl Tool for CalculatorTool {
    fn schema(&self) -> ToolSchema {
        ToolSchema {
            name: NAME.into(),
            description: "Perform mathematical calculations".into(),
            parameters: vec![ParameterSchema::required(
                "expression",
                "Mathematical expression to evaluate (e.g., '2 + 2', '15 * 23')",
            )],
        }
    }

    async fn execute(&self, call: &ToolCall) -> Result<ToolResult> {
        let expr = call.str_arg("expression")?;

        match evaluate(expr) {
            Ok(value) => Ok(ToolResult::success(NAME, format!("Result: {}", format_number(value)))
                .with_data(serde_json::json!(value))),
            Err(e) => Ok(ToolResult::failure(NAME, format!("Calculation error: {e}"))),
        }
    }
}

fn format_number(value: f64) -> String {
    if value.is_finite() && value.fract() == 0.0 && value.abs() < 1e15 {
        format!("{value:.0}")
    } else {
        value.to_string()
    }
}

#[derive(Clone, Debug, PartialEq)]
enum Token {
    Number(f64),
    Ident(String),
    Plus,
    Minus,
    Star,
    Slash,
    FloorDiv,
    Percent,
    Power,
    LParen,
    RParen,
    Comma,
    Dot,
}

fn tokenize(input: &str) -> std::result::Result<Vec<Token>, String> {
    let chars: Vec<char> = input.chars().collect();
    let mut tokens = Vec::new();
    let mut i = 0;

    while i < chars.len() {
        let c = chars[i];
        match c {
            ' ' | '\t' | '\n' => i += 1,
            '0'..='9' => {
                let start = i;
                while i < chars.len() && (chars[i].is_ascii_digit() || chars[i] == '.') {
                    i += 1;
                }
                // exponent only when followed by digits, so `2e` stays `2 e`
                if i < chars.len() && (chars[i] == 'e' || chars[i] == 'E') {
                    let mut j = i + 1;
                    if j < chars.len() && (chars[j] == '+' || chars[j] == '-') {
                        j += 1;
                    }
                    if j < chars.len() && chars[j].is_ascii_digit() {
                        i = j;
                        while i < chars.len() && chars[i].is_ascii_digit() {
                            i += 1;
                        }
                    }
                }
                let text: String = chars[start..i].iter().collect();
                let value = text
                    .parse::<f64>()
                    .map_err(|_| format!("invalid number '{text}'"))?;
                tokens.push(Token::Number(value));
            }
            c if c.is_ascii_alphabetic() || c == '_' => {
                let start = i;
                while i < chars.len() && (chars[i].is_ascii_alphanumeric() || chars[i] == '_') {
                    i += 1;
                }
                tokens.push(Token::Ident(chars[start..i].iter().collect()));
            }
            '*' if chars.get(i + 1) == Some(&'*') => {
                tokens.push(Token::Power);
                i += 2;
            }
            '/' if chars.get(i + 1) == Some(&'/') => {
                tokens.push(Token::FloorDiv);
                i += 2;
            }
            _ => {
                tokens.push(match c {
                    '+' => Token::Plus,
                    '-' => Token::Minus,
                    '*' => Token::Star,
                    '/' => Token::Slash,
                    '%' => Token::Percent,
                    '^' => Token::Power,
                    '(' => Token::LParen,
                    ')' => Token::RParen,
                    ',' => Token::Comma,
                    '.' => Token::Dot,
                    other => return Err(format!("unexpected character '{other}'")),
                });
                i += 1;
            }
        }
    }

    Ok(tokens)
}

/// Evaluate an arithmetic expression
pub fn evaluate(expr: &str) -> std::result::Result<f64, String> {
    if expr.chars().count() > MAX_EXPRESSION_LEN {
        return Err(format!("expression longer than {MAX_EXPRESSION_LEN} characters"));
    }

    let tokens = tokenize(expr)?;
    if tokens.is_empty() {
        return Err("empty expression".into());
    }

    let mut parser = Parser {
        tokens,
        pos: 0,
        depth: 0,
    };
    let value = parser.expression()?;
    match parser.peek() {
        None => Ok(value),
        Some(Token::Dot) => Err("attribute access is not allowed".into()),
        Some(tok) => Err(format!("unexpected token {tok:?}")),
    }
}

struct Parser {
    tokens: Vec<Token>,
    pos: usize,
    depth: usize,
}

impl Parser {
    fn peek(&self) -> Option<&Token> {
        self.tokens.get(self.pos)
    }

    fn next(&mut self) -> Option<Token> {
        let tok = self.tokens.get(self.pos).cloned();
        self.pos += 1;
        tok
    }

    fn eat(&mut self, expected: &Token) -> bool {
        if self.peek() == Some(expected) {
            self.pos += 1;
            true
        } else {
            false
        }
    }

    // expression := term (('+' | '-') term)*
    fn expression(&mut self) -> std::result::Result<f64, String> {
        let mut value = self.term()?;
        loop {
            if self.eat(&Token::Plus) {
                value += self.term()?;
            } else if self.eat(&Token::Minus) {
                value -= self.term()?;
            } else {
                return Ok(value);
            }
        }
    }

    // term := unary (('*' | '/' | '//' | '%') unary)*
    fn term(&mut self) -> std::result::Result<f64, String> {
        let mut value = self.unary()?;
        loop {
            let op = match self.peek() {
                Some(tok @ (Token::Star | Token::Slash | Token::FloorDiv | Token::Percent)) => {
                    tok.clone()
                }
                _ => return Ok(value),
            };
            self.pos += 1;

            let rhs = self.unary()?;
            value = match op {
                Token::Star => value * rhs,
                _ if rhs == 0.0 => return Err("division by zero".into()),
                Token::Slash => value / rhs,
                Token::FloorDiv => (value / rhs).floor(),
                _ => value - rhs * (value / rhs).floor(),
            };
        }
    }

    // Every recursive path (parentheses, call arguments, signs, exponents)
    // passes through here, so this bounds the recursion depth.
    fn unary(&mut self) -> std::result::Result<f64, String> {
        if self.depth >= MAX_DEPTH {
            return Err("expression nested too deeply".into());
        }
        self.depth += 1;
        let value = self.signed();
        self.depth -= 1;
        value
    }

    // unary := ('-' | '+') unary | power
    fn signed(&mut self) -> std::result::Result<f64, String> {
        if self.eat(&Token::Minus) {
            return Ok(-self.unary()?);
        }
        if self.eat(&Token::Plus) {
            return self.unary();
        }
        self.power()
    }

    // power := primary ('**' unary)?
    fn power(&mut self) -> std::result::Result<f64, String> {
        let base = self.primary()?;
        if self.eat(&Token::Power) {
            let exponent = self.unary()?;
            return Ok(base.powf(exponent));
        }
        Ok(base)
    }

    fn primary(&mut self) -> std::result::Result<f64, String> {
        match self.next() {
            Some(Token::Number(n)) => Ok(n),
            Some(Token::LParen) => {
                let value = self.expression()?;
                if self.eat(&Token::RParen) {
                    Ok(value)
                } else {
                    Err("missing closing parenthesis".into())
                }
            }
            Some(Token::Ident(name)) => {
                if self.peek() == Some(&Token::Dot) {
                    return Err("attribute access is not allowed".into());
                }
                if self.eat(&Token::LParen) {
                    let args = self.arguments()?;
                    call_function(&name, &args)
                } else {
                    constant(&name)
                }
            }
            Some(tok) => Err(format!("unexpected token {tok:?}")),
            None => Err("unexpected end of expression".into()),
        }
    }

    fn arguments(&mut self) -> std::result::Result<Vec<f64>, String> {
        let mut args = Vec::new();
        if self.eat(&Token::RParen) {
            return Ok(args);
        }
        loop {
            args.push(self.expression()?);
            if self.eat(&Token::Comma) {
                continue;
            }
            if self.eat(&Token::RParen) {
                return Ok(args);
            }
            return Err("expected ',' or ')' in argument list".into());
        }
    }
}

fn constant(name: &str) -> std::result::Result<f64, String> {
    match name {
        "pi" => Ok(std::f64::consts::PI),
        "e" => Ok(std::f64::consts::E),
        _ => Err(format!("name '{name}' is not defined")),
    }
}

fn call_function(name: &str, args: &[f64]) -> std::result::Result<f64, String> {
    let unary = |f: fn(f64) -> f64| match args {
        [x] => Ok(f(*x)),
        _ => Err(format!("{name}() takes exactly one argument ({} given)", args.len())),
    };

    match name {
        "abs" => unary(f64::abs),
        "sqrt" => match args {
            [x] if *x < 0.0 => Err("math domain error".into()),
            _ => unary(f64::sqrt),
        },
        "sin" => unary(f64::sin),
        "cos" => unary(f64::cos),
        "tan" => unary(f64::tan),
        "round" => match args {
            [x] => Ok(x.round()),
            [x, digits] => {
                let factor = 10f64.powf(digits.trunc());
                Ok((x * factor).round() / factor)
            }
            _ => Err("round() takes one or two arguments".into()),
        },
        "pow" => match args {
            [base, exp] => Ok(base.powf(*exp)),
            _ => Err("pow() takes exactly two arguments".into()),
        },
        "min" | "max" => {
            if args.is_empty() {
                return Err(format!("{name}() expected at least one argument"));
            }
            let pick = if name == "min" { f64::min } else { f64::max };
            Ok(args.iter().copied().reduce(pick).unwrap_or_default())
        }
        "sum" => Ok(args.iter().sum()),
        _ => Err(format!("name '{name}' is not defined")),
    }
}
