//! Prepared-spell formulas.
//!
//! Catalog entries describe limits like `floor(level / 2) + abilityMod` as
//! plain strings. They are parsed into a closed AST and evaluated against
//! a [`FormulaContext`]; nothing else can be expressed.
//!
//! Grammar:
//! ```text
//! expr    := term (('+' | '-') term)*
//! term    := unary (('*' | '/') unary)*
//! unary   := ('-' | '+') unary | primary
//! primary := number | variable | call | '(' expr ')'
//! call    := ident '(' expr (',' expr)* ')'
//! ```
//!
//! Nesting is capped at [`MAX_FORMULA_DEPTH`] and length at
//! [`MAX_FORMULA_TOKENS`].

use std::fmt;
use std::iter::Peekable;
use std::str::{CharIndices, FromStr};

use thiserror::Error;

/// Error when parsing or evaluating a formula
#[derive(Debug, Clone, PartialEq, Error)]
pub enum FormulaError {
    /// The formula string is empty
    #[error("Empty formula")]
    Empty,
    /// A token that does not fit the grammar
    #[error("Unexpected '{found}' at position {position}")]
    UnexpectedToken { position: usize, found: String },
    /// The formula stopped mid-expression
    #[error("Unexpected end of formula")]
    UnexpectedEnd,
    /// A variable or function name that is not supported
    #[error("Unknown identifier: {0}")]
    UnknownIdentifier(String),
    /// A function called with the wrong number of arguments
    #[error("{function}() expects {expected} argument(s), got {found}")]
    WrongArity {
        function: String,
        expected: &'static str,
        found: usize,
    },
    #[error("Division by zero")]
    DivisionByZero,
    #[error("Formula produced a non-finite value")]
    NonFinite,
    /// Parentheses, calls or signs nested past the limit
    #[error("Formula nests deeper than {0} levels")]
    TooDeep(usize),
    /// More tokens than any catalog formula needs
    #[error("Formula has more than {0} tokens")]
    TooLong(usize),
}

/// Nesting limit for parentheses, calls and unary signs.
pub const MAX_FORMULA_DEPTH: usize = 64;
/// Token limit; also bounds the depth of long operator chains.
pub const MAX_FORMULA_TOKENS: usize = 256;

/// Variables a formula may reference.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FormulaVar {
    Level,
    AbilityMod,
}

/// Values bound to [`FormulaVar`]s during evaluation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FormulaContext {
    pub level: u8,
    pub ability_mod: i32,
}

#[derive(Debug, Clone, PartialEq)]
pub enum Formula {
    Const(f64),
    Var(FormulaVar),
    Neg(Box<Formula>),
    Add(Box<Formula>, Box<Formula>),
    Sub(Box<Formula>, Box<Formula>),
    Mul(Box<Formula>, Box<Formula>),
    Div(Box<Formula>, Box<Formula>),
    Floor(Box<Formula>),
    Ceil(Box<Formula>),
    Max(Box<Formula>, Box<Formula>),
    Min(Box<Formula>, Box<Formula>),
}

impl Formula {
    /// `max(1, level + abilityMod)`, used when a caster declares no formula.
    pub fn default_prepared() -> Self {
        Formula::Max(
            Box::new(Formula::Const(1.0)),
            Box::new(Formula::Add(
                Box::new(Formula::Var(FormulaVar::Level)),
                Box::new(Formula::Var(FormulaVar::AbilityMod)),
            )),
        )
    }

    /// Parse a formula string such as `floor(level/2)+abilityMod`.
    ///
    /// Accepted variable spellings: `level`, `lvl`, `abilityMod`, `mod`,
    /// `ability_mod`. Functions may be written bare or with a `Math.` prefix.
    pub fn parse(input: &str) -> Result<Self, FormulaError> {
        let tokens = tokenize(input)?;
        if tokens.is_empty() {
            return Err(FormulaError::Empty);
        }
        if tokens.len() > MAX_FORMULA_TOKENS {
            return Err(FormulaError::TooLong(MAX_FORMULA_TOKENS));
        }

        let mut parser = Parser {
            tokens,
            pos: 0,
            depth: 0,
        };
        let formula = parser.expression()?;
        match parser.next() {
            None => Ok(formula),
            Some((position, token)) => Err(FormulaError::UnexpectedToken {
                position,
                found: token.to_string(),
            }),
        }
    }

    /// Evaluate against the given context.
    ///
    /// Only division by zero and non-finite intermediate values fail.
    pub fn eval(&self, ctx: &FormulaContext) -> Result<f64, FormulaError> {
        let value = match self {
            Formula::Const(v) => *v,
            Formula::Var(FormulaVar::Level) => f64::from(ctx.level),
            Formula::Var(FormulaVar::AbilityMod) => f64::from(ctx.ability_mod),
            Formula::Neg(a) => -a.eval(ctx)?,
            Formula::Add(a, b) => a.eval(ctx)? + b.eval(ctx)?,
            Formula::Sub(a, b) => a.eval(ctx)? - b.eval(ctx)?,
            Formula::Mul(a, b) => a.eval(ctx)? * b.eval(ctx)?,
            Formula::Div(a, b) => {
                let divisor = b.eval(ctx)?;
                if divisor == 0.0 {
                    return Err(FormulaError::DivisionByZero);
                }
                a.eval(ctx)? / divisor
            }
            Formula::Floor(a) => a.eval(ctx)?.floor(),
            Formula::Ceil(a) => a.eval(ctx)?.ceil(),
            Formula::Max(a, b) => a.eval(ctx)?.max(b.eval(ctx)?),
            Formula::Min(a, b) => a.eval(ctx)?.min(b.eval(ctx)?),
        };

        if value.is_finite() {
            Ok(value)
        } else {
            Err(FormulaError::NonFinite)
        }
    }
}

impl FromStr for Formula {
    type Err = FormulaError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl fmt::Display for Formula {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Formula::Const(v) => write!(f, "{}", v),
            Formula::Var(FormulaVar::Level) => f.write_str("level"),
            Formula::Var(FormulaVar::AbilityMod) => f.write_str("abilityMod"),
            Formula::Neg(a) => write!(f, "-{}", a),
            Formula::Add(a, b) => write!(f, "({} + {})", a, b),
            Formula::Sub(a, b) => write!(f, "({} - {})", a, b),
            Formula::Mul(a, b) => write!(f, "({} * {})", a, b),
            Formula::Div(a, b) => write!(f, "({} / {})", a, b),
            Formula::Floor(a) => write!(f, "floor({})", a),
            Formula::Ceil(a) => write!(f, "ceil({})", a),
            Formula::Max(a, b) => write!(f, "max({}, {})", a, b),
            Formula::Min(a, b) => write!(f, "min({}, {})", a, b),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
enum Token {
    Number(f64),
    Ident(String),
    Plus,
    Minus,
    Star,
    Slash,
    LParen,
    RParen,
    Comma,
}

impl fmt::Display for Token {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Token::Number(n) => write!(f, "{}", n),
            Token::Ident(name) => f.write_str(name),
            Token::Plus => f.write_str("+"),
            Token::Minus => f.write_str("-"),
            Token::Star => f.write_str("*"),
            Token::Slash => f.write_str("/"),
            Token::LParen => f.write_str("("),
            Token::RParen => f.write_str(")"),
            Token::Comma => f.write_str(","),
        }
    }
}

// Hand-rolled lexer; the domain layer carries no regex dependency
fn tokenize(input: &str) -> Result<Vec<(usize, Token)>, FormulaError> {
    let mut chars = input.char_indices().peekable();
    let mut tokens = Vec::new();

    while let Some(&(position, c)) = chars.peek() {
        let token = match c {
            c if c.is_whitespace() => {
                chars.next();
                continue;
            }
            '+' => Token::Plus,
            '-' => Token::Minus,
            '*' => Token::Star,
            '/' => Token::Slash,
            '(' => Token::LParen,
            ')' => Token::RParen,
            ',' => Token::Comma,
            c if c.is_ascii_digit() || c == '.' => {
                let text = take_while(&mut chars, |c| c.is_ascii_digit() || c == '.');
                let value = text
                    .parse::<f64>()
                    .map_err(|_| FormulaError::UnexpectedToken {
                        position,
                        found: text.clone(),
                    })?;
                tokens.push((position, Token::Number(value)));
                continue;
            }
            c if c.is_ascii_alphabetic() || c == '_' => {
                let name = take_while(&mut chars, |c| c.is_ascii_alphanumeric() || c == '_' || c == '.');
                tokens.push((position, Token::Ident(name)));
                continue;
            }
            other => {
                return Err(FormulaError::UnexpectedToken {
                    position,
                    found: other.to_string(),
                })
            }
        };
        chars.next();
        tokens.push((position, token));
    }

    Ok(tokens)
}

fn take_while(chars: &mut Peekable<CharIndices<'_>>, accept: impl Fn(char) -> bool) -> String {
    let mut text = String::new();
    while let Some(&(_, c)) = chars.peek() {
        if !accept(c) {
            break;
        }
        text.push(c);
        chars.next();
    }
    text
}

struct Parser {
    tokens: Vec<(usize, Token)>,
    pos: usize,
    depth: usize,
}

impl Parser {
    fn peek(&self) -> Option<&Token> {
        self.tokens.get(self.pos).map(|(_, token)| token)
    }

    fn next(&mut self) -> Option<(usize, Token)> {
        let token = self.tokens.get(self.pos).cloned();
        if token.is_some() {
            self.pos += 1;
        }
        token
    }

    fn expect(&mut self, expected: Token) -> Result<(), FormulaError> {
        match self.next() {
            Some((_, token)) if token == expected => Ok(()),
            Some((position, token)) => Err(FormulaError::UnexpectedToken {
                position,
                found: token.to_string(),
            }),
            None => Err(FormulaError::UnexpectedEnd),
        }
    }

    fn expression(&mut self) -> Result<Formula, FormulaError> {
        let mut lhs = self.term()?;
        loop {
            match self.peek() {
                Some(Token::Plus) => {
                    self.pos += 1;
                    lhs = Formula::Add(Box::new(lhs), Box::new(self.term()?));
                }
                Some(Token::Minus) => {
                    self.pos += 1;
                    lhs = Formula::Sub(Box::new(lhs), Box::new(self.term()?));
                }
                _ => return Ok(lhs),
            }
        }
    }

    fn term(&mut self) -> Result<Formula, FormulaError> {
        let mut lhs = self.unary()?;
        loop {
            match self.peek() {
                Some(Token::Star) => {
                    self.pos += 1;
                    lhs = Formula::Mul(Box::new(lhs), Box::new(self.unary()?));
                }
                Some(Token::Slash) => {
                    self.pos += 1;
                    lhs = Formula::Div(Box::new(lhs), Box::new(self.unary()?));
                }
                _ => return Ok(lhs),
            }
        }
    }

    fn unary(&mut self) -> Result<Formula, FormulaError> {
        if self.depth >= MAX_FORMULA_DEPTH {
            return Err(FormulaError::TooDeep(MAX_FORMULA_DEPTH));
        }
        self.depth += 1;
        let result = self.signed();
        self.depth -= 1;
        result
    }

    fn signed(&mut self) -> Result<Formula, FormulaError> {
        match self.peek() {
            Some(Token::Minus) => {
                self.pos += 1;
                Ok(Formula::Neg(Box::new(self.unary()?)))
            }
            Some(Token::Plus) => {
                self.pos += 1;
                self.unary()
            }
            _ => self.primary(),
        }
    }

    fn primary(&mut self) -> Result<Formula, FormulaError> {
        match self.next() {
            Some((_, Token::Number(value))) => Ok(Formula::Const(value)),
            Some((_, Token::LParen)) => {
                let inner = self.expression()?;
                self.expect(Token::RParen)?;
                Ok(inner)
            }
            Some((_, Token::Ident(name))) => {
                if self.peek() == Some(&Token::LParen) {
                    self.pos += 1;
                    self.call(&name)
                } else {
                    variable(&name)
                }
            }
            Some((position, token)) => Err(FormulaError::UnexpectedToken {
                position,
                found: token.to_string(),
            }),
            None => Err(FormulaError::UnexpectedEnd),
        }
    }

    /// Parse call arguments after the opening parenthesis.
    fn call(&mut self, name: &str) -> Result<Formula, FormulaError> {
        let mut args = Vec::new();
        if self.peek() == Some(&Token::RParen) {
            self.pos += 1;
        } else {
            loop {
                args.push(self.expression()?);
                match self.next() {
                    Some((_, Token::Comma)) => continue,
                    Some((_, Token::RParen)) => break,
                    Some((position, token)) => {
                        return Err(FormulaError::UnexpectedToken {
                            position,
                            found: token.to_string(),
                        })
                    }
                    None => return Err(FormulaError::UnexpectedEnd),
                }
            }
        }

        let function = name.strip_prefix("Math.").unwrap_or(name).to_lowercase();
        let wrong_arity = |expected: &'static str, found: usize| FormulaError::WrongArity {
            function: function.clone(),
            expected,
            found,
        };

        match function.as_str() {
            "floor" | "ceil" => {
                if args.len() != 1 {
                    return Err(wrong_arity("1", args.len()));
                }
                let arg = Box::new(args.remove(0));
                Ok(if function == "floor" {
                    Formula::Floor(arg)
                } else {
                    Formula::Ceil(arg)
                })
            }
            "max" | "min" => {
                if args.len() < 2 {
                    return Err(wrong_arity("2 or more", args.len()));
                }
                let is_max = function == "max";
                let mut args = args.into_iter();
                let first = args.next().ok_or(FormulaError::UnexpectedEnd)?;
                Ok(args.fold(first, |acc, next| {
                    if is_max {
                        Formula::Max(Box::new(acc), Box::new(next))
                    } else {
                        Formula::Min(Box::new(acc), Box::new(next))
                    }
                }))
            }
            _ => Err(FormulaError::UnknownIdentifier(name.to_string())),
        }
    }
}

fn variable(name: &str) -> Result<Formula, FormulaError> {
    match name {
        "level" | "lvl" | "classLevel" | "class_level" => Ok(Formula::Var(FormulaVar::Level)),
        "abilityMod" | "ability_mod" | "mod" | "modifier" | "abilityModifier" => {
            Ok(Formula::Var(FormulaVar::AbilityMod))
        }
        _ => Err(FormulaError::UnknownIdentifier(name.to_string())),
    }
}
