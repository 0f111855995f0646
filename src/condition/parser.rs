//! Recursive-descent parser and type checker for visibility conditions

use super::lexer::{Spanned, Token};
use super::ConditionError;

/// Profile fields a condition may read
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ProfileField {
    FullName,
    City,
    Country,
    Timezone,
    DefaultDegree,
    Latitude,
    Longitude,
}

impl ProfileField {
    fn from_name(name: &str) -> Option<Self> {
        match name {
            "fullName" => Some(Self::FullName),
            "city" => Some(Self::City),
            "country" => Some(Self::Country),
            "timezone" => Some(Self::Timezone),
            "defaultDegree" => Some(Self::DefaultDegree),
            "latitude" => Some(Self::Latitude),
            "longitude" => Some(Self::Longitude),
            _ => None,
        }
    }

    fn value_type(self) -> Type {
        match self {
            Self::Latitude | Self::Longitude => Type::Number,
            _ => Type::String,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CompareOp {
    Eq,
    Ne,
    Lt,
    Le,
    Gt,
    Ge,
}

#[derive(Debug, Clone, PartialEq)]
pub enum Expr {
    Number(f64),
    Str(String),
    Bool(bool),
    Profile(ProfileField),
    LogLength,
    LogContains(Box<Expr>),
    Not(Box<Expr>),
    And(Box<Expr>, Box<Expr>),
    Or(Box<Expr>, Box<Expr>),
    Compare(CompareOp, Box<Expr>, Box<Expr>),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Type {
    Number,
    String,
    Bool,
}

impl Type {
    fn name(self) -> &'static str {
        match self {
            Type::Number => "number",
            Type::String => "string",
            Type::Bool => "boolean",
        }
    }
}

/// Parse a token stream into a boolean-typed expression
pub fn parse(tokens: &[Spanned]) -> Result<Expr, ConditionError> {
    let mut parser = Parser { tokens, pos: 0 };
    let expr = parser.or()?;
    if let Some(extra) = parser.peek() {
        return Err(ConditionError::UnexpectedToken {
            found: extra.token.describe(),
            pos: extra.pos,
        });
    }
    let ty = type_of(&expr)?;
    if ty != Type::Bool {
        return Err(ConditionError::TypeMismatch(format!(
            "condition must be boolean, found {}",
            ty.name()
        )));
    }
    Ok(expr)
}

struct Parser<'a> {
    tokens: &'a [Spanned],
    pos: usize,
}

impl Parser<'_> {
    fn peek(&self) -> Option<&Spanned> {
        self.tokens.get(self.pos)
    }

    fn next(&mut self) -> Result<&Spanned, ConditionError> {
        let spanned = self
            .tokens
            .get(self.pos)
            .ok_or(ConditionError::UnexpectedEnd)?;
        self.pos += 1;
        Ok(spanned)
    }

    fn eat(&mut self, token: &Token) -> bool {
        if self.peek().is_some_and(|s| &s.token == token) {
            self.pos += 1;
            true
        } else {
            false
        }
    }

    fn expect(&mut self, token: &Token) -> Result<(), ConditionError> {
        let spanned = self.next()?;
        if &spanned.token == token {
            Ok(())
        } else {
            Err(ConditionError::UnexpectedToken {
                found: spanned.token.describe(),
                pos: spanned.pos,
            })
        }
    }

    fn or(&mut self) -> Result<Expr, ConditionError> {
        let mut left = self.and()?;
        while self.eat(&Token::Or) {
            let right = self.and()?;
            left = Expr::Or(Box::new(left), Box::new(right));
        }
        Ok(left)
    }

    fn and(&mut self) -> Result<Expr, ConditionError> {
        let mut left = self.unary()?;
        while self.eat(&Token::And) {
            let right = self.unary()?;
            left = Expr::And(Box::new(left), Box::new(right));
        }
        Ok(left)
    }

    fn unary(&mut self) -> Result<Expr, ConditionError> {
        if self.eat(&Token::Not) {
            return Ok(Expr::Not(Box::new(self.unary()?)));
        }
        self.compare()
    }

    fn compare(&mut self) -> Result<Expr, ConditionError> {
        let left = self.primary()?;
        let op = match self.peek().map(|s| &s.token) {
            Some(Token::Eq) => CompareOp::Eq,
            Some(Token::Ne) => CompareOp::Ne,
            Some(Token::Lt) => CompareOp::Lt,
            Some(Token::Le) => CompareOp::Le,
            Some(Token::Gt) => CompareOp::Gt,
            Some(Token::Ge) => CompareOp::Ge,
            _ => return Ok(left),
        };
        self.pos += 1;
        let right = self.primary()?;
        Ok(Expr::Compare(op, Box::new(left), Box::new(right)))
    }

    fn primary(&mut self) -> Result<Expr, ConditionError> {
        let spanned = self.next()?.clone();
        match spanned.token {
            Token::Number(n) => Ok(Expr::Number(n)),
            Token::Str(s) => Ok(Expr::Str(s)),
            Token::LParen => {
                let inner = self.or()?;
                self.expect(&Token::RParen)?;
                Ok(inner)
            }
            Token::Ident(name) => match name.as_str() {
                "true" => Ok(Expr::Bool(true)),
                "false" => Ok(Expr::Bool(false)),
                "profile" | "user" => {
                    let field = self.member()?;
                    ProfileField::from_name(&field)
                        .map(Expr::Profile)
                        .ok_or(ConditionError::UnknownField {
                            binding: name.clone(),
                            field,
                        })
                }
                "log" | "logs" => {
                    let field = self.member()?;
                    match field.as_str() {
                        "length" => Ok(Expr::LogLength),
                        "contains" => {
                            self.expect(&Token::LParen)?;
                            let needle = self.or()?;
                            self.expect(&Token::RParen)?;
                            Ok(Expr::LogContains(Box::new(needle)))
                        }
                        _ => Err(ConditionError::UnknownField {
                            binding: name.clone(),
                            field,
                        }),
                    }
                }
                _ => Err(ConditionError::UnknownBinding(name.clone())),
            },
            other => Err(ConditionError::UnexpectedToken {
                found: other.describe(),
                pos: spanned.pos,
            }),
        }
    }

    fn member(&mut self) -> Result<String, ConditionError> {
        self.expect(&Token::Dot)?;
        let spanned = self.next()?;
        match &spanned.token {
            Token::Ident(field) => Ok(field.clone()),
            other => Err(ConditionError::UnexpectedToken {
                found: other.describe(),
                pos: spanned.pos,
            }),
        }
    }
}

fn type_of(expr: &Expr) -> Result<Type, ConditionError> {
    match expr {
        Expr::Number(_) | Expr::LogLength => Ok(Type::Number),
        Expr::Str(_) => Ok(Type::String),
        Expr::Bool(_) => Ok(Type::Bool),
        Expr::Profile(field) => Ok(field.value_type()),
        Expr::LogContains(needle) => {
            expect_type(needle, Type::String, "log.contains argument")?;
            Ok(Type::Bool)
        }
        Expr::Not(inner) => {
            expect_type(inner, Type::Bool, "operand of '!'")?;
            Ok(Type::Bool)
        }
        Expr::And(left, right) | Expr::Or(left, right) => {
            expect_type(left, Type::Bool, "operand of a logical operator")?;
            expect_type(right, Type::Bool, "operand of a logical operator")?;
            Ok(Type::Bool)
        }
        Expr::Compare(op, left, right) => {
            let (lt, rt) = (type_of(left)?, type_of(right)?);
            if lt != rt {
                return Err(ConditionError::TypeMismatch(format!(
                    "cannot compare {} with {}",
                    lt.name(),
                    rt.name()
                )));
            }
            if lt == Type::Bool && !matches!(op, CompareOp::Eq | CompareOp::Ne) {
                return Err(ConditionError::TypeMismatch(
                    "booleans can only be compared for equality".to_string(),
                ));
            }
            Ok(Type::Bool)
        }
    }
}

fn expect_type(expr: &Expr, expected: Type, what: &str) -> Result<(), ConditionError> {
    let found = type_of(expr)?;
    if found == expected {
        Ok(())
    } else {
        Err(ConditionError::TypeMismatch(format!(
            "{what} must be {}, found {}",
            expected.name(),
            found.name()
        )))
    }
}
