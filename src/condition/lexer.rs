//! Tokenizer for visibility conditions

use super::ConditionError;

#[derive(Debug, Clone, PartialEq)]
pub enum Token {
    Number(f64),
    Str(String),
    Ident(String),
    Dot,
    LParen,
    RParen,
    Not,
    And,
    Or,
    Eq,
    Ne,
    Lt,
    Le,
    Gt,
    Ge,
}

impl Token {
    pub fn describe(&self) -> String {
        match self {
            Token::Number(n) => n.to_string(),
            Token::Str(s) => format!("'{s}'"),
            Token::Ident(name) => name.clone(),
            Token::Dot => ".".to_string(),
            Token::LParen => "(".to_string(),
            Token::RParen => ")".to_string(),
            Token::Not => "!".to_string(),
            Token::And => "&&".to_string(),
            Token::Or => "||".to_string(),
            Token::Eq => "==".to_string(),
            Token::Ne => "!=".to_string(),
            Token::Lt => "<".to_string(),
            Token::Le => "<=".to_string(),
            Token::Gt => ">".to_string(),
            Token::Ge => ">=".to_string(),
        }
    }
}

/// Token with its byte offset in the source
#[derive(Debug, Clone, PartialEq)]
pub struct Spanned {
    pub token: Token,
    pub pos: usize,
}

pub fn tokenize(source: &str) -> Result<Vec<Spanned>, ConditionError> {
    let mut tokens = Vec::new();
    let mut chars = source.char_indices().peekable();

    while let Some(&(pos, ch)) = chars.peek() {
        if ch.is_whitespace() {
            chars.next();
            continue;
        }

        let token = match ch {
            '.' => {
                chars.next();
                Token::Dot
            }
            '(' => {
                chars.next();
                Token::LParen
            }
            ')' => {
                chars.next();
                Token::RParen
            }
            '&' | '|' => {
                chars.next();
                if chars.next_if(|&(_, c)| c == ch).is_none() {
                    return Err(ConditionError::UnexpectedChar { ch, pos });
                }
                if ch == '&' {
                    Token::And
                } else {
                    Token::Or
                }
            }
            '=' => {
                chars.next();
                if chars.next_if(|&(_, c)| c == '=').is_none() {
                    return Err(ConditionError::UnexpectedChar { ch, pos });
                }
                // `===` is accepted as a synonym
                chars.next_if(|&(_, c)| c == '=');
                Token::Eq
            }
            '!' => {
                chars.next();
                if chars.next_if(|&(_, c)| c == '=').is_some() {
                    chars.next_if(|&(_, c)| c == '=');
                    Token::Ne
                } else {
                    Token::Not
                }
            }
            '<' | '>' => {
                chars.next();
                let or_equal = chars.next_if(|&(_, c)| c == '=').is_some();
                match (ch, or_equal) {
                    ('<', false) => Token::Lt,
                    ('<', true) => Token::Le,
                    ('>', false) => Token::Gt,
                    _ => Token::Ge,
                }
            }
            '\'' | '"' => {
                chars.next();
                let mut text = String::new();
                let mut closed = false;
                for (_, c) in chars.by_ref() {
                    if c == ch {
                        closed = true;
                        break;
                    }
                    text.push(c);
                }
                if !closed {
                    return Err(ConditionError::UnterminatedString { pos });
                }
                Token::Str(text)
            }
            c if c.is_ascii_digit() || c == '-' => {
                let mut text = String::new();
                text.push(c);
                chars.next();
                while let Some((_, d)) = chars.next_if(|&(_, d)| d.is_ascii_digit() || d == '.') {
                    text.push(d);
                }
                let value = text
                    .parse::<f64>()
                    .map_err(|_| ConditionError::InvalidNumber { text, pos })?;
                Token::Number(value)
            }
            c if c.is_alphabetic() || c == '_' => {
                let mut name = String::new();
                while let Some((_, d)) = chars.next_if(|&(_, d)| d.is_alphanumeric() || d == '_') {
                    name.push(d);
                }
                Token::Ident(name)
            }
            other => return Err(ConditionError::UnexpectedChar { ch: other, pos }),
        };

        tokens.push(Spanned { token, pos });
    }

    Ok(tokens)
}
