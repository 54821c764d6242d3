//! Reads Python literal text back into a JSON value.
//!
//! Only the subset `writer::python` emits is accepted; that is enough to
//! check an emitted literal against the value it came from.

use std::iter::Peekable;

use serde_json::{Map, Value};

use super::lexer::{Lexer, Token};

pub fn parse(src: &str) -> Result<Value, String> {
    let mut p = Parser::new(src);
    let value = p.parse_value()?;
    match p.next()? {
        Token::Eof => Ok(value),
        other => Err(format!("trailing input after literal: {other:?}")),
    }
}

struct Parser<'a> {
    tokens: Peekable<Lexer<'a>>,
}

impl<'a> Parser<'a> {
    fn new(src: &'a str) -> Self {
        Self {
            tokens: Lexer::new(src).peekable(),
        }
    }

    fn next(&mut self) -> Result<Token, String> {
        self.tokens.next().unwrap_or(Ok(Token::Eof))
    }

    /// Consumes the next token when it equals `tok`.
    fn eat(&mut self, tok: &Token) -> bool {
        if matches!(self.tokens.peek(), Some(Ok(t)) if t == tok) {
            self.tokens.next();
            true
        } else {
            false
        }
    }

    fn parse_value(&mut self) -> Result<Value, String> {
        match self.next()? {
            Token::Ident(id) => match id.as_str() {
                "None" => Ok(Value::Null),
                "True" => Ok(Value::Bool(true)),
                "False" => Ok(Value::Bool(false)),
                other => Err(format!("unknown name `{other}`")),
            },
            Token::Number(n) => Ok(Value::Number(n)),
            Token::Str(s) => Ok(Value::String(s)),
            Token::LBracket => self.parse_list(),
            Token::LBrace => self.parse_dict(),
            other => Err(format!("expected a value, found {other:?}")),
        }
    }

    fn parse_list(&mut self) -> Result<Value, String> {
        let mut items = Vec::new();
        loop {
            if self.eat(&Token::RBracket) {
                return Ok(Value::Array(items));
            }
            items.push(self.parse_value()?);
            match self.next()? {
                Token::Comma => {}
                Token::RBracket => return Ok(Value::Array(items)),
                other => return Err(format!("expected `,` or `]`, found {other:?}")),
            }
        }
    }

    fn parse_dict(&mut self) -> Result<Value, String> {
        let mut map = Map::new();
        loop {
            if self.eat(&Token::RBrace) {
                return Ok(Value::Object(map));
            }
            let key = match self.next()? {
                Token::Str(s) => s,
                other => return Err(format!("dict keys must be strings, found {other:?}")),
            };
            match self.next()? {
                Token::Colon => {}
                other => return Err(format!("expected `:` after key, found {other:?}")),
            }
            let value = self.parse_value()?;
            map.insert(key, value);
            match self.next()? {
                Token::Comma => {}
                Token::RBrace => return Ok(Value::Object(map)),
                other => return Err(format!("expected `,` or `}}`, found {other:?}")),
            }
        }
    }
}
