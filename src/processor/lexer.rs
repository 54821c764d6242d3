//! Small hand-written lexer for the Python literal subset we emit.
//
//  Lexical items:
//
//      Ident    ::= [A-Za-z_][A-Za-z0-9_]*      (True / False / None)
//      Number   ::= '-'? [0-9]+ ('.' [0-9]*)? ([eE] [+-]? [0-9]+)?
//      Str      ::= '\'' … '\'' | '"' … '"'     (backslash escapes)
//      Symbols  ::= '[' ']' '{' '}' ',' ':'
//      Whitespace (including newlines) and `#` comments are discarded.

use std::iter::Peekable;
use std::str::Chars;

use serde_json::Number;

#[derive(Debug, Clone, PartialEq)]
pub enum Token {
    Ident(String),
    Number(Number),
    Str(String),
    LBracket,
    RBracket,
    LBrace,
    RBrace,
    Comma,
    Colon,
    Eof,
}

#[derive(Clone)]
pub struct Lexer<'a> {
    chars: Peekable<Chars<'a>>,
    finished: bool,
}

impl<'a> Lexer<'a> {
    pub fn new(src: &'a str) -> Self {
        Self {
            chars: src.chars().peekable(),
            finished: false,
        }
    }

    fn next_char(&mut self) -> Option<char> {
        self.chars.next()
    }

    fn peek_char(&mut self) -> Option<char> {
        self.chars.peek().copied()
    }

    fn consume_while<F: Fn(char) -> bool>(&mut self, pred: F, buf: &mut String) {
        while let Some(c) = self.peek_char() {
            if pred(c) {
                buf.push(c);
                self.next_char();
            } else {
                break;
            }
        }
    }

    fn skip_trivia(&mut self) {
        while let Some(c) = self.peek_char() {
            if c.is_whitespace() {
                self.next_char();
            } else if c == '#' {
                while let Some(c) = self.next_char() {
                    if c == '\n' {
                        break;
                    }
                }
            } else {
                break;
            }
        }
    }

    fn read_identifier(&mut self, first: char) -> String {
        let mut id = String::new();
        id.push(first);
        self.consume_while(|c| c.is_ascii_alphanumeric() || c == '_', &mut id);
        id
    }

    fn read_number(&mut self, first: char) -> Result<Number, String> {
        let mut num = String::new();
        num.push(first);
        self.consume_while(|c| c.is_ascii_digit(), &mut num);

        if self.peek_char() == Some('.') {
            num.push('.');
            self.next_char();
            self.consume_while(|c| c.is_ascii_digit(), &mut num);
        }
        if let Some(e @ ('e' | 'E')) = self.peek_char() {
            num.push(e);
            self.next_char();
            if let Some(sign @ ('+' | '-')) = self.peek_char() {
                num.push(sign);
                self.next_char();
            }
            self.consume_while(|c| c.is_ascii_digit(), &mut num);
        }

        // numbers keep their literal text, so integers past u64 stay exact
        num.parse::<Number>()
            .map_err(|e| format!("bad number literal `{num}`: {e}"))
    }

    fn read_hex(&mut self, digits: usize) -> Result<char, String> {
        let mut hex = String::with_capacity(digits);
        for _ in 0..digits {
            match self.next_char() {
                Some(c) if c.is_ascii_hexdigit() => hex.push(c),
                _ => return Err(format!("truncated \\x/\\u escape after `{hex}`")),
            }
        }
        let code = u32::from_str_radix(&hex, 16).map_err(|e| e.to_string())?;
        char::from_u32(code).ok_or_else(|| format!("invalid code point U+{code:X}"))
    }

    fn read_string(&mut self, quote: char) -> Result<String, String> {
        let mut txt = String::new();
        while let Some(c) = self.next_char() {
            match c {
                c if c == quote => return Ok(txt),
                '\n' => return Err("newline inside string literal".into()),
                '\\' => {
                    let esc = self
                        .next_char()
                        .ok_or("unterminated escape at end of input")?;
                    match esc {
                        '\\' | '\'' | '"' => txt.push(esc),
                        'n' => txt.push('\n'),
                        'r' => txt.push('\r'),
                        't' => txt.push('\t'),
                        'a' => txt.push('\u{7}'),
                        'b' => txt.push('\u{8}'),
                        'f' => txt.push('\u{c}'),
                        'v' => txt.push('\u{b}'),
                        'x' => txt.push(self.read_hex(2)?),
                        'u' => txt.push(self.read_hex(4)?),
                        'U' => txt.push(self.read_hex(8)?),
                        // unknown escapes are kept verbatim
                        other => {
                            txt.push('\\');
                            txt.push(other);
                        }
                    }
                }
                c => txt.push(c),
            }
        }
        Err(format!("no closing {quote} found"))
    }
}

impl<'a> Iterator for Lexer<'a> {
    type Item = Result<Token, String>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.finished {
            return None;
        }

        self.skip_trivia();

        let ch = match self.next_char() {
            Some(c) => c,
            None => {
                self.finished = true;
                return Some(Ok(Token::Eof));
            }
        };

        let tok_res = match ch {
            '[' => Ok(Token::LBracket),
            ']' => Ok(Token::RBracket),
            '{' => Ok(Token::LBrace),
            '}' => Ok(Token::RBrace),
            ',' => Ok(Token::Comma),
            ':' => Ok(Token::Colon),
            '\'' | '"' => self.read_string(ch).map(Token::Str),
            c if c == '-' || c.is_ascii_digit() => self.read_number(c).map(Token::Number),
            c if c.is_ascii_alphabetic() || c == '_' => Ok(Token::Ident(self.read_identifier(c))),
            other => Err(format!("unexpected character `{other}`")),
        };

        if tok_res.is_err() {
            self.finished = true;
        }
        Some(tok_res)
    }
}
