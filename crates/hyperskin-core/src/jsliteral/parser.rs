//! Restricted JavaScript expression parser.
//!
//! Accepts the data subset of JavaScript that appears in hand-written config
//! files: object and array literals, strings (single, double and
//! substitution-free template), numbers, `true`/`false`/`null`/`undefined`/
//! `NaN`/`Infinity`, unary `+`/`-`, `+` concatenation, parentheses and
//! comments. Any identifier reference, call, function or operator outside
//! that subset is rejected, so nothing in the input can reach host state.
//!
//! Tokens are lexed lazily: only text up to one token past the end of the
//! expression is ever examined, so arbitrary script after the literal does
//! not affect the result.

use super::errors::EvalError;
use super::serializer::format_number;
use super::value::{Object, Value};

/// Maximum nesting of arrays, objects, parentheses and unary operators.
pub const MAX_DEPTH: usize = 256;

/// Parse a single expression from the start of `src`.
///
/// Parsing stops at the first token that cannot continue the expression
/// (typically `;` or end of input); whatever follows is ignored.
pub fn parse_expression(src: &str) -> Result<Value, EvalError> {
    let mut parser = Parser::new(src)?;
    parser.expression(0)
}

#[derive(Debug, Clone, PartialEq)]
enum Token {
    Punct(char),
    Str(String),
    Template(String),
    Num(f64),
    Ident(String),
    End,
}

struct Lexer<'a> {
    src: &'a str,
    pos: usize,
}

fn is_ident_start(c: char) -> bool {
    c == '_' || c == '$' || c.is_alphabetic()
}

fn is_ident_part(c: char) -> bool {
    is_ident_start(c) || c.is_alphanumeric()
}

impl<'a> Lexer<'a> {
    fn new(src: &'a str) -> Self {
        Self { src, pos: 0 }
    }

    fn peek_char(&self) -> Option<char> {
        self.src[self.pos..].chars().next()
    }

    fn peek_nth(&self, n: usize) -> Option<char> {
        self.src[self.pos..].chars().nth(n)
    }

    fn bump(&mut self) -> Option<char> {
        let c = self.peek_char()?;
        self.pos += c.len_utf8();
        Some(c)
    }

    fn syntax(&self, offset: usize, message: impl Into<String>) -> EvalError {
        EvalError::Syntax {
            offset,
            message: message.into(),
        }
    }

    fn skip_trivia(&mut self) -> Result<(), EvalError> {
        loop {
            match self.peek_char() {
                Some(c) if c.is_whitespace() || c == '\u{feff}' => {
                    self.bump();
                }
                Some('/') if self.peek_nth(1) == Some('/') => {
                    while let Some(c) = self.bump() {
                        if c == '\n' {
                            break;
                        }
                    }
                }
                Some('/') if self.peek_nth(1) == Some('*') => {
                    let start = self.pos;
                    self.pos += 2;
                    match self.src[self.pos..].find("*/") {
                        Some(end) => self.pos += end + 2,
                        None => return Err(self.syntax(start, "unterminated block comment")),
                    }
                }
                _ => return Ok(()),
            }
        }
    }

    /// Next token and the byte offset it starts at.
    fn next_token(&mut self) -> Result<(usize, Token), EvalError> {
        self.skip_trivia()?;
        let start = self.pos;
        let Some(c) = self.peek_char() else {
            return Ok((start, Token::End));
        };

        let token = match c {
            '\'' | '"' => Token::Str(self.lex_string(c)?),
            '`' => Token::Template(self.lex_template()?),
            '0'..='9' => Token::Num(self.lex_number()?),
            '.' if self.peek_nth(1).is_some_and(|d| d.is_ascii_digit()) => {
                Token::Num(self.lex_number()?)
            }
            c if is_ident_start(c) => Token::Ident(self.lex_ident()),
            // Everything else is single-character punctuation; the parser
            // decides which of it is meaningful.
            other => {
                self.bump();
                Token::Punct(other)
            }
        };
        Ok((start, token))
    }

    fn lex_ident(&mut self) -> String {
        let start = self.pos;
        while self.peek_char().is_some_and(is_ident_part) {
            self.bump();
        }
        self.src[start..self.pos].to_string()
    }

    fn lex_string(&mut self, quote: char) -> Result<String, EvalError> {
        let start = self.pos;
        self.bump();
        let mut out = String::new();
        loop {
            match self.bump() {
                None | Some('\n') => return Err(self.syntax(start, "unterminated string")),
                Some(c) if c == quote => return Ok(out),
                Some('\\') => self.read_escape(&mut out)?,
                Some(c) => out.push(c),
            }
        }
    }

    fn lex_template(&mut self) -> Result<String, EvalError> {
        let start = self.pos;
        self.bump();
        let mut out = String::new();
        loop {
            match self.bump() {
                None => return Err(self.syntax(start, "unterminated template literal")),
                Some('`') => return Ok(out),
                Some('\\') => self.read_escape(&mut out)?,
                Some('$') if self.peek_char() == Some('{') => {
                    return Err(EvalError::Unsupported {
                        offset: self.pos - 1,
                        what: "template substitution".to_string(),
                    });
                }
                Some('\r') => {
                    if self.peek_char() == Some('\n') {
                        self.bump();
                    }
                    out.push('\n');
                }
                Some(c) => out.push(c),
            }
        }
    }

    fn read_escape(&mut self, out: &mut String) -> Result<(), EvalError> {
        let offset = self.pos;
        let c = self.bump().ok_or(EvalError::UnexpectedEnd)?;
        match c {
            'n' => out.push('\n'),
            'r' => out.push('\r'),
            't' => out.push('\t'),
            'b' => out.push('\u{8}'),
            'f' => out.push('\u{c}'),
            'v' => out.push('\u{b}'),
            '0' if !self.peek_char().is_some_and(|d| d.is_ascii_digit()) => out.push('\0'),
            'x' => {
                let code = self.read_hex(2, offset)?;
                out.push(char::from_u32(code).unwrap_or(char::REPLACEMENT_CHARACTER));
            }
            'u' => {
                let code = self.read_unicode_escape(offset)?;
                out.push(self.combine_surrogates(code, offset)?);
            }
            // Line continuations produce nothing.
            '\r' => {
                if self.peek_char() == Some('\n') {
                    self.bump();
                }
            }
            '\n' | '\u{2028}' | '\u{2029}' => {}
            other => out.push(other),
        }
        Ok(())
    }

    fn read_hex(&mut self, digits: usize, offset: usize) -> Result<u32, EvalError> {
        let mut code = 0u32;
        for _ in 0..digits {
            let digit = self
                .bump()
                .and_then(|c| c.to_digit(16))
                .ok_or_else(|| self.syntax(offset, "invalid hexadecimal escape"))?;
            code = code * 16 + digit;
        }
        Ok(code)
    }

    fn read_unicode_escape(&mut self, offset: usize) -> Result<u32, EvalError> {
        if self.peek_char() != Some('{') {
            return self.read_hex(4, offset);
        }
        self.bump();
        let mut code = 0u32;
        let mut digits = 0;
        loop {
            match self.bump() {
                Some('}') if digits > 0 => return Ok(code),
                Some(c) if c.is_ascii_hexdigit() && code <= 0x10FFFF => {
                    code = code * 16 + c.to_digit(16).unwrap_or(0);
                    digits += 1;
                }
                _ => return Err(self.syntax(offset, "invalid unicode escape")),
            }
        }
    }

    /// Join a `\uD83D\uDE00` style surrogate pair; lone surrogates become U+FFFD.
    fn combine_surrogates(&mut self, high: u32, offset: usize) -> Result<char, EvalError> {
        if (0xD800..0xDC00).contains(&high)
            && self.peek_char() == Some('\\')
            && self.peek_nth(1) == Some('u')
        {
            let checkpoint = self.pos;
            self.pos += 2;
            let low = self.read_unicode_escape(offset)?;
            if (0xDC00..0xE000).contains(&low) {
                let code = 0x10000 + ((high - 0xD800) << 10) + (low - 0xDC00);
                return Ok(char::from_u32(code).unwrap_or(char::REPLACEMENT_CHARACTER));
            }
            self.pos = checkpoint;
        }
        Ok(char::from_u32(high).unwrap_or(char::REPLACEMENT_CHARACTER))
    }

    fn lex_number(&mut self) -> Result<f64, EvalError> {
        let start = self.pos;

        let radix = match (self.peek_char(), self.peek_nth(1)) {
            (Some('0'), Some('x' | 'X')) => Some(16),
            (Some('0'), Some('o' | 'O')) => Some(8),
            (Some('0'), Some('b' | 'B')) => Some(2),
            _ => None,
        };

        let value = match radix {
            Some(radix) => {
                self.pos += 2;
                let mut value = 0f64;
                let mut digits = 0;
                while let Some(c) = self.peek_char() {
                    if c == '_' {
                        self.bump();
                        continue;
                    }
                    let Some(digit) = c.to_digit(radix) else {
                        break;
                    };
                    value = value * f64::from(radix) + f64::from(digit);
                    digits += 1;
                    self.bump();
                }
                if digits == 0 {
                    return Err(self.syntax(start, "missing digits after radix prefix"));
                }
                value
            }
            None => self.lex_decimal(start)?,
        };

        match self.peek_char() {
            Some('n') => Err(EvalError::Unsupported {
                offset: start,
                what: "BigInt literal".to_string(),
            }),
            Some(c) if is_ident_start(c) || c.is_ascii_digit() => {
                Err(self.syntax(start, "identifier starts immediately after number"))
            }
            _ => Ok(value),
        }
    }

    fn lex_decimal(&mut self, start: usize) -> Result<f64, EvalError> {
        self.eat_digits();
        if self.peek_char() == Some('.') {
            self.bump();
            self.eat_digits();
        }
        if matches!(self.peek_char(), Some('e' | 'E')) {
            let mark = self.pos;
            self.bump();
            if matches!(self.peek_char(), Some('+' | '-')) {
                self.bump();
            }
            if !self.peek_char().is_some_and(|c| c.is_ascii_digit()) {
                self.pos = mark;
                return Err(self.syntax(start, "missing exponent digits"));
            }
            self.eat_digits();
        }

        let mut text: String = self.src[start..self.pos]
            .chars()
            .filter(|c| *c != '_')
            .collect();
        if text.starts_with('.') {
            text.insert(0, '0');
        }
        // "1." and "1.e5" are valid JavaScript
        text = text.replace(".e", ".0e").replace(".E", ".0E");
        if text.ends_with('.') {
            text.push('0');
        }

        text.parse::<f64>()
            .map_err(|e| self.syntax(start, format!("invalid number: {e}")))
    }

    fn eat_digits(&mut self) {
        while self
            .peek_char()
            .is_some_and(|c| c.is_ascii_digit() || c == '_')
        {
            self.bump();
        }
    }
}

struct Parser<'a> {
    lexer: Lexer<'a>,
    current: Token,
    offset: usize,
}

impl<'a> Parser<'a> {
    fn new(src: &'a str) -> Result<Self, EvalError> {
        let mut lexer = Lexer::new(src);
        let (offset, current) = lexer.next_token()?;
        Ok(Self {
            lexer,
            current,
            offset,
        })
    }

    /// Consume the current token, returning it, and lex the next one.
    fn advance(&mut self) -> Result<Token, EvalError> {
        let (offset, next) = self.lexer.next_token()?;
        self.offset = offset;
        Ok(std::mem::replace(&mut self.current, next))
    }

    fn expect(&mut self, punct: char) -> Result<(), EvalError> {
        match &self.current {
            Token::Punct(c) if *c == punct => {
                self.advance()?;
                Ok(())
            }
            Token::End => Err(EvalError::UnexpectedEnd),
            _ => Err(EvalError::Syntax {
                offset: self.offset,
                message: format!("expected `{punct}`"),
            }),
        }
    }

    fn check_depth(depth: usize) -> Result<(), EvalError> {
        if depth > MAX_DEPTH {
            return Err(EvalError::TooDeep { limit: MAX_DEPTH });
        }
        Ok(())
    }

    fn expression(&mut self, depth: usize) -> Result<Value, EvalError> {
        Self::check_depth(depth)?;
        let mut left = self.unary(depth)?;
        loop {
            let offset = self.offset;
            match &self.current {
                Token::Punct('+') => {
                    self.advance()?;
                    let right = self.unary(depth)?;
                    left = add(left, right, offset)?;
                }
                Token::Punct('-') => {
                    self.advance()?;
                    let right = self.unary(depth)?;
                    left = subtract(left, right, offset)?;
                }
                _ => return Ok(left),
            }
        }
    }

    fn unary(&mut self, depth: usize) -> Result<Value, EvalError> {
        Self::check_depth(depth)?;
        let offset = self.offset;
        let negate = match &self.current {
            Token::Punct('-') => true,
            Token::Punct('+') => false,
            _ => return self.primary(depth),
        };
        self.advance()?;
        match self.unary(depth + 1)? {
            Value::Number(n) if negate => Ok(Value::Number(-n)),
            Value::Number(n) => Ok(Value::Number(n)),
            other => Err(EvalError::Unsupported {
                offset,
                what: format!("unary operator on {}", other.kind()),
            }),
        }
    }

    fn primary(&mut self, depth: usize) -> Result<Value, EvalError> {
        let offset = self.offset;
        match self.advance()? {
            Token::Str(s) | Token::Template(s) => Ok(Value::String(s)),
            Token::Num(n) => Ok(Value::Number(n)),
            Token::Ident(name) => match name.as_str() {
                "true" => Ok(Value::Bool(true)),
                "false" => Ok(Value::Bool(false)),
                "null" => Ok(Value::Null),
                "undefined" => Ok(Value::Undefined),
                "NaN" => Ok(Value::Number(f64::NAN)),
                "Infinity" => Ok(Value::Number(f64::INFINITY)),
                _ => Err(EvalError::Unsupported {
                    offset,
                    what: format!("identifier `{name}`"),
                }),
            },
            Token::Punct('(') => {
                if matches!(self.current, Token::Punct(')')) {
                    return Err(EvalError::Unsupported {
                        offset,
                        what: "arrow function".to_string(),
                    });
                }
                let value = self.expression(depth + 1)?;
                self.expect(')')?;
                Ok(value)
            }
            Token::Punct('[') => self.array(depth + 1),
            Token::Punct('{') => self.object(depth + 1),
            Token::Punct('.') => Err(EvalError::Unsupported {
                offset,
                what: "spread element".to_string(),
            }),
            Token::End => Err(EvalError::UnexpectedEnd),
            Token::Punct(c) => Err(EvalError::Syntax {
                offset,
                message: format!("unexpected `{c}`"),
            }),
        }
    }

    /// Called with `[` already consumed.
    fn array(&mut self, depth: usize) -> Result<Value, EvalError> {
        Self::check_depth(depth)?;
        let mut items = Vec::new();
        loop {
            match &self.current {
                Token::Punct(']') => {
                    self.advance()?;
                    return Ok(Value::Array(items));
                }
                // Elision: `[1,,2]` has a hole at index 1.
                Token::Punct(',') => {
                    self.advance()?;
                    items.push(Value::Undefined);
                    continue;
                }
                Token::End => return Err(EvalError::UnexpectedEnd),
                _ => {}
            }

            items.push(self.expression(depth)?);

            match &self.current {
                Token::Punct(',') => {
                    self.advance()?;
                }
                Token::Punct(']') => {}
                Token::End => return Err(EvalError::UnexpectedEnd),
                _ => {
                    return Err(EvalError::Syntax {
                        offset: self.offset,
                        message: "expected `,` or `]` in array literal".to_string(),
                    });
                }
            }
        }
    }

    /// Called with `{` already consumed.
    fn object(&mut self, depth: usize) -> Result<Value, EvalError> {
        Self::check_depth(depth)?;
        let mut obj = Object::new();
        loop {
            let key_offset = self.offset;
            let key = match self.advance()? {
                Token::Punct('}') => return Ok(Value::Object(obj)),
                Token::Ident(name) | Token::Str(name) => name,
                Token::Num(n) => format_number(n),
                Token::End => return Err(EvalError::UnexpectedEnd),
                Token::Punct('[') => {
                    return Err(EvalError::Unsupported {
                        offset: key_offset,
                        what: "computed property key".to_string(),
                    });
                }
                Token::Punct('.') => {
                    return Err(EvalError::Unsupported {
                        offset: key_offset,
                        what: "spread element".to_string(),
                    });
                }
                _ => {
                    return Err(EvalError::Syntax {
                        offset: key_offset,
                        message: "expected property name".to_string(),
                    });
                }
            };

            match &self.current {
                Token::Punct(':') => {
                    self.advance()?;
                }
                Token::Punct(',' | '}') => {
                    return Err(EvalError::Unsupported {
                        offset: key_offset,
                        what: format!("shorthand property `{key}`"),
                    });
                }
                Token::Punct('(') => {
                    return Err(EvalError::Unsupported {
                        offset: key_offset,
                        what: format!("method `{key}`"),
                    });
                }
                Token::End => return Err(EvalError::UnexpectedEnd),
                _ => {
                    return Err(EvalError::Syntax {
                        offset: self.offset,
                        message: format!("expected `:` after property `{key}`"),
                    });
                }
            }

            let value = self.expression(depth)?;
            obj.insert(key, value);

            match &self.current {
                Token::Punct(',') => {
                    self.advance()?;
                }
                Token::Punct('}') => {}
                Token::End => return Err(EvalError::UnexpectedEnd),
                _ => {
                    return Err(EvalError::Syntax {
                        offset: self.offset,
                        message: "expected `,` or `}` in object literal".to_string(),
                    });
                }
            }
        }
    }
}

fn add(left: Value, right: Value, offset: usize) -> Result<Value, EvalError> {
    match (left, right) {
        (Value::Number(a), Value::Number(b)) => Ok(Value::Number(a + b)),
        (Value::String(a), b) => Ok(Value::String(a + &to_js_string(&b, offset)?)),
        (a, Value::String(b)) => Ok(Value::String(to_js_string(&a, offset)? + &b)),
        (a, b) => Err(EvalError::Unsupported {
            offset,
            what: format!("`+` between {} and {}", a.kind(), b.kind()),
        }),
    }
}

fn subtract(left: Value, right: Value, offset: usize) -> Result<Value, EvalError> {
    match (left, right) {
        (Value::Number(a), Value::Number(b)) => Ok(Value::Number(a - b)),
        (a, b) => Err(EvalError::Unsupported {
            offset,
            what: format!("`-` between {} and {}", a.kind(), b.kind()),
        }),
    }
}

/// String conversion used by `+` concatenation, primitives only.
fn to_js_string(value: &Value, offset: usize) -> Result<String, EvalError> {
    match value {
        Value::Undefined => Ok("undefined".to_string()),
        Value::Null => Ok("null".to_string()),
        Value::Bool(b) => Ok(b.to_string()),
        Value::Number(n) => Ok(format_number(*n)),
        Value::String(s) => Ok(s.clone()),
        Value::Array(_) | Value::Object(_) => Err(EvalError::Unsupported {
            offset,
            what: format!("string conversion of {}", value.kind()),
        }),
    }
}
