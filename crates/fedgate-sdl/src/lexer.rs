//! SDL lexer
//!
//! Tokenizes SDL source into names, literals, and punctuators. Commas and
//! comments are insignificant, per the GraphQL lexical grammar.

use crate::error::ParseError;

/// One lexed token with its source position
#[derive(Debug, Clone, PartialEq)]
pub(crate) struct SpannedToken {
    pub(crate) token: Token,
    pub(crate) line: usize,
    pub(crate) column: usize,
}

/// Token kinds relevant to SDL
#[derive(Debug, Clone, PartialEq)]
pub(crate) enum Token {
    /// Identifier or keyword
    Name(String),
    /// Integer literal
    Int(i64),
    /// Float literal
    Float(f64),
    /// String or block-string literal (unescaped value)
    Str(String),
    /// Single-character punctuator
    Punct(char),
}

impl Token {
    pub(crate) fn describe(&self) -> String {
        match self {
            Self::Name(n) => format!("name `{n}`"),
            Self::Int(v) => format!("integer `{v}`"),
            Self::Float(v) => format!("float `{v}`"),
            Self::Str(_) => "string".to_string(),
            Self::Punct(c) => format!("`{c}`"),
        }
    }
}

const PUNCTUATORS: &str = "!&():=@[]{|}";

struct Lexer {
    chars: Vec<char>,
    pos: usize,
    line: usize,
    column: usize,
}

/// Tokenize `source`, returning tokens in order.
pub(crate) fn tokenize(source: &str) -> Result<Vec<SpannedToken>, ParseError> {
    let mut lexer = Lexer {
        chars: source.chars().collect(),
        pos: 0,
        line: 1,
        column: 1,
    };
    lexer.run()
}

impl Lexer {
    fn run(&mut self) -> Result<Vec<SpannedToken>, ParseError> {
        let mut tokens = Vec::new();
        while let Some(c) = self.peek() {
            match c {
                ' ' | '\t' | '\r' | '\n' | ',' | '\u{feff}' => {
                    self.bump();
                }
                '#' => {
                    while let Some(c) = self.peek() {
                        if c == '\n' {
                            break;
                        }
                        self.bump();
                    }
                }
                '"' => {
                    let (line, column) = (self.line, self.column);
                    let value = self.string()?;
                    tokens.push(SpannedToken {
                        token: Token::Str(value),
                        line,
                        column,
                    });
                }
                c if c == '_' || c.is_ascii_alphabetic() => {
                    let (line, column) = (self.line, self.column);
                    let name = self.name();
                    tokens.push(SpannedToken {
                        token: Token::Name(name),
                        line,
                        column,
                    });
                }
                c if c == '-' || c.is_ascii_digit() => {
                    let (line, column) = (self.line, self.column);
                    let token = self.number()?;
                    tokens.push(SpannedToken {
                        token,
                        line,
                        column,
                    });
                }
                c if PUNCTUATORS.contains(c) => {
                    let (line, column) = (self.line, self.column);
                    self.bump();
                    tokens.push(SpannedToken {
                        token: Token::Punct(c),
                        line,
                        column,
                    });
                }
                other => {
                    return Err(self.error(format!("unexpected character `{other}`")));
                }
            }
        }
        Ok(tokens)
    }

    fn peek(&self) -> Option<char> {
        self.chars.get(self.pos).copied()
    }

    fn peek_at(&self, offset: usize) -> Option<char> {
        self.chars.get(self.pos + offset).copied()
    }

    fn bump(&mut self) -> Option<char> {
        let c = self.peek()?;
        self.pos += 1;
        if c == '\n' {
            self.line += 1;
            self.column = 1;
        } else {
            self.column += 1;
        }
        Some(c)
    }

    fn error(&self, message: impl Into<String>) -> ParseError {
        ParseError::new(message, self.line, self.column)
    }

    fn name(&mut self) -> String {
        let mut out = String::new();
        while let Some(c) = self.peek() {
            if c == '_' || c.is_ascii_alphanumeric() {
                out.push(c);
                self.bump();
            } else {
                break;
            }
        }
        out
    }

    fn number(&mut self) -> Result<Token, ParseError> {
        let mut raw = String::new();
        if self.peek() == Some('-') {
            raw.push('-');
            self.bump();
        }
        let mut is_float = false;
        while let Some(c) = self.peek() {
            match c {
                '0'..='9' => {
                    raw.push(c);
                    self.bump();
                }
                '.' | 'e' | 'E' | '+' | '-' if c != '-' || raw.ends_with(['e', 'E']) => {
                    is_float = true;
                    raw.push(c);
                    self.bump();
                }
                _ => break,
            }
        }
        if is_float {
            raw.parse::<f64>()
                .map(Token::Float)
                .map_err(|_| self.error(format!("invalid float literal `{raw}`")))
        } else {
            raw.parse::<i64>()
                .map(Token::Int)
                .map_err(|_| self.error(format!("invalid integer literal `{raw}`")))
        }
    }

    fn string(&mut self) -> Result<String, ParseError> {
        if self.peek_at(1) == Some('"') && self.peek_at(2) == Some('"') {
            self.block_string()
        } else {
            self.quoted_string()
        }
    }

    fn quoted_string(&mut self) -> Result<String, ParseError> {
        self.bump(); // opening quote
        let mut out = String::new();
        loop {
            match self.bump() {
                None | Some('\n') => return Err(self.error("unterminated string")),
                Some('"') => return Ok(out),
                Some('\\') => match self.bump() {
                    Some('"') => out.push('"'),
                    Some('\\') => out.push('\\'),
                    Some('/') => out.push('/'),
                    Some('b') => out.push('\u{8}'),
                    Some('f') => out.push('\u{c}'),
                    Some('n') => out.push('\n'),
                    Some('r') => out.push('\r'),
                    Some('t') => out.push('\t'),
                    Some('u') => {
                        let mut hex = String::new();
                        for _ in 0..4 {
                            match self.bump() {
                                Some(c) if c.is_ascii_hexdigit() => hex.push(c),
                                _ => return Err(self.error("invalid unicode escape")),
                            }
                        }
                        let code = u32::from_str_radix(&hex, 16)
                            .ok()
                            .and_then(char::from_u32)
                            .ok_or_else(|| self.error("invalid unicode escape"))?;
                        out.push(code);
                    }
                    _ => return Err(self.error("invalid escape sequence")),
                },
                Some(c) => out.push(c),
            }
        }
    }

    fn block_string(&mut self) -> Result<String, ParseError> {
        self.bump();
        self.bump();
        self.bump(); // opening """
        let mut raw = String::new();
        loop {
            if self.peek() == Some('"') && self.peek_at(1) == Some('"') && self.peek_at(2) == Some('"')
            {
                self.bump();
                self.bump();
                self.bump();
                return Ok(dedent_block(&raw));
            }
            if self.peek() == Some('\\')
                && self.peek_at(1) == Some('"')
                && self.peek_at(2) == Some('"')
                && self.peek_at(3) == Some('"')
            {
                self.bump();
                self.bump();
                self.bump();
                self.bump();
                raw.push_str("\"\"\"");
                continue;
            }
            match self.bump() {
                None => return Err(self.error("unterminated block string")),
                Some(c) => raw.push(c),
            }
        }
    }

}

/// Strip the common indentation and surrounding blank lines from a block
/// string, per the GraphQL `BlockStringValue` semantics.
///
/// Indentation is counted in characters, and only ASCII space and tab
/// count — the only whitespace the GraphQL lexical grammar knows.
fn dedent_block(raw: &str) -> String {
    fn indent_width(line: &str) -> usize {
        line.chars().take_while(|c| *c == ' ' || *c == '\t').count()
    }

    let lines: Vec<&str> = raw.split('\n').collect();
    let common_indent = lines
        .iter()
        .skip(1)
        .filter(|l| !l.trim().is_empty())
        .map(|l| indent_width(l))
        .min()
        .unwrap_or(0);

    let mut out: Vec<String> = Vec::with_capacity(lines.len());
    for (i, line) in lines.iter().enumerate() {
        if i == 0 {
            out.push((*line).to_string());
        } else {
            out.push(line.chars().skip(common_indent).collect());
        }
    }
    while out.first().is_some_and(|l| l.trim().is_empty()) {
        out.remove(0);
    }
    while out.last().is_some_and(|l| l.trim().is_empty()) {
        out.pop();
    }
    out.join("\n")
}

#[cfg(test)]
mod tests {
    use super::*;

    fn kinds(source: &str) -> Vec<Token> {
        tokenize(source).unwrap().into_iter().map(|t| t.token).collect()
    }

    #[test]
    fn lexes_names_and_punctuation() {
        assert_eq!(
            kinds("type Foo { id: ID! }"),
            vec![
                Token::Name("type".to_string()),
                Token::Name("Foo".to_string()),
                Token::Punct('{'),
                Token::Name("id".to_string()),
                Token::Punct(':'),
                Token::Name("ID".to_string()),
                Token::Punct('!'),
                Token::Punct('}'),
            ]
        );
    }

    #[test]
    fn commas_and_comments_are_insignificant() {
        assert_eq!(
            kinds("# header\nA, B"),
            vec![Token::Name("A".to_string()), Token::Name("B".to_string())]
        );
    }

    #[test]
    fn lexes_string_escapes() {
        assert_eq!(
            kinds(r#""a\"b\n""#),
            vec![Token::Str("a\"b\n".to_string())]
        );
    }

    #[test]
    fn lexes_block_strings_with_dedent() {
        let tokens = kinds("\"\"\"\n  first\n  second\n\"\"\"");
        assert_eq!(tokens, vec![Token::Str("first\nsecond".to_string())]);
    }

    #[test]
    fn block_string_dedent_ignores_non_ascii_whitespace() {
        // Only space and tab count as indentation; a line led by a
        // multi-byte whitespace character keeps its content intact.
        let tokens = kinds("\"\"\"\n  a\n\u{2003}b\n\"\"\"");
        assert_eq!(tokens, vec![Token::Str("  a\n\u{2003}b".to_string())]);
    }

    #[test]
    fn lexes_numbers() {
        assert_eq!(
            kinds("10 -3 2.5"),
            vec![Token::Int(10), Token::Int(-3), Token::Float(2.5)]
        );
    }

    #[test]
    fn tracks_positions() {
        let tokens = tokenize("type\n  Foo").unwrap();
        assert_eq!((tokens[0].line, tokens[0].column), (1, 1));
        assert_eq!((tokens[1].line, tokens[1].column), (2, 3));
    }

    #[test]
    fn rejects_unterminated_string() {
        let err = tokenize("\"abc").unwrap_err();
        assert!(err.message.contains("unterminated"));
    }
}
