use std::{iter::Peekable, str::CharIndices};

use derive_more::with_trait::{Display, Error};

use crate::parser::{SourcePosition, Spanning};

/// Raw scalar literal, as written in the source.
///
/// Numbers are kept as text, so the coercion layer decides on their range.
#[expect(missing_docs, reason = "self-explanatory")]
#[derive(Clone, Copy, Debug, Display, Eq, PartialEq)]
pub enum ScalarToken<'a> {
    /// Quoted string, surrounding quotes included.
    String(&'a str),
    Float(&'a str),
    Int(&'a str),
}

/// Single lexical token of an executable document.
#[expect(missing_docs, reason = "self-explanatory")]
#[derive(Clone, Copy, Debug, Display, Eq, PartialEq)]
pub enum Token<'a> {
    Name(&'a str),
    Scalar(ScalarToken<'a>),
    #[display("!")]
    ExclamationMark,
    #[display("$")]
    Dollar,
    #[display("(")]
    ParenOpen,
    #[display(")")]
    ParenClose,
    #[display("[")]
    BracketOpen,
    #[display("]")]
    BracketClose,
    #[display("{{")]
    CurlyOpen,
    #[display("}}")]
    CurlyClose,
    #[display("...")]
    Ellipsis,
    #[display(":")]
    Colon,
    #[display("=")]
    Equals,
    #[display("@")]
    At,
    #[display("End of file")]
    EndOfFile,
}

/// Error of tokenizing a query source.
#[derive(Clone, Debug, Display, Eq, Error, PartialEq)]
pub enum LexerError {
    /// Character that never occurs in GraphQL, like `?` or `%`.
    #[display("Unknown character \"{_0}\"")]
    UnknownCharacter(#[error(not(source))] char),

    /// Character valid in GraphQL, but not at this position.
    #[display("Unexpected character \"{_0}\"")]
    UnexpectedCharacter(#[error(not(source))] char),

    /// String literal without its closing quote, or broken by a line feed.
    #[display("Unterminated string literal")]
    UnterminatedString,

    /// Control character inside a string literal.
    #[display("Unknown character \"{_0}\" in string literal")]
    UnknownCharacterInString(#[error(not(source))] char),

    /// Escape sequence GraphQL doesn't define, like `"\l"`.
    #[display("Unknown escape sequence \"{_0}\" in string")]
    UnknownEscapeSequence(#[error(not(source))] String),

    /// Source ended in the middle of a token, like `"1."`.
    #[display("Unexpected end of input")]
    UnexpectedEndOfFile,
}

pub type LexerResult<'a> = Result<Spanning<Token<'a>>, Spanning<LexerError>>;

/// Iterator over the [`Token`]s of a query source.
///
/// Yields [`Token::EndOfFile`] once and then stops.
#[derive(Debug)]
pub struct Lexer<'a> {
    iterator: Peekable<CharIndices<'a>>,
    source: &'a str,
    position: SourcePosition,
    has_reached_eof: bool,
}

impl<'a> Lexer<'a> {
    /// Starts tokenizing the provided `source`.
    pub fn new(source: &'a str) -> Self {
        Self {
            iterator: source.char_indices().peekable(),
            source,
            position: SourcePosition::new_origin(),
            has_reached_eof: false,
        }
    }

    fn peek_char(&mut self) -> Option<(usize, char)> {
        self.iterator.peek().copied()
    }

    fn next_char(&mut self) -> Option<(usize, char)> {
        let next = self.iterator.next();
        if let Some((_, ch)) = next {
            if ch == '\n' {
                self.position.advance_line();
            } else {
                self.position.advance_col(ch.len_utf8());
            }
        }
        next
    }

    fn eof_error(&self) -> Spanning<LexerError> {
        Spanning::zero_width(self.position, LexerError::UnexpectedEndOfFile)
    }

    fn emit_single_char(&mut self, token: Token<'a>) -> LexerResult<'a> {
        let start = self.position;
        self.next_char().ok_or_else(|| self.eof_error())?;
        Ok(Spanning::start_end(start, self.position, token))
    }

    fn scan_over_whitespace(&mut self) {
        while let Some((_, ch)) = self.peek_char() {
            match ch {
                '\t' | ' ' | '\n' | '\r' | ',' | '\u{feff}' => {
                    self.next_char();
                }
                '#' => {
                    while let Some((_, ch)) = self.peek_char() {
                        if ch == '\n' || ch == '\r' {
                            break;
                        }
                        self.next_char();
                    }
                }
                _ => break,
            }
        }
    }

    fn scan_ellipsis(&mut self) -> LexerResult<'a> {
        let start = self.position;
        for _ in 0..3 {
            let (_, ch) = self.next_char().ok_or_else(|| self.eof_error())?;
            if ch != '.' {
                return Err(Spanning::zero_width(
                    start,
                    LexerError::UnexpectedCharacter('.'),
                ));
            }
        }
        Ok(Spanning::start_end(start, self.position, Token::Ellipsis))
    }

    fn scan_name(&mut self) -> LexerResult<'a> {
        let start = self.position;
        let (start_idx, _) = self.next_char().ok_or_else(|| self.eof_error())?;
        let mut end_idx = start_idx + 1;

        while let Some((idx, ch)) = self.peek_char() {
            if !is_name_cont(ch) {
                break;
            }
            self.next_char();
            end_idx = idx + 1;
        }

        Ok(Spanning::start_end(
            start,
            self.position,
            Token::Name(&self.source[start_idx..end_idx]),
        ))
    }

    fn scan_string(&mut self) -> LexerResult<'a> {
        let start = self.position;
        let (start_idx, _) = self.next_char().ok_or_else(|| self.eof_error())?;

        let mut escaped = false;
        let mut old_pos = self.position;
        while let Some((idx, ch)) = self.next_char() {
            match ch {
                'b' | 'f' | 'n' | 'r' | 't' | '\\' | '/' | '"' if escaped => escaped = false,
                'u' if escaped => {
                    self.scan_escaped_unicode(old_pos)?;
                    escaped = false;
                }
                c if escaped => {
                    return Err(Spanning::zero_width(
                        old_pos,
                        LexerError::UnknownEscapeSequence(format!("\\{c}")),
                    ));
                }
                '\\' => escaped = true,
                '"' => {
                    return Ok(Spanning::start_end(
                        start,
                        self.position,
                        Token::Scalar(ScalarToken::String(&self.source[start_idx..=idx])),
                    ));
                }
                '\n' | '\r' => {
                    return Err(Spanning::zero_width(
                        old_pos,
                        LexerError::UnterminatedString,
                    ));
                }
                c if !is_source_char(c) => {
                    return Err(Spanning::zero_width(
                        old_pos,
                        LexerError::UnknownCharacterInString(c),
                    ));
                }
                _ => {}
            }
            old_pos = self.position;
        }

        Err(Spanning::zero_width(
            self.position,
            LexerError::UnterminatedString,
        ))
    }

    fn scan_escaped_unicode(&mut self, start: SourcePosition) -> Result<(), Spanning<LexerError>> {
        let mut escape = String::with_capacity(4);
        for _ in 0..4 {
            match self.peek_char() {
                Some((_, ch)) if ch.is_ascii_hexdigit() => {
                    self.next_char();
                    escape.push(ch);
                }
                Some(_) => break,
                None => {
                    return Err(Spanning::zero_width(
                        self.position,
                        LexerError::UnterminatedString,
                    ));
                }
            }
        }

        let valid = escape.len() == 4
            && u32::from_str_radix(&escape, 16)
                .ok()
                .and_then(char::from_u32)
                .is_some();
        if valid {
            Ok(())
        } else {
            Err(Spanning::zero_width(
                start,
                LexerError::UnknownEscapeSequence(format!("\\u{escape}")),
            ))
        }
    }

    fn scan_digits(&mut self) -> usize {
        let mut count = 0;
        while let Some((_, ch)) = self.peek_char() {
            if !ch.is_ascii_digit() {
                break;
            }
            self.next_char();
            count += 1;
        }
        count
    }

    fn expect_digits(&mut self) -> Result<(), Spanning<LexerError>> {
        match self.peek_char() {
            Some((_, ch)) if ch.is_ascii_digit() => {
                self.scan_digits();
                Ok(())
            }
            Some((_, ch)) => Err(Spanning::zero_width(
                self.position,
                LexerError::UnexpectedCharacter(ch),
            )),
            None => Err(self.eof_error()),
        }
    }

    fn scan_number(&mut self) -> LexerResult<'a> {
        let start = self.position;
        let start_idx = start.index();
        let mut is_float = false;

        if let Some((_, '-')) = self.peek_char() {
            self.next_char();
        }

        match self.peek_char() {
            Some((_, '0')) => {
                self.next_char();
                if let Some((_, ch)) = self.peek_char() {
                    if ch.is_ascii_digit() {
                        return Err(Spanning::zero_width(
                            self.position,
                            LexerError::UnexpectedCharacter(ch),
                        ));
                    }
                }
            }
            _ => self.expect_digits()?,
        }

        if let Some((_, '.')) = self.peek_char() {
            is_float = true;
            self.next_char();
            self.expect_digits()?;
        }

        if let Some((_, 'e' | 'E')) = self.peek_char() {
            is_float = true;
            self.next_char();
            if let Some((_, '+' | '-')) = self.peek_char() {
                self.next_char();
            }
            self.expect_digits()?;
        }

        if let Some((_, ch)) = self.peek_char() {
            if ch == '.' || is_name_start(ch) {
                return Err(Spanning::zero_width(
                    self.position,
                    LexerError::UnexpectedCharacter(ch),
                ));
            }
        }

        let number = &self.source[start_idx..self.position.index()];
        let token = if is_float {
            ScalarToken::Float(number)
        } else {
            ScalarToken::Int(number)
        };
        Ok(Spanning::start_end(
            start,
            self.position,
            Token::Scalar(token),
        ))
    }
}

impl<'a> Iterator for Lexer<'a> {
    type Item = LexerResult<'a>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.has_reached_eof {
            return None;
        }

        self.scan_over_whitespace();

        Some(match self.peek_char().map(|(_, ch)| ch) {
            Some('!') => self.emit_single_char(Token::ExclamationMark),
            Some('$') => self.emit_single_char(Token::Dollar),
            Some('(') => self.emit_single_char(Token::ParenOpen),
            Some(')') => self.emit_single_char(Token::ParenClose),
            Some('[') => self.emit_single_char(Token::BracketOpen),
            Some(']') => self.emit_single_char(Token::BracketClose),
            Some('{') => self.emit_single_char(Token::CurlyOpen),
            Some('}') => self.emit_single_char(Token::CurlyClose),
            Some(':') => self.emit_single_char(Token::Colon),
            Some('=') => self.emit_single_char(Token::Equals),
            Some('@') => self.emit_single_char(Token::At),
            Some('.') => self.scan_ellipsis(),
            Some('"') => self.scan_string(),
            Some(ch) if ch == '-' || ch.is_ascii_digit() => self.scan_number(),
            Some(ch) if is_name_start(ch) => self.scan_name(),
            Some(ch) => Err(Spanning::zero_width(
                self.position,
                LexerError::UnknownCharacter(ch),
            )),
            None => {
                self.has_reached_eof = true;
                Ok(Spanning::zero_width(self.position, Token::EndOfFile))
            }
        })
    }
}

fn is_source_char(c: char) -> bool {
    c == '\t' || c == '\n' || c == '\r' || c >= ' '
}

fn is_name_start(c: char) -> bool {
    c == '_' || c.is_ascii_alphabetic()
}

fn is_name_cont(c: char) -> bool {
    is_name_start(c) || c.is_ascii_digit()
}

/// Decodes a quoted string literal (quotes included) into its value.
///
/// The lexer has already rejected malformed escapes, so any leftover
/// surprise is reported as an unknown escape sequence.
pub(crate) fn unquote_string(raw: &str) -> Result<String, LexerError> {
    let inner = raw
        .strip_prefix('"')
        .and_then(|s| s.strip_suffix('"'))
        .ok_or(LexerError::UnterminatedString)?;

    let mut out = String::with_capacity(inner.len());
    let mut chars = inner.chars();
    while let Some(ch) = chars.next() {
        if ch != '\\' {
            out.push(ch);
            continue;
        }
        match chars.next() {
            Some('"') => out.push('"'),
            Some('\\') => out.push('\\'),
            Some('/') => out.push('/'),
            Some('b') => out.push('\u{0008}'),
            Some('f') => out.push('\u{000c}'),
            Some('n') => out.push('\n'),
            Some('r') => out.push('\r'),
            Some('t') => out.push('\t'),
            Some('u') => {
                let hex: String = chars.by_ref().take(4).collect();
                let decoded = u32::from_str_radix(&hex, 16)
                    .ok()
                    .and_then(char::from_u32)
                    .ok_or_else(|| LexerError::UnknownEscapeSequence(format!("\\u{hex}")))?;
                out.push(decoded);
            }
            Some(c) => return Err(LexerError::UnknownEscapeSequence(format!("\\{c}"))),
            None => return Err(LexerError::UnterminatedString),
        }
    }
    Ok(out)
}
