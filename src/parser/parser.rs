use derive_more::with_trait::{Display, Error};

use crate::parser::{Lexer, LexerError, Spanning, Token};

/// Error of parsing a GraphQL executable document.
#[derive(Clone, Debug, Display, Eq, Error, PartialEq)]
pub enum ParseError {
    /// Token that doesn't fit the grammar at its position.
    #[display("Unexpected \"{_0}\"")]
    UnexpectedToken(#[error(not(source))] String),

    /// Source ended before the document was complete.
    #[display("Unexpected end of input")]
    UnexpectedEndOfFile,

    /// Tokenizing failed.
    #[display("{_0}")]
    LexerError(LexerError),
}

impl From<LexerError> for ParseError {
    fn from(e: LexerError) -> Self {
        Self::LexerError(e)
    }
}

impl ParseError {
    /// Creates a [`ParseError::UnexpectedToken`] out of the provided [`Token`].
    #[must_use]
    pub fn unexpected_token(token: Token<'_>) -> Self {
        Self::UnexpectedToken(token.to_string())
    }
}

#[doc(hidden)]
pub type ParseResult<T> = Result<Spanning<T>, Spanning<ParseError>>;

#[doc(hidden)]
pub type UnlocatedParseResult<T> = Result<T, Spanning<ParseError>>;

#[doc(hidden)]
pub type OptionParseResult<T> = Result<Option<Spanning<T>>, Spanning<ParseError>>;

/// Token cursor used by the recursive-descent document parser.
#[doc(hidden)]
#[derive(Debug)]
pub struct Parser<'a> {
    tokens: Vec<Spanning<Token<'a>>>,
    cursor: usize,
}

impl<'a> Parser<'a> {
    #[doc(hidden)]
    pub fn new(lexer: &mut Lexer<'a>) -> Result<Self, Spanning<LexerError>> {
        let tokens = lexer.collect::<Result<Vec<_>, _>>()?;
        Ok(Self { tokens, cursor: 0 })
    }

    #[doc(hidden)]
    pub fn peek(&self) -> &Spanning<Token<'a>> {
        // The lexer always ends the stream with `Token::EndOfFile` and the
        // cursor never moves past it.
        &self.tokens[self.cursor.min(self.tokens.len() - 1)]
    }

    #[doc(hidden)]
    pub fn next_token(&mut self) -> ParseResult<Token<'a>> {
        let token = *self.peek();
        if token.item == Token::EndOfFile {
            Err(token.map(|_| ParseError::UnexpectedEndOfFile))
        } else {
            self.cursor += 1;
            Ok(token)
        }
    }

    #[doc(hidden)]
    pub fn expect(&mut self, expected: &Token<'_>) -> ParseResult<Token<'a>> {
        if &self.peek().item == expected {
            self.next_token()
        } else {
            Err(self.next_token()?.map(ParseError::unexpected_token))
        }
    }

    #[doc(hidden)]
    pub fn skip(&mut self, expected: &Token<'_>) -> OptionParseResult<Token<'a>> {
        if &self.peek().item == expected {
            self.next_token().map(Some)
        } else if self.peek().item == Token::EndOfFile {
            Err(self.peek().map(|_| ParseError::UnexpectedEndOfFile))
        } else {
            Ok(None)
        }
    }

    #[doc(hidden)]
    pub fn delimited_list<T>(
        &mut self,
        opening: &Token<'_>,
        parser: impl Fn(&mut Self) -> ParseResult<T>,
        closing: &Token<'_>,
    ) -> ParseResult<Vec<Spanning<T>>> {
        let start = self.expect(opening)?.start();
        let mut items = Vec::new();
        loop {
            if let Some(end) = self.skip(closing)? {
                return Ok(Spanning::start_end(start, end.end(), items));
            }
            items.push(parser(self)?);
        }
    }

    #[doc(hidden)]
    pub fn delimited_nonempty_list<T>(
        &mut self,
        opening: &Token<'_>,
        parser: impl Fn(&mut Self) -> ParseResult<T>,
        closing: &Token<'_>,
    ) -> ParseResult<Vec<Spanning<T>>> {
        let start = self.expect(opening)?.start();
        let mut items = Vec::new();
        loop {
            items.push(parser(self)?);
            if let Some(end) = self.skip(closing)? {
                return Ok(Spanning::start_end(start, end.end(), items));
            }
        }
    }

    #[doc(hidden)]
    pub fn unlocated_delimited_nonempty_list<T>(
        &mut self,
        opening: &Token<'_>,
        parser: impl Fn(&mut Self) -> UnlocatedParseResult<T>,
        closing: &Token<'_>,
    ) -> ParseResult<Vec<T>> {
        let start = self.expect(opening)?.start();
        let mut items = Vec::new();
        loop {
            items.push(parser(self)?);
            if let Some(end) = self.skip(closing)? {
                return Ok(Spanning::start_end(start, end.end(), items));
            }
        }
    }

    #[doc(hidden)]
    pub fn expect_name(&mut self) -> ParseResult<&'a str> {
        let token = self.next_token()?;
        match token.item {
            Token::Name(name) => Ok(token.map(|_| name)),
            other => Err(token.map(|_| ParseError::unexpected_token(other))),
        }
    }
}
