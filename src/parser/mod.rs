//! Query lexer and parser.

mod document;
mod lexer;
#[expect(clippy::module_inception, reason = "mirrors the parser type it defines")]
mod parser;
mod utils;
mod value;


pub use self::{
    document::{parse_document_source, parse_type},
    lexer::{Lexer, LexerError, ScalarToken, Token},
    parser::{OptionParseResult, ParseError, ParseResult, Parser, UnlocatedParseResult},
    utils::{SourcePosition, Span, Spanning},
    value::parse_value_literal,
};
