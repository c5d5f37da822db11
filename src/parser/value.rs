use crate::{
    ast::InputValue,
    parser::{ParseError, ParseResult, Parser, ScalarToken, Spanning, Token, lexer::unquote_string},
};

/// Parses a value literal.
///
/// Variables are rejected when `is_const` is set, as in default values.
pub fn parse_value_literal(parser: &mut Parser<'_>, is_const: bool) -> ParseResult<InputValue> {
    match parser.peek().item {
        Token::BracketOpen => parse_list_literal(parser, is_const),
        Token::CurlyOpen => parse_object_literal(parser, is_const),
        Token::Dollar if !is_const => parse_variable_literal(parser),
        Token::Scalar(_) => {
            let token = parser.next_token()?;
            let Token::Scalar(scalar) = token.item else {
                return Err(token.map(ParseError::unexpected_token));
            };
            let value = match scalar {
                ScalarToken::Int(raw) => InputValue::int(raw),
                ScalarToken::Float(raw) => InputValue::float(raw),
                ScalarToken::String(raw) => InputValue::String(
                    unquote_string(raw).map_err(|e| token.map(|_| ParseError::LexerError(e)))?,
                ),
            };
            Ok(token.map(|_| value))
        }
        Token::Name("true") => Ok(parser.next_token()?.map(|_| InputValue::Boolean(true))),
        Token::Name("false") => Ok(parser.next_token()?.map(|_| InputValue::Boolean(false))),
        Token::Name("null") => Ok(parser.next_token()?.map(|_| InputValue::Null)),
        Token::Name(name) => Ok(parser
            .next_token()?
            .map(|_| InputValue::enum_value(name))),
        _ => Err(parser.next_token()?.map(ParseError::unexpected_token)),
    }
}

fn parse_list_literal(parser: &mut Parser<'_>, is_const: bool) -> ParseResult<InputValue> {
    Ok(parser
        .delimited_list(
            &Token::BracketOpen,
            |p| parse_value_literal(p, is_const),
            &Token::BracketClose,
        )?
        .map(InputValue::List))
}

fn parse_object_literal(parser: &mut Parser<'_>, is_const: bool) -> ParseResult<InputValue> {
    Ok(parser
        .delimited_list(
            &Token::CurlyOpen,
            |p| parse_object_field(p, is_const),
            &Token::CurlyClose,
        )?
        .map(|fields| InputValue::Object(fields.into_iter().map(|f| f.item).collect())))
}

fn parse_object_field(
    parser: &mut Parser<'_>,
    is_const: bool,
) -> ParseResult<(Spanning<String>, Spanning<InputValue>)> {
    let key = parser.expect_name()?;
    parser.expect(&Token::Colon)?;
    let value = parse_value_literal(parser, is_const)?;

    Ok(Spanning::start_end(
        key.start(),
        value.end(),
        (key.map(ToOwned::to_owned), value),
    ))
}

fn parse_variable_literal(parser: &mut Parser<'_>) -> ParseResult<InputValue> {
    let start = parser.expect(&Token::Dollar)?.start();
    let name = parser.expect_name()?;

    Ok(Spanning::start_end(
        start,
        name.end(),
        InputValue::variable(name.item),
    ))
}
