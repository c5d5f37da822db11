use crate::{
    ast::{
        Arguments, Definition, Directive, Field, Fragment, FragmentSpread, InlineFragment,
        InputValue, Operation, OperationType, OwnedDocument, Selection, Type, VariableDefinition,
        VariableDefinitions,
    },
    parser::{
        Lexer, OptionParseResult, ParseError, ParseResult, Parser, Spanning, Token,
        UnlocatedParseResult, value::parse_value_literal,
    },
};

/// Parses an executable document out of its source text.
pub fn parse_document_source(s: &str) -> UnlocatedParseResult<OwnedDocument<'_>> {
    let mut lexer = Lexer::new(s);
    let mut parser = Parser::new(&mut lexer).map_err(|e| e.map(ParseError::LexerError))?;
    parse_document(&mut parser)
}

fn parse_document<'a>(parser: &mut Parser<'a>) -> UnlocatedParseResult<OwnedDocument<'a>> {
    let mut defs = Vec::new();
    loop {
        defs.push(parse_definition(parser)?);
        if parser.peek().item == Token::EndOfFile {
            return Ok(defs);
        }
    }
}

fn parse_definition<'a>(parser: &mut Parser<'a>) -> UnlocatedParseResult<Definition<'a>> {
    match parser.peek().item {
        Token::CurlyOpen
        | Token::Name("query")
        | Token::Name("mutation")
        | Token::Name("subscription") => {
            Ok(Definition::Operation(parse_operation_definition(parser)?))
        }
        Token::Name("fragment") => Ok(Definition::Fragment(parse_fragment_definition(parser)?)),
        _ => Err(parser.next_token()?.map(ParseError::unexpected_token)),
    }
}

fn parse_operation_definition<'a>(parser: &mut Parser<'a>) -> ParseResult<Operation<'a>> {
    if parser.peek().item == Token::CurlyOpen {
        let selection_set = parse_selection_set(parser)?;
        return Ok(selection_set.map(|selection_set| Operation {
            operation_type: OperationType::Query,
            name: None,
            variable_definitions: None,
            directives: None,
            selection_set,
        }));
    }

    let start = parser.peek().start();
    let operation_type = parse_operation_type(parser)?;
    let name = match parser.peek().item {
        Token::Name(_) => Some(parser.expect_name()?),
        _ => None,
    };
    let variable_definitions = parse_variable_definitions(parser)?;
    let directives = parse_directives(parser)?;
    let selection_set = parse_selection_set(parser)?;

    Ok(Spanning::start_end(
        start,
        selection_set.end(),
        Operation {
            operation_type: operation_type.item,
            name,
            variable_definitions,
            directives: directives.map(|s| s.item),
            selection_set: selection_set.item,
        },
    ))
}

fn parse_fragment_definition<'a>(parser: &mut Parser<'a>) -> ParseResult<Fragment<'a>> {
    let start = parser.expect(&Token::Name("fragment"))?.start();
    let name = parser.expect_name()?;
    if name.item == "on" {
        return Err(name.map(|_| ParseError::UnexpectedToken("on".into())));
    }

    parser.expect(&Token::Name("on"))?;
    let type_condition = parser.expect_name()?;
    let directives = parse_directives(parser)?;
    let selection_set = parse_selection_set(parser)?;

    Ok(Spanning::start_end(
        start,
        selection_set.end(),
        Fragment {
            name,
            type_condition,
            directives: directives.map(|s| s.item),
            selection_set: selection_set.item,
        },
    ))
}

fn parse_optional_selection_set<'a>(
    parser: &mut Parser<'a>,
) -> OptionParseResult<Vec<Selection<'a>>> {
    if parser.peek().item == Token::CurlyOpen {
        Ok(Some(parse_selection_set(parser)?))
    } else {
        Ok(None)
    }
}

fn parse_selection_set<'a>(parser: &mut Parser<'a>) -> ParseResult<Vec<Selection<'a>>> {
    parser.unlocated_delimited_nonempty_list(&Token::CurlyOpen, parse_selection, &Token::CurlyClose)
}

fn parse_selection<'a>(parser: &mut Parser<'a>) -> UnlocatedParseResult<Selection<'a>> {
    match parser.peek().item {
        Token::Ellipsis => parse_fragment(parser),
        _ => parse_field(parser).map(Selection::Field),
    }
}

fn parse_fragment<'a>(parser: &mut Parser<'a>) -> UnlocatedParseResult<Selection<'a>> {
    let start = parser.expect(&Token::Ellipsis)?.start();

    match parser.peek().item {
        Token::Name("on") => {
            parser.next_token()?;
            let type_condition = parser.expect_name()?;
            let directives = parse_directives(parser)?;
            let selection_set = parse_selection_set(parser)?;

            Ok(Selection::InlineFragment(Spanning::start_end(
                start,
                selection_set.end(),
                InlineFragment {
                    type_condition: Some(type_condition),
                    directives: directives.map(|s| s.item),
                    selection_set: selection_set.item,
                },
            )))
        }
        Token::CurlyOpen | Token::At => {
            let directives = parse_directives(parser)?;
            let selection_set = parse_selection_set(parser)?;

            Ok(Selection::InlineFragment(Spanning::start_end(
                start,
                selection_set.end(),
                InlineFragment {
                    type_condition: None,
                    directives: directives.map(|s| s.item),
                    selection_set: selection_set.item,
                },
            )))
        }
        Token::Name(_) => {
            let name = parser.expect_name()?;
            let directives = parse_directives(parser)?;
            let end = directives.as_ref().map_or(name.end(), |d| d.end());

            Ok(Selection::FragmentSpread(Spanning::start_end(
                start,
                end,
                FragmentSpread {
                    name,
                    directives: directives.map(|s| s.item),
                },
            )))
        }
        _ => Err(parser.next_token()?.map(ParseError::unexpected_token)),
    }
}

fn parse_field<'a>(parser: &mut Parser<'a>) -> ParseResult<Field<'a>> {
    let first = parser.expect_name()?;
    let (alias, name) = if parser.skip(&Token::Colon)?.is_some() {
        (Some(first), parser.expect_name()?)
    } else {
        (None, first)
    };

    let arguments = parse_arguments(parser)?;
    let directives = parse_directives(parser)?;
    let selection_set = parse_optional_selection_set(parser)?;

    let start = alias.as_ref().unwrap_or(&name).start();
    let end = selection_set
        .as_ref()
        .map(Spanning::end)
        .or_else(|| directives.as_ref().map(Spanning::end))
        .or_else(|| arguments.as_ref().map(Spanning::end))
        .unwrap_or(name.end());

    Ok(Spanning::start_end(
        start,
        end,
        Field {
            alias,
            name,
            arguments,
            directives: directives.map(|s| s.item),
            selection_set: selection_set.map(|s| s.item),
        },
    ))
}

fn parse_arguments<'a>(parser: &mut Parser<'a>) -> OptionParseResult<Arguments<'a>> {
    if parser.peek().item != Token::ParenOpen {
        return Ok(None);
    }
    Ok(Some(
        parser
            .delimited_nonempty_list(&Token::ParenOpen, parse_argument, &Token::ParenClose)?
            .map(|args| Arguments {
                items: args.into_iter().map(|s| s.item).collect(),
            }),
    ))
}

fn parse_argument<'a>(
    parser: &mut Parser<'a>,
) -> ParseResult<(Spanning<&'a str>, Spanning<InputValue>)> {
    let name = parser.expect_name()?;
    parser.expect(&Token::Colon)?;
    let value = parse_value_literal(parser, false)?;

    Ok(Spanning::start_end(name.start(), value.end(), (name, value)))
}

fn parse_operation_type(parser: &mut Parser<'_>) -> ParseResult<OperationType> {
    match parser.peek().item {
        Token::Name("query") => Ok(parser.next_token()?.map(|_| OperationType::Query)),
        Token::Name("mutation") => Ok(parser.next_token()?.map(|_| OperationType::Mutation)),
        Token::Name("subscription") => {
            Ok(parser.next_token()?.map(|_| OperationType::Subscription))
        }
        _ => Err(parser.next_token()?.map(ParseError::unexpected_token)),
    }
}

fn parse_variable_definitions<'a>(
    parser: &mut Parser<'a>,
) -> OptionParseResult<VariableDefinitions<'a>> {
    if parser.peek().item != Token::ParenOpen {
        return Ok(None);
    }
    Ok(Some(
        parser
            .delimited_nonempty_list(
                &Token::ParenOpen,
                parse_variable_definition,
                &Token::ParenClose,
            )?
            .map(|defs| VariableDefinitions {
                items: defs.into_iter().map(|s| s.item).collect(),
            }),
    ))
}

fn parse_variable_definition<'a>(
    parser: &mut Parser<'a>,
) -> ParseResult<(Spanning<&'a str>, VariableDefinition<'a>)> {
    let start = parser.expect(&Token::Dollar)?.start();
    let var_name = parser.expect_name()?;
    parser.expect(&Token::Colon)?;
    let var_type = parse_type(parser)?;

    let default_value = if parser.skip(&Token::Equals)?.is_some() {
        Some(parse_value_literal(parser, true)?)
    } else {
        None
    };
    let directives = parse_directives(parser)?;

    let end = default_value
        .as_ref()
        .map_or(var_type.end(), Spanning::end);

    Ok(Spanning::start_end(
        start,
        end,
        (
            Spanning::start_end(start, var_name.end(), var_name.item),
            VariableDefinition {
                var_type,
                default_value,
                directives: directives.map(|s| s.item),
            },
        ),
    ))
}

fn parse_directives<'a>(parser: &mut Parser<'a>) -> OptionParseResult<Vec<Spanning<Directive<'a>>>> {
    let mut items = Vec::new();
    while parser.peek().item == Token::At {
        items.push(parse_directive(parser)?);
    }
    Ok(Spanning::spanning(items))
}

fn parse_directive<'a>(parser: &mut Parser<'a>) -> ParseResult<Directive<'a>> {
    let start = parser.expect(&Token::At)?.start();
    let name = parser.expect_name()?;
    let arguments = parse_arguments(parser)?;
    let end = arguments.as_ref().map_or(name.end(), Spanning::end);

    Ok(Spanning::start_end(start, end, Directive { name, arguments }))
}

/// Parses a type literal like `[Int!]!`.
pub fn parse_type(parser: &mut Parser<'_>) -> ParseResult<Type> {
    let parsed = if let Some(open) = parser.skip(&Token::BracketOpen)? {
        let inner = parse_type(parser)?;
        let close = parser.expect(&Token::BracketClose)?;
        Spanning::start_end(open.start(), close.end(), inner.item.list())
    } else {
        parser.expect_name()?.map(Type::named)
    };

    match parser.peek().item {
        Token::ExclamationMark => {
            let bang = parser.next_token()?;
            Ok(Spanning::start_end(
                parsed.start(),
                bang.end(),
                Type::NonNull(Box::new(parsed.item)),
            ))
        }
        _ => Ok(parsed),
    }
}
