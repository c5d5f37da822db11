#![doc = include_str!("../README.md")]
#![cfg_attr(docsrs, feature(doc_cfg))]

// Required by the `__dyn_*` tracing shims expanding into `$crate::tracing`.
#[cfg(feature = "tracing")]
#[doc(hidden)]
pub use tracing;

#[doc(inline)]
pub use futures::future::BoxFuture;

#[macro_use]
#[doc(hidden)]
pub mod macros;
pub mod ast;
pub mod executor;
pub mod parser;
pub mod schema;
pub mod types;
pub mod validation;
mod value;

pub mod http;
pub mod integrations;

#[cfg(test)]
mod executor_tests;

use derive_more::with_trait::Display;
use itertools::Itertools as _;

use crate::{
    ast::{Definition, Document, Operation, OperationType},
    validation::{ValidatorContext, validate_input_values, visit_all_rules},
};

pub use crate::{
    ast::{InputValue, Type},
    executor::{
        Arguments, ExecutionError, Executor, FieldError, FieldResult, PathSegment, ResolveInfo,
        ResolveParams, Variables, execute_validated_query_async,
    },
    parser::{ParseError, SourcePosition, Spanning, parse_document_source},
    schema::{
        meta::{
            Argument, EnumMeta, EnumValue, Field, InputObjectMeta, InterfaceMeta, MetaType,
            ObjectMeta, ScalarMeta, UnionMeta,
        },
        model::{DirectiveLocation, DirectiveType, SchemaBuilder, SchemaError, SchemaType},
    },
    types::coercion::CoercionError,
    validation::{RuleError, validate},
    value::{Object, Value},
};

/// An error that prevented query execution.
#[derive(Clone, Debug, Display, Eq, PartialEq)]
pub enum GraphQLError {
    /// The document didn't parse.
    #[display("{_0}")]
    ParseError(Spanning<ParseError>),

    /// The document or the variables failed validation.
    #[display("{}", _0.iter().join("\n"))]
    ValidationError(Vec<RuleError>),

    /// The document contains no operation.
    #[display("No operation provided")]
    NoOperationProvided,

    /// No operation name was given for a document with several operations.
    #[display("Multiple operations provided")]
    MultipleOperationsProvided,

    /// The document has no operation of the requested name.
    #[display("Unknown operation name")]
    UnknownOperationName,

    /// The schema has no root type for the operation.
    #[display("Schema is not configured for {_0}s")]
    NotSupportedOperation(OperationType),
}

impl std::error::Error for GraphQLError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::ParseError(e) => Some(e),
            Self::ValidationError(errs) => Some(errs.first()?),
            Self::NoOperationProvided
            | Self::MultipleOperationsProvided
            | Self::UnknownOperationName
            | Self::NotSupportedOperation(_) => None,
        }
    }
}

impl From<Spanning<ParseError>> for GraphQLError {
    fn from(err: Spanning<ParseError>) -> Self {
        Self::ParseError(err)
    }
}

/// Picks the operation to execute out of a `document`.
///
/// Without an `operation_name` the document must hold exactly one operation.
pub fn get_operation<'b, 'd>(
    document: &'b Document<'d>,
    operation_name: Option<&str>,
) -> Result<&'b Spanning<Operation<'d>>, GraphQLError> {
    let mut operation = None;
    for op in document.iter().filter_map(|def| match def {
        Definition::Operation(op) => Some(op),
        Definition::Fragment(_) => None,
    }) {
        match operation_name {
            None => {
                if operation.is_some() {
                    return Err(GraphQLError::MultipleOperationsProvided);
                }
                operation = Some(op);
            }
            Some(name) => {
                if op.item.name.as_ref().is_some_and(|n| n.item == name) {
                    return Ok(op);
                }
            }
        }
    }

    match (operation, operation_name) {
        (Some(op), _) => Ok(op),
        (None, Some(_)) => Err(GraphQLError::UnknownOperationName),
        (None, None) => Err(GraphQLError::NoOperationProvided),
    }
}

/// Executes a query in a provided schema.
///
/// Parses and validates the `document_source` first, then runs the selected
/// operation. Failing any of the steps before execution means no data at
/// all, while failures during execution come back as field errors next to
/// the partial data.
pub async fn execute<'a, Ctx>(
    document_source: &'a str,
    operation_name: Option<&str>,
    schema: &'a SchemaType<Ctx>,
    root_value: Value,
    variables: &Variables,
    context: &Ctx,
) -> Result<(Value, Vec<ExecutionError>), GraphQLError>
where
    Ctx: Sync,
{
    let document = parse_document_source(document_source)?;

    {
        let mut ctx = ValidatorContext::new(schema, &document);
        visit_all_rules(&mut ctx, &document);

        let errors = ctx.into_errors();
        if !errors.is_empty() {
            crate::__dyn_trace_debug!(errors = errors.len(), "document failed validation");
            return Err(GraphQLError::ValidationError(errors));
        }
    }

    let operation = get_operation(&document, operation_name)?;

    {
        let errors = validate_input_values(variables, operation, schema);

        if !errors.is_empty() {
            crate::__dyn_trace_debug!(errors = errors.len(), "variables failed validation");
            return Err(GraphQLError::ValidationError(errors));
        }
    }

    execute_validated_query_async(&document, operation, schema, root_value, variables, context)
        .await
}

/// Executes a query in a provided schema, blocking the current thread until
/// it completes.
///
/// Resolvers still run concurrently, all of them on the calling thread.
pub fn execute_sync<Ctx>(
    document_source: &str,
    operation_name: Option<&str>,
    schema: &SchemaType<Ctx>,
    root_value: Value,
    variables: &Variables,
    context: &Ctx,
) -> Result<(Value, Vec<ExecutionError>), GraphQLError>
where
    Ctx: Sync,
{
    futures::executor::block_on(execute(
        document_source,
        operation_name,
        schema,
        root_value,
        variables,
        context,
    ))
}
