//! Query execution.

use std::{
    cmp::Ordering,
    fmt::{self, Display},
    sync::{Arc, Mutex, PoisonError},
};

use arcstr::ArcStr;
use compact_str::CompactString;
use fnv::FnvHashMap;
use indexmap::IndexMap;

use crate::{
    GraphQLError,
    ast::{Document, Fragment, Operation, OperationType, Type, VariableDefinitions},
    parser::{SourcePosition, Spanning},
    schema::{meta::MetaType, model::SchemaType},
    types::{
        async_await::resolve_selection_set,
        coercion::{VariableScope, coerce_variable_defaults},
    },
    value::Value,
};

pub(crate) mod arguments;
pub(crate) mod planner;

pub use self::arguments::Arguments;

/// Variable values supplied by a client, keyed by name without the `$`.
pub type Variables = IndexMap<String, Value>;

/// Step of a path from the response root to a field value.
#[derive(Clone, Debug, Eq, Hash, Ord, PartialEq, PartialOrd)]
pub enum PathSegment {
    /// Response key of a field.
    Field(CompactString),
    /// Index of a list element.
    Index(usize),
}

impl Display for PathSegment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Field(key) => f.write_str(key),
            Self::Index(i) => write!(f, "{i}"),
        }
    }
}

#[derive(Debug)]
enum FieldPath<'a> {
    Root(SourcePosition),
    Field(&'a str, SourcePosition, Arc<FieldPath<'a>>),
    Index(usize, Arc<FieldPath<'a>>),
}

impl FieldPath<'_> {
    fn construct_path(&self, acc: &mut Vec<PathSegment>) {
        match self {
            Self::Root(_) => (),
            Self::Field(name, _, parent) => {
                parent.construct_path(acc);
                acc.push(PathSegment::Field((*name).into()));
            }
            Self::Index(i, parent) => {
                parent.construct_path(acc);
                acc.push(PathSegment::Index(*i));
            }
        }
    }

    fn location(&self) -> SourcePosition {
        match self {
            Self::Root(pos) | Self::Field(_, pos, _) => *pos,
            Self::Index(_, parent) => parent.location(),
        }
    }
}

/// Query execution engine.
///
/// Keeps track of the field path being resolved and gives access to the
/// context shared by every field of one execution. Errors pushed through it
/// land into a single list, safe to append to from concurrently resolving
/// fields.
pub struct Executor<'a, Ctx> {
    schema: &'a SchemaType<Ctx>,
    fragments: &'a FnvHashMap<&'a str, &'a Fragment<'a>>,
    variable_definitions: Option<&'a VariableDefinitions<'a>>,
    variables: VariableScope<'a>,
    context: &'a Ctx,
    errors: &'a Mutex<Vec<ExecutionError>>,
    field_path: Arc<FieldPath<'a>>,
}

impl<Ctx> Clone for Executor<'_, Ctx> {
    fn clone(&self) -> Self {
        Self {
            schema: self.schema,
            fragments: self.fragments,
            variable_definitions: self.variable_definitions,
            variables: self.variables,
            context: self.context,
            errors: self.errors,
            field_path: self.field_path.clone(),
        }
    }
}

/// Error type for errors that occur during query execution.
///
/// All execution errors contain the source position in the query of the field
/// that failed to resolve. It also contains the field stack.
#[derive(Clone, Debug, PartialEq)]
pub struct ExecutionError {
    location: SourcePosition,
    path: Vec<PathSegment>,
    error: FieldError,
}

impl Eq for ExecutionError {}

impl PartialOrd for ExecutionError {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for ExecutionError {
    fn cmp(&self, other: &Self) -> Ordering {
        (&self.location, &self.path, &self.error.message).cmp(&(
            &other.location,
            &other.path,
            &other.error.message,
        ))
    }
}

impl ExecutionError {
    /// Constructs a new execution error occurring at the beginning of the
    /// query.
    pub fn at_origin(error: FieldError) -> Self {
        Self {
            location: SourcePosition::new_origin(),
            path: vec![],
            error,
        }
    }

    #[doc(hidden)]
    pub fn new(location: SourcePosition, path: &[PathSegment], error: FieldError) -> Self {
        Self {
            location,
            path: path.to_vec(),
            error,
        }
    }

    /// The error message.
    pub fn error(&self) -> &FieldError {
        &self.error
    }

    /// The source location _in the query_ of the field that failed to resolve.
    pub fn location(&self) -> &SourcePosition {
        &self.location
    }

    /// The path of fields leading to the field that generated this error.
    pub fn path(&self) -> &[PathSegment] {
        &self.path
    }
}

/// Error type for errors that occur during field resolution.
///
/// Field errors are represented by a human-readable error message and an
/// optional [`Value`] structure containing additional information.
///
/// They can be converted to from any type that implements [`Display`], which
/// makes error chaining with the `?` operator a breeze:
///
/// ```rust
/// # use juniper_dynamic::FieldError;
/// fn get_string(data: Vec<u8>) -> Result<String, FieldError> {
///     let s = String::from_utf8(data)?;
///     Ok(s)
/// }
/// ```
#[derive(Clone, Debug, PartialEq)]
pub struct FieldError {
    message: String,
    extensions: Value,
}

impl<T: Display> From<T> for FieldError {
    fn from(e: T) -> Self {
        Self {
            message: e.to_string(),
            extensions: Value::null(),
        }
    }
}

impl FieldError {
    /// Constructs a new [`FieldError`] with additional data.
    ///
    /// The `extensions` are serialized under the `"extensions"` key of the
    /// error object in a response:
    ///
    /// ```json
    /// {
    ///   "errors": [{
    ///     "message": "Could not open connection to the database",
    ///     "locations": [{"line": 2, "column": 4}],
    ///     "extensions": {"internal_error": "Connection refused"}
    ///   }]
    /// }
    /// ```
    ///
    /// If the argument is [`Value::Null`], no extra data is included.
    pub fn new<T: Display>(e: T, extensions: Value) -> Self {
        Self {
            message: e.to_string(),
            extensions,
        }
    }

    /// Error message.
    pub fn message(&self) -> &str {
        &self.message
    }

    /// Additional error data.
    pub fn extensions(&self) -> &Value {
        &self.extensions
    }
}

/// The result of resolving the value of a field of type `T`.
pub type FieldResult<T> = Result<T, FieldError>;

/// Everything a resolver gets to compute a field value.
#[derive(Debug)]
pub struct ResolveParams<'a, Ctx> {
    /// Value of the parent object.
    pub source: &'a Value,
    /// Coerced field arguments, defaults applied.
    pub args: &'a Arguments,
    /// Context of the current execution.
    pub context: &'a Ctx,
    /// Where the field sits in the schema and the response.
    pub info: ResolveInfo<'a, Ctx>,
}

/// Position of the field being resolved.
#[derive(derive_more::Debug)]
pub struct ResolveInfo<'a, Ctx> {
    /// Name of the field in the schema.
    pub field_name: &'a str,
    /// Alias or field name the value is stored under in the response.
    pub response_key: &'a str,
    /// Declared type of the field.
    pub return_type: &'a Type,
    /// Name of the object type the field is resolved on.
    pub parent_type: &'a ArcStr,
    /// Path from the response root to this field.
    pub path: Vec<PathSegment>,
    #[debug(skip)]
    #[expect(missing_docs, reason = "self-explanatory")]
    pub schema: &'a SchemaType<Ctx>,
}

impl<'a, Ctx> Executor<'a, Ctx> {
    pub(crate) fn field_sub_executor(
        &self,
        response_key: &'a str,
        location: SourcePosition,
    ) -> Self {
        Self {
            field_path: Arc::new(FieldPath::Field(
                response_key,
                location,
                self.field_path.clone(),
            )),
            ..self.clone()
        }
    }

    pub(crate) fn index_sub_executor(&self, index: usize) -> Self {
        Self {
            field_path: Arc::new(FieldPath::Index(index, self.field_path.clone())),
            ..self.clone()
        }
    }

    /// Access the current context.
    pub fn context(&self) -> &'a Ctx {
        self.context
    }

    /// The currently executed schema.
    pub fn schema(&self) -> &'a SchemaType<Ctx> {
        self.schema
    }

    /// Variable values of the current execution, defaults included.
    pub fn variables(&self) -> VariableScope<'a> {
        self.variables
    }

    /// Declared type of the `name` variable of the current operation.
    pub fn variable_type(&self, name: &str) -> Option<&'a Type> {
        self.variable_definitions?
            .iter()
            .find(|(n, _)| n.item == name)
            .map(|(_, def)| &def.var_type.item)
    }

    /// Fragment definition of the current document.
    pub fn fragment_by_name(&self, name: &str) -> Option<&'a Fragment<'a>> {
        self.fragments.get(name).copied()
    }

    /// The current location of the executor.
    pub fn location(&self) -> SourcePosition {
        self.field_path.location()
    }

    /// Path from the response root to the current field.
    pub fn path(&self) -> Vec<PathSegment> {
        let mut path = Vec::new();
        self.field_path.construct_path(&mut path);
        path
    }

    /// Add an error to the execution engine at the current executor location.
    pub fn push_error(&self, error: FieldError) {
        self.push_error_at(error, self.location());
    }

    /// Add an error to the execution engine at a specific location.
    pub fn push_error_at(&self, error: FieldError, location: SourcePosition) {
        let path = self.path();
        self.errors
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .push(ExecutionError {
                location,
                path,
                error,
            });
    }
}

/// Executes an already validated `operation` out of `document`.
///
/// No validation rule runs here, so problems a validator would catch show up
/// as field errors instead. Root fields of a mutation run one after another,
/// any other selection set resolves its fields concurrently.
pub async fn execute_validated_query_async<'a, Ctx>(
    document: &'a Document<'a>,
    operation: &'a Spanning<Operation<'a>>,
    schema: &'a SchemaType<Ctx>,
    root_value: Value,
    variables: &'a Variables,
    context: &'a Ctx,
) -> Result<(Value, Vec<ExecutionError>), GraphQLError>
where
    Ctx: Sync,
{
    let op_type = operation.item.operation_type;
    let Some(MetaType::Object(root_type)) = schema.root_type(op_type) else {
        return Err(GraphQLError::NotSupportedOperation(op_type));
    };

    let fragments = document
        .iter()
        .filter_map(|def| match def {
            crate::ast::Definition::Fragment(f) => Some((f.item.name.item, &f.item)),
            crate::ast::Definition::Operation(_) => None,
        })
        .collect::<FnvHashMap<_, _>>();
    let defaults = coerce_variable_defaults(schema, &operation.item);
    let errors = Mutex::new(Vec::new());

    let value = {
        let executor = Executor {
            schema,
            fragments: &fragments,
            variable_definitions: operation.item.variable_definitions.as_ref().map(|d| &d.item),
            variables: VariableScope::new(variables, &defaults),
            context,
            errors: &errors,
            field_path: Arc::new(FieldPath::Root(operation.span.start)),
        };

        let fut = resolve_selection_set(
            &executor,
            root_type,
            vec![&operation.item.selection_set[..]],
            root_value,
            op_type == OperationType::Mutation,
        );
        let fut = crate::__dyn_instrument_debug!(
            fut,
            "execute",
            operation = %op_type,
            name = ?operation.item.name.as_ref().map(|n| n.item),
        );
        fut.await
    };

    let mut errors = errors.into_inner().unwrap_or_else(PoisonError::into_inner);
    errors.sort();

    crate::__dyn_trace_debug!(errors = errors.len(), "operation executed");

    Ok((value.unwrap_or(Value::Null), errors))
}
