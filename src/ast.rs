//! Syntax tree of GraphQL executable documents.
//!
//! The tree is produced by [`crate::parse_document_source`] and consumed
//! read-only by validation and execution.

use std::fmt;

use arcstr::ArcStr;

use crate::{
    parser::Spanning,
    value::{Object, Value},
};

/// Type literal, either written in a document or declared by a schema.
///
/// Wrappers nest structurally, so `[Int!]!` is
/// `NonNull(List(NonNull(Named("Int"))))`. The named type may not exist.
#[derive(Clone, Debug, Eq, Hash, PartialEq)]
pub enum Type {
    /// Nullable named type, e.g. `String`.
    Named(ArcStr),
    /// Nullable list of the inner type, e.g. `[String]`.
    List(Box<Type>),
    /// Non-null wrapper over a nullable type, e.g. `String!`.
    NonNull(Box<Type>),
}

impl Type {
    /// Nullable named type.
    pub fn named(name: impl Into<ArcStr>) -> Self {
        Self::Named(name.into())
    }

    /// Non-null named type.
    pub fn non_null_named(name: impl Into<ArcStr>) -> Self {
        Self::named(name).non_null()
    }

    /// Nullable list of `self`.
    #[must_use]
    pub fn list(self) -> Self {
        Self::List(Box::new(self))
    }

    /// Non-null version of `self`. Already non-null types stay unchanged.
    #[must_use]
    pub fn non_null(self) -> Self {
        match self {
            Self::NonNull(_) => self,
            other => Self::NonNull(Box::new(other)),
        }
    }

    /// Name of the innermost named type.
    pub fn innermost_name(&self) -> &ArcStr {
        match self {
            Self::Named(n) => n,
            Self::List(inner) | Self::NonNull(inner) => inner.innermost_name(),
        }
    }

    /// Whether the outermost wrapper is non-null.
    pub fn is_non_null(&self) -> bool {
        matches!(self, Self::NonNull(_))
    }

    /// Whether this type, once any non-null wrapper is removed, is a list.
    pub fn is_list(&self) -> bool {
        matches!(self.nullable(), Self::List(_))
    }

    /// The type without its outermost non-null wrapper.
    pub fn nullable(&self) -> &Self {
        match self {
            Self::NonNull(inner) => inner,
            other => other,
        }
    }
}

impl fmt::Display for Type {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Named(n) => write!(f, "{n}"),
            Self::List(t) => write!(f, "[{t}]"),
            Self::NonNull(t) => write!(f, "{t}!"),
        }
    }
}

/// Literal value node.
///
/// Numbers keep the exact text they were written with. Turning them into
/// values is up to the scalar the literal is coerced into.
#[expect(missing_docs, reason = "self-explanatory")]
#[derive(Clone, Debug, PartialEq)]
pub enum InputValue {
    Null,
    Int(String),
    Float(String),
    String(String),
    Boolean(bool),
    Enum(String),
    Variable(String),
    List(Vec<Spanning<InputValue>>),
    Object(Vec<(Spanning<String>, Spanning<InputValue>)>),
}

impl InputValue {
    /// Integer literal out of its source text.
    pub fn int(raw: impl Into<String>) -> Self {
        Self::Int(raw.into())
    }

    /// Float literal out of its source text.
    pub fn float(raw: impl Into<String>) -> Self {
        Self::Float(raw.into())
    }

    /// String literal.
    pub fn string(s: impl Into<String>) -> Self {
        Self::String(s.into())
    }

    /// Enum literal.
    pub fn enum_value(name: impl Into<String>) -> Self {
        Self::Enum(name.into())
    }

    /// Reference to the `$name` variable.
    pub fn variable(name: impl Into<String>) -> Self {
        Self::Variable(name.into())
    }

    /// List literal without source positions.
    pub fn list(items: Vec<Self>) -> Self {
        Self::List(items.into_iter().map(Spanning::unlocated).collect())
    }

    /// Object literal without source positions.
    pub fn object<K: Into<String>>(fields: Vec<(K, Self)>) -> Self {
        Self::Object(
            fields
                .into_iter()
                .map(|(k, v)| (Spanning::unlocated(k.into()), Spanning::unlocated(v)))
                .collect(),
        )
    }

    /// Whether this is the `null` literal.
    pub fn is_null(&self) -> bool {
        matches!(self, Self::Null)
    }

    /// Whether this is a variable reference.
    pub fn is_variable(&self) -> bool {
        matches!(self, Self::Variable(_))
    }

    /// Short name of the literal kind, used in coercion messages.
    pub fn kind(&self) -> &'static str {
        match self {
            Self::Null => "null",
            Self::Int(_) => "Int",
            Self::Float(_) => "Float",
            Self::String(_) => "String",
            Self::Boolean(_) => "Boolean",
            Self::Enum(_) => "Enum",
            Self::Variable(_) => "Variable",
            Self::List(_) => "List",
            Self::Object(_) => "Object",
        }
    }

    /// Names of all the variables referenced anywhere inside this literal.
    pub fn referenced_variables(&self) -> Vec<&str> {
        match self {
            Self::Variable(name) => vec![name.as_str()],
            Self::List(items) => items
                .iter()
                .flat_map(|i| i.item.referenced_variables())
                .collect(),
            Self::Object(fields) => fields
                .iter()
                .flat_map(|(_, v)| v.item.referenced_variables())
                .collect(),
            _ => vec![],
        }
    }

    /// Converts a constant literal into the shape a variable value supplied
    /// by a client would have.
    ///
    /// Enum names become strings. Returns [`None`] if the literal contains a
    /// variable reference or a number that doesn't fit its value domain.
    pub fn to_variable_value(&self) -> Option<Value> {
        Some(match self {
            Self::Null => Value::Null,
            Self::Int(raw) => match raw.parse::<i64>() {
                Ok(i) => Value::Int(i),
                Err(_) => Value::Float(raw.parse().ok()?),
            },
            Self::Float(raw) => Value::Float(raw.parse().ok()?),
            Self::String(s) | Self::Enum(s) => Value::String(s.clone()),
            Self::Boolean(b) => Value::Boolean(*b),
            Self::Variable(_) => return None,
            Self::List(items) => Value::List(
                items
                    .iter()
                    .map(|i| i.item.to_variable_value())
                    .collect::<Option<_>>()?,
            ),
            Self::Object(fields) => Value::Object(
                fields
                    .iter()
                    .map(|(k, v)| Some((k.item.clone(), v.item.to_variable_value()?)))
                    .collect::<Option<Object>>()?,
            ),
        })
    }
}

impl fmt::Display for InputValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Null => write!(f, "null"),
            Self::Int(raw) | Self::Float(raw) => write!(f, "{raw}"),
            Self::String(s) => write!(f, "\"{}\"", escape_string(s)),
            Self::Boolean(b) => write!(f, "{b}"),
            Self::Enum(name) => write!(f, "{name}"),
            Self::Variable(name) => write!(f, "${name}"),
            Self::List(items) => {
                write!(f, "[")?;
                for (i, item) in items.iter().enumerate() {
                    if i > 0 {
                        write!(f, ", ")?;
                    }
                    item.item.fmt(f)?;
                }
                write!(f, "]")
            }
            Self::Object(fields) => {
                write!(f, "{{")?;
                for (i, (k, v)) in fields.iter().enumerate() {
                    if i > 0 {
                        write!(f, ", ")?;
                    }
                    write!(f, "{}: {}", k.item, v.item)?;
                }
                write!(f, "}}")
            }
        }
    }
}

pub(crate) fn escape_string(s: &str) -> String {
    s.replace('\\', "\\\\").replace('"', "\\\"")
}

#[expect(missing_docs, reason = "self-explanatory")]
#[derive(Clone, Debug, PartialEq)]
pub struct Arguments<'a> {
    pub items: Vec<(Spanning<&'a str>, Spanning<InputValue>)>,
}

impl<'a> Arguments<'a> {
    /// Literal passed for the `name` argument, if any.
    pub fn get(&self, name: &str) -> Option<&Spanning<InputValue>> {
        self.items
            .iter()
            .find(|(k, _)| k.item == name)
            .map(|(_, v)| v)
    }

    #[expect(missing_docs, reason = "self-explanatory")]
    pub fn iter(&self) -> std::slice::Iter<'_, (Spanning<&'a str>, Spanning<InputValue>)> {
        self.items.iter()
    }

    #[expect(missing_docs, reason = "self-explanatory")]
    pub fn len(&self) -> usize {
        self.items.len()
    }

    #[expect(missing_docs, reason = "self-explanatory")]
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }
}

#[expect(missing_docs, reason = "self-explanatory")]
#[derive(Clone, Debug, PartialEq)]
pub struct VariableDefinition<'a> {
    pub var_type: Spanning<Type>,
    pub default_value: Option<Spanning<InputValue>>,
    pub directives: Option<Vec<Spanning<Directive<'a>>>>,
}

#[expect(missing_docs, reason = "self-explanatory")]
#[derive(Clone, Debug, PartialEq)]
pub struct VariableDefinitions<'a> {
    pub items: Vec<(Spanning<&'a str>, VariableDefinition<'a>)>,
}

impl<'a> VariableDefinitions<'a> {
    #[expect(missing_docs, reason = "self-explanatory")]
    pub fn iter(&self) -> std::slice::Iter<'_, (Spanning<&'a str>, VariableDefinition<'a>)> {
        self.items.iter()
    }
}

/// Field selection, e.g. `alias: name(arg: 1) @skip(if: false) { sub }`.
#[expect(missing_docs, reason = "self-explanatory")]
#[derive(Clone, Debug, PartialEq)]
pub struct Field<'a> {
    pub alias: Option<Spanning<&'a str>>,
    pub name: Spanning<&'a str>,
    pub arguments: Option<Spanning<Arguments<'a>>>,
    pub directives: Option<Vec<Spanning<Directive<'a>>>>,
    pub selection_set: Option<Vec<Selection<'a>>>,
}

impl<'a> Field<'a> {
    /// Key this field's value is stored under in the response.
    pub fn response_key(&self) -> &'a str {
        self.alias.as_ref().unwrap_or(&self.name).item
    }
}

#[expect(missing_docs, reason = "self-explanatory")]
#[derive(Clone, Debug, PartialEq)]
pub struct FragmentSpread<'a> {
    pub name: Spanning<&'a str>,
    pub directives: Option<Vec<Spanning<Directive<'a>>>>,
}

#[expect(missing_docs, reason = "self-explanatory")]
#[derive(Clone, Debug, PartialEq)]
pub struct InlineFragment<'a> {
    pub type_condition: Option<Spanning<&'a str>>,
    pub directives: Option<Vec<Spanning<Directive<'a>>>>,
    pub selection_set: Vec<Selection<'a>>,
}

/// Entry of a selection set.
///
/// ```text
/// {
///   field(withArg: 123) { subField }
///   ...fragmentSpread
///   ...on User {
///     inlineFragmentField
///   }
/// }
/// ```
#[expect(missing_docs, reason = "self-explanatory")]
#[derive(Clone, Debug, PartialEq)]
pub enum Selection<'a> {
    Field(Spanning<Field<'a>>),
    FragmentSpread(Spanning<FragmentSpread<'a>>),
    InlineFragment(Spanning<InlineFragment<'a>>),
}

#[expect(missing_docs, reason = "self-explanatory")]
#[derive(Clone, Debug, PartialEq)]
pub struct Directive<'a> {
    pub name: Spanning<&'a str>,
    pub arguments: Option<Spanning<Arguments<'a>>>,
}

#[expect(missing_docs, reason = "self-explanatory")]
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq, derive_more::Display)]
pub enum OperationType {
    #[display("query")]
    Query,
    #[display("mutation")]
    Mutation,
    #[display("subscription")]
    Subscription,
}

#[expect(missing_docs, reason = "self-explanatory")]
#[derive(Clone, Debug, PartialEq)]
pub struct Operation<'a> {
    pub operation_type: OperationType,
    pub name: Option<Spanning<&'a str>>,
    pub variable_definitions: Option<Spanning<VariableDefinitions<'a>>>,
    pub directives: Option<Vec<Spanning<Directive<'a>>>>,
    pub selection_set: Vec<Selection<'a>>,
}

#[expect(missing_docs, reason = "self-explanatory")]
#[derive(Clone, Debug, PartialEq)]
pub struct Fragment<'a> {
    pub name: Spanning<&'a str>,
    pub type_condition: Spanning<&'a str>,
    pub directives: Option<Vec<Spanning<Directive<'a>>>>,
    pub selection_set: Vec<Selection<'a>>,
}

#[doc(hidden)]
#[derive(Clone, Debug, PartialEq)]
pub enum Definition<'a> {
    Operation(Spanning<Operation<'a>>),
    Fragment(Spanning<Fragment<'a>>),
}

#[doc(hidden)]
pub type Document<'a> = [Definition<'a>];
#[doc(hidden)]
pub type OwnedDocument<'a> = Vec<Definition<'a>>;
