//! Type descriptors making up a [`SchemaType`].
//!
//! [`SchemaType`]: super::model::SchemaType

use std::sync::Arc;

use arcstr::ArcStr;
use futures::future::{self, BoxFuture};

use crate::{
    ast::{InputValue, Type},
    executor::{FieldResult, ResolveParams},
    types::coercion::CoercionError,
    value::Value,
};

/// Resolver of a single field.
pub type ResolveFn<Ctx> =
    Arc<dyn for<'a> Fn(ResolveParams<'a, Ctx>) -> BoxFuture<'a, FieldResult<Value>> + Send + Sync>;

/// Picks the concrete object type name of a value returned for an
/// interface or union.
pub type ResolveTypeFn<Ctx> = Arc<dyn Fn(&Value, &Ctx) -> Option<ArcStr> + Send + Sync>;

/// Tells whether a value belongs to an object type.
pub type IsTypeOfFn<Ctx> = Arc<dyn Fn(&Value, &Ctx) -> bool + Send + Sync>;

/// Turns an internal value into a response value.
pub type SerializeFn = fn(&Value) -> Result<Value, CoercionError>;

/// Turns a variable value into an internal value.
pub type ParseValueFn = fn(&Value) -> Result<Value, CoercionError>;

/// Turns a literal into an internal value.
pub type ParseLiteralFn = fn(&InputValue) -> Result<Value, CoercionError>;

fn resolver<Ctx, F>(f: F) -> ResolveFn<Ctx>
where
    F: for<'a> Fn(ResolveParams<'a, Ctx>) -> BoxFuture<'a, FieldResult<Value>>
        + Send
        + Sync
        + 'static,
{
    Arc::new(f)
}

/// Scalar type metadata.
///
/// Each of the three coercion functions must fail outside of its domain
/// instead of silently defaulting. `null` never reaches them.
#[derive(derive_more::Debug)]
pub struct ScalarMeta {
    #[doc(hidden)]
    pub name: ArcStr,
    #[doc(hidden)]
    pub description: Option<ArcStr>,
    #[debug(skip)]
    pub(crate) serialize_fn: SerializeFn,
    #[debug(skip)]
    pub(crate) parse_value_fn: ParseValueFn,
    #[debug(skip)]
    pub(crate) parse_literal_fn: ParseLiteralFn,
}

impl ScalarMeta {
    /// Builds a new scalar named `name`.
    ///
    /// By default it passes values through as they are and accepts any
    /// constant literal in the shape a client variable would have.
    pub fn new(name: impl Into<ArcStr>) -> Self {
        Self {
            name: name.into(),
            description: None,
            serialize_fn: |v| Ok(v.clone()),
            parse_value_fn: |v| Ok(v.clone()),
            parse_literal_fn: |lit| {
                lit.to_variable_value()
                    .ok_or_else(|| CoercionError::new(format!("cannot parse literal {lit}")))
            },
        }
    }

    /// Sets the description.
    #[must_use]
    pub fn description(mut self, description: impl Into<ArcStr>) -> Self {
        self.description = Some(description.into());
        self
    }

    /// Sets the function serializing internal values into response values.
    #[must_use]
    pub fn serialize(mut self, f: SerializeFn) -> Self {
        self.serialize_fn = f;
        self
    }

    /// Sets the function parsing variable values.
    #[must_use]
    pub fn parse_value(mut self, f: ParseValueFn) -> Self {
        self.parse_value_fn = f;
        self
    }

    /// Sets the function parsing literals.
    #[must_use]
    pub fn parse_literal(mut self, f: ParseLiteralFn) -> Self {
        self.parse_literal_fn = f;
        self
    }
}

/// Single value of an [`EnumMeta`].
#[derive(Clone, Debug, PartialEq)]
pub struct EnumValue {
    /// Symbolic name, as written in queries and responses.
    pub name: ArcStr,
    /// Internal value resolvers see and produce.
    pub value: Value,
    #[expect(missing_docs, reason = "self-explanatory")]
    pub description: Option<ArcStr>,
}

/// Enum type metadata.
///
/// Maps symbolic names to arbitrary internal values. Names are matched
/// exactly, with no case folding.
#[derive(Debug)]
pub struct EnumMeta {
    #[doc(hidden)]
    pub name: ArcStr,
    #[doc(hidden)]
    pub description: Option<ArcStr>,
    #[doc(hidden)]
    pub values: Vec<EnumValue>,
}

impl EnumMeta {
    /// Builds a new enum without any values.
    pub fn new(name: impl Into<ArcStr>) -> Self {
        Self {
            name: name.into(),
            description: None,
            values: vec![],
        }
    }

    /// Sets the description.
    #[must_use]
    pub fn description(mut self, description: impl Into<ArcStr>) -> Self {
        self.description = Some(description.into());
        self
    }

    /// Adds a symbolic `name` standing for the internal `value`.
    #[must_use]
    pub fn value(mut self, name: impl Into<ArcStr>, value: impl Into<Value>) -> Self {
        self.values.push(EnumValue {
            name: name.into(),
            value: value.into(),
            description: None,
        });
        self
    }

    /// Adds a symbolic `name` whose internal value is the name itself.
    #[must_use]
    pub fn name_value(self, name: &str) -> Self {
        self.value(name, name)
    }

    /// Looks up a value by its symbolic name.
    pub fn value_by_name(&self, name: &str) -> Option<&EnumValue> {
        self.values.iter().find(|v| v.name == name)
    }

    /// Accepts an enum literal naming one of the values.
    ///
    /// String literals are rejected even when their text matches a name.
    pub fn parse_literal(&self, literal: &InputValue) -> Result<Value, CoercionError> {
        match literal {
            InputValue::Enum(name) => self.value_by_name(name).map(|v| v.value.clone()),
            _ => None,
        }
        .ok_or_else(|| {
            CoercionError::new(format!(
                "Enum {} cannot parse value: {literal}",
                self.name,
            ))
        })
    }

    /// Accepts a string exactly matching one of the names.
    pub fn parse_value(&self, value: &Value) -> Result<Value, CoercionError> {
        value
            .as_string_value()
            .and_then(|s| self.value_by_name(s))
            .map(|v| v.value.clone())
            .ok_or_else(|| {
                CoercionError::new(format!(
                    "Enum {} cannot parse value: {value}",
                    self.name,
                ))
            })
    }

    /// Finds the symbolic name of an internal value.
    pub fn serialize(&self, value: &Value) -> Result<Value, CoercionError> {
        self.values
            .iter()
            .find(|v| v.value == *value)
            .map(|v| Value::String(v.name.to_string()))
            .ok_or_else(|| {
                CoercionError::new(format!(
                    "Enum {} cannot represent value: {value}",
                    self.name,
                ))
            })
    }
}

/// Argument of a field or directive, or a field of an input object.
#[derive(Clone, Debug)]
pub struct Argument {
    #[doc(hidden)]
    pub name: ArcStr,
    #[doc(hidden)]
    pub description: Option<ArcStr>,
    #[doc(hidden)]
    pub arg_type: Type,
    /// Internal value used when nothing is supplied.
    pub default_value: Option<Value>,
}

impl Argument {
    #[expect(missing_docs, reason = "self-explanatory")]
    pub fn new(name: impl Into<ArcStr>, arg_type: Type) -> Self {
        Self {
            name: name.into(),
            description: None,
            arg_type,
            default_value: None,
        }
    }

    /// Sets the description.
    #[must_use]
    pub fn description(mut self, description: impl Into<ArcStr>) -> Self {
        self.description = Some(description.into());
        self
    }

    /// Sets the internal value used when the argument isn't supplied.
    #[must_use]
    pub fn default_value(mut self, value: impl Into<Value>) -> Self {
        self.default_value = Some(value.into());
        self
    }
}

/// Output field of an object or interface.
#[derive(derive_more::Debug)]
pub struct Field<Ctx> {
    #[doc(hidden)]
    pub name: ArcStr,
    #[doc(hidden)]
    pub description: Option<ArcStr>,
    #[doc(hidden)]
    pub arguments: Vec<Argument>,
    #[doc(hidden)]
    pub field_type: Type,
    #[debug(skip)]
    pub(crate) resolver: Option<ResolveFn<Ctx>>,
}

impl<Ctx> Field<Ctx> {
    /// Builds a field without a resolver.
    ///
    /// Such a field reads the entry named like itself out of an object
    /// source value, and resolves to `null` on any other source.
    pub fn new(name: impl Into<ArcStr>, field_type: Type) -> Self {
        Self {
            name: name.into(),
            description: None,
            arguments: vec![],
            field_type,
            resolver: None,
        }
    }

    /// Sets the description.
    #[must_use]
    pub fn description(mut self, description: impl Into<ArcStr>) -> Self {
        self.description = Some(description.into());
        self
    }

    /// Declares an argument.
    #[must_use]
    pub fn argument(mut self, argument: Argument) -> Self {
        self.arguments.push(argument);
        self
    }

    /// Sets an asynchronous resolver.
    ///
    /// ```rust
    /// # use juniper_dynamic::{Field, FieldError, Type, Value};
    /// let field = Field::<()>::new("answer", Type::named("Int"))
    ///     .resolve(|_| Box::pin(async { Ok::<_, FieldError>(Value::from(42)) }));
    /// ```
    #[must_use]
    pub fn resolve<F>(mut self, f: F) -> Self
    where
        F: for<'a> Fn(ResolveParams<'a, Ctx>) -> BoxFuture<'a, FieldResult<Value>>
            + Send
            + Sync
            + 'static,
    {
        self.resolver = Some(resolver(f));
        self
    }

    /// Sets a synchronous resolver.
    #[must_use]
    pub fn resolve_sync<F>(mut self, f: F) -> Self
    where
        F: Fn(ResolveParams<'_, Ctx>) -> FieldResult<Value> + Send + Sync + 'static,
        Ctx: 'static,
    {
        self.resolver = Some(resolver(move |params| Box::pin(future::ready(f(params)))));
        self
    }

    /// Looks up a declared argument.
    pub fn argument_by_name(&self, name: &str) -> Option<&Argument> {
        self.arguments.iter().find(|a| a.name == name)
    }
}

/// Object type metadata.
#[derive(derive_more::Debug)]
pub struct ObjectMeta<Ctx> {
    #[doc(hidden)]
    pub name: ArcStr,
    #[doc(hidden)]
    pub description: Option<ArcStr>,
    #[doc(hidden)]
    pub fields: Vec<Field<Ctx>>,
    #[doc(hidden)]
    pub interface_names: Vec<ArcStr>,
    #[debug(skip)]
    pub(crate) is_type_of: Option<IsTypeOfFn<Ctx>>,
}

impl<Ctx> ObjectMeta<Ctx> {
    #[expect(missing_docs, reason = "self-explanatory")]
    pub fn new(name: impl Into<ArcStr>) -> Self {
        Self {
            name: name.into(),
            description: None,
            fields: vec![],
            interface_names: vec![],
            is_type_of: None,
        }
    }

    /// Sets the description.
    #[must_use]
    pub fn description(mut self, description: impl Into<ArcStr>) -> Self {
        self.description = Some(description.into());
        self
    }

    /// Adds a field.
    #[must_use]
    pub fn field(mut self, field: Field<Ctx>) -> Self {
        self.fields.push(field);
        self
    }

    /// Declares the interfaces this object implements.
    #[must_use]
    pub fn interfaces(mut self, names: &[&str]) -> Self {
        self.interface_names = names.iter().map(|&n| n.into()).collect();
        self
    }

    /// Sets the predicate recognizing values of this type, used when an
    /// abstract type has no `resolve_type` function.
    #[must_use]
    pub fn is_type_of(mut self, f: impl Fn(&Value, &Ctx) -> bool + Send + Sync + 'static) -> Self {
        self.is_type_of = Some(Arc::new(f));
        self
    }

    #[expect(missing_docs, reason = "self-explanatory")]
    pub fn field_by_name(&self, name: &str) -> Option<&Field<Ctx>> {
        self.fields.iter().find(|f| f.name == name)
    }
}

/// Interface type metadata.
#[derive(derive_more::Debug)]
pub struct InterfaceMeta<Ctx> {
    #[doc(hidden)]
    pub name: ArcStr,
    #[doc(hidden)]
    pub description: Option<ArcStr>,
    #[doc(hidden)]
    pub fields: Vec<Field<Ctx>>,
    #[debug(skip)]
    pub(crate) resolve_type: Option<ResolveTypeFn<Ctx>>,
}

impl<Ctx> InterfaceMeta<Ctx> {
    #[expect(missing_docs, reason = "self-explanatory")]
    pub fn new(name: impl Into<ArcStr>) -> Self {
        Self {
            name: name.into(),
            description: None,
            fields: vec![],
            resolve_type: None,
        }
    }

    /// Sets the description.
    #[must_use]
    pub fn description(mut self, description: impl Into<ArcStr>) -> Self {
        self.description = Some(description.into());
        self
    }

    /// Adds a field.
    ///
    /// Resolvers set here are never called: the concrete object type's
    /// field resolves instead.
    #[must_use]
    pub fn field(mut self, field: Field<Ctx>) -> Self {
        self.fields.push(field);
        self
    }

    /// Sets the function picking the concrete type of a value.
    #[must_use]
    pub fn resolve_type(
        mut self,
        f: impl Fn(&Value, &Ctx) -> Option<ArcStr> + Send + Sync + 'static,
    ) -> Self {
        self.resolve_type = Some(Arc::new(f));
        self
    }
}

/// Union type metadata.
#[derive(derive_more::Debug)]
pub struct UnionMeta<Ctx> {
    #[doc(hidden)]
    pub name: ArcStr,
    #[doc(hidden)]
    pub description: Option<ArcStr>,
    #[doc(hidden)]
    pub of_type_names: Vec<ArcStr>,
    #[debug(skip)]
    pub(crate) resolve_type: Option<ResolveTypeFn<Ctx>>,
}

impl<Ctx> UnionMeta<Ctx> {
    /// Builds a union of the named object types.
    pub fn new(name: impl Into<ArcStr>, of_type_names: &[&str]) -> Self {
        Self {
            name: name.into(),
            description: None,
            of_type_names: of_type_names.iter().map(|&n| n.into()).collect(),
            resolve_type: None,
        }
    }

    /// Sets the description.
    #[must_use]
    pub fn description(mut self, description: impl Into<ArcStr>) -> Self {
        self.description = Some(description.into());
        self
    }

    /// Sets the function picking the concrete type of a value.
    #[must_use]
    pub fn resolve_type(
        mut self,
        f: impl Fn(&Value, &Ctx) -> Option<ArcStr> + Send + Sync + 'static,
    ) -> Self {
        self.resolve_type = Some(Arc::new(f));
        self
    }
}

/// Input object type metadata.
///
/// Closed-world: supplying a field it doesn't declare is an error.
#[derive(Debug)]
pub struct InputObjectMeta {
    #[doc(hidden)]
    pub name: ArcStr,
    #[doc(hidden)]
    pub description: Option<ArcStr>,
    #[doc(hidden)]
    pub input_fields: Vec<Argument>,
}

impl InputObjectMeta {
    #[expect(missing_docs, reason = "self-explanatory")]
    pub fn new(name: impl Into<ArcStr>) -> Self {
        Self {
            name: name.into(),
            description: None,
            input_fields: vec![],
        }
    }

    /// Sets the description.
    #[must_use]
    pub fn description(mut self, description: impl Into<ArcStr>) -> Self {
        self.description = Some(description.into());
        self
    }

    /// Adds an input field.
    #[must_use]
    pub fn field(mut self, field: Argument) -> Self {
        self.input_fields.push(field);
        self
    }

    #[expect(missing_docs, reason = "self-explanatory")]
    pub fn input_field_by_name(&self, name: &str) -> Option<&Argument> {
        self.input_fields.iter().find(|f| f.name == name)
    }
}

/// Generic type metadata.
#[expect(missing_docs, reason = "self-explanatory")]
#[derive(Debug, derive_more::From)]
pub enum MetaType<Ctx> {
    Scalar(ScalarMeta),
    Enum(EnumMeta),
    Object(ObjectMeta<Ctx>),
    Interface(InterfaceMeta<Ctx>),
    Union(UnionMeta<Ctx>),
    InputObject(InputObjectMeta),
}

impl<Ctx> MetaType<Ctx> {
    /// Name of the type.
    pub fn name(&self) -> &ArcStr {
        match self {
            Self::Scalar(ScalarMeta { name, .. })
            | Self::Enum(EnumMeta { name, .. })
            | Self::Object(ObjectMeta { name, .. })
            | Self::Interface(InterfaceMeta { name, .. })
            | Self::Union(UnionMeta { name, .. })
            | Self::InputObject(InputObjectMeta { name, .. }) => name,
        }
    }

    /// Description of the type, if any.
    pub fn description(&self) -> Option<&ArcStr> {
        match self {
            Self::Scalar(ScalarMeta { description, .. })
            | Self::Enum(EnumMeta { description, .. })
            | Self::Object(ObjectMeta { description, .. })
            | Self::Interface(InterfaceMeta { description, .. })
            | Self::Union(UnionMeta { description, .. })
            | Self::InputObject(InputObjectMeta { description, .. }) => description.as_ref(),
        }
    }

    /// Kind name as GraphQL introspection spells it.
    pub fn type_kind(&self) -> &'static str {
        match self {
            Self::Scalar(_) => "SCALAR",
            Self::Enum(_) => "ENUM",
            Self::Object(_) => "OBJECT",
            Self::Interface(_) => "INTERFACE",
            Self::Union(_) => "UNION",
            Self::InputObject(_) => "INPUT_OBJECT",
        }
    }

    /// Output fields of objects and interfaces.
    pub fn fields(&self) -> Option<&[Field<Ctx>]> {
        match self {
            Self::Object(ObjectMeta { fields, .. })
            | Self::Interface(InterfaceMeta { fields, .. }) => Some(fields),
            _ => None,
        }
    }

    /// Looks up an output field of an object or interface.
    pub fn field_by_name(&self, name: &str) -> Option<&Field<Ctx>> {
        self.fields()?.iter().find(|f| f.name == name)
    }

    /// Looks up a field of an input object.
    pub fn input_field_by_name(&self, name: &str) -> Option<&Argument> {
        match self {
            Self::InputObject(meta) => meta.input_field_by_name(name),
            _ => None,
        }
    }

    /// Scalars and enums.
    pub fn is_leaf(&self) -> bool {
        matches!(self, Self::Scalar(_) | Self::Enum(_))
    }

    /// Objects, interfaces and unions.
    pub fn is_composite(&self) -> bool {
        matches!(self, Self::Object(_) | Self::Interface(_) | Self::Union(_))
    }

    /// Interfaces and unions.
    pub fn is_abstract(&self) -> bool {
        matches!(self, Self::Interface(_) | Self::Union(_))
    }

    /// Types allowed for arguments and variables.
    pub fn is_input(&self) -> bool {
        matches!(self, Self::Scalar(_) | Self::Enum(_) | Self::InputObject(_))
    }

    /// Types allowed for fields.
    pub fn is_output(&self) -> bool {
        !matches!(self, Self::InputObject(_))
    }
}
