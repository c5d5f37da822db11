//! Type-directed conversion between literals, variable values and
//! internal values.

use std::fmt;

use crate::{
    ast::{InputValue, Operation, Type},
    executor::Variables,
    parser::Spanning,
    schema::{
        meta::{Argument, InputObjectMeta, MetaType},
        model::SchemaType,
    },
    value::{Object, Value},
};

/// Step into a nested input value, used to annotate [`CoercionError`]s.
#[derive(Clone, Debug, Eq, PartialEq)]
pub enum CoercionPathSegment {
    /// Zero-based index of a list element.
    Element(usize),
    /// Name of an input object field.
    Field(String),
}

impl fmt::Display for CoercionPathSegment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Element(i) => write!(f, "In element #{}: ", i + 1),
            Self::Field(name) => write!(f, "In field \"{name}\": "),
        }
    }
}

/// Failure to coerce a value into a type.
///
/// Displays every line of its message prefixed with the path to the
/// offending nested value, outermost step first:
///
/// ```text
/// In field "stringListField": In element #2: Expected type "String", found 2.
/// In field "stringListField": In element #2: Error: String cannot represent non-string literal: 2
/// ```
#[derive(Clone, Debug, Eq, PartialEq, derive_more::Error)]
pub struct CoercionError {
    path: Vec<CoercionPathSegment>,
    message: String,
}

impl CoercionError {
    /// Creates an error not yet located within a nested value.
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            path: vec![],
            message: message.into(),
        }
    }

    /// Failure of a leaf type to accept `found`.
    pub fn expected(ty: &Type, found: impl fmt::Display, cause: &Self) -> Self {
        Self::new(format!(
            "Expected type \"{ty}\", found {found}.\nError: {}",
            cause.message,
        ))
    }

    fn null_for_non_null(ty: &Type) -> Self {
        Self::new(format!("Expected \"{ty}\", found null."))
    }

    fn not_an_object(ty: &Type) -> Self {
        Self::new(format!("Expected \"{ty}\", found not an object."))
    }

    fn unknown_field(name: &str) -> Self {
        Self::new("Unknown field.").in_field(name)
    }

    fn not_input_type(ty: &Type) -> Self {
        Self::new(format!("Type \"{ty}\" is not an input type."))
    }

    fn unknown_type(ty: &Type) -> Self {
        Self::new(format!("Unknown type \"{ty}\"."))
    }

    /// Locates this error inside the `index`th element of a list.
    #[must_use]
    pub fn in_element(mut self, index: usize) -> Self {
        self.path.insert(0, CoercionPathSegment::Element(index));
        self
    }

    /// Locates this error inside the `name` field of an input object.
    #[must_use]
    pub fn in_field(mut self, name: &str) -> Self {
        self.path.insert(0, CoercionPathSegment::Field(name.into()));
        self
    }

    /// Path to the offending nested value, outermost step first.
    pub fn path(&self) -> &[CoercionPathSegment] {
        &self.path
    }

    /// Message without any path annotation.
    pub fn message(&self) -> &str {
        &self.message
    }
}

impl fmt::Display for CoercionError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, line) in self.message.lines().enumerate() {
            if i > 0 {
                writeln!(f)?;
            }
            for segment in &self.path {
                segment.fmt(f)?;
            }
            f.write_str(line)?;
        }
        Ok(())
    }
}

/// Variables visible to the literals of one operation.
///
/// Values supplied by a client are coerced on every use, against the type of
/// the position they're used in. Declared defaults are literals, so they're
/// coerced once, against the declared variable type, by
/// [`coerce_variable_defaults`].
#[derive(Clone, Copy, Debug)]
pub struct VariableScope<'v> {
    provided: &'v Variables,
    defaults: &'v Variables,
}

impl<'v> VariableScope<'v> {
    /// Creates a scope out of client-supplied values and already coerced
    /// defaults.
    pub fn new(provided: &'v Variables, defaults: &'v Variables) -> Self {
        Self { provided, defaults }
    }

    /// Whether the `name` variable has a value, supplied or defaulted.
    pub fn contains(&self, name: &str) -> bool {
        self.provided.contains_key(name) || self.defaults.contains_key(name)
    }

    /// Raw value of the `name` variable. A supplied value, even an explicit
    /// `null`, wins over the default.
    pub fn get(&self, name: &str) -> Option<&'v Value> {
        self.provided.get(name).or_else(|| self.defaults.get(name))
    }

    /// Value of the `name` variable coerced into `ty`, or [`None`] if the
    /// variable has no value at all.
    pub fn coerce<Ctx>(
        &self,
        schema: &SchemaType<Ctx>,
        name: &str,
        ty: &Type,
    ) -> Option<Result<Value, CoercionError>> {
        match self.provided.get(name) {
            Some(value) => Some(coerce_input_value(schema, ty, value)),
            None => self.defaults.get(name).cloned().map(Ok),
        }
    }
}

/// Coerces the default values of the variables declared by `operation`.
///
/// Defaults follow literal rules, so `"GREEN"` is no default for an enum and
/// `1.5` none for an `Int`. Variables whose default fails to coerce are left
/// out, as if they had no default.
pub fn coerce_variable_defaults<Ctx>(
    schema: &SchemaType<Ctx>,
    operation: &Operation<'_>,
) -> Variables {
    let defs = operation.variable_definitions.iter();
    defs.flat_map(|defs| defs.item.iter())
        .filter_map(|(name, def)| {
            let default = def.default_value.as_ref()?;
            coerce_literal(schema, &def.var_type.item, &default.item, None)
                .ok()
                .map(|value| (name.item.to_owned(), value))
        })
        .collect()
}

/// Coerces a variable value supplied by a client into `ty`.
///
/// Non-list values are accepted for list types as one-element lists. A
/// single failing list element or input object field fails the whole
/// value.
pub fn coerce_input_value<Ctx>(
    schema: &SchemaType<Ctx>,
    ty: &Type,
    value: &Value,
) -> Result<Value, CoercionError> {
    match ty {
        Type::NonNull(inner) => {
            if value.is_null() {
                Err(CoercionError::null_for_non_null(ty))
            } else {
                coerce_input_value(schema, inner, value)
            }
        }
        _ if value.is_null() => Ok(Value::Null),
        Type::List(inner) => match value {
            Value::List(items) => items
                .iter()
                .enumerate()
                .map(|(i, item)| {
                    coerce_input_value(schema, inner, item).map_err(|e| e.in_element(i))
                })
                .collect::<Result<_, _>>()
                .map(Value::List),
            single => Ok(Value::List(vec![coerce_input_value(schema, inner, single)?])),
        },
        Type::Named(name) => match schema.concrete_type_by_name(name) {
            Some(MetaType::Scalar(meta)) => (meta.parse_value_fn)(value)
                .map_err(|e| CoercionError::expected(ty, value, &e)),
            Some(MetaType::Enum(meta)) => meta
                .parse_value(value)
                .map_err(|e| CoercionError::expected(ty, value, &e)),
            Some(MetaType::InputObject(meta)) => {
                let Value::Object(obj) = value else {
                    return Err(CoercionError::not_an_object(ty));
                };
                if let Some((unknown, _)) = obj
                    .iter()
                    .find(|(k, _)| meta.input_field_by_name(k).is_none())
                {
                    return Err(CoercionError::unknown_field(unknown));
                }
                coerce_input_fields(meta, |field| {
                    obj.get_field_value(&field.name)
                        .map(|v| coerce_input_value(schema, &field.arg_type, v))
                })
            }
            Some(_) => Err(CoercionError::not_input_type(ty)),
            None => Err(CoercionError::unknown_type(ty)),
        },
    }
}

/// Coerces a literal written in a document into `ty`.
///
/// Literals may reference variables. With `variables` provided, each one is
/// looked up and coerced as a variable value, an undefined one counting as
/// `null` inside lists and as not supplied inside input objects. Without
/// `variables` every reference is accepted as is, which is what validation
/// wants before any variable value is known.
pub fn coerce_literal<Ctx>(
    schema: &SchemaType<Ctx>,
    ty: &Type,
    literal: &InputValue,
    variables: Option<VariableScope<'_>>,
) -> Result<Value, CoercionError> {
    if let InputValue::Variable(name) = literal {
        return match variables {
            None => Ok(Value::Null),
            Some(vars) => match vars.coerce(schema, name, ty) {
                Some(res) => res,
                None if ty.is_non_null() => Err(CoercionError::null_for_non_null(ty)),
                None => Ok(Value::Null),
            },
        };
    }

    match ty {
        Type::NonNull(inner) => {
            if literal.is_null() {
                Err(CoercionError::null_for_non_null(ty))
            } else {
                coerce_literal(schema, inner, literal, variables)
            }
        }
        _ if literal.is_null() => Ok(Value::Null),
        Type::List(inner) => match literal {
            InputValue::List(items) => items
                .iter()
                .enumerate()
                .map(|(i, Spanning { item, .. })| {
                    let item = if is_undefined_variable(item, variables) {
                        &NULL_LITERAL
                    } else {
                        item
                    };
                    coerce_literal(schema, inner, item, variables).map_err(|e| e.in_element(i))
                })
                .collect::<Result<_, _>>()
                .map(Value::List),
            single => Ok(Value::List(vec![coerce_literal(
                schema, inner, single, variables,
            )?])),
        },
        Type::Named(name) => match schema.concrete_type_by_name(name) {
            Some(MetaType::Scalar(meta)) => (meta.parse_literal_fn)(literal)
                .map_err(|e| CoercionError::expected(ty, literal, &e)),
            Some(MetaType::Enum(meta)) => meta
                .parse_literal(literal)
                .map_err(|e| CoercionError::expected(ty, literal, &e)),
            Some(MetaType::InputObject(meta)) => {
                let InputValue::Object(fields) = literal else {
                    return Err(CoercionError::not_an_object(ty));
                };
                if let Some((unknown, _)) = fields
                    .iter()
                    .find(|(k, _)| meta.input_field_by_name(&k.item).is_none())
                {
                    return Err(CoercionError::unknown_field(&unknown.item));
                }
                coerce_input_fields(meta, |field| {
                    fields
                        .iter()
                        .find(|(k, _)| k.item == field.name)
                        .map(|(_, v)| &v.item)
                        .filter(|v| !is_undefined_variable(v, variables))
                        .map(|v| coerce_literal(schema, &field.arg_type, v, variables))
                })
            }
            Some(_) => Err(CoercionError::not_input_type(ty)),
            None => Err(CoercionError::unknown_type(ty)),
        },
    }
}

static NULL_LITERAL: InputValue = InputValue::Null;

fn is_undefined_variable(literal: &InputValue, variables: Option<VariableScope<'_>>) -> bool {
    match (literal, variables) {
        (InputValue::Variable(name), Some(vars)) => !vars.contains(name),
        _ => false,
    }
}

/// Walks the declared fields of an input object, taking each one from
/// `supplied`, then from its default value.
fn coerce_input_fields(
    meta: &InputObjectMeta,
    mut supplied: impl FnMut(&Argument) -> Option<Result<Value, CoercionError>>,
) -> Result<Value, CoercionError> {
    let mut obj = Object::with_capacity(meta.input_fields.len());
    for field in &meta.input_fields {
        match supplied(field) {
            Some(res) => {
                let value = res.map_err(|e| e.in_field(&field.name))?;
                obj.add_field(field.name.as_str(), value);
            }
            None => {
                if let Some(default) = &field.default_value {
                    obj.add_field(field.name.as_str(), default.clone());
                } else if field.arg_type.is_non_null() {
                    return Err(
                        CoercionError::null_for_non_null(&field.arg_type).in_field(&field.name)
                    );
                }
            }
        }
    }
    Ok(Value::Object(obj))
}

/// Turns an internal value of a leaf type into a response value.
pub fn serialize_leaf<Ctx>(meta: &MetaType<Ctx>, value: &Value) -> Result<Value, CoercionError> {
    match meta {
        _ if value.is_null() => Ok(Value::Null),
        MetaType::Scalar(scalar) => (scalar.serialize_fn)(value),
        MetaType::Enum(enum_meta) => enum_meta.serialize(value),
        other => Err(CoercionError::new(format!(
            "Type \"{}\" is not a leaf type",
            other.name(),
        ))),
    }
}
