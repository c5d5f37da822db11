use indexmap::IndexMap;

use crate::{
    ast::{self, InputValue},
    executor::FieldError,
    parser::Spanning,
    schema::{meta::Argument, model::SchemaType},
    types::coercion::{VariableScope, coerce_literal},
    value::Value,
};

/// Coerced argument values handed to a resolver.
///
/// Holds every argument either supplied or having a default value.
/// Optional arguments supplied neither way are absent, which is distinct
/// from an explicit `null`.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Arguments {
    args: IndexMap<String, Value>,
}

impl Arguments {
    /// Creates an empty set of arguments.
    pub fn new() -> Self {
        Self::default()
    }

    /// Value of the `name` argument, if present.
    pub fn get(&self, name: &str) -> Option<&Value> {
        self.args.get(name)
    }

    /// Whether the `name` argument is present at all.
    pub fn contains(&self, name: &str) -> bool {
        self.args.contains_key(name)
    }

    #[expect(missing_docs, reason = "self-explanatory")]
    pub fn iter(&self) -> indexmap::map::Iter<'_, String, Value> {
        self.args.iter()
    }

    #[expect(missing_docs, reason = "self-explanatory")]
    pub fn len(&self) -> usize {
        self.args.len()
    }

    #[expect(missing_docs, reason = "self-explanatory")]
    pub fn is_empty(&self) -> bool {
        self.args.is_empty()
    }
}

impl<K: Into<String>> FromIterator<(K, Value)> for Arguments {
    fn from_iter<I: IntoIterator<Item = (K, Value)>>(iter: I) -> Self {
        Self {
            args: iter.into_iter().map(|(k, v)| (k.into(), v)).collect(),
        }
    }
}

/// Resolves the `declared` arguments of a field or directive against the
/// `supplied` literals and the operation's variables.
///
/// `variable_type` looks up the declared type of a variable, used for
/// error messages only.
pub(crate) fn bind_arguments<'t, Ctx>(
    schema: &SchemaType<Ctx>,
    declared: &[Argument],
    supplied: Option<&ast::Arguments<'_>>,
    variables: VariableScope<'_>,
    variable_type: impl Fn(&str) -> Option<&'t ast::Type>,
) -> Result<Arguments, FieldError> {
    let mut args = Arguments::new();

    for arg in declared {
        let name = arg.name.as_str();
        let value = match supplied.and_then(|a| a.get(name)) {
            Some(Spanning {
                item: InputValue::Variable(var),
                ..
            }) => match variables.coerce(schema, var, &arg.arg_type) {
                Some(res) => Some(res.map_err(|e| {
                    let var_type =
                        variable_type(var).map_or_else(|| "unknown".into(), ToString::to_string);
                    FieldError::from(format!(
                        "Variable \"${var}\" of type \"{var_type}\" cannot be coerced to \
                         argument \"{name}\" of type \"{}\": {e}",
                        arg.arg_type,
                    ))
                })?),
                None => default_or_missing(arg)?,
            },
            Some(literal) => Some(
                coerce_literal(schema, &arg.arg_type, &literal.item, Some(variables)).map_err(
                    |e| {
                        FieldError::from(format!(
                            "Argument \"{name}\" has invalid value {}.\n{e}",
                            literal.item,
                        ))
                    },
                )?,
            ),
            None => default_or_missing(arg)?,
        };

        if let Some(value) = value {
            args.args.insert(name.into(), value);
        }
    }

    Ok(args)
}

fn default_or_missing(arg: &Argument) -> Result<Option<Value>, FieldError> {
    match &arg.default_value {
        Some(default) => Ok(Some(default.clone())),
        None if arg.arg_type.is_non_null() => Err(FieldError::from(format!(
            "Argument \"{}\" of required type \"{}\" was not provided.",
            arg.name, arg.arg_type,
        ))),
        None => Ok(None),
    }
}
