use crate::{
    ast::Operation,
    executor::Variables,
    parser::Spanning,
    schema::model::SchemaType,
    types::coercion::coerce_input_value,
    validation::RuleError,
};

/// Checks the supplied variable values against the variable definitions of
/// `operation`.
///
/// Variables of unknown or non-input types are skipped, as document
/// validation already reports them.
#[doc(hidden)]
pub fn validate_input_values<Ctx>(
    values: &Variables,
    operation: &Spanning<Operation<'_>>,
    schema: &SchemaType<Ctx>,
) -> Vec<RuleError> {
    let mut errs = vec![];

    let defs = operation.item.variable_definitions.iter();
    for (name, def) in defs.flat_map(|defs| defs.item.iter()) {
        let var_type = &def.var_type.item;
        if !schema
            .concrete_type_by_name(var_type.innermost_name())
            .is_some_and(|t| t.is_input())
        {
            continue;
        }

        match values.get(name.item) {
            Some(v) if !v.is_null() => {
                if let Err(e) = coerce_input_value(schema, var_type, v) {
                    errs.push(RuleError::new(
                        &format!(r#"Variable "${}" got invalid value {v}.{}{e}"#, name.item, '\n'),
                        &[name.span.start],
                    ));
                }
            }
            supplied => {
                let omitted_with_default = supplied.is_none() && def.default_value.is_some();
                if var_type.is_non_null() && !omitted_with_default {
                    errs.push(RuleError::new(
                        &format!(
                            r#"Variable "${}" of required type "{var_type}" was not provided."#,
                            name.item,
                        ),
                        &[name.span.start],
                    ));
                }
            }
        }
    }

    errs.sort();
    errs
}
