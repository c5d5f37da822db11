use crate::{
    ast::VariableDefinition,
    parser::Spanning,
    types::coercion::coerce_literal,
    validation::{ValidatorContext, Visitor},
};

pub struct DefaultValuesOfCorrectType;

pub fn factory() -> DefaultValuesOfCorrectType {
    DefaultValuesOfCorrectType
}

impl<'a, Ctx> Visitor<'a, Ctx> for DefaultValuesOfCorrectType {
    fn enter_variable_definition(
        &mut self,
        ctx: &mut ValidatorContext<'a, Ctx>,
        (var_name, var_def): &'a (Spanning<&'a str>, VariableDefinition<'a>),
    ) {
        let Some(default) = &var_def.default_value else {
            return;
        };
        let var_type = &var_def.var_type.item;

        // Unknown and non-input types are reported on their own.
        if !ctx
            .schema
            .concrete_type_by_name(var_type.innermost_name())
            .is_some_and(|t| t.is_input())
        {
            return;
        }

        if let Err(e) = coerce_literal(ctx.schema, var_type, &default.item, None) {
            ctx.report_error(
                &format!(
                    "Variable \"${}\" has invalid default value {}.\n{e}",
                    var_name.item, default.item,
                ),
                &[default.span.start],
            );
        }
    }
}
