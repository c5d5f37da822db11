use crate::{
    ast::VariableDefinition,
    parser::Spanning,
    validation::{ValidatorContext, Visitor},
};

pub struct VariablesAreInputTypes;

pub fn factory() -> VariablesAreInputTypes {
    VariablesAreInputTypes
}

impl<'a, Ctx> Visitor<'a, Ctx> for VariablesAreInputTypes {
    fn enter_variable_definition(
        &mut self,
        ctx: &mut ValidatorContext<'a, Ctx>,
        (var_name, var_def): &'a (Spanning<&'a str>, VariableDefinition<'a>),
    ) {
        let var_type = &var_def.var_type;
        if ctx
            .schema
            .concrete_type_by_name(var_type.item.innermost_name())
            .is_some_and(|t| !t.is_input())
        {
            ctx.report_error(
                &error_message(var_name.item, &var_type.item.to_string()),
                &[var_type.span.start],
            );
        }
    }
}

fn error_message(var_name: &str, type_name: &str) -> String {
    format!(r#"Variable "${var_name}" cannot be of non-input type "{type_name}""#)
}
