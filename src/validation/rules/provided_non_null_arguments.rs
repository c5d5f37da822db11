use crate::{
    ast::{Arguments, Directive, Field, Type},
    parser::Spanning,
    schema::meta::Argument,
    validation::{ValidatorContext, Visitor},
};

pub struct ProvidedNonNullArguments;

pub fn factory() -> ProvidedNonNullArguments {
    ProvidedNonNullArguments
}

impl<'a, Ctx> Visitor<'a, Ctx> for ProvidedNonNullArguments {
    fn enter_field(&mut self, ctx: &mut ValidatorContext<'a, Ctx>, field: &'a Spanning<Field<'a>>) {
        let field_name = field.item.name.item;

        let Some(meta_field) = ctx.parent_type().and_then(|t| t.field_by_name(field_name)) else {
            return;
        };

        for meta_arg in missing(&meta_field.arguments, field.item.arguments.as_ref()) {
            ctx.report_error(
                &field_error_message(field_name, &meta_arg.name, &meta_arg.arg_type),
                &[field.span.start],
            );
        }
    }

    fn enter_directive(
        &mut self,
        ctx: &mut ValidatorContext<'a, Ctx>,
        directive: &'a Spanning<Directive<'a>>,
    ) {
        let directive_name = directive.item.name.item;

        let Some(meta_directive) = ctx.schema.directive_by_name(directive_name) else {
            return;
        };

        for meta_arg in missing(&meta_directive.arguments, directive.item.arguments.as_ref()) {
            ctx.report_error(
                &directive_error_message(directive_name, &meta_arg.name, &meta_arg.arg_type),
                &[directive.span.start],
            );
        }
    }
}

/// Non-null arguments without a default that are absent from `supplied`.
fn missing<'m>(
    declared: &'m [Argument],
    supplied: Option<&Spanning<Arguments<'_>>>,
) -> impl Iterator<Item = &'m Argument> {
    let supplied_names = supplied
        .map(|args| args.item.iter().map(|(name, _)| name.item).collect::<Vec<_>>())
        .unwrap_or_default();

    declared.iter().filter(move |arg| {
        arg.arg_type.is_non_null()
            && arg.default_value.is_none()
            && !supplied_names.contains(&arg.name.as_str())
    })
}

fn field_error_message(field_name: &str, arg_name: &str, type_name: &Type) -> String {
    format!(
        r#"Field "{field_name}" argument "{arg_name}" of type "{type_name}" is required but not provided"#,
    )
}

fn directive_error_message(directive_name: &str, arg_name: &str, type_name: &Type) -> String {
    format!(
        r#"Directive "@{directive_name}" argument "{arg_name}" of type "{type_name}" is required but not provided"#,
    )
}
