use std::fmt;

use crate::{
    ast::{Directive, Field, InputValue},
    parser::Spanning,
    schema::meta::Argument,
    types::coercion::coerce_literal,
    validation::{ValidatorContext, Visitor},
};

pub struct ArgumentsOfCorrectType<'a> {
    current_args: Option<&'a [Argument]>,
}

pub fn factory<'a>() -> ArgumentsOfCorrectType<'a> {
    ArgumentsOfCorrectType { current_args: None }
}

impl<'a, Ctx> Visitor<'a, Ctx> for ArgumentsOfCorrectType<'a> {
    fn enter_directive(
        &mut self,
        ctx: &mut ValidatorContext<'a, Ctx>,
        directive: &'a Spanning<Directive<'a>>,
    ) {
        self.current_args = ctx
            .schema
            .directive_by_name(directive.item.name.item)
            .map(|d| &d.arguments[..]);
    }

    fn exit_directive(&mut self, _: &mut ValidatorContext<'a, Ctx>, _: &'a Spanning<Directive<'a>>) {
        self.current_args = None;
    }

    fn enter_field(&mut self, ctx: &mut ValidatorContext<'a, Ctx>, field: &'a Spanning<Field<'a>>) {
        self.current_args = ctx
            .parent_type()
            .and_then(|t| t.field_by_name(field.item.name.item))
            .map(|f| &f.arguments[..]);
    }

    fn exit_field(&mut self, _: &mut ValidatorContext<'a, Ctx>, _: &'a Spanning<Field<'a>>) {
        self.current_args = None;
    }

    fn enter_argument(
        &mut self,
        ctx: &mut ValidatorContext<'a, Ctx>,
        (arg_name, arg_value): &'a (Spanning<&'a str>, Spanning<InputValue>),
    ) {
        let Some(meta) = self
            .current_args
            .and_then(|args| args.iter().find(|a| a.name == arg_name.item))
        else {
            return;
        };

        if let Err(e) = coerce_literal(ctx.schema, &meta.arg_type, &arg_value.item, None) {
            ctx.report_error(
                &error_message(arg_name.item, &arg_value.item, e),
                &[arg_value.span.start],
            );
        }
    }
}

fn error_message(
    arg_name: &str,
    value: &InputValue,
    details: impl fmt::Display,
) -> String {
    format!("Argument \"{arg_name}\" has invalid value {value}.\n{details}")
}
