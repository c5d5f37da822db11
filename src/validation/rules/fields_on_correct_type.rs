use crate::{
    ast::Field,
    parser::Spanning,
    validation::{ValidatorContext, Visitor},
};

pub struct FieldsOnCorrectType;

pub fn factory() -> FieldsOnCorrectType {
    FieldsOnCorrectType
}

impl<'a, Ctx> Visitor<'a, Ctx> for FieldsOnCorrectType {
    fn enter_field(&mut self, ctx: &mut ValidatorContext<'a, Ctx>, field: &'a Spanning<Field<'a>>) {
        let Some(parent_type) = ctx.parent_type() else {
            return;
        };

        let field_name = field.item.name.item;
        if field_name == "__typename" && parent_type.is_composite() {
            return;
        }

        if parent_type.field_by_name(field_name).is_none() {
            ctx.report_error(
                &error_message(field_name, parent_type.name()),
                &[field.span.start],
            );
        }
    }
}

fn error_message(field: &str, type_name: &str) -> String {
    format!(r#"Unknown field "{field}" on type "{type_name}""#)
}
