mod arguments_of_correct_type;
mod default_values_of_correct_type;
mod fields_on_correct_type;
mod known_argument_names;
mod known_names;
mod no_fragment_cycles;
mod no_undefined_variables;
mod operation_names;
mod overlapping_fields_can_be_merged;
mod provided_non_null_arguments;
mod scalar_leafs;
mod variables_are_input_types;
mod variables_in_allowed_position;

use crate::{
    ast::Document,
    validation::{MultiVisitor, ValidatorContext, visit},
};

#[doc(hidden)]
pub fn visit_all_rules<'a, Ctx>(ctx: &mut ValidatorContext<'a, Ctx>, doc: &'a Document<'a>) {
    let mut mv = MultiVisitor::new(vec![
        Box::new(arguments_of_correct_type::factory()),
        Box::new(default_values_of_correct_type::factory()),
        Box::new(fields_on_correct_type::factory()),
        Box::new(known_argument_names::factory()),
        Box::new(known_names::factory()),
        Box::new(no_fragment_cycles::factory()),
        Box::new(no_undefined_variables::factory()),
        Box::new(operation_names::factory()),
        Box::new(overlapping_fields_can_be_merged::factory()),
        Box::new(provided_non_null_arguments::factory()),
        Box::new(scalar_leafs::factory()),
        Box::new(variables_are_input_types::factory()),
        Box::new(variables_in_allowed_position::factory()),
    ]);

    visit(&mut mv, ctx, doc);
}
