//! Query validation related methods and data structures

mod context;
mod input_value;
mod multi_visitor;
pub(crate) mod rules;
mod traits;
mod visitor;

#[cfg(test)]
pub(crate) mod test_harness;

use crate::{ast::Document, schema::model::SchemaType};

pub use self::{
    context::{RuleError, ValidatorContext},
    input_value::validate_input_values,
    multi_visitor::MultiVisitor,
    rules::visit_all_rules,
    traits::Visitor,
    visitor::visit,
};

/// Runs every validation rule over `document`.
///
/// Returns the found errors sorted by their first location, so an empty
/// list means the document may be executed against `schema`.
pub fn validate<'a, Ctx>(schema: &'a SchemaType<Ctx>, document: &'a Document<'a>) -> Vec<RuleError> {
    let mut ctx = ValidatorContext::new(schema, document);
    visit_all_rules(&mut ctx, document);
    ctx.into_errors()
}
