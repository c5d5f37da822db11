//! Operations of a document must be told apart by name: no two may share
//! one, and an anonymous operation has to be alone.

use std::collections::HashMap;

use crate::{
    ast::{Definition, Document},
    parser::SourcePosition,
    validation::{ValidatorContext, Visitor},
};

pub struct OperationNames;

pub fn factory() -> OperationNames {
    OperationNames
}

impl<'a, Ctx> Visitor<'a, Ctx> for OperationNames {
    fn enter_document(&mut self, ctx: &mut ValidatorContext<'a, Ctx>, doc: &'a Document<'a>) {
        let operations = doc
            .iter()
            .filter_map(|def| match def {
                Definition::Operation(op) => Some(op),
                Definition::Fragment(_) => None,
            })
            .collect::<Vec<_>>();

        let mut first_by_name = HashMap::<&str, SourcePosition>::new();
        for op in &operations {
            let Some(name) = &op.item.name else {
                if operations.len() > 1 {
                    ctx.report_error(ANONYMOUS_NOT_ALONE, &[op.span.start]);
                }
                continue;
            };
            match first_by_name.get(name.item) {
                Some(&first) => ctx.report_error(
                    &format!(r#"There can only be one operation named "{}""#, name.item),
                    &[first, op.span.start],
                ),
                None => {
                    first_by_name.insert(name.item, op.span.start);
                }
            }
        }
    }
}

const ANONYMOUS_NOT_ALONE: &str = "This anonymous operation must be the only defined operation.";
