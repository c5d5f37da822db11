//! Grouping of the fields selected on an object into response entries.

use fnv::FnvHashSet;
use indexmap::IndexMap;

use crate::{
    ast::{Directive, Field, InputValue, Selection},
    executor::Executor,
    parser::Spanning,
    schema::meta::ObjectMeta,
};

/// Field nodes selected on one object type, grouped by response key in the
/// order each key first appears.
pub(crate) type GroupedFields<'a> = IndexMap<&'a str, Vec<&'a Spanning<Field<'a>>>>;

/// Flattens the `selection_sets` selected on `object_type` into
/// [`GroupedFields`].
///
/// Fragments whose type condition doesn't apply to `object_type` are left
/// out, as are selections excluded by `@skip` or `@include`. Each named
/// fragment is expanded at most once.
pub(crate) fn collect_fields<'a, Ctx>(
    executor: &Executor<'a, Ctx>,
    object_type: &ObjectMeta<Ctx>,
    selection_sets: &[&'a [Selection<'a>]],
) -> GroupedFields<'a> {
    let mut fields = GroupedFields::default();
    let mut visited = FnvHashSet::default();
    for set in selection_sets {
        collect_into(executor, object_type, set, &mut fields, &mut visited);
    }
    fields
}

fn collect_into<'a, Ctx>(
    executor: &Executor<'a, Ctx>,
    object_type: &ObjectMeta<Ctx>,
    selection_set: &'a [Selection<'a>],
    fields: &mut GroupedFields<'a>,
    visited: &mut FnvHashSet<&'a str>,
) {
    for selection in selection_set {
        match selection {
            Selection::Field(field) => {
                if is_excluded(executor, field.item.directives.as_deref()) {
                    continue;
                }
                fields
                    .entry(field.item.response_key())
                    .or_default()
                    .push(field);
            }
            Selection::FragmentSpread(spread) => {
                if is_excluded(executor, spread.item.directives.as_deref())
                    || !visited.insert(spread.item.name.item)
                {
                    continue;
                }
                let Some(fragment) = executor.fragment_by_name(spread.item.name.item) else {
                    continue;
                };
                if condition_applies(executor, object_type, fragment.type_condition.item) {
                    collect_into(
                        executor,
                        object_type,
                        &fragment.selection_set,
                        fields,
                        visited,
                    );
                }
            }
            Selection::InlineFragment(fragment) => {
                if is_excluded(executor, fragment.item.directives.as_deref()) {
                    continue;
                }
                let applies = fragment
                    .item
                    .type_condition
                    .as_ref()
                    .is_none_or(|cond| condition_applies(executor, object_type, cond.item));
                if applies {
                    collect_into(
                        executor,
                        object_type,
                        &fragment.item.selection_set,
                        fields,
                        visited,
                    );
                }
            }
        }
    }
}

fn condition_applies<Ctx>(
    executor: &Executor<'_, Ctx>,
    object_type: &ObjectMeta<Ctx>,
    condition: &str,
) -> bool {
    if object_type.name.as_str() == condition {
        return true;
    }
    let schema = executor.schema();
    schema
        .concrete_type_by_name(condition)
        .is_some_and(|cond| {
            schema
                .possible_types(cond)
                .any(|t| *t.name() == object_type.name)
        })
}

fn is_excluded<Ctx>(
    executor: &Executor<'_, Ctx>,
    directives: Option<&[Spanning<Directive<'_>>]>,
) -> bool {
    directives
        .into_iter()
        .flatten()
        .any(|d| match d.item.name.item {
            "skip" => condition(executor, &d.item),
            "include" => !condition(executor, &d.item),
            _ => false,
        })
}

/// Value of the `if` argument of `@skip` or `@include`.
fn condition<Ctx>(executor: &Executor<'_, Ctx>, directive: &Directive<'_>) -> bool {
    let arg = directive
        .arguments
        .as_ref()
        .and_then(|args| args.item.get("if"));
    match arg.map(|a| &a.item) {
        Some(InputValue::Boolean(b)) => *b,
        Some(InputValue::Variable(name)) => executor
            .variables()
            .get(name)
            .and_then(|v| v.as_bool_value())
            .unwrap_or(false),
        _ => false,
    }
}
