//! Resolution of selection sets, fields and the values they produce.
//!
//! Every function here returns [`None`] for a propagating null: a failure
//! that has to null out the nearest nullable holder of the value. The
//! holder (a field of an object, or an element of a list) turns it into
//! [`Value::Null`] when its own type allows it, and passes it further up
//! otherwise.

use std::{any::Any, fmt, panic::AssertUnwindSafe};

use arcstr::ArcStr;
use futures::{
    FutureExt as _, StreamExt as _,
    future::{self, BoxFuture},
    stream::FuturesOrdered,
};

use crate::{
    ast::{Field, Selection, Type},
    executor::{
        Executor, FieldError, ResolveInfo, ResolveParams, arguments::bind_arguments,
        planner::collect_fields,
    },
    parser::Spanning,
    schema::meta::{MetaType, ObjectMeta},
    types::coercion::serialize_leaf,
    value::{Object, Value},
};

/// Resolves the merged `selection_sets` against the `source` value of
/// `object_type`.
///
/// With `serial` the fields run one after another in planned order, each
/// one's whole subtree completing before the next starts. Otherwise all of
/// them run concurrently. Either way the result keeps the planned order, and
/// every field runs to completion even once a sibling has failed.
pub(crate) fn resolve_selection_set<'a, Ctx: Sync>(
    executor: &'a Executor<'a, Ctx>,
    object_type: &'a ObjectMeta<Ctx>,
    selection_sets: Vec<&'a [Selection<'a>]>,
    source: Value,
    serial: bool,
) -> BoxFuture<'a, Option<Value>> {
    Box::pin(async move {
        let fields = collect_fields(executor, object_type, &selection_sets);

        let values = if serial {
            let mut values = Vec::with_capacity(fields.len());
            for (key, nodes) in &fields {
                values.push(resolve_field(executor, object_type, key, nodes, &source).await);
            }
            values
        } else {
            future::join_all(
                fields
                    .iter()
                    .map(|(key, nodes)| resolve_field(executor, object_type, key, nodes, &source)),
            )
            .await
        };

        let mut object = Object::with_capacity(fields.len());
        let mut propagated = false;
        for (key, value) in fields.keys().zip(values) {
            match value {
                Some(value) => {
                    object.add_field(*key, value);
                }
                None => propagated = true,
            }
        }
        (!propagated).then_some(Value::Object(object))
    })
}

/// Field being completed, for error messages and sub-selections.
#[derive(Clone, Copy)]
struct FieldSite<'r> {
    parent_type: &'r ArcStr,
    field_name: &'r str,
    nodes: &'r [&'r Spanning<Field<'r>>],
}

impl fmt::Display for FieldSite<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}.{}", self.parent_type, self.field_name)
    }
}

fn resolve_field<'r, Ctx: Sync>(
    executor: &'r Executor<'r, Ctx>,
    parent: &'r ObjectMeta<Ctx>,
    response_key: &'r str,
    nodes: &'r [&'r Spanning<Field<'r>>],
    source: &'r Value,
) -> BoxFuture<'r, Option<Value>> {
    let Some(first) = nodes.first() else {
        return Box::pin(future::ready(Some(Value::Null)));
    };
    let field_name = first.item.name.item;
    if field_name == "__typename" {
        return Box::pin(future::ready(Some(Value::from(parent.name.as_str()))));
    }

    let sub_exec = executor.field_sub_executor(response_key, first.start());
    let Some(meta_field) = parent.field_by_name(field_name) else {
        sub_exec.push_error(FieldError::from(format!(
            "Unknown field \"{field_name}\" on type \"{}\"",
            parent.name,
        )));
        return Box::pin(future::ready(Some(Value::Null)));
    };
    let site = FieldSite {
        parent_type: &parent.name,
        field_name,
        nodes,
    };

    Box::pin(async move {
        let resolved = AssertUnwindSafe(async {
            // Merged nodes agree on arguments once the document is validated.
            let args = match bind_arguments(
                executor.schema(),
                &meta_field.arguments,
                first.item.arguments.as_ref().map(|a| &a.item),
                executor.variables(),
                |name| executor.variable_type(name),
            ) {
                Ok(args) => args,
                Err(e) => {
                    sub_exec.push_error(e);
                    return None;
                }
            };

            let value = match &meta_field.resolver {
                Some(resolver) => {
                    let params = ResolveParams {
                        source,
                        args: &args,
                        context: executor.context(),
                        info: ResolveInfo {
                            field_name,
                            response_key,
                            return_type: &meta_field.field_type,
                            parent_type: &parent.name,
                            path: sub_exec.path(),
                            schema: executor.schema(),
                        },
                    };
                    let fut = crate::__dyn_instrument_trace!(
                        resolver(params),
                        "resolve",
                        field = %site,
                    );
                    match fut.await {
                        Ok(value) => value,
                        Err(e) => {
                            crate::__dyn_trace_debug!(
                                field = %site,
                                error = e.message(),
                                "resolver failed",
                            );
                            sub_exec.push_error(e);
                            return None;
                        }
                    }
                }
                None => source
                    .as_object_value()
                    .and_then(|obj| obj.get_field_value(field_name))
                    .cloned()
                    .unwrap_or(Value::Null),
            };

            complete_value(&sub_exec, &meta_field.field_type, site, value).await
        })
        .catch_unwind()
        .await;

        let value = resolved.unwrap_or_else(|panic| {
            let message = panic_message(&*panic);
            crate::__dyn_trace_warn!(field = %site, panic = %message, "resolver panicked");
            sub_exec.push_error(FieldError::from(message));
            None
        });

        if value.is_none() && !meta_field.field_type.is_non_null() {
            Some(Value::Null)
        } else {
            value
        }
    })
}

/// Shapes a resolved `value` after `ty`, resolving sub-selections of
/// composite types.
fn complete_value<'r, Ctx: Sync>(
    executor: &'r Executor<'r, Ctx>,
    ty: &'r Type,
    site: FieldSite<'r>,
    value: Value,
) -> BoxFuture<'r, Option<Value>> {
    match ty {
        Type::NonNull(inner) => {
            if value.is_null() {
                executor.push_error(FieldError::from(format!(
                    "Cannot return null for non-nullable field {site}.",
                )));
                Box::pin(future::ready(None))
            } else {
                complete_value(executor, inner, site, value)
            }
        }
        _ if value.is_null() => Box::pin(future::ready(Some(Value::Null))),
        Type::List(inner) => {
            let Value::List(items) = value else {
                executor.push_error(FieldError::from(format!(
                    "Expected an iterable, but did not find one for field {site}.",
                )));
                return Box::pin(future::ready(None));
            };
            Box::pin(complete_list(executor, inner, site, items))
        }
        Type::Named(name) => {
            let schema = executor.schema();
            match schema.concrete_type_by_name(name) {
                Some(meta @ (MetaType::Scalar(_) | MetaType::Enum(_))) => {
                    let serialized = serialize_leaf(meta, &value)
                        .map_err(|e| executor.push_error(FieldError::from(e)))
                        .ok();
                    Box::pin(future::ready(serialized))
                }
                Some(MetaType::Object(object_type)) => {
                    resolve_selection_set(executor, object_type, sub_selections(site), value, false)
                }
                Some(meta @ (MetaType::Interface(_) | MetaType::Union(_))) => {
                    match resolve_abstract_type(executor, meta, &value, site) {
                        Some(object_type) => resolve_selection_set(
                            executor,
                            object_type,
                            sub_selections(site),
                            value,
                            false,
                        ),
                        None => Box::pin(future::ready(None)),
                    }
                }
                Some(MetaType::InputObject(_)) | None => {
                    executor.push_error(FieldError::from(format!(
                        "Type \"{name}\" of field {site} is not an output type",
                    )));
                    Box::pin(future::ready(None))
                }
            }
        }
    }
}

async fn complete_list<'r, Ctx: Sync>(
    executor: &'r Executor<'r, Ctx>,
    item_type: &'r Type,
    site: FieldSite<'r>,
    items: Vec<Value>,
) -> Option<Value> {
    let mut completions = items
        .into_iter()
        .enumerate()
        .map(|(i, item)| async move {
            let item_exec = executor.index_sub_executor(i);
            complete_value(&item_exec, item_type, site, item).await
        })
        .collect::<FuturesOrdered<_>>();

    let mut list = Vec::with_capacity(completions.len());
    let mut propagated = false;
    while let Some(item) = completions.next().await {
        match item {
            Some(value) => list.push(value),
            None if !item_type.is_non_null() => list.push(Value::Null),
            None => propagated = true,
        }
    }
    (!propagated).then_some(Value::List(list))
}

fn sub_selections<'r>(site: FieldSite<'r>) -> Vec<&'r [Selection<'r>]> {
    site.nodes
        .iter()
        .filter_map(|node| node.item.selection_set.as_deref())
        .collect()
}

/// Determines the concrete object type of a `value` of an interface or a
/// union.
fn resolve_abstract_type<'r, Ctx>(
    executor: &Executor<'r, Ctx>,
    abstract_type: &'r MetaType<Ctx>,
    value: &Value,
    site: FieldSite<'_>,
) -> Option<&'r ObjectMeta<Ctx>> {
    let schema = executor.schema();
    let context = executor.context();
    let resolve_type = match abstract_type {
        MetaType::Interface(meta) => meta.resolve_type.as_ref(),
        MetaType::Union(meta) => meta.resolve_type.as_ref(),
        _ => None,
    };
    let type_name = match resolve_type {
        Some(resolve_type) => resolve_type(value, context),
        None => schema.possible_types(abstract_type).find_map(|t| match t {
            MetaType::Object(obj) if obj.is_type_of.as_ref().is_some_and(|f| f(value, context)) => {
                Some(obj.name.clone())
            }
            _ => None,
        }),
    };

    let abstract_name = abstract_type.name();
    let resolved = type_name
        .as_deref()
        .and_then(|name| schema.concrete_type_by_name(name));
    let Some(object @ MetaType::Object(object_type)) = resolved else {
        let received = type_name.map_or_else(|| "null".into(), |n| format!("\"{n}\""));
        crate::__dyn_trace_warn!(
            abstract_type = %abstract_name,
            field = %site,
            received = %received,
            "abstract type not resolved",
        );
        executor.push_error(FieldError::from(format!(
            "Abstract type {abstract_name} must resolve to an Object type at runtime for field \
             {site} with value {value}, received {received}.",
        )));
        return None;
    };

    if !schema.is_possible_type(abstract_type, object) {
        executor.push_error(FieldError::from(format!(
            "Runtime Object type \"{}\" is not a possible type for \"{abstract_name}\".",
            object_type.name,
        )));
        return None;
    }
    Some(object_type)
}

fn panic_message(payload: &(dyn Any + Send)) -> String {
    payload
        .downcast_ref::<&str>()
        .map(|s| (*s).to_owned())
        .or_else(|| payload.downcast_ref::<String>().cloned())
        .unwrap_or_else(|| "Resolver panicked".into())
}
