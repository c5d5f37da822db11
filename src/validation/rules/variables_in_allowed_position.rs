use std::collections::{HashMap, HashSet};

use crate::{
    ast::{Document, Fragment, FragmentSpread, Operation, Type, VariableDefinition},
    parser::Spanning,
    validation::{ValidatorContext, Visitor},
};

#[derive(Clone, Debug, Eq, Hash, PartialEq)]
pub enum Scope<'a> {
    Operation(Option<&'a str>),
    Fragment(&'a str),
}

type VariableDefinitionRef<'a> = &'a (Spanning<&'a str>, VariableDefinition<'a>);

pub struct VariableInAllowedPosition<'a> {
    spreads: HashMap<Scope<'a>, HashSet<&'a str>>,
    variable_usages: HashMap<Scope<'a>, Vec<(&'a str, Type)>>,
    variable_defs: HashMap<Scope<'a>, Vec<VariableDefinitionRef<'a>>>,
    current_scope: Option<Scope<'a>>,
}

pub fn factory<'a>() -> VariableInAllowedPosition<'a> {
    VariableInAllowedPosition {
        spreads: HashMap::new(),
        variable_usages: HashMap::new(),
        variable_defs: HashMap::new(),
        current_scope: None,
    }
}

impl<'a> VariableInAllowedPosition<'a> {
    /// Checks every variable usage reachable from the operation `from`
    /// against the definitions of that operation.
    fn collect_incorrect_usages<Ctx>(
        &self,
        from: Scope<'a>,
        var_defs: &[VariableDefinitionRef<'a>],
        ctx: &mut ValidatorContext<'a, Ctx>,
    ) {
        let mut visited = HashSet::new();
        let mut to_visit = vec![from];

        while let Some(scope) = to_visit.pop() {
            if !visited.insert(scope.clone()) {
                continue;
            }

            for (var_name, position_type) in self.variable_usages.get(&scope).into_iter().flatten() {
                let Some((_, var_def)) = var_defs.iter().find(|(n, _)| n.item == *var_name) else {
                    continue;
                };

                // A default value stands in for a missing or null variable.
                let var_type = match &var_def.default_value {
                    Some(_) => var_def.var_type.item.clone().non_null(),
                    None => var_def.var_type.item.clone(),
                };

                if !ctx.schema.is_subtype(&var_type, position_type) {
                    ctx.report_error(&error_message(var_name, &var_type, position_type), &[]);
                }
            }

            if let Some(spreads) = self.spreads.get(&scope) {
                to_visit.extend(spreads.iter().map(|&s| Scope::Fragment(s)));
            }
        }
    }
}

impl<'a, Ctx> Visitor<'a, Ctx> for VariableInAllowedPosition<'a> {
    fn exit_document(&mut self, ctx: &mut ValidatorContext<'a, Ctx>, _: &'a Document<'a>) {
        for (op_scope, var_defs) in &self.variable_defs {
            if let Scope::Operation(_) = op_scope {
                self.collect_incorrect_usages(op_scope.clone(), var_defs, ctx);
            }
        }
    }

    fn enter_fragment_definition(
        &mut self,
        _: &mut ValidatorContext<'a, Ctx>,
        fragment: &'a Spanning<Fragment<'a>>,
    ) {
        self.current_scope = Some(Scope::Fragment(fragment.item.name.item));
    }

    fn enter_operation_definition(
        &mut self,
        _: &mut ValidatorContext<'a, Ctx>,
        op: &'a Spanning<Operation<'a>>,
    ) {
        let scope = Scope::Operation(op.item.name.as_ref().map(|s| s.item));
        self.variable_defs.entry(scope.clone()).or_default();
        self.current_scope = Some(scope);
    }

    fn enter_fragment_spread(
        &mut self,
        _: &mut ValidatorContext<'a, Ctx>,
        spread: &'a Spanning<FragmentSpread<'a>>,
    ) {
        if let Some(scope) = &self.current_scope {
            self.spreads
                .entry(scope.clone())
                .or_default()
                .insert(spread.item.name.item);
        }
    }

    fn enter_variable_definition(
        &mut self,
        _: &mut ValidatorContext<'a, Ctx>,
        def: &'a (Spanning<&'a str>, VariableDefinition<'a>),
    ) {
        if let Some(scope) = &self.current_scope {
            self.variable_defs
                .entry(scope.clone())
                .or_default()
                .push(def);
        }
    }

    fn enter_variable_value(
        &mut self,
        ctx: &mut ValidatorContext<'a, Ctx>,
        var_name: Spanning<&'a str>,
    ) {
        if let (Some(scope), Some(input_type)) =
            (&self.current_scope, ctx.current_input_type_literal())
        {
            self.variable_usages
                .entry(scope.clone())
                .or_default()
                .push((var_name.item, input_type.clone()));
        }
    }
}

fn error_message(var_name: &str, type_name: &Type, expected_type_name: &Type) -> String {
    format!(
        r#"Variable "${var_name}" of type "{type_name}" used in position expecting type "{expected_type_name}"."#,
    )
}
