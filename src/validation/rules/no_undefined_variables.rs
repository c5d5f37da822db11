use std::collections::{HashMap, HashSet};

use crate::{
    ast::{Document, Fragment, FragmentSpread, Operation, VariableDefinition},
    parser::{SourcePosition, Spanning},
    validation::{RuleError, ValidatorContext, Visitor},
};

#[derive(Clone, Debug, Eq, Hash, PartialEq)]
pub enum Scope<'a> {
    Operation(Option<&'a str>),
    Fragment(&'a str),
}

pub struct NoUndefinedVariables<'a> {
    defined_variables: HashMap<Option<&'a str>, (SourcePosition, HashSet<&'a str>)>,
    used_variables: HashMap<Scope<'a>, Vec<Spanning<&'a str>>>,
    current_scope: Option<Scope<'a>>,
    spreads: HashMap<Scope<'a>, Vec<&'a str>>,
}

pub fn factory<'a>() -> NoUndefinedVariables<'a> {
    NoUndefinedVariables {
        defined_variables: HashMap::new(),
        used_variables: HashMap::new(),
        current_scope: None,
        spreads: HashMap::new(),
    }
}

impl<'a> NoUndefinedVariables<'a> {
    /// Walks `scope` and every fragment reachable from it, collecting the
    /// variable usages missing from `defined`.
    ///
    /// Iterative, so deep fragment chains can't overflow the stack.
    fn find_undef_vars(
        &self,
        scope: Scope<'a>,
        defined: &HashSet<&'a str>,
        undefined: &mut Vec<Spanning<&'a str>>,
    ) {
        let mut visited = HashSet::new();
        let mut to_visit = vec![scope];

        while let Some(scope) = to_visit.pop() {
            if !visited.insert(scope.clone()) {
                continue;
            }

            if let Some(used_vars) = self.used_variables.get(&scope) {
                undefined.extend(used_vars.iter().filter(|v| !defined.contains(v.item)));
            }

            if let Some(spreads) = self.spreads.get(&scope) {
                to_visit.extend(spreads.iter().map(|&s| Scope::Fragment(s)));
            }
        }
    }
}

impl<'a, Ctx> Visitor<'a, Ctx> for NoUndefinedVariables<'a> {
    fn exit_document(&mut self, ctx: &mut ValidatorContext<'a, Ctx>, _: &'a Document<'a>) {
        for (&op_name, (pos, def_vars)) in &self.defined_variables {
            let mut undefined = Vec::new();
            self.find_undef_vars(Scope::Operation(op_name), def_vars, &mut undefined);

            ctx.append_errors(
                undefined
                    .into_iter()
                    .map(|var| {
                        RuleError::new(&error_message(var.item, op_name), &[var.span.start, *pos])
                    })
                    .collect(),
            );
        }
    }

    fn enter_operation_definition(
        &mut self,
        _: &mut ValidatorContext<'a, Ctx>,
        op: &'a Spanning<Operation<'a>>,
    ) {
        let op_name = op.item.name.as_ref().map(|s| s.item);
        self.current_scope = Some(Scope::Operation(op_name));
        self.defined_variables
            .insert(op_name, (op.span.start, HashSet::new()));
    }

    fn enter_fragment_definition(
        &mut self,
        _: &mut ValidatorContext<'a, Ctx>,
        f: &'a Spanning<Fragment<'a>>,
    ) {
        self.current_scope = Some(Scope::Fragment(f.item.name.item));
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
                .push(spread.item.name.item);
        }
    }

    fn enter_variable_definition(
        &mut self,
        _: &mut ValidatorContext<'a, Ctx>,
        (var_name, _): &'a (Spanning<&'a str>, VariableDefinition<'a>),
    ) {
        if let Some(Scope::Operation(name)) = &self.current_scope {
            if let Some((_, vars)) = self.defined_variables.get_mut(name) {
                vars.insert(var_name.item);
            }
        }
    }

    fn enter_variable_value(&mut self, _: &mut ValidatorContext<'a, Ctx>, var: Spanning<&'a str>) {
        if let Some(scope) = &self.current_scope {
            self.used_variables
                .entry(scope.clone())
                .or_default()
                .push(var);
        }
    }
}

fn error_message(var_name: &str, op_name: Option<&str>) -> String {
    if let Some(op_name) = op_name {
        format!(r#"Variable "${var_name}" is not defined by operation "{op_name}""#)
    } else {
        format!(r#"Variable "${var_name}" is not defined"#)
    }
}
