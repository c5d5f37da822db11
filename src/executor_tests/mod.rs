mod arguments;
mod custom_scalar;
mod enums;
mod executor;
mod interfaces_unions;
mod nulls;
mod variables;

use itertools::Itertools as _;

use crate::ExecutionError;

/// `path: message` of every error, in reported order.
fn error_summary(errs: &[ExecutionError]) -> Vec<String> {
    errs.iter()
        .map(|e| format!("{}: {}", e.path().iter().join("."), e.error().message()))
        .collect()
}
