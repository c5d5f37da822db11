//! Declarative macros for building values and variables, plus the
//! crate-internal tracing shims.

#[doc(hidden)]
pub mod tracing;

mod graphql_value;
mod graphql_vars;
