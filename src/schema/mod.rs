//! Runtime description of a schema.

pub mod meta;
pub mod model;
