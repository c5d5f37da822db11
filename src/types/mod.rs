//! Value coercion and field resolution.

pub(crate) mod async_await;
pub mod coercion;
pub mod name;
pub mod scalars;
