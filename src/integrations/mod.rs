//! Wire representations of values and errors.

#[doc(hidden)]
pub mod serde;
