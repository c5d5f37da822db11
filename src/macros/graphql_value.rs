/// Constructs [`Value`]s via JSON-like syntax.
///
/// Object keys must be string literals. Negative numbers have to be wrapped
/// into parentheses, since they aren't a single token.
///
/// ```rust
/// # use juniper_dynamic::{graphql_value, Value};
/// let v = graphql_value!({
///     "name": "Luke",
///     "height": 1.72,
///     "friends": ["Han", null],
///     "offset": (-3),
/// });
/// assert!(v.as_object_value().is_some());
/// ```
///
/// [`Value`]: crate::Value
#[macro_export]
macro_rules! graphql_value {
    (null) => {
        $crate::Value::Null
    };
    ([]) => {
        $crate::Value::List(::std::vec::Vec::new())
    };
    ([ $($item:tt),+ $(,)? ]) => {
        $crate::Value::List(::std::vec![$($crate::graphql_value!($item)),+])
    };
    ({}) => {
        $crate::Value::Object($crate::Object::default())
    };
    ({ $($key:literal : $val:tt),+ $(,)? }) => {
        $crate::Value::Object(
            [$(($key, $crate::graphql_value!($val))),+]
                .into_iter()
                .collect::<$crate::Object>(),
        )
    };
    ($e:expr) => {
        $crate::Value::from($e)
    };
}
