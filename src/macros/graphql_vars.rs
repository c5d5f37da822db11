/// Constructs [`Variables`] via JSON-like syntax.
///
/// ```rust
/// # use juniper_dynamic::graphql_vars;
/// let vars = graphql_vars! {"color": "BLUE", "ids": [1, 2]};
/// assert_eq!(vars.len(), 2);
/// ```
///
/// [`Variables`]: crate::Variables
#[macro_export]
macro_rules! graphql_vars {
    () => {
        $crate::Variables::new()
    };
    ($($key:literal : $val:tt),+ $(,)?) => {
        [$((::std::string::String::from($key), $crate::graphql_value!($val))),+]
            .into_iter()
            .collect::<$crate::Variables>()
    };
}
