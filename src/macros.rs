/// Builds an [`AceValue`](crate::AceValue) from Lua-like literals.
///
/// Sequence elements get integer keys from 0, and a `nil` element leaves a
/// hole. Table keys may be string or integer literals.
///
/// ```rust
/// use serde_ace::{ace, AceValue};
///
/// let value = ace!({
///     "name": "Alice",
///     "tags": ["a", nil, "c"],
///     1: true
/// });
///
/// let table = value.as_table().unwrap();
/// assert_eq!(table.get(1), Some(&AceValue::Bool(true)));
/// assert_eq!(table.get("tags").and_then(|t| t.as_table()).map(|t| t.len()), Some(2));
/// ```
#[macro_export]
macro_rules! ace {
    (nil) => {
        $crate::AceValue::Nil
    };

    (true) => {
        $crate::AceValue::Bool(true)
    };

    (false) => {
        $crate::AceValue::Bool(false)
    };

    ([]) => {
        $crate::AceValue::Table($crate::AceTable::new())
    };

    ([ $($elem:tt),* $(,)? ]) => {
        $crate::AceValue::from(vec![$($crate::ace!($elem)),*])
    };

    ({}) => {
        $crate::AceValue::Table($crate::AceTable::new())
    };

    ({ $($key:literal : $value:tt),* $(,)? }) => {{
        let mut table = $crate::AceTable::new();
        $(
            table.insert($key, $crate::ace!($value));
        )*
        $crate::AceValue::Table(table)
    }};

    // Any other expression with a `From` conversion.
    ($s:expr) => {
        $crate::AceValue::from($s)
    };
}
