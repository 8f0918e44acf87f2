//! The [`toon!`] macro for building [`Value`](crate::Value) trees inline.

/// Builds a [`Value`](crate::Value) from JSON-like literal syntax.
///
/// Objects preserve the written key order. Any Rust expression that has a
/// `From` conversion into `Value` works in value position; wrap expressions
/// that are not a single token tree (such as negative literals) in
/// parentheses.
///
/// ```rust
/// use toon_codec::{toon, Value};
///
/// let value = toon!({
///     "id": 1,
///     "active": true,
///     "score": (-2),
///     "tags": ["a", "b"],
///     "meta": {"note": null},
/// });
/// assert!(value.is_object());
/// assert_eq!(value.as_object().unwrap().get("id"), Some(&Value::from(1)));
/// ```
#[macro_export]
macro_rules! toon {
    (null) => {
        $crate::Value::Null
    };
    ([ $($elem:tt),* $(,)? ]) => {
        $crate::Value::Array(vec![ $( $crate::toon!($elem) ),* ])
    };
    ({ $($key:tt : $value:tt),* $(,)? }) => {{
        #[allow(unused_mut)]
        let mut map = $crate::ToonMap::new();
        $( map.insert(($key).to_string(), $crate::toon!($value)); )*
        $crate::Value::Object(map)
    }};
    ($other:expr) => {
        $crate::Value::from($other)
    };
}

#[cfg(test)]
mod tests {
    use crate::{Number, Value};

    #[test]
    fn scalars() {
        assert_eq!(toon!(null), Value::Null);
        assert_eq!(toon!(true), Value::Bool(true));
        assert_eq!(toon!(7), Value::Number(Number::Integer(7)));
        assert_eq!(toon!((-7)), Value::Number(Number::Integer(-7)));
        assert_eq!(toon!(2.5), Value::Number(Number::Float(2.5)));
        assert_eq!(toon!("s"), Value::String("s".to_string()));
    }

    #[test]
    fn containers_nest_and_keep_order() {
        let value = toon!({
            "z": [1, null, "x"],
            "a": {"inner": true},
        });
        let obj = value.as_object().unwrap();
        let keys: Vec<_> = obj.keys().map(String::as_str).collect();
        assert_eq!(keys, vec!["z", "a"]);
        assert_eq!(obj.get("z").unwrap().as_array().unwrap().len(), 3);
        assert_eq!(
            obj.get("a").unwrap().as_object().unwrap().get("inner"),
            Some(&Value::Bool(true))
        );
    }

    #[test]
    fn empty_containers() {
        assert_eq!(toon!([]), Value::Array(Vec::new()));
        assert!(toon!({}).as_object().unwrap().is_empty());
    }

    #[test]
    fn expressions_in_value_position() {
        let name = "dyn".to_string();
        let value = toon!({"name": (name.clone())});
        assert_eq!(
            value.as_object().unwrap().get("name"),
            Some(&Value::String(name))
        );
    }
}
