/// Builds a payload [`Object`](crate::value::Object) from `key => value`
/// pairs. Values go through `Value::from`, so nested `object!` and `list!`
/// invocations compose.
#[macro_export]
macro_rules! object {
    () => { $crate::value::Object::new() };
    ( $( $key:expr => $value:expr ),+ $(,)? ) => {{
        let mut object = $crate::value::Object::new();
        $( object.insert(String::from($key), $crate::value::Value::from($value)); )+
        object
    }};
}

/// Builds a [`Value::List`](crate::value::Value) from a sequence of values.
#[macro_export]
macro_rules! list {
    ( $( $item:expr ),* $(,)? ) => {
        $crate::value::Value::List(vec![ $( $crate::value::Value::from($item), )* ])
    };
}
