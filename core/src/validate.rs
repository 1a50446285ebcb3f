//! Reusable validators.

use crate::error::BoxError;
use crate::value::Value;

/// Validator that accepts only the listed values.
///
/// # Examples
///
/// ```
/// use argtree_core::{Value, validate::one_of};
///
/// let check = one_of(["a", "b", "c"]);
/// assert!(check(&Value::from("b")).is_ok());
/// assert!(check(&Value::from("z")).is_err());
/// ```
pub fn one_of<I, V>(values: I) -> impl Fn(&Value) -> Result<(), BoxError> + Send + Sync + 'static
where
    I: IntoIterator<Item = V>,
    V: Into<Value>,
{
    let allowed: Vec<Value> = values.into_iter().map(Into::into).collect();
    move |value: &Value| {
        if allowed.contains(value) {
            return Ok(());
        }
        Err(format!("must be one of: {}", describe(&allowed)).into())
    }
}

fn describe(values: &[Value]) -> String {
    values
        .iter()
        .map(|v| match v {
            Value::Str(s) => s.clone(),
            Value::Bool(b) => b.to_string(),
            Value::Int(i) => i.to_string(),
            Value::Duration(d) => humantime::format_duration(*d).to_string(),
            other => format!("<{}>", other.kind()),
        })
        .collect::<Vec<_>>()
        .join(", ")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_one_of_message_lists_choices() {
        let check = one_of(["type1", "type2"]);
        let err = check(&Value::from("type123")).unwrap_err();
        assert_eq!(err.to_string(), "must be one of: type1, type2");
    }

    #[test]
    fn test_one_of_compares_typed_values() {
        let check = one_of([1i64, 2, 3]);
        assert!(check(&Value::Int(2)).is_ok());
        assert!(check(&Value::from("2")).is_err());
    }

    #[test]
    fn test_empty_one_of_rejects_everything() {
        let check = one_of(Vec::<Value>::new());
        assert!(check(&Value::Bool(true)).is_err());
    }
}
