//! Reusable parser hooks.
//!
//! These are the building blocks of the constructors in
//! [`flags`](crate::flags) and can be attached to custom flags as well.

use crate::error::BoxError;
use crate::value::Value;

/// Multi-token parser that consumes nothing and yields `value`.
///
/// Used for switches whose presence alone carries the value.
///
/// # Examples
///
/// ```
/// use argtree_core::{Value, parsers};
///
/// let on = parsers::constant(true);
/// assert_eq!(on(&["next".to_string()]).unwrap(), (Value::Bool(true), 0));
/// ```
pub fn constant(
    value: impl Into<Value>,
) -> impl Fn(&[String]) -> Result<(Value, usize), BoxError> + Send + Sync + 'static {
    let value = value.into();
    move |_: &[String]| Ok((value.clone(), 0))
}

/// Parses `true`/`false` (also `1`/`0`, `yes`/`no`, `on`/`off`, any case).
pub fn parse_bool(raw: &str) -> Result<Value, BoxError> {
    match raw.trim().to_ascii_lowercase().as_str() {
        "true" | "1" | "yes" | "on" => Ok(Value::Bool(true)),
        "false" | "0" | "no" | "off" => Ok(Value::Bool(false)),
        _ => Err(format!("expected a boolean, got '{raw}'").into()),
    }
}

/// Parses a base-10 signed 64-bit integer.
pub fn parse_int(raw: &str) -> Result<Value, BoxError> {
    Ok(Value::Int(raw.parse::<i64>()?))
}

/// Parses a duration expression such as `2m2s`, `150ms` or `1h 30m`.
pub fn parse_duration(raw: &str) -> Result<Value, BoxError> {
    Ok(Value::Duration(humantime::parse_duration(raw)?))
}
