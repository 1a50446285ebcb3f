//! Constructors for common flag kinds.
//!
//! Each constructor returns a plain [`Flag`] that can be refined further with
//! the builder methods (defaults, environment keys, validators).

use crate::flag::Flag;
use crate::parsers::{constant, parse_bool, parse_duration, parse_int};
use crate::value::Value;

/// Switch that needs no argument: `true` when present, `false` by default.
///
/// An environment value is parsed as a boolean (`true`, `0`, `no`, ...).
pub fn bool_flag(name: &str, options: &[&str]) -> Flag {
    Flag::new(name, options)
        .with_multi_parser(constant(true))
        .with_parser(parse_bool)
        .with_default(false)
}

/// Like [`bool_flag`] but `true` by default; presence sets it to `false`.
pub fn bool_flag_true(name: &str, options: &[&str]) -> Flag {
    Flag::new(name, options)
        .with_multi_parser(constant(false))
        .with_parser(parse_bool)
        .with_default(true)
}

/// Flag whose argument is parsed as a base-10 `i64`.
pub fn int_flag(name: &str, options: &[&str]) -> Flag {
    Flag::new(name, options).with_parser(parse_int)
}

/// Flag whose argument is a duration expression such as `2m2s`.
pub fn duration_flag(name: &str, options: &[&str]) -> Flag {
    Flag::new(name, options).with_parser(parse_duration)
}

/// Flag that stores its argument verbatim.
pub fn string_flag(name: &str, options: &[&str]) -> Flag {
    Flag::new(name, options)
}

/// String flag that may be repeated; values accumulate in occurrence order.
///
/// Only command-line occurrences build a [`Value::List`]. A value taken from
/// the environment has no parser to go through and is stored as a plain
/// [`Value::Str`], so read such flags with [`Context::get`](crate::Context::get)
/// when an environment key is configured.
///
/// # Examples
///
/// ```
/// use argtree_core::{Command, Context, flags::string_list_flag};
///
/// let root = Command::new("main")
///     .with_flags([string_list_flag("multi", &["-m", "--multi"])])
///     .unwrap();
/// let mut ctx = Context::new(root);
/// ctx.parse(["-m", "a", "--multi", "b", "-m", "c"]).unwrap();
/// assert_eq!(ctx.get_str_list("multi"), Some(vec!["a", "b", "c"]));
/// ```
pub fn string_list_flag(name: &str, options: &[&str]) -> Flag {
    Flag::new(name, options).with_combiner(append)
}

fn append(previous: Option<Value>, value: Value) -> Value {
    match previous {
        Some(Value::List(mut items)) => {
            items.push(value);
            Value::List(items)
        }
        Some(other) => Value::List(vec![other, value]),
        None => Value::List(vec![value]),
    }
}
