//! The three passes behind [`Context::parse`](crate::Context::parse).
//!
//! 1. [`scan`] walks the tokens, descending into subcommands and dispatching
//!    options to their flags, and collects the positional leftovers.
//! 2. [`resolve_defaults`] fills flags of the reached command that got no
//!    value from the environment or their static default.
//! 3. [`post_validate`] checks the final values of the reached command's
//!    flags.
//!
//! Every pass writes into the caller's maps as it goes and stops at the first
//! error, leaving earlier assignments in place.

use std::collections::BTreeMap;

use tracing::{debug, trace};

use crate::command::Command;
use crate::env::Environment;
use crate::error::{Error, Result};
use crate::flag::{Consumption, Flag};
use crate::value::Value;

/// Token that ends option scanning; everything after it is positional.
pub const TERMINATOR: &str = "--";

/// Named values collected by a parse, keyed by flag name.
pub(crate) type Named = BTreeMap<String, Value>;

/// Mutable parse state shared by the passes.
pub(crate) struct Outputs<'a> {
    pub named: &'a mut Named,
    pub positional: &'a mut Vec<String>,
    pub path: &'a mut Vec<String>,
}

/// Returns `true` for tokens that must name a registered option.
///
/// A lone `-` conventionally means standard input and is positional.
fn looks_like_option(token: &str) -> bool {
    token.starts_with('-') && token != "-"
}

/// Scans `args` starting at `root` and returns the command that was reached.
///
/// Subcommands are greedy and terminal: once a token names a subcommand, the
/// rest of the tokens belong to it and the parent's options no longer match.
pub(crate) fn scan<'c>(root: &'c Command, args: &[String], out: Outputs<'_>) -> Result<&'c Command> {
    let mut command = root;
    out.path.push(root.name().to_string());

    let mut i = 0;
    while i < args.len() {
        let token = args[i].as_str();

        if let Some(sub) = command.find_subcommand(token) {
            debug!(parent = command.name(), command = sub.name(), "Entering subcommand");
            command = sub;
            out.path.push(sub.name().to_string());
            i += 1;
            continue;
        }

        if token == TERMINATOR {
            i += 1;
            break;
        }

        let Some(flag) = command.flag_for_option(token) else {
            if looks_like_option(token) {
                return Err(Error::UnknownOption(token.to_string()));
            }
            break;
        };

        i += 1;
        let (value, consumed) = consume(flag, token, &args[i..])?;
        i += consumed;

        if let Some(validate) = flag.validator() {
            validate(&value).map_err(|source| Error::ValidateError {
                flag: flag.name().to_string(),
                source,
            })?;
        }

        trace!(
            option = token,
            flag = flag.name(),
            kind = value.kind(),
            consumed,
            "Matched option"
        );
        let previous = out.named.remove(flag.name());
        out.named
            .insert(flag.name().to_string(), flag.merge(previous, value));
    }

    out.positional.extend(args[i..].iter().cloned());
    Ok(command)
}

/// Obtains one occurrence's value and the number of tokens it used from
/// `rest`, the tokens following the option.
fn consume(flag: &Flag, option: &str, rest: &[String]) -> Result<(Value, usize)> {
    let parse_error = |source| Error::ParseError {
        option: option.to_string(),
        source,
    };

    match flag.consumption() {
        Consumption::Many(parse) => {
            let (value, consumed) = parse(rest).map_err(parse_error)?;
            Ok((value, consumed.min(rest.len())))
        }
        Consumption::Single(parse) => {
            let raw = rest
                .first()
                .ok_or_else(|| Error::MissingArgument(option.to_string()))?;
            Ok((parse(raw.as_str()).map_err(parse_error)?, 1))
        }
        Consumption::Verbatim => {
            let raw = rest
                .first()
                .ok_or_else(|| Error::MissingArgument(option.to_string()))?;
            Ok((Value::Str(raw.clone()), 1))
        }
    }
}

/// Fills absent flags of `command` from the environment or their default.
///
/// Environment keys are tried in order; a value the flag's parser rejects is
/// skipped in favour of the next key. Flags without a parser take the first
/// value found verbatim.
///
/// # Errors
///
/// Returns [`MissingRequired`](Error::MissingRequired) when a required flag
/// is still absent afterwards.
pub(crate) fn resolve_defaults(
    command: &Command,
    env: &dyn Environment,
    named: &mut Named,
) -> Result<()> {
    for flag in command.flags() {
        if named.contains_key(flag.name()) {
            continue;
        }
        let value = from_env(flag, env).or_else(|| {
            flag.default_value().cloned().inspect(|_| {
                debug!(flag = flag.name(), "Applying static default");
            })
        });
        if let Some(value) = value {
            named.insert(flag.name().to_string(), value);
        }
    }

    match command
        .flags()
        .find(|f| f.is_required() && !named.contains_key(f.name()))
    {
        Some(flag) => Err(Error::MissingRequired(flag.name().to_string())),
        None => Ok(()),
    }
}

fn from_env(flag: &Flag, env: &dyn Environment) -> Option<Value> {
    for key in flag.env_keys() {
        let Some(raw) = env.var(key) else {
            continue;
        };
        let Some(parse) = flag.parser() else {
            debug!(flag = flag.name(), key = key.as_str(), "Using environment value");
            return Some(Value::Str(raw));
        };
        match parse(raw.as_str()) {
            Ok(value) => {
                debug!(flag = flag.name(), key = key.as_str(), "Using environment value");
                return Some(value);
            }
            Err(err) => {
                debug!(
                    flag = flag.name(),
                    key = key.as_str(),
                    error = %err,
                    "Ignoring unparsable environment value"
                );
            }
        }
    }
    None
}

/// Runs the post-validators of `command` on the final values.
pub(crate) fn post_validate(command: &Command, named: &Named) -> Result<()> {
    for flag in command.flags() {
        let (Some(check), Some(value)) = (flag.post_validator(), named.get(flag.name())) else {
            continue;
        };
        check(value).map_err(|source| Error::PostValidateError {
            flag: flag.name().to_string(),
            source,
        })?;
    }
    Ok(())
}
