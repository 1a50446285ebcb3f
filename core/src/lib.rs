//! Command-line argument parsing engine.
//!
//! This crate turns a flat list of argument tokens into named flag values
//! plus leftover positional tokens:
//!
//! - [`Flag`] — a named option with its own parsing, validation, combination
//!   and defaulting behaviour.
//! - [`Command`] — a node of the command tree owning a flag registry and
//!   nested subcommands.
//! - [`Context`] — owns the tree and holds the result of the latest
//!   [`parse`](Context::parse).
//! - [`Value`] — the typed value stored for each flag.
//!
//! Constructors for the usual flag kinds live in [`flags`]; reusable hooks in
//! [`parsers`] and [`validate`]. Absent flags fall back to environment
//! variables read through an [`Environment`], then to their static default.
//!
//! # Example
//!
//! ```
//! use std::collections::HashMap;
//!
//! use argtree_core::*;
//!
//! let serve = Command::new("serve")
//!     .with_flags([
//!         flags::int_flag("port", &["-p", "--port"]).with_env("PORT").with_default(8080i64),
//!         flags::string_list_flag("tag", &["-t", "--tag"]),
//!     ])
//!     .unwrap();
//! let root = Command::new("app")
//!     .with_flags([flags::bool_flag("verbose", &["-v", "--verbose"])])
//!     .unwrap()
//!     .with_subcommand(serve);
//!
//! let env = HashMap::from([("PORT".to_string(), "9000".to_string())]);
//! let mut ctx = Context::with_env(root, env);
//! ctx.parse(["-v", "serve", "-t", "a", "-t", "b", "site"]).unwrap();
//!
//! assert_eq!(ctx.path(), ["app", "serve"]);
//! assert_eq!(ctx.get_bool("verbose"), Some(true));
//! assert_eq!(ctx.get_int("port"), Some(9000));
//! assert_eq!(ctx.get_str_list("tag"), Some(vec!["a", "b"]));
//! assert_eq!(ctx.positional(), ["site"]);
//! ```

mod command;
mod context;
mod engine;
mod env;
mod error;
mod flag;
mod value;

pub mod flags;
pub mod parsers;
pub mod validate;

pub use command::Command;
pub use context::Context;
pub use engine::TERMINATOR;
pub use env::{Environment, ProcessEnv};
pub use error::{BoxError, Error, Result};
pub use flag::{Combiner, Consumption, Flag, MultiParser, Parser, Validator};
pub use value::Value;
