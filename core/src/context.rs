//! Parse results rooted at a command tree.

use std::collections::BTreeMap;
use std::fmt;
use std::time::Duration;

use crate::command::Command;
use crate::engine::{self, Outputs};
use crate::env::{Environment, ProcessEnv};
use crate::error::Result;
use crate::value::Value;

/// Owns a command tree and holds the result of the latest parse.
///
/// Each call to [`parse`](Self::parse) starts from scratch: named values,
/// positional arguments and the command path of earlier calls are discarded.
/// A failed parse leaves whatever was assigned before the failure; call
/// `parse` again before relying on the results.
///
/// # Examples
///
/// ```
/// use argtree_core::{Command, Context, flags};
///
/// let root = Command::new("main")
///     .with_flags([
///         flags::string_flag("name", &["-n", "--name"]),
///         flags::bool_flag("confirm", &["--yes-i-am-really-sure"]),
///     ])
///     .unwrap();
/// let mut ctx = Context::new(root);
///
/// ctx.parse(["-n", "demo", "file.txt"]).unwrap();
/// assert_eq!(ctx.get_str("name"), Some("demo"));
/// assert_eq!(ctx.get_bool("confirm"), Some(false));
/// assert_eq!(ctx.positional(), ["file.txt"]);
/// ```
pub struct Context {
    root: Command,
    env: Box<dyn Environment>,
    named: BTreeMap<String, Value>,
    positional: Vec<String>,
    path: Vec<String>,
}

impl Context {
    /// Creates a context that reads fallbacks from the process environment.
    pub fn new(root: Command) -> Self {
        Self::with_env(root, ProcessEnv)
    }

    /// Creates a context that reads fallbacks from `env`.
    pub fn with_env(root: Command, env: impl Environment + 'static) -> Self {
        Self {
            root,
            env: Box::new(env),
            named: BTreeMap::new(),
            positional: Vec::new(),
            path: Vec::new(),
        }
    }

    /// Replaces the environment used by later parses.
    pub fn set_env(&mut self, env: impl Environment + 'static) {
        self.env = Box::new(env);
    }

    pub fn root(&self) -> &Command {
        &self.root
    }

    /// Mutable access to the root command, e.g. to register more flags.
    pub fn root_mut(&mut self) -> &mut Command {
        &mut self.root
    }

    /// Parses `args` against the command tree.
    ///
    /// Runs the token scan, then fills absent flags of the reached command
    /// from the environment and defaults, then runs its post-validators.
    ///
    /// # Errors
    ///
    /// Stops at the first failure: unknown option, missing argument, parser
    /// or validator rejection, or a required flag left without value.
    pub fn parse<I, S>(&mut self, args: I) -> Result<()>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let args: Vec<String> = args.into_iter().map(Into::into).collect();
        self.named.clear();
        self.positional.clear();
        self.path.clear();

        let reached = engine::scan(
            &self.root,
            &args,
            Outputs {
                named: &mut self.named,
                positional: &mut self.positional,
                path: &mut self.path,
            },
        )?;
        engine::resolve_defaults(reached, self.env.as_ref(), &mut self.named)?;
        engine::post_validate(reached, &self.named)
    }

    /// All named values, keyed by flag name.
    pub fn named(&self) -> &BTreeMap<String, Value> {
        &self.named
    }

    /// Tokens left over after option scanning stopped.
    pub fn positional(&self) -> &[String] {
        &self.positional
    }

    /// Names of the commands traversed by the latest parse, root first.
    pub fn path(&self) -> &[String] {
        &self.path
    }

    /// The deepest command reached by the latest parse.
    pub fn reached(&self) -> &Command {
        self.path
            .iter()
            .skip(1)
            .try_fold(&self.root, |cmd, name| cmd.find_subcommand(name))
            .unwrap_or(&self.root)
    }

    pub fn get(&self, name: &str) -> Option<&Value> {
        self.named.get(name)
    }

    pub fn get_bool(&self, name: &str) -> Option<bool> {
        self.get(name)?.as_bool()
    }

    pub fn get_int(&self, name: &str) -> Option<i64> {
        self.get(name)?.as_int()
    }

    pub fn get_duration(&self, name: &str) -> Option<Duration> {
        self.get(name)?.as_duration()
    }

    pub fn get_str(&self, name: &str) -> Option<&str> {
        self.get(name)?.as_str()
    }

    pub fn get_str_list(&self, name: &str) -> Option<Vec<&str>> {
        self.get(name)?.as_str_list()
    }
}

impl fmt::Debug for Context {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Context")
            .field("root", &self.root.name())
            .field("named", &self.named)
            .field("positional", &self.positional)
            .field("path", &self.path)
            .finish_non_exhaustive()
    }
}
