//! Flag definitions.
//!
//! A [`Flag`] bundles everything the engine needs to know about one named
//! option: which tokens select it, how its argument is consumed and parsed,
//! how occurrences are validated and merged, and where a value comes from when
//! the option is absent.

use std::fmt;
use std::sync::Arc;

use crate::error::BoxError;
use crate::value::Value;

/// Converts one raw argument into a value.
///
/// Report syntactic problems here (e.g. a number containing letters); use a
/// [`Validator`] for semantic ones.
pub type Parser = Arc<dyn Fn(&str) -> Result<Value, BoxError> + Send + Sync>;

/// Consumes any number of the remaining tokens and reports how many it used.
pub type MultiParser = Arc<dyn Fn(&[String]) -> Result<(Value, usize), BoxError> + Send + Sync>;

/// Checks that a value satisfies some restriction.
pub type Validator = Arc<dyn Fn(&Value) -> Result<(), BoxError> + Send + Sync>;

/// Merges a new occurrence into the previously stored value, if there is one.
pub type Combiner = Arc<dyn Fn(Option<Value>, Value) -> Value + Send + Sync>;

/// How the engine consumes the tokens following a matched option.
#[derive(Clone, Copy)]
pub enum Consumption<'a> {
    /// The multi-token parser decides how many tokens it takes.
    Many(&'a MultiParser),
    /// Exactly one token, converted by the parser.
    Single(&'a Parser),
    /// Exactly one token, stored as a string.
    Verbatim,
}

/// A named command-line flag.
///
/// # Examples
///
/// ```
/// use argtree_core::{Flag, Value};
///
/// let level = Flag::new("level", &["-l", "--level"])
///     .with_parser(|raw| Ok(Value::Int(raw.parse()?)))
///     .with_default(1i64)
///     .with_env("APP_LEVEL, LEVEL");
///
/// assert_eq!(level.name(), "level");
/// assert_eq!(level.options(), ["-l", "--level"]);
/// assert_eq!(level.env_keys(), ["APP_LEVEL", "LEVEL"]);
/// assert_eq!(level.default_value(), Some(&Value::Int(1)));
/// ```
#[derive(Clone)]
pub struct Flag {
    name: String,
    options: Vec<String>,
    default: Option<Value>,
    env_keys: Vec<String>,
    parser: Option<Parser>,
    multi_parser: Option<MultiParser>,
    validator: Option<Validator>,
    post_validator: Option<Validator>,
    combiner: Option<Combiner>,
    required: bool,
}

impl Flag {
    /// Creates a flag stored under `name` and selected by any of `options`.
    ///
    /// Without a parser the flag takes the next token verbatim.
    pub fn new(name: &str, options: &[&str]) -> Self {
        Self {
            name: name.to_string(),
            options: options.iter().map(|o| o.to_string()).collect(),
            default: None,
            env_keys: Vec::new(),
            parser: None,
            multi_parser: None,
            validator: None,
            post_validator: None,
            combiner: None,
            required: false,
        }
    }

    /// Sets the parser converting one token (or an environment value) into
    /// a [`Value`].
    pub fn with_parser<F>(mut self, parser: F) -> Self
    where
        F: Fn(&str) -> Result<Value, BoxError> + Send + Sync + 'static,
    {
        self.parser = Some(Arc::new(parser));
        self
    }

    /// Sets a multi-token parser. It takes precedence over the single-token
    /// parser on the command line; the single-token parser is still used for
    /// environment values.
    ///
    /// Multi-token parsers see every remaining token, so they must take care
    /// not to swallow the options that follow.
    pub fn with_multi_parser<F>(mut self, parser: F) -> Self
    where
        F: Fn(&[String]) -> Result<(Value, usize), BoxError> + Send + Sync + 'static,
    {
        self.multi_parser = Some(Arc::new(parser));
        self
    }

    /// Sets a validator run on the value of every occurrence.
    pub fn with_validator<F>(mut self, validator: F) -> Self
    where
        F: Fn(&Value) -> Result<(), BoxError> + Send + Sync + 'static,
    {
        self.validator = Some(Arc::new(validator));
        self
    }

    /// Sets a validator run once on the final value, after defaults apply.
    pub fn with_post_validator<F>(mut self, validator: F) -> Self
    where
        F: Fn(&Value) -> Result<(), BoxError> + Send + Sync + 'static,
    {
        self.post_validator = Some(Arc::new(validator));
        self
    }

    /// Sets how a repeated occurrence merges with the stored value. The
    /// combiner gets `None` for the first occurrence. Without one, the last
    /// occurrence wins.
    pub fn with_combiner<F>(mut self, combiner: F) -> Self
    where
        F: Fn(Option<Value>, Value) -> Value + Send + Sync + 'static,
    {
        self.combiner = Some(Arc::new(combiner));
        self
    }

    /// Value used when neither the command line nor the environment set
    /// the flag.
    pub fn with_default(mut self, value: impl Into<Value>) -> Self {
        self.default = Some(value.into());
        self
    }

    /// Appends environment variable names taken from a comma-separated list.
    ///
    /// Environment values take precedence over the default and lose to the
    /// command line. Names are trimmed; empty names are ignored.
    pub fn with_env(mut self, keys: &str) -> Self {
        self.env_keys.extend(
            keys.split(',')
                .map(str::trim)
                .filter(|k| !k.is_empty())
                .map(String::from),
        );
        self
    }

    pub fn with_env_keys(mut self, keys: &[&str]) -> Self {
        for key in keys {
            self = self.with_env(key);
        }
        self
    }

    /// Marks the flag as required: parsing fails if it ends up without value.
    pub fn required(mut self) -> Self {
        self.required = true;
        self
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn options(&self) -> &[String] {
        &self.options
    }

    pub fn default_value(&self) -> Option<&Value> {
        self.default.as_ref()
    }

    pub fn env_keys(&self) -> &[String] {
        &self.env_keys
    }

    pub fn is_required(&self) -> bool {
        self.required
    }

    pub fn parser(&self) -> Option<&Parser> {
        self.parser.as_ref()
    }

    pub fn validator(&self) -> Option<&Validator> {
        self.validator.as_ref()
    }

    pub fn post_validator(&self) -> Option<&Validator> {
        self.post_validator.as_ref()
    }

    pub fn combiner(&self) -> Option<&Combiner> {
        self.combiner.as_ref()
    }

    /// Returns how the engine consumes tokens after one of the options.
    pub fn consumption(&self) -> Consumption<'_> {
        match (&self.multi_parser, &self.parser) {
            (Some(many), _) => Consumption::Many(many),
            (None, Some(single)) => Consumption::Single(single),
            (None, None) => Consumption::Verbatim,
        }
    }

    /// Merges `value` into `previous` using the combiner, or replaces it.
    pub(crate) fn merge(&self, previous: Option<Value>, value: Value) -> Value {
        match &self.combiner {
            Some(combine) => combine(previous, value),
            None => value,
        }
    }
}

impl fmt::Debug for Flag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Flag")
            .field("name", &self.name)
            .field("options", &self.options)
            .field("default", &self.default)
            .field("env_keys", &self.env_keys)
            .field("parser", &self.parser.is_some())
            .field("multi_parser", &self.multi_parser.is_some())
            .field("validator", &self.validator.is_some())
            .field("post_validator", &self.post_validator.is_some())
            .field("combiner", &self.combiner.is_some())
            .field("required", &self.required)
            .finish()
    }
}
