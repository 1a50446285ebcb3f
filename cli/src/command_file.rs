//! YAML command files.
//!
//! Describes a command tree declaratively so the `argtree` binary can be
//! pointed at arbitrary flag layouts without recompiling.
//!
//! # Example YAML
//!
//! ```yaml
//! name: deploy
//! help: Deploy a service
//! flags:
//!   - name: count
//!     kind: int
//!     options: ["-c", "--count"]
//!     env: ["DEPLOY_COUNT", "COUNT"]
//!     default: 3
//!   - name: region
//!     options: ["-r", "--region"]
//!     one_of: [eu, us]
//!     required: true
//! subcommands:
//!   - name: rollback
//!     flags:
//!       - name: force
//!         kind: bool
//!         options: ["-f"]
//! ```

use std::path::Path;

use argtree_core::flags::{
    bool_flag, bool_flag_true, duration_flag, int_flag, string_flag, string_list_flag,
};
use argtree_core::parsers::{parse_bool, parse_duration, parse_int};
use argtree_core::validate::one_of;
use argtree_core::{BoxError, Command, Flag, Value};
use serde::Deserialize;
use thiserror::Error;

/// Errors raised while loading a command file.
#[derive(Debug, Error)]
pub enum CommandFileError {
    /// File I/O failure.
    #[error("I/O error: {0}")]
    IoError(#[from] std::io::Error),

    /// YAML parsing failure.
    #[error("YAML error: {0}")]
    YamlError(#[from] serde_yaml::Error),

    /// A default or allowed value does not fit the flag kind.
    #[error("invalid value {value:?} for flag '{flag}': {source}")]
    InvalidValue {
        flag: String,
        value: String,
        source: BoxError,
    },

    /// Flag registration failed (duplicate name or option).
    #[error(transparent)]
    Registration(#[from] argtree_core::Error),
}

pub type Result<T> = std::result::Result<T, CommandFileError>;

/// Value kind of a declared flag.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum FlagKind {
    /// Switch, `true` when present.
    Bool,
    /// Switch, `false` when present.
    BoolTrue,
    Int,
    Duration,
    #[default]
    String,
    /// Repeatable string flag.
    StringList,
}

impl FlagKind {
    fn flag(self, name: &str, options: &[&str]) -> Flag {
        match self {
            Self::Bool => bool_flag(name, options),
            Self::BoolTrue => bool_flag_true(name, options),
            Self::Int => int_flag(name, options),
            Self::Duration => duration_flag(name, options),
            Self::String => string_flag(name, options),
            Self::StringList => string_list_flag(name, options),
        }
    }

    /// Converts a raw value the way a single occurrence would be converted.
    fn convert(self, raw: &str) -> std::result::Result<Value, BoxError> {
        match self {
            Self::Bool | Self::BoolTrue => parse_bool(raw),
            Self::Int => parse_int(raw),
            Self::Duration => parse_duration(raw),
            Self::String | Self::StringList => Ok(Value::from(raw)),
        }
    }
}

/// A flag declaration.
#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct FlagSpec {
    pub name: String,
    #[serde(default)]
    pub kind: FlagKind,
    pub options: Vec<String>,
    /// Environment variables consulted in order when the flag is absent.
    #[serde(default)]
    pub env: Vec<String>,
    /// Scalar default, or a sequence for `string-list` flags.
    #[serde(default)]
    pub default: Option<serde_yaml::Value>,
    /// Allowed values for every occurrence.
    #[serde(default)]
    pub one_of: Vec<String>,
    #[serde(default)]
    pub required: bool,
}

impl FlagSpec {
    pub fn build(&self) -> Result<Flag> {
        let options: Vec<&str> = self.options.iter().map(String::as_str).collect();
        let env: Vec<&str> = self.env.iter().map(String::as_str).collect();
        let mut flag = self.kind.flag(&self.name, &options).with_env_keys(&env);

        if let Some(default) = &self.default {
            flag = flag.with_default(self.default_value(default)?);
        }
        if !self.one_of.is_empty() {
            let allowed = self
                .one_of
                .iter()
                .map(|raw| self.convert(raw))
                .collect::<Result<Vec<_>>>()?;
            flag = flag.with_validator(one_of(allowed));
        }
        if self.required {
            flag = flag.required();
        }
        Ok(flag)
    }

    fn default_value(&self, raw: &serde_yaml::Value) -> Result<Value> {
        match (self.kind, raw) {
            (FlagKind::StringList, serde_yaml::Value::Sequence(items)) => items
                .iter()
                .map(|item| self.scalar(item).map(Value::from))
                .collect::<Result<Vec<_>>>()
                .map(Value::List),
            (FlagKind::StringList, item) => Ok(Value::List(vec![Value::from(self.scalar(item)?)])),
            (_, item) => self.convert(&self.scalar(item)?),
        }
    }

    fn scalar(&self, raw: &serde_yaml::Value) -> Result<String> {
        match raw {
            serde_yaml::Value::Bool(b) => Ok(b.to_string()),
            serde_yaml::Value::Number(n) => Ok(n.to_string()),
            serde_yaml::Value::String(s) => Ok(s.clone()),
            other => Err(CommandFileError::InvalidValue {
                flag: self.name.clone(),
                value: format!("{other:?}"),
                source: "expected a scalar".into(),
            }),
        }
    }

    fn convert(&self, raw: &str) -> Result<Value> {
        self.kind
            .convert(raw)
            .map_err(|source| CommandFileError::InvalidValue {
                flag: self.name.clone(),
                value: raw.to_string(),
                source,
            })
    }
}

/// A command declaration with nested subcommands.
#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct CommandFile {
    pub name: String,
    #[serde(default)]
    pub help: String,
    #[serde(default)]
    pub flags: Vec<FlagSpec>,
    #[serde(default)]
    pub subcommands: Vec<CommandFile>,
}

impl CommandFile {
    /// Loads a command file from disk.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let raw = std::fs::read_to_string(path)?;
        Self::from_yaml(&raw)
    }

    pub fn from_yaml(raw: &str) -> Result<Self> {
        Ok(serde_yaml::from_str(raw)?)
    }

    /// Builds the command tree, registering every declared flag.
    pub fn build(&self) -> Result<Command> {
        let flags = self
            .flags
            .iter()
            .map(FlagSpec::build)
            .collect::<Result<Vec<_>>>()?;
        let mut command = Command::new(&self.name)
            .with_help(&self.help)
            .with_flags(flags)?;
        for sub in &self.subcommands {
            command = command.with_subcommand(sub.build()?);
        }
        Ok(command)
    }
}
