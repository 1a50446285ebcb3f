//! Commands and their flag registries.
//!
//! Each [`Command`] owns its flags and a lookup table from option string to
//! flag name. Uniqueness is enforced per command only: a subcommand may reuse
//! an option string or a flag name that its parent already declares.
//!
//! Parse results are keyed by flag name in a single map shared by every
//! command along the traversed path. A child flag reusing a parent's name
//! therefore sees the parent's value: its combiner merges onto it, and its
//! default does not apply when the parent already set one.

use std::collections::HashMap;

use crate::error::{Error, Result};
use crate::flag::Flag;

/// A node in the command tree.
///
/// # Examples
///
/// ```
/// use argtree_core::{Command, flags};
///
/// let run = Command::new("run")
///     .with_flags([flags::int_flag("port", &["-p", "--port"])])
///     .unwrap();
/// let mut root = Command::new("app")
///     .with_help("Example application")
///     .with_subcommand(run);
/// root.add_flags([flags::bool_flag("verbose", &["-v", "--verbose"])]).unwrap();
///
/// assert_eq!(root.flag_for_option("-v").unwrap().name(), "verbose");
/// assert!(root.find_subcommand("run").is_some());
/// assert!(root.add_flag(flags::string_flag("other", &["--verbose"])).is_err());
/// ```
#[derive(Debug, Clone, Default)]
pub struct Command {
    name: String,
    help: String,
    subcommands: Vec<Command>,
    flags: HashMap<String, Flag>,
    option_index: HashMap<String, String>,
}

impl Command {
    /// Creates an empty command matched by the token `name`.
    pub fn new(name: &str) -> Self {
        Self {
            name: name.to_string(),
            ..Default::default()
        }
    }

    /// Sets the description returned by [`help`](Self::help).
    pub fn with_help(mut self, help: &str) -> Self {
        self.help = help.to_string();
        self
    }

    /// Adds a nested subcommand.
    pub fn with_subcommand(mut self, sub: Command) -> Self {
        self.subcommands.push(sub);
        self
    }

    /// Builder form of [`add_flags`](Self::add_flags).
    pub fn with_flags(mut self, flags: impl IntoIterator<Item = Flag>) -> Result<Self> {
        self.add_flags(flags)?;
        Ok(self)
    }

    /// Registers flags left to right.
    ///
    /// # Errors
    ///
    /// Returns [`DuplicateFlagName`](Error::DuplicateFlagName) if a flag with
    /// the same name exists, or [`DuplicateOption`](Error::DuplicateOption) if
    /// one of its options already belongs to another flag. A rejected flag is
    /// not registered at all; flags before it in the same call stay
    /// registered.
    pub fn add_flags(&mut self, flags: impl IntoIterator<Item = Flag>) -> Result<()> {
        for flag in flags {
            self.add_flag(flag)?;
        }
        Ok(())
    }

    pub fn add_flag(&mut self, flag: Flag) -> Result<()> {
        if self.flags.contains_key(flag.name()) {
            return Err(Error::DuplicateFlagName(flag.name().to_string()));
        }
        for option in flag.options() {
            if let Some(owner) = self.option_index.get(option) {
                return Err(Error::DuplicateOption {
                    option: option.clone(),
                    flag: owner.clone(),
                });
            }
        }

        for option in flag.options() {
            self.option_index
                .insert(option.clone(), flag.name().to_string());
        }
        self.flags.insert(flag.name().to_string(), flag);
        Ok(())
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn help(&self) -> &str {
        &self.help
    }

    pub fn subcommands(&self) -> &[Command] {
        &self.subcommands
    }

    /// Finds a direct subcommand by exact name.
    pub fn find_subcommand(&self, name: &str) -> Option<&Command> {
        self.subcommands.iter().find(|s| s.name == name)
    }

    /// Mutable access to a direct subcommand, e.g. to register flags on it
    /// after the tree has been assembled.
    pub fn subcommand_mut(&mut self, name: &str) -> Option<&mut Command> {
        self.subcommands.iter_mut().find(|s| s.name == name)
    }

    pub fn flag(&self, name: &str) -> Option<&Flag> {
        self.flags.get(name)
    }

    /// Finds the flag selected by an option string.
    pub fn flag_for_option(&self, option: &str) -> Option<&Flag> {
        self.option_index
            .get(option)
            .and_then(|name| self.flags.get(name))
    }

    /// Iterates over this command's flags in no particular order.
    pub fn flags(&self) -> impl Iterator<Item = &Flag> {
        self.flags.values()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::flags::{bool_flag, int_flag, string_flag};

    #[test]
    fn test_distinct_flags_register() {
        let mut cmd = Command::new("main");
        cmd.add_flags([
            bool_flag("enable", &["-e", "--enable"]),
            string_flag("type", &["-t", "--type"]),
        ])
        .unwrap();

        assert_eq!(cmd.flags().count(), 2);
        assert_eq!(cmd.flag_for_option("--type").unwrap().name(), "type");
        assert!(cmd.flag_for_option("-x").is_none());
    }

    #[test]
    fn test_duplicate_name_rejected() {
        let mut cmd = Command::new("main");
        cmd.add_flag(bool_flag("enable", &["-e"])).unwrap();

        let err = cmd.add_flag(int_flag("enable", &["-i"])).unwrap_err();
        assert!(matches!(err, Error::DuplicateFlagName(name) if name == "enable"));
        assert!(cmd.flag_for_option("-i").is_none());
    }

    #[test]
    fn test_duplicate_option_rejected_without_partial_registration() {
        let mut cmd = Command::new("main");
        cmd.add_flag(string_flag("type", &["-t", "--type"])).unwrap();

        let err = cmd
            .add_flag(int_flag("time", &["--time", "-t"]))
            .unwrap_err();
        assert!(matches!(
            err,
            Error::DuplicateOption { ref option, ref flag } if option == "-t" && flag == "type"
        ));
        assert!(cmd.flag("time").is_none());
        assert!(cmd.flag_for_option("--time").is_none());
    }

    #[test]
    fn test_earlier_flags_in_call_stay_registered() {
        let mut cmd = Command::new("main");
        let result = cmd.add_flags([
            string_flag("a", &["-a"]),
            string_flag("b", &["-a"]),
            string_flag("c", &["-c"]),
        ]);

        assert!(result.is_err());
        assert!(cmd.flag("a").is_some());
        assert!(cmd.flag("c").is_none());
    }

    #[test]
    fn test_child_may_reuse_parent_options() {
        let child = Command::new("run")
            .with_flags([string_flag("verbose", &["-v"])])
            .unwrap();
        let mut root = Command::new("main").with_subcommand(child);
        root.add_flag(bool_flag("verbose", &["-v"])).unwrap();

        let child = root.subcommand_mut("run").unwrap();
        child.add_flag(int_flag("count", &["-c"])).unwrap();
        assert_eq!(root.find_subcommand("run").unwrap().flags().count(), 2);
    }
}
