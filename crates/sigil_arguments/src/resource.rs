//! Namespaced identifiers such as `minecraft:pig`.

use std::fmt;
use std::str::FromStr;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};
use sigil_dispatch::{ArgumentSuggestions, ArgumentType, CommandContext};
use sigil_foundation::{CommandResult, SimpleErrorType, StringReader};

/// The identifier is malformed.
pub static ID_INVALID: SimpleErrorType = SimpleErrorType::new("argument.id.invalid", "Invalid ID");

/// Namespace assumed when none is written.
pub const DEFAULT_NAMESPACE: &str = "minecraft";

/// A `namespace:path` identifier.
///
/// Namespaces allow `[a-z0-9_.-]`, paths additionally allow `/`. A missing
/// namespace means [`DEFAULT_NAMESPACE`].
#[derive(Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct ResourceLocation {
    namespace: String,
    path: String,
}

impl ResourceLocation {
    /// Creates an identifier from its parts.
    ///
    /// # Errors
    ///
    /// Returns [`ID_INVALID`] if either part contains a disallowed character.
    pub fn new(namespace: &str, path: &str) -> CommandResult<Self> {
        if namespace.chars().all(is_valid_namespace_char) && path.chars().all(is_valid_path_char) {
            Ok(Self {
                namespace: namespace.to_string(),
                path: path.to_string(),
            })
        } else {
            Err(ID_INVALID.create())
        }
    }

    /// Creates an identifier in the default namespace.
    ///
    /// # Errors
    ///
    /// Returns [`ID_INVALID`] if the path contains a disallowed character.
    pub fn with_default_namespace(path: &str) -> CommandResult<Self> {
        Self::new(DEFAULT_NAMESPACE, path)
    }

    /// Builds an id in the default namespace from a path known to be valid.
    pub(crate) fn minecraft(path: &str) -> Self {
        Self {
            namespace: DEFAULT_NAMESPACE.to_string(),
            path: path.to_string(),
        }
    }

    /// Reads an identifier token.
    ///
    /// # Errors
    ///
    /// Returns [`ID_INVALID`] with the cursor reset to the token start.
    pub fn read(reader: &mut StringReader) -> CommandResult<Self> {
        let start = reader.cursor();
        while reader.peek().is_some_and(is_allowed_in_resource_location) {
            reader.skip();
        }
        let token = reader.substring(start, reader.cursor()).to_string();
        token.parse().map_err(|_| {
            reader.set_cursor(start);
            ID_INVALID.create_with_context(reader)
        })
    }

    /// Returns the namespace.
    #[must_use]
    pub fn namespace(&self) -> &str {
        &self.namespace
    }

    /// Returns the path.
    #[must_use]
    pub fn path(&self) -> &str {
        &self.path
    }
}

impl FromStr for ResourceLocation {
    type Err = sigil_foundation::CommandSyntaxError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.split_once(':') {
            Some(("", path)) => Self::new(DEFAULT_NAMESPACE, path),
            Some((namespace, path)) => Self::new(namespace, path),
            None => Self::new(DEFAULT_NAMESPACE, s),
        }
    }
}

impl fmt::Display for ResourceLocation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.namespace, self.path)
    }
}

/// Returns true for characters that may appear anywhere in an identifier token.
#[must_use]
pub const fn is_allowed_in_resource_location(c: char) -> bool {
    matches!(c, '0'..='9' | 'a'..='z' | '_' | ':' | '/' | '.' | '-')
}

const fn is_valid_namespace_char(c: char) -> bool {
    matches!(c, '0'..='9' | 'a'..='z' | '_' | '.' | '-')
}

const fn is_valid_path_char(c: char) -> bool {
    matches!(c, '0'..='9' | 'a'..='z' | '_' | '.' | '-' | '/')
}

/// Parses a [`ResourceLocation`].
#[derive(Clone, Copy, Debug, Default)]
pub struct ResourceLocationArgument;

/// Creates an identifier argument.
#[must_use]
pub fn id() -> ResourceLocationArgument {
    ResourceLocationArgument
}

impl ResourceLocationArgument {
    /// Returns the identifier parsed for `name`.
    ///
    /// # Errors
    ///
    /// Fails if the argument is missing or has another type.
    pub fn get_id<S>(context: &CommandContext<S>, name: &str) -> CommandResult<ResourceLocation> {
        context.get_argument(name)
    }
}

impl ArgumentType for ResourceLocationArgument {
    type Value = ResourceLocation;

    fn parse(&self, reader: &mut StringReader) -> CommandResult<ResourceLocation> {
        ResourceLocation::read(reader)
    }

    fn examples(&self) -> Vec<String> {
        vec!["foo".into(), "foo:bar".into(), "012".into()]
    }
}

impl<S> ArgumentSuggestions<S> for ResourceLocationArgument {}
