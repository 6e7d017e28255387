//! Dispatcher configuration.

/// Configuration for a [`CommandDispatcher`](crate::CommandDispatcher).
///
/// Controls the token separator, the delimiters used when rendering usage
/// strings, and whether ambiguities are logged as commands are registered.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct DispatcherConfig {
    /// Character separating one node's token from the next.
    pub argument_separator: char,

    /// Opens an optional usage group.
    pub optional_open: String,

    /// Closes an optional usage group.
    pub optional_close: String,

    /// Opens a required usage group.
    pub required_open: String,

    /// Closes a required usage group.
    pub required_close: String,

    /// Separates alternatives inside a usage group.
    pub usage_or: String,

    /// Usage shown for a redirect back to the root.
    pub root_redirect_usage: String,

    /// Prefix shown before the target of any other redirect.
    pub redirect_prefix: String,

    /// Log sibling ambiguities after every registration.
    pub check_ambiguities: bool,
}

impl Default for DispatcherConfig {
    fn default() -> Self {
        Self {
            argument_separator: ' ',
            optional_open: "[".to_string(),
            optional_close: "]".to_string(),
            required_open: "(".to_string(),
            required_close: ")".to_string(),
            usage_or: "|".to_string(),
            root_redirect_usage: "...".to_string(),
            redirect_prefix: "->".to_string(),
            check_ambiguities: false,
        }
    }
}

impl DispatcherConfig {
    /// Creates a configuration for development: ambiguities are logged on
    /// every registration.
    #[must_use]
    pub fn development() -> Self {
        Self {
            check_ambiguities: true,
            ..Self::default()
        }
    }

    /// Builder method to set the argument separator.
    #[must_use]
    pub fn with_argument_separator(mut self, separator: char) -> Self {
        self.argument_separator = separator;
        self
    }

    /// Builder method to set the optional group delimiters.
    #[must_use]
    pub fn with_optional_delimiters(
        mut self,
        open: impl Into<String>,
        close: impl Into<String>,
    ) -> Self {
        self.optional_open = open.into();
        self.optional_close = close.into();
        self
    }

    /// Builder method to set the required group delimiters.
    #[must_use]
    pub fn with_required_delimiters(
        mut self,
        open: impl Into<String>,
        close: impl Into<String>,
    ) -> Self {
        self.required_open = open.into();
        self.required_close = close.into();
        self
    }

    /// Builder method to set the alternative separator.
    #[must_use]
    pub fn with_usage_or(mut self, or: impl Into<String>) -> Self {
        self.usage_or = or.into();
        self
    }

    /// Builder method to set the root redirect marker.
    #[must_use]
    pub fn with_root_redirect_usage(mut self, usage: impl Into<String>) -> Self {
        self.root_redirect_usage = usage.into();
        self
    }

    /// Builder method to set the redirect prefix.
    #[must_use]
    pub fn with_redirect_prefix(mut self, prefix: impl Into<String>) -> Self {
        self.redirect_prefix = prefix.into();
        self
    }

    /// Builder method to enable/disable ambiguity logging.
    #[must_use]
    pub fn with_check_ambiguities(mut self, check: bool) -> Self {
        self.check_ambiguities = check;
        self
    }
}
