//! REPL configuration.

/// Configuration for a [`Repl`](crate::Repl).
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ReplConfig {
    /// Prompt shown before each line.
    pub prompt: String,

    /// Optional leading character stripped from input, as in `/say hi`.
    pub prefix: Option<char>,

    /// Print the welcome banner on start.
    pub show_banner: bool,

    /// Characters of input shown before the error marker in diagnostics.
    pub context_width: usize,
}

impl Default for ReplConfig {
    fn default() -> Self {
        Self {
            prompt: "> ".to_string(),
            prefix: Some('/'),
            show_banner: true,
            context_width: 10,
        }
    }
}

impl ReplConfig {
    /// Creates a configuration for scripted use: no banner, no prompt.
    #[must_use]
    pub fn batch() -> Self {
        Self {
            prompt: String::new(),
            show_banner: false,
            ..Self::default()
        }
    }

    /// Builder method to set the prompt.
    #[must_use]
    pub fn with_prompt(mut self, prompt: impl Into<String>) -> Self {
        self.prompt = prompt.into();
        self
    }

    /// Builder method to set or clear the command prefix.
    #[must_use]
    pub const fn with_prefix(mut self, prefix: Option<char>) -> Self {
        self.prefix = prefix;
        self
    }

    /// Builder method to enable or disable the banner.
    #[must_use]
    pub const fn with_banner(mut self, show: bool) -> Self {
        self.show_banner = show;
        self
    }

    /// Builder method to set the diagnostic context width.
    #[must_use]
    pub const fn with_context_width(mut self, width: usize) -> Self {
        self.context_width = width;
        self
    }
}
