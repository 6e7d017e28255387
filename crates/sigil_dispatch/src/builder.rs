//! Fluent construction of command trees.
//!
//! Builders describe a subtree; [`CommandDispatcher::register`] turns the
//! description into arena nodes, merging with whatever is already there.
//!
//! ```
//! use sigil_dispatch::{CommandDispatcher, flag, integer, literal, option};
//!
//! let mut dispatcher = CommandDispatcher::<()>::new();
//! dispatcher.register(
//!     literal("spawn")
//!         .executes(|_| Ok(1))
//!         .then(option("count", integer()).executes(|ctx| {
//!             Ok(ctx.get_option::<i32>("count")?.unwrap_or(1))
//!         }))
//!         .then(flag("quiet").executes(|_| Ok(0))),
//! );
//! assert_eq!(dispatcher.execute_command("spawn --count 4", ()).unwrap(), 4);
//! ```
//!
//! [`CommandDispatcher::register`]: crate::CommandDispatcher::register

use std::fmt;
use std::sync::Arc;

use sigil_foundation::CommandResult;

use crate::arguments::{ArgumentSuggestions, ErasedArgumentType};
use crate::context::CommandContext;
use crate::suggestion::{SuggestionFuture, SuggestionsBuilder};
use crate::tree::{
    ArgumentTarget, Command, NodeId, RedirectModifier, Requirement, SuggestionProvider,
};

/// What kind of node a builder describes.
pub(crate) enum BuilderKind<S> {
    Literal(String),
    Argument {
        name: String,
        arg_type: Arc<dyn ErasedArgumentType<S>>,
        suggestions: Option<SuggestionProvider<S>>,
    },
    /// Expands to a `--name` literal followed by a value node.
    Option {
        name: String,
        arg_type: Arc<dyn ErasedArgumentType<S>>,
        suggestions: Option<SuggestionProvider<S>>,
    },
    /// A `--name` literal that stores `true` under `name`.
    Flag(String),
}

/// Describes a node and its subtree.
pub struct ArgumentBuilder<S> {
    pub(crate) kind: BuilderKind<S>,
    pub(crate) children: Vec<ArgumentBuilder<S>>,
    pub(crate) command: Option<Command<S>>,
    pub(crate) requirement: Requirement<S>,
    pub(crate) target: Option<NodeId>,
    pub(crate) modifier: Option<RedirectModifier<S>>,
    pub(crate) forks: bool,
}

/// Starts a literal node matching `name` exactly.
#[must_use]
pub fn literal<S: 'static>(name: impl Into<String>) -> ArgumentBuilder<S> {
    ArgumentBuilder::new(BuilderKind::Literal(name.into()))
}

/// Starts an argument node storing its value under `name`.
#[must_use]
pub fn argument<S: 'static, T: ArgumentSuggestions<S>>(
    name: impl Into<String>,
    arg_type: T,
) -> ArgumentBuilder<S> {
    ArgumentBuilder::new(BuilderKind::Argument {
        name: name.into(),
        arg_type: Arc::new(arg_type),
        suggestions: None,
    })
}

/// Starts a `--name <value>` option. The value lands in the context's
/// options map; children, handlers and redirects attach to the value node.
#[must_use]
pub fn option<S: 'static, T: ArgumentSuggestions<S>>(
    name: impl Into<String>,
    arg_type: T,
) -> ArgumentBuilder<S> {
    ArgumentBuilder::new(BuilderKind::Option {
        name: name.into(),
        arg_type: Arc::new(arg_type),
        suggestions: None,
    })
}

/// Starts a `--name` flag. Matching it stores `true` under `name` in the
/// context's options map.
#[must_use]
pub fn flag<S: 'static>(name: impl Into<String>) -> ArgumentBuilder<S> {
    ArgumentBuilder::new(BuilderKind::Flag(name.into()))
}

impl<S: 'static> ArgumentBuilder<S> {
    fn new(kind: BuilderKind<S>) -> Self {
        Self {
            kind,
            children: Vec::new(),
            command: None,
            requirement: Arc::new(|_: &S| true),
            target: None,
            modifier: None,
            forks: false,
        }
    }

    /// Adds a child subtree.
    #[must_use]
    pub fn then(mut self, child: ArgumentBuilder<S>) -> Self {
        self.children.push(child);
        self
    }

    /// Sets the handler run when input ends at this node.
    #[must_use]
    pub fn executes<F>(mut self, command: F) -> Self
    where
        F: Fn(&CommandContext<S>) -> CommandResult<i32> + Send + Sync + 'static,
    {
        self.command = Some(Arc::new(command));
        self
    }

    /// Sets the requirement a source must meet to use this node.
    #[must_use]
    pub fn requires<F>(mut self, requirement: F) -> Self
    where
        F: Fn(&S) -> bool + Send + Sync + 'static,
    {
        self.requirement = Arc::new(requirement);
        self
    }

    /// Continues parsing at `target` after this node.
    #[must_use]
    pub fn redirect(self, target: NodeId) -> Self {
        self.forward(target, None, false)
    }

    /// Continues parsing at `target`, running the rest of the command once
    /// for each source `modifier` returns.
    #[must_use]
    pub fn redirect_with<F>(self, target: NodeId, modifier: F) -> Self
    where
        F: Fn(&CommandContext<S>) -> CommandResult<Vec<S>> + Send + Sync + 'static,
    {
        self.forward(target, Some(Arc::new(modifier)), false)
    }

    /// Like [`Self::redirect_with`], but a failure for one source does not
    /// abort the others; `execute` then returns the number of successes.
    #[must_use]
    pub fn fork<F>(self, target: NodeId, modifier: F) -> Self
    where
        F: Fn(&CommandContext<S>) -> CommandResult<Vec<S>> + Send + Sync + 'static,
    {
        self.forward(target, Some(Arc::new(modifier)), true)
    }

    /// Sets the redirect target, modifier and fork flag together.
    #[must_use]
    pub fn forward(
        mut self,
        target: NodeId,
        modifier: Option<RedirectModifier<S>>,
        forks: bool,
    ) -> Self {
        self.target = Some(target);
        self.modifier = modifier;
        self.forks = forks;
        self
    }

    /// Overrides the argument type's suggestions. Ignored on literals and flags.
    #[must_use]
    pub fn suggests<F>(mut self, provider: F) -> Self
    where
        F: Fn(&CommandContext<S>, SuggestionsBuilder) -> SuggestionFuture + Send + Sync + 'static,
    {
        match &mut self.kind {
            BuilderKind::Argument { suggestions, .. } | BuilderKind::Option { suggestions, .. } => {
                *suggestions = Some(Arc::new(provider));
            }
            BuilderKind::Literal(_) | BuilderKind::Flag(_) => {}
        }
        self
    }

    /// Returns the redirect target, if set.
    #[must_use]
    pub fn redirect_target(&self) -> Option<NodeId> {
        self.target
    }

    /// Returns the name of the node this builder describes.
    #[must_use]
    pub fn name(&self) -> &str {
        match &self.kind {
            BuilderKind::Literal(name)
            | BuilderKind::Argument { name, .. }
            | BuilderKind::Option { name, .. }
            | BuilderKind::Flag(name) => name,
        }
    }

    /// Returns the storage target of the value node, if this builder has one.
    #[must_use]
    pub fn target(&self) -> Option<ArgumentTarget> {
        match &self.kind {
            BuilderKind::Argument { .. } => Some(ArgumentTarget::Argument),
            BuilderKind::Option { .. } => Some(ArgumentTarget::Option),
            BuilderKind::Literal(_) | BuilderKind::Flag(_) => None,
        }
    }
}

impl<S> fmt::Debug for ArgumentBuilder<S> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let kind = match &self.kind {
            BuilderKind::Literal(name) => format!("literal {name}"),
            BuilderKind::Argument { name, .. } => format!("argument {name}"),
            BuilderKind::Option { name, .. } => format!("option --{name}"),
            BuilderKind::Flag(name) => format!("flag --{name}"),
        };
        f.debug_struct("ArgumentBuilder")
            .field("kind", &kind)
            .field("children", &self.children)
            .field("has_command", &self.command.is_some())
            .field("redirect", &self.target)
            .field("forks", &self.forks)
            .finish_non_exhaustive()
    }
}
