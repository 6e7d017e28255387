//! Per-invocation command contexts.
//!
//! The parser grows a [`CommandContextBuilder`] as it descends the tree.
//! Every alternative it tries works on its own clone, so the argument maps
//! are persistent (`im::HashMap`) and the node list is an `im::Vector`;
//! cloning is O(1) and siblings never observe each other's values.
//!
//! A redirect starts a fresh child builder rooted at the redirect target;
//! the chain of children is what `execute` walks.

use std::fmt;
use std::sync::Arc;

use im::{HashMap, Vector};
use sigil_foundation::{CommandResult, Dynamic2ErrorType, DynamicErrorType, StringRange};

use crate::arguments::ArgumentValue;
use crate::tree::{Command, CommandNode, NodeId, RedirectModifier};

/// Requested argument does not exist on the command.
pub static CONTEXT_NO_SUCH_ARGUMENT: DynamicErrorType = DynamicErrorType::new(
    "command.context.missing",
    "No such argument '{}' exists on this command",
);

/// Requested argument exists with a different type. Operands: name, actual type.
pub static CONTEXT_WRONG_ARGUMENT_TYPE: Dynamic2ErrorType = Dynamic2ErrorType::new(
    "command.context.type",
    "Argument '{}' is defined as {}, not the requested type",
);

/// A parsed value and the input it came from.
#[derive(Clone, Debug)]
pub struct ParsedArgument {
    range: StringRange,
    result: ArgumentValue,
}

impl ParsedArgument {
    /// Creates a parsed argument.
    #[must_use]
    pub fn new(range: StringRange, result: ArgumentValue) -> Self {
        Self { range, result }
    }

    /// Returns the consumed input range.
    #[must_use]
    pub fn range(&self) -> StringRange {
        self.range
    }

    /// Returns the parsed value.
    #[must_use]
    pub fn result(&self) -> &ArgumentValue {
        &self.result
    }
}

/// A node matched during parsing and the input it consumed.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct ParsedCommandNode {
    /// The matched node.
    pub node: NodeId,
    /// The consumed input range.
    pub range: StringRange,
}

/// Accumulates a context while the parser descends the tree.
pub struct CommandContextBuilder<S> {
    source: S,
    root_node: NodeId,
    arguments: HashMap<String, ParsedArgument>,
    options: HashMap<String, ParsedArgument>,
    nodes: Vector<ParsedCommandNode>,
    command: Option<Command<S>>,
    child: Option<Box<CommandContextBuilder<S>>>,
    range: StringRange,
    modifier: Option<RedirectModifier<S>>,
    forks: bool,
}

impl<S: Clone> Clone for CommandContextBuilder<S> {
    fn clone(&self) -> Self {
        Self {
            source: self.source.clone(),
            root_node: self.root_node,
            arguments: self.arguments.clone(),
            options: self.options.clone(),
            nodes: self.nodes.clone(),
            command: self.command.clone(),
            child: self.child.clone(),
            range: self.range,
            modifier: self.modifier.clone(),
            forks: self.forks,
        }
    }
}

impl<S> CommandContextBuilder<S> {
    /// Creates an empty builder rooted at `root_node`, starting at `start`.
    #[must_use]
    pub fn new(source: S, root_node: NodeId, start: usize) -> Self {
        Self {
            source,
            root_node,
            arguments: HashMap::new(),
            options: HashMap::new(),
            nodes: Vector::new(),
            command: None,
            child: None,
            range: StringRange::at(start),
            modifier: None,
            forks: false,
        }
    }

    /// Returns the source.
    #[must_use]
    pub fn source(&self) -> &S {
        &self.source
    }

    /// Replaces the source.
    pub fn with_source(&mut self, source: S) -> &mut Self {
        self.source = source;
        self
    }

    /// Returns the node parsing started from.
    #[must_use]
    pub fn root_node(&self) -> NodeId {
        self.root_node
    }

    /// Records a parsed argument.
    pub fn with_argument(&mut self, name: &str, argument: ParsedArgument) -> &mut Self {
        self.arguments.insert(name.to_string(), argument);
        self
    }

    /// Records a parsed option.
    pub fn with_option(&mut self, name: &str, option: ParsedArgument) -> &mut Self {
        self.options.insert(name.to_string(), option);
        self
    }

    /// Returns the arguments parsed so far.
    #[must_use]
    pub fn arguments(&self) -> &HashMap<String, ParsedArgument> {
        &self.arguments
    }

    /// Returns the options parsed so far.
    #[must_use]
    pub fn options(&self) -> &HashMap<String, ParsedArgument> {
        &self.options
    }

    /// Sets the command to run.
    pub fn with_command(&mut self, command: Option<Command<S>>) -> &mut Self {
        self.command = command;
        self
    }

    /// Returns the command to run, if any.
    #[must_use]
    pub fn command(&self) -> Option<&Command<S>> {
        self.command.as_ref()
    }

    /// Records a matched node. Also takes over the node's redirect modifier
    /// and fork flag.
    pub fn with_node(&mut self, node: &CommandNode<S>, range: StringRange) -> &mut Self {
        self.nodes.push_back(ParsedCommandNode {
            node: node.id(),
            range,
        });
        self.range = StringRange::encompassing(self.range, range);
        self.modifier = node.redirect_modifier().cloned();
        self.forks = node.is_fork();
        self
    }

    /// Attaches the context parsed after a redirect.
    pub fn with_child(&mut self, child: CommandContextBuilder<S>) -> &mut Self {
        self.child = Some(Box::new(child));
        self
    }

    /// Returns the child context, if any.
    #[must_use]
    pub fn child(&self) -> Option<&CommandContextBuilder<S>> {
        self.child.as_deref()
    }

    /// Returns the last context in the child chain.
    #[must_use]
    pub fn last_child(&self) -> &CommandContextBuilder<S> {
        let mut result = self;
        while let Some(child) = result.child() {
            result = child;
        }
        result
    }

    /// Returns the matched nodes.
    #[must_use]
    pub fn nodes(&self) -> &Vector<ParsedCommandNode> {
        &self.nodes
    }

    /// Returns the input range covered by the matched nodes.
    #[must_use]
    pub fn range(&self) -> StringRange {
        self.range
    }
}

impl<S: Clone> CommandContextBuilder<S> {
    /// Freezes the builder into a context over `input`.
    ///
    /// Contexts after a redirect also see the arguments and options parsed
    /// before it; their own values take precedence on a name clash.
    #[must_use]
    pub fn build(&self, input: &str) -> CommandContext<S> {
        self.build_shared(&Arc::from(input), &HashMap::new(), &HashMap::new())
    }

    fn build_shared(
        &self,
        input: &Arc<str>,
        inherited_arguments: &HashMap<String, ParsedArgument>,
        inherited_options: &HashMap<String, ParsedArgument>,
    ) -> CommandContext<S> {
        let arguments = self.arguments.clone().union(inherited_arguments.clone());
        let options = self.options.clone().union(inherited_options.clone());
        let child = self
            .child
            .as_ref()
            .map(|child| Box::new(child.build_shared(input, &arguments, &options)));
        CommandContext {
            source: self.source.clone(),
            input: Arc::clone(input),
            arguments,
            options,
            command: self.command.clone(),
            root_node: self.root_node,
            nodes: self.nodes.clone(),
            range: self.range,
            child,
            modifier: self.modifier.clone(),
            forks: self.forks,
        }
    }

    /// Finds the node whose children should be asked for suggestions at
    /// `cursor`, and the offset the suggested token starts at.
    #[must_use]
    pub fn find_suggestion_context(&self, cursor: usize) -> Option<(NodeId, usize)> {
        if self.range.start > cursor {
            return None;
        }
        if self.range.end < cursor {
            if let Some(child) = &self.child {
                return child.find_suggestion_context(cursor);
            }
            return Some(match self.nodes.last() {
                Some(last) => (last.node, last.range.end + 1),
                None => (self.root_node, self.range.start),
            });
        }
        let mut prev = self.root_node;
        for parsed in &self.nodes {
            if parsed.range.start <= cursor && cursor <= parsed.range.end {
                return Some((prev, parsed.range.start));
            }
            prev = parsed.node;
        }
        Some((prev, self.range.start))
    }
}

impl<S> fmt::Debug for CommandContextBuilder<S> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CommandContextBuilder")
            .field("root_node", &self.root_node)
            .field("nodes", &self.nodes)
            .field("arguments", &self.arguments.keys().collect::<Vec<_>>())
            .field("options", &self.options.keys().collect::<Vec<_>>())
            .field("range", &self.range)
            .field("has_command", &self.command.is_some())
            .field("child", &self.child)
            .finish_non_exhaustive()
    }
}

/// The parsed form of a command, handed to handlers.
pub struct CommandContext<S> {
    source: S,
    input: Arc<str>,
    arguments: HashMap<String, ParsedArgument>,
    options: HashMap<String, ParsedArgument>,
    command: Option<Command<S>>,
    root_node: NodeId,
    nodes: Vector<ParsedCommandNode>,
    range: StringRange,
    child: Option<Box<CommandContext<S>>>,
    modifier: Option<RedirectModifier<S>>,
    forks: bool,
}

impl<S: Clone> Clone for CommandContext<S> {
    fn clone(&self) -> Self {
        Self {
            source: self.source.clone(),
            input: Arc::clone(&self.input),
            arguments: self.arguments.clone(),
            options: self.options.clone(),
            command: self.command.clone(),
            root_node: self.root_node,
            nodes: self.nodes.clone(),
            range: self.range,
            child: self.child.clone(),
            modifier: self.modifier.clone(),
            forks: self.forks,
        }
    }
}

impl<S: Clone> CommandContext<S> {
    /// Returns a copy of this context running for a different source.
    #[must_use]
    pub fn copy_for(&self, source: S) -> Self {
        Self {
            source,
            ..self.clone()
        }
    }
}

impl<S> CommandContext<S> {
    /// Returns the source.
    #[must_use]
    pub fn source(&self) -> &S {
        &self.source
    }

    /// Returns the full input line.
    #[must_use]
    pub fn input(&self) -> &str {
        &self.input
    }

    /// Returns a reference to the argument `name` as a `T`.
    ///
    /// # Errors
    ///
    /// Fails if no such argument was parsed or it has a different type.
    pub fn argument<T: 'static>(&self, name: &str) -> CommandResult<&T> {
        let parsed = self
            .arguments
            .get(name)
            .ok_or_else(|| CONTEXT_NO_SUCH_ARGUMENT.create(name))?;
        downcast(name, parsed)
    }

    /// Returns a copy of the argument `name` as a `T`.
    ///
    /// # Errors
    ///
    /// Fails if no such argument was parsed or it has a different type.
    pub fn get_argument<T: Clone + 'static>(&self, name: &str) -> CommandResult<T> {
        self.argument::<T>(name).cloned()
    }

    /// Returns true if an argument named `name` was parsed.
    #[must_use]
    pub fn has_argument(&self, name: &str) -> bool {
        self.arguments.contains_key(name)
    }

    /// Returns a copy of the option `name`, or `None` if it was not given.
    ///
    /// # Errors
    ///
    /// Fails if the option was given with a different type.
    pub fn get_option<T: Clone + 'static>(&self, name: &str) -> CommandResult<Option<T>> {
        self.options
            .get(name)
            .map(|parsed| downcast::<T>(name, parsed).cloned())
            .transpose()
    }

    /// Returns true if the option or flag `name` was given.
    #[must_use]
    pub fn has_option(&self, name: &str) -> bool {
        self.options.contains_key(name)
    }

    /// Returns the parsed argument `name` with its range.
    #[must_use]
    pub fn parsed_argument(&self, name: &str) -> Option<&ParsedArgument> {
        self.arguments.get(name)
    }

    /// Returns the command to run, if any.
    #[must_use]
    pub fn command(&self) -> Option<&Command<S>> {
        self.command.as_ref()
    }

    /// Returns the node parsing started from.
    #[must_use]
    pub fn root_node(&self) -> NodeId {
        self.root_node
    }

    /// Returns the matched nodes.
    #[must_use]
    pub fn nodes(&self) -> &Vector<ParsedCommandNode> {
        &self.nodes
    }

    /// Returns true if any node was matched.
    #[must_use]
    pub fn has_nodes(&self) -> bool {
        !self.nodes.is_empty()
    }

    /// Returns the input range covered by the matched nodes.
    #[must_use]
    pub fn range(&self) -> StringRange {
        self.range
    }

    /// Returns the context parsed after a redirect, if any.
    #[must_use]
    pub fn child(&self) -> Option<&CommandContext<S>> {
        self.child.as_deref()
    }

    /// Returns the last context in the child chain.
    #[must_use]
    pub fn last_child(&self) -> &CommandContext<S> {
        let mut result = self;
        while let Some(child) = result.child() {
            result = child;
        }
        result
    }

    /// Returns the modifier applied when following this context's redirect.
    #[must_use]
    pub fn redirect_modifier(&self) -> Option<&RedirectModifier<S>> {
        self.modifier.as_ref()
    }

    /// Returns true if failures after this context's redirect are per source.
    #[must_use]
    pub fn is_forked(&self) -> bool {
        self.forks
    }
}

fn downcast<'a, T: 'static>(name: &str, parsed: &'a ParsedArgument) -> CommandResult<&'a T> {
    parsed
        .result()
        .downcast_ref::<T>()
        .ok_or_else(|| CONTEXT_WRONG_ARGUMENT_TYPE.create(name, parsed.result().type_name()))
}

impl<S> fmt::Debug for CommandContext<S> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CommandContext")
            .field("input", &self.input)
            .field("root_node", &self.root_node)
            .field("nodes", &self.nodes)
            .field("arguments", &self.arguments.keys().collect::<Vec<_>>())
            .field("options", &self.options.keys().collect::<Vec<_>>())
            .field("range", &self.range)
            .field("child", &self.child)
            .field("forks", &self.forks)
            .finish_non_exhaustive()
    }
}
