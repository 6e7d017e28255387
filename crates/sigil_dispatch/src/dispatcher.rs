//! The command dispatcher.
//!
//! Owns the node arena, registers builders into it, parses input into
//! [`ParseResults`], executes them and computes completions.

use std::sync::Arc;

use futures::FutureExt;
use futures::future::join_all;
use sigil_foundation::{CommandResult, CommandSyntaxError, StringReader, builtin};
use tracing::{debug, trace, warn};

use crate::builder::{ArgumentBuilder, BuilderKind};
use crate::config::DispatcherConfig;
use crate::context::{CommandContext, CommandContextBuilder};
use crate::suggestion::{SuggestionFuture, Suggestions, SuggestionsBuilder};
use crate::tree::{
    ArgumentTarget, Command, CommandNode, NodeId, NodeKind, RedirectModifier, Requirement,
    ResultConsumer,
};

/// The outcome of [`CommandDispatcher::parse`].
///
/// Holds the deepest context the parser reached, the reader positioned after
/// the last consumed token, and every error raised by a rejected alternative
/// at the point where parsing stopped.
pub struct ParseResults<S> {
    context: CommandContextBuilder<S>,
    reader: StringReader,
    errors: Vec<(NodeId, CommandSyntaxError)>,
}

impl<S> ParseResults<S> {
    /// Returns the parsed context.
    #[must_use]
    pub fn context(&self) -> &CommandContextBuilder<S> {
        &self.context
    }

    /// Returns the reader after parsing.
    #[must_use]
    pub fn reader(&self) -> &StringReader {
        &self.reader
    }

    /// Returns the errors raised by rejected alternatives, in tree order.
    #[must_use]
    pub fn errors(&self) -> &[(NodeId, CommandSyntaxError)] {
        &self.errors
    }

    /// Returns the error that got furthest into the input.
    #[must_use]
    pub fn deepest_error(&self) -> Option<&CommandSyntaxError> {
        let mut deepest: Option<&CommandSyntaxError> = None;
        for (_, error) in &self.errors {
            let cursor = error.cursor().unwrap_or(0);
            if deepest.is_none_or(|best| cursor > best.cursor().unwrap_or(0)) {
                deepest = Some(error);
            }
        }
        deepest
    }

    /// Returns true if parsing consumed the whole input.
    #[must_use]
    pub fn is_complete(&self) -> bool {
        !self.reader.can_read()
    }
}

impl<S> std::fmt::Debug for ParseResults<S> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ParseResults")
            .field("context", &self.context)
            .field("cursor", &self.reader.cursor())
            .field("errors", &self.errors)
            .finish()
    }
}

/// Dispatches text commands against a tree of nodes.
///
/// `S` is the command source: whoever runs the command. It is cloned into
/// every context, so it should be cheap to clone.
pub struct CommandDispatcher<S> {
    pub(crate) nodes: Vec<CommandNode<S>>,
    pub(crate) config: DispatcherConfig,
    consumer: Option<ResultConsumer<S>>,
}

impl<S: Clone + 'static> Default for CommandDispatcher<S> {
    fn default() -> Self {
        Self::new()
    }
}

impl<S: Clone + 'static> CommandDispatcher<S> {
    /// Creates a dispatcher with an empty tree.
    #[must_use]
    pub fn new() -> Self {
        Self::with_config(DispatcherConfig::default())
    }

    /// Creates a dispatcher with the given configuration.
    #[must_use]
    pub fn with_config(config: DispatcherConfig) -> Self {
        Self {
            nodes: vec![CommandNode::root()],
            config,
            consumer: None,
        }
    }

    /// Returns the configuration.
    #[must_use]
    pub fn config(&self) -> &DispatcherConfig {
        &self.config
    }

    /// Returns the root node's id.
    #[must_use]
    pub fn root(&self) -> NodeId {
        NodeId::ROOT
    }

    /// Returns the node with the given id.
    #[must_use]
    pub fn node(&self, id: NodeId) -> Option<&CommandNode<S>> {
        self.nodes.get(id.index())
    }

    /// Returns the number of nodes, the root included.
    #[must_use]
    pub fn node_count(&self) -> usize {
        self.nodes.len()
    }

    /// Sets the callback notified after every handler runs.
    pub fn set_consumer<F>(&mut self, consumer: F)
    where
        F: Fn(&CommandContext<S>, bool, i32) + Send + Sync + 'static,
    {
        self.consumer = Some(Arc::new(consumer));
    }

    // =========================================================================
    // Registration
    // =========================================================================

    /// Adds a command tree under the root and returns its top node.
    ///
    /// Registering a literal that already exists merges the new children into
    /// the existing node and replaces its handler if the new one has one.
    pub fn register(&mut self, command: ArgumentBuilder<S>) -> NodeId {
        let id = self.add_child(NodeId::ROOT, command);
        if self.config.check_ambiguities {
            self.log_ambiguities();
        }
        id
    }

    fn add_child(&mut self, parent: NodeId, builder: ArgumentBuilder<S>) -> NodeId {
        let ArgumentBuilder {
            kind,
            mut children,
            command,
            requirement,
            mut target,
            modifier,
            forks,
        } = builder;

        if let Some(redirect) = target {
            if redirect.index() >= self.nodes.len() {
                warn!(%redirect, "dropping redirect to a node that is not registered");
                target = None;
            } else if !children.is_empty() {
                warn!(
                    count = children.len(),
                    "dropping children of a redirected node"
                );
                children.clear();
            }
        }

        let always: Requirement<S> = Arc::new(|_: &S| true);
        let (top, value) = match kind {
            BuilderKind::Literal(name) => {
                let id = self.insert(
                    parent,
                    NodeKind::literal(name, None),
                    requirement,
                    command,
                    target,
                    modifier,
                    forks,
                );
                (id, id)
            }
            BuilderKind::Flag(name) => {
                let id = self.insert(
                    parent,
                    NodeKind::literal(format!("--{name}"), Some(name)),
                    requirement,
                    command,
                    target,
                    modifier,
                    forks,
                );
                (id, id)
            }
            BuilderKind::Argument {
                name,
                arg_type,
                suggestions,
            } => {
                let id = self.insert(
                    parent,
                    NodeKind::Argument {
                        name,
                        target: ArgumentTarget::Argument,
                        arg_type,
                        custom_suggestions: suggestions,
                    },
                    requirement,
                    command,
                    target,
                    modifier,
                    forks,
                );
                (id, id)
            }
            BuilderKind::Option {
                name,
                arg_type,
                suggestions,
            } => {
                let literal = self.insert(
                    parent,
                    NodeKind::literal(format!("--{name}"), None),
                    requirement,
                    None,
                    None,
                    None,
                    false,
                );
                let value = self.insert(
                    literal,
                    NodeKind::Argument {
                        name,
                        target: ArgumentTarget::Option,
                        arg_type,
                        custom_suggestions: suggestions,
                    },
                    always,
                    command,
                    target,
                    modifier,
                    forks,
                );
                (literal, value)
            }
        };

        for child in children {
            self.add_child(value, child);
        }
        top
    }

    #[allow(clippy::too_many_arguments)]
    fn insert(
        &mut self,
        parent: NodeId,
        kind: NodeKind<S>,
        requirement: Requirement<S>,
        command: Option<Command<S>>,
        redirect: Option<NodeId>,
        modifier: Option<RedirectModifier<S>>,
        forks: bool,
    ) -> NodeId {
        let key = match &kind {
            NodeKind::Root => String::new(),
            NodeKind::Literal { literal, .. } => literal.clone(),
            NodeKind::Argument { name, .. } => name.clone(),
        };

        if let Some(existing) = self.nodes[parent.index()].child(&key) {
            debug!(node = %key, %existing, "merging into existing node");
            if command.is_some() {
                self.nodes[existing.index()].command = command;
            }
            return existing;
        }

        let id = NodeId(self.nodes.len());
        let is_literal = matches!(kind, NodeKind::Literal { .. });
        self.nodes.push(CommandNode {
            id,
            kind,
            children: indexmap::IndexMap::new(),
            literals: indexmap::IndexMap::new(),
            arguments: indexmap::IndexMap::new(),
            requirement,
            command,
            redirect,
            modifier,
            forks,
        });
        let parent_node = &mut self.nodes[parent.index()];
        parent_node.children.insert(key.clone(), id);
        if is_literal {
            parent_node.literals.insert(key.clone(), id);
        } else {
            parent_node.arguments.insert(key.clone(), id);
        }
        debug!(node = %key, %id, %parent, "registered node");
        id
    }

    // =========================================================================
    // Parsing
    // =========================================================================

    /// Parses `input` for `source` without running anything.
    ///
    /// Parsing never fails outright: problems are recorded in the result and
    /// surface when it is executed.
    pub fn parse(&self, input: &str, source: S) -> ParseResults<S> {
        self.parse_reader(StringReader::new(input), source)
    }

    /// Parses from the reader's current position.
    pub fn parse_reader(&self, reader: StringReader, source: S) -> ParseResults<S> {
        let context = CommandContextBuilder::new(source, NodeId::ROOT, reader.cursor());
        self.parse_nodes(NodeId::ROOT, &reader, context)
    }

    fn parse_nodes(
        &self,
        node: NodeId,
        original: &StringReader,
        context_so_far: CommandContextBuilder<S>,
    ) -> ParseResults<S> {
        let separator = self.config.argument_separator;
        let cursor = original.cursor();
        let mut errors = Vec::new();
        let mut potentials: Vec<ParseResults<S>> = Vec::new();

        for child_id in self.nodes[node.index()].relevant_nodes(original, separator) {
            let child = &self.nodes[child_id.index()];
            if !child.can_use(context_so_far.source()) {
                continue;
            }
            let mut context = context_so_far.clone();
            let mut reader = original.clone();

            let parsed = child.parse(&mut reader, &mut context, separator).and_then(|()| {
                match reader.peek() {
                    Some(c) if c != separator => Err(builtin::DISPATCHER_EXPECTED_ARGUMENT_SEPARATOR
                        .create_with_context(&reader)),
                    _ => Ok(()),
                }
            });
            if let Err(error) = parsed {
                trace!(node = child.name(), cursor, %error, "alternative rejected");
                errors.push((child_id, error));
                continue;
            }

            context.with_command(child.command().cloned());
            let needed = if child.redirect().is_some() { 1 } else { 2 };
            if reader.can_read_n(needed) {
                reader.skip();
                if let Some(redirect) = child.redirect() {
                    let child_context = CommandContextBuilder::new(
                        context_so_far.source().clone(),
                        redirect,
                        reader.cursor(),
                    );
                    let parse = self.parse_nodes(redirect, &reader, child_context);
                    context.with_child(parse.context);
                    return ParseResults {
                        context,
                        reader: parse.reader,
                        errors: parse.errors,
                    };
                }
                potentials.push(self.parse_nodes(child_id, &reader, context));
            } else {
                potentials.push(ParseResults {
                    context,
                    reader,
                    errors: Vec::new(),
                });
            }
        }

        if potentials.is_empty() {
            return ParseResults {
                context: context_so_far,
                reader: original.clone(),
                errors,
            };
        }
        // Stable: among equals the first registered wins.
        potentials.sort_by_key(|p| (p.reader.can_read(), !p.errors.is_empty()));
        potentials.swap_remove(0)
    }

    // =========================================================================
    // Execution
    // =========================================================================

    /// Parses and executes `input` for `source`.
    ///
    /// # Errors
    ///
    /// See [`Self::execute`].
    pub fn execute_command(&self, input: &str, source: S) -> CommandResult<i32> {
        self.execute(&self.parse(input, source))
    }

    /// Executes a parsed command.
    ///
    /// Returns the handler's result, summed across every source a redirect
    /// modifier fanned out to. For forked redirects the number of successful
    /// handler runs is returned instead.
    ///
    /// # Errors
    ///
    /// Fails if input was left unparsed (with the deepest recorded parse
    /// error, or an unknown command/argument error), if no node on the path
    /// had a handler, or if a handler or non-forked redirect modifier fails.
    pub fn execute(&self, parse: &ParseResults<S>) -> CommandResult<i32> {
        if parse.reader.can_read() {
            if let Some(error) = parse.deepest_error() {
                return Err(error.clone());
            }
            if parse.context.range().is_empty() {
                return Err(builtin::DISPATCHER_UNKNOWN_COMMAND.create_with_context(&parse.reader));
            }
            return Err(builtin::DISPATCHER_UNKNOWN_ARGUMENT.create_with_context(&parse.reader));
        }

        let mut result = 0_i32;
        let mut successful_forks = 0_i32;
        let mut forked = false;
        let mut found_command = false;
        let original = parse.context.build(parse.reader.string());
        let mut contexts = vec![original.clone()];

        while !contexts.is_empty() {
            let mut next = Vec::new();
            for context in &contexts {
                if let Some(child) = context.child() {
                    forked |= context.is_forked();
                    if !child.has_nodes() {
                        continue;
                    }
                    found_command = true;
                    match context.redirect_modifier() {
                        None => next.push(child.copy_for(context.source().clone())),
                        Some(modifier) => match modifier(context) {
                            Ok(sources) => {
                                next.extend(sources.into_iter().map(|source| child.copy_for(source)));
                            }
                            Err(error) => {
                                self.notify(context, false, 0);
                                if !forked {
                                    return Err(error);
                                }
                                warn!(%error, "redirect modifier failed in forked command");
                            }
                        },
                    }
                } else if let Some(command) = context.command() {
                    found_command = true;
                    match command(context) {
                        Ok(value) => {
                            result = result.wrapping_add(value);
                            self.notify(context, true, value);
                            successful_forks += 1;
                        }
                        Err(error) => {
                            self.notify(context, false, 0);
                            if !forked {
                                return Err(error);
                            }
                        }
                    }
                }
            }
            contexts = next;
        }

        if !found_command {
            self.notify(&original, false, 0);
            return Err(builtin::DISPATCHER_INCOMPLETE_COMMAND.create_with_context(&parse.reader));
        }
        Ok(if forked { successful_forks } else { result })
    }

    fn notify(&self, context: &CommandContext<S>, success: bool, result: i32) {
        if let Some(consumer) = &self.consumer {
            consumer(context, success, result);
        }
    }

    // =========================================================================
    // Completion
    // =========================================================================

    /// Computes completions at the end of the parsed input.
    pub fn get_completion_suggestions(&self, parse: &ParseResults<S>) -> SuggestionFuture {
        self.get_completion_suggestions_at(parse, parse.reader.total_length())
    }

    /// Computes completions for the input truncated at `cursor`.
    pub fn get_completion_suggestions_at(
        &self,
        parse: &ParseResults<S>,
        cursor: usize,
    ) -> SuggestionFuture {
        let context = &parse.context;
        let Some((parent, start_pos)) = context.find_suggestion_context(cursor) else {
            return Suggestions::empty_future();
        };
        let Some(parent) = self.node(parent) else {
            return Suggestions::empty_future();
        };

        let full_input = parse.reader.string();
        let mut cursor = cursor.min(full_input.len());
        while !full_input.is_char_boundary(cursor) {
            cursor -= 1;
        }
        let truncated = &full_input[..cursor];
        let start = start_pos.min(cursor);
        let built = context.build(truncated);

        let futures: Vec<SuggestionFuture> = parent
            .children()
            .filter_map(|id| self.node(id))
            .filter(|node| node.can_use(context.source()))
            .map(|node| node.list_suggestions(&built, SuggestionsBuilder::new(truncated, start)))
            .collect();

        let input = truncated.to_string();
        async move {
            let all = join_all(futures).await;
            Suggestions::merge(&input, all)
        }
        .boxed()
    }

    // =========================================================================
    // Paths
    // =========================================================================

    /// Returns the names leading from the root to `target`, or an empty list
    /// if it is not reachable through child edges.
    #[must_use]
    pub fn get_path(&self, target: NodeId) -> Vec<String> {
        let mut path = Vec::new();
        if self.find_path(NodeId::ROOT, target, &mut path) {
            path
        } else {
            Vec::new()
        }
    }

    fn find_path(&self, node: NodeId, target: NodeId, path: &mut Vec<String>) -> bool {
        if node == target {
            return true;
        }
        let Some(current) = self.node(node) else {
            return false;
        };
        for child in current.children() {
            if let Some(child_node) = self.node(child) {
                path.push(child_node.name().to_string());
                if self.find_path(child, target, path) {
                    return true;
                }
                path.pop();
            }
        }
        false
    }

    /// Follows child names from the root.
    #[must_use]
    pub fn find_node<I, T>(&self, path: I) -> Option<NodeId>
    where
        I: IntoIterator<Item = T>,
        T: AsRef<str>,
    {
        let mut node = NodeId::ROOT;
        for name in path {
            node = self.node(node)?.child(name.as_ref())?;
        }
        Some(node)
    }

    // =========================================================================
    // Ambiguities
    // =========================================================================

    /// Reports every pair of siblings where an example input of one is also
    /// accepted by the other. Callback arguments: parent, child, sibling and
    /// the overlapping inputs.
    pub fn find_ambiguities<F>(&self, mut consumer: F)
    where
        F: FnMut(NodeId, NodeId, NodeId, &[String]),
    {
        self.find_ambiguities_from(NodeId::ROOT, &mut consumer);
    }

    fn find_ambiguities_from<F>(&self, parent: NodeId, consumer: &mut F)
    where
        F: FnMut(NodeId, NodeId, NodeId, &[String]),
    {
        let Some(parent_node) = self.node(parent) else {
            return;
        };
        let separator = self.config.argument_separator;
        let children: Vec<&CommandNode<S>> =
            parent_node.children().filter_map(|id| self.node(id)).collect();
        for child in &children {
            for sibling in &children {
                if child.id() == sibling.id() {
                    continue;
                }
                let matches: Vec<String> = child
                    .examples()
                    .into_iter()
                    .filter(|input| sibling.is_valid_input(input, separator))
                    .collect();
                if !matches.is_empty() {
                    consumer(parent, child.id(), sibling.id(), &matches);
                }
            }
            self.find_ambiguities_from(child.id(), consumer);
        }
    }

    /// Logs every ambiguity at `warn` level.
    pub fn log_ambiguities(&self) {
        self.find_ambiguities(|parent, child, sibling, inputs| {
            let path = |id: NodeId| self.get_path(id).join(" ");
            warn!(
                parent = %path(parent),
                child = %path(child),
                sibling = %path(sibling),
                ?inputs,
                "ambiguous command nodes"
            );
        });
    }
}

impl<S> std::fmt::Debug for CommandDispatcher<S> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CommandDispatcher")
            .field("nodes", &self.nodes)
            .field("config", &self.config)
            .field("has_consumer", &self.consumer.is_some())
            .finish()
    }
}
