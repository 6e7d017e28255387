//! Command tree nodes.
//!
//! Nodes live in the dispatcher's arena and refer to each other by
//! [`NodeId`]. Child edges form the tree; redirect edges point elsewhere in
//! the same arena (possibly back to an ancestor or the root) and are only
//! ever followed by lookup.

use std::fmt;
use std::sync::Arc;

use indexmap::IndexMap;
use sigil_foundation::{CommandResult, StringRange, StringReader, builtin};

use crate::arguments::{ArgumentValue, ErasedArgumentType};
use crate::context::{CommandContext, CommandContextBuilder, ParsedArgument};
use crate::suggestion::{SuggestionFuture, Suggestions, SuggestionsBuilder};

/// A command handler. Returns an integer outcome.
pub type Command<S> = Arc<dyn Fn(&CommandContext<S>) -> CommandResult<i32> + Send + Sync>;

/// Decides whether a source may use a node.
pub type Requirement<S> = Arc<dyn Fn(&S) -> bool + Send + Sync>;

/// Maps the context at a redirect to the sources the redirected command runs for.
pub type RedirectModifier<S> =
    Arc<dyn Fn(&CommandContext<S>) -> CommandResult<Vec<S>> + Send + Sync>;

/// Overrides an argument type's suggestions.
pub type SuggestionProvider<S> =
    Arc<dyn Fn(&CommandContext<S>, SuggestionsBuilder) -> SuggestionFuture + Send + Sync>;

/// Notified after each handler or redirect modifier runs: context, success, result.
pub type ResultConsumer<S> = Arc<dyn Fn(&CommandContext<S>, bool, i32) + Send + Sync>;

/// Index of a node in a dispatcher's arena.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct NodeId(pub(crate) usize);

impl NodeId {
    /// The root node of every dispatcher.
    pub const ROOT: NodeId = NodeId(0);

    /// Returns the arena index.
    #[must_use]
    pub const fn index(self) -> usize {
        self.0
    }
}

impl fmt::Display for NodeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// Where an argument node stores its parsed value.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum ArgumentTarget {
    /// In the context's arguments map.
    Argument,
    /// In the context's options map.
    Option,
}

/// The variant-specific part of a node.
pub enum NodeKind<S> {
    /// The tree root. Has no token of its own.
    Root,
    /// A fixed keyword.
    Literal {
        /// The keyword.
        literal: String,
        /// The keyword in lowercase, for suggestion matching.
        literal_lower: String,
        /// Option key set to `true` when this literal is matched.
        flag: Option<String>,
    },
    /// A typed value.
    Argument {
        /// The name the value is stored under.
        name: String,
        /// Which context map receives the value.
        target: ArgumentTarget,
        /// The parser.
        arg_type: Arc<dyn ErasedArgumentType<S>>,
        /// Optional override of the parser's suggestions.
        custom_suggestions: Option<SuggestionProvider<S>>,
    },
}

impl<S> NodeKind<S> {
    pub(crate) fn literal(literal: impl Into<String>, flag: Option<String>) -> Self {
        let literal = literal.into();
        Self::Literal {
            literal_lower: literal.to_lowercase(),
            literal,
            flag,
        }
    }
}

impl<S> fmt::Debug for NodeKind<S> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Root => f.write_str("Root"),
            Self::Literal { literal, flag, .. } => f
                .debug_struct("Literal")
                .field("literal", literal)
                .field("flag", flag)
                .finish(),
            Self::Argument {
                name,
                target,
                arg_type,
                ..
            } => f
                .debug_struct("Argument")
                .field("name", name)
                .field("target", target)
                .field("type", &arg_type.value_type_name())
                .finish_non_exhaustive(),
        }
    }
}

/// A node in the command tree.
pub struct CommandNode<S> {
    pub(crate) id: NodeId,
    pub(crate) kind: NodeKind<S>,
    pub(crate) children: IndexMap<String, NodeId>,
    pub(crate) literals: IndexMap<String, NodeId>,
    pub(crate) arguments: IndexMap<String, NodeId>,
    pub(crate) requirement: Requirement<S>,
    pub(crate) command: Option<Command<S>>,
    pub(crate) redirect: Option<NodeId>,
    pub(crate) modifier: Option<RedirectModifier<S>>,
    pub(crate) forks: bool,
}

impl<S> CommandNode<S> {
    pub(crate) fn root() -> Self {
        Self {
            id: NodeId::ROOT,
            kind: NodeKind::Root,
            children: IndexMap::new(),
            literals: IndexMap::new(),
            arguments: IndexMap::new(),
            requirement: Arc::new(|_: &S| true),
            command: None,
            redirect: None,
            modifier: None,
            forks: false,
        }
    }

    /// Returns this node's id.
    #[must_use]
    pub fn id(&self) -> NodeId {
        self.id
    }

    /// Returns the variant-specific data.
    #[must_use]
    pub fn kind(&self) -> &NodeKind<S> {
        &self.kind
    }

    /// Returns the key this node is stored under in its parent.
    #[must_use]
    pub fn name(&self) -> &str {
        match &self.kind {
            NodeKind::Root => "",
            NodeKind::Literal { literal, .. } => literal,
            NodeKind::Argument { name, .. } => name,
        }
    }

    /// Returns how this node is shown in usage strings.
    #[must_use]
    pub fn usage_text(&self) -> String {
        match &self.kind {
            NodeKind::Root => String::new(),
            NodeKind::Literal { literal, .. } => literal.clone(),
            NodeKind::Argument { name, .. } => format!("<{name}>"),
        }
    }

    /// Returns the children in registration order.
    pub fn children(&self) -> impl Iterator<Item = NodeId> + '_ {
        self.children.values().copied()
    }

    /// Returns the child registered under `name`.
    #[must_use]
    pub fn child(&self, name: &str) -> Option<NodeId> {
        self.children.get(name).copied()
    }

    /// Returns true if this node has no children.
    #[must_use]
    pub fn is_leaf(&self) -> bool {
        self.children.is_empty()
    }

    /// Returns true if `source` may use this node.
    pub fn can_use(&self, source: &S) -> bool {
        (self.requirement)(source)
    }

    /// Returns the handler, if any.
    #[must_use]
    pub fn command(&self) -> Option<&Command<S>> {
        self.command.as_ref()
    }

    /// Returns the redirect target, if any.
    #[must_use]
    pub fn redirect(&self) -> Option<NodeId> {
        self.redirect
    }

    /// Returns the redirect modifier, if any.
    #[must_use]
    pub fn redirect_modifier(&self) -> Option<&RedirectModifier<S>> {
        self.modifier.as_ref()
    }

    /// Returns true if failures after this node's redirect are per source.
    #[must_use]
    pub fn is_fork(&self) -> bool {
        self.forks
    }

    /// Returns the children worth trying at the reader's position: the
    /// literal matching the next token if there is one, else every argument.
    pub(crate) fn relevant_nodes(&self, input: &StringReader, separator: char) -> Vec<NodeId> {
        if !self.literals.is_empty() {
            let token = input
                .remaining()
                .split(separator)
                .next()
                .unwrap_or_default();
            if let Some(literal) = self.literals.get(token) {
                return vec![*literal];
            }
        }
        self.arguments.values().copied().collect()
    }

    /// Consumes this node's token and records it in the context.
    pub(crate) fn parse(
        &self,
        reader: &mut StringReader,
        context: &mut CommandContextBuilder<S>,
        separator: char,
    ) -> CommandResult<()> {
        match &self.kind {
            NodeKind::Root => Ok(()),
            NodeKind::Literal { literal, flag, .. } => {
                let start = reader.cursor();
                let Some(end) = parse_literal(literal, reader, separator) else {
                    return Err(builtin::LITERAL_INCORRECT.create_with_context(reader, literal));
                };
                let range = StringRange::new(start, end);
                if let Some(key) = flag {
                    context.with_option(key, ParsedArgument::new(range, ArgumentValue::new(true)));
                }
                context.with_node(self, range);
                Ok(())
            }
            NodeKind::Argument {
                name,
                target,
                arg_type,
                ..
            } => {
                let start = reader.cursor();
                let value = arg_type.parse_value(reader)?;
                let parsed = ParsedArgument::new(StringRange::new(start, reader.cursor()), value);
                let range = parsed.range();
                match target {
                    ArgumentTarget::Argument => context.with_argument(name, parsed),
                    ArgumentTarget::Option => context.with_option(name, parsed),
                };
                context.with_node(self, range);
                Ok(())
            }
        }
    }

    /// Returns true if `input` would be accepted by this node alone.
    pub(crate) fn is_valid_input(&self, input: &str, separator: char) -> bool {
        let mut reader = StringReader::new(input);
        match &self.kind {
            NodeKind::Root => false,
            NodeKind::Literal { literal, .. } => {
                parse_literal(literal, &mut reader, separator).is_some()
            }
            NodeKind::Argument { arg_type, .. } => {
                arg_type.parse_value(&mut reader).is_ok()
                    && reader.peek().is_none_or(|c| c == separator)
            }
        }
    }

    /// Returns sample inputs this node accepts.
    pub(crate) fn examples(&self) -> Vec<String> {
        match &self.kind {
            NodeKind::Root => Vec::new(),
            NodeKind::Literal { literal, .. } => vec![literal.clone()],
            NodeKind::Argument { arg_type, .. } => arg_type.example_inputs(),
        }
    }

    /// Lists suggestions for the partial token in `builder`.
    pub(crate) fn list_suggestions(
        &self,
        context: &CommandContext<S>,
        mut builder: SuggestionsBuilder,
    ) -> SuggestionFuture {
        match &self.kind {
            NodeKind::Root => Suggestions::empty_future(),
            NodeKind::Literal {
                literal,
                literal_lower,
                ..
            } => {
                if literal_lower.starts_with(builder.remaining_lowercase()) {
                    builder.suggest(literal.clone());
                }
                builder.build_future()
            }
            NodeKind::Argument {
                arg_type,
                custom_suggestions,
                ..
            } => match custom_suggestions {
                Some(provider) => provider(context, builder),
                None => arg_type.suggestions(context, builder),
            },
        }
    }
}

impl<S> fmt::Debug for CommandNode<S> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CommandNode")
            .field("id", &self.id)
            .field("kind", &self.kind)
            .field("children", &self.children)
            .field("has_command", &self.command.is_some())
            .field("redirect", &self.redirect)
            .field("forks", &self.forks)
            .finish_non_exhaustive()
    }
}

/// Matches `literal` followed by a separator or end of input. Returns the end
/// offset on success; the cursor is left unchanged on failure.
fn parse_literal(literal: &str, reader: &mut StringReader, separator: char) -> Option<usize> {
    let start = reader.cursor();
    if !reader.remaining().starts_with(literal) {
        return None;
    }
    let end = start + literal.len();
    reader.set_cursor(end);
    if reader.peek().is_none_or(|c| c == separator) {
        Some(end)
    } else {
        reader.set_cursor(start);
        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::arguments::integer;

    fn literal_node(name: &str) -> CommandNode<()> {
        CommandNode {
            kind: NodeKind::literal(name, None),
            ..CommandNode::root()
        }
    }

    fn argument_node(name: &str) -> CommandNode<()> {
        CommandNode {
            kind: NodeKind::Argument {
                name: name.to_string(),
                target: ArgumentTarget::Argument,
                arg_type: Arc::new(integer()),
                custom_suggestions: None,
            },
            ..CommandNode::root()
        }
    }

    #[test]
    fn literal_requires_separator() {
        let mut reader = StringReader::new("foobar");
        assert_eq!(parse_literal("foo", &mut reader, ' '), None);
        assert_eq!(reader.cursor(), 0);

        let mut reader = StringReader::new("foo bar");
        assert_eq!(parse_literal("foo", &mut reader, ' '), Some(3));
        assert_eq!(reader.cursor(), 3);
    }

    #[test]
    fn literal_at_end_of_input() {
        let mut reader = StringReader::new("foo");
        assert_eq!(parse_literal("foo", &mut reader, ' '), Some(3));
    }

    #[test]
    fn literal_usage_and_examples() {
        let node = literal_node("foo");
        assert_eq!(node.usage_text(), "foo");
        assert_eq!(node.examples(), vec!["foo".to_string()]);
        assert!(node.is_valid_input("foo", ' '));
        assert!(!node.is_valid_input("fooo", ' '));
    }

    #[test]
    fn argument_usage_and_validity() {
        let node = argument_node("count");
        assert_eq!(node.usage_text(), "<count>");
        assert!(node.is_valid_input("15", ' '));
        assert!(node.is_valid_input("15 more", ' '));
        assert!(!node.is_valid_input("15x", ' '));
        assert!(!node.is_valid_input("x", ' '));
    }

    #[test]
    fn relevant_nodes_prefers_matching_literal() {
        let mut parent: CommandNode<()> = CommandNode::root();
        parent.literals.insert("foo".to_string(), NodeId(1));
        parent.arguments.insert("n".to_string(), NodeId(2));

        let reader = StringReader::new("foo 1");
        assert_eq!(parent.relevant_nodes(&reader, ' '), vec![NodeId(1)]);

        let reader = StringReader::new("12 1");
        assert_eq!(parent.relevant_nodes(&reader, ' '), vec![NodeId(2)]);
    }

    #[test]
    fn parse_does_not_need_a_cloneable_source() {
        struct Console;

        let node = CommandNode::<Console> {
            id: NodeId(1),
            kind: NodeKind::Argument {
                name: "n".to_string(),
                target: ArgumentTarget::Argument,
                arg_type: Arc::new(integer()),
                custom_suggestions: None,
            },
            ..CommandNode::root()
        };
        let mut context = CommandContextBuilder::new(Console, NodeId::ROOT, 0);
        let mut reader = StringReader::new("42 rest");
        node.parse(&mut reader, &mut context, ' ').unwrap();

        assert_eq!(reader.cursor(), 2);
        assert_eq!(context.range(), StringRange::new(0, 2));
        assert_eq!(context.nodes().front().map(|parsed| parsed.node), Some(NodeId(1)));
        let value = context.arguments().get("n").unwrap().result();
        assert_eq!(value.downcast_ref::<i32>(), Some(&42));
    }
}
