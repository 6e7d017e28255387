//! Usage strings.
//!
//! Two renderings: [`CommandDispatcher::get_all_usage`] lists every runnable
//! path below a node, [`CommandDispatcher::get_smart_usage`] folds each child
//! subtree into one compact line with `[optional]` and `(a|b)` groups.

use indexmap::IndexSet;

use crate::dispatcher::CommandDispatcher;
use crate::tree::{CommandNode, NodeId};

impl<S: Clone + 'static> CommandDispatcher<S> {
    /// Returns every runnable path below `node`, one usage string per path.
    ///
    /// With `restricted`, nodes `source` cannot use are skipped.
    #[must_use]
    pub fn get_all_usage(&self, node: NodeId, source: &S, restricted: bool) -> Vec<String> {
        let mut result = Vec::new();
        if let Some(node) = self.node(node) {
            self.all_usage(node, source, &mut result, "", restricted);
        }
        result
    }

    fn all_usage(
        &self,
        node: &CommandNode<S>,
        source: &S,
        result: &mut Vec<String>,
        prefix: &str,
        restricted: bool,
    ) {
        if restricted && !node.can_use(source) {
            return;
        }
        let separator = self.config.argument_separator;
        if node.command().is_some() {
            result.push(prefix.to_string());
        }
        if let Some(redirect) = node.redirect() {
            let target = self.redirect_usage(redirect);
            if prefix.is_empty() {
                result.push(format!("{}{separator}{target}", node.usage_text()));
            } else {
                result.push(format!("{prefix}{separator}{target}"));
            }
            return;
        }
        for child in node.children().filter_map(|id| self.node(id)) {
            let next = if prefix.is_empty() {
                child.usage_text()
            } else {
                format!("{prefix}{separator}{}", child.usage_text())
            };
            self.all_usage(child, source, result, &next, restricted);
        }
    }

    /// Returns one compact usage per child of `node` that `source` can use,
    /// keyed by the child.
    #[must_use]
    pub fn get_smart_usage(&self, node: NodeId, source: &S) -> Vec<(NodeId, String)> {
        let Some(node) = self.node(node) else {
            return Vec::new();
        };
        let optional = node.command().is_some();
        node.children()
            .filter_map(|id| self.node(id))
            .filter_map(|child| {
                self.smart_usage(child, source, optional, false)
                    .map(|usage| (child.id(), usage))
            })
            .collect()
    }

    fn smart_usage(
        &self,
        node: &CommandNode<S>,
        source: &S,
        optional: bool,
        deep: bool,
    ) -> Option<String> {
        if !node.can_use(source) {
            return None;
        }
        let config = &self.config;
        let separator = config.argument_separator;
        let this = if optional {
            format!(
                "{}{}{}",
                config.optional_open,
                node.usage_text(),
                config.optional_close
            )
        } else {
            node.usage_text()
        };
        if deep {
            return Some(this);
        }
        if let Some(redirect) = node.redirect() {
            return Some(format!("{this}{separator}{}", self.redirect_usage(redirect)));
        }

        let child_optional = node.command().is_some();
        let (open, close) = if child_optional {
            (&config.optional_open, &config.optional_close)
        } else {
            (&config.required_open, &config.required_close)
        };
        let children: Vec<&CommandNode<S>> = node
            .children()
            .filter_map(|id| self.node(id))
            .filter(|child| child.can_use(source))
            .collect();

        match children.as_slice() {
            [] => Some(this),
            [only] => match self.smart_usage(only, source, child_optional, child_optional) {
                Some(usage) => Some(format!("{this}{separator}{usage}")),
                None => Some(this),
            },
            many => {
                let usages: IndexSet<String> = many
                    .iter()
                    .filter_map(|child| self.smart_usage(child, source, false, true))
                    .collect();
                match usages.len() {
                    0 => Some(this),
                    1 => {
                        let usage = usages.into_iter().next().unwrap_or_default();
                        if child_optional {
                            Some(format!(
                                "{this}{separator}{}{usage}{}",
                                config.optional_open, config.optional_close
                            ))
                        } else {
                            Some(format!("{this}{separator}{usage}"))
                        }
                    }
                    _ => {
                        let alternatives: Vec<String> =
                            many.iter().map(|child| child.usage_text()).collect();
                        Some(format!(
                            "{this}{separator}{open}{}{close}",
                            alternatives.join(&config.usage_or)
                        ))
                    }
                }
            }
        }
    }

    fn redirect_usage(&self, target: NodeId) -> String {
        if target == NodeId::ROOT {
            return self.config.root_redirect_usage.clone();
        }
        let usage = self.node(target).map(CommandNode::usage_text).unwrap_or_default();
        format!("{} {usage}", self.config.redirect_prefix)
    }
}
