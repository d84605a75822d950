//! Command-group tree with parent-chain resolution
//!
//! Groups form a strict tree rooted at the application node. Nodes live in a
//! flat vector and refer to their parent by index; a child's index is always
//! greater than its parent's, so resolution walks are bounded and can never
//! cycle. Resolving a field falls back through the ancestor chain and
//! returns an explicit absent `None`, which is distinct from a present but
//! empty value.

/// Handle to a node in a [`CommandTree`]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct NodeId(pub(crate) usize);

/// A command-group node
#[derive(Debug, Clone)]
pub struct GroupNode {
    /// Group name (the application name for the root)
    pub name: String,

    /// Explicit help text, if declared
    pub help: Option<String>,

    /// Explicit default command name, if declared
    pub default: Option<String>,

    parent: Option<NodeId>,
}

impl GroupNode {
    /// Create a node with no explicit help or default
    pub fn new(name: impl Into<String>) -> Self {
        GroupNode {
            name: name.into(),
            help: None,
            default: None,
            parent: None,
        }
    }

    /// Set the explicit help text
    pub fn with_help(mut self, help: impl Into<String>) -> Self {
        self.help = Some(help.into());
        self
    }

    /// Set the explicit default command name
    pub fn with_default(mut self, default: impl Into<String>) -> Self {
        self.default = Some(default.into());
        self
    }
}

/// The tree of command-group nodes for one application
#[derive(Debug, Clone)]
pub struct CommandTree {
    nodes: Vec<GroupNode>,
}

impl CommandTree {
    /// Create a tree holding only the given root node
    pub fn new(mut root: GroupNode) -> Self {
        root.parent = None;
        CommandTree { nodes: vec![root] }
    }

    /// The root node handle
    pub fn root(&self) -> NodeId {
        NodeId(0)
    }

    /// Attach a child group under `parent`
    pub fn add_child(&mut self, parent: NodeId, mut node: GroupNode) -> NodeId {
        node.parent = Some(parent);
        self.nodes.push(node);
        NodeId(self.nodes.len() - 1)
    }

    /// Access a node
    pub fn get(&self, id: NodeId) -> &GroupNode {
        &self.nodes[id.0]
    }

    /// Mutable access to a node
    pub fn get_mut(&mut self, id: NodeId) -> &mut GroupNode {
        &mut self.nodes[id.0]
    }

    /// Child groups of a node, in insertion order
    pub fn children(&self, id: NodeId) -> impl Iterator<Item = NodeId> + '_ {
        self.nodes
            .iter()
            .enumerate()
            .filter(move |(_, node)| node.parent == Some(id))
            .map(|(index, _)| NodeId(index))
    }

    /// Find a direct child group by name
    pub fn child_named(&self, id: NodeId, name: &str) -> Option<NodeId> {
        self.children(id).find(|child| self.get(*child).name == name)
    }

    /// Effective help text: the node's own, or the nearest ancestor's
    pub fn resolve_help(&self, id: NodeId) -> Option<&str> {
        self.resolve_field(id, |node| node.help.as_deref())
    }

    /// Effective default command name: the node's own, or the nearest
    /// ancestor's
    pub fn resolve_default(&self, id: NodeId) -> Option<&str> {
        self.resolve_field(id, |node| node.default.as_deref())
    }

    fn resolve_field<'a, F>(&'a self, id: NodeId, field: F) -> Option<&'a str>
    where
        F: Fn(&'a GroupNode) -> Option<&'a str>,
    {
        let mut current = Some(id);
        while let Some(id) = current {
            let node = &self.nodes[id.0];
            if let Some(value) = field(node) {
                return Some(value);
            }
            current = node.parent;
        }
        None
    }
}
