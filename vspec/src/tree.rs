//! Arena-backed schema tree.
//!
//! Nodes are stored in a single `Vec` and addressed by [`NodeId`]. Every
//! non-root node records its parent index; children are kept in insertion
//! order so that [`SchemaTree::pre_order`] reproduces the order of the source
//! files.

use std::fmt;

use crate::error::VspecError;

/// Index of a node inside a [`SchemaTree`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct NodeId(usize);

impl NodeId {
    /// Returns the arena index of this node.
    #[must_use]
    pub fn index(self) -> usize {
        self.0
    }
}

/// Role of a leaf node.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LeafRole {
    /// Static property of the vehicle (`type: attribute`).
    Attribute,
    /// Read-only dynamic signal (`type: sensor`).
    Sensor,
    /// Writable dynamic signal (`type: actuator`).
    Actuator,
}

/// A primitive datatype tag such as `uint8`, optionally marked as an array (`uint8[]`).
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct DataTypeTag {
    base: String,
    array: bool,
}

impl DataTypeTag {
    /// Suffix marking an array datatype.
    pub const ARRAY_MARKER: &'static str = "[]";

    /// Parses a tag as written in a vspec file.
    #[must_use]
    pub fn parse(tag: &str) -> Self {
        let tag = tag.trim();
        match tag.strip_suffix(Self::ARRAY_MARKER) {
            Some(base) => Self {
                base: base.to_owned(),
                array: true,
            },
            None => Self {
                base: tag.to_owned(),
                array: false,
            },
        }
    }

    /// The primitive type name with any array marker removed.
    #[must_use]
    pub fn base(&self) -> &str {
        &self.base
    }

    /// Whether the tag carries the array marker.
    #[must_use]
    pub fn is_array(&self) -> bool {
        self.array
    }
}

impl fmt::Display for DataTypeTag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.array {
            write!(f, "{}{}", self.base, Self::ARRAY_MARKER)
        } else {
            f.write_str(&self.base)
        }
    }
}

/// The value-carrying part of a leaf node.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Leaf {
    /// Attribute, sensor or actuator.
    pub role: LeafRole,
    /// Declared datatype, if any.
    pub datatype: Option<DataTypeTag>,
    /// Unit name as written in the vspec (e.g. `km/h`).
    pub unit: Option<String>,
    /// Lower bound in its source textual form.
    pub min: Option<String>,
    /// Upper bound in its source textual form.
    pub max: Option<String>,
    /// Ordered enumeration labels (`allowed`, or legacy `enum`).
    pub allowed: Option<Vec<String>>,
    /// Default value in its source textual form.
    pub default: Option<String>,
}

impl Leaf {
    /// Creates a leaf with only its role set.
    #[must_use]
    pub fn new(role: LeafRole) -> Self {
        Self {
            role,
            datatype: None,
            unit: None,
            min: None,
            max: None,
            allowed: None,
            default: None,
        }
    }

    /// Sets the datatype from its vspec tag.
    #[must_use]
    pub fn with_datatype(mut self, tag: &str) -> Self {
        self.datatype = Some(DataTypeTag::parse(tag));
        self
    }

    /// Sets the unit.
    #[must_use]
    pub fn with_unit(mut self, unit: impl Into<String>) -> Self {
        self.unit = Some(unit.into());
        self
    }

    /// Sets both bounds.
    #[must_use]
    pub fn with_range(mut self, min: impl Into<String>, max: impl Into<String>) -> Self {
        self.min = Some(min.into());
        self.max = Some(max.into());
        self
    }

    /// Sets the enumeration labels.
    #[must_use]
    pub fn with_allowed<I, S>(mut self, labels: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.allowed = Some(labels.into_iter().map(Into::into).collect());
        self
    }

    /// Sets the default value.
    #[must_use]
    pub fn with_default(mut self, default: impl Into<String>) -> Self {
        self.default = Some(default.into());
        self
    }
}

/// What kind of node this is, with exactly the fields meaningful for that kind.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum NodeBody {
    /// Structural component grouping other nodes.
    Branch,
    /// Attribute, sensor or actuator.
    Leaf(Leaf),
}

/// One node of the schema tree.
#[derive(Debug, Clone)]
pub struct SchemaNode {
    /// Name, unique among siblings only.
    pub name: String,
    /// Free-text description, possibly empty.
    pub description: String,
    /// Owning branch; `None` only for the root.
    pub parent: Option<NodeId>,
    /// Children in insertion order.
    pub children: Vec<NodeId>,
    /// Kind-specific payload.
    pub body: NodeBody,
}

impl SchemaNode {
    /// Returns true for branch nodes.
    #[must_use]
    pub fn is_branch(&self) -> bool {
        matches!(self.body, NodeBody::Branch)
    }

    /// Returns the leaf payload, if this is a leaf.
    #[must_use]
    pub fn leaf(&self) -> Option<&Leaf> {
        match &self.body {
            NodeBody::Leaf(leaf) => Some(leaf),
            NodeBody::Branch => None,
        }
    }
}

/// A finite, acyclic tree of schema nodes rooted at node 0.
#[derive(Debug, Clone)]
pub struct SchemaTree {
    nodes: Vec<SchemaNode>,
}

impl SchemaTree {
    /// Creates a tree holding a single root branch.
    #[must_use]
    pub fn new(root_name: impl Into<String>, description: impl Into<String>) -> Self {
        Self::with_root(root_name, description, NodeBody::Branch)
    }

    /// Creates a single-node tree whose root carries `body`.
    ///
    /// A leaf root cannot take children, and converters reject it as a leaf
    /// without a parent.
    #[must_use]
    pub fn with_root(
        root_name: impl Into<String>,
        description: impl Into<String>,
        body: NodeBody,
    ) -> Self {
        Self {
            nodes: vec![SchemaNode {
                name: root_name.into(),
                description: description.into(),
                parent: None,
                children: Vec::new(),
                body,
            }],
        }
    }

    /// Returns the root node id.
    #[must_use]
    pub fn root(&self) -> NodeId {
        NodeId(0)
    }

    /// Number of nodes, root included.
    #[must_use]
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    /// A tree always holds its root, so this is always false.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Returns the node for `id`.
    ///
    /// Ids are only ever handed out by this tree, so indexing cannot go out of bounds.
    #[must_use]
    pub fn node(&self, id: NodeId) -> &SchemaNode {
        &self.nodes[id.0]
    }

    /// Returns the parent of `id`, or `None` for the root.
    #[must_use]
    pub fn parent(&self, id: NodeId) -> Option<NodeId> {
        self.node(id).parent
    }

    /// Returns the children of `id` in insertion order.
    #[must_use]
    pub fn children(&self, id: NodeId) -> &[NodeId] {
        &self.node(id).children
    }

    /// Looks up a direct child of `parent` by name.
    #[must_use]
    pub fn child(&self, parent: NodeId, name: &str) -> Option<NodeId> {
        self.children(parent)
            .iter()
            .copied()
            .find(|c| self.node(*c).name == name)
    }

    /// Adds a branch below `parent`.
    ///
    /// # Errors
    ///
    /// Returns an error if `parent` is a leaf or already has a child called `name`.
    pub fn add_branch(
        &mut self,
        parent: NodeId,
        name: impl Into<String>,
        description: impl Into<String>,
    ) -> Result<NodeId, VspecError> {
        self.push(parent, name.into(), description.into(), NodeBody::Branch)
    }

    /// Adds a leaf below `parent`.
    ///
    /// # Errors
    ///
    /// Returns an error if `parent` is a leaf or already has a child called `name`.
    pub fn add_leaf(
        &mut self,
        parent: NodeId,
        name: impl Into<String>,
        leaf: Leaf,
        description: impl Into<String>,
    ) -> Result<NodeId, VspecError> {
        self.push(parent, name.into(), description.into(), NodeBody::Leaf(leaf))
    }

    fn push(
        &mut self,
        parent: NodeId,
        name: String,
        description: String,
        body: NodeBody,
    ) -> Result<NodeId, VspecError> {
        if !self.node(parent).is_branch() {
            return Err(VspecError::ParentNotBranch {
                node: format!("{}.{}", self.qualified_name(parent, "."), name),
            });
        }
        if self.child(parent, &name).is_some() {
            return Err(VspecError::DuplicateNode {
                node: format!("{}.{}", self.qualified_name(parent, "."), name),
            });
        }
        let id = NodeId(self.nodes.len());
        self.nodes.push(SchemaNode {
            name,
            description,
            parent: Some(parent),
            children: Vec::new(),
            body,
        });
        self.nodes[parent.0].children.push(id);
        Ok(id)
    }

    /// Iterates all nodes in pre-order: every parent before its descendants,
    /// siblings in insertion order.
    pub fn pre_order(&self) -> PreOrder<'_> {
        PreOrder {
            tree: self,
            stack: vec![self.root()],
        }
    }

    /// Returns the names from the root down to `id`, joined with `sep`.
    #[must_use]
    pub fn qualified_name(&self, id: NodeId, sep: &str) -> String {
        let mut names = vec![self.node(id).name.as_str()];
        let mut current = self.parent(id);
        while let Some(p) = current {
            names.push(self.node(p).name.as_str());
            current = self.parent(p);
        }
        names.reverse();
        names.join(sep)
    }

    /// Finds a node by its dot-qualified name (root name included).
    #[must_use]
    pub fn find(&self, qualified: &str) -> Option<NodeId> {
        let mut parts = qualified.split('.');
        let root = self.root();
        if parts.next()? != self.node(root).name {
            return None;
        }
        parts.try_fold(root, |id, part| self.child(id, part))
    }
}

/// Pre-order iterator returned by [`SchemaTree::pre_order`].
pub struct PreOrder<'a> {
    tree: &'a SchemaTree,
    stack: Vec<NodeId>,
}

impl Iterator for PreOrder<'_> {
    type Item = NodeId;

    fn next(&mut self) -> Option<NodeId> {
        let id = self.stack.pop()?;
        self.stack
            .extend(self.tree.children(id).iter().rev().copied());
        Some(id)
    }
}
