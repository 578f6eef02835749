//! Access-expression nodes and the arena that owns them.
//!
//! Only the node kinds that matter for access paths are modelled; anything
//! else a host syntax tree contains (literals, binary expressions, lambdas)
//! is [`AccessNode::Opaque`].

use smallvec::SmallVec;
use std::sync::Arc;

/// Index of a node in an [`AccessArena`] (or any other [`AccessSyntax`]).
///
/// Node identity is the index: two indices are the same node iff they are
/// equal.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct NodeIndex(pub u32);

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum AccessNode {
    /// A bare name: `foo`.
    Identifier(Arc<str>),
    /// `this`.
    SelfReference,
    /// `receiver.name`.
    MemberAccess { receiver: NodeIndex, name: Arc<str> },
    /// `receiver?.name`.
    ConditionalAccess { receiver: NodeIndex, name: Arc<str> },
    /// `target.name<type_arguments>(arguments)`, or `name(...)` without a
    /// target.
    Invocation {
        target: Option<NodeIndex>,
        name: Arc<str>,
        type_arguments: SmallVec<[Arc<str>; 2]>,
        arguments: SmallVec<[NodeIndex; 4]>,
    },
    /// `(ty)operand`.
    Cast { ty: Arc<str>, operand: NodeIndex },
    /// `operand as ty`.
    TypeTest { ty: Arc<str>, operand: NodeIndex },
    /// `(operand)`.
    Parenthesized { operand: NodeIndex },
    /// Any expression that does not continue an access path.
    Opaque,
}

impl AccessNode {
    /// Member name this node contributes to a path, if any.
    pub fn member_name(&self) -> Option<&Arc<str>> {
        match self {
            Self::Identifier(name)
            | Self::MemberAccess { name, .. }
            | Self::ConditionalAccess { name, .. }
            | Self::Invocation { name, .. } => Some(name),
            Self::SelfReference
            | Self::Cast { .. }
            | Self::TypeTest { .. }
            | Self::Parenthesized { .. }
            | Self::Opaque => None,
        }
    }

    /// The wrapped expression of a cast, type test or parenthesized node.
    pub fn unwrapped_operand(&self) -> Option<NodeIndex> {
        match self {
            Self::Cast { operand, .. }
            | Self::TypeTest { operand, .. }
            | Self::Parenthesized { operand } => Some(*operand),
            _ => None,
        }
    }
}

/// Read access to access-expression nodes.
///
/// Host syntax trees implement this to be walked without copying into an
/// [`AccessArena`].
pub trait AccessSyntax {
    fn node(&self, index: NodeIndex) -> Option<&AccessNode>;
}

/// Append-only node storage.
#[derive(Debug, Default, Clone)]
pub struct AccessArena {
    nodes: Vec<AccessNode>,
}

impl AccessArena {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            nodes: Vec::with_capacity(capacity),
        }
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    pub fn clear(&mut self) {
        self.nodes.clear();
    }

    pub fn add(&mut self, node: AccessNode) -> NodeIndex {
        let index = NodeIndex(self.nodes.len() as u32);
        self.nodes.push(node);
        index
    }

    /// Overwrite an existing node. Lets a host patch a node after its
    /// children exist, which is how reference cycles (an accessor body that
    /// reads its own property) end up in the arena.
    pub fn replace(&mut self, index: NodeIndex, node: AccessNode) -> Option<AccessNode> {
        self.nodes
            .get_mut(index.0 as usize)
            .map(|slot| std::mem::replace(slot, node))
    }

    pub fn add_identifier(&mut self, name: &str) -> NodeIndex {
        self.add(AccessNode::Identifier(Arc::from(name)))
    }

    pub fn add_self_reference(&mut self) -> NodeIndex {
        self.add(AccessNode::SelfReference)
    }

    pub fn add_member_access(&mut self, receiver: NodeIndex, name: &str) -> NodeIndex {
        self.add(AccessNode::MemberAccess {
            receiver,
            name: Arc::from(name),
        })
    }

    pub fn add_conditional_access(&mut self, receiver: NodeIndex, name: &str) -> NodeIndex {
        self.add(AccessNode::ConditionalAccess {
            receiver,
            name: Arc::from(name),
        })
    }

    pub fn add_invocation(
        &mut self,
        target: Option<NodeIndex>,
        name: &str,
        type_arguments: &[&str],
        arguments: &[NodeIndex],
    ) -> NodeIndex {
        self.add(AccessNode::Invocation {
            target,
            name: Arc::from(name),
            type_arguments: type_arguments.iter().map(|ty| Arc::from(*ty)).collect(),
            arguments: arguments.iter().copied().collect(),
        })
    }

    pub fn add_cast(&mut self, ty: &str, operand: NodeIndex) -> NodeIndex {
        self.add(AccessNode::Cast {
            ty: Arc::from(ty),
            operand,
        })
    }

    pub fn add_type_test(&mut self, operand: NodeIndex, ty: &str) -> NodeIndex {
        self.add(AccessNode::TypeTest {
            ty: Arc::from(ty),
            operand,
        })
    }

    pub fn add_parenthesized(&mut self, operand: NodeIndex) -> NodeIndex {
        self.add(AccessNode::Parenthesized { operand })
    }

    pub fn add_opaque(&mut self) -> NodeIndex {
        self.add(AccessNode::Opaque)
    }

    /// A `this.a.b.c` chain; the index of the outermost access.
    pub fn add_self_chain(&mut self, names: &[&str]) -> NodeIndex {
        names
            .iter()
            .fold(self.add_self_reference(), |receiver, name| {
                self.add_member_access(receiver, name)
            })
    }
}

impl AccessSyntax for AccessArena {
    #[inline]
    fn node(&self, index: NodeIndex) -> Option<&AccessNode> {
        self.nodes.get(index.0 as usize)
    }
}

#[cfg(test)]
#[path = "../tests/node_tests.rs"]
mod tests;
