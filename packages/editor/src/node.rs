use sitecraft_common::{NodeId, Props};

/// One component instance in the tree store arena.
///
/// Parent and children are id references into the same arena, so moving a
/// subtree relinks two ids instead of copying anything.
#[derive(Debug, Clone, PartialEq)]
pub struct Node {
    pub id: NodeId,

    /// Lookup key into the component registry
    pub type_name: String,

    pub props: Props,

    pub children: Vec<NodeId>,

    /// `None` for the root and for nodes not yet attached
    pub parent: Option<NodeId>,

    /// Custom label shown in the layers panel
    pub display_name: Option<String>,
}

impl Node {
    pub fn new(id: NodeId, type_name: impl Into<String>, props: Props) -> Self {
        Self {
            id,
            type_name: type_name.into(),
            props,
            children: Vec::new(),
            parent: None,
            display_name: None,
        }
    }

    pub fn is_attached(&self) -> bool {
        self.parent.is_some()
    }

    pub fn child_index(&self, child: &NodeId) -> Option<usize> {
        self.children.iter().position(|c| c == child)
    }
}
