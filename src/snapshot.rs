use crate::bar::{BarStyle, TitlePosition};
use crate::error::{Result, invalid};
use crate::tree::ProgressTree;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NodeKind {
    Group,
    Leaf,
}

#[derive(Debug, Clone)]
pub(crate) struct Node {
    pub(crate) name: String,
    pub(crate) depth: usize,
    pub(crate) kind: NodeKind,
    pub(crate) parent: Option<usize>,
    pub(crate) children: Vec<usize>,
    pub(crate) style: Option<BarStyle>,
    pub(crate) value: u64,
}

impl Node {
    fn lines(&self) -> usize {
        match self.kind {
            NodeKind::Group => 2,
            NodeKind::Leaf => self
                .style
                .as_ref()
                .and_then(|s| s.title_position)
                .unwrap_or(TitlePosition::Above)
                .lines(),
        }
    }
}

/// A frozen copy of a [`ProgressTree`], taken once per draw.
///
/// Nodes are stored flat in draw order: depth-first, siblings sorted by
/// key. Every leaf value is read exactly once when the snapshot is taken,
/// so nothing done to the snapshot reaches the caller's tree.
#[derive(Debug, Clone)]
pub struct RenderSnapshot {
    nodes: Vec<Node>,
    aggregated: bool,
}

impl RenderSnapshot {
    /// Copies `tree`. The root must be a group and no group may be empty.
    pub fn take(tree: &ProgressTree) -> Result<Self> {
        let Some(root) = tree.as_group() else {
            return Err(invalid("the root of a progress tree must be a group"));
        };
        if root.is_empty() {
            return Err(invalid("cannot draw an empty progress tree"));
        }
        let mut nodes = Vec::new();
        push_children(&mut nodes, tree, None, 0)?;
        Ok(Self {
            nodes,
            aggregated: false,
        })
    }

    /// Copies and aggregates `tree` in one step.
    pub fn resolve(tree: &ProgressTree) -> Result<Self> {
        let mut snapshot = Self::take(tree)?;
        snapshot.aggregate();
        Ok(snapshot)
    }

    /// Rows needed to draw the snapshot; matches [`ProgressTree::lines_required`]
    /// for the tree it was taken from.
    pub fn lines_required(&self) -> usize {
        self.nodes.iter().map(Node::lines).sum::<usize>() + 2
    }

    /// Resolves every group's value to the floored mean of its direct children.
    ///
    /// Children sit after their parent in draw order, so one backwards pass
    /// sees every child resolved before its parent. Values are averaged as
    /// they are, whatever each leaf's `max_value`.
    pub fn aggregate(&mut self) {
        for i in (0..self.nodes.len()).rev() {
            if self.nodes[i].kind != NodeKind::Group {
                continue;
            }
            let children = &self.nodes[i].children;
            let count = children.len() as u128;
            let sum: u128 = children
                .iter()
                .map(|&c| u128::from(self.nodes[c].value))
                .sum();
            self.nodes[i].value = (sum / count) as u64;
        }
        self.aggregated = true;
    }

    pub fn is_aggregated(&self) -> bool {
        self.aggregated
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// All nodes in draw order.
    pub fn nodes(&self) -> impl ExactSizeIterator<Item = NodeView<'_>> {
        (0..self.nodes.len()).map(move |index| NodeView {
            snapshot: self,
            index,
        })
    }

    /// Looks a node up by its key path from the root.
    pub fn get(&self, path: &[&str]) -> Option<NodeView<'_>> {
        let mut candidates: Vec<usize> = self
            .nodes
            .iter()
            .enumerate()
            .filter(|(_, n)| n.parent.is_none())
            .map(|(i, _)| i)
            .collect();
        let mut found = None;
        for name in path {
            let index = *candidates.iter().find(|&&i| self.nodes[i].name == *name)?;
            candidates = self.nodes[index].children.clone();
            found = Some(index);
        }
        found.map(|index| NodeView {
            snapshot: self,
            index,
        })
    }
}

fn push_children(
    nodes: &mut Vec<Node>, tree: &ProgressTree, parent: Option<usize>, depth: usize,
) -> Result<()> {
    let Some(group) = tree.as_group() else {
        return Ok(());
    };
    let mut children: Vec<_> = group.children.iter().collect();
    children.sort_by(|a, b| a.0.cmp(b.0));

    for (name, child) in children {
        let index = nodes.len();
        let (kind, style, value) = match child {
            ProgressTree::Group(g) if g.is_empty() => {
                return Err(invalid(format!("group `{name}` has no children")));
            }
            ProgressTree::Group(g) => (NodeKind::Group, g.style.clone(), 0),
            ProgressTree::Leaf(leaf) => (NodeKind::Leaf, leaf.style.clone(), leaf.value.get()),
        };
        nodes.push(Node {
            name: name.clone(),
            depth,
            kind,
            parent,
            children: Vec::new(),
            style,
            value,
        });
        if let Some(p) = parent {
            nodes[p].children.push(index);
        }
        push_children(nodes, child, Some(index), depth + 1)?;
    }
    Ok(())
}

/// Read-only view of one node of a [`RenderSnapshot`].
#[derive(Clone, Copy)]
pub struct NodeView<'a> {
    snapshot: &'a RenderSnapshot,
    index: usize,
}

impl<'a> NodeView<'a> {
    fn node(&self) -> &'a Node {
        &self.snapshot.nodes[self.index]
    }

    pub fn name(&self) -> &'a str {
        &self.node().name
    }

    /// Nesting depth; children of the root are depth 0.
    pub fn depth(&self) -> usize {
        self.node().depth
    }

    pub fn kind(&self) -> NodeKind {
        self.node().kind
    }

    /// The leaf's reading, or the group's aggregate once aggregated.
    pub fn value(&self) -> u64 {
        self.node().value
    }

    pub fn style(&self) -> Option<&'a BarStyle> {
        self.node().style.as_ref()
    }

    pub fn parent(&self) -> Option<NodeView<'a>> {
        self.node().parent.map(|index| NodeView {
            snapshot: self.snapshot,
            index,
        })
    }

    /// Direct children, sorted by key.
    pub fn children(&self) -> impl ExactSizeIterator<Item = NodeView<'a>> + use<'a> {
        let snapshot = self.snapshot;
        self.node()
            .children
            .iter()
            .map(move |&index| NodeView { snapshot, index })
    }
}

impl std::fmt::Debug for NodeView<'_> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("NodeView")
            .field("name", &self.name())
            .field("depth", &self.depth())
            .field("kind", &self.kind())
            .field("value", &self.value())
            .finish()
    }
}
