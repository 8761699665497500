use indexmap::IndexMap;

use crate::bar::{BarStyle, TitlePosition};
use crate::value::Value;

/// A hierarchy of named progress nodes.
///
/// Groups hold named children and are displayed as the mean of their
/// children; leaves are backed by a [`Value`]. Children are kept in
/// insertion order here, but always drawn sorted by key.
///
/// ```rust,ignore
/// let tank1 = Value::new(0);
/// let tank2 = Value::new(0);
/// let tree = ProgressTree::group([(
///     "Prepare fuel",
///     ProgressTree::group([
///         ("Tank 1", BarLeaf::new(tank1.clone())),
///         ("Tank 2", BarLeaf::new(tank2.clone())),
///     ]),
/// )]);
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ProgressTree {
    Group(Group),
    Leaf(BarLeaf),
}

impl ProgressTree {
    /// Builds a group from `(name, node)` pairs; a repeated name replaces the
    /// earlier node.
    pub fn group<K, N>(children: impl IntoIterator<Item = (K, N)>) -> Self
    where
        K: Into<String>,
        N: Into<ProgressTree>,
    {
        Self::Group(Group::from_iter(children))
    }

    pub fn leaf(value: Value) -> Self {
        Self::Leaf(BarLeaf::new(value))
    }

    /// Rows needed to draw this node and everything below it.
    ///
    /// A group takes two rows for its own bar plus its children's rows; a
    /// leaf takes one row when its title sits beside the bar and two
    /// otherwise. Values play no part.
    pub fn lines_required(&self) -> usize {
        match self {
            Self::Group(group) => {
                group
                    .children
                    .values()
                    .map(ProgressTree::lines_required)
                    .sum::<usize>()
                    + 2
            }
            Self::Leaf(leaf) => leaf.title_position().lines(),
        }
    }

    /// A deep copy whose leaves no longer share cells with `self`.
    pub fn detached(&self) -> Self {
        match self {
            Self::Group(group) => Self::Group(Group {
                children: group
                    .children
                    .iter()
                    .map(|(k, v)| (k.clone(), v.detached()))
                    .collect(),
                style: group.style.clone(),
            }),
            Self::Leaf(leaf) => Self::Leaf(BarLeaf {
                value: leaf.value.detach(),
                style: leaf.style.clone(),
            }),
        }
    }

    pub fn as_group(&self) -> Option<&Group> {
        match self {
            Self::Group(group) => Some(group),
            Self::Leaf(_) => None,
        }
    }

    /// Follows `path` through nested groups.
    pub fn get(&self, path: &[&str]) -> Option<&ProgressTree> {
        match path.split_first() {
            None => Some(self),
            Some((head, rest)) => self.as_group()?.children.get(*head)?.get(rest),
        }
    }
}

impl From<Group> for ProgressTree {
    fn from(group: Group) -> Self {
        Self::Group(group)
    }
}

impl From<BarLeaf> for ProgressTree {
    fn from(leaf: BarLeaf) -> Self {
        Self::Leaf(leaf)
    }
}

/// An interior node: named children plus an optional style for its own
/// aggregate bar.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Group {
    pub(crate) children: IndexMap<String, ProgressTree>,
    pub(crate) style: Option<BarStyle>,
}

impl Group {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn child(mut self, name: impl Into<String>, node: impl Into<ProgressTree>) -> Self {
        self.insert(name, node);
        self
    }

    /// Style for this group's aggregate bar instead of the engine's default.
    pub fn with_style(mut self, style: BarStyle) -> Self {
        self.style = Some(style);
        self
    }

    /// Adds or replaces the child called `name`, returning the old node.
    pub fn insert(
        &mut self, name: impl Into<String>, node: impl Into<ProgressTree>,
    ) -> Option<ProgressTree> {
        self.children.insert(name.into(), node.into())
    }

    pub fn remove(&mut self, name: &str) -> Option<ProgressTree> {
        self.children.shift_remove(name)
    }

    pub fn len(&self) -> usize {
        self.children.len()
    }

    pub fn is_empty(&self) -> bool {
        self.children.is_empty()
    }

    pub fn children(&self) -> impl ExactSizeIterator<Item = (&str, &ProgressTree)> {
        self.children.iter().map(|(k, v)| (k.as_str(), v))
    }

    pub fn style(&self) -> Option<&BarStyle> {
        self.style.as_ref()
    }
}

impl<K: Into<String>, N: Into<ProgressTree>> FromIterator<(K, N)> for Group {
    fn from_iter<I: IntoIterator<Item = (K, N)>>(iter: I) -> Self {
        Self {
            children: iter.into_iter().map(|(k, n)| (k.into(), n.into())).collect(),
            style: None,
        }
    }
}

/// A leaf backed by a shared [`Value`].
///
/// Without a style the leaf is drawn like a group's bar; a style overrides
/// it, including the title placement.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BarLeaf {
    pub(crate) value: Value,
    pub(crate) style: Option<BarStyle>,
}

impl BarLeaf {
    pub fn new(value: Value) -> Self {
        Self { value, style: None }
    }

    pub fn with_style(value: Value, style: BarStyle) -> Self {
        Self {
            value,
            style: Some(style),
        }
    }

    pub fn value(&self) -> &Value {
        &self.value
    }

    pub fn style(&self) -> Option<&BarStyle> {
        self.style.as_ref()
    }

    /// Title placement used inside a tree; above the bar unless the style says otherwise.
    pub fn title_position(&self) -> TitlePosition {
        self.style
            .as_ref()
            .and_then(|s| s.title_position)
            .unwrap_or(TitlePosition::Above)
    }
}
