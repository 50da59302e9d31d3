//! 导航树数据模型

use rustc_hash::FxHashSet;
use slotmap::{new_key_type, SlotMap};
use std::collections::BTreeMap;
use std::fmt;

new_key_type! { pub struct NodeId; }

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum NodeKind {
    File,
    Dir,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TreeError {
    ParentNotDirectory,
    NameExists,
    InvalidNodeId,
    EmptyPath,
}

impl fmt::Display for TreeError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TreeError::ParentNotDirectory => write!(f, "parent is not a directory"),
            TreeError::NameExists => write!(f, "name already exists in parent"),
            TreeError::InvalidNodeId => write!(f, "invalid node id"),
            TreeError::EmptyPath => write!(f, "path has no components"),
        }
    }
}

impl std::error::Error for TreeError {}

#[derive(Debug, Clone)]
struct Node {
    kind: NodeKind,
    label: String,
    parent: Option<NodeId>,
    children: Option<BTreeMap<String, NodeId>>,
}

impl Node {
    fn new(kind: NodeKind, label: String, parent: Option<NodeId>) -> Self {
        let children = match kind {
            NodeKind::File => None,
            NodeKind::Dir => Some(BTreeMap::new()),
        };
        Self {
            kind,
            label,
            parent,
            children,
        }
    }
}

/// One node of a tree snapshot handed to the search coordinator.
///
/// A `None` label marks a node the host could not describe; searches skip it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SnapshotNode<Id> {
    pub id: Id,
    pub parent: Option<Id>,
    pub label: Option<String>,
}

#[derive(Debug, Clone)]
pub struct TreeRow {
    pub id: NodeId,
    pub depth: u16,
    pub label: String,
    pub is_dir: bool,
    pub is_expanded: bool,
}

pub struct NavigatorTree {
    arena: SlotMap<NodeId, Node>,
    root: NodeId,
    expanded: FxHashSet<NodeId>,
}

impl NavigatorTree {
    pub fn new(root_label: impl Into<String>) -> Self {
        let mut arena = SlotMap::with_key();
        let root = arena.insert(Node::new(NodeKind::Dir, root_label.into(), None));

        let mut expanded = FxHashSet::default();
        expanded.insert(root);

        Self {
            arena,
            root,
            expanded,
        }
    }

    pub fn root(&self) -> NodeId {
        self.root
    }

    pub fn len(&self) -> usize {
        self.arena.len()
    }

    pub fn is_empty(&self) -> bool {
        self.arena.len() <= 1
    }

    pub fn insert_child(
        &mut self,
        parent: NodeId,
        label: impl Into<String>,
        kind: NodeKind,
    ) -> Result<NodeId, TreeError> {
        let label = label.into();
        {
            let parent_ro = self.arena.get(parent).ok_or(TreeError::InvalidNodeId)?;
            let children_ro = parent_ro
                .children
                .as_ref()
                .ok_or(TreeError::ParentNotDirectory)?;
            if children_ro.contains_key(&label) {
                return Err(TreeError::NameExists);
            }
        }

        let id = self
            .arena
            .insert(Node::new(kind, label.clone(), Some(parent)));

        let children = self
            .arena
            .get_mut(parent)
            .and_then(|n| n.children.as_mut())
            .ok_or(TreeError::InvalidNodeId)?;
        children.insert(label, id);

        Ok(id)
    }

    /// Inserts a `/`-separated path below the root, creating intermediate
    /// directories. A trailing `/` makes the last component a directory.
    /// Existing nodes are reused, so inserting the same path twice is fine.
    pub fn insert_path(&mut self, path: &str) -> Result<NodeId, TreeError> {
        let trimmed = path.trim();
        let is_dir = trimmed.ends_with('/');
        let components: Vec<&str> = trimmed.split('/').filter(|c| !c.is_empty()).collect();
        let Some((last, dirs)) = components.split_last() else {
            return Err(TreeError::EmptyPath);
        };

        let mut current = self.root;
        for dir in dirs {
            current = match self.child_by_label(current, dir) {
                Some(existing) if self.is_dir(existing) => existing,
                Some(_) => return Err(TreeError::ParentNotDirectory),
                None => self.insert_child(current, *dir, NodeKind::Dir)?,
            };
        }

        let kind = if is_dir { NodeKind::Dir } else { NodeKind::File };
        match self.child_by_label(current, last) {
            Some(existing) => Ok(existing),
            None => self.insert_child(current, *last, kind),
        }
    }

    pub fn child_by_label(&self, parent: NodeId, label: &str) -> Option<NodeId> {
        self.arena
            .get(parent)?
            .children
            .as_ref()?
            .get(label)
            .copied()
    }

    pub fn get_label(&self, id: NodeId) -> Option<&str> {
        self.arena.get(id).map(|n| n.label.as_str())
    }

    pub fn parent(&self, id: NodeId) -> Option<NodeId> {
        self.arena.get(id).and_then(|n| n.parent)
    }

    pub fn is_dir(&self, id: NodeId) -> bool {
        self.arena
            .get(id)
            .map(|n| n.kind == NodeKind::Dir)
            .unwrap_or(false)
    }

    pub fn is_expanded(&self, id: NodeId) -> bool {
        self.expanded.contains(&id)
    }

    pub fn toggle_expand(&mut self, id: NodeId) {
        if self.is_dir(id) {
            if self.expanded.contains(&id) {
                self.expanded.remove(&id);
            } else {
                self.expanded.insert(id);
            }
        }
    }

    pub fn expand(&mut self, id: NodeId) {
        if self.is_dir(id) {
            self.expanded.insert(id);
        }
    }

    pub fn collapse(&mut self, id: NodeId) {
        if id != self.root {
            self.expanded.remove(&id);
        }
    }

    pub fn expand_all(&mut self) {
        let dirs: Vec<NodeId> = self
            .arena
            .iter()
            .filter(|(_, n)| n.kind == NodeKind::Dir)
            .map(|(id, _)| id)
            .collect();
        self.expanded.extend(dirs);
    }

    /// Expands every ancestor of `id` so that it shows up in the view.
    /// Returns whether anything changed.
    pub fn reveal(&mut self, id: NodeId) -> bool {
        let mut changed = false;
        let mut current = self.parent(id);
        while let Some(ancestor) = current {
            changed |= self.expanded.insert(ancestor);
            current = self.parent(ancestor);
        }
        changed
    }

    /// Depth-first snapshot in view order (directories before files, each
    /// group sorted by label). The root itself is not included.
    pub fn snapshot(&self, visible_only: bool) -> Vec<SnapshotNode<NodeId>> {
        self.snapshot_filtered(visible_only, |_| false)
    }

    /// Like [`snapshot`](Self::snapshot), but skips every node whose
    /// root-relative path satisfies `excluded`, together with its subtree.
    pub fn snapshot_filtered(
        &self,
        visible_only: bool,
        excluded: impl Fn(&str) -> bool,
    ) -> Vec<SnapshotNode<NodeId>> {
        self.walk(visible_only, &excluded)
            .into_iter()
            .filter_map(|(id, _)| {
                let node = self.arena.get(id)?;
                Some(SnapshotNode {
                    id,
                    parent: node.parent.filter(|p| *p != self.root),
                    label: Some(node.label.clone()),
                })
            })
            .collect()
    }

    pub fn flatten_for_view(&self) -> Vec<TreeRow> {
        self.flatten_for_view_filtered(|_| false)
    }

    pub fn flatten_for_view_filtered(&self, excluded: impl Fn(&str) -> bool) -> Vec<TreeRow> {
        self.walk(true, &excluded)
            .into_iter()
            .filter_map(|(id, depth)| {
                let node = self.arena.get(id)?;
                Some(TreeRow {
                    id,
                    depth,
                    label: node.label.clone(),
                    is_dir: node.kind == NodeKind::Dir,
                    is_expanded: self.expanded.contains(&id),
                })
            })
            .collect()
    }

    /// `/`-separated path of `id` relative to the root. The root maps to "".
    pub fn path_of(&self, id: NodeId) -> Option<String> {
        let mut parts = Vec::new();
        let mut current = id;
        while current != self.root {
            let node = self.arena.get(current)?;
            parts.push(node.label.as_str());
            current = node.parent?;
        }
        parts.reverse();
        Some(parts.join("/"))
    }

    fn walk(&self, visible_only: bool, excluded: &dyn Fn(&str) -> bool) -> Vec<(NodeId, u16)> {
        let mut result = Vec::new();
        let mut stack: Vec<(NodeId, u16, String)> = vec![(self.root, 0, String::new())];

        while let Some((id, depth, path)) = stack.pop() {
            if id != self.root {
                if excluded(&path) {
                    continue;
                }
                result.push((id, depth));
            }

            if visible_only && !self.expanded.contains(&id) {
                continue;
            }
            let Some(children) = self.arena.get(id).and_then(|n| n.children.as_ref()) else {
                continue;
            };

            let mut dirs = Vec::new();
            let mut files = Vec::new();
            for (label, &child_id) in children {
                let child_path = if path.is_empty() {
                    label.clone()
                } else {
                    format!("{path}/{label}")
                };
                match self.arena.get(child_id).map(|c| c.kind) {
                    Some(NodeKind::Dir) => dirs.push((child_id, child_path)),
                    Some(NodeKind::File) => files.push((child_id, child_path)),
                    None => {}
                }
            }

            for (file_id, file_path) in files.into_iter().rev() {
                stack.push((file_id, depth + 1, file_path));
            }
            for (dir_id, dir_path) in dirs.into_iter().rev() {
                stack.push((dir_id, depth + 1, dir_path));
            }
        }

        result
    }
}
