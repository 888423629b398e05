//! The callback-defined tree structure.

use std::fmt;

use super::{NodeShape, TreeNodeId};

type ChildUidsFn = dyn Fn(&str) -> Vec<TreeNodeId> + Send + Sync;
type IsBranchFn = dyn Fn(&str) -> bool + Send + Sync;
type CreateNodeFn<C> = dyn Fn(bool) -> C + Send + Sync;
type UpdateNodeFn<C> = dyn Fn(&str, bool, &mut C) + Send + Sync;

/// The four callbacks that define a tree's structure and row content.
///
/// The tree never stores the hierarchy itself. Every layout pass asks
/// `child_uids` again for each open branch, so callers with expensive
/// lookups should memoize on their side.
///
/// Any callback may be left unset. The corresponding behavior is then
/// silently disabled: without `is_branch` every node is a leaf and the tree
/// is a flat list of the root's children; without `update_node` rows are
/// never bound to data; without `create_node` rows have no content at all.
///
/// # Example
///
/// ```
/// use thicket::widget::widgets::{Label, TreeData};
///
/// let data = TreeData::new()
///     .with_child_uids(|uid| match uid {
///         "" => vec!["fruit".into(), "bread".into()],
///         "fruit" => vec!["apple".into(), "pear".into()],
///         _ => Vec::new(),
///     })
///     .with_is_branch(|uid| uid.is_empty() || uid == "fruit")
///     .with_create_node(|_branch| Label::new("template"))
///     .with_update_node(|uid, _branch, label: &mut Label| label.set_text(uid));
///
/// assert_eq!(data.child_uids("fruit").len(), 2);
/// ```
pub struct TreeData<C> {
    child_uids: Option<Box<ChildUidsFn>>,
    is_branch: Option<Box<IsBranchFn>>,
    create_node: Option<Box<CreateNodeFn<C>>>,
    update_node: Option<Box<UpdateNodeFn<C>>>,
}

impl<C> Default for TreeData<C> {
    fn default() -> Self {
        Self::new()
    }
}

impl<C> fmt::Debug for TreeData<C> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TreeData")
            .field("child_uids", &self.child_uids.is_some())
            .field("is_branch", &self.is_branch.is_some())
            .field("create_node", &self.create_node.is_some())
            .field("update_node", &self.update_node.is_some())
            .finish()
    }
}

impl<C> TreeData<C> {
    /// Create a data source with no callbacks set.
    pub fn new() -> Self {
        Self {
            child_uids: None,
            is_branch: None,
            create_node: None,
            update_node: None,
        }
    }

    /// Set the callback returning a node's children, in display order.
    pub fn with_child_uids<F>(mut self, f: F) -> Self
    where
        F: Fn(&str) -> Vec<TreeNodeId> + Send + Sync + 'static,
    {
        self.child_uids = Some(Box::new(f));
        self
    }

    /// Set the callback classifying a node as a branch.
    pub fn with_is_branch<F>(mut self, f: F) -> Self
    where
        F: Fn(&str) -> bool + Send + Sync + 'static,
    {
        self.is_branch = Some(Box::new(f));
        self
    }

    /// Set the factory for row content templates.
    ///
    /// The argument is `true` when the template will display a branch.
    pub fn with_create_node<F>(mut self, f: F) -> Self
    where
        F: Fn(bool) -> C + Send + Sync + 'static,
    {
        self.create_node = Some(Box::new(f));
        self
    }

    /// Set the callback that binds a node's data into a template.
    ///
    /// It runs whenever a row is bound to a node and again on every refresh
    /// of a row already in view, so it must be safe to repeat.
    pub fn with_update_node<F>(mut self, f: F) -> Self
    where
        F: Fn(&str, bool, &mut C) + Send + Sync + 'static,
    {
        self.update_node = Some(Box::new(f));
        self
    }

    /// Children of `uid`, or nothing if no child callback is set.
    pub fn child_uids(&self, uid: &str) -> Vec<TreeNodeId> {
        self.child_uids.as_ref().map(|f| f(uid)).unwrap_or_default()
    }

    /// Whether `uid` is a branch. Always `false` without a classifier.
    pub fn is_branch(&self, uid: &str) -> bool {
        self.is_branch.as_ref().is_some_and(|f| f(uid))
    }

    /// Create a content template, if a factory is set.
    pub fn create_node(&self, branch: bool) -> Option<C> {
        self.create_node.as_ref().map(|f| f(branch))
    }

    /// Bind `uid` into `content`. Does nothing without an update callback.
    pub fn update_node(&self, uid: &str, branch: bool, content: &mut C) {
        if let Some(f) = &self.update_node {
            f(uid, branch, content);
        }
    }

    /// Visit every row on an open path in depth-first pre-order.
    ///
    /// An empty `root` is transparent: it produces no row and its children
    /// start at depth 0. Any other root is rendered as a branch at depth 0.
    /// The root is always treated as an open branch regardless of
    /// `is_open` and is never passed to the classifier.
    ///
    /// Cyclic child lists recurse forever.
    pub(crate) fn walk(
        &self,
        root: &str,
        is_open: &dyn Fn(&str) -> bool,
        on_row: &mut dyn FnMut(&str, NodeShape, usize),
    ) {
        let child_depth = if root.is_empty() {
            0
        } else {
            on_row(root, NodeShape::Branch, 0);
            1
        };
        for child in self.child_uids(root) {
            self.walk_node(&child, child_depth, is_open, on_row);
        }
    }

    fn walk_node(
        &self,
        uid: &str,
        depth: usize,
        is_open: &dyn Fn(&str) -> bool,
        on_row: &mut dyn FnMut(&str, NodeShape, usize),
    ) {
        if !self.is_branch(uid) {
            on_row(uid, NodeShape::Leaf, depth);
            return;
        }
        on_row(uid, NodeShape::Branch, depth);
        if is_open(uid) {
            for child in self.child_uids(uid) {
                self.walk_node(&child, depth + 1, is_open, on_row);
            }
        }
    }
}
