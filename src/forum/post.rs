//! Posts of the reply tree.
//!
//! The tree keeps every post in one flat arena, in creation order. A post
//! slot records its parent and its index among its siblings instead of a
//! full path, so a chain of replies costs memory linear in its length and
//! cloning or dropping a tree never recurses.
//!
//! Callers see posts through [`PostRef`], a borrowed handle that reads the
//! slot and rebuilds the post's [`PostPath`] on demand. [`PostRecord`] is
//! the owned flat form used for JSON.

use crate::error::{Result, ThreadboardError};
use crate::forum::path::PostPath;
use crate::forum::tree::{ReplyTree, Walk};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Arena slot for one post. Only the tree creates or grows these.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct PostNode {
    /// Arena index of the parent, `None` for a root.
    pub(crate) parent: Option<usize>,
    /// Position among the parent's replies, or among the roots.
    pub(crate) index: usize,
    pub(crate) author: String,
    pub(crate) body: String,
    /// Creation timestamp in milliseconds since Unix epoch.
    pub(crate) created_at: u64,
    /// Arena indices of the direct replies, in insertion order.
    pub(crate) children: Vec<usize>,
}

impl PostNode {
    /// Creates a slot with no replies.
    ///
    /// # Errors
    /// Returns `InvalidField` if the author or body is empty.
    pub(crate) fn new(
        parent: Option<usize>,
        index: usize,
        author: &str,
        body: &str,
        created_at: u64,
    ) -> Result<Self> {
        validate_fields(author, body)?;

        Ok(Self {
            parent,
            index,
            author: author.to_string(),
            body: body.to_string(),
            created_at,
            children: Vec::new(),
        })
    }
}

/// Rejects an empty author or body.
fn validate_fields(author: &str, body: &str) -> Result<()> {
    if author.is_empty() {
        return Err(ThreadboardError::invalid_field("author cannot be empty"));
    }
    if body.is_empty() {
        return Err(ThreadboardError::invalid_field("body cannot be empty"));
    }
    Ok(())
}

/// Timestamp for a post appended after a sibling created at `previous`.
///
/// Raised to the previous sibling's time if the clock reading is older, so
/// siblings stay non-decreasing.
pub(crate) fn next_timestamp(previous: Option<u64>, now: u64) -> u64 {
    previous.map_or(now, |previous| now.max(previous))
}

/// A post in a [`ReplyTree`], borrowed from the tree.
///
/// Two handles are equal when they point at the same post of the same tree.
#[derive(Clone, Copy)]
pub struct PostRef<'a> {
    tree: &'a ReplyTree,
    id: usize,
}

impl<'a> PostRef<'a> {
    pub(crate) fn new(tree: &'a ReplyTree, id: usize) -> Self {
        Self { tree, id }
    }

    fn node(&self) -> &'a PostNode {
        self.tree.node(self.id)
    }

    /// Returns the post's position in the tree.
    ///
    /// Rebuilt by following parent links, so it costs one step per level.
    pub fn path(&self) -> PostPath {
        let mut segments = Vec::new();
        let mut current = Some(self.id);
        while let Some(id) = current {
            let node = self.tree.node(id);
            segments.push(node.index);
            current = node.parent;
        }
        segments.reverse();
        PostPath::from_tree_segments(segments)
    }

    /// Returns the number of ancestors; roots are at depth 0.
    pub fn depth(&self) -> usize {
        let mut depth = 0;
        let mut current = self.node().parent;
        while let Some(id) = current {
            depth += 1;
            current = self.tree.node(id).parent;
        }
        depth
    }

    /// Returns the author name.
    pub fn author(&self) -> &'a str {
        &self.node().author
    }

    /// Returns the post body.
    pub fn body(&self) -> &'a str {
        &self.node().body
    }

    /// Returns the creation timestamp in milliseconds.
    pub fn created_at(&self) -> u64 {
        self.node().created_at
    }

    /// Returns the direct replies in insertion order.
    pub fn children(&self) -> impl ExactSizeIterator<Item = PostRef<'a>> + 'a {
        let tree = self.tree;
        self.node()
            .children
            .iter()
            .map(move |&id| PostRef::new(tree, id))
    }

    /// Returns the direct reply at `index`, if there is one.
    pub fn child(&self, index: usize) -> Option<PostRef<'a>> {
        self.node()
            .children
            .get(index)
            .map(|&id| PostRef::new(self.tree, id))
    }

    /// Returns the post this one replies to, `None` for a root.
    pub fn parent(&self) -> Option<PostRef<'a>> {
        self.node().parent.map(|id| PostRef::new(self.tree, id))
    }

    /// Returns the number of direct replies.
    pub fn reply_count(&self) -> usize {
        self.node().children.len()
    }

    /// Returns the number of posts in this subtree, this one included.
    pub fn subtree_size(&self) -> usize {
        Walk::subtree(self.tree, self.id).count()
    }

    /// Copies the post into its flat owned form.
    pub fn to_record(&self) -> PostRecord {
        PostRecord {
            path: self.path(),
            author: self.author().to_string(),
            body: self.body().to_string(),
            created_at: self.created_at(),
        }
    }
}

impl PartialEq for PostRef<'_> {
    fn eq(&self, other: &Self) -> bool {
        std::ptr::eq(self.tree, other.tree) && self.id == other.id
    }
}

impl Eq for PostRef<'_> {}

impl fmt::Debug for PostRef<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let node = self.node();
        f.debug_struct("PostRef")
            .field("path", &self.path())
            .field("author", &node.author)
            .field("body_len", &node.body.len())
            .field("created_at", &node.created_at)
            .field("reply_count", &node.children.len())
            .finish()
    }
}

/// One post as a flat, owned record.
///
/// This is the shape of `/posts.json` entries and of a serialized
/// [`ReplyTree`]. Replies are not nested; a record's place in the tree is
/// its `path`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PostRecord {
    pub path: PostPath,
    pub author: String,
    pub body: String,
    pub created_at: u64,
}

impl From<PostRef<'_>> for PostRecord {
    fn from(post: PostRef<'_>) -> Self {
        post.to_record()
    }
}
