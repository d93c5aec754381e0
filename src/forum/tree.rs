//! The reply forest.
//!
//! [`ReplyTree`] owns every post. Posts sit in a flat arena in creation
//! order; each slot lists its replies by arena index and remembers its
//! parent. Lookups always descend from the roots by index, so no handle
//! into the tree outlives the borrow that produced it.
//!
//! ## Addressing
//!
//! ```text
//! roots[0]                       "0"
//!     └── children[0]            "0,0"
//!             └── children[0]    "0,0,0"
//!     └── children[1]            "0,1"
//! roots[1]                       "1"
//! ```
//!
//! A new post's path is fixed at insertion: its parent's path plus the number
//! of replies the parent had before the append. Nothing is ever removed, so
//! a path stays valid and unique for the life of the tree.
//!
//! ## Serialized form
//!
//! A tree serializes as a flat sequence of [`PostRecord`]s in creation
//! order. Deserializing replays that sequence through the same checks as
//! [`ReplyTree::append_reply`]: every record must carry a non-empty author
//! and body, name an existing parent, take exactly the next free index under
//! it, and keep sibling timestamps non-decreasing.

use crate::error::{Result, ThreadboardError};
use crate::forum::path::PostPath;
use crate::forum::post::{next_timestamp, PostNode, PostRecord, PostRef};
use crate::forum::submission::Submission;
use serde::{Deserialize, Serialize, Serializer};
use std::fmt;

/// Ordered forest of root posts and their nested replies.
#[derive(Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(try_from = "Vec<PostRecord>")]
pub struct ReplyTree {
    nodes: Vec<PostNode>,
    roots: Vec<usize>,
}

impl fmt::Debug for ReplyTree {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ReplyTree")
            .field("roots", &self.roots.len())
            .field("total_posts", &self.nodes.len())
            .finish()
    }
}

impl ReplyTree {
    /// Creates an empty forest.
    pub fn new() -> Self {
        Self::default()
    }

    /// Starts a new top-level thread.
    ///
    /// The post is assigned path `[number of roots before the append]`.
    ///
    /// # Errors
    /// Returns `InvalidField` if the author or body is empty.
    pub fn create_root(&mut self, author: &str, body: &str, now: u64) -> Result<PostRef<'_>> {
        let id = self.insert(None, author, body, now)?;
        Ok(PostRef::new(self, id))
    }

    /// Looks up the post at `path`.
    ///
    /// # Errors
    /// Returns `PathNotFound` if any segment indexes past the posts that
    /// exist at its level.
    pub fn resolve(&self, path: &PostPath) -> Result<PostRef<'_>> {
        let id = self.resolve_id(path)?;
        Ok(PostRef::new(self, id))
    }

    fn resolve_id(&self, path: &PostPath) -> Result<usize> {
        let (first, rest) = split_path(path);

        let mut current = *self.roots.get(first).ok_or_else(|| not_found(path, 0))?;

        for (offset, &index) in rest.iter().enumerate() {
            current = *self.nodes[current]
                .children
                .get(index)
                .ok_or_else(|| not_found(path, offset + 1))?;
        }

        Ok(current)
    }

    /// Appends a reply under the post at `parent_path`.
    ///
    /// The reply's path is `parent_path` plus the parent's reply count
    /// before the append, so `resolve` on the returned path finds the
    /// returned post.
    ///
    /// # Errors
    /// - `PathNotFound` if `parent_path` does not resolve (checked first)
    /// - `InvalidField` if the author or body is empty
    pub fn append_reply(
        &mut self,
        parent_path: &PostPath,
        author: &str,
        body: &str,
        now: u64,
    ) -> Result<PostRef<'_>> {
        let parent = self.resolve_id(parent_path)?;
        let id = self.insert(Some(parent), author, body, now)?;
        Ok(PostRef::new(self, id))
    }

    /// Applies a dispatched form submission.
    pub fn apply(&mut self, submission: &Submission, now: u64) -> Result<PostRef<'_>> {
        match submission {
            Submission::NewPost { author, body } => self.create_root(author, body, now),
            Submission::Reply {
                author,
                body,
                parent,
            } => self.append_reply(parent, author, body, now),
        }
    }

    /// Returns the root posts in insertion order.
    pub fn posts(&self) -> impl ExactSizeIterator<Item = PostRef<'_>> + '_ {
        self.roots.iter().map(move |&id| PostRef::new(self, id))
    }

    /// Walks every post depth-first, parents before their replies.
    ///
    /// Yields `(depth, post)` with roots at depth 0. Order matches the
    /// stored insertion order at every level.
    pub fn iter(&self) -> Walk<'_> {
        Walk {
            tree: self,
            stack: self.roots.iter().rev().map(|&id| (0, id)).collect(),
        }
    }

    /// Copies every post into a flat record, in walk order.
    pub fn records(&self) -> Vec<PostRecord> {
        self.iter().map(|(_, post)| post.to_record()).collect()
    }

    /// Returns the number of root posts.
    pub fn len(&self) -> usize {
        self.roots.len()
    }

    /// Returns true if no post has been created.
    pub fn is_empty(&self) -> bool {
        self.roots.is_empty()
    }

    /// Returns the number of posts at every depth.
    pub fn total_posts(&self) -> usize {
        self.nodes.len()
    }

    pub(crate) fn node(&self, id: usize) -> &PostNode {
        &self.nodes[id]
    }

    fn siblings(&self, parent: Option<usize>) -> &[usize] {
        match parent {
            Some(id) => &self.nodes[id].children,
            None => &self.roots,
        }
    }

    /// Adds a post after the existing siblings under `parent`.
    fn insert(&mut self, parent: Option<usize>, author: &str, body: &str, now: u64) -> Result<usize> {
        let siblings = self.siblings(parent);
        let index = siblings.len();
        let previous = siblings.last().map(|&id| self.nodes[id].created_at);
        let node = PostNode::new(parent, index, author, body, next_timestamp(previous, now))?;

        let id = self.nodes.len();
        self.nodes.push(node);
        match parent {
            Some(parent) => self.nodes[parent].children.push(id),
            None => self.roots.push(id),
        }
        Ok(id)
    }

    /// Re-inserts one serialized record, checking it lands where it claims.
    fn restore(&mut self, record: &PostRecord) -> Result<()> {
        let parent = match record.path.parent() {
            Some(parent_path) => Some(self.resolve_id(&parent_path)?),
            None => None,
        };

        let siblings = self.siblings(parent);
        let expected = match parent {
            Some(id) => PostRef::new(self, id).path().child(siblings.len()),
            None => PostPath::root(siblings.len()),
        };
        if record.path != expected {
            return Err(ThreadboardError::malformed_path(format!(
                "record for {} is out of place, next free position is {}",
                record.path, expected
            )));
        }

        if let Some(&previous) = siblings.last() {
            if record.created_at < self.nodes[previous].created_at {
                return Err(ThreadboardError::invalid_field(format!(
                    "created_at of {} is earlier than its previous sibling",
                    record.path
                )));
            }
        }

        self.insert(parent, &record.author, &record.body, record.created_at)?;
        Ok(())
    }
}

impl TryFrom<Vec<PostRecord>> for ReplyTree {
    type Error = ThreadboardError;

    /// Rebuilds a tree from records in creation order.
    fn try_from(records: Vec<PostRecord>) -> Result<Self> {
        let mut tree = ReplyTree::new();
        for record in &records {
            tree.restore(record)?;
        }
        Ok(tree)
    }
}

impl Serialize for ReplyTree {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        // Arena order is creation order: parents precede replies and
        // siblings appear by index, which is what `restore` expects.
        serializer.collect_seq((0..self.nodes.len()).map(|id| PostRef::new(self, id).to_record()))
    }
}

impl<'a> IntoIterator for &'a ReplyTree {
    type Item = (usize, PostRef<'a>);
    type IntoIter = Walk<'a>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

/// Depth-first pre-order walk over a [`ReplyTree`].
#[derive(Debug, Clone)]
pub struct Walk<'a> {
    tree: &'a ReplyTree,
    stack: Vec<(usize, usize)>,
}

impl<'a> Walk<'a> {
    /// Walks the subtree under `id`, which is reported at depth 0.
    pub(crate) fn subtree(tree: &'a ReplyTree, id: usize) -> Self {
        Self {
            tree,
            stack: vec![(0, id)],
        }
    }
}

impl<'a> Iterator for Walk<'a> {
    type Item = (usize, PostRef<'a>);

    fn next(&mut self) -> Option<Self::Item> {
        let (depth, id) = self.stack.pop()?;
        self.stack.extend(
            self.tree.nodes[id]
                .children
                .iter()
                .rev()
                .map(|&child| (depth + 1, child)),
        );
        Some((depth, PostRef::new(self.tree, id)))
    }
}

fn split_path(path: &PostPath) -> (usize, &[usize]) {
    let segments = path.segments();
    (segments[0], &segments[1..])
}

fn not_found(path: &PostPath, failed_at: usize) -> ThreadboardError {
    ThreadboardError::path_not_found(format!(
        "no post at {} (segment {} out of range)",
        path, failed_at
    ))
}
