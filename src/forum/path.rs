//! Textual addressing of posts within the reply tree.
//!
//! A [`PostPath`] is the sequence of child indices walked from the forest of
//! root posts down to a post. Its text form joins the indices with
//! [`PATH_DELIMITER`]:
//!
//! ```text
//! 0          first root
//! 0,1        second reply to the first root
//! 0,1,0      first reply to that reply
//! ```
//!
//! Paths are pure values. Whether a path addresses an existing post is
//! decided by [`ReplyTree::resolve`](crate::forum::ReplyTree::resolve).

use crate::error::{Result, ThreadboardError};
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;
use std::str::FromStr;

/// Separator between path segments in the text form.
pub const PATH_DELIMITER: char = ',';

/// Position of a post in the reply tree.
///
/// Never empty: the first segment is the root index, each further segment is
/// an index into the previous post's children.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct PostPath(Vec<usize>);

impl PostPath {
    /// Path of the root post at `index`.
    pub fn root(index: usize) -> Self {
        Self(vec![index])
    }

    /// Builds a path from raw segments.
    ///
    /// # Errors
    /// Returns `MalformedPath` if `segments` is empty.
    pub fn from_segments(segments: Vec<usize>) -> Result<Self> {
        if segments.is_empty() {
            return Err(ThreadboardError::malformed_path(
                "path must have at least one segment",
            ));
        }
        Ok(Self(segments))
    }

    /// Wraps segments collected by walking the tree, which always has at
    /// least the root index.
    pub(crate) fn from_tree_segments(segments: Vec<usize>) -> Self {
        debug_assert!(!segments.is_empty());
        Self(segments)
    }

    /// Parses the comma-separated text form.
    ///
    /// Every segment must be one or more ASCII digits that fit in a `usize`.
    /// Signs, whitespace and empty segments are rejected, so `"0,,1"`,
    /// `"-1"`, `"+1"` and `" 0"` all fail.
    ///
    /// # Errors
    /// Returns `MalformedPath` describing the first offending segment.
    pub fn parse(text: &str) -> Result<Self> {
        if text.is_empty() {
            return Err(ThreadboardError::malformed_path("path is empty"));
        }

        text.split(PATH_DELIMITER)
            .enumerate()
            .map(|(position, segment)| parse_segment(position, segment))
            .collect::<Result<Vec<usize>>>()
            .map(Self)
    }

    /// Joins the segments with [`PATH_DELIMITER`].
    ///
    /// Exact inverse of [`PostPath::parse`].
    pub fn format(&self) -> String {
        self.to_string()
    }

    /// Path of this post's child at `index`.
    ///
    /// Does not check the tree; the caller decides whether the child exists.
    pub fn child(&self, index: usize) -> Self {
        let mut segments = Vec::with_capacity(self.0.len() + 1);
        segments.extend_from_slice(&self.0);
        segments.push(index);
        Self(segments)
    }

    /// Path of the parent post, or `None` for a root.
    pub fn parent(&self) -> Option<Self> {
        match self.0.split_last() {
            Some((_, rest)) if !rest.is_empty() => Some(Self(rest.to_vec())),
            _ => None,
        }
    }

    /// Index segments from the root downwards.
    pub fn segments(&self) -> &[usize] {
        &self.0
    }

    /// Index of the root post this path descends from.
    pub fn root_index(&self) -> usize {
        self.0[0]
    }

    /// Depth of the addressed post (roots are depth 0).
    pub fn depth(&self) -> usize {
        self.0.len() - 1
    }

    /// Returns true if this path addresses a root post.
    pub fn is_root(&self) -> bool {
        self.0.len() == 1
    }
}

fn parse_segment(position: usize, segment: &str) -> Result<usize> {
    if segment.is_empty() {
        return Err(ThreadboardError::malformed_path(format!(
            "segment {} is empty",
            position
        )));
    }
    if !segment.bytes().all(|b| b.is_ascii_digit()) {
        return Err(ThreadboardError::malformed_path(format!(
            "segment {} ({:?}) is not a non-negative integer",
            position, segment
        )));
    }
    segment.parse::<usize>().map_err(|_| {
        ThreadboardError::malformed_path(format!("segment {} is out of range", position))
    })
}

impl fmt::Display for PostPath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut segments = self.0.iter();
        if let Some(first) = segments.next() {
            write!(f, "{}", first)?;
        }
        for segment in segments {
            write!(f, "{}{}", PATH_DELIMITER, segment)?;
        }
        Ok(())
    }
}

impl FromStr for PostPath {
    type Err = ThreadboardError;

    fn from_str(s: &str) -> Result<Self> {
        Self::parse(s)
    }
}

impl Serialize for PostPath {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for PostPath {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> std::result::Result<Self, D::Error> {
        let text = String::deserialize(deserializer)?;
        Self::parse(&text).map_err(serde::de::Error::custom)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_and_format() {
        let path = PostPath::parse("0,1,0").unwrap();
        assert_eq!(path.segments(), &[0, 1, 0]);
        assert_eq!(path.format(), "0,1,0");
        assert_eq!(path.depth(), 2);
        assert_eq!(path.root_index(), 0);
    }

    #[test]
    fn test_parse_single_segment() {
        let path = PostPath::parse("42").unwrap();
        assert_eq!(path, PostPath::root(42));
        assert!(path.is_root());
    }

    #[test]
    fn test_parse_rejects_malformed() {
        for text in ["", ",", "0,", ",0", "0,,1", "-1", "+1", "0,-2", "a", "0,x", " 0", "0 ", "1.5"] {
            let result = PostPath::parse(text);
            assert!(
                matches!(result, Err(ThreadboardError::MalformedPath(_))),
                "{:?} should be malformed, got {:?}",
                text,
                result
            );
        }
    }

    #[test]
    fn test_parse_rejects_overflow() {
        let text = format!("0,{}0", usize::MAX);
        assert!(matches!(
            PostPath::parse(&text),
            Err(ThreadboardError::MalformedPath(_))
        ));
    }

    #[test]
    fn test_leading_zeros_parse_to_same_index() {
        let path = PostPath::parse("00,01").unwrap();
        assert_eq!(path.segments(), &[0, 1]);
        assert_eq!(path.format(), "0,1");
    }

    #[test]
    fn test_child_and_parent() {
        let parent = PostPath::parse("0,1").unwrap();
        let child = parent.child(3);
        assert_eq!(child.segments(), &[0, 1, 3]);
        assert_eq!(child.parent(), Some(parent.clone()));
        assert_eq!(parent.segments(), &[0, 1]);
        assert_eq!(PostPath::root(0).parent(), None);
    }

    #[test]
    fn test_from_segments_rejects_empty() {
        assert!(PostPath::from_segments(vec![]).is_err());
        assert_eq!(
            PostPath::from_segments(vec![2, 0]).unwrap().to_string(),
            "2,0"
        );
    }

    #[test]
    fn test_from_str() {
        let path: PostPath = "3,2,1".parse().unwrap();
        assert_eq!(path.segments(), &[3, 2, 1]);
    }

    #[test]
    fn test_serde_uses_text_form() {
        let path = PostPath::parse("0,1,0").unwrap();
        let json = serde_json::to_string(&path).unwrap();
        assert_eq!(json, "\"0,1,0\"");

        let decoded: PostPath = serde_json::from_str(&json).unwrap();
        assert_eq!(decoded, path);

        assert!(serde_json::from_str::<PostPath>("\"0,,1\"").is_err());
    }
}
