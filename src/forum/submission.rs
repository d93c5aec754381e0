//! Dispatch of raw form fields into a tree operation.
//!
//! The board has a single submission form shape. A filled `post` field
//! starts a new thread; otherwise a filled `reply` field together with the
//! parent's path text in `reply_id` adds a reply.

use crate::error::{Result, ThreadboardError};
use crate::forum::path::PostPath;

/// A validated request to grow the tree.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Submission {
    /// Start a new top-level thread.
    NewPost { author: String, body: String },
    /// Reply to the post at `parent`.
    Reply {
        author: String,
        body: String,
        parent: PostPath,
    },
}

impl Submission {
    /// Classifies the raw form fields.
    ///
    /// A new post takes precedence when both `post` and `reply` are filled.
    ///
    /// # Errors
    /// - `MalformedPath` if this is a reply and `reply_id` does not parse
    /// - `InvalidField` if neither a new post nor a reply is complete
    pub fn from_form(name: &str, post: &str, reply: &str, reply_id: &str) -> Result<Self> {
        if !name.is_empty() && !post.is_empty() {
            return Ok(Self::NewPost {
                author: name.to_string(),
                body: post.to_string(),
            });
        }

        if !name.is_empty() && !reply.is_empty() && !reply_id.is_empty() {
            let parent = PostPath::parse(reply_id)?;
            return Ok(Self::Reply {
                author: name.to_string(),
                body: reply.to_string(),
                parent,
            });
        }

        Err(ThreadboardError::invalid_field(missing_fields(
            name, post, reply, reply_id,
        )))
    }

    /// Returns the submitting author.
    pub fn author(&self) -> &str {
        match self {
            Self::NewPost { author, .. } | Self::Reply { author, .. } => author,
        }
    }

    /// Returns the submitted text.
    pub fn body(&self) -> &str {
        match self {
            Self::NewPost { body, .. } | Self::Reply { body, .. } => body,
        }
    }
}

fn missing_fields(name: &str, post: &str, reply: &str, reply_id: &str) -> String {
    if name.is_empty() {
        return "name is required".to_string();
    }
    if reply.is_empty() && reply_id.is_empty() && post.is_empty() {
        return "post or reply text is required".to_string();
    }
    if reply.is_empty() {
        return "reply text is required".to_string();
    }
    "reply target is required".to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_post() {
        let submission = Submission::from_form("Jebediah7", "Good afternoon", "", "").unwrap();
        assert_eq!(
            submission,
            Submission::NewPost {
                author: "Jebediah7".to_string(),
                body: "Good afternoon".to_string(),
            }
        );
        assert_eq!(submission.author(), "Jebediah7");
        assert_eq!(submission.body(), "Good afternoon");
    }

    #[test]
    fn test_reply() {
        let submission = Submission::from_form("Franklin24", "", "Indeed", "0,1").unwrap();
        assert_eq!(
            submission,
            Submission::Reply {
                author: "Franklin24".to_string(),
                body: "Indeed".to_string(),
                parent: PostPath::parse("0,1").unwrap(),
            }
        );
    }

    #[test]
    fn test_new_post_takes_precedence() {
        let submission = Submission::from_form("a", "post", "reply", "0").unwrap();
        assert!(matches!(submission, Submission::NewPost { .. }));
    }

    #[test]
    fn test_malformed_reply_target() {
        let err = Submission::from_form("a", "", "reply", "0,,1").unwrap_err();
        assert!(matches!(err, ThreadboardError::MalformedPath(_)));
    }

    #[test]
    fn test_incomplete_forms() {
        let cases = [
            ("", "post", "", ""),
            ("", "", "reply", "0"),
            ("a", "", "", ""),
            ("a", "", "reply", ""),
            ("a", "", "", "0"),
        ];
        for (name, post, reply, reply_id) in cases {
            let err = Submission::from_form(name, post, reply, reply_id).unwrap_err();
            assert!(
                matches!(err, ThreadboardError::InvalidField(_)),
                "{:?} should be invalid",
                (name, post, reply, reply_id)
            );
        }
    }

    #[test]
    fn test_missing_field_messages() {
        let err = Submission::from_form("", "post", "", "").unwrap_err();
        assert_eq!(err.to_string(), "Invalid field: name is required");

        let err = Submission::from_form("a", "", "reply", "").unwrap_err();
        assert_eq!(err.to_string(), "Invalid field: reply target is required");

        let err = Submission::from_form("a", "", "", "0").unwrap_err();
        assert_eq!(err.to_string(), "Invalid field: reply text is required");
    }
}
