//! Path-addressed reply tree.
//!
//! Every post is identified by the child indices walked from the forest of
//! root posts down to it:
//!
//! ```text
//! ReplyTree
//!     └── Post "0"
//!             └── Post "0,0"
//!                     └── Post "0,0,0"
//!             └── Post "0,1"
//!     └── Post "1"
//! ```
//!
//! - [`PostPath`] converts between the text form and index segments.
//! - [`ReplyTree`] resolves paths and appends posts, assigning each new post
//!   its path at insertion.
//! - [`Submission`] turns raw form fields into one of those operations.
//!
//! The tree is append-only: posts are never edited, moved or removed, so a
//! path handed out once keeps addressing the same post.

pub mod constants;
mod demo;
mod path;
mod post;
mod submission;
mod tree;

pub use demo::seed_demo_thread;
pub use path::{PostPath, PATH_DELIMITER};
pub use post::{PostRecord, PostRef};
pub use submission::Submission;
pub use tree::{ReplyTree, Walk};

/// Returns the current time in milliseconds since Unix epoch.
///
/// Falls back to 0 if the system clock reads before the epoch.
pub fn current_timestamp_millis() -> u64 {
    use std::time::{SystemTime, UNIX_EPOCH};
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|elapsed| elapsed.as_millis() as u64)
        .unwrap_or(0)
}
