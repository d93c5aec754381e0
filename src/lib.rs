//! # threadboard
//!
//! A threaded discussion board where every post is addressed by its position
//! in the reply tree.
//!
//! A post's address is a path of child indices starting at the forest of
//! root posts: `"0"` is the first root, `"0,1"` is that root's second reply,
//! `"0,1,0"` is the first reply to that reply, and so on. Replies are located
//! and inserted from nothing but that path text.
//!
//! ## Example
//!
//! ```rust
//! use threadboard::forum::{PostPath, ReplyTree};
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let mut tree = ReplyTree::new();
//! tree.create_root("Jebediah7", "Good afternoon", 0)?;
//!
//! let parent = PostPath::parse("0")?;
//! let reply = tree.append_reply(&parent, "Franklin24", "Good afternoon indeed", 1)?;
//! assert_eq!(reply.path().to_string(), "0,0");
//! # Ok(())
//! # }
//! ```
//!
//! The HTTP front end lives in the `threadboard-web` binary; it only parses
//! forms, calls into [`forum`], and renders the result.

pub mod error;
pub mod forum;

pub use error::{Result, ThreadboardError};

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
