//! Shared limits for form input.
//!
//! The tree itself accepts any non-empty author and body. These limits are
//! applied by the web layer before a submission reaches the tree.

/// Maximum author name size (256 bytes).
pub const MAX_AUTHOR_SIZE: usize = 256;

/// Maximum post or reply body size (100KB).
pub const MAX_BODY_SIZE: usize = 100 * 1024;

/// Maximum reply target path text size (2KB).
///
/// Bounds how deep a single submission can address. Every rendered post
/// carries its full path text, so a chain's page size grows with the
/// square of its depth.
pub const MAX_REPLY_ID_SIZE: usize = 2 * 1024;
