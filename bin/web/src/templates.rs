//! Askama templates for the board

use askama::Template;

/// One post flattened for display, in depth-first order
#[derive(Debug, Clone)]
pub struct PostDisplayInfo {
    /// Path text; used as the element id and the reply form's `reply_id`
    pub path: String,
    pub author: String,
    pub body: String,
    pub created_at_display: String,
    /// Nesting depth (roots are 0)
    pub depth: usize,
}

/// Board page: every thread, the new post form, and reply forms
#[derive(Template)]
#[template(path = "index.html")]
pub struct IndexTemplate {
    pub csrf_token: String,
    pub posts: Vec<PostDisplayInfo>,
    pub thread_count: usize,
    pub error: Option<String>,
    pub has_error: bool,
}
