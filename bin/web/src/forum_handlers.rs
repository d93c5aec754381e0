//! Board web handlers.
//!
//! These handlers only move strings between HTTP and the reply tree: they
//! extract form fields, hand them to [`Submission`] and [`ReplyTree`], and
//! render the result. Rejected submissions are reported back to the user as
//! a one-shot flash message carried in the session.

use crate::csrf::{get_csrf_token, validate_csrf_token, CsrfProtectedForm};
use crate::templates::{IndexTemplate, PostDisplayInfo};
use crate::{AppState, SharedReplyTree};
use askama::Template;
use axum::{
    extract::{Form, State},
    http::StatusCode,
    response::{Html, IntoResponse, Redirect},
    Json,
};
use serde::Deserialize;
use threadboard::forum::constants::{MAX_AUTHOR_SIZE, MAX_BODY_SIZE, MAX_REPLY_ID_SIZE};
use threadboard::forum::{current_timestamp_millis, PostRecord, ReplyTree, Submission};
use threadboard::ThreadboardError;
use tower_sessions::Session;
use tracing::{error, info, instrument, warn};

/// Session key holding the message shown on the next page load.
const FLASH_ERROR_KEY: &str = "flash_error";

/// Form data for a new post or a reply.
///
/// Missing fields deserialize as empty strings; [`Submission::from_form`]
/// decides which combination is complete.
#[derive(Debug, Default, Deserialize)]
pub struct NewPostForm {
    #[serde(default)]
    name: String,
    #[serde(default)]
    post: String,
    #[serde(default)]
    reply: String,
    #[serde(default)]
    reply_id: String,
}

/// Helper to format timestamp for display
fn format_timestamp(ts: u64) -> String {
    use chrono::{TimeZone, Utc};
    Utc.timestamp_millis_opt(ts as i64)
        .single()
        .map(|dt| dt.format("%Y-%m-%d %H:%M UTC").to_string())
        .unwrap_or_else(|| "Unknown".to_string())
}

/// Flattens the tree depth-first for the template.
fn display_posts(tree: &ReplyTree) -> Vec<PostDisplayInfo> {
    tree.iter()
        .map(|(depth, post)| PostDisplayInfo {
            path: post.path().format(),
            author: post.author().to_string(),
            body: post.body().to_string(),
            created_at_display: format_timestamp(post.created_at()),
            depth,
        })
        .collect()
}

/// Rejects oversized input before it reaches the tree (DoS prevention).
fn check_input_sizes(form: &NewPostForm) -> Result<(), String> {
    if form.name.len() > MAX_AUTHOR_SIZE {
        return Err(format!("Name exceeds {} bytes", MAX_AUTHOR_SIZE));
    }
    if form.post.len() > MAX_BODY_SIZE || form.reply.len() > MAX_BODY_SIZE {
        return Err(format!("Message exceeds {} bytes", MAX_BODY_SIZE));
    }
    if form.reply_id.len() > MAX_REPLY_ID_SIZE {
        return Err(format!("Reply target exceeds {} bytes", MAX_REPLY_ID_SIZE));
    }
    Ok(())
}

/// Applies a submission under the write lock.
///
/// The outer error is a poisoned lock; the inner result is the tree's
/// verdict, carrying the new post's path text on success.
fn apply_submission(
    tree: &SharedReplyTree,
    submission: &Submission,
    now: u64,
) -> Result<Result<String, ThreadboardError>, StatusCode> {
    let mut tree = tree.write().map_err(|_| {
        error!("Reply tree lock poisoned");
        StatusCode::INTERNAL_SERVER_ERROR
    })?;
    Ok(tree
        .apply(submission, now)
        .map(|post| post.path().format()))
}

async fn set_flash_error(session: &Session, message: &str) {
    if let Err(e) = session.insert(FLASH_ERROR_KEY, message).await {
        error!("Failed to store flash message: {:?}", e);
    }
}

async fn take_flash_error(session: &Session) -> Option<String> {
    match session.remove::<String>(FLASH_ERROR_KEY).await {
        Ok(message) => message,
        Err(e) => {
            error!("Failed to read flash message: {:?}", e);
            None
        }
    }
}

/// Board page
#[instrument(skip_all)]
pub async fn index_page(
    State(app_state): State<AppState>,
    session: Session,
) -> Result<Html<String>, StatusCode> {
    let csrf_token = get_csrf_token(&session).await.unwrap_or_default();
    let error = take_flash_error(&session).await;

    let (posts, thread_count) = {
        let tree = app_state.tree.read().map_err(|_| {
            error!("Reply tree lock poisoned");
            StatusCode::INTERNAL_SERVER_ERROR
        })?;
        (display_posts(&tree), tree.len())
    };

    let template = IndexTemplate {
        csrf_token,
        posts,
        thread_count,
        has_error: error.is_some(),
        error,
    };

    Ok(Html(template.render().map_err(|e| {
        error!("Failed to render index template: {:?}", e);
        StatusCode::INTERNAL_SERVER_ERROR
    })?))
}

/// New post and reply handler.
///
/// Always answers with a redirect to the board; a rejected submission
/// leaves the tree untouched and queues its error for display.
#[instrument(skip_all)]
pub async fn new_post_handler(
    State(app_state): State<AppState>,
    session: Session,
    Form(form): Form<CsrfProtectedForm<NewPostForm>>,
) -> impl IntoResponse {
    if !validate_csrf_token(&session, &form.csrf_token).await {
        warn!("CSRF validation failed for new post");
        set_flash_error(&session, "Your session expired, please submit again").await;
        return Redirect::to("/").into_response();
    }

    let data = form.data;

    if let Err(message) = check_input_sizes(&data) {
        warn!("Rejected oversized submission: {}", message);
        set_flash_error(&session, &message).await;
        return Redirect::to("/").into_response();
    }

    let submission =
        match Submission::from_form(&data.name, &data.post, &data.reply, &data.reply_id) {
            Ok(s) => s,
            Err(e) => {
                warn!("Rejected submission: {}", e);
                set_flash_error(&session, &e.to_string()).await;
                return Redirect::to("/").into_response();
            }
        };

    let outcome = match apply_submission(&app_state.tree, &submission, current_timestamp_millis())
    {
        Ok(outcome) => outcome,
        Err(status) => return status.into_response(),
    };

    match outcome {
        Ok(path) => {
            info!(path = %path, author = %submission.author(), "Accepted submission");
        }
        Err(e) => {
            warn!("Rejected submission: {}", e);
            set_flash_error(&session, &e.to_string()).await;
        }
    }

    Redirect::to("/").into_response()
}

/// Every post as a flat record, in the same depth-first order as the board
#[instrument(skip_all)]
pub async fn posts_json(
    State(app_state): State<AppState>,
) -> Result<Json<Vec<PostRecord>>, StatusCode> {
    let tree = app_state.tree.read().map_err(|_| {
        error!("Reply tree lock poisoned");
        StatusCode::INTERNAL_SERVER_ERROR
    })?;
    Ok(Json(tree.records()))
}
