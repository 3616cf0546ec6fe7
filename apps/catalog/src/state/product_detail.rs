//! # Product Detail State
//!
//! Comments for the product screen. They live in memory only and are gone
//! when the state is dropped.
//!
//! ```text
//! add_comment(product_id, user, text)
//!        │
//!        ▼
//!   Comment { id: uuid v4, timestamp: now (ms) }
//!        │
//!        ▼
//!   watch<Arc<Vec<Comment>>> ── append, keep order ──► subscribers
//! ```

use chrono::Utc;
use shopfront_core::Comment;
use std::sync::Arc;
use tokio::sync::watch;
use tracing::debug;
use uuid::Uuid;

use super::config::Session;

/// An immutable comment list, oldest first.
pub type CommentSnapshot = Arc<Vec<Comment>>;

/// State container behind the product detail screen.
#[derive(Debug)]
pub struct ProductDetailState {
    session: Session,
    comments: watch::Sender<CommentSnapshot>,
}

impl ProductDetailState {
    pub fn new(session: Session) -> Self {
        let (comments, _) = watch::channel(Arc::new(Vec::new()));
        ProductDetailState { session, comments }
    }

    /// Subscribes to comment snapshots.
    pub fn comments(&self) -> watch::Receiver<CommentSnapshot> {
        self.comments.subscribe()
    }

    /// The current comment list.
    pub fn snapshot(&self) -> CommentSnapshot {
        self.comments.borrow().clone()
    }

    pub fn session(&self) -> &Session {
        &self.session
    }

    /// Appends a comment and publishes the longer list.
    ///
    /// Text is stored as given; empty text is accepted. `product_id` is not
    /// checked against stored products. Timestamps never go backwards within
    /// one list, even if the wall clock does.
    pub fn add_comment(
        &self,
        product_id: impl Into<String>,
        user_name: impl Into<String>,
        text: impl Into<String>,
    ) -> Comment {
        let mut comment = Comment {
            id: Uuid::new_v4().to_string(),
            product_id: product_id.into(),
            user_name: user_name.into(),
            text: text.into(),
            timestamp: Utc::now().timestamp_millis(),
        };

        self.comments.send_modify(|list| {
            if let Some(last) = list.last() {
                comment.timestamp = comment.timestamp.max(last.timestamp);
            }
            Arc::make_mut(list).push(comment.clone());
        });

        debug!(id = %comment.id, product_id = %comment.product_id, "Comment added");
        comment
    }

    /// Appends a comment authored by the session user.
    pub fn post_comment(&self, product_id: impl Into<String>, text: impl Into<String>) -> Comment {
        self.add_comment(product_id, self.session.user_name.clone(), text)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn state() -> ProductDetailState {
        ProductDetailState::new(Session::new("alice"))
    }

    #[test]
    fn test_comments_keep_insertion_order() {
        let detail = state();

        let first = detail.add_comment("p1", "alice", "nice");
        let second = detail.add_comment("p1", "bob", "+1");

        let list = detail.snapshot();
        assert_eq!(list.len(), 2);
        assert_eq!(list[0].text, "nice");
        assert_eq!(list[0].user_name, "alice");
        assert_eq!(list[1].text, "+1");
        assert_eq!(list[1].user_name, "bob");
        assert!(list.iter().all(|c| c.product_id == "p1"));
        assert_ne!(first.id, second.id);
        assert!(first.timestamp <= second.timestamp);
        assert_eq!(list[1], second);
    }

    #[test]
    fn test_ids_are_uuids() {
        let comment = state().add_comment("3", "alice", "hi");
        assert!(Uuid::parse_str(&comment.id).is_ok());
        assert!(comment.timestamp > 0);
    }

    #[test]
    fn test_subscribers_are_notified() {
        let detail = state();
        let mut comments = detail.comments();
        assert!(!comments.has_changed().unwrap());

        detail.add_comment("2", "alice", "Nice");

        assert!(comments.has_changed().unwrap());
        assert_eq!(comments.borrow_and_update().len(), 1);
    }

    #[test]
    fn test_post_comment_uses_session_user() {
        let detail = state();
        let comment = detail.post_comment("5", "Works well");

        assert_eq!(comment.user_name, "alice");
        assert_eq!(comment.product_id, "5");
        assert_eq!(detail.session(), &Session::new("alice"));
    }

    #[test]
    fn test_empty_text_and_unknown_product_are_accepted() {
        let detail = state();
        let comment = detail.add_comment("no-such-product", "alice", "");

        assert_eq!(comment.text, "");
        assert_eq!(detail.snapshot().len(), 1);
    }

    #[test]
    fn test_old_snapshots_are_not_mutated() {
        let detail = state();
        detail.add_comment("1", "alice", "one");
        let before = detail.snapshot();

        detail.add_comment("1", "alice", "two");

        assert_eq!(before.len(), 1);
        assert_eq!(detail.snapshot().len(), 2);
    }
}
