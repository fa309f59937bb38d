//! Per-request HTTP sessions
//!
//! Every POST gets its own [`RequestSession`]. There is no session store
//! and no affinity between requests: the session exists only so that the
//! request's lifetime can be traced, and it is released when dropped,
//! whether the response was sent or the client went away first.

use chrono::{DateTime, Utc};
use uuid::Uuid;

/// Session metadata for one HTTP request
#[derive(Debug)]
pub struct RequestSession {
    /// Unique session identifier (UUID v4)
    pub session_id: Uuid,

    /// JSON-RPC method, once the envelope has been parsed
    pub method: Option<String>,

    /// Session creation timestamp
    pub created_at: DateTime<Utc>,

    completed: bool,
}

impl RequestSession {
    pub fn open() -> Self {
        let session = Self {
            session_id: Uuid::new_v4(),
            method: None,
            created_at: Utc::now(),
            completed: false,
        };
        tracing::trace!(session_id = %session.session_id, "Opened request session");
        session
    }

    pub fn set_method(&mut self, method: &str) {
        self.method = Some(method.to_string());
    }

    /// Marks the response as produced
    pub fn complete(&mut self) {
        self.completed = true;
    }

    pub fn elapsed_ms(&self) -> i64 {
        (Utc::now() - self.created_at).num_milliseconds()
    }
}

impl Drop for RequestSession {
    fn drop(&mut self) {
        let method = self.method.as_deref().unwrap_or("-");
        if self.completed {
            tracing::debug!(
                session_id = %self.session_id,
                method,
                elapsed_ms = self.elapsed_ms(),
                "Released request session"
            );
        } else {
            tracing::warn!(
                session_id = %self.session_id,
                method,
                elapsed_ms = self.elapsed_ms(),
                "Request session dropped before a response was produced"
            );
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sessions_are_distinct() {
        let a = RequestSession::open();
        let b = RequestSession::open();
        assert_ne!(a.session_id, b.session_id);
        assert!(a.method.is_none());
    }

    #[test]
    fn test_complete() {
        let mut session = RequestSession::open();
        session.set_method("tools/call");
        assert!(!session.completed);

        session.complete();
        assert!(session.completed);
        assert_eq!(session.method.as_deref(), Some("tools/call"));
        assert!(session.elapsed_ms() >= 0);
    }
}
