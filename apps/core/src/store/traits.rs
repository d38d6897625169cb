//! Collaborator interfaces the response engine is given.
//!
//! These traits abstract the persistent intent/knowledge/conversation store
//! so different backends (or in-memory fakes under test) can be used
//! interchangeably. All read paths must tolerate empty results; write
//! failures must surface to the caller.

use async_trait::async_trait;

use crate::error::AppError;
use crate::models::{ConversationRecord, IntentDefinition, Sentiment};

/// Read access to the configured intent table.
#[async_trait]
pub trait IntentTableReader: Send + Sync {
    /// Fetch every configured intent. An empty table is a valid result and
    /// makes the classifier report `unknown`.
    async fn fetch_all(&self) -> Result<Vec<IntentDefinition>, AppError>;
}

/// Read access to the response variants of a single intent.
#[async_trait]
pub trait ResponsesByIntent: Send + Sync {
    /// Fetch the stored response variants for an intent name; empty when
    /// the intent is not configured.
    async fn fetch_responses(&self, intent_name: &str) -> Result<Vec<String>, AppError>;
}

/// Keyword-to-response knowledge lookup.
#[async_trait]
pub trait KeywordLookup: Send + Sync {
    /// Fetch the highest-confidence response matching a keyword, if any.
    async fn fetch_by_keyword(&self, keyword: &str) -> Result<Option<String>, AppError>;
}

/// Read access to a user's conversation history.
#[async_trait]
pub trait HistoryReader: Send + Sync {
    /// Fetch up to `limit` records for a user, newest first.
    async fn fetch_recent(
        &self,
        user_id: &str,
        limit: usize,
    ) -> Result<Vec<ConversationRecord>, AppError>;
}

/// Write access for completed conversation turns.
#[async_trait]
pub trait ConversationWriter: Send + Sync {
    /// Persist one turn and return its record identifier. Failures must
    /// propagate: a swallowed write error silently loses the turn.
    async fn save(
        &self,
        user_id: &str,
        user_message: &str,
        bot_response: &str,
        session_id: &str,
        sentiment: Sentiment,
        intent: &str,
    ) -> Result<i64, AppError>;
}
