//! Board-service port covering card, checklist and lookup operations.

use crate::board::domain::{
    Board, BoardId, BoardList, Card, CardComment, CardId, CardUpdate, CheckItem, Checklist,
    ChecklistId, Label, LabelId, ListId, NewCard, NewCheckItem,
};
use async_trait::async_trait;
use std::sync::Arc;
use thiserror::Error;

/// Result type for board-service operations.
pub type BoardServiceResult<T> = Result<T, BoardServiceError>;

/// Operations offered by the external card-board service.
///
/// Implementations perform exactly one request per call and never retry.
/// Remote operations are idempotent for archive and restore, so applying
/// them to a card already in the target state succeeds.
#[async_trait]
pub trait BoardService: Send + Sync {
    /// Checks whether the configured token is accepted.
    ///
    /// Returns `Ok(false)` for any non-`2xx` answer.
    ///
    /// # Errors
    ///
    /// Returns [`BoardServiceError::Transport`] when the service cannot be
    /// reached.
    async fn is_token_valid(&self) -> BoardServiceResult<bool>;

    /// Lists all boards of the token owner.
    async fn list_boards(&self) -> BoardServiceResult<Vec<Board>>;

    /// Lists the open lists of a board.
    async fn list_lists(&self, board_id: &BoardId) -> BoardServiceResult<Vec<BoardList>>;

    /// Lists the labels defined on a board.
    async fn list_labels(&self, board_id: &BoardId) -> BoardServiceResult<Vec<Label>>;

    /// Fetches a single card.
    async fn get_card(&self, card_id: &CardId) -> BoardServiceResult<Card>;

    /// Creates a card.
    async fn create_card(&self, card: &NewCard) -> BoardServiceResult<Card>;

    /// Applies a partial update to a card.
    async fn update_card(&self, card_id: &CardId, update: &CardUpdate)
    -> BoardServiceResult<Card>;

    /// Deletes a card. This cannot be undone.
    async fn delete_card(&self, card_id: &CardId) -> BoardServiceResult<()>;

    /// Adds a comment to a card.
    async fn add_comment(&self, card_id: &CardId, text: &str) -> BoardServiceResult<CardComment>;

    /// Attaches a board label to a card, returning the card's label set.
    async fn add_label(
        &self,
        card_id: &CardId,
        label_id: &LabelId,
    ) -> BoardServiceResult<Vec<LabelId>>;

    /// Creates an empty checklist on a card.
    async fn create_checklist(&self, card_id: &CardId, title: &str)
    -> BoardServiceResult<Checklist>;

    /// Adds one item to a checklist.
    ///
    /// The remote API offers no batching, so `n` items cost `n` sequential
    /// round trips.
    async fn add_checklist_item(
        &self,
        checklist_id: &ChecklistId,
        item: &NewCheckItem,
    ) -> BoardServiceResult<CheckItem>;

    /// Moves a card to another list.
    async fn move_card(&self, card_id: &CardId, list_id: &ListId) -> BoardServiceResult<Card> {
        self.update_card(card_id, &CardUpdate::new().with_list(list_id.clone()))
            .await
    }

    /// Archives a card.
    async fn archive_card(&self, card_id: &CardId) -> BoardServiceResult<Card> {
        self.update_card(card_id, &CardUpdate::new().with_closed(true))
            .await
    }

    /// Restores an archived card.
    async fn restore_card(&self, card_id: &CardId) -> BoardServiceResult<Card> {
        self.update_card(card_id, &CardUpdate::new().with_closed(false))
            .await
    }
}

/// Errors returned by board-service adapters.
#[derive(Debug, Clone, Error)]
pub enum BoardServiceError {
    /// The service could not be reached or the connection failed.
    #[error("board service transport failure during {operation}: {cause}")]
    Transport {
        /// Operation being performed.
        operation: &'static str,
        /// Underlying transport error.
        cause: Arc<dyn std::error::Error + Send + Sync>,
    },

    /// The service rejected the credentials (HTTP 401).
    #[error("board service rejected the API key or token during {operation} (HTTP {status})")]
    Unauthorized {
        /// Operation being performed.
        operation: &'static str,
        /// HTTP status code.
        status: u16,
    },

    /// The service answered with a non-`2xx` status.
    #[error("board service rejected {operation} (HTTP {status}): {message}")]
    Rejected {
        /// Operation being performed.
        operation: &'static str,
        /// HTTP status code.
        status: u16,
        /// Response body, as returned by the service.
        message: String,
    },

    /// A `2xx` response body did not match the declared model.
    #[error("failed to decode board service response for {operation}: {reason}")]
    Decode {
        /// Operation being performed.
        operation: &'static str,
        /// Decoder message.
        reason: String,
    },
}

impl BoardServiceError {
    /// Wraps a transport error.
    pub fn transport(
        operation: &'static str,
        err: impl std::error::Error + Send + Sync + 'static,
    ) -> Self {
        Self::Transport {
            operation,
            cause: Arc::new(err),
        }
    }

    /// Classifies a non-`2xx` status.
    #[must_use]
    pub fn from_status(operation: &'static str, status: u16, message: impl Into<String>) -> Self {
        if status == 401 {
            Self::Unauthorized { operation, status }
        } else {
            Self::Rejected {
                operation,
                status,
                message: message.into(),
            }
        }
    }

    /// Returns the HTTP status code, when the service answered.
    #[must_use]
    pub const fn status(&self) -> Option<u16> {
        match self {
            Self::Unauthorized { status, .. } | Self::Rejected { status, .. } => Some(*status),
            Self::Transport { .. } | Self::Decode { .. } => None,
        }
    }

    /// Returns the operation that failed.
    #[must_use]
    pub const fn operation(&self) -> &'static str {
        match self {
            Self::Transport { operation, .. }
            | Self::Unauthorized { operation, .. }
            | Self::Rejected { operation, .. }
            | Self::Decode { operation, .. } => operation,
        }
    }
}
