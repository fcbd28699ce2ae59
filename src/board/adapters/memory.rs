//! In-memory board-service adapter for lifecycle tests.

use crate::board::{
    domain::{
        Board, BoardId, BoardList, Card, CardComment, CardId, CardUpdate, CheckItem,
        CheckItemState, Checklist, ChecklistId, Label, LabelId, ListId, NewCard, NewCheckItem,
    },
    ports::{BoardService, BoardServiceError, BoardServiceResult},
};
use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::{Arc, RwLock, RwLockReadGuard, RwLockWriteGuard};

/// Operation kinds understood by [`InMemoryBoardService`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum BoardOperation {
    /// Token validation.
    ValidateToken,
    /// Board listing.
    ListBoards,
    /// List listing for a board.
    ListLists,
    /// Label listing for a board.
    ListLabels,
    /// Card lookup.
    GetCard,
    /// Card creation.
    CreateCard,
    /// Card update, including move, archive and restore.
    UpdateCard,
    /// Card deletion.
    DeleteCard,
    /// Comment creation.
    AddComment,
    /// Label attachment.
    AddLabel,
    /// Checklist creation.
    CreateChecklist,
    /// Checklist item creation.
    AddChecklistItem,
}

impl BoardOperation {
    /// Returns the operation label used in errors.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::ValidateToken => "validate token",
            Self::ListBoards => "list boards",
            Self::ListLists => "list lists",
            Self::ListLabels => "list labels",
            Self::GetCard => "get card",
            Self::CreateCard => "create card",
            Self::UpdateCard => "update card",
            Self::DeleteCard => "delete card",
            Self::AddComment => "add comment",
            Self::AddLabel => "add label",
            Self::CreateChecklist => "create checklist",
            Self::AddChecklistItem => "add checklist item",
        }
    }
}

/// Call recorded by [`InMemoryBoardService`], in issue order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BoardCall {
    /// `is_token_valid` was called.
    ValidateToken,
    /// `list_boards` was called.
    ListBoards,
    /// `list_lists` was called for a board.
    ListLists(BoardId),
    /// `list_labels` was called for a board.
    ListLabels(BoardId),
    /// `get_card` was called.
    GetCard(CardId),
    /// `create_card` was called with a payload.
    CreateCard(NewCard),
    /// `update_card` (or a move/archive/restore wrapper) was called.
    UpdateCard(CardId, CardUpdate),
    /// `delete_card` was called.
    DeleteCard(CardId),
    /// `add_comment` was called.
    AddComment(CardId, String),
    /// `add_label` was called.
    AddLabel(CardId, LabelId),
    /// `create_checklist` was called.
    CreateChecklist(CardId, String),
    /// `add_checklist_item` was called.
    AddChecklistItem(ChecklistId, NewCheckItem),
}

impl BoardCall {
    /// Returns the operation kind of the call.
    #[must_use]
    pub const fn operation(&self) -> BoardOperation {
        match self {
            Self::ValidateToken => BoardOperation::ValidateToken,
            Self::ListBoards => BoardOperation::ListBoards,
            Self::ListLists(_) => BoardOperation::ListLists,
            Self::ListLabels(_) => BoardOperation::ListLabels,
            Self::GetCard(_) => BoardOperation::GetCard,
            Self::CreateCard(_) => BoardOperation::CreateCard,
            Self::UpdateCard(..) => BoardOperation::UpdateCard,
            Self::DeleteCard(_) => BoardOperation::DeleteCard,
            Self::AddComment(..) => BoardOperation::AddComment,
            Self::AddLabel(..) => BoardOperation::AddLabel,
            Self::CreateChecklist(..) => BoardOperation::CreateChecklist,
            Self::AddChecklistItem(..) => BoardOperation::AddChecklistItem,
        }
    }
}

#[derive(Debug, Clone, Copy)]
struct InjectedFailure {
    operation: BoardOperation,
    nth_call: Option<usize>,
    status: u16,
}

/// In-memory board-service adapter.
///
/// This adapter models a single board without any network access. It
/// records every call, supports injected HTTP failures and treats archive
/// and restore as idempotent, matching the remote service.
#[derive(Debug, Clone, Default)]
pub struct InMemoryBoardService {
    state: Arc<RwLock<InMemoryBoardState>>,
}

#[derive(Debug, Default)]
struct InMemoryBoardState {
    token_valid: bool,
    boards: Vec<Board>,
    lists: HashMap<BoardId, Vec<BoardList>>,
    labels: HashMap<BoardId, Vec<Label>>,
    cards: HashMap<CardId, Card>,
    checklists: HashMap<ChecklistId, Checklist>,
    comments: HashMap<CardId, Vec<String>>,
    calls: Vec<BoardCall>,
    call_counts: HashMap<BoardOperation, usize>,
    failures: Vec<InjectedFailure>,
    next_id: u64,
}

impl InMemoryBoardState {
    fn next_identifier(&mut self, prefix: &str) -> String {
        self.next_id += 1;
        format!("{prefix}{:08x}", self.next_id)
    }

    fn knows_list(&self, list_id: &ListId) -> bool {
        let has_lists = self.lists.values().any(|lists| !lists.is_empty());
        !has_lists
            || self
                .lists
                .values()
                .flatten()
                .any(|list| &list.id == list_id)
    }

    fn record(&mut self, call: BoardCall) -> BoardServiceResult<()> {
        let operation = call.operation();
        self.calls.push(call);
        let count = self.call_counts.entry(operation).or_default();
        *count += 1;
        let call_number = *count;

        let failure = self.failures.iter().find(|failure| {
            failure.operation == operation
                && failure.nth_call.is_none_or(|nth| nth == call_number)
        });
        match failure {
            Some(failure) => Err(BoardServiceError::from_status(
                operation.as_str(),
                failure.status,
                "injected failure",
            )),
            None => Ok(()),
        }
    }

    fn card_mut(&mut self, operation: BoardOperation, card_id: &CardId) -> BoardServiceResult<&mut Card> {
        self.cards
            .get_mut(card_id)
            .ok_or_else(|| not_found(operation, card_id.as_str()))
    }
}

fn not_found(operation: BoardOperation, id: &str) -> BoardServiceError {
    BoardServiceError::from_status(operation.as_str(), 404, format!("unknown id {id}"))
}

impl InMemoryBoardService {
    /// Creates an empty board service accepting any token.
    #[must_use]
    pub fn new() -> Self {
        let service = Self::default();
        if let Ok(mut state) = service.state.write() {
            state.token_valid = true;
        }
        service
    }

    fn read(&self, operation: BoardOperation) -> BoardServiceResult<RwLockReadGuard<'_, InMemoryBoardState>> {
        self.state.read().map_err(|err| {
            BoardServiceError::transport(operation.as_str(), std::io::Error::other(err.to_string()))
        })
    }

    fn write(&self, operation: BoardOperation) -> BoardServiceResult<RwLockWriteGuard<'_, InMemoryBoardState>> {
        self.state.write().map_err(|err| {
            BoardServiceError::transport(operation.as_str(), std::io::Error::other(err.to_string()))
        })
    }

    /// Adds a board together with its lists and labels.
    ///
    /// Once any list is registered, card creation and moves into unknown
    /// lists are rejected with HTTP 400.
    ///
    /// # Errors
    ///
    /// Returns transport errors when lock acquisition fails.
    pub fn add_board(
        &self,
        board: Board,
        lists: Vec<BoardList>,
        labels: Vec<Label>,
    ) -> BoardServiceResult<()> {
        let mut state = self.write(BoardOperation::ListBoards)?;
        state.lists.insert(board.id.clone(), lists);
        state.labels.insert(board.id.clone(), labels);
        state.boards.push(board);
        Ok(())
    }

    /// Sets whether the token is accepted.
    ///
    /// # Errors
    ///
    /// Returns transport errors when lock acquisition fails.
    pub fn set_token_valid(&self, valid: bool) -> BoardServiceResult<()> {
        self.write(BoardOperation::ValidateToken)?.token_valid = valid;
        Ok(())
    }

    /// Makes every call of an operation fail with the given HTTP status.
    ///
    /// # Errors
    ///
    /// Returns transport errors when lock acquisition fails.
    pub fn fail_operation(&self, operation: BoardOperation, status: u16) -> BoardServiceResult<()> {
        self.write(operation)?.failures.push(InjectedFailure {
            operation,
            nth_call: None,
            status,
        });
        Ok(())
    }

    /// Makes the `nth` call (1-based, counted from service creation) of an
    /// operation fail with the given HTTP status.
    ///
    /// # Errors
    ///
    /// Returns transport errors when lock acquisition fails.
    pub fn fail_nth_call(
        &self,
        operation: BoardOperation,
        nth: usize,
        status: u16,
    ) -> BoardServiceResult<()> {
        self.write(operation)?.failures.push(InjectedFailure {
            operation,
            nth_call: Some(nth),
            status,
        });
        Ok(())
    }

    /// Removes all injected failures.
    ///
    /// # Errors
    ///
    /// Returns transport errors when lock acquisition fails.
    pub fn clear_failures(&self) -> BoardServiceResult<()> {
        self.write(BoardOperation::UpdateCard)?.failures.clear();
        Ok(())
    }

    /// Returns every recorded call in issue order.
    ///
    /// # Errors
    ///
    /// Returns transport errors when lock acquisition fails.
    pub fn calls(&self) -> BoardServiceResult<Vec<BoardCall>> {
        Ok(self.read(BoardOperation::GetCard)?.calls.clone())
    }

    /// Returns the number of recorded calls of one operation kind.
    ///
    /// # Errors
    ///
    /// Returns transport errors when lock acquisition fails.
    pub fn call_count(&self, operation: BoardOperation) -> BoardServiceResult<usize> {
        Ok(self
            .read(operation)?
            .calls
            .iter()
            .filter(|call| call.operation() == operation)
            .count())
    }

    /// Returns the stored card, if it exists.
    ///
    /// # Errors
    ///
    /// Returns transport errors when lock acquisition fails.
    pub fn card(&self, card_id: &CardId) -> BoardServiceResult<Option<Card>> {
        Ok(self.read(BoardOperation::GetCard)?.cards.get(card_id).cloned())
    }

    /// Returns the number of cards currently stored.
    ///
    /// # Errors
    ///
    /// Returns transport errors when lock acquisition fails.
    pub fn card_count(&self) -> BoardServiceResult<usize> {
        Ok(self.read(BoardOperation::GetCard)?.cards.len())
    }

    /// Returns all checklists attached to a card.
    ///
    /// # Errors
    ///
    /// Returns transport errors when lock acquisition fails.
    pub fn checklists_for(&self, card_id: &CardId) -> BoardServiceResult<Vec<Checklist>> {
        Ok(self
            .read(BoardOperation::CreateChecklist)?
            .checklists
            .values()
            .filter(|checklist| &checklist.id_card == card_id)
            .cloned()
            .collect())
    }

    /// Returns comments posted on a card, oldest first.
    ///
    /// # Errors
    ///
    /// Returns transport errors when lock acquisition fails.
    pub fn comments_for(&self, card_id: &CardId) -> BoardServiceResult<Vec<String>> {
        Ok(self
            .read(BoardOperation::AddComment)?
            .comments
            .get(card_id)
            .cloned()
            .unwrap_or_default())
    }
}

#[async_trait]
impl BoardService for InMemoryBoardService {
    async fn is_token_valid(&self) -> BoardServiceResult<bool> {
        let mut state = self.write(BoardOperation::ValidateToken)?;
        match state.record(BoardCall::ValidateToken) {
            Ok(()) => Ok(state.token_valid),
            Err(_) => Ok(false),
        }
    }

    async fn list_boards(&self) -> BoardServiceResult<Vec<Board>> {
        let mut state = self.write(BoardOperation::ListBoards)?;
        state.record(BoardCall::ListBoards)?;
        Ok(state.boards.clone())
    }

    async fn list_lists(&self, board_id: &BoardId) -> BoardServiceResult<Vec<BoardList>> {
        let mut state = self.write(BoardOperation::ListLists)?;
        state.record(BoardCall::ListLists(board_id.clone()))?;
        state
            .lists
            .get(board_id)
            .cloned()
            .ok_or_else(|| not_found(BoardOperation::ListLists, board_id.as_str()))
    }

    async fn list_labels(&self, board_id: &BoardId) -> BoardServiceResult<Vec<Label>> {
        let mut state = self.write(BoardOperation::ListLabels)?;
        state.record(BoardCall::ListLabels(board_id.clone()))?;
        state
            .labels
            .get(board_id)
            .cloned()
            .ok_or_else(|| not_found(BoardOperation::ListLabels, board_id.as_str()))
    }

    async fn get_card(&self, card_id: &CardId) -> BoardServiceResult<Card> {
        let mut state = self.write(BoardOperation::GetCard)?;
        state.record(BoardCall::GetCard(card_id.clone()))?;
        state
            .cards
            .get(card_id)
            .cloned()
            .ok_or_else(|| not_found(BoardOperation::GetCard, card_id.as_str()))
    }

    async fn create_card(&self, card: &NewCard) -> BoardServiceResult<Card> {
        let mut state = self.write(BoardOperation::CreateCard)?;
        state.record(BoardCall::CreateCard(card.clone()))?;
        if !state.knows_list(card.list_id()) {
            return Err(BoardServiceError::from_status(
                BoardOperation::CreateCard.as_str(),
                400,
                "invalid value for idList",
            ));
        }
        let raw_id = state.next_identifier("card");
        let card_id = CardId::new(raw_id)
            .map_err(|err| BoardServiceError::transport(BoardOperation::CreateCard.as_str(), err))?;
        let created = Card {
            id: card_id.clone(),
            name: card.name().to_owned(),
            desc: card.desc().to_owned(),
            id_list: card.list_id().clone(),
            closed: false,
            id_labels: card.label_ids().to_vec(),
            short_url: None,
        };
        state.cards.insert(card_id, created.clone());
        Ok(created)
    }

    async fn update_card(
        &self,
        card_id: &CardId,
        update: &CardUpdate,
    ) -> BoardServiceResult<Card> {
        let mut state = self.write(BoardOperation::UpdateCard)?;
        state.record(BoardCall::UpdateCard(card_id.clone(), update.clone()))?;
        if let Some(list_id) = update.list_id()
            && !state.knows_list(list_id)
        {
            return Err(BoardServiceError::from_status(
                BoardOperation::UpdateCard.as_str(),
                400,
                "invalid value for idList",
            ));
        }
        let card = state.card_mut(BoardOperation::UpdateCard, card_id)?;
        if let Some(name) = update.name() {
            name.clone_into(&mut card.name);
        }
        if let Some(desc) = update.desc() {
            desc.clone_into(&mut card.desc);
        }
        if let Some(list_id) = update.list_id() {
            card.id_list = list_id.clone();
        }
        if let Some(closed) = update.closed() {
            card.closed = closed;
        }
        Ok(card.clone())
    }

    async fn delete_card(&self, card_id: &CardId) -> BoardServiceResult<()> {
        let mut state = self.write(BoardOperation::DeleteCard)?;
        state.record(BoardCall::DeleteCard(card_id.clone()))?;
        state
            .cards
            .remove(card_id)
            .map(drop)
            .ok_or_else(|| not_found(BoardOperation::DeleteCard, card_id.as_str()))
    }

    async fn add_comment(&self, card_id: &CardId, text: &str) -> BoardServiceResult<CardComment> {
        let mut state = self.write(BoardOperation::AddComment)?;
        state.record(BoardCall::AddComment(card_id.clone(), text.to_owned()))?;
        state.card_mut(BoardOperation::AddComment, card_id)?;
        let id = state.next_identifier("comment");
        state
            .comments
            .entry(card_id.clone())
            .or_default()
            .push(text.to_owned());
        Ok(CardComment { id })
    }

    async fn add_label(
        &self,
        card_id: &CardId,
        label_id: &LabelId,
    ) -> BoardServiceResult<Vec<LabelId>> {
        let mut state = self.write(BoardOperation::AddLabel)?;
        state.record(BoardCall::AddLabel(card_id.clone(), label_id.clone()))?;
        let card = state.card_mut(BoardOperation::AddLabel, card_id)?;
        if !card.id_labels.contains(label_id) {
            card.id_labels.push(label_id.clone());
        }
        Ok(card.id_labels.clone())
    }

    async fn create_checklist(
        &self,
        card_id: &CardId,
        title: &str,
    ) -> BoardServiceResult<Checklist> {
        let mut state = self.write(BoardOperation::CreateChecklist)?;
        state.record(BoardCall::CreateChecklist(card_id.clone(), title.to_owned()))?;
        state.card_mut(BoardOperation::CreateChecklist, card_id)?;
        let raw_id = state.next_identifier("checklist");
        let checklist_id = ChecklistId::new(raw_id).map_err(|err| {
            BoardServiceError::transport(BoardOperation::CreateChecklist.as_str(), err)
        })?;
        let checklist = Checklist {
            id: checklist_id.clone(),
            name: title.to_owned(),
            id_card: card_id.clone(),
            check_items: Vec::new(),
        };
        state.checklists.insert(checklist_id, checklist.clone());
        Ok(checklist)
    }

    async fn add_checklist_item(
        &self,
        checklist_id: &ChecklistId,
        item: &NewCheckItem,
    ) -> BoardServiceResult<CheckItem> {
        let mut state = self.write(BoardOperation::AddChecklistItem)?;
        state.record(BoardCall::AddChecklistItem(checklist_id.clone(), item.clone()))?;
        let id = state.next_identifier("item");
        let checklist = state.checklists.get_mut(checklist_id).ok_or_else(|| {
            not_found(BoardOperation::AddChecklistItem, checklist_id.as_str())
        })?;
        let created = CheckItem {
            id,
            name: item.name().to_owned(),
            state: CheckItemState::from_checked(item.checked()),
            pos: 0.0,
        };
        checklist.check_items.push(created.clone());
        Ok(created)
    }
}
