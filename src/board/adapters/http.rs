//! HTTP adapter for the board service.

use crate::board::{
    domain::{
        Board, BoardCredentials, BoardId, BoardList, Card, CardComment, CardId, CardUpdate,
        CheckItem, Checklist, ChecklistId, Label, LabelId, NewCard, NewCheckItem,
    },
    ports::{BoardService, BoardServiceError, BoardServiceResult},
};
use async_trait::async_trait;
use reqwest::{Client, Method};
use serde::de::DeserializeOwned;
use tracing::debug;
use url::Url;

/// Base URL of the public board-service REST API.
pub const DEFAULT_API_BASE: &str = "https://api.trello.com/1/";

const BOARD_FIELDS: &str = "id,name";
const LIST_FIELDS: &str = "id,name,pos";
const LABEL_FIELDS: &str = "id,name,color";
const CARD_FIELDS: &str = "id,name,desc,idList,closed,idLabels,shortUrl";

/// Board-service client speaking the REST API over HTTP.
///
/// The API key and token are sent as query parameters on every request.
/// Outcomes are classified solely by HTTP status and no request is ever
/// retried. Requests use the transport's default timeout.
#[derive(Debug, Clone)]
pub struct HttpBoardService {
    client: Client,
    base_url: Url,
    credentials: BoardCredentials,
}

impl HttpBoardService {
    /// Creates a client for the public API.
    ///
    /// # Errors
    ///
    /// Returns [`BoardServiceError::Transport`] when the HTTP client cannot
    /// be initialised.
    pub fn new(credentials: BoardCredentials) -> BoardServiceResult<Self> {
        Self::with_base_url(credentials, DEFAULT_API_BASE)
    }

    /// Creates a client for an alternative API base URL.
    ///
    /// # Errors
    ///
    /// Returns [`BoardServiceError::Transport`] when the base URL is invalid
    /// or the HTTP client cannot be initialised.
    pub fn with_base_url(
        credentials: BoardCredentials,
        base_url: &str,
    ) -> BoardServiceResult<Self> {
        let normalized = if base_url.ends_with('/') {
            base_url.to_owned()
        } else {
            format!("{base_url}/")
        };
        let parsed = Url::parse(&normalized)
            .map_err(|err| BoardServiceError::transport("client setup", err))?;
        let client = Client::builder()
            .build()
            .map_err(|err| BoardServiceError::transport("client setup", err))?;
        Ok(Self {
            client,
            base_url: parsed,
            credentials,
        })
    }

    /// Returns the API base URL.
    #[must_use]
    pub const fn base_url(&self) -> &Url {
        &self.base_url
    }

    async fn send(
        &self,
        operation: &'static str,
        method: Method,
        endpoint: &str,
        query: &[(&str, &str)],
        form: &[(String, String)],
    ) -> BoardServiceResult<String> {
        let url = self
            .base_url
            .join(endpoint.trim_start_matches('/'))
            .map_err(|err| BoardServiceError::transport(operation, err))?;
        debug!(%method, endpoint, operation, "sending board service request");

        let mut request = self
            .client
            .request(method.clone(), url)
            .query(&[
                ("key", self.credentials.api_key()),
                ("token", self.credentials.api_token()),
            ])
            .query(query);
        if method == Method::POST || method == Method::PUT {
            request = request.form(form);
        }

        let response = request
            .send()
            .await
            .map_err(|err| BoardServiceError::transport(operation, err))?;
        let status = response.status();
        let body = response
            .text()
            .await
            .map_err(|err| BoardServiceError::transport(operation, err))?;
        debug!(operation, status = status.as_u16(), "board service responded");

        if status.is_success() {
            Ok(body)
        } else {
            Err(BoardServiceError::from_status(
                operation,
                status.as_u16(),
                body.trim(),
            ))
        }
    }

    async fn get_json<T: DeserializeOwned>(
        &self,
        operation: &'static str,
        endpoint: &str,
        query: &[(&str, &str)],
    ) -> BoardServiceResult<T> {
        let body = self.send(operation, Method::GET, endpoint, query, &[]).await?;
        decode(operation, &body)
    }

    async fn post_json<T: DeserializeOwned>(
        &self,
        operation: &'static str,
        endpoint: &str,
        form: &[(String, String)],
    ) -> BoardServiceResult<T> {
        let body = self
            .send(operation, Method::POST, endpoint, &[], form)
            .await?;
        decode(operation, &body)
    }
}

fn decode<T: DeserializeOwned>(operation: &'static str, body: &str) -> BoardServiceResult<T> {
    serde_json::from_str(body).map_err(|err| BoardServiceError::Decode {
        operation,
        reason: err.to_string(),
    })
}

fn param(key: &str, value: impl Into<String>) -> (String, String) {
    (key.to_owned(), value.into())
}

#[async_trait]
impl BoardService for HttpBoardService {
    async fn is_token_valid(&self) -> BoardServiceResult<bool> {
        let endpoint = format!("tokens/{}", self.credentials.api_token());
        let result = self
            .send(
                "validate token",
                Method::GET,
                &endpoint,
                &[("fields", "dateExpires"), ("webhooks", "false")],
                &[],
            )
            .await;
        match result {
            Ok(_) => Ok(true),
            Err(err @ BoardServiceError::Transport { .. }) => Err(err),
            Err(err) => {
                debug!(error = %err, "board service token is not valid");
                Ok(false)
            }
        }
    }

    async fn list_boards(&self) -> BoardServiceResult<Vec<Board>> {
        self.get_json(
            "list boards",
            "members/me/boards",
            &[("fields", BOARD_FIELDS), ("filter", "all")],
        )
        .await
    }

    async fn list_lists(&self, board_id: &BoardId) -> BoardServiceResult<Vec<BoardList>> {
        self.get_json(
            "list lists",
            &format!("boards/{board_id}/lists"),
            &[
                ("fields", LIST_FIELDS),
                ("filter", "open"),
                ("cards", "none"),
                ("card_fields", ""),
            ],
        )
        .await
    }

    async fn list_labels(&self, board_id: &BoardId) -> BoardServiceResult<Vec<Label>> {
        self.get_json(
            "list labels",
            &format!("boards/{board_id}/labels"),
            &[("fields", LABEL_FIELDS)],
        )
        .await
    }

    async fn get_card(&self, card_id: &CardId) -> BoardServiceResult<Card> {
        self.get_json(
            "get card",
            &format!("cards/{card_id}"),
            &[("fields", CARD_FIELDS)],
        )
        .await
    }

    async fn create_card(&self, card: &NewCard) -> BoardServiceResult<Card> {
        self.post_json("create card", "cards", &card.to_params())
            .await
    }

    async fn update_card(
        &self,
        card_id: &CardId,
        update: &CardUpdate,
    ) -> BoardServiceResult<Card> {
        let body = self
            .send(
                "update card",
                Method::PUT,
                &format!("cards/{card_id}"),
                &[],
                &update.to_params(),
            )
            .await?;
        decode("update card", &body)
    }

    async fn delete_card(&self, card_id: &CardId) -> BoardServiceResult<()> {
        self.send(
            "delete card",
            Method::DELETE,
            &format!("cards/{card_id}"),
            &[],
            &[],
        )
        .await
        .map(drop)
    }

    async fn add_comment(&self, card_id: &CardId, text: &str) -> BoardServiceResult<CardComment> {
        self.post_json(
            "add comment",
            &format!("cards/{card_id}/actions/comments"),
            &[param("text", text)],
        )
        .await
    }

    async fn add_label(
        &self,
        card_id: &CardId,
        label_id: &LabelId,
    ) -> BoardServiceResult<Vec<LabelId>> {
        self.post_json(
            "add label",
            &format!("cards/{card_id}/idLabels"),
            &[param("value", label_id.as_str())],
        )
        .await
    }

    async fn create_checklist(
        &self,
        card_id: &CardId,
        title: &str,
    ) -> BoardServiceResult<Checklist> {
        self.post_json(
            "create checklist",
            "checklists",
            &[param("idCard", card_id.as_str()), param("name", title)],
        )
        .await
    }

    async fn add_checklist_item(
        &self,
        checklist_id: &ChecklistId,
        item: &NewCheckItem,
    ) -> BoardServiceResult<CheckItem> {
        self.post_json(
            "add checklist item",
            &format!("checklists/{checklist_id}/checkItems"),
            &item.to_params(),
        )
        .await
    }
}
