//! Credentials sent with every board-service request.

use super::BoardDomainError;
use std::fmt;

/// API key and token pair identifying the installation to the board
/// service.
///
/// Both values travel as request parameters on every call. `Debug` output
/// never includes the token.
#[derive(Clone, PartialEq, Eq)]
pub struct BoardCredentials {
    api_key: String,
    api_token: String,
}

impl BoardCredentials {
    /// Creates validated credentials.
    ///
    /// # Errors
    ///
    /// Returns [`BoardDomainError::EmptyApiKey`] or
    /// [`BoardDomainError::EmptyApiToken`] when either value is blank.
    pub fn new(
        api_key: impl Into<String>,
        api_token: impl Into<String>,
    ) -> Result<Self, BoardDomainError> {
        let raw_key = api_key.into();
        let raw_token = api_token.into();
        let key = raw_key.trim();
        let token = raw_token.trim();
        if key.is_empty() {
            return Err(BoardDomainError::EmptyApiKey);
        }
        if token.is_empty() {
            return Err(BoardDomainError::EmptyApiToken);
        }
        Ok(Self {
            api_key: key.to_owned(),
            api_token: token.to_owned(),
        })
    }

    /// Returns the API key.
    #[must_use]
    pub fn api_key(&self) -> &str {
        &self.api_key
    }

    /// Returns the API token.
    #[must_use]
    pub fn api_token(&self) -> &str {
        &self.api_token
    }
}

impl fmt::Debug for BoardCredentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("BoardCredentials")
            .field("api_key", &self.api_key)
            .field("api_token", &"<redacted>")
            .finish()
    }
}
