//! Trello board client
//!
//! Thin synchronous wrapper over the Trello REST API: list boards and
//! lists, create cards, checklists and checklist items. Stateless and
//! retry-free; callers decide pacing and error policy.

use std::time::Duration;

use serde::Deserialize;
use thiserror::Error;

use crate::domain::Card;

const DEFAULT_BASE_URL: &str = "https://api.trello.com/1";
const REQUEST_TIMEOUT_SECS: u64 = 30;
const CONNECT_TIMEOUT_SECS: u64 = 10;

/// A failure talking to the board API
#[derive(Debug, Error)]
pub enum BoardError {
    /// Could not build the HTTP client
    #[error("failed to build HTTP client: {0}")]
    ClientBuild(reqwest::Error),

    /// The request itself failed (connection, timeout, decode)
    #[error("board API request failed: {0}")]
    Request(#[from] reqwest::Error),

    /// The API answered with a non-success status
    #[error("board API returned {status}: {body}")]
    Api {
        /// HTTP status code
        status: u16,
        /// Response body, for the error message
        body: String,
    },
}

/// A board, as listed for selection
#[derive(Debug, Clone, Deserialize)]
pub struct Board {
    /// Board id
    pub id: String,
    /// Board display name
    pub name: String,
}

/// A list on a board, as listed for selection
#[derive(Debug, Clone, Deserialize)]
pub struct BoardList {
    /// List id
    pub id: String,
    /// List display name
    pub name: String,
}

/// The card the API created
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreatedCard {
    /// Card id
    pub id: String,
    /// Card name as stored remotely
    pub name: String,
    /// Short URL used to reference the card from checklists
    pub short_url: String,
}

/// The checklist the API created
#[derive(Debug, Clone, Deserialize)]
pub struct Checklist {
    /// Checklist id
    pub id: String,
}

/// Synchronous Trello API client
pub struct BoardClient {
    http: reqwest::blocking::Client,
    base_url: String,
    api_key: String,
    token: String,
}

impl BoardClient {
    /// Creates a client for the public Trello API
    pub fn new(api_key: impl Into<String>, token: impl Into<String>) -> Result<Self, BoardError> {
        Self::with_base_url(DEFAULT_BASE_URL, api_key, token)
    }

    /// Creates a client against a custom base URL
    pub fn with_base_url(
        base_url: impl Into<String>,
        api_key: impl Into<String>,
        token: impl Into<String>,
    ) -> Result<Self, BoardError> {
        let http = reqwest::blocking::Client::builder()
            .timeout(Duration::from_secs(REQUEST_TIMEOUT_SECS))
            .connect_timeout(Duration::from_secs(CONNECT_TIMEOUT_SECS))
            .build()
            .map_err(BoardError::ClientBuild)?;

        Ok(Self {
            http,
            base_url: base_url.into(),
            api_key: api_key.into(),
            token: token.into(),
        })
    }

    /// Lists the boards of the authenticated member
    pub fn boards(&self) -> Result<Vec<Board>, BoardError> {
        let response = self
            .http
            .get(format!("{}/members/me/boards", self.base_url))
            .query(&self.auth())
            .query(&[("fields", "id,name")])
            .send()?;

        Ok(Self::checked(response)?.json()?)
    }

    /// Lists the lists on a board
    pub fn lists(&self, board_id: &str) -> Result<Vec<BoardList>, BoardError> {
        let response = self
            .http
            .get(format!("{}/boards/{}/lists", self.base_url, board_id))
            .query(&self.auth())
            .query(&[("fields", "id,name")])
            .send()?;

        Ok(Self::checked(response)?.json()?)
    }

    /// Creates a card from a projected payload
    pub fn create_card(&self, card: &Card) -> Result<CreatedCard, BoardError> {
        let response = self
            .http
            .post(format!("{}/cards", self.base_url))
            .query(&self.auth())
            .query(card)
            .send()?;

        Ok(Self::checked(response)?.json()?)
    }

    /// Creates a checklist at the top of a card
    pub fn create_checklist(&self, card_id: &str, name: &str) -> Result<Checklist, BoardError> {
        let response = self
            .http
            .post(format!("{}/cards/{}/checklists", self.base_url, card_id))
            .query(&self.auth())
            .query(&[("name", name), ("pos", "top")])
            .send()?;

        Ok(Self::checked(response)?.json()?)
    }

    /// Adds one item to a checklist
    pub fn create_checkitem(&self, checklist_id: &str, name: &str) -> Result<(), BoardError> {
        let response = self
            .http
            .post(format!(
                "{}/checklists/{}/checkItems",
                self.base_url, checklist_id
            ))
            .query(&self.auth())
            .query(&[("name", name)])
            .send()?;

        Self::checked(response)?;
        Ok(())
    }

    fn auth(&self) -> [(&'static str, &str); 2] {
        [("key", self.api_key.as_str()), ("token", self.token.as_str())]
    }

    fn checked(
        response: reqwest::blocking::Response,
    ) -> Result<reqwest::blocking::Response, BoardError> {
        let status = response.status();
        if status.is_success() {
            Ok(response)
        } else {
            Err(BoardError::Api {
                status: status.as_u16(),
                body: response.text().unwrap_or_default(),
            })
        }
    }
}
