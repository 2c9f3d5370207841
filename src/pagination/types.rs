//! Pagination types and traits
//!
//! Defines the core pagination abstractions used by the streams.

use crate::error::{Error, Result};
use serde_json::Value;

/// Result of the next page computation
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum NextPage {
    /// Another page exists, fetched with this continuation token
    Continue {
        /// Token for the `continuation` query parameter
        token: String,
    },
    /// No more pages
    Done,
}

impl NextPage {
    /// Create a continuation with a token
    pub fn with_token(token: impl Into<String>) -> Self {
        Self::Continue {
            token: token.into(),
        }
    }
}

/// Tracks pagination state during iteration
#[derive(Debug, Clone, Default)]
pub struct PaginationState {
    /// Token that produced the current page (None on the first page)
    pub token: Option<String>,
    /// Pages processed so far
    pub pages: u32,
    /// Total records fetched so far
    pub total_fetched: u64,
    /// Is pagination complete?
    pub done: bool,
}

impl PaginationState {
    /// Create a new pagination state
    pub fn new() -> Self {
        Self::default()
    }

    /// Mark pagination as complete
    pub fn mark_done(&mut self) {
        self.done = true;
    }

    /// Set the token for the next request
    pub fn set_token(&mut self, token: String) {
        self.token = Some(token);
    }

    /// Record one processed page
    pub fn add_page(&mut self, records: usize) {
        self.pages += 1;
        self.total_fetched += records as u64;
    }
}

/// Core trait for pagination strategies
pub trait Paginator: Send + Sync {
    /// Whether the response says another page exists
    fn has_more(&self, body: &Value) -> bool;

    /// Continuation token carried by the response, if any
    fn next_token(&self, body: &Value) -> Option<String>;

    /// Process a response and determine if there's a next page.
    ///
    /// Fails only when the API hands back the token that produced the
    /// current page, which would otherwise repeat the same request forever.
    fn advance(
        &self,
        stream: &str,
        body: &Value,
        records_count: usize,
        state: &mut PaginationState,
    ) -> Result<NextPage> {
        state.add_page(records_count);

        if !self.has_more(body) {
            state.mark_done();
            return Ok(NextPage::Done);
        }

        let Some(token) = self.next_token(body).filter(|t| !t.is_empty()) else {
            state.mark_done();
            return Ok(NextPage::Done);
        };

        if state.token.as_deref() == Some(token.as_str()) {
            return Err(Error::pagination_loop(stream, token));
        }

        state.set_token(token.clone());
        Ok(NextPage::with_token(token))
    }
}
