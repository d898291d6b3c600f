//! Board API — authorization checks, message lists, and submissions.
//!
//! DESIGN
//! ======
//! `BoardApi` is the seam between the views and the network. The real
//! implementation is `HttpBoardApi` (reqwest); tests drive the views through
//! `test_helpers::MockApi`.
//!
//! ENDPOINTS
//! =========
//! - `GET /isadmin`, `GET /isuser`: authorization checks
//! - `GET /board/manage`, `POST /board/manage`: admin list and reply
//! - `GET /board/message`, `POST /board/message`: user list and new message

pub mod http;
pub mod types;

#[cfg(test)]
pub mod test_helpers;

pub use http::HttpBoardApi;
pub use types::{ApiError, ManageEntry, MessageEntry, ReplyRequest};

pub const ADMIN_CHECK_PATH: &str = "/isadmin";
pub const USER_CHECK_PATH: &str = "/isuser";
pub const MANAGE_PATH: &str = "/board/manage";
pub const MESSAGE_PATH: &str = "/board/message";

/// Which authorization endpoint gates a view.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Role {
    Admin,
    User,
}

impl Role {
    #[must_use]
    pub fn check_path(self) -> &'static str {
        match self {
            Self::Admin => ADMIN_CHECK_PATH,
            Self::User => USER_CHECK_PATH,
        }
    }

    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Admin => "admin",
            Self::User => "user",
        }
    }
}

// =============================================================================
// BOARD API TRAIT
// =============================================================================

/// Async access to the board endpoints. Enables mocking in tests.
#[async_trait::async_trait]
pub trait BoardApi: Send + Sync {
    /// Call the authorization endpoint for `role`.
    ///
    /// # Errors
    ///
    /// Any transport failure, non-2xx status, or non-JSON body is an error;
    /// callers treat every error as a rejection.
    async fn check_access(&self, role: Role) -> Result<(), ApiError>;

    /// Fetch the admin view of the board.
    ///
    /// # Errors
    ///
    /// Returns an [`ApiError`] if the request fails or the body is not a list.
    async fn manage_entries(&self) -> Result<Vec<ManageEntry>, ApiError>;

    /// Attach a reply to a message.
    ///
    /// # Errors
    ///
    /// Returns an [`ApiError`] if the request fails or the response is not JSON.
    async fn post_reply(&self, request: &ReplyRequest) -> Result<serde_json::Value, ApiError>;

    /// Fetch the user view of the board.
    ///
    /// # Errors
    ///
    /// Returns an [`ApiError`] if the request fails or the body is not a list.
    async fn message_entries(&self) -> Result<Vec<MessageEntry>, ApiError>;

    /// Submit a new message. The body on the wire is a bare JSON string.
    ///
    /// # Errors
    ///
    /// Returns an [`ApiError`] if the request fails or the response is not JSON.
    async fn post_message(&self, text: &str) -> Result<serde_json::Value, ApiError>;
}
