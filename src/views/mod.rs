//! Board views — authorization gate shared by the manage and message views.
//!
//! DESIGN
//! ======
//! Each view owns its API handle and its `Page`. `load` runs the gate; a
//! rejection replaces the page body with the view's fixed denial message and
//! is not an error. Every other failure is returned to the caller and leaves
//! the page as it was.

pub mod manage;
pub mod message;

use tracing::warn;

use crate::api::{ApiError, BoardApi, Role};
use crate::page::{Page, PageError};

#[derive(Debug, thiserror::Error)]
pub enum ViewError {
    #[error(transparent)]
    Api(#[from] ApiError),

    #[error(transparent)]
    Page(#[from] PageError),

    /// An action was attempted before authorization succeeded.
    #[error("view is not authorized; load it first")]
    NotAuthorized,

    /// The message id does not belong to the given table row.
    #[error("row {row} does not hold message {msgid}")]
    RowMismatch { row: usize, msgid: i64 },
}

/// Outcome of the authorization gate.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Access {
    /// Not checked yet.
    Unchecked,
    Granted,
    Denied,
}

/// Run the authorization check for `role`. On rejection the page body is
/// replaced with `denied_html`.
pub async fn authorize<A: BoardApi + ?Sized>(api: &A, role: Role, page: &mut Page, denied_html: &str) -> Access {
    match api.check_access(role).await {
        Ok(()) => Access::Granted,
        Err(e) => {
            warn!(role = role.as_str(), error = %e, "authorization rejected");
            page.replace_body(denied_html);
            Access::Denied
        }
    }
}

#[cfg(test)]
#[path = "mod_test.rs"]
mod tests;
