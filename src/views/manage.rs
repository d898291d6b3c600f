//! Manage view — administrators reply to messages.

use tracing::{error, info};

use super::{Access, ViewError, authorize};
use crate::api::{BoardApi, ManageEntry, ReplyRequest, Role};
use crate::page::Page;
use crate::render::{self, ADMIN_DENIED_HTML};

pub const TITLE: &str = "Board Management";

pub struct ManageView<A> {
    api: A,
    page: Page,
    entries: Vec<ManageEntry>,
    access: Access,
}

impl<A: BoardApi> ManageView<A> {
    pub fn new(api: A) -> Self {
        Self { api, page: Page::new(TITLE), entries: Vec::new(), access: Access::Unchecked }
    }

    #[must_use]
    pub fn page(&self) -> &Page {
        &self.page
    }

    pub fn page_mut(&mut self) -> &mut Page {
        &mut self.page
    }

    /// Entries from the most recent refresh, in table order.
    #[must_use]
    pub fn entries(&self) -> &[ManageEntry] {
        &self.entries
    }

    #[must_use]
    pub fn access(&self) -> Access {
        self.access
    }

    /// Check admin status, then render the board if allowed.
    ///
    /// # Errors
    ///
    /// Returns a [`ViewError`] if the board list cannot be fetched after
    /// authorization succeeded. A rejected authorization is not an error.
    pub async fn load(&mut self) -> Result<Access, ViewError> {
        self.access = authorize(&self.api, Role::Admin, &mut self.page, ADMIN_DENIED_HTML).await;
        if self.access == Access::Granted {
            self.refresh().await?;
        }
        Ok(self.access)
    }

    /// Re-fetch the board and replace the table.
    ///
    /// # Errors
    ///
    /// Returns [`ViewError::NotAuthorized`] before a successful `load`, or an
    /// API error if the fetch fails.
    pub async fn refresh(&mut self) -> Result<(), ViewError> {
        self.ensure_authorized()?;
        let entries = self.api.manage_entries().await?;
        self.page.set_table(render::manage_table(&entries))?;
        self.entries = entries;
        Ok(())
    }

    /// Post the text typed into row `row`'s reply field as the reply to
    /// message `msgid`, then clear the field and refresh.
    ///
    /// # Errors
    ///
    /// Returns [`ViewError::Page`] if the row has no reply field (already
    /// replied or out of range), [`ViewError::RowMismatch`] if `msgid` is
    /// not the message shown in that row, or an API error if the post or the refresh
    /// fails. A failed post leaves the field and table untouched.
    pub async fn reply(&mut self, row: usize, msgid: i64) -> Result<(), ViewError> {
        self.ensure_authorized()?;
        let field_id = render::reply_field_id(row);
        let reply = self.page.input_value(&field_id)?.to_owned();
        if self.entries.get(row).map(|e| e.msgid) != Some(msgid) {
            return Err(ViewError::RowMismatch { row, msgid });
        }
        let request = ReplyRequest { board_id: msgid, reply };

        if let Err(e) = self.api.post_reply(&request).await {
            error!(error = %e, msgid, "reply submission failed");
            return Err(e.into());
        }
        info!(msgid, row, "reply posted");

        self.page.clear_input(&field_id)?;
        self.refresh().await
    }

    fn ensure_authorized(&self) -> Result<(), ViewError> {
        if self.access == Access::Granted { Ok(()) } else { Err(ViewError::NotAuthorized) }
    }
}

#[cfg(test)]
#[path = "manage_test.rs"]
mod tests;
