//! Message view — logged-in users read the board and post new messages.

use tracing::{error, info};

use super::{Access, ViewError, authorize};
use crate::api::{BoardApi, MessageEntry, Role};
use crate::page::Page;
use crate::render::{self, USER_DENIED_HTML};

pub const TITLE: &str = "Message Board";
pub const COMPOSER_FIELD: &str = "textarea_comment";
const COMPOSER_ONCLICK: &str = "btn_post()";

pub struct MessageView<A> {
    api: A,
    page: Page,
    entries: Vec<MessageEntry>,
    access: Access,
}

impl<A: BoardApi> MessageView<A> {
    pub fn new(api: A) -> Self {
        Self {
            api,
            page: Page::new(TITLE).with_field(COMPOSER_FIELD, COMPOSER_ONCLICK),
            entries: Vec::new(),
            access: Access::Unchecked,
        }
    }

    #[must_use]
    pub fn page(&self) -> &Page {
        &self.page
    }

    pub fn page_mut(&mut self) -> &mut Page {
        &mut self.page
    }

    #[must_use]
    pub fn entries(&self) -> &[MessageEntry] {
        &self.entries
    }

    #[must_use]
    pub fn access(&self) -> Access {
        self.access
    }

    /// Check login status, then render the board if allowed.
    ///
    /// # Errors
    ///
    /// Returns a [`ViewError`] if the board list cannot be fetched after
    /// authorization succeeded.
    pub async fn load(&mut self) -> Result<Access, ViewError> {
        self.access = authorize(&self.api, Role::User, &mut self.page, USER_DENIED_HTML).await;
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
        if self.access != Access::Granted {
            return Err(ViewError::NotAuthorized);
        }
        let entries = self.api.message_entries().await?;
        self.page.set_table(render::message_table(&entries))?;
        self.entries = entries;
        Ok(())
    }

    /// Type `text` into the composer.
    ///
    /// # Errors
    ///
    /// Returns [`ViewError::Page`] if the body has been replaced.
    pub fn compose(&mut self, text: impl Into<String>) -> Result<(), ViewError> {
        self.page.set_input(COMPOSER_FIELD, text)?;
        Ok(())
    }

    /// Submit the composer text, then clear it and refresh.
    ///
    /// # Errors
    ///
    /// Returns [`ViewError::NotAuthorized`] before a successful `load`, or an
    /// API error if the post or the refresh fails. A failed post keeps the
    /// composer text.
    pub async fn post(&mut self) -> Result<(), ViewError> {
        if self.access != Access::Granted {
            return Err(ViewError::NotAuthorized);
        }
        let text = self.page.input_value(COMPOSER_FIELD)?.to_owned();

        if let Err(e) = self.api.post_message(&text).await {
            error!(error = %e, "message submission failed");
            return Err(e.into());
        }
        info!(chars = text.chars().count(), "message posted");

        self.page.clear_input(COMPOSER_FIELD)?;
        self.refresh().await
    }
}

#[cfg(test)]
#[path = "message_test.rs"]
mod tests;
