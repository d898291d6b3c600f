//! In-memory page model standing in for the browser document.
//!
//! DESIGN
//! ======
//! A page has a table container (`div_table`), a set of input fields with
//! their current values, and optionally a replaced body. Fields created by a
//! rendered table are owned by that table: replacing the table drops them
//! and the new table's fields start empty. Fields registered with
//! [`Page::with_field`] live outside the table and survive refreshes.

use std::collections::{BTreeMap, BTreeSet};
use std::fmt::Write as _;

use crate::render::{RenderedTable, escape_html};

pub const TABLE_CONTAINER_ID: &str = "div_table";

#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum PageError {
    #[error("no input field with id `{0}` on the page")]
    UnknownField(String),
    #[error("page body has been replaced")]
    BodyReplaced,
}

/// A persistent field rendered below the table, with the button that submits it.
#[derive(Debug, Clone, PartialEq, Eq)]
struct StaticField {
    id: String,
    button_onclick: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Page {
    title: String,
    table: String,
    fields: BTreeMap<String, String>,
    table_fields: BTreeSet<String>,
    static_fields: Vec<StaticField>,
    replaced_body: Option<String>,
}

impl Page {
    #[must_use]
    pub fn new(title: impl Into<String>) -> Self {
        Self { title: title.into(), ..Self::default() }
    }

    /// Add a field outside the table, submitted by a button calling `onclick`.
    #[must_use]
    pub fn with_field(mut self, id: impl Into<String>, onclick: impl Into<String>) -> Self {
        let id = id.into();
        self.fields.insert(id.clone(), String::new());
        self.static_fields.push(StaticField { id, button_onclick: onclick.into() });
        self
    }

    #[must_use]
    pub fn title(&self) -> &str {
        &self.title
    }

    /// Inner HTML of the table container.
    #[must_use]
    pub fn table(&self) -> &str {
        &self.table
    }

    /// Replace the table. Fields belonging to the previous table are dropped.
    ///
    /// # Errors
    ///
    /// Returns [`PageError::BodyReplaced`] once the body has been replaced.
    pub fn set_table(&mut self, rendered: RenderedTable) -> Result<(), PageError> {
        if self.replaced_body.is_some() {
            return Err(PageError::BodyReplaced);
        }
        for id in std::mem::take(&mut self.table_fields) {
            self.fields.remove(&id);
        }
        for id in rendered.fields {
            self.fields.insert(id.clone(), String::new());
            self.table_fields.insert(id);
        }
        self.table = rendered.html;
        Ok(())
    }

    #[must_use]
    pub fn has_field(&self, id: &str) -> bool {
        self.fields.contains_key(id)
    }

    /// Ids of all input fields currently on the page.
    pub fn field_ids(&self) -> impl Iterator<Item = &str> {
        self.fields.keys().map(String::as_str)
    }

    /// Current value of an input field.
    ///
    /// # Errors
    ///
    /// Returns [`PageError::UnknownField`] if no such field is on the page.
    pub fn input_value(&self, id: &str) -> Result<&str, PageError> {
        self.fields
            .get(id)
            .map(String::as_str)
            .ok_or_else(|| PageError::UnknownField(id.to_owned()))
    }

    /// Type into an input field, replacing its value.
    ///
    /// # Errors
    ///
    /// Returns [`PageError::UnknownField`] if no such field is on the page.
    pub fn set_input(&mut self, id: &str, value: impl Into<String>) -> Result<(), PageError> {
        let slot = self
            .fields
            .get_mut(id)
            .ok_or_else(|| PageError::UnknownField(id.to_owned()))?;
        *slot = value.into();
        Ok(())
    }

    /// Empty an input field.
    ///
    /// # Errors
    ///
    /// Returns [`PageError::UnknownField`] if no such field is on the page.
    pub fn clear_input(&mut self, id: &str) -> Result<(), PageError> {
        self.set_input(id, String::new())
    }

    /// Replace the whole body. The table and all fields are discarded.
    pub fn replace_body(&mut self, html: impl Into<String>) {
        self.table.clear();
        self.fields.clear();
        self.table_fields.clear();
        self.static_fields.clear();
        self.replaced_body = Some(html.into());
    }

    #[must_use]
    pub fn replaced_body(&self) -> Option<&str> {
        self.replaced_body.as_deref()
    }

    /// Render the page as a complete HTML document.
    #[must_use]
    pub fn to_html(&self) -> String {
        let mut html = String::from("<!DOCTYPE html>\n<html>\n<head>\n<meta charset=\"utf-8\" />\n");
        let _ = writeln!(html, "<title>{}</title>", escape_html(&self.title));
        html.push_str("</head>\n<body>\n");

        if let Some(body) = &self.replaced_body {
            html.push_str(body);
            html.push('\n');
        } else {
            let _ = writeln!(html, "<div id=\"{TABLE_CONTAINER_ID}\">{}</div>", self.table);
            for field in &self.static_fields {
                let value = self.fields.get(&field.id).map(String::as_str).unwrap_or_default();
                let _ = writeln!(
                    html,
                    "<textarea id=\"{}\">{}</textarea><br /><button onclick=\"{}\">Post</button>",
                    field.id,
                    escape_textarea(value),
                    field.button_onclick,
                );
            }
        }

        html.push_str("</body>\n</html>\n");
        html
    }
}

/// Textarea content keeps its line breaks; only markup characters are encoded.
fn escape_textarea(value: &str) -> String {
    value.replace('&', "&amp;").replace('<', "&lt;").replace('>', "&gt;")
}

#[cfg(test)]
#[path = "page_test.rs"]
mod tests;
