//! HTML rendering for the board tables and denial pages.
//!
//! DESIGN
//! ======
//! Rendering is plain string building. Every value that comes from the API
//! goes through [`escape_html`] before it lands in markup; the only
//! unescaped interpolations are the row index and the numeric message id.

use std::fmt::Write as _;

use crate::api::{ManageEntry, MessageEntry};

pub const ADMIN_DENIED_HTML: &str = "<h1>Please become an administrator to use this feature!</h1>";
pub const USER_DENIED_HTML: &str = "<h1>Please use this feature after logged in!</h1>";

/// Id of the reply textarea for a manage-view row.
#[must_use]
pub fn reply_field_id(row: usize) -> String {
    format!("textarea_{row}")
}

/// A rendered table plus the ids of the input fields it contains.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RenderedTable {
    pub html: String,
    pub fields: Vec<String>,
}

// =============================================================================
// ESCAPING
// =============================================================================

/// Escape text for insertion as element content.
///
/// Produces what a browser serializes after the text is assigned as an
/// element's rendered text: `&`, `<`, `>` and no-break spaces become
/// entities, and each line break becomes `<br>`.
#[must_use]
pub fn escape_html(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    let mut chars = text.chars().peekable();
    while let Some(c) = chars.next() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '\u{a0}' => out.push_str("&nbsp;"),
            '\r' => {
                if chars.peek() == Some(&'\n') {
                    chars.next();
                }
                out.push_str("<br>");
            }
            '\n' => out.push_str("<br>"),
            other => out.push(other),
        }
    }
    out
}

// =============================================================================
// TABLES
// =============================================================================

fn header_row(columns: &[&str]) -> String {
    let mut html = String::from("<tr>");
    for column in columns {
        let _ = write!(html, "<th>{column}</th>");
    }
    html.push_str("</tr>");
    html
}

/// Admin table: a row without a reply gets a textarea and a post button
/// keyed by row index and message id.
#[must_use]
pub fn manage_table(entries: &[ManageEntry]) -> RenderedTable {
    let mut html = String::from("<table>");
    html.push_str(&header_row(&["Time", "User Name", "Message", "Reply Message"]));

    let mut fields = Vec::new();
    for (row, entry) in entries.iter().enumerate() {
        let reply_cell = if let Some(reply) = entry.reply_text() {
            escape_html(reply)
        } else {
            let field_id = reply_field_id(row);
            let cell = format!(
                "<textarea id=\"{field_id}\"></textarea><br /><button onclick=\"rep_post({row}, {msgid})\">Post</button>",
                msgid = entry.msgid,
            );
            fields.push(field_id);
            cell
        };

        let _ = write!(
            html,
            "<tr><td>{}</td><td>{}</td><td>{}</td><td>{reply_cell}</td></tr>",
            escape_html(&entry.time),
            escape_html(&entry.user_name),
            escape_html(&entry.message),
        );
    }

    html.push_str("</table>");
    RenderedTable { html, fields }
}

/// User table: read-only rows; a missing reply renders as an empty cell.
#[must_use]
pub fn message_table(entries: &[MessageEntry]) -> RenderedTable {
    let mut html = String::from("<table>");
    html.push_str(&header_row(&["Time", "Message", "Reply"]));

    for entry in entries {
        let _ = write!(
            html,
            "<tr><td>{}</td><td>{}</td><td>{}</td></tr>",
            escape_html(&entry.time),
            escape_html(&entry.message),
            escape_html(entry.reply.as_deref().unwrap_or_default()),
        );
    }

    html.push_str("</table>");
    RenderedTable { html, fields: Vec::new() }
}

#[cfg(test)]
#[path = "mod_test.rs"]
mod tests;
