//! Message board client views.
//!
//! DESIGN
//! ======
//! Two views sit on top of the board API. The manage view lets an
//! administrator reply to messages; the message view lets a logged-in user
//! read the board and post a new message. Both follow the same cycle:
//! authorize, fetch, render the table into a `Page`, submit, re-fetch.
//!
//! The browser document is modelled by [`page::Page`] so the views can be
//! driven from the CLI or from tests without a DOM.

pub mod api;
pub mod config;
pub mod page;
pub mod render;
pub mod views;

pub use api::{BoardApi, HttpBoardApi, Role};
pub use config::BoardConfig;
pub use page::Page;
pub use views::manage::ManageView;
pub use views::message::MessageView;
pub use views::{Access, ViewError};
