//! In-memory `BoardApi` for view tests.

use std::collections::VecDeque;
use std::sync::Mutex;

use serde_json::Value;

use super::{ApiError, BoardApi, ManageEntry, MessageEntry, ReplyRequest, Role};

/// Calls observed by [`MockApi`], in order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Call {
    CheckAccess(Role),
    ManageEntries,
    PostReply(ReplyRequest),
    MessageEntries,
    PostMessage(String),
}

/// Scripted board API. Each list call pops the next queued response; when the
/// queue is empty the last configured list is returned again.
#[derive(Default)]
pub struct MockApi {
    pub deny_access: bool,
    pub fail_posts: bool,
    manage_lists: Mutex<VecDeque<Vec<ManageEntry>>>,
    message_lists: Mutex<VecDeque<Vec<MessageEntry>>>,
    calls: Mutex<Vec<Call>>,
}

impl MockApi {
    pub fn denying() -> Self {
        Self { deny_access: true, ..Self::default() }
    }

    pub fn with_manage_lists(lists: Vec<Vec<ManageEntry>>) -> Self {
        Self { manage_lists: Mutex::new(lists.into()), ..Self::default() }
    }

    pub fn with_message_lists(lists: Vec<Vec<MessageEntry>>) -> Self {
        Self { message_lists: Mutex::new(lists.into()), ..Self::default() }
    }

    pub fn calls(&self) -> Vec<Call> {
        self.calls.lock().unwrap().clone()
    }

    fn record(&self, call: Call) {
        self.calls.lock().unwrap().push(call);
    }
}

fn next_list<T: Clone>(queue: &Mutex<VecDeque<Vec<T>>>) -> Vec<T> {
    let mut queue = queue.lock().unwrap();
    if queue.len() > 1 { queue.pop_front().unwrap_or_default() } else { queue.front().cloned().unwrap_or_default() }
}

#[async_trait::async_trait]
impl BoardApi for MockApi {
    async fn check_access(&self, role: Role) -> Result<(), ApiError> {
        self.record(Call::CheckAccess(role));
        if self.deny_access {
            return Err(ApiError::Status { status: 401, body: String::new() });
        }
        Ok(())
    }

    async fn manage_entries(&self) -> Result<Vec<ManageEntry>, ApiError> {
        self.record(Call::ManageEntries);
        Ok(next_list(&self.manage_lists))
    }

    async fn post_reply(&self, request: &ReplyRequest) -> Result<Value, ApiError> {
        self.record(Call::PostReply(request.clone()));
        if self.fail_posts {
            return Err(ApiError::Request("connection reset".into()));
        }
        Ok(Value::Bool(true))
    }

    async fn message_entries(&self) -> Result<Vec<MessageEntry>, ApiError> {
        self.record(Call::MessageEntries);
        Ok(next_list(&self.message_lists))
    }

    async fn post_message(&self, text: &str) -> Result<Value, ApiError> {
        self.record(Call::PostMessage(text.to_owned()));
        if self.fail_posts {
            return Err(ApiError::Status { status: 500, body: String::new() });
        }
        Ok(Value::Bool(true))
    }
}

pub fn manage_entry(msgid: i64, message: &str, reply: Option<&str>) -> ManageEntry {
    ManageEntry {
        msgid,
        time: format!("2024-05-0{} 09:30", msgid % 10),
        user_name: format!("user{msgid}"),
        message: message.to_owned(),
        reply: reply.map(str::to_owned),
    }
}

pub fn message_entry(message: &str, reply: Option<&str>) -> MessageEntry {
    MessageEntry { time: "2024-05-01 09:30".into(), message: message.to_owned(), reply: reply.map(str::to_owned) }
}
