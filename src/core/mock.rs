//! Scripted [`Transport`] for tests.
//!
//! Replies are consumed in order. The deadline resolves immediately, so a
//! [`MockReply::Stall`] always times out while every other reply, being
//! ready on first poll, always wins the race.

use std::cell::{Cell, RefCell};
use std::collections::VecDeque;
use std::future::Future;
use std::rc::Rc;

use serde_json::Value;

use crate::core::api::{RawResponse, Transport};

/// One scripted outcome for a GET.
#[derive(Debug, Clone)]
pub enum MockReply {
    Respond(RawResponse),
    Fail(String),
    /// Never resolves; counts a cancellation when dropped.
    Stall,
}

impl MockReply {
    pub fn json(body: Value) -> Self {
        Self::status(200, "OK", Some(&body.to_string()))
    }

    pub fn status(status: u16, status_text: &str, body: Option<&str>) -> Self {
        Self::Respond(RawResponse {
            status,
            status_text: status_text.to_string(),
            body: body.map(str::to_string),
        })
    }
}

/// A request the mock saw.
#[derive(Debug, Clone, PartialEq)]
pub struct RecordedRequest {
    pub url: String,
    pub headers: Vec<(String, String)>,
}

struct CancelProbe(Rc<Cell<usize>>);

impl Drop for CancelProbe {
    fn drop(&mut self) {
        self.0.set(self.0.get() + 1);
    }
}

#[derive(Default)]
pub struct MockTransport {
    replies: RefCell<VecDeque<MockReply>>,
    requests: RefCell<Vec<RecordedRequest>>,
    cancelled: Rc<Cell<usize>>,
    last_timeout: Cell<Option<u32>>,
}

impl MockTransport {
    pub fn new() -> Self {
        Self::default()
    }

    /// Queue the next reply.
    pub fn push(&self, reply: MockReply) {
        self.replies.borrow_mut().push_back(reply);
    }

    pub fn requests(&self) -> Vec<RecordedRequest> {
        self.requests.borrow().clone()
    }

    /// Number of stalled requests dropped before completing.
    pub fn cancelled(&self) -> usize {
        self.cancelled.get()
    }

    pub fn last_timeout(&self) -> Option<u32> {
        self.last_timeout.get()
    }
}

impl Transport for MockTransport {
    fn get(
        &self,
        url: &str,
        headers: &[(&str, &str)],
    ) -> impl Future<Output = Result<RawResponse, String>> {
        self.requests.borrow_mut().push(RecordedRequest {
            url: url.to_string(),
            headers: headers
                .iter()
                .map(|(name, value)| (name.to_string(), value.to_string()))
                .collect(),
        });
        let reply = self
            .replies
            .borrow_mut()
            .pop_front()
            .unwrap_or_else(|| MockReply::Fail("no mock reply queued".to_string()));
        let cancelled = Rc::clone(&self.cancelled);

        async move {
            match reply {
                MockReply::Respond(response) => Ok(response),
                MockReply::Fail(message) => Err(message),
                MockReply::Stall => {
                    let _probe = CancelProbe(cancelled);
                    std::future::pending().await
                }
            }
        }
    }

    fn sleep(&self, ms: u32) -> impl Future<Output = ()> {
        self.last_timeout.set(Some(ms));
        std::future::ready(())
    }
}
