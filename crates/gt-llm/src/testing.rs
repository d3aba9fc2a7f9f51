//! Scripted in-process transport for tests.

use std::collections::VecDeque;
use std::sync::{Arc, Mutex, PoisonError};

use crate::error::TransportError;
use crate::transport::LlmTransport;
use crate::wire::{GenerateContentRequest, GenerateContentResponse};

/// A scripted reply. Errors are stored as descriptions so a script can be
/// replayed without `TransportError: Clone`.
#[derive(Debug, Clone)]
pub enum StubReply {
    Response(GenerateContentResponse),
    Api { status: u16, message: String },
    RateLimited(u64),
}

impl StubReply {
    fn into_result(self) -> Result<GenerateContentResponse, TransportError> {
        match self {
            Self::Response(resp) => Ok(resp),
            Self::Api { status, message } => Err(TransportError::Api { status, message }),
            Self::RateLimited(secs) => Err(TransportError::RateLimited {
                retry_after_secs: secs,
            }),
        }
    }
}

#[derive(Debug, Default)]
struct State {
    replies: VecDeque<StubReply>,
    requests: Vec<(String, GenerateContentRequest)>,
}

/// Returns queued replies in order and records every request it receives.
///
/// Clones share state, so a test can keep one handle for assertions while the
/// client under test owns another. An exhausted script yields an API error.
#[derive(Debug, Clone, Default)]
pub struct StubTransport {
    state: Arc<Mutex<State>>,
}

impl StubTransport {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Queue a successful reply whose text is `text`.
    #[must_use]
    pub fn with_text(self, text: impl Into<String>) -> Self {
        self.push(StubReply::Response(GenerateContentResponse::from_text(text)))
    }

    /// Queue a full response.
    #[must_use]
    pub fn with_response(self, response: GenerateContentResponse) -> Self {
        self.push(StubReply::Response(response))
    }

    /// Queue an API failure.
    #[must_use]
    pub fn with_api_error(self, status: u16, message: impl Into<String>) -> Self {
        self.push(StubReply::Api {
            status,
            message: message.into(),
        })
    }

    #[must_use]
    pub fn push(self, reply: StubReply) -> Self {
        self.lock().replies.push_back(reply);
        self
    }

    /// Every `(api_key, request)` pair received so far.
    #[must_use]
    pub fn requests(&self) -> Vec<(String, GenerateContentRequest)> {
        self.lock().requests.clone()
    }

    #[must_use]
    pub fn request_count(&self) -> usize {
        self.lock().requests.len()
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, State> {
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

impl LlmTransport for StubTransport {
    async fn generate_content(
        &self,
        api_key: &str,
        request: &GenerateContentRequest,
    ) -> Result<GenerateContentResponse, TransportError> {
        let reply = {
            let mut state = self.lock();
            state.requests.push((api_key.to_string(), request.clone()));
            state.replies.pop_front()
        };
        reply.map_or_else(
            || {
                Err(TransportError::Api {
                    status: 500,
                    message: "stub transport has no scripted reply".into(),
                })
            },
            StubReply::into_result,
        )
    }
}
