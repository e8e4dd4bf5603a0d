//! Shared fixtures for handler and routing tests.

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use tokio_util::sync::CancellationToken;

use crate::composer::catalog::Catalog;
use crate::llm_client::{CompletionProvider, LlmError};
use crate::models::message::Message;
use crate::state::AppState;

enum Behavior {
    Reply(Option<String>),
    Fail(fn() -> LlmError),
    Pending,
}

/// In-memory `CompletionProvider` that records every call.
#[derive(Clone)]
pub struct StubProvider {
    inner: Arc<StubInner>,
}

struct StubInner {
    behavior: Behavior,
    calls: AtomicUsize,
    last_messages: Mutex<Option<Vec<Message>>>,
}

impl StubProvider {
    fn with(behavior: Behavior) -> Self {
        Self {
            inner: Arc::new(StubInner {
                behavior,
                calls: AtomicUsize::new(0),
                last_messages: Mutex::new(None),
            }),
        }
    }

    pub fn replying(reply: &str) -> Self {
        Self::with(Behavior::Reply(Some(reply.to_string())))
    }

    /// Provider answers successfully but without content.
    pub fn empty() -> Self {
        Self::with(Behavior::Reply(None))
    }

    pub fn failing(error: fn() -> LlmError) -> Self {
        Self::with(Behavior::Fail(error))
    }

    /// Never settles.
    pub fn pending() -> Self {
        Self::with(Behavior::Pending)
    }

    pub fn calls(&self) -> usize {
        self.inner.calls.load(Ordering::SeqCst)
    }

    pub fn last_messages(&self) -> Option<Vec<Message>> {
        self.inner.last_messages.lock().unwrap().clone()
    }
}

#[async_trait]
impl CompletionProvider for StubProvider {
    async fn complete(&self, messages: &[Message]) -> Result<Option<String>, LlmError> {
        self.inner.calls.fetch_add(1, Ordering::SeqCst);
        *self.inner.last_messages.lock().unwrap() = Some(messages.to_vec());

        match &self.inner.behavior {
            Behavior::Reply(reply) => Ok(reply.clone()),
            Behavior::Fail(error) => Err(error()),
            Behavior::Pending => std::future::pending().await,
        }
    }
}

pub fn test_state(provider: StubProvider) -> AppState {
    AppState {
        llm: Arc::new(provider),
        catalog: Arc::new(Catalog::builtin().unwrap()),
        shutdown: CancellationToken::new(),
    }
}
