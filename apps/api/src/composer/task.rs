//! Generation task: one outbound generation with an observable lifecycle.
//!
//! Status moves `Idle → InFlight → Settled`. Observers subscribe to a watch channel
//! instead of polling. The cancellation token is only fired on server shutdown.

use std::fmt;
use std::future::Future;

use thiserror::Error;
use tokio::sync::watch;
use tokio_util::sync::CancellationToken;
use tracing::{debug, warn};

/// Reply text shown when a generation is cancelled before it settles.
pub const CANCELLED_MESSAGE: &str = "Generation was cancelled.";

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum GenerationStatus {
    #[default]
    Idle,
    InFlight,
    /// `Ok` holds the reply, `Err` the text shown in place of one.
    Settled(Result<String, String>),
}

impl GenerationStatus {
    pub fn is_in_flight(&self) -> bool {
        matches!(self, GenerationStatus::InFlight)
    }
}

#[derive(Debug, Error)]
pub enum TaskError<E> {
    #[error("a generation is already in flight")]
    AlreadyInFlight,

    #[error("generation cancelled")]
    Cancelled,

    #[error("{0}")]
    Failed(E),
}

pub struct GenerationTask {
    status: watch::Sender<GenerationStatus>,
    cancel: CancellationToken,
}

impl GenerationTask {
    #[cfg(test)]
    pub fn new() -> Self {
        Self::with_token(CancellationToken::new())
    }

    /// Binds the task to an existing token, usually a child of the shutdown token.
    pub fn with_token(cancel: CancellationToken) -> Self {
        let (status, _) = watch::channel(GenerationStatus::Idle);
        Self { status, cancel }
    }

    #[cfg(test)]
    pub fn status(&self) -> GenerationStatus {
        self.status.borrow().clone()
    }

    #[cfg(test)]
    pub fn subscribe(&self) -> watch::Receiver<GenerationStatus> {
        self.status.subscribe()
    }

    #[cfg(test)]
    pub fn cancellation_token(&self) -> CancellationToken {
        self.cancel.clone()
    }

    /// Drives `generation` to completion unless the token fires first.
    pub async fn run<F, E>(&self, generation: F) -> Result<String, TaskError<E>>
    where
        F: Future<Output = Result<String, E>>,
        E: fmt::Display,
    {
        let started = self.status.send_if_modified(|status| {
            if status.is_in_flight() {
                false
            } else {
                *status = GenerationStatus::InFlight;
                true
            }
        });
        if !started {
            return Err(TaskError::AlreadyInFlight);
        }
        debug!("Generation in flight");

        let outcome = tokio::select! {
            _ = self.cancel.cancelled() => {
                warn!("Generation cancelled before it settled");
                Err(TaskError::Cancelled)
            }
            result = generation => result.map_err(TaskError::Failed),
        };

        let settled = match &outcome {
            Ok(reply) => Ok(reply.clone()),
            Err(TaskError::Cancelled) => Err(CANCELLED_MESSAGE.to_string()),
            Err(e) => Err(e.to_string()),
        };
        self.status.send_replace(GenerationStatus::Settled(settled));

        outcome
    }
}
