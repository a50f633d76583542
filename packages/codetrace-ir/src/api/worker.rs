//! Worker isolation
//!
//! Each request runs as its own task on tokio's blocking pool and yields
//! exactly one result. Nothing is shared between tasks except the read-only
//! dispatcher.

use std::future::Future;
use std::pin::Pin;
use std::sync::Arc;
use std::task::{Context, Poll};

use tokio::runtime::Handle;
use tokio::task::JoinHandle;
use tracing::{debug, warn};

use super::dispatcher::{AnalysisRequest, Dispatcher};
use crate::config::AnalyzerConfig;
use crate::shared::models::AnalysisResult;

/// Submits analysis requests to the blocking pool
#[derive(Debug, Clone)]
pub struct AnalysisWorker {
    dispatcher: Arc<Dispatcher>,
}

impl AnalysisWorker {
    pub fn new(config: &AnalyzerConfig) -> Self {
        Self::with_dispatcher(Arc::new(Dispatcher::new(config)))
    }

    pub fn with_dispatcher(dispatcher: Arc<Dispatcher>) -> Self {
        Self { dispatcher }
    }

    /// Start one analysis
    ///
    /// Outside a tokio runtime the analysis runs inline and the returned
    /// future is already complete.
    pub fn submit(&self, request: AnalysisRequest) -> PendingAnalysis {
        match Handle::try_current() {
            Ok(handle) => {
                let dispatcher = Arc::clone(&self.dispatcher);
                debug!(language = %request.language, bytes = request.code.len(), "submitting analysis");
                let task = handle.spawn_blocking(move || dispatcher.dispatch(&request));
                PendingAnalysis {
                    state: PendingState::Running(task),
                }
            }
            Err(_) => PendingAnalysis {
                state: PendingState::Ready(Some(self.dispatcher.dispatch(&request))),
            },
        }
    }

    /// Submit and wait
    pub async fn analyze(&self, code: impl Into<String>, language: impl Into<String>) -> AnalysisResult {
        self.submit(AnalysisRequest::new(code, language)).await
    }
}

impl Default for AnalysisWorker {
    fn default() -> Self {
        Self::new(&AnalyzerConfig::default())
    }
}

/// Result of a submitted request; resolves exactly once
#[derive(Debug)]
pub struct PendingAnalysis {
    state: PendingState,
}

#[derive(Debug)]
enum PendingState {
    Running(JoinHandle<AnalysisResult>),
    Ready(Option<AnalysisResult>),
}

impl PendingAnalysis {
    /// Discard the request; a task that already started still runs to
    /// completion but its result is dropped
    pub fn abandon(self) {
        if let PendingState::Running(task) = self.state {
            task.abort();
        }
    }

    pub fn is_finished(&self) -> bool {
        match &self.state {
            PendingState::Running(task) => task.is_finished(),
            PendingState::Ready(_) => true,
        }
    }
}

impl Future for PendingAnalysis {
    type Output = AnalysisResult;

    fn poll(mut self: Pin<&mut Self>, cx: &mut Context<'_>) -> Poll<Self::Output> {
        match &mut self.state {
            PendingState::Running(task) => match Pin::new(task).poll(cx) {
                Poll::Ready(Ok(result)) => Poll::Ready(result),
                Poll::Ready(Err(e)) => {
                    warn!(error = %e, "analysis task failed, returning empty result");
                    Poll::Ready(AnalysisResult::empty())
                }
                Poll::Pending => Poll::Pending,
            },
            PendingState::Ready(result) => Poll::Ready(result.take().unwrap_or_default()),
        }
    }
}
