//! Fan-out of one event to many sinks.
//!
//! Every sink gets its own task. A sink that errors or panics is reported
//! through `tracing` and in the [`DispatchReport`], and nothing else notices.
//! When the calling thread is not inside a tokio runtime, tasks go to a small
//! background runtime started on first use.

use fanlog_types::{LogEvent, Result, SharedSink};
use futures::FutureExt;
use once_cell::sync::Lazy;
use std::panic::AssertUnwindSafe;
use std::sync::Arc;
use tokio::runtime::{Builder, Handle, Runtime};
use tokio::task::JoinHandle;

static BACKGROUND: Lazy<Option<Runtime>> = Lazy::new(|| {
    match Builder::new_multi_thread()
        .worker_threads(2)
        .thread_name("fanlog-dispatch")
        .enable_all()
        .build()
    {
        Ok(runtime) => Some(runtime),
        Err(e) => {
            tracing::error!(error = %e, "failed to start background dispatch runtime; delivering inline");
            None
        }
    }
});

fn runtime_handle() -> Option<Handle> {
    Handle::try_current()
        .ok()
        .or_else(|| BACKGROUND.as_ref().map(|runtime| runtime.handle().clone()))
}

/// One sink that did not take its delivery.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SinkFailure {
    /// Sink name
    pub sink: String,
    /// Rendered error, or a panic notice
    pub error: String,
}

/// Outcome of awaiting a [`Dispatch`].
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DispatchReport {
    /// Number of sinks whose delivery returned `Ok`
    pub delivered: usize,
    /// Sinks that failed, in binding order
    pub failures: Vec<SinkFailure>,
}

impl DispatchReport {
    /// True when no sink failed.
    pub fn is_success(&self) -> bool {
        self.failures.is_empty()
    }

    /// Number of sinks the event was handed to.
    pub fn attempted(&self) -> usize {
        self.delivered + self.failures.len()
    }
}

enum Pending {
    Spawned {
        sink: String,
        handle: JoinHandle<Result<()>>,
    },
    Finished {
        sink: String,
        outcome: std::result::Result<(), String>,
    },
}

/// Handle to the deliveries started for one event.
///
/// Dropping it detaches the deliveries; they still run to completion.
/// Awaiting [`completion`](Dispatch::completion) waits for every sink.
pub struct Dispatch {
    pending: Vec<Pending>,
}

impl Dispatch {
    /// Start delivering `event` to each sink in `sinks`.
    pub fn start(event: LogEvent, sinks: &[SharedSink]) -> Self {
        if sinks.is_empty() {
            return Self { pending: Vec::new() };
        }

        let event = Arc::new(event);
        let handle = runtime_handle();

        let pending = sinks
            .iter()
            .map(|sink| {
                let name = sink.name().to_string();
                let delivery = deliver_isolated(Arc::clone(sink), Arc::clone(&event));
                match &handle {
                    Some(handle) => Pending::Spawned {
                        sink: name,
                        handle: handle.spawn(delivery),
                    },
                    None => {
                        let outcome = match std::panic::catch_unwind(AssertUnwindSafe(|| {
                            futures::executor::block_on(delivery)
                        })) {
                            Ok(Ok(())) => Ok(()),
                            Ok(Err(e)) => Err(e.to_string()),
                            Err(_) => Err("sink panicked during delivery".to_string()),
                        };
                        Pending::Finished { sink: name, outcome }
                    }
                }
            })
            .collect();

        Self { pending }
    }

    /// Number of sinks this event was handed to.
    pub fn sink_count(&self) -> usize {
        self.pending.len()
    }

    /// Wait for every delivery and summarize the outcome.
    pub async fn completion(self) -> DispatchReport {
        let mut report = DispatchReport::default();

        for pending in self.pending {
            let (sink, outcome) = match pending {
                Pending::Finished { sink, outcome } => (sink, outcome),
                Pending::Spawned { sink, handle } => {
                    let outcome = match handle.await {
                        Ok(Ok(())) => Ok(()),
                        Ok(Err(e)) => Err(e.to_string()),
                        Err(join_error) if join_error.is_panic() => {
                            Err("sink panicked during delivery".to_string())
                        }
                        Err(join_error) => Err(format!("delivery task aborted: {}", join_error)),
                    };
                    (sink, outcome)
                }
            };

            match outcome {
                Ok(()) => report.delivered += 1,
                Err(error) => report.failures.push(SinkFailure { sink, error }),
            }
        }

        report
    }
}

impl std::fmt::Debug for Dispatch {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Dispatch")
            .field("sinks", &self.pending.len())
            .finish()
    }
}

async fn deliver_isolated(sink: SharedSink, event: Arc<LogEvent>) -> Result<()> {
    let outcome = AssertUnwindSafe(sink.deliver(&event)).catch_unwind().await;
    match outcome {
        Ok(Ok(())) => Ok(()),
        Ok(Err(e)) => {
            tracing::warn!(
                sink = sink.name(),
                logger = %event.source,
                level = %event.level,
                error = %e,
                "log sink delivery failed"
            );
            Err(e)
        }
        Err(panic) => {
            tracing::warn!(
                sink = sink.name(),
                logger = %event.source,
                level = %event.level,
                "log sink panicked during delivery"
            );
            std::panic::resume_unwind(panic)
        }
    }
}
