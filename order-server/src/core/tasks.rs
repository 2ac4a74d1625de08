//! Background jobs
//!
//! Every job shares one shutdown token. A job that panics is logged and
//! contained; it never takes the server down with it.

use futures::FutureExt;
use std::panic::AssertUnwindSafe;
use tokio::task::JoinHandle;
use tokio_util::sync::CancellationToken;

struct Job {
    name: &'static str,
    handle: JoinHandle<()>,
}

/// Running background jobs
///
/// ```ignore
/// let mut tasks = BackgroundTasks::new();
/// let reaper = PendingOrderReaper::new(storage, interval, ttl, tasks.shutdown_token());
/// tasks.spawn("pending_order_reaper", reaper.run());
///
/// tasks.shutdown().await;
/// ```
pub struct BackgroundTasks {
    jobs: Vec<Job>,
    shutdown: CancellationToken,
}

impl BackgroundTasks {
    pub fn new() -> Self {
        Self {
            jobs: Vec::new(),
            shutdown: CancellationToken::new(),
        }
    }

    /// Token jobs watch for the shutdown signal
    pub fn shutdown_token(&self) -> CancellationToken {
        self.shutdown.clone()
    }

    /// Start a job; returning before shutdown is logged as unexpected
    pub fn spawn<F>(&mut self, name: &'static str, future: F)
    where
        F: std::future::Future<Output = ()> + Send + 'static,
    {
        let shutdown = self.shutdown.clone();
        let handle = tokio::spawn(async move {
            match AssertUnwindSafe(future).catch_unwind().await {
                Ok(()) if !shutdown.is_cancelled() => {
                    tracing::warn!(task = %name, "Background task completed unexpectedly");
                }
                Ok(()) => {}
                Err(panic_info) => {
                    let panic_msg = panic_info
                        .downcast_ref::<&str>()
                        .map(|s| (*s).to_string())
                        .or_else(|| panic_info.downcast_ref::<String>().cloned())
                        .unwrap_or_else(|| "Unknown panic".to_string());
                    tracing::error!(task = %name, panic = %panic_msg, "Background task panicked");
                }
            }
        });

        tracing::debug!(task = %name, "Registered background task");
        self.jobs.push(Job { name, handle });
    }

    pub fn names(&self) -> Vec<&'static str> {
        self.jobs.iter().map(|j| j.name).collect()
    }

    /// Cancel every job and wait for it to finish
    pub async fn shutdown(self) {
        tracing::info!("Shutting down {} background tasks...", self.jobs.len());
        self.shutdown.cancel();

        for job in self.jobs {
            if let Err(e) = job.handle.await {
                tracing::error!(task = %job.name, error = ?e, "Task join failed");
            }
        }

        tracing::info!("All background tasks stopped");
    }
}

impl Default for BackgroundTasks {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;
    use std::sync::atomic::{AtomicBool, Ordering};

    #[tokio::test]
    async fn test_shutdown_stops_job() {
        let mut tasks = BackgroundTasks::new();
        let token = tasks.shutdown_token();
        let stopped = Arc::new(AtomicBool::new(false));
        let flag = Arc::clone(&stopped);
        tasks.spawn("ticker", async move {
            token.cancelled().await;
            flag.store(true, Ordering::SeqCst);
        });

        assert_eq!(tasks.names(), vec!["ticker"]);
        tasks.shutdown().await;
        assert!(stopped.load(Ordering::SeqCst));
    }

    #[tokio::test]
    async fn test_panicking_job_is_contained() {
        let mut tasks = BackgroundTasks::new();
        tasks.spawn("broken", async {
            panic!("boom");
        });
        tasks.spawn("idle", std::future::ready(()));

        // Both joins succeed: the panic was caught inside the job
        tasks.shutdown().await;
    }
}
