//! Expiry sweeper for periodic maintenance of the token stores
//!
//! Expired refresh tokens and revocation entries are harmless to keep (every
//! read re-checks expiry) but grow without bound, so a background task
//! deletes them on a fixed schedule.

use std::sync::Arc;

use chrono::{DateTime, Utc};
use tokio::sync::watch;
use tokio::task::JoinHandle;
use tokio::time::MissedTickBehavior;
use tracing::{error, info, warn};

use crate::repositories::{RefreshTokenRepository, RevocationRepository};
use tg_shared::config::SweeperConfig;

/// Service that purges expired rows from both token stores
pub struct ExpirySweeper<R, V>
where
    R: RefreshTokenRepository + 'static,
    V: RevocationRepository + 'static,
{
    refresh_tokens: Arc<R>,
    revocations: Arc<V>,
    config: SweeperConfig,
}

impl<R, V> ExpirySweeper<R, V>
where
    R: RefreshTokenRepository + 'static,
    V: RevocationRepository + 'static,
{
    pub fn new(refresh_tokens: Arc<R>, revocations: Arc<V>, config: SweeperConfig) -> Self {
        Self {
            refresh_tokens,
            revocations,
            config,
        }
    }

    pub fn config(&self) -> &SweeperConfig {
        &self.config
    }

    /// Run a single sweep against `now`
    ///
    /// Both stores are always attempted; a failure in one is recorded in the
    /// report and does not stop the other.
    pub async fn run_once(&self, now: DateTime<Utc>) -> SweepReport {
        let mut report = SweepReport::default();

        match self.refresh_tokens.cleanup(now).await {
            Ok(count) => report.refresh_tokens_deleted = count,
            Err(e) => {
                error!(error = %e, "Failed to purge expired refresh tokens");
                report.errors.push(format!("Refresh token cleanup error: {}", e));
            }
        }

        match self.revocations.cleanup(now).await {
            Ok(count) => report.revocations_deleted = count,
            Err(e) => {
                error!(error = %e, "Failed to purge expired revocation entries");
                report.errors.push(format!("Revocation cleanup error: {}", e));
            }
        }

        report
    }

    /// One scheduled sweep bounded by the configured tick timeout
    ///
    /// Returns `None` when the sweep was abandoned at the deadline.
    pub async fn tick(&self) -> Option<SweepReport> {
        let deadline = self.config.tick_timeout();

        match tokio::time::timeout(deadline, self.run_once(Utc::now())).await {
            Ok(report) => {
                info!(
                    refresh_tokens_deleted = report.refresh_tokens_deleted,
                    revocations_deleted = report.revocations_deleted,
                    errors = report.errors.len(),
                    "Expiry sweep completed"
                );
                Some(report)
            }
            Err(_) => {
                error!(timeout_secs = deadline.as_secs(), "Expiry sweep timed out");
                None
            }
        }
    }

    /// Spawn the sweep loop on the current runtime
    ///
    /// The first sweep runs immediately, then once per interval. A disabled
    /// sweeper returns an idle handle.
    pub fn start(self: Arc<Self>) -> SweeperHandle {
        let (shutdown, mut shutdown_rx) = watch::channel(false);

        if !self.config.enabled {
            warn!("Expiry sweeper is disabled");
            return SweeperHandle {
                shutdown,
                task: None,
            };
        }

        let period = self.config.interval();
        info!(interval_secs = period.as_secs(), "Expiry sweeper started");

        let task = tokio::spawn(async move {
            let mut ticker = tokio::time::interval(period);
            ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);

            loop {
                tokio::select! {
                    biased;
                    // A dropped handle counts as a stop request
                    changed = shutdown_rx.changed() => {
                        if changed.is_err() || *shutdown_rx.borrow() {
                            break;
                        }
                    }
                    _ = ticker.tick() => {
                        self.tick().await;
                    }
                }
            }

            info!("Expiry sweeper stopped");
        });

        SweeperHandle {
            shutdown,
            task: Some(task),
        }
    }
}

/// Handle to a running sweep loop
#[derive(Debug)]
pub struct SweeperHandle {
    shutdown: watch::Sender<bool>,
    task: Option<JoinHandle<()>>,
}

impl SweeperHandle {
    pub fn is_running(&self) -> bool {
        self.task.as_ref().is_some_and(|task| !task.is_finished())
    }

    /// Signal the loop and wait for it to exit
    ///
    /// A sweep already in progress finishes (or times out) first.
    pub async fn stop(mut self) {
        let _ = self.shutdown.send(true);

        if let Some(task) = self.task.take() {
            if let Err(e) = task.await {
                error!(error = %e, "Expiry sweeper task ended abnormally");
            }
        }
    }
}

/// Result of a single sweep
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct SweepReport {
    pub refresh_tokens_deleted: u64,
    pub revocations_deleted: u64,
    /// Per-store failures; the sweep still attempts every store
    pub errors: Vec<String>,
}

impl SweepReport {
    pub fn is_success(&self) -> bool {
        self.errors.is_empty()
    }

    pub fn total_deleted(&self) -> u64 {
        self.refresh_tokens_deleted + self.revocations_deleted
    }
}
