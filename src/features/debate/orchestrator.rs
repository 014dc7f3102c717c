//! # Debate Orchestrator
//!
//! Drives one debate's lifecycle: submits the configuration for asynchronous
//! execution, then tracks it to a terminal state by polling the backend on a
//! fixed interval.
//!
//! Status moves `(none) -> pending -> running -> {completed | failed}`. Each
//! poll response replaces the stored snapshot wholesale; the backend is
//! authoritative for records, phase, and status. Polling is strictly
//! sequential - the next poll is scheduled only after the current one
//! resolves - and stops permanently at the first terminal snapshot, on the
//! first poll failure, or when cancelled. A response that arrives after
//! cancellation is dropped, never applied.

use anyhow::Result;
use log::{debug, info, warn};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use tokio::sync::{Notify, RwLock};
use tokio::task::JoinHandle;
use tokio::time::{sleep, Duration};

use crate::api::{Backend, DebateSnapshot};
use crate::features::debate::teams::DebateSetup;

/// Fixed delay between sequential status polls
pub const DEFAULT_POLL_INTERVAL: Duration = Duration::from_secs(2);

type SharedSnapshot = Arc<RwLock<Option<DebateSnapshot>>>;

/// Handle to the background poll task
struct Poller {
    stop: Arc<AtomicBool>,
    wake: Arc<Notify>,
    task: JoinHandle<()>,
}

/// Owns one debate's lifecycle
pub struct DebateOrchestrator {
    backend: Arc<dyn Backend>,
    poll_interval: Duration,
    snapshot: SharedSnapshot,
    poller: Option<Poller>,
}

impl DebateOrchestrator {
    pub fn new(backend: Arc<dyn Backend>) -> Self {
        Self::with_poll_interval(backend, DEFAULT_POLL_INTERVAL)
    }

    pub fn with_poll_interval(backend: Arc<dyn Backend>, poll_interval: Duration) -> Self {
        DebateOrchestrator {
            backend,
            poll_interval,
            snapshot: Arc::new(RwLock::new(None)),
            poller: None,
        }
    }

    /// The last stored snapshot, if a debate has been submitted
    pub async fn snapshot(&self) -> Option<DebateSnapshot> {
        self.snapshot.read().await.clone()
    }

    /// Whether the poll loop is still live
    pub fn is_polling(&self) -> bool {
        self.poller.as_ref().is_some_and(|p| !p.task.is_finished())
    }

    /// Submit a debate for asynchronous execution and begin polling.
    ///
    /// Any prior debate state is discarded first. Roster validity (non-empty,
    /// disjoint) is maintained by [`DebateSetup`] itself and not re-checked
    /// here.
    ///
    /// On acceptance the returned snapshot (normally `pending` with an id) is
    /// stored and the poll loop starts. If submission fails before the
    /// backend issues an id, a synthetic terminal `failed` snapshot is stored
    /// so the failure is displayable, no polling starts, and the error is
    /// returned.
    pub async fn start(&mut self, setup: &DebateSetup) -> Result<DebateSnapshot> {
        self.stop_polling();
        *self.snapshot.write().await = None;

        info!(
            "starting debate: '{}' pro={:?} con={:?}",
            setup.topic,
            setup.pro(),
            setup.con()
        );

        match self.backend.start_debate(&setup.to_request()).await {
            Ok(snap) => {
                *self.snapshot.write().await = Some(snap.clone());
                if let Some(id) = snap.id.clone() {
                    self.spawn_poller(id);
                } else {
                    warn!("debate accepted without an id; nothing to poll");
                }
                Ok(snap)
            }
            Err(e) => {
                let failed =
                    DebateSnapshot::submission_failure(&setup.topic, format!("启动讨论失败: {e}"));
                *self.snapshot.write().await = Some(failed);
                Err(e)
            }
        }
    }

    /// Cancel any scheduled poll. Idempotent; safe to call whether or not
    /// polling is active. The last stored snapshot is left untouched, and a
    /// poll already in flight has its response dropped.
    pub fn stop_polling(&mut self) {
        if let Some(poller) = self.poller.take() {
            poller.stop.store(true, Ordering::SeqCst);
            poller.wake.notify_waiters();
        }
    }

    fn spawn_poller(&mut self, id: String) {
        let stop = Arc::new(AtomicBool::new(false));
        let wake = Arc::new(Notify::new());

        let task = tokio::spawn(poll_loop(
            self.backend.clone(),
            id,
            self.snapshot.clone(),
            stop.clone(),
            wake.clone(),
            self.poll_interval,
        ));

        self.poller = Some(Poller { stop, wake, task });
    }
}

impl Drop for DebateOrchestrator {
    fn drop(&mut self) {
        self.stop_polling();
    }
}

/// Sequential poll loop: fetch, apply, wait, repeat. Exactly one request is
/// in flight at any time.
async fn poll_loop(
    backend: Arc<dyn Backend>,
    id: String,
    snapshot: SharedSnapshot,
    stop: Arc<AtomicBool>,
    wake: Arc<Notify>,
    interval: Duration,
) {
    loop {
        match backend.debate_status(&id).await {
            Ok(snap) => {
                // Cancellation may have raced this response; drop it unapplied
                if stop.load(Ordering::SeqCst) {
                    debug!("debate {id}: dropping snapshot that arrived after stop");
                    return;
                }

                let terminal = snap.status.is_terminal();
                *snapshot.write().await = Some(snap);

                if terminal {
                    info!("debate {id}: reached a terminal status, polling stopped");
                    return;
                }
            }
            Err(e) => {
                // A failed poll is not retried; the last snapshot stays
                // visible, stale
                warn!("debate {id}: status poll failed, polling stopped: {e}");
                return;
            }
        }

        tokio::select! {
            _ = sleep(interval) => {}
            _ = wake.notified() => {}
        }

        if stop.load(Ordering::SeqCst) {
            debug!("debate {id}: polling cancelled");
            return;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::testing::MockBackend;
    use crate::api::{DebateRecord, DebateStatus};
    use anyhow::anyhow;
    use std::sync::atomic::Ordering as AtomicOrdering;

    const TICK: Duration = Duration::from_millis(10);

    fn pending(id: &str) -> DebateSnapshot {
        DebateSnapshot {
            id: Some(id.to_string()),
            status: DebateStatus::Pending,
            topic: Some("T".to_string()),
            current_phase: None,
            records: Vec::new(),
            error: None,
        }
    }

    fn record(speaker: &str, phase: &str) -> DebateRecord {
        DebateRecord {
            speaker_name: speaker.to_string(),
            content: "...".to_string(),
            phase: phase.to_string(),
        }
    }

    fn running(id: &str, phase: &str, records: Vec<DebateRecord>) -> DebateSnapshot {
        DebateSnapshot {
            id: Some(id.to_string()),
            status: DebateStatus::Running,
            topic: None,
            current_phase: Some(phase.to_string()),
            records,
            error: None,
        }
    }

    fn completed(id: &str, records: Vec<DebateRecord>) -> DebateSnapshot {
        DebateSnapshot {
            id: Some(id.to_string()),
            status: DebateStatus::Completed,
            topic: None,
            current_phase: None,
            records,
            error: None,
        }
    }

    /// Poll the orchestrator until `pred` holds or the deadline passes
    async fn wait_until<F>(orch: &DebateOrchestrator, pred: F)
    where
        F: Fn(&Option<DebateSnapshot>) -> bool,
    {
        for _ in 0..200 {
            if pred(&orch.snapshot().await) {
                return;
            }
            sleep(Duration::from_millis(5)).await;
        }
        panic!("condition not reached in time");
    }

    #[tokio::test]
    async fn test_full_lifecycle_to_completion() {
        let mock = Arc::new(MockBackend::new());
        mock.push_start(Ok(pending("d1")));
        mock.push_status(Ok(running(
            "d1",
            "opening",
            vec![record("高松灯", "opening")],
        )));
        mock.push_status(Ok(completed(
            "d1",
            vec![
                record("高松灯", "opening"),
                record("椎名立希", "opening"),
                record("高松灯", "closing"),
                record("椎名立希", "closing"),
            ],
        )));

        let mut orch = DebateOrchestrator::with_poll_interval(mock.clone(), TICK);
        let accepted = orch.start(&DebateSetup::default()).await.unwrap();
        assert_eq!(accepted.status, DebateStatus::Pending);
        assert_eq!(accepted.id.as_deref(), Some("d1"));

        wait_until(&orch, |s| {
            s.as_ref().is_some_and(|s| s.status == DebateStatus::Completed)
        })
        .await;

        let snap = orch.snapshot().await.unwrap();
        assert_eq!(snap.records.len(), 4);

        // Polling stopped at the terminal snapshot: no further requests
        let calls = mock.status_calls.load(AtomicOrdering::SeqCst);
        assert_eq!(calls, 2);
        sleep(TICK * 5).await;
        assert_eq!(mock.status_calls.load(AtomicOrdering::SeqCst), calls);
        assert!(!orch.is_polling());
    }

    #[tokio::test]
    async fn test_snapshot_replaced_wholesale() {
        let mock = Arc::new(MockBackend::new());
        mock.push_start(Ok(pending("d1")));
        mock.push_status(Ok(running(
            "d1",
            "opening",
            vec![record("高松灯", "opening")],
        )));
        // Queue exhausted after that: second poll fails and the loop stops

        let mut orch = DebateOrchestrator::with_poll_interval(mock.clone(), TICK);
        orch.start(&DebateSetup::default()).await.unwrap();

        wait_until(&orch, |s| {
            s.as_ref().is_some_and(|s| s.status == DebateStatus::Running)
        })
        .await;

        // The running snapshot carried no topic; a merge would have kept the
        // submission's topic, replacement drops it
        let snap = orch.snapshot().await.unwrap();
        assert!(snap.topic.is_none());
        assert_eq!(snap.current_phase.as_deref(), Some("opening"));
        assert_eq!(snap.records.len(), 1);
    }

    #[tokio::test]
    async fn test_submission_failure_yields_terminal_snapshot() {
        let mock = Arc::new(MockBackend::new());
        mock.push_start(Err(anyhow!("connection refused")));

        let mut orch = DebateOrchestrator::with_poll_interval(mock.clone(), TICK);
        let result = orch.start(&DebateSetup::default()).await;

        assert!(result.is_err());
        let snap = orch.snapshot().await.unwrap();
        assert_eq!(snap.status, DebateStatus::Failed);
        assert!(snap.error.as_deref().unwrap().contains("启动讨论失败"));
        assert!(snap.id.is_none());

        // No id, so no polling ever started
        sleep(TICK * 3).await;
        assert_eq!(mock.status_calls.load(AtomicOrdering::SeqCst), 0);
        assert!(!orch.is_polling());
    }

    #[tokio::test]
    async fn test_poll_failure_stops_loop_and_keeps_last_snapshot() {
        let mock = Arc::new(MockBackend::new());
        mock.push_start(Ok(pending("d1")));
        mock.push_status(Err(anyhow!("socket closed")));

        let mut orch = DebateOrchestrator::with_poll_interval(mock.clone(), TICK);
        orch.start(&DebateSetup::default()).await.unwrap();

        // Give the single failing poll time to run, plus slack to prove no
        // retry follows
        sleep(TICK * 10).await;
        assert_eq!(mock.status_calls.load(AtomicOrdering::SeqCst), 1);
        assert!(!orch.is_polling());

        // Stale-but-displayed: the submission snapshot is still there
        let snap = orch.snapshot().await.unwrap();
        assert_eq!(snap.status, DebateStatus::Pending);
    }

    #[tokio::test]
    async fn test_stop_polling_drops_late_response() {
        let mock = Arc::new(MockBackend::new());
        mock.push_start(Ok(pending("d1")));
        mock.push_status(Ok(running(
            "d1",
            "opening",
            vec![record("高松灯", "opening")],
        )));

        // Hold the first poll open until the test releases it
        let gate = Arc::new(Notify::new());
        mock.set_status_gate(gate.clone());

        let mut orch = DebateOrchestrator::with_poll_interval(mock.clone(), TICK);
        orch.start(&DebateSetup::default()).await.unwrap();

        // Wait for the poll to be dispatched, then cancel while it is in
        // flight and let the response land
        for _ in 0..200 {
            if mock.status_calls.load(AtomicOrdering::SeqCst) == 1 {
                break;
            }
            sleep(Duration::from_millis(2)).await;
        }
        orch.stop_polling();
        gate.notify_one();
        sleep(TICK * 3).await;

        // The late response was dropped: still the submission snapshot
        let snap = orch.snapshot().await.unwrap();
        assert_eq!(snap.status, DebateStatus::Pending);
        assert!(snap.records.is_empty());
        assert!(!orch.is_polling());

        // Idempotent with nothing scheduled
        orch.stop_polling();
        orch.stop_polling();
    }

    #[tokio::test]
    async fn test_restart_after_terminal_state() {
        let mock = Arc::new(MockBackend::new());
        mock.push_start(Ok(pending("d1")));
        mock.push_status(Ok(completed("d1", vec![record("高松灯", "closing")])));

        let mut orch = DebateOrchestrator::with_poll_interval(mock.clone(), TICK);
        orch.start(&DebateSetup::default()).await.unwrap();
        wait_until(&orch, |s| {
            s.as_ref().is_some_and(|s| s.status == DebateStatus::Completed)
        })
        .await;

        // A terminal state is only left through a fresh start, which discards
        // the old snapshot and re-enters pending
        mock.push_start(Ok(pending("d2")));
        let accepted = orch.start(&DebateSetup::default()).await.unwrap();
        assert_eq!(accepted.id.as_deref(), Some("d2"));
        assert_eq!(accepted.status, DebateStatus::Pending);
        assert_eq!(
            orch.snapshot().await.unwrap().id.as_deref(),
            Some("d2")
        );
    }
}
