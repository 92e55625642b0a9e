//! # Simulated Print Queue
//!
//! An in-memory stand-in for asynchronous label-printer hardware. Jobs
//! move `Pending → Printing → Completed | Error`; one pending job
//! advances at a time, the simulated duration scales with copy count,
//! and a connected mock printer jams on roughly one job in ten.
//!
//! This emulates device behavior for the UI — there is no real printer
//! protocol behind it.

use chrono::{DateTime, Utc};
use rand::Rng;
use serde::Serialize;
use std::time::Duration;
use uuid::Uuid;

/// Base simulated print time per job.
const BASE_PRINT_MS: u64 = 800;
/// Additional simulated time per copy.
const PER_COPY_MS: u64 = 400;
/// Simulated jam probability while the mock printer is connected.
const JAM_RATE: f64 = 0.1;
/// Completed jobs stay visible this long before auto-removal.
pub const COMPLETED_LINGER: Duration = Duration::from_secs(3);

/// Job lifecycle states.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum JobStatus {
    Pending,
    Printing,
    Completed,
    Error,
}

/// One queued print job.
#[derive(Debug, Clone, Serialize)]
pub struct PrintJob {
    pub id: String,
    pub label_id: String,
    pub label_name: String,
    pub copies: u32,
    pub status: JobStatus,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
    pub queued_at: DateTime<Utc>,
}

/// Mock printer status surfaced to the UI.
#[derive(Debug, Clone, Serialize)]
pub struct PrinterStatus {
    pub connected: bool,
    pub paper: bool,
    pub completed_jobs: u64,
    pub failed_jobs: u64,
}

/// The in-memory job queue. Processing is serialized by construction:
/// [`PrintQueue::start_next`] advances at most one pending job.
pub struct PrintQueue {
    jobs: Vec<PrintJob>,
    connected: bool,
    completed_jobs: u64,
    failed_jobs: u64,
}

impl Default for PrintQueue {
    fn default() -> Self {
        Self::new()
    }
}

impl PrintQueue {
    pub fn new() -> Self {
        Self {
            jobs: Vec::new(),
            connected: true,
            completed_jobs: 0,
            failed_jobs: 0,
        }
    }

    pub fn jobs(&self) -> &[PrintJob] {
        &self.jobs
    }

    pub fn status(&self) -> PrinterStatus {
        PrinterStatus {
            connected: self.connected,
            paper: true,
            completed_jobs: self.completed_jobs,
            failed_jobs: self.failed_jobs,
        }
    }

    pub fn set_connected(&mut self, connected: bool) {
        self.connected = connected;
    }

    /// Queue a job. Returns its id.
    pub fn enqueue(&mut self, label_id: &str, label_name: &str, copies: u32) -> String {
        let job = PrintJob {
            id: Uuid::new_v4().to_string(),
            label_id: label_id.to_string(),
            label_name: label_name.to_string(),
            copies: copies.max(1),
            status: JobStatus::Pending,
            error: None,
            queued_at: Utc::now(),
        };
        let id = job.id.clone();
        println!("[queue] queued {} ({} copies)", label_name, job.copies);
        self.jobs.push(job);
        id
    }

    /// Remove a job by id. A pending job removed before it starts is
    /// simply excluded from future processing; started jobs are not
    /// cancellable, only dismissed from the list.
    pub fn remove(&mut self, job_id: &str) {
        self.jobs.retain(|j| j.id != job_id);
    }

    /// Move the first pending job to `Printing` and return its id and
    /// simulated duration. `None` when nothing is pending or a job is
    /// already printing (one at a time).
    pub fn start_next(&mut self) -> Option<(String, Duration)> {
        if self.jobs.iter().any(|j| j.status == JobStatus::Printing) {
            return None;
        }
        let job = self
            .jobs
            .iter_mut()
            .find(|j| j.status == JobStatus::Pending)?;
        job.status = JobStatus::Printing;
        let duration =
            Duration::from_millis(BASE_PRINT_MS + PER_COPY_MS * u64::from(job.copies));
        Some((job.id.clone(), duration))
    }

    /// Resolve a printing job after its simulated duration elapsed.
    ///
    /// A connected printer jams with probability [`JAM_RATE`]; a
    /// disconnected one always fails. Success increments the completed
    /// counter (the job stays visible for [`COMPLETED_LINGER`], then the
    /// caller removes it); failure increments the error counter and the
    /// job remains until manually dismissed.
    pub fn finish(&mut self, job_id: &str) -> Option<JobStatus> {
        let connected = self.connected;
        let jammed = connected && rand::rng().random::<f64>() < JAM_RATE;
        let job = self
            .jobs
            .iter_mut()
            .find(|j| j.id == job_id && j.status == JobStatus::Printing)?;

        if !connected {
            job.status = JobStatus::Error;
            job.error = Some("printer disconnected".into());
            self.failed_jobs += 1;
            eprintln!("[queue] {} failed: printer disconnected", job.label_name);
        } else if jammed {
            job.status = JobStatus::Error;
            job.error = Some("paper jam".into());
            self.failed_jobs += 1;
            eprintln!("[queue] {} failed: paper jam", job.label_name);
        } else {
            job.status = JobStatus::Completed;
            self.completed_jobs += 1;
            println!("[queue] {} completed", job.label_name);
        }
        Some(job.status)
    }

    /// Count of jobs awaiting processing.
    pub fn pending(&self) -> usize {
        self.jobs
            .iter()
            .filter(|j| j.status == JobStatus::Pending)
            .count()
    }
}

/// Drive one job through its simulated print cycle: pick the next
/// pending job, sleep its duration, resolve it, and auto-remove a
/// completed job after the linger delay.
///
/// Returns the final status, or `None` when the queue was idle.
pub async fn process_one(
    queue: &tokio::sync::Mutex<PrintQueue>,
) -> Option<JobStatus> {
    let (job_id, duration) = queue.lock().await.start_next()?;
    tokio::time::sleep(duration).await;
    let status = queue.lock().await.finish(&job_id)?;
    if status == JobStatus::Completed {
        tokio::time::sleep(COMPLETED_LINGER).await;
        queue.lock().await.remove(&job_id);
    }
    Some(status)
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_enqueue_starts_pending() {
        let mut queue = PrintQueue::new();
        let id = queue.enqueue("label-1", "Vanity unit", 2);
        assert_eq!(queue.jobs().len(), 1);
        assert_eq!(queue.jobs()[0].id, id);
        assert_eq!(queue.jobs()[0].status, JobStatus::Pending);
    }

    #[test]
    fn test_duration_scales_with_copies() {
        let mut queue = PrintQueue::new();
        queue.enqueue("label-1", "Vanity unit", 3);
        let (_, duration) = queue.start_next().unwrap();
        assert_eq!(duration, Duration::from_millis(800 + 3 * 400));
    }

    #[test]
    fn test_only_one_job_prints_at_a_time() {
        let mut queue = PrintQueue::new();
        queue.enqueue("a", "A", 1);
        queue.enqueue("b", "B", 1);
        assert!(queue.start_next().is_some());
        assert_eq!(queue.start_next(), None);
        assert_eq!(queue.pending(), 1);
    }

    #[test]
    fn test_disconnected_printer_always_fails() {
        let mut queue = PrintQueue::new();
        queue.set_connected(false);
        queue.enqueue("a", "A", 1);
        let (id, _) = queue.start_next().unwrap();
        assert_eq!(queue.finish(&id), Some(JobStatus::Error));
        assert_eq!(queue.status().failed_jobs, 1);
        assert_eq!(queue.jobs()[0].error.as_deref(), Some("printer disconnected"));
    }

    #[test]
    fn test_failed_job_stays_until_dismissed() {
        let mut queue = PrintQueue::new();
        queue.set_connected(false);
        queue.enqueue("a", "A", 1);
        let (id, _) = queue.start_next().unwrap();
        queue.finish(&id);
        assert_eq!(queue.jobs().len(), 1);
        queue.remove(&id);
        assert!(queue.jobs().is_empty());
    }

    #[test]
    fn test_removed_pending_job_never_starts() {
        let mut queue = PrintQueue::new();
        let id = queue.enqueue("a", "A", 1);
        queue.remove(&id);
        assert_eq!(queue.start_next(), None);
    }

    #[test]
    fn test_counters_track_outcomes() {
        // Jam rate is random; run enough jobs that both outcomes are
        // exercised statistically, then check the counters add up.
        let mut queue = PrintQueue::new();
        for i in 0..50 {
            let id = queue.enqueue("a", &format!("job {}", i), 1);
            queue.start_next().unwrap();
            let status = queue.finish(&id).unwrap();
            if status == JobStatus::Completed {
                queue.remove(&id);
            }
        }
        let status = queue.status();
        assert_eq!(status.completed_jobs + status.failed_jobs, 50);
    }
}
