//! Job bookkeeping.
//!
//! A submitted job is `Queued` or `Running` until the backend settles it as
//! `Completed` or `Failed`. Settled jobs never change state again.

use std::fmt;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::result::ExecutionRequest;

/// Backend-assigned job identifier.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct JobId(pub String);

impl JobId {
    /// Wrap an identifier.
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }
}

impl fmt::Display for JobId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Where a job is in its lifecycle.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum JobStatus {
    /// Accepted, not started.
    Queued,
    /// Executing.
    Running,
    /// Finished with a result.
    Completed,
    /// Finished without a result.
    Failed(String),
}

impl JobStatus {
    /// `Completed` or `Failed`.
    pub fn is_settled(&self) -> bool {
        matches!(self, JobStatus::Completed | JobStatus::Failed(_))
    }
}

/// A submitted job as a backend tracks it.
#[derive(Debug, Clone)]
pub struct Job {
    /// Identifier handed back to the caller.
    pub id: JobId,
    /// Request the job was submitted with.
    pub request: ExecutionRequest,
    /// Current state.
    pub status: JobStatus,
    /// Submission time.
    pub submitted_at: DateTime<Utc>,
    /// Time the job settled.
    pub settled_at: Option<DateTime<Utc>>,
}

impl Job {
    /// A freshly queued job.
    pub fn new(id: JobId, request: ExecutionRequest) -> Self {
        Self {
            id,
            request,
            status: JobStatus::Queued,
            submitted_at: Utc::now(),
            settled_at: None,
        }
    }

    /// Move to `status`; settling stamps the finish time once.
    pub fn transition(&mut self, status: JobStatus) {
        if self.status.is_settled() {
            return;
        }
        if status.is_settled() {
            self.settled_at = Some(Utc::now());
        }
        self.status = status;
    }

    /// Milliseconds from submission to settlement.
    pub fn turnaround_ms(&self) -> Option<i64> {
        self.settled_at
            .map(|t| (t - self.submitted_at).num_milliseconds())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_settled_states() {
        assert!(!JobStatus::Queued.is_settled());
        assert!(!JobStatus::Running.is_settled());
        assert!(JobStatus::Completed.is_settled());
        assert!(JobStatus::Failed("boom".into()).is_settled());
    }

    #[test]
    fn test_job_settles_once() {
        let mut job = Job::new(JobId::new("job-1"), ExecutionRequest::shots(64));
        assert_eq!(job.status, JobStatus::Queued);
        assert!(job.turnaround_ms().is_none());

        job.transition(JobStatus::Running);
        assert!(job.settled_at.is_none());

        job.transition(JobStatus::Completed);
        let settled = job.settled_at;
        assert!(job.turnaround_ms().is_some_and(|ms| ms >= 0));

        job.transition(JobStatus::Failed("late".into()));
        assert_eq!(job.status, JobStatus::Completed);
        assert_eq!(job.settled_at, settled);
        assert_eq!(job.request.shots, 64);
    }
}
