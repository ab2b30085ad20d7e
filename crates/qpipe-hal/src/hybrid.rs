//! Hybrid jobs: classical scripts run by a managed service next to a
//! quantum device.
//!
//! A [`JobRequest`] names the device, the script file and its entry point.
//! A [`JobService`] turns it into a remote job and reports the job's state:
//!
//! ```text
//!   create() --> Queued --> Running --> Completed
//!                  |           |
//!                  |           +--> Failed(reason)
//!                  |           |
//!                  +-----------+--> Cancelling --> Cancelled
//! ```
//!
//! [`create_job`] is the one-call entry point: create, then optionally wait.

use std::collections::BTreeMap;
use std::fmt;
use std::path::PathBuf;
use std::time::Duration;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use tracing::{debug, info, instrument};

use crate::device::DeviceId;
use crate::error::{HalError, HalResult};

/// Everything needed to create one hybrid job.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct JobRequest {
    /// Target device.
    pub device: DeviceId,
    /// Path of the script to run.
    pub source_module: PathBuf,
    /// `module` or `module:function` inside the script.
    pub entry_point: String,
    /// Block in [`create_job`] until the job reaches a terminal state.
    pub wait_until_complete: bool,
    /// Explicit job name; services generate one when absent.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub job_name: Option<String>,
    /// Hyper-parameters handed to the script.
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub hyper_parameters: BTreeMap<String, String>,
}

impl JobRequest {
    /// Create a request with the four required fields.
    pub fn new(
        device: DeviceId,
        source_module: impl Into<PathBuf>,
        entry_point: impl Into<String>,
        wait_until_complete: bool,
    ) -> Self {
        Self {
            device,
            source_module: source_module.into(),
            entry_point: entry_point.into(),
            wait_until_complete,
            job_name: None,
            hyper_parameters: BTreeMap::new(),
        }
    }

    /// Set an explicit job name.
    #[must_use]
    pub fn with_job_name(mut self, name: impl Into<String>) -> Self {
        self.job_name = Some(name.into());
        self
    }

    /// Add one hyper-parameter.
    #[must_use]
    pub fn with_hyper_parameter(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.hyper_parameters.insert(key.into(), value.into());
        self
    }

    /// Module part of the entry point (before `:`).
    pub fn entry_module(&self) -> &str {
        self.entry_point
            .split_once(':')
            .map_or(self.entry_point.as_str(), |(module, _)| module)
    }

    /// Function part of the entry point, if one is named.
    pub fn entry_function(&self) -> Option<&str> {
        self.entry_point.split_once(':').map(|(_, func)| func)
    }

    /// File name of the source module.
    pub fn source_file_name(&self) -> Option<&str> {
        self.source_module.file_name().and_then(|n| n.to_str())
    }

    /// File stem of the source module, the name the script is imported by.
    pub fn source_stem(&self) -> Option<&str> {
        self.source_module.file_stem().and_then(|s| s.to_str())
    }
}

/// State of a hybrid job.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum HybridJobState {
    /// Accepted, waiting for an instance.
    Queued,
    /// Script is executing.
    Running,
    /// Script finished successfully.
    Completed,
    /// Script or infrastructure failed.
    Failed(String),
    /// Cancellation requested but not yet effective.
    Cancelling,
    /// Job was cancelled.
    Cancelled,
}

impl HybridJobState {
    /// Check if this is a terminal state.
    pub fn is_terminal(&self) -> bool {
        matches!(
            self,
            HybridJobState::Completed | HybridJobState::Failed(_) | HybridJobState::Cancelled
        )
    }
}

impl fmt::Display for HybridJobState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            HybridJobState::Queued => write!(f, "QUEUED"),
            HybridJobState::Running => write!(f, "RUNNING"),
            HybridJobState::Completed => write!(f, "COMPLETED"),
            HybridJobState::Failed(reason) => write!(f, "FAILED: {reason}"),
            HybridJobState::Cancelling => write!(f, "CANCELLING"),
            HybridJobState::Cancelled => write!(f, "CANCELLED"),
        }
    }
}

/// A created job and its last known state.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct JobHandle {
    /// Service-assigned job identifier (an ARN for Braket).
    pub arn: String,
    /// Job name.
    pub name: String,
    /// Device the job targets.
    pub device: DeviceId,
    /// Last observed state.
    pub state: HybridJobState,
}

impl JobHandle {
    /// Copy of this handle with a newer state.
    #[must_use]
    pub fn with_state(&self, state: HybridJobState) -> Self {
        Self {
            state,
            ..self.clone()
        }
    }
}

/// Polling behaviour of [`JobService::wait`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct WaitOptions {
    /// Delay between two state queries.
    pub poll_interval: Duration,
    /// Give up after this long; `None` waits indefinitely.
    pub timeout: Option<Duration>,
}

impl WaitOptions {
    /// Default polling interval.
    pub const DEFAULT_POLL_INTERVAL: Duration = Duration::from_secs(5);

    /// Set the polling interval.
    #[must_use]
    pub fn with_poll_interval(mut self, interval: Duration) -> Self {
        self.poll_interval = interval;
        self
    }

    /// Set a timeout.
    #[must_use]
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }
}

impl Default for WaitOptions {
    fn default() -> Self {
        Self {
            poll_interval: Self::DEFAULT_POLL_INTERVAL,
            timeout: None,
        }
    }
}

/// A service that runs hybrid jobs.
#[async_trait]
pub trait JobService: Send + Sync {
    /// Get the name of this service.
    fn name(&self) -> &str;

    /// Create a job. Does not wait for it.
    async fn create(&self, request: &JobRequest) -> HalResult<JobHandle>;

    /// Query the current state of a job.
    async fn state(&self, handle: &JobHandle) -> HalResult<HybridJobState>;

    /// Request cancellation of a job.
    async fn cancel(&self, handle: &JobHandle) -> HalResult<()>;

    /// Options used by [`create_job`] when it waits.
    fn wait_options(&self) -> WaitOptions {
        WaitOptions::default()
    }

    /// Poll until the job reaches a terminal state.
    ///
    /// Returns the handle in state `Completed`; a failed job yields
    /// [`HalError::JobFailed`] and a cancelled one [`HalError::JobCancelled`].
    async fn wait(&self, handle: &JobHandle, options: &WaitOptions) -> HalResult<JobHandle> {
        let deadline = options.timeout.map(|t| tokio::time::Instant::now() + t);
        let mut last = handle.state.clone();

        loop {
            let state = self.state(handle).await?;
            if state != last {
                info!(job = %handle.name, %state, "job state changed");
                last = state.clone();
            }

            match state {
                HybridJobState::Completed => return Ok(handle.with_state(state)),
                HybridJobState::Failed(reason) => return Err(HalError::JobFailed(reason)),
                HybridJobState::Cancelled => return Err(HalError::JobCancelled),
                HybridJobState::Queued | HybridJobState::Running | HybridJobState::Cancelling => {}
            }

            if let Some(deadline) = deadline {
                if tokio::time::Instant::now() + options.poll_interval > deadline {
                    return Err(HalError::Timeout(handle.arn.clone()));
                }
            }
            tokio::time::sleep(options.poll_interval).await;
        }
    }
}

/// Create a hybrid job and, if the request asks for it, wait for it.
///
/// `service.create` is called exactly once. The returned handle carries the
/// state observed last.
#[instrument(skip_all, fields(service = service.name(), device = %request.device))]
pub async fn create_job<S>(service: &S, request: &JobRequest) -> HalResult<JobHandle>
where
    S: JobService + ?Sized,
{
    debug!(
        source = %request.source_module.display(),
        entry_point = %request.entry_point,
        wait = request.wait_until_complete,
        "creating hybrid job"
    );

    let handle = service.create(request).await?;
    info!(job = %handle.name, arn = %handle.arn, "hybrid job created");

    if !request.wait_until_complete {
        return Ok(handle);
    }

    let options = service.wait_options();
    let done = service.wait(&handle, &options).await?;
    info!(job = %done.name, "hybrid job completed");
    Ok(done)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_entry_point_parts() {
        let req = JobRequest::new(
            DeviceId::Sv1,
            "algorithm_script.py",
            "algorithm_script:start_here",
            true,
        );
        assert_eq!(req.entry_module(), "algorithm_script");
        assert_eq!(req.entry_function(), Some("start_here"));
        assert_eq!(req.source_stem(), Some("algorithm_script"));
        assert_eq!(req.source_file_name(), Some("algorithm_script.py"));

        let bare = JobRequest::new(DeviceId::Sv1, "dir/job.py", "job", false);
        assert_eq!(bare.entry_module(), "job");
        assert_eq!(bare.entry_function(), None);
        assert_eq!(bare.source_file_name(), Some("job.py"));
    }

    #[test]
    fn test_terminal_states() {
        assert!(HybridJobState::Completed.is_terminal());
        assert!(HybridJobState::Failed("x".into()).is_terminal());
        assert!(HybridJobState::Cancelled.is_terminal());
        assert!(!HybridJobState::Cancelling.is_terminal());
        assert!(!HybridJobState::Queued.is_terminal());
    }

    #[test]
    fn test_default_wait_options() {
        let opts = WaitOptions::default();
        assert_eq!(opts.poll_interval, Duration::from_secs(5));
        assert!(opts.timeout.is_none());
    }

    #[test]
    fn test_request_serialization_omits_empty_extras() {
        let req = JobRequest::new(DeviceId::Sv1, "a.py", "a", true);
        let json = serde_json::to_value(&req).unwrap();
        assert!(json.get("job_name").is_none());
        assert!(json.get("hyper_parameters").is_none());
        assert_eq!(json["device"], crate::device::SV1_ARN);
    }
}
