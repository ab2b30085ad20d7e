//! Hybrid job submission against a recording job service.

use std::collections::VecDeque;
use std::sync::Mutex;
use std::time::Duration;

use async_trait::async_trait;
use qpipe_hal::{
    DeviceId, HalError, HalResult, HybridJobState, JobHandle, JobRequest, JobService,
    WaitOptions, create_job,
};

/// Job service that records requests and replays scripted states.
struct RecordingService {
    created: Mutex<Vec<JobRequest>>,
    states: Mutex<VecDeque<HybridJobState>>,
    polls: Mutex<usize>,
    options: WaitOptions,
}

impl RecordingService {
    fn new(states: impl IntoIterator<Item = HybridJobState>) -> Self {
        Self {
            created: Mutex::new(vec![]),
            states: Mutex::new(states.into_iter().collect()),
            polls: Mutex::new(0),
            options: WaitOptions::default().with_poll_interval(Duration::from_millis(10)),
        }
    }

    fn with_options(mut self, options: WaitOptions) -> Self {
        self.options = options;
        self
    }

    fn created(&self) -> Vec<JobRequest> {
        self.created.lock().unwrap().clone()
    }

    fn polls(&self) -> usize {
        *self.polls.lock().unwrap()
    }
}

#[async_trait]
impl JobService for RecordingService {
    fn name(&self) -> &str {
        "recording"
    }

    async fn create(&self, request: &JobRequest) -> HalResult<JobHandle> {
        self.created.lock().unwrap().push(request.clone());
        Ok(JobHandle {
            arn: "arn:aws:braket:us-east-1:000000000000:job/test".into(),
            name: request.job_name.clone().unwrap_or_else(|| "test".into()),
            device: request.device.clone(),
            state: HybridJobState::Queued,
        })
    }

    async fn state(&self, _handle: &JobHandle) -> HalResult<HybridJobState> {
        *self.polls.lock().unwrap() += 1;
        let mut states = self.states.lock().unwrap();
        // The last scripted state repeats forever.
        if states.len() > 1 {
            Ok(states.pop_front().unwrap_or(HybridJobState::Running))
        } else {
            Ok(states.front().cloned().unwrap_or(HybridJobState::Running))
        }
    }

    async fn cancel(&self, _handle: &JobHandle) -> HalResult<()> {
        Ok(())
    }

    fn wait_options(&self) -> WaitOptions {
        self.options
    }
}

fn algorithm_script_request() -> JobRequest {
    JobRequest::new(
        DeviceId::Sv1,
        "algorithm_script.py",
        "algorithm_script:start_here",
        true,
    )
}

#[tokio::test(start_paused = true)]
async fn create_is_called_once_with_the_exact_request() {
    let service = RecordingService::new([
        HybridJobState::Queued,
        HybridJobState::Running,
        HybridJobState::Completed,
    ]);

    let handle = create_job(&service, &algorithm_script_request())
        .await
        .unwrap();

    let created = service.created();
    assert_eq!(created.len(), 1);
    let req = &created[0];
    assert_eq!(req.device, DeviceId::Sv1);
    assert_eq!(
        req.device.to_string(),
        "arn:aws:braket:::device/quantum-simulator/amazon/sv1"
    );
    assert_eq!(req.source_module.to_str(), Some("algorithm_script.py"));
    assert_eq!(req.entry_point, "algorithm_script:start_here");
    assert!(req.wait_until_complete);
    assert!(req.job_name.is_none());
    assert!(req.hyper_parameters.is_empty());

    assert_eq!(handle.state, HybridJobState::Completed);
    assert_eq!(service.polls(), 3);
}

#[tokio::test(start_paused = true)]
async fn no_wait_returns_after_create() {
    let service = RecordingService::new([HybridJobState::Running]);
    let mut request = algorithm_script_request();
    request.wait_until_complete = false;

    let handle = create_job(&service, &request).await.unwrap();

    assert_eq!(service.created().len(), 1);
    assert_eq!(service.polls(), 0);
    assert_eq!(handle.state, HybridJobState::Queued);
}

#[tokio::test(start_paused = true)]
async fn failed_job_is_an_error() {
    let service = RecordingService::new([
        HybridJobState::Running,
        HybridJobState::Failed("script raised".into()),
    ]);

    let err = create_job(&service, &algorithm_script_request())
        .await
        .unwrap_err();
    assert!(matches!(err, HalError::JobFailed(ref reason) if reason == "script raised"));
    assert_eq!(service.created().len(), 1);
}

#[tokio::test(start_paused = true)]
async fn cancelled_job_is_an_error() {
    let service = RecordingService::new([
        HybridJobState::Cancelling,
        HybridJobState::Cancelled,
    ]);

    let err = create_job(&service, &algorithm_script_request())
        .await
        .unwrap_err();
    assert!(matches!(err, HalError::JobCancelled));
}

#[tokio::test(start_paused = true)]
async fn timeout_stops_polling() {
    let service = RecordingService::new([HybridJobState::Running]).with_options(
        WaitOptions::default()
            .with_poll_interval(Duration::from_secs(5))
            .with_timeout(Duration::from_secs(12)),
    );

    let err = create_job(&service, &algorithm_script_request())
        .await
        .unwrap_err();
    assert!(matches!(err, HalError::Timeout(_)));
    assert_eq!(service.polls(), 3);
}

#[tokio::test(start_paused = true)]
async fn wait_without_timeout_keeps_polling() {
    let mut states = vec![HybridJobState::Running; 500];
    states.push(HybridJobState::Completed);
    let service = RecordingService::new(states);

    let handle = create_job(&service, &algorithm_script_request())
        .await
        .unwrap();
    assert_eq!(handle.state, HybridJobState::Completed);
    assert_eq!(service.polls(), 501);
}
