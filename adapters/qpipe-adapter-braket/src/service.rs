//! [`JobService`] implementation backed by Amazon Braket.

use async_trait::async_trait;
use qpipe_hal::{HalResult, HybridJobState, JobHandle, JobRequest, JobService, WaitOptions};
use tracing::{debug, info, instrument};

use crate::api::BraketJobsClient;
use crate::config::BraketJobsConfig;
use crate::error::BraketResult;
use crate::request::{CreateJobSpec, resolve_job_name, validate_source};

/// Runs hybrid jobs on Amazon Braket.
///
/// `create` validates the request locally, uploads the script to
/// `s3://{bucket}/{prefix}/{job_name}/script/` and calls `CreateJob`. Job
/// output and checkpoints go next to it under `data/` and `checkpoints/`.
///
/// # Example
///
/// ```ignore
/// use qpipe_adapter_braket::BraketJobService;
/// use qpipe_hal::{DeviceId, JobRequest, create_job};
///
/// let service = BraketJobService::from_env().await?;
/// let request = JobRequest::new(DeviceId::Sv1, "algo.py", "algo:main", true);
/// let handle = create_job(&service, &request).await?;
/// ```
#[derive(Debug)]
pub struct BraketJobService {
    client: BraketJobsClient,
    config: BraketJobsConfig,
    wait: WaitOptions,
}

impl BraketJobService {
    /// Create a service from environment variables.
    ///
    /// See [`BraketJobsConfig::from_env`] for the variables read.
    pub async fn from_env() -> BraketResult<Self> {
        let config = BraketJobsConfig::from_env()?;
        Ok(Self::with_config(config).await)
    }

    /// Create a service from an explicit configuration.
    pub async fn with_config(config: BraketJobsConfig) -> Self {
        let client = BraketJobsClient::new(config.region.clone()).await;
        Self {
            client,
            config,
            wait: WaitOptions::default(),
        }
    }

    /// Override how [`qpipe_hal::create_job`] polls this service.
    #[must_use]
    pub fn with_wait_options(mut self, wait: WaitOptions) -> Self {
        self.wait = wait;
        self
    }

    /// Get the configuration.
    pub fn config(&self) -> &BraketJobsConfig {
        &self.config
    }

    #[instrument(skip(self, request), fields(device = %request.device))]
    async fn create_inner(&self, request: &JobRequest) -> BraketResult<JobHandle> {
        let source = validate_source(request)?;
        let job_name = resolve_job_name(request)?;
        let spec = CreateJobSpec::build(request, &source, &job_name, &self.config);

        let key = self.config.script_key(&job_name, &source.file_name);
        self.client
            .upload_file(&source.path, &self.config.s3_bucket, &key)
            .await?;
        debug!(uri = %spec.script_s3_uri, "job script uploaded");

        let arn = self.client.create_job(&spec).await?;
        info!(job = %job_name, %arn, "braket job created");

        Ok(JobHandle {
            arn,
            name: job_name,
            device: request.device.clone(),
            state: HybridJobState::Queued,
        })
    }
}

#[async_trait]
impl JobService for BraketJobService {
    fn name(&self) -> &str {
        "braket"
    }

    async fn create(&self, request: &JobRequest) -> HalResult<JobHandle> {
        Ok(self.create_inner(request).await?)
    }

    async fn state(&self, handle: &JobHandle) -> HalResult<HybridJobState> {
        let info = self.client.get_job(&handle.arn).await?;
        Ok(info.state)
    }

    async fn cancel(&self, handle: &JobHandle) -> HalResult<()> {
        self.client.cancel_job(&handle.arn).await?;
        info!(job = %handle.name, "braket job cancellation requested");
        Ok(())
    }

    fn wait_options(&self) -> WaitOptions {
        self.wait
    }
}
