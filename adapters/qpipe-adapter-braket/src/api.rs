//! AWS Braket hybrid-jobs API client wrapper.
//!
//! Wraps the AWS SDK for Braket and S3. Calls take plain Rust values and
//! return plain Rust values; SDK types stay inside this module.

use std::fmt;
use std::path::Path;
use std::time::Duration;

use aws_sdk_braket::error::DisplayErrorContext;
use aws_sdk_braket::types::{
    AlgorithmSpecification, CompressionType, ContainerImage, DeviceConfig, InstanceConfig,
    InstanceType, JobCheckpointConfig, JobOutputDataConfig, JobPrimaryStatus,
    JobStoppingCondition, ScriptModeConfig,
};
use aws_sdk_s3::primitives::ByteStream;
use qpipe_hal::HybridJobState;
use tracing::debug;

use crate::error::{BraketError, BraketResult};
use crate::request::CreateJobSpec;

/// AWS Braket hybrid-jobs client.
pub struct BraketJobsClient {
    /// Braket SDK client.
    braket: aws_sdk_braket::Client,
    /// S3 SDK client for script upload.
    s3: aws_sdk_s3::Client,
    /// AWS region.
    region: String,
}

impl fmt::Debug for BraketJobsClient {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("BraketJobsClient")
            .field("region", &self.region)
            .field("credentials", &"[REDACTED]")
            .finish()
    }
}

/// Job status as reported by `GetJob`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct JobInfo {
    /// Job ARN.
    pub arn: String,
    /// Job name.
    pub name: String,
    /// Current state.
    pub state: HybridJobState,
}

impl BraketJobsClient {
    /// Create a new client.
    ///
    /// Loads AWS credentials from the default chain (environment, SSO, config files, IAM role).
    pub async fn new(region: impl Into<String>) -> Self {
        let region = region.into();

        let config = aws_config::defaults(aws_config::BehaviorVersion::latest())
            .region(aws_config::Region::new(region.clone()))
            .timeout_config(
                aws_config::timeout::TimeoutConfig::builder()
                    .operation_timeout(Duration::from_secs(60))
                    .connect_timeout(Duration::from_secs(10))
                    .build(),
            )
            .load()
            .await;

        Self {
            braket: aws_sdk_braket::Client::new(&config),
            s3: aws_sdk_s3::Client::new(&config),
            region,
        }
    }

    /// Get the AWS region.
    pub fn region(&self) -> &str {
        &self.region
    }

    /// Upload a local file to `s3://bucket/key`.
    pub async fn upload_file(&self, path: &Path, bucket: &str, key: &str) -> BraketResult<()> {
        let body = tokio::fs::read(path)
            .await
            .map_err(|e| BraketError::InvalidSourceModule {
                path: path.display().to_string(),
                reason: e.to_string(),
            })?;
        debug!(bucket, key, bytes = body.len(), "uploading job script");

        self.s3
            .put_object()
            .bucket(bucket)
            .key(key)
            .body(ByteStream::from(body))
            .send()
            .await
            .map_err(|e| BraketError::S3Error(DisplayErrorContext(&e).to_string()))?;
        Ok(())
    }

    /// Create a hybrid job and return its ARN.
    pub async fn create_job(&self, spec: &CreateJobSpec) -> BraketResult<String> {
        let script_mode = ScriptModeConfig::builder()
            .entry_point(&spec.entry_point)
            .s3_uri(&spec.script_s3_uri)
            .compression_type(CompressionType::None)
            .build()
            .map_err(build_error)?;

        let mut algorithm = AlgorithmSpecification::builder().script_mode_config(script_mode);
        if let Some(uri) = &spec.image_uri {
            algorithm = algorithm.container_image(
                ContainerImage::builder()
                    .uri(uri)
                    .build()
                    .map_err(build_error)?,
            );
        }

        let device = DeviceConfig::builder()
            .device(&spec.device_arn)
            .build()
            .map_err(build_error)?;
        let instance = InstanceConfig::builder()
            .instance_type(InstanceType::from(spec.instance_type.as_str()))
            .instance_count(spec.instance_count)
            .volume_size_in_gb(spec.volume_size_gb)
            .build()
            .map_err(build_error)?;
        let output = JobOutputDataConfig::builder()
            .s3_path(&spec.output_s3_path)
            .build()
            .map_err(build_error)?;
        let checkpoint = JobCheckpointConfig::builder()
            .s3_uri(&spec.checkpoint_s3_uri)
            .build()
            .map_err(build_error)?;
        let stopping = JobStoppingCondition::builder()
            .max_runtime_in_seconds(spec.max_runtime_secs)
            .build();

        let mut req = self
            .braket
            .create_job()
            .client_token(&spec.client_token)
            .job_name(&spec.job_name)
            .role_arn(&spec.role_arn)
            .algorithm_specification(algorithm.build())
            .device_config(device)
            .instance_config(instance)
            .output_data_config(output)
            .checkpoint_config(checkpoint)
            .stopping_condition(stopping);
        for (key, value) in &spec.hyper_parameters {
            req = req.hyper_parameters(key, value);
        }

        let resp = req
            .send()
            .await
            .map_err(|e| BraketError::BraketApi(DisplayErrorContext(&e).to_string()))?;

        Ok(resp.job_arn().to_string())
    }

    /// Get the current status of a job.
    pub async fn get_job(&self, job_arn: &str) -> BraketResult<JobInfo> {
        let resp = self
            .braket
            .get_job()
            .job_arn(job_arn)
            .send()
            .await
            .map_err(|e| {
                let message = DisplayErrorContext(&e).to_string();
                if e.into_service_error().is_resource_not_found_exception() {
                    BraketError::JobNotFound(job_arn.to_string())
                } else {
                    BraketError::BraketApi(message)
                }
            })?;

        Ok(JobInfo {
            arn: resp.job_arn().to_string(),
            name: resp.job_name().to_string(),
            state: job_state(resp.status(), resp.failure_reason()),
        })
    }

    /// Request cancellation of a job.
    pub async fn cancel_job(&self, job_arn: &str) -> BraketResult<()> {
        self.braket
            .cancel_job()
            .job_arn(job_arn)
            .send()
            .await
            .map_err(|e| {
                let message = DisplayErrorContext(&e).to_string();
                if e.into_service_error().is_resource_not_found_exception() {
                    BraketError::JobNotFound(job_arn.to_string())
                } else {
                    BraketError::BraketApi(message)
                }
            })?;
        Ok(())
    }
}

fn build_error(e: aws_sdk_braket::error::BuildError) -> BraketError {
    BraketError::BraketApi(format!("invalid job request: {e}"))
}

/// Map a Braket job status onto [`HybridJobState`].
pub fn job_state(status: &JobPrimaryStatus, failure_reason: Option<&str>) -> HybridJobState {
    match status {
        JobPrimaryStatus::Queued => HybridJobState::Queued,
        JobPrimaryStatus::Running => HybridJobState::Running,
        JobPrimaryStatus::Completed => HybridJobState::Completed,
        JobPrimaryStatus::Failed => HybridJobState::Failed(
            failure_reason
                .unwrap_or("job failed without a reason")
                .to_string(),
        ),
        JobPrimaryStatus::Cancelling => HybridJobState::Cancelling,
        JobPrimaryStatus::Cancelled => HybridJobState::Cancelled,
        other => HybridJobState::Failed(format!("unknown job status: {}", other.as_str())),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_job_state_mapping() {
        assert_eq!(job_state(&JobPrimaryStatus::Queued, None), HybridJobState::Queued);
        assert_eq!(job_state(&JobPrimaryStatus::Running, None), HybridJobState::Running);
        assert_eq!(
            job_state(&JobPrimaryStatus::Completed, None),
            HybridJobState::Completed
        );
        assert_eq!(
            job_state(&JobPrimaryStatus::Cancelling, None),
            HybridJobState::Cancelling
        );
        assert_eq!(
            job_state(&JobPrimaryStatus::Cancelled, None),
            HybridJobState::Cancelled
        );
    }

    #[test]
    fn test_failed_keeps_reason() {
        assert_eq!(
            job_state(&JobPrimaryStatus::Failed, Some("AlgorithmError: boom")),
            HybridJobState::Failed("AlgorithmError: boom".into())
        );
        assert!(matches!(
            job_state(&JobPrimaryStatus::Failed, None),
            HybridJobState::Failed(_)
        ));
    }

    #[test]
    fn test_unknown_status_is_terminal() {
        let state = job_state(&JobPrimaryStatus::from("PAUSED"), None);
        assert!(state.is_terminal());
    }
}
