//! Hybrid-job settings read from the environment.

use std::fmt;

use crate::error::{BraketError, BraketResult};

/// Default S3 key prefix for job artifacts.
pub const DEFAULT_S3_PREFIX: &str = "qpipe-jobs";
/// Default AWS region.
pub const DEFAULT_REGION: &str = "us-east-1";
/// Default job instance type.
pub const DEFAULT_INSTANCE_TYPE: &str = "ml.m5.large";
/// Default instance volume size.
pub const DEFAULT_VOLUME_SIZE_GB: i32 = 30;
/// Default maximum job runtime (five days).
pub const DEFAULT_MAX_RUNTIME_SECS: i32 = 432_000;

/// Settings shared by every job a service creates.
#[derive(Clone)]
pub struct BraketJobsConfig {
    /// Bucket for scripts, outputs and checkpoints.
    pub s3_bucket: String,
    /// Key prefix inside the bucket.
    pub s3_prefix: String,
    /// IAM role the job assumes.
    pub role_arn: String,
    /// AWS region.
    pub region: String,
    /// Instance type, e.g. `ml.m5.large`.
    pub instance_type: String,
    /// Number of instances.
    pub instance_count: i32,
    /// Instance volume size in GB.
    pub volume_size_gb: i32,
    /// Runtime limit enforced by Braket.
    pub max_runtime_secs: i32,
    /// Custom container image; Braket's base image when `None`.
    pub image_uri: Option<String>,
}

impl BraketJobsConfig {
    /// Build a config with defaults for everything but the bucket and role.
    pub fn new(s3_bucket: impl Into<String>, role_arn: impl Into<String>) -> Self {
        Self {
            s3_bucket: s3_bucket.into(),
            s3_prefix: DEFAULT_S3_PREFIX.to_string(),
            role_arn: role_arn.into(),
            region: DEFAULT_REGION.to_string(),
            instance_type: DEFAULT_INSTANCE_TYPE.to_string(),
            instance_count: 1,
            volume_size_gb: DEFAULT_VOLUME_SIZE_GB,
            max_runtime_secs: DEFAULT_MAX_RUNTIME_SECS,
            image_uri: None,
        }
    }

    /// Read settings from process environment variables.
    ///
    /// - `QPIPE_BRAKET_S3_BUCKET` (required)
    /// - `QPIPE_BRAKET_JOB_ROLE_ARN`, else `BRAKET_JOBS_ROLE_ARN` (required)
    /// - `QPIPE_BRAKET_S3_PREFIX` (default `qpipe-jobs`)
    /// - `AWS_REGION` (default `us-east-1`)
    /// - `QPIPE_BRAKET_INSTANCE_TYPE` (default `ml.m5.large`)
    /// - `QPIPE_BRAKET_IMAGE_URI` (optional)
    pub fn from_env() -> BraketResult<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Read settings through an arbitrary variable lookup.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> BraketResult<Self> {
        let get = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());

        let s3_bucket = get("QPIPE_BRAKET_S3_BUCKET").ok_or(BraketError::MissingS3Bucket)?;
        let role_arn = get("QPIPE_BRAKET_JOB_ROLE_ARN")
            .or_else(|| get("BRAKET_JOBS_ROLE_ARN"))
            .ok_or(BraketError::MissingRoleArn)?;

        let mut config = Self::new(s3_bucket, role_arn);
        if let Some(prefix) = get("QPIPE_BRAKET_S3_PREFIX") {
            config.s3_prefix = prefix.trim_matches('/').to_string();
        }
        if let Some(region) = get("AWS_REGION") {
            config.region = region;
        }
        if let Some(instance_type) = get("QPIPE_BRAKET_INSTANCE_TYPE") {
            if !instance_type.starts_with("ml.") {
                return Err(BraketError::InvalidConfig(format!(
                    "instance type '{instance_type}' must start with 'ml.'"
                )));
            }
            config.instance_type = instance_type;
        }
        config.image_uri = get("QPIPE_BRAKET_IMAGE_URI");

        Ok(config)
    }

    /// `s3://bucket/prefix/job_name`, the root of a job's artifacts.
    pub fn job_root(&self, job_name: &str) -> String {
        if self.s3_prefix.is_empty() {
            format!("s3://{}/{}", self.s3_bucket, job_name)
        } else {
            format!("s3://{}/{}/{}", self.s3_bucket, self.s3_prefix, job_name)
        }
    }

    /// Object key the script for `job_name` is uploaded to.
    pub fn script_key(&self, job_name: &str, file_name: &str) -> String {
        if self.s3_prefix.is_empty() {
            format!("{job_name}/script/{file_name}")
        } else {
            format!("{}/{job_name}/script/{file_name}", self.s3_prefix)
        }
    }
}

impl fmt::Debug for BraketJobsConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("BraketJobsConfig")
            .field("s3_bucket", &self.s3_bucket)
            .field("s3_prefix", &self.s3_prefix)
            .field("role_arn", &"[REDACTED]")
            .field("region", &self.region)
            .field("instance_type", &self.instance_type)
            .field("instance_count", &self.instance_count)
            .field("volume_size_gb", &self.volume_size_gb)
            .field("max_runtime_secs", &self.max_runtime_secs)
            .field("image_uri", &self.image_uri)
            .finish()
    }
}
