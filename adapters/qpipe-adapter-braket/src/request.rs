//! Turning a [`JobRequest`] into a Braket `CreateJob` call.
//!
//! Everything here is local: the source module is checked on disk, the job
//! name is chosen and validated, and the S3 layout is derived from the
//! [`BraketJobsConfig`]. Nothing talks to AWS.

use std::collections::BTreeMap;
use std::path::PathBuf;

use qpipe_hal::JobRequest;

use crate::config::BraketJobsConfig;
use crate::error::{BraketError, BraketResult};

/// Longest job name Braket accepts.
pub const MAX_JOB_NAME_LEN: usize = 51;

/// Prefix of generated job names.
pub const JOB_NAME_PREFIX: &str = "qpipe-job";

/// A source module that passed local checks.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SourceModule {
    /// Path on the local disk.
    pub path: PathBuf,
    /// File name used as the S3 object name.
    pub file_name: String,
}

/// Check that the request's script exists and its entry point names it.
///
/// The entry point is `module` or `module:function`, and `module` must be
/// the file stem of the source module.
pub fn validate_source(request: &JobRequest) -> BraketResult<SourceModule> {
    let path = &request.source_module;
    let invalid = |reason: &str| BraketError::InvalidSourceModule {
        path: path.display().to_string(),
        reason: reason.to_string(),
    };

    let meta = std::fs::metadata(path).map_err(|e| invalid(&e.to_string()))?;
    if !meta.is_file() {
        return Err(invalid("not a regular file"));
    }

    let file_name = request
        .source_file_name()
        .ok_or_else(|| invalid("file name is not valid UTF-8"))?
        .to_string();
    let stem = request
        .source_stem()
        .ok_or_else(|| invalid("file name is not valid UTF-8"))?;

    let module = request.entry_module();
    let function_ok = request
        .entry_function()
        .is_none_or(|f| is_identifier(f));
    if module != stem || !function_ok {
        return Err(BraketError::InvalidEntryPoint(request.entry_point.clone()));
    }

    Ok(SourceModule {
        path: path.clone(),
        file_name,
    })
}

fn is_identifier(s: &str) -> bool {
    let mut chars = s.chars();
    chars
        .next()
        .is_some_and(|c| c.is_ascii_alphabetic() || c == '_')
        && chars.all(|c| c.is_ascii_alphanumeric() || c == '_')
}

/// Check a job name against Braket's rules.
///
/// Names are letters and digits, optionally joined by hyphens, starting and
/// ending with a letter or digit, with at most [`MAX_JOB_NAME_LEN`] letters
/// and digits.
pub fn validate_job_name(name: &str) -> BraketResult<()> {
    let bytes = name.as_bytes();
    let ok = match (bytes.first(), bytes.last()) {
        (Some(first), Some(last)) => {
            first.is_ascii_alphanumeric()
                && last.is_ascii_alphanumeric()
                && bytes.iter().all(|b| b.is_ascii_alphanumeric() || *b == b'-')
                && bytes.iter().filter(|b| b.is_ascii_alphanumeric()).count() <= MAX_JOB_NAME_LEN
        }
        _ => false,
    };

    if ok {
        Ok(())
    } else {
        Err(BraketError::InvalidJobName(name.to_string()))
    }
}

/// Generated job name for a given wall-clock time in milliseconds.
pub fn default_job_name(unix_millis: i64) -> String {
    format!("{JOB_NAME_PREFIX}-{unix_millis}")
}

/// Name from the request, or a generated one.
pub fn resolve_job_name(request: &JobRequest) -> BraketResult<String> {
    let name = match &request.job_name {
        Some(name) => name.clone(),
        None => default_job_name(chrono::Utc::now().timestamp_millis()),
    };
    validate_job_name(&name)?;
    Ok(name)
}

/// Inputs of one `CreateJob` call, free of SDK types.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CreateJobSpec {
    /// Job name.
    pub job_name: String,
    /// Idempotency token.
    pub client_token: String,
    /// Execution role.
    pub role_arn: String,
    /// Device the job gets priority access to.
    pub device_arn: String,
    /// `module` or `module:function`.
    pub entry_point: String,
    /// Where the script was uploaded.
    pub script_s3_uri: String,
    /// Where Braket writes job output.
    pub output_s3_path: String,
    /// Where the job stores checkpoints.
    pub checkpoint_s3_uri: String,
    /// Instance type.
    pub instance_type: String,
    /// Instance count.
    pub instance_count: i32,
    /// Volume size in GB.
    pub volume_size_gb: i32,
    /// Runtime limit in seconds.
    pub max_runtime_secs: i32,
    /// Custom container image.
    pub image_uri: Option<String>,
    /// Hyper-parameters for the script.
    pub hyper_parameters: BTreeMap<String, String>,
}

impl CreateJobSpec {
    /// Lay out a job under `config`'s bucket and prefix.
    pub fn build(
        request: &JobRequest,
        source: &SourceModule,
        job_name: &str,
        config: &BraketJobsConfig,
    ) -> Self {
        let root = config.job_root(job_name);
        Self {
            job_name: job_name.to_string(),
            client_token: uuid::Uuid::new_v4().to_string(),
            role_arn: config.role_arn.clone(),
            device_arn: request.device.arn().to_string(),
            entry_point: request.entry_point.clone(),
            script_s3_uri: format!("{root}/script/{}", source.file_name),
            output_s3_path: format!("{root}/data"),
            checkpoint_s3_uri: format!("{root}/checkpoints"),
            instance_type: config.instance_type.clone(),
            instance_count: config.instance_count,
            volume_size_gb: config.volume_size_gb,
            max_runtime_secs: config.max_runtime_secs,
            image_uri: config.image_uri.clone(),
            hyper_parameters: request.hyper_parameters.clone(),
        }
    }
}
