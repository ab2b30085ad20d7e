//! Error types for the Braket hybrid-job adapter.

use qpipe_hal::HalError;
use thiserror::Error;

/// Result type for Braket operations.
pub type BraketResult<T> = Result<T, BraketError>;

/// Errors that can occur when running hybrid jobs on Amazon Braket.
#[derive(Debug, Error)]
pub enum BraketError {
    /// Missing S3 bucket configuration.
    #[error("S3 bucket not configured. Set QPIPE_BRAKET_S3_BUCKET environment variable.")]
    MissingS3Bucket,

    /// Missing execution role.
    #[error(
        "Job role not configured. Set QPIPE_BRAKET_JOB_ROLE_ARN or BRAKET_JOBS_ROLE_ARN environment variable."
    )]
    MissingRoleArn,

    /// A configuration value could not be used.
    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    /// The source module is missing or unreadable.
    #[error("Invalid source module {path}: {reason}")]
    InvalidSourceModule {
        /// Path as given in the request.
        path: String,
        /// What is wrong with it.
        reason: String,
    },

    /// The entry point does not name the source module.
    #[error("Invalid entry point '{0}'")]
    InvalidEntryPoint(String),

    /// Job name breaks Braket's naming rules.
    #[error("Invalid job name '{0}': use 1-51 letters or digits, optionally separated by hyphens")]
    InvalidJobName(String),

    /// Braket API error.
    #[error("Braket API error: {0}")]
    BraketApi(String),

    /// S3 error.
    #[error("S3 error: {0}")]
    S3Error(String),

    /// Job not found.
    #[error("Job not found: {0}")]
    JobNotFound(String),
}

impl From<BraketError> for HalError {
    fn from(e: BraketError) -> Self {
        match e {
            BraketError::MissingS3Bucket
            | BraketError::MissingRoleArn
            | BraketError::InvalidConfig(_) => HalError::Configuration(e.to_string()),
            BraketError::InvalidSourceModule { .. }
            | BraketError::InvalidEntryPoint(_)
            | BraketError::InvalidJobName(_) => HalError::InvalidRequest(e.to_string()),
            BraketError::JobNotFound(arn) => HalError::JobNotFound(arn),
            BraketError::BraketApi(msg) | BraketError::S3Error(msg) => {
                HalError::SubmissionFailed(msg)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_bucket_names_variable() {
        let err = BraketError::MissingS3Bucket;
        assert!(err.to_string().contains("QPIPE_BRAKET_S3_BUCKET"));
    }

    #[test]
    fn test_missing_role_names_both_variables() {
        let msg = BraketError::MissingRoleArn.to_string();
        assert!(msg.contains("QPIPE_BRAKET_JOB_ROLE_ARN"));
        assert!(msg.contains("BRAKET_JOBS_ROLE_ARN"));
    }

    #[test]
    fn test_config_errors_to_hal() {
        let hal: HalError = BraketError::MissingRoleArn.into();
        assert!(matches!(hal, HalError::Configuration(_)));
    }

    #[test]
    fn test_request_errors_to_hal() {
        let hal: HalError = BraketError::InvalidEntryPoint("x:y".into()).into();
        assert!(matches!(hal, HalError::InvalidRequest(msg) if msg.contains("x:y")));
    }

    #[test]
    fn test_job_not_found_to_hal() {
        let hal: HalError = BraketError::JobNotFound("arn:job/1".into()).into();
        assert!(matches!(hal, HalError::JobNotFound(arn) if arn == "arn:job/1"));
    }

    #[test]
    fn test_api_errors_to_hal() {
        let hal: HalError = BraketError::S3Error("denied".into()).into();
        assert!(matches!(hal, HalError::SubmissionFailed(msg) if msg == "denied"));
    }
}
