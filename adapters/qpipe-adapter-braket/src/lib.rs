//! Amazon Braket adapter for qpipe hybrid jobs.
//!
//! This crate implements [`qpipe_hal::JobService`] for Amazon Braket hybrid
//! jobs: a classical script runs on a managed instance with priority access
//! to a Braket device.
//!
//! # Configuration
//!
//! Credentials come from the standard AWS provider chain (environment,
//! `~/.aws/credentials`, SSO, instance role). Job settings are read from:
//!
//! | Variable | Meaning | Default |
//! |----------|---------|---------|
//! | `QPIPE_BRAKET_S3_BUCKET` | Bucket for scripts and output | required |
//! | `QPIPE_BRAKET_JOB_ROLE_ARN` | IAM role the job assumes (`BRAKET_JOBS_ROLE_ARN` also accepted) | required |
//! | `QPIPE_BRAKET_S3_PREFIX` | Key prefix | `qpipe-jobs` |
//! | `AWS_REGION` | Region | `us-east-1` |
//! | `QPIPE_BRAKET_INSTANCE_TYPE` | Job instance type | `ml.m5.large` |
//! | `QPIPE_BRAKET_IMAGE_URI` | Custom container image | Braket base image |
//!
//! # Example
//!
//! ```ignore
//! use qpipe_adapter_braket::{BraketJobService, submit_algorithm_script};
//!
//! let service = BraketJobService::from_env().await?;
//! submit_algorithm_script(&service).await?;
//! ```

pub mod api;
pub mod config;
pub mod error;
pub mod request;
pub mod script;
pub mod service;

pub use config::BraketJobsConfig;
pub use error::{BraketError, BraketResult};
pub use script::{algorithm_script_request, submit_algorithm_script};
pub use service::BraketJobService;
