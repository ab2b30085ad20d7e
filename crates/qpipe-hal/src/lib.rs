//! qpipe Hardware Abstraction Layer
//!
//! Interfaces qpipe uses to run work somewhere else:
//! - the [`Backend`] trait executes circuits and returns [`Counts`];
//! - the [`JobService`] trait runs hybrid jobs, classical scripts with
//!   access to a quantum device, described by a [`JobRequest`].
//!
//! # Supported Services
//!
//! | Service | Crate | Authentication |
//! |---------|-------|----------------|
//! | Local simulator (`Backend`) | `qpipe-adapter-sim` | None |
//! | Amazon Braket hybrid jobs (`JobService`) | `qpipe-adapter-braket` | AWS credential chain |
//!
//! # Example: Submitting a Hybrid Job
//!
//! ```ignore
//! use qpipe_hal::{create_job, DeviceId, JobRequest};
//! use qpipe_adapter_braket::BraketJobService;
//!
//! #[tokio::main]
//! async fn main() -> anyhow::Result<()> {
//!     let service = BraketJobService::from_env().await?;
//!     let request = JobRequest::new(
//!         DeviceId::Sv1,
//!         "algorithm_script.py",
//!         "algorithm_script:start_here",
//!         true,
//!     );
//!     let handle = create_job(&service, &request).await?;
//!     println!("{} finished: {}", handle.name, handle.state);
//!     Ok(())
//! }
//! ```

pub mod backend;
pub mod device;
pub mod error;
pub mod hybrid;
pub mod job;
pub mod result;

pub use backend::{Backend, BackendAvailability, ValidationResult};
pub use device::DeviceId;
pub use error::{HalError, HalResult};
pub use hybrid::{HybridJobState, JobHandle, JobRequest, JobService, WaitOptions, create_job};
pub use job::{Job, JobId, JobStatus};
pub use result::{Counts, ExecutionResult};
