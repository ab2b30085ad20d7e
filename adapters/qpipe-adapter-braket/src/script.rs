//! The stock algorithm-script submission.

use qpipe_hal::{DeviceId, HalResult, JobRequest, JobService, create_job};

/// Script file submitted by [`submit_algorithm_script`].
pub const ALGORITHM_SCRIPT: &str = "algorithm_script.py";

/// Entry point inside [`ALGORITHM_SCRIPT`].
pub const ALGORITHM_ENTRY_POINT: &str = "algorithm_script:start_here";

/// Request for `algorithm_script.py` on SV1, waiting for completion.
pub fn algorithm_script_request() -> JobRequest {
    JobRequest::new(DeviceId::Sv1, ALGORITHM_SCRIPT, ALGORITHM_ENTRY_POINT, true)
}

/// Run `algorithm_script.py` from the working directory as a hybrid job on
/// SV1 and block until it finishes.
///
/// The job handle is dropped; any failure is returned as is.
pub async fn submit_algorithm_script<S>(service: &S) -> HalResult<()>
where
    S: JobService + ?Sized,
{
    create_job(service, &algorithm_script_request()).await?;
    Ok(())
}
