//! Submit-job command implementation.

use anyhow::Result;

/// Arguments of `qpipe submit-job`.
#[derive(Debug, Clone)]
pub struct SubmitJobArgs {
    /// Device name or ARN.
    pub device: String,
    /// Script path.
    pub source: String,
    /// `module` or `module:function`.
    pub entry_point: String,
    /// Block until the job finishes.
    pub wait: bool,
    /// Explicit job name.
    pub job_name: Option<String>,
    /// Give up waiting after this many seconds.
    pub timeout_secs: Option<u64>,
    /// Seconds between status checks.
    pub poll_interval_secs: u64,
}

/// Execute the submit-job command.
#[cfg(feature = "braket")]
pub async fn execute(args: &SubmitJobArgs) -> Result<()> {
    use std::time::Duration;

    use console::style;
    use indicatif::{ProgressBar, ProgressStyle};
    use qpipe_adapter_braket::{BraketJobService, algorithm_script_request};
    use qpipe_hal::{DeviceId, HybridJobState, WaitOptions, create_job};

    if args.poll_interval_secs == 0 {
        anyhow::bail!("--poll-interval must be at least 1 second");
    }

    let device: DeviceId = args.device.parse()?;
    let mut request = algorithm_script_request();
    request.device = device;
    request.source_module = args.source.clone().into();
    request.entry_point = args.entry_point.clone();
    request.wait_until_complete = args.wait;
    request.job_name = args.job_name.clone();

    println!(
        "{} Submitting {} ({}) to {}",
        style("→").cyan().bold(),
        style(&args.source).green(),
        args.entry_point,
        style(&request.device).yellow()
    );

    let mut wait = WaitOptions::default().with_poll_interval(Duration::from_secs(args.poll_interval_secs));
    if let Some(secs) = args.timeout_secs {
        wait = wait.with_timeout(Duration::from_secs(secs));
    }

    let service = match BraketJobService::from_env().await {
        Ok(s) => s.with_wait_options(wait),
        Err(e) => {
            anyhow::bail!("Failed to configure AWS Braket: {e}. Configure AWS credentials as well.");
        }
    };

    let spinner = ProgressBar::new_spinner();
    spinner.set_style(ProgressStyle::default_spinner().template("{spinner:.cyan} {msg}")?);
    spinner.set_message(if args.wait {
        "Running hybrid job..."
    } else {
        "Creating hybrid job..."
    });
    spinner.enable_steady_tick(Duration::from_millis(100));

    let outcome = create_job(&service, &request).await;
    spinner.finish_and_clear();
    let handle = outcome?;

    let mark = match handle.state {
        HybridJobState::Completed => style("✓").green().bold(),
        _ => style("✓").cyan().bold(),
    };
    println!("{mark} Job {} {}", style(&handle.name).green(), handle.state);
    println!("  ARN: {}", handle.arn);

    Ok(())
}

/// Execute the submit-job command.
#[cfg(not(feature = "braket"))]
pub async fn execute(_args: &SubmitJobArgs) -> Result<()> {
    anyhow::bail!("Braket support not available. Rebuild with --features braket");
}
