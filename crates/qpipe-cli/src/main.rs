//! qpipe command-line interface.
//!
//! ```text
//!   qpipe gates       circuit --> PassManager --> PrintGatesPass --> stdout
//!   qpipe sample      circuit --> SimulatorBackend --> counts
//!   qpipe submit-job  script  --> BraketJobService --> hybrid job
//! ```

#[global_allocator]
static GLOBAL: mimalloc::MiMalloc = mimalloc::MiMalloc;

use clap::{Parser, Subcommand};
use console::style;
use tracing_subscriber::EnvFilter;

mod commands;

use commands::{gates, sample, submit_job, version};

/// qpipe - circuit passes, local sampling and Braket hybrid jobs
#[derive(Parser)]
#[command(name = "qpipe")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Increase verbosity (-v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Print the gate counts of a built-in circuit
    Gates {
        /// Circuit (bell, ghz, basic-gates, qft, empty)
        #[arg(short, long, default_value = "basic-gates")]
        circuit: String,

        /// Number of qubits for ghz and qft
        #[arg(short, long, default_value = "3")]
        qubits: u32,
    },

    /// Sample a built-in circuit on the local simulator
    Sample {
        /// Circuit (bell, ghz, basic-gates, qft, empty)
        #[arg(short, long, default_value = "basic-gates")]
        circuit: String,

        /// Number of qubits for ghz and qft
        #[arg(short, long, default_value = "3")]
        qubits: u32,

        /// Number of shots
        #[arg(short, long, default_value = "100")]
        shots: u32,

        /// Seed for reproducible sampling
        #[arg(long)]
        seed: Option<u64>,
    },

    /// Run a script as an Amazon Braket hybrid job
    SubmitJob {
        /// Device name (sv1, dm1, tn1, ...) or ARN
        #[arg(short, long, default_value = "sv1", env = "QPIPE_BRAKET_DEVICE")]
        device: String,

        /// Script to run
        #[arg(long, default_value = "algorithm_script.py")]
        source: String,

        /// Entry point, `module` or `module:function`
        #[arg(long, default_value = "algorithm_script:start_here")]
        entry_point: String,

        /// Return once the job is created
        #[arg(long)]
        no_wait: bool,

        /// Job name (generated if omitted)
        #[arg(long)]
        job_name: Option<String>,

        /// Stop waiting after this many seconds
        #[arg(long)]
        timeout: Option<u64>,

        /// Seconds between status checks
        #[arg(long, default_value = "5")]
        poll_interval: u64,
    },

    /// Show version information
    Version,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    // Setup logging
    let filter = match cli.verbose {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    };

    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::new(filter))
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();

    let result = match cli.command {
        Commands::Gates { circuit, qubits } => gates::execute(&circuit, qubits).await,

        Commands::Sample {
            circuit,
            qubits,
            shots,
            seed,
        } => sample::execute(&circuit, qubits, shots, seed).await,

        Commands::SubmitJob {
            device,
            source,
            entry_point,
            no_wait,
            job_name,
            timeout,
            poll_interval,
        } => {
            let args = submit_job::SubmitJobArgs {
                device,
                source,
                entry_point,
                wait: !no_wait,
                job_name,
                timeout_secs: timeout,
                poll_interval_secs: poll_interval,
            };
            submit_job::execute(&args).await
        }

        Commands::Version => {
            version::execute();
            Ok(())
        }
    };

    if let Err(e) = result {
        eprintln!("{} {}", style("Error:").red().bold(), e);
        std::process::exit(1);
    }

    Ok(())
}
