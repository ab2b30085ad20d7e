//! Sample command implementation.

use anyhow::Result;
use console::style;

use qpipe_adapter_sim::SimulatorBackend;
use qpipe_hal::{Backend, ValidationResult};

use super::common::{build_circuit, print_observed};

/// Execute the sample command.
pub async fn execute(circuit_name: &str, qubits: u32, shots: u32, seed: Option<u64>) -> Result<()> {
    let circuit = build_circuit(circuit_name, qubits)?;
    eprintln!(
        "{} Sampling {} on {} ({} shots)",
        style("→").cyan().bold(),
        style(circuit.name()).green(),
        style("simulator").yellow(),
        shots
    );

    let backend = match seed {
        Some(seed) => SimulatorBackend::new().with_seed(seed),
        None => SimulatorBackend::new(),
    };

    if let ValidationResult::Invalid { reasons } = backend.validate(&circuit).await? {
        anyhow::bail!("Circuit rejected by simulator: {}", reasons.join("; "));
    }

    let job_id = backend.submit(&circuit, shots).await?;
    let result = backend.wait(&job_id).await?;
    print_observed(&result);

    Ok(())
}
