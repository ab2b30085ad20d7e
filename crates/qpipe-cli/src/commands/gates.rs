//! Gates command implementation.

use anyhow::Result;
use console::style;
use tracing::debug;

use qpipe_compile::PassManagerBuilder;

use super::common::build_circuit;

/// Execute the gates command.
pub async fn execute(circuit_name: &str, qubits: u32) -> Result<()> {
    let mut circuit = build_circuit(circuit_name, qubits)?;
    eprintln!(
        "{} Gate counts for {} ({} qubits)",
        style("→").cyan().bold(),
        style(circuit.name()).green(),
        circuit.num_qubits()
    );

    let (pm, mut data) = PassManagerBuilder::new().with_gate_printing(true).build();
    debug!(passes = ?pm.pass_names(), "running pass pipeline");
    pm.run(&mut circuit, &mut data).await?;

    Ok(())
}
