//! Shared helpers for CLI commands.

use anyhow::{Context, Result};
use console::style;

use qpipe_hal::ExecutionResult;
use qpipe_ir::Circuit;

/// Names accepted by `--circuit`.
pub const CIRCUITS: &[&str] = &["bell", "ghz", "basic-gates", "qft", "empty"];

/// Build a named built-in circuit.
///
/// `qubits` sizes `ghz` and `qft`; the other circuits have a fixed size.
pub fn build_circuit(name: &str, qubits: u32) -> Result<Circuit> {
    let circuit = match name.to_lowercase().as_str() {
        "bell" => Circuit::bell(),
        "ghz" => Circuit::ghz(qubits),
        "basic-gates" | "basic_gates" | "basic" => Circuit::basic_gates(),
        "qft" => Circuit::qft(qubits),
        "empty" => Ok(Circuit::new("empty")),
        other => {
            anyhow::bail!(
                "Unknown circuit: '{other}'. Available: {}",
                CIRCUITS.join(", ")
            );
        }
    };
    circuit.with_context(|| format!("Failed to build circuit '{name}'"))
}

/// Print sampled counts: the dump line, then one `Observed` line per outcome.
pub fn print_observed(result: &ExecutionResult) {
    println!("{}", result.counts.dump());
    for (bits, count) in result.counts.by_bitstring() {
        println!("Observed: {}, {}", style(bits).cyan(), count);
    }
    if let Some(time_ms) = result.execution_time_ms {
        println!("\n  Execution time: {} ms", style(time_ms).yellow());
    }
}
