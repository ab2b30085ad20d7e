//! Gate count analysis.

use async_trait::async_trait;
use qpipe_ir::Circuit;
use tracing::debug;

use crate::data::PassData;
use crate::error::CompileResult;
use crate::pass::{Pass, PassKind};

/// Analysis pass that records the circuit's gate counts.
///
/// Stores a [`qpipe_ir::GateCounts`] in the pass data and sets the
/// `num_gates` and `depth` metadata entries.
#[derive(Debug, Clone, Copy, Default)]
pub struct GateCountAnalysis;

#[async_trait]
impl Pass for GateCountAnalysis {
    fn name(&self) -> &'static str {
        "gate_count_analysis"
    }

    fn kind(&self) -> PassKind {
        PassKind::Analysis
    }

    async fn run(&self, circuit: &mut Circuit, data: &mut PassData) -> CompileResult<()> {
        let counts = circuit.gate_counts()?;
        let depth = circuit.depth()?;

        debug!(num_gates = counts.total(), depth, "gate count analysis");

        data.set_metadata("num_gates", counts.total());
        data.set_metadata("depth", depth);
        data.insert(counts);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use qpipe_ir::GateCounts;

    #[tokio::test]
    async fn test_records_counts() {
        let mut circuit = Circuit::ghz(3).unwrap();
        let mut data = PassData::new();

        GateCountAnalysis.run(&mut circuit, &mut data).await.unwrap();

        let counts = data.get::<GateCounts>().unwrap();
        assert_eq!(counts.get("CNOT"), Some(2));
        assert_eq!(data.metadata("num_gates").and_then(|v| v.as_u64()), Some(3));
        assert_eq!(data.metadata("depth").and_then(|v| v.as_u64()), Some(4));
    }
}
