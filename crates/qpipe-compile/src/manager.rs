//! Pass manager for orchestrating compilation.

use tracing::{debug, info, instrument};

use qpipe_ir::Circuit;

use crate::data::PassData;
use crate::error::CompileResult;
use crate::pass::Pass;
use crate::passes::{GateCountAnalysis, PrintGatesPass};

/// Manages and executes a sequence of compilation passes.
pub struct PassManager {
    /// The passes to execute, in order.
    passes: Vec<Box<dyn Pass>>,
}

impl PassManager {
    /// Create a new empty pass manager.
    pub fn new() -> Self {
        Self { passes: vec![] }
    }

    /// Add a pass to the manager.
    pub fn add_pass(&mut self, pass: impl Pass + 'static) {
        self.passes.push(Box::new(pass));
    }

    /// Names of the registered passes, in run order.
    pub fn pass_names(&self) -> Vec<&str> {
        self.passes.iter().map(|p| p.name()).collect()
    }

    /// Run all passes on the given circuit, stopping at the first error.
    #[instrument(skip(self, circuit, data), fields(circuit = circuit.name()))]
    pub async fn run(&self, circuit: &mut Circuit, data: &mut PassData) -> CompileResult<()> {
        info!(
            "Running pass manager with {} passes on circuit with {} qubits",
            self.passes.len(),
            circuit.num_qubits()
        );

        for pass in &self.passes {
            if pass.should_run(circuit, data) {
                debug!("Running pass: {}", pass.name());
                pass.run(circuit, data).await?;
                debug!("Pass {} completed, ops: {}", pass.name(), circuit.num_ops());
            } else {
                debug!("Skipping pass: {}", pass.name());
            }
        }

        info!("Pass manager completed, ops: {}", circuit.num_ops());

        Ok(())
    }

    /// Get the number of passes.
    pub fn len(&self) -> usize {
        self.passes.len()
    }

    /// Check if the manager has no passes.
    pub fn is_empty(&self) -> bool {
        self.passes.is_empty()
    }
}

impl Default for PassManager {
    fn default() -> Self {
        Self::new()
    }
}

/// Builder for creating pass managers with preset configurations.
pub struct PassManagerBuilder {
    gate_printing: bool,
    data: PassData,
}

impl PassManagerBuilder {
    /// Create a new builder with default settings.
    pub fn new() -> Self {
        Self {
            gate_printing: false,
            data: PassData::new(),
        }
    }

    /// Print gate counts to standard output after analysis.
    #[must_use]
    pub fn with_gate_printing(mut self, enabled: bool) -> Self {
        self.gate_printing = enabled;
        self
    }

    /// Start from pre-populated pass data.
    #[must_use]
    pub fn with_data(mut self, data: PassData) -> Self {
        self.data = data;
        self
    }

    /// Build the pass manager and return it with the pass data.
    pub fn build(self) -> (PassManager, PassData) {
        let mut pm = PassManager::new();

        pm.add_pass(GateCountAnalysis);

        if self.gate_printing {
            pm.add_pass(PrintGatesPass::new());
        }

        (pm, self.data)
    }
}

impl Default for PassManagerBuilder {
    fn default() -> Self {
        Self::new()
    }
}
