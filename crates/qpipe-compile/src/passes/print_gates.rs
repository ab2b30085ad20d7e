//! Pass that prints a circuit's gate counts.

use std::fmt;
use std::io::{self, Write};
use std::sync::{Mutex, PoisonError};

use async_trait::async_trait;
use qpipe_ir::Circuit;
use tracing::debug;

use crate::data::PassData;
use crate::error::CompileResult;
use crate::pass::{Pass, PassKind};

/// Analysis pass that writes the circuit's gate counts as one line.
///
/// The line is the dictionary form of [`qpipe_ir::GateCounts`], for example
/// `{'H': 2, 'CNOT': 3}`, or `{}` for a circuit without gates. The circuit
/// and the pass data are left untouched.
pub struct PrintGatesPass {
    sink: Mutex<Box<dyn Write + Send>>,
}

impl PrintGatesPass {
    /// Print to standard output.
    pub fn new() -> Self {
        Self::with_writer(io::stdout())
    }

    /// Print to an arbitrary sink.
    pub fn with_writer(writer: impl Write + Send + 'static) -> Self {
        Self {
            sink: Mutex::new(Box::new(writer)),
        }
    }
}

impl Default for PrintGatesPass {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Debug for PrintGatesPass {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PrintGatesPass").finish_non_exhaustive()
    }
}

#[async_trait]
impl Pass for PrintGatesPass {
    fn name(&self) -> &'static str {
        "print_gates"
    }

    fn kind(&self) -> PassKind {
        PassKind::Analysis
    }

    async fn run(&self, circuit: &mut Circuit, _data: &mut PassData) -> CompileResult<()> {
        let counts = circuit.gate_counts()?;
        debug!(circuit = circuit.name(), gate_types = counts.len(), "printing gate counts");

        let mut sink = self.sink.lock().unwrap_or_else(PoisonError::into_inner);
        writeln!(sink, "{counts}")?;
        sink.flush()?;
        Ok(())
    }
}
