//! Pass trait and types for compilation passes.

use async_trait::async_trait;
use qpipe_ir::Circuit;

use crate::data::PassData;
use crate::error::CompileResult;

/// The kind of compilation pass.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PassKind {
    /// Analysis pass that reads but does not modify the circuit.
    Analysis,
    /// Transformation pass that modifies the circuit.
    Transformation,
}

/// A compilation pass that operates on a circuit.
///
/// Passes are the unit of work in a qpipe pipeline. They run one after the
/// other inside the caller's task, so a pass may await I/O but never runs
/// concurrently with another pass on the same circuit.
#[async_trait]
pub trait Pass: Send + Sync {
    /// Get the name of this pass.
    fn name(&self) -> &str;

    /// Get the kind of this pass.
    fn kind(&self) -> PassKind;

    /// Run the pass on the given circuit.
    ///
    /// Analysis passes must leave the circuit untouched and may record
    /// results in `data`. Transformation passes may rewrite the circuit.
    async fn run(&self, circuit: &mut Circuit, data: &mut PassData) -> CompileResult<()>;

    /// Check if this pass should run based on current state.
    fn should_run(&self, _circuit: &Circuit, _data: &PassData) -> bool {
        true
    }
}
