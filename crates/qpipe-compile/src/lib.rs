//! qpipe Compilation Pass Framework
//!
//! Circuits flow through an ordered list of passes held by a
//! [`PassManager`]. Each pass implements the async [`Pass`] trait and may
//! share results with later passes through [`PassData`].
//!
//! # Architecture
//!
//! ```text
//! Circuit
//!    |
//!    v
//! +-------------+
//! | PassManager | <-- PassData (typed values + JSON metadata)
//! +-------------+
//!    |
//!    |-- GateCountAnalysis
//!    '-- PrintGatesPass
//! ```
//!
//! # Example: Printing Gate Counts
//!
//! ```rust
//! use qpipe_compile::{Pass, PassData, PrintGatesPass};
//! use qpipe_ir::{Circuit, QubitId};
//!
//! # let rt = tokio::runtime::Builder::new_current_thread().build().unwrap();
//! # rt.block_on(async {
//! let mut circuit = Circuit::with_size("demo", 2, 0);
//! circuit.h(QubitId(0)).unwrap().cx(QubitId(0), QubitId(1)).unwrap();
//!
//! // Prints: {'H': 1, 'CNOT': 1}
//! PrintGatesPass::new()
//!     .run(&mut circuit, &mut PassData::new())
//!     .await
//!     .unwrap();
//! # });
//! ```
//!
//! # Custom Passes
//!
//! ```rust
//! use async_trait::async_trait;
//! use qpipe_compile::{CompileResult, Pass, PassData, PassKind};
//! use qpipe_ir::Circuit;
//!
//! struct CountQubits;
//!
//! #[async_trait]
//! impl Pass for CountQubits {
//!     fn name(&self) -> &str { "count_qubits" }
//!     fn kind(&self) -> PassKind { PassKind::Analysis }
//!
//!     async fn run(&self, circuit: &mut Circuit, data: &mut PassData) -> CompileResult<()> {
//!         data.set_metadata("num_qubits", circuit.num_qubits());
//!         Ok(())
//!     }
//! }
//! ```

pub mod data;
pub mod error;
pub mod manager;
pub mod pass;
pub mod passes;

pub use data::PassData;
pub use error::{CompileError, CompileResult};
pub use manager::{PassManager, PassManagerBuilder};
pub use pass::{Pass, PassKind};
pub use passes::{GateCountAnalysis, PrintGatesPass};
