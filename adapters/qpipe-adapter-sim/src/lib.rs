//! qpipe Local Statevector Simulator
//!
//! A local [`Backend`](qpipe_hal::Backend) for sampling small circuits. The
//! whole state is kept in memory, so size is limited to about 20 qubits.
//!
//! | Qubits | Memory |
//! |--------|--------|
//! | 10 | ~16 KB |
//! | 15 | ~512 KB |
//! | 20 | ~16 MB |
//!
//! # Example
//!
//! ```ignore
//! use qpipe_adapter_sim::SimulatorBackend;
//! use qpipe_hal::Backend;
//! use qpipe_ir::Circuit;
//!
//! #[tokio::main]
//! async fn main() -> anyhow::Result<()> {
//!     let backend = SimulatorBackend::new();
//!     let circuit = Circuit::ghz(10)?;
//!     let job_id = backend.submit(&circuit, 100).await?;
//!     let result = backend.wait(&job_id).await?;
//!     println!("{}", result.counts.dump());
//!     Ok(())
//! }
//! ```

mod simulator;
mod statevector;

pub use simulator::{DEFAULT_MAX_QUBITS, SimulatorBackend};
