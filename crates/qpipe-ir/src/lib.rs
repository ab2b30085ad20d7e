//! qpipe Circuit Intermediate Representation
//!
//! This crate provides the circuit data structures the rest of qpipe works
//! on: compilation passes inspect them, the local simulator executes them.
//!
//! # Overview
//!
//! Circuits are stored as a DAG (Directed Acyclic Graph) internally. The
//! high-level [`Circuit`] API wraps the DAG with a fluent builder and a few
//! pre-built circuits.
//!
//! # Core Components
//!
//! - **Qubits and Classical Bits**: [`QubitId`], [`ClbitId`]
//! - **Gates**: [`StandardGate`] for built-in gates and [`CustomGate`] for
//!   opaque user-defined operations
//! - **Instructions**: [`Instruction`] combining gates with their operands
//! - **DAG**: [`CircuitDag`] for the internal graph representation
//! - **Gate counts**: [`GateCounts`], the aggregate "gates by type" view
//!
//! # Example: Counting Gates
//!
//! ```rust
//! use qpipe_ir::{Circuit, QubitId};
//!
//! let mut circuit = Circuit::with_size("demo", 2, 0);
//! circuit.h(QubitId(0)).unwrap();
//! circuit.h(QubitId(1)).unwrap();
//! circuit.cx(QubitId(0), QubitId(1)).unwrap();
//!
//! let counts = circuit.gate_counts().unwrap();
//! assert_eq!(counts.to_string(), "{'H': 2, 'CNOT': 1}");
//! ```
//!
//! # Supported Gates
//!
//! | Gate | Qubits | Label |
//! |------|--------|-------|
//! | `H` | 1 | `H` |
//! | `X`, `Y`, `Z` | 1 | `X`, `Y`, `Z` |
//! | `S`, `Sdg`, `T`, `Tdg` | 1 | `S`, `SDG`, `T`, `TDG` |
//! | `SX` | 1 | `SX` |
//! | `Rx`, `Ry`, `Rz`, `P`, `U` | 1 | `RX`, `RY`, `RZ`, `P`, `U` |
//! | `CX` | 2 | `CNOT` |
//! | `CY`, `CZ`, `CH` | 2 | `CY`, `CZ`, `CH` |
//! | `Swap` | 2 | `SWAP` |
//! | `CP`, `CRz` | 2 | `CP`, `CRZ` |
//! | `CCX`, `CSwap` | 3 | `CCX`, `CSWAP` |

pub mod circuit;
pub mod counts;
pub mod dag;
pub mod error;
pub mod gate;
pub mod instruction;
pub mod qubit;

pub use circuit::Circuit;
pub use counts::GateCounts;
pub use dag::{CircuitDag, DagEdge, DagNode, NodeIndex, WireId};
pub use error::{IrError, IrResult};
pub use gate::{CustomGate, Gate, GateKind, StandardGate};
pub use instruction::{Instruction, InstructionKind};
pub use qubit::{Clbit, ClbitId, Qubit, QubitId};
