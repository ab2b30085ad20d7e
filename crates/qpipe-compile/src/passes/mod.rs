//! Built-in compilation passes.

mod gate_count;
mod print_gates;

pub use gate_count::GateCountAnalysis;
pub use print_gates::PrintGatesPass;
