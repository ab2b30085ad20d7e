//! Behaviour of the gate printing pass as seen from a pipeline.

use std::collections::BTreeMap;
use std::io::{self, Write};
use std::sync::{Arc, Mutex};

use proptest::prelude::*;
use qpipe_compile::{GateCountAnalysis, PassData, PassManager, PrintGatesPass};
use qpipe_ir::{Circuit, CustomGate, GateCounts, QubitId, StandardGate};

#[derive(Clone, Default)]
struct Captured(Arc<Mutex<Vec<u8>>>);

impl Captured {
    fn text(&self) -> String {
        String::from_utf8(self.0.lock().unwrap().clone()).unwrap()
    }
}

impl Write for Captured {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        self.0.lock().unwrap().extend_from_slice(buf);
        Ok(buf.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}

fn run_printer(circuit: &mut Circuit) -> String {
    let out = Captured::default();
    let mut pm = PassManager::new();
    pm.add_pass(PrintGatesPass::with_writer(out.clone()));

    let rt = tokio::runtime::Builder::new_current_thread()
        .build()
        .unwrap();
    rt.block_on(pm.run(circuit, &mut PassData::new())).unwrap();
    out.text()
}

#[test]
fn two_hadamards_three_cnots() {
    let mut circuit = Circuit::with_size("h2cx3", 2, 0);
    let (q0, q1) = (QubitId(0), QubitId(1));
    circuit
        .h(q0)
        .unwrap()
        .h(q1)
        .unwrap()
        .cx(q0, q1)
        .unwrap()
        .cx(q1, q0)
        .unwrap()
        .cx(q0, q1)
        .unwrap();

    let output = run_printer(&mut circuit);
    assert!(output.contains("{'H': 2, 'CNOT': 3}"), "{output}");
}

#[test]
fn empty_circuit_prints_empty_mapping() {
    let mut circuit = Circuit::with_size("empty", 3, 3);
    let output = run_printer(&mut circuit);
    assert_eq!(output, "{}\n");
}

#[test]
fn measurements_only_prints_empty_mapping() {
    let mut circuit = Circuit::with_size("measure_only", 2, 0);
    circuit.measure_all().unwrap();
    assert_eq!(run_printer(&mut circuit), "{}\n");
}

#[test]
fn custom_gate_with_newline_stays_on_one_line() {
    let mut circuit = Circuit::with_size("custom", 1, 0);
    circuit
        .gate(CustomGate::new("my\ngate", 1), [QubitId(0)])
        .unwrap()
        .h(QubitId(0))
        .unwrap();

    let output = run_printer(&mut circuit);
    assert_eq!(output, "{'my\\ngate': 1, 'H': 1}\n");
    assert_eq!(output.lines().count(), 1);
}

#[tokio::test]
async fn printing_leaves_circuit_and_data_alone() {
    let mut circuit = Circuit::bell().unwrap();
    let ops_before = circuit.num_ops();

    let mut pm = PassManager::new();
    pm.add_pass(GateCountAnalysis);
    pm.add_pass(PrintGatesPass::with_writer(Captured::default()));

    let mut data = PassData::new();
    pm.run(&mut circuit, &mut data).await.unwrap();

    assert_eq!(circuit.num_ops(), ops_before);
    let recorded = data.get::<GateCounts>().unwrap();
    assert_eq!(recorded.to_string(), "{'H': 1, 'CNOT': 1}");
}

const POOL: [StandardGate; 8] = [
    StandardGate::H,
    StandardGate::X,
    StandardGate::Y,
    StandardGate::Z,
    StandardGate::S,
    StandardGate::T,
    StandardGate::SX,
    StandardGate::CX,
];

proptest! {
    #[test]
    fn one_line_with_every_gate_type(picks in prop::collection::vec(0usize..POOL.len(), 0..40)) {
        let mut circuit = Circuit::with_size("random", 2, 0);
        let mut expected: BTreeMap<&str, usize> = BTreeMap::new();

        for (i, &pick) in picks.iter().enumerate() {
            let gate = POOL[pick].clone();
            *expected.entry(gate.label()).or_default() += 1;
            let q = QubitId(u32::try_from(i % 2).unwrap());
            if gate.num_qubits() == 2 {
                circuit.gate(gate, [q, QubitId(1 - q.0)]).unwrap();
            } else {
                circuit.gate(gate, [q]).unwrap();
            }
        }

        let output = run_printer(&mut circuit);

        prop_assert!(output.ends_with('\n'));
        prop_assert_eq!(output.matches('\n').count(), 1);
        prop_assert_eq!(output.matches(": ").count(), expected.len());
        for (label, count) in &expected {
            let pair = format!("'{label}': {count}");
            prop_assert!(output.contains(&pair), "missing {} in {}", pair, output);
        }
    }

    #[test]
    fn one_line_for_any_custom_names(names in prop::collection::vec(any::<String>(), 0..12)) {
        let mut circuit = Circuit::with_size("custom", 1, 0);
        for name in &names {
            circuit.gate(CustomGate::new(name.clone(), 1), [QubitId(0)]).unwrap();
        }
        let expected: GateCounts = names.iter().map(String::as_str).collect();

        let output = run_printer(&mut circuit);

        prop_assert_eq!(output.matches('\n').count(), 1);
        prop_assert!(!output.trim_end_matches('\n').contains('\r'));
        prop_assert_eq!(output, format!("{expected}\n"));
    }
}
