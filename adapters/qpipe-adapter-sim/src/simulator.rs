//! Simulator backend implementation.

use std::sync::{Arc, Mutex, PoisonError};
use std::time::Instant;

use async_trait::async_trait;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use rustc_hash::FxHashMap;
use tracing::{debug, instrument};
use uuid::Uuid;

use qpipe_hal::{
    Backend, BackendAvailability, Counts, ExecutionResult, HalError, HalResult, Job, JobId,
    JobStatus, ValidationResult,
};
use qpipe_ir::{Circuit, InstructionKind};

use crate::statevector::{Statevector, bitstring};

/// Default qubit limit; 2^20 amplitudes is 16 MiB of state.
pub const DEFAULT_MAX_QUBITS: u32 = 20;

struct SimJob {
    job: Job,
    result: Option<ExecutionResult>,
}

/// Local simulator backend.
///
/// Circuits are simulated as a statevector and sampled `shots` times. Jobs
/// complete inside `submit`; a job is forgotten once its result is read.
pub struct SimulatorBackend {
    jobs: Arc<Mutex<FxHashMap<String, SimJob>>>,
    max_qubits: u32,
    seed: Option<u64>,
}

impl SimulatorBackend {
    /// Create a new simulator backend with default settings.
    pub fn new() -> Self {
        Self::with_max_qubits(DEFAULT_MAX_QUBITS)
    }

    /// Create a simulator with custom max qubits.
    pub fn with_max_qubits(max_qubits: u32) -> Self {
        Self {
            jobs: Arc::new(Mutex::new(FxHashMap::default())),
            max_qubits,
            seed: None,
        }
    }

    /// Use a fixed RNG seed so sampling is reproducible.
    #[must_use]
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    fn check_size(&self, circuit: &Circuit) -> HalResult<()> {
        if circuit.num_qubits() > self.max_qubits as usize {
            return Err(HalError::CircuitTooLarge(format!(
                "Circuit has {} qubits but simulator only supports {}",
                circuit.num_qubits(),
                self.max_qubits
            )));
        }
        Ok(())
    }

    /// Run simulation synchronously.
    ///
    /// Unitary circuits are evolved once and every shot is drawn from the
    /// final distribution. A reset collapses the state, so circuits that
    /// contain one are re-simulated for each shot instead.
    #[instrument(skip(self, circuit), fields(circuit = circuit.name()))]
    fn run_simulation(&self, circuit: &Circuit, shots: u32) -> HalResult<ExecutionResult> {
        let start = Instant::now();
        let num_qubits = circuit.num_qubits();
        let ops = circuit
            .dag()
            .topological_ops()
            .map_err(|e| HalError::InvalidCircuit(e.to_string()))?;
        let per_shot = ops
            .iter()
            .any(|(_, inst)| matches!(inst.kind, InstructionKind::Reset));
        debug!(
            "Starting simulation: {} qubits, {} shots, {} instructions, per-shot: {}",
            num_qubits,
            shots,
            ops.len(),
            per_shot
        );

        let mut rng = match self.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        };

        let mut hits: FxHashMap<usize, u64> = FxHashMap::default();
        if per_shot {
            for _ in 0..shots {
                let mut sv = Statevector::new(num_qubits);
                for (_, inst) in &ops {
                    sv.apply(inst, &mut rng);
                }
                let outcome = sample_outcome(&cumulative(&sv), &mut rng);
                *hits.entry(outcome).or_insert(0) += 1;
            }
        } else {
            let mut sv = Statevector::new(num_qubits);
            for (_, inst) in &ops {
                sv.apply(inst, &mut rng);
            }
            let cdf = cumulative(&sv);
            for _ in 0..shots {
                *hits.entry(sample_outcome(&cdf, &mut rng)).or_insert(0) += 1;
            }
        }

        let counts: Counts = hits
            .into_iter()
            .map(|(outcome, n)| (bitstring(outcome, num_qubits), n))
            .collect();

        let elapsed = start.elapsed();
        debug!("Simulation completed in {:?}", elapsed);

        let elapsed_ms = u64::try_from(elapsed.as_millis()).unwrap_or(u64::MAX);
        let method = if per_shot { "per_shot" } else { "single_state" };
        Ok(ExecutionResult::new(counts, shots)
            .with_execution_time(elapsed_ms)
            .with_metadata("method", serde_json::Value::from(method)))
    }
}

/// Running sum of the basis-state probabilities.
fn cumulative(sv: &Statevector) -> Vec<f64> {
    let mut acc = 0.0;
    sv.probabilities()
        .into_iter()
        .map(|p| {
            acc += p;
            acc
        })
        .collect()
}

/// Draw a basis-state index from a cumulative distribution.
fn sample_outcome(cdf: &[f64], rng: &mut StdRng) -> usize {
    let total = cdf.last().copied().unwrap_or(0.0);
    let r: f64 = rng.r#gen::<f64>() * total;
    cdf.partition_point(|&c| c <= r).min(cdf.len().saturating_sub(1))
}

impl Default for SimulatorBackend {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl Backend for SimulatorBackend {
    fn name(&self) -> &'static str {
        "simulator"
    }

    fn max_qubits(&self) -> u32 {
        self.max_qubits
    }

    async fn availability(&self) -> HalResult<BackendAvailability> {
        Ok(BackendAvailability::always_available())
    }

    async fn validate(&self, circuit: &Circuit) -> HalResult<ValidationResult> {
        match self.check_size(circuit) {
            Ok(()) => Ok(ValidationResult::Valid),
            Err(e) => Ok(ValidationResult::Invalid {
                reasons: vec![e.to_string()],
            }),
        }
    }

    #[instrument(skip(self, circuit))]
    async fn submit(&self, circuit: &Circuit, shots: u32) -> HalResult<JobId> {
        if shots == 0 {
            return Err(HalError::InvalidShots("shots must be at least 1".into()));
        }
        self.check_size(circuit)?;

        let job_id = JobId::new(Uuid::new_v4().to_string());
        let job = Job::new(job_id.clone(), shots).with_backend("simulator");

        {
            let mut jobs = self.jobs.lock().unwrap_or_else(PoisonError::into_inner);
            jobs.insert(job_id.0.clone(), SimJob { job, result: None });
        }

        debug!("Submitted job: {}", job_id);

        let outcome = self.run_simulation(circuit, shots);

        let mut jobs = self.jobs.lock().unwrap_or_else(PoisonError::into_inner);
        if let Some(sim_job) = jobs.get_mut(&job_id.0) {
            match outcome {
                Ok(result) => {
                    sim_job.result = Some(result);
                    sim_job.job = sim_job.job.clone().with_status(JobStatus::Completed);
                }
                Err(e) => {
                    sim_job.job = sim_job.job.clone().with_status(JobStatus::Failed(e.to_string()));
                }
            }
        }

        Ok(job_id)
    }

    async fn status(&self, job_id: &JobId) -> HalResult<JobStatus> {
        let jobs = self.jobs.lock().unwrap_or_else(PoisonError::into_inner);
        jobs.get(&job_id.0)
            .map(|j| j.job.status.clone())
            .ok_or_else(|| HalError::JobNotFound(job_id.0.clone()))
    }

    async fn result(&self, job_id: &JobId) -> HalResult<ExecutionResult> {
        let mut jobs = self.jobs.lock().unwrap_or_else(PoisonError::into_inner);
        let Some(mut sim_job) = jobs.remove(&job_id.0) else {
            return Err(HalError::JobNotFound(job_id.0.clone()));
        };
        if let Some(result) = sim_job.result.take() {
            return Ok(result);
        }
        match sim_job.job.status.clone() {
            JobStatus::Failed(msg) => Err(HalError::JobFailed(msg)),
            JobStatus::Cancelled => Err(HalError::JobCancelled),
            _ => {
                jobs.insert(job_id.0.clone(), sim_job);
                Err(HalError::JobNotFound(job_id.0.clone()))
            }
        }
    }

    async fn cancel(&self, job_id: &JobId) -> HalResult<()> {
        let mut jobs = self.jobs.lock().unwrap_or_else(PoisonError::into_inner);
        match jobs.get_mut(&job_id.0) {
            Some(sim_job) if sim_job.job.status.is_terminal() => Ok(()),
            Some(sim_job) => {
                sim_job.job = sim_job.job.clone().with_status(JobStatus::Cancelled);
                Ok(())
            }
            None => Err(HalError::JobNotFound(job_id.0.clone())),
        }
    }
}
