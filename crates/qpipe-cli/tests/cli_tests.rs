//! CLI command parsing and utility tests.
//!
//! The CLI is a binary crate, so these tests mirror the clap definitions and
//! the circuit lookup in `commands::common`, calling the library crates
//! underneath.

mod circuit_lookup {
    use qpipe_ir::Circuit;

    /// Equivalent to commands::common::build_circuit
    fn build_circuit(name: &str, qubits: u32) -> anyhow::Result<Circuit> {
        let circuit = match name.to_lowercase().as_str() {
            "bell" => Circuit::bell(),
            "ghz" => Circuit::ghz(qubits),
            "basic-gates" | "basic_gates" | "basic" => Circuit::basic_gates(),
            "qft" => Circuit::qft(qubits),
            "empty" => Ok(Circuit::new("empty")),
            other => anyhow::bail!("Unknown circuit: '{other}'"),
        };
        Ok(circuit?)
    }

    #[test]
    fn test_basic_gates_counts() {
        let circuit = build_circuit("basic-gates", 0).unwrap();
        assert_eq!(
            circuit.gate_counts().unwrap().to_string(),
            "{'H': 1, 'X': 1, 'Y': 1, 'Z': 1, 'CNOT': 1}"
        );
    }

    #[test]
    fn test_ghz_uses_qubit_count() {
        let circuit = build_circuit("ghz", 5).unwrap();
        assert_eq!(circuit.num_qubits(), 5);
        assert_eq!(circuit.gate_counts().unwrap().to_string(), "{'H': 1, 'CNOT': 4}");
    }

    #[test]
    fn test_empty_circuit_prints_braces() {
        let circuit = build_circuit("empty", 3).unwrap();
        assert_eq!(circuit.gate_counts().unwrap().to_string(), "{}");
    }

    #[test]
    fn test_case_insensitive() {
        assert!(build_circuit("BELL", 0).is_ok());
        assert!(build_circuit("Basic_Gates", 0).is_ok());
    }

    #[test]
    fn test_unknown_circuit() {
        let err = build_circuit("grover", 3).unwrap_err();
        assert!(err.to_string().contains("grover"));
    }
}

mod device_names {
    use qpipe_hal::DeviceId;

    #[test]
    fn test_default_device_is_sv1() {
        let device: DeviceId = "sv1".parse().unwrap();
        assert_eq!(device, DeviceId::Sv1);
        assert_eq!(
            device.to_string(),
            "arn:aws:braket:::device/quantum-simulator/amazon/sv1"
        );
    }

    #[test]
    fn test_arn_passthrough() {
        let arn = "arn:aws:braket:us-west-2::device/qpu/example/Device-1";
        let device: DeviceId = arn.parse().unwrap();
        assert_eq!(device.to_string(), arn);
    }

    #[test]
    fn test_unknown_device_name() {
        assert!("not-a-device".parse::<DeviceId>().is_err());
    }
}

mod clap_parsing {
    use clap::{Parser, Subcommand};

    // Mirror the CLI struct for testing (since main.rs is a binary)
    #[derive(Parser)]
    #[command(name = "qpipe")]
    struct TestCli {
        #[arg(short, long, action = clap::ArgAction::Count, global = true)]
        verbose: u8,

        #[command(subcommand)]
        command: TestCommands,
    }

    #[derive(Subcommand)]
    enum TestCommands {
        Gates {
            #[arg(short, long, default_value = "basic-gates")]
            circuit: String,
            #[arg(short, long, default_value = "3")]
            qubits: u32,
        },
        Sample {
            #[arg(short, long, default_value = "basic-gates")]
            circuit: String,
            #[arg(short, long, default_value = "3")]
            qubits: u32,
            #[arg(short, long, default_value = "100")]
            shots: u32,
            #[arg(long)]
            seed: Option<u64>,
        },
        SubmitJob {
            #[arg(short, long, default_value = "sv1")]
            device: String,
            #[arg(long, default_value = "algorithm_script.py")]
            source: String,
            #[arg(long, default_value = "algorithm_script:start_here")]
            entry_point: String,
            #[arg(long)]
            no_wait: bool,
            #[arg(long)]
            job_name: Option<String>,
            #[arg(long)]
            timeout: Option<u64>,
            #[arg(long, default_value = "5")]
            poll_interval: u64,
        },
        Version,
    }

    // --- Gates command ---

    #[test]
    fn test_parse_gates_defaults() {
        let cli = TestCli::try_parse_from(["qpipe", "gates"]).unwrap();
        match cli.command {
            TestCommands::Gates { circuit, qubits } => {
                assert_eq!(circuit, "basic-gates");
                assert_eq!(qubits, 3);
            }
            _ => panic!("Expected Gates command"),
        }
    }

    #[test]
    fn test_parse_gates_with_args() {
        let cli = TestCli::try_parse_from(["qpipe", "gates", "-c", "ghz", "-q", "8"]).unwrap();
        match cli.command {
            TestCommands::Gates { circuit, qubits } => {
                assert_eq!(circuit, "ghz");
                assert_eq!(qubits, 8);
            }
            _ => panic!("Expected Gates command"),
        }
    }

    // --- Sample command ---

    #[test]
    fn test_parse_sample_defaults() {
        let cli = TestCli::try_parse_from(["qpipe", "sample"]).unwrap();
        match cli.command {
            TestCommands::Sample {
                circuit,
                shots,
                seed,
                ..
            } => {
                assert_eq!(circuit, "basic-gates");
                assert_eq!(shots, 100);
                assert!(seed.is_none());
            }
            _ => panic!("Expected Sample command"),
        }
    }

    #[test]
    fn test_parse_sample_seeded() {
        let cli =
            TestCli::try_parse_from(["qpipe", "sample", "-c", "bell", "-s", "1000", "--seed", "7"])
                .unwrap();
        match cli.command {
            TestCommands::Sample {
                circuit,
                shots,
                seed,
                ..
            } => {
                assert_eq!(circuit, "bell");
                assert_eq!(shots, 1000);
                assert_eq!(seed, Some(7));
            }
            _ => panic!("Expected Sample command"),
        }
    }

    #[test]
    fn test_parse_sample_rejects_negative_shots() {
        assert!(TestCli::try_parse_from(["qpipe", "sample", "-s", "-5"]).is_err());
    }

    // --- Submit-job command ---

    #[test]
    fn test_parse_submit_job_defaults() {
        let cli = TestCli::try_parse_from(["qpipe", "submit-job"]).unwrap();
        match cli.command {
            TestCommands::SubmitJob {
                device,
                source,
                entry_point,
                no_wait,
                job_name,
                timeout,
                poll_interval,
            } => {
                assert_eq!(device, "sv1");
                assert_eq!(source, "algorithm_script.py");
                assert_eq!(entry_point, "algorithm_script:start_here");
                assert!(!no_wait);
                assert!(job_name.is_none());
                assert!(timeout.is_none());
                assert_eq!(poll_interval, 5);
            }
            _ => panic!("Expected SubmitJob command"),
        }
    }

    #[test]
    fn test_parse_submit_job_all_args() {
        let cli = TestCli::try_parse_from([
            "qpipe",
            "submit-job",
            "--device",
            "dm1",
            "--source",
            "vqe.py",
            "--entry-point",
            "vqe:main",
            "--no-wait",
            "--job-name",
            "vqe-run-1",
            "--timeout",
            "3600",
            "--poll-interval",
            "30",
        ])
        .unwrap();
        match cli.command {
            TestCommands::SubmitJob {
                device,
                source,
                entry_point,
                no_wait,
                job_name,
                timeout,
                poll_interval,
            } => {
                assert_eq!(device, "dm1");
                assert_eq!(source, "vqe.py");
                assert_eq!(entry_point, "vqe:main");
                assert!(no_wait);
                assert_eq!(job_name.as_deref(), Some("vqe-run-1"));
                assert_eq!(timeout, Some(3600));
                assert_eq!(poll_interval, 30);
            }
            _ => panic!("Expected SubmitJob command"),
        }
    }

    // --- Version / verbose ---

    #[test]
    fn test_parse_version() {
        let cli = TestCli::try_parse_from(["qpipe", "version"]).unwrap();
        assert!(matches!(cli.command, TestCommands::Version));
    }

    #[test]
    fn test_parse_verbose_flag() {
        let cli = TestCli::try_parse_from(["qpipe", "-v", "version"]).unwrap();
        assert_eq!(cli.verbose, 1);
    }

    #[test]
    fn test_parse_verbose_after_subcommand() {
        let cli = TestCli::try_parse_from(["qpipe", "gates", "-vvv"]).unwrap();
        assert_eq!(cli.verbose, 3);
    }

    // --- Error cases ---

    #[test]
    fn test_no_subcommand() {
        assert!(TestCli::try_parse_from(["qpipe"]).is_err());
    }

    #[test]
    fn test_unknown_subcommand() {
        assert!(TestCli::try_parse_from(["qpipe", "foobar"]).is_err());
    }
}
