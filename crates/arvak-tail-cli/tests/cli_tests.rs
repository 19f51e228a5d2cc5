//! CLI command parsing and configuration tests.
//!
//! The CLI is a binary crate, so argument parsing is checked against a
//! mirror of its clap structs, and command behavior through the library
//! crates the commands call into.

// ============================================================================
// Clap argument parsing
// ============================================================================

mod clap_parsing {
    use clap::{Parser, Subcommand, ValueEnum};

    // Mirror the CLI struct for testing (since main.rs is a binary)
    #[derive(Parser)]
    #[command(name = "arvak-tail")]
    struct TestCli {
        #[arg(short, long, action = clap::ArgAction::Count, global = true)]
        verbose: u8,

        #[command(subcommand)]
        command: TestCommands,
    }

    #[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
    enum TestFormat {
        Summary,
        Qasm,
        Qasm2,
        Json,
    }

    #[derive(Subcommand)]
    enum TestCommands {
        Run {
            #[arg(short, long)]
            config: String,
            #[arg(short, long)]
            mode: Option<String>,
            #[arg(short, long)]
            shots: Option<u32>,
            #[arg(long)]
            max_depth: Option<usize>,
            #[arg(long)]
            json: bool,
        },
        Circuit {
            #[arg(short, long, conflicts_with = "instance")]
            config: Option<String>,
            #[arg(short, long)]
            instance: Option<String>,
            #[arg(short, long, default_value = "1")]
            depth: usize,
            #[arg(short, long, value_delimiter = ',', allow_hyphen_values = true)]
            params: Option<Vec<f64>>,
            #[arg(short, long)]
            ansatz: Option<String>,
            #[arg(long)]
            barriers: bool,
            #[arg(long)]
            measure: bool,
            #[arg(short, long, value_enum, default_value = "summary")]
            format: TestFormat,
        },
        Solve {
            #[arg(short, long, conflicts_with = "instance")]
            config: Option<String>,
            #[arg(short, long)]
            instance: Option<String>,
        },
        Instances,
        Version,
    }

    // --- Run command ---

    #[test]
    fn test_parse_run_minimal() {
        let cli = TestCli::try_parse_from(["arvak-tail", "run", "-c", "tail.yaml"]).unwrap();
        match cli.command {
            TestCommands::Run {
                config,
                mode,
                shots,
                max_depth,
                json,
            } => {
                assert_eq!(config, "tail.yaml");
                assert!(mode.is_none());
                assert!(shots.is_none());
                assert!(max_depth.is_none());
                assert!(!json);
            }
            _ => panic!("Expected Run command"),
        }
    }

    #[test]
    fn test_parse_run_overrides() {
        let cli = TestCli::try_parse_from([
            "arvak-tail",
            "-vv",
            "run",
            "--config",
            "tail.json",
            "--mode",
            "shots",
            "-s",
            "4096",
            "--max-depth",
            "3",
        ])
        .unwrap();
        assert_eq!(cli.verbose, 2);
        match cli.command {
            TestCommands::Run {
                mode,
                shots,
                max_depth,
                ..
            } => {
                assert_eq!(mode.as_deref(), Some("shots"));
                assert_eq!(shots, Some(4096));
                assert_eq!(max_depth, Some(3));
            }
            _ => panic!("Expected Run command"),
        }
    }

    #[test]
    fn test_parse_run_requires_config() {
        assert!(TestCli::try_parse_from(["arvak-tail", "run"]).is_err());
    }

    // --- Circuit command ---

    #[test]
    fn test_parse_circuit_params() {
        let cli = TestCli::try_parse_from([
            "arvak-tail",
            "circuit",
            "--instance",
            "identity-2",
            "--depth",
            "2",
            "--params",
            "0.1,-0.2,0.3,0.4",
            "--format",
            "qasm",
        ])
        .unwrap();
        match cli.command {
            TestCommands::Circuit {
                instance,
                depth,
                params,
                format,
                barriers,
                ..
            } => {
                assert_eq!(instance.as_deref(), Some("identity-2"));
                assert_eq!(depth, 2);
                assert_eq!(params, Some(vec![0.1, -0.2, 0.3, 0.4]));
                assert_eq!(format, TestFormat::Qasm);
                assert!(!barriers);
            }
            _ => panic!("Expected Circuit command"),
        }
    }

    #[test]
    fn test_parse_circuit_defaults() {
        let cli = TestCli::try_parse_from(["arvak-tail", "circuit", "-i", "three-flights"]).unwrap();
        match cli.command {
            TestCommands::Circuit { depth, format, .. } => {
                assert_eq!(depth, 1);
                assert_eq!(format, TestFormat::Summary);
            }
            _ => panic!("Expected Circuit command"),
        }
    }

    #[test]
    fn test_parse_circuit_rejects_unknown_format() {
        let result = TestCli::try_parse_from([
            "arvak-tail",
            "circuit",
            "-i",
            "identity-2",
            "-f",
            "svg",
        ]);
        assert!(result.is_err());
    }

    #[test]
    fn test_parse_config_conflicts_with_instance() {
        let result = TestCli::try_parse_from([
            "arvak-tail",
            "solve",
            "-c",
            "tail.yaml",
            "-i",
            "identity-2",
        ]);
        assert!(result.is_err());
    }

    // --- Other commands ---

    #[test]
    fn test_parse_simple_commands() {
        assert!(matches!(
            TestCli::try_parse_from(["arvak-tail", "instances"]).unwrap().command,
            TestCommands::Instances
        ));
        assert!(matches!(
            TestCli::try_parse_from(["arvak-tail", "version"]).unwrap().command,
            TestCommands::Version
        ));
    }

    #[test]
    fn test_unknown_subcommand() {
        assert!(TestCli::try_parse_from(["arvak-tail", "optimize"]).is_err());
    }
}

// ============================================================================
// Configuration files
// ============================================================================

mod config_files {
    use std::fs;

    use arvak_tail::{TailConfig, TailError};

    const CONFIG: &str = r#"
CR: [1.0, 1.0, 1.0, 1.5, 2.0]
FR:
  - [1, 0, 0, 1, 0]
  - [0, 1, 0, 1, 1]
  - [0, 0, 1, 0, 1]
max_depth: 2
params:
  1: [0.3, 0.4]
  2: [0.2, 0.4, 0.3, 0.5]
"#;

    #[test]
    fn test_load_config_from_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("tail.yaml");
        fs::write(&path, CONFIG).unwrap();

        let config = TailConfig::from_file(&path).unwrap();
        assert_eq!(config.max_depth, 2);
        assert_eq!(config.backend, "simulator");
        assert_eq!(config.params_for(2).unwrap().len(), 4);
    }

    #[test]
    fn test_config_missing_fr() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("broken.yaml");
        fs::write(&path, "CR: [1.0, 2.0]\n").unwrap();

        let err = TailConfig::from_file(&path).unwrap_err();
        assert!(matches!(err, TailError::MissingOption("FR")));
        assert!(err.to_string().contains("'FR'"));
    }

    #[test]
    fn test_config_bad_yaml() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("bad.yml");
        fs::write(&path, "CR: [1.0,\n").unwrap();
        assert!(matches!(
            TailConfig::from_file(&path),
            Err(TailError::Config(_))
        ));
    }
}

// ============================================================================
// Circuit output
// ============================================================================

mod circuit_output {
    use arvak_hal::ExecutionMode;
    use arvak_tail::{AnsatzOptions, TailAnsatz, instances};

    #[test]
    fn test_emit_qasm3() {
        let problem = instances::identity_2().unwrap();
        let options = AnsatzOptions::default().with_mode(ExecutionMode::Shots);
        let circuit = TailAnsatz::new(&problem, options).build(1, &[0.5, 0.25]).unwrap();

        let qasm = arvak_qasm3::emit(&circuit);
        assert!(qasm.starts_with("OPENQASM 3.0;"));
        assert!(qasm.contains("qubit[2] q;"));
        assert!(qasm.contains("cx q[0], q[1];"));
        assert!(qasm.contains("c[1] = measure q[1];"));
    }

    #[test]
    fn test_emit_qasm2() {
        let problem = instances::identity_2().unwrap();
        let circuit = TailAnsatz::new(&problem, AnsatzOptions::default())
            .build(1, &[0.5, 0.25])
            .unwrap();

        let qasm = arvak_qasm3::emit_qasm2(&circuit);
        assert!(qasm.starts_with("OPENQASM 2.0;"));
        assert!(qasm.contains("qreg q[2];"));
        assert!(!qasm.contains("measure"));
    }

    #[test]
    fn test_json_round_trip() {
        let problem = instances::three_flights_five_rotations().unwrap();
        let circuit = TailAnsatz::new(&problem, AnsatzOptions::default())
            .build(1, &[0.5, 0.25])
            .unwrap();
        let json = serde_json::to_string(&circuit).unwrap();
        let back: arvak_ir::Circuit = serde_json::from_str(&json).unwrap();
        assert_eq!(back, circuit);
    }
}
