//! Tests for the Hamiltonian translator, mixer and ansatz builder.

use arvak_hal::ExecutionMode;
use arvak_ir::{Circuit, QubitId, StandardGate};
use arvak_tail::hamiltonian::{combined_field, constraint_field, cost_field, coupling, couplings};
use arvak_tail::{AnsatzKind, AnsatzOptions, TailAnsatz, TailAssignment, TailError, Translator, instances};
use proptest::prelude::*;

fn problem_strategy() -> impl Strategy<Value = TailAssignment> {
    (1usize..=4, 1usize..=6).prop_flat_map(|(flights, resources)| {
        (
            prop::collection::vec(prop::collection::vec(0.0f64..2.0, resources), flights),
            prop::collection::vec(-3.0f64..3.0, resources),
            0.1f64..5.0,
        )
            .prop_map(|(fr, cr, mu)| {
                TailAssignment::from_rows(&fr, &cr)
                    .unwrap()
                    .with_mu(mu)
                    .unwrap()
            })
    })
}

/// Rz angles on each qubit in program order.
fn rz_by_qubit(circuit: &Circuit) -> Vec<Vec<f64>> {
    let mut angles = vec![Vec::new(); circuit.num_qubits()];
    for inst in circuit.instructions() {
        if let Some(StandardGate::Rz(theta)) = inst.as_gate() {
            angles[inst.qubits[0].index()].push(*theta);
        }
    }
    angles
}

// ---------------------------------------------------------------------------
// Translator
// ---------------------------------------------------------------------------

#[test]
fn exco_couplings_are_wrapped_in_cx() {
    let problem = instances::three_flights_five_rotations().unwrap();
    let mut circuit = Circuit::with_size("exco", 5, 0);
    Translator::new(&problem).apply_exco(&mut circuit, 1.0).unwrap();

    let insts = circuit.instructions();
    // Qubit 0: field rotation, then (0,1) coupling.
    assert_eq!(insts[0].qubits, vec![QubitId(0)]);
    assert_eq!(insts[1].as_gate(), Some(&StandardGate::CX));
    assert_eq!(insts[1].qubits, vec![QubitId(0), QubitId(1)]);
    assert_eq!(insts[2].qubits, vec![QubitId(1)]);
    assert_eq!(insts[3].qubits, vec![QubitId(0), QubitId(1)]);

    // 10 pairs, 2 CX each.
    assert_eq!(circuit.num_two_qubit_gates(), 20);
}

#[test]
fn zero_couplings_still_emit_gates() {
    let problem = instances::identity_2().unwrap();
    assert_eq!(coupling(&problem, 0, 1), 0.0);

    let mut circuit = Circuit::with_size("exco", 2, 0);
    Translator::new(&problem).apply_exco(&mut circuit, 0.5).unwrap();
    assert_eq!(circuit.gate_counts().get("cx"), Some(&2));
}

#[test]
fn identity_fields() {
    let problem = instances::identity_2().unwrap();
    // Row sums are 1: 0.5 * mu * (1 - 2).
    assert_eq!(constraint_field(&problem, 0), -0.5);
    assert_eq!(cost_field(&problem, 0), 0.5);
    assert_eq!(combined_field(&problem, 1), 0.0);
}

#[test]
fn couplings_visit_each_pair_once() {
    let problem = instances::three_flights_five_rotations().unwrap();
    let pairs: Vec<(usize, usize)> = couplings(&problem).map(|(r, r_, _)| (r, r_)).collect();
    assert_eq!(pairs.len(), 10);
    assert!(pairs.iter().all(|(r, r_)| r < r_));
    assert_eq!(pairs.first(), Some(&(0, 1)));
    assert_eq!(pairs.last(), Some(&(3, 4)));
}

// ---------------------------------------------------------------------------
// Ansatz
// ---------------------------------------------------------------------------

#[test]
fn combined_ansatz_starts_in_superposition() {
    let problem = instances::three_flights_five_rotations().unwrap();
    let circuit = TailAnsatz::new(&problem, AnsatzOptions::default())
        .build(1, &[0.3, 0.2])
        .unwrap();
    for (q, inst) in circuit.instructions().iter().take(5).enumerate() {
        assert_eq!(inst.as_gate(), Some(&StandardGate::H));
        assert_eq!(inst.qubits, vec![QubitId(q as u32)]);
    }
    // Mixer closes the layer.
    let last = circuit.instructions().last().unwrap();
    assert_eq!(last.as_gate(), Some(&StandardGate::Rx(-0.4)));
}

#[test]
fn combined_is_smaller_than_interlaced() {
    let problem = instances::three_flights_five_rotations().unwrap();
    let combined = TailAnsatz::new(&problem, AnsatzOptions::default())
        .build(2, &[0.1, 0.2, 0.3, 0.4])
        .unwrap();
    let interlaced = TailAnsatz::new(
        &problem,
        AnsatzOptions::default().with_kind(AnsatzKind::Interlaced),
    )
    .build(2, &[0.1, 0.2, 0.3, 0.4, 0.5, 0.6])
    .unwrap();

    assert_eq!(combined.num_two_qubit_gates(), interlaced.num_two_qubit_gates());
    assert!(combined.num_ops() < interlaced.num_ops());
}

#[test]
fn interlaced_layer_order() {
    let problem = instances::identity_2().unwrap();
    let options = AnsatzOptions::default()
        .with_kind(AnsatzKind::Interlaced)
        .with_barriers(true);
    let circuit = TailAnsatz::new(&problem, options)
        .build(1, &[0.1, 0.2, 0.3])
        .unwrap();
    let names: Vec<&str> = circuit.instructions().iter().map(|i| i.name()).collect();
    assert_eq!(
        names,
        vec![
            "h", "h", // superposition
            "rz", "rz", "barrier", // cost (delta)
            "rx", "rx", "barrier", // mixer (beta)
            "rz", "cx", "rz", "cx", "rz", // exact cover (gamma)
            "rx", "rx", "barrier", // mixer (beta)
        ]
    );
    let rz = rz_by_qubit(&circuit);
    // Cost rotation uses delta, constraint rotation uses gamma.
    assert!((rz[0][0] - 0.3 * 0.5).abs() < 1e-12);
    assert!((rz[0][1] - 0.1 * -0.5).abs() < 1e-12);
}

#[test]
fn shots_mode_measures_every_qubit() {
    let problem = instances::identity_2().unwrap();
    let options = AnsatzOptions::default().with_mode(ExecutionMode::Shots);
    let circuit = TailAnsatz::new(&problem, options).build(1, &[0.1, 0.2]).unwrap();
    let measure = circuit.instructions().last().unwrap();
    assert!(measure.is_measure());
    assert_eq!(measure.qubits.len(), 2);
    assert_eq!(circuit.num_clbits(), 2);
}

#[test]
fn wrong_parameter_count_names_sizes() {
    let problem = instances::identity_2().unwrap();
    let ansatz = TailAnsatz::new(
        &problem,
        AnsatzOptions::default().with_kind(AnsatzKind::Interlaced),
    );
    let err = ansatz.build(2, &[0.0; 4]).unwrap_err();
    assert!(matches!(
        err,
        TailError::ParameterCount {
            kind: AnsatzKind::Interlaced,
            depth: 2,
            expected: 6,
            got: 4
        }
    ));
    assert!(err.to_string().contains("needs 6 angles, got 4"));
}

// ---------------------------------------------------------------------------
// Properties
// ---------------------------------------------------------------------------

proptest! {
    #[test]
    fn coupling_is_symmetric(problem in problem_strategy()) {
        let n = problem.num_resources();
        for r in 0..n {
            for r_ in 0..n {
                prop_assert_eq!(coupling(&problem, r, r_), coupling(&problem, r_, r));
            }
        }
    }

    #[test]
    fn combined_field_is_sum_of_parts(problem in problem_strategy()) {
        for r in 0..problem.num_resources() {
            let sum = cost_field(&problem, r) + constraint_field(&problem, r);
            prop_assert_eq!(combined_field(&problem, r), sum);
        }
    }

    #[test]
    fn merged_rotation_matches_split_rotations(problem in problem_strategy(), angle in -2.0f64..2.0) {
        let n = problem.num_resources();
        let translator = Translator::new(&problem);

        let mut cost = Circuit::with_size("cost", n as u32, 0);
        translator.apply_cost(&mut cost, angle).unwrap();
        let mut exco = Circuit::with_size("exco", n as u32, 0);
        translator.apply_exco(&mut exco, angle).unwrap();
        let mut merged = Circuit::with_size("merged", n as u32, 0);
        translator.apply_hamiltonian(&mut merged, angle).unwrap();

        let (cost, exco, merged) = (rz_by_qubit(&cost), rz_by_qubit(&exco), rz_by_qubit(&merged));
        for r in 0..n {
            // Qubit r receives r coupling rotations before its local field.
            let split = cost[r][0] + exco[r][r];
            prop_assert!((merged[r][r] - split).abs() < 1e-9);
            for (i, (m, e)) in merged[r].iter().zip(&exco[r]).enumerate() {
                if i != r {
                    prop_assert_eq!(m, e);
                }
            }
        }
    }
}
