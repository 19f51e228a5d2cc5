//! QASM emitter for serializing circuits.

use std::f64::consts::PI;

use arvak_ir::{Circuit, ClbitId, Instruction, InstructionKind, QubitId};

/// Emit a circuit as QASM3 source code.
pub fn emit(circuit: &Circuit) -> String {
    Emitter::new(Dialect::Qasm3).emit_circuit(circuit)
}

/// Emit a circuit as QASM 2.0 source code.
///
/// Register declarations use the QASM2 style (`qreg q[n];` / `creg c[n];`)
/// and measurements use `measure q[i] -> c[i];`.
pub fn emit_qasm2(circuit: &Circuit) -> String {
    Emitter::new(Dialect::Qasm2).emit_circuit(circuit)
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Dialect {
    Qasm2,
    Qasm3,
}

struct Emitter {
    dialect: Dialect,
    output: String,
}

impl Emitter {
    fn new(dialect: Dialect) -> Self {
        Self {
            dialect,
            output: String::new(),
        }
    }

    fn emit_circuit(mut self, circuit: &Circuit) -> String {
        match self.dialect {
            Dialect::Qasm3 => {
                self.writeln("OPENQASM 3.0;");
                self.writeln("include \"stdgates.inc\";");
            }
            Dialect::Qasm2 => {
                self.writeln("OPENQASM 2.0;");
                self.writeln("include \"qelib1.inc\";");
            }
        }
        self.writeln("");

        let num_qubits = circuit.num_qubits();
        let num_clbits = circuit.num_clbits();
        if num_qubits > 0 {
            let decl = match self.dialect {
                Dialect::Qasm3 => format!("qubit[{num_qubits}] q;"),
                Dialect::Qasm2 => format!("qreg q[{num_qubits}];"),
            };
            self.writeln(&decl);
        }
        if num_clbits > 0 {
            let decl = match self.dialect {
                Dialect::Qasm3 => format!("bit[{num_clbits}] c;"),
                Dialect::Qasm2 => format!("creg c[{num_clbits}];"),
            };
            self.writeln(&decl);
        }
        if num_qubits > 0 || num_clbits > 0 {
            self.writeln("");
        }

        for instruction in circuit.instructions() {
            self.emit_instruction(instruction);
        }

        self.output
    }

    fn emit_instruction(&mut self, instruction: &Instruction) {
        match &instruction.kind {
            InstructionKind::Gate(gate) => {
                let qubits = emit_qubits(&instruction.qubits);
                match gate.angle() {
                    Some(theta) => {
                        self.writeln(&format!("{}({}) {qubits};", gate.name(), emit_angle(theta)));
                    }
                    None => self.writeln(&format!("{} {qubits};", gate.name())),
                }
            }

            InstructionKind::Measure => {
                for (q, c) in instruction.qubits.iter().zip(&instruction.clbits) {
                    let line = match self.dialect {
                        Dialect::Qasm3 => format!("{} = measure {};", clbit(*c), qubit(*q)),
                        Dialect::Qasm2 => format!("measure {} -> {};", qubit(*q), clbit(*c)),
                    };
                    self.writeln(&line);
                }
            }

            InstructionKind::Barrier => {
                if instruction.qubits.is_empty() {
                    self.writeln("barrier;");
                } else {
                    self.writeln(&format!("barrier {};", emit_qubits(&instruction.qubits)));
                }
            }
        }
    }

    fn writeln(&mut self, line: &str) {
        self.output.push_str(line);
        self.output.push('\n');
    }
}

fn qubit(q: QubitId) -> String {
    format!("q[{}]", q.0)
}

fn clbit(c: ClbitId) -> String {
    format!("c[{}]", c.0)
}

fn emit_qubits(qubits: &[QubitId]) -> String {
    qubits
        .iter()
        .map(|q| qubit(*q))
        .collect::<Vec<_>>()
        .join(", ")
}

/// Angles close to common fractions of pi are written symbolically; all
/// others use the shortest representation that parses back exactly.
fn emit_angle(v: f64) -> String {
    const TOL: f64 = 1e-12;
    let candidates = [
        (PI, "pi"),
        (-PI, "-pi"),
        (PI / 2.0, "pi/2"),
        (-PI / 2.0, "-pi/2"),
        (PI / 4.0, "pi/4"),
        (-PI / 4.0, "-pi/4"),
    ];
    candidates
        .iter()
        .find(|(c, _)| (v - c).abs() < TOL)
        .map_or_else(|| format!("{v}"), |(_, s)| (*s).to_string())
}
