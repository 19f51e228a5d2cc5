//! Built-in tail-assignment instances.

use ndarray::{Array1, Array2, array};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use crate::error::{TailError, TailResult};
use crate::problem::TailAssignment;

/// Named instances: `(name, description)`.
pub const INSTANCES: &[(&str, &str)] = &[
    ("identity-2", "2 flights, 2 rotations, one rotation per flight"),
    (
        "three-flights",
        "3 flights, 5 rotations, three exact covers with distinct costs",
    ),
];

/// Look up a named instance.
pub fn by_name(name: &str) -> Option<TailAssignment> {
    match name {
        "identity-2" => identity_2().ok(),
        "three-flights" => three_flights_five_rotations().ok(),
        _ => None,
    }
}

/// Two flights each served by its own rotation.
///
/// The only exact cover is `"11"` with cost `-2`.
pub fn identity_2() -> TailResult<TailAssignment> {
    TailAssignment::new(array![[1.0, 0.0], [0.0, 1.0]], array![1.0, 1.0])
}

/// Three flights and five rotations.
///
/// ```text
///            r0  r1  r2  r3  r4
/// flight 0    1   .   .   1   .
/// flight 1    .   1   .   1   1
/// flight 2    .   .   1   .   1
/// cost       1   1   1  1.5  2
/// ```
///
/// Exact covers: `{r0, r1, r2}` (-3), `{r2, r3}` (-2.5), `{r0, r4}` (-3).
pub fn three_flights_five_rotations() -> TailResult<TailAssignment> {
    TailAssignment::new(
        array![
            [1.0, 0.0, 0.0, 1.0, 0.0],
            [0.0, 1.0, 0.0, 1.0, 1.0],
            [0.0, 0.0, 1.0, 0.0, 1.0],
        ],
        array![1.0, 1.0, 1.0, 1.5, 2.0],
    )
}

/// Seeded random instance with at least one exact cover.
///
/// Each flight is first assigned to one of the leading
/// `min(flights, resources)` rotations, which guarantees a cover. Every
/// other entry is set with probability `density`. Costs are drawn from
/// `[1, 2)`.
pub fn random_instance(
    flights: usize,
    resources: usize,
    density: f64,
    seed: u64,
) -> TailResult<TailAssignment> {
    if !(0.0..=1.0).contains(&density) {
        return Err(TailError::InvalidValue {
            field: "density",
            reason: format!("{density} is outside [0, 1]"),
        });
    }
    if flights == 0 || resources == 0 {
        return Err(TailError::EmptyProblem { flights, resources });
    }

    let mut rng = StdRng::seed_from_u64(seed);
    let planted = flights.min(resources);
    let mut fr = Array2::<f64>::zeros((flights, resources));
    for f in 0..flights {
        fr[[f, rng.gen_range(0..planted)]] = 1.0;
    }
    for r in planted..resources {
        for f in 0..flights {
            if rng.gen_bool(density) {
                fr[[f, r]] = 1.0;
            }
        }
    }
    let cr: Array1<f64> = (0..resources).map(|_| rng.gen_range(1.0..2.0)).collect();
    TailAssignment::new(fr, cr)
}
