// tests/picard_test.rs
//
// Termination and convergence control of the Picard iteration on a small
// ball domain with a quadratic reaction term.

use approx::assert_abs_diff_eq;
use eosim::config::SimParams;
use eosim::domain::Domain;
use eosim::sim::PicardSolver;
use ndarray::Array1;

#[test]
fn test_picard_converges_on_small_ball() {
    let domain = Domain::ball(vec![0.0], 0.5).unwrap();
    let params = SimParams {
        max_t: 10.0,
        dt: 0.005,
        dx: 0.25,
        n: 500,
        seed: 21,
    };

    let solution = PicardSolver::new(domain, 2.0, 1e-2, params)
        .unwrap()
        .run()
        .unwrap();

    assert!(solution.converged, "deltas: {:?}", solution.deltas);
    assert!(solution.iterations >= 1);
    assert_eq!(solution.deltas.len(), solution.iterations);
    assert!(solution.deltas.iter().all(|&d| d >= 0.0));
    assert!(*solution.deltas.last().unwrap() <= 1e-2);
    assert!(solution.field.values().iter().all(|v| v.is_finite()));
}

#[test]
fn test_picard_solution_queryable_off_grid() {
    let domain = Domain::ball(vec![0.0], 0.5).unwrap();
    let params = SimParams {
        max_t: 10.0,
        dt: 0.01,
        dx: 0.25,
        n: 200,
        seed: 8,
    };

    let solution = PicardSolver::new(domain, 2.0, 1e-2, params)
        .unwrap()
        .run()
        .unwrap();
    let interpolant = solution.interpolant();

    // off-grid queries return the nearest grid point's value
    for (point, &value) in solution.field.points().iter().zip(solution.field.values()) {
        let mut shifted = point.clone();
        shifted[0] += 0.01;
        assert_abs_diff_eq!(interpolant.eval(shifted.view()), value);
    }

    // far outside the domain, the nearest grid point still answers
    let far = Array1::from(vec![100.0]);
    assert!(interpolant.eval(far.view()).is_finite());
}
