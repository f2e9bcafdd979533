use rand::{rngs::SmallRng, SeedableRng};

use crate::prelude::{Error, LinearSolver, MeasurementSet, Method, Vector3};
use crate::tests::{
    emitter_position, init_logger, noiseless_set, noisy_set, survey_positions,
    TEST_PROPAGATION_SPEED_M_S,
};

#[test]
fn noiseless_recovery() {
    init_logger();

    let positions = survey_positions();
    let emitter = emitter_position();
    let set = noiseless_set(&positions, emitter, TEST_PROPAGATION_SPEED_M_S);

    let estimate = LinearSolver::resolve(&set).unwrap();
    assert_eq!(estimate.method, Method::LeastSquares);
    assert!(estimate.converged);
    assert_eq!(estimate.iterations, 0);

    let error_m = (estimate.position - emitter).norm();
    assert!(
        error_m < 1.0E-6 * emitter.norm(),
        "noiseless recovery error: {:.3E} m",
        error_m,
    );

    // the auxiliary unknown is the emitter to reference station range
    let true_range_m = (positions[0] - emitter).norm();
    let range_m = estimate.reference_range_m.unwrap();
    assert!(
        (range_m - true_range_m).abs() < 1.0E-6 * true_range_m,
        "reference range error: {:.3E} m",
        (range_m - true_range_m).abs(),
    );
}

#[test]
fn collinear_geometry_detected() {
    init_logger();

    let base = Vector3::new(4.0E6, 0.0, 5.0E6);
    let direction = Vector3::new(1.0, 2.0, 0.5);
    let positions: Vec<_> = (0..5)
        .map(|i| base + direction * (i as f64 * 1.0E4))
        .collect();

    let emitter = Vector3::new(4.1E6, 1.0E5, 5.0E6);
    let set = noiseless_set(&positions, emitter, TEST_PROPAGATION_SPEED_M_S);

    assert_eq!(
        LinearSolver::resolve(&set),
        Err(Error::DegenerateGeometry),
    );
}

#[test]
fn coincident_geometry_detected() {
    init_logger();

    let positions = vec![Vector3::new(4.0E6, 1.0E6, 4.5E6); 5];
    let emitter = Vector3::new(4.1E6, 1.0E5, 5.0E6);
    let set = noiseless_set(&positions, emitter, TEST_PROPAGATION_SPEED_M_S);

    assert_eq!(
        LinearSolver::resolve(&set),
        Err(Error::DegenerateGeometry),
    );
}

#[test]
fn rejects_before_any_algebra() {
    let positions = survey_positions();
    let emitter = emitter_position();

    // one station short of the 4 equation minimum
    let set = noiseless_set(&positions[..4], emitter, TEST_PROPAGATION_SPEED_M_S);
    assert_eq!(
        LinearSolver::resolve(&set),
        Err(Error::NotEnoughStations {
            required: 5,
            provided: 4,
        }),
    );

    // mismatched slices never reach the engine
    assert_eq!(
        MeasurementSet::from_slices(&positions, &[0.0; 4], TEST_PROPAGATION_SPEED_M_S),
        Err(Error::DimensionMismatch),
    );
}

#[test]
fn noise_sensitivity() {
    init_logger();

    let positions = survey_positions();
    let emitter = emitter_position();

    // ±100 ns uniform timing noise, 30 m of range uncertainty per station
    let noise_amplitude_s = 100.0E-9;
    let mut rng = SmallRng::seed_from_u64(0x7d0a);

    let trials = 20;
    let mut worst_error_m: f64 = 0.0;
    let mut mean_error_m: f64 = 0.0;
    for _ in 0..trials {
        let set = noisy_set(
            &positions,
            emitter,
            TEST_PROPAGATION_SPEED_M_S,
            noise_amplitude_s,
            &mut rng,
        );
        let estimate = LinearSolver::resolve(&set).unwrap();
        let error_m = (estimate.position - emitter).norm();
        worst_error_m = worst_error_m.max(error_m);
        mean_error_m += error_m / trials as f64;
    }

    // Regression bounds calibrated to this geometry: the continent scale
    // constellation dilutes the 30 m per station range uncertainty by
    // three orders of magnitude, tens of km of position error per
    // realization is nominal.
    assert!(
        worst_error_m < 1.0E5,
        "worst error across trials: {:.3E} m",
        worst_error_m,
    );
    assert!(
        mean_error_m < 3.0E4,
        "mean error across trials: {:.3E} m",
        mean_error_m,
    );
}
