use ndarray::{Array1, Array2};
use pso_swarm::{PointwiseFitness, PsoConfigBuilder, particle_swarm, run_recorded_particle_swarm};
use pso_testfunctions::{quadratic, sphere};

#[test]
fn test_pso_negative_square_1d() {
    // maximise -x^2 on [-100, 100]
    let mut fitness = |positions: &Array2<f64>| positions.column(0).mapv(|x| -x * x);
    let config = PsoConfigBuilder::new().num_particles(20).seed(0).build();

    let report = particle_swarm(&mut fitness, &[(-100.0, 100.0)], config, 200).unwrap();

    assert_eq!(report.nit, 200);
    assert_eq!(report.nfev, 20 * 200);
    assert!(report.best.position()[0].abs() < 1.0);
    assert!(report.best.best_fitness().unwrap() <= 0.0);
}

#[test]
fn test_pso_sphere_2d() {
    let bounds = vec![(-5.12, 5.12); 2];
    let config = PsoConfigBuilder::new().num_particles(20).seed(42).build();
    let tmp = tempfile::tempdir().unwrap();

    let result = run_recorded_particle_swarm(
        "sphere",
        &mut PointwiseFitness::minimize(sphere),
        &bounds,
        config,
        200,
        tmp.path(),
    );

    assert!(result.is_ok());
    let (report, _csv_path) = result.unwrap();
    assert!(report.best.best_fitness().unwrap() > -1e-2);
}

#[test]
fn test_pso_quadratic_offset_minimum() {
    let bounds = vec![(-5.0, 5.0); 2];
    let config = PsoConfigBuilder::new().num_particles(20).seed(7).build();

    let mut fitness = PointwiseFitness::minimize(quadratic);
    let report = particle_swarm(&mut fitness, &bounds, config, 200).unwrap();

    for &actual in report.best.position().iter() {
        assert!((actual - 1.0).abs() < 0.2);
    }
    let x: &Array1<f64> = report.best.position();
    assert_eq!(report.best.best_fitness(), Some(-quadratic(x)));
}
