use std::cell::RefCell;
use std::rc::Rc;

use ndarray::{Array1, Array2};
use pso_swarm::{
    Bound, CallbackAction, MAX_VELOCITY_FRACTION, ParticleSwarm, PointwiseFitness, PsoConfigBuilder,
    PsoIntermediate, TrajectoryBuffer, TsvTrajectoryWriter, bounds_from_pairs,
};
use pso_testfunctions::{ackley, rastrigin};

fn rastrigin_swarm(seed: u64, bounds: &[(f64, f64)]) -> ParticleSwarm {
    let config = PsoConfigBuilder::new().num_particles(15).seed(seed).build();
    ParticleSwarm::new(bounds_from_pairs(bounds).unwrap(), config).unwrap()
}

#[test]
fn test_pso_same_seed_same_result() {
    let bounds = vec![(-5.12, 5.12); 3];
    let mut f1 = PointwiseFitness::minimize(rastrigin);
    let mut f2 = PointwiseFitness::minimize(rastrigin);

    let r1 = rastrigin_swarm(5, &bounds).solve(&mut f1, 60).unwrap();
    let r2 = rastrigin_swarm(5, &bounds).solve(&mut f2, 60).unwrap();

    assert_eq!(r1.best.position(), r2.best.position());
    assert_eq!(r1.best.best_fitness(), r2.best.best_fitness());
    assert_eq!(r1.history, r2.history);
}

#[test]
fn test_pso_different_seeds_differ() {
    let bounds = vec![(-5.12, 5.12); 3];
    let mut f = PointwiseFitness::minimize(rastrigin);

    let mut buf1 = TrajectoryBuffer::default();
    let mut buf2 = TrajectoryBuffer::default();
    rastrigin_swarm(1, &bounds).solve_with_trajectory(&mut f, 5, &mut buf1).unwrap();
    rastrigin_swarm(2, &bounds).solve_with_trajectory(&mut f, 5, &mut buf2).unwrap();

    assert_ne!(buf1.frames[0], buf2.frames[0]);
}

#[test]
fn test_pso_positions_and_velocities_stay_bounded() {
    let pairs = vec![(-2.0, 3.0), (10.0, 10.5), (-100.0, 100.0)];
    let bounds: Vec<Bound> = bounds_from_pairs(&pairs).unwrap();
    let violations = Rc::new(RefCell::new(Vec::<String>::new()));

    let seen = violations.clone();
    let check_bounds = bounds.clone();
    let config = PsoConfigBuilder::new()
        .num_particles(25)
        .seed(3)
        .callback(Box::new(move |im: &PsoIntermediate<'_>| {
            for (k, p) in im.particles.iter().enumerate() {
                for (i, b) in check_bounds.iter().enumerate() {
                    let x = p.position()[i];
                    let v = p.velocity()[i];
                    if !b.contains(x) {
                        seen.borrow_mut().push(format!("iter {} particle {} x={}", im.iter, k, x));
                    }
                    if v.abs() > MAX_VELOCITY_FRACTION * b.span() {
                        seen.borrow_mut().push(format!("iter {} particle {} v={}", im.iter, k, v));
                    }
                }
            }
            CallbackAction::Continue
        }))
        .build();

    // the optimum sits on a corner, so particles pile up against the bounds
    let mut fitness = |pos: &Array2<f64>| pos.sum_axis(ndarray::Axis(1));
    let mut buffer = TrajectoryBuffer::default();
    let mut swarm = ParticleSwarm::new(bounds.clone(), config).unwrap();
    let report = swarm.solve_with_trajectory(&mut fitness, 80, &mut buffer).unwrap();

    assert!(violations.borrow().is_empty(), "{:?}", violations.borrow());
    assert_eq!(buffer.frames.len(), 80);
    for frame in &buffer.frames {
        assert_eq!(frame.dim(), (25, 3));
        for row in frame.rows() {
            for (x, b) in row.iter().zip(&bounds) {
                assert!(b.contains(*x));
            }
        }
    }
    for (x, b) in report.best.position().iter().zip(&bounds) {
        assert!(b.contains(*x));
    }
}

#[test]
fn test_pso_wide_bounds_stay_finite_and_bounded() {
    let bounds = bounds_from_pairs(&[(-1.0e307, 1.0e307)]).unwrap();
    let config = PsoConfigBuilder::new().num_particles(4).seed(0).build();
    let mut swarm = ParticleSwarm::new(bounds.clone(), config).unwrap();
    let mut fitness = |pos: &Array2<f64>| pos.column(0).mapv(|x| -(x / 1.0e307).powi(2));
    let mut buffer = TrajectoryBuffer::default();

    let report = swarm.solve_with_trajectory(&mut fitness, 20, &mut buffer).unwrap();

    for frame in &buffer.frames {
        for x in frame.iter() {
            assert!(x.is_finite() && bounds[0].contains(*x), "x = {}", x);
        }
    }
    assert!(bounds[0].contains(report.best.position()[0]));
    assert!(report.best.best_fitness().unwrap().is_finite());
}

#[test]
fn test_pso_global_best_history_never_decreases() {
    let bounds = vec![(-32.768, 32.768); 2];
    let config = PsoConfigBuilder::new().num_particles(20).seed(9).build();
    let mut fitness = PointwiseFitness::minimize(ackley);
    let mut swarm = ParticleSwarm::new(bounds_from_pairs(&bounds).unwrap(), config).unwrap();

    let report = swarm.solve(&mut fitness, 120).unwrap();

    assert_eq!(report.history.len(), 120);
    for w in report.history.windows(2) {
        assert!(w[1].unwrap() >= w[0].unwrap(), "{:?} -> {:?}", w[0], w[1]);
    }
    assert_eq!(report.history.last().copied().flatten(), report.best.best_fitness());
}

#[test]
fn test_pso_personal_bests_never_decrease() {
    let previous: Rc<RefCell<Option<Vec<f64>>>> = Rc::new(RefCell::new(None));
    let regressions = Rc::new(RefCell::new(0usize));

    let prev = previous.clone();
    let count = regressions.clone();
    let config = PsoConfigBuilder::new()
        .num_particles(12)
        .seed(21)
        .callback(Box::new(move |im: &PsoIntermediate<'_>| {
            let current: Vec<f64> = im.particles.iter().map(|p| p.best_fitness().unwrap()).collect();
            if let Some(before) = prev.borrow().as_ref() {
                for (b, c) in before.iter().zip(&current) {
                    if c < b {
                        *count.borrow_mut() += 1;
                    }
                }
            }
            *prev.borrow_mut() = Some(current);
            CallbackAction::Continue
        }))
        .build();

    let mut fitness = PointwiseFitness::minimize(rastrigin);
    let mut swarm =
        ParticleSwarm::new(bounds_from_pairs(&[(-5.12, 5.12); 4]).unwrap(), config).unwrap();
    swarm.solve(&mut fitness, 100).unwrap();

    assert_eq!(*regressions.borrow(), 0);
    assert!(previous.borrow().is_some());
}

#[test]
fn test_pso_global_best_is_detached_from_population() {
    // every reported best must be a position that was actually evaluated
    let evaluated = Rc::new(RefCell::new(Vec::<Array1<f64>>::new()));
    let log = evaluated.clone();
    let mut fitness = move |pos: &Array2<f64>| {
        log.borrow_mut().extend(pos.rows().into_iter().map(|r| r.to_owned()));
        pos.column(0).mapv(|x| -(x - 0.5).powi(2))
    };

    let config = PsoConfigBuilder::new().num_particles(8).seed(4).build();
    let mut swarm = ParticleSwarm::new(bounds_from_pairs(&[(-1.0, 1.0)]).unwrap(), config).unwrap();
    let best = swarm.run(&mut fitness, 40).unwrap();

    assert!(evaluated.borrow().iter().any(|x| x == best.position()));
}

#[test]
fn test_pso_trajectory_file_format() {
    let tmp = tempfile::tempdir().unwrap();
    let path = tmp.path().join("run_ackley.part");

    let config = PsoConfigBuilder::new().num_particles(4).seed(0).build();
    let mut swarm =
        ParticleSwarm::new(bounds_from_pairs(&[(-10.0, 10.0); 2]).unwrap(), config).unwrap();
    let mut fitness = PointwiseFitness::minimize(ackley);
    let mut writer = TsvTrajectoryWriter::create(&path).unwrap();
    swarm.solve_with_trajectory(&mut fitness, 6, &mut writer).unwrap();
    writer.finish().unwrap();

    let text = std::fs::read_to_string(&path).unwrap();
    let lines: Vec<&str> = text.lines().collect();
    assert_eq!(lines.len(), 1 + 6);
    assert_eq!(lines[0], "2");
    for line in &lines[1..] {
        assert!(line.ends_with('\t'));
        let coords: Vec<f64> = line.split_terminator('\t').map(|s| s.parse().unwrap()).collect();
        assert_eq!(coords.len(), 4 * 2);
        assert!(coords.iter().all(|x| (-10.0..=10.0).contains(x)));
    }
}
