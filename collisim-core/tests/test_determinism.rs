//! Determinism tests - the same scenario always produces identical trajectories

use collisim_core::tests::test_helpers::results_approx_equal;
use collisim_core::{run_scenario, REFERENCE_SCENARIO};

const CLUSTER: &str = r#"
particle a at (0, 0) radius 5 mass 1 velocity (1, 0.5)
particle b at (3, 1) radius 5 mass 2 velocity (-1, -0.25)
particle c at (6, -1) radius 5 mass 3 velocity (0.5, 1.5)
particle d at (1, 4) radius 5 mass 0.5 velocity (2, 0)
simulate dt = 0.1 steps = 500
"#;

#[test]
fn test_reference_determinism() {
    let r1 = run_scenario(REFERENCE_SCENARIO, None).expect("First run failed");
    let r2 = run_scenario(REFERENCE_SCENARIO, None).expect("Second run failed");
    assert!(results_approx_equal(&r1, &r2, 0.0));
}

#[test]
fn test_multiple_runs_determinism() {
    let results: Vec<_> = (0..5)
        .map(|_| run_scenario(CLUSTER, None).expect("Run failed"))
        .collect();

    for i in 1..results.len() {
        assert!(
            results_approx_equal(&results[0], &results[i], 0.0),
            "Run {} should match run 0",
            i
        );
    }
}

#[test]
fn test_split_runs_match_single_run() {
    let whole = run_scenario(CLUSTER, Some(300)).unwrap();

    let (mut ctx, _) = collisim_core::build_simulation_context_from_source(CLUSTER).unwrap();
    let first = ctx.simulation.run(100);
    let second = ctx.simulation.run(200);
    let states = collisim_core::get_particle_states(&ctx);

    assert_eq!(first + second, whole.collisions);
    assert_eq!(states, whole.particles);
}
