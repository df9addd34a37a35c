//! Analyzer tests for scenario validation

use collisim_core::diagnostics::format_diagnostics;
use collisim_core::{
    analyze_scenario, build_simulation_context_from_source, format_scenario_error,
    parse_scenario, ScenarioError,
};

#[test]
fn test_valid_scenario_has_no_diagnostics() {
    let source = r#"
particle a at (0, 0) radius 1 mass 1
particle b at (10, 0) radius 1 mass 2
simulate dt = 0.1
"#;
    let scenario = parse_scenario(source).unwrap();
    assert!(analyze_scenario(&scenario).is_empty());
}

#[test]
fn test_non_positive_radius_and_mass() {
    let source = r#"
particle a at (0, 0) radius 0 mass 1
particle b at (10, 0) radius 1 mass -2
simulate dt = 0.1
"#;
    let scenario = parse_scenario(source).unwrap();
    let diagnostics = analyze_scenario(&scenario);
    let errors: Vec<_> = diagnostics.errors().collect();
    assert_eq!(errors.len(), 2);
    assert!(errors[0].message.contains("'a' radius"));
    assert!(errors[1].message.contains("'b' mass"));
    assert!(errors.iter().all(|e| e.span.is_some()));
}

#[test]
fn test_non_positive_timestep() {
    let scenario = parse_scenario("simulate dt = 0\n").unwrap();
    let diagnostics = analyze_scenario(&scenario);
    assert!(diagnostics.has_errors());
    assert!(diagnostics
        .errors()
        .any(|e| e.message.contains("timestep must be positive")));
}

#[test]
fn test_zero_window_dimension() {
    let scenario = parse_scenario("window 0 x 600\nsimulate dt = 0.1\n").unwrap();
    assert!(analyze_scenario(&scenario).has_errors());
}

#[test]
fn test_duplicate_particle_name() {
    let source = r#"
particle a at (0, 0) radius 1 mass 1
particle a at (10, 0) radius 1 mass 1
simulate dt = 0.1
"#;
    let scenario = parse_scenario(source).unwrap();
    let diagnostics = analyze_scenario(&scenario);
    assert!(diagnostics
        .errors()
        .any(|e| e.message.contains("duplicate particle name 'a'")));
}

#[test]
fn test_initial_overlap_is_only_a_warning() {
    let source = r#"
particle a at (0, 0) radius 2 mass 1
particle b at (3, 0) radius 2 mass 1
simulate dt = 0.1
"#;
    let (_, diagnostics) = build_simulation_context_from_source(source).unwrap();
    assert!(!diagnostics.has_errors());
    let warnings: Vec<_> = diagnostics.warnings().collect();
    assert_eq!(warnings.len(), 1);
    assert!(warnings[0].message.contains("'a' and 'b' overlap"));
}

#[test]
fn test_errors_abort_context_build() {
    let source = "particle a at (0, 0) radius -1 mass 1\nsimulate dt = 0.1\n";
    let err = build_simulation_context_from_source(source).unwrap_err();
    match err {
        ScenarioError::Analysis(diagnostics) => assert!(diagnostics.has_errors()),
        other => panic!("expected analysis error, got {:?}", other),
    }
}

#[test]
fn test_analysis_errors_name_their_source_line() {
    let source = "simulate dt = 0.1\n\nparticle a at (0, 0) radius -1 mass 1\n";
    let err = build_simulation_context_from_source(source).unwrap_err();

    let formatted = format_scenario_error(&err, source);
    assert!(formatted.contains("particle 'a' radius must be positive"));
    assert!(
        formatted.contains("at line 3: particle a at (0, 0) radius -1 mass 1"),
        "missing line context in: {}",
        formatted
    );
    assert!(!formatted.contains("Runtime error"));
}

#[test]
fn test_timestep_error_points_at_simulate_line() {
    let source = "particle a at (0, 0) radius 1 mass 1\nsimulate dt = -0.5\n";
    let scenario = parse_scenario(source).unwrap();
    let formatted = format_diagnostics(&analyze_scenario(&scenario), source);
    assert!(formatted.contains("timestep must be positive"));
    assert!(formatted.contains("at line 2: simulate dt = -0.5"));
}
