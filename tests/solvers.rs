use share_picker::bruteforce::BruteForce;
use share_picker::knapsack::Knapsack;
use share_picker::{OptimizationResult, Share, Solver};

fn solvers() -> Vec<Box<dyn Solver>> {
    vec![
        Box::new(BruteForce::default()),
        Box::new(Knapsack::default()),
        Box::new(Knapsack {
            resolution: 1,
            ..Knapsack::default()
        }),
    ]
}

fn abc() -> Vec<Share> {
    vec![
        Share::new("A", 100.0, 10.0),
        Share::new("B", 200.0, 15.0),
        Share::new("C", 300.0, 8.0),
    ]
}

fn sorted_labels(result: &OptimizationResult) -> Vec<String> {
    let mut labels: Vec<_> = result.selection.iter().map(|s| s.label.clone()).collect();
    labels.sort();
    labels
}

#[test]
fn a_and_b_beat_c() {
    for solver in solvers() {
        let result = solver.solve(&abc(), 300.0).unwrap();
        assert_eq!(sorted_labels(&result), vec!["A", "B"], "{}", solver.name());
        assert!((result.total_profit - 40.0).abs() < 1e-9, "{}", solver.name());
        assert!(result.total_cost() <= 300.0);
    }
}

#[test]
fn empty_input() {
    for solver in solvers() {
        for budget in [0.0, 1.0, 500.0] {
            assert_eq!(solver.solve(&[], budget).unwrap(), OptimizationResult::empty());
        }
    }
}

#[test]
fn zero_budget() {
    for solver in solvers() {
        assert_eq!(solver.solve(&abc(), 0.0).unwrap(), OptimizationResult::empty());
    }
}

#[test]
fn whole_set_when_budget_covers_everything() {
    for solver in solvers() {
        let result = solver.solve(&abc(), 600.0).unwrap();
        assert_eq!(sorted_labels(&result), vec!["A", "B", "C"], "{}", solver.name());
        assert!((result.total_profit - 64.0).abs() < 1e-9);
    }
}

#[test]
fn solvers_are_interchangeable_behind_the_trait() {
    let shares = abc();
    let profits: Vec<f64> = solvers()
        .iter()
        .map(|s| s.solve(&shares, 450.0).unwrap().total_profit)
        .collect();
    for profit in &profits {
        assert!((profit - profits[0]).abs() < 1e-9);
    }
}

#[test]
fn cent_amounts_that_overflow_in_f64_are_skipped() {
    let shares = vec![Share::new("A", 0.1, 10.0), Share::new("B", 0.2, 10.0)];
    let exact = BruteForce::default().solve(&shares, 0.3).unwrap();
    for solver in solvers() {
        let result = solver.solve(&shares, 0.3).unwrap();
        assert!(result.total_cost() <= 0.3, "{}", solver.name());
    }
    // the cent grid matches the exhaustive answer; a whole-unit grid rounds 0.3 down to nothing
    let table = Knapsack::default().solve(&shares, 0.3).unwrap();
    assert_eq!(table.selection, exact.selection);
    assert!((table.total_profit - exact.total_profit).abs() < 1e-12);
}

#[test]
fn empty_input_with_huge_budget() {
    for solver in solvers() {
        assert_eq!(solver.solve(&[], 1e7).unwrap(), OptimizationResult::empty());
    }
}
