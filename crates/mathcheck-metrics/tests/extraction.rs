use mathcheck_metrics::consistency::substitution_symbol;
use mathcheck_metrics::extract::{extract_step, math_part};
use mathcheck_metrics::{extract_steps, GroundTruth};
use mathcheck_sym::{Expression, SimplifyBudget};

#[test]
fn label_before_last_colon_is_dropped() {
    assert_eq!(math_part("Step 1: x + 1 = 2"), "x + 1 = 2");
    assert_eq!(math_part("Note: ratio 3:4"), "4");
    assert_eq!(math_part("  7  "), "7");
}

#[test]
fn prose_lines_are_skipped_and_blank_lines_ignored() {
    let budget = SimplifyBudget::default();
    let steps = extract_steps("Let's begin.\n\nStep 1: 2x = 4\n   \nStep 2: x = 2\n", &budget);
    assert_eq!(steps.len(), 2);
    assert_eq!(steps[0].text, "Step 1: 2x = 4");
    assert!(steps.iter().all(|step| step.is_parseable()));
    assert!(extract_step("no numbers here", &budget).is_none());
}

#[test]
fn failed_parse_keeps_the_line() {
    let budget = SimplifyBudget::default();
    let step = extract_step("Step 4: 50% of the total", &budget).unwrap();
    assert!(step.expression.is_none());
    assert_eq!(step.text, "Step 4: 50% of the total");
}

#[test]
fn first_equals_sign_splits_the_equation() {
    let budget = SimplifyBudget::default();
    let step = extract_step("Step 1: 2x + 3 = 7", &budget).unwrap();
    assert!(matches!(step.expression, Some(Expression::Equation { .. })));
    let chained = extract_step("Step 2: x = 2 = 2", &budget).unwrap();
    assert!(chained.expression.is_none());
}

#[test]
fn ground_truth_pins_its_symbol() {
    let budget = SimplifyBudget::default();
    let pinned = GroundTruth::parse("y = 3", &budget).unwrap();
    assert_eq!(pinned.target.as_deref(), Some("y"));
    let plain = GroundTruth::parse("3", &budget).unwrap();
    assert!(plain.target.is_none());
    assert!(GroundTruth::parse("x + 1 = 3", &budget).is_none());

    let expr = Expression::parse("y + x = 5", &budget).unwrap();
    assert_eq!(substitution_symbol(&expr, &plain).as_deref(), Some("x"));
    assert_eq!(substitution_symbol(&expr, &pinned).as_deref(), Some("y"));
}

#[test]
fn pinned_symbol_drives_consistency() {
    let budget = SimplifyBudget::default();
    let truth = GroundTruth::parse("y = 2", &budget).unwrap();
    let expr = Expression::parse("x + y = x + 2", &budget).unwrap();
    let verdict = mathcheck_metrics::check_consistency(&expr, Some(&truth), &budget);
    assert!(verdict.is_consistent());
}
