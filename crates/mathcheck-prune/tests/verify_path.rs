use mathcheck_core::Step;
use mathcheck_sym::SimplifyBudget;
use mathcheck_prune::{verify_path, AtomicPolicy, PathPruner, StopReason, VerificationConfig};
use proptest::prelude::*;

fn path(steps: &[(&str, f64)]) -> Vec<Step> {
    steps
        .iter()
        .map(|(text, logprob)| Step::new(*text, *logprob))
        .collect()
}

#[test]
fn low_confidence_step_truncates_the_path() {
    let input = path(&[("Step 1: x=1", -0.1), ("Step 2: garble", -5.0)]);
    let verified = verify_path(&input, &VerificationConfig::default());
    assert_eq!(verified.len(), 1);
    assert_eq!(verified[0].content, "Step 1: x=1");
    assert_eq!(verified[0].logprob, -0.1);
    assert!((verified[0].confidence - (-0.1f64).exp()).abs() < 1e-12);
}

#[test]
fn steps_after_the_stop_are_discarded() {
    let input = path(&[
        ("Step 1: 2x = 4", -0.2),
        ("Step 2: x = 2", -3.0),
        ("Step 3: x = 2", -0.1),
    ]);
    let trace = PathPruner::default().verify_path_traced(&input);
    assert_eq!(trace.verified.len(), 1);
    assert_eq!(trace.stopped_at, Some(1));
    assert_eq!(trace.reason, Some(StopReason::LowConfidence));
}

#[test]
fn threshold_is_inclusive_and_nan_fails() {
    let input = path(&[("Step 1: 1", -1.5), ("Step 2: 2", f64::NAN)]);
    let trace = PathPruner::default().verify_path_traced(&input);
    assert_eq!(trace.verified.len(), 1);
    assert_eq!(trace.stopped_at, Some(1));
}

#[test]
fn missing_logprob_is_rejected_by_the_logical_gate() {
    let step: Step = serde_json::from_str(r#"{"text": "Step 1: x = 1"}"#).unwrap();
    assert!(verify_path(&[step], &VerificationConfig::default()).is_empty());
}

#[test]
fn advisory_policy_keeps_unparsable_steps() {
    let input = path(&[("So we get 50% more", -0.1), ("Step 2: x = 2", -0.2)]);
    let pruner = PathPruner::default();
    assert!(!pruner.atomic_check("So we get 50% more"));
    assert_eq!(pruner.verify_path(&input).len(), 2);
}

#[test]
fn strict_policy_stops_at_unparsable_steps() {
    let config = VerificationConfig {
        atomic_policy: AtomicPolicy::Strict,
        ..VerificationConfig::default()
    };
    let input = path(&[("Step 1: x + 1 = 2", -0.1), ("x + = 2", -0.1)]);
    let trace = PathPruner::new(config).verify_path_traced(&input);
    assert_eq!(trace.verified.len(), 1);
    assert_eq!(trace.reason, Some(StopReason::AtomicCheck));
}

#[test]
fn atomic_check_parses_under_the_configured_budget() {
    let config = VerificationConfig {
        atomic_policy: AtomicPolicy::Strict,
        ..VerificationConfig::default()
    };
    let input = path(&[("Step 1: a + b + c + d + e = 1", -0.1)]);
    assert_eq!(PathPruner::new(config.clone()).verify_path(&input).len(), 1);

    let tight = SimplifyBudget {
        max_depth: 2,
        ..SimplifyBudget::default()
    };
    let pruner = PathPruner::with_budget(config, tight);
    assert!(!pruner.atomic_check("Step 1: a + b + c + d + e = 1"));
    let trace = pruner.verify_path_traced(&input);
    assert!(trace.verified.is_empty());
    assert_eq!(trace.stopped_at, Some(0));
    assert_eq!(trace.reason, Some(StopReason::AtomicCheck));
}

#[test]
fn narration_only_steps_pass_the_atomic_check() {
    let pruner = PathPruner::default();
    assert!(pruner.atomic_check("Step"));
    assert!(pruner.atomic_check("  SOLVE step  "));
    assert!(pruner.atomic_check("Step 3: 2x + 1 = 7"));
}

#[test]
fn disabled_logical_check_keeps_everything() {
    let config = VerificationConfig {
        logical_check_enabled: false,
        ..VerificationConfig::default()
    };
    let input = path(&[("Step 1: 1", -10.0), ("Step 2: 2", f64::NEG_INFINITY)]);
    let verified = verify_path(&input, &config);
    assert_eq!(verified.len(), 2);
    assert_eq!(verified[1].confidence, 0.0);
}

#[test]
fn empty_paths_are_rejected_and_order_is_kept() {
    let paths = vec![
        path(&[("Step 1: x = 1", -9.0)]),
        path(&[("Step 1: x = 1", -0.1)]),
        Vec::new(),
        path(&[("Step 1: y = 2", -0.3), ("Step 2: y = 2", -0.4)]),
    ];
    let selection = PathPruner::default().verify_paths(&paths);
    assert_eq!(selection.retained_indices, vec![1, 3]);
    assert_eq!(selection.rejected, vec![0, 2]);
    assert_eq!(selection.retained[1].len(), 2);
}

#[test]
fn repeated_verification_is_stable() {
    let input = path(&[("Step 1: 3x = 9", -0.3), ("Step 2: x = 3", -0.2), ("Step 3: ?", -2.0)]);
    let config = VerificationConfig::default();
    let first = verify_path(&input, &config);
    assert_eq!(first, verify_path(&input, &config));
    assert_eq!(first.len(), 2);
}

proptest! {
    #[test]
    fn confident_paths_survive_intact(logprobs in proptest::collection::vec(-1.5f64..0.0, 0..12)) {
        let input: Vec<Step> = logprobs
            .iter()
            .enumerate()
            .map(|(idx, lp)| Step::new(format!("Step {idx}: x = {idx}"), *lp))
            .collect();
        let verified = verify_path(&input, &VerificationConfig::default());
        prop_assert_eq!(verified.len(), input.len());
        for (step, out) in input.iter().zip(&verified) {
            prop_assert_eq!(&out.content, &step.text);
            prop_assert_eq!(out.confidence, step.logprob.exp());
        }
    }

    #[test]
    fn output_is_a_prefix(logprobs in proptest::collection::vec(-4.0f64..0.0, 0..12)) {
        let input: Vec<Step> = logprobs.iter().map(|lp| Step::new("Step: 1", *lp)).collect();
        let verified = verify_path(&input, &VerificationConfig::default());
        let expected = logprobs.iter().take_while(|lp| **lp >= -1.5).count();
        prop_assert_eq!(verified.len(), expected);
    }
}
