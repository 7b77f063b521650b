use mathcheck_core::{MetricScores, Step, VerifiedStep};

#[test]
fn step_without_logprob_defaults_to_negative_infinity() {
    let step: Step = serde_json::from_str(r#"{"text": "Step 1: x = 1"}"#).expect("deserialize");
    assert_eq!(step.text, "Step 1: x = 1");
    assert!(step.logprob.is_infinite() && step.logprob.is_sign_negative());
}

#[test]
fn verified_step_confidence_is_exp_logprob() {
    let step = Step::new("Step 2: x = 5", -0.5);
    let verified = VerifiedStep::from_step(&step);
    assert_eq!(verified.content, step.text);
    assert_eq!(verified.confidence, (-0.5f64).exp());
    assert_eq!(verified.logprob, -0.5);
}

#[test]
fn metric_scores_use_upper_case_keys() {
    let scores = MetricScores {
        ee: 1.0,
        ass: 0.5,
        tsa: 0.25,
    };
    let json = serde_json::to_value(scores).expect("serialize");
    assert_eq!(json["EE"], 1.0);
    assert_eq!(json["ASS"], 0.5);
    assert_eq!(json["TSA"], 0.25);
    let decoded: MetricScores = serde_json::from_value(json).expect("deserialize");
    assert_eq!(decoded, scores);
}
