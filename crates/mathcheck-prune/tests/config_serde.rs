use mathcheck_prune::{AtomicPolicy, VerificationConfig};

#[test]
fn missing_fields_take_defaults() {
    let config: VerificationConfig = serde_yaml::from_str("logprob_threshold: -2.0\n").unwrap();
    assert_eq!(config.logprob_threshold, -2.0);
    assert!(config.atomic_check_enabled);
    assert!(config.logical_check_enabled);
    assert_eq!(config.atomic_policy, AtomicPolicy::Advisory);

    let empty: VerificationConfig = serde_yaml::from_str("{}").unwrap();
    assert_eq!(empty, VerificationConfig::default());
}

#[test]
fn policy_uses_snake_case_names() {
    let config: VerificationConfig = serde_yaml::from_str("atomic_policy: strict\n").unwrap();
    assert_eq!(config.atomic_policy, AtomicPolicy::Strict);
    assert!(serde_yaml::from_str::<VerificationConfig>("atomic_policy: Strict\n").is_err());
}
