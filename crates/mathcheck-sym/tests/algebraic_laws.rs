use mathcheck_sym::{SimplifyBudget, Term};
use proptest::prelude::*;

fn small_poly() -> impl Strategy<Value = String> {
    let atom = prop_oneof![
        (-9i32..10).prop_map(|n| format!("({n})")),
        Just("x".to_string()),
        Just("y".to_string()),
        Just("sqrt(2)".to_string()),
    ];
    atom.prop_recursive(3, 12, 2, |inner| {
        prop_oneof![
            (inner.clone(), inner.clone()).prop_map(|(a, b)| format!("({a} + {b})")),
            (inner.clone(), inner.clone()).prop_map(|(a, b)| format!("({a} - {b})")),
            (inner.clone(), inner).prop_map(|(a, b)| format!("({a})*({b})")),
        ]
    })
}

fn equivalent(lhs: &str, rhs: &str) -> bool {
    let budget = SimplifyBudget::default();
    let lhs = Term::parse(lhs, &budget).unwrap();
    let rhs = Term::parse(rhs, &budget).unwrap();
    lhs.sub(&rhs).is_zero(&budget).unwrap()
}

proptest! {
    #[test]
    fn addition_commutes(a in small_poly(), b in small_poly()) {
        let lhs = format!("{a} + {b}");
        let rhs = format!("{b} + {a}");
        prop_assert!(equivalent(&lhs, &rhs));
    }

    #[test]
    fn multiplication_distributes(a in small_poly(), b in small_poly(), c in small_poly()) {
        let lhs = format!("({a})*({b} + {c})");
        let rhs = format!("({a})*({b}) + ({a})*({c})");
        prop_assert!(equivalent(&lhs, &rhs));
    }

    #[test]
    fn simplification_is_idempotent(a in small_poly()) {
        let budget = SimplifyBudget::default();
        let once = Term::parse(&a, &budget).unwrap().simplify(&budget).unwrap();
        let twice = once.simplify(&budget).unwrap();
        prop_assert_eq!(once.to_string(), twice.to_string());
    }

    #[test]
    fn simplified_form_is_equivalent(a in small_poly()) {
        let budget = SimplifyBudget::default();
        let simplified = Term::parse(&a, &budget).unwrap().simplify(&budget).unwrap();
        prop_assert!(equivalent(&a, &simplified.to_string()));
    }
}
