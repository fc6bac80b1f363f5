//! Property-based tests for value validation

use super::*;
use crate::field::Hyperparam;
use crate::schema::Schema;
use crate::value::HpValue;
use proptest::prelude::*;

fn arb_value() -> impl Strategy<Value = HpValue> {
    prop_oneof![
        Just(HpValue::Null),
        any::<bool>().prop_map(HpValue::Bool),
        any::<i64>().prop_map(HpValue::Int),
        (-1e6f64..1e6).prop_map(HpValue::Float),
        "[a-z]{0,8}".prop_map(HpValue::Str),
    ]
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(200))]

    #[test]
    fn prop_accepted_values_are_instances(value in arb_value()) {
        let schema = Schema::builder("Any")
            .field::<i64>("i", Hyperparam::new("int").default(0))
            .field::<f64>("f", Hyperparam::new("float").default(0.0))
            .field::<String>("s", Hyperparam::new("str").default(""))
            .field::<bool>("b", Hyperparam::new("bool").default(false))
            .build()
            .unwrap();
        for field in schema.fields() {
            if let Ok(stored) = validate_value(field, &value) {
                prop_assert!(field.field_type.is_instance(&stored));
            }
        }
    }

    #[test]
    fn prop_choices_membership(pick in 0usize..5, outsider in 100i64..1000) {
        let choices = [1i64, 3, 5, 7, 9];
        let schema = Schema::builder("Choices")
            .field::<i64>("k", Hyperparam::new("k").default(5).choices(choices))
            .build()
            .unwrap();
        let field = schema.field("k").unwrap();
        prop_assert!(validate_value(field, &HpValue::Int(choices[pick])).is_ok());
        prop_assert!(validate_value(field, &HpValue::Int(outsider)).is_err());
    }

    #[test]
    fn prop_every_bad_field_reported(n_bad in 1usize..4) {
        let schema = Schema::builder("Wide")
            .field::<i64>("a", Hyperparam::new("a").default(0))
            .field::<i64>("b", Hyperparam::new("b").default(0))
            .field::<i64>("c", Hyperparam::new("c").default(0))
            .build()
            .unwrap();
        let bad = HpValue::from("oops");
        let good = HpValue::Int(1);
        let names = ["a", "b", "c"];
        let batch: Vec<(&str, &HpValue)> = names
            .iter()
            .enumerate()
            .map(|(i, n)| (*n, if i < n_bad { &bad } else { &good }))
            .collect();
        let err = validate_assignments(&schema, batch).unwrap_err();
        prop_assert_eq!(err.errors.len(), n_bad);
    }
}
