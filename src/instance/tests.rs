//! Tests for construction, update and diff

use super::*;
use crate::error::FieldErrorKind;
use crate::field::Hyperparam;
use approx::assert_relative_eq;

fn update_schema() -> Arc<Schema> {
    Schema::builder("TestHyperparams")
        .field::<String>("field1", Hyperparam::new("First field").default("value"))
        .field::<i64>("field2", Hyperparam::new("Violating field").default(5))
        .field::<f64>("field3", Hyperparam::new("Other violating field").default(0.9))
        .build()
        .unwrap()
}

fn assert_untouched(p: &Hyperparams) {
    assert_eq!(p.get::<String>("field1").as_deref(), Some("value"));
    assert_eq!(p.get::<i64>("field2"), Some(5));
    assert_relative_eq!(p.get::<f64>("field3").unwrap(), 0.9);
}

// -------------------------------------------------------------------------
// Construction
// -------------------------------------------------------------------------

#[test]
fn test_defaults_applied() {
    let p = Hyperparams::with_defaults(&update_schema()).unwrap();
    assert_untouched(&p);
    let names: Vec<&str> = p.iter().map(|(n, _)| n).collect();
    assert_eq!(names, vec!["field1", "field2", "field3"]);
}

#[test]
fn test_construction_validates_every_field() {
    let err = Hyperparams::new(
        &update_schema(),
        [("field2", HpValue::from("hi")), ("field3", HpValue::from("x"))],
    )
    .unwrap_err();
    assert_eq!(err.fields(), vec!["field2", "field3"]);
}

#[test]
fn test_construction_reports_missing_required() {
    let schema = Schema::builder("Req")
        .field::<String>("field4", Hyperparam::new("Required field"))
        .field::<bool>("do_train", Hyperparam::new("Whether should train the model"))
        .field::<i64>("epochs", Hyperparam::new("Number of epochs").default(7))
        .build()
        .unwrap();
    let err = Hyperparams::with_defaults(&schema).unwrap_err();
    assert_eq!(err.fields(), vec!["field4", "do_train"]);
    assert!(err.errors.iter().all(|e| e.kind == FieldErrorKind::Missing));

    let p = Hyperparams::new(
        &schema,
        [("field4", HpValue::from("v")), ("do_train", HpValue::Bool(true))],
    )
    .unwrap();
    assert_eq!(p.get::<bool>("do_train"), Some(true));
    assert_eq!(p.get::<i64>("epochs"), Some(7));
}

#[test]
fn test_construction_rejects_unknown_field() {
    let err = Hyperparams::new(&update_schema(), [("nope", 1)]).unwrap_err();
    assert!(err.has_unknown_field());
}

#[test]
fn test_nullable_field_defaults_to_null() {
    let schema = Schema::builder("Nullable")
        .field::<Option<String>>("tag", Hyperparam::new("Run tag").default(HpValue::Null))
        .build()
        .unwrap();
    let p = Hyperparams::with_defaults(&schema).unwrap();
    assert_eq!(p.get_value("tag"), Some(&HpValue::Null));
    assert_eq!(p.get::<Option<String>>("tag"), Some(None));
}

// -------------------------------------------------------------------------
// Assignment
// -------------------------------------------------------------------------

#[test]
fn test_set_validates() {
    let mut p = Hyperparams::with_defaults(&update_schema()).unwrap();
    p.set("field2", 8).unwrap();
    assert_eq!(p.get::<i64>("field2"), Some(8));

    let err = p.set("field2", "eight").unwrap_err();
    assert_eq!(err.errors[0].field, "field2");
    assert_eq!(p.get::<i64>("field2"), Some(8));

    let err = p.set("missing", 1).unwrap_err();
    assert!(err.has_unknown_field());
}

#[test]
fn test_set_widens_int_for_float_field() {
    let mut p = Hyperparams::with_defaults(&update_schema()).unwrap();
    p.set("field3", 2).unwrap();
    assert_eq!(p.get_value("field3"), Some(&HpValue::Float(2.0)));
}

// -------------------------------------------------------------------------
// Update: copy
// -------------------------------------------------------------------------

#[test]
fn test_updated_without_validation() {
    let p1 = Hyperparams::with_defaults(&update_schema()).unwrap();

    let p2 = p1
        .updated([("field2", HpValue::Int(7)), ("field3", HpValue::Float(2.3))], false)
        .unwrap();
    assert_untouched(&p1);
    assert_eq!(p2.get::<i64>("field2"), Some(7));
    assert_relative_eq!(p2.get::<f64>("field3").unwrap(), 2.3);

    let p2 = p1
        .updated([("field2", "hi"), ("field3", "x")], false)
        .unwrap();
    assert_untouched(&p1);
    assert_eq!(p2.get_value("field2"), Some(&HpValue::from("hi")));
    assert_eq!(p2.get_value("field3"), Some(&HpValue::from("x")));
    assert!(p2.validate().is_err());
}

#[test]
fn test_updated_with_validation() {
    let p1 = Hyperparams::with_defaults(&update_schema()).unwrap();

    let p2 = p1
        .updated([("field2", HpValue::Int(7)), ("field3", HpValue::Float(2.3))], true)
        .unwrap();
    assert_untouched(&p1);
    assert_eq!(p2.get::<String>("field1").as_deref(), Some("value"));
    assert_eq!(p2.get::<i64>("field2"), Some(7));

    let err = p1.updated([("field2", "hi"), ("field3", "x")], true).unwrap_err();
    assert_eq!(err.fields(), vec!["field2", "field3"]);

    let err = p1.updated([("field3", "x")], true).unwrap_err();
    assert_eq!(err.fields(), vec!["field3"]);
    assert_untouched(&p1);
}

#[test]
fn test_updated_unknown_key() {
    let p1 = Hyperparams::with_defaults(&update_schema()).unwrap();
    let p2 = p1.updated([("ghost", 1)], false).unwrap();
    assert_eq!(p1, p2);

    let err = p1.updated([("ghost", 1)], true).unwrap_err();
    assert!(err.has_unknown_field());
}

// -------------------------------------------------------------------------
// Update: in place
// -------------------------------------------------------------------------

#[test]
fn test_update_in_place_without_validation() {
    let mut p1 = Hyperparams::with_defaults(&update_schema()).unwrap();
    p1.update([("field2", HpValue::Int(7)), ("field3", HpValue::Float(2.3))], false)
        .unwrap();
    assert_eq!(p1.get::<i64>("field2"), Some(7));
    assert_relative_eq!(p1.get::<f64>("field3").unwrap(), 2.3);

    let mut p1 = Hyperparams::with_defaults(&update_schema()).unwrap();
    let p2 = p1.update([("field2", "hi"), ("field3", "x"), ("ghost", "y")], false).unwrap();
    assert_eq!(p2.get_value("field2"), Some(&HpValue::from("hi")));
    assert_eq!(p1.get_value("field3"), Some(&HpValue::from("x")));
    assert_eq!(p1.get::<String>("field1").as_deref(), Some("value"));
    assert!(p1.get_value("ghost").is_none());
}

#[test]
fn test_update_in_place_with_validation() {
    let mut p1 = Hyperparams::with_defaults(&update_schema()).unwrap();
    p1.update([("field2", HpValue::Int(7)), ("field3", HpValue::Float(2.3))], true)
        .unwrap();
    assert_eq!(p1.get::<i64>("field2"), Some(7));
    assert_relative_eq!(p1.get::<f64>("field3").unwrap(), 2.3);
}

#[test]
fn test_update_in_place_is_atomic() {
    let mut p1 = Hyperparams::with_defaults(&update_schema()).unwrap();

    let err = p1.update([("field2", "hi"), ("field3", "x")], true).unwrap_err();
    assert_eq!(err.fields(), vec!["field2", "field3"]);
    assert_untouched(&p1);

    let err = p1
        .update([("field2", HpValue::Int(9)), ("field3", HpValue::from("x"))], true)
        .unwrap_err();
    assert_eq!(err.fields(), vec!["field3"]);
    assert_untouched(&p1);
}

#[test]
fn test_empty_update_is_identity() {
    let mut p = Hyperparams::with_defaults(&update_schema()).unwrap();
    let before = p.clone();
    p.update(Vec::<(String, HpValue)>::new(), true).unwrap();
    assert_eq!(p, before);
}

#[test]
fn test_repeated_key_keeps_last_value() {
    let p = Hyperparams::with_defaults(&update_schema()).unwrap();
    let p2 = p.updated([("field2", 1), ("field2", 3)], true).unwrap();
    assert_eq!(p2.get::<i64>("field2"), Some(3));
}

// -------------------------------------------------------------------------
// Diff
// -------------------------------------------------------------------------

#[test]
fn test_diff_identical_is_empty() {
    let p1 = Hyperparams::with_defaults(&update_schema()).unwrap();
    let p2 = p1.clone();
    assert!(p1.diff(&p2).is_empty());
}

#[test]
fn test_diff_single_field() {
    let p1 = Hyperparams::with_defaults(&update_schema()).unwrap();
    let p2 = p1.updated([("field2", 6)], true).unwrap();
    let diff = p1.diff(&p2);
    assert_eq!(diff.len(), 1);
    assert_eq!(
        diff["field2"],
        (Some(HpValue::Int(5)), Some(HpValue::Int(6)))
    );
}

#[test]
fn test_diff_treats_nan_as_equal() {
    let p1 = Hyperparams::new(&update_schema(), [("field3", f64::NAN)]).unwrap();
    assert!(p1.diff(&p1.clone()).is_empty());
    assert_eq!(p1, p1.clone());

    let p2 = p1.updated([("field3", 1.0)], true).unwrap();
    assert_eq!(p1.diff(&p2).len(), 1);
}

#[test]
fn test_diff_covers_union_of_fields() {
    let base = update_schema();
    let extended = Schema::builder("Extended")
        .inherit(&base)
        .field::<bool>("verbose", Hyperparam::new("Verbose").default(false))
        .build()
        .unwrap();
    let p1 = Hyperparams::with_defaults(&base).unwrap();
    let p2 = Hyperparams::with_defaults(&extended).unwrap();

    let diff = p1.diff(&p2);
    assert_eq!(diff.len(), 1);
    assert_eq!(diff["verbose"], (None, Some(HpValue::Bool(false))));

    let diff = p2.diff(&p1);
    assert_eq!(diff["verbose"], (Some(HpValue::Bool(false)), None));
}

// -------------------------------------------------------------------------
// Rendering
// -------------------------------------------------------------------------

#[test]
fn test_json_indent_and_order() {
    let p = Hyperparams::with_defaults(&update_schema()).unwrap();
    let pretty = p.to_json().unwrap();
    assert_eq!(
        pretty,
        "{\n    \"field1\": \"value\",\n    \"field2\": 5,\n    \"field3\": 0.9\n}"
    );
    assert_eq!(
        p.to_json_with_indent(0).unwrap(),
        "{\"field1\":\"value\",\"field2\":5,\"field3\":0.9}"
    );
    assert!(p.to_json_with_indent(2).unwrap().contains("\n  \"field1\""));
    assert_eq!(p.to_string(), pretty);
}

#[test]
fn test_yaml_rendering() {
    let p = Hyperparams::with_defaults(&update_schema()).unwrap();
    let yaml = p.to_yaml().unwrap();
    let first = yaml.lines().next().unwrap();
    assert_eq!(first, "field1: value");
    assert!(yaml.contains("field2: 5"));
}
