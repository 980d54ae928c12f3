//! Verify field validation against JSON test vectors stored in `test-vectors/`.
//!
//! Each case names a field path, a raw input value, and the message expected
//! for it (`null` when the value is valid).

use profile_form::{FieldPath, ValidationEngine};

#[test]
fn validation_test_vectors() {
    let raw = include_str!("../../test-vectors/validation.json");
    let vectors: serde_json::Value = serde_json::from_str(raw).unwrap();

    let engine = ValidationEngine::profile();
    for case in vectors["cases"].as_array().unwrap() {
        let name = case["name"].as_str().unwrap();
        let path = FieldPath::parse(case["path"].as_str().unwrap()).unwrap();
        let value = case["value"].as_str().unwrap();
        let expected = case["expected_error"].as_str();

        let actual = engine.validate(&path, value);
        assert_eq!(actual.as_deref(), expected, "{name}");
    }
}
