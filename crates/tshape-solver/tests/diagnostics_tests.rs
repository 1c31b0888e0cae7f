use super::*;

fn excess(property: &str) -> ValidationError {
    ValidationError::ExcessProperty {
        property: property.to_string(),
        target: "SquareConfig".to_string(),
    }
}

#[test]
fn test_error_codes() {
    assert_eq!(excess("colour").code(), 2353);
    let missing = ValidationError::MissingRequiredProperty {
        property: "width".to_string(),
        source: "{ color: string; }".to_string(),
        target: "Square".to_string(),
    };
    assert_eq!(missing.code(), 2741);
    assert!(missing.is_missing_property());
    let weak = ValidationError::NoCommonProperties {
        source: "{ colour: string; }".to_string(),
        target: "SquareConfig".to_string(),
    };
    assert_eq!(weak.code(), 2559);
    assert_eq!(weak.property(), None);
}

#[test]
fn test_excess_property_message() {
    let error = excess("colour");
    assert!(error.is_excess_property());
    assert_eq!(
        error.to_string(),
        "Object literal may only specify known properties, and 'colour' does not exist in type 'SquareConfig'."
    );
    let diag = error.to_diagnostic();
    assert_eq!(diag.property.as_deref(), Some("colour"));
    assert!(diag.related_information.is_empty());
}

#[test]
fn test_type_mismatch_diagnostic_names_declaring_shape() {
    let error = ValidationError::TypeMismatch {
        property: "output".to_string(),
        expected: ShapeType::NUMBER,
        actual: ShapeType::STRING,
        declared_in: "Developer2 & Designer2".to_string(),
    };
    assert!(error.is_type_mismatch());
    let diag = error.to_diagnostic();
    assert_eq!(diag.code, 2322);
    assert_eq!(
        diag.message_text,
        "Type 'string' is not assignable to type 'number'."
    );
    assert_eq!(diag.related_information.len(), 1);
    assert_eq!(
        diag.related_information[0].message_text,
        "The expected type comes from property 'output' which is declared here on type 'Developer2 & Designer2'"
    );
}

#[test]
fn test_nested_paths_prefix_display() {
    let error = ValidationError::TypeMismatch {
        property: "error.message".to_string(),
        expected: ShapeType::STRING,
        actual: ShapeType::NUMBER,
        declared_in: "{ message: string; }".to_string(),
    };
    assert_eq!(
        error.to_string(),
        "error.message: Type 'number' is not assignable to type 'string'."
    );
    let related = &error.to_diagnostic().related_information[0];
    assert!(related.message_text.contains("property 'message'"));
}

#[test]
fn test_leaf_name() {
    assert_eq!(leaf_name("colour"), "colour");
    assert_eq!(leaf_name("error.message"), "message");
    assert_eq!(leaf_name("artworks[0].title"), "title");
    assert_eq!(leaf_name("artworks[1]"), "artworks");
}

#[test]
fn test_invalid_assertion_carries_reasons() {
    let error = ValidationError::InvalidAssertion {
        source: "{ width: string; }".to_string(),
        target: "SquareConfig".to_string(),
        reasons: vec![ValidationError::TypeMismatch {
            property: "width".to_string(),
            expected: ShapeType::NUMBER,
            actual: ShapeType::STRING,
            declared_in: "SquareConfig".to_string(),
        }],
    };
    let diag = error.to_diagnostic();
    assert_eq!(diag.code, 2352);
    assert!(diag.message_text.starts_with("Conversion of type '{ width: string; }'"));
    assert_eq!(diag.related_information.len(), 1);
    assert_eq!(diag.related_information[0].code, 2322);
}

#[test]
fn test_failure_queries() {
    let failure = ValidationFailure {
        target: "SquareConfig".to_string(),
        errors: vec![excess("colour")],
    };
    assert!(failure.has_excess_property("colour"));
    assert!(!failure.has_excess_property("width"));
    assert!(!failure.has_missing_property("colour"));
    assert!(!failure.has_type_mismatch("colour"));
    assert_eq!(failure.first(), Some(&excess("colour")));
    assert_eq!(failure.diagnostics().len(), 1);
    assert_eq!(
        failure.to_string(),
        "candidate is not assignable to 'SquareConfig' (1 error(s))"
    );
}

#[test]
fn test_fast_tracer_never_builds_errors() {
    let mut tracer = FastTracer::new();
    assert!(!tracer.is_aborted());
    let keep_going = tracer.on_failure(ValidationPhase::MissingProperties, || {
        panic!("fast tracer must not build errors")
    });
    assert!(!keep_going);
    assert!(tracer.failed());
    assert!(tracer.is_aborted());
}

#[test]
fn test_per_phase_policy() {
    let mut tracer = DiagnosticTracer::new(ReportPolicy::PerPhase);
    assert!(!tracer.on_failure(ValidationPhase::Properties, || excess("colour")));
    assert!(!tracer.is_aborted());
    assert!(tracer.on_failure(ValidationPhase::MissingProperties, || excess("a")));
    assert!(tracer.on_failure(ValidationPhase::MissingProperties, || excess("b")));
    assert_eq!(tracer.errors().len(), 3);
}

#[test]
fn test_exhaustive_and_first_error_policies() {
    let mut all = DiagnosticTracer::new(ReportPolicy::Exhaustive);
    assert!(all.on_failure(ValidationPhase::Properties, || excess("a")));
    assert!(all.on_failure(ValidationPhase::Properties, || excess("b")));
    assert_eq!(all.into_errors().len(), 2);

    let mut first = DiagnosticTracer::new(ReportPolicy::FirstError);
    assert!(!first.on_failure(ValidationPhase::MissingProperties, || excess("a")));
    assert!(first.is_aborted());
    assert!(first.has_errors());
}

#[test]
fn test_diagnostic_tracer_caps_errors() {
    let mut tracer = DiagnosticTracer::new(ReportPolicy::Exhaustive);
    for _ in 0..MAX_ERRORS_PER_VALIDATION {
        assert!(tracer.on_failure(ValidationPhase::Properties, || excess("x")));
    }
    assert!(!tracer.on_failure(ValidationPhase::Properties, || excess("y")));
    assert!(tracer.is_aborted());
    assert_eq!(tracer.errors().len(), MAX_ERRORS_PER_VALIDATION);
}
