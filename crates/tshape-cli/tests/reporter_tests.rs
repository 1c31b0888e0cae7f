use crate::driver::{CheckMode, CheckOutcome, PropertySummary, ShapeSummary};
use crate::reporter::{Reporter, to_json};
use tshape_common::{Diagnostic, diagnostic_codes};

fn excess_colour() -> Diagnostic {
    Diagnostic::from_code(diagnostic_codes::EXCESS_PROPERTY, &["colour", "SquareConfig"])
        .with_property("colour")
        .in_file("typo.json")
}

fn rejected(diagnostics: Vec<Diagnostic>) -> CheckOutcome {
    CheckOutcome {
        target: "SquareConfig".to_string(),
        candidate: "typo.json".to_string(),
        mode: CheckMode::Literal,
        accepted: diagnostics.is_empty(),
        diagnostics,
    }
}

#[test]
fn formats_diagnostic_with_location_and_code() {
    let reporter = Reporter::new(false);
    assert_eq!(
        reporter.format_diagnostic(&excess_colour()),
        "typo.json:colour - error TS2353: Object literal may only specify known properties, and 'colour' does not exist in type 'SquareConfig'."
    );
}

#[test]
fn formats_related_information() {
    let diag = Diagnostic::from_code(diagnostic_codes::TYPE_NOT_ASSIGNABLE, &["string", "number"])
        .with_property("output")
        .with_related(
            diagnostic_codes::EXPECTED_TYPE_FROM_PROPERTY,
            &["output", "Developer2 & Designer2"],
        );
    let text = Reporter::new(false).format_diagnostic(&diag);
    let lines: Vec<_> = text.lines().collect();
    assert_eq!(
        lines,
        [
            "<candidate>:output - error TS2322: Type 'string' is not assignable to type 'number'.",
            "  Related: The expected type comes from property 'output' which is declared here on type 'Developer2 & Designer2'",
        ]
    );
}

#[test]
fn renders_check_summary() {
    let reporter = Reporter::new(false);
    let one = reporter.render_check(&rejected(vec![excess_colour()]));
    assert!(one.ends_with("\n\nFound 1 error."));

    let two = reporter.render_check(&rejected(vec![excess_colour(), excess_colour()]));
    assert!(two.ends_with("Found 2 errors."));

    let ok = reporter.render_check(&rejected(Vec::new()));
    assert_eq!(ok, "typo.json is assignable to 'SquareConfig'.");
}

#[test]
fn renders_shape_properties() {
    let summary = ShapeSummary {
        name: "Developer2 & Designer2".to_string(),
        declaration: "{ output: number; developer(): void; }".to_string(),
        weak: false,
        index_signature: None,
        properties: vec![
            PropertySummary {
                name: "output".to_string(),
                ty: "number".to_string(),
                optional: false,
                readonly: false,
                method: false,
            },
            PropertySummary {
                name: "developer".to_string(),
                ty: "Function".to_string(),
                optional: false,
                readonly: false,
                method: true,
            },
        ],
    };
    assert_eq!(
        Reporter::new(false).render_shape(&summary),
        "type Developer2 & Designer2 = { output: number; developer(): void; }\n  output: number\n  developer: Function (method)"
    );
    assert_eq!(
        Reporter::new(false).render_list(std::slice::from_ref(&summary)),
        "Developer2 & Designer2: { output: number; developer(): void; }"
    );
}

#[test]
fn serializes_outcome_as_json() {
    let json = to_json(&rejected(vec![excess_colour()])).expect("serializable");
    let value: serde_json::Value = serde_json::from_str(&json).expect("valid json");
    assert_eq!(value["accepted"], false);
    assert_eq!(value["mode"], "literal");
    assert_eq!(value["diagnostics"][0]["code"], 2353);
    assert_eq!(value["diagnostics"][0]["property"], "colour");
    assert_eq!(value["diagnostics"][0]["file"], "typo.json");
}
