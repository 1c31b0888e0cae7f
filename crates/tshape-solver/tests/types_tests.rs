use super::*;

fn square_config() -> Shape {
    Shape::builder("SquareConfig")
        .optional("color", ShapeType::STRING)
        .optional("width", ShapeType::NUMBER)
        .build()
        .expect("valid shape")
}

#[test]
fn test_union_flattens_and_dedups() {
    let inner = ShapeType::union([ShapeType::STRING, ShapeType::NUMBER]);
    let outer = ShapeType::union([ShapeType::NUMBER, inner, ShapeType::STRING]);
    assert_eq!(outer.members().len(), 2);
    assert!(outer.contains_intrinsic(IntrinsicKind::String));
    assert!(outer.contains_intrinsic(IntrinsicKind::Number));
}

#[test]
fn test_union_is_order_independent() {
    let a = ShapeType::union([ShapeType::STRING, ShapeType::NUMBER]);
    let b = ShapeType::union([ShapeType::NUMBER, ShapeType::STRING]);
    assert_eq!(a, b);
}

#[test]
fn test_union_collapses_degenerate_cases() {
    assert_eq!(ShapeType::union([]), ShapeType::Never);
    assert_eq!(ShapeType::union([ShapeType::NUMBER]), ShapeType::NUMBER);
    assert_eq!(
        ShapeType::union([ShapeType::NUMBER, ShapeType::Never]),
        ShapeType::NUMBER
    );
    assert_eq!(
        ShapeType::union([ShapeType::NUMBER, ShapeType::Any]),
        ShapeType::Any
    );
}

#[test]
fn test_members_of_non_union() {
    assert_eq!(ShapeType::BOOLEAN.members(), &[ShapeType::BOOLEAN]);
    assert!(ShapeType::Never.is_never());
    assert!(ShapeType::Any.is_any());
}

#[test]
fn test_builder_records_flags() {
    let shape = Shape::builder("Developer")
        .required("name", ShapeType::STRING)
        .method("code")
        .property(PropertyInfo::new(
            "id",
            ShapeType::NUMBER,
            PropertyFlags::READONLY | PropertyFlags::OPTIONAL,
        ))
        .build()
        .expect("valid shape");

    assert_eq!(shape.len(), 3);
    let code = shape.property("code").expect("code declared");
    assert!(code.is_method());
    assert!(!code.optional());
    let id = shape.property("id").expect("id declared");
    assert!(id.readonly());
    assert!(id.optional());
    let required: Vec<_> = shape.required_properties().map(|p| &*p.name).collect();
    assert_eq!(required, ["name", "code"]);
}

#[test]
fn test_builder_rejects_duplicate_property() {
    let err = Shape::builder("Point")
        .required("x", ShapeType::NUMBER)
        .required("x", ShapeType::STRING)
        .build()
        .unwrap_err();
    assert!(matches!(
        err,
        DeclarationError::DuplicateProperty { ref shape, ref property } if shape == "Point" && property == "x"
    ));
}

#[test]
fn test_weak_shape_detection() {
    assert!(square_config().is_weak());

    let with_required = Shape::builder("Label")
        .required("label", ShapeType::STRING)
        .optional("size", ShapeType::NUMBER)
        .build()
        .expect("valid shape");
    assert!(!with_required.is_weak());

    let indexed = Shape::builder("Bag")
        .optional("color", ShapeType::STRING)
        .index_signature(ShapeType::Any)
        .build()
        .expect("valid shape");
    assert!(!indexed.is_weak());

    let empty = Shape::anonymous().build().expect("valid shape");
    assert!(!empty.is_weak());
    assert!(empty.is_empty());
}

#[test]
fn test_shape_equality_ignores_name_and_order() {
    let a = square_config();
    let b = Shape::builder("Other")
        .optional("width", ShapeType::NUMBER)
        .optional("color", ShapeType::STRING)
        .build()
        .expect("valid shape");
    assert_eq!(a, b);

    let c = Shape::builder("SquareConfig")
        .required("color", ShapeType::STRING)
        .optional("width", ShapeType::NUMBER)
        .build()
        .expect("valid shape");
    assert_ne!(a, c);
}

#[test]
fn test_display_name_expands_anonymous_shapes() {
    assert_eq!(square_config().display_name(), "SquareConfig");
    let inline = Shape::anonymous()
        .required("message", ShapeType::STRING)
        .build()
        .expect("valid shape");
    assert_eq!(inline.display_name(), "{ message: string; }");
}

#[test]
fn test_renamed_keeps_structure() {
    let renamed = square_config().renamed("Config");
    assert_eq!(renamed.name(), "Config");
    assert_eq!(renamed, square_config());
}

#[test]
fn test_readonly_index_signature() {
    let shape = Shape::builder("Dict")
        .readonly_index_signature(ShapeType::STRING)
        .build()
        .expect("valid shape");
    let index = shape.index_signature().expect("index signature");
    assert!(index.readonly);
    assert_eq!(index.value_type, ShapeType::STRING);
    assert!(!IndexSignature::new(ShapeType::Any).readonly);
}
