use super::*;

fn error_handling() -> Shape {
    let error = Shape::anonymous()
        .required("message", ShapeType::STRING)
        .build()
        .expect("valid shape");
    Shape::builder("ErrorHandling")
        .required("success", ShapeType::BOOLEAN)
        .optional("error", ShapeType::object(error))
        .build()
        .expect("valid shape")
}

fn artworks_data() -> Shape {
    let artwork = Shape::anonymous()
        .required("title", ShapeType::STRING)
        .build()
        .expect("valid shape");
    Shape::builder("ArtworksData")
        .required("artworks", ShapeType::array(ShapeType::object(artwork)))
        .build()
        .expect("valid shape")
}

fn developer2() -> Shape {
    Shape::builder("Developer2")
        .required("output", ShapeType::NUMBER)
        .method("code")
        .build()
        .expect("valid shape")
}

fn designer2() -> Shape {
    Shape::builder("Designer2")
        .required(
            "output",
            ShapeType::union([ShapeType::STRING, ShapeType::NUMBER]),
        )
        .method("design")
        .build()
        .expect("valid shape")
}

#[test]
fn test_intersection_has_union_of_properties() {
    let response = intersect(&artworks_data(), &error_handling());
    assert_eq!(response.name(), "ArtworksData & ErrorHandling");
    let names: Vec<_> = response.properties().map(|p| &*p.name).collect();
    assert_eq!(names, ["artworks", "success", "error"]);
    assert!(response.property("error").expect("error").optional());
    assert!(!response.property("success").expect("success").optional());
}

#[test]
fn test_shared_property_types_are_narrowed() {
    let team = intersect(&developer2(), &designer2());
    let output = team.property("output").expect("output");
    assert_eq!(output.ty, ShapeType::NUMBER);
    assert!(team.property("code").expect("code").is_method());
    assert!(team.property("design").expect("design").is_method());
}

#[test]
fn test_disjoint_property_types_become_never() {
    let a = Shape::builder("A")
        .required("id", ShapeType::STRING)
        .build()
        .expect("valid shape");
    let b = Shape::builder("B")
        .required("id", ShapeType::NUMBER)
        .build()
        .expect("valid shape");
    let merged = intersect(&a, &b);
    assert!(merged.property("id").expect("id").ty.is_never());
}

#[test]
fn test_intersection_is_commutative() {
    let ab = intersect(&developer2(), &designer2());
    let ba = intersect(&designer2(), &developer2());
    assert_eq!(ab, ba);
    assert_eq!(ba.name(), "Designer2 & Developer2");

    let ab = intersect(&artworks_data(), &error_handling());
    let ba = intersect(&error_handling(), &artworks_data());
    assert_eq!(ab, ba);
}

#[test]
fn test_intersection_is_idempotent() {
    let shape = error_handling();
    assert_eq!(intersect(&shape, &shape), shape);
}

#[test]
fn test_optional_only_when_optional_on_both_sides() {
    let a = Shape::builder("A")
        .optional("x", ShapeType::NUMBER)
        .optional("y", ShapeType::NUMBER)
        .build()
        .expect("valid shape");
    let b = Shape::builder("B")
        .required("x", ShapeType::NUMBER)
        .optional("y", ShapeType::NUMBER)
        .build()
        .expect("valid shape");
    let merged = intersect(&a, &b);
    assert!(!merged.property("x").expect("x").optional());
    assert!(merged.property("y").expect("y").optional());
}

#[test]
fn test_merge_flags() {
    let merged = merge_flags(
        PropertyFlags::OPTIONAL | PropertyFlags::READONLY,
        PropertyFlags::OPTIONAL | PropertyFlags::METHOD,
    );
    assert!(merged.contains(PropertyFlags::OPTIONAL));
    assert!(merged.contains(PropertyFlags::READONLY));
    assert!(!merged.contains(PropertyFlags::METHOD));
}

#[test]
fn test_nested_objects_are_merged() {
    let coded = Shape::anonymous()
        .required("code", ShapeType::NUMBER)
        .build()
        .expect("valid shape");
    let other = Shape::builder("ErrorCode")
        .required("error", ShapeType::object(coded))
        .build()
        .expect("valid shape");
    let merged = intersect(&error_handling(), &other);
    let error = merged.property("error").expect("error");
    assert!(!error.optional());
    let inner = error.ty.as_shape().expect("object type");
    assert!(inner.property("message").is_some());
    assert!(inner.property("code").is_some());
    assert!(inner.is_anonymous());
}

#[test]
fn test_array_elements_intersect() {
    let strings = ShapeType::array(ShapeType::union([ShapeType::STRING, ShapeType::NUMBER]));
    let numbers = ShapeType::array(ShapeType::NUMBER);
    assert_eq!(
        intersect_types(&strings, &numbers),
        ShapeType::array(ShapeType::NUMBER)
    );
    assert_eq!(
        intersect_types(&numbers, &ShapeType::NUMBER),
        ShapeType::Never
    );
}

#[test]
fn test_any_and_never_absorb() {
    assert_eq!(intersect_types(&ShapeType::Any, &ShapeType::STRING), ShapeType::Any);
    assert_eq!(intersect_types(&ShapeType::STRING, &ShapeType::Any), ShapeType::Any);
    assert_eq!(
        intersect_types(&ShapeType::Never, &ShapeType::STRING),
        ShapeType::Never
    );
    assert_eq!(
        intersect_types(&ShapeType::Never, &ShapeType::Any),
        ShapeType::Never
    );
}

#[test]
fn test_unions_distribute() {
    let left = ShapeType::union([ShapeType::STRING, ShapeType::NUMBER, ShapeType::BOOLEAN]);
    let right = ShapeType::union([ShapeType::BOOLEAN, ShapeType::STRING, ShapeType::NULL]);
    assert_eq!(
        intersect_types(&left, &right),
        ShapeType::union([ShapeType::STRING, ShapeType::BOOLEAN])
    );
    assert_eq!(
        intersect_types(&ShapeType::NULL, &left),
        ShapeType::Never
    );
}

#[test]
fn test_index_signatures_merge() {
    let a = Shape::builder("A")
        .index_signature(ShapeType::union([ShapeType::STRING, ShapeType::NUMBER]))
        .build()
        .expect("valid shape");
    let b = Shape::builder("B")
        .readonly_index_signature(ShapeType::STRING)
        .build()
        .expect("valid shape");
    let merged = intersect(&a, &b);
    let index = merged.index_signature().expect("index signature");
    assert_eq!(index.value_type, ShapeType::STRING);
    assert!(index.readonly);

    let plain = Shape::builder("C")
        .required("x", ShapeType::NUMBER)
        .build()
        .expect("valid shape");
    assert!(intersect(&plain, &a).index_signature().is_some());
}

#[test]
fn test_anonymous_intersection_stays_anonymous() {
    let a = Shape::anonymous()
        .required("x", ShapeType::NUMBER)
        .build()
        .expect("valid shape");
    let b = Shape::anonymous()
        .required("y", ShapeType::NUMBER)
        .build()
        .expect("valid shape");
    assert!(intersect(&a, &b).is_anonymous());
}

#[test]
fn test_intersect_all() {
    assert!(intersect_all(std::iter::empty()).is_none());

    let single = intersect_all([&developer2()]).expect("one member");
    assert_eq!(single.name(), "Developer2");

    let shapes = [artworks_data(), error_handling(), developer2()];
    let all = intersect_all(&shapes).expect("members");
    assert_eq!(all.name(), "ArtworksData & ErrorHandling & Developer2");
    assert_eq!(all.len(), 5);
}

fn object_union(prefix: &str, count: usize) -> ShapeType {
    ShapeType::union((0..count).map(|i| {
        ShapeType::object(
            Shape::anonymous()
                .required(&format!("{prefix}{i}"), ShapeType::STRING)
                .build()
                .expect("valid shape"),
        )
    }))
}

#[test]
fn test_oversized_distribution() {
    let left = object_union("a", 33);
    let right = object_union("b", 33);
    assert!(intersect_types(&left, &right).is_never());
    assert!(matches!(
        try_intersect_types(&left, &right),
        Err(DeclarationError::UnionTooLarge {
            left: 33,
            right: 33,
            limit: MAX_UNION_DISTRIBUTION
        })
    ));

    let a = Shape::builder("A").required("x", left.clone()).build().expect("valid shape");
    let b = Shape::builder("B").required("x", right).build().expect("valid shape");
    assert!(intersect(&a, &b).property("x").expect("x").ty.is_never());
    assert!(matches!(
        try_intersect_all([&a, &b]),
        Err(DeclarationError::UnionTooLarge { .. })
    ));

    let small = object_union("c", 4);
    let merged = try_intersect_types(&left, &small).expect("within the limit");
    assert_eq!(merged.members().len(), 33 * 4);
}
