use super::*;

#[test]
fn test_value_kinds() {
    assert_eq!(Value::from("red").kind(), ValueKind::String);
    assert_eq!(Value::from(100).kind(), ValueKind::Number);
    assert_eq!(Value::from(true).kind(), ValueKind::Boolean);
    assert_eq!(Value::Null.kind(), ValueKind::Null);
    assert_eq!(Value::function("code").kind(), ValueKind::Function);
    assert_eq!(Value::from(Record::new()).kind(), ValueKind::Object);
    assert_eq!(Value::from(vec![Value::Null]).kind(), ValueKind::Array);
    assert_eq!(ValueKind::Object.intrinsic(), None);
    assert_eq!(ValueKind::Function.intrinsic(), Some(IntrinsicKind::Function));
}

#[test]
fn test_record_preserves_insertion_order() {
    let record = Record::new()
        .with("width", 100)
        .with("colour", "red")
        .with("opacity", 0.5);
    let names: Vec<_> = record.names().collect();
    assert_eq!(names, ["width", "colour", "opacity"]);
    assert!(record.contains("colour"));
    assert!(!record.contains("color"));
    assert_eq!(record.get("width"), Some(&Value::Number(100.0)));
}

#[test]
fn test_record_insert_replaces() {
    let mut record = Record::new();
    assert_eq!(record.insert("x", 1), None);
    assert_eq!(record.insert("x", 2), Some(Value::Number(1.0)));
    assert_eq!(record.len(), 1);
}

#[test]
fn test_record_from_iterator() {
    let record: Record = [("a", 1), ("b", 2)].into_iter().collect();
    assert_eq!(record.len(), 2);
    assert!(!record.is_empty());
}

#[test]
fn test_type_of_widens_values() {
    assert_eq!(Value::from("x").type_of(), ShapeType::STRING);
    let items = Value::from(vec![Value::from(1), Value::from("a"), Value::from(2)]);
    assert_eq!(
        items.type_of(),
        ShapeType::array(ShapeType::union([ShapeType::STRING, ShapeType::NUMBER]))
    );
}

#[test]
fn test_inferred_shape_lists_all_properties_as_required() {
    let record = Record::new().with("colour", "red").with("width", 100);
    let shape = record.inferred_shape();
    assert!(shape.is_anonymous());
    assert_eq!(shape.required_properties().count(), 2);
    assert_eq!(shape.display_name(), "{ colour: string; width: number; }");
}
