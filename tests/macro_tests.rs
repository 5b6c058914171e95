use serde_ace::{ace, serialize, AceTable, AceValue, Key, Number};

#[test]
fn test_ace_macro_nil() {
    let value = ace!(nil);
    assert_eq!(value, AceValue::Nil);
}

#[test]
fn test_ace_macro_booleans() {
    let true_val = ace!(true);
    assert_eq!(true_val, AceValue::Bool(true));

    let false_val = ace!(false);
    assert_eq!(false_val, AceValue::Bool(false));
}

#[test]
fn test_ace_macro_numbers() {
    let int_val = ace!(42);
    assert_eq!(int_val, AceValue::Number(Number::Integer(42)));

    let float_val = ace!(3.5);
    assert_eq!(float_val, AceValue::Number(Number::Float(3.5)));

    let negative_val = ace!(-123);
    assert_eq!(negative_val, AceValue::Number(Number::Integer(-123)));
}

#[test]
fn test_ace_macro_strings() {
    let string_val = ace!("hello world");
    assert_eq!(string_val, AceValue::String("hello world".to_string()));

    let owned = String::from("owned");
    assert_eq!(ace!(owned), AceValue::from("owned"));
}

#[test]
fn test_ace_macro_sequences() {
    let empty = ace!([]);
    assert_eq!(empty, AceValue::Table(AceTable::new()));

    let numbers = ace!([1, 2, 3]);
    let table = numbers.as_table().unwrap();
    assert!(table.is_sequence());
    assert_eq!(table.get(0), Some(&AceValue::from(1)));
    assert_eq!(table.get(2), Some(&AceValue::from(3)));

    let mixed = ace!([1, "hello", true, nil, 5]);
    let table = mixed.as_table().unwrap();
    assert_eq!(table.len(), 4);
    assert!(!table.contains_key(3));
    assert_eq!(table.get(4), Some(&AceValue::from(5)));
}

#[test]
fn test_ace_macro_tables() {
    let empty = ace!({});
    assert_eq!(empty, AceValue::Table(AceTable::new()));

    let record = ace!({
        "name": "Alice",
        "age": 30,
        0: "first"
    });

    let table = record.as_table().unwrap();
    assert_eq!(table.len(), 3);
    assert_eq!(table.get("name"), Some(&AceValue::from("Alice")));
    assert_eq!(table.get("age"), Some(&AceValue::from(30)));
    assert_eq!(table.get(Key::Integer(0)), Some(&AceValue::from("first")));
}

#[test]
fn test_ace_macro_nested() {
    let nested = ace!({
        "user": {
            "id": 123,
            "name": "Bob",
            "active": true
        },
        "tags": ["admin", "developer"],
        "count": 42
    });

    let table = nested.as_table().unwrap();
    assert_eq!(table.len(), 3);

    let user = table.get("user").and_then(AceValue::as_table).unwrap();
    assert_eq!(user.get("id"), Some(&AceValue::from(123)));
    assert_eq!(user.get("active"), Some(&AceValue::Bool(true)));

    let tags = table.get("tags").and_then(AceValue::as_table).unwrap();
    assert_eq!(tags.len(), 2);
    assert_eq!(tags.get(1), Some(&AceValue::from("developer")));
}

#[test]
fn test_ace_macro_serializes() {
    let value = ace!({"list": ["x", nil, "z"]});
    assert_eq!(
        serialize(&[value]).unwrap(),
        "^1^T^Slist^T^N1^Sx^N3^Sz^t^t^^"
    );
}

#[test]
fn test_ace_value_methods() {
    let nil_val = ace!(nil);
    assert!(nil_val.is_nil());
    assert!(!nil_val.is_bool());
    assert!(!nil_val.is_number());
    assert!(!nil_val.is_string());
    assert!(!nil_val.is_table());

    let bool_val = ace!(true);
    assert!(bool_val.is_bool());
    assert_eq!(bool_val.as_bool(), Some(true));

    let str_val = ace!("hello");
    assert!(str_val.is_string());
    assert_eq!(str_val.as_str(), Some("hello"));

    let num_val = ace!(2.5);
    assert_eq!(num_val.as_f64(), Some(2.5));
    assert_eq!(num_val.as_i64(), None);

    let mut table_val = ace!({"key": "value"});
    assert!(table_val.is_table());
    table_val
        .as_table_mut()
        .unwrap()
        .insert("other", AceValue::from(1));
    assert_eq!(table_val.as_table().unwrap().len(), 2);
}
