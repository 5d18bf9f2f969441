use pretty_assertions::assert_eq;
use qrystr::{Qs, Value};
use serde::Deserialize;

fn qs() -> Qs {
    Qs::new("a[b]=123&a[g]=h&a[g]=i&d[]=1.05&j=true&big=9999999999&neg=-4&whole=12.00&ids[]=1&ids[]=2&ids[]=3")
        .unwrap()
}

#[test]
fn get_string() {
    let qs = qs();
    assert_eq!(qs.get_string(&["a", "b"]), "123");
    assert_eq!(qs.get_string(&["a", "g"]), "h");
    assert_eq!(qs.get_string(&["missing"]), "");
}

#[test]
fn get_string_slice() {
    let qs = qs();
    assert_eq!(qs.get_string_slice(&["a", "g"]), ["h", "i"]);
    assert_eq!(qs.get_string_slice(&["missing"]), Vec::<String>::new());

    qs.set([Value::Int(1), Value::Bool(false)], &["mixed"]);
    assert_eq!(qs.get_string_slice(&["mixed"]), ["1", "false"]);
}

#[test]
fn get_integers() {
    let qs = qs();
    assert_eq!(qs.get_int(&["a", "b"]), 123);
    assert_eq!(qs.get_i32(&["a", "b"]), 123);
    assert_eq!(qs.get_i64(&["a", "b"]), 123);
    assert_eq!(qs.get_i64(&["neg"]), -4);
    assert_eq!(qs.get_i64(&["whole"]), 12);

    // not an integer
    assert_eq!(qs.get_int(&["d"]), 0);
    assert_eq!(qs.get_int(&["a", "g"]), 0);
    assert_eq!(qs.get_int(&["missing"]), 0);

    // out of range for i32
    assert_eq!(qs.get_i64(&["big"]), 9_999_999_999);
    assert_eq!(qs.get_i32(&["big"]), 0);
}

#[test]
fn get_floats() {
    let qs = qs();
    assert_eq!(qs.get_f64(&["d"]), 1.05);
    assert_eq!(qs.get_f32(&["d"]), 1.05_f32);
    assert_eq!(qs.get_f64(&["a", "b"]), 123.0);
    assert_eq!(qs.get_f64(&["a", "g"]), 0.0);
    assert_eq!(qs.get_f32(&["missing"]), 0.0);
}

#[test]
fn get_bool() {
    let qs = qs();
    assert!(qs.get_bool(&["j"]));
    assert!(!qs.get_bool(&["a", "g"]));
    assert!(!qs.get_bool(&["missing"]));

    qs.set(["T"], &["flag"]);
    assert!(qs.get_bool(&["flag"]));
    qs.set([1], &["flag"]);
    assert!(qs.get_bool(&["flag"]));
    qs.set([0.0], &["flag"]);
    assert!(!qs.get_bool(&["flag"]));
}

#[test]
fn typed_accessors_on_stored_scalars() {
    let qs = Qs::new("").unwrap();
    qs.add(2.9, &["f"]);
    qs.add(true, &["b"]);
    assert_eq!(qs.get_int(&["f"]), 2);
    assert_eq!(qs.get_string(&["f"]), "2.9");
    assert_eq!(qs.get_i64(&["b"]), 1);
    assert_eq!(qs.get_f64(&["b"]), 1.0);
}

#[test]
fn get_as() {
    let qs = qs();
    assert_eq!(qs.get_as::<u16, _>(&["a", "b"]), Some(123));
    assert_eq!(qs.get_as::<u8, _>(&["big"]), None);
    assert_eq!(qs.get_as::<f64, _>(&["d"]), Some(1.05));
    assert_eq!(qs.get_as::<bool, _>(&["j"]), Some(true));
    assert_eq!(qs.get_as::<String, _>(&["a", "g"]), Some("h".to_owned()));
    assert_eq!(qs.get_as::<i32, _>(&["missing"]), None);
}

#[test]
fn get_as_enum() {
    #[derive(Debug, Deserialize, PartialEq)]
    #[serde(rename_all = "lowercase")]
    enum Sort {
        Asc,
        Desc,
    }

    let qs = Qs::new("sort=desc&bad=sideways").unwrap();
    assert_eq!(qs.get_as::<Sort, _>(&["sort"]), Some(Sort::Desc));
    assert_eq!(qs.get_as::<Sort, _>(&["bad"]), None);
    assert_ne!(qs.get_as::<Sort, _>(&["sort"]), Some(Sort::Asc));
}

#[test]
fn get_all_as() {
    let qs = qs();
    assert_eq!(qs.get_all_as::<u32, _>(&["ids"]), Some(vec![1, 2, 3]));
    assert_eq!(qs.get_all_as::<u32, _>(&["a", "g"]), None);
    assert_eq!(qs.get_all_as::<u32, _>(&["missing"]), Some(vec![]));
}

#[test]
fn values_to_json() {
    let qs = qs();
    let json = serde_json::to_value(qs.get_all(&["a", "g"])).unwrap();
    assert_eq!(json, serde_json::json!(["h", "i"]));
}
