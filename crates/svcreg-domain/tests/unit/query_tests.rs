//! Unit tests for query parameters

use svcreg_domain::Error;
use svcreg_domain::value_objects::QueryParams;

#[test]
fn test_from_query_decodes_values() {
    let params = QueryParams::from_query("path=%2Ftmp%2Fx&mode=a+b");
    assert_eq!(params.get("path"), Some("/tmp/x"));
    assert_eq!(params.get("mode"), Some("a b"));
}

#[test]
fn test_parse_typed_value() {
    let params = QueryParams::new().with("ttl", "300").with("bad", "soon");
    assert_eq!(params.parse::<u64>("ttl").unwrap(), Some(300));
    assert_eq!(params.parse::<u64>("missing").unwrap(), None);
    assert!(params.parse::<u64>("bad").is_err());
}

#[test]
fn test_flag_values() {
    let params = QueryParams::from_query("a=true&b=0&c=&d=maybe");
    assert!(params.flag("a").unwrap());
    assert!(!params.flag("b").unwrap());
    assert!(params.flag("c").unwrap());
    assert!(!params.flag("absent").unwrap());
    assert!(params.flag("d").is_err());
}

#[test]
fn test_require_missing_key() {
    let params = QueryParams::new();
    match params.require("root") {
        Err(Error::InvalidArgument { message }) => assert!(message.contains("root")),
        other => panic!("Expected InvalidArgument error, got {other:?}"),
    }
}

#[test]
fn test_ensure_only_rejects_unexpected_keys() {
    let params = QueryParams::new().with("root", "/tmp").with("colour", "blue");
    assert!(params.ensure_only(&["root", "colour"]).is_ok());
    let err = params.ensure_only(&["root"]).unwrap_err();
    assert!(err.to_string().contains("colour"));
}

#[test]
fn test_iteration_is_key_ordered() {
    let params = QueryParams::from_query("b=2&a=1");
    let keys: Vec<&str> = params.iter().map(|(k, _)| k).collect();
    assert_eq!(keys, vec!["a", "b"]);
}
