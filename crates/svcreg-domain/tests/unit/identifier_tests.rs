//! Unit tests for identifier parsing

use svcreg_domain::Error;
use svcreg_domain::value_objects::ParsedDescriptor;

fn assert_malformed(identifier: &str) {
    match ParsedDescriptor::parse(identifier) {
        Err(Error::MalformedIdentifier { .. }) => {}
        other => panic!("Expected MalformedIdentifier for {identifier:?}, got {other:?}"),
    }
}

#[test]
fn test_url_form_components() {
    let parsed = ParsedDescriptor::parse("postgresql://admin:pw@db.internal:5432/app?pool=5").unwrap();
    assert_eq!(parsed.scheme, "postgresql");
    assert_eq!(parsed.authority, "admin:pw@db.internal:5432");
    assert_eq!(parsed.path, "/app");
    assert_eq!(parsed.path_segment(), "app");
    assert_eq!(parsed.query.get("pool"), Some("5"));
}

#[test]
fn test_scheme_only_identifier() {
    let parsed = ParsedDescriptor::parse("inmemory://").unwrap();
    assert_eq!(parsed.scheme, "inmemory");
    assert!(parsed.authority.is_empty());
    assert!(parsed.query.is_empty());
}

#[test]
fn test_scheme_is_lowercased() {
    let parsed = ParsedDescriptor::parse("InMemory://").unwrap();
    assert_eq!(parsed.scheme, "inmemory");
}

#[test]
fn test_surrounding_whitespace_is_trimmed() {
    let parsed = ParsedDescriptor::parse("  inmemory://  ").unwrap();
    assert_eq!(parsed.raw, "inmemory://");
    assert_eq!(parsed.to_string(), "inmemory://");
}

#[test]
fn test_query_values_stay_strings() {
    let parsed = ParsedDescriptor::parse("custom://host/?a=10&flag=true&name=x%20y").unwrap();
    assert_eq!(parsed.query.get("a"), Some("10"));
    assert_eq!(parsed.query.get("flag"), Some("true"));
    assert_eq!(parsed.query.get("name"), Some("x y"));
}

#[test]
fn test_duplicate_query_keys_last_wins() {
    let parsed = ParsedDescriptor::parse("custom://host?k=1&k=2").unwrap();
    assert_eq!(parsed.query.get("k"), Some("2"));
    assert_eq!(parsed.query.len(), 1);
}

#[test]
fn test_python_form_attribute_and_query() {
    let parsed = ParsedDescriptor::parse("python:svcreg.providers:FileArtifactService?root=/tmp/a").unwrap();
    assert!(parsed.is_dynamic_import());
    assert!(parsed.authority.is_empty());
    assert_eq!(parsed.query.get("root"), Some("/tmp/a"));

    let target = parsed.import_target().unwrap();
    assert_eq!(target.module, "svcreg.providers");
    assert_eq!(target.attribute.as_deref(), Some("FileArtifactService"));
    assert_eq!(target.to_string(), "svcreg.providers:FileArtifactService");
}

#[test]
fn test_python_form_dotted_attribute_kept_whole() {
    let target = ParsedDescriptor::parse("python:pkg.mod:Outer.Inner")
        .unwrap()
        .import_target()
        .unwrap();
    assert_eq!(target.module, "pkg.mod");
    assert_eq!(target.attribute.as_deref(), Some("Outer.Inner"));
}

#[test]
fn test_malformed_identifiers() {
    assert_malformed("");
    assert_malformed("   ");
    assert_malformed("no-scheme-here");
    assert_malformed("://missing-scheme");
    assert_malformed("python:");
    assert_malformed("python::Attr");
    assert_malformed("python:pkg.:Attr");
    assert_malformed("python:pkg:");
}

#[test]
fn test_from_str() {
    let parsed: ParsedDescriptor = "inmemory://".parse().unwrap();
    assert_eq!(parsed.scheme, "inmemory");
}

#[test]
fn test_authority_is_not_validated() {
    for identifier in ["redis://host:abc/0", "redis://host:99999/0", "redis://ho st/0"] {
        let parsed = ParsedDescriptor::parse(identifier)
            .unwrap_or_else(|e| panic!("Expected {identifier:?} to parse, got {e:?}"));
        assert_eq!(parsed.scheme, "redis");
        assert_eq!(parsed.path, "/0");
    }

    let parsed = ParsedDescriptor::parse("redis://host:abc/0").unwrap();
    assert_eq!(parsed.authority, "host:abc");
}

#[test]
fn test_authority_and_path_kept_as_written() {
    let parsed = ParsedDescriptor::parse("http://Host:80/a%20b").unwrap();
    assert_eq!(parsed.authority, "Host:80");
    assert_eq!(parsed.path, "/a%20b");

    let parsed = ParsedDescriptor::parse("file://localhost/tmp/a b").unwrap();
    assert_eq!(parsed.authority, "localhost");
    assert_eq!(parsed.path, "/tmp/a b");
}

#[test]
fn test_scheme_colon_form_without_authority() {
    let parsed = ParsedDescriptor::parse("inmemory:").unwrap();
    assert_eq!(parsed.scheme, "inmemory");
    assert!(parsed.authority.is_empty());
    assert!(parsed.path.is_empty());

    let parsed = ParsedDescriptor::parse("inmemory:?capacity=4").unwrap();
    assert_eq!(parsed.query.get("capacity"), Some("4"));
}

#[test]
fn test_fragment_is_dropped() {
    let parsed = ParsedDescriptor::parse("custom://host/p?k=v#frag").unwrap();
    assert_eq!(parsed.path, "/p");
    assert_eq!(parsed.query.get("k"), Some("v"));
}

#[test]
fn test_invalid_scheme_token() {
    assert_malformed("1redis://host");
    assert_malformed("re dis://host");
    assert_malformed("re_dis://host");
}
