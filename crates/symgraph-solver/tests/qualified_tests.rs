use super::*;

#[test]
fn test_parse_plain_name() {
    let name = QualifiedName::parse("System.Int32").unwrap();
    assert_eq!(name.name(), "Int32");
    assert_eq!(name.namespace().collect::<Vec<_>>(), vec!["System"]);
    assert_eq!(name.arity(), 0);
    assert_eq!(name.to_string(), "System.Int32");
}

#[test]
fn test_parse_generic_arity() {
    let name: QualifiedName = "System.Collections.Generic.IEnumerable`1".parse().unwrap();
    assert_eq!(name.name(), "IEnumerable");
    assert_eq!(name.arity(), 1);
    assert_eq!(
        name.namespace().collect::<Vec<_>>(),
        vec!["System", "Collections", "Generic"]
    );
    assert_eq!(name.to_string(), "System.Collections.Generic.IEnumerable`1");
}

#[test]
fn test_global_namespace_name() {
    let name = QualifiedName::parse("int").unwrap();
    assert_eq!(name.name(), "int");
    assert_eq!(name.namespace().count(), 0);
}

#[test]
fn test_arity_distinguishes_names() {
    let open = QualifiedName::parse("System.IComparable`1").unwrap();
    let plain = QualifiedName::parse("System.IComparable").unwrap();
    assert!(!open.matches(&plain));
    assert_eq!(open.name(), plain.name());
}

#[test]
fn test_new_matches_parse() {
    let built = QualifiedName::new(["System", "Collections"], "IEnumerable", 0);
    let parsed = QualifiedName::parse("System.Collections.IEnumerable").unwrap();
    assert!(built.matches(&parsed));
}

#[test]
fn test_invalid_names_rejected() {
    for text in ["", "  ", "System..Int32", "System.", "List`x", "List<int>", "A.B`"] {
        assert!(
            matches!(
                QualifiedName::parse(text),
                Err(ResolveError::InvalidQualifiedName(_))
            ),
            "expected {text:?} to be rejected"
        );
    }
}
