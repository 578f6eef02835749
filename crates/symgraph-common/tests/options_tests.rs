use super::*;

#[test]
fn test_defaults_include_primitive_aliases() {
    let options = EngineOptions::default();
    assert_eq!(options.universal_root, "System.Object");
    assert_eq!(options.canonical_name("int"), Some("System.Int32"));
    assert_eq!(options.canonical_name("string"), Some("System.String"));
    assert_eq!(options.canonical_name("Int32"), None);
    assert_eq!(
        options.nullable_wrapper.as_deref(),
        Some("System.Nullable`1")
    );
    assert_eq!(options.implicit_conversions, numeric_conversions());
}

#[test]
fn test_default_numeric_conversions_widen_only() {
    let rules = numeric_conversions();
    let has = |from: &str, to: &str| rules.contains(&ConversionRule::new(from, to));

    assert!(has("System.Int32", "System.Int64"));
    assert!(has("System.Int32", "System.Double"));
    assert!(has("System.Char", "System.UInt16"));
    assert!(has("System.Single", "System.Double"));
    assert!(!has("System.Double", "System.Int32"));
    assert!(!has("System.Int64", "System.Int32"));
    assert!(!has("System.Int32", "System.Char"));
    assert!(!has("System.Double", "System.Decimal"));
    assert!(rules.iter().all(|rule| rule.from != rule.to));
}

#[test]
fn test_empty_json_yields_defaults() {
    let options = EngineOptions::from_json_str("{}").unwrap();
    assert_eq!(options, EngineOptions::default());
}

#[test]
fn test_json_overrides_fields() {
    let json = r#"{
        "universalRoot": "Core.Any",
        "nullableWrapper": null,
        "aliases": { "i32": "Core.Int" },
        "implicitConversions": [{ "from": "Core.Int", "to": "Core.Float" }],
        "walkerPoolCapacity": 2
    }"#;
    let options = EngineOptions::from_json_str(json).unwrap();
    assert_eq!(options.universal_root, "Core.Any");
    assert_eq!(options.nullable_wrapper, None);
    assert_eq!(options.canonical_name("i32"), Some("Core.Int"));
    assert_eq!(options.canonical_name("int"), None);
    assert_eq!(
        options.implicit_conversions,
        vec![ConversionRule::new("Core.Int", "Core.Float")]
    );
    assert_eq!(options.walker_pool_capacity, 2);
}

#[test]
fn test_malformed_json_is_parse_error() {
    let err = EngineOptions::from_json_str("{ \"aliases\": 3 }").unwrap_err();
    assert!(matches!(err, ConfigError::Parse(_)));
}

#[test]
fn test_empty_alias_target_rejected() {
    let err = EngineOptions::from_json_str(r#"{ "aliases": { "int": " " } }"#).unwrap_err();
    assert!(matches!(err, ConfigError::EmptyAlias { alias } if alias == "int"));
}

#[test]
fn test_empty_conversion_endpoint_rejected() {
    let options = EngineOptions::default().with_implicit_conversion("System.Int32", "");
    assert!(matches!(
        options.validate(),
        Err(ConfigError::EmptyConversion { .. })
    ));
}

#[test]
fn test_builder_helpers() {
    let options = EngineOptions::default()
        .with_alias("nint", "System.IntPtr")
        .with_implicit_conversion("N.Meters", "System.Double");
    assert_eq!(options.canonical_name("nint"), Some("System.IntPtr"));
    assert_eq!(options.implicit_conversions.len(), numeric_conversions().len() + 1);
    assert_eq!(
        options.implicit_conversions.last(),
        Some(&ConversionRule::new("N.Meters", "System.Double"))
    );
    assert!(options.validate().is_ok());
}
