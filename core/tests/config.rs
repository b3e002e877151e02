use cartview_core::{error::CartError, AssemblyConfig, MissingMatchPolicy, SizeJoin};

fn write_temp(name: &str, contents: &str) -> std::path::PathBuf {
    let path = std::env::temp_dir().join(format!("cartview-{}-{name}", std::process::id()));
    std::fs::write(&path, contents).unwrap();
    path
}

#[test]
fn defaults_flag_and_honour_cart_selection() {
    let config = AssemblyConfig::default();
    assert_eq!(config.missing_match, MissingMatchPolicy::Flag);
    assert_eq!(config.size_join, SizeJoin::CartSelection);
    assert!(config.log_missing);
}

#[test]
fn partial_json_fills_defaults() {
    let config = AssemblyConfig::from_json(r#"{ "size_join": "product_item" }"#).unwrap();
    assert_eq!(config.size_join, SizeJoin::ProductItem);
    assert_eq!(config.missing_match, MissingMatchPolicy::Flag);
    assert!(config.log_missing);
}

#[test]
fn load_reads_file() {
    let path = write_temp(
        "omit.json",
        r#"{ "missing_match": "omit", "size_join": "cart_selection", "log_missing": false }"#,
    );
    let config = AssemblyConfig::load(&path).unwrap();
    std::fs::remove_file(&path).ok();

    assert_eq!(config.missing_match, MissingMatchPolicy::Omit);
    assert!(!config.log_missing);
}

#[test]
fn unknown_policy_is_rejected() {
    let path = write_temp("bad.json", r#"{ "missing_match": "guess" }"#);
    let err = AssemblyConfig::load(&path).unwrap_err();
    std::fs::remove_file(&path).ok();

    assert!(matches!(err, CartError::Config { .. }), "unexpected error: {err}");
}

#[test]
fn missing_file_is_a_config_error() {
    let err = AssemblyConfig::load("/nonexistent/cartview.json").unwrap_err();
    match err {
        CartError::Config { path, .. } => assert_eq!(path, "/nonexistent/cartview.json"),
        other => panic!("unexpected error: {other}"),
    }
}

#[test]
fn malformed_document_is_invalid_config() {
    let err = AssemblyConfig::from_json(r#"{ "size_join": "#).unwrap_err();
    assert!(matches!(err, CartError::InvalidConfig(_)), "unexpected error: {err}");

    let err = AssemblyConfig::from_json(r#"{ "size_join": "by_colour" }"#).unwrap_err();
    match err {
        CartError::InvalidConfig(reason) => assert!(reason.contains("by_colour"), "reason: {reason}"),
        other => panic!("unexpected error: {other}"),
    }
}
