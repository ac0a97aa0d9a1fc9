//! Settings files, overrides, and compilation to a filter plan

use varsift::config::FilterSettings;
use varsift::filtering::{Comparison, FilterSpec, ThresholdExpr};
use varsift::VarsiftError;

#[test]
fn test_load_settings_file() {
    let dir = tempfile::TempDir::new().unwrap();
    let path = dir.path().join("filters.toml");
    std::fs::write(
        &path,
        r#"
quality_threshold = 40.0

[[info]]
key = "MQ"
threshold = "<35"

[[info]]
key = "sum(DP4[2],DP4[3])"
threshold = "<5"
"#,
    )
    .unwrap();

    let settings = FilterSettings::load(&path).unwrap();
    assert_eq!(settings.quality_threshold, 40.0);
    assert_eq!(settings.info.len(), 2);
    assert_eq!(settings.info[0].key, "MQ");
    assert_eq!(settings.info[1].threshold, "<5");

    let spec = FilterSpec::compile(&settings).unwrap();
    assert_eq!(
        spec.field_filters[0].expr,
        ThresholdExpr::Leaf(Comparison::LessThan(35.0))
    );
}

#[test]
fn test_defaults_serialize_and_reload() {
    let dir = tempfile::TempDir::new().unwrap();
    let path = dir.path().join("defaults.toml");
    let defaults = FilterSettings::mpileup_v41();
    std::fs::write(&path, defaults.to_toml().unwrap()).unwrap();

    let reloaded = FilterSettings::load(&path).unwrap();
    assert_eq!(reloaded, defaults);
    FilterSpec::compile(&reloaded).unwrap();
}

#[test]
fn test_file_replaces_defaults_then_overrides_apply() {
    // a settings file stands alone; CLI filters and quality stack on top
    let mut settings = FilterSettings {
        quality_threshold: 40.0,
        info: vec![],
    };
    settings
        .apply_overrides(&["MQ<35".to_string()], Some(25.0))
        .unwrap();
    assert_eq!(settings.quality_threshold, 25.0);
    assert_eq!(settings.info.len(), 1);
    assert_eq!(settings.info[0].key, "MQ");
    assert_eq!(settings.info[0].threshold, "<35");
}

#[test]
fn test_missing_settings_file() {
    let err = FilterSettings::load(std::path::Path::new("/nonexistent/filters.toml")).unwrap_err();
    assert!(matches!(err, VarsiftError::Io { .. }));
}

#[test]
fn test_invalid_toml_rejected() {
    let dir = tempfile::TempDir::new().unwrap();
    let path = dir.path().join("filters.toml");
    std::fs::write(&path, "quality_threshold = \"high\"").unwrap();
    assert!(matches!(
        FilterSettings::load(&path).unwrap_err(),
        VarsiftError::Toml(_)
    ));
}

#[test]
fn test_compile_surfaces_syntax_errors_with_context() {
    let dir = tempfile::TempDir::new().unwrap();
    let path = dir.path().join("filters.toml");
    std::fs::write(
        &path,
        r#"
quality_threshold = 40.0

[[info]]
key = "AF1"
threshold = ">0.05&<0.95|>2"
"#,
    )
    .unwrap();

    let settings = FilterSettings::load(&path).unwrap();
    match FilterSpec::compile(&settings).unwrap_err() {
        VarsiftError::InvalidFilterSyntax { expression, reason } => {
            assert!(expression.contains("AF1"), "expression: {expression}");
            assert!(reason.contains("cannot be combined"), "reason: {reason}");
        }
        other => panic!("unexpected error {other:?}"),
    }
}
