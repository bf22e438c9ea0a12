use beamwindow::*;
use std::io::Write;
use tempfile::NamedTempFile;

#[test]
fn parse_full_config() -> anyhow::Result<()> {
    let cfg = WindowingConfig::from_json_str(
        r#"{
            "strategy": { "kind": "sliding", "width": 90, "period": 30 },
            "mode": { "kind": "parallel", "threads": 4, "partitions": 16 },
            "max_records": 1000
        }"#,
    )?;
    assert_eq!(cfg.strategy, WindowStrategy::sliding(90, 30)?);
    assert_eq!(cfg.mode, ExecMode::Parallel { threads: Some(4), partitions: Some(16) });
    assert_eq!(cfg.max_records, Some(1000));
    Ok(())
}

#[test]
fn missing_fields_take_defaults() -> anyhow::Result<()> {
    let cfg = WindowingConfig::from_json_str("{}")?;
    assert_eq!(cfg, WindowingConfig::default());
    assert_eq!(cfg.strategy, WindowStrategy::Global);
    assert_eq!(cfg.mode, ExecMode::Sequential);
    assert_eq!(cfg.max_records, None);

    let cfg = WindowingConfig::from_json_str(r#"{ "strategy": { "kind": "fixed", "width": 60 } }"#)?;
    assert_eq!(cfg.strategy, WindowStrategy::fixed(60)?);
    Ok(())
}

#[test]
fn invalid_values_are_rejected() {
    let bad = [
        r#"{ "strategy": { "kind": "fixed", "width": 0 } }"#,
        r#"{ "strategy": { "kind": "sliding", "width": 10, "period": -1 } }"#,
        r#"{ "strategy": { "kind": "session", "gap": 0 } }"#,
        r#"{ "mode": { "kind": "parallel", "partitions": 0 } }"#,
        r#"{ "strategy": { "kind": "hopping", "width": 10 } }"#,
        "not json",
    ];
    for raw in bad {
        assert!(WindowingConfig::from_json_str(raw).is_err(), "accepted {raw}");
    }
}

#[test]
fn validation_error_keeps_its_type() {
    let err = WindowingConfig::from_json_str(r#"{ "strategy": { "kind": "session", "gap": -5 } }"#)
        .unwrap_err();
    let window_err = err.downcast_ref::<WindowError>().expect("window error");
    assert!(window_err.is_config());
}

#[test]
fn load_from_file() -> anyhow::Result<()> {
    let mut file = NamedTempFile::new()?;
    write!(file, r#"{{ "strategy": {{ "kind": "session", "gap": 1800000 }}, "max_records": 10 }}"#)?;

    let cfg = WindowingConfig::from_file(file.path())?;
    assert_eq!(cfg.strategy, WindowStrategy::session(1_800_000)?);
    assert_eq!(cfg.max_records, Some(10));
    Ok(())
}

#[test]
fn missing_file_reports_path() {
    let dir = tempfile::tempdir().expect("tempdir");
    let path = dir.path().join("absent.json");
    let err = WindowingConfig::from_file(&path).unwrap_err();
    assert!(format!("{err:#}").contains("absent.json"));
}

#[test]
fn json_roundtrip_preserves_config() -> anyhow::Result<()> {
    let cfg = WindowingConfig::new(WindowStrategy::sliding_with_offset(60, 20, 5)?)
        .with_mode(ExecMode::Parallel { threads: None, partitions: Some(8) })
        .with_max_records(500);
    let back = WindowingConfig::from_json_str(&cfg.to_json_string()?)?;
    assert_eq!(back, cfg);
    Ok(())
}
