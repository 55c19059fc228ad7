use stack_rs::api::{
    PLOT_CONFIG_JSON_SCHEMA_V1, STACK_SNAPSHOT_JSON_SCHEMA_V1, StackSnapshot, StackedPlot,
    StackedPlotConfig,
};
use stack_rs::core::{FieldValue, StackOrientation, StackedExtent};
use stack_rs::{StackError, StackResult};

fn key(entry: &(i64, f64)) -> StackResult<FieldValue> {
    Ok(FieldValue::Integer(entry.0))
}

fn value(entry: &(i64, f64)) -> StackResult<FieldValue> {
    Ok(FieldValue::Number(entry.1))
}

fn stacked_plot() -> StackedPlot<(i64, f64)> {
    let mut plot = StackedPlot::new(StackedPlotConfig::new("volume")).expect("plot init");
    plot.set_x_accessor(key).expect("x");
    plot.set_y_accessor(value).expect("y");
    plot.add_dataset("spot", vec![(1, 2.0), (2, -1.0)])
        .expect("spot");
    plot.add_dataset("perp", vec![(2, -0.5), (3, 4.0)])
        .expect("perp");
    plot
}

#[test]
fn snapshot_captures_domain_offsets_and_extent() {
    let snapshot = stacked_plot().snapshot().expect("snapshot");
    assert_eq!(snapshot.owner_id, "volume");
    assert_eq!(snapshot.orientation, StackOrientation::Vertical);
    assert_eq!(snapshot.key_domain, vec!["1", "2", "3"]);
    assert_eq!(snapshot.datasets[0].offsets, vec![0.0, 0.0]);
    assert_eq!(snapshot.datasets[1].offsets, vec![-1.0, 0.0]);
    assert_eq!(snapshot.datasets[1].stacked_range, Some((-1.5, 4.0)));
    assert_eq!(snapshot.extent, StackedExtent { min: -1.5, max: 4.0 });
}

#[test]
fn snapshot_is_none_before_stacking() {
    let plot = StackedPlot::<(i64, f64)>::new(StackedPlotConfig::new("p")).expect("plot init");
    assert!(plot.snapshot().is_none());
}

#[test]
fn snapshot_contract_round_trips_and_accepts_bare_payload() {
    let snapshot = stacked_plot().snapshot().expect("snapshot");
    let json = snapshot.to_json_contract_v1_pretty().expect("serialize");
    assert!(json.contains(&format!(
        "\"schema_version\": {STACK_SNAPSHOT_JSON_SCHEMA_V1}"
    )));
    assert_eq!(
        StackSnapshot::from_json_compat_str(&json).expect("parse contract"),
        snapshot
    );

    let bare = serde_json::to_string(&snapshot).expect("bare");
    assert_eq!(
        StackSnapshot::from_json_compat_str(&bare).expect("parse bare"),
        snapshot
    );
}

#[test]
fn snapshot_contract_rejects_unknown_schema() {
    let snapshot = stacked_plot().snapshot().expect("snapshot");
    let json = snapshot
        .to_json_contract_v1_pretty()
        .expect("serialize")
        .replace("\"schema_version\": 1", "\"schema_version\": 99");
    assert!(StackSnapshot::from_json_compat_str(&json).is_err());
}

#[test]
fn config_contract_round_trips() {
    let config = StackedPlotConfig::new("bars")
        .with_orientation(StackOrientation::Horizontal)
        .with_anchored(false)
        .with_missing_value(0.5);
    let json = config.to_json_contract_v1_pretty().expect("serialize");
    assert!(json.contains(&format!(
        "\"schema_version\": {PLOT_CONFIG_JSON_SCHEMA_V1}"
    )));
    assert_eq!(
        StackedPlotConfig::from_json_compat_str(&json).expect("parse"),
        config
    );
}

#[test]
fn bare_config_uses_defaults_and_is_validated() {
    let config =
        StackedPlotConfig::from_json_compat_str(r#"{"owner_id":"plot-7"}"#).expect("parse");
    assert_eq!(config, StackedPlotConfig::new("plot-7"));

    let err = StackedPlotConfig::from_json_compat_str(r#"{"owner_id":""}"#)
        .expect_err("empty owner");
    assert!(matches!(err, StackError::InvalidConfig(_)));

    assert!(StackedPlotConfig::from_json_compat_str("not json").is_err());
}
