use super::*;

#[test]
fn empty_json_is_the_default_page() {
    let cfg = EngineConfig::from_json("{}").unwrap();
    assert_eq!(cfg, EngineConfig::default());
    assert_eq!(cfg.panels.len(), 5);
    assert_eq!(cfg.burst_panel_index(), 4);
    assert_eq!(cfg.burst.initial_burst, 60);
    assert_eq!(cfg.burst.max_active, 100);
    assert_eq!(cfg.burst.palette.len(), 7);
    assert_eq!(cfg.ambient.count, 14);
}

#[test]
fn anchors_follow_document_position() {
    let cfg = EngineConfig::default();
    let n = cfg.panels.len();
    let anchors: Vec<_> = cfg
        .panels
        .iter()
        .enumerate()
        .map(|(i, p)| p.resolve_anchor(i, n))
        .collect();
    assert_eq!(anchors[0], AnchorMode::Leading);
    assert!(anchors[1..n - 1].iter().all(|a| *a == AnchorMode::Interior));
    assert_eq!(anchors[n - 1], AnchorMode::Trailing);
}

#[test]
fn single_panel_page_leads() {
    let p = PanelSpec::cinematic("only");
    assert_eq!(p.resolve_anchor(0, 1), AnchorMode::Leading);
}

#[test]
fn panel_overrides_parse() {
    let cfg = EngineConfig::from_json(
        r##"{
            "panels": [
                {"id": "a"},
                {"id": "b", "style": "reveal"},
                {"id": "c", "anchor": "interior"}
            ],
            "burst": {"palette": ["#FF0000", [0, 255, 0]]}
        }"##,
    )
    .unwrap();
    assert_eq!(cfg.panels[1].resolve_curves(AnchorMode::Interior), PanelCurves::reveal());
    assert_eq!(cfg.panels[2].resolve_anchor(2, 3), AnchorMode::Interior);
    assert_eq!(cfg.burst.palette, vec![Tone::rgb(255, 0, 0), Tone::rgb(0, 255, 0)]);
}

#[test]
fn invalid_values_are_rejected() {
    let mut cfg = EngineConfig::default();
    cfg.burst.spawn_interval = 0;
    assert!(matches!(cfg.validate(), Err(CineError::Validation(_))));

    let mut cfg = EngineConfig::default();
    cfg.burst.initial_burst = 200;
    assert!(cfg.validate().is_err());

    let mut cfg = EngineConfig::default();
    cfg.visibility_threshold = 0.0;
    assert!(cfg.validate().is_err());

    let mut cfg = EngineConfig::default();
    cfg.burst_panel = Some(9);
    assert!(cfg.validate().is_err());

    let mut cfg = EngineConfig::default();
    cfg.panels.clear();
    assert!(cfg.validate().is_err());

    let mut cfg = EngineConfig::default();
    cfg.ambient.count = MAX_AMBIENT_PARTICLES + 1;
    assert!(cfg.validate().is_err());
}

#[test]
fn malformed_json_is_a_serde_error() {
    assert!(matches!(
        EngineConfig::from_json("{\"seed\": \"nope\"}"),
        Err(CineError::Serde(_))
    ));
    assert!(matches!(
        EngineConfig::from_json("{\"unknown\": 1}"),
        Err(CineError::Serde(_))
    ));
    assert!(EngineConfig::from_json(
        r#"{"ambient": {"opacity_curve": [{"at": 0.5, "value": 1.0}, {"at": 1.0, "value": 1.0}]}}"#
    )
    .is_err());
}

#[test]
fn config_round_trips_through_json() {
    let cfg = EngineConfig::default();
    let text = serde_json::to_string(&cfg).unwrap();
    assert_eq!(EngineConfig::from_json(&text).unwrap(), cfg);
}
