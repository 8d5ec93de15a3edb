use super::*;

const ANCHORS: [AnchorMode; 3] = [
    AnchorMode::Leading,
    AnchorMode::Interior,
    AnchorMode::Trailing,
];

fn all_curves(c: &PanelCurves) -> [&ChannelCurve; 4] {
    [
        &c.scale,
        &c.desaturation,
        &c.content_opacity,
        &c.content_offset,
    ]
}

#[test]
fn built_in_tables_are_valid_curves() {
    let sets = ANCHORS
        .iter()
        .map(|&a| PanelCurves::for_anchor(a))
        .chain(std::iter::once(PanelCurves::reveal()));
    for set in sets {
        for curve in all_curves(&set) {
            let rebuilt = ChannelCurve::new(curve.points().iter().copied());
            assert!(rebuilt.is_ok(), "{curve:?}");
        }
    }
}

#[test]
fn leading_panel_content_opacity_scenario() {
    let vp = Viewport::new(1280.0, 800.0);
    let bounds = ElementBounds::new(0.0, 800.0);
    let mut panel = PanelController::for_anchor(AnchorMode::Leading);

    // Leading window: progress = offset / panel height.
    let s0 = panel.update(0.0, vp, bounds);
    assert_eq!(s0.progress, 0.0);
    assert_eq!(s0.content_opacity, 1.0);

    let s1 = panel.update(640.0, vp, bounds);
    assert!((s1.progress - 0.8).abs() < 1e-12);
    assert!((s1.content_opacity - 1.0).abs() < 1e-12);

    let s2 = panel.update(800.0, vp, bounds);
    assert_eq!(s2.progress, 1.0);
    assert_eq!(s2.content_opacity, 0.0);
    assert_eq!(s2.content_offset, -20.0);
    assert!((s2.scale - 1.05).abs() < 1e-12);
}

#[test]
fn leading_starts_resolved_and_trailing_ends_resolved() {
    let lead = PanelCurves::for_anchor(AnchorMode::Leading).evaluate(0.0);
    assert_eq!(
        (lead.scale, lead.desaturation, lead.content_opacity),
        (1.0, 0.0, 1.0)
    );
    let trail = PanelCurves::for_anchor(AnchorMode::Trailing).evaluate(1.0);
    assert_eq!(
        (trail.scale, trail.desaturation, trail.content_opacity, trail.content_offset),
        (1.0, 0.0, 1.0, 0.0)
    );
}

#[test]
fn interior_reveals_holds_and_releases() {
    let c = PanelCurves::for_anchor(AnchorMode::Interior);
    let enter = c.evaluate(0.0);
    assert_eq!(enter.content_opacity, 0.0);
    assert_eq!(enter.desaturation, 1.0);
    assert!(enter.scale > 1.0);

    let mid = c.evaluate(0.5);
    assert_eq!(
        (mid.scale, mid.desaturation, mid.content_opacity, mid.content_offset),
        (1.0, 0.0, 1.0, 0.0)
    );

    let exit = c.evaluate(1.0);
    assert_eq!(exit.content_opacity, 0.0);
    assert!(exit.desaturation > 0.0);
    assert!(exit.scale > 1.0);
}

#[test]
fn interior_opacity_has_exactly_one_visible_plateau() {
    for c in [PanelCurves::for_anchor(AnchorMode::Interior), PanelCurves::reveal()] {
        assert_eq!(c.content_opacity.plateaus(1.0, 0.0).len(), 1);
    }
}

#[test]
fn edge_panels_are_monotonic_single_direction() {
    let lead = PanelCurves::for_anchor(AnchorMode::Leading);
    let trail = PanelCurves::for_anchor(AnchorMode::Trailing);
    let mut prev_lead = f64::INFINITY;
    let mut prev_trail = f64::NEG_INFINITY;
    for i in 0..=100 {
        let p = f64::from(i) / 100.0;
        let l = lead.content_opacity.evaluate(p);
        let t = trail.content_opacity.evaluate(p);
        assert!(l <= prev_lead);
        assert!(t >= prev_trail);
        prev_lead = l;
        prev_trail = t;
    }
}

#[test]
fn interior_channels_are_continuous() {
    let c = PanelCurves::for_anchor(AnchorMode::Interior);
    for curve in all_curves(&c) {
        for w in curve.points().windows(2) {
            let p = w[1].at;
            let eps = 1e-9;
            assert!((curve.evaluate(p - eps) - curve.evaluate(p)).abs() < 1e-6);
        }
    }
}

#[test]
fn sample_invalidates_on_geometry_change() {
    use crate::scroll::source::ScrollSource;

    let mut panel = PanelController::for_anchor(AnchorMode::Interior);
    let mut src = ScrollSource::new(Viewport::new(1280.0, 800.0), 2400.0);
    let bounds = ElementBounds::new(800.0, 800.0);

    let snap = src.publish(800.0);
    let a = panel.sample(&snap, bounds);
    assert!((a.progress - 0.5).abs() < 1e-12);

    let snap = src.resize(Viewport::new(1280.0, 400.0));
    let b = panel.sample(&snap, ElementBounds::new(400.0, 400.0));
    assert_eq!(panel.visual_state(), b);
    assert_eq!(panel.progress(), b.progress);
    assert_ne!(a.progress, b.progress);
}

#[test]
fn repeated_updates_are_idempotent() {
    let vp = Viewport::new(1280.0, 800.0);
    let bounds = ElementBounds::new(800.0, 800.0);
    let mut panel = PanelController::for_anchor(AnchorMode::Interior);
    let a = panel.update(500.0, vp, bounds);
    let b = panel.update(500.0, vp, bounds);
    assert_eq!(a, b);
}
