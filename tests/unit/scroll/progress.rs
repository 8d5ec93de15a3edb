use super::*;

const VP: Viewport = Viewport {
    width: 1280.0,
    height: 800.0,
};

#[test]
fn leading_window_spans_the_panel_height() {
    let w = ScrollWindow::for_anchor(AnchorMode::Leading);
    let b = ElementBounds::new(0.0, 800.0);
    assert_eq!(compute_progress(w, 0.0, VP, b), 0.0);
    assert!((compute_progress(w, 400.0, VP, b) - 0.5).abs() < 1e-12);
    assert_eq!(compute_progress(w, 800.0, VP, b), 1.0);
}

#[test]
fn interior_window_runs_from_bottom_entry_to_top_exit() {
    let w = ScrollWindow::for_anchor(AnchorMode::Interior);
    let b = ElementBounds::new(1600.0, 800.0);
    assert_eq!(w.scroll_range(VP, b), (800.0, 2400.0));
    assert_eq!(compute_progress(w, 800.0, VP, b), 0.0);
    assert!((compute_progress(w, 1600.0, VP, b) - 0.5).abs() < 1e-12);
    assert_eq!(compute_progress(w, 2400.0, VP, b), 1.0);
}

#[test]
fn trailing_window_finishes_at_page_bottom() {
    let w = ScrollWindow::for_anchor(AnchorMode::Trailing);
    let b = ElementBounds::new(3200.0, 800.0);
    // Document height 4000, max scroll 3200.
    assert_eq!(w.scroll_range(VP, b), (2400.0, 3200.0));
    assert_eq!(compute_progress(w, 3200.0, VP, b), 1.0);
}

#[test]
fn progress_is_clamped_outside_the_window() {
    let w = ScrollWindow::for_anchor(AnchorMode::Interior);
    let b = ElementBounds::new(1600.0, 800.0);
    assert_eq!(compute_progress(w, -10_000.0, VP, b), 0.0);
    assert_eq!(compute_progress(w, 10_000.0, VP, b), 1.0);
}

#[test]
fn progress_is_monotonic_in_scroll_offset() {
    for anchor in [AnchorMode::Leading, AnchorMode::Interior, AnchorMode::Trailing] {
        let w = ScrollWindow::for_anchor(anchor);
        let b = ElementBounds::new(800.0, 800.0);
        let mut prev = -1.0;
        for i in -50..=400 {
            let p = compute_progress(w, f64::from(i) * 10.0, VP, b);
            assert!((0.0..=1.0).contains(&p));
            assert!(p >= prev, "{anchor:?} regressed at offset {}", i * 10);
            prev = p;
        }
    }
}

#[test]
fn degenerate_geometry_yields_zero() {
    let w = ScrollWindow::for_anchor(AnchorMode::Interior);
    let b = ElementBounds::new(0.0, 800.0);
    assert_eq!(compute_progress(w, 100.0, Viewport::new(800.0, 0.0), b), 0.0);
    let leading = ScrollWindow::for_anchor(AnchorMode::Leading);
    assert_eq!(
        compute_progress(leading, 100.0, VP, ElementBounds::new(0.0, 0.0)),
        0.0
    );
    assert_eq!(compute_progress(w, f64::NAN, VP, b), 0.0);
}

#[test]
fn tracker_caches_and_invalidates() {
    let mut t = ProgressTracker::new(ScrollWindow::for_anchor(AnchorMode::Leading));
    let b = ElementBounds::new(0.0, 800.0);
    assert_eq!(t.last(), None);
    let p = t.update(200.0, VP, b);
    assert!((p - 0.25).abs() < 1e-12);
    assert_eq!(t.update(200.0, VP, b), p);
    assert_eq!(t.last(), Some(p));
    t.invalidate();
    assert_eq!(t.last(), None);
    // Resized panel: same offset, taller element.
    let p2 = t.update(200.0, Viewport::new(1280.0, 1600.0), ElementBounds::new(0.0, 1600.0));
    assert!((p2 - 0.125).abs() < 1e-12);
}

#[test]
fn visible_ratio_tracks_overlap() {
    let b = ElementBounds::new(800.0, 800.0);
    assert_eq!(b.visible_ratio(0.0, VP), 0.0);
    assert!((b.visible_ratio(400.0, VP) - 0.5).abs() < 1e-12);
    assert_eq!(b.visible_ratio(800.0, VP), 1.0);
    assert!((b.visible_ratio(1200.0, VP) - 0.5).abs() < 1e-12);
    assert_eq!(b.visible_ratio(400.0, Viewport::new(0.0, 0.0)), 0.0);
}
