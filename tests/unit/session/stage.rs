use super::*;

fn stage() -> Stage {
    Stage::new(&EngineConfig::default(), Viewport::new(320.0, 200.0)).unwrap()
}

#[test]
fn starts_at_top_with_burst_idle() {
    let mut s = stage();
    assert_eq!(s.snapshot().offset, 0.0);
    assert_eq!(s.page().document_height(), 1000.0);
    assert!(!s.burst().is_running());
    let f = s.tick();
    assert_eq!(f.tick, 1);
    assert_eq!(f.panels.len(), 5);
    assert_eq!(f.burst_state, BurstState::Idle);
    assert!(f.burst.is_none());
    assert!(f.ambient.is_some());
    assert_eq!(f.indicator.fill, 0.0);
}

#[test]
fn reaching_the_host_panel_starts_the_burst() {
    let mut s = stage();
    s.on_scroll(800.0);
    assert!(s.burst().is_running());
    assert_eq!(s.burst().active_count(), 60);
    let f = s.tick();
    assert_eq!(f.burst_state, BurstState::Running);
    assert!(f.burst.is_some());
    assert!(f.burst_particles <= 100);
    assert_eq!(f.indicator.fill, 1.0);
}

#[test]
fn half_visibility_is_the_threshold() {
    let mut s = stage();
    // Host panel spans 800..1000; offset 700 shows its top half.
    s.on_scroll(700.0);
    assert!(s.burst().is_running());
    s.on_scroll(650.0);
    assert!(!s.burst().is_running());
    assert_eq!(s.burst().active_count(), 0);
}

#[test]
fn scrolling_away_and_back_restarts_the_session() {
    let mut s = stage();
    s.on_scroll(800.0);
    for _ in 0..30 {
        s.tick();
    }
    assert_eq!(s.burst().ticks(), 30);
    s.on_scroll(0.0);
    assert!(!s.burst().is_running());
    s.on_scroll(800.0);
    assert_eq!(s.burst().ticks(), 0);
    assert_eq!(s.burst().active_count(), 60);
}

#[test]
fn scroll_updates_are_idempotent() {
    let mut s = stage();
    let a = s.on_scroll(420.0).to_vec();
    let b = s.on_scroll(420.0).to_vec();
    assert_eq!(a, b);
}

#[test]
fn resize_keeps_running_burst_and_page_position() {
    let mut s = stage();
    s.on_scroll(800.0);
    s.tick();
    let count = s.burst().active_count();
    let states = s.on_resize(Viewport::new(640.0, 400.0)).to_vec();
    assert_eq!(states.len(), 5);
    assert!(s.burst().is_running());
    assert_eq!(s.burst().active_count(), count);
    assert_eq!(s.page().document_height(), 2000.0);
    assert_eq!(s.snapshot().offset, 1600.0);
    let f = s.tick();
    let frame = f.burst.unwrap();
    assert_eq!((frame.width, frame.height), (640, 400));
}

#[test]
fn cancel_stops_burst_until_next_visibility_edge() {
    let mut s = stage();
    s.on_scroll(800.0);
    s.burst_mut().cancel();
    assert!(s.tick().burst.is_none());
    s.on_scroll(800.0);
    assert!(s.burst().is_running());
}

#[test]
fn composite_stacks_burst_over_ambient() {
    let mut s = stage();
    s.on_scroll(800.0);
    for _ in 0..5 {
        s.tick();
    }
    let f = s.tick();
    let flat = f.composite().unwrap().unwrap();
    assert_eq!((flat.width, flat.height), (320, 200));
    let ambient_cov = f.ambient.map(FrameRGBA::covered_pixels).unwrap_or(0);
    assert!(flat.covered_pixels() >= ambient_cov);
}

#[test]
fn ambient_clock_follows_fps() {
    let mut s = stage();
    for _ in 0..60 {
        s.tick();
    }
    assert_eq!(s.ticks(), 60);
    assert!((s.ambient().elapsed_secs() - 1.0).abs() < 1e-9);
}

#[test]
fn invalid_config_is_rejected() {
    let mut cfg = EngineConfig::default();
    cfg.burst.spawn_interval = 0;
    assert!(Stage::new(&cfg, Viewport::new(10.0, 10.0)).is_err());
}
