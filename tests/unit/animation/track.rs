use super::*;

fn drift_x() -> LoopTrack {
    LoopTrack::new(&[0.0, 20.0, -10.0, 15.0, 0.0], 8.0, Ease::InOutQuad).unwrap()
}

#[test]
fn keyframes_hit_at_even_spacing() {
    let t = drift_x();
    assert_eq!(t.sample(0.0), 0.0);
    assert!((t.sample(2.0) - 20.0).abs() < 1e-9);
    assert!((t.sample(4.0) + 10.0).abs() < 1e-9);
    assert!((t.sample(6.0) - 15.0).abs() < 1e-9);
}

#[test]
fn loops_with_period() {
    let t = drift_x();
    for s in [0.3, 1.7, 5.2] {
        assert!((t.sample(s) - t.sample(s + 8.0)).abs() < 1e-9);
        assert!((t.sample(s) - t.sample(s + 80.0)).abs() < 1e-9);
    }
}

#[test]
fn closed_loop_is_continuous_at_wrap() {
    let t = drift_x();
    assert!((t.sample(8.0 - 1e-7) - t.sample(8.0)).abs() < 1e-3);
}

#[test]
fn delay_holds_first_value() {
    let t = drift_x().with_delay(3.0);
    assert_eq!(t.sample(0.0), 0.0);
    assert_eq!(t.sample(2.9), 0.0);
    assert_eq!(t.phase(1.0), None);
    assert!((t.sample(5.0) - 20.0).abs() < 1e-9);
}

#[test]
fn samples_stay_within_bounds() {
    let t = drift_x();
    let (lo, hi) = t.bounds();
    assert_eq!((lo, hi), (-10.0, 20.0));
    for i in 0..400 {
        let v = t.sample(i as f64 * 0.05);
        assert!(v >= lo - 1e-9 && v <= hi + 1e-9);
    }
}

#[test]
fn rejects_bad_tracks() {
    assert!(LoopTrack::new(&[1.0], 1.0, Ease::Linear).is_err());
    assert!(LoopTrack::new(&[1.0, 2.0], 0.0, Ease::Linear).is_err());
    assert!(LoopTrack::new(&[1.0, 2.0], f64::NAN, Ease::Linear).is_err());
}
