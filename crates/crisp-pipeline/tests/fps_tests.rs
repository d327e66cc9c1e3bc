use crisp_pipeline::FpsCounter;
use std::time::Duration;

#[test]
fn test_fps_from_elapsed() {
    let mut fps = FpsCounter::new();
    let value = fps.update(Duration::from_millis(500)).unwrap();
    assert!((value - 2.0).abs() < 1e-9);
}

#[test]
fn test_zero_elapsed_keeps_prior_value() {
    let mut fps = FpsCounter::new();
    fps.update(Duration::from_millis(100));
    let value = fps.update(Duration::ZERO).unwrap();
    assert!((value - 10.0).abs() < 1e-9);
}

#[test]
fn test_zero_elapsed_before_any_sample_is_undefined() {
    let mut fps = FpsCounter::new();
    assert_eq!(fps.update(Duration::ZERO), None);
    assert_eq!(fps.value(), None);
}

#[test]
fn test_only_latest_sample_is_kept() {
    let mut fps = FpsCounter::new();
    fps.update(Duration::from_millis(100));
    fps.update(Duration::from_millis(250));
    let value = fps.value().unwrap();
    assert!((value - 4.0).abs() < 1e-9);
}
